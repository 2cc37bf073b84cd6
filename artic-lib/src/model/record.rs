//! Artwork record

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Stable identifier of an artwork in the collection.
///
/// This is the only key used for selection and caching. Row positions and
/// record object identity never are, since a refetch produces new `Record`
/// values for the same logical artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Returns the raw integer id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single artwork entry.
///
/// Everything except `id` is display payload. The browsing core never
/// inspects or validates it; it is kept as the raw JSON object the API
/// returned so unknown fields pass through untouched.
///
/// # Example
///
/// ```
/// use artic_lib::model::Record;
///
/// let record = Record::new(27992)
///     .set("title", "A Sunday on La Grande Jatte")
///     .set("date_start", 1884);
///
/// assert_eq!(record.id().get(), 27992);
/// assert_eq!(record.title(), Some("A Sunday on La Grande Jatte"));
/// assert_eq!(record.date_start(), Some(1884));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a record with the given id and no display fields.
    pub fn new(id: u64) -> Self {
        Self {
            id: RecordId(id),
            fields: Map::new(),
        }
    }

    /// Sets a display field, returning the record for chaining.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Returns the stable record id.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the raw display field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns all display fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    // =========================================================================
    // Display accessors
    // =========================================================================

    /// Returns a string field, or `None` when it is missing, null, or not a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns an integer field, or `None` when it is missing, null, or not an integer.
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(Value::as_i64)
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn place_of_origin(&self) -> Option<&str> {
        self.get_str("place_of_origin")
    }

    pub fn artist_display(&self) -> Option<&str> {
        self.get_str("artist_display")
    }

    pub fn inscriptions(&self) -> Option<&str> {
        self.get_str("inscriptions")
    }

    pub fn date_start(&self) -> Option<i64> {
        self.get_i64("date_start")
    }

    pub fn date_end(&self) -> Option<i64> {
        self.get_i64("date_end")
    }
}
