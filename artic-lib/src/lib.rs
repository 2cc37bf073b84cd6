//! Art Institute of Chicago collection browser library
//!
//! Paginated browsing over the public `/artworks` listing with id-keyed row
//! selection that survives page navigation, plus a bulk "select the first N"
//! operation that fetches as many pages as it needs.

pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod selection;
pub mod source;

pub use config::BrowserConfig;
pub use error::TransportError;
pub use selection::SelectionController;
pub use source::ArticClient;
pub use source::PageSource;

/// Parses user input for the bulk selection count.
///
/// Returns `None` for non-numeric input, which callers treat as a no-op the
/// same way [`SelectionController::auto_select`] treats `n <= 0`.
///
/// ```
/// assert_eq!(artic_lib::parse_auto_select_count(" 12 "), Some(12));
/// assert_eq!(artic_lib::parse_auto_select_count("twelve"), None);
/// assert_eq!(artic_lib::parse_auto_select_count(""), None);
/// ```
pub fn parse_auto_select_count(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}
