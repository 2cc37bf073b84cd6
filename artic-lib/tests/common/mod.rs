//! Shared test fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;

use artic_lib::PageSource;
use artic_lib::TransportError;
use artic_lib::model::Page;
use artic_lib::model::Record;
use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::sync::oneshot;

/// In-memory paginated collection that records every fetch it serves.
#[derive(Default)]
pub struct MemorySource {
    records: Mutex<Vec<Record>>,
    fetches: Mutex<Vec<u32>>,
    failing: Mutex<HashSet<u32>>,
    gates: Mutex<HashMap<u32, Gate>>,
}

struct Gate {
    started: Arc<Notify>,
    release: oneshot::Receiver<()>,
}

/// Handle for a page whose fetch blocks until released.
pub struct GateHandle {
    pub started: Arc<Notify>,
    pub release: oneshot::Sender<()>,
}

impl MemorySource {
    /// A collection with ids `1..=count`, each titled after its id.
    pub fn with_count(count: u64) -> Arc<Self> {
        Self::with_ids((1..=count).collect())
    }

    /// A collection with exactly these ids, in this order.
    pub fn with_ids(ids: Vec<u64>) -> Arc<Self> {
        let records = ids
            .into_iter()
            .map(|id| Record::new(id).set("title", format!("Artwork {}", id)))
            .collect();
        Arc::new(Self {
            records: Mutex::new(records),
            ..Default::default()
        })
    }

    /// Page numbers fetched so far, in request order.
    pub fn fetches(&self) -> Vec<u32> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn reset_fetches(&self) {
        self.fetches.lock().unwrap().clear();
    }

    /// Makes every fetch of `page` fail with HTTP 503.
    pub fn fail_page(&self, page: u32) {
        self.failing.lock().unwrap().insert(page);
    }

    pub fn heal_page(&self, page: u32) {
        self.failing.lock().unwrap().remove(&page);
    }

    /// Makes the next fetch of `page` wait until the handle is released.
    pub fn gate(&self, page: u32) -> GateHandle {
        let started = Arc::new(Notify::new());
        let (release, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(
            page,
            Gate {
                started: started.clone(),
                release: rx,
            },
        );
        GateHandle { started, release }
    }

    /// Puts a new record at the front of the collection.
    pub fn prepend(&self, id: u64) {
        self.records.lock().unwrap().insert(0, Record::new(id));
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch(&self, page: u32, page_size: usize) -> Result<Page, TransportError> {
        self.fetches.lock().unwrap().push(page);

        let gate = self.gates.lock().unwrap().remove(&page);
        if let Some(gate) = gate {
            gate.started.notify_one();
            let _ = gate.release.await;
        }

        if self.failing.lock().unwrap().contains(&page) {
            return Err(TransportError::http(503, "service unavailable"));
        }

        let records = self.records.lock().unwrap();
        let start = (page as usize - 1) * page_size;
        let end = (start + page_size).min(records.len());
        let slice = if start < records.len() {
            records[start..end].to_vec()
        } else {
            Vec::new()
        };
        Ok(Page::new(slice, records.len()))
    }
}
