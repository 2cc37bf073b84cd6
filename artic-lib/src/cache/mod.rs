//! Session page cache
//!
//! Maps source page numbers to the pages fetched for them. The cache is
//! monotonic: once a page number is populated its records are treated as
//! authoritative for the rest of the session. There is no TTL and no
//! invalidation; callers needing fresh data call [`PageCache::clear`].

mod memory;

pub use memory::*;
