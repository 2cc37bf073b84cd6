//! Cross-page selection
//!
//! [`SelectionController`] owns the browsing session: the displayed page,
//! the collection total, the [`SelectionSet`] and the optional page cache.
//! Selection is keyed by record id and is independent of which page is
//! visible.

mod controller;
mod set;
mod view;

pub use controller::*;
pub use set::*;
pub use view::*;
