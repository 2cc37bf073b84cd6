//! Error types

mod transport;

pub use transport::*;
