//! User-visible reporting.
//!
//! Status and error text go to optional page elements and, unconditionally,
//! to the log.

mod reporter;

pub use reporter::{AdapterSummary, Reporter, UNKNOWN_ADAPTER};
