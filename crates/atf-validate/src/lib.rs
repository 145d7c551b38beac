//! Validation of rendered output.
//!
//! A rendered document is re-parsed and its outline (root element and
//! top-level parts) compared with the in-memory document it came from. A
//! record whose output fails this check is an export failure: nothing is
//! written for it.

pub mod error;
pub mod roundtrip;

pub use error::RoundTripError;
pub use roundtrip::{PartOutline, TeiOutline, outline, validate_round_trip};
