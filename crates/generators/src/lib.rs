//! ResponseGenerator implementations for Parley.
//!
//! Only offline generators live here. A network-backed model client would
//! implement the same trait in its own crate.

pub mod canned;

pub use canned::CannedGenerator;
