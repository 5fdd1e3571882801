//! Tasks Module
//!
//! Task lifecycle primitives for the catalog core.
//!
//! # Primitives
//! - Single-flight slot: at most one in-flight task per logical slot,
//!   cancel-and-replace on new requests

mod single_flight;

pub use single_flight::SingleFlight;
