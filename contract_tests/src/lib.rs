//! # Node Contract Tests
//!
//! This crate provides shared behavioral suites for the node contract so the
//! backends cannot drift apart: every adapter's integration tests run the
//! same assertions through `&dyn Repository` and `&dyn Node`, never through
//! adapter types.
//!
//! ## Structure
//!
//! - [`properties`]: the contract's testable properties — restartable
//!   enumeration, strict accessor exclusivity, address round-trips, absence
//!   signaling, visitor dispatch.
//! - [`user_repository`]: the canonical nested user/emailAddresses document
//!   and its assertion suite, for document-shaped backends.

pub mod properties;
pub mod user_repository;

pub use properties::{
    assert_absence_signal, assert_address_round_trip, assert_children_restartable,
    assert_root_contract, assert_scalar_accessor_exclusivity, census, ShapeCensus,
};
