//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `simulation` - Monte Carlo mechanics, seeding, caps and cancellation
//! - `analysis` - sensitivity, delay and risk-profile comparisons
//! - `properties` - distribution invariants over random requests
