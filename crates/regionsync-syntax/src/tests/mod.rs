//! Crate-level tests exercising several modules together.

mod unit;
