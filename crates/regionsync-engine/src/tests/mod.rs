//! Crate-level tests exercising the locator, synchronizer and analyzer
//! together.
