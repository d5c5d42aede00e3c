//! Runtime tests driving the CLI with substituted configuration and IO.

mod unit;
