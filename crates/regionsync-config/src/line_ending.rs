use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Line terminator written after markers inserted by fixes.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LineEndingPolicy {
    /// Follow the terminator already used by the file, `\n` when it has none.
    #[default]
    Auto,
    /// Always write `\n`.
    Lf,
    /// Always write `\r\n`.
    Crlf,
}

/// Errors encountered while parsing a [`LineEndingPolicy`] from text.
pub type LineEndingPolicyParseError = strum::ParseError;
