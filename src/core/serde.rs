/// Serde helper functions for custom serialization/deserialization
use serde::{Deserialize, Deserializer, Serializer};

/// File contents stored as one string on write, accepting either a single
/// string or an array of lines on read
///
/// Lines read from an array each gain a trailing `\n`, matching the
/// in-memory form where every line carries its own terminator.
pub mod lines_or_string {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Contents {
        Joined(String),
        Lines(Vec<String>),
    }

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S>(contents: &String, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(contents)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Contents::deserialize(deserializer)? {
            Contents::Joined(text) => text,
            Contents::Lines(lines) => lines.iter().map(|line| format!("{line}\n")).collect(),
        })
    }
}
