//! Dataset labels and the runtime's display format for them.

use std::fmt;

use crate::value::ArrayVal;

/// One dataset variation, identified the way the live runtime names it:
/// by a string key or by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Named(String),
    Indexed(u64),
}

impl Label {
    /// Classify an already-cast array key. Canonical non-negative decimal
    /// integers ("0", "17") are positional. Everything else, including
    /// non-canonical spellings like "007" or "-1", stays a named key,
    /// matching how the host language distinguishes integer array keys.
    pub fn for_key(key: &str) -> Label {
        match key.parse::<u64>() {
            Ok(n) if n.to_string() == key => Label::Indexed(n),
            _ => Label::Named(key.to_string()),
        }
    }

    /// The full display string the runtime emits, byte-for-byte:
    /// `data set "name"` or `data set #N`.
    pub fn dataset(&self) -> String {
        format!("data set {self}")
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Named(name) => write!(f, "\"{name}\""),
            Label::Indexed(n) => write!(f, "#{n}"),
        }
    }
}

/// One label per container entry, derived from its key.
pub fn labels_for(array: &ArrayVal) -> Vec<Label> {
    array.keys().map(Label::for_key).collect()
}
