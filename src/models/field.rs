use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Taxonomy field that can be renamed or merged across all entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Requestor,
    Tag,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Requestor => "requestor",
            FieldKind::Tag => "tag",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
