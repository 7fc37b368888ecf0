//! Holds types that don't "do" much on their own, but that are worth keeping distinct from plain
//! strings once they leave the attribute mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How an assignment is scored, e.g. "Homework" or "Final Exam". The label "Not Graded" is a
/// sentinel meaning the assignment carries no grade at all.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraderType {
    label: String,
}

impl GraderType {
    pub const NOT_GRADED: &'static str = "Not Graded";

    pub fn new(label: String) -> Self {
        Self { label }
    }

    pub fn not_graded() -> Self {
        Self::new(Self::NOT_GRADED.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    pub fn is_graded(&self) -> bool {
        self.label != Self::NOT_GRADED
    }

    /// The label, unless it is the "Not Graded" sentinel.
    pub fn graded_label(&self) -> Option<&str> {
        self.is_graded().then_some(self.as_str())
    }
}

impl fmt::Display for GraderType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.fmt(f)
    }
}
