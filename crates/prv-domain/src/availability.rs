//! Availability module - tri-state lookup results

use serde::Serialize;

/// Whether a piece of content was found in a given scope
///
/// Every result starts out `Unknown` and moves to `Present` or `Absent` once
/// the corresponding lookup has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// The locator returned a path or URL
    Present,

    /// The locator returned nothing (or failed)
    Absent,

    /// No lookup has completed yet
    #[default]
    Unknown,
}

impl Availability {
    /// Compact marker used in tabular output
    pub fn marker(&self) -> &'static str {
        match self {
            Availability::Present => "YES",
            Availability::Absent => "x",
            Availability::Unknown => ".",
        }
    }

    /// Map a locator answer to a status: non-empty means present
    pub fn from_answer(answer: &str) -> Self {
        if answer.is_empty() {
            Availability::Absent
        } else {
            Availability::Present
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(Availability::default(), Availability::Unknown);
    }

    #[test]
    fn test_markers() {
        assert_eq!(Availability::Present.marker(), "YES");
        assert_eq!(Availability::Absent.marker(), "x");
        assert_eq!(Availability::Unknown.marker(), ".");
    }

    #[test]
    fn test_from_answer() {
        assert_eq!(Availability::from_answer("/data/file.mda"), Availability::Present);
        assert_eq!(Availability::from_answer(""), Availability::Absent);
    }
}
