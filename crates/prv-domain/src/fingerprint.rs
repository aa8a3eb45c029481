//! Content fingerprints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity key for a piece of content: `checksum:size`
///
/// Two records with the same checksum and size are the same content, no matter
/// what they are called or where they were recorded.
///
/// # Examples
///
/// ```
/// use prv_domain::Fingerprint;
///
/// let fp = Fingerprint::new("9f86d08", 4096);
/// assert_eq!(fp.as_str(), "9f86d08:4096");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Build the fingerprint for the given checksum and byte size
    pub fn new(checksum: &str, size: u64) -> Self {
        Self(format!("{}:{}", checksum, size))
    }

    /// Borrow the fingerprint string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: fingerprint depends on checksum and size only
        #[test]
        fn test_fingerprint_deterministic(checksum in "[0-9a-f]{0,40}", size: u64) {
            let a = Fingerprint::new(&checksum, size);
            let b = Fingerprint::new(&checksum, size);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.to_string(), format!("{}:{}", checksum, size));
        }

        /// Property: different sizes never collide for the same checksum
        #[test]
        fn test_fingerprint_size_sensitive(checksum in "[0-9a-f]{1,40}", a: u64, b: u64) {
            prop_assert_eq!(Fingerprint::new(&checksum, a) == Fingerprint::new(&checksum, b), a == b);
        }
    }
}
