//! Identifier newtypes.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw numeric value.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a content object.
    ContentId
);

id_type!(
    /// Version number of a content object, starting at 1.
    VersionNo
);

id_type!(
    /// Identifier of a location in the content tree.
    LocationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ContentId(42).to_string(), "42");
        assert_eq!(LocationId::from(7).get(), 7);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&VersionNo(3)).unwrap();
        assert_eq!(json, "3");

        let id: ContentId = serde_json::from_str("12").unwrap();
        assert_eq!(id, ContentId(12));
    }
}
