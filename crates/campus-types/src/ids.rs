//! Identifier types

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Account identifier (matches `accounts.id`)
    UserId
);

numeric_id!(
    /// Course identifier (matches `courses.id`)
    CourseId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_string(&UserId(42)).unwrap(), "42");
        let parsed: CourseId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, CourseId(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(CourseId(7).to_string(), "7");
        assert_eq!(UserId::from(9).0, 9);
    }
}
