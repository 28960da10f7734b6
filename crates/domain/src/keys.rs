//! String keys for fields and categories
//!
//! Unlike entity ids these are caller-chosen strings (e.g. `"hp"`, `"combat"`),
//! so they are transparent newtypes rather than UUIDs.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_key {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_key!(FieldKey);
define_key!(CategoryKey);

/// Key of the computed bucket holding every unclaimed field.
pub const OTHER_CATEGORY_KEY: &str = "other";

impl CategoryKey {
    /// The reserved key of the computed "other" bucket.
    pub fn other() -> Self {
        Self::new(OTHER_CATEGORY_KEY)
    }

    pub fn is_other(&self) -> bool {
        self.0 == OTHER_CATEGORY_KEY
    }

    /// Mint a key for a category created without one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}
