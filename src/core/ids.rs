//! Identifier newtypes.
//!
//! Items, status effects, and companions are identified by strings because
//! the decision layer names them in JSON. Wrapping them keeps the three
//! namespaces from being mixed up.
//!
//! ## Assigned IDs
//!
//! Items and status effects created without an id receive one from a
//! per-state counter (`item-<n>`, `status-<n>`). The counter lives in the
//! state value, so replaying the same effects yields the same ids.
//!
//! ```
//! use rpg_kernel::core::ItemId;
//!
//! let id = ItemId::assigned(3);
//! assert_eq!(id.as_str(), "item-3");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an id from any string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Create the id the kernel assigns for sequence number `seq`.
            #[must_use]
            pub fn assigned(seq: u64) -> Self {
                Self(format!(concat!($prefix, "-{}"), seq))
            }

            /// Borrow the raw id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of an inventory item.
    ItemId,
    "item"
);

string_id!(
    /// Identifier of a status effect instance on an actor.
    StatusId,
    "status"
);

string_id!(
    /// Identifier of a companion travelling with the player.
    CompanionId,
    "companion"
);
