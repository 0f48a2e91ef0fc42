//! Opaque identifiers
//!
//! Node and cross-reference ids are assigned by the persistence layer. The
//! engine never mints them; it only compares, orders and hashes them.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw id
            #[inline]
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Borrow the raw id
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
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
    };
}

opaque_id!(
    /// Identifier of a [`TreeNode`](crate::TreeNode)
    NodeId
);

opaque_id!(
    /// Identifier of a [`CrossRef`](crate::CrossRef)
    CrossRefId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_order_lexicographically() {
        let mut ids = vec![NodeId::from("d"), NodeId::from("b10"), NodeId::from("b2")];
        ids.sort();
        assert_eq!(ids, vec![NodeId::from("b10"), NodeId::from("b2"), NodeId::from("d")]);
    }

    #[test]
    fn ids_lookup_by_str() {
        let set: HashSet<NodeId> = [NodeId::from("a")].into_iter().collect();
        assert!(set.contains("a"));
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&CrossRefId::from("x1")).unwrap();
        assert_eq!(json, "\"x1\"");
    }
}
