//! Type-safe entity identifiers and the monotonic sequence behind them.
//!
//! Every entity id is a `u64` newtype so that, for example, a ride id can
//! never be passed where an account id is expected. Ids are allocated by
//! the store that owns the entity through an [`IdSequence`]; the ledger is
//! the exception, accepting the id chosen by the registration collaborator.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw numeric value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw numeric value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a ledger account.
    ///
    /// Chosen by the account-creation collaborator (user registration pairs
    /// each user with an account of the same numeric value) and used as the
    /// dictionary key in [`super::Ledger`], event discriminator, and
    /// WebSocket subscription target.
    AccountId
);

define_id!(
    /// Identifier of a ride, allocated by [`super::RideRegistry`] at
    /// creation time.
    RideId
);

define_id!(
    /// Identifier of the driver assigned to a ride. No driver registry
    /// exists; the value is recorded as supplied.
    DriverId
);

define_id!(
    /// Identifier of a registered user.
    UserId
);

define_id!(
    /// Identifier of a community post.
    PostId
);

define_id!(
    /// Identifier of a comment within a post.
    CommentId
);

define_id!(
    /// Identifier of a recorded ESG activity.
    ActivityId
);

/// Monotonic id generator.
///
/// Backed by an [`AtomicU64`] starting at 1, so ids are unique for the
/// lifetime of the process and strictly increasing in allocation order.
/// Each store owns its own sequence.
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    /// Creates a sequence whose first allocated value is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Allocates the next value.
    pub fn next_value(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let seq = IdSequence::new();
        let a = seq.next_value();
        let b = seq.next_value();
        let c = seq.next_value();
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn sequences_are_independent() {
        let rides = IdSequence::new();
        let posts = IdSequence::new();
        let _ = rides.next_value();
        let _ = rides.next_value();
        assert_eq!(posts.next_value(), 1);
    }

    #[test]
    fn display_is_plain_number() {
        let id = RideId::new(42);
        assert_eq!(format!("{id}"), "42");
    }

    #[test]
    fn serde_is_transparent() {
        let id = AccountId::new(7);
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, "7");
        let back: AccountId = serde_json::from_str(&json).ok().unwrap_or_else(|| {
            panic!("deserialization failed");
        });
        assert_eq!(back, id);
    }

    #[test]
    fn distinct_id_types_do_not_compare() {
        // Compile-time property; value-level check that wrapping preserves
        // the number.
        let account = AccountId::new(5);
        let user = UserId::new(5);
        assert_eq!(account.value(), user.value());
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = AccountId::new(9);
        let mut map = HashMap::new();
        map.insert(id, "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }

    #[test]
    fn ordering_follows_numeric_value() {
        assert!(RideId::new(2) > RideId::new(1));
    }
}
