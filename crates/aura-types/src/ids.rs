//! Type-safe identifier wrappers.
//!
//! Drift events carry human-assigned labels (`DFT-001`) that are stable for
//! the lifetime of the record, so their IDs wrap a [`String`]. Entities the
//! dashboard creates on the fly (notifications) use UUID v7 (time-ordered)
//! so they sort by creation time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

/// Generates a newtype wrapper around an opaque, externally assigned label.
macro_rules! define_label_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing label.
            pub fn new(label: impl Into<String>) -> Self {
                Self(label.into())
            }

            /// Borrow the label.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(label: &str) -> Self {
                Self(label.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                Self(label)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_label_id! {
    /// Identifier of a drift event, e.g. `DFT-002`. Immutable once assigned.
    DriftEventId
}

define_uuid_id! {
    /// Unique identifier for a user-facing notification.
    NotificationId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drift_event_id_serializes_as_plain_string() {
        let id = DriftEventId::from("DFT-001");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"DFT-001\""));

        let restored: Result<DriftEventId, _> = serde_json::from_str("\"DFT-001\"");
        assert_eq!(restored.ok(), Some(id));
    }

    #[test]
    fn drift_event_ids_order_lexically() {
        let mut ids = vec![
            DriftEventId::from("DFT-003"),
            DriftEventId::from("DFT-001"),
            DriftEventId::from("DFT-002"),
        ];
        ids.sort();
        let labels: Vec<&str> = ids.iter().map(DriftEventId::as_str).collect();
        assert_eq!(labels, vec!["DFT-001", "DFT-002", "DFT-003"]);
    }

    #[test]
    fn notification_ids_are_unique() {
        let a = NotificationId::new();
        let b = NotificationId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_display_matches_inner() {
        let id = NotificationId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
        assert_eq!(DriftEventId::from("DFT-009").to_string(), "DFT-009");
    }
}
