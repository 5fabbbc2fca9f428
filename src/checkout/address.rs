//! Delivery address selection.
//!
//! A user picks exactly one address before checkout. The selection is kept
//! server-side and deliberately survives failed checkout attempts: after a
//! cancelled payment the user retries without re-picking the address.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The address chosen for delivery, as copied into the order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddressSelection {
    /// Id of the saved address this selection came from
    pub address_id: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub phone: String,
    /// Free-form delivery notes, may be empty
    #[serde(default)]
    pub notes: String,
}

/// Per-user active address selection.
pub struct AddressBook {
    selected: DashMap<i64, AddressSelection>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self {
            selected: DashMap::new(),
        }
    }

    /// Set the active address, replacing any previous selection.
    pub fn select(&self, user_id: i64, selection: AddressSelection) {
        self.selected.insert(user_id, selection);
    }

    pub fn selected(&self, user_id: i64) -> Option<AddressSelection> {
        self.selected.get(&user_id).map(|entry| entry.clone())
    }

    pub fn clear(&self, user_id: i64) {
        self.selected.remove(&user_id);
    }
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new()
    }
}
