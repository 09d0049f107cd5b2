//! Store acknowledgments returned to clients

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgment of an insert, carrying the generated identifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Acknowledgment of a delete; `deleted_count` is 0 when nothing matched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Counts reported by a `$set` update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl InsertAck {
    pub fn new(inserted_id: String) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

impl UpdateOutcome {
    /// A document was found and at least one field actually changed
    pub fn is_applied(&self) -> bool {
        self.matched_count > 0 && self.modified_count > 0
    }
}
