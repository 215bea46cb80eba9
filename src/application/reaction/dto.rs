use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /reviews/{id}/reactions`. `kind` is matched case-insensitively
/// against the reaction kinds.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AddReactionRequest {
    pub kind: String,
}
