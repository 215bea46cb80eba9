use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "comment must be 1 to 1000 characters"))]
    pub content: String,
    /// Comment being replied to; 0 or absent starts a new thread.
    #[serde(default)]
    pub parent_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct EditCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "comment must be 1 to 1000 characters"))]
    pub content: String,
}
