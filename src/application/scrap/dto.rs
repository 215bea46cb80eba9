use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScrapResponse {
    pub review_id: i64,
    pub is_scrapped: bool,
}
