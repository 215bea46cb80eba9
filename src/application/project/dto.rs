use crate::domain::review::value_objects::PRODUCT_URL_REGEX;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct RegisterProjectRequest {
    #[validate(length(min = 1, max = 50, message = "project name must be 1 to 50 characters"))]
    pub name: String,
    #[validate(regex(path = *PRODUCT_URL_REGEX, message = "project uri must start with http:// or https://"))]
    pub uri: String,
    pub description: Option<String>,
}

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 50, message = "project name must be 1 to 50 characters"))]
    pub name: Option<String>,
    #[validate(regex(path = *PRODUCT_URL_REGEX, message = "project uri must start with http:// or https://"))]
    pub uri: Option<String>,
    pub description: Option<String>,
}
