use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    pub(crate) static ref PRODUCT_URL_REGEX: regex::Regex = regex::Regex::new(r"^https?://\S+$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewContent {
    #[validate(length(min = 10, message = "review content must be at least 10 characters"))]
    pub value: String,
}

impl ReviewContent {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let content = Self { value };
        content.validate()?;
        Ok(content)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Score {
    #[validate(range(min = 0, max = 5, message = "score must be between 0 and 5"))]
    pub value: i32,
}

impl Score {
    pub fn new(value: i32) -> Result<Self, validator::ValidationErrors> {
        let score = Self { value };
        score.validate()?;
        Ok(score)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUrl {
    #[validate(
        length(max = 1024, message = "product url must be 1024 characters or less"),
        regex(path = *PRODUCT_URL_REGEX, message = "product url must start with http:// or https://")
    )]
    pub value: String,
}

impl ProductUrl {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let url = Self { value };
        url.validate()?;
        Ok(url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductName {
    #[validate(length(min = 1, max = 255, message = "product name is required"))]
    pub value: String,
}

impl ProductName {
    pub fn new(value: String) -> Result<Self, validator::ValidationErrors> {
        let name = Self { value };
        name.validate()?;
        Ok(name)
    }
}
