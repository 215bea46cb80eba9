//! Multipart form parsing shared by the review and profile endpoints.

use crate::{
    application::review::dto::{CreateReviewRequest, UpdateReviewRequest},
    infrastructure::storage::traits::UploadedFile,
    presentation::http::errors::AppError,
};
use axum::extract::Multipart;
use tracing::debug;

/// Raw fields of a review form. Text fields may be absent on updates.
#[derive(Debug, Default)]
pub struct ReviewForm {
    pub content: Option<String>,
    pub product_url: Option<String>,
    pub product_name: Option<String>,
    pub score: Option<i32>,
    pub images: Vec<UploadedFile>,
    pub delete_file_names: Vec<String>,
}

impl ReviewForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ReviewForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "images" => {
                    let original_name = field.file_name().unwrap_or("upload").to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await?;
                    if !data.is_empty() {
                        form.images.push(UploadedFile {
                            original_name,
                            content_type,
                            data,
                        });
                    }
                }
                "content" => form.content = Some(field.text().await?),
                "product_url" => form.product_url = Some(field.text().await?.trim().to_string()),
                "product_name" => form.product_name = Some(field.text().await?.trim().to_string()),
                "score" => {
                    let raw = field.text().await?;
                    let score = raw.trim().parse::<i32>().map_err(|_| {
                        AppError::ValidationError(format!("score must be an integer, got {}", raw))
                    })?;
                    form.score = Some(score);
                }
                "delete_file_names" => {
                    let raw = field.text().await?;
                    form.delete_file_names.extend(
                        raw.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string),
                    );
                }
                other => debug!("Ignoring unknown multipart field {}", other),
            }
        }

        Ok(form)
    }

    pub fn into_create(self) -> Result<CreateReviewRequest, AppError> {
        let missing = |field: &str| AppError::ValidationError(format!("{} is required", field));
        Ok(CreateReviewRequest {
            content: self.content.ok_or_else(|| missing("content"))?,
            product_url: self.product_url.ok_or_else(|| missing("product_url"))?,
            product_name: self.product_name.ok_or_else(|| missing("product_name"))?,
            score: self.score.ok_or_else(|| missing("score"))?,
            images: self.images,
        })
    }

    pub fn into_update(self) -> UpdateReviewRequest {
        UpdateReviewRequest {
            content: self.content,
            product_name: self.product_name,
            score: self.score,
            new_images: self.images,
            delete_file_names: self.delete_file_names,
        }
    }
}

/// Reads the single `image` field of a profile-image upload.
pub async fn read_single_image(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("image") {
            let original_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;
            return Ok(UploadedFile {
                original_name,
                content_type,
                data,
            });
        }
    }
    Err(AppError::BadRequest("Missing image".into()))
}
