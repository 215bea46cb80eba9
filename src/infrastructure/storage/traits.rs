use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use bytes::Bytes;

/// Kind of record a stored file is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOwnerType {
    Review,
    User,
}

impl FileOwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOwnerType::Review => "Review",
            FileOwnerType::User => "User",
        }
    }
}

/// A file received from a multipart request, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub original_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    pub id: i64,
    pub stored_name: String,
    pub original_name: String,
    pub path: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persists the files and attaches them to `(owner_type, owner_id)`.
    async fn store_files(
        &self,
        files: Vec<UploadedFile>,
        owner_id: i64,
        owner_type: FileOwnerType,
    ) -> Result<Vec<StoredFile>, DomainError>;
    /// Stored names attached to the owner, oldest first.
    async fn list_file_names(
        &self,
        owner_type: FileOwnerType,
        owner_id: i64,
    ) -> Result<Vec<String>, DomainError>;
    /// Removes the named files attached to the owner; returns how many were removed.
    async fn delete_named(
        &self,
        owner_type: FileOwnerType,
        owner_id: i64,
        names: Vec<String>,
    ) -> Result<u64, DomainError>;
}
