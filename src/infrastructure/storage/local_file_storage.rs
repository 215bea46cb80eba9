use super::{
    traits::{FileOwnerType, FileStorage, StoredFile, UploadedFile},
    validation::image_extension,
};
use crate::{domain::shared::errors::DomainError, infrastructure::repositories::db_error};
use async_trait::async_trait;
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Stores uploads on the local disk under random UUID names and tracks them in
/// `file_infos` (one row per file) and `file_managers` (file -> owner link).
pub struct LocalFileStorage {
    pool: PgPool,
    dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new(pool: PgPool, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        info!("Initializing LocalFileStorage at {}", dir.display());
        Self { pool, dir }
    }

    fn full_path(&self, stored_name: &str) -> PathBuf {
        self.dir.join(stored_name)
    }

    async fn remove_from_disk(paths: &[String]) {
        for path in paths {
            if let Err(e) = tokio::fs::remove_file(Path::new(path)).await {
                warn!("Failed to remove stored file {}: {}", path, e);
            }
        }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    #[instrument(skip(self, files), fields(count = files.len(), owner = owner_type.as_str()))]
    async fn store_files(
        &self,
        files: Vec<UploadedFile>,
        owner_id: i64,
        owner_type: FileOwnerType,
    ) -> Result<Vec<StoredFile>, DomainError> {
        if files.is_empty() {
            return Ok(vec![]);
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;

        let mut names = Vec::with_capacity(files.len());
        for file in &files {
            names.push(format!("{}.{}", Uuid::new_v4(), image_extension(file)?));
        }

        let mut written: Vec<(String, String)> = Vec::with_capacity(files.len());
        for (file, stored_name) in files.iter().zip(names) {
            let path = self.full_path(&stored_name).to_string_lossy().into_owned();
            if let Err(e) = tokio::fs::write(&path, &file.data).await {
                let paths: Vec<String> = written.into_iter().map(|(_, p)| p).collect();
                Self::remove_from_disk(&paths).await;
                return Err(DomainError::InfrastructureError(e.to_string()));
            }
            debug!("Wrote {} ({} bytes)", path, file.data.len());
            written.push((stored_name, path));
        }

        let persisted: Result<Vec<StoredFile>, DomainError> = async {
            let mut tx = self.pool.begin().await.map_err(db_error)?;
            let mut stored = Vec::with_capacity(files.len());
            for (file, (stored_name, path)) in files.iter().zip(&written) {
                let id = sqlx::query_scalar::<_, i64>(
                    "INSERT INTO file_infos (file_path, stored_name, original_name)
                     VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(path)
                .bind(stored_name)
                .bind(&file.original_name)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_error)?;

                sqlx::query(
                    "INSERT INTO file_managers (file_info_id, reference_id, reference_type)
                     VALUES ($1, $2, $3)",
                )
                .bind(id)
                .bind(owner_id)
                .bind(owner_type.as_str())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;

                stored.push(StoredFile {
                    id,
                    stored_name: stored_name.clone(),
                    original_name: file.original_name.clone(),
                    path: path.clone(),
                });
            }
            tx.commit().await.map_err(db_error)?;
            Ok(stored)
        }
        .await;

        if persisted.is_err() {
            let paths: Vec<String> = written.into_iter().map(|(_, p)| p).collect();
            Self::remove_from_disk(&paths).await;
        }
        persisted
    }

    async fn list_file_names(
        &self,
        owner_type: FileOwnerType,
        owner_id: i64,
    ) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar::<_, String>(
            "SELECT fi.stored_name
             FROM file_managers fm
             JOIN file_infos fi ON fi.id = fm.file_info_id
             WHERE fm.reference_type = $1 AND fm.reference_id = $2
             ORDER BY fi.id",
        )
        .bind(owner_type.as_str())
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    #[instrument(skip(self, names), fields(count = names.len(), owner = owner_type.as_str()))]
    async fn delete_named(
        &self,
        owner_type: FileOwnerType,
        owner_id: i64,
        names: Vec<String>,
    ) -> Result<u64, DomainError> {
        if names.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let paths = sqlx::query_scalar::<_, String>(
            "DELETE FROM file_infos fi
             USING file_managers fm
             WHERE fm.file_info_id = fi.id
               AND fm.reference_type = $1
               AND fm.reference_id = $2
               AND fi.stored_name = ANY($3)
             RETURNING fi.file_path",
        )
        .bind(owner_type.as_str())
        .bind(owner_id)
        .bind(&names)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error)?;
        tx.commit().await.map_err(db_error)?;

        Self::remove_from_disk(&paths).await;
        Ok(paths.len() as u64)
    }
}
