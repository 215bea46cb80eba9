use super::traits::UploadedFile;
use crate::domain::shared::errors::DomainError;
use image::ImageFormat;

const ALLOWED_FORMATS: [ImageFormat; 4] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::WebP,
    ImageFormat::Gif,
];

/// Sniffs the magic bytes of every upload and rejects anything that is not an
/// accepted image format. The declared content type is not trusted.
pub fn ensure_images(files: &[UploadedFile]) -> Result<(), DomainError> {
    for file in files {
        image_format(file)?;
    }
    Ok(())
}

/// File extension matching the sniffed format of an upload.
pub fn image_extension(file: &UploadedFile) -> Result<&'static str, DomainError> {
    let format = image_format(file)?;
    Ok(format.extensions_str().first().copied().unwrap_or("img"))
}

fn image_format(file: &UploadedFile) -> Result<ImageFormat, DomainError> {
    let not_an_image =
        || DomainError::ValidationError(format!("{} is not a supported image file", file.original_name));
    let format = image::guess_format(&file.data).map_err(|_| not_an_image())?;
    if ALLOWED_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(not_an_image())
    }
}
