use crate::constants::{DEFAULT_IMAGE_EXTENSIONS, DEFAULT_UPLOAD_DIR, UPLOAD_PREFIX};
use crate::workflow::generate_code;
use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::{env, fs};
use thiserror::Error;

static ALLOWED_IMAGE_EXTENSIONS: Lazy<Vec<String>> = Lazy::new(|| {
	env::var("ALLOWED_IMAGE_EXTENSIONS")
		.unwrap_or_else(|_| DEFAULT_IMAGE_EXTENSIONS.to_string())
		.split(',')
		.map(|ext| ext.trim().to_lowercase())
		.collect()
});

#[derive(Debug, MultipartForm)]
pub struct AvatarForm {
	#[multipart(limit = "2MB")]
	pub avatar: TempFile,
}

#[derive(Debug, Error)]
pub enum UploadError {
	#[error("Invalid file type, only JPEG and PNG is allowed")]
	DisallowedType,
	#[error("failed to store upload: {0}")]
	Io(#[from] std::io::Error),
}

pub fn upload_dir() -> PathBuf {
	PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()))
}

pub fn ensure_upload_dir() -> std::io::Result<()> {
	fs::create_dir_all(upload_dir())
}

// The mime subtype is checked against the allow-list before anything is
// written to the upload directory.
pub fn store_avatar(file: &TempFile) -> Result<String, UploadError> {
	let extension = file
		.content_type
		.as_ref()
		.map(|mime| mime.subtype().as_str().to_lowercase())
		.unwrap_or_default();
	if !ALLOWED_IMAGE_EXTENSIONS.iter().any(|allowed| *allowed == extension) {
		return Err(UploadError::DisallowedType);
	}

	let filename = format!("{}{}.{}", UPLOAD_PREFIX, generate_code(16), extension);
	let dest = upload_dir().join(filename);
	fs::copy(file.file.path(), &dest)?;

	Ok(dest.to_string_lossy().into_owned())
}
