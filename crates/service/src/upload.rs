//! Per-type upload rules and the validator applied before a file is stored.

use thiserror::Error;

const MIB: u64 = 1024 * 1024;

const IMAGE_EXTS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Limits for one upload type. A zero dimension means "no limit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTypeConfig {
    pub name: &'static str,
    pub max_size: u64,
    pub allow_exts: &'static [&'static str],
    pub max_width: usize,
    pub max_height: usize,
    pub min_width: usize,
    pub min_height: usize,
}

impl UploadTypeConfig {
    fn has_dimension_limits(&self) -> bool {
        self.max_width > 0 || self.max_height > 0 || self.min_width > 0 || self.min_height > 0
    }
}

pub static TYPE_CONFIGS: &[UploadTypeConfig] = &[
    UploadTypeConfig { name: "avatar", max_size: 2 * MIB, allow_exts: IMAGE_EXTS, max_width: 1024, max_height: 1024, min_width: 100, min_height: 100 },
    UploadTypeConfig { name: "logo", max_size: 2 * MIB, allow_exts: IMAGE_EXTS, max_width: 800, max_height: 800, min_width: 100, min_height: 100 },
    UploadTypeConfig { name: "cover", max_size: 5 * MIB, allow_exts: IMAGE_EXTS, max_width: 1920, max_height: 1080, min_width: 0, min_height: 0 },
    UploadTypeConfig { name: "license", max_size: 5 * MIB, allow_exts: &[".jpg", ".jpeg", ".png", ".pdf"], max_width: 0, max_height: 0, min_width: 0, min_height: 0 },
    UploadTypeConfig {
        name: "attachment",
        max_size: 20 * MIB,
        allow_exts: &[".pdf", ".doc", ".docx", ".jpg", ".jpeg", ".png", ".zip"],
        max_width: 0,
        max_height: 0,
        min_width: 0,
        min_height: 0,
    },
];

/// Largest `max_size` of any type; the HTTP body limit is derived from it.
pub fn max_upload_size() -> u64 {
    TYPE_CONFIGS.iter().map(|c| c.max_size).max().unwrap_or(0)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("unsupported upload type: {0}")]
    UnknownType(String),
    #[error("file exceeds the size limit of {max} bytes")]
    TooLarge { max: u64 },
    #[error("unsupported file extension: {0:?}")]
    BadExtension(String),
    #[error("cannot read image: {0}")]
    UnreadableImage(String),
    #[error("image width exceeds {max} px")]
    TooWide { max: usize },
    #[error("image height exceeds {max} px")]
    TooTall { max: usize },
    #[error("image width below {min} px")]
    TooNarrow { min: usize },
    #[error("image height below {min} px")]
    TooShort { min: usize },
}

pub fn type_config(upload_type: &str) -> Option<&'static UploadTypeConfig> {
    TYPE_CONFIGS.iter().find(|c| c.name == upload_type)
}

pub fn check_upload_type(upload_type: &str) -> bool {
    type_config(upload_type).is_some()
}

/// Lower-cased text from the last dot of the base name on, or an empty string.
/// A bare `.png` counts as a `.png` file.
pub fn extension_of(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    base.rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// Checks type, size, extension and, for image types, pixel dimensions, in that order.
/// Returns the normalised extension on success.
pub fn validate_upload(bytes: &[u8], filename: &str, upload_type: &str) -> Result<String, UploadError> {
    let cfg = type_config(upload_type).ok_or_else(|| UploadError::UnknownType(upload_type.to_string()))?;

    if bytes.len() as u64 > cfg.max_size {
        return Err(UploadError::TooLarge { max: cfg.max_size });
    }

    let ext = extension_of(filename);
    if !cfg.allow_exts.contains(&ext.as_str()) {
        return Err(UploadError::BadExtension(ext));
    }

    if cfg.has_dimension_limits() {
        let size = imagesize::blob_size(bytes).map_err(|e| UploadError::UnreadableImage(e.to_string()))?;
        if cfg.max_width > 0 && size.width > cfg.max_width {
            return Err(UploadError::TooWide { max: cfg.max_width });
        }
        if cfg.max_height > 0 && size.height > cfg.max_height {
            return Err(UploadError::TooTall { max: cfg.max_height });
        }
        if cfg.min_width > 0 && size.width < cfg.min_width {
            return Err(UploadError::TooNarrow { min: cfg.min_width });
        }
        if cfg.min_height > 0 && size.height < cfg.min_height {
            return Err(UploadError::TooShort { min: cfg.min_height });
        }
    }

    Ok(ext)
}
