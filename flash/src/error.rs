//! Error types
//!
//! Presenting and hiding a flash never fails; missing preconditions are
//! no-ops. Errors only come from the loading paths: decoding icons, parsing
//! configuration files and colors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlashError {
    #[error("invalid color {0:?}: expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = FlashError> = std::result::Result<T, E>;
