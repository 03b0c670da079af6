#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported image format `{0}`")]
    UnsupportedFormat(String),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("failed to encode image")]
    Encode(#[from] image::ImageError),

    #[error("canvas error: {0}")]
    Canvas(String),

    #[error("malformed data url")]
    DataUrl(#[from] base64::DecodeError),

    #[error("malformed config json")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{name}` must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("`minWidth` ({min}) is greater than `maxWidth` ({max})")]
    WidthRange { min: f64, max: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
