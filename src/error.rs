use serde::Serialize;

pub type Result<T> = std::result::Result<T, Error>;

/// Code reported by a failed VCF track load.
pub const TRACK_LOAD_CODE: &str = "Vcf Data Service";

/// Message reported by a failed VCF track load.
pub const TRACK_LOAD_MESSAGE: &str = "Vcf Data Service: error loading vcf track";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("service error: {0}")]
    Service(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("{message}")]
    TrackLoad { code: &'static str, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializable `{code, message}` view of an [`Error`].
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl Error {
    pub(crate) fn track_load() -> Self {
        Error::TrackLoad {
            code: TRACK_LOAD_CODE,
            message: TRACK_LOAD_MESSAGE.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::Transport(_) => "TransportError",
            Error::Status { .. } => "StatusError",
            Error::Service(_) => "ServiceError",
            Error::Decode(_) | Error::Json(_) => "DecodeError",
            Error::TrackLoad { code, .. } => *code,
            Error::InvalidInput(_) => "InvalidInput",
            Error::InvalidConfig(_) => "InvalidConfig",
            Error::Io(_) => "IoError",
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}
