use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("{}", remote_message(.status, .status_text, .detail))]
    Remote {
        status: u16,
        status_text: String,
        detail: Option<String>,
    },

    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// A success response whose body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// HTTP status, for `Remote` errors only.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<pokereports_core::CoreError> for ClientError {
    fn from(e: pokereports_core::CoreError) -> Self {
        ClientError::Decode(e.to_string())
    }
}

fn remote_message(status: &u16, status_text: &str, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Error: {status} - {status_text}"),
    }
}

/// Why a download link failed its pre-flight check.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The storage provider rejected the link's credentials (expired SAS).
    #[error("storage rejected the download link: authentication failed")]
    StorageAuth,

    /// No response at all. Browsers report these as "Failed to fetch",
    /// which in practice is an expired link failing the CORS pre-flight.
    #[error("download link unreachable: {0}")]
    Unreachable(String),

    #[error("download link returned HTTP {status}")]
    Http { status: u16 },

    #[error("download check failed: {0}")]
    Other(String),
}

impl ProbeError {
    /// Whether the failure should send the user through re-authentication
    /// (refresh the list for fresh links) rather than a plain error.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, ProbeError::StorageAuth | ProbeError::Unreachable(_))
    }
}
