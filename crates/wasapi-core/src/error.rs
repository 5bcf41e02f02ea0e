use std::error::Error as StdError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized. Credentials needed.")]
    Unauthorized,

    #[error("wallet RPC request failed: {status} {message}")]
    Remote { status: u16, message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid response from wallet daemon: {0}")]
    InvalidResponse(String),

    #[error("encode request: {0}")]
    Encode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("wallet daemon error {code}: {message}")]
    Daemon { code: i64, message: String },
}

/// Network-level failure raised by a [`Transport`](crate::rpc::Transport).
///
/// Wraps whatever error the transport produced so callers can still inspect
/// it through [`TransportError::get_ref`] or `source()`.
#[derive(Debug, thiserror::Error)]
#[error("transport failure: {source}")]
pub struct TransportError {
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { source: err.into() }
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.source
    }
}
