use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A single transport operation failed (socket setup or one send).
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Every attempt for one cue failed. Non-fatal: the orchestrator
    /// records it and proceeds to the next cue.
    #[error("Dispatch abandoned after {attempts} attempts: {last}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        last: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
