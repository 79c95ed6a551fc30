use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriageError {
    #[error("Urgent queue is empty")]
    EmptyHeap,

    #[error("Unknown ward: {0}")]
    UnknownVertex(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
