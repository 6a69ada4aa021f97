use markban_core::StructureError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid board JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("Round-trip drift in {0}: a second parse/generate pass changes the output")]
    RoundTrip(String),
}
