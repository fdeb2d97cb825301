use thiserror::Error;

/// Which phase of a run failed. Per-tick computation never produces one of
/// these; only setup (input, encoder spawn) and teardown (export) can fail.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("input stage failed: {0:#}")]
    Input(anyhow::Error),
    #[error("encoder stage failed: {0:#}")]
    Encoder(anyhow::Error),
    #[error("export stage failed: {0:#}")]
    Export(anyhow::Error),
}

impl StageError {
    pub fn stage(&self) -> &'static str {
        match self {
            StageError::Input(_) => "input",
            StageError::Encoder(_) => "encoder",
            StageError::Export(_) => "export",
        }
    }
}
