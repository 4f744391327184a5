use std::process::ExitCode;

use thiserror::Error;

/// Failure classes of a single credential exchange.
///
/// Modules report failures as `anyhow::Error` with context; the exchange flow
/// wraps each one in the variant for the stage that failed so `main` can pick
/// an exit code without inspecting messages.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("{0:#}")]
    Usage(anyhow::Error),

    #[error("{0:#}")]
    Config(anyhow::Error),

    #[error("{0:#}")]
    Validation(anyhow::Error),

    #[error("{0:#}")]
    Input(anyhow::Error),

    #[error("{0:#}")]
    Exchange(anyhow::Error),
}

impl ExchangeError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Config(_) => 3,
            Self::Validation(_) => 4,
            Self::Input(_) => 5,
            Self::Exchange(_) => 6,
        }
    }
}
