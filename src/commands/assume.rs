use std::io;

use tracing::info;

use crate::{
    aws::StsConnector,
    config::SharedConfigFile,
    error::ExchangeError,
    exchange::{self, Settings},
};

/// Assume the target profile's role with the real config file, STS and terminal
#[derive(Debug, Clone)]
pub struct AssumeCommand {
    pub settings: Settings,
}

impl AssumeCommand {
    pub async fn execute(self) -> Result<String, ExchangeError> {
        info!("Starting role assumption for profile: {}", self.settings.profile);

        let profiles = SharedConfigFile::from_env().map_err(ExchangeError::Config)?;

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut prompt_out = io::stderr();

        exchange::run(
            &self.settings,
            &profiles,
            &StsConnector,
            &mut input,
            &mut prompt_out,
        )
        .await
    }
}
