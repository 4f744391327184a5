use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;

/// Shell completion script for the `stsenv` command line
#[derive(Debug, Clone)]
pub struct CompletionsCommand {
    pub shell: Shell,
}

impl CompletionsCommand {
    pub fn generate_to_string(&self) -> String {
        let mut cmd = Cli::command();
        let app_name = cmd.get_name().to_string();
        let mut buffer = Vec::new();
        clap_complete::generate(self.shell, &mut cmd, app_name, &mut buffer);
        String::from_utf8(buffer).unwrap_or_default()
    }
}
