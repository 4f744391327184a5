pub mod assume;
pub mod completions;

pub use assume::AssumeCommand;
pub use completions::CompletionsCommand;
