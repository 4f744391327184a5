pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod duration;
pub mod error;
pub mod exchange;
pub mod mfa;
pub mod output;
