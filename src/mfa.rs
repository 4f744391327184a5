use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::constants::MFA_PROMPT;

/// Prompt on `prompt_out` and read one MFA code line from `input`.
///
/// The prompt must go to stderr in production: stdout carries the export
/// lines the caller evaluates.
pub fn read_token_code<R, W>(input: &mut R, prompt_out: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(prompt_out, "{MFA_PROMPT}").context("Failed to write MFA prompt")?;
    prompt_out.flush().context("Failed to write MFA prompt")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read MFA code")?;
    if read == 0 {
        bail!("No MFA code entered (end of input)");
    }

    let code = line.trim();
    if code.is_empty() {
        bail!("No MFA code entered");
    }

    debug!("Read MFA code ({} characters)", code.len());
    Ok(code.to_string())
}
