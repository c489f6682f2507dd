use std::io::Read;

use anyhow::{bail, Context, Result};
use console::style;

/// Read the change request: styled prompt on stderr, body from stdin until
/// EOF (Ctrl-D in a terminal). An empty request is rejected before any
/// model call is made.
pub fn read_change_request(prompt: &str) -> Result<String> {
    let text = read_block(prompt)?;
    if text.is_empty() {
        bail!("Change request is empty");
    }
    Ok(text)
}

/// Read an optional follow-up (clarifications); empty input is fine and
/// returns `None`.
pub fn read_optional(prompt: &str) -> Result<Option<String>> {
    let text = read_block(prompt)?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

fn read_block(prompt: &str) -> Result<String> {
    eprintln!(
        "{}",
        style(format!("{prompt} (finish with Ctrl-D):")).magenta()
    );

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read from stdin")?;

    Ok(text.trim().to_string())
}
