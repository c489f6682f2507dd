use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

/// Append a change request to `~/.recast/history.txt`, creating the
/// directory on first use. Returns the history path. History is a
/// convenience; callers treat failures as warnings, not errors.
pub fn append(change_request: &str) -> std::io::Result<PathBuf> {
    let dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".recast");
    std::fs::create_dir_all(&dir)?;

    let path = dir.join("history.txt");
    let stamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let entry = format!("---\n{stamp}\nPrompt:\n{change_request}\n---\n");

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?
        .write_all(entry.as_bytes())?;

    Ok(path)
}
