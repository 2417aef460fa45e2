//! Writing command results to stdout or a file.

use anyhow::Context;
use profilegen_core::EnvVars;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Text produced by a command and where it should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Rendered text
    pub contents: String,
    /// Destination file; stdout when `None`
    pub path: Option<PathBuf>,
}

impl CommandOutput {
    /// Output destined for stdout.
    pub fn stdout(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            path: None,
        }
    }
}

/// Writes the output to its destination.
///
/// # Errors
/// Returns an error if writing fails.
pub async fn emit(output: &CommandOutput) -> anyhow::Result<()> {
    match &output.path {
        Some(path) => save_file(&output.contents, path).await,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(output.contents.as_bytes()).await?;
            if !output.contents.ends_with('\n') {
                stdout.write_all(b"\n").await?;
            }
            stdout.flush().await?;
            Ok(())
        }
    }
}

/// Saves text to a file, creating parent directories as needed.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub async fn save_file(contents: &str, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Formats `export NAME='value'` lines safe for POSIX shells.
pub fn format_shell_exports(env_vars: &EnvVars) -> String {
    env_vars
        .iter()
        .map(|(name, value)| format!("export {}={}", name, shell_quote(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Single-quotes a value, escaping embedded single quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
