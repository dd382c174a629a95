use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::{Result, TranscriptError};

/// Platform clipboard-set command, as `(program, args)`.
fn clipboard_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("pbcopy", &[])
    } else if cfg!(target_os = "windows") {
        ("clip", &[])
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        ("wl-copy", &[])
    } else {
        ("xclip", &["-selection", "clipboard"])
    }
}

/// Copy text to the system clipboard by piping it to the platform utility.
pub async fn copy_to_clipboard(text: &str) -> Result<()> {
    let (program, args) = clipboard_command();
    tracing::debug!("Copying transcript via {}", program);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| TranscriptError::ClipboardFailed(format!("could not run {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|e| TranscriptError::ClipboardFailed(e.to_string()))?;
    }
    // stdin drops here so the utility sees EOF

    let status = child
        .wait()
        .await
        .map_err(|e| TranscriptError::ClipboardFailed(e.to_string()))?;

    if !status.success() {
        return Err(TranscriptError::ClipboardFailed(format!(
            "{} exited with status {}",
            program, status
        ))
        .into());
    }

    Ok(())
}
