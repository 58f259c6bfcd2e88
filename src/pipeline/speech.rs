//! Narration synthesis via the `piper` CLI.
//!
//! The narration text is written to piper's stdin and the WAV lands at the
//! requested path. A missing `piper` binary maps to
//! [`Pdf2VideoError::ToolMissing`]; any other failure is fatal for the
//! scene: there is no retry and no fallback voice.
//!
//! The assembler needs the real audio length (a clip runs for
//! `max(audio, scene.duration)`), so [`wav_duration_secs`] reads it back
//! from the WAV header with `hound`.

use crate::error::{Pdf2VideoError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Synthesize `narration` into a WAV file at `out_path`.
pub async fn synthesize(
    scene_id: u32,
    narration: &str,
    voice_model: &Path,
    out_path: &Path,
) -> Result<()> {
    debug!("Synthesizing narration for scene {scene_id}");

    let mut child = Command::new("piper")
        .arg("--model")
        .arg(voice_model)
        .arg("--output_file")
        .arg(out_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Pdf2VideoError::ToolMissing {
                    tool: "piper".into(),
                }
            } else {
                Pdf2VideoError::SpeechFailed {
                    scene: scene_id,
                    detail: e.to_string(),
                }
            }
        })?;

    let mut stdin = child.stdin.take().ok_or_else(|| Pdf2VideoError::SpeechFailed {
        scene: scene_id,
        detail: "failed to open piper stdin".into(),
    })?;
    stdin
        .write_all(narration.as_bytes())
        .await
        .map_err(|e| Pdf2VideoError::SpeechFailed {
            scene: scene_id,
            detail: format!("writing to piper stdin: {e}"),
        })?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| Pdf2VideoError::SpeechFailed {
            scene: scene_id,
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Pdf2VideoError::SpeechFailed {
            scene: scene_id,
            detail: format!(
                "piper exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    debug!("Wrote narration audio: {}", out_path.display());
    Ok(())
}

/// Duration of a WAV file in seconds, from its header.
pub fn wav_duration_secs(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path).map_err(|e| Pdf2VideoError::AudioUnreadable {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let spec = reader.spec();
    let frames = reader.len() as f64 / spec.channels as f64;
    Ok(frames / spec.sample_rate as f64)
}
