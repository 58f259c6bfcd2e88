//! Error types for the pdf2video library.
//!
//! One fatal enum, [`Pdf2VideoError`], covers the whole pipeline. The only
//! non-fatal failure mode is text extraction, which degrades to an empty
//! string inside [`crate::pipeline::extract::extract_text_or_empty`] instead
//! of surfacing here: an unreadable PDF still yields a valid two-scene
//! script (intro + conclusion), and everything downstream proceeds.
//!
//! Every other stage error aborts the run. There are no retries anywhere;
//! a subsequent run recomputes from scratch.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2video library.
#[derive(Debug, Error)]
pub enum Pdf2VideoError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// Strict text extraction failed (the pipeline path degrades instead).
    #[error("Failed to extract text from '{path}': {detail}")]
    ExtractFailed { path: PathBuf, detail: String },

    // ── Script errors ─────────────────────────────────────────────────────
    /// A script file could not be read or parsed, or violated an invariant
    /// (scene ids unique and ascending, durations positive, totals consistent).
    #[error("Invalid script '{path}': {detail}")]
    InvalidScript { path: PathBuf, detail: String },

    /// Could not write the script JSON artifact.
    #[error("Failed to write script file '{path}': {source}")]
    ScriptWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Rendering errors ──────────────────────────────────────────────────
    /// SVG composition or rasterisation failed for a scene.
    #[error("Failed to render artwork for scene {scene}: {detail}")]
    ArtworkFailed { scene: u32, detail: String },

    /// Speech synthesis failed for a scene. Fatal: no retry, no fallback voice.
    #[error("Speech synthesis failed for scene {scene}: {detail}")]
    SpeechFailed { scene: u32, detail: String },

    /// A synthesized WAV file could not be read back for duration probing.
    #[error("Failed to read audio file '{path}': {detail}")]
    AudioUnreadable { path: PathBuf, detail: String },

    // ── External tool errors ──────────────────────────────────────────────
    /// A required external command was not found on PATH.
    #[error(
        "Required tool '{tool}' was not found on PATH.\n\
         ffmpeg: install with your package manager (e.g. apt-get install ffmpeg).\n\
         piper:  download from https://github.com/rhasspy/piper/releases."
    )]
    ToolMissing { tool: String },

    /// An external command ran but exited non-zero.
    #[error("{tool} failed: {detail}")]
    ToolFailed { tool: String, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output or scratch file.
    #[error("Failed to write '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Pdf2VideoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_missing_display_names_the_tool() {
        let e = Pdf2VideoError::ToolMissing {
            tool: "ffmpeg".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("ffmpeg"), "got: {msg}");
        assert!(msg.contains("PATH"));
    }

    #[test]
    fn invalid_script_display() {
        let e = Pdf2VideoError::InvalidScript {
            path: PathBuf::from("video_script.json"),
            detail: "scene ids must be strictly ascending".into(),
        };
        assert!(e.to_string().contains("video_script.json"));
        assert!(e.to_string().contains("ascending"));
    }

    #[test]
    fn speech_failed_names_the_scene() {
        let e = Pdf2VideoError::SpeechFailed {
            scene: 3,
            detail: "piper exited with status 1".into(),
        };
        assert!(e.to_string().contains("scene 3"));
    }
}
