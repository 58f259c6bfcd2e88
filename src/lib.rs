//! # pdf2video
//!
//! Turn a PDF document into a narrated slideshow video.
//!
//! The pipeline extracts the PDF's embedded text, splits it into titled
//! sections with line-level heuristics, fabricates a short narration and
//! an image prompt per section, renders a canned illustration plus a
//! cartoon presenter for each scene, synthesizes speech, and concatenates
//! the per-scene clips into one video file. Heavy lifting stays external:
//! `pdf-extract` reads the PDF, `piper` speaks, `ffmpeg` encodes.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Extract    embedded page text, concatenated
//!  ├─ 2. Sections   header heuristics → titled sections
//!  ├─ 3. Storyboard scenes + fixed intro/conclusion → Script (JSON)
//!  ├─ 4. Art        per scene: SVG illustration + avatar → PNG (resvg)
//!  ├─ 5. Speech     narration → WAV (piper subprocess)
//!  └─ 6. Assemble   clip per scene, concat → final MP4 (ffmpeg)
//! ```
//!
//! The script JSON written between steps 3 and 4 is the only persisted
//! intermediate artifact; generation and rendering can run as separate
//! invocations against it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2video::{generate_script, render_video, PipelineConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::default();
//!     let script = generate_script(Path::new("GaN Overview.pdf"), &config).await?;
//!     let stats = render_video(&script, &config).await?;
//!     println!("wrote {}", stats.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2video` binary (clap + anyhow + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2video = { version = "0.3", default-features = false }
//! ```
//!
//! ## External tools
//!
//! `ffmpeg` (encoding) and `piper` (speech) must be on `PATH`. Their
//! absence is detected and reported with install hints, never worked
//! around.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod progress;
pub mod script;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{Pdf2VideoError, Result};
pub use generate::{
    cleanup_assets, generate_script, generate_script_to_file, load_script, render_demo,
    render_video, save_script, DemoOutput, RenderStats,
};
pub use progress::{NoopProgress, ProgressHook, RenderProgress};
pub use script::{AvatarAction, Scene, Script};
