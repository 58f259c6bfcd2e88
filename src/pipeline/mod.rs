//! Pipeline stages for PDF-to-video generation.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. the speech backend) without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ sections ──▶ storyboard ──▶ (per scene: art, speech, assemble)
//! (pdf text)  (headers)    (scenes)        (png)  (wav)   (mp4 clip + concat)
//! ```
//!
//! 1. [`extract`]    — validate the input path and pull embedded page text
//! 2. [`sections`]   — split flat text into titled sections by line heuristics
//! 3. [`storyboard`] — fabricate per-section scenes plus fixed bookend scenes
//! 4. [`art`]        — draw the scene illustration and the avatar as PNGs
//! 5. [`speech`]     — synthesize narration WAVs via the piper CLI
//! 6. [`assemble`]   — composite clips with ffmpeg and concatenate them

pub mod art;
pub mod assemble;
pub mod extract;
pub mod sections;
pub mod speech;
pub mod storyboard;
