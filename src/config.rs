//! Configuration for the PDF-to-video pipeline.
//!
//! All behaviour is controlled through [`PipelineConfig`], built via its
//! [`PipelineConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config between the script-generation and rendering
//! stages and to diff two runs to understand why their outputs differ.
//!
//! Defaults reproduce the canonical run: a 1920×1080 30 fps video at
//! `gan_overview_video.mp4`, scratch assets under `temp_video_assets/`.

use crate::error::Pdf2VideoError;
use crate::progress::ProgressHook;
use std::fmt;
use std::path::PathBuf;

/// Configuration for a pipeline run.
///
/// Built via [`PipelineConfig::builder()`] or [`PipelineConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2video::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .output("overview.mp4")
///     .fps(24)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Output frame width in pixels. Must be even (libx264/yuv420p). Default: 1920.
    pub width: u32,

    /// Output frame height in pixels. Must be even. Default: 1080.
    pub height: u32,

    /// Output frame rate. Default: 30.
    pub fps: u32,

    /// Final video path. Default: `gan_overview_video.mp4`.
    pub output: PathBuf,

    /// Scratch directory for per-scene images, audio, and clips.
    /// Files are keyed by scene id; removed only by an explicit cleanup call.
    /// Default: `temp_video_assets`.
    pub assets_dir: PathBuf,

    /// Piper voice model (`.onnx`) used for narration synthesis.
    /// Default: `en_US-amy-medium.onnx`.
    pub voice_model: PathBuf,

    /// Maximum number of content sections turned into scenes. Default: 10.
    pub max_sections: usize,

    /// Sections with less content than this (in chars) are skipped. Default: 100.
    pub min_section_chars: usize,

    /// Narration length cap in chars. Default: 300.
    pub narration_limit: usize,

    /// Speaking-rate estimate used for scene durations. Default: 20 words/sec
    /// divisor, i.e. `duration = max(min_scene_secs, words / 20)`.
    pub words_per_sec: usize,

    /// Lower bound on any content scene's duration in seconds. Default: 5.
    pub min_scene_secs: u32,

    /// Duration of the fixed intro and conclusion scenes in seconds. Default: 8.
    pub bookend_secs: u32,

    /// Avatar overlay scale relative to its 400 px master. Default: 0.3.
    pub avatar_scale: f32,

    /// Margin in pixels between the avatar and the bottom-right corner. Default: 50.
    pub avatar_margin: u32,

    /// Optional per-scene progress callback, invoked by the renderer.
    pub progress: Option<ProgressHook>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            fps: 30,
            output: PathBuf::from("gan_overview_video.mp4"),
            assets_dir: PathBuf::from("temp_video_assets"),
            voice_model: PathBuf::from("en_US-amy-medium.onnx"),
            max_sections: 10,
            min_section_chars: 100,
            narration_limit: 300,
            words_per_sec: 20,
            min_scene_secs: 5,
            bookend_secs: 8,
            avatar_scale: 0.3,
            avatar_margin: 50,
            progress: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fps", &self.fps)
            .field("output", &self.output)
            .field("assets_dir", &self.assets_dir)
            .field("voice_model", &self.voice_model)
            .field("max_sections", &self.max_sections)
            .field("min_section_chars", &self.min_section_chars)
            .field("narration_limit", &self.narration_limit)
            .field("words_per_sec", &self.words_per_sec)
            .field("min_scene_secs", &self.min_scene_secs)
            .field("bookend_secs", &self.bookend_secs)
            .field("avatar_scale", &self.avatar_scale)
            .field("avatar_margin", &self.avatar_margin)
            .field("progress", &self.progress.as_ref().map(|_| "<dyn RenderProgress>"))
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn width(mut self, px: u32) -> Self {
        self.config.width = px;
        self
    }

    pub fn height(mut self, px: u32) -> Self {
        self.config.height = px;
        self
    }

    pub fn fps(mut self, fps: u32) -> Self {
        self.config.fps = fps.max(1);
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    pub fn assets_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.assets_dir = path.into();
        self
    }

    pub fn voice_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.voice_model = path.into();
        self
    }

    pub fn max_sections(mut self, n: usize) -> Self {
        self.config.max_sections = n;
        self
    }

    pub fn min_section_chars(mut self, n: usize) -> Self {
        self.config.min_section_chars = n;
        self
    }

    pub fn narration_limit(mut self, n: usize) -> Self {
        self.config.narration_limit = n.max(1);
        self
    }

    pub fn words_per_sec(mut self, n: usize) -> Self {
        self.config.words_per_sec = n.max(1);
        self
    }

    pub fn min_scene_secs(mut self, secs: u32) -> Self {
        self.config.min_scene_secs = secs.max(1);
        self
    }

    pub fn bookend_secs(mut self, secs: u32) -> Self {
        self.config.bookend_secs = secs.max(1);
        self
    }

    pub fn avatar_scale(mut self, scale: f32) -> Self {
        self.config.avatar_scale = scale.clamp(0.05, 1.0);
        self
    }

    pub fn avatar_margin(mut self, px: u32) -> Self {
        self.config.avatar_margin = px;
        self
    }

    pub fn progress(mut self, hook: ProgressHook) -> Self {
        self.config.progress = Some(hook);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, Pdf2VideoError> {
        let c = &self.config;
        if c.width < 2 || c.height < 2 || c.width % 2 != 0 || c.height % 2 != 0 {
            return Err(Pdf2VideoError::InvalidConfig(format!(
                "Frame size must be even in both dimensions (yuv420p), got {}x{}",
                c.width, c.height
            )));
        }
        if c.fps == 0 {
            return Err(Pdf2VideoError::InvalidConfig("fps must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&c.avatar_scale) || c.avatar_scale <= 0.0 {
            return Err(Pdf2VideoError::InvalidConfig(format!(
                "avatar_scale must be in (0, 1], got {}",
                c.avatar_scale
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let config = PipelineConfig::builder().build().unwrap();
        assert_eq!(config.width, 1920);
        assert_eq!(config.height, 1080);
        assert_eq!(config.fps, 30);
        assert_eq!(config.bookend_secs, 8);
        assert_eq!(config.min_scene_secs, 5);
    }

    #[test]
    fn odd_frame_size_rejected() {
        let result = PipelineConfig::builder().width(1921).build();
        assert!(result.is_err());
    }

    #[test]
    fn fps_setter_clamps_zero() {
        let config = PipelineConfig::builder().fps(0).build().unwrap();
        assert_eq!(config.fps, 1);
    }

    #[test]
    fn avatar_scale_clamped_into_range() {
        let config = PipelineConfig::builder().avatar_scale(7.0).build().unwrap();
        assert!(config.avatar_scale <= 1.0);
    }
}
