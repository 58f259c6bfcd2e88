//! Pipeline entry points: script generation, video rendering, the demo
//! slideshow, and scratch cleanup.
//!
//! The script is the boundary artifact: [`generate_script`] produces it
//! from a PDF, [`save_script`]/[`load_script`] persist it as JSON, and
//! [`render_video`] consumes it. Rendering is strictly sequential (one
//! scene at a time, assets keyed by scene id, clips concatenated in scene
//! order) and nothing is cleaned up until [`cleanup_assets`] is called
//! explicitly.

use crate::config::PipelineConfig;
use crate::error::{Pdf2VideoError, Result};
use crate::pipeline::{art, assemble, extract, sections, speech, storyboard};
use crate::script::Script;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Summary of a completed render.
#[derive(Debug, Clone)]
pub struct RenderStats {
    /// Number of scene clips encoded and concatenated.
    pub scenes_rendered: usize,
    /// Sum of actual clip lengths in seconds (audio may stretch a scene
    /// past its nominal duration).
    pub clip_secs: f64,
    /// Path of the final video.
    pub output: PathBuf,
    /// Wall-clock time for the whole render.
    pub total_duration_ms: u64,
}

/// Files produced by the demo path.
#[derive(Debug, Clone)]
pub struct DemoOutput {
    pub frames: Vec<PathBuf>,
    /// `None` when ffmpeg was unavailable or failed; the GIF still exists.
    pub video: Option<PathBuf>,
    pub gif: PathBuf,
}

/// Generate a script from a PDF.
///
/// A missing or unreadable input file is fatal; an extraction/parse
/// failure merely degrades to empty text, which yields a script containing
/// only the fixed intro and conclusion scenes.
pub async fn generate_script(pdf_path: &Path, config: &PipelineConfig) -> Result<Script> {
    extract::resolve_pdf(pdf_path)?;

    info!("Extracting text from {}", pdf_path.display());
    let text = extract::extract_text_or_empty(pdf_path);
    info!("Extracted {} chars", text.len());

    let sections = sections::split_sections(&text);
    info!("Split into {} sections", sections.len());

    let script = storyboard::build_script(&sections, config);
    info!(
        "Generated {} scenes, {} seconds total",
        script.scene_count, script.total_duration
    );
    Ok(script)
}

/// Generate a script and persist it in one step.
pub async fn generate_script_to_file(
    pdf_path: &Path,
    script_path: &Path,
    config: &PipelineConfig,
) -> Result<Script> {
    let script = generate_script(pdf_path, config).await?;
    save_script(&script, script_path).await?;
    Ok(script)
}

/// Write the script as pretty JSON, atomically (temp file + rename).
pub async fn save_script(script: &Script, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(script)
        .map_err(|e| Pdf2VideoError::Internal(format!("script serialization: {e}")))?;

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json)
        .await
        .map_err(|e| Pdf2VideoError::ScriptWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| Pdf2VideoError::ScriptWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!("Script saved to {}", path.display());
    Ok(())
}

/// Read a script back, re-validating its invariants.
pub async fn load_script(path: &Path) -> Result<Script> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Pdf2VideoError::InvalidScript {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let script: Script =
        serde_json::from_str(&data).map_err(|e| Pdf2VideoError::InvalidScript {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    script
        .validate()
        .map_err(|detail| Pdf2VideoError::InvalidScript {
            path: path.to_path_buf(),
            detail,
        })?;

    Ok(script)
}

/// Render the final video from a script.
///
/// Scenes are processed strictly in order (illustration, avatar, narration
/// audio, clip encode), then all clips are concatenated into
/// `config.output`. Any stage error aborts the run; assets already written
/// stay on disk until [`cleanup_assets`].
pub async fn render_video(script: &Script, config: &PipelineConfig) -> Result<RenderStats> {
    let start = Instant::now();

    script
        .validate()
        .map_err(|detail| Pdf2VideoError::InvalidScript {
            path: PathBuf::from("(in-memory script)"),
            detail,
        })?;

    assemble::ensure_encoder().await?;

    tokio::fs::create_dir_all(&config.assets_dir)
        .await
        .map_err(|e| Pdf2VideoError::OutputWriteFailed {
            path: config.assets_dir.clone(),
            source: e,
        })?;

    let total = script.scenes.len();
    if let Some(hook) = &config.progress {
        hook.on_render_start(total);
    }

    let mut clips = Vec::with_capacity(total);
    let mut clip_secs_total = 0.0f64;

    for scene in &script.scenes {
        if let Some(hook) = &config.progress {
            hook.on_scene_start(scene.scene_id, &scene.title, total);
        }
        info!("Creating scene {}: {}", scene.scene_id, scene.title);

        let id = scene.scene_id;
        let image = config.assets_dir.join(format!("scene_{id}.png"));
        let avatar = config.assets_dir.join(format!("avatar_{id}.png"));
        let audio = config.assets_dir.join(format!("audio_{id}.wav"));
        let clip = config.assets_dir.join(format!("scene_{id}.mp4"));

        art::render_scene_image(scene, config, &image)?;
        art::render_avatar(id, scene.character_action, &avatar)?;
        speech::synthesize(id, &scene.narration, &config.voice_model, &audio).await?;

        let audio_secs = speech::wav_duration_secs(&audio)?;
        let clip_secs = audio_secs.max(scene.duration as f64);
        assemble::encode_scene_clip(&image, &avatar, &audio, clip_secs, config, &clip).await?;

        clip_secs_total += clip_secs;
        clips.push(clip);
        if let Some(hook) = &config.progress {
            hook.on_scene_complete(id, total, clip_secs);
        }
    }

    assemble::concat_clips(&clips, &config.assets_dir, &config.output).await?;

    if let Some(hook) = &config.progress {
        hook.on_render_complete(total);
    }

    let stats = RenderStats {
        scenes_rendered: total,
        clip_secs: clip_secs_total,
        output: config.output.clone(),
        total_duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Video generation complete: {} scenes, {:.1}s of footage, {}",
        stats.scenes_rendered,
        stats.clip_secs,
        stats.output.display()
    );
    Ok(stats)
}

/// Render the demo preview: frames for the first three scenes, a slideshow
/// MP4 when ffmpeg is available, and an animated-GIF fallback always.
pub async fn render_demo(script: &Script, config: &PipelineConfig) -> Result<DemoOutput> {
    let frames_dir = PathBuf::from("demo_frames");
    tokio::fs::create_dir_all(&frames_dir)
        .await
        .map_err(|e| Pdf2VideoError::OutputWriteFailed {
            path: frames_dir.clone(),
            source: e,
        })?;

    let mut frames = Vec::new();
    for (i, scene) in script.scenes.iter().take(3).enumerate() {
        info!("Creating frame for scene {}: {}", scene.scene_id, scene.title);
        let path = frames_dir.join(format!("frame_{i:03}.png"));
        art::render_demo_frame(scene, config, &path)?;
        frames.push(path);
    }

    let video_path = PathBuf::from("gan_demo_video.mp4");
    let video = match assemble::frames_to_video(&frames_dir, &video_path).await {
        Ok(()) => Some(video_path),
        // Missing encoder skips the video; the GIF below still gets made.
        Err(e) => {
            warn!("Demo video not created: {e}");
            None
        }
    };

    let gif = PathBuf::from("gan_demo.gif");
    assemble::frames_to_gif(&frames, &gif)?;

    Ok(DemoOutput { frames, video, gif })
}

/// Remove the scratch directory and everything in it.
///
/// Explicit by design: rendering never deletes its own assets.
pub async fn cleanup_assets(config: &PipelineConfig) -> Result<()> {
    match tokio::fs::remove_dir_all(&config.assets_dir).await {
        Ok(()) => {
            info!("Cleaned up {}", config.assets_dir.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Pdf2VideoError::Internal(format!(
            "cleanup of {}: {e}",
            config.assets_dir.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{AvatarAction, Scene};

    fn sample_script() -> Script {
        Script::from_scenes(
            "Test",
            vec![Scene {
                scene_id: 1,
                title: "Introduction".into(),
                narration: "Hello.".into(),
                duration: 8,
                image_prompt: "prompt".into(),
                character_action: AvatarAction::Greeting,
            }],
        )
    }

    #[tokio::test]
    async fn script_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video_script.json");

        let script = sample_script();
        save_script(&script, &path).await.unwrap();
        let loaded = load_script(&path).await.unwrap();
        assert_eq!(script, loaded);
        // No stray temp file left behind by the atomic write.
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn load_rejects_inconsistent_totals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video_script.json");

        let mut script = sample_script();
        script.total_duration = 999;
        let json = serde_json::to_string_pretty(&script).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let err = load_script(&path).await.unwrap_err();
        assert!(matches!(err, Pdf2VideoError::InvalidScript { .. }));
    }

    #[tokio::test]
    async fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video_script.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();
        assert!(load_script(&path).await.is_err());
    }

    #[tokio::test]
    async fn cleanup_of_missing_dir_is_ok() {
        let config = PipelineConfig::builder()
            .assets_dir("/tmp/pdf2video-test-definitely-missing")
            .build()
            .unwrap();
        cleanup_assets(&config).await.unwrap();
    }

    #[tokio::test]
    async fn generate_script_requires_the_input_file() {
        let config = PipelineConfig::default();
        let err = generate_script(Path::new("/no/such/doc.pdf"), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, Pdf2VideoError::FileNotFound { .. }));
    }
}
