//! Video assembly: ffmpeg compositing, concatenation, and the demo
//! slideshow/GIF fallback.
//!
//! ffmpeg is an environment dependency, not a library: its absence is
//! detected up front via [`ensure_encoder`] and reported, never worked
//! around. Every invocation captures stderr so a failed encode surfaces
//! the encoder's own diagnostics.
//!
//! A scene clip is the background PNG looped for the clip duration, the
//! avatar scaled and anchored bottom-right with a fixed margin, and the
//! narration audio mapped in. Clips are then concatenated in scene order
//! with the concat demuxer (stream copy, no re-encode).

use crate::config::PipelineConfig;
use crate::error::{Pdf2VideoError, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Verify that `ffmpeg` is runnable.
pub async fn ensure_encoder() -> Result<()> {
    let status = Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Pdf2VideoError::ToolMissing {
                    tool: "ffmpeg".into(),
                }
            } else {
                Pdf2VideoError::ToolFailed {
                    tool: "ffmpeg".into(),
                    detail: e.to_string(),
                }
            }
        })?;

    if !status.success() {
        return Err(Pdf2VideoError::ToolFailed {
            tool: "ffmpeg".into(),
            detail: format!("probe exited with {status}"),
        });
    }
    Ok(())
}

/// Run ffmpeg with the given arguments, surfacing stderr on failure.
async fn run_ffmpeg(args: &[String]) -> Result<()> {
    debug!("ffmpeg {}", args.join(" "));
    let output = Command::new("ffmpeg").args(args).output().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Pdf2VideoError::ToolMissing {
                tool: "ffmpeg".into(),
            }
        } else {
            Pdf2VideoError::ToolFailed {
                tool: "ffmpeg".into(),
                detail: e.to_string(),
            }
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // The tail carries the actual error; full ffmpeg banners are noise.
        let tail: String = stderr
            .lines()
            .rev()
            .take(6)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        return Err(Pdf2VideoError::ToolFailed {
            tool: "ffmpeg".into(),
            detail: format!("exited with {}: {tail}", output.status),
        });
    }
    Ok(())
}

/// Build the filter graph scaling the avatar and pinning it bottom-right.
fn overlay_filter(config: &PipelineConfig) -> String {
    format!(
        "[1:v]scale=iw*{scale}:-1[avatar];\
         [0:v][avatar]overlay=main_w-overlay_w-{margin}:main_h-overlay_h-{margin}[v]",
        scale = config.avatar_scale,
        margin = config.avatar_margin,
    )
}

/// Encode one scene clip: looped background + avatar overlay + audio.
///
/// `duration_secs` is already `max(audio length, scene.duration)`.
pub async fn encode_scene_clip(
    image: &Path,
    avatar: &Path,
    audio: &Path,
    duration_secs: f64,
    config: &PipelineConfig,
    out: &Path,
) -> Result<()> {
    let args: Vec<String> = vec![
        "-y".into(),
        "-loop".into(),
        "1".into(),
        "-i".into(),
        image.display().to_string(),
        "-i".into(),
        avatar.display().to_string(),
        "-i".into(),
        audio.display().to_string(),
        "-filter_complex".into(),
        overlay_filter(config),
        "-map".into(),
        "[v]".into(),
        "-map".into(),
        "2:a".into(),
        "-t".into(),
        format!("{duration_secs:.3}"),
        "-r".into(),
        config.fps.to_string(),
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        "-c:a".into(),
        "aac".into(),
        out.display().to_string(),
    ];
    run_ffmpeg(&args).await?;
    debug!("Encoded clip: {}", out.display());
    Ok(())
}

/// Concatenate clips in order into the final output via the concat demuxer.
pub async fn concat_clips(clips: &[PathBuf], assets_dir: &Path, out: &Path) -> Result<()> {
    let mut list = String::new();
    for clip in clips {
        // The concat demuxer resolves relative paths against the list file,
        // so absolute paths keep the list location-independent.
        let abs = clip
            .canonicalize()
            .map_err(|e| Pdf2VideoError::Internal(format!("canonicalize {}: {e}", clip.display())))?;
        list.push_str(&format!("file '{}'\n", abs.display()));
    }

    let list_path = assets_dir.join("concat.txt");
    tokio::fs::write(&list_path, list)
        .await
        .map_err(|e| Pdf2VideoError::OutputWriteFailed {
            path: list_path.clone(),
            source: e,
        })?;

    let args: Vec<String> = vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        list_path.display().to_string(),
        "-c".into(),
        "copy".into(),
        out.display().to_string(),
    ];
    run_ffmpeg(&args).await?;
    info!("Concatenated {} clips into {}", clips.len(), out.display());
    Ok(())
}

/// Turn numbered demo frames (`frame_%03d.png`) into a slideshow MP4,
/// one frame per five seconds.
pub async fn frames_to_video(frames_dir: &Path, out: &Path) -> Result<()> {
    let pattern = frames_dir.join("frame_%03d.png");
    let args: Vec<String> = vec![
        "-y".into(),
        "-framerate".into(),
        "1/5".into(),
        "-i".into(),
        pattern.display().to_string(),
        "-c:v".into(),
        "libx264".into(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        out.display().to_string(),
    ];
    run_ffmpeg(&args).await
}

/// Animated-GIF fallback for the demo: frames downscaled to 960×540,
/// five seconds each, looping forever. Pure-Rust path, no encoder needed.
pub fn frames_to_gif(frames: &[PathBuf], out: &Path) -> Result<()> {
    use image::codecs::gif::{GifEncoder, Repeat};
    use image::{imageops, Delay, Frame};

    let file = std::fs::File::create(out).map_err(|e| Pdf2VideoError::OutputWriteFailed {
        path: out.to_path_buf(),
        source: e,
    })?;
    let mut encoder = GifEncoder::new(file);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| Pdf2VideoError::Internal(format!("gif: {e}")))?;

    for path in frames {
        let img = image::open(path)
            .map_err(|e| Pdf2VideoError::Internal(format!("decode {}: {e}", path.display())))?
            .to_rgba8();
        let small = imageops::resize(&img, 960, 540, imageops::FilterType::Lanczos3);
        let frame = Frame::from_parts(small, 0, 0, Delay::from_numer_denom_ms(5000, 1));
        encoder
            .encode_frame(frame)
            .map_err(|e| Pdf2VideoError::Internal(format!("gif: {e}")))?;
    }

    info!("Wrote animated GIF fallback: {}", out.display());
    Ok(())
}
