//! CLI binary for pdf2video.
//!
//! A thin shim over the library crate that maps subcommands and flags to
//! `PipelineConfig` and prints results. Every flag has a default, so each
//! subcommand also works bare: `pdf2video auto` turns `GaN Overview.pdf`
//! into `gan_overview_video.mp4` with no further arguments.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use pdf2video::{
    cleanup_assets, generate_script_to_file, load_script, render_demo, render_video,
    PipelineConfig, ProgressHook, RenderProgress, Script,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar across the scene list with a
/// per-scene log line as each clip lands.
struct SceneBar {
    bar: ProgressBar,
}

impl SceneBar {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_render_start
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:40.green/238}] {pos}/{len} scenes  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        bar.set_prefix("Rendering");
        Arc::new(Self { bar })
    }
}

impl RenderProgress for SceneBar {
    fn on_render_start(&self, total_scenes: usize) {
        // The bar stays invisible until rendering actually starts, so the
        // script summary and stdin prompts print cleanly before it.
        self.bar.set_length(total_scenes as u64);
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_scene_start(&self, scene_id: u32, title: &str, _total: usize) {
        self.bar.set_message(format!("scene {scene_id}: {title}"));
    }

    fn on_scene_complete(&self, scene_id: u32, total: usize, clip_secs: f64) {
        self.bar.println(format!(
            "  {} Scene {scene_id:>2}/{total:<2}  {}",
            green("✓"),
            dim(&format!("{clip_secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_render_complete(&self, _total: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Full pipeline with prompts (script, then y/n before rendering and cleanup)
  pdf2video run

  # Fully automated: render everything, always clean up the scratch dir
  pdf2video auto --pdf paper.pdf --output paper_video.mp4

  # Stage by stage
  pdf2video generate --pdf paper.pdf
  pdf2video render

  # Quick preview: 3 frames, slideshow MP4 + animated GIF fallback
  pdf2video demo

EXTERNAL TOOLS:
  ffmpeg   required for rendering; detected up front and reported if absent
  piper    speech synthesis; point --voice-model at a piper .onnx voice

ENVIRONMENT VARIABLES:
  PDF2VIDEO_PDF       Input PDF path
  PDF2VIDEO_SCRIPT    Script JSON path
  PDF2VIDEO_OUTPUT    Final video path
  PDF2VIDEO_VOICE     Piper voice model (.onnx)
  PDF2VIDEO_ASSETS    Scratch directory for per-scene assets
"#;

/// Create a narrated slideshow video from a PDF document.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2video",
    version,
    about = "Create a narrated slideshow video from a PDF document",
    long_about = "Extract text from a PDF, split it into sections, fabricate a scene script, \
render illustrations and a cartoon presenter, synthesize narration, and assemble the scenes \
into a video with ffmpeg.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Input PDF path.
    #[arg(long, global = true, env = "PDF2VIDEO_PDF", default_value = "GaN Overview.pdf")]
    pdf: PathBuf,

    /// Script JSON path (the generation/rendering boundary artifact).
    #[arg(long, global = true, env = "PDF2VIDEO_SCRIPT", default_value = "video_script.json")]
    script: PathBuf,

    /// Final video path.
    #[arg(short, long, global = true, env = "PDF2VIDEO_OUTPUT", default_value = "gan_overview_video.mp4")]
    output: PathBuf,

    /// Piper voice model (.onnx).
    #[arg(long, global = true, env = "PDF2VIDEO_VOICE", default_value = "en_US-amy-medium.onnx")]
    voice_model: PathBuf,

    /// Scratch directory for per-scene images, audio, and clips.
    #[arg(long, global = true, env = "PDF2VIDEO_ASSETS", default_value = "temp_video_assets")]
    assets_dir: PathBuf,

    /// Disable the progress bar.
    #[arg(long, global = true, env = "PDF2VIDEO_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDF2VIDEO_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "PDF2VIDEO_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the scene script from the PDF and save it as JSON.
    Generate,
    /// Render the video from an existing script (non-interactive).
    Render,
    /// Full pipeline with y/n prompts before rendering and before cleanup.
    Run,
    /// Full pipeline without prompts; always cleans up the scratch dir.
    Auto,
    /// Render demo frames for the first 3 scenes plus a slideshow MP4 and
    /// an animated GIF fallback.
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar is the user feedback; keep library logs quiet
    // unless explicitly asked for.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli, show_progress)?;

    match cli.command {
        Command::Generate => {
            let script = generate_script_to_file(&cli.pdf, &cli.script, &config)
                .await
                .context("Script generation failed")?;
            print_script_summary(&cli, &script);
            preview_scenes(&cli, &script);
        }
        Command::Render => {
            let script = load_script(&cli.script)
                .await
                .with_context(|| format!("Failed to load script {}", cli.script.display()))?;
            let stats = render_video(&script, &config)
                .await
                .context("Video generation failed")?;
            print_render_summary(&cli, stats.scenes_rendered, stats.clip_secs, &stats.output);
        }
        Command::Run => {
            let script = generate_script_to_file(&cli.pdf, &cli.script, &config)
                .await
                .context("Script generation failed")?;
            print_script_summary(&cli, &script);

            if !prompt_yes_no("Generate the video now? (y/n): ")? {
                println!(
                    "Script saved to {}. Run `pdf2video render` when ready.",
                    cli.script.display()
                );
                return Ok(());
            }

            let stats = render_video(&script, &config)
                .await
                .context("Video generation failed")?;
            print_render_summary(&cli, stats.scenes_rendered, stats.clip_secs, &stats.output);

            if prompt_yes_no("Remove temporary files? (y/n): ")? {
                cleanup_assets(&config).await.context("Cleanup failed")?;
            }
        }
        Command::Auto => {
            let script = generate_script_to_file(&cli.pdf, &cli.script, &config)
                .await
                .context("Script generation failed")?;
            print_script_summary(&cli, &script);

            let stats = render_video(&script, &config)
                .await
                .context("Video generation failed")?;
            print_render_summary(&cli, stats.scenes_rendered, stats.clip_secs, &stats.output);

            cleanup_assets(&config).await.context("Cleanup failed")?;
        }
        Command::Demo => {
            let script = load_script(&cli.script)
                .await
                .with_context(|| format!("Failed to load script {}", cli.script.display()))?;
            let demo = render_demo(&script, &config)
                .await
                .context("Demo rendering failed")?;

            if !cli.quiet {
                println!("{} Created {} demo frames", green("✓"), demo.frames.len());
                match &demo.video {
                    Some(path) => print_created_file(path),
                    None => println!(
                        "{} slideshow video skipped (ffmpeg unavailable or failed)",
                        red("✗")
                    ),
                }
                print_created_file(&demo.gif);
            }
        }
    }

    Ok(())
}

/// Map CLI args to `PipelineConfig`.
fn build_config(cli: &Cli, show_progress: bool) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder()
        .output(cli.output.clone())
        .assets_dir(cli.assets_dir.clone())
        .voice_model(cli.voice_model.clone());

    if show_progress {
        builder = builder.progress(SceneBar::new() as ProgressHook);
    }

    builder.build().context("Invalid configuration")
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` counts as no.
fn prompt_yes_no(question: &str) -> Result<bool> {
    print!("{question}");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn print_script_summary(cli: &Cli, script: &Script) {
    if cli.quiet {
        return;
    }
    println!(
        "{} Generated {} scenes, {} seconds total  →  {}",
        green("✓"),
        bold(&script.scene_count.to_string()),
        script.total_duration,
        bold(&cli.script.display().to_string()),
    );
}

/// Preview the first few scenes, mirroring what a reviewer checks before
/// committing to a multi-minute render.
fn preview_scenes(cli: &Cli, script: &Script) {
    if cli.quiet {
        return;
    }
    println!("\n{}", bold("Script preview:"));
    for scene in script.scenes.iter().take(3) {
        let narration: String = scene.narration.chars().take(100).collect();
        println!(
            "\n{} {}  {}",
            cyan(&format!("Scene {}:", scene.scene_id)),
            bold(&scene.title),
            dim(&format!("{}s", scene.duration)),
        );
        println!("  {narration}...");
    }
}

fn print_render_summary(cli: &Cli, scenes: usize, clip_secs: f64, output: &std::path::Path) {
    if cli.quiet {
        return;
    }
    println!(
        "{} {} scenes rendered, {:.0}s of video  →  {}",
        green("✔"),
        bold(&scenes.to_string()),
        clip_secs,
        bold(&output.display().to_string()),
    );
}

fn print_created_file(path: &std::path::Path) {
    let size_mb = std::fs::metadata(path)
        .map(|m| m.len() as f64 / (1024.0 * 1024.0))
        .unwrap_or(0.0);
    println!("{} {} ({size_mb:.2} MB)", green("✓"), path.display());
}
