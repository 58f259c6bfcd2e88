//! End-to-end integration tests for pdf2video.
//!
//! These exercise the text-level pipeline (splitting, script building,
//! persistence, artwork composition) through the public API. Nothing here
//! shells out to ffmpeg or piper: the external-tool paths are covered by
//! unit tests on argument construction and error mapping, so this suite
//! runs everywhere, including CI machines without media tooling.

use pdf2video::pipeline::art::{rasterize, scene_svg, Illustration};
use pdf2video::pipeline::sections::{is_section_header, split_sections};
use pdf2video::pipeline::storyboard::build_script;
use pdf2video::{load_script, save_script, AvatarAction, Pdf2VideoError, PipelineConfig};
use std::path::Path;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// A miniature paper: preamble, numbered and all-caps headings, citations,
/// figure references.
fn sample_paper() -> &'static str {
    "Gallium nitride devices have moved from research labs into volume production lines.\n\
     \n\
     1. Introduction\n\
     Wide bandgap semiconductors sustain far higher electric fields than silicon ever could. \
     The material also keeps its carrier mobility at elevated temperatures [3]. \
     Early demonstrations (Khan, 1993) focused on optoelectronics before power devices took over.\n\
     \n\
     DEVICE STRUCTURE\n\
     The heterostructure stacks an AlGaN barrier over a GaN channel on a buffer layer. \
     Polarization charge forms a dense electron sheet at the interface without any doping. \
     Figure 2 shows the conduction band diagram under equilibrium conditions.\n\
     \n\
     3. Performance\n\
     Switching losses drop by an order of magnitude compared with superjunction silicon parts. \
     Efficiency above ninety-eight percent has been reported for kilowatt-class converters et al.\n\
     \n\
     Applications\n\
     Fast chargers, satellite transceivers, and base stations all exploit the higher power density. \
     Automotive traction inverters are the next target for the technology.\n"
}

fn config() -> PipelineConfig {
    PipelineConfig::default()
}

// ── Section splitter properties ──────────────────────────────────────────────

#[test]
fn splitter_recovers_non_header_lines_in_order() {
    let text = sample_paper();
    let sections = split_sections(text);

    let expected: String = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_section_header(l))
        .map(|l| format!("{l} "))
        .collect();
    let actual: String = sections.iter().map(|s| s.content.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn numbered_overview_line_is_always_a_header() {
    assert!(is_section_header("3. Overview"));
}

#[test]
fn plain_lowercase_line_is_never_a_header() {
    assert!(!is_section_header("the devices switch faster than their silicon rivals"));
}

#[test]
fn sample_paper_sections_carry_their_titles() {
    let sections = split_sections(sample_paper());
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Introduction",
            "1. Introduction",
            "DEVICE STRUCTURE",
            "3. Performance",
            "Applications",
        ]
    );
}

// ── Script builder properties ────────────────────────────────────────────────

#[test]
fn generated_scenes_satisfy_the_invariants() {
    let sections = split_sections(sample_paper());
    let script = build_script(&sections, &config());

    assert!(script.validate().is_ok());
    for scene in &script.scenes {
        assert!(scene.duration >= 5, "scene {} too short", scene.scene_id);
        assert!(
            scene.narration.chars().count() <= 300,
            "scene {} narration too long",
            scene.scene_id
        );
    }
    assert_eq!(
        script.total_duration,
        script.scenes.iter().map(|s| s.duration).sum::<u32>()
    );

    // Bookends are fixed regardless of content.
    assert_eq!(script.scenes.first().unwrap().character_action, AvatarAction::Greeting);
    assert_eq!(script.scenes.last().unwrap().character_action, AvatarAction::Concluding);
}

#[test]
fn script_building_has_no_hidden_randomness() {
    let sections = split_sections(sample_paper());
    let a = build_script(&sections, &config());
    let b = build_script(&sections, &config());
    assert_eq!(a, b);
}

#[test]
fn narration_never_mentions_figures_or_citations() {
    let sections = split_sections(sample_paper());
    let script = build_script(&sections, &config());
    for scene in &script.scenes {
        let lower = scene.narration.to_lowercase();
        assert!(!lower.contains("figure"), "scene {}: {lower}", scene.scene_id);
        assert!(!scene.narration.contains("[3]"));
        assert!(!scene.narration.contains("1993"));
        assert!(!scene.narration.contains("et al"));
    }
}

// ── Empty-document degradation ───────────────────────────────────────────────

#[test]
fn empty_text_yields_the_two_bookend_scenes() {
    let sections = split_sections("");
    let script = build_script(&sections, &config());

    assert_eq!(script.scene_count, 2);
    assert_eq!(script.total_duration, 16); // 8 + 8, absent longer audio
    assert!(script.validate().is_ok());
}

#[test]
fn bookend_scenes_render_to_png() {
    let sections = split_sections("");
    let script = build_script(&sections, &config());
    let cfg = config();

    for scene in &script.scenes {
        let svg = scene_svg(scene, &cfg);
        let png = rasterize(&svg, cfg.width, cfg.height).expect("rasterisation should succeed");
        assert_eq!(&png[1..4], b"PNG");
    }
}

// ── Script persistence ───────────────────────────────────────────────────────

#[tokio::test]
async fn script_survives_a_disk_round_trip() {
    let sections = split_sections(sample_paper());
    let script = build_script(&sections, &config());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("video_script.json");
    save_script(&script, &path).await.unwrap();

    let loaded = load_script(&path).await.unwrap();
    assert_eq!(script, loaded);
}

#[tokio::test]
async fn hand_broken_script_is_rejected_on_load() {
    let sections = split_sections(sample_paper());
    let mut script = build_script(&sections, &config());
    // Simulate a bad hand edit: duplicate the first scene id.
    script.scenes[1].scene_id = script.scenes[0].scene_id;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("video_script.json");
    let json = serde_json::to_string_pretty(&script).unwrap();
    tokio::fs::write(&path, json).await.unwrap();

    let err = load_script(&path).await.unwrap_err();
    assert!(matches!(err, Pdf2VideoError::InvalidScript { .. }));
}

// ── Input validation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_pdf_is_fatal_not_degrading() {
    let err = pdf2video::generate_script(Path::new("/no/such/paper.pdf"), &config())
        .await
        .unwrap_err();
    assert!(matches!(err, Pdf2VideoError::FileNotFound { .. }));
}

// ── Artwork selection consistency ────────────────────────────────────────────

#[test]
fn scene_titles_map_to_the_expected_illustrations() {
    let sections = split_sections(sample_paper());
    let script = build_script(&sections, &config());

    let picks: Vec<Illustration> = script
        .scenes
        .iter()
        .map(|s| Illustration::select(&s.title))
        .collect();

    // Intro bookend and the "1. Introduction" section both draw the lattice;
    // the structure section draws the layer stack; performance the chart;
    // applications the hub; the conclusion falls through to the circuit field.
    assert_eq!(picks.first(), Some(&Illustration::CrystalLattice));
    assert!(picks.contains(&Illustration::LayerStack));
    assert!(picks.contains(&Illustration::PerformanceChart));
    assert!(picks.contains(&Illustration::ApplicationHub));
    assert_eq!(picks.last(), Some(&Illustration::CircuitField));
}
