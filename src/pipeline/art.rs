//! Scene artwork: canned vector illustrations and the cartoon avatar.
//!
//! Each scene gets a dark-themed 16:9 background image with a banner and
//! one of five illustrations, selected by [`ILLUSTRATION_RULES`], an
//! explicit ordered (keywords, illustration) table matched against the
//! scene title. Shapes are laid out on a 10×10 logical grid and mapped to
//! pixels, composed as an SVG string, and rasterized to PNG with resvg.
//!
//! The avatar is a 400×400 flat-colored cartoon presenter with exactly
//! three poses keyed by [`AvatarAction`]; the assembler scales and anchors
//! it bottom-right over the background.
//!
//! Everything here is deterministic: the only randomness is the circuit
//! field's PRNG, which runs from a fixed seed.

use crate::config::PipelineConfig;
use crate::error::{Pdf2VideoError, Result};
use crate::script::{AvatarAction, Scene};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use resvg::{tiny_skia, usvg};
use std::path::Path;
use std::sync::Arc;

// ── Palette ──────────────────────────────────────────────────────────────

const INK: &str = "#0a0a0a";
const PANEL: &str = "#1a1a1a";
const BLUE: &str = "#4a90e2";
const PINK: &str = "#e24a90";
const GREEN: &str = "#90e24a";
const ORANGE: &str = "#e2904a";
const PURPLE: &str = "#904ae2";
const TEAL: &str = "#4ae290";
const GOLD: &str = "#ffd700";

const BODY_FILL: &str = "#6496ff";
const BODY_EDGE: &str = "#3264c8";
const SKIN: &str = "#ffc896";

/// Master avatar canvas size in pixels (square, transparent).
pub const AVATAR_SIZE: u32 = 400;

/// Seed for the circuit-field PRNG; fixed so repeated runs render
/// byte-identical backgrounds.
const CIRCUIT_SEED: u64 = 42;

// ── Illustration selection ───────────────────────────────────────────────

/// The five canned scene backdrops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Illustration {
    /// Hexagonal Ga/N lattice with bond links.
    CrystalLattice,
    /// Six labelled application boxes around a central hub.
    ApplicationHub,
    /// Stacked device layers with a dashed 2DEG line.
    LayerStack,
    /// Grouped bar chart comparing semiconductor materials.
    PerformanceChart,
    /// Seeded scatter of trace lines and nodes.
    CircuitField,
}

struct IllustrationRule {
    keywords: &'static [&'static str],
    result: Illustration,
}

/// Ordered (keywords, illustration) table; first match on the lower-cased
/// scene title wins, [`Illustration::CircuitField`] is the fallback.
static ILLUSTRATION_RULES: &[IllustrationRule] = &[
    IllustrationRule {
        keywords: &["introduction"],
        result: Illustration::CrystalLattice,
    },
    IllustrationRule {
        keywords: &["application"],
        result: Illustration::ApplicationHub,
    },
    IllustrationRule {
        keywords: &["structure", "architecture"],
        result: Illustration::LayerStack,
    },
    IllustrationRule {
        keywords: &["performance"],
        result: Illustration::PerformanceChart,
    },
];

impl Illustration {
    /// Choose the backdrop for a scene title.
    pub fn select(title: &str) -> Self {
        let lower = title.to_lowercase();
        for rule in ILLUSTRATION_RULES {
            if rule.keywords.iter().any(|kw| lower.contains(kw)) {
                return rule.result;
            }
        }
        Illustration::CircuitField
    }
}

// ── Grid mapping ─────────────────────────────────────────────────────────

/// Maps the 10×10 logical grid (origin bottom-left, y up) onto the pixel
/// canvas (origin top-left, y down).
struct Grid {
    w: f32,
    h: f32,
}

impl Grid {
    fn new(width: u32, height: u32) -> Self {
        Self {
            w: width as f32,
            h: height as f32,
        }
    }

    fn x(&self, gx: f32) -> f32 {
        gx / 10.0 * self.w
    }

    fn y(&self, gy: f32) -> f32 {
        self.h - gy / 10.0 * self.h
    }

    /// Horizontal span of `units` grid units in pixels.
    fn dx(&self, units: f32) -> f32 {
        units / 10.0 * self.w
    }

    /// Vertical span of `units` grid units in pixels.
    fn dy(&self, units: f32) -> f32 {
        units / 10.0 * self.h
    }
}

// ── SVG fragments ────────────────────────────────────────────────────────

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn text_el(x: f32, y: f32, size: f32, fill: &str, anchor: &str, extra: &str, content: &str) -> String {
    format!(
        r#"<text x="{x:.1}" y="{y:.1}" font-family="sans-serif" font-size="{size:.0}" fill="{fill}" text-anchor="{anchor}"{extra}>{}</text>"#,
        xml_escape(content)
    )
}

fn ellipse_el(cx: f32, cy: f32, rx: f32, ry: f32, fill: &str, opacity: f32) -> String {
    format!(
        r#"<ellipse cx="{cx:.1}" cy="{cy:.1}" rx="{rx:.1}" ry="{ry:.1}" fill="{fill}" fill-opacity="{opacity}"/>"#
    )
}

fn line_el(x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str, width: f32, opacity: f32) -> String {
    format!(
        r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}" stroke-width="{width:.1}" stroke-opacity="{opacity}"/>"#
    )
}

// ── Scene composition ────────────────────────────────────────────────────

/// Compose the full SVG document for a scene background.
pub fn scene_svg(scene: &Scene, config: &PipelineConfig) -> String {
    compose(scene, config, None)
}

/// Compose a demo frame: the scene background plus a narration preview
/// caption along the bottom edge.
pub fn demo_frame_svg(scene: &Scene, config: &PipelineConfig) -> String {
    let preview: String = scene.narration.chars().take(100).collect();
    compose(scene, config, Some(format!("{preview}...")))
}

fn compose(scene: &Scene, config: &PipelineConfig, caption: Option<String>) -> String {
    let grid = Grid::new(config.width, config.height);
    let (w, h) = (grid.w, grid.h);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {w:.0} {h:.0}">"#,
        config.width, config.height
    );
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{w:.0}" height="{h:.0}" fill="{INK}"/>"#
    ));

    let body = match Illustration::select(&scene.title) {
        Illustration::CrystalLattice => crystal_lattice(&grid),
        Illustration::ApplicationHub => application_hub(&grid),
        Illustration::LayerStack => layer_stack(&grid),
        Illustration::PerformanceChart => performance_chart(&grid),
        Illustration::CircuitField => circuit_field(&grid),
    };
    svg.push_str(&body);

    svg.push_str(&title_banner(&grid, &scene.title));

    if let Some(caption) = caption {
        svg.push_str(&text_el(
            w / 2.0,
            h * 0.95,
            22.0,
            "white",
            "middle",
            r#" font-style="italic" fill-opacity="0.7""#,
            &caption,
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Rounded banner with the scene title, overlaid near the top edge.
fn title_banner(grid: &Grid, title: &str) -> String {
    let font_size = 48.0;
    // Rough glyph-width estimate; the banner only needs to comfortably
    // enclose the text, not hug it.
    let text_w = title.chars().count() as f32 * font_size * 0.58;
    let pad = 36.0;
    let band_w = (text_w + 2.0 * pad).min(grid.w * 0.9);
    let band_h = font_size + 2.0 * 14.0;
    let bx = (grid.w - band_w) / 2.0;
    let by = grid.h * 0.04;

    let mut out = format!(
        r#"<rect x="{bx:.1}" y="{by:.1}" width="{band_w:.1}" height="{band_h:.1}" rx="16" fill="{PANEL}" stroke="{BLUE}" stroke-width="2"/>"#
    );
    out.push_str(&text_el(
        grid.w / 2.0,
        by + band_h / 2.0,
        font_size,
        "white",
        "middle",
        r#" font-weight="bold" dominant-baseline="central""#,
        title,
    ));
    out
}

// ── The five illustrations ───────────────────────────────────────────────

/// Node positions of the hexagonal lattice, in grid units.
const LATTICE_NODES: [(f32, f32); 7] = [
    (2.0, 5.0),
    (3.0, 6.0),
    (4.0, 5.0),
    (5.0, 6.0),
    (6.0, 5.0),
    (3.0, 4.0),
    (5.0, 4.0),
];

fn crystal_lattice(grid: &Grid) -> String {
    let mut out = String::new();

    // Bond links between nodes closer than 2 grid units, drawn first so
    // the atoms sit on top.
    for (i, &(x1, y1)) in LATTICE_NODES.iter().enumerate() {
        for &(x2, y2) in &LATTICE_NODES[i + 1..] {
            let dist = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
            if dist < 2.0 {
                out.push_str(&line_el(
                    grid.x(x1),
                    grid.y(y1),
                    grid.x(x2),
                    grid.y(y2),
                    "white",
                    3.0,
                    0.5,
                ));
            }
        }
    }

    for (i, &(x, y)) in LATTICE_NODES.iter().enumerate() {
        let color = if i % 2 == 0 { BLUE } else { PINK };
        out.push_str(&ellipse_el(
            grid.x(x),
            grid.y(y),
            grid.dx(0.4),
            grid.dy(0.4),
            color,
            0.8,
        ));
    }

    let bold = r#" font-weight="bold""#;
    out.push_str(&text_el(grid.x(2.0), grid.y(5.5), 26.0, "white", "middle", bold, "Ga"));
    out.push_str(&text_el(grid.x(3.0), grid.y(6.5), 26.0, "white", "middle", bold, "N"));

    let faded = r#" fill-opacity="0.8""#;
    out.push_str(&text_el(
        grid.x(5.0),
        grid.y(2.0),
        34.0,
        "white",
        "middle",
        faded,
        "GaN Crystal Structure",
    ));
    out.push_str(&text_el(
        grid.x(5.0),
        grid.y(2.0) + 42.0,
        34.0,
        "white",
        "middle",
        faded,
        "Wide Bandgap Semiconductor",
    ));
    out
}

/// The six application boxes: grid position, two label lines, fill.
const APPLICATIONS: [(f32, f32, &str, &str, &str); 6] = [
    (2.0, 7.0, "5G", "Communications", BLUE),
    (5.0, 7.0, "Electric", "Vehicles", PINK),
    (8.0, 7.0, "Power", "Electronics", GREEN),
    (2.0, 4.0, "RF", "Amplifiers", ORANGE),
    (5.0, 4.0, "Solar", "Inverters", PURPLE),
    (8.0, 4.0, "Radar", "Systems", TEAL),
];

fn application_hub(grid: &Grid) -> String {
    let mut out = String::new();

    for &(x, y, top, bottom, color) in &APPLICATIONS {
        let bw = grid.dx(1.6);
        let bh = grid.dy(1.0);
        let bx = grid.x(x) - bw / 2.0;
        let by = grid.y(y) - bh / 2.0;
        out.push_str(&format!(
            r#"<rect x="{bx:.1}" y="{by:.1}" width="{bw:.1}" height="{bh:.1}" rx="14" fill="{color}" fill-opacity="0.7" stroke="white" stroke-width="2"/>"#
        ));
        let bold = r#" font-weight="bold""#;
        out.push_str(&text_el(grid.x(x), grid.y(y) - 6.0, 24.0, "white", "middle", bold, top));
        out.push_str(&text_el(grid.x(x), grid.y(y) + 24.0, 24.0, "white", "middle", bold, bottom));
    }

    // Central hub on top of the boxes.
    out.push_str(&format!(
        r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="{PANEL}" stroke="{BLUE}" stroke-width="3"/>"#,
        grid.x(5.0),
        grid.y(5.5),
        grid.dx(1.0),
        grid.dy(1.0),
    ));
    let bold = r#" font-weight="bold""#;
    out.push_str(&text_el(grid.x(5.0), grid.y(5.5) - 8.0, 28.0, "white", "middle", bold, "GaN"));
    out.push_str(&text_el(grid.x(5.0), grid.y(5.5) + 26.0, 28.0, "white", "middle", bold, "Technology"));
    out
}

/// Device layers bottom-up: grid row, label, fill.
const LAYERS: [(f32, &str, &str); 6] = [
    (2.0, "Substrate", "#333333"),
    (3.0, "Buffer Layer", "#555555"),
    (4.0, "GaN Channel", BLUE),
    (5.0, "AlGaN Barrier", PINK),
    (6.0, "Gate", GOLD),
    (7.0, "Source/Drain", GREEN),
];

fn layer_stack(grid: &Grid) -> String {
    let mut out = String::new();

    for &(row, label, color) in &LAYERS {
        let lx = grid.x(2.0);
        let lw = grid.dx(6.0);
        let lh = grid.dy(0.8);
        let ly = grid.y(row + 0.4);
        out.push_str(&format!(
            r#"<rect x="{lx:.1}" y="{ly:.1}" width="{lw:.1}" height="{lh:.1}" fill="{color}" fill-opacity="0.8" stroke="white" stroke-width="1"/>"#
        ));
        out.push_str(&text_el(
            grid.x(1.5),
            grid.y(row),
            24.0,
            "white",
            "end",
            r#" dominant-baseline="central""#,
            label,
        ));
    }

    // The 2DEG forms at the channel/barrier interface.
    out.push_str(&format!(
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{GOLD}" stroke-width="3" stroke-opacity="0.8" stroke-dasharray="14 10"/>"#,
        grid.x(2.0),
        grid.y(4.5),
        grid.x(8.0),
        grid.y(4.5),
    ));
    out.push_str(&text_el(
        grid.x(5.0),
        grid.y(4.8),
        20.0,
        GOLD,
        "middle",
        "",
        "2DEG",
    ));
    out
}

/// Raw material metrics; each series is normalized to its own maximum
/// before plotting.
const MATERIALS: [&str; 4] = ["Si", "GaAs", "SiC", "GaN"];
const SERIES: [(&str, [f32; 4], &str); 3] = [
    ("Breakdown Field", [0.3, 0.4, 3.0, 3.3], BLUE),
    ("Electron Mobility", [1.4, 8.5, 0.9, 2.0], PINK),
    ("Thermal Conductivity", [1.5, 0.5, 4.9, 2.3], GREEN),
];
const BAR_WIDTH: f32 = 0.25;

fn performance_chart(grid: &Grid) -> String {
    // Plot area in pixels, leaving room for the banner above and the axis
    // labels below/left.
    let left = grid.w * 0.09;
    let right = grid.w * 0.96;
    let top = grid.h * 0.17;
    let bottom = grid.h * 0.84;

    // Bar group i occupies [i, i + 3*BAR_WIDTH] on the data axis.
    let (xmin, xmax) = (-0.4f32, 4.2f32);
    let sx = |v: f32| left + (v - xmin) / (xmax - xmin) * (right - left);
    let sy = |v: f32| bottom - v / 1.05 * (bottom - top);

    let mut out = String::new();

    // Horizontal grid lines at each 0.2 tick.
    for tick in 0..=5 {
        let v = tick as f32 * 0.2;
        out.push_str(&line_el(left, sy(v), right, sy(v), "white", 1.0, 0.15));
        out.push_str(&text_el(
            left - 12.0,
            sy(v),
            20.0,
            "white",
            "end",
            r#" dominant-baseline="central""#,
            &format!("{v:.1}"),
        ));
    }

    // Highlight band over the GaN column group.
    out.push_str(&format!(
        r#"<rect x="{:.1}" y="{top:.1}" width="{:.1}" height="{:.1}" fill="{GOLD}" fill-opacity="0.2"/>"#,
        sx(2.75),
        sx(3.75) - sx(2.75),
        bottom - top,
    ));

    // Bars, one series at a time, normalized per series.
    for (series_idx, (_, values, color)) in SERIES.iter().enumerate() {
        let max = values.iter().cloned().fold(f32::MIN, f32::max);
        for (mat_idx, &value) in values.iter().enumerate() {
            let normalized = value / max;
            let x0 = sx(mat_idx as f32 + series_idx as f32 * BAR_WIDTH);
            let x1 = sx(mat_idx as f32 + (series_idx as f32 + 1.0) * BAR_WIDTH);
            let y0 = sy(normalized);
            out.push_str(&format!(
                r#"<rect x="{x0:.1}" y="{y0:.1}" width="{:.1}" height="{:.1}" fill="{color}" fill-opacity="0.8"/>"#,
                x1 - x0,
                bottom - y0,
            ));
        }
    }

    // Material tick labels under each group (centered like the bars).
    for (mat_idx, material) in MATERIALS.iter().enumerate() {
        out.push_str(&text_el(
            sx(mat_idx as f32 + BAR_WIDTH),
            bottom + 34.0,
            24.0,
            "white",
            "middle",
            "",
            material,
        ));
    }

    // Axis labels.
    out.push_str(&text_el(
        (left + right) / 2.0,
        bottom + 76.0,
        26.0,
        "white",
        "middle",
        "",
        "Material",
    ));
    let ylab_x = grid.w * 0.03;
    let ylab_y = (top + bottom) / 2.0;
    out.push_str(&format!(
        r#"<text x="{ylab_x:.1}" y="{ylab_y:.1}" font-family="sans-serif" font-size="26" fill="white" text-anchor="middle" transform="rotate(-90 {ylab_x:.1} {ylab_y:.1})">Normalized Performance</text>"#
    ));

    // Legend, upper left inside the plot.
    let lx = left + 18.0;
    let ly = top + 18.0;
    let row_h = 34.0;
    out.push_str(&format!(
        r#"<rect x="{lx:.1}" y="{ly:.1}" width="300" height="{:.1}" fill="{PANEL}" stroke="white" stroke-width="1"/>"#,
        row_h * SERIES.len() as f32 + 12.0,
    ));
    for (i, (name, _, color)) in SERIES.iter().enumerate() {
        let ry = ly + 10.0 + i as f32 * row_h;
        out.push_str(&format!(
            r#"<rect x="{:.1}" y="{ry:.1}" width="22" height="22" fill="{color}" fill-opacity="0.8"/>"#,
            lx + 10.0,
        ));
        out.push_str(&text_el(
            lx + 42.0,
            ry + 11.0,
            22.0,
            "white",
            "start",
            r#" dominant-baseline="central""#,
            name,
        ));
    }

    out
}

fn circuit_field(grid: &Grid) -> String {
    let mut rng = StdRng::seed_from_u64(CIRCUIT_SEED);
    let mut out = String::new();

    for _ in 0..20 {
        let x: f32 = rng.gen_range(0.0..10.0);
        let y: f32 = rng.gen_range(0.0..10.0);
        let dx: f32 = rng.gen_range(-1.0..1.0);
        let dy: f32 = rng.gen_range(-1.0..1.0);
        out.push_str(&line_el(
            grid.x(x),
            grid.y(y),
            grid.x(x + dx),
            grid.y(y + dy),
            BLUE,
            2.0,
            0.3,
        ));
    }

    for _ in 0..10 {
        let x: f32 = rng.gen_range(1.0..9.0);
        let y: f32 = rng.gen_range(1.0..9.0);
        out.push_str(&ellipse_el(
            grid.x(x),
            grid.y(y),
            grid.dx(0.1),
            grid.dy(0.1),
            BLUE,
            0.6,
        ));
    }

    out
}

// ── Avatar ───────────────────────────────────────────────────────────────

/// Compose the avatar SVG for a pose, on a transparent 400×400 canvas.
pub fn avatar_svg(action: AvatarAction) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
        AVATAR_SIZE
    );

    // Head and eyes are shared by every pose.
    svg.push_str(&format!(
        r#"<ellipse cx="200" cy="100" rx="50" ry="50" fill="{BODY_FILL}" stroke="{BODY_EDGE}" stroke-width="3"/>"#
    ));
    for cx in [180, 220] {
        svg.push_str(&format!(
            r#"<ellipse cx="{cx}" cy="90" rx="10" ry="10" fill="white"/>"#
        ));
        svg.push_str(&format!(
            r#"<ellipse cx="{cx}" cy="90" rx="5" ry="5" fill="black"/>"#
        ));
    }

    // Mouth: a smile arc for greeting/concluding, an open talking mouth
    // while explaining.
    match action {
        AvatarAction::Explaining => svg.push_str(&format!(
            r#"<ellipse cx="200" cy="117" rx="20" ry="8" fill="{BODY_EDGE}"/>"#
        )),
        _ => svg.push_str(&format!(
            r#"<path d="M 230 115 A 30 15 0 0 1 170 115" fill="none" stroke="{BODY_EDGE}" stroke-width="3"/>"#
        )),
    }

    // Torso.
    svg.push_str(&format!(
        r#"<rect x="170" y="150" width="60" height="100" fill="{BODY_FILL}" stroke="{BODY_EDGE}" stroke-width="3"/>"#
    ));

    let arm = |x1: i32, y1: i32, x2: i32, y2: i32| {
        format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{BODY_FILL}" stroke-width="20" stroke-linecap="round"/>"#
        )
    };

    match action {
        AvatarAction::Greeting => {
            // Waving right arm with an open hand, left arm resting.
            svg.push_str(&arm(230, 170, 280, 140));
            svg.push_str(&format!(
                r#"<ellipse cx="280" cy="140" rx="10" ry="10" fill="{SKIN}"/>"#
            ));
            svg.push_str(&arm(170, 170, 120, 200));
        }
        AvatarAction::Explaining => {
            // Pointing right arm, left arm resting.
            svg.push_str(&arm(230, 170, 280, 170));
            svg.push_str(&format!(
                r#"<polygon points="280,160 300,170 280,180" fill="{SKIN}"/>"#
            ));
            svg.push_str(&arm(170, 170, 120, 200));
        }
        AvatarAction::Concluding => {
            // Arms crossed over the torso.
            svg.push_str(&arm(170, 170, 230, 200));
            svg.push_str(&arm(230, 170, 170, 200));
        }
    }

    svg.push_str("</svg>");
    svg
}

// ── Rasterisation ────────────────────────────────────────────────────────

/// System font database, loaded once. resvg skips text nodes when no
/// matching face exists rather than failing the render.
static FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// Rasterize an SVG string to PNG bytes.
pub fn rasterize(svg: &str, width: u32, height: u32) -> std::result::Result<Vec<u8>, String> {
    let mut options = usvg::Options::default();
    options.fontdb = Arc::clone(&FONTS);

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| format!("SVG parse: {e}"))?;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or_else(|| "pixmap allocation failed".to_string())?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| format!("PNG encode: {e}"))
}

fn write_png(scene_id: u32, svg: &str, width: u32, height: u32, path: &Path) -> Result<()> {
    let png = rasterize(svg, width, height).map_err(|detail| Pdf2VideoError::ArtworkFailed {
        scene: scene_id,
        detail,
    })?;
    std::fs::write(path, png).map_err(|e| Pdf2VideoError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Render the scene background image to `path`.
pub fn render_scene_image(scene: &Scene, config: &PipelineConfig, path: &Path) -> Result<()> {
    write_png(
        scene.scene_id,
        &scene_svg(scene, config),
        config.width,
        config.height,
        path,
    )
}

/// Render a demo frame (background + narration preview) to `path`.
pub fn render_demo_frame(scene: &Scene, config: &PipelineConfig, path: &Path) -> Result<()> {
    write_png(
        scene.scene_id,
        &demo_frame_svg(scene, config),
        config.width,
        config.height,
        path,
    )
}

/// Render the avatar for a scene's pose to `path`.
pub fn render_avatar(scene_id: u32, action: AvatarAction, path: &Path) -> Result<()> {
    write_png(scene_id, &avatar_svg(action), AVATAR_SIZE, AVATAR_SIZE, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(title: &str) -> Scene {
        Scene {
            scene_id: 1,
            title: title.to_string(),
            narration: "Some narration text for the preview caption.".into(),
            duration: 8,
            image_prompt: "prompt".into(),
            character_action: AvatarAction::Explaining,
        }
    }

    #[test]
    fn illustration_selection_table() {
        assert_eq!(
            Illustration::select("Introduction to GaN Technology"),
            Illustration::CrystalLattice
        );
        assert_eq!(Illustration::select("Applications"), Illustration::ApplicationHub);
        assert_eq!(Illustration::select("Device Structure"), Illustration::LayerStack);
        assert_eq!(Illustration::select("HEMT Architecture"), Illustration::LayerStack);
        assert_eq!(
            Illustration::select("Performance Comparison"),
            Illustration::PerformanceChart
        );
        assert_eq!(Illustration::select("Conclusion"), Illustration::CircuitField);
    }

    #[test]
    fn scene_svg_contains_banner_and_backdrop() {
        let config = PipelineConfig::default();
        let svg = scene_svg(&scene("Device Structure"), &config);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Device Structure"));
        assert!(svg.contains("2DEG"));
        assert!(svg.contains(INK));
    }

    #[test]
    fn demo_frame_adds_narration_preview() {
        let config = PipelineConfig::default();
        let svg = demo_frame_svg(&scene("Conclusion"), &config);
        assert!(svg.contains("Some narration text"));
        assert!(svg.contains("..."));
    }

    #[test]
    fn circuit_field_is_deterministic() {
        let grid = Grid::new(1920, 1080);
        assert_eq!(circuit_field(&grid), circuit_field(&grid));
    }

    #[test]
    fn titles_are_xml_escaped() {
        let config = PipelineConfig::default();
        let svg = scene_svg(&scene("Power & Efficiency <2023>"), &config);
        assert!(svg.contains("Power &amp; Efficiency &lt;2023&gt;"));
        assert!(!svg.contains("<2023>"));
    }

    #[test]
    fn avatar_poses_differ() {
        let greeting = avatar_svg(AvatarAction::Greeting);
        let explaining = avatar_svg(AvatarAction::Explaining);
        let concluding = avatar_svg(AvatarAction::Concluding);
        assert_ne!(greeting, explaining);
        assert_ne!(explaining, concluding);
        assert_ne!(greeting, concluding);
        // Pointing hand only while explaining.
        assert!(explaining.contains("polygon"));
        assert!(!greeting.contains("polygon"));
    }

    #[test]
    fn rasterize_produces_png_bytes() {
        let svg = avatar_svg(AvatarAction::Greeting);
        let png = rasterize(&svg, AVATAR_SIZE, AVATAR_SIZE).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn performance_chart_mentions_all_materials() {
        let grid = Grid::new(1920, 1080);
        let body = performance_chart(&grid);
        for material in MATERIALS {
            assert!(body.contains(material), "missing {material}");
        }
        assert!(body.contains("Normalized Performance"));
    }
}
