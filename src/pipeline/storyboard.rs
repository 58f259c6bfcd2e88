//! Script building: titled sections → the ordered scene sequence.
//!
//! Every script opens with a fixed greeting scene and closes with a fixed
//! conclusion scene; the sections in between become "explaining" scenes.
//! Narration is fabricated by string surgery, not NLP: citations are
//! stripped, the first few substantial sentences are kept, and the result
//! is capped at the narration limit. Sections that summarize to nothing
//! are skipped without consuming a scene id.
//!
//! The image prompt for each scene comes from [`PROMPT_RULES`], an
//! explicit ordered (predicate, prompt) table evaluated in fixed priority
//! order.

use crate::config::PipelineConfig;
use crate::pipeline::sections::{is_all_caps, Section};
use crate::script::{AvatarAction, Scene, Script};
use once_cell::sync::Lazy;
use regex::Regex;

/// Title of every generated script.
pub const SCRIPT_TITLE: &str = "GaN Technology: A Comprehensive Overview";

const INTRO_TITLE: &str = "Introduction to GaN Technology";
const INTRO_NARRATION: &str = "Welcome to our comprehensive overview of Gallium Nitride, \
     or GaN technology. Today, we'll explore how GaN High Electron Mobility Transistors, \
     or HEMTs, are revolutionizing high-frequency and high-power electronics.";
const INTRO_PROMPT: &str = "A futuristic semiconductor chip with glowing blue circuits, \
     representing GaN technology, modern tech aesthetic";

const CONCLUSION_TITLE: &str = "Conclusion";
const CONCLUSION_NARRATION: &str = "GaN technology represents a significant advancement in \
     semiconductor technology, enabling faster, more efficient, and more powerful electronic \
     devices. From 5G communications to electric vehicles, GaN HEMTs are shaping the future \
     of electronics.";
const CONCLUSION_PROMPT: &str = "A montage of modern applications: 5G towers, electric \
     vehicles, renewable energy systems, all powered by GaN technology";

// ── Narration summarizer ─────────────────────────────────────────────────

/// Bracketed citation numbers: `[12]`.
static RE_BRACKET_CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").expect("valid regex"));

/// Parenthetical citations containing a four-digit year: `(Smith, 2019)`.
static RE_YEAR_PAREN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\d{4}[^)]*\)").expect("valid regex"));

static RE_ET_AL: Lazy<Regex> = Lazy::new(|| Regex::new(r"et al\.?").expect("valid regex"));

/// Sentence-ending punctuation runs.
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Leading section numbering: "3. ", "12 ".
static RE_LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s*").expect("valid regex"));

/// Sentences mentioning these never read well as narration.
const SKIP_WORDS: [&str; 3] = ["figure", "table", "equation"];

/// Minimum sentence length (chars) worth narrating.
const MIN_SENTENCE_CHARS: usize = 20;

/// How many leading sentences are considered for the summary.
const MAX_SENTENCES: usize = 5;

/// Reduce section content to a narration-friendly summary of at most
/// `limit` chars. Returns an empty string when nothing survives the
/// filters, in which case the section is skipped entirely.
pub fn summarize(content: &str, limit: usize) -> String {
    let content = RE_BRACKET_CITATION.replace_all(content, "");
    let content = RE_YEAR_PAREN.replace_all(&content, "");
    let content = RE_ET_AL.replace_all(&content, "and colleagues");

    let mut kept: Vec<&str> = Vec::new();
    for sentence in RE_SENTENCE_END.split(&content).take(MAX_SENTENCES) {
        let sentence = sentence.trim();
        if sentence.chars().count() <= MIN_SENTENCE_CHARS {
            continue;
        }
        let lower = sentence.to_lowercase();
        if SKIP_WORDS.iter().any(|w| lower.contains(w)) {
            continue;
        }
        kept.push(sentence);
    }

    let mut summary = kept.join(". ");
    if !summary.is_empty() && !summary.ends_with('.') {
        summary.push('.');
    }
    truncate_chars(&summary, limit)
}

/// Truncate to at most `limit` chars on a character boundary.
fn truncate_chars(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        s.to_string()
    } else {
        s.chars().take(limit).collect()
    }
}

// ── Image-prompt selection ───────────────────────────────────────────────

/// Where a prompt rule looks for its keywords.
enum PromptKey {
    /// Substring match against the lower-cased section title.
    Title(&'static [&'static str]),
    /// Substring match against the lower-cased summary.
    Content(&'static [&'static str]),
}

struct PromptRule {
    key: PromptKey,
    prompt: &'static str,
}

/// Ordered (predicate, prompt) table; the first matching rule wins.
static PROMPT_RULES: &[PromptRule] = &[
    PromptRule {
        key: PromptKey::Title(&["introduction", "overview"]),
        prompt: "Modern semiconductor wafer with GaN crystals, blue and purple color scheme, \
                 high-tech laboratory setting",
    },
    PromptRule {
        key: PromptKey::Title(&["application"]),
        prompt: "Collage of modern electronics: smartphones, 5G towers, electric vehicles, \
                 solar panels, all highlighting GaN components",
    },
    PromptRule {
        key: PromptKey::Title(&["structure", "architecture"]),
        prompt: "3D visualization of GaN HEMT structure showing layers: substrate, buffer, \
                 channel, barrier, with electron flow animation",
    },
    PromptRule {
        key: PromptKey::Title(&["performance", "efficiency"]),
        prompt: "Performance graphs and charts showing GaN advantages, with glowing \
                 efficiency metrics, modern data visualization",
    },
    PromptRule {
        key: PromptKey::Title(&["reliability"]),
        prompt: "Robust electronic component undergoing stress tests, showing durability \
                 and longevity, industrial testing environment",
    },
    PromptRule {
        key: PromptKey::Content(&["biosensor"]),
        prompt: "Medical biosensor device with GaN chip, showing biological molecule \
                 detection, clean medical tech aesthetic",
    },
    PromptRule {
        key: PromptKey::Content(&["power"]),
        prompt: "High-power electronic systems with GaN components, showing energy flow, \
                 industrial power electronics",
    },
];

const DEFAULT_PROMPT: &str = "Advanced GaN semiconductor chip with intricate circuit \
     patterns, blue LED illumination, futuristic technology";

/// Choose an image prompt for a scene by keyword match on its section
/// title and summary.
pub fn image_prompt_for(title: &str, summary: &str) -> &'static str {
    let title_lower = title.to_lowercase();
    let content_lower = summary.to_lowercase();
    for rule in PROMPT_RULES {
        let matched = match rule.key {
            PromptKey::Title(words) => words.iter().any(|w| title_lower.contains(w)),
            PromptKey::Content(words) => words.iter().any(|w| content_lower.contains(w)),
        };
        if matched {
            return rule.prompt;
        }
    }
    DEFAULT_PROMPT
}

// ── Title cleanup ────────────────────────────────────────────────────────

/// Strip leading numbering and re-case shouting words for presentation:
/// "3. DEVICE RELIABILITY" → "Device Reliability" (words of four or more
/// letters only, mirroring how abbreviations like "GaN" are left alone).
pub fn clean_title(title: &str) -> String {
    let stripped = RE_LEADING_NUMBER.replace(title, "");
    stripped
        .split_whitespace()
        .map(|word| {
            if is_all_caps(word) && word.chars().count() > 3 {
                capitalize(word)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First char upper-cased, the rest lower-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// ── Scene assembly ───────────────────────────────────────────────────────

fn intro_scene(duration: u32) -> Scene {
    Scene {
        scene_id: 1,
        title: INTRO_TITLE.to_string(),
        narration: INTRO_NARRATION.to_string(),
        duration,
        image_prompt: INTRO_PROMPT.to_string(),
        character_action: AvatarAction::Greeting,
    }
}

fn conclusion_scene(scene_id: u32, duration: u32) -> Scene {
    Scene {
        scene_id,
        title: CONCLUSION_TITLE.to_string(),
        narration: CONCLUSION_NARRATION.to_string(),
        duration,
        image_prompt: CONCLUSION_PROMPT.to_string(),
        character_action: AvatarAction::Concluding,
    }
}

/// Build the full script from the split sections.
///
/// Considers at most the first `config.max_sections` sections; of those,
/// sections shorter than `config.min_section_chars` or summarizing to
/// nothing are skipped without consuming a scene id. The result always
/// contains at least the two bookend scenes.
pub fn build_script(sections: &[Section], config: &PipelineConfig) -> Script {
    let mut scenes = vec![intro_scene(config.bookend_secs)];
    let mut next_id: u32 = 2;

    for section in sections.iter().take(config.max_sections) {
        if section.content.chars().count() < config.min_section_chars {
            continue;
        }
        let narration = summarize(&section.content, config.narration_limit);
        if narration.is_empty() {
            continue;
        }

        let words = narration.split_whitespace().count();
        let duration = (words / config.words_per_sec).max(config.min_scene_secs as usize) as u32;
        let image_prompt = image_prompt_for(&section.title, &narration).to_string();

        scenes.push(Scene {
            scene_id: next_id,
            title: clean_title(&section.title),
            narration,
            duration,
            image_prompt,
            character_action: AvatarAction::Explaining,
        });
        next_id += 1;
    }

    scenes.push(conclusion_scene(next_id, config.bookend_secs));
    Script::from_scenes(SCRIPT_TITLE, scenes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    fn long_section(title: &str, sentence: &str) -> Section {
        // Four copies comfortably clear the 100-char content threshold.
        Section {
            title: title.to_string(),
            content: format!("{s} {s} {s} {s}", s = sentence),
        }
    }

    #[test]
    fn empty_input_yields_bookends_only() {
        let script = build_script(&[], &config());
        assert_eq!(script.scene_count, 2);
        assert_eq!(script.scenes[0].character_action, AvatarAction::Greeting);
        assert_eq!(script.scenes[1].character_action, AvatarAction::Concluding);
        assert_eq!(script.total_duration, 16);
    }

    #[test]
    fn scene_invariants_hold_for_generated_scripts() {
        let sections = vec![
            long_section("3. Performance", "The switching losses drop sharply at higher bias."),
            long_section("APPLICATIONS", "Chargers and inverters benefit from the higher frequency."),
        ];
        let script = build_script(&sections, &config());
        assert!(script.validate().is_ok());
        for scene in &script.scenes {
            assert!(scene.duration >= 5);
            assert!(scene.narration.chars().count() <= 300);
        }
        assert_eq!(
            script.total_duration,
            script.scenes.iter().map(|s| s.duration).sum::<u32>()
        );
    }

    #[test]
    fn building_twice_is_deterministic() {
        let sections = vec![long_section(
            "Device Structure",
            "An AlGaN barrier sits above the channel and sets the sheet density.",
        )];
        let a = build_script(&sections, &config());
        let b = build_script(&sections, &config());
        assert_eq!(a, b);
    }

    #[test]
    fn short_sections_do_not_consume_scene_ids() {
        let sections = vec![
            Section {
                title: "Stub".into(),
                content: "too short".into(),
            },
            long_section("Reliability", "Devices survive thousands of hours under drain stress."),
        ];
        let script = build_script(&sections, &config());
        assert_eq!(script.scene_count, 3);
        // The surviving content scene takes id 2, not 3.
        assert_eq!(script.scenes[1].scene_id, 2);
        assert_eq!(script.scenes[1].title, "Reliability");
    }

    #[test]
    fn summarize_strips_citations_and_years() {
        let content = "GaN outperforms silicon in breakdown strength [12]. \
                       This was first shown decades ago (Khan, 1993). \
                       Later work by Mishra et al. confirmed the trend in production devices.";
        let summary = summarize(content, 300);
        assert!(!summary.contains("[12]"));
        assert!(!summary.contains("1993"));
        assert!(!summary.contains("et al"));
        assert!(summary.contains("and colleagues"));
        assert!(summary.ends_with('.'));
    }

    #[test]
    fn summarize_skips_figure_and_table_sentences() {
        let content = "As shown in Figure 3 the current collapses under stress conditions. \
                       The recovery time depends strongly on the passivation quality used.";
        let summary = summarize(content, 300);
        assert!(!summary.to_lowercase().contains("figure"));
        assert!(summary.contains("recovery time"));
    }

    #[test]
    fn summarize_caps_length_in_chars() {
        let content = "This sentence is well over twenty characters long and repeats. "
            .repeat(20);
        let summary = summarize(&content, 300);
        assert!(summary.chars().count() <= 300);
    }

    #[test]
    fn summarize_of_noise_is_empty() {
        assert_eq!(summarize("", 300), "");
        assert_eq!(summarize("short. tiny. no.", 300), "");
    }

    #[test]
    fn image_prompt_priority_order() {
        // Title rules outrank content rules.
        let p = image_prompt_for("Applications", "high power conversion everywhere");
        assert!(p.contains("Collage"));
        // Content fallback when no title rule matches.
        let p = image_prompt_for("Measurements", "the biosensor response was linear");
        assert!(p.contains("biosensor"));
        // Default when nothing matches.
        let p = image_prompt_for("Measurements", "nothing special here at all");
        assert_eq!(p, DEFAULT_PROMPT);
    }

    #[test]
    fn clean_title_strips_numbering_and_recases() {
        assert_eq!(clean_title("3. DEVICE RELIABILITY"), "Device Reliability");
        assert_eq!(clean_title("12 Overview"), "Overview");
        // Short all-caps words (acronyms up to three letters) are kept as-is.
        assert_eq!(clean_title("RF POWER AMPLIFIERS"), "RF Power Amplifiers");
        // Mixed-case words are untouched.
        assert_eq!(clean_title("GaN Devices"), "GaN Devices");
    }
}
