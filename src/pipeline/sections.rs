//! Section splitting: flat extracted text → ordered titled sections.
//!
//! A line starts a new section when any rule in [`HEADER_RULES`] matches;
//! the rules are an explicit ordered table evaluated in fixed priority so
//! the classification stays auditable. Everything else accumulates into
//! the current section's content. Content that appears before the first
//! detected header is attributed to a synthetic "Introduction" section,
//! and sections that never accumulate content are dropped.
//!
//! The heuristics are tuned for academic-paper layouts (all-caps headings,
//! "3. Overview" numbering, a fixed keyword list) and may misclassify
//! documents that look nothing like one.

use once_cell::sync::Lazy;
use regex::Regex;

/// A titled slice of the document. Ephemeral: consumed by the storyboard
/// stage, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub content: String,
}

/// Keywords that mark a short line as a probable heading.
const HEADER_KEYWORDS: [&str; 8] = [
    "introduction",
    "overview",
    "conclusion",
    "summary",
    "properties",
    "applications",
    "technology",
    "performance",
];

/// Lines shorter than this qualify for the all-caps and keyword rules.
const MAX_HEADER_CHARS: usize = 100;

static RE_NUMBERED_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.?\s+[A-Z]").expect("valid regex"));

type HeaderRule = fn(&str) -> bool;

/// Ordered header predicates, evaluated first to last.
static HEADER_RULES: &[HeaderRule] = &[rule_all_caps, rule_numbered, rule_keyword];

/// Entirely upper-case and reasonably short.
fn rule_all_caps(line: &str) -> bool {
    is_all_caps(line) && line.chars().count() < MAX_HEADER_CHARS
}

/// A leading section number followed by a capitalised word, e.g. "3. Overview".
fn rule_numbered(line: &str) -> bool {
    RE_NUMBERED_HEADING.is_match(line)
}

/// Contains a known heading keyword and is reasonably short.
fn rule_keyword(line: &str) -> bool {
    if line.chars().count() >= MAX_HEADER_CHARS {
        return false;
    }
    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// `str.isupper` semantics: at least one cased character, and no cased
/// character is lower-case. Digits and punctuation are ignored.
pub(crate) fn is_all_caps(line: &str) -> bool {
    line.chars().any(|c| c.is_uppercase()) && !line.chars().any(|c| c.is_lowercase())
}

/// Whether `line` should start a new section.
pub fn is_section_header(line: &str) -> bool {
    HEADER_RULES.iter().any(|rule| rule(line))
}

/// Split flat text into ordered sections.
///
/// Non-header lines are appended to the current content with a trailing
/// space, so the concatenation of all section contents recovers exactly
/// the trimmed non-header lines of the input, in order.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        title: "Introduction".to_string(),
        content: String::new(),
    };

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if is_section_header(line) {
            if !current.content.is_empty() {
                sections.push(current);
            }
            current = Section {
                title: line.to_string(),
                content: String::new(),
            };
        } else {
            current.content.push_str(line);
            current.content.push(' ');
        }
    }

    if !current.content.is_empty() {
        sections.push(current);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_heading_is_always_a_header() {
        assert!(is_section_header("3. Overview"));
        assert!(is_section_header("12 Reliability Results"));
    }

    #[test]
    fn short_lowercase_line_without_keywords_is_never_a_header() {
        assert!(!is_section_header(
            "the measured drain current rose with gate bias"
        ));
    }

    #[test]
    fn all_caps_line_is_a_header() {
        assert!(is_section_header("DEVICE FABRICATION"));
        // Over the length limit: no longer a header.
        let long = "A".repeat(120);
        assert!(!is_section_header(&long));
    }

    #[test]
    fn keyword_line_is_a_header() {
        assert!(is_section_header("A brief overview of the field"));
    }

    #[test]
    fn is_all_caps_requires_a_cased_char() {
        assert!(is_all_caps("HEMT 2023"));
        assert!(!is_all_caps("1234"));
        assert!(!is_all_caps("GaN"));
    }

    #[test]
    fn leading_content_goes_to_synthetic_introduction() {
        let text = "some preamble text here\nDEVICE FABRICATION\nbody line\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Introduction");
        assert_eq!(sections[0].content, "some preamble text here ");
        assert_eq!(sections[1].title, "DEVICE FABRICATION");
    }

    #[test]
    fn header_without_content_is_dropped() {
        let text = "DEVICE FABRICATION\nRESULTS\nactual body text\n";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "RESULTS");
    }

    #[test]
    fn contents_recover_non_header_lines_in_order() {
        let text = "alpha beta\nDEVICE FABRICATION\n  gamma  \ndelta\nRESULTS\nepsilon\n";
        let sections = split_sections(text);
        let concatenated: String = sections.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(concatenated, "alpha beta gamma delta epsilon ");
    }

    #[test]
    fn empty_text_yields_no_sections() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("\n\n  \n").is_empty());
    }
}
