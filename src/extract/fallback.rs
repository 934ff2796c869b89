//! Heuristic action item extraction.
//!
//! Used when the model is unreachable. Runs ordered rule cascades for tasks,
//! owners and due-date cues, then tags each accepted task. Owner and due-date
//! detection only look inside the text matched by the task rule, not the
//! surrounding sentence.
//!
//! This path never fails. When no task rule yields anything, substantial
//! lines of the transcript are returned as-is.

use std::sync::OnceLock;

use chrono::NaiveDate;
use indexmap::IndexSet;
use regex::Regex;
use tracing::debug;

use crate::domain::{collapse_whitespace, is_acceptable_task, ActionItemDraft, ParticipantNames};

use super::{dates, participants, tags};

/// Owner placeholder for first-person commitments
pub const SPEAKER: &str = "Speaker";

/// Line fallback: lines must be strictly longer than this
const MIN_LINE_CHARS: usize = 10;

/// Line fallback: lines must be strictly shorter than this
const MAX_LINE_CHARS: usize = 300;

/// Line fallback: at most this many lines are emitted
const MAX_LINE_ITEMS: usize = 20;

const MODAL_VERBS: &str = r"(?:will|needs? to|should|must|going to|has to)";

type PatternFn = fn() -> &'static Regex;

/// Task rules in priority order. Group 1 is the task text; group 0 is the
/// span searched for owner and due date.
const TASK_RULES: [(&str, PatternFn); 4] = [
    ("bullet", re_bullet_line),
    ("numbered", re_numbered_line),
    ("modal", re_modal_clause),
    ("labeled", re_labeled_clause),
];

/// Due-date cues in priority order; the matched text goes to the normalizer
const DUE_DATE_RULES: [(&str, PatternFn); 6] = [
    ("weekday", re_due_weekday),
    ("tomorrow", re_due_tomorrow),
    ("today", re_due_today),
    ("week", re_due_week),
    ("day_month", re_due_day_month),
    ("month_day", re_due_month_day),
];

fn re_bullet_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\n)\s*[-*•]\s*([^\n]+)").unwrap())
}

fn re_numbered_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\n)\s*[0-9]+[.)]\s*([^\n]+)").unwrap())
}

fn re_modal_clause() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:will|need to|have to|going to|should|must)\s+([^.\n]+)").unwrap()
    })
}

fn re_labeled_clause() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:action|todo|to do|follow up|follow-up)\s*:?\s*([^.\n]+)").unwrap()
    })
}

fn re_first_person() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bI(?:['’]ll|\s+will|\s+need\s+to|\s+have\s+to|['’]m\s+going\s+to)\b")
            .unwrap()
    })
}

fn re_capitalized_owner() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"\b([A-Z][a-z]+)\b\s+(?i:{MODAL_VERBS})")).unwrap()
    })
}

fn re_due_weekday() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:by|before|on)\s+(?:(?:next|this)\s+)?(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)",
        )
        .unwrap()
    })
}

fn re_due_tomorrow() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:by|before|on)\s+tomorrow").unwrap())
}

fn re_due_today() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:by|before|on)\s+today").unwrap())
}

fn re_due_week() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?:by|before|on)\s+(?:next\s+)?week").unwrap())
}

fn re_due_day_month() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:by|before|on)\s+[0-9]{1,2}(?:st|nd|rd|th)?(?:\s+(?:of\s+)?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*)?",
        )
        .unwrap()
    })
}

fn re_due_month_day() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:by|before|on)\s+(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+[0-9]{1,2}(?:st|nd|rd|th)?",
        )
        .unwrap()
    })
}

/// Owner detection for one transcript.
///
/// Rules, first match anywhere in the span wins:
/// 1. a known participant followed by a modal verb, spelled as in the span
/// 2. first-person phrasing, reported as [`SPEAKER`]
/// 3. any capitalized word followed by a modal verb
pub struct OwnerMatcher {
    named: Option<Regex>,
}

impl OwnerMatcher {
    pub fn new(names: &ParticipantNames) -> Self {
        let named = if names.is_empty() {
            None
        } else {
            let alternation = names.iter().map(regex::escape).collect::<Vec<_>>().join("|");
            // escaped names always form a valid pattern
            Regex::new(&format!(r"(?i)\b({alternation})\b\s+{MODAL_VERBS}")).ok()
        };

        Self { named }
    }

    pub fn find(&self, span: &str) -> Option<String> {
        if let Some(re) = &self.named {
            if let Some(caps) = re.captures(span) {
                return Some(caps[1].to_string());
            }
        }

        if re_first_person().is_match(span) {
            return Some(SPEAKER.to_string());
        }

        re_capitalized_owner()
            .captures(span)
            .map(|caps| caps[1].to_string())
    }
}

/// Find the first due-date cue in a span and normalize it
pub fn find_due_date(span: &str, today: NaiveDate) -> Option<String> {
    DUE_DATE_RULES.iter().find_map(|(rule, pattern)| {
        pattern().find(span).map(|cue| {
            debug!(rule, cue = cue.as_str(), "due date cue matched");
            dates::normalize(cue.as_str(), today)
        })
    })
}

/// Extract action items without a model
pub fn extract(text: &str, today: NaiveDate) -> Vec<ActionItemDraft> {
    let names = participants::detect(text);
    let owners = OwnerMatcher::new(&names);

    let mut seen: IndexSet<String> = IndexSet::new();
    let mut drafts = Vec::new();

    for (rule, pattern) in TASK_RULES.iter() {
        let before = drafts.len();

        for caps in pattern().captures_iter(text) {
            let span = caps.get(0).map_or("", |m| m.as_str());
            let raw_task = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|t| !t.is_empty())
                .unwrap_or(span);
            let task = collapse_whitespace(raw_task);

            if !is_acceptable_task(&task) || !seen.insert(task.to_lowercase()) {
                continue;
            }

            let tags = tags::infer(&task);
            drafts.push(
                ActionItemDraft::new(task)
                    .with_owner(owners.find(span))
                    .with_due_date(find_due_date(span, today))
                    .with_tags(tags),
            );
        }

        debug!(rule, accepted = drafts.len() - before, "task rule applied");
    }

    if drafts.is_empty() {
        drafts = substantial_lines(text);
        debug!(lines = drafts.len(), "no task rule matched, using transcript lines");
    }

    drafts
}

/// Last resort: each substantial, distinct line becomes a bare task
fn substantial_lines(text: &str) -> Vec<ActionItemDraft> {
    let mut seen: IndexSet<String> = IndexSet::new();

    text.lines()
        .map(collapse_whitespace)
        .filter(|line| {
            let len = line.chars().count();
            len > MIN_LINE_CHARS && len < MAX_LINE_CHARS
        })
        .filter(|line| seen.insert(line.to_lowercase()))
        .take(MAX_LINE_ITEMS)
        .map(ActionItemDraft::new)
        .collect()
}
