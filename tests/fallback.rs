//! Heuristic Extraction Integration Tests
//!
//! Tests for the rule cascade used when the model is unavailable.

use actionizer::extract::fallback;
use actionizer::extract::dates;
use chrono::NaiveDate;

const TRANSCRIPT: &str = "Attendees:
Sarah, John, Mike

Sarah: Kickoff for the website redesign.
John: I'll set up the development environment by next Monday.
Mike: I need to send the brand assets by tomorrow.
Sarah: Emily will draft the user interview questions this week.
- Review the mobile mockups before Friday
* John will configure the staging server by next Monday
1. Update the API documentation on 21st of March
Action: book the retro room
";

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

#[test]
fn test_full_transcript_in_scan_order() {
    let drafts = fallback::extract(TRANSCRIPT, monday());

    let summary: Vec<(&str, Option<&str>, Option<&str>, Vec<&str>)> = drafts
        .iter()
        .map(|d| {
            (
                d.task.as_str(),
                d.owner.as_deref(),
                d.due_date.as_deref(),
                d.tags.iter().map(String::as_str).collect(),
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            (
                "Review the mobile mockups before Friday",
                None,
                Some("2025-03-07"),
                vec!["design", "meeting", "mobile"],
            ),
            (
                "John will configure the staging server by next Monday",
                Some("John"),
                Some("2025-03-10"),
                vec![],
            ),
            (
                "Update the API documentation on 21st of March",
                None,
                Some("2025-03-21"),
                vec!["development", "documentation"],
            ),
            (
                "send the brand assets by tomorrow",
                None,
                Some("2025-03-04"),
                vec!["client"],
            ),
            (
                "draft the user interview questions this week",
                None,
                None,
                vec!["research", "client"],
            ),
            (
                "configure the staging server by next Monday",
                None,
                Some("2025-03-10"),
                vec![],
            ),
            ("book the retro room", None, None, vec![]),
        ]
    );
}

#[test]
fn test_first_person_owner_and_tomorrow() {
    let today = monday();
    let drafts = fallback::extract("- I'll send the report by tomorrow", today);

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].owner.as_deref(), Some("Speaker"));
    assert_eq!(
        drafts[0].due_date.as_deref(),
        Some(dates::normalize("tomorrow", today).as_str())
    );
}

#[test]
fn test_no_case_insensitive_duplicates() {
    let text = "- Email the vendor\n- EMAIL THE VENDOR\nWe must email the vendor.\nTodo: email   the vendor";
    let drafts = fallback::extract(text, monday());

    let mut lowered: Vec<String> = drafts.iter().map(|d| d.task.to_lowercase()).collect();
    let total = lowered.len();
    lowered.sort();
    lowered.dedup();
    assert_eq!(lowered.len(), total);
    assert_eq!(total, 1);
}

#[test]
fn test_substantial_line_guarantees_output() {
    let text = "The quarterly numbers were discussed at length\nok";
    let drafts = fallback::extract(text, monday());

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].task, "The quarterly numbers were discussed at length");
    assert!(drafts[0].tags.is_empty());
}

#[test]
fn test_nothing_substantial_yields_empty() {
    assert!(fallback::extract("ok\nthanks all\n\n", monday()).is_empty());
}

#[test]
fn test_deterministic() {
    assert_eq!(
        fallback::extract(TRANSCRIPT, monday()),
        fallback::extract(TRANSCRIPT, monday())
    );
}

#[test]
fn test_month_first_cue_through_extraction() {
    let drafts = fallback::extract("- Publish the report by March 21st", monday());

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].task, "Publish the report by March 21st");
    assert_eq!(drafts[0].owner, None);
    assert_eq!(drafts[0].due_date.as_deref(), Some("2025-03-21"));
    assert!(drafts[0].tags.is_empty());
}

#[test]
fn test_today_cue() {
    let drafts = fallback::extract("- Sign the contract by today", monday());

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].task, "Sign the contract by today");
    assert_eq!(drafts[0].owner, None);
    assert_eq!(drafts[0].due_date.as_deref(), Some("2025-03-03"));
    assert!(drafts[0].tags.is_empty());
}

#[test]
fn test_this_weekday_cue_on_that_weekday_is_today() {
    let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    let drafts = fallback::extract("- Send the invoice by this Friday", friday);

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].task, "Send the invoice by this Friday");
    assert_eq!(drafts[0].owner, None);
    assert_eq!(drafts[0].due_date.as_deref(), Some("2025-03-07"));
    assert!(drafts[0].tags.is_empty());
}

#[test]
fn test_weekday_cue_outranks_tomorrow() {
    let drafts = fallback::extract("- send it by tomorrow or by Friday", monday());

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].task, "send it by tomorrow or by Friday");
    assert_eq!(drafts[0].owner, None);
    assert_eq!(drafts[0].due_date.as_deref(), Some("2025-03-07"));
    assert!(drafts[0].tags.is_empty());
}

#[test]
fn test_first_person_outranks_capitalized_owner() {
    let drafts = fallback::extract("- I'll ask Dave, Dave should approve", monday());

    // the bullet span sees "I'll" before "Dave should"; the modal clause
    // is picked up separately and has no owner of its own
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].task, "I'll ask Dave, Dave should approve");
    assert_eq!(drafts[0].owner.as_deref(), Some("Speaker"));
    assert_eq!(drafts[0].due_date, None);
    assert!(drafts[0].tags.is_empty());

    assert_eq!(drafts[1].task, "approve");
    assert_eq!(drafts[1].owner, None);
    assert_eq!(drafts[1].due_date, None);
}

#[test]
fn test_follow_up_and_todo_labels() {
    let text = "Follow up: confirm the venue booking\nTodo: email the caterer";
    let drafts = fallback::extract(text, monday());

    let tasks: Vec<&str> = drafts.iter().map(|d| d.task.as_str()).collect();
    assert_eq!(tasks, vec!["confirm the venue booking", "email the caterer"]);
    for draft in &drafts {
        assert_eq!(draft.owner, None);
        assert_eq!(draft.due_date, None);
        assert!(draft.tags.is_empty());
    }
}
