//! Prompt construction for model-backed extraction.

use crate::adapters::{ChatMessage, ChatRequest};
use crate::domain::ParticipantNames;

/// System instruction restricting output to raw JSON
pub const SYSTEM_INSTRUCTION: &str =
    "You respond only with valid JSON arrays. No markdown, no explanation.";

const INTRO: &str = r#"You are a meeting assistant. Find every action item in the transcript below.
Reply with a JSON array and nothing else, using exactly this element shape:

[
  {
    "task": "",
    "owner": null,
    "due_date": null,
    "tags": []
  }
]

Guidelines:
- Keep only concrete, actionable tasks."#;

const GUIDELINES: &str = r#"- due_date: the deadline as stated ("by Monday", "tomorrow", "this Friday", "next week", "March 1st"), or a YYYY-MM-DD date when you can resolve it.
- Use null for an owner or due date that is not mentioned.
- tags: short topical keywords such as "development", "design", "research", "testing", "documentation", "api", "mobile", "security", "performance".
- Never write anything outside the JSON array.

Examples:
- "Jessica: I need to complete the user research by this Friday" -> {"task": "complete the user research", "owner": "Jessica", "due_date": "this Friday", "tags": ["research"]}
- "Robert: I'll design the new API architecture by March 1st" -> {"task": "design the new API architecture", "owner": "Robert", "due_date": "March 1st", "tags": ["design", "api"]}
- "Lisa: I have to implement responsive design by next Tuesday" -> {"task": "implement responsive design", "owner": "Lisa", "due_date": "next Tuesday", "tags": ["design", "mobile"]}"#;

/// Build the task prompt, listing detected participants as owner hints
pub fn build_prompt(names: &ParticipantNames) -> String {
    let owner_hint = if names.is_empty() {
        r#"- owner: the person responsible. First-person commitments ("I'll", "I need to", "I have to") belong to the speaker of that line."#.to_string()
    } else {
        format!(
            r#"- owner: the person responsible. Likely participants: {}. First-person commitments ("I'll", "I need to", "I have to") belong to the speaker of that line."#,
            names.join(", ")
        )
    };

    format!("{INTRO}\n{owner_hint}\n{GUIDELINES}")
}

/// Assemble the full chat request for a transcript
pub fn build_request(
    names: &ParticipantNames,
    transcript: &str,
    model: &str,
    temperature: f32,
) -> ChatRequest {
    let prompt = build_prompt(names);

    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(format!("{prompt}\n\nTranscript:\n\n{transcript}")),
        ],
        temperature,
    }
}
