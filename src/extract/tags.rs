//! Keyword-based tag inference.

/// Tag categories in output order; a category applies when any of its
/// keywords occurs as a substring of the lowercased task.
pub const TAG_RULES: &[(&str, &[&str])] = &[
    ("development", &["develop", "code", "setup", "architecture", "api"]),
    ("design", &["design", "wireframe", "mockup", "responsive", "ui", "ux"]),
    ("research", &["research", "interview", "persona", "journey"]),
    ("testing", &["test", "qa", "testing", "penetration"]),
    ("client", &["client", "brand", "user"]),
    ("meeting", &["meeting", "review", "planning"]),
    ("documentation", &["document", "wiki", "documentation"]),
    ("mobile", &["mobile", "responsive"]),
    ("security", &["security", "authentication", "penetration"]),
    ("performance", &["performance", "optimize", "load"]),
];

/// Infer tags for a task, in table order
pub fn infer(task: &str) -> Vec<String> {
    let lowered = task.to_lowercase();
    TAG_RULES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(tag, _)| tag.to_string())
        .collect()
}
