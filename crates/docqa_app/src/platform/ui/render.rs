use docqa_core::AppViewModel;

use super::constants::*;

/// Renders the whole panel as text lines, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string(), TITLE.to_string(), RULE.to_string()];

    lines.push(format!("File: {}", view.file_label));
    if let Some(status) = status_text(view) {
        lines.push(status);
    }

    if view.shows_context() {
        lines.push("Context:".to_string());
        lines.extend(context_preview(&view.context));
    }

    if view.question.is_empty() {
        lines.push(format!("Question: ({QUESTION_PLACEHOLDER})"));
    } else {
        lines.push(format!("Question: {}", view.question));
    }

    if view.shows_error() {
        lines.push(format!("! {}", view.error));
    }

    if view.shows_answer() {
        lines.push("Answer:".to_string());
        lines.extend(view.answer.lines().map(|line| format!("  {line}")));
    }

    lines.push(RULE.to_string());
    lines
}

pub fn help() -> Vec<String> {
    HELP_LINES.iter().map(|line| line.to_string()).collect()
}

fn status_text(view: &AppViewModel) -> Option<String> {
    match (view.upload_pending, view.ask_pending) {
        (true, true) => Some("Uploading... Asking...".to_string()),
        (true, false) => Some("Uploading...".to_string()),
        (false, true) => Some("Asking...".to_string()),
        (false, false) => None,
    }
}

fn context_preview(context: &str) -> Vec<String> {
    let total = context.lines().count();
    let mut preview: Vec<String> = context
        .lines()
        .take(CONTEXT_PREVIEW_LINES)
        .map(|line| format!("  | {}", clip(line, PREVIEW_LINE_WIDTH)))
        .collect();
    if total > CONTEXT_PREVIEW_LINES {
        preview.push(format!("  | ... ({} more lines)", total - CONTEXT_PREVIEW_LINES));
    }
    preview
}

fn clip(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }
    let mut clipped: String = line.chars().take(width.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}
