//! Plain text skin.

use std::fmt::Write;

use super::{active_entry, id_label, TutorialView, MSG_SELECT_PROMPT};
use crate::models::{Tutorial, TutorialDraft};

/// Unstyled rendering: one line per entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainView;

impl TutorialView for PlainView {
    fn render_list(&self, tutorials: &[Tutorial], active: Option<usize>) -> String {
        let mut out = String::from("Tutorials List\n");
        if tutorials.is_empty() {
            out.push_str("  (no tutorials)\n");
        }
        for (index, tutorial) in tutorials.iter().enumerate() {
            let marker = if active == Some(index) { '>' } else { ' ' };
            let _ = writeln!(out, "{} {}. {}", marker, index, tutorial.title);
        }
        out.push('\n');

        match active_entry(tutorials, active) {
            Some(tutorial) => out.push_str(&self.render_tutorial(tutorial)),
            None => {
                let _ = writeln!(out, "{}", MSG_SELECT_PROMPT);
            }
        }
        out
    }

    fn render_tutorial(&self, tutorial: &Tutorial) -> String {
        format!(
            "Tutorial #{}\nTitle: {}\nDescription: {}\nStatus: {}\n",
            id_label(tutorial),
            tutorial.title,
            tutorial.description,
            tutorial.status_label()
        )
    }

    fn render_form(&self, draft: &TutorialDraft) -> String {
        let missing = draft.missing_fields();
        let mut out = String::from("Add Tutorial\n");
        let _ = writeln!(out, "Title: {}", draft.title);
        if missing.contains(&"title") {
            out.push_str("  title is required\n");
        }
        let _ = writeln!(out, "Description: {}", draft.description);
        if missing.contains(&"description") {
            out.push_str("  description is required\n");
        }
        out
    }

    fn render_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }
}
