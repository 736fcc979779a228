//! Bootstrap-style skin: list groups, badges and alert boxes.

use std::fmt::Write;

use super::{active_entry, id_label, TutorialView, MSG_SELECT_PROMPT};
use crate::models::{Tutorial, TutorialDraft};

/// Table-like rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapView;

impl BootstrapView {
    fn badge(tutorial: &Tutorial) -> String {
        format!("[{}]", tutorial.status_label())
    }
}

impl TutorialView for BootstrapView {
    fn render_list(&self, tutorials: &[Tutorial], active: Option<usize>) -> String {
        let mut out = String::from("| # | Tutorials List\n|---|----------------------------\n");
        for (index, tutorial) in tutorials.iter().enumerate() {
            let title = if active == Some(index) {
                format!("**{}**", tutorial.title)
            } else {
                tutorial.title.clone()
            };
            let _ = writeln!(out, "| {} | {}", index, title);
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
        let mut out = String::new();
        let _ = writeln!(out, "Tutorial {} {}", id_label(tutorial), Self::badge(tutorial));
        let _ = writeln!(out, "  Title:       {}", tutorial.title);
        let _ = writeln!(out, "  Description: {}", tutorial.description);
        let _ = writeln!(out, "  Status:      {}", tutorial.status_label());
        out
    }

    fn render_form(&self, draft: &TutorialDraft) -> String {
        let missing = draft.missing_fields();
        let mut out = String::from("Add Tutorial\n");
        for (label, value, key) in [
            ("Title", &draft.title, "title"),
            ("Description", &draft.description, "description"),
        ] {
            let _ = writeln!(out, "  {:<12} [{}]", label, value);
            if missing.contains(&key) {
                let _ = writeln!(out, "  {:<12} ! {} is required", "", key);
            }
        }
        out
    }

    fn render_message(&self, message: &str) -> String {
        format!("[alert] {}\n", message)
    }
}
