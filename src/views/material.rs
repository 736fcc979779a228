//! Material-style skin: cards with elevated headers and status chips.

use std::fmt::Write;

use super::{active_entry, id_label, TutorialView, MSG_SELECT_PROMPT};
use crate::models::{Tutorial, TutorialDraft};

const CARD_WIDTH: usize = 48;

/// Card-based rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialView;

impl MaterialView {
    fn card(title: &str, lines: &[String]) -> String {
        let rule = "─".repeat(CARD_WIDTH);
        let mut out = String::new();
        let _ = writeln!(out, "╭{}╮", rule);
        let heading = fit(&title.to_uppercase());
        let _ = writeln!(out, "│ {:<width$} │", heading, width = CARD_WIDTH - 2);
        let _ = writeln!(out, "├{}┤", rule);
        for line in lines {
            let _ = writeln!(out, "│ {:<width$} │", fit(line), width = CARD_WIDTH - 2);
        }
        let _ = writeln!(out, "╰{}╯", rule);
        out
    }

    fn chip(tutorial: &Tutorial) -> String {
        format!("( {} )", tutorial.status_label())
    }
}

/// Cut a line to the card's inner width, marking the cut with an ellipsis.
fn fit(line: &str) -> String {
    let width = CARD_WIDTH - 2;
    if line.chars().count() <= width {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

impl TutorialView for MaterialView {
    fn render_list(&self, tutorials: &[Tutorial], active: Option<usize>) -> String {
        let lines: Vec<String> = if tutorials.is_empty() {
            vec!["No tutorials yet".to_string()]
        } else {
            tutorials
                .iter()
                .enumerate()
                .map(|(index, tutorial)| {
                    let selected = if active == Some(index) { "●" } else { "○" };
                    format!("{} {}", selected, tutorial.title)
                })
                .collect()
        };

        let mut out = Self::card("Tutorials List", &lines);
        match active_entry(tutorials, active) {
            Some(tutorial) => out.push_str(&self.render_tutorial(tutorial)),
            None => {
                let _ = writeln!(out, "  {}", MSG_SELECT_PROMPT);
            }
        }
        out
    }

    fn render_tutorial(&self, tutorial: &Tutorial) -> String {
        Self::card(
            &format!("Tutorial {}", id_label(tutorial)),
            &[
                format!("Title        {}", tutorial.title),
                format!("Description  {}", tutorial.description),
                format!("Status       {}", Self::chip(tutorial)),
            ],
        )
    }

    fn render_form(&self, draft: &TutorialDraft) -> String {
        let missing = draft.missing_fields();
        let field = |label: &str, value: &str, key: &'static str| {
            if missing.contains(&key) {
                format!("{:<12} {} ⚠ required", label, value)
            } else {
                format!("{:<12} {}", label, value)
            }
        };
        Self::card(
            "Add Tutorial",
            &[
                field("Title", &draft.title, "title"),
                field("Description", &draft.description, "description"),
            ],
        )
    }

    fn render_message(&self, message: &str) -> String {
        format!("▌ {}\n", message)
    }
}
