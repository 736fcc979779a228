//! Presentation skins.
//!
//! Every skin renders the same state through [`TutorialView`]; only the
//! presentation differs. The store never depends on which skin is active.

mod bootstrap;
mod material;
mod plain;

pub use bootstrap::BootstrapView;
pub use material::MaterialView;
pub use plain::PlainView;

use std::fmt;
use std::str::FromStr;

use crate::errors::ClientError;
use crate::models::{Tutorial, TutorialDraft};

/// Message shown after a successful create.
pub const MSG_CREATED: &str = "You submitted successfully!";
/// Message shown after a successful content update.
pub const MSG_UPDATED: &str = "The tutorial was updated successfully!";
/// Message shown after a published flag change.
pub const MSG_STATUS_UPDATED: &str = "The status was updated successfully!";
/// Placeholder when no list entry is selected.
pub const MSG_SELECT_PROMPT: &str = "Please click on a Tutorial...";

/// Renders tutorials, forms, and messages as text.
pub trait TutorialView {
    /// Render the collection; `active` highlights one entry and shows its details.
    fn render_list(&self, tutorials: &[Tutorial], active: Option<usize>) -> String;

    /// Render a single record.
    fn render_tutorial(&self, tutorial: &Tutorial) -> String;

    /// Render the add form, flagging blank required fields.
    fn render_form(&self, draft: &TutorialDraft) -> String;

    /// Render a status or error message.
    fn render_message(&self, message: &str) -> String;
}

/// Available presentation skins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Skin {
    #[default]
    Plain,
    Material,
    Bootstrap,
}

impl Skin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Plain => "plain",
            Skin::Material => "material",
            Skin::Bootstrap => "bootstrap",
        }
    }

    /// The view implementation for this skin.
    pub fn view(self) -> Box<dyn TutorialView + Send + Sync> {
        match self {
            Skin::Plain => Box::new(PlainView),
            Skin::Material => Box::new(MaterialView),
            Skin::Bootstrap => Box::new(BootstrapView),
        }
    }
}

impl fmt::Display for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skin {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Skin::Plain),
            "material" => Ok(Skin::Material),
            "bootstrap" => Ok(Skin::Bootstrap),
            other => Err(ClientError::Config(format!("Unknown skin: {}", other))),
        }
    }
}

/// Selected entry of a list, if `active` points inside it.
fn active_entry(tutorials: &[Tutorial], active: Option<usize>) -> Option<&Tutorial> {
    active.and_then(|index| tutorials.get(index))
}

fn id_label(tutorial: &Tutorial) -> String {
    tutorial
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}
