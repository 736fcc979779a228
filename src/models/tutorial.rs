//! Tutorial model matching the REST backend's tutorial resource.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned tutorial identifier.
///
/// Backends differ in how they encode ids (numeric primary keys vs. string
/// object ids), so both wire forms are accepted and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TutorialId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TutorialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TutorialId::Number(n) => write!(f, "{}", n),
            TutorialId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for TutorialId {
    fn from(id: &str) -> Self {
        // Command-line and path input is untyped; numeric text maps onto numeric ids.
        match id.parse::<i64>() {
            Ok(n) => TutorialId::Number(n),
            Err(_) => TutorialId::Text(id.to_string()),
        }
    }
}

impl From<String> for TutorialId {
    fn from(id: String) -> Self {
        TutorialId::from(id.as_str())
    }
}

/// A tutorial record as held in the client-side collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    /// Absent until the server has created the record.
    #[serde(default)]
    pub id: Option<TutorialId>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

impl Tutorial {
    /// Returns true if this record carries the given id.
    pub fn has_id(&self, id: &TutorialId) -> bool {
        self.id.as_ref() == Some(id)
    }

    /// Merge the fields the server echoed back into this record.
    ///
    /// The id is the match key and is never rewritten.
    pub fn apply(&mut self, patch: &TutorialPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
    }

    /// Human-readable status label.
    pub fn status_label(&self) -> &'static str {
        if self.published {
            "Published"
        } else {
            "Pending"
        }
    }
}

/// Request body for creating a new tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTutorialRequest {
    pub title: String,
    pub description: String,
}

/// Request body for updating an existing tutorial.
///
/// Unset fields are left out of the JSON body so the server keeps its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTutorialRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl UpdateTutorialRequest {
    /// Payload that only flips the published flag.
    pub fn published(status: bool) -> Self {
        Self {
            published: Some(status),
            ..Self::default()
        }
    }

    /// Payload carrying every user-editable field of a record.
    pub fn full(tutorial: &Tutorial) -> Self {
        Self {
            title: Some(tutorial.title.clone()),
            description: Some(tutorial.description.clone()),
            published: Some(tutorial.published),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.published.is_none()
    }
}

/// Whatever subset of record fields the server returns from an update.
///
/// Some backends echo the full record, others only a status message; any
/// field not present is simply not merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TutorialPatch {
    #[serde(default)]
    pub id: Option<TutorialId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl From<Tutorial> for TutorialPatch {
    fn from(tutorial: Tutorial) -> Self {
        Self {
            id: tutorial.id,
            title: Some(tutorial.title),
            description: Some(tutorial.description),
            published: Some(tutorial.published),
        }
    }
}

/// Unsaved form state owned by the view layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorialDraft {
    pub title: String,
    pub description: String,
}

impl TutorialDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn to_request(&self) -> CreateTutorialRequest {
        CreateTutorialRequest {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}
