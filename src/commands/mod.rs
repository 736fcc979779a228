//! Command-line view actions.
//!
//! Each subcommand is one user gesture of the tutorials front end: it
//! dispatches store operations and renders the result through the active skin.

use clap::Subcommand;

use crate::errors::ClientError;
use crate::models::{TutorialDraft, TutorialId, UpdateTutorialRequest};
use crate::service::TutorialService;
use crate::store::TutorialStore;
use crate::views::{TutorialView, MSG_CREATED, MSG_STATUS_UPDATED, MSG_UPDATED};

/// Tutorial actions available from the command line.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all tutorials
    List {
        /// Index of the entry to show in detail
        #[arg(long)]
        active: Option<usize>,
    },
    /// Find tutorials by title
    Search {
        title: String,
        /// Index of the entry to show in detail
        #[arg(long)]
        active: Option<usize>,
    },
    /// Show a single tutorial
    Show { id: String },
    /// Add a tutorial
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a tutorial's title and/or description
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Mark a tutorial as published
    Publish { id: String },
    /// Mark a tutorial as pending
    Unpublish { id: String },
    /// Delete a tutorial
    Delete { id: String },
    /// Delete every tutorial
    DeleteAll,
}

/// Rendered result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub success: bool,
}

impl Output {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }

    fn rejected(text: String) -> Self {
        Self {
            text,
            success: false,
        }
    }
}

/// Run one command against the store and render the outcome.
pub async fn run<S: TutorialService>(
    command: Command,
    store: &TutorialStore<S>,
    view: &dyn TutorialView,
) -> Result<Output, ClientError> {
    match command {
        Command::List { active } => {
            store.list_all().await?;
            Ok(Output::ok(view.render_list(&store.snapshot(), active)))
        }
        Command::Search { title, active } => {
            store.search(&title).await?;
            Ok(Output::ok(view.render_list(&store.snapshot(), active)))
        }
        Command::Show { id } => {
            let tutorial = store.service().get_one(&TutorialId::from(id)).await?;
            Ok(Output::ok(view.render_tutorial(&tutorial)))
        }
        Command::Add { title, description } => {
            let draft = TutorialDraft::new(title, description);
            if !draft.is_valid() {
                let mut text = view.render_form(&draft);
                text.push_str(&view.render_message(&format!(
                    "Please fill in: {}",
                    draft.missing_fields().join(", ")
                )));
                return Ok(Output::rejected(text));
            }

            let created = store.create(&draft.title, &draft.description).await?;
            let mut text = view.render_message(MSG_CREATED);
            text.push_str(&view.render_tutorial(&created));
            Ok(Output::ok(text))
        }
        Command::Update {
            id,
            title,
            description,
        } => {
            let data = UpdateTutorialRequest {
                title,
                description,
                published: None,
            };
            if data.is_empty() {
                return Err(ClientError::Validation(
                    "Nothing to update: pass --title and/or --description".to_string(),
                ));
            }
            if [&data.title, &data.description]
                .into_iter()
                .flatten()
                .any(|value| value.trim().is_empty())
            {
                return Err(ClientError::Validation(
                    "Title and description cannot be blank".to_string(),
                ));
            }

            store.list_all().await?;
            let id = resolve_id(store, &id);
            let updated = store.update(&id, &data).await?;
            let mut text = view.render_message(MSG_UPDATED);
            text.push_str(&view.render_tutorial(&updated));
            Ok(Output::ok(text))
        }
        Command::Publish { id } => set_published(store, view, id, true).await,
        Command::Unpublish { id } => set_published(store, view, id, false).await,
        Command::Delete { id } => {
            store.list_all().await?;
            store.remove(&resolve_id(store, &id)).await?;
            Ok(Output::ok(view.render_list(&store.snapshot(), None)))
        }
        Command::DeleteAll => {
            store.remove_all().await?;
            Ok(Output::ok(view.render_list(&store.snapshot(), None)))
        }
    }
}

/// Match a typed id against the loaded collection, keeping the server's id form.
///
/// Falls back to parsing the text when no held record matches.
fn resolve_id<S: TutorialService>(store: &TutorialStore<S>, arg: &str) -> TutorialId {
    store
        .snapshot()
        .into_iter()
        .filter_map(|t| t.id)
        .find(|id| id.to_string() == arg)
        .unwrap_or_else(|| TutorialId::from(arg))
}

async fn set_published<S: TutorialService>(
    store: &TutorialStore<S>,
    view: &dyn TutorialView,
    id: String,
    status: bool,
) -> Result<Output, ClientError> {
    store.list_all().await?;
    let id = resolve_id(store, &id);

    // Send the whole record with the new status, as the edit form does.
    let data = match store.find(&id) {
        Some(mut current) => {
            current.published = status;
            UpdateTutorialRequest::full(&current)
        }
        None => UpdateTutorialRequest::published(status),
    };
    let updated = store.update(&id, &data).await?;
    let mut text = view.render_message(MSG_STATUS_UPDATED);
    text.push_str(&view.render_tutorial(&updated));
    Ok(Output::ok(text))
}
