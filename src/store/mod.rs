//! Collection state store.
//!
//! Owns the canonical in-memory list of tutorials. Every mutation goes through
//! one of six async operations, each of which performs exactly one remote call
//! and then folds the outcome into the collection. A failed call leaves the
//! collection untouched. Changes are published on a `watch` channel.

use std::sync::Arc;

use tokio::sync::watch;

use crate::errors::ClientError;
use crate::models::{Tutorial, TutorialDraft, TutorialId, UpdateTutorialRequest};
use crate::service::TutorialService;

/// Shared handle to the tutorial collection.
///
/// Cloning is cheap; clones share one collection and one service.
pub struct TutorialStore<S> {
    service: Arc<S>,
    state: Arc<watch::Sender<Vec<Tutorial>>>,
}

impl<S> Clone for TutorialStore<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: TutorialService> TutorialStore<S> {
    /// Create a store with an empty collection.
    pub fn new(service: S) -> Self {
        Self::with_service(Arc::new(service))
    }

    /// Create a store over an already shared service.
    pub fn with_service(service: Arc<S>) -> Self {
        let (state, _) = watch::channel(Vec::new());
        Self {
            service,
            state: Arc::new(state),
        }
    }

    /// The record access layer behind this store.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> Vec<Tutorial> {
        self.state.borrow().clone()
    }

    /// Observe every committed change to the collection.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Tutorial>> {
        self.state.subscribe()
    }

    /// Copy of the held record with the given id.
    pub fn find(&self, id: &TutorialId) -> Option<Tutorial> {
        self.state.borrow().iter().find(|t| t.has_id(id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }

    /// Create a tutorial and append the server's record to the collection.
    pub async fn create(&self, title: &str, description: &str) -> Result<Tutorial, ClientError> {
        let draft = TutorialDraft::new(title, description);
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(ClientError::Validation(format!(
                "{} required",
                missing.join(" and ")
            )));
        }

        let created = self
            .service
            .create(&draft.to_request())
            .await
            .map_err(failed("create"))?;

        self.state.send_modify(|list| list.push(created.clone()));
        tracing::debug!("Appended tutorial {:?}", created.id);

        Ok(created)
    }

    /// Replace the collection with every tutorial on the server.
    pub async fn list_all(&self) -> Result<Vec<Tutorial>, ClientError> {
        let tutorials = self.service.list_all().await.map_err(failed("list_all"))?;
        self.replace(tutorials.clone());
        Ok(tutorials)
    }

    /// Update a tutorial and merge the returned fields into the held record.
    pub async fn update(
        &self,
        id: &TutorialId,
        data: &UpdateTutorialRequest,
    ) -> Result<Tutorial, ClientError> {
        let patch = self
            .service
            .update(id, data)
            .await
            .map_err(failed("update"))?;

        let mut merged = None;
        self.state.send_if_modified(|list| {
            match list.iter_mut().find(|t| t.has_id(id)) {
                Some(tutorial) => {
                    tutorial.apply(&patch);
                    merged = Some(tutorial.clone());
                    true
                }
                None => false,
            }
        });

        match merged {
            Some(tutorial) => {
                tracing::debug!("Merged update into tutorial {}", id);
                Ok(tutorial)
            }
            None => Err(failed("update")(ClientError::NotInCollection(id.clone()))),
        }
    }

    /// Delete a tutorial and drop it from the collection.
    pub async fn remove(&self, id: &TutorialId) -> Result<Tutorial, ClientError> {
        self.service.remove(id).await.map_err(failed("remove"))?;

        let mut removed = None;
        self.state.send_if_modified(|list| {
            match list.iter().position(|t| t.has_id(id)) {
                Some(index) => {
                    removed = Some(list.remove(index));
                    true
                }
                None => false,
            }
        });

        match removed {
            Some(tutorial) => {
                tracing::debug!("Removed tutorial {}", id);
                Ok(tutorial)
            }
            None => Err(failed("remove")(ClientError::NotInCollection(id.clone()))),
        }
    }

    /// Delete every tutorial and empty the collection.
    pub async fn remove_all(&self) -> Result<(), ClientError> {
        self.service
            .remove_all()
            .await
            .map_err(failed("remove_all"))?;
        self.replace(Vec::new());
        Ok(())
    }

    /// Replace the collection with the tutorials matching `title`.
    pub async fn search(&self, title: &str) -> Result<Vec<Tutorial>, ClientError> {
        let tutorials = self
            .service
            .search(title)
            .await
            .map_err(failed("search"))?;
        self.replace(tutorials.clone());
        Ok(tutorials)
    }

    fn replace(&self, tutorials: Vec<Tutorial>) {
        let count = tutorials.len();
        self.state.send_replace(tutorials);
        tracing::debug!("Replaced collection with {} tutorials", count);
    }
}

/// Log a failed operation and pass the error through unchanged.
fn failed(operation: &'static str) -> impl FnOnce(ClientError) -> ClientError {
    move |err| {
        tracing::warn!("Tutorial {} failed: {}", operation, err);
        err
    }
}
