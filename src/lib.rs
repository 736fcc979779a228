//! Tutorials client
//!
//! A REST client for the tutorials API with a client-side collection store
//! that keeps an in-memory list of tutorials in step with the server.

pub mod api;
pub mod commands;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;
pub mod store;
pub mod views;

pub use api::ApiClient;
pub use config::Config;
pub use errors::ClientError;
pub use models::{Tutorial, TutorialDraft, TutorialId, TutorialPatch, UpdateTutorialRequest};
pub use service::{HttpTutorialService, TutorialService};
pub use store::TutorialStore;
pub use views::{Skin, TutorialView};

#[cfg(test)]
mod tests;
