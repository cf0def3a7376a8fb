//! Flow Client
//!
//! Dispatches dotted actions (`products.add_item`) to a flow backend over HTTP
//! and merges the returned markup into a document, following the `target`
//! and `swap` attributes declared on the triggering element.
//!
//! The document is reached through the [`dom::Document`] trait and user-facing
//! failures through a [`reporter::Reporter`], so the whole sequence runs
//! headless against [`dom::MemoryDocument`].

pub mod action;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod reporter;
pub mod swap;
pub mod types;

// Re-export commonly used types
pub use action::{ActionId, ActionIdError};
pub use client::FlowClient;
pub use config::FlowConfig;
pub use error::FlowError;
pub use swap::SwapStrategy;
pub use types::{FlowRequest, Outcome, Swapped};

/// Result type alias using FlowError
pub type Result<T> = std::result::Result<T, FlowError>;
