//! Document abstraction the dispatcher patches.
//!
//! [`Document`] is the seam between the dispatcher and whatever owns the
//! real tree. [`MemoryDocument`] is a self-contained implementation used
//! by headless hosts and tests.

mod html;
mod memory;
mod selector;

pub use memory::{MemoryDocument, NodeId};

use crate::SwapStrategy;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("html parse error: {0}")]
    HtmlParse(String),

    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),

    #[error("node is not an element")]
    InvalidNode,

    #[error("element has no parent to insert around")]
    Detached,
}

pub trait Document {
    type Node: Clone + std::fmt::Debug;

    /// First element in document order matching `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Node>, DomError>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Merge `markup` relative to `node`. Either the whole patch lands or
    /// the document is left as it was.
    fn swap(
        &mut self,
        node: &Self::Node,
        strategy: SwapStrategy,
        markup: &str,
    ) -> Result<(), DomError>;

    /// Named control values under a form element, keyed by control name.
    fn form_data(&self, node: &Self::Node) -> Map<String, Value>;
}
