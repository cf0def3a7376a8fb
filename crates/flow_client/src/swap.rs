use crate::FlowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How returned markup is merged around or into the destination element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SwapStrategy {
    /// Replace all children of the destination.
    #[default]
    #[serde(rename = "innerHTML")]
    InnerHtml,
    /// Replace the destination element itself.
    #[serde(rename = "outerHTML")]
    OuterHtml,
    /// Insert as the last child.
    #[serde(rename = "beforeend")]
    BeforeEnd,
    /// Insert as the first child.
    #[serde(rename = "afterbegin")]
    AfterBegin,
    /// Insert as the preceding sibling.
    #[serde(rename = "beforebegin")]
    BeforeBegin,
    /// Insert as the following sibling.
    #[serde(rename = "afterend")]
    AfterEnd,
}

impl SwapStrategy {
    pub const ALL: [SwapStrategy; 6] = [
        SwapStrategy::InnerHtml,
        SwapStrategy::OuterHtml,
        SwapStrategy::BeforeEnd,
        SwapStrategy::AfterBegin,
        SwapStrategy::BeforeBegin,
        SwapStrategy::AfterEnd,
    ];

    /// Keyword as it appears in the `swap` attribute.
    pub fn keyword(&self) -> &'static str {
        match self {
            SwapStrategy::InnerHtml => "innerHTML",
            SwapStrategy::OuterHtml => "outerHTML",
            SwapStrategy::BeforeEnd => "beforeend",
            SwapStrategy::AfterBegin => "afterbegin",
            SwapStrategy::BeforeBegin => "beforebegin",
            SwapStrategy::AfterEnd => "afterend",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            SwapStrategy::InnerHtml => "replace-inner",
            SwapStrategy::OuterHtml => "replace-outer",
            SwapStrategy::BeforeEnd => "append-inside-end",
            SwapStrategy::AfterBegin => "prepend-inside-start",
            SwapStrategy::BeforeBegin => "insert-before",
            SwapStrategy::AfterEnd => "insert-after",
        }
    }
}

impl FromStr for SwapStrategy {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SwapStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.keyword() == s || strategy.alias() == s)
            .ok_or_else(|| FlowError::UnknownSwap(s.to_string()))
    }
}

impl fmt::Display for SwapStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
