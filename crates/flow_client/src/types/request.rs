use crate::ActionId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body posted to the dispatch endpoint.
///
/// `flow` carries the namespace and `method` the command, matching what the
/// server-side runner looks up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRequest {
    pub flow: String,
    pub method: String,
    pub params: Map<String, Value>,
}

impl FlowRequest {
    pub fn new(action: &ActionId, params: Map<String, Value>) -> Self {
        Self {
            flow: action.namespace().to_string(),
            method: action.command().to_string(),
            params,
        }
    }
}
