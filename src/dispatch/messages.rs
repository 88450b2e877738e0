//! Update request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::layout::PropId;

/// Client report of changed inputs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRequest {
    /// First render of the page: run every binding
    #[serde(default)]
    pub initial: bool,
    /// Properties whose value changed since the last request
    #[serde(default)]
    pub changed: Vec<PropId>,
    /// Current value of every declared input and state
    #[serde(default)]
    pub values: HashMap<PropId, Value>,
}

impl UpdateRequest {
    /// Request for the first render
    pub fn initial(values: HashMap<PropId, Value>) -> Self {
        Self {
            initial: true,
            changed: Vec::new(),
            values,
        }
    }

    /// Request after `changed` was modified
    pub fn changed(changed: Vec<PropId>, values: HashMap<PropId, Value>) -> Self {
        Self {
            initial: false,
            changed,
            values,
        }
    }
}

/// New content for one output property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputUpdate {
    pub prop: PropId,
    pub value: Value,
    /// Set when the binding failed; `value` is then null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outputs recomputed for one request or tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateResponse {
    pub outputs: Vec<OutputUpdate>,
}

impl UpdateResponse {
    pub fn get(&self, prop: &PropId) -> Option<&OutputUpdate> {
        self.outputs.iter().find(|o| &o.prop == prop)
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}
