//! Free-text prompts and structured scene documents.

use serde::{Deserialize, Serialize};

/// What the provider is asked to generate from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptOrScript {
    /// Plain prompt text
    Text(String),
    /// Self-contained JSON document, usually a [`crate::SceneScript`]
    Script(serde_json::Value),
}

impl PromptOrScript {
    /// Renders the value as the text part sent to the provider.
    ///
    /// Scripts are serialized as compact JSON.
    pub fn to_provider_text(&self) -> String {
        match self {
            PromptOrScript::Text(text) => text.clone(),
            PromptOrScript::Script(script) => script.to_string(),
        }
    }

    /// Returns the structured document, if this is one.
    pub fn as_script(&self) -> Option<&serde_json::Value> {
        match self {
            PromptOrScript::Script(script) => Some(script),
            PromptOrScript::Text(_) => None,
        }
    }
}

impl Default for PromptOrScript {
    fn default() -> Self {
        PromptOrScript::Text(String::new())
    }
}
