use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::provider::ProviderAdapter;
use crate::config::Settings;

/// Read-only mapping from route identifier to provider adapter, built once
/// at startup.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// The stock registry: `gpt` and `gemini`.
    pub fn standard(settings: &Settings) -> Self {
        let mut registry = Self::new();
        registry.register("gpt", Arc::new(OpenAIProvider::new(settings.openai_model.clone())));
        registry.register(
            "gemini",
            Arc::new(GeminiProvider::new(settings.gemini_model.clone())),
        );
        registry
    }

    pub fn register(&mut self, id: impl Into<String>, adapter: Arc<dyn ProviderAdapter>) {
        let id = id.into();
        debug!(provider = %id, adapter = adapter.name(), "Registered provider");
        self.providers.insert(id, adapter);
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers.get(id).cloned()
    }

    /// Registered identifiers, sorted for stable messages.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
