use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

impl Default for TemperatureRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 2.0,
            default: 0.7,
        }
    }
}

/// Reference data describing one model offered by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
    pub provider: String,
    #[serde(default)]
    pub supports_files: bool,
    #[serde(default)]
    pub can_reason: bool,
    #[serde(default)]
    pub can_access_web: bool,
    #[serde(rename = "temperature", default)]
    pub temperature_range: TemperatureRange,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_active: bool,
}

impl ModelDescriptor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            provider: provider.into(),
            supports_files: false,
            can_reason: false,
            can_access_web: false,
            temperature_range: TemperatureRange::default(),
            is_default: false,
            is_active: true,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn default_model(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn reasoning(mut self, can_reason: bool) -> Self {
        self.can_reason = can_reason;
        self
    }
}

/// Model catalog keyed by model id.
///
/// The catalog carries no ordering; helpers that need "the first" model
/// break ties by id so results are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    models: HashMap<String, ModelDescriptor>,
    default_model: Option<String>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list; later duplicates replace earlier ones
    pub fn from_models(models: Vec<ModelDescriptor>, default_model: Option<String>) -> Self {
        let models = models
            .into_iter()
            .map(|model| (model.id.clone(), model))
            .collect();

        Self {
            models,
            default_model,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.get(id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.get(id).is_some_and(|m| m.is_active)
    }

    /// Model the backend advertised as its default, if any
    pub fn advertised_default(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    /// First active model flagged `is_default`, skipping inactive defaults
    pub fn active_default(&self) -> Option<&ModelDescriptor> {
        self.sorted()
            .into_iter()
            .find(|m| m.is_default && m.is_active)
    }

    pub fn first_active(&self) -> Option<&ModelDescriptor> {
        self.sorted().into_iter().find(|m| m.is_active)
    }

    /// Models ordered by id
    pub fn sorted(&self) -> Vec<&ModelDescriptor> {
        let mut models: Vec<_> = self.models.values().collect();
        models.sort_by(|a, b| a.id.cmp(&b.id));
        models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_wire_format() {
        let json = r#"{
            "id": "gpt-x",
            "display_name": "GPT X",
            "provider": "openai",
            "supports_files": true,
            "can_reason": false,
            "can_access_web": true,
            "temperature": {"min": 0.0, "max": 1.0, "default": 0.5},
            "is_default": true,
            "is_active": true
        }"#;

        let model: ModelDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(model.id, "gpt-x");
        assert!(model.supports_files);
        assert_eq!(model.temperature_range.max, 1.0);
        assert!(model.is_default);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = ModelCatalog::from_models(
            vec![
                ModelDescriptor::new("b", "B", "p"),
                ModelDescriptor::new("a", "A", "p").active(false),
            ],
            Some("b".to_string()),
        );

        assert_eq!(catalog.len(), 2);
        assert!(catalog.is_active("b"));
        assert!(!catalog.is_active("a"));
        assert!(!catalog.is_active("missing"));
        assert_eq!(catalog.first_active().map(|m| m.id.as_str()), Some("b"));
        assert_eq!(catalog.advertised_default(), Some("b"));
    }

    #[test]
    fn test_active_default_skips_inactive_default() {
        let catalog = ModelCatalog::from_models(
            vec![
                ModelDescriptor::new("a", "A", "p").default_model(true).active(false),
                ModelDescriptor::new("c", "C", "p").default_model(true),
            ],
            None,
        );

        assert_eq!(catalog.active_default().map(|m| m.id.as_str()), Some("c"));
    }
}
