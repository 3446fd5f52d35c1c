use parley_types::ModelCatalog;

/// Pick the model to preselect for a conversation.
///
/// Order: the conversation's last used model if it is still active, then the
/// model flagged default if active, then the first active model. `None` means
/// the user has to pick one before sending.
pub fn select_model(catalog: &ModelCatalog, last_used: Option<&str>) -> Option<String> {
    if let Some(last) = last_used.filter(|id| catalog.is_active(id)) {
        return Some(last.to_string());
    }

    if let Some(default) = catalog.active_default() {
        return Some(default.id.clone());
    }

    catalog.first_active().map(|m| m.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::ModelDescriptor;

    fn catalog(models: Vec<ModelDescriptor>) -> ModelCatalog {
        ModelCatalog::from_models(models, None)
    }

    #[test]
    fn test_last_used_wins_when_active() {
        let catalog = catalog(vec![
            ModelDescriptor::new("m1", "M1", "p"),
            ModelDescriptor::new("m2", "M2", "p").default_model(true),
        ]);

        assert_eq!(select_model(&catalog, Some("m1")).as_deref(), Some("m1"));
    }

    #[test]
    fn test_inactive_last_used_falls_back_to_default() {
        let catalog = catalog(vec![
            ModelDescriptor::new("m1", "M1", "p").active(false),
            ModelDescriptor::new("m2", "M2", "p").default_model(true),
            ModelDescriptor::new("m0", "M0", "p"),
            ModelDescriptor::new("m3", "M3", "p"),
        ]);

        assert_eq!(select_model(&catalog, Some("m1")).as_deref(), Some("m2"));
    }

    #[test]
    fn test_unknown_last_used_falls_back() {
        let catalog = catalog(vec![ModelDescriptor::new("m2", "M2", "p").default_model(true)]);

        assert_eq!(select_model(&catalog, Some("gone")).as_deref(), Some("m2"));
    }

    #[test]
    fn test_inactive_default_skipped_for_first_active() {
        let catalog = catalog(vec![
            ModelDescriptor::new("a", "A", "p").default_model(true).active(false),
            ModelDescriptor::new("c", "C", "p"),
            ModelDescriptor::new("b", "B", "p"),
        ]);

        assert_eq!(select_model(&catalog, None).as_deref(), Some("b"));
    }

    #[test]
    fn test_active_default_preferred_over_inactive_default() {
        let catalog = catalog(vec![
            ModelDescriptor::new("a", "A", "p").default_model(true).active(false),
            ModelDescriptor::new("b", "B", "p"),
            ModelDescriptor::new("c", "C", "p").default_model(true),
        ]);

        assert_eq!(select_model(&catalog, None).as_deref(), Some("c"));
    }

    #[test]
    fn test_nothing_active() {
        let catalog = catalog(vec![ModelDescriptor::new("a", "A", "p").active(false)]);

        assert_eq!(select_model(&catalog, None), None);
        assert_eq!(select_model(&ModelCatalog::new(), Some("a")), None);
    }
}
