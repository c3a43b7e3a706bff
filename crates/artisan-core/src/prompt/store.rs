//! PromptElements store.
//!
//! Owns the four prompt fields together with the pending ghost suggestion.
//! A ghost suggestion is a prediction conditioned on the exact prompt text
//! it was fetched for, so every field mutation clears it.

use artisan_types::prompt::{PartialPromptElements, PromptElements, PromptField};

use super::compose::compose_prompt;
use super::merge::{append_ghost, merge_partial};

#[derive(Debug, Clone, Default)]
pub struct PromptStore {
    elements: PromptElements,
    ghost: String,
}

impl PromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_elements(elements: PromptElements) -> Self {
        Self {
            elements,
            ghost: String::new(),
        }
    }

    pub fn get(&self) -> &PromptElements {
        &self.elements
    }

    /// Replace one field.
    pub fn set(&mut self, field: PromptField, value: impl Into<String>) {
        *self.elements.field_mut(field) = value.into();
        self.ghost.clear();
    }

    /// Replace one field with a value computed from its previous value.
    pub fn update(&mut self, field: PromptField, updater: impl FnOnce(&str) -> String) {
        let next = updater(self.elements.field(field));
        self.set(field, next);
    }

    /// Replace all four fields at once.
    pub fn replace_all(&mut self, elements: PromptElements) {
        self.elements = elements;
        self.ghost.clear();
    }

    /// Apply an expand-idea result additively (see [`merge_partial`]).
    pub fn merge(&mut self, partial: &PartialPromptElements) {
        merge_partial(&mut self.elements, partial);
        self.ghost.clear();
    }

    pub fn composed(&self) -> String {
        compose_prompt(&self.elements)
    }

    pub fn ghost(&self) -> &str {
        &self.ghost
    }

    /// Show a fetched ghost suggestion. An empty string clears it.
    pub fn set_ghost(&mut self, text: impl Into<String>) {
        self.ghost = text.into();
    }

    pub fn clear_ghost(&mut self) {
        self.ghost.clear();
    }

    /// Move the ghost suggestion into `details`.
    ///
    /// Returns `false` (and changes nothing) when no ghost is showing.
    pub fn accept_ghost(&mut self) -> bool {
        if self.ghost.is_empty() {
            return false;
        }
        let ghost = std::mem::take(&mut self.ghost);
        self.update(PromptField::Details, |prev| append_ghost(prev, &ghost));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clears_ghost() {
        let mut store = PromptStore::new();
        store.set_ghost("- add lighting");
        assert_eq!(store.ghost(), "- add lighting");

        store.set(PromptField::Role, "painter");
        assert_eq!(store.get().role, "painter");
        assert_eq!(store.ghost(), "");
    }

    #[test]
    fn test_update_receives_previous_value() {
        let mut store = PromptStore::new();
        store.set(PromptField::Details, "a");
        store.set_ghost("ghost");
        store.update(PromptField::Details, |prev| format!("{prev}b"));
        assert_eq!(store.get().details, "ab");
        assert_eq!(store.ghost(), "");
    }

    #[test]
    fn test_merge_and_replace_clear_ghost() {
        let mut store = PromptStore::new();
        store.set_ghost("x");
        store.merge(&PartialPromptElements {
            role: Some("r".into()),
            ..Default::default()
        });
        assert_eq!(store.ghost(), "");

        store.set_ghost("y");
        store.replace_all(PromptElements::default());
        assert_eq!(store.ghost(), "");
        assert!(store.get().is_blank());
    }

    #[test]
    fn test_accept_ghost_appends_to_details() {
        let mut store = PromptStore::new();
        store.set(PromptField::Details, "neon streets");
        store.set_ghost("- try adding lighting mood");

        assert!(store.accept_ghost());
        assert_eq!(store.get().details, "neon streets\n- try adding lighting mood");
        assert_eq!(store.ghost(), "");
    }

    #[test]
    fn test_accept_without_ghost_is_noop() {
        let mut store = PromptStore::new();
        store.set(PromptField::Details, "neon");
        assert!(!store.accept_ghost());
        assert_eq!(store.get().details, "neon");
    }

    #[test]
    fn test_composed_tracks_elements() {
        let mut store = PromptStore::new();
        assert_eq!(store.composed(), "");
        store.set(PromptField::Purpose, "explain");
        assert_eq!(store.composed(), "## Purpose\nexplain");
    }
}
