//! Active input mode and selected template.

use crate::catalog::TemplateCatalog;
use crate::error::InvalidStateError;
use crate::model::SelectionMode;

/// Invariant: `selected` is `Some` only while `mode` is [`SelectionMode::Template`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    mode: SelectionMode,
    selected: Option<String>,
}

impl SelectionState {
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selected_template(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Switch tabs. Any change of mode drops the template selection, so
    /// switching back to Template mode does not restore it.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "selection mode changed");
        self.mode = mode;
        self.selected = None;
    }

    pub fn select_template(&mut self, id: &str) -> Result<(), InvalidStateError> {
        if self.mode != SelectionMode::Template {
            return Err(InvalidStateError {
                template_id: id.to_string(),
            });
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Gallery shortcut: switch to Template mode, then select.
    pub fn select_from_gallery(&mut self, id: &str) {
        self.set_mode(SelectionMode::Template);
        self.selected = Some(id.to_string());
    }

    /// Drop the selection, keep the mode.
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Keep the selection across a catalog reload if its id still exists.
    /// Returns `true` when the selection had to be dropped.
    pub fn reconcile(&mut self, catalog: &TemplateCatalog) -> bool {
        match self.selected.as_deref() {
            Some(id) if !catalog.contains(id) => {
                tracing::debug!(template = id, "selected template vanished from catalog");
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Template;

    fn catalog(ids: &[&str]) -> TemplateCatalog {
        let templates = ids
            .iter()
            .map(|id| Template {
                id: id.to_string(),
                name: id.to_uppercase(),
                description: String::new(),
                category: String::new(),
            })
            .collect();
        TemplateCatalog::from_groups([("symbols".to_string(), templates)]).unwrap()
    }

    #[test]
    fn starts_in_text_mode_without_selection() {
        let state = SelectionState::default();
        assert_eq!(state.mode(), SelectionMode::Text);
        assert_eq!(state.selected_template(), None);
    }

    #[test]
    fn selecting_in_text_mode_is_rejected() {
        let mut state = SelectionState::default();
        let err = state.select_template("heart").unwrap_err();
        assert_eq!(err.template_id, "heart");
        assert_eq!(state.selected_template(), None);
    }

    #[test]
    fn switching_to_text_clears_and_back_does_not_restore() {
        let mut state = SelectionState::default();
        state.set_mode(SelectionMode::Template);
        state.select_template("heart").unwrap();
        state.set_mode(SelectionMode::Text);
        assert_eq!(state.selected_template(), None);
        state.set_mode(SelectionMode::Template);
        assert_eq!(state.selected_template(), None);
    }

    #[test]
    fn setting_same_mode_keeps_selection() {
        let mut state = SelectionState::default();
        state.set_mode(SelectionMode::Template);
        state.select_template("star").unwrap();
        state.set_mode(SelectionMode::Template);
        assert_eq!(state.selected_template(), Some("star"));
    }

    #[test]
    fn selecting_again_replaces_previous() {
        let mut state = SelectionState::default();
        state.set_mode(SelectionMode::Template);
        state.select_template("star").unwrap();
        state.select_template("heart").unwrap();
        assert!(state.is_selected("heart"));
        assert!(!state.is_selected("star"));
    }

    #[test]
    fn gallery_shortcut_switches_mode() {
        let mut state = SelectionState::default();
        state.select_from_gallery("fire");
        assert_eq!(state.mode(), SelectionMode::Template);
        assert_eq!(state.selected_template(), Some("fire"));
    }

    #[test]
    fn clear_keeps_mode() {
        let mut state = SelectionState::default();
        state.select_from_gallery("fire");
        state.clear();
        assert_eq!(state.mode(), SelectionMode::Template);
        assert_eq!(state.selected_template(), None);
    }

    #[test]
    fn reconcile_keeps_surviving_id_and_drops_missing_one() {
        let mut state = SelectionState::default();
        state.select_from_gallery("heart");
        assert!(!state.reconcile(&catalog(&["star", "heart"])));
        assert_eq!(state.selected_template(), Some("heart"));

        assert!(state.reconcile(&catalog(&["star"])));
        assert_eq!(state.selected_template(), None);
    }
}
