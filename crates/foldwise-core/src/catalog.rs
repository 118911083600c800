//! Template catalog fetched from `/get_templates`.

use crate::error::CatalogError;
use crate::model::Template;
use crate::selection::SelectionState;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Glyph shown for templates the gallery has no icon for.
pub const FALLBACK_ICON: &str = "?";

const ICONS: &[(&str, &str)] = &[
    ("apple", "🍎"),
    ("nike", "✓"),
    ("batman", "🦇"),
    ("superman", "S"),
    ("heart", "♥"),
    ("star", "★"),
    ("peace", "☮"),
    ("infinity", "∞"),
    ("smile", "😊"),
    ("love", "😍"),
    ("thumbs_up", "👍"),
    ("fire", "🔥"),
];

pub fn icon_for(template_id: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(id, _)| *id == template_id)
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

/// One renderable gallery cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub icon: &'static str,
    pub selected: bool,
}

/// Templates grouped by category, in the order the service listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCatalog {
    categories: Vec<(String, Vec<Template>)>,
    by_id: HashMap<String, (usize, usize)>,
}

impl TemplateCatalog {
    /// Build from the `category → [template]` map returned by the service.
    pub fn from_wire(wire: Map<String, Value>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for (category, raw) in wire {
            let templates: Vec<Template> =
                serde_json::from_value(raw).map_err(|e| CatalogError::Malformed {
                    category: category.clone(),
                    reason: e.to_string(),
                })?;
            catalog.push_category(category, templates)?;
        }
        Ok(catalog)
    }

    /// Build from already typed groups. Used by tests and fixtures.
    pub fn from_groups<I>(groups: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (String, Vec<Template>)>,
    {
        let mut catalog = Self::default();
        for (category, templates) in groups {
            catalog.push_category(category, templates)?;
        }
        Ok(catalog)
    }

    fn push_category(
        &mut self,
        category: String,
        templates: Vec<Template>,
    ) -> Result<(), CatalogError> {
        let cat_idx = self.categories.len();
        let mut owned = Vec::with_capacity(templates.len());
        for (tpl_idx, mut template) in templates.into_iter().enumerate() {
            if let Some(&(first, _)) = self.by_id.get(&template.id) {
                return Err(CatalogError::DuplicateId {
                    id: template.id,
                    first: self.category_name(first).to_string(),
                    second: category,
                });
            }
            template.category = category.clone();
            self.by_id.insert(template.id.clone(), (cat_idx, tpl_idx));
            owned.push(template);
        }
        self.categories.push((category, owned));
        Ok(())
    }

    fn category_name(&self, idx: usize) -> &str {
        self.categories
            .get(idx)
            .map(|(name, _)| name.as_str())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn templates(&self, category: &str) -> &[Template] {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, templates)| templates.as_slice())
            .unwrap_or(&[])
    }

    /// Every template in display order (category by category).
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.categories.iter().flat_map(|(_, t)| t.iter())
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        let &(cat, idx) = self.by_id.get(id)?;
        self.categories.get(cat)?.1.get(idx)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Position of `id` in [`Self::iter`] order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.iter().position(|t| t.id == id)
    }

    /// Renderable entries for one category, with selection reconciled by id.
    pub fn entries<'a>(
        &'a self,
        category: &str,
        selection: &SelectionState,
    ) -> Vec<TemplateEntry<'a>> {
        self.templates(category)
            .iter()
            .map(|t| TemplateEntry {
                id: &t.id,
                name: &t.name,
                description: &t.description,
                icon: icon_for(&t.id),
                selected: selection.is_selected(&t.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SelectionMode;

    fn wire(json: &str) -> Map<String, Value> {
        serde_json::from_str(json).unwrap()
    }

    const SAMPLE: &str = r#"{
        "logos": [
            {"id": "apple", "name": "Apple Logo", "description": "The Apple logo"},
            {"id": "nike", "name": "Nike Swoosh", "description": "Swoosh"}
        ],
        "symbols": [
            {"id": "heart", "name": "Heart", "description": "A heart"}
        ],
        "emojis": [
            {"id": "rocket", "name": "Rocket", "description": "Not in the icon table"}
        ]
    }"#;

    #[test]
    fn keeps_service_category_order_and_fills_category() {
        let catalog = TemplateCatalog::from_wire(wire(SAMPLE)).unwrap();
        let cats: Vec<_> = catalog.categories().collect();
        assert_eq!(cats, vec!["logos", "symbols", "emojis"]);
        assert_eq!(catalog.get("heart").unwrap().category, "symbols");
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.position("heart"), Some(2));
    }

    #[test]
    fn rejects_duplicate_ids_across_categories() {
        let json = r#"{"a": [{"id": "star", "name": "Star"}], "b": [{"id": "star", "name": "Star 2"}]}"#;
        let err = TemplateCatalog::from_wire(wire(json)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                id: "star".into(),
                first: "a".into(),
                second: "b".into()
            }
        );
    }

    #[test]
    fn reports_malformed_category() {
        let json = r#"{"logos": {"id": "apple"}}"#;
        let err = TemplateCatalog::from_wire(wire(json)).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { category, .. } if category == "logos"));
    }

    #[test]
    fn entries_mark_selection_and_fall_back_to_question_icon() {
        let catalog = TemplateCatalog::from_wire(wire(SAMPLE)).unwrap();
        let mut selection = SelectionState::default();
        selection.set_mode(SelectionMode::Template);
        selection.select_template("nike").unwrap();

        let logos = catalog.entries("logos", &selection);
        assert_eq!(logos.len(), 2);
        assert!(!logos[0].selected);
        assert!(logos[1].selected);
        assert_eq!(logos[1].icon, "✓");

        let emojis = catalog.entries("emojis", &selection);
        assert_eq!(emojis[0].icon, FALLBACK_ICON);
    }

    #[test]
    fn unknown_category_yields_nothing() {
        let catalog = TemplateCatalog::from_wire(wire(SAMPLE)).unwrap();
        assert!(catalog.templates("animals").is_empty());
        assert!(catalog.get("missing").is_none());
    }
}
