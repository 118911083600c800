//! The single state object behind one generator screen.
//!
//! Render code receives a `&FoldingSession`; input handlers receive a
//! `&mut FoldingSession`. Nothing here performs I/O.

use crate::catalog::TemplateCatalog;
use crate::error::{ExportError, InvalidStateError, RequestError, ValidationError};
use crate::export::{ExportCoordinator, ExportRequest};
use crate::flow::{FlowOutcome, GenerationFlow, Submission, Ticket};
use crate::model::{FormGeometry, GeometryInput, PatternResult, SelectionMode};
use crate::request::PatternRequestBuilder;
use crate::selection::SelectionState;
use crate::view_model::{
    InstructionList, PatternSummary, PatternViewModel, PreviewStack, DEFAULT_PREVIEW_LIMIT,
    REFERENCE_BOOK_HEIGHT_MM,
};

/// Longest text the service accepts. Shown as a hint; the service enforces it.
pub const TEXT_CHAR_HINT: usize = 20;

/// What the text tab shows above the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPreview {
    /// Uppercased text, or `None` when the input is blank.
    pub display: Option<String>,
    pub char_count: usize,
    pub over_hint: bool,
}

#[derive(Debug)]
pub struct FoldingSession {
    catalog: TemplateCatalog,
    selection: SelectionState,
    pub geometry: GeometryInput,
    pub text: String,
    view_model: PatternViewModel,
    flow: GenerationFlow,
    preview_limit: usize,
}

impl Default for FoldingSession {
    fn default() -> Self {
        Self::new(
            FormGeometry::default(),
            DEFAULT_PREVIEW_LIMIT,
            REFERENCE_BOOK_HEIGHT_MM,
        )
    }
}

impl FoldingSession {
    pub fn new(defaults: FormGeometry, preview_limit: usize, reference_height_mm: f64) -> Self {
        Self {
            catalog: TemplateCatalog::default(),
            selection: SelectionState::default(),
            geometry: defaults.into(),
            text: String::new(),
            view_model: PatternViewModel::with_reference_height(reference_height_mm),
            flow: GenerationFlow::new(),
            preview_limit,
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn view_model(&self) -> &PatternViewModel {
        &self.view_model
    }

    pub fn flow(&self) -> &GenerationFlow {
        &self.flow
    }

    pub fn preview_limit(&self) -> usize {
        self.preview_limit
    }

    /// Install a freshly fetched catalog. Returns `true` if the current
    /// selection no longer exists and was dropped.
    pub fn set_catalog(&mut self, catalog: TemplateCatalog) -> bool {
        self.catalog = catalog;
        self.selection.reconcile(&self.catalog)
    }

    pub fn switch_tab(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
    }

    pub fn select_template(&mut self, id: &str) -> Result<(), InvalidStateError> {
        self.selection.select_template(id)
    }

    pub fn select_gallery_template(&mut self, id: &str) {
        self.selection.select_from_gallery(id);
    }

    pub fn text_preview(&self) -> TextPreview {
        let upper = self.text.to_uppercase();
        let char_count = upper.chars().count();
        TextPreview {
            display: if upper.trim().is_empty() {
                None
            } else {
                Some(upper)
            },
            char_count,
            over_hint: char_count > TEXT_CHAR_HINT,
        }
    }

    /// Validate the form and open a request.
    pub fn submit(&mut self) -> Result<Submission, ValidationError> {
        let mode = self.selection.mode();
        let geometry = &self.geometry;
        let text = self.text.as_str();
        let selected = self.selection.selected_template();
        self.flow
            .begin(|| PatternRequestBuilder::build(mode, geometry, text, selected))
    }

    pub fn complete(
        &mut self,
        ticket: Ticket,
        response: Result<PatternResult, RequestError>,
    ) -> FlowOutcome {
        self.flow.complete(ticket, response, &mut self.view_model)
    }

    pub fn cancel(&mut self) -> Option<Ticket> {
        self.flow.cancel()
    }

    /// "New pattern": drop text, selection, in-flight request and result, and
    /// go back to the text tab. Geometry is kept.
    pub fn reset_form(&mut self) -> Option<Ticket> {
        let cancelled = self.flow.cancel();
        self.text.clear();
        self.selection.clear();
        self.selection.set_mode(SelectionMode::Text);
        self.view_model.clear();
        cancelled
    }

    pub fn prepare_export(&self) -> Result<ExportRequest, ExportError> {
        ExportCoordinator::prepare(&self.view_model)
    }

    pub fn preview_stack(&self) -> PreviewStack<'_> {
        self.view_model.preview_stack(self.preview_limit)
    }

    pub fn instruction_list(&self) -> InstructionList<'_> {
        self.view_model.instruction_list()
    }

    pub fn summary(&self) -> Option<PatternSummary> {
        self.view_model.summary(self.preview_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fold, PatternStatistics, Template};
    use crate::request::Endpoint;
    use serde_json::Map;

    fn catalog() -> TemplateCatalog {
        let t = |id: &str| Template {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            category: String::new(),
        };
        TemplateCatalog::from_groups([
            ("logos".to_string(), vec![t("apple"), t("nike")]),
            ("symbols".to_string(), vec![t("heart")]),
        ])
        .unwrap()
    }

    fn five_folds() -> PatternResult {
        PatternResult {
            folds: (1..=5)
                .map(|i| Fold {
                    page: i * 2,
                    start_mm: 30.0,
                    end_mm: 120.0,
                    depth_mm: 14.0,
                })
                .collect(),
            statistics: PatternStatistics {
                total_folds: 5,
                pages_used: 5,
                estimated_time_minutes: 10.0,
                text: Some("HELLO".into()),
                template_id: None,
            },
            book_specs: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn hello_scenario_routes_and_renders_five_folds() {
        let mut session = FoldingSession::new(
            FormGeometry {
                pages: 200,
                height_mm: 200.0,
                page_width_mm: 140.0,
                width_mm: 20.0,
            },
            10,
            200.0,
        );
        session.text = "HELLO".into();
        let submission = session.submit().unwrap();
        assert_eq!(submission.planned.endpoint, Endpoint::GeneratePattern);
        let body = serde_json::to_value(&submission.planned.request).unwrap();
        assert_eq!(body["text"], "HELLO");
        assert_eq!(body["book_pages"], 200);

        let outcome = session.complete(submission.ticket, Ok(five_folds()));
        assert_eq!(outcome, FlowOutcome::Applied { folds: 5 });
        assert_eq!(session.instruction_list().len(), 5);
        assert_eq!(session.preview_stack().len(), 5);
    }

    #[test]
    fn template_tab_without_selection_is_rejected() {
        let mut session = FoldingSession::default();
        session.set_catalog(catalog());
        session.switch_tab(SelectionMode::Template);
        assert_eq!(
            session.submit().unwrap_err(),
            ValidationError::NoTemplateSelected
        );
        assert!(!session.flow().is_requesting());
    }

    #[test]
    fn gallery_selection_submits_template_request() {
        let mut session = FoldingSession::default();
        session.set_catalog(catalog());
        session.select_gallery_template("heart");
        let submission = session.submit().unwrap();
        assert_eq!(submission.planned.endpoint, Endpoint::GenerateTemplatePattern);
    }

    #[test]
    fn catalog_reload_drops_vanished_selection() {
        let mut session = FoldingSession::default();
        session.set_catalog(catalog());
        session.select_gallery_template("nike");
        let reduced = TemplateCatalog::from_groups([(
            "logos".to_string(),
            vec![Template {
                id: "apple".into(),
                name: "Apple".into(),
                description: String::new(),
                category: String::new(),
            }],
        )])
        .unwrap();
        assert!(session.set_catalog(reduced));
        assert_eq!(session.selection().selected_template(), None);
    }

    #[test]
    fn reset_form_clears_everything_but_geometry() {
        let mut session = FoldingSession::default();
        session.geometry.pages = "320".into();
        session.text = "LOVE".into();
        let submission = session.submit().unwrap();
        session.complete(submission.ticket, Ok(five_folds()));
        session.select_gallery_template("heart");

        session.reset_form();
        assert!(session.text.is_empty());
        assert_eq!(session.mode(), SelectionMode::Text);
        assert_eq!(session.selection().selected_template(), None);
        assert!(session.instruction_list().is_absent());
        assert_eq!(session.geometry.pages, "320");
        assert_eq!(
            session.prepare_export().unwrap_err(),
            ExportError::NoCurrentPattern
        );
    }

    #[test]
    fn reset_cancels_in_flight_request() {
        let mut session = FoldingSession::default();
        session.text = "HI".into();
        let submission = session.submit().unwrap();
        assert_eq!(session.reset_form(), Some(submission.ticket));
        assert_eq!(
            session.complete(submission.ticket, Ok(five_folds())),
            FlowOutcome::Stale
        );
        assert!(session.view_model().current().is_none());
    }

    #[test]
    fn text_preview_uppercases_and_counts() {
        let mut session = FoldingSession::default();
        assert_eq!(session.text_preview().display, None);
        session.text = "hello".into();
        let preview = session.text_preview();
        assert_eq!(preview.display.as_deref(), Some("HELLO"));
        assert_eq!(preview.char_count, 5);
        assert!(!preview.over_hint);

        session.text = "a".repeat(TEXT_CHAR_HINT + 1);
        assert!(session.text_preview().over_hint);
    }

    #[test]
    fn export_before_generation_fails() {
        let session = FoldingSession::default();
        assert_eq!(
            session.prepare_export().unwrap_err(),
            ExportError::NoCurrentPattern
        );
    }
}
