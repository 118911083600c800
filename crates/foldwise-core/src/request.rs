//! Validation and routing of generation requests.

use crate::error::ValidationError;
use crate::model::{FormGeometry, GeometryInput, SelectionMode};
use serde::{Serialize, Serializer};

/// The four calls of the pattern service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetTemplates,
    GeneratePattern,
    GenerateTemplatePattern,
    ExportPattern,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::GetTemplates => "get_templates",
            Endpoint::GeneratePattern => "generate_pattern",
            Endpoint::GenerateTemplatePattern => "generate_template_pattern",
            Endpoint::ExportPattern => "export_pattern",
        }
    }

    pub fn is_post(&self) -> bool {
        !matches!(self, Endpoint::GetTemplates)
    }

    /// Generation endpoint for a mode. Pure function of the mode.
    pub fn for_mode(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Text => Endpoint::GeneratePattern,
            SelectionMode::Template => Endpoint::GenerateTemplatePattern,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternPayload {
    Text { text: String },
    Template { template_id: String },
}

/// One generation attempt. Built fresh per submit.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRequest {
    pub geometry: FormGeometry,
    pub payload: PatternPayload,
}

#[derive(Serialize)]
struct WireBody<'a> {
    book_pages: u32,
    book_height: f64,
    book_page_width: f64,
    book_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_id: Option<&'a str>,
}

impl Serialize for PatternRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (text, template_id) = match &self.payload {
            PatternPayload::Text { text } => (Some(text.as_str()), None),
            PatternPayload::Template { template_id } => (None, Some(template_id.as_str())),
        };
        WireBody {
            book_pages: self.geometry.pages,
            book_height: self.geometry.height_mm,
            book_page_width: self.geometry.page_width_mm,
            book_width: self.geometry.width_mm,
            text,
            template_id,
        }
        .serialize(serializer)
    }
}

impl PatternRequest {
    pub fn mode(&self) -> SelectionMode {
        match self.payload {
            PatternPayload::Text { .. } => SelectionMode::Text,
            PatternPayload::Template { .. } => SelectionMode::Template,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::for_mode(self.mode())
    }
}

/// A validated request together with the endpoint it must go to.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRequest {
    pub endpoint: Endpoint,
    pub request: PatternRequest,
}

/// Turns form state into a [`PlannedRequest`].
pub struct PatternRequestBuilder;

impl PatternRequestBuilder {
    /// Rules, in order: geometry, then text (Text mode) or selection
    /// (Template mode). No side effects.
    pub fn build(
        mode: SelectionMode,
        geometry: &GeometryInput,
        text: &str,
        selected_template: Option<&str>,
    ) -> Result<PlannedRequest, ValidationError> {
        let geometry = FormGeometry::parse(geometry)?;
        Self::build_with_geometry(mode, geometry, text, selected_template)
    }

    /// Same rules for callers that already hold numbers (CLI flags).
    pub fn build_with_geometry(
        mode: SelectionMode,
        geometry: FormGeometry,
        text: &str,
        selected_template: Option<&str>,
    ) -> Result<PlannedRequest, ValidationError> {
        geometry.validate()?;
        let payload = match mode {
            SelectionMode::Text => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(ValidationError::EmptyText);
                }
                PatternPayload::Text {
                    text: text.to_string(),
                }
            }
            SelectionMode::Template => match selected_template {
                Some(id) if !id.trim().is_empty() => PatternPayload::Template {
                    template_id: id.to_string(),
                },
                _ => return Err(ValidationError::NoTemplateSelected),
            },
        };
        Ok(PlannedRequest {
            endpoint: Endpoint::for_mode(mode),
            request: PatternRequest { geometry, payload },
        })
    }
}
