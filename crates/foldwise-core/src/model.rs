//! Data model and wire shapes of the pattern service.

use crate::error::{GeometryField, RequestError, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ═══════════════════════════════════════════════════════════════════════════
//  TEMPLATES
// ═══════════════════════════════════════════════════════════════════════════

/// A predefined shape selectable instead of free text.
///
/// The wire form has no `category`; [`crate::TemplateCatalog`] fills it in
/// from the key of the map the template arrived under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

// ═══════════════════════════════════════════════════════════════════════════
//  INPUT MODE AND GEOMETRY
// ═══════════════════════════════════════════════════════════════════════════

/// Which input tab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Text,
    Template,
}

impl SelectionMode {
    pub fn label(&self) -> &'static str {
        match self {
            SelectionMode::Text => "Text",
            SelectionMode::Template => "Template",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            SelectionMode::Text => SelectionMode::Template,
            SelectionMode::Template => SelectionMode::Text,
        }
    }
}

/// Validated book dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormGeometry {
    pub pages: u32,
    pub height_mm: f64,
    pub page_width_mm: f64,
    pub width_mm: f64,
}

impl Default for FormGeometry {
    fn default() -> Self {
        Self {
            pages: 400,
            height_mm: 200.0,
            page_width_mm: 140.0,
            width_mm: 15.0,
        }
    }
}

impl FormGeometry {
    /// Parse raw form text. Fields are checked in form order and the first bad
    /// one is reported.
    pub fn parse(input: &GeometryInput) -> Result<Self, ValidationError> {
        let pages = parse_pages(&input.pages)?;
        let height_mm = parse_positive(&input.height_mm, GeometryField::Height)?;
        let page_width_mm = parse_positive(&input.page_width_mm, GeometryField::PageWidth)?;
        let width_mm = parse_positive(&input.width_mm, GeometryField::Width)?;
        Ok(Self {
            pages,
            height_mm,
            page_width_mm,
            width_mm,
        })
    }

    /// Re-check an already numeric geometry (NaN and non-positive values).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pages == 0 {
            return Err(ValidationError::InvalidGeometry {
                field: GeometryField::Pages,
            });
        }
        for (field, value) in [
            (GeometryField::Height, self.height_mm),
            (GeometryField::PageWidth, self.page_width_mm),
            (GeometryField::Width, self.width_mm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::InvalidGeometry { field });
            }
        }
        Ok(())
    }
}

fn parse_pages(raw: &str) -> Result<u32, ValidationError> {
    let invalid = ValidationError::InvalidGeometry {
        field: GeometryField::Pages,
    };
    let trimmed = raw.trim();
    if let Ok(pages) = trimmed.parse::<u32>() {
        return if pages > 0 { Ok(pages) } else { Err(invalid) };
    }
    // Accept "200.0" from numeric widgets, but not fractional page counts.
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 1.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => {
            Ok(v as u32)
        }
        _ => Err(invalid),
    }
}

fn parse_positive(raw: &str, field: GeometryField) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ValidationError::InvalidGeometry { field }),
    }
}

/// Raw, editable form text for the four geometry fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryInput {
    pub pages: String,
    pub height_mm: String,
    pub page_width_mm: String,
    pub width_mm: String,
}

impl GeometryInput {
    pub fn field(&self, field: GeometryField) -> &str {
        match field {
            GeometryField::Pages => &self.pages,
            GeometryField::Height => &self.height_mm,
            GeometryField::PageWidth => &self.page_width_mm,
            GeometryField::Width => &self.width_mm,
        }
    }

    pub fn field_mut(&mut self, field: GeometryField) -> &mut String {
        match field {
            GeometryField::Pages => &mut self.pages,
            GeometryField::Height => &mut self.height_mm,
            GeometryField::PageWidth => &mut self.page_width_mm,
            GeometryField::Width => &mut self.width_mm,
        }
    }
}

impl From<FormGeometry> for GeometryInput {
    fn from(g: FormGeometry) -> Self {
        Self {
            pages: g.pages.to_string(),
            height_mm: format_mm(g.height_mm),
            page_width_mm: format_mm(g.page_width_mm),
            width_mm: format_mm(g.width_mm),
        }
    }
}

impl Default for GeometryInput {
    fn default() -> Self {
        FormGeometry::default().into()
    }
}

/// Format a millimetre value without a trailing `.0`.
pub fn format_mm(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  PATTERN RESULT
// ═══════════════════════════════════════════════════════════════════════════

/// One page-bend instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fold {
    pub page: u32,
    pub start_mm: f64,
    pub end_mm: f64,
    pub depth_mm: f64,
}

impl Fold {
    /// `0 <= start < end`, all finite.
    pub fn is_well_formed(&self) -> bool {
        self.start_mm.is_finite()
            && self.end_mm.is_finite()
            && self.start_mm >= 0.0
            && self.start_mm < self.end_mm
    }

    pub fn span_mm(&self) -> f64 {
        self.end_mm - self.start_mm
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternStatistics {
    pub total_folds: usize,
    pub pages_used: usize,
    pub estimated_time_minutes: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

/// Book dimensions echoed back by the service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BookSpecs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// A successful generation response.
///
/// Fields the client does not model are kept in `extra` so the result can be
/// forwarded to `/export_pattern` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    #[serde(rename = "pattern")]
    pub folds: Vec<Fold>,
    pub statistics: PatternStatistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_specs: Option<BookSpecs>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PatternResult {
    /// Decode a response body and check every fold.
    pub fn from_json(body: &str) -> Result<Self, RequestError> {
        let result: PatternResult =
            serde_json::from_str(body).map_err(|e| RequestError::Decode(e.to_string()))?;
        result.check_folds()?;
        Ok(result)
    }

    pub fn check_folds(&self) -> Result<(), RequestError> {
        match self.folds.iter().position(|f| !f.is_well_formed()) {
            Some(idx) => {
                let fold = &self.folds[idx];
                Err(RequestError::Decode(format!(
                    "fold {} on page {} has start {}mm and end {}mm",
                    idx + 1,
                    fold.page,
                    fold.start_mm,
                    fold.end_mm
                )))
            }
            None => Ok(()),
        }
    }

    /// The text or template the pattern was made from, when the service said.
    pub fn subject(&self) -> Option<&str> {
        self.statistics
            .text
            .as_deref()
            .or(self.statistics.template_id.as_deref())
    }
}

/// Response of `/export_pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedInstructions {
    pub instructions: String,
    pub filename: String,
}
