//! Presentation views over the current pattern.
//!
//! The view model stores one [`PatternResult`]. Both the preview stack and the
//! instruction list borrow its fold slice, so they cannot drift apart, and
//! both can be re-iterated any number of times.

use crate::model::{Fold, PatternResult};
use chrono::{DateTime, Utc};

/// Folds drawn in the book preview when no limit is configured.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Book height the preview proportions are drawn against.
pub const REFERENCE_BOOK_HEIGHT_MM: f64 = 200.0;

#[derive(Debug, Clone, PartialEq)]
struct CurrentPattern {
    result: PatternResult,
    ingested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternViewModel {
    current: Option<CurrentPattern>,
    reference_height_mm: f64,
}

impl Default for PatternViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternViewModel {
    pub fn new() -> Self {
        Self {
            current: None,
            reference_height_mm: REFERENCE_BOOK_HEIGHT_MM,
        }
    }

    /// Non-finite or non-positive heights fall back to the 200mm reference.
    pub fn with_reference_height(reference_height_mm: f64) -> Self {
        let reference_height_mm = if reference_height_mm.is_finite() && reference_height_mm > 0.0
        {
            reference_height_mm
        } else {
            REFERENCE_BOOK_HEIGHT_MM
        };
        Self {
            current: None,
            reference_height_mm,
        }
    }

    pub fn reference_height_mm(&self) -> f64 {
        self.reference_height_mm
    }

    /// Replace the current result. The last ingested result always wins.
    pub fn ingest(&mut self, result: PatternResult) {
        tracing::debug!(folds = result.folds.len(), "pattern ingested");
        self.current = Some(CurrentPattern {
            result,
            ingested_at: Utc::now(),
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&PatternResult> {
        self.current.as_ref().map(|c| &c.result)
    }

    pub fn has_result(&self) -> bool {
        self.current.is_some()
    }

    pub fn ingested_at(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().map(|c| c.ingested_at)
    }

    pub fn preview_stack(&self, limit: usize) -> PreviewStack<'_> {
        match self.current() {
            None => PreviewStack::Empty,
            Some(result) => PreviewStack::Folds {
                folds: &result.folds,
                limit,
                reference_height_mm: self.reference_height_mm,
            },
        }
    }

    pub fn instruction_list(&self) -> InstructionList<'_> {
        match self.current() {
            None => InstructionList::Empty,
            Some(result) => InstructionList::Steps(&result.folds),
        }
    }

    pub fn summary(&self, preview_limit: usize) -> Option<PatternSummary> {
        let result = self.current()?;
        Some(PatternSummary {
            total_folds: result.statistics.total_folds,
            pages_used: result.statistics.pages_used,
            estimated_time_minutes: result.statistics.estimated_time_minutes,
            shown_in_preview: result.folds.len().min(preview_limit),
            subject: result.subject().map(str::to_string),
        })
    }
}

/// Header numbers for a result.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSummary {
    pub total_folds: usize,
    pub pages_used: usize,
    pub estimated_time_minutes: f64,
    pub shown_in_preview: usize,
    pub subject: Option<String>,
}

/// One page of the preview book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewEntry {
    pub fold: Fold,
    pub stack_index: usize,
    /// Folded span as a share of the reference height.
    pub depth_percent: f64,
    /// Where the folded span starts, as a share of the reference height.
    pub offset_percent: f64,
}

/// The first `limit` folds, sized for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewStack<'a> {
    /// No pattern has been ingested (or it was cleared).
    Empty,
    Folds {
        folds: &'a [Fold],
        limit: usize,
        reference_height_mm: f64,
    },
}

impl<'a> PreviewStack<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, PreviewStack::Empty)
    }

    fn visible(&self) -> &'a [Fold] {
        match *self {
            PreviewStack::Empty => &[],
            PreviewStack::Folds { folds, limit, .. } => &folds[..folds.len().min(limit)],
        }
    }

    pub fn len(&self) -> usize {
        self.visible().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_folds(&self) -> usize {
        match self {
            PreviewStack::Empty => 0,
            PreviewStack::Folds { folds, .. } => folds.len(),
        }
    }

    /// Folds left out of the preview.
    pub fn hidden_count(&self) -> usize {
        self.total_folds() - self.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = PreviewEntry> + 'a {
        let reference = match *self {
            PreviewStack::Empty => REFERENCE_BOOK_HEIGHT_MM,
            PreviewStack::Folds {
                reference_height_mm,
                ..
            } => reference_height_mm,
        };
        self.visible()
            .iter()
            .enumerate()
            .map(move |(stack_index, fold)| PreviewEntry {
                fold: *fold,
                stack_index,
                depth_percent: fold.span_mm() / reference * 100.0,
                offset_percent: fold.start_mm / reference * 100.0,
            })
    }
}

/// One numbered step of the full instruction list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstructionStep {
    pub step_number: usize,
    pub fold: Fold,
}

/// Every fold, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstructionList<'a> {
    Empty,
    Steps(&'a [Fold]),
}

impl<'a> InstructionList<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, InstructionList::Empty)
    }

    fn folds(&self) -> &'a [Fold] {
        match *self {
            InstructionList::Empty => &[],
            InstructionList::Steps(folds) => folds,
        }
    }

    pub fn len(&self) -> usize {
        self.folds().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = InstructionStep> + 'a {
        self.folds()
            .iter()
            .enumerate()
            .map(|(idx, fold)| InstructionStep {
                step_number: idx + 1,
                fold: *fold,
            })
    }

    /// Steps `[start, start + count)`, for scrolled rendering.
    pub fn window(&self, start: usize, count: usize) -> impl Iterator<Item = InstructionStep> + 'a {
        self.iter().skip(start).take(count)
    }
}
