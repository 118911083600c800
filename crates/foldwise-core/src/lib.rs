//! Core domain model and contracts for Foldwise.
//!
//! Everything in this crate is pure state and validation. Network access lives
//! behind [`backend::PatternBackend`], implemented by the adapters crate.

pub mod backend;
pub mod catalog;
pub mod error;
pub mod export;
pub mod flow;
pub mod model;
pub mod request;
pub mod selection;
pub mod session;
pub mod view_model;

pub use backend::PatternBackend;
pub use catalog::{TemplateCatalog, TemplateEntry};
pub use error::{
    CatalogError, ExportError, GeometryField, InvalidStateError, RequestError, ValidationError,
};
pub use export::{ExportCoordinator, ExportRequest};
pub use flow::{FlowOutcome, FlowState, GenerationFlow, Submission, Ticket};
pub use model::{
    BookSpecs, ExportedInstructions, Fold, FormGeometry, GeometryInput, PatternResult,
    PatternStatistics, SelectionMode, Template,
};
pub use request::{Endpoint, PatternPayload, PatternRequest, PatternRequestBuilder, PlannedRequest};
pub use selection::SelectionState;
pub use session::{FoldingSession, TextPreview, TEXT_CHAR_HINT};
pub use view_model::{
    InstructionList, InstructionStep, PatternSummary, PatternViewModel, PreviewEntry,
    PreviewStack, DEFAULT_PREVIEW_LIMIT, REFERENCE_BOOK_HEIGHT_MM,
};
