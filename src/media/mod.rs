//! Media-specific logic: classification, capture dates, and folder templates.

pub mod classify;
pub mod date;
pub mod template;

pub use classify::{Classification, MediaCatalog};
pub use date::{CaptureTimeReader, DateError, ExifTool, ResolvedTimestamp, TimestampOrigin};
pub use template::{FolderTemplate, TemplateError, TemplateVars};
