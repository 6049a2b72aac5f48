// Document export: plain-text plan download and the PDF report.
// PDF rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

#[cfg(feature = "pdf")]
pub mod pdf;
pub mod text;
pub mod wrap;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::errors::AppError;
use crate::models::{IdeaText, PlanResult, RoastResult};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("{0}")]
    #[cfg_attr(feature = "pdf", allow(dead_code))]
    Unavailable(String),

    #[error("PDF writer failed: {0}")]
    Pdf(String),
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Unavailable(msg) => AppError::ExportUnavailable(msg),
            ExportError::Pdf(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Everything that goes into the report, owned so it can cross into a blocking task.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub idea: IdeaText,
    pub roast: RoastResult,
    pub plan: PlanResult,
    pub generated_at: DateTime<Utc>,
}

/// Renders a finished report to bytes in a fixed page-layout format.
pub trait DocumentExporter: Send + Sync {
    /// False when this build cannot produce documents; the page hides the button.
    fn is_available(&self) -> bool;

    fn export(&self, report: &ReportDocument) -> Result<Vec<u8>, ExportError>;
}

/// Stand-in used when the crate is built without a document backend.
#[cfg_attr(feature = "pdf", allow(dead_code))]
pub struct UnavailableExporter;

impl DocumentExporter for UnavailableExporter {
    fn is_available(&self) -> bool {
        false
    }

    fn export(&self, _report: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::Unavailable(
            "PDF export is not available in this build.".to_string(),
        ))
    }
}

/// The exporter this build ships with.
pub fn default_exporter() -> Arc<dyn DocumentExporter> {
    #[cfg(feature = "pdf")]
    {
        Arc::new(pdf::PdfExporter)
    }
    #[cfg(not(feature = "pdf"))]
    {
        Arc::new(UnavailableExporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_exporter_maps_to_export_unavailable() {
        let report = ReportDocument {
            idea: IdeaText::parse("x").unwrap(),
            roast: RoastResult {
                roast: "r".into(),
                score: 1,
                action: "a".into(),
                degraded: false,
                degraded_reason: None,
            },
            plan: PlanResult {
                plan_text: "p".into(),
                degraded: false,
            },
            generated_at: Utc::now(),
        };
        let exporter = UnavailableExporter;
        assert!(!exporter.is_available());
        let err: AppError = exporter.export(&report).unwrap_err().into();
        assert_eq!(err.code(), "EXPORT_UNAVAILABLE");
    }

    #[test]
    fn test_default_exporter_matches_feature() {
        assert_eq!(default_exporter().is_available(), cfg!(feature = "pdf"));
    }
}
