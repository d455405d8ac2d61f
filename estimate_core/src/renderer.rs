//! # Result Renderer
//!
//! Loads the stored response once and settles in a terminal state:
//!
//! ```text
//! Idle -> Loading -> NoData
//!                 -> ParseFailure(reason)
//!                 -> Ready(report)
//! ```
//!
//! There is no retry transition; a new estimate means a new renderer.

use tracing::{info, warn};

use crate::errors::EstimateError;
use crate::layout::ReportLayout;
use crate::normalize::{normalize, Document};
use crate::report::Report;
use crate::session::EstimationHandoff;

/// Renderer lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum RenderState {
    Idle,
    Loading,
    /// Nothing was stored for this session
    NoData,
    /// The stored text could not be normalized
    ParseFailure(String),
    Ready(Box<RenderedReport>),
}

/// A successfully loaded report together with its source document
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub document: Document,
    pub report: Report,
}

impl RenderState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RenderState::Idle | RenderState::Loading)
    }

    /// The failure behind a terminal error state, if any
    pub fn error(&self) -> Option<EstimateError> {
        match self {
            RenderState::NoData => Some(EstimateError::NoData),
            RenderState::ParseFailure(reason) => Some(EstimateError::parse_failure(reason.clone())),
            _ => None,
        }
    }
}

/// Report view controller: one load per instance.
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    layout: ReportLayout,
    state: RenderState,
}

impl ResultRenderer {
    pub fn new(layout: ReportLayout) -> Self {
        ResultRenderer {
            layout,
            state: RenderState::Idle,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    pub fn report(&self) -> Option<&Report> {
        match &self.state {
            RenderState::Ready(rendered) => Some(&rendered.report),
            _ => None,
        }
    }

    /// Read the stored text and settle. Ignored once the renderer has loaded.
    pub fn load(&mut self, stored: Option<&str>) -> &RenderState {
        if self.state != RenderState::Idle {
            warn!("renderer already loaded; ignoring repeated load");
            return &self.state;
        }
        self.state = RenderState::Loading;

        self.state = match stored {
            None => {
                warn!("no estimation data stored");
                RenderState::NoData
            }
            Some(raw) => match normalize(raw) {
                Ok(document) => {
                    let report = Report::project(&document, &self.layout);
                    info!(
                        title = %report.title,
                        sections = report.sections.len(),
                        "estimation report ready"
                    );
                    RenderState::Ready(Box::new(RenderedReport { document, report }))
                }
                Err(e) => {
                    warn!(error = %e, "failed to parse estimation data");
                    RenderState::ParseFailure(e.to_string())
                }
            },
        };
        &self.state
    }

    /// Load straight from a session handoff
    pub fn load_handoff(&mut self, handoff: Option<EstimationHandoff>) -> &RenderState {
        let raw = handoff.map(|h| h.raw);
        self.load(raw.as_deref())
    }
}

impl Default for ResultRenderer {
    fn default() -> Self {
        ResultRenderer::new(ReportLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SectionKind;
    use crate::session::SessionSlot;

    #[test]
    fn test_no_stored_value_reaches_no_data() {
        let mut renderer = ResultRenderer::default();
        assert_eq!(renderer.state(), &RenderState::Idle);
        assert_eq!(renderer.load(None), &RenderState::NoData);
        assert_eq!(renderer.state().error(), Some(EstimateError::NoData));
    }

    #[test]
    fn test_not_json_reaches_parse_failure() {
        let mut renderer = ResultRenderer::default();
        let state = renderer.load(Some("not json")).clone();
        let RenderState::ParseFailure(reason) = &state else {
            panic!("expected parse failure, got {:?}", state);
        };
        assert!(reason.contains("invalid JSON"));
        assert!(state.is_terminal());

        let mut quoted = ResultRenderer::default();
        assert!(matches!(quoted.load(Some("\"not json\"")), RenderState::ParseFailure(_)));
    }

    #[test]
    fn test_wrapped_output_reaches_ready() {
        let mut renderer = ResultRenderer::default();
        let inner = serde_json::json!({
            "overview": {"projectName": "X", "workingDays": 10},
            "workingDays": 20
        });
        let raw = serde_json::json!([{ "output": inner.to_string() }]).to_string();
        renderer.load(Some(&raw));

        let report = renderer.report().unwrap();
        assert_eq!(report.title, "X");
        assert!(report.section(SectionKind::Overview).is_some());

        let RenderState::Ready(rendered) = renderer.state() else {
            panic!("expected ready state");
        };
        assert_eq!(rendered.document["overview"]["projectName"], "X");
    }

    #[test]
    fn test_terminal_states_do_not_reload() {
        let mut renderer = ResultRenderer::default();
        renderer.load(None);
        renderer.load(Some(r#"{"projectName": "Late"}"#));
        assert_eq!(renderer.state(), &RenderState::NoData);
    }

    #[test]
    fn test_load_from_session_slot() {
        let mut slot = SessionSlot::new();
        let raw = r#"{"projectName": "Slot", "risks": ["Vendor delay"]}"#;
        slot.store(EstimationHandoff::new(200, raw));

        let mut renderer = ResultRenderer::new(ReportLayout::summary());
        renderer.load_handoff(slot.take());
        assert_eq!(renderer.report().unwrap().title, "Slot");
        assert!(slot.is_empty());

        let mut second = ResultRenderer::default();
        assert_eq!(second.load_handoff(slot.take()), &RenderState::NoData);
    }
}
