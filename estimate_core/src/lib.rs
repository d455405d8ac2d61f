//! # estimate_core - Design Effort Estimation Engine
//!
//! `estimate_core` holds everything behind the design estimator front-ends:
//! the intake form state, the webhook client, the session handoff, and the
//! projection of whatever JSON the estimation service returns into a report.
//!
//! ## Design Philosophy
//!
//! - **UI-agnostic**: the GUI and CLI drive the same state machines
//! - **JSON-First**: requests and reports implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Tolerant reading**: absent report fields are shown as absent, never invented
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::form::{Field, IntakeForm};
//! use estimate_core::renderer::{RenderState, ResultRenderer};
//!
//! let mut form = IntakeForm::new();
//! form.update_field(Field::ProjectName, "Atlas");
//! form.update_field(Field::UniqueEasy, "4");
//! assert_eq!(form.request().screen_count, 4);
//!
//! let mut renderer = ResultRenderer::default();
//! renderer.load(Some(r#"[{"output": "{\"projectName\":\"Atlas\"}"}]"#));
//! assert!(matches!(renderer.state(), RenderState::Ready(_)));
//! ```
//!
//! ## Modules
//!
//! - [`request`] - Wire request and its vocabularies
//! - [`form`] - Intake form state and submission lifecycle
//! - [`client`] - Estimation webhook client
//! - [`session`] - Handoff between the form and the report
//! - [`normalize`] - Response unwrapping and the merged view
//! - [`report`] - Projection of a document into report sections
//! - [`layout`] - Report layouts and themes
//! - [`renderer`] - Report loading state machine
//! - [`routes`] - Screens and their paths
//! - [`config`] - Configuration file and environment
//! - [`file_io`] - Saved responses and request files
//! - [`logging`] - Tracing setup
//! - [`errors`] - Structured error types

pub mod client;
pub mod config;
pub mod errors;
pub mod file_io;
pub mod form;
pub mod layout;
pub mod logging;
pub mod normalize;
pub mod renderer;
pub mod report;
pub mod request;
pub mod routes;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use client::EstimationClient;
pub use config::EstimatorConfig;
pub use errors::{EstimateError, EstimateResult};
pub use form::{Field, IntakeForm};
pub use layout::{LayoutPreset, ReportLayout};
pub use renderer::{RenderState, ResultRenderer};
pub use request::EstimationRequest;
pub use routes::Route;
pub use session::{EstimationHandoff, SessionSlot};
