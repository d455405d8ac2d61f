//! # Intake Form
//!
//! Editable form state behind both front-ends. Every edit goes through
//! [`IntakeForm::update_field`], which picks an update strategy from the
//! field's kind and keeps `screen_count` equal to the six per-complexity
//! counts.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::form::{Field, FieldValue, IntakeForm};
//!
//! let mut form = IntakeForm::new();
//! form.update_field(Field::UniqueEasy, FieldValue::text("3"));
//! form.update_field(Field::OtherComplex, FieldValue::text("2"));
//! assert_eq!(form.request().screen_count, 5);
//!
//! // Non-numeric input is normalized, never rejected
//! form.update_field(Field::UniqueMedium, FieldValue::text("lots"));
//! assert_eq!(form.request().unique_medium, 0);
//! ```

use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::errors::{EstimateError, EstimateResult};
use crate::request::{
    EstimationRequest, Phase, Platform, YesNo, TIMELINE_WEEKS_MAX, TIMELINE_WEEKS_MIN,
};
use crate::session::EstimationHandoff;

// ============================================================================
// FIELDS
// ============================================================================

/// Addressable form fields, named after their wire keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProjectName,
    Platform,
    Features,
    EstimateScreens,
    UniqueEasy,
    UniqueMedium,
    UniqueComplex,
    OtherEasy,
    OtherMedium,
    OtherComplex,
    ScreenCount,
    Domain,
    Industry,
    Phases,
    Branding,
    Accessibility,
    Multilingual,
    Timeline,
    Notes,
}

/// How an incoming value is applied to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Membership toggle in the platform set
    PlatformSet,
    /// Membership toggle in the ordered phase list
    PhaseList,
    /// Replaced by the new boolean
    Boolean,
    /// Coerced to a non-negative integer
    Numeric,
    /// Yes/No select
    Choice,
    /// Stored verbatim
    Text,
}

impl Field {
    /// Every field in form order
    pub const ALL: [Field; 19] = [
        Field::ProjectName,
        Field::Platform,
        Field::Features,
        Field::EstimateScreens,
        Field::UniqueEasy,
        Field::UniqueMedium,
        Field::UniqueComplex,
        Field::OtherEasy,
        Field::OtherMedium,
        Field::OtherComplex,
        Field::ScreenCount,
        Field::Domain,
        Field::Industry,
        Field::Phases,
        Field::Branding,
        Field::Accessibility,
        Field::Multilingual,
        Field::Timeline,
        Field::Notes,
    ];

    /// The six addends of `screenCount`
    pub const SCREEN_COUNTS: [Field; 6] = [
        Field::UniqueEasy,
        Field::UniqueMedium,
        Field::UniqueComplex,
        Field::OtherEasy,
        Field::OtherMedium,
        Field::OtherComplex,
    ];

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Platform => FieldKind::PlatformSet,
            Field::Phases => FieldKind::PhaseList,
            Field::EstimateScreens => FieldKind::Boolean,
            Field::UniqueEasy
            | Field::UniqueMedium
            | Field::UniqueComplex
            | Field::OtherEasy
            | Field::OtherMedium
            | Field::OtherComplex
            | Field::ScreenCount
            | Field::Timeline => FieldKind::Numeric,
            Field::Branding | Field::Accessibility | Field::Multilingual => FieldKind::Choice,
            Field::ProjectName
            | Field::Features
            | Field::Domain
            | Field::Industry
            | Field::Notes => FieldKind::Text,
        }
    }

    /// Wire key (camelCase)
    pub fn name(&self) -> &'static str {
        match self {
            Field::ProjectName => "projectName",
            Field::Platform => "platform",
            Field::Features => "features",
            Field::EstimateScreens => "estimateScreens",
            Field::UniqueEasy => "uniqueEasy",
            Field::UniqueMedium => "uniqueMedium",
            Field::UniqueComplex => "uniqueComplex",
            Field::OtherEasy => "otherEasy",
            Field::OtherMedium => "otherMedium",
            Field::OtherComplex => "otherComplex",
            Field::ScreenCount => "screenCount",
            Field::Domain => "domain",
            Field::Industry => "industry",
            Field::Phases => "phases",
            Field::Branding => "branding",
            Field::Accessibility => "accessibility",
            Field::Multilingual => "multilingual",
            Field::Timeline => "timeline",
            Field::Notes => "notes",
        }
    }

    /// Human label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::ProjectName => "Project Name *",
            Field::Platform => "Platform",
            Field::Features => "Key Features",
            Field::EstimateScreens => "Auto Estimate Number of Screens",
            Field::UniqueEasy | Field::OtherEasy => "Low",
            Field::UniqueMedium | Field::OtherMedium => "Medium",
            Field::UniqueComplex | Field::OtherComplex => "High",
            Field::ScreenCount => "Total Screens",
            Field::Domain => "Domain",
            Field::Industry => "Industry",
            Field::Phases => "Design Phases",
            Field::Branding => "Branding Required?",
            Field::Accessibility => "Accessibility Support?",
            Field::Multilingual => "Multilingual Support?",
            Field::Timeline => "Expected Timeline (weeks)",
            Field::Notes => "Client Notes",
        }
    }

    pub fn is_screen_count(&self) -> bool {
        Field::SCREEN_COUNTS.contains(self)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| format!("unknown field '{}'", s))
    }
}

/// A raw value coming from an input widget or prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Bool(b) => b.to_string(),
        }
    }

    fn as_bool(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "yes" | "y"
            ),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// Coerce raw numeric input to a non-negative integer.
///
/// Blank, non-numeric, negative and non-finite input all become 0; fractions
/// are truncated.
pub fn coerce_count(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

// ============================================================================
// FORM
// ============================================================================

/// Inline message shown under the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Error(String),
    Info(String),
}

impl FormMessage {
    pub fn text(&self) -> &str {
        match self {
            FormMessage::Error(s) | FormMessage::Info(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FormMessage::Error(_))
    }
}

/// Intake form state: the request being edited plus submission status.
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    request: EstimationRequest,
    submitting: bool,
    message: Option<FormMessage>,
}

impl IntakeForm {
    /// Fresh form with default selections
    pub fn new() -> Self {
        IntakeForm::default()
    }

    /// Start from an existing request (e.g. loaded from a file); `screen_count`
    /// is recomputed from the counts.
    pub fn from_request(mut request: EstimationRequest) -> Self {
        request.dedupe_selections();
        request.screen_count = request.screen_total();
        IntakeForm {
            request,
            submitting: false,
            message: None,
        }
    }

    pub fn request(&self) -> &EstimationRequest {
        &self.request
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    /// Manual screen-count inputs are disabled while the service estimates them
    pub fn screen_inputs_enabled(&self) -> bool {
        !self.request.estimate_screens
    }

    /// Restore the fresh-form defaults
    pub fn reset(&mut self) {
        *self = IntakeForm::default();
    }

    /// Apply one edit. Never fails: bad input is normalized or ignored.
    pub fn update_field(&mut self, field: Field, value: impl Into<FieldValue>) {
        let value = value.into();
        match field.kind() {
            FieldKind::PlatformSet => self.toggle_platform(&value.as_text()),
            FieldKind::PhaseList => self.toggle_phase(&value.as_text()),
            FieldKind::Boolean => self.request.estimate_screens = value.as_bool(),
            FieldKind::Numeric => self.set_numeric(field, &value.as_text()),
            FieldKind::Choice => self.set_choice(field, &value.as_text()),
            FieldKind::Text => {
                let text = value.as_text();
                match field {
                    Field::ProjectName => self.request.project_name = text,
                    Field::Features => self.request.features = text,
                    Field::Domain => self.request.domain = text,
                    Field::Industry => self.request.industry = text,
                    Field::Notes => self.request.notes = text,
                    _ => {}
                }
            }
        }

        if field.is_screen_count() {
            self.request.screen_count = self.request.screen_total();
        }
        debug!(field = field.name(), "form field updated");
    }

    fn toggle_platform(&mut self, raw: &str) {
        match raw.parse::<Platform>() {
            Ok(platform) => toggle(&mut self.request.platform, platform),
            Err(e) => warn!(error = %e, "ignoring platform toggle"),
        }
    }

    fn toggle_phase(&mut self, raw: &str) {
        match raw.parse::<Phase>() {
            Ok(phase) => toggle(&mut self.request.phases, phase),
            Err(e) => warn!(error = %e, "ignoring phase toggle"),
        }
    }

    fn set_numeric(&mut self, field: Field, raw: &str) {
        if field == Field::Timeline {
            self.request.timeline = if raw.trim().is_empty() {
                None
            } else {
                Some(coerce_count(raw))
            };
            return;
        }

        let n = coerce_count(raw);
        let slot = match field {
            Field::UniqueEasy => &mut self.request.unique_easy,
            Field::UniqueMedium => &mut self.request.unique_medium,
            Field::UniqueComplex => &mut self.request.unique_complex,
            Field::OtherEasy => &mut self.request.other_easy,
            Field::OtherMedium => &mut self.request.other_medium,
            Field::OtherComplex => &mut self.request.other_complex,
            Field::ScreenCount => &mut self.request.screen_count,
            _ => return,
        };
        *slot = n;
    }

    fn set_choice(&mut self, field: Field, raw: &str) {
        let choice = match raw.parse::<YesNo>() {
            Ok(c) => c,
            Err(e) => {
                warn!(field = field.name(), error = %e, "ignoring choice update");
                return;
            }
        };
        match field {
            Field::Branding => self.request.branding = choice,
            Field::Accessibility => self.request.accessibility = choice,
            Field::Multilingual => self.request.multilingual = choice,
            _ => {}
        }
    }

    /// Input-level validation: the project name is required and the timeline,
    /// when given, must lie in 1..=52 weeks.
    pub fn validate(&self) -> EstimateResult<()> {
        if self.request.project_name.trim().is_empty() {
            return Err(EstimateError::missing_field(Field::ProjectName.name()));
        }
        if let Some(weeks) = self.request.timeline {
            if !(TIMELINE_WEEKS_MIN..=TIMELINE_WEEKS_MAX).contains(&weeks) {
                return Err(EstimateError::invalid_input(
                    Field::Timeline.name(),
                    weeks.to_string(),
                    format!(
                        "must be between {} and {} weeks",
                        TIMELINE_WEEKS_MIN, TIMELINE_WEEKS_MAX
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Validate and lock the form for a submission.
    ///
    /// Returns the request snapshot to post. While a submission is pending a
    /// second call fails with [`EstimateError::AlreadySubmitting`].
    pub fn begin_submit(&mut self) -> EstimateResult<EstimationRequest> {
        if self.submitting {
            return Err(EstimateError::AlreadySubmitting);
        }
        if let Err(e) = self.validate() {
            self.message = Some(FormMessage::Error(e.to_string()));
            return Err(e);
        }
        self.message = None;
        self.submitting = true;
        info!(
            project = %self.request.project_name,
            screens = self.request.screen_count,
            "submitting estimation request"
        );
        Ok(self.request.clone())
    }

    /// Unlock the form and record the outcome of a submission.
    ///
    /// On success the handoff is returned for the caller to open the report;
    /// on failure the inline message is set and `None` comes back.
    pub fn finish_submit(
        &mut self,
        outcome: EstimateResult<EstimationHandoff>,
    ) -> Option<EstimationHandoff> {
        self.submitting = false;
        match outcome {
            Ok(handoff) => {
                self.message = Some(FormMessage::Info("Estimation received".to_string()));
                Some(handoff)
            }
            Err(e) => {
                warn!(code = e.error_code(), error = %e, "estimation submission failed");
                self.message = Some(FormMessage::Error(e.to_string()));
                None
            }
        }
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(pos) = items.iter().position(|existing| *existing == item) {
        items.remove(pos);
    } else {
        items.push(item);
    }
}
