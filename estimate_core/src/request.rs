//! # Estimation Request
//!
//! The parameter set the intake form submits to the estimation webhook.
//! Field names serialize in camelCase because that is the shape the webhook
//! workflow reads (`projectName`, `uniqueEasy`, ...).
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::request::{EstimationRequest, Phase};
//!
//! let request = EstimationRequest::default();
//! assert_eq!(request.phases, vec![Phase::Discovery, Phase::Wireframing, Phase::UiDesign]);
//!
//! let json = serde_json::to_value(&request).unwrap();
//! assert_eq!(json["timeline"], "");
//! assert_eq!(json["branding"], "No");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// PLATFORM
// ============================================================================

/// Target platform for the designed product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Responsive Website")]
    ResponsiveWebsite,
    #[serde(rename = "Android App")]
    AndroidApp,
    #[serde(rename = "iOS App")]
    IosApp,
    #[serde(rename = "All")]
    All,
}

impl Platform {
    /// All platforms in the order the form lists them
    pub const ALL: [Platform; 4] = [
        Platform::ResponsiveWebsite,
        Platform::AndroidApp,
        Platform::IosApp,
        Platform::All,
    ];

    /// Label used both on screen and on the wire
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::ResponsiveWebsite => "Responsive Website",
            Platform::AndroidApp => "Android App",
            Platform::IosApp => "iOS App",
            Platform::All => "All",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown platform '{}'", wanted))
    }
}

// ============================================================================
// PHASE
// ============================================================================

/// Design phase included in the engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Discovery,
    Wireframing,
    #[serde(rename = "UI Design")]
    UiDesign,
    Prototyping,
}

impl Phase {
    /// Phase vocabulary in display order
    pub const ALL: [Phase; 4] = [
        Phase::Discovery,
        Phase::Wireframing,
        Phase::UiDesign,
        Phase::Prototyping,
    ];

    /// Phases pre-selected on a fresh form
    pub const DEFAULT_SELECTION: [Phase; 3] =
        [Phase::Discovery, Phase::Wireframing, Phase::UiDesign];

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Discovery => "Discovery",
            Phase::Wireframing => "Wireframing",
            Phase::UiDesign => "UI Design",
            Phase::Prototyping => "Prototyping",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Phase::ALL
            .iter()
            .copied()
            .find(|p| p.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown phase '{}'", wanted))
    }
}

// ============================================================================
// YES / NO
// ============================================================================

/// Two-way choice used by the branding, accessibility and multilingual selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    /// Options in the order the select shows them
    pub const ALL: [YesNo; 2] = [YesNo::No, YesNo::Yes];

    pub fn display_name(&self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for YesNo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(YesNo::Yes),
            "no" | "n" => Ok(YesNo::No),
            other => Err(format!("expected Yes or No, got '{}'", other)),
        }
    }
}

// ============================================================================
// REQUEST
// ============================================================================

/// Inclusive bounds for the expected timeline, in weeks
pub const TIMELINE_WEEKS_MIN: u32 = 1;
pub const TIMELINE_WEEKS_MAX: u32 = 52;

/// Complete parameter set sent to the estimation webhook.
///
/// `screen_count` is derived; [`crate::form::IntakeForm`] keeps it equal to
/// [`EstimationRequest::screen_total`] while the user edits. Missing keys
/// deserialize to the fresh-form defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimationRequest {
    pub project_name: String,
    pub platform: Vec<Platform>,
    pub features: String,
    /// When true the service infers screen counts itself
    pub estimate_screens: bool,
    pub unique_easy: u32,
    pub unique_medium: u32,
    pub unique_complex: u32,
    pub other_easy: u32,
    pub other_medium: u32,
    pub other_complex: u32,
    pub screen_count: u32,
    pub domain: String,
    pub industry: String,
    pub phases: Vec<Phase>,
    pub branding: YesNo,
    pub accessibility: YesNo,
    pub multilingual: YesNo,
    /// Weeks; the wire carries `""` when unset
    #[serde(serialize_with = "serialize_timeline", deserialize_with = "deserialize_timeline")]
    pub timeline: Option<u32>,
    pub notes: String,
}

impl Default for EstimationRequest {
    fn default() -> Self {
        EstimationRequest {
            project_name: String::new(),
            platform: Vec::new(),
            features: String::new(),
            estimate_screens: false,
            unique_easy: 0,
            unique_medium: 0,
            unique_complex: 0,
            other_easy: 0,
            other_medium: 0,
            other_complex: 0,
            screen_count: 0,
            domain: String::new(),
            industry: String::new(),
            phases: Phase::DEFAULT_SELECTION.to_vec(),
            branding: YesNo::No,
            accessibility: YesNo::No,
            multilingual: YesNo::No,
            timeline: None,
            notes: String::new(),
        }
    }
}

impl EstimationRequest {
    /// Sum of the six per-complexity screen counts
    pub fn screen_total(&self) -> u32 {
        [
            self.unique_easy,
            self.unique_medium,
            self.unique_complex,
            self.other_easy,
            self.other_medium,
            self.other_complex,
        ]
        .iter()
        .fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    /// Unique screens (low + medium + high)
    pub fn unique_total(&self) -> u32 {
        self.unique_easy
            .saturating_add(self.unique_medium)
            .saturating_add(self.unique_complex)
    }

    /// Other (repeated/variant) screens
    pub fn other_total(&self) -> u32 {
        self.other_easy
            .saturating_add(self.other_medium)
            .saturating_add(self.other_complex)
    }

    /// Platforms joined for a one-line summary, e.g. "Android App, iOS App"
    pub fn platform_summary(&self) -> String {
        if self.platform.is_empty() {
            return "Select Platform".to_string();
        }
        self.platform
            .iter()
            .map(|p| p.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Drop repeated platforms and phases, keeping each first occurrence.
    /// Returns how many entries were removed.
    pub fn dedupe_selections(&mut self) -> usize {
        dedupe(&mut self.platform) + dedupe(&mut self.phases)
    }

    /// JSON body exactly as posted to the webhook
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn dedupe<T: PartialEq + Copy>(items: &mut Vec<T>) -> usize {
    let before = items.len();
    let mut kept: Vec<T> = Vec::with_capacity(before);
    items.retain(|item| {
        if kept.contains(item) {
            false
        } else {
            kept.push(*item);
            true
        }
    });
    before - items.len()
}

fn serialize_timeline<S: Serializer>(
    value: &Option<u32>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(weeks) => serializer.serialize_u32(*weeks),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_timeline<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimeline {
        Number(u32),
        Text(String),
        Null(()),
    }

    match RawTimeline::deserialize(deserializer)? {
        RawTimeline::Number(weeks) => Ok(Some(weeks)),
        RawTimeline::Text(text) if text.trim().is_empty() => Ok(None),
        RawTimeline::Text(text) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid timeline '{}'", text))),
        RawTimeline::Null(()) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_wire_shape() {
        let json = serde_json::to_value(EstimationRequest::default()).unwrap();
        assert_eq!(json["projectName"], "");
        assert_eq!(json["estimateScreens"], false);
        assert_eq!(json["screenCount"], 0);
        assert_eq!(json["phases"], serde_json::json!(["Discovery", "Wireframing", "UI Design"]));
        assert_eq!(json["timeline"], "");
        assert_eq!(json["multilingual"], "No");
        assert!(json.get("project_name").is_none());
    }

    #[test]
    fn test_platform_labels_on_the_wire() {
        let request = EstimationRequest {
            platform: vec![Platform::IosApp, Platform::ResponsiveWebsite],
            timeline: Some(12),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["platform"], serde_json::json!(["iOS App", "Responsive Website"]));
        assert_eq!(json["timeline"], 12);
    }

    #[test]
    fn test_timeline_accepts_blank_and_numeric_text() {
        let mut json = serde_json::to_value(EstimationRequest::default()).unwrap();
        json["timeline"] = serde_json::json!("8");
        let parsed: EstimationRequest = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(parsed.timeline, Some(8));

        json["timeline"] = serde_json::json!("");
        let parsed: EstimationRequest = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.timeline, None);
    }

    #[test]
    fn test_screen_total() {
        let request = EstimationRequest {
            unique_easy: 1,
            unique_medium: 2,
            unique_complex: 3,
            other_easy: 4,
            other_medium: 5,
            other_complex: 6,
            ..Default::default()
        };
        assert_eq!(request.screen_total(), 21);
        assert_eq!(request.unique_total(), 6);
        assert_eq!(request.other_total(), 15);
    }

    #[test]
    fn test_vocabulary_parsing() {
        assert_eq!("ios app".parse::<Platform>().unwrap(), Platform::IosApp);
        assert_eq!("UI Design".parse::<Phase>().unwrap(), Phase::UiDesign);
        assert_eq!(" yes ".parse::<YesNo>().unwrap(), YesNo::Yes);
        assert!("Desktop".parse::<Platform>().is_err());
        assert!("maybe".parse::<YesNo>().is_err());
    }

    #[test]
    fn test_platform_summary() {
        let mut request = EstimationRequest::default();
        assert_eq!(request.platform_summary(), "Select Platform");
        request.platform = vec![Platform::AndroidApp, Platform::IosApp];
        assert_eq!(request.platform_summary(), "Android App, iOS App");
    }

    #[test]
    fn test_dedupe_selections_keeps_first_occurrence() {
        let mut request = EstimationRequest {
            platform: vec![Platform::All, Platform::IosApp, Platform::All],
            phases: vec![Phase::UiDesign, Phase::Discovery, Phase::UiDesign],
            ..Default::default()
        };
        assert_eq!(request.dedupe_selections(), 2);
        assert_eq!(request.platform, vec![Platform::All, Platform::IosApp]);
        assert_eq!(request.phases, vec![Phase::UiDesign, Phase::Discovery]);
        assert_eq!(request.dedupe_selections(), 0);
    }
}
