//! # Report Layout
//!
//! One renderer serves every report variant; a [`ReportLayout`] decides
//! which sections appear, in what order, under which labels, and with which
//! theme.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Report sections, each fed by one field of the merged document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Overview,
    TimelineJustification,
    ScreenBreakdown,
    ComplexitySummary,
    RoleEffort,
    PhaseAllocation,
    GanttChart,
    WeeklyDeliverables,
    Considerations,
    ResourceUtilization,
    Assumptions,
    Risks,
    Notes,
}

impl SectionKind {
    /// Every section in full-report order
    pub const ALL: [SectionKind; 13] = [
        SectionKind::Overview,
        SectionKind::TimelineJustification,
        SectionKind::ScreenBreakdown,
        SectionKind::ComplexitySummary,
        SectionKind::RoleEffort,
        SectionKind::PhaseAllocation,
        SectionKind::GanttChart,
        SectionKind::WeeklyDeliverables,
        SectionKind::Considerations,
        SectionKind::ResourceUtilization,
        SectionKind::Assumptions,
        SectionKind::Risks,
        SectionKind::Notes,
    ];

    pub fn default_label(&self) -> &'static str {
        match self {
            SectionKind::Overview => "Overview",
            SectionKind::TimelineJustification => "Timeline Justification",
            SectionKind::ScreenBreakdown => "Screen Breakdown",
            SectionKind::ComplexitySummary => "Complexity Summary",
            SectionKind::RoleEffort => "Role Effort",
            SectionKind::PhaseAllocation => "Phase Allocation",
            SectionKind::GanttChart => "Gantt Chart",
            SectionKind::WeeklyDeliverables => "Weekly Deliverables",
            SectionKind::Considerations => "Considerations",
            SectionKind::ResourceUtilization => "Resource Utilization",
            SectionKind::Assumptions => "Assumptions",
            SectionKind::Risks => "Risks",
            SectionKind::Notes => "Notes",
        }
    }

    /// Field of the merged document the section reads
    pub fn source_key(&self) -> &'static str {
        match self {
            SectionKind::Overview => "overview",
            SectionKind::TimelineJustification => "timelineJustification",
            SectionKind::ScreenBreakdown => "screenBreakdown",
            SectionKind::ComplexitySummary => "complexitySummary",
            SectionKind::RoleEffort => "roleEffort",
            SectionKind::PhaseAllocation => "phaseAllocation",
            SectionKind::GanttChart => "ganttChart",
            SectionKind::WeeklyDeliverables => "weeklyDeliverables",
            SectionKind::Considerations => "considerations",
            SectionKind::ResourceUtilization => "resourceUtilization",
            SectionKind::Assumptions => "assumptions",
            SectionKind::Risks => "risks",
            SectionKind::Notes => "notes",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.default_label())
    }
}

/// A section slot in a layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub kind: SectionKind,
    pub label: String,
}

impl SectionConfig {
    pub fn new(kind: SectionKind) -> Self {
        SectionConfig {
            kind,
            label: kind.default_label().to_string(),
        }
    }

    pub fn labeled(kind: SectionKind, label: impl Into<String>) -> Self {
        SectionConfig {
            kind,
            label: label.into(),
        }
    }
}

/// Colour scheme for a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportTheme {
    pub dark: bool,
    /// Heading colour, RGB in 0..=1
    pub accent: [f32; 3],
}

impl ReportTheme {
    pub fn light(accent: [f32; 3]) -> Self {
        ReportTheme { dark: false, accent }
    }
}

impl Default for ReportTheme {
    fn default() -> Self {
        ReportTheme::light([0.25, 0.35, 0.75])
    }
}

/// Named layout presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPreset {
    #[default]
    Full,
    Summary,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 2] = [LayoutPreset::Full, LayoutPreset::Summary];

    pub fn display_name(&self) -> &'static str {
        match self {
            LayoutPreset::Full => "full",
            LayoutPreset::Summary => "summary",
        }
    }
}

impl std::fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for LayoutPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(LayoutPreset::Full),
            "summary" => Ok(LayoutPreset::Summary),
            other => Err(format!("unknown layout '{}' (expected full or summary)", other)),
        }
    }
}

/// Which sections a report shows and how it looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLayout {
    /// Shown above the project title
    pub heading: String,
    pub theme: ReportTheme,
    pub sections: Vec<SectionConfig>,
}

impl ReportLayout {
    /// Every section with its default label
    pub fn full() -> Self {
        ReportLayout {
            heading: "Design Estimation".to_string(),
            theme: ReportTheme::default(),
            sections: SectionKind::ALL.iter().copied().map(SectionConfig::new).collect(),
        }
    }

    /// Headline numbers, effort by role and the risk picture
    pub fn summary() -> Self {
        ReportLayout {
            heading: "Estimation Summary".to_string(),
            theme: ReportTheme::light([0.1, 0.5, 0.45]),
            sections: vec![
                SectionConfig::new(SectionKind::Overview),
                SectionConfig::new(SectionKind::TimelineJustification),
                SectionConfig::new(SectionKind::ComplexitySummary),
                SectionConfig::labeled(SectionKind::RoleEffort, "Team"),
                SectionConfig::new(SectionKind::Risks),
                SectionConfig::new(SectionKind::Assumptions),
            ],
        }
    }

    pub fn from_preset(preset: LayoutPreset) -> Self {
        match preset {
            LayoutPreset::Full => ReportLayout::full(),
            LayoutPreset::Summary => ReportLayout::summary(),
        }
    }

    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.theme.dark = dark;
        self
    }

    pub fn includes(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|s| s.kind == kind)
    }
}

impl Default for ReportLayout {
    fn default() -> Self {
        ReportLayout::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_layout_has_every_section_once() {
        let layout = ReportLayout::full();
        assert_eq!(layout.sections.len(), SectionKind::ALL.len());
        for kind in SectionKind::ALL {
            assert!(layout.includes(kind));
        }
    }

    #[test]
    fn test_summary_layout_relabels_role_effort() {
        let layout = ReportLayout::summary();
        assert!(!layout.includes(SectionKind::GanttChart));
        let team = layout.sections.iter().find(|s| s.kind == SectionKind::RoleEffort).unwrap();
        assert_eq!(team.label, "Team");
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("Summary".parse::<LayoutPreset>().unwrap(), LayoutPreset::Summary);
        assert!("compact".parse::<LayoutPreset>().is_err());
        assert_eq!(serde_json::to_string(&LayoutPreset::Full).unwrap(), "\"full\"");
    }

    #[test]
    fn test_dark_mode_keeps_accent() {
        let layout = ReportLayout::summary().with_dark_mode(true);
        assert!(layout.theme.dark);
        assert_eq!(layout.theme.accent, [0.1, 0.5, 0.45]);
    }
}
