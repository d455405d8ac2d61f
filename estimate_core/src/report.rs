//! # Report Projection
//!
//! Turns a canonical document into the sections a front-end draws. The
//! projection is read-only: it works on the merged view and never touches
//! the document it was given.
//!
//! A section appears only when its source field is present and, for
//! collections, non-empty. Missing numbers are shown as [`MISSING`]; the
//! projection never substitutes made-up figures.
//!
//! ```rust
//! use estimate_core::layout::{ReportLayout, SectionKind};
//! use estimate_core::normalize::normalize;
//! use estimate_core::report::Report;
//!
//! let raw = r#"{"projectName": "Loan App", "risks": ["Scope creep"], "assumptions": []}"#;
//! let doc = normalize(raw).unwrap();
//! let report = Report::project(&doc, &ReportLayout::full());
//!
//! assert_eq!(report.title, "Loan App");
//! assert!(report.section(SectionKind::Risks).is_some());
//! assert!(report.section(SectionKind::Assumptions).is_none());
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::layout::{ReportLayout, SectionConfig, SectionKind};
use crate::normalize::{merged_view, Document};

/// Placeholder for a value the service did not return
pub const MISSING: &str = "—";

/// Title used when the document carries no project name
pub const UNTITLED: &str = "Design Estimation";

// ============================================================================
// SECTION BODIES
// ============================================================================

/// Headline number
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: Option<String>,
}

impl Metric {
    pub fn display(&self) -> &str {
        self.value.as_deref().unwrap_or(MISSING)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

/// Titled bullet list (a role's tasks, a week's deliverables)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content")]
pub enum SectionBody {
    Metrics(Vec<Metric>),
    Text(String),
    Table(Table),
    Cards(Vec<Card>),
    Groups(Vec<Group>),
    KeyValues {
        pairs: Vec<(String, String)>,
        table: Option<Table>,
    },
    List(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub label: String,
    pub body: SectionBody,
}

/// Projected report, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub heading: String,
    pub title: String,
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// Project `doc` through `layout`.
    pub fn project(doc: &Document, layout: &ReportLayout) -> Report {
        let merged = merged_view(doc);
        let title = merged
            .get("projectName")
            .and_then(non_empty_text)
            .unwrap_or_else(|| UNTITLED.to_string());

        let sections = layout
            .sections
            .iter()
            .filter_map(|config| project_section(&merged, config))
            .collect();

        Report {
            heading: layout.heading.clone(),
            title,
            sections,
        }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn project_section(merged: &Document, config: &SectionConfig) -> Option<ReportSection> {
    let body = match config.kind {
        SectionKind::Overview => overview(merged),
        SectionKind::TimelineJustification | SectionKind::Notes => {
            merged.get(config.kind.source_key()).and_then(non_empty_text).map(SectionBody::Text)
        }
        SectionKind::ScreenBreakdown => table_section(
            merged.get("screenBreakdown"),
            &[
                ("Feature Category", "featureCategory"),
                ("Screen Name", "screenName"),
                ("Complexity", "complexity"),
                ("Effort (hrs)", "designEffortHours"),
                ("Variants", "variants"),
            ],
        )
        .map(SectionBody::Table),
        SectionKind::ComplexitySummary => table_section(
            merged.get("complexitySummary"),
            &[
                ("Level", "level"),
                ("Unique Screens", "uniqueScreens"),
                ("Effort Range", "effortRange"),
                ("Total Variants", "totalVariants"),
                ("Total Hours", "totalHours"),
            ],
        )
        .map(SectionBody::Table),
        SectionKind::RoleEffort => role_effort(merged),
        SectionKind::PhaseAllocation => table_section(
            merged.get("phaseAllocation"),
            &[
                ("Phase", "phase"),
                ("Design PM", "designPM"),
                ("Design Lead", "designLead"),
                ("Interaction Designer", "interactionDesigner"),
                ("Visual Designer", "visualDesigner"),
                ("Total Days", "totalDays"),
            ],
        )
        .map(SectionBody::Table),
        SectionKind::GanttChart => gantt_chart(merged),
        SectionKind::WeeklyDeliverables => weekly_deliverables(merged),
        SectionKind::Considerations => considerations(merged),
        SectionKind::ResourceUtilization => resource_utilization(merged),
        SectionKind::Assumptions | SectionKind::Risks => {
            let items = non_empty_array(merged.get(config.kind.source_key()))?;
            Some(SectionBody::List(items.iter().map(display_value).collect()))
        }
    }?;

    Some(ReportSection {
        kind: config.kind,
        label: config.label.clone(),
        body,
    })
}

// ============================================================================
// SECTION BUILDERS
// ============================================================================

const OVERVIEW_METRICS: [(&str, &str); 4] = [
    ("Total Person-Days", "totalPersonDays"),
    ("Team Members", "teamMembers"),
    ("Working Days", "workingDays"),
    ("Total Screens", "totalScreens"),
];

fn overview(merged: &Document) -> Option<SectionBody> {
    let metrics: Vec<Metric> = OVERVIEW_METRICS
        .iter()
        .map(|(label, key)| Metric {
            label: label.to_string(),
            value: merged.get(*key).filter(|v| !v.is_null()).map(display_value),
        })
        .collect();

    if metrics.iter().all(|m| m.value.is_none()) {
        return None;
    }
    Some(SectionBody::Metrics(metrics))
}

fn table_section(source: Option<&Value>, columns: &[(&str, &str)]) -> Option<Table> {
    let items = non_empty_array(source)?;
    let rows = items
        .iter()
        .map(|item| columns.iter().map(|(_, key)| field(item, key)).collect())
        .collect();
    Some(Table {
        headers: columns.iter().map(|(header, _)| header.to_string()).collect(),
        rows,
    })
}

fn role_effort(merged: &Document) -> Option<SectionBody> {
    let items = non_empty_array(merged.get("roleEffort"))?;
    let cards = items
        .iter()
        .map(|item| Card {
            title: field(item, "role"),
            subtitle: format!(
                "{} days • FTE: {}",
                field(item, "totalPersonDays"),
                field(item, "fte")
            ),
            body: item.get("justification").and_then(non_empty_text).unwrap_or_default(),
        })
        .collect();
    Some(SectionBody::Cards(cards))
}

fn gantt_chart(merged: &Document) -> Option<SectionBody> {
    let roles = merged.get("ganttChart")?.get("roles")?.as_object()?;
    if roles.is_empty() {
        return None;
    }
    let groups = roles
        .iter()
        .map(|(role, tasks)| Group {
            title: role.clone(),
            items: match tasks {
                Value::Array(tasks) => tasks.iter().map(gantt_task).collect(),
                other => vec![display_value(other)],
            },
        })
        .collect();
    Some(SectionBody::Groups(groups))
}

fn gantt_task(task: &Value) -> String {
    match task {
        Value::String(s) => s.clone(),
        Value::Object(_) => format!(
            "{} ({}) – {}",
            field(task, "phase"),
            field(task, "weeks"),
            field(task, "effort")
        ),
        other => display_value(other),
    }
}

fn weekly_deliverables(merged: &Document) -> Option<SectionBody> {
    let weeks = non_empty_array(merged.get("weeklyDeliverables"))?;
    let groups = weeks
        .iter()
        .map(|week| Group {
            title: format!("Week {}", field(week, "week")),
            items: match week.get("deliverables") {
                Some(Value::Array(items)) => items.iter().map(display_value).collect(),
                Some(other) if !other.is_null() => vec![display_value(other)],
                _ => Vec::new(),
            },
        })
        .collect();
    Some(SectionBody::Groups(groups))
}

const CONSIDERATION_LABELS: [(&str, &str); 5] = [
    ("Timeline Feasibility", "timelineFeasibility"),
    ("Resource Optimization", "resourceOptimization"),
    ("Scalability", "scalability"),
    ("Stakeholder Management", "stakeholderManagement"),
    ("Risk Mitigation", "riskMitigation"),
];

fn considerations(merged: &Document) -> Option<SectionBody> {
    let obj = merged.get("considerations")?.as_object()?;
    let pairs = labeled_pairs(obj, &CONSIDERATION_LABELS, &[]);
    if pairs.is_empty() {
        return None;
    }
    Some(SectionBody::KeyValues { pairs, table: None })
}

const UTILIZATION_LABELS: [(&str, &str); 4] = [
    ("Avg Hours/Day", "avgHoursPerDay"),
    ("Peak Utilization", "peakUtilization"),
    ("Buffer Days", "bufferDays"),
    ("Efficiency Target", "overallEfficiencyTarget"),
];

fn resource_utilization(merged: &Document) -> Option<SectionBody> {
    let obj = merged.get("resourceUtilization")?.as_object()?;
    let pairs = labeled_pairs(obj, &UTILIZATION_LABELS, &["weeklyLoads"]);
    let table = table_section(
        obj.get("weeklyLoads"),
        &[
            ("Week", "week"),
            ("PM", "pm"),
            ("Lead", "lead"),
            ("Interaction Designer", "interactionDesigner"),
            ("Visual Designer", "visualDesigner"),
            ("Team Utilization", "teamUtilization"),
        ],
    );
    if pairs.is_empty() && table.is_none() {
        return None;
    }
    Some(SectionBody::KeyValues { pairs, table })
}

/// Known keys first in their fixed order, then any extra keys the service
/// added, labeled from their camelCase name.
fn labeled_pairs(obj: &Document, known: &[(&str, &str)], skip: &[&str]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = known
        .iter()
        .filter_map(|(label, key)| {
            obj.get(*key)
                .filter(|v| !v.is_null())
                .map(|v| (label.to_string(), display_value(v)))
        })
        .collect();

    for (key, value) in obj {
        let is_known = known.iter().any(|(_, k)| *k == key.as_str());
        if is_known || skip.contains(&key.as_str()) || value.is_null() {
            continue;
        }
        pairs.push((humanize_key(key), display_value(value)));
    }
    pairs
}

// ============================================================================
// VALUE HELPERS
// ============================================================================

/// Render any JSON value as display text
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => MISSING.to_string(),
        Value::Bool(b) => (if *b { "Yes" } else { "No" }).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// `"timelineFeasibility"` -> `"Timeline Feasibility"`,
/// `"buffer_days"` -> `"Buffer Days"`
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut word_start = true;
    for ch in key.chars() {
        if ch == '_' {
            out.push(' ');
            word_start = true;
        } else if word_start {
            out.extend(ch.to_uppercase());
            word_start = false;
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

fn field(item: &Value, key: &str) -> String {
    item.get(key).map(display_value).unwrap_or_else(|| MISSING.to_string())
}

fn non_empty_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(display_value(other)),
    }
}

fn non_empty_array(value: Option<&Value>) -> Option<&Vec<Value>> {
    value.and_then(Value::as_array).filter(|items| !items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    fn sample() -> Document {
        doc(json!({
            "projectName": "B2C Loan Platform",
            "overview": {
                "totalPersonDays": 84,
                "teamMembers": 4,
                "workingDays": 10,
                "totalScreens": 24,
                "timelineJustification": "Two design sprints"
            },
            "workingDays": 21,
            "screenBreakdown": [
                {
                    "featureCategory": "Onboarding",
                    "screenName": "Sign up",
                    "complexity": "Low",
                    "designEffortHours": 6,
                    "variants": 2
                }
            ],
            "complexitySummary": [],
            "roleEffort": [
                {
                    "role": "Design Lead",
                    "totalPersonDays": 21,
                    "fte": 1.0,
                    "justification": "Owns the system"
                }
            ],
            "ganttChart": {"roles": {
                "Visual Designer": [
                    "Style tiles",
                    {"phase": "UI Design", "weeks": "3-5", "effort": "100%"}
                ]
            }},
            "weeklyDeliverables": [{"week": 1, "deliverables": ["Kickoff deck"]}],
            "considerations": {
                "scalability": "Tokenized components",
                "timelineFeasibility": "Tight",
                "budgetNote": "Fixed fee"
            },
            "resourceUtilization": {
                "avgHoursPerDay": 6.5,
                "weeklyLoads": [{
                    "week": 1,
                    "pm": "50%",
                    "lead": "100%",
                    "interactionDesigner": "100%",
                    "visualDesigner": "50%",
                    "teamUtilization": "75%"
                }]
            },
            "assumptions": ["Content provided by client"],
            "risks": [],
            "notes": ""
        }))
    }

    #[test]
    fn test_title_and_overview_use_merged_view() {
        let report = Report::project(&sample(), &ReportLayout::full());
        assert_eq!(report.title, "B2C Loan Platform");

        let overview = report.section(SectionKind::Overview).unwrap();
        let SectionBody::Metrics(metrics) = &overview.body else {
            panic!("overview should be metrics");
        };
        assert_eq!(metrics[0].display(), "84");
        // Top-level workingDays overrides the overview block
        assert_eq!(metrics[2].display(), "21");

        let justification = report.section(SectionKind::TimelineJustification).unwrap();
        assert_eq!(justification.body, SectionBody::Text("Two design sprints".to_string()));
    }

    #[test]
    fn test_empty_collections_and_blank_text_are_hidden() {
        let report = Report::project(&sample(), &ReportLayout::full());
        assert!(report.section(SectionKind::ComplexitySummary).is_none());
        assert!(report.section(SectionKind::Risks).is_none());
        assert!(report.section(SectionKind::Notes).is_none());
        assert!(report.section(SectionKind::PhaseAllocation).is_none());
        assert!(report.section(SectionKind::Assumptions).is_some());
    }

    #[test]
    fn test_tables_fill_missing_cells() {
        let source = doc(json!({"phaseAllocation": [{"phase": "Discovery", "totalDays": 5}]}));
        let report = Report::project(&source, &ReportLayout::full());
        let section = report.section(SectionKind::PhaseAllocation).unwrap();
        let SectionBody::Table(table) = &section.body else {
            panic!("phase allocation should be a table");
        };
        assert_eq!(table.headers.len(), 6);
        assert_eq!(table.rows[0], vec!["Discovery", MISSING, MISSING, MISSING, MISSING, "5"]);
    }

    #[test]
    fn test_role_cards_and_gantt_groups() {
        let report = Report::project(&sample(), &ReportLayout::full());

        let section = report.section(SectionKind::RoleEffort).unwrap();
        let SectionBody::Cards(cards) = &section.body else {
            panic!("role effort should be cards");
        };
        assert_eq!(cards[0].title, "Design Lead");
        assert_eq!(cards[0].subtitle, "21 days • FTE: 1.0");

        let section = report.section(SectionKind::GanttChart).unwrap();
        let SectionBody::Groups(groups) = &section.body else {
            panic!("gantt should be groups");
        };
        assert_eq!(groups[0].items, vec!["Style tiles", "UI Design (3-5) – 100%"]);

        let section = report.section(SectionKind::WeeklyDeliverables).unwrap();
        let SectionBody::Groups(weeks) = &section.body else {
            panic!("weekly deliverables should be groups");
        };
        assert_eq!(weeks[0].title, "Week 1");
    }

    #[test]
    fn test_considerations_keep_known_order_then_extras() {
        let report = Report::project(&sample(), &ReportLayout::full());
        let section = report.section(SectionKind::Considerations).unwrap();
        let SectionBody::KeyValues { pairs, table } = &section.body else {
            panic!("considerations should be key/values");
        };
        assert!(table.is_none());
        let labels: Vec<&str> = pairs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Timeline Feasibility", "Scalability", "Budget Note"]);
    }

    #[test]
    fn test_resource_utilization_table() {
        let report = Report::project(&sample(), &ReportLayout::full());
        let section = report.section(SectionKind::ResourceUtilization).unwrap();
        let SectionBody::KeyValues { pairs, table } = &section.body else {
            panic!("resource utilization should be key/values");
        };
        assert_eq!(pairs, &vec![("Avg Hours/Day".to_string(), "6.5".to_string())]);
        assert_eq!(table.as_ref().unwrap().rows[0][5], "75%");
    }

    #[test]
    fn test_absent_overview_numbers_are_not_invented() {
        let source = doc(json!({"projectName": "Sparse", "teamMembers": 2}));
        let report = Report::project(&source, &ReportLayout::full());
        let section = report.section(SectionKind::Overview).unwrap();
        let SectionBody::Metrics(metrics) = &section.body else {
            panic!("overview should be metrics");
        };
        assert_eq!(metrics[0].value, None);
        assert_eq!(metrics[0].display(), MISSING);
        assert_eq!(metrics[1].display(), "2");

        let empty = Report::project(&doc(json!({})), &ReportLayout::full());
        assert!(empty.is_empty());
        assert_eq!(empty.title, UNTITLED);
    }

    #[test]
    fn test_layout_controls_sections_and_labels() {
        let report = Report::project(&sample(), &ReportLayout::summary());
        assert!(report.section(SectionKind::GanttChart).is_none());
        assert_eq!(report.section(SectionKind::RoleEffort).unwrap().label, "Team");
        assert_eq!(report.heading, "Estimation Summary");
    }

    #[test]
    fn test_projection_leaves_document_untouched() {
        let source = sample();
        let before = source.clone();
        let _ = Report::project(&source, &ReportLayout::full());
        assert_eq!(source, before);
    }

    #[test]
    fn test_projects_normalized_envelope() {
        let raw = r#"[{"output": "{\"overview\":{\"projectName\":\"X\",\"totalScreens\":3}}"}]"#;
        let report = Report::project(&normalize(raw).unwrap(), &ReportLayout::full());
        assert_eq!(report.title, "X");
        assert!(report.section(SectionKind::Overview).is_some());
    }

    #[test]
    fn test_value_helpers() {
        assert_eq!(display_value(&json!(null)), MISSING);
        assert_eq!(display_value(&json!(["a", 2])), "a, 2");
        assert_eq!(display_value(&json!(true)), "Yes");
        assert_eq!(humanize_key("overallEfficiencyTarget"), "Overall Efficiency Target");
        assert_eq!(humanize_key("buffer_days"), "Buffer Days");
        assert_eq!(humanize_key("design_reviewRounds"), "Design Review Rounds");
    }
}
