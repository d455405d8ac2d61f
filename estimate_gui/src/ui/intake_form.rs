//! Intake Form (Center)
//!
//! Displays:
//! - Project name, features, domain and industry
//! - Platform and phase selections
//! - Screen counts by complexity, or service-side screen estimation
//! - Branding / accessibility / multilingual choices and timeline
//! - Submit button with the inline result message

use iced::widget::{
    button, checkbox, column, container, pick_list, row, scrollable, text, text_input, Column, Row,
    Space,
};
use iced::{Alignment, Element, Length, Padding};

use estimate_core::form::{Field, IntakeForm};
use estimate_core::request::{
    EstimationRequest, Phase, Platform, YesNo, TIMELINE_WEEKS_MAX, TIMELINE_WEEKS_MIN,
};

use crate::Message;

const LABEL_WIDTH: f32 = 130.0;

/// Render the intake panel
pub fn view_intake_panel(form: &IntakeForm) -> Element<'_, Message> {
    let request = form.request();

    let panel = column![
        view_project_section(request),
        Space::new().height(10),
        view_screen_section(form),
        Space::new().height(10),
        view_scope_section(request),
        Space::new().height(15),
        view_submit(form),
    ]
    .padding(8);

    container(scrollable(panel))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn view_project_section(request: &EstimationRequest) -> Column<'_, Message> {
    let platforms = Platform::ALL.iter().fold(Row::new().spacing(12), |row, platform| {
        let platform = *platform;
        row.push(
            checkbox(request.platform.contains(&platform))
                .label(platform.display_name())
                .on_toggle(move |_| Message::PlatformToggled(platform))
                .text_size(11),
        )
    });

    column![
        text("Project Details").size(14),
        Space::new().height(8),
        text_field(Field::ProjectName, "e.g. B2C Finance Loan Platform", &request.project_name),
        row![
            text("Platform:").size(11).width(Length::Fixed(LABEL_WIDTH)),
            platforms,
        ]
        .align_y(Alignment::Center),
        row![
            Space::new().width(Length::Fixed(LABEL_WIDTH)),
            text(request.platform_summary()).size(10).color([0.5, 0.5, 0.5]),
        ],
        text_field(Field::Features, "Key features, comma separated", &request.features),
        text_field(Field::Domain, "e.g. Fintech", &request.domain),
        text_field(Field::Industry, "e.g. Banking", &request.industry),
    ]
    .spacing(6)
}

fn view_screen_section(form: &IntakeForm) -> Column<'_, Message> {
    let request = form.request();
    let enabled = form.screen_inputs_enabled();

    let estimate_toggle = checkbox(request.estimate_screens)
        .label("Let the service estimate screen counts")
        .on_toggle(Message::EstimateScreensToggled)
        .text_size(11);

    let header = row![
        Space::new().width(Length::Fixed(LABEL_WIDTH)),
        text("Low").size(10).width(Length::Fixed(70.0)),
        text("Medium").size(10).width(Length::Fixed(70.0)),
        text("High").size(10).width(Length::Fixed(70.0)),
    ]
    .spacing(4);

    let unique = count_row(
        "Unique screens:",
        [
            (Field::UniqueEasy, request.unique_easy),
            (Field::UniqueMedium, request.unique_medium),
            (Field::UniqueComplex, request.unique_complex),
        ],
        enabled,
    );
    let other = count_row(
        "Other screens:",
        [
            (Field::OtherEasy, request.other_easy),
            (Field::OtherMedium, request.other_medium),
            (Field::OtherComplex, request.other_complex),
        ],
        enabled,
    );

    let total = if enabled {
        format!(
            "Total screens: {} ({} unique, {} other)",
            request.screen_count,
            request.unique_total(),
            request.other_total()
        )
    } else {
        "Screen counts will be estimated by the service".to_string()
    };

    column![
        text("Screens").size(14),
        Space::new().height(8),
        estimate_toggle,
        Space::new().height(4),
        header,
        unique,
        other,
        text(total).size(10).color([0.5, 0.5, 0.5]),
    ]
    .spacing(6)
}

fn view_scope_section(request: &EstimationRequest) -> Column<'_, Message> {
    let phases = Phase::ALL.iter().fold(Row::new().spacing(12), |row, phase| {
        let phase = *phase;
        row.push(
            checkbox(request.phases.contains(&phase))
                .label(phase.display_name())
                .on_toggle(move |_| Message::PhaseToggled(phase))
                .text_size(11),
        )
    });

    let timeline = request.timeline.map(|w| w.to_string()).unwrap_or_default();

    column![
        text("Scope").size(14),
        Space::new().height(8),
        row![
            text("Phases:").size(11).width(Length::Fixed(LABEL_WIDTH)),
            phases,
        ]
        .align_y(Alignment::Center),
        choice_field(Field::Branding, request.branding),
        choice_field(Field::Accessibility, request.accessibility),
        choice_field(Field::Multilingual, request.multilingual),
        row![
            text(format!("{}:", Field::Timeline.label()))
                .size(11)
                .width(Length::Fixed(LABEL_WIDTH)),
            text_input(&format!("weeks ({}-{})", TIMELINE_WEEKS_MIN, TIMELINE_WEEKS_MAX), &timeline)
                .on_input(|v| Message::FieldChanged(Field::Timeline, v))
                .width(Length::Fixed(120.0))
                .padding(4)
                .size(11),
        ]
        .align_y(Alignment::Center),
        text_field(Field::Notes, "Anything else the estimate should consider", &request.notes),
    ]
    .spacing(6)
}

fn view_submit(form: &IntakeForm) -> Column<'_, Message> {
    let label = if form.is_submitting() {
        "Generating..."
    } else {
        "Generate Estimation"
    };

    let submit = button(text(label).size(12))
        .on_press_maybe((!form.is_submitting()).then_some(Message::Submit))
        .padding(Padding::from([6, 16]))
        .style(button::primary);

    let message: Element<'_, Message> = match form.message() {
        Some(m) if m.is_error() => text(m.text()).size(11).color([0.8, 0.2, 0.2]).into(),
        Some(m) => text(m.text()).size(11).color([0.2, 0.6, 0.2]).into(),
        None => Space::new().height(0).into(),
    };

    column![submit, message].spacing(8)
}

/// Labeled free-text input bound to a form field
fn text_field<'a>(field: Field, placeholder: &'a str, value: &'a str) -> Element<'a, Message> {
    row![
        text(format!("{}:", field.label())).size(11).width(Length::Fixed(LABEL_WIDTH)),
        text_input(placeholder, value)
            .on_input(move |v| Message::FieldChanged(field, v))
            .width(Length::Fill)
            .padding(4)
            .size(11),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Yes/No dropdown bound to a form field
fn choice_field(field: Field, value: YesNo) -> Element<'static, Message> {
    row![
        text(format!("{}:", field.label())).size(11).width(Length::Fixed(LABEL_WIDTH)),
        pick_list(YesNo::ALL, Some(value), move |c| Message::ChoiceSelected(field, c))
            .width(Length::Fixed(80.0))
            .text_size(11),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// One row of three screen-count inputs; read-only when the service estimates them
fn count_row(label: &str, cells: [(Field, u32); 3], enabled: bool) -> Element<'static, Message> {
    let inputs = cells.iter().fold(Row::new().spacing(4), |row, (field, count)| {
        let field = *field;
        let value = if *count == 0 { String::new() } else { count.to_string() };
        let input = text_input("0", &value).width(Length::Fixed(70.0)).padding(4).size(11);
        let input = if enabled {
            input.on_input(move |v| Message::FieldChanged(field, v))
        } else {
            input
        };
        row.push(input)
    });

    row![
        text(label.to_string()).size(11).width(Length::Fixed(LABEL_WIDTH)),
        inputs,
    ]
    .align_y(Alignment::Center)
    .into()
}
