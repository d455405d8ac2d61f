//! Report Panel
//!
//! Dispatches on the renderer state:
//! - Idle / Loading -> loading message
//! - NoData -> prompt to start a new estimate
//! - ParseFailure -> error display
//! - Ready -> heading, title and each projected section

use iced::widget::{button, column, container, scrollable, text, Column, Space};
use iced::{Element, Length, Padding};

use estimate_core::renderer::{RenderState, ResultRenderer};

use crate::Message;
use super::sections;

/// Render the report panel for the renderer's current state
pub fn view_report_panel(renderer: &ResultRenderer) -> Element<'_, Message> {
    let theme = renderer.layout().theme;

    let content: Column<'_, Message> = match renderer.state() {
        RenderState::Idle | RenderState::Loading => {
            column![text("Loading estimation...").size(14).color([0.5, 0.5, 0.5])]
        }
        RenderState::NoData => column![
            text("No estimation data").size(14),
            Space::new().height(8),
            text("Submit the intake form to generate an estimation.").size(11),
            Space::new().height(12),
            new_estimate_button(),
        ],
        RenderState::ParseFailure(reason) => column![
            text("Error").size(14),
            Space::new().height(8),
            text("The estimation response could not be read.").size(12).color([0.8, 0.2, 0.2]),
            text(reason.as_str()).size(11).color([0.8, 0.2, 0.2]),
            Space::new().height(12),
            new_estimate_button(),
        ],
        RenderState::Ready(rendered) => {
            let report = &rendered.report;
            let mut page = column![
                text(report.heading.as_str()).size(12).color(theme.accent),
                text(report.title.as_str()).size(22),
                Space::new().height(10),
            ];

            if report.is_empty() {
                let notice = text("The service returned no report sections.").size(11);
                page = page.push(notice.color([0.5, 0.5, 0.5]));
            }
            for section in &report.sections {
                page = page
                    .push(sections::view_section(section, &theme))
                    .push(Space::new().height(14));
            }
            page.push(new_estimate_button())
        }
    };

    container(scrollable(content.padding(8)))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}

fn new_estimate_button() -> Element<'static, Message> {
    button(text("New Estimate").size(11))
        .on_press(Message::NewEstimate)
        .padding(Padding::from([4, 8]))
        .style(button::secondary)
        .into()
}
