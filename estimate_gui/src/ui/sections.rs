//! Report section widgets
//!
//! One drawing routine per [`SectionBody`] shape; the section kind only
//! decides the label.

use iced::widget::{column, container, row, text, Column, Row, Space};
use iced::{Element, Length};

use estimate_core::layout::ReportTheme;
use estimate_core::report::{Card, Group, Metric, ReportSection, SectionBody, Table};

use crate::Message;

const MUTED: [f32; 3] = [0.5, 0.5, 0.5];

/// Render one section: accent-coloured label, then its body
pub fn view_section<'a>(section: &'a ReportSection, theme: &ReportTheme) -> Element<'a, Message> {
    let body: Element<'a, Message> = match &section.body {
        SectionBody::Metrics(metrics) => view_metrics(metrics),
        SectionBody::Text(body) => text(body.as_str()).size(11).into(),
        SectionBody::Table(table) => view_table(table),
        SectionBody::Cards(cards) => view_cards(cards),
        SectionBody::Groups(groups) => view_groups(groups),
        SectionBody::KeyValues { pairs, table } => {
            let mut list = Column::new().spacing(6);
            for (label, value) in pairs {
                list = list.push(column![
                    text(label.as_str()).size(11).color(MUTED),
                    text(value.as_str()).size(11),
                ]);
            }
            if let Some(table) = table {
                list = list.push(Space::new().height(6)).push(view_table(table));
            }
            list.into()
        }
        SectionBody::List(items) => items
            .iter()
            .fold(Column::new().spacing(2), |list, item| {
                list.push(text(format!("• {}", item)).size(11))
            })
            .into(),
    };

    column![
        text(section.label.as_str()).size(14).color(theme.accent),
        Space::new().height(6),
        body,
    ]
    .into()
}

fn view_metrics(metrics: &[Metric]) -> Element<'_, Message> {
    metrics
        .iter()
        .fold(Row::new().spacing(8), |tiles, metric| {
            tiles.push(
                container(column![
                    text(metric.display()).size(20),
                    text(metric.label.as_str()).size(10).color(MUTED),
                ])
                .padding(8)
                .width(Length::FillPortion(1))
                .style(container::bordered_box),
            )
        })
        .into()
}

fn view_table(table: &Table) -> Element<'_, Message> {
    let header = table
        .headers
        .iter()
        .fold(Row::new().spacing(4), |cells, header| {
            cells.push(text(header.as_str()).size(10).color(MUTED).width(Length::FillPortion(1)))
        });

    let rows = table.rows.iter().fold(Column::new().spacing(2), |rows, cells| {
        rows.push(cells.iter().fold(Row::new().spacing(4), |row, cell| {
            row.push(text(cell.as_str()).size(11).width(Length::FillPortion(1)))
        }))
    });

    container(column![header, rows].spacing(4))
        .padding(6)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

fn view_cards(cards: &[Card]) -> Element<'_, Message> {
    cards
        .iter()
        .fold(Column::new().spacing(6), |list, card| {
            let mut body = column![
                text(card.title.as_str()).size(12),
                text(card.subtitle.as_str()).size(10).color(MUTED),
            ]
            .spacing(2);
            if !card.body.is_empty() {
                body = body.push(text(card.body.as_str()).size(11));
            }
            list.push(container(body).padding(8).width(Length::Fill).style(container::bordered_box))
        })
        .into()
}

fn view_groups(groups: &[Group]) -> Element<'_, Message> {
    groups
        .iter()
        .fold(Column::new().spacing(8), |list, group| {
            let items = group.items.iter().fold(Column::new().spacing(2), |items, item| {
                items.push(text(format!("• {}", item)).size(11))
            });
            list.push(row![
                text(group.title.as_str()).size(11).width(Length::Fixed(160.0)),
                items,
            ])
        })
        .into()
}
