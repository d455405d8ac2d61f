//! Toolbar component
//!
//! Contains response operations (New Estimate, Open, Save), the report
//! layout picker and the settings dropdown.

use iced::widget::{button, column, container, pick_list, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use estimate_core::layout::LayoutPreset;
use estimate_core::routes::Route;

use crate::Message;

/// Render the application header with the current screen name
pub fn view_header(route: Route) -> Element<'static, Message> {
    row![
        text("Design Estimator").size(28),
        Space::new().width(Length::Fill),
        text(route.display_name()).size(14),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Render the toolbar with response operations and settings dropdown
pub fn view_toolbar(
    route: Route,
    layout: LayoutPreset,
    can_save: bool,
    settings_menu_open: bool,
) -> Element<'static, Message> {
    let new_button = button(text("New Estimate").size(11))
        .on_press_maybe((route == Route::Report).then_some(Message::NewEstimate))
        .padding(Padding::from([4, 8]))
        .style(button::primary);

    let file_buttons = row![
        new_button,
        button(text("Open Response").size(11))
            .on_press(Message::OpenResponse)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
        button(text("Save Response").size(11))
            .on_press_maybe(can_save.then_some(Message::SaveResponse))
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    ]
    .spacing(4);

    let layout_picker = row![
        text("Layout:").size(11),
        Space::new().width(4),
        pick_list(LayoutPreset::ALL, Some(layout), Message::LayoutSelected).text_size(11),
    ]
    .align_y(Alignment::Center);

    let settings_button_text = if settings_menu_open { "Settings ▲" } else { "Settings ▼" };
    let settings_button = button(text(settings_button_text).size(11))
        .on_press(Message::ToggleSettingsMenu)
        .padding(Padding::from([4, 8]))
        .style(if settings_menu_open { button::primary } else { button::secondary });

    row![
        file_buttons,
        Space::new().width(Length::Fill),
        layout_picker,
        Space::new().width(8),
        settings_button,
    ]
    .padding(Padding::from([4, 0]))
    .align_y(Alignment::Center)
    .into()
}

/// Render the settings dropdown menu
pub fn view_settings_menu(dark_mode: bool) -> Element<'static, Message> {
    let theme_label = if dark_mode { "Light Mode" } else { "Dark Mode" };

    let dropdown_content = column![
        button(text(theme_label).size(10))
            .on_press(Message::ToggleDarkMode)
            .padding(Padding::from([4, 12]))
            .width(Length::Fill)
            .style(button::secondary),
    ]
    .spacing(2)
    .width(Length::Fixed(130.0));

    row![
        Space::new().width(Length::Fill),
        container(dropdown_content)
            .padding(4)
            .style(container::bordered_box),
    ]
    .into()
}
