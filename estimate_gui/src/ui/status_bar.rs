//! Status Bar (Bottom)
//!
//! Displays the current screen path, the webhook in use and the latest
//! status message.

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use estimate_core::routes::Route;

use crate::Message;

/// Render the status bar
pub fn view_status_bar<'a>(
    route: Route,
    webhook_url: &'a str,
    status: &'a str,
) -> Element<'a, Message> {
    row![
        text(route.path()).size(10),
        Space::new().width(12),
        text(webhook_url).size(10).color([0.5, 0.5, 0.5]),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
