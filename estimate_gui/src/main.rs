//! # Design Estimator GUI
//!
//! Desktop front-end for the design estimation service, built with Iced.
//!
//! Two screens share one window: the intake form, where the project is
//! described and submitted, and the report, which renders whatever the
//! service sent back. A successful submission moves the response through the
//! session slot and switches to the report; "New Estimate" starts over.

use std::path::PathBuf;

use iced::widget::{column, container, Space};
use iced::{Element, Length, Size, Task, Theme};

use estimate_core::client::EstimationClient;
use estimate_core::config::EstimatorConfig;
use estimate_core::errors::EstimateResult;
use estimate_core::form::{Field, IntakeForm};
use estimate_core::layout::{LayoutPreset, ReportLayout};
use estimate_core::logging;
use estimate_core::renderer::ResultRenderer;
use estimate_core::request::{Phase, Platform, YesNo};
use estimate_core::routes::Route;
use estimate_core::session::{EstimationHandoff, SessionSlot};

mod ui;
mod update;

pub fn main() -> iced::Result {
    let config = EstimatorConfig::from_env();
    logging::init(&config.log_filter);
    tracing::info!(
        webhook = %config.webhook_url,
        layout = %config.layout,
        "starting design estimator"
    );

    iced::application(move || App::new(config.clone()), App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window_size(Size::new(1100.0, 820.0))
        .run()
}

#[derive(Debug, Clone)]
pub enum Message {
    // Intake form
    FieldChanged(Field, String),
    PlatformToggled(Platform),
    PhaseToggled(Phase),
    EstimateScreensToggled(bool),
    ChoiceSelected(Field, YesNo),
    Submit,
    SubmitFinished(EstimateResult<EstimationHandoff>),

    // Navigation
    NewEstimate,

    // Stored responses
    OpenResponse,
    ResponseFileChosen(Option<PathBuf>),
    SaveResponse,
    SaveTargetChosen(Option<PathBuf>),

    // Settings
    ToggleSettingsMenu,
    ToggleDarkMode,
    LayoutSelected(LayoutPreset),
}

pub struct App {
    pub config: EstimatorConfig,
    /// Webhook client, or the reason it could not be built from the config
    pub client: EstimateResult<EstimationClient>,
    pub route: Route,
    pub form: IntakeForm,
    pub slot: SessionSlot,
    pub renderer: ResultRenderer,
    /// Raw text behind the current report, kept so a layout change can re-project it
    pub report_raw: Option<String>,
    /// Response received this session and not yet saved anywhere
    pub unsaved_response: Option<EstimationHandoff>,
    pub settings_menu_open: bool,
    pub status: String,
}

impl App {
    fn new(config: EstimatorConfig) -> (Self, Task<Message>) {
        let client = EstimationClient::new(&config);
        let status = match &client {
            Ok(_) => "Ready".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "estimation client unavailable");
                e.to_string()
            }
        };
        let renderer = ResultRenderer::new(report_layout(&config));

        let app = App {
            config,
            client,
            route: Route::from_path("/"),
            form: IntakeForm::new(),
            slot: SessionSlot::new(),
            renderer,
            report_raw: None,
            unsaved_response: None,
            settings_menu_open: false,
            status,
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        match (self.route, self.renderer.report()) {
            (Route::Report, Some(report)) => format!("{} - Design Estimator", report.title),
            (route, _) => format!("{} - Design Estimator", route.display_name()),
        }
    }

    fn theme(&self) -> Theme {
        if self.config.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let header = ui::toolbar::view_header(self.route);
        let toolbar = ui::toolbar::view_toolbar(
            self.route,
            self.config.layout,
            self.unsaved_response.is_some(),
            self.settings_menu_open,
        );

        let settings: Element<'_, Message> = if self.settings_menu_open {
            ui::toolbar::view_settings_menu(self.config.dark_mode)
        } else {
            Space::new().height(0).into()
        };

        let body: Element<'_, Message> = match self.route {
            Route::Intake => ui::intake_form::view_intake_panel(&self.form),
            Route::Report => ui::report_view::view_report_panel(&self.renderer),
        };

        let status_bar =
            ui::status_bar::view_status_bar(self.route, &self.config.webhook_url, &self.status);

        container(
            column![header, toolbar, settings, body, status_bar]
                .spacing(6)
                .padding(10),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Layout for the next report, following the current settings
    fn report_layout(&self) -> ReportLayout {
        report_layout(&self.config)
    }
}

fn report_layout(config: &EstimatorConfig) -> ReportLayout {
    ReportLayout::from_preset(config.layout).with_dark_mode(config.dark_mode)
}
