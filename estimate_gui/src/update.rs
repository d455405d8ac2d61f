//! Message handling for the estimator window.
//!
//! Network and dialog work runs as Iced tasks on the tokio executor; their
//! results come back as messages.

use std::path::PathBuf;

use iced::Task;

use estimate_core::errors::EstimateError;
use estimate_core::file_io;
use estimate_core::form::Field;
use estimate_core::renderer::{RenderState, ResultRenderer};
use estimate_core::routes::Route;

use crate::{App, Message};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::FieldChanged(field, value) => {
                self.form.update_field(field, value);
            }
            Message::PlatformToggled(platform) => {
                self.form.update_field(Field::Platform, platform.display_name());
            }
            Message::PhaseToggled(phase) => {
                self.form.update_field(Field::Phases, phase.display_name());
            }
            Message::EstimateScreensToggled(enabled) => {
                self.form.update_field(Field::EstimateScreens, enabled);
            }
            Message::ChoiceSelected(field, choice) => {
                self.form.update_field(field, choice.display_name());
            }

            Message::Submit => return self.submit(),
            Message::SubmitFinished(outcome) => {
                let retry = outcome.as_ref().err().is_some_and(EstimateError::is_recoverable);
                if let Some(handoff) = self.form.finish_submit(outcome) {
                    self.slot.store(handoff);
                    self.open_report();
                } else if let Some(message) = self.form.message() {
                    self.status = if retry {
                        format!("{} Press Generate Estimation to try again.", message.text())
                    } else {
                        message.text().to_string()
                    };
                }
            }

            Message::NewEstimate => {
                self.form.reset();
                self.slot.clear();
                self.renderer = ResultRenderer::new(self.report_layout());
                self.report_raw = None;
                self.unsaved_response = None;
                self.route = Route::Intake;
                self.status = "Ready".to_string();
            }

            Message::OpenResponse => {
                return Task::perform(pick_response_file(), Message::ResponseFileChosen);
            }
            Message::ResponseFileChosen(Some(path)) => match file_io::load_response(&path) {
                Ok(raw) => {
                    self.unsaved_response = None;
                    self.show_report(raw);
                    self.status = format!("Opened {}", path.display());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to open saved response");
                    self.status = e.to_string();
                }
            },
            Message::ResponseFileChosen(None) => {}

            Message::SaveResponse => {
                if self.unsaved_response.is_some() {
                    return Task::perform(pick_save_target(), Message::SaveTargetChosen);
                }
            }
            Message::SaveTargetChosen(Some(path)) => {
                if let Some(handoff) = &self.unsaved_response {
                    match file_io::save_response(handoff, &path) {
                        Ok(()) => {
                            self.status = format!("Saved {}", path.display());
                            self.unsaved_response = None;
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to save response");
                            self.status = e.to_string();
                        }
                    }
                }
            }
            Message::SaveTargetChosen(None) => {}

            Message::ToggleSettingsMenu => {
                self.settings_menu_open = !self.settings_menu_open;
            }
            Message::ToggleDarkMode => {
                self.config.dark_mode = !self.config.dark_mode;
                self.settings_menu_open = false;
                self.reproject();
            }
            Message::LayoutSelected(preset) => {
                self.config.layout = preset;
                self.reproject();
            }
        }
        Task::none()
    }

    fn submit(&mut self) -> Task<Message> {
        let request = match self.form.begin_submit() {
            Ok(request) => request,
            Err(e) => {
                self.status = e.to_string();
                return Task::none();
            }
        };

        match self.client.clone() {
            Ok(client) => {
                self.status = "Generating estimation...".to_string();
                Task::perform(async move { client.submit(&request).await }, Message::SubmitFinished)
            }
            Err(e) => {
                self.form.finish_submit(Err(e.clone()));
                self.status = e.to_string();
                Task::none()
            }
        }
    }

    /// Move the stored handoff out of the slot and into a fresh renderer.
    fn open_report(&mut self) {
        let handoff = self.slot.take();
        self.unsaved_response = handoff.clone();
        self.show_report(handoff.map(|h| h.raw));
    }

    fn show_report(&mut self, raw: Option<String>) {
        self.renderer = ResultRenderer::new(self.report_layout());
        self.renderer.load(raw.as_deref());
        self.report_raw = raw;
        self.route = Route::Report;

        self.status = match self.renderer.state() {
            RenderState::Ready(_) => "Estimation ready".to_string(),
            state => state.error().map(|e| e.to_string()).unwrap_or_default(),
        };
    }

    /// Re-run the projection after a layout or theme change.
    fn reproject(&mut self) {
        if self.route == Route::Report {
            let raw = self.report_raw.take();
            self.show_report(raw);
        } else {
            self.renderer = ResultRenderer::new(self.report_layout());
        }
    }
}

async fn pick_response_file() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Open Estimation Response")
        .add_filter("Estimation Response", &["json"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

async fn pick_save_target() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Save Estimation Response")
        .add_filter("Estimation Response", &["json"])
        .set_file_name("estimation.json")
        .save_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}
