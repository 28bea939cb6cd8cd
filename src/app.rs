use std::path::PathBuf;

use eframe::egui::{self, Stroke};

use crate::localizations::Localizations;
use crate::models::Selections;
use crate::supervisor::JobSupervisor;
use crate::theme::*;
use crate::ui;
use crate::ytdlp::YtDlpFetcher;

pub struct MediaGrabApp {
    selections: Selections,
    supervisor: JobSupervisor,
    localizer: Localizations,
    /// UI-level validation error, distinct from a failed job.
    last_error: Option<String>,
}

impl MediaGrabApp {
    pub fn new(cc: &eframe::CreationContext<'_>, destination: PathBuf) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut supervisor = JobSupervisor::new();
        let ctx = cc.egui_ctx.clone();
        supervisor.set_waker(move || ctx.request_repaint());

        Self {
            selections: Selections {
                destination,
                ..Selections::default()
            },
            supervisor,
            localizer: Localizations::new(),
            last_error: None,
        }
    }

    fn start_download(&mut self) {
        if self.supervisor.is_running() {
            return;
        }
        self.last_error = None;

        if self.selections.url.trim().is_empty() {
            self.last_error = Some(
                self.localizer
                    .lookup_single_language("error-no-url", None)
                    .unwrap_or_else(|| "Please enter a video/audio URL".to_string()),
            );
            return;
        }

        // The core only builds a path template; making sure the destination
        // exists is this layer's job.
        if let Err(err) = std::fs::create_dir_all(&self.selections.destination) {
            self.last_error = Some(format!("Could not create download directory: {}", err));
            return;
        }

        let fetcher = match YtDlpFetcher::locate() {
            Ok(fetcher) => fetcher,
            Err(_) => {
                self.last_error = Some(
                    self.localizer
                        .lookup_single_language("error-ytdlp-missing", None)
                        .unwrap_or_else(|| "yt-dlp not found".to_string()),
                );
                return;
            }
        };

        if let Err(err) = self.supervisor.start(&self.selections, fetcher) {
            self.last_error = Some(err.to_string());
        }
    }

    fn render_download_button(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            let button_text = self
                .localizer
                .lookup_single_language("download-button", None)
                .unwrap_or_else(|| "Start Download".to_string());

            let download_button = egui::Button::new(
                egui::RichText::new(button_text)
                    .size(BUTTON_FONT_SIZE)
                    .color(BUTTON_MAIN_TEXT),
            )
            .min_size(MIN_SIZE_BUTTON)
            .fill(PRIMARY_BUTTON_BG)
            .rounding(ROUNDING_BUTTON)
            .stroke(Stroke::new(1.0, BORDER_COLOR));

            if ui
                .add_enabled(!self.supervisor.is_running(), download_button)
                .clicked()
            {
                self.start_download();
            }
        });
    }
}

impl eframe::App for MediaGrabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Fold any worker events into the observable state before drawing.
        self.supervisor.pump();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(
                self.localizer
                    .lookup_single_language("app-title", None)
                    .unwrap_or_else(|| "Media Downloader".to_string()),
            );

            ui.add_space(16.0);

            let url_response = ui::render_url_input(ui, &mut self.selections, &self.localizer);
            if url_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.start_download();
            }

            ui.add_space(8.0);
            ui::render_platform_selector(ui, &mut self.selections, &self.localizer);

            ui.add_space(16.0);
            ui::render_options(ui, &mut self.selections, &self.localizer);

            ui.add_space(16.0);
            ui::render_destination_selector(ui, &mut self.selections, &self.localizer);

            ui.add_space(16.0);
            self.render_download_button(ui);

            ui.add_space(16.0);
            ui::render_status(ui, &self.supervisor, self.last_error.as_deref(), &self.localizer);
        });
    }
}
