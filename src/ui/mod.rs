use eframe::egui;
use rfd::FileDialog;

use crate::localizations::Localizations;
use crate::models::{
    ItemLimit, JobState, LayoutPolicy, MediaType, PlatformHint, QualityCeiling, Selections,
};
use crate::supervisor::JobSupervisor;
use crate::theme::*;

pub fn render_url_input(
    ui: &mut egui::Ui,
    selections: &mut Selections,
    localizer: &Localizations,
) -> egui::Response {
    ui.label(
        localizer
            .lookup_single_language("url-label", None)
            .unwrap_or_else(|| "Video/Audio URL:".to_string()),
    );

    egui::Frame::group(ui.style())
        .fill(INPUT_FRAME_BG)
        .stroke(egui::Stroke::new(1.0, egui::Color32::LIGHT_GRAY))
        .rounding(4.0)
        .show(ui, |ui| {
            ui.add_sized(
                [ui.available_width(), 40.0],
                egui::TextEdit::singleline(&mut selections.url)
                    .hint_text(
                        localizer
                            .lookup_single_language("url-placeholder", None)
                            .unwrap_or_else(|| "Enter video or audio URL".to_string()),
                    )
                    .font(egui::FontId::proportional(16.0)),
            )
        })
        .inner
}

pub fn render_platform_selector(
    ui: &mut egui::Ui,
    selections: &mut Selections,
    localizer: &Localizations,
) {
    ui.horizontal(|ui| {
        ui.label(
            localizer
                .lookup_single_language("platform-label", None)
                .unwrap_or_else(|| "Platform:".to_string()),
        );
        egui::ComboBox::from_id_source("platform-hint")
            .width(COMBO_WIDTH)
            .selected_text(selections.platform.label())
            .show_ui(ui, |ui| {
                for platform in PlatformHint::ALL {
                    ui.selectable_value(&mut selections.platform, platform, platform.label());
                }
            });
    });
}

pub fn render_options(
    ui: &mut egui::Ui,
    selections: &mut Selections,
    localizer: &Localizations,
) {
    let label = |key: &str, fallback: &str| {
        localizer
            .lookup_single_language(key, None)
            .unwrap_or_else(|| fallback.to_string())
    };

    ui.label(
        egui::RichText::new(label("options-title", "Download Options")).strong(),
    );
    ui.add_space(4.0);

    egui::Grid::new("download-options")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label(label("media-limit-label", "Media Limit:"));
            egui::ComboBox::from_id_source("media-limit")
                .width(COMBO_WIDTH)
                .selected_text(selections.item_limit.label())
                .show_ui(ui, |ui| {
                    for choice in ItemLimit::CHOICES {
                        ui.selectable_value(&mut selections.item_limit, choice, choice.label());
                    }
                });
            ui.end_row();

            ui.label(label("download-type-label", "Download Type:"));
            egui::ComboBox::from_id_source("download-type")
                .width(COMBO_WIDTH)
                .selected_text(selections.media_type.label())
                .show_ui(ui, |ui| {
                    for media_type in MediaType::ALL {
                        ui.selectable_value(
                            &mut selections.media_type,
                            media_type,
                            media_type.label(),
                        );
                    }
                });
            ui.end_row();

            ui.label(label("quality-label", "Video Quality:"));
            egui::ComboBox::from_id_source("video-quality")
                .width(COMBO_WIDTH)
                .selected_text(selections.quality.label())
                .show_ui(ui, |ui| {
                    for quality in QualityCeiling::ALL {
                        ui.selectable_value(&mut selections.quality, quality, quality.label());
                    }
                });
            ui.end_row();

            ui.label(label("organize-by-label", "Organize by:"));
            egui::ComboBox::from_id_source("organize-by")
                .width(COMBO_WIDTH)
                .selected_text(selections.layout.label())
                .show_ui(ui, |ui| {
                    for layout in LayoutPolicy::ALL {
                        ui.selectable_value(&mut selections.layout, layout, layout.label());
                    }
                });
            ui.end_row();
        });
}

pub fn render_destination_selector(
    ui: &mut egui::Ui,
    selections: &mut Selections,
    localizer: &Localizations,
) {
    ui.vertical(|ui| {
        ui.label(
            localizer
                .lookup_single_language("save-location-label", None)
                .unwrap_or_else(|| "Save Location:".to_string()),
        );

        ui.horizontal(|ui| {
            let mut destination = selections.destination.to_string_lossy().into_owned();
            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(4.0)
                .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                .show(ui, |ui| {
                    ui.set_min_height(36.0);
                    let response = ui.add_sized(
                        [ui.available_width() - 110.0, 36.0],
                        egui::TextEdit::singleline(&mut destination)
                            .frame(false)
                            .margin(egui::vec2(8.0, 8.0)),
                    );
                    if response.changed() {
                        selections.destination = destination.clone().into();
                    }
                });

            let button = egui::Button::new(
                egui::RichText::new(
                    localizer
                        .lookup_single_language("browse-button", None)
                        .unwrap_or_else(|| "Browse...".to_string()),
                )
                .size(14.0),
            )
            .min_size(egui::vec2(100.0, 36.0))
            .fill(ui.visuals().widgets.inactive.bg_fill)
            .rounding(4.0);

            if ui.add(button).clicked() {
                if let Some(path) = FileDialog::new()
                    .set_directory(&selections.destination)
                    .pick_folder()
                {
                    selections.destination = path;
                }
            }
        });
    });
}

pub fn render_status(
    ui: &mut egui::Ui,
    supervisor: &JobSupervisor,
    last_error: Option<&str>,
    localizer: &Localizations,
) {
    ui.label(
        egui::RichText::new(
            localizer
                .lookup_single_language("progress-title", None)
                .unwrap_or_else(|| "Download Progress".to_string()),
        )
        .strong(),
    );
    ui.add_space(4.0);

    egui::Frame::group(ui.style())
        .fill(STATUS_FRAME_BG)
        .rounding(8.0)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.add_space(10.0);

                let status_text = if let Some(error) = last_error {
                    egui::RichText::new(format!("Error: {}", error)).color(TEXT_ERROR)
                } else if let JobState::Failed { message } = supervisor.state() {
                    egui::RichText::new(format!("Error: {}", message)).color(TEXT_ERROR)
                } else {
                    egui::RichText::new(supervisor.status_line()).color(SECONDARY_TEXT)
                };
                ui.label(status_text);

                ui.add_space(10.0);
                let progress_bar =
                    egui::ProgressBar::new(supervisor.progress() / 100.0).show_percentage();
                ui.add(progress_bar);

                ui.add_space(10.0);
            });
        });
}
