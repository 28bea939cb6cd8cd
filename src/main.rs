use eframe::egui;

mod app;
mod localizations;
mod models;
mod options;
mod relay;
mod runner;
mod supervisor;
mod theme;
mod ui;
mod ytdlp;

use app::MediaGrabApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Default download destination, matching the platform downloads folder.
    let destination = dirs::download_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
        .join("Media Downloads");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 640.0])
            .with_min_inner_size([640.0, 540.0])
            .with_title("Media Downloader"),
        ..Default::default()
    };

    eframe::run_native(
        "Media Downloader",
        options,
        Box::new(move |cc| Box::new(MediaGrabApp::new(cc, destination))),
    )
}
