//! noelCard — a greeting card: slideshow, looping music, and a key check.

mod app;
mod audio;
mod slides;
mod viewer;

use app::NoelCardApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    // Optional deck document override
    let deck_override = std::env::args().nth(1).map(std::path::PathBuf::from);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([500.0, 400.0])
            .with_title("joyeux noël"),
        ..Default::default()
    };
    eframe::run_native("joyeux noël", options, Box::new(move |cc| {
        noelcore::NoelTheme::default().apply(&cc.egui_ctx);
        Box::new(NoelCardApp::new(cc, deck_override))
    }))
}
