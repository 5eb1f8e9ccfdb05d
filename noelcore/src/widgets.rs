//! Custom widgets for the card shell — painter-drawn, flat, gold highlights

use crate::theme::NoelColors;
use egui::{Response, Ui, Widget};

/// A large menu button: white bg, 1px outline, gold fill when hovered or pressed.
pub struct NoelButton<'a> {
    text: &'a str,
}

impl<'a> NoelButton<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl<'a> Widget for NoelButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(280.0_f32.min(ui.available_width()), 40.0),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            let fill = if response.is_pointer_button_down_on() || response.hovered() {
                NoelColors::GOLD
            } else {
                NoelColors::WHITE
            };
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, NoelColors::BLACK));

            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.text,
                egui::FontId::proportional(15.0),
                NoelColors::BLACK,
            );
        }

        response
    }
}

/// Status bar: white bg, 1px black border
pub fn status_bar(ui: &mut Ui, text: &str) {
    egui::Frame::none()
        .fill(NoelColors::WHITE)
        .stroke(egui::Stroke::new(1.0, NoelColors::BLACK))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(NoelColors::BLACK));
        });
}

/// File list item for the open dialog.
/// Selected rows get a solid gold highlight.
pub struct FileListItem<'a> {
    name: &'a str,
    is_directory: bool,
    selected: bool,
}

impl<'a> FileListItem<'a> {
    pub fn new(name: &'a str, is_directory: bool) -> Self {
        Self { name, is_directory, selected: false }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl<'a> Widget for FileListItem<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let height = 20.0;
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::click(),
        );

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();

            let fill = if self.selected {
                NoelColors::GOLD
            } else {
                NoelColors::WHITE
            };
            painter.rect_filled(rect, 0.0, fill);

            // icon
            let icon = if self.is_directory { "📁" } else { "📄" };
            let icon_rect = egui::Rect::from_min_size(
                rect.min + egui::vec2(4.0, 0.0),
                egui::vec2(16.0, height),
            );
            painter.text(
                icon_rect.center(),
                egui::Align2::CENTER_CENTER,
                icon,
                egui::FontId::proportional(12.0),
                NoelColors::BLACK,
            );

            // filename
            painter.text(
                egui::pos2(rect.min.x + 24.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                self.name,
                egui::FontId::proportional(12.0),
                NoelColors::BLACK,
            );
        }

        response
    }
}
