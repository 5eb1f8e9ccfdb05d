//! Greeting-card theme
//!
//! Fir green panels, gold accents, white content surfaces.
//! Zero rounding and 1px strokes everywhere.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

/// The card palette.
pub struct NoelColors;

impl NoelColors {
    /// Fir green — the shell background.
    pub const GREEN: Color32 = Color32::from_rgb(44, 85, 48);
    /// Gold — headings and selection.
    pub const GOLD: Color32 = Color32::from_rgb(255, 221, 68);
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
}

/// Theme configuration for the noel apps
pub struct NoelTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for NoelTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 24.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 6.0,
        }
    }
}

impl NoelTheme {
    /// Apply the card theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();

        visuals.window_fill = NoelColors::WHITE;
        visuals.panel_fill = NoelColors::GREEN;
        visuals.faint_bg_color = NoelColors::WHITE;
        visuals.extreme_bg_color = NoelColors::WHITE;

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;

        visuals.window_stroke = Stroke::new(1.0, NoelColors::BLACK);

        let flat = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = NoelColors::WHITE;
            ws.weak_bg_fill = NoelColors::WHITE;
            ws.bg_stroke = Stroke::new(1.0, NoelColors::BLACK);
            ws.fg_stroke = Stroke::new(1.0, NoelColors::BLACK);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.noninteractive);
        flat(&mut visuals.widgets.inactive);
        flat(&mut visuals.widgets.hovered);
        flat(&mut visuals.widgets.active);
        flat(&mut visuals.widgets.open);
        visuals.widgets.hovered.bg_fill = NoelColors::GOLD;
        visuals.widgets.active.bg_fill = NoelColors::GOLD;

        visuals.selection.bg_fill = NoelColors::GOLD;
        visuals.selection.stroke = Stroke::new(1.0, NoelColors::BLACK);

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);

        ctx.set_style(style);
    }
}

/// Menu bar styling helper
pub fn menu_bar(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(NoelColors::WHITE)
        .stroke(Stroke::new(1.0, NoelColors::BLACK))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| {
            ui.horizontal(add_contents);
        });
}

/// Consume problematic key events to prevent unwanted egui behaviors.
/// Call this at the start of your app's update() function.
/// - Tab: prevents menu focus navigation
/// - Cmd+/Cmd-: prevents zoom scaling
pub fn consume_special_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|e| match e {
            egui::Event::Key { key: egui::Key::Tab, .. } => false,
            egui::Event::Text(text) if text.contains('\t') => false,
            egui::Event::Key { key, modifiers, .. }
                if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals) => false,
            _ => true,
        });
    });
}
