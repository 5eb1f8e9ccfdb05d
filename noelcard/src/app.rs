//! The greeting-card shell.
//!
//! Menu mode offers the three card actions (key check, slideshow, music);
//! Present mode takes over the window and shows one slide at a time.

use crate::audio::MusicPlayer;
use crate::slides::{parse_deck, Slide};
use crate::viewer::{load_slide_image, SlideShow, DISPLAY_SIZE};
use egui::{Context, Key, TextureHandle, TextureOptions, Vec2};
use noelcore::resources::resource_path;
use noelcore::storage::{documents_dir, FilePicker};
use noelcore::theme::NoelColors;
use noelcore::verify::keys_match;
use noelcore::widgets::{status_bar, NoelButton};
use std::collections::HashMap;
use std::path::PathBuf;

const MENU_WINDOW: Vec2 = Vec2::new(500.0, 400.0);
const PRESENT_WINDOW: Vec2 = Vec2::new(820.0, 720.0);

#[derive(PartialEq)]
enum Mode {
    Menu,
    Present,
}

pub struct NoelCardApp {
    mode: Mode,
    /// Bundled deck document, or the path given on the command line.
    deck_path: PathBuf,
    reference_key: PathBuf,
    music_path: PathBuf,
    show: Option<SlideShow>,
    /// Uploaded textures, keyed by resolved image path.
    textures: HashMap<PathBuf, TextureHandle>,
    /// Image paths that failed to load, with the message shown inline.
    failed_images: HashMap<PathBuf, String>,
    music: MusicPlayer,
    status: String,
    show_key_picker: bool,
    key_picker: FilePicker,
    show_about: bool,
}

impl NoelCardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, deck_override: Option<PathBuf>) -> Self {
        Self {
            mode: Mode::Menu,
            deck_path: deck_override.unwrap_or_else(|| resource_path("presentation.html")),
            reference_key: resource_path("assets/key.asc"),
            music_path: resource_path("assets/joyeux_noel.mp3"),
            show: None,
            textures: HashMap::new(),
            failed_images: HashMap::new(),
            music: MusicPlayer::new(),
            status: "ready".into(),
            show_key_picker: false,
            key_picker: FilePicker::for_extension(documents_dir(), "asc"),
            show_about: false,
        }
    }

    /// The "authentication" of the original card: the chosen file must be
    /// byte-identical to the bundled reference key. Equality testing only.
    fn verify_key(&mut self, candidate: PathBuf) {
        match keys_match(&candidate, &self.reference_key) {
            Ok(true) => self.status = "key accepted".into(),
            Ok(false) => self.status = "key rejected: file does not match".into(),
            Err(e) => self.status = format!("key check failed: {e}"),
        }
    }

    fn open_card(&mut self, ctx: &Context) {
        let text = match std::fs::read_to_string(&self.deck_path) {
            Ok(t) => t,
            Err(e) => {
                self.status = format!("cannot open {}: {e}", self.deck_path.display());
                return;
            }
        };

        let slides = parse_deck(&text);
        if slides.is_empty() {
            self.status = format!("no slides found in {}", self.deck_path.display());
            return;
        }

        let base_dir = self
            .deck_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        self.status = format!("presentation open — {} slides", slides.len());
        self.show = Some(SlideShow::new(slides, base_dir));
        self.textures.clear();
        self.failed_images.clear();
        self.mode = Mode::Present;
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(PRESENT_WINDOW));

        // The card starts its music with the slideshow.
        if !self.music.is_playing() {
            if let Err(e) = self.music.play(&self.music_path) {
                self.status = e;
            }
        }
    }

    fn close_card(&mut self, ctx: &Context) {
        self.mode = Mode::Menu;
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(MENU_WINDOW));
    }

    fn toggle_music(&mut self) {
        match self.music.toggle(&self.music_path) {
            Ok(true) => self.status = "♪ music playing".into(),
            Ok(false) => self.status = "music stopped".into(),
            Err(e) => self.status = e,
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        noelcore::theme::consume_special_keys(ctx);

        let (left, right, escape) = ctx.input(|i| {
            (
                i.key_pressed(Key::ArrowLeft),
                i.key_pressed(Key::ArrowRight),
                i.key_pressed(Key::Escape),
            )
        });

        match self.mode {
            Mode::Present => {
                if let Some(show) = self.show.as_mut() {
                    if right {
                        show.next();
                    }
                    if left {
                        show.prev();
                    }
                }
                if escape {
                    self.close_card(ctx);
                }
            }
            Mode::Menu => {
                if escape {
                    self.show_key_picker = false;
                    self.show_about = false;
                }
            }
        }
    }

    /// Decode and upload the current slide's image, once per resolved path.
    fn ensure_slide_texture(&mut self, ctx: &Context) {
        let Some(show) = self.show.as_mut() else { return };
        let Some(Slide::Image(src)) = show.current().cloned() else {
            return;
        };

        let resolved = show.resolve_image_path(&src);
        if self.textures.contains_key(&resolved) || self.failed_images.contains_key(&resolved) {
            return;
        }

        match show.image_for(resolved.clone(), load_slide_image) {
            Ok(img) => {
                let img = img.clone();
                let name = format!("slide:{}", resolved.display());
                self.textures
                    .insert(resolved, ctx.load_texture(name, img, TextureOptions::LINEAR));
            }
            Err(e) => {
                self.failed_images.insert(resolved, e);
            }
        }
    }

    fn render_present(&mut self, ui: &mut egui::Ui) {
        let Some(show) = self.show.as_ref() else { return };
        let rect = ui.available_rect_before_wrap();

        match show.current() {
            Some(Slide::Text(text)) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(rect.height() / 3.0);
                    ui.label(
                        egui::RichText::new(text)
                            .size(36.0)
                            .strong()
                            .color(NoelColors::BLACK),
                    );
                });
            }
            Some(Slide::Image(src)) => {
                let resolved = show.resolve_image_path(src);
                if let Some(err) = self.failed_images.get(&resolved) {
                    ui.vertical_centered(|ui| {
                        ui.add_space(rect.height() / 3.0);
                        ui.label(
                            egui::RichText::new(format!("[image error: {err}]"))
                                .size(18.0)
                                .color(NoelColors::BLACK),
                        );
                    });
                } else if let Some(tex) = self.textures.get(&resolved) {
                    let display = Vec2::splat(DISPLAY_SIZE as f32);
                    let offset = ((rect.size() - display) * 0.5).max(Vec2::ZERO);
                    let img_rect = egui::Rect::from_min_size(rect.min + offset, display);

                    let _ = ui.allocate_rect(rect, egui::Sense::hover());
                    let painter = ui.painter_at(rect);
                    painter.rect_filled(rect, 0.0, NoelColors::WHITE);
                    painter.image(
                        tex.id(),
                        img_rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            }
            None => {}
        }
    }

    fn render_nav_bar(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        let (index, len) = match &self.show {
            Some(show) => (show.index(), show.len()),
            None => return,
        };
        let mut go_prev = false;
        let mut go_next = false;
        let mut close = false;

        ui.horizontal(|ui| {
            if ui.button(egui::RichText::new("◀").size(20.0)).clicked() {
                go_prev = true;
            }
            ui.label(format!("{} / {}", index + 1, len));
            if ui.button(egui::RichText::new("▶").size(20.0)).clicked() {
                go_next = true;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("close  esc").clicked() {
                    close = true;
                }
            });
        });

        if let Some(show) = self.show.as_mut() {
            if go_prev {
                show.prev();
            }
            if go_next {
                show.next();
            }
        }
        if close {
            self.close_card(ctx);
        }
    }

    fn render_menu(&mut self, ui: &mut egui::Ui, ctx: &Context) {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.label(
                egui::RichText::new("🎄 Joyeux Noël 🎄")
                    .size(30.0)
                    .strong()
                    .color(NoelColors::GOLD),
            );
            ui.label(
                egui::RichText::new("a little card with music and pictures")
                    .color(NoelColors::WHITE),
            );
            ui.add_space(30.0);

            if ui.add(NoelButton::new("🔐 verify key file…")).clicked() {
                self.key_picker.refresh();
                self.show_key_picker = true;
            }
            ui.add_space(10.0);
            if ui.add(NoelButton::new("🎁 open the card")).clicked() {
                self.open_card(ctx);
            }
            ui.add_space(10.0);
            let music_label = if self.music.is_playing() {
                "🎵 stop the music"
            } else {
                "🎵 play the music"
            };
            if ui.add(NoelButton::new(music_label)).clicked() {
                self.toggle_music();
            }
        });
    }

    fn render_key_picker(&mut self, ctx: &Context) {
        egui::Window::new("choose key file")
            .collapsible(false)
            .resizable(false)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.label(self.key_picker.dir.to_string_lossy().to_string());
                ui.separator();
                let mut picked: Option<PathBuf> = None;
                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    let entries = self.key_picker.entries.clone();
                    for (idx, entry) in entries.iter().enumerate() {
                        let sel = self.key_picker.selected == Some(idx);
                        let r = ui.add(
                            noelcore::widgets::FileListItem::new(&entry.name, entry.is_dir)
                                .selected(sel),
                        );
                        if r.clicked() {
                            self.key_picker.selected = Some(idx);
                        }
                        if r.double_clicked() {
                            if entry.is_dir {
                                self.key_picker.enter(entry.path.clone());
                            } else {
                                picked = Some(entry.path.clone());
                            }
                        }
                    }
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        self.show_key_picker = false;
                    }
                    if ui.button("verify").clicked() {
                        if let Some(e) = self.key_picker.selected_entry() {
                            if !e.is_dir {
                                picked = Some(e.path.clone());
                            }
                        }
                    }
                });
                if let Some(path) = picked {
                    self.verify_key(path);
                    self.show_key_picker = false;
                }
            });
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about noelCard")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("noelCard");
                    ui.label("version 0.1.0");
                    ui.add_space(8.0);
                    ui.label("a seasonal greeting card");
                });
                ui.add_space(8.0);
                ui.separator();
                ui.add_space(4.0);
                ui.label("features:");
                ui.label("  slideshow from a remark.js deck");
                ui.label("  looping music");
                ui.add_space(4.0);
                ui.label("frameworks:");
                ui.label("  egui/eframe (MIT), rodio (MIT)");
                ui.label("  image-rs (MIT)");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }
}

impl eframe::App for NoelCardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        if self.mode == Mode::Present {
            self.ensure_slide_texture(ctx);
            egui::TopBottomPanel::bottom("nav").show(ctx, |ui| {
                self.render_nav_bar(ui, ctx);
            });
            egui::CentralPanel::default()
                .frame(egui::Frame::none().fill(NoelColors::WHITE))
                .show(ctx, |ui| self.render_present(ui));
            return;
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            noelcore::theme::menu_bar(ui, |ui| {
                ui.menu_button("card", |ui| {
                    if ui.button("verify key file…").clicked() {
                        self.key_picker.refresh();
                        self.show_key_picker = true;
                        ui.close_menu();
                    }
                    if ui.button("open the card").clicked() {
                        self.open_card(ctx);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about noelCard").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            status_bar(ui, &self.status);
        });
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(NoelColors::GREEN))
            .show(ctx, |ui| self.render_menu(ui, ctx));

        if self.show_key_picker {
            self.render_key_picker(ctx);
        }
        if self.show_about {
            self.render_about(ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Best-effort: silence the music when the window goes away.
        self.music.stop();
    }
}
