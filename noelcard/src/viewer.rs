//! Slideshow state: current slide, clamped navigation, image cache.
//!
//! All of the viewer's mutable state lives here so the egui layer only
//! reads it and forwards button/key events. Nothing in this module touches
//! a live UI, which keeps navigation and caching unit-testable.

use crate::slides::Slide;
use egui::ColorImage;
use image::imageops::FilterType;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

/// Slide images are shown at a fixed square size, matching the shipped
/// card's layout. Non-square sources get distorted; that is the original
/// behavior and is kept.
pub const DISPLAY_SIZE: u32 = 500;

pub struct SlideShow {
    slides: Vec<Slide>,
    index: usize,
    base_dir: PathBuf,
    cache: HashMap<PathBuf, ColorImage>,
}

impl SlideShow {
    /// `base_dir` is the directory of the deck document; image references
    /// are resolved relative to it.
    pub fn new(slides: Vec<Slide>, base_dir: PathBuf) -> Self {
        Self { slides, index: 0, base_dir, cache: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    /// Advance one slide; stays on the last slide at the end.
    pub fn next(&mut self) {
        if self.index + 1 < self.slides.len() {
            self.index += 1;
        }
    }

    /// Go back one slide; stays on the first slide at the start.
    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Resolve a document-relative image reference against the deck's
    /// directory. Forward slashes become the platform separator and a
    /// leading separator is dropped so the reference stays relative.
    pub fn resolve_image_path(&self, src: &str) -> PathBuf {
        let native = src.replace('/', MAIN_SEPARATOR_STR);
        let relative = native.trim_start_matches(MAIN_SEPARATOR);
        self.base_dir.join(relative)
    }

    /// The display image for a resolved path. The loader runs only on a
    /// cache miss; revisiting a slide is a lookup.
    pub fn image_for<F>(&mut self, resolved: PathBuf, loader: F) -> Result<&ColorImage, String>
    where
        F: FnOnce(&Path) -> Result<ColorImage, String>,
    {
        match self.cache.entry(resolved) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let img = loader(entry.key())?;
                Ok(entry.insert(img))
            }
        }
    }
}

/// Default loader: decode with the image crate and scale to the fixed
/// display square.
pub fn load_slide_image(path: &Path) -> Result<ColorImage, String> {
    let img = image::open(path).map_err(|e| e.to_string())?;
    let resized = img.resize_exact(DISPLAY_SIZE, DISPLAY_SIZE, FilterType::Lanczos3);
    let rgba = resized.to_rgba8();
    Ok(ColorImage::from_rgba_unmultiplied(
        [DISPLAY_SIZE as usize, DISPLAY_SIZE as usize],
        rgba.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    fn text_deck(n: usize) -> Vec<Slide> {
        (0..n).map(|i| Slide::Text(format!("slide {i}"))).collect()
    }

    #[test]
    fn starts_on_first_slide() {
        let show = SlideShow::new(text_deck(3), PathBuf::from("."));
        assert_eq!(show.index(), 0);
        assert_eq!(show.current(), Some(&Slide::Text("slide 0".into())));
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        for n in 1..=5 {
            let mut show = SlideShow::new(text_deck(n), PathBuf::from("."));

            show.prev();
            assert_eq!(show.index(), 0, "prev on first slide must stay, n={n}");

            for _ in 0..n + 3 {
                show.next();
            }
            assert_eq!(show.index(), n - 1, "next past the end must clamp, n={n}");

            for _ in 0..n + 3 {
                show.prev();
            }
            assert_eq!(show.index(), 0);
        }
    }

    #[test]
    fn empty_deck_is_safe() {
        let mut show = SlideShow::new(Vec::new(), PathBuf::from("."));
        assert!(show.is_empty());
        assert_eq!(show.current(), None);
        show.next();
        show.prev();
        assert_eq!(show.index(), 0);
    }

    #[test]
    fn image_reference_resolves_against_deck_dir() {
        let show = SlideShow::new(Vec::new(), PathBuf::from("/decks/noel"));
        assert_eq!(
            show.resolve_image_path("/images/sapin.png"),
            PathBuf::from("/decks/noel/images/sapin.png"),
        );
        assert_eq!(
            show.resolve_image_path("images/sapin.png"),
            PathBuf::from("/decks/noel/images/sapin.png"),
        );
    }

    #[test]
    fn repeat_visits_hit_the_cache() {
        let mut show = SlideShow::new(Vec::new(), PathBuf::from("."));
        let path = PathBuf::from("images/sapin.png");
        let mut loads = 0;

        let img = show
            .image_for(path.clone(), |_| {
                loads += 1;
                Ok(ColorImage::new([2, 2], Color32::WHITE))
            })
            .unwrap();
        assert_eq!(img.size, [2, 2]);

        show.image_for(path.clone(), |_| {
            loads += 1;
            Ok(ColorImage::new([2, 2], Color32::BLACK))
        })
        .unwrap();

        assert_eq!(loads, 1, "second visit must not invoke the loader");
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let mut show = SlideShow::new(Vec::new(), PathBuf::from("."));
        let path = PathBuf::from("missing.png");

        let err = show.image_for(path.clone(), |_| Err("no such file".into()));
        assert!(err.is_err());

        // A later successful load still goes through.
        let ok = show.image_for(path, |_| Ok(ColorImage::new([1, 1], Color32::WHITE)));
        assert!(ok.is_ok());
    }
}
