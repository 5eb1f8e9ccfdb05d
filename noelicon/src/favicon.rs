//! Favicon set generation.
//!
//! One source image in, a fixed family of artifacts out: a PNG per
//! configured size, a multi-resolution `favicon.ico`, and — when the
//! external `iconutil` converter is present — a macOS `favicon.icns`
//! built through a temporary staging directory. The `.icns` step is
//! advisory: its failure never fails the run, since the PNG and ICO
//! outputs are already valid on their own.

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Standalone PNG sizes.
pub const PNG_SIZES: [u32; 7] = [16, 32, 48, 64, 128, 192, 256];
/// Frame sizes bundled into `favicon.ico`.
pub const ICO_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];
/// Base sizes staged for `iconutil`; each also gets an `@2x` variant when
/// the source is large enough.
pub const ICONSET_SIZES: [u32; 5] = [16, 32, 128, 256, 512];

#[derive(Error, Debug)]
pub enum FaviconError {
    #[error("source image {} does not exist", .0.display())]
    MissingSource(PathBuf),
    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a generation run produced.
#[derive(Debug, Default)]
pub struct FaviconReport {
    /// Every artifact written, in creation order.
    pub artifacts: Vec<PathBuf>,
    /// Non-fatal message from the native-bundle step, if it failed.
    pub advisory: Option<String>,
}

/// Whether this machine can produce a native `.icns` bundle.
/// Resolved once at startup; everywhere else the variants behave the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeBundler {
    /// macOS with the `iconutil` tool on the PATH.
    Iconutil,
    /// No native converter here; the bundle step is a no-op.
    Unavailable,
}

impl NativeBundler {
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") && iconutil_available() {
            NativeBundler::Iconutil
        } else {
            NativeBundler::Unavailable
        }
    }

    fn bundle(&self, img: &DynamicImage, out_dir: &Path) -> Result<Option<PathBuf>, String> {
        match self {
            NativeBundler::Unavailable => Ok(None),
            NativeBundler::Iconutil => build_icns(img, out_dir).map(Some),
        }
    }
}

fn iconutil_available() -> bool {
    Command::new("iconutil").arg("--help").output().is_ok()
}

/// Generate the full favicon set from `source` into `out_dir`.
///
/// A missing source aborts before anything is written. Failures writing
/// the PNGs or the ICO fail the run. A failing native-bundle step is
/// recorded on the report instead.
pub fn generate_favicons(
    source: &Path,
    out_dir: &Path,
    bundler: NativeBundler,
) -> Result<FaviconReport, FaviconError> {
    if !source.exists() {
        return Err(FaviconError::MissingSource(source.to_path_buf()));
    }

    std::fs::create_dir_all(out_dir).map_err(|source| FaviconError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let img = image::open(source).map_err(|e| FaviconError::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;

    let mut report = FaviconReport::default();

    for size in PNG_SIZES {
        let path = out_dir.join(format!("favicon-{size}x{size}.png"));
        img.resize_exact(size, size, FilterType::Lanczos3)
            .save(&path)
            .map_err(|e| FaviconError::Encode { path: path.clone(), source: e })?;
        report.artifacts.push(path);
    }

    let ico_path = out_dir.join("favicon.ico");
    write_ico(&img, &ico_path)?;
    report.artifacts.push(ico_path);

    match bundler.bundle(&img, out_dir) {
        Ok(Some(icns)) => report.artifacts.push(icns),
        Ok(None) => {}
        Err(msg) => report.advisory = Some(msg),
    }

    Ok(report)
}

/// Write a multi-resolution ICO containing every size in [`ICO_SIZES`].
fn write_ico(img: &DynamicImage, path: &Path) -> Result<(), FaviconError> {
    let io_err = |source| FaviconError::Io { path: path.to_path_buf(), source };

    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    for size in ICO_SIZES {
        let rgba = img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
        let frame = ico::IconImage::from_rgba_data(size, size, rgba.into_raw());
        dir.add_entry(ico::IconDirEntry::encode(&frame).map_err(io_err)?);
    }

    let file = File::create(path).map_err(io_err)?;
    dir.write(file).map_err(io_err)?;
    Ok(())
}

/// Stage size- and density-tagged PNGs and hand them to `iconutil`.
/// The staging directory is removed on the success path only, and that
/// removal is itself best-effort.
fn build_icns(img: &DynamicImage, out_dir: &Path) -> Result<PathBuf, String> {
    let staging = out_dir.join("favicon.iconset");
    std::fs::create_dir_all(&staging)
        .map_err(|e| format!("cannot create {}: {e}", staging.display()))?;

    let (w, h) = img.dimensions();
    let max_dim = w.max(h);

    for size in ICONSET_SIZES {
        let path = staging.join(format!("icon_{size}x{size}.png"));
        img.resize_exact(size, size, FilterType::Lanczos3)
            .save(&path)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;

        // Double-resolution variant, when the source is large enough
        if size * 2 <= max_dim {
            let path = staging.join(format!("icon_{size}x{size}@2x.png"));
            img.resize_exact(size * 2, size * 2, FilterType::Lanczos3)
                .save(&path)
                .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        }
    }

    let icns = out_dir.join("favicon.icns");
    let status = Command::new("iconutil")
        .arg("-c")
        .arg("icns")
        .arg(&staging)
        .arg("-o")
        .arg(&icns)
        .status()
        .map_err(|e| format!("cannot run iconutil: {e}"))?;

    if !status.success() {
        return Err(format!("iconutil exited with {status}"));
    }

    let _ = std::fs::remove_dir_all(&staging);
    Ok(icns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_source(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(w, h, Rgba([200, 30, 30, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn produces_one_png_per_size_with_exact_dimensions() {
        let tmp = tempfile::tempdir().unwrap();
        let source = write_source(tmp.path(), "source.png", 512, 512);
        let out = tmp.path().join("icons");

        let report = generate_favicons(&source, &out, NativeBundler::Unavailable).unwrap();

        for size in PNG_SIZES {
            let path = out.join(format!("favicon-{size}x{size}.png"));
            assert!(path.exists(), "missing {}", path.display());
            assert_eq!(image::image_dimensions(&path).unwrap(), (size, size));
        }
        // per-size PNGs plus the ico
        assert_eq!(report.artifacts.len(), PNG_SIZES.len() + 1);
        assert!(report.advisory.is_none());
    }

    #[test]
    fn ico_bundle_contains_all_configured_sizes() {
        let tmp = tempfile::tempdir().unwrap();
        let source = write_source(tmp.path(), "source.png", 256, 256);
        let out = tmp.path().join("icons");

        generate_favicons(&source, &out, NativeBundler::Unavailable).unwrap();

        let file = File::open(out.join("favicon.ico")).unwrap();
        let dir = ico::IconDir::read(file).unwrap();
        let mut frame_sizes: Vec<u32> = dir.entries().iter().map(|e| e.width()).collect();
        frame_sizes.sort_unstable();
        assert_eq!(frame_sizes, ICO_SIZES.to_vec());
    }

    #[test]
    fn missing_source_fails_without_output() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("icons");

        let err = generate_favicons(
            &tmp.path().join("nope.png"),
            &out,
            NativeBundler::Unavailable,
        );
        assert!(matches!(err, Err(FaviconError::MissingSource(_))));
        assert!(!out.exists(), "no output directory may be created");
    }

    #[test]
    fn non_square_source_still_yields_exact_squares() {
        let tmp = tempfile::tempdir().unwrap();
        let source = write_source(tmp.path(), "wide.png", 300, 200);
        let out = tmp.path().join("icons");

        generate_favicons(&source, &out, NativeBundler::Unavailable).unwrap();

        assert_eq!(
            image::image_dimensions(out.join("favicon-64x64.png")).unwrap(),
            (64, 64),
        );
    }

    #[test]
    fn unavailable_bundler_is_a_no_op() {
        let tmp = tempfile::tempdir().unwrap();
        let source = write_source(tmp.path(), "source.png", 64, 64);
        let out = tmp.path().join("icons");

        let report = generate_favicons(&source, &out, NativeBundler::Unavailable).unwrap();
        assert!(report.advisory.is_none());
        assert!(!out.join("favicon.icns").exists());
        assert!(!out.join("favicon.iconset").exists());
    }
}
