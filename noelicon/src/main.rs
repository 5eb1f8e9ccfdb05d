//! noelicon — favicon set generator.
//!
//! usage: noelicon <source-image> [output-dir]

mod favicon;

use favicon::{generate_favicons, NativeBundler};
use std::path::PathBuf;

fn main() {
    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(s) => PathBuf::from(s),
        None => {
            eprintln!("usage: noelicon <source-image> [output-dir]");
            std::process::exit(2);
        }
    };
    let out_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let bundler = NativeBundler::detect();

    match generate_favicons(&source, &out_dir, bundler) {
        Ok(report) => {
            for artifact in &report.artifacts {
                println!("created: {}", artifact.display());
            }
            if let Some(note) = &report.advisory {
                // Advisory only — the PNG and ICO outputs above are valid.
                eprintln!("native icon bundle failed: {note}");
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
