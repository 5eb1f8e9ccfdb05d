//! noelcore — shared library for the noel greeting-card applications

pub mod resources;
pub mod storage;
pub mod theme;
pub mod verify;
pub mod widgets;

pub use theme::NoelTheme;
