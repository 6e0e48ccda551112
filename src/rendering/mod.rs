//! # Rendering Module
//!
//! Presentation pass using macroquad. Reads [`crate::GameSnapshot`]s only.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
