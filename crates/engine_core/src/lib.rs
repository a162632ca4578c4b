//! Core types shared across the OpenWalk crates:
//! - Game mode store (menu vs. play)
//! - Frame time management

pub mod mode;
pub mod time;

pub use mode::*;
pub use time::*;
