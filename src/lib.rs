//! Sizing, power planning and quoting for LED video-wall installations.

pub mod application;
pub mod domain;
pub mod infrastructure;
