#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use shadow_rs::shadow;

pub mod config;
mod exporter;
pub mod generator;
mod signals;

shadow!(build);
