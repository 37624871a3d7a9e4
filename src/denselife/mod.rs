//! DenseLife engine internals and public API.

mod controller;
mod engine;
mod grid;
mod init;
mod kernel;
mod pixels;
mod rules;

pub use controller::{ParamsError, SimParams, Simulation, legal_scale_factors};
pub use engine::DenseLife;
pub use engine::DenseLifeConfig;
pub use grid::Grid;
pub use pixels::{BLACK, PixelBuffer, WHITE};
pub use rules::{RuleParseError, RuleTable, Rules, Ruleset};
