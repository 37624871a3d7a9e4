//! Dense-grid life-like cellular automaton (LLCA) engine.

pub mod denselife;
pub use denselife::{DenseLife, DenseLifeConfig, Rules, SimParams, Simulation};
