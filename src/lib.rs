//! Grid simulation of a snake that greedily chases a player-steered target.
//!
//! [`engine::SimulationEngine`] owns all state and is advanced by
//! [`engine::SimulationEngine::step`]; hosts read it back through
//! [`engine::SimulationEngine::snapshot`].

pub mod config;
pub mod engine;
pub mod food;
pub mod headless;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ticker;
pub mod ui;
