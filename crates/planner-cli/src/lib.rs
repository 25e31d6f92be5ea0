//! CLI library components for Plot Planner.

pub mod logging;
pub mod render;
pub mod selection;
