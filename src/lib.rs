pub mod action_log;
pub mod config;
pub mod controller;
pub mod grid;
pub mod patterns;
pub mod viewport;

pub use config::Config;
pub use controller::{ControlFlow, Controller, InputEvent, PointerButton, SimulationMode};
pub use grid::{CellState, Grid, GridView, VisibleExtent};
pub use viewport::{layout, visible_extent, Layout, Viewport};
