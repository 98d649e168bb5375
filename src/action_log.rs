use serde::{Deserialize, Serialize};

use crate::grid::CellState;

/// User actions that change the grid or the simulation mode
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Primary button pressed on the grid at absolute (row, col)
    EditStart { row: usize, col: usize },
    /// Primary button released; `toggled` cells were flipped during the stroke
    EditFinish { toggled: usize },
    /// A single cell flipped by editing
    ToggleCell { row: usize, col: usize, state: CellState },
    /// Play/pause switched; `running` is the new mode
    TogglePause { running: bool },
    /// One generation advanced on request while paused
    Step,
    /// Visible width changed to `nb_cells`
    Zoom { nb_cells: usize },
    /// Every cell killed
    Clear,
    /// Grid reseeded with a named start pattern
    Seed { pattern: String, cells: usize },
    /// Pattern pasted from the clipboard
    Paste { cells: usize },
}

/// Logged action with timestamp
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds of simulated clock since start
    pub timestamp_ms: u64,
    /// Generation the grid was at when the action happened
    pub generation: u64,
    pub action: Action,
}

/// Action logger
#[derive(Default)]
pub struct ActionLog {
    actions: Vec<LoggedAction>,
}

impl ActionLog {
    pub fn new() -> Self {
        ActionLog::default()
    }

    pub fn log(&mut self, timestamp_ms: u64, generation: u64, action: Action) {
        log::trace!("[{:6}ms] gen {} {:?}", timestamp_ms, generation, action);
        self.actions.push(LoggedAction {
            timestamp_ms,
            generation,
            action,
        });
    }

    /// Get all logged actions
    pub fn actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut strokes = 0;
        let mut toggles = 0;
        let mut pauses = 0;
        let mut steps = 0;
        let mut zooms = 0;
        let mut resets = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::EditStart { .. } => strokes += 1,
                Action::ToggleCell { .. } => toggles += 1,
                Action::TogglePause { .. } => pauses += 1,
                Action::Step => steps += 1,
                Action::Zoom { .. } => zooms += 1,
                Action::Clear | Action::Seed { .. } | Action::Paste { .. } => resets += 1,
                Action::EditFinish { .. } => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);
        let last_generation = self.actions.last().map_or(0, |last| last.generation);

        format!(
            "Session Duration: {}ms (last action at generation {})\n\
             Total Events: {}\n\
             Editing: {} strokes, {} cells toggled\n\
             Control: {} play/pause, {} single steps, {} zooms, {} grid resets",
            duration,
            last_generation,
            self.actions.len(),
            strokes,
            toggles,
            pauses,
            steps,
            zooms,
            resets
        )
    }
}
