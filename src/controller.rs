use crate::action_log::{Action, ActionLog};
use crate::config::Config;
use crate::grid::{Grid, GridView};
use crate::patterns::{find_pattern, PatternError};
use crate::viewport::{Layout, Viewport};

/// Default delay between two generations while running
pub const UPDATE_TIME_MS: u64 = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Input already abstracted away from the windowing layer.
/// Pointer coordinates are window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    ZoomIn,
    ZoomOut,
    PointerDown { x: f32, y: f32, button: PointerButton },
    PointerMove { x: f32, y: f32 },
    PointerUp { button: PointerButton },
    TogglePause,
    Step,
    Clear,
    Reseed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationMode {
    Paused,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Transient UI state, mutated every tick
#[derive(Clone, Debug)]
pub struct InteractionState {
    pub mode: SimulationMode,
    /// One-shot request for a single generation, consumed by the next tick
    pub step_requested: bool,
    /// True while the primary button is held after a press on the grid
    pub editing: bool,
    /// Last cell flipped by the current stroke, in absolute grid coordinates
    pub last_edited_cell: Option<(usize, usize)>,
    accumulated_ms: u64,
    stroke_toggles: usize,
}

impl InteractionState {
    fn new(mode: SimulationMode) -> Self {
        InteractionState {
            mode,
            step_requested: false,
            editing: false,
            last_edited_cell: None,
            accumulated_ms: 0,
            stroke_toggles: 0,
        }
    }
}

/// Simulation context owned by the main loop: grid, zoom and interaction state
pub struct Controller {
    grid: Grid,
    viewport: Viewport,
    state: InteractionState,
    update_time_ms: u64,
    seed_name: String,
    seed_cells: Vec<(usize, usize)>,
    clock_ms: u64,
    quit: bool,
    action_log: Option<ActionLog>,
}

impl Controller {
    /// The current grid contents become the pattern restored by `Reseed`
    pub fn new(grid: Grid, viewport: Viewport, update_time_ms: u64) -> Self {
        assert!(update_time_ms > 0, "update time must be positive");
        let seed_cells = grid.alive_cells();
        Controller {
            grid,
            viewport,
            state: InteractionState::new(SimulationMode::Paused),
            update_time_ms,
            seed_name: "initial".to_string(),
            seed_cells,
            clock_ms: 0,
            quit: false,
            action_log: None,
        }
    }

    /// Build grid, viewport and seed from configuration
    pub fn from_config(config: &Config) -> Result<Self, PatternError> {
        let sim = &config.simulation;
        let (seed_name, seed_cells) = match &config.seed.cells {
            Some(cells) => ("custom".to_string(), cells.clone()),
            None => {
                let pattern = find_pattern(&config.seed.pattern)?;
                (pattern.name.to_string(), pattern.cells_centered(sim.grid_size)?)
            }
        };

        let grid = Grid::with_alive(sim.grid_size, &seed_cells);
        let viewport = Viewport::new(
            sim.grid_size,
            sim.visible_cells,
            config.window.width,
            config.window.height,
        );
        log::info!(
            "Seeded {}x{} grid with '{}' ({} cells)",
            sim.grid_size, sim.grid_size, seed_name, seed_cells.len()
        );

        let mut controller = Controller::new(grid, viewport, sim.update_time_ms);
        controller.seed_name = seed_name;
        if sim.start_running {
            controller.state.mode = SimulationMode::Running;
        }
        if config.logging.enable_action_log {
            controller.action_log = Some(ActionLog::new());
        }
        Ok(controller)
    }

    /// Record user actions from now on
    pub fn with_action_log(mut self) -> Self {
        self.action_log = Some(ActionLog::new());
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mode(&self) -> SimulationMode {
        self.state.mode
    }

    pub fn is_paused(&self) -> bool {
        self.state.mode == SimulationMode::Paused
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn action_log(&self) -> Option<&ActionLog> {
        self.action_log.as_ref()
    }

    /// Milliseconds fed to `tick` so far
    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// The part of the grid currently on screen
    pub fn visible_view(&self) -> GridView<'_> {
        self.grid.view(self.viewport.extent())
    }

    pub fn layout(&self) -> Layout {
        self.viewport.layout()
    }

    /// Track the drawable area; takes effect for the next mapping
    pub fn resize(&mut self, window_width: u32, window_height: u32) {
        self.viewport.resize(window_width, window_height);
    }

    pub fn handle_event(&mut self, event: InputEvent) -> ControlFlow {
        if self.quit {
            return ControlFlow::Quit;
        }

        match event {
            InputEvent::Quit => {
                log::info!("Quit requested at generation {}", self.grid.generation());
                self.quit = true;
                return ControlFlow::Quit;
            }
            InputEvent::ZoomIn => {
                if self.viewport.zoom_in() {
                    self.record(Action::Zoom { nb_cells: self.viewport.nb_cells() });
                }
            }
            InputEvent::ZoomOut => {
                if self.viewport.zoom_out() {
                    self.record(Action::Zoom { nb_cells: self.viewport.nb_cells() });
                }
            }
            InputEvent::TogglePause => self.toggle_pause(),
            InputEvent::Step => {
                if self.is_paused() {
                    self.state.step_requested = true;
                }
            }
            InputEvent::PointerDown { x, y, button } => self.pointer_down(x, y, button),
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
            InputEvent::PointerUp { button } => self.pointer_up(button),
            InputEvent::Clear => {
                self.record(Action::Clear);
                self.grid.clear();
                log::info!("Grid cleared");
            }
            InputEvent::Reseed => {
                self.record(Action::Seed {
                    pattern: self.seed_name.clone(),
                    cells: self.seed_cells.len(),
                });
                self.grid.seed(&self.seed_cells);
                log::info!("Grid reseeded with '{}'", self.seed_name);
            }
        }
        ControlFlow::Continue
    }

    /// Advance the simulation clock. Returns true if a generation was computed.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        self.clock_ms += elapsed_ms;

        if self.state.step_requested {
            self.state.step_requested = false;
            self.grid.step();
            self.record(Action::Step);
            return true;
        }

        if self.state.mode == SimulationMode::Running {
            self.state.accumulated_ms += elapsed_ms;
            if self.state.accumulated_ms > self.update_time_ms {
                self.state.accumulated_ms = 0;
                self.grid.step();
                return true;
            }
        }
        false
    }

    /// Replace the grid contents with the given cells (clipboard paste)
    pub fn load_pattern(&mut self, cells: &[(usize, usize)]) {
        self.record(Action::Paste { cells: cells.len() });
        self.grid.seed(cells);
        log::info!("Loaded pattern with {} cells", cells.len());
    }

    fn toggle_pause(&mut self) {
        self.state.mode = match self.state.mode {
            SimulationMode::Paused => SimulationMode::Running,
            SimulationMode::Running => SimulationMode::Paused,
        };
        // A step requested while paused does not carry over into running
        self.state.step_requested = false;
        let running = self.state.mode == SimulationMode::Running;
        log::info!("Simulation {}", if running { "running" } else { "paused" });
        self.record(Action::TogglePause { running });
    }

    fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton) {
        if button != PointerButton::Primary || !self.viewport.contains_pixel(x, y) {
            return;
        }
        let (row, col) = self.viewport.cell_at(x, y);
        self.state.editing = true;
        self.state.stroke_toggles = 0;
        self.record(Action::EditStart { row, col });
        self.toggle_cell(row, col);
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.state.editing {
            return;
        }
        let cell = self.viewport.cell_at(x, y);
        if self.state.last_edited_cell != Some(cell) {
            self.toggle_cell(cell.0, cell.1);
        }
    }

    fn pointer_up(&mut self, button: PointerButton) {
        if button != PointerButton::Primary || !self.state.editing {
            return;
        }
        self.state.editing = false;
        self.state.last_edited_cell = None;
        let toggled = self.state.stroke_toggles;
        self.record(Action::EditFinish { toggled });
    }

    fn toggle_cell(&mut self, row: usize, col: usize) {
        let state = self.grid.toggle(row, col);
        self.state.last_edited_cell = Some((row, col));
        self.state.stroke_toggles += 1;
        log::debug!("Cell ({}, {}) -> {:?}", row, col, state);
        self.record(Action::ToggleCell { row, col, state });
    }

    fn record(&mut self, action: Action) {
        if let Some(log) = self.action_log.as_mut() {
            log.log(self.clock_ms, self.grid.generation(), action);
        }
    }
}
