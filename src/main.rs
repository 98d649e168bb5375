use arboard::Clipboard;
use lifegrid::config::VisualConfig;
use lifegrid::patterns::{format_plaintext, parse_plaintext};
use lifegrid::viewport::Viewport;
use lifegrid::{Config, ControlFlow, Controller, Grid, GridView, InputEvent, Layout, PointerButton};
use macroquad::prelude::*;
use std::sync::OnceLock;

/// Height of the button strip below the grid
const TOOLBAR_HEIGHT: f32 = 40.0;

static CONFIG: OnceLock<Config> = OnceLock::new();

fn config() -> &'static Config {
    CONFIG.get_or_init(Config::load)
}

fn window_conf() -> Conf {
    // Everything passes until the configured level is known
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env()
        .init();

    let config = config();
    Conf {
        window_title: config.window.title.clone(),
        window_width: config.window.width as i32,
        window_height: config.window.height as i32 + TOOLBAR_HEIGHT as i32,
        ..Default::default()
    }
}

/// RUST_LOG wins over the config file
fn apply_log_level(level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => log::set_max_level(filter),
        Err(_) => {
            log::set_max_level(log::LevelFilter::Info);
            log::warn!("Unknown log level '{}', using info", level);
        }
    }
}

fn rgb(c: [u8; 3]) -> Color {
    Color::from_rgba(c[0], c[1], c[2], 255)
}

/// Play/pause and step buttons, hit-tested here so the controller only sees resolved events
struct Toolbar {
    play_pause: Rect,
    step: Rect,
    top: f32,
}

impl Toolbar {
    fn new(top: f32) -> Self {
        Toolbar {
            play_pause: Rect::new(10.0, top + 5.0, 90.0, 30.0),
            step: Rect::new(110.0, top + 5.0, 70.0, 30.0),
            top,
        }
    }

    fn hit(&self, x: f32, y: f32) -> Option<InputEvent> {
        let point = vec2(x, y);
        if self.play_pause.contains(point) {
            Some(InputEvent::TogglePause)
        } else if self.step.contains(point) {
            Some(InputEvent::Step)
        } else {
            None
        }
    }

    fn draw(&self, controller: &Controller) {
        draw_rectangle(0.0, self.top, screen_width(), TOOLBAR_HEIGHT, Color::from_rgba(40, 40, 40, 255));

        let label = if controller.is_paused() { "Play" } else { "Pause" };
        draw_button(self.play_pause, label);
        draw_button(self.step, "Step");

        let grid = controller.grid();
        let status = format!(
            "Gen {} | Pop {} | {}x{} visible | {}",
            grid.generation(),
            grid.population(),
            controller.viewport().nb_cells(),
            controller.viewport().nb_cells(),
            if controller.is_paused() { "paused" } else { "running" }
        );
        draw_text(&status, 195.0, self.top + 26.0, 20.0, WHITE);
    }
}

fn draw_button(rect: Rect, label: &str) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::from_rgba(80, 80, 80, 255));
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, WHITE);
    let size = measure_text(label, None, 20, 1.0);
    draw_text(
        label,
        rect.x + (rect.w - size.width) / 2.0,
        rect.y + (rect.h + size.offset_y) / 2.0,
        20.0,
        WHITE,
    );
}

/// Background, live cells and grid lines for the visible part of the grid
fn draw_grid(view: &GridView, layout: Layout, visual: &VisualConfig) {
    let n = view.size();
    let cell = layout.cell_pixel_width as f32;
    if cell == 0.0 {
        return;
    }

    let alive = rgb(visual.alive);
    for (row, col) in view.alive_cells() {
        let (x, y) = layout.cell_origin(row, col);
        draw_rectangle(x, y, cell, cell, alive);
    }

    if visual.show_grid_lines {
        let line = rgb(visual.grid_line);
        let (x0, y0) = (layout.dx as f32, layout.dy as f32);
        let side = cell * n as f32;
        for i in 0..=n {
            let offset = i as f32 * cell;
            draw_line(x0 + offset, y0, x0 + offset, y0 + side, 1.0, line);
            draw_line(x0, y0 + offset, x0 + side, y0 + offset, 1.0, line);
        }
    }
}

/// Tracks the pointer between frames so motion can be reported as events
struct InputTracker {
    last_mouse: (f32, f32),
}

impl InputTracker {
    fn poll(&mut self, toolbar: &Toolbar) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
            events.push(InputEvent::Quit);
            return events;
        }

        let (_, wheel_y) = mouse_wheel();
        if wheel_y > 0.0 {
            events.push(InputEvent::ZoomIn);
        } else if wheel_y < 0.0 {
            events.push(InputEvent::ZoomOut);
        }

        if is_key_pressed(KeyCode::Space) {
            events.push(InputEvent::TogglePause);
        }
        if is_key_pressed(KeyCode::N) || is_key_pressed(KeyCode::Right) {
            events.push(InputEvent::Step);
        }
        if is_key_pressed(KeyCode::Backspace) || is_key_pressed(KeyCode::Delete) {
            events.push(InputEvent::Clear);
        }
        if is_key_pressed(KeyCode::R) {
            events.push(InputEvent::Reseed);
        }

        let (x, y) = mouse_position();
        if is_mouse_button_pressed(MouseButton::Left) {
            match toolbar.hit(x, y) {
                Some(event) => events.push(event),
                None => events.push(InputEvent::PointerDown { x, y, button: PointerButton::Primary }),
            }
        }
        if is_mouse_button_pressed(MouseButton::Right) {
            events.push(InputEvent::PointerDown { x, y, button: PointerButton::Secondary });
        }
        if (x, y) != self.last_mouse {
            events.push(InputEvent::PointerMove { x, y });
            self.last_mouse = (x, y);
        }
        if is_mouse_button_released(MouseButton::Left) {
            events.push(InputEvent::PointerUp { button: PointerButton::Primary });
        }

        events
    }
}

fn copy_to_clipboard(controller: &Controller) {
    let text = format_plaintext(&controller.visible_view());
    match Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                log::warn!("Failed to copy to clipboard: {}", e);
            } else {
                log::info!("Visible grid copied to clipboard");
                // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
        }
        Err(e) => log::warn!("Failed to access clipboard: {}", e),
    }
}

fn paste_from_clipboard(controller: &mut Controller) -> Result<(), Box<dyn std::error::Error>> {
    let text = Clipboard::new()?.get_text()?;
    let pattern = parse_plaintext(&text)?;
    let cells = pattern.place_centered(controller.grid().size())?;
    controller.load_pattern(&cells);
    Ok(())
}

fn save_action_log(controller: &Controller, path: &str) {
    let Some(action_log) = controller.action_log() else {
        return;
    };
    log::info!("{}", action_log.summary());
    match action_log.save_to_file(path) {
        Ok(()) => log::info!("Action log saved to {}", path),
        Err(e) => log::warn!("Failed to save action log to {}: {}", path, e),
    }
}

fn fallback_controller(config: &Config) -> Controller {
    let sim = &config.simulation;
    let viewport = Viewport::new(sim.grid_size, sim.visible_cells, config.window.width, config.window.height);
    Controller::new(Grid::new(sim.grid_size), viewport, sim.update_time_ms)
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    apply_log_level(&config.logging.level);
    prevent_quit();

    let mut controller = match Controller::from_config(config) {
        Ok(controller) => controller,
        Err(e) => {
            log::error!("Cannot seed grid: {}; starting empty", e);
            fallback_controller(config)
        }
    };
    let mut input = InputTracker { last_mouse: mouse_position() };

    log::info!("Space: play/pause  N: step  Wheel: zoom  Left click: edit  C/V: copy/paste  R: reseed  Esc: quit");

    loop {
        let grid_height = (screen_height() - TOOLBAR_HEIGHT).max(0.0);
        controller.resize(screen_width() as u32, grid_height as u32);
        let toolbar = Toolbar::new(grid_height);

        let mut quit = false;
        for event in input.poll(&toolbar) {
            if controller.handle_event(event) == ControlFlow::Quit {
                quit = true;
                break;
            }
        }
        if quit {
            break;
        }

        if is_key_pressed(KeyCode::C) {
            copy_to_clipboard(&controller);
        }
        if is_key_pressed(KeyCode::V) {
            if let Err(e) = paste_from_clipboard(&mut controller) {
                log::warn!("Paste failed: {}", e);
            }
        }

        let elapsed_ms = (get_frame_time() * 1000.0).round() as u64;
        controller.tick(elapsed_ms);

        clear_background(rgb(config.visual.background));
        draw_grid(&controller.visible_view(), controller.layout(), &config.visual);
        toolbar.draw(&controller);

        next_frame().await
    }

    if config.logging.enable_action_log {
        save_action_log(&controller, &config.logging.action_log_path);
    }
}
