//! Desktop simulator for the cgm-core trend graph.
//!
//! Renders the graph element in an SDL2 window via `embedded-graphics-simulator`
//! and feeds it synthetic glucose readings, so the element can be exercised
//! without a watch.
//!
//! # Key bindings
//!
//! | Key | Action                                   |
//! |-----|------------------------------------------|
//! | U   | Deliver a new reading                    |
//! | M   | Deliver an update with a missed reading  |
//! | S   | Let five minutes pass without an update  |
//! | B   | Toggle the link state                    |
//! | G   | Cycle gridline spacing                   |
//! | Q   | Quit                                     |

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use cgm_core::message::{APP_KEY_RECENCY, APP_KEY_SGV_COUNT, APP_KEY_SGVS, DictValue, GraphUpdate};
use cgm_core::preferences::GraphPreferences;
use cgm_core::staleness::{SGV_INTERVAL_SECS, Staleness};
use cgm_core::ui::Element;
use cgm_core::ui::components::connection_status::{ConnectionIndicator, LinkState};
use cgm_core::ui::components::graph::constants::{GRAPH_MAX_SGV_COUNT, SGV_SCALE};
use cgm_core::ui::components::graph::{GraphElement, RenderContext};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Watch display width in pixels.
const DISPLAY_WIDTH_PX: u32 = 144;

/// Watch display height in pixels.
const DISPLAY_HEIGHT_PX: u32 = 168;

/// Vertical offset of the graph frame in pixels.
const GRAPH_TOP_PX: i32 = 40;

/// Height of the graph frame in pixels.
const GRAPH_HEIGHT_PX: u32 = 100;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Interval between host clock ticks.
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Gridline spacings cycled through with G.
const GRIDLINE_SPACINGS: [u16; 4] = [0, 25, 50, 100];

const BACKGROUND: Rgb565 = Rgb565::BLACK;
const FOREGROUND: Rgb565 = Rgb565::WHITE;

// ---------------------------------------------------------------------------
// Mock data generation
// ---------------------------------------------------------------------------

/// Generates a synthetic reading history, newest first, one reading per
/// five minutes of simulated time.
struct MockReadingGenerator {
    /// Simulated seconds since start.
    now_secs: u64,
    /// Scaled readings, newest first.
    history: VecDeque<u8>,
}

impl MockReadingGenerator {
    fn new() -> Self {
        let mut generator = Self {
            now_secs: 0,
            history: VecDeque::new(),
        };
        for _ in 0..GRAPH_MAX_SGV_COUNT {
            generator.advance(true);
        }
        generator
    }

    /// Advance the simulated clock by one reading interval.
    fn advance(&mut self, with_reading: bool) {
        self.now_secs += SGV_INTERVAL_SECS;
        let sgv = if with_reading {
            Self::scaled(self.glucose_at(self.now_secs))
        } else {
            0
        };

        self.history.push_front(sgv);
        // Keep a few more than the graph holds so updates exercise truncation.
        self.history.truncate(GRAPH_MAX_SGV_COUNT + 8);
    }

    /// Glucose in mg/dL: slow swings between roughly 70 and 250.
    fn glucose_at(&self, t: u64) -> f64 {
        let t = t as f64;
        150.0 + 70.0 * (t / 9000.0).sin() + 25.0 * (t / 2300.0).cos()
    }

    fn scaled(mg_dl: f64) -> u8 {
        (mg_dl / f64::from(SGV_SCALE)).round().clamp(1.0, 255.0) as u8
    }

    fn readings(&self) -> Vec<u8> {
        self.history.iter().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting cgm simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: U=Update  M=Missed reading  S=Skip 5min  B=Toggle link  G=Gridlines  Q=Quit");

    let mut display =
        SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("CGM Simulator", &output_settings);

    let link = Cell::new(LinkState::Connected);
    let graph_bounds = Rectangle::new(
        Point::new(0, GRAPH_TOP_PX),
        Size::new(DISPLAY_WIDTH_PX, GRAPH_HEIGHT_PX),
    );
    let mut graph: GraphElement<ConnectionIndicator<_>> =
        GraphElement::create(graph_bounds, || link.get());

    let mut prefs = GraphPreferences::default();
    let mut gridline_index = GRIDLINE_SPACINGS
        .iter()
        .position(|&spacing| spacing == prefs.h_gridlines)
        .unwrap_or(0);
    if let Err(e) = prefs.validate() {
        error!("Invalid preferences: {}", e);
        return;
    }

    let mut generator = MockReadingGenerator::new();
    let mut staleness = Staleness::new();
    deliver_update(&mut graph, &mut staleness, &generator);

    let mut last_tick = Instant::now();
    let mut needs_redraw = true;

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- Render -------------------------------------------------------
        if needs_redraw || graph.is_dirty() || graph.conn_status().is_dirty() {
            let _ = display.clear(BACKGROUND);
            let ctx = RenderContext {
                prefs: &prefs,
                staleness_padding: staleness.graph_padding(generator.now_secs),
                color: FOREGROUND,
            };
            if let Err(e) = graph.draw(&mut display, &ctx) {
                error!("Draw error: {:?}", e);
            }
            if let Err(e) = graph.conn_status().draw(&mut display, FOREGROUND) {
                error!("Draw error: {:?}", e);
            }
            graph.mark_clean();
            graph.conn_status_mut().mark_clean();
            needs_redraw = false;
        }

        // The SDL window is lazily initialized on the first `update()` call,
        // so this must run before `events()`.
        window.update(&display);

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q | Keycode::Escape => break 'running,
                    Keycode::U => {
                        generator.advance(true);
                        deliver_update(&mut graph, &mut staleness, &generator);
                    }
                    Keycode::M => {
                        generator.advance(false);
                        deliver_update(&mut graph, &mut staleness, &generator);
                    }
                    Keycode::S => {
                        generator.now_secs += SGV_INTERVAL_SECS;
                        info!(
                            "No update for {}s",
                            staleness.phone_staleness(generator.now_secs).unwrap_or(0)
                        );
                        needs_redraw = true;
                    }
                    Keycode::B => {
                        let next = match link.get() {
                            LinkState::Connected => LinkState::Disconnected,
                            LinkState::Disconnected => LinkState::Connected,
                        };
                        info!("Link → {:?}", next);
                        link.set(next);
                    }
                    Keycode::G => {
                        gridline_index = (gridline_index + 1) % GRIDLINE_SPACINGS.len();
                        prefs.h_gridlines = GRIDLINE_SPACINGS[gridline_index];
                        info!("Gridline spacing → {}", prefs.h_gridlines);
                        needs_redraw = true;
                    }
                    _ => {}
                },

                _ => {}
            }
        }

        // --- Clock tick ---------------------------------------------------
        if last_tick.elapsed() >= TICK_INTERVAL {
            graph.tick();
            last_tick = Instant::now();
        }

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}

/// Encode the generator's history as an app message and apply it.
fn deliver_update<F: Fn() -> LinkState>(
    graph: &mut GraphElement<ConnectionIndicator<F>>,
    staleness: &mut Staleness,
    generator: &MockReadingGenerator,
) {
    let readings = generator.readings();
    let dict = [
        (APP_KEY_SGV_COUNT, DictValue::Int32(readings.len() as i32)),
        (APP_KEY_SGVS, DictValue::Bytes(&readings)),
        (APP_KEY_RECENCY, DictValue::Int32(0)),
    ];

    match GraphUpdate::from_dict(&dict[..]) {
        Ok(update) => {
            graph.apply(&update);
            let recency = update.recency.unwrap_or(0).max(0) as u32;
            staleness.on_update(generator.now_secs, recency);
        }
        Err(e) => error!("Dropping update: {}", e),
    }
}
