//! Survival Waves entry point
//!
//! Sets up the terminal, logging and settings, then runs the frame loop.

use std::fs::File;
use std::io::{BufWriter, Stdout, Write, stdout};
use std::time::Instant;

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};
use glam::Vec2;
use rand::Rng;

use survival_waves::Settings;
use survival_waves::platform::{self, FrameClock, InputSource, Key, TerminalInput, clock};
use survival_waves::renderer::{FrameView, Renderer, TerminalRenderer};
use survival_waves::sim::{GameState, TickInput, tick};

/// Rolling FPS over the last 60 frames
struct FpsCounter {
    frame_times: [Option<Instant>; 60],
    frame_index: usize,
    fps: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [None; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    fn record(&mut self, now: Instant) -> u32 {
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        if let Some(oldest) = oldest {
            let elapsed = now.duration_since(oldest).as_secs_f32();
            if elapsed > 0.0 {
                self.fps = (self.frame_times.len() as f32 / elapsed).round() as u32;
            }
        }
        self.fps
    }
}

fn init_logging(settings: &Settings) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);

    // The alternate screen owns stdout/stderr, so logs only go to a file
    match settings.log_file.as_ref().map(File::create) {
        Some(Ok(file)) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Some(Err(_)) | None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn new_game(settings: &Settings) -> GameState {
    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("Game initialized with seed: {}", seed);
    GameState::with_tuning(seed, settings.tuning.clone())
}

fn fit_camera(state: &mut GameState, settings: &Settings, cols: u16, rows: u16) {
    state.camera.set_viewport(
        Vec2::new(f32::from(cols), f32::from(rows)),
        Vec2::new(1.0 / settings.cell_width, 1.0 / settings.cell_height),
    );
}

fn main() -> std::io::Result<()> {
    // The log file comes from the settings, so report loading afterwards
    let path = Settings::path();
    let loaded = path.exists().then(|| Settings::load_from(&path));
    let settings = match &loaded {
        Some(Ok(settings)) => settings.clone(),
        _ => Settings::default(),
    };
    init_logging(&settings);
    log::info!("Survival Waves starting...");
    match loaded {
        Some(Ok(_)) => log::info!("Loaded settings from {}", path.display()),
        Some(Err(err)) => log::warn!("{err}; using default settings"),
        None => log::info!("No settings file at {}, using defaults", path.display()),
    }

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Terminals without the keyboard enhancement protocol fall back to hold windows
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out, &settings);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("Terminal error: {}", e);
    }
    log::info!("Survival Waves exiting");
    result
}

fn run(out: &mut BufWriter<Stdout>, settings: &Settings) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut renderer = TerminalRenderer::new(out, cols, rows, settings.quality);
    let mut input = TerminalInput::new();
    let mut clock = FrameClock::new(settings.fixed_step);
    let mut fps = FpsCounter::new();

    let mut state = new_game(settings);
    fit_camera(&mut state, settings, cols, rows);

    // One-shot presses that arrived on a frame with no ticks
    let mut carried = TickInput::default();

    loop {
        let frame_start = Instant::now();
        input.pump()?;
        if input.shutdown_requested() {
            break;
        }

        if let Some((cols, rows)) = input.take_resize() {
            renderer.resize(cols, rows);
            fit_camera(&mut state, settings, cols, rows);
        }

        if state.is_game_over() && input.was_pressed(Key::Restart) {
            state = new_game(settings);
            let (cols, rows) = terminal::size()?;
            fit_camera(&mut state, settings, cols, rows);
            carried = TickInput::default();
        }

        let mut tick_input = platform::sample(&input);
        tick_input.fire_pressed |= carried.fire_pressed;
        tick_input.pause |= carried.pause;

        let frame_dt = clock.frame_dt();
        let plan = clock.plan(frame_dt);
        for _ in 0..plan.steps {
            tick(&mut state, &tick_input, plan.dt);
            tick_input.clear_one_shots();
        }
        carried = if plan.steps == 0 {
            tick_input
        } else {
            TickInput::default()
        };

        let fps_now = fps.record(Instant::now());
        let view = FrameView::new(&state).with_fps(settings.show_fps.then_some(fps_now));
        renderer.draw(&view)?;

        clock::pace(frame_start, settings.target_fps);
    }

    renderer.writer().flush()
}
