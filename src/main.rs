//! Circle Dodge entry point
//!
//! Boots the browser game on wasm32, or a headless autopilot run natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use circle_dodge::platform::Runner;
    use circle_dodge::platform::web::{
        BrowserSession, IntervalTimer, canvas, document, load_settings, window,
    };
    use circle_dodge::renderer::CanvasSurface;
    use circle_dodge::sim::Direction;
    use circle_dodge::{Difficulty, GameLoop};

    type WebRunner = Runner<IntervalTimer, CanvasSurface, BrowserSession>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&JsValue::from_str(&format!("logger init failed: {}", e)));
        }

        log::info!("Circle Dodge starting...");

        let window = window()?;
        let document = document()?;
        let canvas = canvas(&document)?;

        let settings = load_settings(&document, &canvas);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let surface = CanvasSurface::new(&canvas)?;

        let runner: WebRunner = Runner::new(
            GameLoop::new(settings, seed),
            surface,
            BrowserSession::new(window.clone()),
            Rc::new(IntervalTimer::new(window)),
        );
        runner.redraw();

        setup_keyboard(&document, &runner)?;
        setup_controls(&document, &runner)?;

        log::info!("Circle Dodge ready, press Start");
        Ok(())
    }

    fn setup_keyboard(document: &Document, runner: &WebRunner) -> Result<(), JsValue> {
        // Key down
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if runner.key_down(&event.key()).is_some() {
                    // Arrow keys would otherwise scroll the page
                    event.prevent_default();
                }
            });
            document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let runner = runner.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if Direction::from_key(&event.key()).is_some() {
                    event.prevent_default();
                    runner.key_up(&event.key());
                }
            });
            document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Hook a button's click to `action`; missing buttons are skipped
    fn on_click(
        document: &Document,
        id: &str,
        mut action: impl FnMut() + 'static,
    ) -> Result<(), JsValue> {
        let Some(button) = document.get_element_by_id(id) else {
            log::warn!("No #{} button on the page", id);
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| action());
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_controls(document: &Document, runner: &WebRunner) -> Result<(), JsValue> {
        {
            let runner = runner.clone();
            on_click(document, "start-btn", move || {
                if let Err(e) = runner.start() {
                    log::error!("Could not start the game timer: {:?}", e);
                }
            })?;
        }
        {
            let runner = runner.clone();
            on_click(document, "pause-btn", move || runner.pause())?;
        }
        {
            let runner = runner.clone();
            on_click(document, "reset-btn", move || runner.reset())?;
        }

        for difficulty in Difficulty::ALL {
            let runner = runner.clone();
            let id = format!("{}-btn", difficulty.as_str().to_lowercase());
            on_click(document, &id, move || {
                runner.set_difficulty(difficulty);
            })?;
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Circle Dodge failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless_run {
    use std::rc::Rc;

    use serde::Serialize;

    use circle_dodge::platform::Runner;
    use circle_dodge::platform::headless::{ManualTimer, RecordingSession, RecordingSurface};
    use circle_dodge::{Difficulty, GameLoop, Settings};

    const DEFAULT_TICKS: u64 = 2000;

    /// Result of an autopilot run
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub difficulty: Difficulty,
        pub seed: u64,
        pub ticks: u64,
        pub wins: usize,
        pub losses: usize,
        pub lives_lost: u64,
        pub obstacles_on_field: usize,
    }

    /// Usage: circle-dodge [difficulty] [ticks] [seed]
    pub fn parse_args(args: &[String]) -> (Settings, u64) {
        let mut settings = Settings::default();

        if let Some(name) = args.first() {
            match Difficulty::from_str(name) {
                Some(d) => settings.difficulty = d,
                None => log::warn!("Unknown difficulty '{}', using {}", name, settings.difficulty.as_str()),
            }
        }

        let ticks = match args.get(1).map(|s| s.parse::<u64>()) {
            Some(Ok(n)) => n,
            Some(Err(e)) => {
                log::warn!("Bad tick count ({}), using {}", e, DEFAULT_TICKS);
                DEFAULT_TICKS
            }
            None => DEFAULT_TICKS,
        };

        if let Some(seed) = args.get(2) {
            match seed.parse::<u64>() {
                Ok(seed) => settings.seed = Some(seed),
                Err(e) => log::warn!("Bad seed ({}), using a fixed default", e),
            }
        }

        (settings, ticks)
    }

    /// Hold ArrowUp and let the timer run, restarting after every finished run
    pub fn run(settings: Settings, ticks: u64) -> RunSummary {
        let seed = settings.seed.unwrap_or(0x5eed);
        let difficulty = settings.difficulty;
        let period_ms = settings.tick_period_ms;

        let timer = Rc::new(ManualTimer::new());
        let runner = Runner::new(
            GameLoop::new(settings, seed),
            RecordingSurface::new(),
            RecordingSession::new(),
            Rc::clone(&timer),
        );

        let mut lives_lost = 0;
        for _ in 0..ticks {
            if !runner.is_running() {
                runner.key_down("ArrowUp");
                let Ok(()) = runner.start();
            }

            let lives_before = runner.inspect(|game, _, _| game.state().lives);
            timer.advance(period_ms);
            let (lives_after, fresh) =
                runner.inspect(|game, _, _| (game.state().lives, game.is_fresh()));
            if !fresh && lives_after < lives_before {
                lives_lost += u64::from(lives_before - lives_after);
            }
        }

        runner.inspect(|game, _, session| {
            let messages = session.messages();
            RunSummary {
                difficulty,
                seed,
                ticks,
                wins: messages.iter().filter(|m| m.as_str() == "You Win!").count(),
                losses: messages.iter().filter(|m| m.as_str() == "You Lose").count(),
                lives_lost,
                obstacles_on_field: game.state().obstacles.len(),
            }
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Circle Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (settings, ticks) = headless_run::parse_args(&args);
    let summary = headless_run::run(settings, ticks);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialise run summary: {}", e),
    }
}
