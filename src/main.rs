//! Arcade Zone entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use arcade_zone::app::{Arcade, Session};
    use arcade_zone::nav::{GAMES, Screen};
    use arcade_zone::persistence::LocalStorageStore;
    use arcade_zone::platform::web::{AnimationFrame, Listener};
    use arcade_zone::platform::{FrameClock, TickTimer};
    use arcade_zone::renderer::{Painter, grid_canvas_size};
    use arcade_zone::Settings;

    /// Everything the callbacks share
    struct Shell {
        arcade: Arcade,
        painter: Painter,
    }

    /// Callbacks for the current screen. Dropping it stops the frame loop
    /// and unsubscribes every input handler.
    struct ScreenHost {
        _frame: AnimationFrame,
        _listeners: Vec<Listener>,
    }

    struct Host {
        shell: Rc<RefCell<Shell>>,
        _hashchange: Listener,
        screen: Option<ScreenHost>,
    }

    thread_local! {
        static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Arcade Zone starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let arcade = Arcade::new(settings, Box::new(LocalStorageStore::open()), seed);
        let shell = Rc::new(RefCell::new(Shell {
            arcade,
            painter: Painter::new(canvas)?,
        }));
        log::info!("Arcade initialized with seed: {}", seed);

        let hashchange = Listener::new(&window, "hashchange", |_event: Event| {
            follow_location();
        })?;
        HOST.with(|host| {
            *host.borrow_mut() = Some(Host {
                shell,
                _hashchange: hashchange,
                screen: None,
            });
        });
        follow_location();

        log::info!("Arcade Zone running!");
        Ok(())
    }

    fn current_hash() -> String {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }

    /// Change the address bar; the hashchange listener does the rest
    fn go_to(screen: Screen) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_hash(screen.path());
        }
    }

    /// Sync the arcade with the address bar, rebuilding the screen's callbacks
    /// when the route changed
    fn follow_location() {
        let hash = current_hash();
        HOST.with(|host| {
            let mut host = host.borrow_mut();
            let Some(host) = host.as_mut() else {
                return;
            };
            let changed = host.shell.borrow_mut().arcade.navigate_path(&hash).is_some();
            if !changed && host.screen.is_some() {
                return;
            }
            let screen = host.shell.borrow().arcade.screen();
            // Old callbacks go before new ones are registered
            host.screen = None;
            match ScreenHost::attach(host.shell.clone(), screen) {
                Ok(screen_host) => host.screen = Some(screen_host),
                Err(e) => log::error!("Could not start {:?}: {:?}", screen, e),
            }

            let canonical = format!("#{}", screen.path());
            if hash != canonical {
                go_to(screen);
            }
        });
    }

    /// Client coordinates to canvas backing-store coordinates
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        let sx = if rect.width() > 0.0 { canvas.width() as f64 / rect.width() } else { 1.0 };
        let sy = if rect.height() > 0.0 { canvas.height() as f64 / rect.height() } else { 1.0 };
        Vec2::new(
            ((client_x as f64 - rect.left()) * sx) as f32,
            ((client_y as f64 - rect.top()) * sy) as f32,
        )
    }

    fn render(shell: &Shell) {
        match shell.arcade.session() {
            Session::Home => shell.painter.render_home(),
            Session::Snake(game) => shell.painter.render_grid(game.state(), game.high_score().best()),
            Session::FruitNinja(game) => {
                shell.painter.render_motion(game.state(), game.high_score().best())
            }
        }
    }

    impl ScreenHost {
        fn attach(shell: Rc<RefCell<Shell>>, screen: Screen) -> Result<Self, JsValue> {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let canvas = shell.borrow().painter.canvas().clone();
            {
                let shell = shell.borrow();
                let settings = shell.arcade.settings();
                let (w, h) = match screen {
                    Screen::Snake => grid_canvas_size(settings.grid.grid_size),
                    _ => (settings.motion.width as u32, settings.motion.height as u32),
                };
                shell.painter.resize(w, h);
            }

            let mut listeners = Vec::new();
            match screen {
                Screen::Home => {
                    listeners.push(Listener::new(&window, "keydown", |event: Event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        let pick = match event.key().as_str() {
                            "1" => GAMES.first(),
                            "2" => GAMES.get(1),
                            _ => None,
                        };
                        if let Some(game) = pick {
                            go_to(game.screen);
                        }
                    })?);
                    let click_shell = shell.clone();
                    let click_canvas = canvas.clone();
                    listeners.push(Listener::new(&canvas, "click", move |event: Event| {
                        let Some(event) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let p = canvas_point(&click_canvas, event.client_x(), event.client_y());
                        let target = click_shell.borrow().painter.home_card_at(p.x as f64, p.y as f64);
                        if let Some(target) = target {
                            go_to(target);
                        }
                    })?);
                }
                Screen::Snake => {
                    let key_shell = shell.clone();
                    listeners.push(Listener::new(&window, "keydown", move |event: Event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        let key = event.key();
                        if key == "Escape" {
                            go_to(Screen::Home);
                        } else if key_shell.borrow_mut().arcade.key_down(&key) {
                            // Keep arrows and space from scrolling the page
                            event.prevent_default();
                        }
                    })?);
                }
                Screen::FruitNinja => {
                    listeners.push(Listener::new(&window, "keydown", |event: Event| {
                        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                            if event.key() == "Escape" {
                                go_to(Screen::Home);
                            }
                        }
                    })?);

                    let move_shell = shell.clone();
                    let move_canvas = canvas.clone();
                    listeners.push(Listener::new(&canvas, "mousemove", move |event: Event| {
                        if let Some(event) = event.dyn_ref::<MouseEvent>() {
                            let p = canvas_point(&move_canvas, event.client_x(), event.client_y());
                            move_shell.borrow_mut().arcade.pointer(p);
                        }
                    })?);

                    for kind in ["touchstart", "touchmove"] {
                        let touch_shell = shell.clone();
                        let touch_canvas = canvas.clone();
                        listeners.push(Listener::new(&canvas, kind, move |event: Event| {
                            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                                return;
                            };
                            event.prevent_default();
                            if let Some(touch) = event.touches().get(0) {
                                let p = canvas_point(&touch_canvas, touch.client_x(), touch.client_y());
                                touch_shell.borrow_mut().arcade.pointer(p);
                            }
                        })?);
                    }

                    let click_shell = shell.clone();
                    listeners.push(Listener::new(&canvas, "click", move |_event: Event| {
                        let mut shell = click_shell.borrow_mut();
                        let over = matches!(
                            shell.arcade.session(),
                            Session::FruitNinja(game) if game.state().is_over()
                        );
                        if over {
                            shell.arcade.restart();
                        }
                    })?);
                }
            }

            let frame = match screen {
                Screen::Home => AnimationFrame::start(move |_time: f64| {
                    render(&shell.borrow());
                })?,
                Screen::Snake => {
                    let interval = match shell.borrow().arcade.session() {
                        Session::Snake(game) => game.speed_ms(),
                        _ => shell.borrow().arcade.settings().grid.initial_speed_ms,
                    };
                    let mut timer = TickTimer::new(interval);
                    AnimationFrame::start(move |time: f64| {
                        let mut shell = shell.borrow_mut();
                        if timer.poll(time) {
                            shell.arcade.tick_grid(time);
                        }
                        if let Session::Snake(game) = shell.arcade.session() {
                            timer.rearm_if_changed(game.speed_ms(), time);
                        }
                        render(&shell);
                    })?
                }
                Screen::FruitNinja => {
                    let mut clock = FrameClock::default();
                    AnimationFrame::start(move |time: f64| {
                        let mut shell = shell.borrow_mut();
                        for _ in 0..clock.advance(time) {
                            shell.arcade.step_motion(time);
                        }
                        render(&shell);
                    })?
                }
            };

            log::info!("Screen {} attached", screen.path());
            Ok(Self {
                _frame: frame,
                _listeners: listeners,
            })
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Arcade Zone failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arcade Zone (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let seed = std::env::var("ARCADE_ZONE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let mut arcade = arcade_zone::Arcade::new(
        arcade_zone::Settings::load(),
        Box::new(arcade_zone::persistence::MemoryStore::new()),
        seed,
    );

    demo::snake(&mut arcade);
    demo::fruit_ninja(&mut arcade);
    arcade.back();
}

/// Scripted runs of both games with naive autopilots
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use arcade_zone::app::{Arcade, Session};
    use arcade_zone::nav::Screen;
    use arcade_zone::persistence::{SLICER_HIGH_SCORE_KEY, SNAKE_HIGH_SCORE_KEY};
    use arcade_zone::sim::grid::{Direction, GridState};
    use glam::Vec2;

    const MAX_TICKS: u32 = 2_000;
    const SLICER_SECONDS: u32 = 60;

    /// Head straight for the food, horizontal axis first
    fn chase(state: &GridState) -> Option<Direction> {
        let food = state.food?;
        let head = state.head();
        let dir = if food.position.x > head.x {
            Direction::Right
        } else if food.position.x < head.x {
            Direction::Left
        } else if food.position.y > head.y {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(dir)
    }

    pub fn snake(arcade: &mut Arcade) {
        arcade.navigate(Screen::Snake);
        let mut now_ms = 0.0;
        for _ in 0..MAX_TICKS {
            let Session::Snake(game) = arcade.session() else {
                return;
            };
            if game.state().is_over() {
                break;
            }
            let interval = game.speed_ms() as f64;
            if let Some(dir) = chase(game.state()) {
                arcade.key_down(match dir {
                    Direction::Up => "ArrowUp",
                    Direction::Down => "ArrowDown",
                    Direction::Left => "ArrowLeft",
                    Direction::Right => "ArrowRight",
                });
            }
            now_ms += interval;
            arcade.tick_grid(now_ms);
        }
        if let Session::Snake(game) = arcade.session() {
            let state = game.state();
            println!(
                "Snake: score {} level {} length {} after {} ticks ({:?})",
                state.score,
                state.level,
                state.len(),
                state.ticks,
                state.phase
            );
        }
        println!("  stored best: {:?}", arcade.store().get(SNAKE_HIGH_SCORE_KEY));
    }

    pub fn fruit_ninja(arcade: &mut Arcade) {
        arcade.navigate(Screen::FruitNinja);
        let frames = SLICER_SECONDS * 60;
        let frame_ms = 1000.0 / 60.0;
        for frame in 0..frames {
            let now_ms = frame as f64 * frame_ms;
            arcade.step_motion(now_ms);
            // Sweep the blade across the lower half of the canvas
            let x = (frame % 120) as f32 / 120.0 * 800.0;
            arcade.pointer(Vec2::new(x, 450.0));
        }
        if let Session::FruitNinja(game) = arcade.session() {
            let state = game.state();
            println!(
                "Fruit Ninja: score {} after {} steps ({:?})",
                state.score, state.steps, state.phase
            );
        }
        println!("  stored best: {:?}", arcade.store().get(SLICER_HIGH_SCORE_KEY));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
