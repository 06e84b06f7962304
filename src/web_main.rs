use crate::{Game, GameLoop, Renderer, Tick, WebRenderer};
use log::{LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CANVAS_ID: &str = "gameCanvas";

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let message = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message.into()),
            log::Level::Warn => web_sys::console::warn_1(&message.into()),
            _ => web_sys::console::log_1(&message.into()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

struct WebLoop {
    game_loop: GameLoop,
    renderer: WebRenderer,
}

impl WebLoop {
    fn new() -> Result<Self, JsValue> {
        let mut renderer = WebRenderer::new(CANVAS_ID)?;
        renderer.init().map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut game_loop = GameLoop::new(Game::default());
        game_loop.draw(&mut renderer);

        // The page may already be in the background when the module loads
        if !renderer.has_focus() {
            game_loop.handle_input(crate::Input::Focus(false), &mut renderer);
        }

        Ok(Self {
            game_loop,
            renderer,
        })
    }

    fn animation_frame(&mut self, now_ms: f64) -> Result<(), JsValue> {
        let to_js = |e: std::io::Error| JsValue::from_str(&e.to_string());

        while let Some(input) = self.renderer.poll_input().map_err(to_js)? {
            // The canvas is retained, so a focus redraw is already visible
            self.game_loop.handle_input(input, &mut self.renderer);
        }

        let now = Duration::from_secs_f64(now_ms.max(0.0) / 1000.0);
        if self.game_loop.tick(now, &mut self.renderer) == Tick::Advanced {
            self.renderer.present().map_err(to_js)?;
        }

        Ok(())
    }
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    web_sys::console::log_1(&"[WASM] Starting Ping Pong...".into());

    let web_loop = match WebLoop::new() {
        Ok(web_loop) => Rc::new(RefCell::new(web_loop)),
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to create game loop: {:?}", e).into());
            return Err(e);
        }
    };

    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    // Create closure for animation frame
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(e) = web_loop.borrow_mut().animation_frame(performance.now()) {
            web_sys::console::error_1(&e);
            return; // Stop loop on error
        }

        // Schedule next frame
        let scheduled = web_sys::window().ok_or_else(|| JsValue::from_str("no window")).and_then(|window| {
            match f.borrow().as_ref() {
                Some(callback) => window.request_animation_frame(callback.as_ref().unchecked_ref()),
                None => Err(JsValue::from_str("animation callback dropped")),
            }
        });
        if let Err(e) = scheduled {
            web_sys::console::error_1(&e);
        }
    }) as Box<dyn FnMut()>));

    // Start the loop
    if let Some(callback) = g.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }

    web_sys::console::log_1(&"[WASM] Game loop started".into());

    Ok(())
}
