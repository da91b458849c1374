//! Browser bridge for the Runecast gesture engine.
//!
//! wasm-bindgen cannot export the engine struct with its boxed hooks, so a
//! single [`EngineRunner`] lives in a `thread_local!` and every export is a
//! free function that borrows it.
//!
//! The dispatcher and effects callbacks run while `engine_pump` holds that
//! borrow. Exports called from inside a callback are refused with a warning
//! and return their fallback value (`false`, `0`, `-1`, `"null"`).

pub mod runner;

pub use runner::EngineRunner;

use std::cell::RefCell;

use runecast::{Clock, EngineConfig, InputEvent, Timestamp};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<EngineRunner>> = RefCell::new(None);
}

/// Run `f` on the runner, or return `busy` when the runner is already
/// borrowed further up the stack (a JS callback re-entering the engine).
fn with_runner_or<R>(busy: R, f: impl FnOnce(&mut EngineRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            log::warn!("runecast: engine busy in a gesture callback, call ignored");
            return busy;
        };
        let runner = borrow.as_mut().expect("Engine not initialized. Call engine_init() first.");
        f(runner)
    })
}

fn with_runner<R: Default>(f: impl FnOnce(&mut EngineRunner) -> R) -> R {
    with_runner_or(R::default(), f)
}

/// `Date.now()` as the engine clock.
struct JsClock;

impl Clock for JsClock {
    fn now_ms(&self) -> Timestamp {
        js_sys::Date::now() as Timestamp
    }
}

fn stamp(time: Option<f64>) -> Option<Timestamp> {
    time.filter(|t| t.is_finite() && *t >= 0.0).map(|t| t as Timestamp)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::warn!("runecast: serialization failed: {err}");
        "null".to_string()
    })
}

fn install(runner: EngineRunner) {
    RUNNER.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => *slot = Some(runner),
        Err(_) => log::warn!("runecast: engine_init called from a gesture callback, ignored"),
    });
}

#[wasm_bindgen]
pub fn engine_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref().map(EngineConfig::from_json) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            log::warn!("runecast: bad config, using defaults: {err}");
            EngineConfig::default()
        }
        None => EngineConfig::default(),
    };

    install(EngineRunner::new(config, JsClock));
    log::info!("runecast: initialized");
}

#[wasm_bindgen]
pub fn engine_pump() -> u32 {
    with_runner(|r| r.pump())
}

// ---- Pointer input ----

#[wasm_bindgen]
pub fn engine_pointer_down(x: f32, y: f32, time: Option<f64>) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, time: stamp(time) }));
}

#[wasm_bindgen]
pub fn engine_pointer_move(x: f32, y: f32, time: Option<f64>) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y, time: stamp(time) }));
}

#[wasm_bindgen]
pub fn engine_pointer_up(x: f32, y: f32, time: Option<f64>) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y, time: stamp(time) }));
}

#[wasm_bindgen]
pub fn engine_pointer_leave(x: f32, y: f32, time: Option<f64>) {
    with_runner(|r| r.push_input(InputEvent::PointerLeave { x, y, time: stamp(time) }));
}

#[wasm_bindgen]
pub fn engine_pointer_cancel(x: f32, y: f32, time: Option<f64>) {
    with_runner(|r| r.push_input(InputEvent::PointerCancel { x, y, time: stamp(time) }));
}

// ---- Touch input (first touch only, already relative to the canvas) ----

#[wasm_bindgen]
pub fn engine_touch_start(x: f32, y: f32, time: Option<f64>) {
    engine_pointer_down(x, y, time);
}

#[wasm_bindgen]
pub fn engine_touch_move(x: f32, y: f32, time: Option<f64>) {
    engine_pointer_move(x, y, time);
}

#[wasm_bindgen]
pub fn engine_touch_end(x: f32, y: f32, time: Option<f64>) {
    engine_pointer_up(x, y, time);
}

#[wasm_bindgen]
pub fn engine_touch_cancel(x: f32, y: f32, time: Option<f64>) {
    engine_pointer_cancel(x, y, time);
}

// ---- Control ----

#[wasm_bindgen]
pub fn engine_set_enabled(enabled: bool) {
    with_runner(|r| r.engine_mut().set_enabled(enabled));
}

#[wasm_bindgen]
pub fn engine_is_enabled() -> bool {
    with_runner(|r| r.engine().is_enabled())
}

#[wasm_bindgen]
pub fn engine_set_debug(debug: bool) {
    with_runner(|r| r.engine_mut().set_debug(debug));
}

#[wasm_bindgen]
pub fn engine_is_drawing() -> bool {
    with_runner(|r| r.engine().is_drawing())
}

#[wasm_bindgen]
pub fn engine_reset() {
    with_runner(|r| r.reset());
}

#[wasm_bindgen]
pub fn engine_clear_history() {
    with_runner(|r| r.engine_mut().clear_history());
}

// ---- Collaborators ----

/// `f(action) -> boolean`. A throw or a non-boolean `false` counts as failure;
/// `undefined` counts as success.
#[wasm_bindgen]
pub fn engine_set_dispatcher(f: js_sys::Function) {
    with_runner(|r| {
        r.engine_mut().set_dispatcher(move |action: &str| {
            match f.call1(&JsValue::NULL, &JsValue::from_str(action)) {
                Ok(v) => v.as_bool().unwrap_or(true),
                Err(err) => {
                    log::warn!("runecast: dispatcher threw: {err:?}");
                    false
                }
            }
        })
    });
}

/// `f(patternId, score)`, fire-and-forget.
#[wasm_bindgen]
pub fn engine_set_effects(f: js_sys::Function) {
    with_runner(|r| {
        r.engine_mut().set_effects(move |id: &str, score: f32| {
            let (id, score) = (JsValue::from_str(id), JsValue::from_f64(score as f64));
            if let Err(err) = f.call2(&JsValue::NULL, &id, &score) {
                log::warn!("runecast: effects callback threw: {err:?}");
            }
        })
    });
}

// ---- Patterns ----

#[wasm_bindgen]
pub fn engine_add_pattern(id: &str, json: &str) -> bool {
    with_runner(|r| match r.engine_mut().add_custom_pattern_json(id, json) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("runecast: pattern '{id}' rejected: {err}");
            false
        }
    })
}

#[wasm_bindgen]
pub fn engine_remove_pattern(id: &str) -> bool {
    with_runner(|r| r.engine_mut().remove_custom_pattern(id))
}

#[wasm_bindgen]
pub fn engine_has_pattern(id: &str) -> bool {
    with_runner(|r| r.engine().has_pattern(id))
}

#[wasm_bindgen]
pub fn engine_patterns() -> String {
    with_runner_or("null".to_string(), |r| {
        let patterns: Vec<_> = r.engine().library().iter().collect();
        to_json(&patterns)
    })
}

#[wasm_bindgen]
pub fn engine_patterns_in_category(category: &str) -> String {
    with_runner_or("null".to_string(), |r| {
        to_json(&r.engine().patterns_in_category(category))
    })
}

// ---- Persistence / stats ----

#[wasm_bindgen]
pub fn engine_export() -> String {
    with_runner_or("null".to_string(), |r| to_json(&r.engine().export_data()))
}

/// Returns the number of custom patterns restored, or -1 if the JSON is malformed.
#[wasm_bindgen]
pub fn engine_import(json: &str) -> i32 {
    with_runner_or(-1, |r| match r.engine_mut().import_json(json) {
        Ok(n) => n as i32,
        Err(err) => {
            log::warn!("runecast: import failed: {err}");
            -1
        }
    })
}

#[wasm_bindgen]
pub fn engine_stats() -> String {
    with_runner_or("null".to_string(), |r| to_json(&r.engine().stats()))
}

#[wasm_bindgen]
pub fn engine_recent(n: u32) -> String {
    with_runner_or("null".to_string(), |r| to_json(&r.engine().recent(n as usize)))
}

#[wasm_bindgen]
pub fn engine_cooldowns() -> String {
    with_runner_or("null".to_string(), |r| to_json(&r.engine().cooldown_status()))
}

#[wasm_bindgen]
pub fn engine_last_recognition() -> String {
    with_runner_or("null".to_string(), |r| to_json(&r.last_recognition()))
}

// ---- Event buffer accessors ----

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner_or(std::ptr::null(), |r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_event_floats() -> u32 {
    runecast::RecognitionEvent::FLOATS as u32
}
