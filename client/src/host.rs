//! The browser host: session bootstrap, the two callback loops, and the
//! renderer hand-off.
//!
//! ARCHITECTURE
//! ============
//! The host page hands over two JS callbacks: `detect`, which resolves
//! with a flat `Float64Array` of hand landmarks (or null) once the next
//! camera frame has been inferred, and `render`, which receives each
//! tick's snapshot as a JSON string and draws it. Between them sit two
//! independently re-armed loops sharing one [`SessionCore`]:
//!
//! 1. The inference loop awaits `detect` and overwrites the session's
//!    latest-frame slot, at whatever cadence detection achieves.
//! 2. The `requestAnimationFrame` loop calls `SessionCore::frame`,
//!    which gates itself to 30 Hz, and forwards the snapshot.
//!
//! Both loops consult a shared running flag before re-arming, so
//! [`HandSession::stop`] quiesces everything; pending view transitions
//! die with the deadline table when the session is dropped. Releasing
//! the camera stream is the page's job once `stop` returns.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use wasm_bindgen_futures::{JsFuture, future_to_promise, spawn_local};

use engine::landmark::HandFrame;
use engine::notice::NoticeSeverity;
use engine::session::{SessionAction, SessionCore, TickOutput};

use crate::catalog;

/// State shared by the session handle and its loops.
struct Shared {
    core: RefCell<SessionCore>,
    running: Cell<bool>,
    detect: js_sys::Function,
    render: js_sys::Function,
    catalog_base: String,
}

/// The session as exposed to the host page.
#[wasm_bindgen]
pub struct HandSession {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl HandSession {
    /// Create a session bound to the page's detector and renderer
    /// callbacks. Nothing runs until [`start`](Self::start).
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(catalog_base: String, detect: js_sys::Function, render: js_sys::Function) -> Self {
        init_logging();
        Self {
            shared: Rc::new(Shared {
                core: RefCell::new(SessionCore::new()),
                running: Cell::new(false),
                detect,
                render,
                catalog_base,
            }),
        }
    }

    /// Record the canvas dimensions used for hit-testing.
    pub fn set_viewport(&self, width: f64, height: f64) {
        self.shared.core.borrow_mut().set_viewport(width, height);
    }

    /// Probe the detector, load the table list, and arm both loops.
    ///
    /// The returned promise rejects when the detector probe fails (no
    /// capture source); the loops are never armed in that case and the
    /// caller should clear its loading state — there are no retries.
    #[must_use]
    pub fn start(&self) -> js_sys::Promise {
        let shared = Rc::clone(&self.shared);
        future_to_promise(async move {
            start_session(shared).await?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Stop both loops at their next re-arm point.
    pub fn stop(&self) {
        self.shared.running.set(false);
        log::info!("session stopped");
    }
}

/// The bootstrap behind [`HandSession::start`].
async fn start_session(shared: Rc<Shared>) -> Result<(), JsValue> {
    if shared.running.get() {
        return Ok(());
    }

    // One probe call: a detector that cannot deliver a single result
    // means the capture pipeline never came up.
    if let Err(err) = call_detect(&shared).await {
        log::error!("landmark source unavailable; session not started");
        return Err(err);
    }

    let names = match catalog::fetch_table_names(&shared.catalog_base).await {
        Some(names) => names,
        None => {
            log::warn!("catalog table list unavailable; using fallback tables");
            shared.core.borrow_mut().post_notice(
                "catalog unavailable, using sample tables",
                NoticeSeverity::Info,
                now_ms(),
            );
            catalog::fallback_tables()
        }
    };
    shared
        .core
        .borrow_mut()
        .load_tables(&names)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    shared.running.set(true);
    arm_inference_loop(Rc::clone(&shared));
    arm_tick_loop(&shared);
    Ok(())
}

fn init_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }
    });
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

/// One detector round trip: call, await, parse.
async fn call_detect(shared: &Rc<Shared>) -> Result<HandFrame, JsValue> {
    let value = shared.detect.call0(&JsValue::NULL)?;
    let resolved = JsFuture::from(js_sys::Promise::resolve(&value)).await?;
    if resolved.is_null() || resolved.is_undefined() {
        return Ok(HandFrame::empty());
    }
    let flat = js_sys::Float64Array::new(&resolved).to_vec();
    Ok(HandFrame::from_flat(&flat))
}

/// Inference loop: await the detector, overwrite the slot, re-arm
/// immediately. Detection latency never blocks the tick loop — ticks
/// just read whatever result is newest.
fn arm_inference_loop(shared: Rc<Shared>) {
    spawn_local(async move {
        while shared.running.get() {
            match call_detect(&shared).await {
                Ok(frame) => shared.core.borrow_mut().submit_frame(frame),
                Err(_) => {
                    // A transient detector hiccup; keep the loop alive
                    // but don't spin on a broken source.
                    log::warn!("landmark detection request failed");
                    gloo_timers::future::sleep(std::time::Duration::from_millis(100)).await;
                }
            }
        }
    });
}

/// Tick loop: `requestAnimationFrame` re-armed from inside its own
/// callback, holder kept alive in an `Rc` until the session stops.
fn arm_tick_loop(shared: &Rc<Shared>) {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let shared_for_cb = Rc::clone(shared);

    let cb = Closure::wrap(Box::new(move |now: f64| {
        if !shared_for_cb.running.get() {
            holder_for_cb.borrow_mut().take();
            return;
        }
        run_tick(&shared_for_cb, now);
        request_frame(&holder_for_cb);
    }) as Box<dyn FnMut(f64)>);

    *holder.borrow_mut() = Some(cb);
    request_frame(&holder);
}

fn request_frame(holder: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let armed = holder
        .borrow()
        .as_ref()
        .map(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()));
    match armed {
        Some(Ok(_)) => {}
        Some(Err(_)) | None => {
            log::error!("requestAnimationFrame unavailable; tick loop stopped");
            holder.borrow_mut().take();
        }
    }
}

/// One animation frame: run the gated tick, process its actions, hand
/// the snapshot to the renderer.
fn run_tick(shared: &Rc<Shared>, now_ms: f64) {
    let output = shared.core.borrow_mut().frame(now_ms);
    let Some(TickOutput { snapshot, actions }) = output else {
        return;
    };

    for action in actions {
        match action {
            SessionAction::FetchTables { tables } => fetch_and_supply(Rc::clone(shared), tables),
        }
    }

    match serde_json::to_string(&snapshot) {
        Ok(json) => {
            // Renderer failure is fatal for this tick only; the loop
            // re-arms regardless.
            if shared.render.call1(&JsValue::NULL, &JsValue::from_str(&json)).is_err() {
                log::warn!("renderer rejected snapshot; skipping frame");
            }
        }
        Err(err) => log::warn!("snapshot serialization failed: {err}"),
    }
}

/// Fetch catalog rows in the background and hand them to the session,
/// posting a passive notice when the data had to be fabricated.
fn fetch_and_supply(shared: Rc<Shared>, tables: Vec<String>) {
    spawn_local(async move {
        let (data, fabricated) = catalog::fetch_records(&shared.catalog_base, &tables).await;
        let mut core = shared.core.borrow_mut();
        if fabricated {
            core.post_notice("catalog unavailable, showing sample data", NoticeSeverity::Info, now_ms());
        }
        core.supply_results(data);
    });
}
