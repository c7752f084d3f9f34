#![cfg(target_arch = "wasm32")]
use instant::Instant;
use piano_core::loading::LoadingStep;
use piano_core::{AppConfig, PianoApp, PointScene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;

pub(crate) type SharedScene = Rc<RefCell<PointScene>>;
pub(crate) type SharedApp = Rc<RefCell<PianoApp<SharedScene, audio::WebSynth>>>;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

// Browsers keep the AudioContext suspended until the first gesture.
fn wire_audio_unlock(document: &web::Document, app: &SharedApp) {
    let app = app.clone();
    let closure = Closure::once_into_js(move || {
        app.borrow().audio().resume();
    });
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "click",
        closure.unchecked_ref(),
        &opts,
    );
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("piano-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let gpu = frame::init_gpu(&canvas).await;
    overlay::mark_step(&document, LoadingStep::Environment);

    let scene: SharedScene = Rc::new(RefCell::new(PointScene::new()));
    let synth = audio::WebSynth::new();
    let app = PianoApp::new(scene.clone(), synth, AppConfig::seeded())?;
    // Lights, key materials, keyboard geometry, star field and camera are all
    // built by the app constructor.
    for step in [
        LoadingStep::Lights,
        LoadingStep::Materials,
        LoadingStep::Geometry,
        LoadingStep::Particles,
        LoadingStep::Camera,
    ] {
        overlay::mark_step(&document, step);
    }
    let app: SharedApp = Rc::new(RefCell::new(app));
    {
        let (w, h) = dom::sync_canvas_backing_size(&canvas);
        app.borrow_mut().set_viewport(w as f32, h as f32);
    }

    // Nothing to load for these: no textures or post passes, physics is a flag.
    overlay::mark_step(&document, LoadingStep::Textures);
    overlay::mark_step(&document, LoadingStep::PostProcess);
    overlay::mark_step(&document, LoadingStep::Physics);

    events::wire_pointer(&canvas, &app);
    events::wire_keyboard(&document, &app);
    overlay::mark_step(&document, LoadingStep::Navigation);
    overlay::mark_step(&document, LoadingStep::Picking);

    wire_audio_unlock(&document, &app);
    events::wire_control_panel(&document, &app);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        app,
        scene,
        canvas,
        document,
        gpu,
        last_instant: Instant::now(),
        stats_accum: 0.0,
    }));
    frame::start_loop(frame_ctx);
    overlay::hide_loading_after(constants::LOADING_HIDE_DELAY_MS);
    Ok(())
}
