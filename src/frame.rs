use crate::constants::*;
use crate::render;
use crate::{overlay, SharedApp, SharedScene};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub app: SharedApp,
    pub scene: SharedScene,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    pub stats_accum: f32,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let (w, h) = crate::dom::sync_canvas_backing_size(&self.canvas);
        let mut app = self.app.borrow_mut();
        app.set_viewport(w as f32, h as f32);
        app.tick(dt_sec);

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(w, h);
            let frame = app.frame_instances(&self.scene.borrow());
            let uniforms = app.uniforms();
            match gpu.render(&uniforms, &frame) {
                Ok(draws) => app
                    .stats_mut()
                    .set_geometry(draws.draw_calls, draws.triangles),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory; rendering stopped");
                    self.gpu = None;
                }
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        }

        self.stats_accum += dt_sec;
        if self.stats_accum >= STATS_REFRESH_SEC {
            self.stats_accum = 0.0;
            overlay::update_stats(&self.document, app.stats());
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
