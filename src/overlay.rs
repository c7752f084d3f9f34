use crate::constants::*;
use piano_core::loading::LoadingStep;
use piano_core::stats::FrameStats;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Advance the loading bar and tick the step's checklist entry.
pub fn mark_step(document: &web::Document, step: LoadingStep) {
    let pct = step.progress_percent();
    if let Some(bar) = document
        .get_element_by_id(PROGRESS_BAR_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        _ = bar.style().set_property("width", &format!("{pct}%"));
    }
    if let Some(el) = document.get_element_by_id(&format!("req-{}", step.id())) {
        _ = el.class_list().add_1("completed");
    }
    log::info!("[loading] {} done ({:.1}%)", step.id(), pct);
}

pub fn hide_loading_after(delay_ms: i32) {
    let Some(window) = web::window() else {
        return;
    };
    let callback = Closure::once_into_js(move || {
        if let Some(el) = crate::dom::window_document()
            .and_then(|d| d.get_element_by_id(LOADING_SCREEN_ID))
        {
            _ = el.set_attribute("style", "display:none");
        }
        log::info!("[loading] complete");
    });
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms,
    );
}

fn wasm_memory_mb() -> f64 {
    wasm_bindgen::memory()
        .dyn_into::<js_sys::WebAssembly::Memory>()
        .ok()
        .and_then(|m| m.buffer().dyn_into::<js_sys::ArrayBuffer>().ok())
        .map(|b| b.byte_length() as f64 / BYTES_PER_MB)
        .unwrap_or(0.0)
}

pub fn update_stats(document: &web::Document, stats: &FrameStats) {
    crate::dom::set_text(document, "fps", &format!("{:.0}", stats.fps));
    crate::dom::set_text(document, "draw-calls", &stats.draw_calls.to_string());
    crate::dom::set_text(document, "triangles", &stats.triangles.to_string());
    crate::dom::set_text(document, "memory", &format!("{:.0}", wasm_memory_mb()));
}
