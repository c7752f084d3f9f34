use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[ui] missing #{}", element_id);
    }
}

/// `input` events on a range slider, reported as the parsed value.
pub fn add_range_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(f32) + 'static,
) {
    let Some(input) = input_element(document, element_id) else {
        return;
    };
    let target = input.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Ok(v) = target.value().parse::<f32>() {
            handler(v);
        }
    }) as Box<dyn FnMut()>);
    _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// `change` events on a checkbox, reported as the checked state.
pub fn add_checkbox_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(bool) + 'static,
) {
    let Some(input) = input_element(document, element_id) else {
        return;
    };
    let target = input.clone();
    let closure = Closure::wrap(Box::new(move || handler(target.checked())) as Box<dyn FnMut()>);
    _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn input_element(document: &web::Document, element_id: &str) -> Option<web::HtmlInputElement> {
    let el = document.get_element_by_id(element_id);
    if el.is_none() {
        log::warn!("[ui] missing #{}", element_id);
    }
    el?.dyn_into::<web::HtmlInputElement>().ok()
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// Mark `active_id` as the selected button of its group.
pub fn set_active(document: &web::Document, group: &[&str], active_id: &str) {
    for id in group {
        if let Some(el) = document.get_element_by_id(id) {
            let cl = el.class_list();
            if *id == active_id {
                _ = cl.add_1("active");
            } else {
                _ = cl.remove_1("active");
            }
        }
    }
}

/// Match the canvas backing store to its CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = ((rect.width() * dpr) as u32).max(1);
        let h_px = ((rect.height() * dpr) as u32).max(1);
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
    (canvas.width(), canvas.height())
}

/// Mouse position in canvas backing-store pixels.
#[inline]
pub fn canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    let sx = canvas.width() as f64 / rect.width().max(1.0);
    let sy = canvas.height() as f64 / rect.height().max(1.0);
    (
        ((ev.client_x() as f64 - rect.left()) * sx) as f32,
        ((ev.client_y() as f64 - rect.top()) * sy) as f32,
    )
}
