use crate::dom::canvas_px;
use crate::SharedApp;
use piano_core::input::{wheel_delta_px, InputEvent, WheelUnit};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Mouse drag, release and wheel on the canvas become queued input events.
/// A press that never leaves the click slop is turned into a pick by the core.
pub fn wire_pointer(canvas: &web::HtmlCanvasElement, app: &SharedApp) {
    let down = Rc::new(Cell::new(false));

    {
        let app = app.clone();
        let down = down.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            if ev.button() != 0 {
                return;
            }
            let (x, y) = canvas_px(&ev, &target);
            down.set(true);
            app.borrow_mut().push(InputEvent::DragStart { x, y });
        }) as Box<dyn FnMut(_)>);
        _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let app = app.clone();
        let down = down.clone();
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            if !down.get() {
                return;
            }
            let (x, y) = canvas_px(&ev, &target);
            app.borrow_mut().push(InputEvent::DragMove { x, y });
        }) as Box<dyn FnMut(_)>);
        _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Release is caught on the window so a drag that leaves the canvas still ends.
    if let Some(window) = web::window() {
        let app = app.clone();
        let down = down.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            if down.replace(false) {
                app.borrow_mut().push(InputEvent::DragEnd);
            }
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            ev.prevent_default();
            let delta_y =
                wheel_delta_px(ev.delta_y() as f32, WheelUnit::from_dom_mode(ev.delta_mode()));
            app.borrow_mut().push(InputEvent::Scroll { delta_y });
        }) as Box<dyn FnMut(_)>);
        _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
