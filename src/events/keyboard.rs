use crate::SharedApp;
use piano_core::input::InputEvent;
use piano_core::keymap::note_for_key;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

fn typing_in_form_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .is_some()
}

pub fn wire_keyboard(document: &web::Document, app: &SharedApp) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || typing_in_form_field(&ev) {
            return;
        }
        let key = ev.key();
        if note_for_key(&key).is_none() {
            return;
        }
        // Tab and Enter are notes here, not focus or submit keys.
        ev.prevent_default();
        log::debug!("[keys] down {:?} repeat={}", key, ev.repeat());
        app.borrow_mut().push(InputEvent::KeyDown {
            key,
            repeat: ev.repeat(),
        });
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
