use crate::constants::{CAMERA_BUTTONS, LIGHT_SLIDERS, MATERIAL_BUTTONS};
use crate::dom;
use crate::SharedApp;
use piano_core::materials::{CameraMode, LightKind, MaterialKind};
use web_sys as web;

fn ids(group: &[(&'static str, &'static str)]) -> Vec<&'static str> {
    group.iter().map(|(id, _)| *id).collect()
}

/// Hook the side panel: camera mode, light sliders, material buttons, effect
/// checkboxes and the scene buttons.
pub fn wire_control_panel(document: &web::Document, app: &SharedApp) {
    for (id, name) in CAMERA_BUTTONS {
        let Some(mode) = CameraMode::from_name(name) else {
            continue;
        };
        let app = app.clone();
        let doc = document.clone();
        dom::add_click_listener(document, id, move || {
            dom::set_active(&doc, &ids(&CAMERA_BUTTONS), id);
            app.borrow_mut().set_camera_mode(mode);
        });
    }

    for (id, name) in LIGHT_SLIDERS {
        let Some(kind) = LightKind::from_name(name) else {
            continue;
        };
        let app = app.clone();
        dom::add_range_listener(document, id, move |v| {
            app.borrow_mut().lights_mut().set_intensity(kind, v);
        });
    }

    for (id, name) in MATERIAL_BUTTONS {
        let Some(material) = MaterialKind::from_name(name) else {
            continue;
        };
        let app = app.clone();
        let doc = document.clone();
        dom::add_click_listener(document, id, move || {
            dom::set_active(&doc, &ids(&MATERIAL_BUTTONS), id);
            app.borrow_mut().set_material(material);
        });
    }

    {
        let app = app.clone();
        dom::add_checkbox_listener(document, "bloom-effect", move |on| {
            app.borrow_mut().toggles_mut().bloom = on;
        });
    }
    {
        let app = app.clone();
        dom::add_checkbox_listener(document, "fog-effect", move |on| {
            app.borrow_mut().toggles_mut().fog = on;
        });
    }
    {
        let app = app.clone();
        dom::add_checkbox_listener(document, "shadows", move |on| {
            app.borrow_mut().toggles_mut().shadows = on;
            log::info!("[ui] shadows {}", on);
        });
    }
    {
        let app = app.clone();
        dom::add_checkbox_listener(document, "particles", move |on| {
            app.borrow_mut().toggles_mut().particles_visible = on;
        });
    }
    dom::add_range_listener(document, "particle-count", |v| {
        log::debug!("[ui] particle count {} (fixed cloud size)", v);
    });
    {
        let app = app.clone();
        dom::add_range_listener(document, "particle-size", move |v| {
            app.borrow_mut().toggles_mut().set_particle_size(v);
        });
    }

    {
        let app = app.clone();
        dom::add_click_listener(document, "reset-camera", move || {
            app.borrow_mut().reset_camera();
        });
    }
    {
        let app = app.clone();
        dom::add_click_listener(document, "toggle-wireframe", move || {
            let mut app = app.borrow_mut();
            let t = app.toggles_mut();
            t.wireframe = !t.wireframe;
            log::info!("[ui] wireframe {}", t.wireframe);
        });
    }
    {
        let app = app.clone();
        dom::add_click_listener(document, "toggle-physics", move || {
            let mut app = app.borrow_mut();
            let t = app.toggles_mut();
            t.physics = !t.physics;
            log::info!("[ui] physics {}", t.physics);
        });
    }
}
