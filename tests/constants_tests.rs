// Host-side checks on the web frontend's DOM tables.
// The main crate is wasm-only, so the constants module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use piano_core::materials::{CameraMode, LightKind, MaterialKind};

#[test]
fn control_tables_resolve_in_core() {
    for (id, name) in CAMERA_BUTTONS {
        assert!(CameraMode::from_name(name).is_some(), "{id} -> {name}");
    }
    for (id, name) in LIGHT_SLIDERS {
        assert!(LightKind::from_name(name).is_some(), "{id} -> {name}");
    }
    for (id, name) in MATERIAL_BUTTONS {
        assert!(MaterialKind::from_name(name).is_some(), "{id} -> {name}");
    }
}

#[test]
fn element_ids_are_unique() {
    let mut ids: Vec<&str> = CAMERA_BUTTONS
        .iter()
        .chain(LIGHT_SLIDERS.iter())
        .chain(MATERIAL_BUTTONS.iter())
        .map(|(id, _)| *id)
        .chain([CANVAS_ID, LOADING_SCREEN_ID, PROGRESS_BAR_ID])
        .collect();
    let n = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), n);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_is_sane() {
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC <= 0.25);
    assert!(STATS_REFRESH_SEC > 0.0);
    assert!(LOADING_HIDE_DELAY_MS >= 0);
}
