// DOM ids and timing used by the web frontend.

pub const CANVAS_ID: &str = "canvas";
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const PROGRESS_BAR_ID: &str = "progress-bar";
pub const LOADING_HIDE_DELAY_MS: i32 = 300;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after a hidden tab resumes
pub const STATS_REFRESH_SEC: f32 = 0.25;

// Control panel: (element id, name understood by the core)
pub const CAMERA_BUTTONS: [(&str, &str); 3] = [
    ("camera-orbit", "orbit"),
    ("camera-fps", "fps"),
    ("camera-fly", "fly"),
];
pub const LIGHT_SLIDERS: [(&str, &str); 4] = [
    ("ambient-light", "ambient"),
    ("directional-light", "directional"),
    ("point-light", "point"),
    ("spot-light", "spot"),
];
pub const MATERIAL_BUTTONS: [(&str, &str); 3] = [
    ("material-basic", "basic"),
    ("material-physical", "physical"),
    ("material-shader", "shader"),
];

pub const BYTES_PER_MB: f64 = 1_048_576.0;
