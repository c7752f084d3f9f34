/// Frame counters for the stats panel.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    pub fps: f32,
    pub draw_calls: u32,
    pub triangles: u32,
    pub frames: u64,
}

// Exponential smoothing factor for the FPS readout
const FPS_BLEND_ALPHA: f32 = 0.1;

impl FrameStats {
    pub fn record_frame(&mut self, dt_sec: f32) {
        self.frames += 1;
        if !(dt_sec.is_finite() && dt_sec > 0.0) {
            return;
        }
        let instant_fps = 1.0 / dt_sec;
        self.fps = if self.fps == 0.0 {
            instant_fps
        } else {
            (1.0 - FPS_BLEND_ALPHA) * self.fps + FPS_BLEND_ALPHA * instant_fps
        };
    }

    pub fn set_geometry(&mut self, draw_calls: u32, triangles: u32) {
        self.draw_calls = draw_calls;
        self.triangles = triangles;
    }
}
