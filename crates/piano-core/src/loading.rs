/// Start-up stages shown on the loading screen, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingStep {
    Environment,
    Lights,
    Materials,
    Geometry,
    Particles,
    Camera,
    Textures,
    PostProcess,
    Physics,
    Navigation,
    Picking,
}

impl LoadingStep {
    pub const ALL: [LoadingStep; 11] = [
        LoadingStep::Environment,
        LoadingStep::Lights,
        LoadingStep::Materials,
        LoadingStep::Geometry,
        LoadingStep::Particles,
        LoadingStep::Camera,
        LoadingStep::Textures,
        LoadingStep::PostProcess,
        LoadingStep::Physics,
        LoadingStep::Navigation,
        LoadingStep::Picking,
    ];

    /// Short id used for the `req-<id>` checklist elements.
    pub fn id(self) -> &'static str {
        match self {
            LoadingStep::Environment => "env",
            LoadingStep::Lights => "lights",
            LoadingStep::Materials => "materials",
            LoadingStep::Geometry => "geometry",
            LoadingStep::Particles => "particles",
            LoadingStep::Camera => "camera",
            LoadingStep::Textures => "textures",
            LoadingStep::PostProcess => "postprocess",
            LoadingStep::Physics => "physics",
            LoadingStep::Navigation => "navigation",
            LoadingStep::Picking => "picking",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    /// Progress after this step completes, 0..=100.
    pub fn progress_percent(self) -> f32 {
        (self.index() + 1) as f32 / Self::ALL.len() as f32 * 100.0
    }
}
