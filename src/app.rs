use glam::{Mat4, Vec3};

use crate::form::{Computation, FormState};
use crate::format;
use crate::registry::ShapeKind;
use crate::render::{CameraParams, LightParams};

// Per-frame animation steps
const SPIN_Y: f32 = 0.01;
const SPIN_X: f32 = 0.003;
const FLASH_DECAY: f32 = 0.05;

/// Interactive state shared by the control panel and the render loop.
pub struct ViewerState {
    pub form: FormState,
    outcome: Option<Computation>,
    spin: Vec3,
    flash: f32,
    preview_dirty: bool,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            form: FormState::default(),
            outcome: None,
            // the first frame uploads the default preview and pulses the chip
            spin: Vec3::ZERO,
            flash: 1.0,
            preview_dirty: true,
        }
    }

    /// Switches the active shape, discarding typed values and any result.
    pub fn select_shape(&mut self, shape: ShapeKind) {
        self.form.select(shape);
        self.outcome = None;
        self.preview_dirty = true;
        self.flash = 1.0;
    }

    /// Validates the form and records the outcome.
    pub fn compute(&mut self) {
        self.outcome = Some(self.form.compute());
        self.preview_dirty = true;
        self.flash = 1.0;
    }

    /// Advances the idle animation by one frame.
    pub fn tick(&mut self) {
        self.spin.y += SPIN_Y;
        self.spin.x += SPIN_X;
        self.flash = (self.flash - FLASH_DECAY).max(0.0);
    }

    pub fn outcome(&self) -> Option<&Computation> {
        self.outcome.as_ref()
    }

    pub fn spin(&self) -> Vec3 {
        self.spin
    }

    /// Remaining intensity of the shape-chip highlight, 1.0 right after a
    /// selection or computation, decaying to 0.0.
    pub fn flash(&self) -> f32 {
        self.flash
    }

    /// Clears and returns the flag that marks the preview mesh as stale.
    pub fn take_preview_dirty(&mut self) -> bool {
        std::mem::take(&mut self.preview_dirty)
    }

    pub fn result_line(&self) -> String {
        match &self.outcome {
            Some(computation) => computation.result_line(),
            None => format::volume_line(format::RESULT_PLACEHOLDER),
        }
    }

    pub fn error_line(&self) -> Option<String> {
        self.outcome.as_ref().and_then(Computation::error_line)
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn model_matrix(rotation: Vec3, scale: Vec3) -> Mat4 {
    let rotation = Mat4::from_rotation_z(rotation.z)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_x(rotation.x);
    rotation * Mat4::from_scale(scale)
}

pub fn camera_params(aspect: f32) -> CameraParams {
    let position = Vec3::new(4.0, 4.0, 6.0);
    let view = Mat4::look_at_rh(position, Vec3::ZERO, Vec3::Y);
    let projection =
        Mat4::perspective_rh(45.0_f32.to_radians(), aspect.max(0.01), 0.1, 1000.0);
    CameraParams {
        view_proj: projection * view,
        position,
    }
}

pub fn light_params() -> LightParams {
    LightParams {
        position: Vec3::new(5.0, 10.0, 7.0),
        color: Vec3::splat(1.0),
        intensity: 0.7,
    }
}
