//! Orbit camera with three save/restore slots.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::params::CameraParameters;

/// Number of save/restore slots
pub const CAMERA_SLOTS: usize = 3;

/// Keeps the orbit off the poles where the up vector flips
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Orbit position around a look-at target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub target: Vec3,
    pub distance: f32,

    /// Rotation about the vertical axis (radians)
    pub yaw: f32,

    /// Elevation above the target plane (radians)
    pub pitch: f32,
}

/// Orbit camera state plus saved slots
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    params: CameraParameters,
    state: CameraState,
    slots: [Option<CameraState>; CAMERA_SLOTS],
}

impl OrbitCamera {
    /// Camera at the configured distance; slot 1 holds this initial state
    pub fn new(params: CameraParameters) -> Self {
        let state = CameraState {
            target: Vec3::ZERO,
            distance: params.distance.clamp(params.min_distance, params.max_distance),
            yaw: 0.0,
            pitch: 0.0,
        };
        let mut slots = [None; CAMERA_SLOTS];
        slots[0] = Some(state);
        Self {
            params,
            state,
            slots,
        }
    }

    /// Adopt new parameters and jump to the configured distance
    ///
    /// Slot 1 follows the new initial state; slots 2 and 3 keep their
    /// saved states.
    pub fn configure(&mut self, params: CameraParameters) {
        let fresh = Self::new(params);
        self.params = fresh.params;
        self.state = fresh.state;
        self.slots[0] = fresh.slots[0];
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn params(&self) -> &CameraParameters {
        &self.params
    }

    /// Zoom by wheel `delta` (positive moves away)
    pub fn zoom(&mut self, delta: f32) {
        let factor = 1.0 + delta * self.params.wheel_scale;
        self.state.distance = (self.state.distance * factor.max(0.0))
            .clamp(self.params.min_distance, self.params.max_distance);
    }

    /// Orbit by a drag of `(dx, dy)` pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.state.yaw += dx * self.params.drag_scale;
        self.state.pitch =
            (self.state.pitch + dy * self.params.drag_scale).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Eye position in world space
    pub fn eye(&self) -> Vec3 {
        let s = &self.state;
        let offset = Vec3::new(
            s.distance * s.pitch.cos() * s.yaw.sin(),
            s.distance * s.pitch.sin(),
            s.distance * s.pitch.cos() * s.yaw.cos(),
        );
        s.target + offset
    }

    /// View-projection matrix for the configured viewport
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.state.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            self.params.aspect_ratio(),
            self.params.near_plane,
            self.params.far_plane,
        );
        proj * view
    }

    /// Store the current state in `slot` (1-based)
    ///
    /// # Returns
    /// `false` for a slot outside `1..=3`
    pub fn save(&mut self, slot: usize) -> bool {
        match slot.checked_sub(1).and_then(|i| self.slots.get_mut(i)) {
            Some(entry) => {
                *entry = Some(self.state);
                true
            }
            None => false,
        }
    }

    /// Jump to the state stored in `slot` (1-based)
    ///
    /// # Returns
    /// `false` when the slot is out of range or empty
    pub fn restore(&mut self, slot: usize) -> bool {
        match slot.checked_sub(1).and_then(|i| self.slots.get(i)).copied().flatten() {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }
}
