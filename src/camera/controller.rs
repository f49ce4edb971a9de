use glam::{Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::{CameraOptions, ProfileParams};
use crate::util::smooth_damp::smooth_damp_vec3;

/// Radians of orbit per pixel of drag at `rotate_speed = 1`.
const ROTATE_SCALE: f32 = 0.005;
/// World units of pan per pixel per unit of distance at `pan_speed = 1`.
const PAN_SCALE: f32 = 0.001;
/// Fractional distance change per wheel notch at `dolly_speed = 1`.
const DOLLY_SCALE: f32 = 0.1;
/// Cosine limit keeping the orbit away from the poles.
const POLE_LIMIT: f32 = 0.995;
/// Below this residual the camera counts as settled.
const SETTLE_EPSILON: f32 = 1.0e-4;

/// What a primary-button (or one-finger) drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryAction {
    /// Orbit around the target.
    #[default]
    Rotate,
    /// Translate eye and target together.
    Truck,
    /// Ignore primary drags.
    None,
}

/// Contract of a smoothed camera controller driven by discrete look-at
/// commands. The controller owns interpolation toward the latest command.
pub trait CameraControls {
    /// Current (interpolated) eye position.
    fn position(&self) -> Vec3;
    /// Bounds for user dolly while focused.
    fn set_distance_limits(&mut self, min: f32, max: f32);
    /// Behavior of primary-button drags.
    fn set_primary_action(&mut self, action: PrimaryAction);
    /// Retarget the camera. With `animate` the move is smoothed over time,
    /// otherwise it snaps. A new command supersedes any in-flight one.
    fn set_look_at(&mut self, eye: Vec3, target: Vec3, animate: bool);
}

/// Orbit camera that chases its goal pose with a critically damped spring.
pub struct SmoothCamera {
    /// Current camera state.
    pub camera: Camera,
    goal_eye: Vec3,
    goal_target: Vec3,
    eye_velocity: Vec3,
    target_velocity: Vec3,

    min_distance: f32,
    max_distance: f32,
    primary_action: PrimaryAction,
    dragging: bool,

    smooth_time: f32,
    dragging_smooth_time: f32,
    rotate_speed: f32,
    pan_speed: f32,
    dolly_speed: f32,
}

impl SmoothCamera {
    /// Create a camera resting at `options.initial_eye`, looking at the
    /// origin.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let eye = options.initial_eye();
        let camera = Camera {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };
        let params = ProfileParams::default();
        Self {
            camera,
            goal_eye: eye,
            goal_target: Vec3::ZERO,
            eye_velocity: Vec3::ZERO,
            target_velocity: Vec3::ZERO,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            primary_action: PrimaryAction::Rotate,
            dragging: false,
            smooth_time: options.smooth_time,
            dragging_smooth_time: options.dragging_smooth_time,
            rotate_speed: params.rotate_speed,
            pan_speed: params.pan_speed,
            dolly_speed: params.dolly_speed,
        }
    }

    /// Push projection and smoothing options.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.smooth_time = options.smooth_time;
        self.dragging_smooth_time = options.dragging_smooth_time;
    }

    /// Adopt the gesture speeds of a device profile.
    pub fn apply_profile(&mut self, params: &ProfileParams) {
        self.rotate_speed = params.rotate_speed;
        self.pan_speed = params.pan_speed;
        self.dolly_speed = params.dolly_speed;
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.set_aspect(width as f32 / height as f32);
        }
    }

    /// Set the projection aspect directly. Non-positive or non-finite
    /// values are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect > 0.0 && aspect.is_finite() {
            self.camera.aspect = aspect;
        }
    }

    /// Eye position the camera is heading for.
    #[must_use]
    pub fn goal_eye(&self) -> Vec3 {
        self.goal_eye
    }

    /// Target the camera is heading for.
    #[must_use]
    pub fn goal_target(&self) -> Vec3 {
        self.goal_target
    }

    /// Current dolly bounds.
    #[must_use]
    pub fn distance_limits(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    /// Current primary drag behavior.
    #[must_use]
    pub fn primary_action(&self) -> PrimaryAction {
        self.primary_action
    }

    /// Switch to the (snappier) dragging smooth time while the user drags.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Whether the camera has not yet reached its goal.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.camera.eye.distance(self.goal_eye) > SETTLE_EPSILON
            || self.camera.target.distance(self.goal_target) > SETTLE_EPSILON
    }

    /// Advance the smoothing by `dt` seconds. Returns whether the camera is
    /// still moving.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.is_animating() {
            return false;
        }
        let smooth_time = if self.dragging {
            self.dragging_smooth_time
        } else {
            self.smooth_time
        };
        self.camera.eye = smooth_damp_vec3(
            self.camera.eye,
            self.goal_eye,
            &mut self.eye_velocity,
            smooth_time,
            dt,
        );
        self.camera.target = smooth_damp_vec3(
            self.camera.target,
            self.goal_target,
            &mut self.target_velocity,
            smooth_time,
            dt,
        );
        self.is_animating()
    }

    /// Orbit the goal eye around the goal target by a drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        let offset = self.goal_eye - self.goal_target;
        let yaw = Quat::from_axis_angle(
            Vec3::Y,
            -delta.x * ROTATE_SCALE * self.rotate_speed,
        );
        let mut offset = yaw * offset;

        let right = Vec3::Y.cross(offset).normalize_or_zero();
        if right != Vec3::ZERO {
            let pitch = Quat::from_axis_angle(
                right,
                -delta.y * ROTATE_SCALE * self.rotate_speed,
            );
            let pitched = pitch * offset;
            // Stay off the poles so the up vector never flips
            if pitched.normalize_or_zero().dot(Vec3::Y).abs() < POLE_LIMIT {
                offset = pitched;
            }
        }
        self.goal_eye = self.goal_target + offset;
    }

    /// Translate eye and target in the view plane by a drag delta in
    /// pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let offset = self.goal_eye - self.goal_target;
        let forward = (-offset).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        let scale = PAN_SCALE * self.pan_speed * offset.length();
        let translation = right * (-delta.x * scale) + up * (delta.y * scale);

        self.goal_eye += translation;
        self.goal_target += translation;
    }

    /// Move toward (positive) or away from (negative) the target, clamped to
    /// the distance limits.
    pub fn dolly(&mut self, delta: f32) {
        let offset = self.goal_eye - self.goal_target;
        let dir = offset.normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        let distance = (offset.length()
            * (1.0 - delta * DOLLY_SCALE * self.dolly_speed))
            .clamp(self.min_distance, self.max_distance);
        self.goal_eye = self.goal_target + dir * distance;
    }
}

impl CameraControls for SmoothCamera {
    fn position(&self) -> Vec3 {
        self.camera.eye
    }

    fn set_distance_limits(&mut self, min: f32, max: f32) {
        self.min_distance = min;
        self.max_distance = max.max(min);
    }

    fn set_primary_action(&mut self, action: PrimaryAction) {
        self.primary_action = action;
    }

    fn set_look_at(&mut self, eye: Vec3, target: Vec3, animate: bool) {
        self.goal_eye = eye;
        self.goal_target = target;
        if !animate {
            self.camera.eye = eye;
            self.camera.target = target;
            self.eye_velocity = Vec3::ZERO;
            self.target_velocity = Vec3::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SmoothCamera {
        SmoothCamera::new(&CameraOptions::default(), 16.0 / 9.0)
    }

    #[test]
    fn animated_look_at_converges() {
        let mut cam = controller();
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let target = Vec3::new(1.0, 0.0, -1.0);
        cam.set_look_at(eye, target, true);
        assert!(cam.is_animating());
        let mut frames = 0;
        while cam.update(1.0 / 60.0) && frames < 1000 {
            frames += 1;
        }
        assert!(frames > 1);
        assert!(cam.camera.eye.distance(eye) < 1.0e-3);
        assert!(cam.camera.target.distance(target) < 1.0e-3);
    }

    #[test]
    fn snap_look_at_is_immediate() {
        let mut cam = controller();
        cam.set_look_at(Vec3::X * 4.0, Vec3::ZERO, false);
        assert_eq!(cam.position(), Vec3::X * 4.0);
        assert!(!cam.is_animating());
        assert!(!cam.update(0.016));
    }

    #[test]
    fn new_target_supersedes_in_flight_move() {
        let mut cam = controller();
        cam.set_look_at(Vec3::new(0.0, 5.0, 5.0), Vec3::ZERO, true);
        let _ = cam.update(0.05);
        let second = Vec3::new(-6.0, 2.0, 0.0);
        cam.set_look_at(second, Vec3::ZERO, true);
        for _ in 0..600 {
            let _ = cam.update(1.0 / 60.0);
        }
        assert!(cam.position().distance(second) < 1.0e-3);
    }

    #[test]
    fn dolly_respects_distance_limits() {
        let mut cam = controller();
        cam.set_look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, false);
        cam.set_distance_limits(5.0, 20.0);
        for _ in 0..100 {
            cam.dolly(1.0);
        }
        assert!((cam.goal_eye().length() - 5.0).abs() < 1.0e-4);
        for _ in 0..100 {
            cam.dolly(-1.0);
        }
        assert!((cam.goal_eye().length() - 20.0).abs() < 1.0e-4);
    }

    #[test]
    fn rotate_keeps_distance() {
        let mut cam = controller();
        cam.set_look_at(Vec3::new(0.0, 3.0, 8.0), Vec3::ZERO, false);
        let before = cam.goal_eye().length();
        cam.rotate(Vec2::new(120.0, -40.0));
        assert!((cam.goal_eye().length() - before).abs() < 1.0e-4);
        assert!(cam.goal_eye() != Vec3::new(0.0, 3.0, 8.0));
    }

    #[test]
    fn pan_moves_eye_and_target_together() {
        let mut cam = controller();
        cam.set_look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, false);
        cam.pan(Vec2::new(50.0, 0.0));
        let offset = cam.goal_eye() - cam.goal_target();
        assert!((offset - Vec3::new(0.0, 0.0, 10.0)).length() < 1.0e-4);
        assert!(cam.goal_target().x < 0.0);
    }

    #[test]
    fn aspect_ignores_degenerate_values() {
        let mut ctrl = controller();
        ctrl.resize(600, 1000);
        assert!((ctrl.camera.aspect - 0.6).abs() < 1.0e-6);
        ctrl.set_aspect(0.0);
        ctrl.set_aspect(f32::NAN);
        ctrl.resize(800, 0);
        assert!((ctrl.camera.aspect - 0.6).abs() < 1.0e-6);
    }

    #[test]
    fn profile_speeds_scale_gestures() {
        let mut slow = controller();
        let mut fast = controller();
        slow.apply_profile(&ProfileParams::mobile());
        fast.apply_profile(&ProfileParams::desktop());
        for cam in [&mut slow, &mut fast] {
            cam.set_look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, false);
            cam.dolly(1.0);
        }
        assert!(slow.goal_eye().length() > fast.goal_eye().length());
    }
}
