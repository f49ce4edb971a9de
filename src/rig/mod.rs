//! Camera rig: decides where the camera should look.
//!
//! The rig reads the focus route, the docked-panel flag, marker visibility,
//! the device profile and the viewport aspect. Whenever one of them changes
//! it resolves a focus target in the scene, picks a framing and issues one
//! animated look-at command to a [`CameraControls`] implementation. The
//! controller owns the actual interpolation.
//!
//! The docked flag is read through a [`Deferred`] buffer, so camera motion
//! lags panel changes by `docked_delay_ticks` updates instead of competing
//! with the panel animation.

mod deferred;
mod scene;
mod state;

use glam::Vec3;

pub use deferred::Deferred;
pub use scene::{ObjectId, SceneQuery, SceneTable};
pub use state::{
    CameraPose, FocusState, PondPose, RigInput, RigState, RouteSignal,
};

use crate::camera::{CameraControls, PrimaryAction};
use crate::device::DeviceProfile;
use crate::options::{DeviceOptions, Options, ProfileParams, RigOptions};
use crate::util::VectorPool;

/// Inputs the last retarget was computed from.
#[derive(Debug, Clone, PartialEq)]
struct InputKey {
    focus_id: Option<String>,
    docked: bool,
    markers_visible: bool,
    profile: DeviceProfile,
    aspect_bits: u32,
}

impl InputKey {
    fn capture(input: &RigInput, docked: bool) -> Self {
        Self {
            focus_id: input.route.focus_id().map(str::to_owned),
            docked,
            markers_visible: input.markers_visible,
            profile: input.profile,
            aspect_bits: input.aspect.to_bits(),
        }
    }

    fn matches(&self, input: &RigInput, docked: bool) -> bool {
        self.focus_id.as_deref() == input.route.focus_id()
            && self.docked == docked
            && self.markers_visible == input.markers_visible
            && self.profile == input.profile
            && self.aspect_bits == input.aspect.to_bits()
    }
}

/// Aspect ratio used for object framing: viewports narrower than square
/// are treated as `narrow_aspect`.
#[must_use]
pub fn effective_aspect(aspect: f32, narrow_aspect: f32) -> f32 {
    if aspect < 1.0 {
        narrow_aspect
    } else {
        aspect
    }
}

/// Focus-driven camera retargeting state machine.
pub struct CameraRig {
    options: RigOptions,
    device: DeviceOptions,
    docked: Deferred<bool>,
    previous_active: bool,
    saved_eye: Vec3,
    state: RigState,
    focus: FocusState,
    last_input: Option<InputKey>,
    scratch: VectorPool,
}

impl CameraRig {
    /// Create an unfocused rig.
    #[must_use]
    pub fn new(options: RigOptions, device: DeviceOptions) -> Self {
        let docked = Deferred::new(false, options.docked_delay_ticks);
        Self {
            options,
            device,
            docked,
            previous_active: false,
            saved_eye: Vec3::ZERO,
            state: RigState::Unfocused,
            focus: FocusState::default(),
            last_input: None,
            scratch: VectorPool::new(1, 2),
        }
    }

    /// Create a rig from the rig and device sections of `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.rig.clone(), options.device.clone())
    }

    /// Replace the framing constants. The next update retargets.
    pub fn set_options(&mut self, options: RigOptions, device: DeviceOptions) {
        if options.docked_delay_ticks != self.docked.delay() {
            self.docked =
                Deferred::new(self.docked.value(), options.docked_delay_ticks);
        }
        self.options = options;
        self.device = device;
        self.invalidate();
    }

    /// Force a retarget on the next update even if no input changed (e.g.
    /// after the scene graph was edited).
    pub fn invalidate(&mut self) {
        self.last_input = None;
    }

    /// Drop all transient state, as for a freshly loaded scene.
    pub fn reset(&mut self) {
        self.docked.reset();
        self.previous_active = false;
        self.saved_eye = Vec3::ZERO;
        self.state = RigState::Unfocused;
        self.focus = FocusState::default();
        self.last_input = None;
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> RigState {
        self.state
    }

    /// Focus facts from the last retarget.
    #[must_use]
    pub fn focus_state(&self) -> &FocusState {
        &self.focus
    }

    /// Eye position captured when focus was last gained.
    #[must_use]
    pub fn saved_eye(&self) -> Vec3 {
        self.saved_eye
    }

    /// Pool the rig reads world positions through.
    #[must_use]
    pub fn scratch_pool(&self) -> &VectorPool {
        &self.scratch
    }

    /// Run one update tick.
    ///
    /// Returns the pose issued to `controls`, or `None` when no input
    /// changed since the previous retarget.
    pub fn update<S, C>(
        &mut self,
        input: &RigInput,
        scene: &S,
        controls: &mut C,
    ) -> Option<CameraPose>
    where
        S: SceneQuery,
        C: CameraControls,
    {
        let docked = self.docked.push(input.panel_docked);
        if self
            .last_input
            .as_ref()
            .is_some_and(|last| last.matches(input, docked))
        {
            return None;
        }
        self.last_input = Some(InputKey::capture(input, docked));
        self.focus.is_panel_docked = docked;

        let previous_state = self.state;
        let pose = match self.resolve(input, scene) {
            Some(handle) => {
                self.focus_on(handle, input, docked, scene, controls)
            }
            None => self.unfocus(input, docked),
        };
        controls.set_look_at(pose.eye, pose.target, true);
        log::debug!(
            "camera rig {previous_state:?} -> {:?}: eye {} target {}",
            self.state,
            pose.eye,
            pose.target
        );
        Some(pose)
    }

    /// Routed object, else the pond, else nothing.
    fn resolve<S: SceneQuery>(
        &self,
        input: &RigInput,
        scene: &S,
    ) -> Option<S::Handle> {
        input
            .route
            .focus_id()
            .and_then(|id| {
                let found = scene.find(id);
                if found.is_none() {
                    log::debug!("focus id {id:?} not in scene, trying pond");
                }
                found
            })
            .or_else(|| scene.find(&self.options.pond_name))
    }

    fn focus_on<S, C>(
        &mut self,
        handle: S::Handle,
        input: &RigInput,
        docked: bool,
        scene: &S,
        controls: &mut C,
    ) -> CameraPose
    where
        S: SceneQuery,
        C: CameraControls,
    {
        if !self.previous_active {
            self.saved_eye = controls.position();
            self.previous_active = true;
        }

        let params = input.profile.params(&self.device);
        let min_distance = if scene.is_inspectable(handle) {
            self.options.min_distance_inspectable
        } else {
            self.options.min_distance
        }
        .max(params.min_focus_distance);
        controls.set_distance_limits(min_distance, self.options.max_distance);
        controls.set_primary_action(PrimaryAction::Rotate);

        let center = {
            let mut scratch = self.scratch.scoped();
            scene.write_world_position(handle, &mut scratch);
            *scratch
        };

        let name = scene.name(handle);
        if self.focus.active_id.as_deref() != Some(name) {
            self.focus.active_id = Some(name.to_owned());
        }
        let is_pond = name == self.options.pond_name;
        self.focus.is_pond_focused = is_pond;

        if is_pond {
            let pose = if input.markers_visible {
                PondPose::Overview
            } else {
                PondPose::Inside
            };
            self.state = RigState::FocusedOnPond(pose);
            let tilt = self.tilt(docked);
            let offset = match pose {
                PondPose::Overview => Vec3::new(
                    0.0,
                    params.overview_height + tilt,
                    self.options.overview_offset,
                ),
                PondPose::Inside => Vec3::new(
                    0.0,
                    self.options.inside_lift + tilt,
                    self.options.inside_offset,
                ),
            };
            CameraPose {
                eye: center + offset,
                target: center,
            }
        } else {
            self.state = RigState::FocusedOnObject;
            let aspect =
                effective_aspect(input.aspect, self.options.narrow_aspect);
            let distance = self.options.object_distance / aspect.min(1.0);
            CameraPose {
                eye: center
                    + Vec3::new(0.0, self.options.object_lift, distance),
                target: center,
            }
        }
    }

    fn unfocus(&mut self, input: &RigInput, docked: bool) -> CameraPose {
        self.previous_active = false;
        self.state = RigState::Unfocused;
        self.focus.active_id = None;
        self.focus.is_pond_focused = false;

        if self.saved_eye != Vec3::ZERO {
            return CameraPose {
                eye: self.saved_eye,
                target: Vec3::ZERO,
            };
        }
        let params = input.profile.params(&self.device);
        CameraPose {
            eye: self.overview_offset(&params, docked),
            target: Vec3::ZERO,
        }
    }

    fn overview_offset(&self, params: &ProfileParams, docked: bool) -> Vec3 {
        Vec3::new(
            0.0,
            params.overview_height + self.tilt(docked),
            self.options.overview_offset,
        )
    }

    fn tilt(&self, docked: bool) -> f32 {
        if docked {
            0.0
        } else {
            self.options.undocked_tilt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::SmoothCamera;
    use crate::options::CameraOptions;

    const EPS: f32 = 1.0e-4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    /// Records every command instead of animating.
    struct RecordingControls {
        position: Vec3,
        limits: (f32, f32),
        action: PrimaryAction,
        commands: Vec<(Vec3, Vec3, bool)>,
    }

    impl RecordingControls {
        fn at(position: Vec3) -> Self {
            Self {
                position,
                limits: (0.0, f32::INFINITY),
                action: PrimaryAction::None,
                commands: Vec::new(),
            }
        }
    }

    impl CameraControls for RecordingControls {
        fn position(&self) -> Vec3 {
            self.position
        }

        fn set_distance_limits(&mut self, min: f32, max: f32) {
            self.limits = (min, max);
        }

        fn set_primary_action(&mut self, action: PrimaryAction) {
            self.action = action;
        }

        fn set_look_at(&mut self, eye: Vec3, target: Vec3, animate: bool) {
            self.commands.push((eye, target, animate));
        }
    }

    fn pond_scene() -> SceneTable {
        let mut scene = SceneTable::new();
        let pond = scene.insert("pond", Vec3::new(2.0, 0.0, -1.0));
        let lily = scene.insert_child(pond, "lily", Vec3::new(1.0, 0.2, 0.0));
        scene.set_inspectable(lily, true);
        let _ = scene.insert("frog", Vec3::new(-4.0, 0.5, 3.0));
        scene
    }

    fn scene_without_pond() -> SceneTable {
        let mut scene = pond_scene();
        let _ = scene.remove("pond");
        scene
    }

    fn rig() -> CameraRig {
        CameraRig::new(RigOptions::default(), DeviceOptions::default())
    }

    fn routed(id: &str) -> RigInput {
        RigInput {
            route: RouteSignal::focus(id),
            ..RigInput::default()
        }
    }

    #[test]
    fn pond_is_default_focus() {
        let mut rig = rig();
        let mut controls = RecordingControls::at(Vec3::new(0.0, 12.0, 16.0));
        let pose = rig
            .update(&RigInput::default(), &pond_scene(), &mut controls)
            .unwrap();
        assert_eq!(rig.state(), RigState::FocusedOnPond(PondPose::Overview));
        assert_eq!(rig.focus_state().active_id.as_deref(), Some("pond"));
        assert!(rig.focus_state().is_pond_focused);
        assert!(approx(pose.target, Vec3::new(2.0, 0.0, -1.0)));
    }

    #[test]
    fn routed_object_takes_precedence_over_pond() {
        let mut rig = rig();
        let mut controls = RecordingControls::at(Vec3::ONE);
        let pose = rig
            .update(&routed("frog"), &pond_scene(), &mut controls)
            .unwrap();
        assert_eq!(rig.state(), RigState::FocusedOnObject);
        assert_eq!(rig.focus_state().active_id.as_deref(), Some("frog"));
        assert!(!rig.focus_state().is_pond_focused);
        assert!(approx(pose.target, Vec3::new(-4.0, 0.5, 3.0)));
    }

    #[test]
    fn unknown_id_falls_back_to_pond() {
        let mut rig = rig();
        let mut controls = RecordingControls::at(Vec3::ONE);
        let _ = rig.update(&routed("heron"), &pond_scene(), &mut controls);
        assert_eq!(rig.focus_state().active_id.as_deref(), Some("pond"));
    }

    #[test]
    fn unmatched_route_ignores_its_id() {
        let mut rig = rig();
        let mut controls = RecordingControls::at(Vec3::ONE);
        let input = RigInput {
            route: RouteSignal {
                matched: false,
                id: Some("frog".to_owned()),
            },
            ..RigInput::default()
        };
        let _ = rig.update(&input, &pond_scene(), &mut controls);
        assert_eq!(rig.focus_state().active_id.as_deref(), Some("pond"));
    }

    #[test]
    fn missing_target_without_pond_degrades_to_default_overview() {
        let mut rig = rig();
        let mut controls = RecordingControls::at(Vec3::ONE);
        let pose = rig
            .update(&routed("heron"), &scene_without_pond(), &mut controls)
            .unwrap();
        assert_eq!(rig.state(), RigState::Unfocused);
        assert!(rig.focus_state().active_id.is_none());
        // desktop height 8 + undocked tilt 1.5, offset 10
        assert!(approx(pose.eye, Vec3::new(0.0, 9.5, 10.0)));
        assert_eq!(pose.target, Vec3::ZERO);
    }

    #[test]
    fn marker_visibility_selects_pond_pose() {
        let mut rig = rig();
        let scene = pond_scene();
        let start = Vec3::new(0.0, 12.0, 16.0);
        let mut controls = RecordingControls::at(start);

        let hidden = RigInput {
            markers_visible: false,
            ..RigInput::default()
        };
        let inside = rig.update(&hidden, &scene, &mut controls).unwrap();
        assert_eq!(rig.state(), RigState::FocusedOnPond(PondPose::Inside));
        assert!(approx(inside.eye, Vec3::new(2.0, 1.8, -0.2)));

        controls.position = Vec3::new(5.0, 5.0, 5.0);
        let overview = rig
            .update(&RigInput::default(), &scene, &mut controls)
            .unwrap();
        assert_eq!(rig.state(), RigState::FocusedOnPond(PondPose::Overview));
        assert!(approx(overview.eye, Vec3::new(2.0, 9.5, 9.0)));
        assert_eq!(rig.saved_eye(), start);
    }

    #[test]
    fn unfocus_restores_eye_from_original_edge() {
        let mut rig = rig();
        let scene = scene_without_pond();
        let start = Vec3::new(3.0, 7.0, 11.0);
        let mut controls = RecordingControls::at(start);

        let _ = rig.update(&routed("lily"), &scene, &mut controls).unwrap();
        assert_eq!(rig.saved_eye(), start);

        controls.position = Vec3::new(1.0, 2.0, 3.0);
        let _ = rig.update(&routed("frog"), &scene, &mut controls).unwrap();
        assert_eq!(rig.saved_eye(), start);

        controls.position = Vec3::new(-8.0, 1.0, 0.0);
        let pose = rig
            .update(&RigInput::default(), &scene, &mut controls)
            .unwrap();
        assert_eq!(rig.state(), RigState::Unfocused);
        assert_eq!(pose.eye, start);
        assert_eq!(pose.target, Vec3::ZERO);
    }

    #[test]
    fn refocus_after_unfocus_captures_a_new_eye() {
        let mut rig = rig();
        let scene = scene_without_pond();
        let mut controls = RecordingControls::at(Vec3::X);
        let _ = rig.update(&routed("frog"), &scene, &mut controls);
        let _ = rig.update(&RigInput::default(), &scene, &mut controls);
        controls.position = Vec3::Y * 4.0;
        let _ = rig.update(&routed("lily"), &scene, &mut controls);
        assert_eq!(rig.saved_eye(), Vec3::Y * 4.0);
    }

    #[test]
    fn docked_flag_lags_one_tick() {
        let mut rig = rig();
        let scene = pond_scene();
        let mut controls = RecordingControls::at(Vec3::ONE);
        let _ = rig.update(&RigInput::default(), &scene, &mut controls);

        let docked = RigInput {
            panel_docked: true,
            ..RigInput::default()
        };
        assert!(rig.update(&docked, &scene, &mut controls).is_none());
        assert!(!rig.focus_state().is_panel_docked);

        let pose = rig.update(&docked, &scene, &mut controls).unwrap();
        assert!(rig.focus_state().is_panel_docked);
        // tilt removed while the panel is docked
        assert!(approx(pose.eye, Vec3::new(2.0, 8.0, 9.0)));
    }

    #[test]
    fn zero_delay_reads_docked_flag_immediately() {
        let options = RigOptions {
            docked_delay_ticks: 0,
            ..RigOptions::default()
        };
        let mut rig = CameraRig::new(options, DeviceOptions::default());
        let mut controls = RecordingControls::at(Vec3::ONE);
        let docked = RigInput {
            panel_docked: true,
            ..RigInput::default()
        };
        let pose = rig.update(&docked, &pond_scene(), &mut controls).unwrap();
        assert!(approx(pose.eye, Vec3::new(2.0, 8.0, 9.0)));
    }

    #[test]
    fn distance_limits_follow_inspectable_marker() {
        let mut rig = rig();
        let scene = pond_scene();
        let mut controls = RecordingControls::at(Vec3::ONE);

        let _ = rig.update(&routed("lily"), &scene, &mut controls);
        assert_eq!(controls.limits, (1.0, 20.0));
        assert_eq!(controls.action, PrimaryAction::Rotate);

        let _ = rig.update(&routed("frog"), &scene, &mut controls);
        assert_eq!(controls.limits, (5.0, 20.0));
    }

    #[test]
    fn object_distance_widens_on_narrow_viewports() {
        let mut rig = rig();
        let scene = pond_scene();
        let mut controls = RecordingControls::at(Vec3::ONE);
        let frog = Vec3::new(-4.0, 0.5, 3.0);

        let wide = rig.update(&routed("frog"), &scene, &mut controls).unwrap();
        assert!(approx(wide.eye - frog, Vec3::new(0.0, 2.0, 6.0)));

        let portrait = RigInput {
            aspect: 0.5,
            ..routed("frog")
        };
        let narrow = rig.update(&portrait, &scene, &mut controls).unwrap();
        assert!(approx(narrow.eye - frog, Vec3::new(0.0, 2.0, 6.0 / 0.9)));
    }

    #[test]
    fn effective_aspect_clamps_portrait_only() {
        assert_eq!(effective_aspect(0.4, 0.9), 0.9);
        assert_eq!(effective_aspect(1.0, 0.9), 1.0);
        assert_eq!(effective_aspect(2.0, 0.9), 2.0);
    }

    #[test]
    fn mobile_profile_raises_overview() {
        let mut rig = rig();
        let mut controls = RecordingControls::at(Vec3::ONE);
        let input = RigInput {
            profile: DeviceProfile::Mobile,
            ..RigInput::default()
        };
        let pose = rig.update(&input, &pond_scene(), &mut controls).unwrap();
        // mobile height 14 + undocked tilt 1.5
        assert!(approx(pose.eye, Vec3::new(2.0, 15.5, 9.0)));
    }

    #[test]
    fn unchanged_inputs_issue_nothing() {
        let mut rig = rig();
        let scene = pond_scene();
        let mut controls = RecordingControls::at(Vec3::ONE);
        assert!(rig.update(&routed("frog"), &scene, &mut controls).is_some());
        for _ in 0..10 {
            let pose = rig.update(&routed("frog"), &scene, &mut controls);
            assert!(pose.is_none());
        }
        assert_eq!(controls.commands.len(), 1);
        assert!(controls.commands[0].2, "commands are always animated");

        rig.invalidate();
        assert!(rig.update(&routed("frog"), &scene, &mut controls).is_some());
    }

    #[test]
    fn world_position_reads_reuse_scratch() {
        let mut rig = rig();
        let scene = pond_scene();
        let mut controls = RecordingControls::at(Vec3::ONE);
        for i in 0..50 {
            let id = if i % 2 == 0 { "frog" } else { "lily" };
            let _ = rig.update(&routed(id), &scene, &mut controls);
        }
        assert_eq!(rig.scratch_pool().created_count(), 0);
        assert_eq!(rig.scratch_pool().outstanding(), 0);
    }

    #[test]
    fn reset_forgets_saved_eye() {
        let mut rig = rig();
        let scene = pond_scene();
        let mut controls = RecordingControls::at(Vec3::ONE);
        let _ = rig.update(&routed("frog"), &scene, &mut controls);
        rig.reset();
        assert_eq!(rig.saved_eye(), Vec3::ZERO);
        assert_eq!(rig.state(), RigState::Unfocused);
        assert!(rig.update(&routed("frog"), &scene, &mut controls).is_some());
    }

    #[test]
    fn smooth_camera_settles_on_issued_pose() {
        let mut rig = CameraRig::from_options(&Options::default());
        let mut camera = SmoothCamera::new(&CameraOptions::default(), 1.5);
        let pose = rig
            .update(&routed("lily"), &pond_scene(), &mut camera)
            .unwrap();
        for _ in 0..600 {
            let _ = camera.update(1.0 / 60.0);
        }
        assert!(camera.camera.eye.distance(pose.eye) < 1.0e-3);
        assert!(camera.camera.target.distance(pose.target) < 1.0e-3);
        assert_eq!(camera.distance_limits(), (1.0, 20.0));
    }
}
