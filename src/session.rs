//! Headless replay of a pond session.
//!
//! A [`Session`] owns everything one pond scene needs (scene table, rig,
//! smoothed camera, drifting decorations, vector pool) and steps them frame
//! by frame while a [`SessionScript`] feeds route/panel/marker/viewport
//! changes into the rig.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::SmoothCamera;
use crate::device::{DeviceProfile, DeviceSignals};
use crate::error::PondError;
use crate::options::Options;
use crate::physics::drift::Drift;
use crate::rig::{
    CameraPose, CameraRig, ObjectId, RigInput, RigState, RouteSignal,
    SceneTable,
};
use crate::util::VectorPool;

/// One scripted stretch of frames with fixed inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStep {
    /// Number of frames the inputs are held.
    pub frames: u32,
    /// Routed focus id; `None` means no focus route matched.
    pub route: Option<String>,
    /// Docked panel visibility.
    pub panel_docked: bool,
    /// Marker/overlay visibility.
    pub markers_visible: bool,
    /// Viewport width / height.
    pub aspect: f32,
}

impl Default for SessionStep {
    fn default() -> Self {
        Self {
            frames: 60,
            route: None,
            panel_docked: false,
            markers_visible: true,
            aspect: 16.0 / 9.0,
        }
    }
}

impl SessionStep {
    fn rig_input(&self, profile: DeviceProfile) -> RigInput {
        RigInput {
            route: self
                .route
                .as_deref()
                .map_or_else(RouteSignal::unmatched, RouteSignal::focus),
            panel_docked: self.panel_docked,
            markers_visible: self.markers_visible,
            profile,
            aspect: self.aspect,
        }
    }
}

/// Device facts plus the ordered steps of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionScript {
    /// Environment the session pretends to run in.
    pub device: DeviceSignals,
    /// Steps, replayed in order.
    #[serde(rename = "step")]
    pub steps: Vec<SessionStep>,
}

impl SessionScript {
    /// Load a script from a TOML file.
    pub fn load(path: &Path) -> Result<Self, PondError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a script from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, PondError> {
        let script: Self = toml::from_str(content)
            .map_err(|e| PondError::Script(e.to_string()))?;
        if let Some(step) = script.steps.iter().find(|s| s.aspect <= 0.0) {
            return Err(PondError::Script(format!(
                "aspect must be positive, got {}",
                step.aspect
            )));
        }
        Ok(script)
    }

    /// Built-in tour: overview, an inspectable lily, the inside view, a
    /// docked panel, a portrait viewport and back out.
    #[must_use]
    pub fn demo() -> Self {
        let step = |route: Option<&str>| SessionStep {
            route: route.map(str::to_owned),
            ..SessionStep::default()
        };
        Self {
            device: DeviceSignals {
                viewport_width: 1280.0,
                ..DeviceSignals::default()
            },
            steps: vec![
                step(None),
                step(Some("lily")),
                SessionStep {
                    markers_visible: false,
                    ..step(None)
                },
                SessionStep {
                    panel_docked: true,
                    ..step(Some("koi"))
                },
                SessionStep {
                    aspect: 0.6,
                    ..step(Some("stone"))
                },
                step(Some("heron")),
            ],
        }
    }
}

/// A pose the rig issued during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IssuedPose {
    /// Frame index the pose was issued on.
    pub frame: u32,
    /// Rig state after the retarget.
    pub state: RigState,
    /// The issued pose.
    pub pose: CameraPose,
}

/// Summary of a replayed session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Frames simulated.
    pub frames: u32,
    /// Every pose issued, in order.
    pub poses: Vec<IssuedPose>,
    /// Eye position after the last frame.
    pub final_eye: Vec3,
    /// Pool allocations beyond its seed.
    pub pool_created: usize,
}

/// Everything one pond scene needs, stepped together.
pub struct Session {
    scene: SceneTable,
    decorations: Vec<ObjectId>,
    rig: CameraRig,
    camera: SmoothCamera,
    drift: Drift,
    pool: VectorPool,
    profile: DeviceProfile,
}

impl Session {
    /// Build the demo scene for the given device.
    pub fn new(
        options: &Options,
        signals: &DeviceSignals,
        seed: u64,
    ) -> Result<Self, PondError> {
        let profile = DeviceProfile::resolve(signals, &options.device);
        log::info!("device profile: {profile:?}");

        let mut camera = SmoothCamera::new(&options.camera, 16.0 / 9.0);
        camera.apply_profile(&profile.params(&options.device));

        let mut scene = SceneTable::new();
        let mut drift = Drift::new(options.drift.clone(), seed)?;
        let pond = scene.insert(&options.rig.pond_name, Vec3::ZERO);
        let mut decorations = Vec::new();
        for (name, anchor, inspectable) in [
            ("lily", Vec3::new(1.2, 0.05, 0.4), true),
            ("koi", Vec3::new(-0.8, -0.2, 1.0), true),
            ("leaf", Vec3::new(0.3, 0.05, -1.4), false),
        ] {
            let id = scene.insert_child(pond, name, anchor);
            scene.set_inspectable(id, inspectable);
            drift.add(name, anchor);
            decorations.push(id);
        }
        let _ = scene.insert("stone", Vec3::new(6.0, 0.4, -3.0));
        let _ = scene.insert("bridge", Vec3::new(-7.0, 1.0, 2.0));

        Ok(Self {
            scene,
            decorations,
            rig: CameraRig::from_options(options),
            camera,
            drift,
            pool: options.pool.build(),
            profile,
        })
    }

    /// Scene table of the session.
    #[must_use]
    pub fn scene(&self) -> &SceneTable {
        &self.scene
    }

    /// Camera being driven.
    #[must_use]
    pub fn camera(&self) -> &SmoothCamera {
        &self.camera
    }

    /// Resolved device profile.
    #[must_use]
    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    /// Advance one frame with the given inputs.
    ///
    /// A non-positive or non-finite `dt` is rejected before anything moves.
    pub fn step(
        &mut self,
        input: &RigInput,
        dt: f32,
    ) -> Result<Option<CameraPose>, PondError> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err(PondError::invalid("dt", dt));
        }
        if input.aspect != self.camera.camera.aspect {
            self.camera.set_aspect(input.aspect);
        }
        let pose = self.rig.update(input, &self.scene, &mut self.camera);
        let _ = self.camera.update(dt);
        self.drift.step(dt, &mut self.pool)?;
        for (id, body) in self.decorations.iter().zip(self.drift.bodies()) {
            self.scene.set_local_position(*id, body.position);
        }
        Ok(pose)
    }

    /// Replay every step of `script` at a fixed timestep.
    pub fn run(
        &mut self,
        script: &SessionScript,
        dt: f32,
    ) -> Result<SessionReport, PondError> {
        if dt <= 0.0 || !dt.is_finite() {
            return Err(PondError::invalid("dt", dt));
        }
        let mut frame = 0;
        let mut poses = Vec::new();
        for step in &script.steps {
            let input = step.rig_input(self.profile);
            for _ in 0..step.frames {
                if let Some(pose) = self.step(&input, dt)? {
                    poses.push(IssuedPose {
                        frame,
                        state: self.rig.state(),
                        pose,
                    });
                }
                frame += 1;
            }
        }
        Ok(SessionReport {
            frames: frame,
            poses,
            final_eye: self.camera.camera.eye,
            pool_created: self.pool.created_count(),
        })
    }
}
