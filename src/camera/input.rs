use glam::Vec2;

use crate::camera::controller::{PrimaryAction, SmoothCamera};

/// Pointer and touch gestures relevant to the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button (or first finger) pressed.
    PrimaryDown {
        /// Cursor position in pixels.
        position: Vec2,
    },
    /// Secondary button (or two-finger drag) pressed.
    SecondaryDown {
        /// Cursor position in pixels.
        position: Vec2,
    },
    /// Cursor moved.
    Moved {
        /// Cursor position in pixels.
        position: Vec2,
    },
    /// All buttons released.
    Released,
    /// Scroll wheel, positive toward the target.
    Wheel {
        /// Notches scrolled.
        delta: f32,
    },
    /// Pinch gesture, positive when the fingers spread.
    Pinch {
        /// Change in finger separation, normalized to the viewport.
        delta: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Primary,
    Secondary,
}

/// Maps pointer gestures onto a [`SmoothCamera`].
pub struct InputHandler {
    last_pointer_pos: Vec2,
    drag: Option<Drag>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a handler with no active drag.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_pointer_pos: Vec2::ZERO,
            drag: None,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Returns true if the event was consumed by the camera.
    pub fn handle_event(
        &mut self,
        controller: &mut SmoothCamera,
        event: &PointerEvent,
    ) -> bool {
        match *event {
            PointerEvent::PrimaryDown { position } => {
                if controller.primary_action() == PrimaryAction::None {
                    return false;
                }
                self.begin(controller, Drag::Primary, position);
                true
            }
            PointerEvent::SecondaryDown { position } => {
                self.begin(controller, Drag::Secondary, position);
                true
            }
            PointerEvent::Moved { position } => {
                let delta = position - self.last_pointer_pos;
                self.last_pointer_pos = position;
                match self.drag {
                    Some(Drag::Primary) => match controller.primary_action() {
                        PrimaryAction::Rotate => controller.rotate(delta),
                        PrimaryAction::Truck => controller.pan(delta),
                        PrimaryAction::None => return false,
                    },
                    Some(Drag::Secondary) => controller.pan(delta),
                    None => return false,
                }
                true
            }
            PointerEvent::Released => {
                let was_dragging = self.drag.take().is_some();
                controller.set_dragging(false);
                was_dragging
            }
            PointerEvent::Wheel { delta } | PointerEvent::Pinch { delta } => {
                controller.dolly(delta);
                true
            }
        }
    }

    fn begin(
        &mut self,
        controller: &mut SmoothCamera,
        drag: Drag,
        position: Vec2,
    ) {
        self.drag = Some(drag);
        self.last_pointer_pos = position;
        controller.set_dragging(true);
    }
}
