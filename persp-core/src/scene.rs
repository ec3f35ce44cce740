/// Scene and controller capabilities, and the frame driver tying them together
use crate::input::HeldKeys;
use crate::panel::Panel;
use crate::projection::{Observer, Projection};

/// Something that can be drawn from an observer's point of view
pub trait Scene {
    fn render(&self, observer: &Observer) -> Panel;
}

/// Sole owner of the observer, advanced once per frame from input
pub trait Controller {
    fn update(&mut self, keys: &HeldKeys);
    fn observer(&self) -> &Observer;
}

impl Scene for Projection {
    fn render(&self, observer: &Observer) -> Panel {
        Projection::render(self, observer)
    }
}

/// Pairs a scene with the controller that looks at it
pub struct Viewer<S, C> {
    scene: S,
    controller: C,
}

impl<S: Scene, C: Controller> Viewer<S, C> {
    pub fn new(scene: S, controller: C) -> Self {
        Self { scene, controller }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn observer(&self) -> &Observer {
        self.controller.observer()
    }

    /// Apply this frame's input, then draw the scene from the updated observer
    pub fn frame(&mut self, keys: &HeldKeys) -> Panel {
        self.controller.update(keys);
        self.scene.render(self.controller.observer())
    }
}
