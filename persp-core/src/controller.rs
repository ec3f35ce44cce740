/// Keyboard-driven camera controls for the projection scene
use log::debug;
use serde::Deserialize;

use crate::geometry::Vector3;
use crate::input::{HeldKeys, Key};
use crate::projection::Observer;
use crate::scene::Controller;
use crate::transform::Orientation;

/// Movement rates applied per frame
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// World units moved per frame while a pan key is held
    pub pan_speed: f32,
    /// Radians turned per frame while a rotation key is held
    pub rotate_speed: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            pan_speed: 5.0,
            rotate_speed: 0.03,
        }
    }
}

/// Owns the observer and moves it relative to its own facing
#[derive(Debug, Clone)]
pub struct ProjectionController {
    observer: Observer,
    settings: ControllerSettings,
}

impl ProjectionController {
    pub fn new(observer: Observer, settings: ControllerSettings) -> Self {
        Self { observer, settings }
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// World-relative pan vector for the held keys
    pub fn movement(&self, keys: &HeldKeys) -> Vector3 {
        let speed = self.settings.pan_speed;
        let mut movement = Vector3::zeros();

        if keys.is_held(Key::PanLeft) {
            movement.x -= speed;
        }
        if keys.is_held(Key::PanRight) {
            movement.x += speed;
        }
        if keys.is_held(Key::PanUp) {
            movement.y += speed;
        }
        if keys.is_held(Key::PanDown) {
            movement.y -= speed;
        }
        if keys.is_held(Key::PanBackward) {
            movement.z -= speed;
        }
        if keys.is_held(Key::PanForward) {
            movement.z += speed;
        }

        movement
    }

    /// Unnormalized rotation axis for the held keys
    pub fn rotation_axis(&self, keys: &HeldKeys) -> Vector3 {
        let mut axis = Vector3::zeros();

        if keys.is_held(Key::YawLeft) {
            axis.y += 1.0;
        }
        if keys.is_held(Key::YawRight) {
            axis.y -= 1.0;
        }
        if keys.is_held(Key::PitchUp) {
            axis.x += 1.0;
        }
        if keys.is_held(Key::PitchDown) {
            axis.x -= 1.0;
        }
        if keys.is_held(Key::RollLeft) {
            axis.z -= 1.0;
        }
        if keys.is_held(Key::RollRight) {
            axis.z += 1.0;
        }

        axis
    }
}

impl Controller for ProjectionController {
    fn update(&mut self, keys: &HeldKeys) {
        // Undo the current facing so input acts along the camera's own axes
        let inverse = self.observer.orientation.negate();

        let movement = inverse.rotate(&self.movement(keys));
        self.observer.origin += movement;

        let axis = inverse.rotate(&self.rotation_axis(keys));
        let rotation = Orientation::new(axis, self.settings.rotate_speed);
        self.observer.orientation.compose(&rotation);

        if !keys.is_empty() {
            debug!(
                "observer at ({:.1}, {:.1}, {:.1})",
                self.observer.origin.x, self.observer.origin.y, self.observer.origin.z
            );
        }
    }

    fn observer(&self) -> &Observer {
        &self.observer
    }
}
