/// Orientation algebra backed by unit quaternions
use nalgebra::{Unit, UnitQuaternion};

use crate::geometry::Vector3;

/// A rotation in 3D space built from an axis and an angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    quaternion: UnitQuaternion<f32>,
}

impl Orientation {
    /// Rotation of `angle` radians around `axis`.
    ///
    /// The axis does not need to be normalized. A zero-length (or non-finite)
    /// axis gives the identity rotation.
    pub fn new(axis: Vector3, angle: f32) -> Self {
        if !axis.iter().all(|c| c.is_finite()) {
            return Self::identity();
        }

        match Unit::try_new(axis, f32::EPSILON) {
            Some(axis) => Self {
                quaternion: UnitQuaternion::from_axis_angle(&axis, angle),
            },
            None => Self::identity(),
        }
    }

    pub fn identity() -> Self {
        Self {
            quaternion: UnitQuaternion::identity(),
        }
    }

    /// Right-multiply by `other`, so `other` is applied to vectors before `self`
    pub fn compose(&mut self, other: &Orientation) {
        self.quaternion *= other.quaternion;
    }

    /// Rotate a vector, leaving the input untouched
    pub fn rotate(&self, vector: &Vector3) -> Vector3 {
        self.quaternion.transform_vector(vector)
    }

    /// The inverse rotation: same axis, negated angle
    pub fn negate(&self) -> Orientation {
        Self {
            quaternion: self.quaternion.inverse(),
        }
    }

    /// Rotation axis, or `None` for the identity
    pub fn axis(&self) -> Option<Vector3> {
        self.quaternion.axis().map(|axis| axis.into_inner())
    }

    /// Rotation angle in radians, in `[0, pi]`
    pub fn angle(&self) -> f32 {
        self.quaternion.angle()
    }

    pub fn quaternion(&self) -> &UnitQuaternion<f32> {
        &self.quaternion
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Neg for Orientation {
    type Output = Orientation;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}
