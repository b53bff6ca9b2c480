use glam::DQuat;

use super::space::wrap_angle;

/// A point on a [`StateSpace`](super::StateSpace), owned as a plain value.
///
/// The payload mirrors the kind of the space that created it: Euclidean
/// coordinates, a wrapped angle, a unit quaternion, or an ordered list of
/// substates for a product. States are mutable until handed off by value;
/// product substates are reached through scoped borrows that write through
/// to the parent's storage.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Euclidean(Vec<f64>),
    Rotation1D(f64),
    Rotation3D(DQuat),
    Product(Vec<State>),
}

impl State {
    /// Euclidean coordinates.
    ///
    /// # Panics
    ///
    /// Panics if this is not a Euclidean state.
    pub fn value(&self) -> &[f64] {
        match self {
            Self::Euclidean(coords) => coords,
            _ => panic!("value() called on a non-Euclidean state"),
        }
    }

    /// Overwrites the Euclidean coordinates.
    ///
    /// # Panics
    ///
    /// Panics if this is not a Euclidean state or the lengths differ.
    pub fn set_value(&mut self, value: &[f64]) {
        match self {
            Self::Euclidean(coords) => {
                assert_eq!(coords.len(), value.len(), "coordinate count mismatch");
                coords.copy_from_slice(value);
            }
            _ => panic!("set_value() called on a non-Euclidean state"),
        }
    }

    /// The wrapped angle in (-pi, pi].
    ///
    /// # Panics
    ///
    /// Panics if this is not a `Rotation1D` state.
    pub fn angle(&self) -> f64 {
        match self {
            Self::Rotation1D(angle) => *angle,
            _ => panic!("angle() called on a non-rotation state"),
        }
    }

    /// Sets the angle, re-wrapping into (-pi, pi].
    ///
    /// # Panics
    ///
    /// Panics if this is not a `Rotation1D` state.
    pub fn set_angle(&mut self, angle: f64) {
        match self {
            Self::Rotation1D(stored) => *stored = wrap_angle(angle),
            _ => panic!("set_angle() called on a non-rotation state"),
        }
    }

    /// The unit quaternion of a 3-D rotation state.
    ///
    /// # Panics
    ///
    /// Panics if this is not a `Rotation3D` state.
    pub fn quaternion(&self) -> DQuat {
        match self {
            Self::Rotation3D(rotation) => *rotation,
            _ => panic!("quaternion() called on a non-rotation state"),
        }
    }

    /// Sets the rotation, renormalizing the quaternion.
    ///
    /// # Panics
    ///
    /// Panics if this is not a `Rotation3D` state.
    pub fn set_quaternion(&mut self, rotation: DQuat) {
        match self {
            Self::Rotation3D(stored) => *stored = rotation.normalize(),
            _ => panic!("set_quaternion() called on a non-rotation state"),
        }
    }

    /// Number of direct substates. Zero for every leaf kind.
    pub fn num_substates(&self) -> usize {
        match self {
            Self::Product(substates) => substates.len(),
            _ => 0,
        }
    }

    /// Scoped view of a product substate. The borrow is bounded by the
    /// parent's lifetime; the view never owns the substate.
    ///
    /// # Panics
    ///
    /// Panics if this is not a product state or `index` is out of range.
    pub fn substate(&self, index: usize) -> &State {
        match self {
            Self::Product(substates) => &substates[index],
            _ => panic!("substate() called on a leaf state"),
        }
    }

    /// Mutable scoped view of a product substate. Mutation writes through
    /// to this state's backing storage.
    ///
    /// # Panics
    ///
    /// Panics if this is not a product state or `index` is out of range.
    pub fn substate_mut(&mut self, index: usize) -> &mut State {
        match self {
            Self::Product(substates) => &mut substates[index],
            _ => panic!("substate_mut() called on a leaf state"),
        }
    }
}
