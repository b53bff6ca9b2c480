use std::sync::Arc;

use glam::{DQuat, DVec3};

use super::state::State;

/// Wraps an angle into the representative range (-pi, pi].
pub(crate) fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    if wrapped > std::f64::consts::PI {
        wrapped - std::f64::consts::TAU
    } else {
        wrapped
    }
}

/// A smooth configuration space where local motion is defined by a tangent
/// space. Points live on the space; velocities, accelerations, and
/// displacements live in the tangent space `R^d`.
///
/// The set of kinds is closed: Euclidean bundles, the 1-D and 3-D rotation
/// groups, and ordered Cartesian products of those. Spaces are immutable
/// after construction and shared by `Arc` among every state and trajectory
/// derived from them.
#[derive(Debug, Clone)]
pub enum StateSpace {
    /// Flat `R^d`. The exponential map is vector addition.
    Euclidean { dimension: usize },

    /// The rotation group SO(2), stored as a wrapped angle. Periodic: the
    /// logarithm map always reports the shortest signed arc in (-pi, pi].
    Rotation1D,

    /// The rotation group SO(3), stored as a unit quaternion.
    /// `exp` composes `base * exp(v)`, `log` is `log(base^{-1} * to)`.
    Rotation3D,

    /// An ordered composition of subspaces. The tangent space is the
    /// concatenation of the child tangent spaces, so
    /// `dimension = sum(child.dimension)`.
    Product(Vec<Arc<StateSpace>>),
}

impl StateSpace {
    pub fn euclidean(dimension: usize) -> Arc<Self> {
        Arc::new(Self::Euclidean { dimension })
    }

    pub fn rotation_1d() -> Arc<Self> {
        Arc::new(Self::Rotation1D)
    }

    pub fn rotation_3d() -> Arc<Self> {
        Arc::new(Self::Rotation3D)
    }

    pub fn product(subspaces: Vec<Arc<StateSpace>>) -> Arc<Self> {
        Arc::new(Self::Product(subspaces))
    }

    /// The planar pose space SE(2): one rotation axis and two translation
    /// axes, as a product.
    pub fn se2() -> Arc<Self> {
        Self::product(vec![Self::rotation_1d(), Self::euclidean(2)])
    }

    /// Size of the tangent space.
    pub fn dimension(&self) -> usize {
        match self {
            Self::Euclidean { dimension } => *dimension,
            Self::Rotation1D => 1,
            Self::Rotation3D => 3,
            Self::Product(subspaces) => subspaces.iter().map(|s| s.dimension()).sum(),
        }
    }

    /// The identity element: the origin of `R^d`, the zero angle, the
    /// identity rotation, or the product of child identities.
    pub fn identity(&self) -> State {
        match self {
            Self::Euclidean { dimension } => State::Euclidean(vec![0.0; *dimension]),
            Self::Rotation1D => State::Rotation1D(0.0),
            Self::Rotation3D => State::Rotation3D(DQuat::IDENTITY),
            Self::Product(subspaces) => {
                State::Product(subspaces.iter().map(|s| s.identity()).collect())
            }
        }
    }

    /// Creates a fresh state at the identity, ready to be mutated.
    pub fn create_state(&self) -> State {
        self.identity()
    }

    /// Moves `base` along the tangent vector `tangent` expressed in the
    /// local frame at `base`.
    ///
    /// For Euclidean axes this is `base + tangent`; for rotations it is
    /// composition with `exp(tangent)`; for products it applies block-wise
    /// to each child's tangent slice.
    ///
    /// # Panics
    ///
    /// Panics if `base` was not created by a space of the same shape.
    /// `tangent.len()` must equal `self.dimension()`.
    pub fn exp_map(&self, tangent: &[f64], base: &State) -> State {
        debug_assert_eq!(
            tangent.len(),
            self.dimension(),
            "tangent length must match the space dimension"
        );
        match (self, base) {
            (Self::Euclidean { .. }, State::Euclidean(coords)) => {
                State::Euclidean(coords.iter().zip(tangent).map(|(c, v)| c + v).collect())
            }
            (Self::Rotation1D, State::Rotation1D(angle)) => {
                State::Rotation1D(wrap_angle(angle + tangent[0]))
            }
            (Self::Rotation3D, State::Rotation3D(rotation)) => {
                let axis = DVec3::new(tangent[0], tangent[1], tangent[2]);
                State::Rotation3D((*rotation * DQuat::from_scaled_axis(axis)).normalize())
            }
            (Self::Product(subspaces), State::Product(substates)) => {
                let mut offset = 0;
                let mut moved = Vec::with_capacity(subspaces.len());
                for (subspace, substate) in subspaces.iter().zip(substates) {
                    let d = subspace.dimension();
                    moved.push(subspace.exp_map(&tangent[offset..offset + d], substate));
                    offset += d;
                }
                State::Product(moved)
            }
            _ => panic!("state does not belong to this space"),
        }
    }

    /// Finds the tangent vector `v` such that `exp_map(v, from) == to`.
    ///
    /// For `Rotation1D` this picks the representative in (-pi, pi], so the
    /// reported displacement is always the shortest arc.
    ///
    /// # Panics
    ///
    /// Panics if either state was not created by a space of the same shape.
    pub fn log_map(&self, from: &State, to: &State) -> Vec<f64> {
        let mut tangent = vec![0.0; self.dimension()];
        self.log_map_into(from, to, &mut tangent);
        tangent
    }

    fn log_map_into(&self, from: &State, to: &State, out: &mut [f64]) {
        match (self, from, to) {
            (Self::Euclidean { .. }, State::Euclidean(a), State::Euclidean(b)) => {
                for (o, (a, b)) in out.iter_mut().zip(a.iter().zip(b)) {
                    *o = b - a;
                }
            }
            (Self::Rotation1D, State::Rotation1D(a), State::Rotation1D(b)) => {
                out[0] = wrap_angle(b - a);
            }
            (Self::Rotation3D, State::Rotation3D(a), State::Rotation3D(b)) => {
                let axis = (a.inverse() * *b).to_scaled_axis();
                out[0] = axis.x;
                out[1] = axis.y;
                out[2] = axis.z;
            }
            (Self::Product(subspaces), State::Product(a), State::Product(b)) => {
                let mut offset = 0;
                for (subspace, (a, b)) in subspaces.iter().zip(a.iter().zip(b)) {
                    let d = subspace.dimension();
                    subspace.log_map_into(a, b, &mut out[offset..offset + d]);
                    offset += d;
                }
            }
            _ => panic!("states do not belong to this space"),
        }
    }

    /// Whether every leaf of this space has a tangent space whose axes can
    /// be treated as independent 1-D coordinates. True only for Euclidean
    /// and `Rotation1D` leaves (and products of them); the parabolic
    /// retimer requires this.
    pub fn is_axis_separable(&self) -> bool {
        match self {
            Self::Euclidean { .. } | Self::Rotation1D => true,
            Self::Rotation3D => false,
            Self::Product(subspaces) => subspaces.iter().all(|s| s.is_axis_separable()),
        }
    }

    /// Number of direct subspaces. Zero for every leaf kind.
    pub fn num_subspaces(&self) -> usize {
        match self {
            Self::Product(subspaces) => subspaces.len(),
            _ => 0,
        }
    }

    /// Indexed access to a product's child space.
    ///
    /// # Panics
    ///
    /// Panics if this space is not a product or `index` is out of range.
    pub fn subspace(&self, index: usize) -> &Arc<StateSpace> {
        match self {
            Self::Product(subspaces) => &subspaces[index],
            _ => panic!("subspace() called on a leaf state space"),
        }
    }
}
