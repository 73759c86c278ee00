//! Rigid body capability used by the movement controller.
//!
//! The controller never owns the character's body. It borrows it through
//! [`RigidBody`] for the duration of a single Start or Tick call, which keeps
//! the core independent of any particular physics engine.

use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Identifier of a platform a character can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutable view of a simulated rigid body.
///
/// Orientation follows the crate convention: `rotation * Vec3::Z` is the
/// body's forward axis and `rotation * Vec3::X` its right axis.
pub trait RigidBody {
    fn position(&self) -> Vec3;

    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);

    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, angular_velocity: Vec3);

    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    /// Whether the physics step applies gravity to this body.
    fn gravity_enabled(&self) -> bool;
    fn set_gravity_enabled(&mut self, enabled: bool);

    /// Platform the body is currently parented to, if any.
    fn parent(&self) -> Option<PlatformId>;
    fn set_parent(&mut self, parent: Option<PlatformId>);

    /// Forward axis in world space.
    #[inline]
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }

    /// Right axis in world space.
    #[inline]
    fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

/// Something a character can stand on and ride.
pub trait Platform {
    fn id(&self) -> PlatformId;

    /// Linear velocity of the platform's rigid body, or `None` when the
    /// platform is static geometry without a body.
    fn body_velocity(&self) -> Option<Vec3>;
}

/// Plain platform description, handy when the engine side only needs to hand
/// over an id and a velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub id: PlatformId,
    pub velocity: Option<Vec3>,
}

impl MovingPlatform {
    pub fn new(id: PlatformId, velocity: Vec3) -> Self {
        Self {
            id,
            velocity: Some(velocity),
        }
    }

    /// A platform without a rigid body.
    pub fn fixed(id: PlatformId) -> Self {
        Self { id, velocity: None }
    }
}

impl Platform for MovingPlatform {
    fn id(&self) -> PlatformId {
        self.id
    }

    fn body_velocity(&self) -> Option<Vec3> {
        self.velocity
    }
}

/// Engine-free rigid body.
///
/// Stores exactly the state the controller reads and writes, and can advance
/// itself with [`KinematicBody::integrate`]. Collisions are not resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub gravity_enabled: bool,
    pub parent: Option<PlatformId>,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            gravity_enabled: true,
            parent: None,
        }
    }
}

impl KinematicBody {
    /// Create a body at rest at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Advance the body by one physics step.
    ///
    /// Gravity (meters/second², positive pulls down) is only applied while
    /// the gravity flag is set.
    pub fn integrate(&mut self, delta_time: f32, gravity: f32) {
        if self.gravity_enabled {
            self.velocity.y -= gravity * delta_time;
        }

        self.position += self.velocity * delta_time;

        let spin = self.angular_velocity * delta_time;
        if spin.length_squared() > 0.0 {
            self.rotation = (Quat::from_scaled_axis(spin) * self.rotation).normalize();
        }
    }

    /// Current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

impl RigidBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular_velocity = angular_velocity;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    fn parent(&self) -> Option<PlatformId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<PlatformId>) {
        self.parent = parent;
    }
}
