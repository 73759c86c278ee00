//! Riding moving platforms.

use crate::body::{Platform, PlatformId, RigidBody};
use crate::error::MovementError;

use super::controller::MovementController;

impl MovementController {
    /// Parent the character to a platform. Velocity is not touched.
    pub fn connect_with_platform(&self, body: &mut dyn RigidBody, platform: PlatformId) {
        log::debug!("attached to platform {platform}");
        body.set_parent(Some(platform));
    }

    /// Unparent the character and add the platform's velocity to its own, so
    /// it keeps the momentum it had while riding.
    ///
    /// Fails without touching the body if the platform has no rigid body.
    pub fn disconnect_with_platform(
        &self,
        body: &mut dyn RigidBody,
        platform: &dyn Platform,
    ) -> Result<(), MovementError> {
        let platform_velocity = platform
            .body_velocity()
            .ok_or(MovementError::PlatformWithoutBody(platform.id()))?;

        body.set_parent(None);
        body.set_velocity(body.velocity() + platform_velocity);

        log::debug!(
            "detached from platform {} inheriting {:?}",
            platform.id(),
            platform_velocity
        );
        Ok(())
    }
}
