//! Follow camera
//!
//! Sits behind and above the player looking down at the ship. The engine
//! only uses it to turn a click on the screen into a firing direction.

use glam::{Mat4, Vec3};

/// Camera offset from the player
const EYE_OFFSET: Vec3 = Vec3::new(0.0, 200.0, 400.0);
const FOV_Y_DEGREES: f32 = 60.0;
const Z_NEAR: f32 = 1.0;
const Z_FAR: f32 = 4000.0;

/// Perspective camera tracking the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Viewport size in pixels
    pub width: f32,
    pub height: f32,
}

impl Camera {
    /// Frame the player at `player_pos` on a `width` x `height` screen
    pub fn follow(player_pos: Vec3, width: f32, height: f32) -> Self {
        let target = Vec3::new(player_pos.x, 0.0, player_pos.z);
        Self {
            eye: target + EYE_OFFSET,
            target,
            width,
            height,
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        let aspect = self.width / self.height.max(1.0);
        Mat4::perspective_rh_gl(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
    }

    /// World-space direction of the ray under screen pixel `(x, y)`.
    ///
    /// `y` grows downward as in window coordinates. Returns `None` for a
    /// degenerate viewport.
    pub fn screen_ray(&self, x: f32, y: f32) -> Option<Vec3> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let ndc_x = 2.0 * x / self.width - 1.0;
        let ndc_y = 1.0 - 2.0 * y / self.height;

        let inverse = (self.projection() * self.view()).inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        (far - near).try_normalize()
    }
}
