//! Perspective camera and pointer-to-ray mapping.

use foundation::math::{Vec2, Vec3};

use crate::picking::Ray;

/// Right-handed perspective camera looking from `eye` toward `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_deg: f64,
    pub aspect: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(10.0, 10.0, 20.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_deg: 75.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.aspect = width.max(1.0) / height.max(1.0);
    }

    /// World-space ray through a point in normalized device coordinates.
    ///
    /// `ndc` spans `[-1, 1]` on both axes with +y up. Returns `None` when
    /// the camera basis is degenerate (eye on target, or up parallel to the
    /// view direction).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let forward = (self.target - self.eye).normalize()?;
        let right = forward.cross(self.up).normalize()?;
        let up = right.cross(forward);

        let half_h = (self.fovy_deg.to_radians() * 0.5).tan();
        let half_w = half_h * self.aspect;
        let dir = forward + right * (ndc.x * half_w) + up * (ndc.y * half_h);
        Some(Ray::new(self.eye, dir.normalize()?))
    }
}

/// Maps window pixel coordinates to normalized device coordinates.
pub fn pointer_ndc(client_x: f64, client_y: f64, width: f64, height: f64) -> Vec2 {
    let w = width.max(1.0);
    let h = height.max(1.0);
    Vec2::new((client_x / w) * 2.0 - 1.0, -(client_y / h) * 2.0 + 1.0)
}
