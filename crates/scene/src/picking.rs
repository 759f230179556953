use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::registry::{ConsiderationRegistry, ENTRY_RADIUS};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    /// Registry index of the hit entry.
    pub index: usize,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub radius: f64,
    pub max_distance: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            radius: ENTRY_RADIUS,
            max_distance: 1.0e30,
        }
    }
}

/// Deterministic ray picking against consideration bounding spheres.
///
/// Ordering contract:
/// - The closest hit along the (normalized) ray wins.
/// - If multiple entries are hit at the same distance, the lower registry index wins.
///
/// Rays starting inside a sphere hit it at the exit point.
pub fn pick_ray(registry: &ConsiderationRegistry, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalize()?;

    let mut best: Option<(f64, usize)> = None;
    for (index, entry) in registry.iter().enumerate() {
        let Some(t) = ray_sphere(ray.origin, dir, entry.position, opts.radius) else {
            continue;
        };
        if t > opts.max_distance {
            continue;
        }

        best = match best {
            None => Some((t, index)),
            Some((bt, bi)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| index.cmp(&bi));
                if ord.is_lt() {
                    Some((t, index))
                } else {
                    Some((bt, bi))
                }
            }
        };
    }

    let (t, index) = best?;
    Some(PickHit {
        index,
        distance: t,
        point: Ray::new(ray.origin, dir).at(t),
    })
}

/// Nearest non-negative hit distance of a unit-direction ray against a sphere.
#[inline]
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f64) -> Option<f64> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc.is_nan() || disc < 0.0 {
        return None;
    }
    let s = disc.sqrt();
    let near = -b - s;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + s;
    (far >= 0.0).then_some(far)
}
