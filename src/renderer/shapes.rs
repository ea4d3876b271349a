//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

/// Rotate and translate local-space points
pub fn transform(points: &[Vec2], origin: Vec2, rotation: f32) -> Vec<Vec2> {
    let rot = Vec2::from_angle(rotation);
    points.iter().map(|&p| origin + rot.rotate(p)).collect()
}

/// Irregular 8-point asteroid outline around the origin
pub fn asteroid_outline(radius: f32) -> Vec<Vec2> {
    const POINTS: usize = 8;
    (0..POINTS)
        .map(|i| {
            let angle = i as f32 / POINTS as f32 * TAU;
            let distance = radius * (0.8 + (i as f32 * 5.0).sin() * 0.2);
            Vec2::new(angle.cos(), angle.sin()) * distance
        })
        .collect()
}

/// Fixed crater offsets for an asteroid, derived from its id so frames are stable
pub fn crater_offsets(id: u32, radius: f32) -> [Vec2; 3] {
    let mut out = [Vec2::ZERO; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let h = hash(id.wrapping_mul(3).wrapping_add(i as u32));
        let fx = (h & 0xFFFF) as f32 / 65535.0 - 0.5;
        let fy = (h >> 16) as f32 / 65535.0 - 0.5;
        *slot = Vec2::new(fx, fy) * radius;
    }
    out
}

fn hash(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/// Upward-pointing ship triangle centered on the origin
pub fn ship_body(width: f32, height: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, -height / 2.0),
        Vec2::new(width / 2.0, height / 2.0),
        Vec2::new(-width / 2.0, height / 2.0),
    ]
}

/// Engine flame below a ship of the given size
pub fn flame(width: f32, height: f32, length: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(-width / 2.0, height / 2.0),
        Vec2::new(0.0, height / 2.0 + length),
        Vec2::new(width / 2.0, height / 2.0),
    ]
}

/// Heart, sampled as a polygon around `center`
pub fn heart(center: Vec2, size: f32) -> Vec<Vec2> {
    const STEPS: usize = 24;
    let scale = size / 32.0;
    (0..STEPS)
        .map(|i| {
            let t = i as f32 / STEPS as f32 * TAU;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            center + Vec2::new(x, -y) * scale
        })
        .collect()
}

/// Lightning bolt around `center`, `size` is the half height
pub fn lightning(center: Vec2, size: f32) -> Vec<Vec2> {
    let s = size;
    [
        (-s / 3.0, -s),
        (s / 3.0, -s / 3.0),
        (0.0, 0.0),
        (s / 3.0, 0.0),
        (-s / 3.0, s),
        (0.0, s / 3.0),
        (-s / 3.0, s / 3.0),
    ]
    .iter()
    .map(|&(x, y)| center + Vec2::new(x, y))
    .collect()
}

/// Side-view plane facing right, anchored at the top-left of its box
pub fn plane_body(x: f32, y: f32, w: f32, h: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(x + w, y + h / 2.0),
        Vec2::new(x, y + h),
        Vec2::new(x, y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asteroid_outline_stays_within_radius() {
        let outline = asteroid_outline(20.0);
        assert_eq!(outline.len(), 8);
        for p in outline {
            assert!(p.length() <= 20.0 + 0.001);
            assert!(p.length() >= 20.0 * 0.6 - 0.001);
        }
    }

    #[test]
    fn test_crater_offsets_are_stable() {
        assert_eq!(crater_offsets(7, 10.0), crater_offsets(7, 10.0));
        for c in crater_offsets(7, 10.0) {
            assert!(c.x.abs() <= 5.0 && c.y.abs() <= 5.0);
        }
    }

    #[test]
    fn test_transform_rotates_about_origin() {
        let pts = transform(&[Vec2::new(1.0, 0.0)], Vec2::new(10.0, 10.0), std::f32::consts::FRAC_PI_2);
        assert!((pts[0] - Vec2::new(10.0, 11.0)).length() < 1e-5);
    }
}
