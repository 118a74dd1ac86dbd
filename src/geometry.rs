//! Small vector helpers used by hydrogen placement.
//!
//! Everything here is total: degenerate inputs produce a defined result
//! instead of NaNs or panics, except [`Vector3::normalize`] on a zero vector,
//! which callers guard with [`is_degenerate`].

use nalgebra::{Rotation3, Unit, Vector3};

/// Squared length below which a displacement counts as coincident atoms.
pub const DEGENERATE_LEN_SQ: f64 = 1e-4;

const COMPONENT_EPS: f64 = 1e-12;

pub fn is_degenerate(v: &Vector3<f64>) -> bool {
    v.norm_squared() < DEGENERATE_LEN_SQ
}

/// A unit vector perpendicular to `v`.
///
/// The choice is deterministic: the first two non-zero components are swapped
/// and one is negated. A zero vector yields the x axis.
pub fn perpendicular(v: &Vector3<f64>) -> Vector3<f64> {
    let nz = |c: f64| c.abs() > COMPONENT_EPS;
    let res = if nz(v.x) {
        if nz(v.y) {
            Vector3::new(v.y, -v.x, 0.0)
        } else if nz(v.z) {
            Vector3::new(v.z, 0.0, -v.x)
        } else {
            Vector3::y()
        }
    } else if nz(v.y) {
        if nz(v.z) {
            Vector3::new(0.0, v.z, -v.y)
        } else {
            Vector3::x()
        }
    } else {
        Vector3::x()
    };
    res.normalize()
}

/// Rotates `v` by `angle_deg` degrees about `axis`, right-handed.
pub fn rotate_about(v: &Vector3<f64>, axis: &Unit<Vector3<f64>>, angle_deg: f64) -> Vector3<f64> {
    Rotation3::from_axis_angle(axis, angle_deg.to_radians()).transform_vector(v)
}

/// Oriented volume spanned by three vectors.
pub fn triple_product(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    a.dot(&b.cross(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn degenerate_threshold() {
        assert!(is_degenerate(&Vector3::new(0.005, 0.0, 0.0)));
        assert!(!is_degenerate(&Vector3::new(0.02, 0.0, 0.0)));
    }

    #[test]
    fn perpendicular_is_orthogonal_unit() {
        for v in [
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 0.0, 2.0),
            Vector3::new(-1.0, 0.0, 4.0),
            Vector3::new(0.0, 3.0, -1.0),
            Vector3::new(5.0, 0.0, 0.0),
        ] {
            let p = perpendicular(&v);
            assert!(p.dot(&v).abs() < EPS, "{v:?} -> {p:?}");
            assert!((p.norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn perpendicular_of_zero_is_x() {
        assert_eq!(perpendicular(&Vector3::zeros()), Vector3::x());
    }

    #[test]
    fn quarter_turn_about_z() {
        let r = rotate_about(&Vector3::x(), &Vector3::z_axis(), 90.0);
        assert!((r - Vector3::y()).norm() < EPS);
    }

    #[test]
    fn triple_product_sign() {
        assert!((triple_product(&Vector3::x(), &Vector3::y(), &Vector3::z()) - 1.0).abs() < EPS);
        assert!((triple_product(&Vector3::y(), &Vector3::x(), &Vector3::z()) + 1.0).abs() < EPS);
    }
}
