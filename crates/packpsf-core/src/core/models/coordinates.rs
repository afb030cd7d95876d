use nalgebra::Point3;
use std::fmt;

/// Cartesian position of an atom, in the units of the source coordinate file (Angstroms).
///
/// Equality is exact and component-wise; no tolerance is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates(Point3<f64>);

impl Coordinates {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    pub fn origin() -> Self {
        Self(Point3::origin())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// Euclidean length of the position vector.
    pub fn norm(&self) -> f64 {
        self.0.coords.norm()
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Coordinates) -> f64 {
        (self.0 - other.0).norm()
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::origin()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.0.x, self.0.y, self.0.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact_per_component() {
        let a = Coordinates::new(11.01, 12.02, 13.03);
        let b = Coordinates::new(11.01, 12.02, 13.03);
        let c = Coordinates::new(15.01, 14.02, 13.03);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn norm_matches_euclidean_length() {
        assert_eq!(Coordinates::new(1.0, 0.0, 0.0).norm(), 1.0);
        assert_eq!(Coordinates::new(3.0, 4.0, 0.0).norm(), 5.0);
        assert_eq!(Coordinates::new(-1.0, 0.0, 1.0).norm(), 2.0f64.sqrt());
    }

    #[test]
    fn distance_between_identical_points_is_zero() {
        let a = Coordinates::new(1.0, 0.0, 0.0);
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinates::new(1.0, 0.0, 0.0);
        let b = Coordinates::new(4.0, 4.0, 0.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let points = [
            Coordinates::new(1.0, 0.0, 0.0),
            Coordinates::new(4.0, 4.0, 0.0),
            Coordinates::new(-3.0, 0.0, 4.0),
            Coordinates::new(0.5, -2.5, 7.25),
            Coordinates::origin(),
        ];

        for a in &points {
            for b in &points {
                for c in &points {
                    let direct = a.distance(b);
                    let detour = a.distance(c) + c.distance(b);
                    assert!(direct <= detour + 1e-12, "{a} -> {b} via {c}");
                }
            }
        }
    }

    #[test]
    fn display_lists_components_separated_by_spaces() {
        assert_eq!(Coordinates::new(1.5, -2.0, 0.25).to_string(), "1.5 -2 0.25");
    }
}
