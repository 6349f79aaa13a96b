//! Points and TSP instances.
//!
//! An instance is an ordered list of 2-D points. The order is the order the points were
//! sampled or read in and has nothing to do with the order in which a tour visits them.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Draw a point uniformly from the unit square `[0, 1) x [0, 1)`
    pub fn sample_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Point {
            x: rng.gen::<f64>(),
            y: rng.gen::<f64>(),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// A single TSP instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instance {
    points: Vec<Point>,
}

impl Instance {
    pub fn new(points: Vec<Point>) -> Self {
        Instance { points }
    }

    /// Build an instance from a flat `[x0, y0, x1, y1, ...]` slice.
    ///
    /// Returns `None` when the slice has an odd length.
    pub fn from_flat(coords: &[f64]) -> Option<Self> {
        if coords.len() % 2 != 0 {
            return None;
        }
        let points = coords
            .chunks_exact(2)
            .map(|c| Point::new(c[0], c[1]))
            .collect();
        Some(Instance { points })
    }

    /// Sample `size` points independently and uniformly from the unit square
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let points = (0..size).map(|_| Point::sample_unit(rng)).collect();
        Instance { points }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn point(&self, i: usize) -> &Point {
        &self.points[i]
    }

    /// Get the distance between two points of the instance
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.points[i].distance(&self.points[j])
    }

    /// Coordinates flattened as `[x0, y0, x1, y1, ...]`
    pub fn to_flat(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Calculate the closed tour length.
    ///
    /// The tour is not checked; use [`crate::evaluation::validate_tour`] first when it comes
    /// from an untrusted source. Indices outside the instance panic.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }

        let mut length = 0.0;
        for i in 0..tour.len() - 1 {
            length += self.distance(tour[i], tour[i + 1]);
        }

        length += self.distance(tour[0], tour[tour.len() - 1]);

        length
    }

    /// Axis-aligned bounding box as `(min, max)`, `None` for an empty instance
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }
}

impl From<Vec<(f64, f64)>> for Instance {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        Instance {
            points: pairs.into_iter().map(Point::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_distance_calculation() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);

        assert!((a.distance(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance(&a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_flat() {
        let instance = Instance::from_flat(&[0.0, 0.5, 1.0, 0.25]).unwrap();
        assert_eq!(instance.len(), 2);
        assert_eq!(*instance.point(1), Point::new(1.0, 0.25));
        assert_eq!(instance.to_flat(), vec![0.0, 0.5, 1.0, 0.25]);

        assert!(Instance::from_flat(&[0.0, 0.5, 1.0]).is_none());
    }

    #[test]
    fn test_tour_length_unit_square() {
        let instance = Instance::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!((instance.tour_length(&[0, 1, 2, 3]) - 4.0).abs() < 1e-12);
        assert_eq!(instance.tour_length(&[2]), 0.0);
    }

    #[test]
    fn test_random_points_in_unit_square() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let instance = Instance::random(200, &mut rng);

        assert_eq!(instance.len(), 200);
        for p in instance.points() {
            assert!((0.0..1.0).contains(&p.x));
            assert!((0.0..1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_bounds() {
        let instance = Instance::from(vec![(0.2, 0.9), (0.7, 0.1), (0.4, 0.5)]);
        let (lo, hi) = instance.bounds().unwrap();
        assert_eq!(lo, Point::new(0.2, 0.1));
        assert_eq!(hi, Point::new(0.7, 0.9));
        assert!(Instance::new(Vec::new()).bounds().is_none());
    }
}
