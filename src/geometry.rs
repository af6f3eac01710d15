//! Contains structs and methods to facilitate geometry in *n*-dimensional
//! space.

use crate::{Float, EPS};

/// A point in *n*-dimensional space.
pub type Point = nalgebra::DVector<Float>;

/// A vector in *n*-dimensional space.
pub type Vector = Point;

/// An *n* by *n* matrix.
pub type Matrix = nalgebra::DMatrix<Float>;

/// An affine map of *n*-dimensional space in homogeneous form: an *n* ×
/// (*n* + 1) matrix whose square block is the linear part and whose final
/// column is the translation. It is applied to a point by treating the point
/// as ending in an implicit 1.
///
/// All of the maps this crate builds are reflections, which are involutions,
/// but nothing in this type requires that.
#[derive(Clone, Debug, PartialEq)]
pub struct Affine(Matrix);

impl Affine {
    /// Initializes a new affine map from its homogeneous matrix.
    ///
    /// # Panics
    /// Panics if the matrix doesn't have exactly one more column than rows.
    pub fn new(mat: Matrix) -> Self {
        assert_eq!(
            mat.ncols(),
            mat.nrows() + 1,
            "homogeneous matrix must be n × (n + 1)"
        );

        Self(mat)
    }

    /// Returns the dimension of the space the map acts on.
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    /// Builds the [Householder reflection](https://en.wikipedia.org/wiki/Householder_transformation)
    /// across the hyperplane through the origin orthogonal to a given unit
    /// vector, as an affine map with zero translation.
    pub fn reflection(normal: &Vector) -> Self {
        let dim = normal.len();
        let mat = Matrix::identity(dim, dim) - (normal * normal.transpose()) * 2.0;

        Self(mat.insert_column(dim, 0.0))
    }

    /// Applies the map to a point.
    pub fn apply(&self, p: &Point) -> Point {
        let dim = self.dim();
        debug_assert_eq!(p.len(), dim, "point dimension doesn't match map");

        Point::from_fn(dim, |i, _| {
            (0..dim).map(|j| self.0[(i, j)] * p[j]).sum::<Float>() + self.0[(i, dim)]
        })
    }

    /// Expands the map by one dimension: the lower-dimensional transform is
    /// placed unchanged in the top-left block, and the new coordinate is left
    /// fixed.
    pub fn expand(&self) -> Self {
        let dim = self.dim();

        Self(Matrix::from_fn(dim + 1, dim + 2, |i, j| {
            if i < dim {
                if j < dim {
                    // The old linear block.
                    self.0[(i, j)]
                } else if j == dim {
                    // The new axis contributes nothing to the old coordinates.
                    0.0
                } else {
                    // The old translation.
                    self.0[(i, dim)]
                }
            } else if j == dim {
                // The new coordinate maps to itself.
                1.0
            } else {
                0.0
            }
        }))
    }
}

/// The resolution of a [`PointKey`]: coordinates are rounded to multiples of
/// [`EPS`] before comparison.
const KEY_SCALE: Float = 1.0 / EPS;

/// A small offset added to every coordinate before quantization, so that
/// coordinates which should be exactly zero can't land on opposite sides of a
/// rounding boundary due to signed zeros or stray 1e-16 noise.
const KEY_OFFSET: Float = 0.123;

/// A quantized key identifying a [`Point`] up to roundoff error, usable in a
/// hash map.
///
/// Each coordinate is offset by [`KEY_OFFSET`] and rounded to the nearest
/// multiple of [`EPS`]. This is a tolerance-based identity check, not exact
/// algebra: real-number equality is undecidable, and the resolution here is
/// chosen empirically for coordinates of the magnitudes that unit-edge
/// regular polytopes produce.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointKey(Vec<i64>);

impl PointKey {
    /// Quantizes a point into its key.
    pub fn new(p: &Point) -> Self {
        Self(
            p.iter()
                .map(|&x| ((x + KEY_OFFSET) * KEY_SCALE).round() as i64)
                .collect(),
        )
    }
}

/// Rounds a coordinate to a half-integer if it's within [`EPS`] of one.
///
/// This is purely cosmetic, used when printing vertices so that values like
/// `0.49999999991` or `-1e-16` display as `0.5` and `0`. It plays no part in
/// deduplication or geometry.
pub fn fudge(x: Float) -> Float {
    let half = (2.0 * x).round() / 2.0;

    if (x - half).abs() < EPS {
        half
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    /// Asserts that two points are equal up to tolerance.
    fn assert_eq(p: Point, q: Point) {
        assert_abs_diff_eq!((p - q).norm(), 0.0, epsilon = EPS);
    }

    #[test]
    fn reflection_involution() {
        let normal = dvector![-0.5, 3.0_f64.sqrt() / 2.0];
        let refl = Affine::reflection(&normal);
        let p = dvector![0.3, -1.7];

        assert_eq(refl.apply(&refl.apply(&p)), p);
    }

    #[test]
    fn reflection_fixes_hyperplane() {
        let normal = dvector![0.0, 1.0];
        let refl = Affine::reflection(&normal);

        assert_eq(refl.apply(&dvector![2.0, 0.0]), dvector![2.0, 0.0]);
        assert_eq(refl.apply(&dvector![0.0, 1.0]), dvector![0.0, -1.0]);
    }

    #[test]
    fn expand_preserves_action() {
        // x ↦ -x + 1, the segment's nontrivial symmetry.
        let flip = Affine::new(nalgebra::dmatrix![-1.0, 1.0]);
        let lifted = flip.expand();

        assert_eq(lifted.apply(&dvector![0.25, 3.0]), dvector![0.75, 3.0]);
    }

    #[test]
    fn key_round_trip() {
        let p = dvector![0.5, -1.0 / 3.0, 0.0];

        assert_eq!(PointKey::new(&p), PointKey::new(&p.clone()));
    }

    #[test]
    fn key_tolerates_noise() {
        let p = dvector![1.0, 0.0];
        let q = dvector![1.0 + 1e-13, -1e-16];

        assert_eq!(PointKey::new(&p), PointKey::new(&q));
    }

    #[test]
    fn key_separates_distinct_points() {
        assert_ne!(
            PointKey::new(&dvector![0.0, 0.0]),
            PointKey::new(&dvector![0.0, 1.0])
        );
    }

    #[test]
    fn fudge_polishes_half_integers() {
        assert_eq!(fudge(0.499_999_999_9), 0.5);
        assert_eq!(fudge(-1e-16), 0.0);
        assert_eq!(fudge(2.000_000_000_05), 2.0);
    }

    #[test]
    fn fudge_leaves_other_values_alone() {
        assert_eq!(fudge(0.3), 0.3);
        assert_eq!(fudge(0.866_025_403_784_438_6), 0.866_025_403_784_438_6);
    }
}
