#![deny(
    missing_docs,
    nonstandard_style,
    unused_parens,
    unused_qualifications,
    rust_2018_idioms,
    rust_2018_compatibility,
    future_incompatible,
    missing_copy_implementations
)]

//! Generates [regular polytopes](https://en.wikipedia.org/wiki/Regular_polytope)
//! from their [Schläfli symbols](https://en.wikipedia.org/wiki/Schl%C3%A4fli_symbol).
//!
//! Given a symbol {*p*, *q*, *r*, …} of length *n*, the crate computes the
//! complete vertex set and the element lists of every rank (edges, faces,
//! 3-cells, …) of the corresponding polytope in (*n* + 1)-dimensional
//! Euclidean space, with edge length 1 and in canonical position: the first
//! vertex at the origin, the first edge along the +x axis, the first face in
//! the +y half of the xy plane, and so on.
//!
//! The construction builds the generating reflections of the polytope's
//! [Coxeter group](https://en.wikipedia.org/wiki/Coxeter_group) from the
//! dihedral angles implied by the symbol, closes the vertex orbit of the
//! recursively-built facet under those generators, and lifts the facet's own
//! element lists through the same orbit to obtain every higher element.
//!
//! ```
//! use schlafli::{conc::Concrete, symbol::Schlafli};
//!
//! let cube = Concrete::from_symbol(&"4,3".parse::<Schlafli>().unwrap()).unwrap();
//! assert_eq!(cube.vertex_count(), 8);
//! assert_eq!(cube.el_count(1), 12); // edges
//! assert_eq!(cube.el_count(2), 6); // faces
//! ```

pub mod conc;
pub mod geometry;
pub mod group;
pub mod symbol;

/// The floating point type used for all coordinates.
pub type Float = f64;

/// The tolerance used throughout the crate: for vertex deduplication, for the
/// planar-tiling clamp in the dihedral-angle recurrence, and for the cosmetic
/// rounding of printed coordinates.
///
/// This value is empirical. It is adequate for the coordinate magnitudes that
/// finite regular polytopes produce, but it is a tunable, not a guarantee;
/// symbols with very large entries may need a looser key resolution.
pub const EPS: Float = 1e-9;

/// Returns the display name for the elements of a given rank: `Vertices`,
/// `Edges`, `Faces`, and `k-cells` from rank 3 on.
pub fn element_name(rank: usize) -> String {
    match rank {
        0 => "Vertices".to_owned(),
        1 => "Edges".to_owned(),
        2 => "Faces".to_owned(),
        k => format!("{}-cells", k),
    }
}

/// Tests whether a polytope's element counts, from vertices up to facets,
/// match the expected counts.
#[cfg(test)]
pub(crate) fn test<I: IntoIterator<Item = usize>>(poly: &conc::Concrete, element_counts: I) {
    for (rank, expected) in element_counts.into_iter().enumerate() {
        assert_eq!(
            poly.el_count(rank),
            expected,
            "element count mismatch at rank {}",
            rank
        );
    }
}

#[cfg(test)]
mod tests {
    use super::element_name;

    #[test]
    fn element_names() {
        assert_eq!(element_name(1), "Edges");
        assert_eq!(element_name(2), "Faces");
        assert_eq!(element_name(3), "3-cells");
        assert_eq!(element_name(7), "7-cells");
    }
}
