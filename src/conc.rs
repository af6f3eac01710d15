//! Declares the [`Concrete`] polytope type and the recursive construction
//! that builds one from a Schläfli symbol.

use std::{collections::HashSet, fmt::Display};

use serde::Serialize;

use crate::{
    geometry::Point,
    group::{symmetry_generators, VertexOrbit},
    symbol::{Schlafli, SymbolError},
};

/// An element of a polytope: the sorted indices of the vertices it contains.
pub type Element = Vec<usize>;

/// The elements of a single rank, in discovery order.
pub type ElementList = Vec<Element>;

/// The result of building a polytope from a symbol.
pub type BuildResult<T> = Result<T, BuildError>;

/// Represents an error while building a polytope from a symbol.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildError {
    /// The symbol itself was invalid or has no Euclidean realization.
    Symbol(SymbolError),

    /// The alternating sum of element counts of a non-star, non-truncated
    /// polytope disagreed with the generalized Euler characteristic. This
    /// indicates a construction defect, not bad input.
    EulerMismatch {
        /// The expected characteristic.
        expected: i64,

        /// The characteristic actually found.
        found: i64,
    },
}

impl From<SymbolError> for BuildError {
    fn from(err: SymbolError) -> Self {
        Self::Symbol(err)
    }
}

impl Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbol(err) => err.fmt(f),

            Self::EulerMismatch { expected, found } => {
                write!(
                    f,
                    "Euler characteristic mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Symbol(err) => Some(err),
            Self::EulerMismatch { .. } => None,
        }
    }
}

/// A regular polytope, realized concretely: its vertices as points in
/// Euclidean space, plus one [`ElementList`] per rank from edges up to
/// facets.
///
/// Built once by [`Concrete::from_symbol`] and never mutated. The polytope
/// has edge length 1 and canonical position: the first vertex at the origin,
/// the first edge along the +x axis, the first face in the +y half-plane of
/// the xy plane, and so on.
#[derive(Clone, Debug, Serialize)]
pub struct Concrete {
    /// The list of vertices as points in Euclidean space.
    pub vertices: Vec<Point>,

    /// The element lists by rank: `elements[k - 1]` holds the rank-`k`
    /// elements (1 = edges, 2 = faces, …), each a sorted list of vertex
    /// indices.
    pub elements: Vec<ElementList>,

    /// Whether the vertex cap suppressed any vertex at any recursion level.
    /// Elements touching suppressed vertices are dropped from the lists, and
    /// the Euler self-check is skipped.
    pub truncated: bool,
}

impl Concrete {
    /// Builds the regular polytope described by a symbol, with no cap on the
    /// vertex count.
    ///
    /// Fails if the symbol has no Euclidean realization, or if the resulting
    /// element counts fail the Euler self-check (which would indicate a
    /// construction defect).
    pub fn from_symbol(symbol: &Schlafli) -> BuildResult<Self> {
        Self::with_vertex_limit(symbol, usize::MAX)
    }

    /// Builds the regular polytope described by a symbol, suppressing any
    /// vertices beyond the given cap.
    ///
    /// The cap bounds combinatorial blow-up for symbols whose orbit would
    /// otherwise be very large or infinite (e.g. planar tilings like
    /// {4, 4}). Hitting it is not an error: the result is returned with
    /// [`truncated`](Self::truncated) set, elements touching suppressed
    /// vertices silently dropped, and the Euler self-check skipped.
    pub fn with_vertex_limit(symbol: &Schlafli, limit: usize) -> BuildResult<Self> {
        let poly = Self::build(symbol, limit)?;

        if !symbol.is_star() && !symbol.is_degenerate() && !poly.truncated {
            let expected = expected_euler(symbol.rank());
            let found = poly.euler_characteristic();

            if found != expected {
                return Err(BuildError::EulerMismatch { expected, found });
            }
        }

        log::info!(
            "built {}: {} vertices, ranks {:?}{}",
            symbol,
            poly.vertex_count(),
            poly.elements.iter().map(Vec::len).collect::<Vec<_>>(),
            if poly.truncated { " (truncated)" } else { "" }
        );

        Ok(poly)
    }

    /// The recursive construction. Builds the facet's polytope, embeds its
    /// vertices in the new dimension to seed the orbit (so that vertex
    /// indices stay aligned with the facet's element lists), closes the
    /// orbit under the symbol's generators, and lifts every facet element
    /// list, plus the synthetic whole-facet element, through the orbit's
    /// multiplication table.
    fn build(symbol: &Schlafli, limit: usize) -> Result<Self, SymbolError> {
        // Base case: the unit segment's endpoints, with no element lists.
        if symbol.rank() == 0 {
            return Ok(Self {
                vertices: vec![Point::zeros(1), Point::from_element(1, 1.0)],
                elements: Vec::new(),
                truncated: false,
            });
        }

        let generators = symmetry_generators(symbol)?;
        let facet = Self::build(&symbol.facet(), limit)?;
        let dim = symbol.dim();

        // Pad the facet's vertices with a trailing 0 to embed them in the
        // new dimension.
        let seeds = facet
            .vertices
            .iter()
            .map(|v| Point::from_fn(dim, |i, _| if i + 1 < dim { v[i] } else { 0.0 }))
            .collect();

        let orbit = VertexOrbit::expand(seeds, &generators, limit);

        // The facet's element lists, with one more list appended holding the
        // entire facet. Lifting that list produces this polytope's facets,
        // and seeds the recursion one level up.
        let mut facet_elements = facet.elements;
        facet_elements.push(vec![(0..facet.vertices.len()).collect()]);

        let elements = facet_elements
            .iter()
            .map(|list| lift_elements(list, &orbit))
            .collect();

        Ok(Self {
            vertices: orbit.vertices,
            elements,
            truncated: orbit.truncated || facet.truncated,
        })
    }

    /// Returns the rank of the polytope, i.e. the length of its symbol.
    /// Vertices are rank 0 and facets are rank `rank()`.
    pub fn rank(&self) -> usize {
        self.elements.len()
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of elements of a given rank, where rank 0 counts
    /// vertices. Ranks beyond the polytope's count as 0.
    pub fn el_count(&self, rank: usize) -> usize {
        if rank == 0 {
            self.vertex_count()
        } else {
            self.elements.get(rank - 1).map_or(0, Vec::len)
        }
    }

    /// Computes the alternating sum of element counts,
    /// N₀ − N₁ + N₂ − ⋯, over ranks 0 through `rank()`.
    pub fn euler_characteristic(&self) -> i64 {
        let mut chi = self.vertex_count() as i64;
        let mut sign = -1;

        for list in &self.elements {
            chi += sign * list.len() as i64;
            sign = -sign;
        }

        chi
    }
}

/// The generalized Euler characteristic of a convex regular polytope of a
/// given rank: 1 + (−1)ⁿ.
fn expected_euler(rank: usize) -> i64 {
    1 + if rank % 2 == 0 { 1 } else { -1 }
}

/// Maps a facet element list through every generator, via the orbit's
/// multiplication table, until the list is closed.
///
/// Images are canonicalized as sorted index lists and deduplicated. An image
/// touching a vertex suppressed by the cap can't be represented faithfully
/// and is discarded entirely. The seed elements keep their positions at the
/// front of the output.
fn lift_elements(seed: &[Element], orbit: &VertexOrbit) -> ElementList {
    let mut elements = seed.to_vec();
    let mut known: HashSet<Element> = elements.iter().cloned().collect();

    let mut cursor = 0;
    while cursor < elements.len() {
        for gen in 0..orbit.gen_count() {
            let image: Option<Element> = elements[cursor]
                .iter()
                .map(|&v| orbit.image(v, gen))
                .collect();

            if let Some(mut image) = image {
                image.sort_unstable();

                if known.insert(image.clone()) {
                    elements.push(image);
                }
            }
        }

        cursor += 1;
    }

    elements
}
