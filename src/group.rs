//! Builds the generating reflections of a polytope's symmetry group, and
//! closes vertex orbits under them.

use std::collections::HashMap;

use nalgebra::dmatrix;

use crate::{
    geometry::{Affine, Point, PointKey, Vector},
    symbol::{Schlafli, SymbolResult},
};

/// Computes a set of generators of the symmetry group of the polytope with
/// the given symbol and edge length 1. A symbol of rank *n* yields *n* + 1
/// generators acting on (*n* + 1)-dimensional space.
///
/// The construction is recursive. The facet symbol's generators are expanded
/// by one dimension, leaving the new coordinate fixed. One new reflection is
/// then appended: it reflects the first facet across the hyperplane spanned
/// by the first ridge and the polytope's center, taking it to a second facet
/// containing that ridge. The unit normal of that bisecting hyperplane is
/// `[0, …, 0, -sin(θ/2), cos(θ/2)]`, where θ is the dihedral angle between
/// adjacent facets.
///
/// Fails if the symbol has no Euclidean realization.
pub fn symmetry_generators(symbol: &Schlafli) -> SymbolResult<Vec<Affine>> {
    let dim = symbol.dim();

    // The unit segment has a single symmetry: the reflection about x = 1/2.
    if dim == 1 {
        return Ok(vec![Affine::new(dmatrix![-1.0, 1.0])]);
    }

    let mut generators: Vec<_> = symmetry_generators(&symbol.facet())?
        .iter()
        .map(Affine::expand)
        .collect();

    let (s, c) = symbol.half_dihedral()?;
    let mut normal = Vector::zeros(dim);
    normal[dim - 2] = -s;
    normal[dim - 1] = c;
    generators.push(Affine::reflection(&normal));

    log::debug!(
        "{} generators for the symmetry group of {}",
        generators.len(),
        symbol
    );

    Ok(generators)
}

/// The orbit of a set of seed vertices under a set of generators, together
/// with the multiplication table mapping each (vertex, generator) pair to the
/// index of the vertex's image.
///
/// Vertex indices are stable: seeds keep their original indices, and new
/// vertices are appended in discovery order. The orbit is closed under every
/// generator, except that once the vertex cap is reached, images that would
/// be new vertices are suppressed and recorded as [`None`] in the table.
#[derive(Clone, Debug)]
pub struct VertexOrbit {
    /// The vertices of the orbit, seeds first.
    pub vertices: Vec<Point>,

    /// The multiplication table. `table[v][g]` is the index of the image of
    /// vertex `v` under generator `g`, or `None` if that image was suppressed
    /// by the vertex cap.
    table: Vec<Vec<Option<usize>>>,

    /// Whether the vertex cap suppressed any vertex.
    pub truncated: bool,
}

impl VertexOrbit {
    /// Closes the orbit of the given seed vertices under the given
    /// generators, deduplicating vertices by their quantized [`PointKey`],
    /// and records the multiplication table as it goes.
    ///
    /// The worklist is an explicit cursor over the growing vertex list, so
    /// the loop terminates once no new vertices appear or the list reaches
    /// `limit` vertices.
    pub fn expand(seeds: Vec<Point>, generators: &[Affine], limit: usize) -> Self {
        let mut vertices = seeds;
        let mut table = Vec::new();
        let mut truncated = false;

        let mut index: HashMap<PointKey, Option<usize>> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (PointKey::new(v), Some(i)))
            .collect();

        let mut cursor = 0;
        while cursor < vertices.len() {
            let vertex = vertices[cursor].clone();
            let mut row = Vec::with_capacity(generators.len());

            for gen in generators {
                let image = gen.apply(&vertex);
                let key = PointKey::new(&image);

                let entry = match index.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        let idx = if vertices.len() < limit {
                            vertices.push(image);
                            Some(vertices.len() - 1)
                        } else {
                            truncated = true;
                            None
                        };

                        index.insert(key, idx);
                        idx
                    }
                };

                row.push(entry);
            }

            table.push(row);
            cursor += 1;
        }

        Self {
            vertices,
            table,
            truncated,
        }
    }

    /// Returns the number of vertices in the orbit.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of generators the orbit was closed under.
    pub fn gen_count(&self) -> usize {
        self.table.first().map_or(0, Vec::len)
    }

    /// Returns the index of the image of a vertex under a generator, or
    /// `None` if the image was suppressed by the vertex cap.
    pub fn image(&self, vertex: usize, gen: usize) -> Option<usize> {
        self.table[vertex][gen]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use nalgebra::dvector;

    use crate::{Float, EPS};

    fn symbol(entries: &[u32]) -> Schlafli {
        Schlafli::new(entries.iter().map(|&q| q as Float).collect()).unwrap()
    }

    /// The orbit of the unit segment's endpoints under a symbol's generators.
    fn orbit(symbol: &Schlafli, limit: usize) -> (Vec<Affine>, VertexOrbit) {
        let gens = symmetry_generators(symbol).unwrap();
        let dim = symbol.dim();
        let seeds = vec![Point::zeros(dim), {
            let mut v = Point::zeros(dim);
            v[0] = 1.0;
            v
        }];

        let orbit = VertexOrbit::expand(seeds, &gens, limit);
        (gens, orbit)
    }

    #[test]
    fn generator_counts() {
        assert_eq!(symmetry_generators(&symbol(&[])).unwrap().len(), 1);
        assert_eq!(symmetry_generators(&symbol(&[4, 3])).unwrap().len(), 3);
        assert_eq!(symmetry_generators(&symbol(&[3, 3, 5])).unwrap().len(), 4);
    }

    #[test]
    fn segment_flip() {
        let gens = symmetry_generators(&symbol(&[])).unwrap();

        assert_abs_diff_eq!(gens[0].apply(&dvector![0.0])[0], 1.0, epsilon = EPS);
        assert_abs_diff_eq!(gens[0].apply(&dvector![1.0])[0], 0.0, epsilon = EPS);
    }

    #[test]
    fn triangle_reflection() {
        // The new generator of {3} takes the first edge's far endpoint to
        // the triangle's apex.
        let gens = symmetry_generators(&symbol(&[3])).unwrap();
        let apex = gens[1].apply(&dvector![1.0, 0.0]);

        assert_abs_diff_eq!(apex[0], 0.5, epsilon = EPS);
        assert_abs_diff_eq!(apex[1], (3.0_f64).sqrt() / 2.0, epsilon = EPS);
    }

    #[test]
    fn generators_are_involutions() {
        let (gens, orbit) = orbit(&symbol(&[4, 3]), usize::MAX);

        for v in &orbit.vertices {
            for gen in &gens {
                assert_abs_diff_eq!(
                    (gen.apply(&gen.apply(v)) - v).norm(),
                    0.0,
                    epsilon = EPS
                );
            }
        }
    }

    #[test]
    fn orbit_is_closed() {
        let (_, orbit) = orbit(&symbol(&[4, 3]), usize::MAX);

        assert_eq!(orbit.vertex_count(), 8);
        assert!(!orbit.truncated);

        for v in 0..orbit.vertex_count() {
            for g in 0..orbit.gen_count() {
                assert!(orbit.image(v, g).is_some());
            }
        }
    }

    #[test]
    fn orbit_respects_cap() {
        let (_, orbit) = orbit(&symbol(&[5, 3]), 12);

        assert!(orbit.truncated);
        assert_eq!(orbit.vertex_count(), 12);
    }

    #[test]
    fn seed_indices_are_stable() {
        let (_, orbit) = orbit(&symbol(&[4]), usize::MAX);

        assert_abs_diff_eq!((&orbit.vertices[0] - dvector![0.0, 0.0]).norm(), 0.0);
        assert_abs_diff_eq!((&orbit.vertices[1] - dvector![1.0, 0.0]).norm(), 0.0);
    }
}
