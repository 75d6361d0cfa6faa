//! Planar-graph equitable coloring (component 4.F).
//!
//! Transcribed from `colorize`/`is_valid_coloration` in
//! `examples/original_source/src/geostructs/colorgraph.cpp`: a degree-bucket peel
//! order (phase 1) followed by a min-histogram balanced assignment pass (phase 2).
//! `indexmap::IndexMap` stands in for the original's `vector<list<int> >` degree
//! buckets — insertion order inside a bucket matters (front-of-bucket is popped
//! first), which a plain `HashMap` would not preserve.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::{CoreError, CoreResult};
use crate::graph::AdjGraph;

/// A completed coloring: every node maps to a color in `[0, ncolors)`, plus the
/// per-color assignment counts used by phase 2's balancing rule.
#[derive(Debug, Clone)]
pub struct Coloring<N> {
    colors: IndexMap<N, usize>,
    histogram: Vec<usize>,
}

impl<N: Copy + Eq + Hash> Coloring<N> {
    pub fn get_color(&self, v: N) -> CoreResult<usize> {
        self.colors
            .get(&v)
            .copied()
            .ok_or_else(|| CoreError::NotFound("node has no assigned color".to_string()))
    }

    pub fn histogram(&self) -> &[usize] {
        &self.histogram
    }

    pub fn iter(&self) -> impl Iterator<Item = (N, usize)> + '_ {
        self.colors.iter().map(|(&n, &c)| (n, c))
    }
}

/// Colors `graph` with `ncolors` colors such that no edge is monochrome, using the
/// degree-bucket peel + min-histogram balancing algorithm `colorize` uses for planar
/// graphs (`ncolors >= 6` always succeeds on a planar input; smaller graphs or
/// non-planar input may still succeed or may exhaust colors).
///
/// `InvalidArgument` if `ncolors < 6` (`ColorGraph::colorize`'s own
/// "insufficient colors - c has to be at least 6" up-front check). `Exhausted` if some
/// node runs out of available colors despite `ncolors >= 6` (non-planar input).
pub fn colorize<N, L>(graph: &AdjGraph<N, L>, ncolors: usize) -> CoreResult<Coloring<N>>
where
    N: Copy + Ord + Hash,
{
    if ncolors < 6 {
        return Err(CoreError::InvalidArgument(
            "ncolors must be at least 6".to_string(),
        ));
    }

    // Phase 1: degree-bucket peel order.
    let mut degree: IndexMap<N, usize> = IndexMap::new();
    for v in graph.nodes() {
        degree.insert(v, graph.neighbors(v).len());
    }
    let max_degree = degree.values().copied().max().unwrap_or(0);
    let mut buckets: Vec<Vec<N>> = vec![Vec::new(); max_degree + 1];
    for (&v, &d) in degree.iter() {
        buckets[d].push(v);
    }

    let mut removed: Vec<N> = Vec::with_capacity(degree.len());
    let mut current_degree: IndexMap<N, usize> = degree.clone();
    while removed.len() < degree.len() {
        let d = buckets
            .iter()
            .position(|bucket| !bucket.is_empty())
            .expect("a non-empty degree list exists while nodes remain unremoved");
        let u = buckets[d].remove(0);
        removed.push(u);
        current_degree.insert(u, usize::MAX); // marks u as removed
        for &w in graph.neighbors(u) {
            if let Some(&wd) = current_degree.get(&w) {
                if wd != usize::MAX {
                    if let Some(pos) = buckets[wd].iter().position(|&x| x == w) {
                        buckets[wd].remove(pos);
                        buckets[wd - 1].push(w);
                        current_degree.insert(w, wd - 1);
                    }
                }
            }
        }
    }

    // Phase 2: min-histogram color assignment, popping `removed` back to front.
    let mut histogram = vec![0usize; ncolors];
    let mut colors: IndexMap<N, usize> = IndexMap::new();
    for &u in removed.iter().rev() {
        let mut taken = vec![false; ncolors];
        for &w in graph.neighbors(u) {
            if let Some(&c) = colors.get(&w) {
                taken[c] = true;
            }
        }
        let chosen = (0..ncolors)
            .filter(|&c| !taken[c])
            .min_by_key(|&c| (histogram[c], c))
            .ok_or_else(|| {
                log::debug!("color exhaustion: all {ncolors} colors taken by neighbors");
                CoreError::Exhausted(format!(
                    "no available color for node out of {ncolors} colors"
                ))
            })?;
        colors.insert(u, chosen);
        histogram[chosen] += 1;
    }

    Ok(Coloring { colors, histogram })
}

/// Post-condition checker: true iff every edge of `coloring`'s graph joins two
/// distinctly-colored nodes and every node has a color. Ported from
/// `ColorGraph::is_valid_coloration`.
pub fn is_valid_coloring<N, L>(graph: &AdjGraph<N, L>, coloring: &Coloring<N>) -> bool
where
    N: Copy + Ord + Hash,
{
    for v in graph.nodes() {
        if coloring.get_color(v).is_err() {
            return false;
        }
    }
    for (u, v, _) in graph.edges() {
        let cu = match coloring.get_color(u) {
            Ok(c) => c,
            Err(_) => return false,
        };
        let cv = match coloring.get_color(v) {
            Ok(c) => c,
            Err(_) => return false,
        };
        if u != v && cu == cv {
            return false;
        }
    }
    true
}
