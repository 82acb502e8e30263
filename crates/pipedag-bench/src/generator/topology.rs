//! Edge-set strategies: path, ring, layered DAG and uniform random, plus
//! cycle injection.
//!
//! Edges are `(source, target)` pairs of node positions in `0..n`.

use rand::Rng;
use rand::rngs::StdRng;

use super::Topology;

/// Builds the admissible edges for `topology` over `n` nodes.
pub fn build_edges(topology: Topology, n: usize, rng: &mut StdRng) -> Vec<(usize, usize)> {
    match topology {
        Topology::Path => (1..n).map(|i| (i - 1, i)).collect(),
        Topology::Ring => {
            if n == 0 {
                return Vec::new();
            }
            (0..n).map(|i| (i, (i + 1) % n)).collect()
        }
        Topology::Layered { layers, fan_in } => layered(n, layers, fan_in, rng),
        Topology::Random { edge_factor } => {
            if n == 0 {
                return Vec::new();
            }
            (0..n * edge_factor)
                .map(|_| (rng.gen_range(0..n), rng.gen_range(0..n)))
                .collect()
        }
    }
}

/// Whether [`build_edges`] produces at least one edge.
pub fn has_edges(topology: Topology, n: usize) -> bool {
    match topology {
        Topology::Path => n >= 2,
        Topology::Ring => n >= 1,
        Topology::Layered { layers, fan_in } => fan_in > 0 && clamp_layers(layers, n) >= 2,
        Topology::Random { edge_factor } => n > 0 && edge_factor > 0,
    }
}

/// Appends the reverse of one randomly chosen edge.
///
/// On an acyclic edge set this always creates a cycle through the two
/// endpoints. Does nothing on an empty edge set.
pub fn reverse_one(pairs: &mut Vec<(usize, usize)>, rng: &mut StdRng) {
    if pairs.is_empty() {
        return;
    }
    let (source, target) = pairs[rng.gen_range(0..pairs.len())];
    pairs.push((target, source));
}

fn clamp_layers(layers: usize, n: usize) -> usize {
    layers.clamp(1, n.max(1))
}

/// Node `i` sits in layer `i * layers / n`, so every layer is non-empty and
/// edges only ever run from a lower position to a higher one.
fn layered(n: usize, layers: usize, fan_in: usize, rng: &mut StdRng) -> Vec<(usize, usize)> {
    if n == 0 {
        return Vec::new();
    }
    let layers = clamp_layers(layers, n);

    let mut layer_start: Vec<usize> = vec![0; layers + 1];
    let mut current = 0;
    for i in 0..n {
        let layer = i * layers / n;
        while current < layer {
            current += 1;
            layer_start[current] = i;
        }
    }
    layer_start[layers] = n;

    let mut pairs = Vec::with_capacity(n.saturating_mul(fan_in));
    for layer in 1..layers {
        let prev = layer_start[layer - 1]..layer_start[layer];
        for target in layer_start[layer]..layer_start[layer + 1] {
            for _ in 0..fan_in {
                pairs.push((rng.gen_range(prev.clone()), target));
            }
        }
    }
    pairs
}
