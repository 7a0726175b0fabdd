//! Force-directed (spring) layout
//!
//! Fruchterman-Reingold: every pair of nodes repels, every edge attracts its
//! endpoints in proportion to the edge weight. Displacements are capped by a
//! temperature that cools linearly to zero, and the final positions are
//! centered and scaled into `[-1, 1]`.

use crate::graph::AssemblyGraph;
use log::debug;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Iterations used when nothing else is asked for
pub const DEFAULT_ITERATIONS: usize = 1500;

const MIN_DISTANCE: f64 = 0.01;
const CONVERGENCE: f64 = 1e-4;

/// Layout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Maximum number of relaxation steps
    pub iterations: usize,
    /// Seed for the initial positions
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: 0,
        }
    }
}

/// Node positions, indexed by the node's insertion position in the graph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub positions: Vec<(f64, f64)>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Compute a spring layout for every node of `graph`
pub fn spring_layout(graph: &AssemblyGraph, config: &LayoutConfig) -> Layout {
    let n = graph.node_count();
    match n {
        0 => return Layout::default(),
        1 => {
            return Layout {
                positions: vec![(0.0, 0.0)],
            }
        }
        _ => {}
    }

    let neighbours = neighbours(graph, n);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
    let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.gen(), rng.gen()]).collect();

    let k = (1.0 / n as f64).sqrt();
    let mut t = domain_width(&pos) * 0.1;
    let dt = t / (config.iterations as f64 + 1.0);

    let mut displacement = vec![[0.0f64; 2]; n];
    for iteration in 0..config.iterations {
        for d in displacement.iter_mut() {
            *d = [0.0, 0.0];
        }

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let repulsion = k * k / (dist * dist);
                displacement[i][0] += dx * repulsion;
                displacement[i][1] += dy * repulsion;
            }
            for &(j, w) in &neighbours[i] {
                let dx = pos[i][0] - pos[j][0];
                let dy = pos[i][1] - pos[j][1];
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let attraction = w * dist / k;
                displacement[i][0] -= dx * attraction;
                displacement[i][1] -= dy * attraction;
            }
        }

        let mut moved = 0.0;
        for i in 0..n {
            let [dx, dy] = displacement[i];
            let length = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
            let step = [dx * t / length, dy * t / length];
            pos[i][0] += step[0];
            pos[i][1] += step[1];
            moved += (step[0] * step[0] + step[1] * step[1]).sqrt();
        }
        t -= dt;

        if moved / (n as f64) < CONVERGENCE {
            debug!("layout converged after {} iterations", iteration + 1);
            break;
        }
    }

    Layout {
        positions: rescale(pos),
    }
}

/// Attraction partners of every node. Edges count in both directions and
/// parallel or opposite edges add up; self-loops are left out.
fn neighbours(graph: &AssemblyGraph, n: usize) -> Vec<Vec<(usize, f64)>> {
    let mut neighbours = vec![Vec::new(); n];
    for (edge, (i, j)) in graph.edges().zip(graph.edge_endpoints()) {
        if i == j {
            continue;
        }
        let w = edge
            .attrs
            .get("weight")
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0);
        neighbours[i].push((j, w));
        neighbours[j].push((i, w));
    }
    neighbours
}

fn domain_width(pos: &[[f64; 2]]) -> f64 {
    (0..2)
        .map(|axis| {
            let (lo, hi) = pos.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            });
            hi - lo
        })
        .fold(0.0, f64::max)
}

/// Center on the origin and scale so the largest coordinate is 1
fn rescale(pos: Vec<[f64; 2]>) -> Vec<(f64, f64)> {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p[1]).sum::<f64>() / n;

    let extent = pos
        .iter()
        .map(|p| (p[0] - cx).abs().max((p[1] - cy).abs()))
        .fold(0.0, f64::max);
    let scale = if extent > 0.0 { 1.0 / extent } else { 1.0 };

    pos.into_iter()
        .map(|p| ((p[0] - cx) * scale, (p[1] - cy) * scale))
        .collect()
}
