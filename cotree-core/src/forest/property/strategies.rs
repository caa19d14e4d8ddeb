//! Strategy builders for tree selection property tests.
//!
//! Each generator builds an [`EdgeListMesh`], an injective edge-to-DOF
//! numbering, and one [`DofCoupling`] per DOF from a seeded [`SmallRng`], so
//! any failing case can be replayed from its seed.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{DofCoupling, DofMap, EdgeListMesh};

use super::types::{CouplingMix, DofLayout, GaugeFixture, Topology};

/// Minimum vertex count for generated meshes.
const MIN_VERTICES: usize = 2;
/// Maximum vertex count for generated meshes.
const MAX_VERTICES: usize = 48;
/// Maximum cell count per grid side.
const MAX_GRID_SIDE: usize = 6;
/// Maximum number of DOFs a sparse layout adds beyond the edge count.
const MAX_EXTRA_DOFS: usize = 8;

/// Generates fixtures covering every topology, coupling mix and DOF layout.
pub(super) fn gauge_fixture_strategy() -> impl Strategy<Value = GaugeFixture> {
    (
        any::<Topology>(),
        any::<CouplingMix>(),
        any::<DofLayout>(),
        any::<u64>(),
    )
        .prop_map(|(topology, mix, layout, seed)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_fixture(topology, mix, layout, &mut rng)
        })
}

/// Generates a fixture for a specific topology, coupling mix and layout.
pub(super) fn generate_fixture(
    topology: Topology,
    mix: CouplingMix,
    layout: DofLayout,
    rng: &mut SmallRng,
) -> GaugeFixture {
    let (vertex_count, edges) = match topology {
        Topology::Connected => generate_connected(rng),
        Topology::Grid => generate_grid(rng),
        Topology::Disconnected => generate_disconnected(rng),
        Topology::Multigraph => generate_multigraph(rng),
    };
    let (dof_count, edge_dofs) = generate_layout(layout, edges.len(), rng);
    let couplings = (0..dof_count).map(|_| sample_coupling(mix, rng)).collect();
    let map = match layout {
        DofLayout::Identity => DofMap::Identity,
        DofLayout::Permuted | DofLayout::Sparse => {
            DofMap::from_indices(edge_dofs.clone()).expect("generated layouts are injective")
        }
    };
    GaugeFixture {
        mesh: EdgeListMesh::new(format!("{topology:?}").to_lowercase(), vertex_count, edges),
        edge_dofs,
        couplings,
        map,
        topology,
        mix,
        layout,
    }
}

// ── DOF layouts ─────────────────────────────────────────────────────────

/// Returns the DOF universe size and the DOF carried by each edge.
fn generate_layout(
    layout: DofLayout,
    edge_count: usize,
    rng: &mut SmallRng,
) -> (usize, Vec<usize>) {
    match layout {
        DofLayout::Identity => (edge_count, (0..edge_count).collect()),
        DofLayout::Permuted => {
            let mut dofs: Vec<usize> = (0..edge_count).collect();
            shuffle(&mut dofs, rng);
            (edge_count, dofs)
        }
        DofLayout::Sparse => {
            let dof_count = edge_count + rng.gen_range(1..=MAX_EXTRA_DOFS);
            let mut dofs: Vec<usize> = (0..dof_count).collect();
            shuffle(&mut dofs, rng);
            dofs.truncate(edge_count);
            (dof_count, dofs)
        }
    }
}

// ── Topologies ──────────────────────────────────────────────────────────

/// Random spanning path over a shuffled vertex order plus extra chords.
fn generate_connected(rng: &mut SmallRng) -> (usize, Vec<(usize, usize)>) {
    let vertex_count = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
    let mut order: Vec<usize> = (0..vertex_count).collect();
    shuffle(&mut order, rng);

    let mut edges: Vec<(usize, usize)> = order.windows(2).map(|pair| (pair[0], pair[1])).collect();
    let extra = rng.gen_range(0..=vertex_count * 2);
    for _ in 0..extra {
        let u = rng.gen_range(0..vertex_count);
        let v = rng.gen_range(0..vertex_count);
        if u != v {
            edges.push((u, v));
        }
    }
    shuffle(&mut edges, rng);
    (vertex_count, edges)
}

/// Triangulated structured grid with randomly oriented edges.
fn generate_grid(rng: &mut SmallRng) -> (usize, Vec<(usize, usize)>) {
    let rows = rng.gen_range(1..=MAX_GRID_SIDE);
    let cols = rng.gen_range(1..=MAX_GRID_SIDE);
    let id = |row: usize, col: usize| row * (cols + 1) + col;
    let mut edges = Vec::new();
    for row in 0..=rows {
        for col in 0..=cols {
            if col < cols {
                edges.push((id(row, col), id(row, col + 1)));
            }
            if row < rows {
                edges.push((id(row, col), id(row + 1, col)));
            }
            if row < rows && col < cols {
                edges.push((id(row, col), id(row + 1, col + 1)));
            }
        }
    }
    for edge in &mut edges {
        if rng.gen_bool(0.5) {
            *edge = (edge.1, edge.0);
        }
    }
    ((rows + 1) * (cols + 1), edges)
}

/// Two to five components with no cross-component edges; isolated vertices
/// are allowed.
fn generate_disconnected(rng: &mut SmallRng) -> (usize, Vec<(usize, usize)>) {
    let component_count = rng.gen_range(2..=5);
    let mut edges = Vec::new();
    let mut offset = 0;
    for _ in 0..component_count {
        let size = rng.gen_range(1..=10);
        let probability: f64 = rng.gen_range(0.2..=0.8);
        for i in 0..size {
            for j in (i + 1)..size {
                if rng.gen_bool(probability) {
                    edges.push((offset + i, offset + j));
                }
            }
        }
        offset += size;
    }
    (offset, edges)
}

/// Random multigraph that repeats edges and includes self-loops.
fn generate_multigraph(rng: &mut SmallRng) -> (usize, Vec<(usize, usize)>) {
    let vertex_count = rng.gen_range(MIN_VERTICES..=16);
    let edge_count = rng.gen_range(0..=vertex_count * 3);
    let mut edges = Vec::with_capacity(edge_count);
    for _ in 0..edge_count {
        let u = rng.gen_range(0..vertex_count);
        let v = if rng.gen_bool(0.1) {
            u
        } else {
            rng.gen_range(0..vertex_count)
        };
        edges.push((u, v));
        if rng.gen_bool(0.2) {
            edges.push((v, u));
        }
    }
    (vertex_count, edges)
}

// ── Couplings ───────────────────────────────────────────────────────────

fn sample_coupling(mix: CouplingMix, rng: &mut SmallRng) -> DofCoupling {
    match mix {
        CouplingMix::AllFree => DofCoupling::Free,
        CouplingMix::MostlyFree => {
            if rng.gen_bool(0.15) {
                DofCoupling::Constrained
            } else {
                DofCoupling::Free
            }
        }
        CouplingMix::Mixed => match rng.gen_range(0..10) {
            0..=1 => DofCoupling::Unused,
            2..=4 => DofCoupling::Constrained,
            _ => DofCoupling::Free,
        },
    }
}

/// Fisher-Yates shuffle using the provided RNG.
fn shuffle<T>(slice: &mut [T], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

impl proptest::arbitrary::Arbitrary for Topology {
    type Parameters = ();
    type Strategy = proptest::strategy::TupleUnion<(
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
    )>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            3 => Just(Self::Connected),
            2 => Just(Self::Grid),
            2 => Just(Self::Disconnected),
            2 => Just(Self::Multigraph),
        ]
    }
}

impl proptest::arbitrary::Arbitrary for DofLayout {
    type Parameters = ();
    type Strategy = proptest::strategy::TupleUnion<(
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
    )>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            2 => Just(Self::Identity),
            1 => Just(Self::Permuted),
            1 => Just(Self::Sparse),
        ]
    }
}

// Mixed classifications exercise the priority order, so they are sampled
// most often.
impl proptest::arbitrary::Arbitrary for CouplingMix {
    type Parameters = ();
    type Strategy = proptest::strategy::TupleUnion<(
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
        proptest::strategy::WA<proptest::strategy::Just<Self>>,
    )>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            1 => Just(Self::AllFree),
            2 => Just(Self::MostlyFree),
            3 => Just(Self::Mixed),
        ]
    }
}
