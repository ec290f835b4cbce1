//! Structural invariants checked by the contour-tree property suites.
//!
//! - **Merge trees** span the mesh: one node per vertex, `V - 1` edges, one
//!   root per extremum, and every edge follows the sweep order.
//! - **Contour tree** is a single tree over its vertices whose edges point
//!   from higher to lower values, and every vertex leaves the prune queue
//!   exactly once.
//! - **Determinism**: repeated runs produce identical trees and DOT output.
//! - **Simplification** keeps roots and leaves and drops nothing else that
//!   is significant.
//! - **Union-find** agrees with a naive relabelling oracle.

use std::{cmp::Ordering, collections::HashSet};

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{
    builder::ContourTreeBuilder,
    mesh::MeshAdjacency,
    pipeline::{ContourTree, compute_contour_tree},
    sweep::{SweepDirection, sweep},
    tree::DynamicTree,
    union_find::DisjointSet,
    vertex::VertexId,
};

use super::types::{MeshFixture, SetOperation};

fn fail_with(fixture: &MeshFixture, message: impl std::fmt::Display) -> TestCaseError {
    TestCaseError::fail(format!(
        "{message} (topology={:?}, vertices={})",
        fixture.topology,
        fixture.mesh.vertex_count(),
    ))
}

fn run_pipeline(fixture: &MeshFixture) -> Result<ContourTree, TestCaseError> {
    compute_contour_tree(&fixture.mesh, &fixture.field)
        .map_err(|error| fail_with(fixture, format!("pipeline failed: {error}")))
}

/// Checks both merge trees produced by the sweeps.
pub(super) fn run_merge_tree_property(fixture: &MeshFixture) -> TestCaseResult {
    let vertex_count = fixture.mesh.vertex_count();
    for direction in [SweepDirection::Descending, SweepDirection::Ascending] {
        let result = sweep(&fixture.mesh, &fixture.field, direction)
            .map_err(|error| fail_with(fixture, format!("{direction:?} sweep failed: {error}")))?;
        let tree = result.tree();

        if tree.len() != vertex_count {
            return Err(fail_with(
                fixture,
                format!("{direction:?} tree has {} nodes", tree.len()),
            ));
        }
        if tree.edge_count() != result.union_events() || result.union_events() + 1 != vertex_count
        {
            return Err(fail_with(
                fixture,
                format!(
                    "{direction:?} tree has {} edges after {} union events",
                    tree.edge_count(),
                    result.union_events(),
                ),
            ));
        }
        if tree.roots().len() != result.extrema() {
            return Err(fail_with(
                fixture,
                format!(
                    "{direction:?} tree has {} roots but {} extrema",
                    tree.roots().len(),
                    result.extrema(),
                ),
            ));
        }

        let expected = match direction {
            SweepDirection::Descending => Ordering::Greater,
            SweepDirection::Ascending => Ordering::Less,
        };
        for (parent, child) in tree.edges() {
            if fixture.field.compare(parent, child) != expected {
                return Err(fail_with(
                    fixture,
                    format!("{direction:?} edge {parent} -> {child} breaks the sweep order"),
                ));
            }
        }
    }
    Ok(())
}

/// Checks that the contour tree is a downward-oriented spanning tree.
pub(super) fn run_contour_tree_property(fixture: &MeshFixture) -> TestCaseResult {
    let contour = run_pipeline(fixture)?;
    let tree = contour.tree();

    validate_spanning_tree(fixture, tree)?;

    for (parent, child) in tree.edges() {
        if fixture.field.compare(parent, child) != Ordering::Greater {
            return Err(fail_with(
                fixture,
                format!("edge {parent} -> {child} points uphill"),
            ));
        }
    }

    let mut seen = HashSet::new();
    for &vertex in contour.prune_order() {
        if !seen.insert(vertex) {
            return Err(fail_with(fixture, format!("vertex {vertex} dequeued twice")));
        }
    }
    if tree.len() > 1 {
        let vertices: HashSet<VertexId> = tree.vertices().collect();
        if seen != vertices {
            let missing: Vec<VertexId> = vertices.difference(&seen).copied().collect();
            return Err(fail_with(
                fixture,
                format!("vertices {missing:?} were never dequeued"),
            ));
        }
    }

    let order = fixture.field.sweep_order(SweepDirection::Ascending);
    for extreme in [order.first(), order.last()].into_iter().flatten() {
        if !tree.contains(*extreme) {
            return Err(fail_with(
                fixture,
                format!("global extremum {extreme} missing from the contour tree"),
            ));
        }
    }
    Ok(())
}

/// Checks that two runs over the same input agree exactly.
pub(super) fn run_determinism_property(fixture: &MeshFixture) -> TestCaseResult {
    let first = run_pipeline(fixture)?;
    let second = run_pipeline(fixture)?;
    if first != second || first.to_dot() != second.to_dot() {
        return Err(fail_with(fixture, "repeated runs disagree"));
    }
    Ok(())
}

/// Checks that simplification keeps every significant vertex of the contour
/// tree and nothing else.
pub(super) fn run_simplify_property(fixture: &MeshFixture) -> TestCaseResult {
    let full = run_pipeline(fixture)?;
    let simplified = ContourTreeBuilder::new()
        .with_simplify(true)
        .build()
        .run(&fixture.mesh, &fixture.field)
        .map_err(|error| fail_with(fixture, format!("simplified run failed: {error}")))?;

    let significant = full
        .tree()
        .compute_significant_nodes()
        .map_err(|error| fail_with(fixture, format!("classification failed: {error}")))?;
    let kept: Vec<VertexId> = simplified.tree().vertices().collect();
    let expected: Vec<VertexId> = significant.significant().iter().copied().collect();
    if kept != expected {
        return Err(fail_with(
            fixture,
            format!("simplified vertices {kept:?} differ from significant {expected:?}"),
        ));
    }
    if simplified.tree().roots() != full.tree().roots()
        || simplified.tree().leaves() != full.tree().leaves()
    {
        return Err(fail_with(fixture, "simplification changed roots or leaves"));
    }
    validate_spanning_tree(fixture, simplified.tree())
}

fn validate_spanning_tree(fixture: &MeshFixture, tree: &DynamicTree) -> TestCaseResult {
    if tree.edge_count() + 1 != tree.len() {
        return Err(fail_with(
            fixture,
            format!(
                "tree has {} nodes but {} edges",
                tree.len(),
                tree.edge_count()
            ),
        ));
    }

    let mut sets = DisjointSet::new();
    for vertex in tree.vertices() {
        sets.make_set(vertex);
    }
    for (parent, child) in tree.edges() {
        let (Some(a), Some(b)) = (sets.find(parent), sets.find(child)) else {
            return Err(fail_with(
                fixture,
                format!("edge {parent} -> {child} leaves the tree"),
            ));
        };
        if a == b {
            return Err(fail_with(
                fixture,
                format!("edge {parent} -> {child} closes a cycle"),
            ));
        }
        sets.union(a, b);
    }
    Ok(())
}

/// Replays `operations` against [`DisjointSet`] and a naive component oracle.
pub(super) fn run_union_find_laws(label_count: usize, operations: &[SetOperation]) -> TestCaseResult {
    let mut sets = DisjointSet::with_capacity(label_count);
    let mut oracle: Vec<usize> = (0..label_count).collect();
    for label in 0..label_count {
        sets.make_set(VertexId::new(label));
    }

    for operation in operations {
        match *operation {
            SetOperation::Union(a, b) => {
                let root = sets
                    .union(VertexId::new(a), VertexId::new(b))
                    .ok_or_else(|| TestCaseError::fail(format!("union({a}, {b}) lost a label")))?;
                if sets.find(VertexId::new(a)) != Some(root)
                    || sets.find(VertexId::new(b)) != Some(root)
                {
                    return Err(TestCaseError::fail(format!(
                        "union({a}, {b}) returned {root}, which is not the shared root"
                    )));
                }
                let (from, to) = (oracle[a], oracle[b]);
                for component in &mut oracle {
                    if *component == from {
                        *component = to;
                    }
                }
            }
            SetOperation::Find(a) => {
                let root = sets
                    .find(VertexId::new(a))
                    .ok_or_else(|| TestCaseError::fail(format!("find({a}) lost a label")))?;
                if sets.find(root) != Some(root) {
                    return Err(TestCaseError::fail(format!(
                        "representative {root} of {a} is not its own root"
                    )));
                }
            }
        }

        for i in 0..label_count {
            for j in (i + 1)..label_count {
                let same = sets.find(VertexId::new(i)) == sets.find(VertexId::new(j));
                if same != (oracle[i] == oracle[j]) {
                    return Err(TestCaseError::fail(format!(
                        "labels {i} and {j} disagree with the oracle after {operation:?}"
                    )));
                }
            }
        }
    }
    Ok(())
}
