//! Winding consistency correction.
//!
//! Starting from the first face, a breadth-first walk over the face graph
//! checks every newly reached face against the face that discovered it. Two
//! consistently wound neighbours walk their shared edge in opposite
//! directions; a candidate that walks it the same way is flipped.
//!
//! The walk only decides against the discovering neighbour, never against all
//! neighbours at once, and faces that cannot be reached from the seed keep
//! whatever winding they had. Both limitations are reported in the
//! [`WindingReport`] rather than treated as errors.

use std::{collections::VecDeque, sync::Arc};

use crate::{
    data_structures::{
        face::{Face, FaceGraph, FaceId},
        mesh::TriMesh,
    },
    error::{GeometryResult, GeometryWarning},
};

/// Outcome of a winding correction pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WindingReport {
    /// Faces whose corner order was reversed, in the order they were fixed.
    pub flipped: Vec<FaceId>,
    /// Faces that could not be reached from the seed face.
    pub unreached: Vec<FaceId>,
}

impl WindingReport {
    pub fn flip_count(&self) -> usize {
        self.flipped.len()
    }

    /// Every face was reached from the seed face.
    pub fn is_complete(&self) -> bool {
        self.unreached.is_empty()
    }

    pub fn warning(&self) -> Option<GeometryWarning> {
        (!self.unreached.is_empty()).then(|| GeometryWarning::DisconnectedComponents {
            unreached: self.unreached.len(),
        })
    }
}

/// Make the winding of every face reachable from face 0 agree with face 0.
///
/// Only the faces inside `graph` are touched. Use [`TriMesh::apply_faces`] (or
/// [`orient`]) to write the result back into a mesh.
pub fn correct_winding(graph: &mut FaceGraph) -> WindingReport {
    let mut report = WindingReport::default();
    let count = graph.len();
    if count == 0 {
        return report;
    }

    let mut checked = vec![false; count];
    let mut queued = vec![false; count];
    // (candidate, the checked face that discovered it)
    let mut frontier: VecDeque<(FaceId, FaceId)> = VecDeque::new();

    checked[0] = true;
    queued[0] = true;
    enqueue_neighbors(graph.face(0), 0, &checked, &mut queued, &mut frontier);

    while let Some((candidate, reference)) = frontier.pop_front() {
        if checked[candidate] {
            continue;
        }
        let faces = graph.faces_mut();
        match walks_shared_edge_alike(&faces[reference], &faces[candidate]) {
            Some(true) => {
                faces[candidate].flip();
                report.flipped.push(candidate);
            }
            Some(false) => {}
            None => log::debug!(
                "face {} shares no edge with face {}, keeping its winding",
                candidate,
                reference
            ),
        }
        checked[candidate] = true;
        enqueue_neighbors(
            graph.face(candidate),
            candidate,
            &checked,
            &mut queued,
            &mut frontier,
        );
    }

    report.unreached = (0..count).filter(|&id| !checked[id]).collect();
    if let Some(warning) = report.warning() {
        log::warn!("{}", warning);
    }
    log::debug!(
        "winding pass over {} faces flipped {}",
        count,
        report.flip_count()
    );
    report
}

fn enqueue_neighbors(
    face: &Face,
    id: FaceId,
    checked: &[bool],
    queued: &mut [bool],
    frontier: &mut VecDeque<(FaceId, FaceId)>,
) {
    for neighbor in face.neighbors() {
        if !checked[neighbor] && !queued[neighbor] {
            queued[neighbor] = true;
            frontier.push_back((neighbor, id));
        }
    }
}

/// Whether `candidate` walks the edge it shares with `reference` in the same
/// direction as `reference` does. `None` if they share fewer than two corners.
fn walks_shared_edge_alike(reference: &Face, candidate: &Face) -> Option<bool> {
    let pattern = reference.match_pattern(candidate);
    let mut matched = (0..3).filter(|&i| pattern[i].is_some());
    let (first, second) = (matched.next()?, matched.next()?);
    // `first < second`, so the reference walks first -> second unless they are corners 0 and 2
    let (from, to) = if (first + 1) % 3 == second {
        (first, second)
    } else {
        (second, first)
    };
    let (from, to) = (pattern[from]?, pattern[to]?);
    Some((from + 1) % 3 == to)
}

/// A mesh whose winding has been corrected and which can no longer be mutated.
#[derive(Clone, Debug)]
pub struct OrientedMesh {
    pub mesh: Arc<TriMesh>,
    pub graph: FaceGraph,
    pub report: WindingReport,
}

/// Build the face graph, correct the winding and freeze the result.
///
/// The mesh is only shared (behind an [`Arc`]) after indices and normals have
/// been rewritten, so readers never see a half corrected mesh.
pub fn orient(mut mesh: TriMesh) -> GeometryResult<OrientedMesh> {
    let mut graph = FaceGraph::build(&mesh)?;
    let report = correct_winding(&mut graph);
    mesh.apply_faces(graph.faces())?;
    Ok(OrientedMesh {
        mesh: Arc::new(mesh),
        graph,
        report,
    })
}
