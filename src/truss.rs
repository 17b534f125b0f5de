//! Topology model: joints, beams and the incidence relation between them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use nalgebra::Vector2;
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};

use crate::errors::TopologyError;
use crate::geometry::{Force, Point};

/// Identifier of a joint as it appears in the input data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JointId(pub u32);

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Identifier of a beam as it appears in the input data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BeamId(pub u32);

impl fmt::Display for BeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Support condition of a joint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Support {
    /// The joint is free to move; no reaction is available.
    #[default]
    Free,
    /// The joint is pinned; both translational reactions are unknowns.
    Pinned,
}

impl Support {
    /// Return `true` for a pinned joint.
    #[must_use]
    pub fn is_pinned(self) -> bool {
        matches!(self, Support::Pinned)
    }

    /// Number of reaction components this condition introduces.
    #[must_use]
    pub fn reaction_count(self) -> usize {
        match self {
            Support::Free => 0,
            Support::Pinned => 2,
        }
    }
}

/// A pin joint of the truss.
#[derive(Clone, Debug, PartialEq)]
pub struct Joint {
    /// Identifier from the input data.
    id: JointId,
    /// Position of the joint.
    position: Point,
    /// External load applied to the joint.
    load: Force,
    /// Whether the joint is pinned to the ground.
    support: Support,
    /// Beams with this joint as one of their endpoints.
    beams: BTreeSet<BeamId>,
}

impl Joint {
    /// Identifier of the joint.
    #[must_use]
    pub fn id(&self) -> JointId {
        self.id
    }

    /// Position of the joint.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// External load applied to the joint.
    #[must_use]
    pub fn load(&self) -> Force {
        self.load
    }

    /// Support condition of the joint.
    #[must_use]
    pub fn support(&self) -> Support {
        self.support
    }

    /// Beams incident to the joint, in ascending id order.
    #[must_use]
    pub fn beams(&self) -> &BTreeSet<BeamId> {
        &self.beams
    }
}

/// A two-force member connecting endpoint A to endpoint B.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Beam {
    /// Identifier from the input data.
    id: BeamId,
    /// Endpoint A.
    start: JointId,
    /// Endpoint B.
    end: JointId,
}

/// Collects joints and beams before the incidence relation is built.
///
/// # Examples
/// ```
/// use trusseq::{force, point, BeamId, JointId, Support, TrussBuilder};
///
/// let mut builder = TrussBuilder::new();
/// builder.add_joint(JointId(1), point(0.0, 0.0), force(0.0, 0.0), Support::Pinned)?;
/// builder.add_joint(JointId(2), point(1.0, 0.0), force(0.0, -5.0), Support::Free)?;
/// builder.add_beam(BeamId(1), JointId(1), JointId(2))?;
/// let truss = builder.build()?;
/// assert_eq!(truss.joint_count(), 2);
/// # Ok::<(), trusseq::TopologyError>(())
/// ```
#[derive(Debug, Default)]
pub struct TrussBuilder {
    /// Joints keyed by id; the empty incidence sets are filled by [`TrussBuilder::build`].
    joints: BTreeMap<JointId, Joint>,
    /// Beam endpoints keyed by beam id.
    beams: BTreeMap<BeamId, (JointId, JointId)>,
}

impl TrussBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a joint.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::ZeroId`], [`TopologyError::DuplicateJoint`] or
    /// [`TopologyError::NonFiniteJoint`] when the joint is rejected.
    pub fn add_joint(
        &mut self,
        id: JointId,
        position: Point,
        load: Force,
        support: Support,
    ) -> Result<&mut Self, TopologyError> {
        if id.0 == 0 {
            return Err(TopologyError::ZeroId("joint"));
        }
        if self.joints.contains_key(&id) {
            return Err(TopologyError::DuplicateJoint(id));
        }
        if !position.is_finite() || !load.is_finite() {
            return Err(TopologyError::NonFiniteJoint(id));
        }
        self.joints.insert(
            id,
            Joint {
                id,
                position,
                load,
                support,
                beams: BTreeSet::new(),
            },
        );
        Ok(self)
    }

    /// Add a beam from endpoint `start` (A) to endpoint `end` (B).
    ///
    /// The endpoints only have to exist once [`TrussBuilder::build`] runs, so
    /// beams may be added before their joints.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::ZeroId`], [`TopologyError::DuplicateBeam`] or
    /// [`TopologyError::DegenerateBeam`] when the beam is rejected.
    pub fn add_beam(
        &mut self,
        id: BeamId,
        start: JointId,
        end: JointId,
    ) -> Result<&mut Self, TopologyError> {
        if id.0 == 0 {
            return Err(TopologyError::ZeroId("beam"));
        }
        if self.beams.contains_key(&id) {
            return Err(TopologyError::DuplicateBeam(id));
        }
        if start == end {
            return Err(TopologyError::DegenerateBeam {
                beam: id,
                joint: start,
            });
        }
        self.beams.insert(id, (start, end));
        Ok(self)
    }

    /// Validate the beams against the joints and build the incidence relation.
    ///
    /// Joints and beams are stored in ascending id order, so the graph index
    /// of every record is its 0-based rank by id.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownJoint`] when a beam names a missing joint
    /// and [`TopologyError::ZeroLengthBeam`] when its endpoints coincide.
    pub fn build(self) -> Result<Truss, TopologyError> {
        let mut truss = Truss::default();
        for (id, joint) in self.joints {
            let node = truss.graph.add_node(joint);
            truss.joints.insert(id, node);
        }
        for (id, (start, end)) in self.beams {
            let a = truss.node(id, start)?;
            let b = truss.node(id, end)?;
            if length(truss.graph[b].position.to_vector() - truss.graph[a].position.to_vector())
                == 0.0
            {
                return Err(TopologyError::ZeroLengthBeam(id));
            }
            let edge = truss.graph.add_edge(a, b, Beam { id, start, end });
            truss.beams.insert(id, edge);
        }
        truss.build_incidence();
        log::debug!(
            "built truss with {} joints, {} beams and {} supports",
            truss.joint_count(),
            truss.beam_count(),
            truss.support_count()
        );
        Ok(truss)
    }
}

/// Immutable pin-jointed plane truss.
#[derive(Clone, Debug, Default)]
pub struct Truss {
    /// Joints as nodes and beams as edges directed from endpoint A to endpoint B.
    graph: Graph<Joint, Beam>,
    /// Graph node of every joint id.
    joints: BTreeMap<JointId, NodeIndex>,
    /// Graph edge of every beam id.
    beams: BTreeMap<BeamId, EdgeIndex>,
}

impl Truss {
    /// Start building a truss.
    #[must_use]
    pub fn builder() -> TrussBuilder {
        TrussBuilder::new()
    }

    /// Return the number of joints in the truss.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of beams in the truss.
    #[must_use]
    pub fn beam_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return the number of pinned joints.
    #[must_use]
    pub fn support_count(&self) -> usize {
        self.graph
            .node_weights()
            .filter(|joint| joint.support.is_pinned())
            .count()
    }

    /// Look up a joint by id.
    #[must_use]
    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(&id).map(|&node| &self.graph[node])
    }

    /// Iterate over the joints in ascending id order.
    pub fn joints(&self) -> impl Iterator<Item = &Joint> + '_ {
        self.graph.node_weights()
    }

    /// Iterate over the pinned joints in ascending id order.
    pub fn supports(&self) -> impl Iterator<Item = &Joint> + '_ {
        self.joints().filter(|joint| joint.support.is_pinned())
    }

    /// Iterate over the beam ids in ascending order.
    pub fn beam_ids(&self) -> impl Iterator<Item = BeamId> + '_ {
        self.beams.keys().copied()
    }

    /// Return endpoint A and endpoint B of a beam.
    #[must_use]
    pub fn beam_endpoints(&self, id: BeamId) -> Option<(JointId, JointId)> {
        self.beams.get(&id).map(|&edge| {
            let beam = self.graph[edge];
            (beam.start, beam.end)
        })
    }

    /// Return the beams incident to a joint.
    #[must_use]
    pub fn incident_beams(&self, id: JointId) -> Option<&BTreeSet<BeamId>> {
        self.joint(id).map(Joint::beams)
    }

    /// Return the 0-based rank of a joint when joints are ordered by id.
    #[must_use]
    pub fn joint_rank(&self, id: JointId) -> Option<usize> {
        self.joints.get(&id).map(|node| node.index())
    }

    /// Return the unit vector pointing from endpoint A to endpoint B of a beam.
    #[must_use]
    pub fn beam_direction(&self, id: BeamId) -> Option<Vector2<f64>> {
        let &edge = self.beams.get(&id)?;
        let (a, b) = self.graph.edge_endpoints(edge)?;
        let delta = self.graph[b].position.to_vector() - self.graph[a].position.to_vector();
        Some(delta / length(delta))
    }

    /// Iterate over every beam with the positions of endpoint A and endpoint B.
    ///
    /// This is the read-only geometry handed to plotting front ends.
    pub fn segments(&self) -> impl Iterator<Item = (BeamId, Point, Point)> + '_ {
        self.beams.iter().filter_map(move |(&id, &edge)| {
            let (a, b) = self.graph.edge_endpoints(edge)?;
            Some((id, self.graph[a].position, self.graph[b].position))
        })
    }

    /// Resolve the graph node of `joint` on behalf of `beam`.
    fn node(&self, beam: BeamId, joint: JointId) -> Result<NodeIndex, TopologyError> {
        self.joints
            .get(&joint)
            .copied()
            .ok_or(TopologyError::UnknownJoint { beam, joint })
    }

    /// Record every beam in the incident sets of both of its endpoints.
    fn build_incidence(&mut self) {
        let links: Vec<(NodeIndex, NodeIndex, BeamId)> = self
            .graph
            .edge_indices()
            .filter_map(|edge| {
                let (a, b) = self.graph.edge_endpoints(edge)?;
                Some((a, b, self.graph[edge].id))
            })
            .collect();
        for (a, b, id) in links {
            self.graph[a].beams.insert(id);
            self.graph[b].beams.insert(id);
        }
    }
}

/// Euclidean length of `delta` without overflowing for large coordinates.
fn length(delta: Vector2<f64>) -> f64 {
    delta.x.hypot(delta.y)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::{force, point};

    fn triangle_builder() -> TrussBuilder {
        let mut builder = TrussBuilder::new();
        builder
            .add_joint(JointId(1), point(0.0, 0.0), force(0.0, 0.0), Support::Pinned)
            .expect("joint accepted");
        builder
            .add_joint(JointId(2), point(4.0, 0.0), force(0.0, 0.0), Support::Free)
            .expect("joint accepted");
        builder
            .add_joint(JointId(3), point(2.0, 3.0), force(0.0, -10.0), Support::Free)
            .expect("joint accepted");
        builder
            .add_beam(BeamId(1), JointId(1), JointId(2))
            .expect("beam accepted");
        builder
            .add_beam(BeamId(2), JointId(2), JointId(3))
            .expect("beam accepted");
        builder
            .add_beam(BeamId(3), JointId(3), JointId(1))
            .expect("beam accepted");
        builder
    }

    #[test]
    fn incidence_sets_match_beam_endpoints() {
        let truss = triangle_builder().build().expect("valid truss");
        let expected = |ids: &[u32]| ids.iter().copied().map(BeamId).collect::<BTreeSet<_>>();
        assert_eq!(truss.incident_beams(JointId(1)), Some(&expected(&[1, 3])));
        assert_eq!(truss.incident_beams(JointId(2)), Some(&expected(&[1, 2])));
        assert_eq!(truss.incident_beams(JointId(3)), Some(&expected(&[2, 3])));
        assert_eq!(truss.incident_beams(JointId(4)), None);

        for id in truss.beam_ids() {
            let (a, b) = truss.beam_endpoints(id).expect("beam exists");
            for joint in truss.joints() {
                let touches = joint.id() == a || joint.id() == b;
                assert_eq!(joint.beams().contains(&id), touches);
            }
        }
    }

    #[test]
    fn counts_reflect_loaded_data() {
        let truss = triangle_builder().build().expect("valid truss");
        assert_eq!(truss.joint_count(), 3);
        assert_eq!(truss.beam_count(), 3);
        assert_eq!(truss.support_count(), 1);
        assert_eq!(
            truss.supports().map(Joint::id).collect::<Vec<_>>(),
            vec![JointId(1)]
        );
    }

    #[test]
    fn ranks_follow_ascending_ids_regardless_of_insertion_order() {
        let mut builder = TrussBuilder::new();
        for id in [30, 10, 20] {
            builder
                .add_joint(
                    JointId(id),
                    point(f64::from(id), 0.0),
                    force(0.0, 0.0),
                    Support::Free,
                )
                .expect("joint accepted");
        }
        let truss = builder.build().expect("valid truss");
        assert_eq!(truss.joint_rank(JointId(10)), Some(0));
        assert_eq!(truss.joint_rank(JointId(20)), Some(1));
        assert_eq!(truss.joint_rank(JointId(30)), Some(2));
        let ids: Vec<JointId> = truss.joints().map(Joint::id).collect();
        assert_eq!(ids, vec![JointId(10), JointId(20), JointId(30)]);
    }

    #[test]
    fn unknown_endpoint_is_a_topology_error() {
        let mut builder = triangle_builder();
        builder
            .add_beam(BeamId(4), JointId(3), JointId(9))
            .expect("endpoint existence is checked later");
        let error = builder.build().expect_err("missing joint rejected");
        assert_eq!(
            error,
            TopologyError::UnknownJoint {
                beam: BeamId(4),
                joint: JointId(9)
            }
        );
    }

    #[test]
    fn invalid_records_are_rejected() {
        let mut builder = triangle_builder();
        assert_eq!(
            builder
                .add_beam(BeamId(5), JointId(2), JointId(2))
                .expect_err("degenerate beam rejected"),
            TopologyError::DegenerateBeam {
                beam: BeamId(5),
                joint: JointId(2)
            }
        );
        assert_eq!(
            builder
                .add_beam(BeamId(1), JointId(1), JointId(3))
                .expect_err("duplicate beam rejected"),
            TopologyError::DuplicateBeam(BeamId(1))
        );
        assert_eq!(
            builder
                .add_joint(JointId(2), point(9.0, 9.0), force(0.0, 0.0), Support::Free)
                .expect_err("duplicate joint rejected"),
            TopologyError::DuplicateJoint(JointId(2))
        );
        assert_eq!(
            builder
                .add_joint(JointId(0), point(9.0, 9.0), force(0.0, 0.0), Support::Free)
                .expect_err("zero id rejected"),
            TopologyError::ZeroId("joint")
        );
        assert_eq!(
            builder
                .add_beam(BeamId(0), JointId(1), JointId(2))
                .expect_err("zero id rejected"),
            TopologyError::ZeroId("beam")
        );
        assert_eq!(
            builder
                .add_joint(JointId(8), point(f64::NAN, 0.0), force(0.0, 0.0), Support::Free)
                .expect_err("NaN rejected"),
            TopologyError::NonFiniteJoint(JointId(8))
        );
    }

    #[test]
    fn coincident_endpoints_are_rejected() {
        let mut builder = triangle_builder();
        builder
            .add_joint(JointId(4), point(2.0, 3.0), force(0.0, 0.0), Support::Free)
            .expect("joint accepted");
        builder
            .add_beam(BeamId(4), JointId(3), JointId(4))
            .expect("beam accepted");
        let error = builder.build().expect_err("zero length rejected");
        assert_eq!(error, TopologyError::ZeroLengthBeam(BeamId(4)));
    }

    #[test]
    fn direction_points_from_start_to_end() {
        let truss = triangle_builder().build().expect("valid truss");
        let direction = truss.beam_direction(BeamId(2)).expect("beam exists");
        let length = 13.0_f64.sqrt();
        assert_relative_eq!(direction.x, -2.0 / length, epsilon = 1.0e-12);
        assert_relative_eq!(direction.y, 3.0 / length, epsilon = 1.0e-12);
        assert_relative_eq!(direction.norm(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn direction_survives_huge_coordinates() {
        let mut builder = TrussBuilder::new();
        builder
            .add_joint(JointId(1), point(0.0, 0.0), force(0.0, 0.0), Support::Pinned)
            .expect("joint accepted");
        builder
            .add_joint(JointId(2), point(3.0e200, 4.0e200), force(0.0, 0.0), Support::Free)
            .expect("joint accepted");
        builder
            .add_beam(BeamId(1), JointId(1), JointId(2))
            .expect("beam accepted");
        let truss = builder.build().expect("beam has a length");
        let direction = truss.beam_direction(BeamId(1)).expect("beam exists");
        assert_relative_eq!(direction.x, 0.6, epsilon = 1.0e-12);
        assert_relative_eq!(direction.y, 0.8, epsilon = 1.0e-12);
    }

    #[test]
    fn segments_expose_endpoint_positions() {
        let truss = triangle_builder().build().expect("valid truss");
        let segments: Vec<_> = truss.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], (BeamId(1), point(0.0, 0.0), point(4.0, 0.0)));
        assert_eq!(segments[2], (BeamId(3), point(2.0, 3.0), point(0.0, 0.0)));
    }
}
