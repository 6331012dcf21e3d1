use nalgebra::Point3;

use super::body::BodySpec;

/// The part of the rendering engine the orrery talks to. A node is created
/// for every body when the tree is built, and told where to go every step.
pub trait BodyNode: Sized {
    /// Create a node for `spec` and attach it under this one.
    fn attach_child(&mut self, spec: &BodySpec) -> Self;

    /// Place this node in its parent's frame.
    fn set_local_position(&mut self, position: &Point3<f64>);
}

// Headless node, for when nothing is being drawn.
impl BodyNode for () {
    fn attach_child(&mut self, _: &BodySpec) -> Self {}

    fn set_local_position(&mut self, _: &Point3<f64>) {}
}

/// Runtime state of one body. The children mirror `spec.moons` exactly, in
/// the same order, and are fixed once built.
#[derive(Debug)]
pub struct RenderableBody<'a, N> {
    spec: &'a BodySpec,
    // Accumulated, never wrapped
    angle: f64,
    // Relative to the parent; y is never touched
    position: Point3<f64>,
    node: N,
    moons: Vec<RenderableBody<'a, N>>,
}

impl<'a, N: BodyNode> RenderableBody<'a, N> {
    fn attach(spec: &'a BodySpec, parent: &mut N) -> Self {
        let mut node = parent.attach_child(spec);
        let position = Point3::new(spec.distance, 0.0, 0.0);
        node.set_local_position(&position);

        let moons = spec
            .moons
            .iter()
            .map(|moon| Self::attach(moon, &mut node))
            .collect();

        RenderableBody {
            spec,
            angle: 0.0,
            position,
            node,
            moons,
        }
    }

    fn advance(&mut self) {
        let spec = self.spec;
        self.advance_with(spec);
    }

    // Kinematics come from `spec` rather than self.spec, so the parallel-array
    // entry point can share this.
    fn advance_with(&mut self, spec: &BodySpec) {
        self.angle += spec.speed;
        self.position.x = spec.distance * self.angle.sin();
        self.position.z = spec.distance * self.angle.cos();
        self.node.set_local_position(&self.position);

        for (moon, moon_spec) in self.moons.iter_mut().zip(spec.moons.iter()) {
            moon.advance_with(moon_spec);
        }
    }
}

impl<'a, N> RenderableBody<'a, N> {
    pub fn spec(&self) -> &'a BodySpec {
        self.spec
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn moons(&self) -> &[RenderableBody<'a, N>] {
        &self.moons
    }
}

/// Creates the runtime tree for `specs`, attaching planets under `root` and
/// moons under their planet. Every body starts at angle 0, sitting at
/// `(distance, 0, 0)` in its parent's frame.
pub fn build<'a, N: BodyNode>(specs: &'a [BodySpec], root: &mut N) -> Vec<RenderableBody<'a, N>> {
    specs
        .iter()
        .map(|spec| RenderableBody::attach(spec, root))
        .collect()
}

/// Advances every body, moons included, by one step.
///
/// Each call adds `speed` to the angle no matter how much time has passed, so
/// on-screen speed follows the frame rate. The elapsed time is accepted so
/// hosts can pass their clock through, but it does not affect the motion.
pub fn step<N: BodyNode>(_elapsed: f64, bodies: &mut [RenderableBody<'_, N>]) {
    for body in bodies.iter_mut() {
        body.advance();
    }
}

/// Same as [`step`], but takes the kinematics from a separate spec slice,
/// matched to `roots` by index (and likewise for moons). The two must be in
/// lockstep; this is not checked beyond a debug assertion.
pub fn step_paired<N: BodyNode>(
    _elapsed: f64,
    roots: &mut [RenderableBody<'_, N>],
    specs: &[BodySpec],
) {
    debug_assert_eq!(roots.len(), specs.len());
    for (body, spec) in roots.iter_mut().zip(specs.iter()) {
        body.advance_with(spec);
    }
}

/// Number of bodies in the tree, moons included.
pub fn count<N>(bodies: &[RenderableBody<'_, N>]) -> usize {
    bodies.iter().map(|b| 1 + count(&b.moons)).sum()
}

/// Follows `path` (an index at each level) down the tree and adds up the
/// local positions on the way, giving the position relative to the root.
/// Returns `None` if the path leaves the tree.
pub fn world_position<N>(bodies: &[RenderableBody<'_, N>], path: &[usize]) -> Option<Point3<f64>> {
    let mut level = bodies;
    let mut position: Point3<f64> = Point3::origin();
    for &idx in path {
        let body = level.get(idx)?;
        position += body.position.coords;
        level = &body.moons;
    }
    Some(position)
}

/// Calls `f` on every body along with the root-relative position of the
/// point it orbits. Parents are visited before their moons.
pub fn visit_orbits<'a, N, F>(bodies: &[RenderableBody<'a, N>], mut f: F)
where
    F: FnMut(&Point3<f64>, &RenderableBody<'a, N>),
{
    fn helper<'a, N, F>(bodies: &[RenderableBody<'a, N>], center: &Point3<f64>, f: &mut F)
    where
        F: FnMut(&Point3<f64>, &RenderableBody<'a, N>),
    {
        for body in bodies {
            f(center, body);
            let body_center = center + body.position.coords;
            helper(&body.moons, &body_center, f);
        }
    }

    helper(bodies, &Point3::origin(), &mut f);
}
