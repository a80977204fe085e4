//! Directional penetration depth by shadow convolution.
//!
//! Given overlapping convex polygons P and Q and a direction `u`, the
//! penetration vector is the shortest translation `t·u` (with `t ≥ 0`) after
//! which P and Q no longer overlap. Unlike the SAT minimum translation vector
//! it is restricted to one direction, so it is never shorter than the MTV.
//!
//! ## Method
//!
//! Anchor both polygons at their lowest vertex, `P = P0 + x` and `Q = Q0 + y`.
//! Then `P + t·u` overlaps `Q` exactly while `w − t·u` lies in
//! `N = P0 ⊕ (−Q0)`, where `w = y − x`. `N` is the intersection of its left
//! and right shadows, so the answer is the nearer of two exits:
//!
//! - **Forward run**: the ray from `w` along `−u` leaving the left shadow of
//!   `N`, whose boundary is the convolution of P0's right chain with Q0's
//!   negated left chain.
//! - **Swapped run**: the ray from `−w` along `u` leaving the left shadow of
//!   `−N`, built the same way with P and Q exchanged.
//!
//! Neither convolution is built. The search keeps an edge window on each
//! chain, tests the median edge of each at its position in the merged
//! chain, and discards the halves lying before or after the exit. Once one
//! window is empty the other chain is searched alone against a re-anchored
//! ray. Each run is O(log n · log m).
//!
//! ## Example
//!
//! ```rust
//! use u_collide_d2::{Line, PenetrationSolver, Point, Polygon};
//!
//! let p = Polygon::aabb(0.0, 0.0, 2.0, 2.0).unwrap();
//! let q = Polygon::aabb(1.5, 0.0, 2.0, 2.0).unwrap();
//! let horizontal = Line::through(Point::new(0.0, 0.0), Point::new(1.0, 0.0)).unwrap();
//!
//! let solver = PenetrationSolver::default();
//! // Push P toward -x until it clears Q.
//! let v = solver.penetration_vector(&p, &q, &horizontal, false).unwrap();
//! assert!((v.vx() + 0.5).abs() < 1e-9);
//! ```

use std::cell::RefCell;

use crate::line::{Line, Ray};
use crate::polygon::Polygon;
use crate::sat;
use crate::segment::Segment;
use crate::shadow::Chain;
use crate::trace::{Phase, Run, SolverStep, SolverTrace, StepCallback};
use crate::vector::{Point, Vector2};
use u_collide_core::{Config, Error, Result};

/// How a ray relates to a shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowExit {
    /// The ray leaves the shadow at this point.
    Exit(Point),
    /// The ray runs toward `x = −∞` between the caps and never leaves.
    Unbounded,
    /// The ray does not start strictly inside the shadow.
    Outside,
    /// The search ran out of candidate edges.
    Exhausted,
}

/// Where the exit lies relative to a tested convolution edge.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Verdict {
    Before,
    Hit(Point),
    After,
}

/// An edge of the merged chain, named by the chain that contributes it.
#[derive(Debug, Clone, Copy)]
enum ConvEdge {
    A(usize),
    B(usize),
}

/// Implicit Minkowski sum of two chains.
///
/// Merge order: by angle, with A's edge first on ties. Vertex `(i, j)` is
/// reached after `i` edges of A and `j` edges of B.
struct Convolution<'a> {
    a: &'a Chain,
    b: &'a Chain,
}

impl Convolution<'_> {
    fn vertex(&self, i: usize, j: usize) -> Point {
        self.a.vertex(i) + self.b.vertex(j).to_vector()
    }

    fn bottom(&self) -> Point {
        self.vertex(0, 0)
    }

    fn top(&self) -> Point {
        self.vertex(self.a.edge_count(), self.b.edge_count())
    }

    fn segment(&self, edge: ConvEdge) -> Result<Segment> {
        let (start, step) = match edge {
            ConvEdge::A(i) => (
                self.vertex(i, self.b.count_below(self.a.angle(i))),
                self.a.edge(i),
            ),
            ConvEdge::B(j) => (
                self.vertex(self.a.count_up_to(self.b.angle(j)), j),
                self.b.edge(j),
            ),
        };
        Segment::new(start, start + step)
    }

    /// Shrinks the windows once the exit is known to lie before or after
    /// `edge`. Every edge on the wrong side of `edge` in merge order goes.
    fn cut(
        &self,
        edge: ConvEdge,
        verdict: Verdict,
        a_win: &mut (usize, usize),
        b_win: &mut (usize, usize),
    ) {
        match (edge, verdict) {
            (ConvEdge::A(i), Verdict::Before) => {
                a_win.1 = i;
                b_win.1 = b_win.1.min(self.b.count_below(self.a.angle(i)));
            }
            (ConvEdge::A(i), Verdict::After) => {
                a_win.0 = i + 1;
                b_win.0 = b_win.0.max(self.b.count_below(self.a.angle(i)));
            }
            (ConvEdge::B(j), Verdict::Before) => {
                b_win.1 = j;
                a_win.1 = a_win.1.min(self.a.count_up_to(self.b.angle(j)));
            }
            (ConvEdge::B(j), Verdict::After) => {
                b_win.0 = j + 1;
                a_win.0 = a_win.0.max(self.a.count_up_to(self.b.angle(j)));
            }
            (_, Verdict::Hit(_)) => {}
        }
    }
}

/// Which chain a single-chain search runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

/// Computes SAT minimum translation vectors and directional penetration
/// vectors between convex polygons.
pub struct PenetrationSolver {
    config: Config,
    callback: Option<StepCallback>,
}

impl Default for PenetrationSolver {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl PenetrationSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            callback: None,
        }
    }

    /// Installs a callback that receives every search step.
    pub fn with_step_callback(mut self, callback: StepCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// SAT minimum translation vector pushing `p` out of `q`, or zero when
    /// they do not overlap. See [`sat::overlap_test`].
    pub fn overlap_test(&self, p: &Polygon, q: &Polygon) -> Vector2 {
        sat::overlap_test(p, q, self.config.epsilon)
    }

    /// The shortest translation of `p` along `direction` that ends all
    /// overlap with `q`.
    ///
    /// `orient` picks the sense of travel along the line: `true` moves from
    /// negative toward positive x (toward positive y for a vertical line).
    /// Non-overlapping polygons give the zero vector.
    ///
    /// # Errors
    ///
    /// - [`Error::NonConvexInput`] if either polygon is not convex.
    /// - [`Error::InvariantViolation`] if SAT reports overlap but neither
    ///   shadow search finds an exit.
    pub fn penetration_vector(
        &self,
        p: &Polygon,
        q: &Polygon,
        direction: &Line,
        orient: bool,
    ) -> Result<Vector2> {
        self.solve(p, q, direction, orient, &|step| self.notify(step))
    }

    /// Like [`PenetrationSolver::penetration_vector`], also returning every
    /// search step for replay.
    pub fn trace(
        &self,
        p: &Polygon,
        q: &Polygon,
        direction: &Line,
        orient: bool,
    ) -> Result<SolverTrace> {
        let steps = RefCell::new(Vec::new());
        let vector = self.solve(p, q, direction, orient, &|step: &SolverStep| {
            self.notify(step);
            steps.borrow_mut().push(step.clone());
        })?;
        Ok(SolverTrace {
            vector,
            steps: steps.into_inner(),
        })
    }

    /// Searches the convolution of two chains for the exit of the ray from
    /// `w` along `direction`, returning `exit − w`.
    ///
    /// `a` and `b` bound two left shadows; their convolution bounds the
    /// left shadow of the sum. The zero vector means no exit: `w` is not
    /// strictly inside, or the ray heads to `x = −∞`.
    pub fn search_convolution(
        &self,
        a: &Chain,
        b: &Chain,
        w: Point,
        direction: &Line,
        orient: bool,
    ) -> Result<Vector2> {
        let ray = Ray::new(w, direction, orient);
        match self.shadow_exit(a, b, &ray, Run::Forward, &|step| self.notify(step))? {
            ShadowExit::Exit(exit) => Ok(exit - w),
            _ => Ok(Vector2::zero()),
        }
    }

    fn notify(&self, step: &SolverStep) {
        if let Some(callback) = &self.callback {
            callback(step);
        }
    }

    fn solve(
        &self,
        p: &Polygon,
        q: &Polygon,
        direction: &Line,
        orient: bool,
        observer: &dyn Fn(&SolverStep),
    ) -> Result<Vector2> {
        self.config.validate()?;
        for (name, polygon) in [("P", p), ("Q", q)] {
            if !polygon.is_convex() {
                return Err(Error::NonConvexInput(format!(
                    "{} = {} is not convex",
                    name, polygon
                )));
            }
        }

        let mtv = self.overlap_test(p, q);
        if mtv.is_zero() {
            log::debug!("no overlap between {} and {}", p, q);
            return Ok(Vector2::zero());
        }

        let u = Ray::new(Point::origin(), direction, orient).direction();
        log::debug!("penetration along {} (SAT minimum {})", u, mtv);

        let (p0, x) = anchor_at_bottom(p);
        let (q0, y) = anchor_at_bottom(q);

        // P + t·u overlaps Q while (y − x) − t·u stays inside P0 ⊕ (−Q0).
        let w = Point::origin() + (y - x);
        let forward = self.shadow_exit(
            &Chain::left_shadow(&p0)?,
            &Chain::inverted_right_shadow(&q0)?,
            &Ray::new(w, direction, !orient),
            Run::Forward,
            observer,
        )?;
        let forward_depth = exit_depth(forward, w, u.negate());

        // Equivalently (x − y) + t·u stays inside Q0 ⊕ (−P0).
        let w = Point::origin() + (x - y);
        let swapped = self.shadow_exit(
            &Chain::left_shadow(&q0)?,
            &Chain::inverted_right_shadow(&p0)?,
            &Ray::new(w, direction, orient),
            Run::Swapped,
            observer,
        )?;
        let swapped_depth = exit_depth(swapped, w, u);

        log::debug!("forward run {:?}, swapped run {:?}", forward, swapped);

        let outside =
            matches!(forward, ShadowExit::Outside) || matches!(swapped, ShadowExit::Outside);
        let depth = match (forward_depth, swapped_depth) {
            (Some(f), Some(s)) => Some(f.min(s)),
            (f, s) => f.or(s),
        };

        match depth {
            Some(t) if !outside => Ok(u.scale(t.max(0.0))),
            _ => {
                let message = format!(
                    "shadow search found no exit along {} although SAT reports overlap {}; \
                     P = {}, Q = {}, forward {:?}, swapped {:?}",
                    u, mtv, p, q, forward, swapped
                );
                log::warn!("{}", message);
                Err(Error::InvariantViolation(message))
            }
        }
    }

    /// Locates where `ray` leaves the left shadow bounded by the
    /// convolution of `a` and `b`.
    fn shadow_exit(
        &self,
        a: &Chain,
        b: &Chain,
        ray: &Ray,
        run: Run,
        observer: &dyn Fn(&SolverStep),
    ) -> Result<ShadowExit> {
        let eps = self.config.epsilon;
        let conv = Convolution { a, b };
        let (bottom, top) = (conv.bottom(), conv.top());
        let w = ray.origin();
        let r = ray.direction();

        if w.y <= bottom.y + eps || w.y >= top.y - eps {
            log::trace!("{:?}: origin {} outside shadow height", run, w);
            return Ok(ShadowExit::Outside);
        }

        // Inside iff the boundary at the origin's height lies to its right.
        let probe = Ray::from_direction(w, Vector2::X_AXIS)?;
        match self.locate(&conv, &probe, false, run, Phase::Probe, observer)? {
            Some(boundary) if boundary.x - w.x > eps => {}
            other => {
                log::trace!("{:?}: origin {} outside shadow, boundary {:?}", run, w, other);
                return Ok(ShadowExit::Outside);
            }
        }

        if r.vy().abs() <= eps && r.vx() < 0.0 {
            return Ok(ShadowExit::Unbounded);
        }

        observer(
            &SolverStep::new(run, Phase::Caps)
                .with_iteration(1)
                .with_ray(*ray)
                .with_windows((0, a.edge_count()), (0, b.edge_count())),
        );
        if r.vy() < -eps {
            let hit = Point::new(w.x + r.vx() * (bottom.y - w.y) / r.vy(), bottom.y);
            if hit.x <= bottom.x + eps {
                return Ok(ShadowExit::Exit(hit));
            }
        } else if r.vy() > eps {
            let hit = Point::new(w.x + r.vx() * (top.y - w.y) / r.vy(), top.y);
            if hit.x <= top.x + eps {
                return Ok(ShadowExit::Exit(hit));
            }
        }

        Ok(
            match self.locate(&conv, ray, true, run, Phase::Convolution, observer)? {
                Some(exit) => ShadowExit::Exit(exit),
                None => ShadowExit::Exhausted,
            },
        )
    }

    /// Binary search over the convolution for the point where the line of
    /// `ray` crosses it. With `require_ahead`, crossings behind the origin
    /// are an invariant violation.
    fn locate(
        &self,
        conv: &Convolution<'_>,
        ray: &Ray,
        require_ahead: bool,
        run: Run,
        phase: Phase,
        observer: &dyn Fn(&SolverStep),
    ) -> Result<Option<Point>> {
        let (a, b) = (conv.a, conv.b);
        let mut a_win = (0, a.edge_count());
        let mut b_win = (0, b.edge_count());
        let mut iteration = 0;

        while a_win.0 < a_win.1 && b_win.0 < b_win.1 {
            iteration += 1;
            let i = (a_win.0 + a_win.1) / 2;
            let j = (b_win.0 + b_win.1) / 2;
            let (first, second) = if a.angle(i) <= b.angle(j) {
                (ConvEdge::A(i), ConvEdge::B(j))
            } else {
                (ConvEdge::B(j), ConvEdge::A(i))
            };
            let f = conv.segment(first)?;
            let g = conv.segment(second)?;

            log::trace!(
                "{:?} {:?} #{}: windows {:?} {:?}, f = {} -> {}, g = {} -> {}",
                run, phase, iteration, a_win, b_win, f.p1(), f.p2(), g.p1(), g.p2()
            );
            observer(
                &SolverStep::new(run, phase)
                    .with_iteration(iteration)
                    .with_ray(*ray)
                    .with_tested(vec![f, g])
                    .with_windows(a_win, b_win),
            );

            match self.verdict(&f, ray, require_ahead)? {
                Verdict::Hit(exit) => return Ok(Some(exit)),
                Verdict::Before => conv.cut(first, Verdict::Before, &mut a_win, &mut b_win),
                Verdict::After => {
                    conv.cut(first, Verdict::After, &mut a_win, &mut b_win);
                    match self.verdict(&g, ray, require_ahead)? {
                        Verdict::Hit(exit) => return Ok(Some(exit)),
                        verdict => conv.cut(second, verdict, &mut a_win, &mut b_win),
                    }
                }
            }
        }

        let phase = if phase == Phase::Probe {
            Phase::Probe
        } else {
            Phase::SingleChain
        };
        let a_fixed = a_win.0.min(a.edge_count());
        let b_fixed = b_win.0.min(b.edge_count());

        if a_win.0 < a_win.1 {
            let offset = b.vertex(b_fixed).to_vector();
            let found = self.locate_single(
                &a.slice(a_win.0..a_win.1)?,
                &ray.anchored_at(ray.origin() - offset),
                require_ahead,
                (Side::A, a_win.0, b_fixed),
                run,
                phase,
                observer,
            )?;
            return Ok(found.map(|p| p + offset));
        }
        if b_win.0 < b_win.1 {
            let offset = a.vertex(a_fixed).to_vector();
            let found = self.locate_single(
                &b.slice(b_win.0..b_win.1)?,
                &ray.anchored_at(ray.origin() - offset),
                require_ahead,
                (Side::B, b_win.0, a_fixed),
                run,
                phase,
                observer,
            )?;
            return Ok(found.map(|p| p + offset));
        }

        // Both windows are empty: only the vertex between them is left.
        let vertex = conv.vertex(a_fixed, b_fixed);
        Ok(self.on_ray(vertex, ray, require_ahead).then_some(vertex))
    }

    /// Binary search over a single chain. `layout` records which chain is
    /// searched, where the slice starts in it, and the other chain's fixed
    /// vertex, for step reporting.
    #[allow(clippy::too_many_arguments)]
    fn locate_single(
        &self,
        chain: &Chain,
        ray: &Ray,
        require_ahead: bool,
        layout: (Side, usize, usize),
        run: Run,
        phase: Phase,
        observer: &dyn Fn(&SolverStep),
    ) -> Result<Option<Point>> {
        let (side, base, fixed) = layout;
        let (mut lo, mut hi) = (0, chain.edge_count());
        let mut iteration = 0;

        while lo < hi {
            iteration += 1;
            let k = (lo + hi) / 2;
            let edge = Segment::new(chain.vertex(k), chain.vertex(k + 1))?;

            let searched = (base + lo, base + hi);
            let (a_win, b_win) = match side {
                Side::A => (searched, (fixed, fixed)),
                Side::B => ((fixed, fixed), searched),
            };
            log::trace!(
                "{:?} {:?} #{}: window {:?}, edge {} -> {}",
                run, phase, iteration, searched, edge.p1(), edge.p2()
            );
            observer(
                &SolverStep::new(run, phase)
                    .with_iteration(iteration)
                    .with_ray(*ray)
                    .with_tested(vec![edge])
                    .with_windows(a_win, b_win),
            );

            match self.verdict(&edge, ray, require_ahead)? {
                Verdict::Hit(exit) => return Ok(Some(exit)),
                Verdict::Before => hi = k,
                Verdict::After => lo = k + 1,
            }
        }

        let vertex = chain.vertex(lo);
        Ok(self.on_ray(vertex, ray, require_ahead).then_some(vertex))
    }

    /// Decides whether the ray leaves the shadow before, through, or after
    /// `edge`.
    fn verdict(&self, edge: &Segment, ray: &Ray, require_ahead: bool) -> Result<Verdict> {
        let eps = self.config.epsilon;
        let r = ray.direction();
        let e = edge.vector();

        // The ray can only leave through edges whose line it crosses from left
        // to right.
        if e.unit()?.cross(&r) < -eps {
            // Solve origin + s·r = p1 + t·e. The crossing is on the edge's line
            // by construction, so only its position along the edge matters.
            let d = edge.p1() - ray.origin();
            let denom = r.cross(&e);
            let s = d.cross(&e) / denom;
            let t = d.cross(&r) / denom;
            let tol = self.tolerance(&[edge.p1(), edge.p2(), ray.origin()]);

            if require_ahead && s < -tol {
                return Err(Error::InvariantViolation(format!(
                    "crossing at distance {} along ray from {} lies behind it, edge {} -> {}",
                    s,
                    ray.origin(),
                    edge.p1(),
                    edge.p2()
                )));
            }

            let slack = tol / e.length();
            return Ok(if t < -slack {
                Verdict::Before
            } else if t > 1.0 + slack {
                Verdict::After
            } else {
                Verdict::Hit(ray.origin() + r.scale(s))
            });
        }

        // Parallel to the edge or moving away from it: edges are ordered by
        // angle in [0, π), so the ray's heading alone says which side the exit
        // is on.
        if r.vy() > eps || (r.vy().abs() <= eps && r.vx() > 0.0) {
            Ok(Verdict::After)
        } else {
            Ok(Verdict::Before)
        }
    }

    fn on_ray(&self, p: Point, ray: &Ray, require_ahead: bool) -> bool {
        let tol = self.tolerance(&[p, ray.origin()]);
        let offset = p - ray.origin();
        let r = ray.direction();
        r.cross(&offset).abs() <= tol && (!require_ahead || offset.dot(&r) >= -tol)
    }

    /// Distance tolerance for comparisons among `points`: epsilon, grown with
    /// the largest coordinate once that exceeds 1.
    fn tolerance(&self, points: &[Point]) -> f64 {
        let magnitude = points
            .iter()
            .fold(1.0_f64, |m, p| m.max(p.x.abs()).max(p.y.abs()));
        self.config.epsilon * magnitude
    }
}

/// Computes the penetration vector with the default configuration.
///
/// See [`PenetrationSolver::penetration_vector`].
pub fn penetration_vector(
    p: &Polygon,
    q: &Polygon,
    direction: &Line,
    orient: bool,
) -> Result<Vector2> {
    PenetrationSolver::default().penetration_vector(p, q, direction, orient)
}

// ============================================================================
// Helper functions
// ============================================================================

/// Normalizes `polygon` and moves its lowest vertex to the origin. Returns
/// the moved copy and the vertex's original position.
fn anchor_at_bottom(polygon: &Polygon) -> (Polygon, Point) {
    let normalized = polygon.normalize_vertex_order();
    let anchor = normalized.vertex(0);
    (normalized.translated(Point::origin() - anchor), anchor)
}

/// Distance travelled along `heading` from `w` to the exit, if there is one.
fn exit_depth(exit: ShadowExit, w: Point, heading: Vector2) -> Option<f64> {
    match exit {
        ShadowExit::Exit(e) => Some((e - w).dot(&heading)),
        _ => None,
    }
}
