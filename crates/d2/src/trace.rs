//! Step notifications from the penetration search.
//!
//! A [`StepCallback`] receives one [`SolverStep`] per probe of the search.
//! Visualizers can draw each step as it happens, or run
//! [`PenetrationSolver::trace`](crate::PenetrationSolver::trace) and replay
//! the collected [`SolverTrace`] at their own pace.

use crate::line::Ray;
use crate::segment::Segment;
use crate::vector::Vector2;

/// Callback invoked once per search step.
pub type StepCallback = Box<dyn Fn(&SolverStep) + Send + Sync>;

/// Which of the two symmetric shadow searches produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Run {
    /// Left shadow of P against the inverted right shadow of Q.
    #[default]
    Forward,
    /// Left shadow of Q against the inverted right shadow of P.
    Swapped,
}

/// Stage of the search a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Horizontal probe deciding whether the ray starts inside the shadow.
    Probe,
    /// Test against the horizontal caps at the ends of the shadow.
    Caps,
    /// Binary search over both chains at once.
    #[default]
    Convolution,
    /// Binary search over the one chain that still has candidate edges.
    SingleChain,
}

/// Snapshot of one search step.
#[derive(Debug, Clone, Default)]
pub struct SolverStep {
    pub run: Run,
    pub phase: Phase,
    /// Iteration within the phase, starting at 1.
    pub iteration: usize,
    /// The ray being located, anchored where the search currently anchors it.
    pub ray: Option<Ray>,
    /// Convolution edges tested in this step, in the order they were tested.
    pub tested: Vec<Segment>,
    /// Remaining edge window `[lo, hi)` of the first chain.
    pub a_window: (usize, usize),
    /// Remaining edge window `[lo, hi)` of the second chain.
    pub b_window: (usize, usize),
}

impl SolverStep {
    /// Creates a step for the given run and phase.
    pub fn new(run: Run, phase: Phase) -> Self {
        Self {
            run,
            phase,
            ..Default::default()
        }
    }

    pub fn with_iteration(mut self, iteration: usize) -> Self {
        self.iteration = iteration;
        self
    }

    pub fn with_ray(mut self, ray: Ray) -> Self {
        self.ray = Some(ray);
        self
    }

    pub fn with_tested(mut self, tested: Vec<Segment>) -> Self {
        self.tested = tested;
        self
    }

    /// Sets the edge windows of both chains.
    pub fn with_windows(mut self, a: (usize, usize), b: (usize, usize)) -> Self {
        self.a_window = a;
        self.b_window = b;
        self
    }
}

/// Result of a traced solve: the penetration vector and every step taken.
#[derive(Debug, Clone, Default)]
pub struct SolverTrace {
    pub vector: Vector2,
    pub steps: Vec<SolverStep>,
}

impl SolverTrace {
    /// Iterates over the recorded steps.
    pub fn iter(&self) -> std::slice::Iter<'_, SolverStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl IntoIterator for SolverTrace {
    type Item = SolverStep;
    type IntoIter = std::vec::IntoIter<SolverStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a SolverTrace {
    type Item = &'a SolverStep;
    type IntoIter = std::slice::Iter<'a, SolverStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
