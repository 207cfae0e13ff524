//! Observation hooks notified by the [`Solver`](crate::Solver) while it searches.
//!
//! Every notification defaults to a no-op. Returning an error from any of them aborts the
//! search immediately and the error is handed back unchanged to the caller of `solve`.

use tracing::info;

use crate::error::{Error, Result};
use crate::position::Move;

pub trait Monitor {
    /// Called once per generation, before it is expanded.
    fn next_depth(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once per generation with the cumulative number of visited boards.
    fn visited_states(&mut self, _count: usize) -> Result<()> {
        Ok(())
    }

    /// Called once per generation with the number of boards it discovered.
    fn new_states(&mut self, _count: usize) -> Result<()> {
        Ok(())
    }

    /// Called exactly once, with the solution, when the goal is reached.
    fn found(&mut self, _moves: &[Move]) -> Result<()> {
        Ok(())
    }
}

impl<M: Monitor + ?Sized> Monitor for &mut M {
    fn next_depth(&mut self) -> Result<()> {
        (**self).next_depth()
    }

    fn visited_states(&mut self, count: usize) -> Result<()> {
        (**self).visited_states(count)
    }

    fn new_states(&mut self, count: usize) -> Result<()> {
        (**self).new_states(count)
    }

    fn found(&mut self, moves: &[Move]) -> Result<()> {
        (**self).found(moves)
    }
}

impl<M: Monitor + ?Sized> Monitor for Box<M> {
    fn next_depth(&mut self) -> Result<()> {
        (**self).next_depth()
    }

    fn visited_states(&mut self, count: usize) -> Result<()> {
        (**self).visited_states(count)
    }

    fn new_states(&mut self, count: usize) -> Result<()> {
        (**self).new_states(count)
    }

    fn found(&mut self, moves: &[Move]) -> Result<()> {
        (**self).found(moves)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl Monitor for NoopMonitor {}

/// Ordered set of monitors. Each notification reaches them left to right; the first error
/// stops the dispatch.
#[derive(Default)]
pub struct Monitors<'a> {
    monitors: Vec<Box<dyn Monitor + 'a>>,
}

impl<'a> Monitors<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn and(mut self, monitor: impl Monitor + 'a) -> Self {
        self.push(monitor);
        self
    }

    pub fn push(&mut self, monitor: impl Monitor + 'a) {
        self.monitors.push(Box::new(monitor));
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl Monitor for Monitors<'_> {
    fn next_depth(&mut self) -> Result<()> {
        self.monitors.iter_mut().try_for_each(|m| m.next_depth())
    }

    fn visited_states(&mut self, count: usize) -> Result<()> {
        self.monitors
            .iter_mut()
            .try_for_each(|m| m.visited_states(count))
    }

    fn new_states(&mut self, count: usize) -> Result<()> {
        self.monitors.iter_mut().try_for_each(|m| m.new_states(count))
    }

    fn found(&mut self, moves: &[Move]) -> Result<()> {
        self.monitors.iter_mut().try_for_each(|m| m.found(moves))
    }
}

/// Fails with [`Error::DepthExceeded`] once more than `max` generations have been entered.
#[derive(Debug, Clone)]
pub struct MaxDepth {
    max: usize,
    depth: usize,
}

impl MaxDepth {
    pub fn new(max: usize) -> Self {
        Self { max, depth: 0 }
    }
}

impl Monitor for MaxDepth {
    fn next_depth(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max {
            return Err(Error::DepthExceeded { max_depth: self.max });
        }
        Ok(())
    }
}

/// Reports search progress through `tracing` at INFO level.
#[derive(Debug, Clone, Default)]
pub struct LogMonitor {
    depth: usize,
}

impl LogMonitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Monitor for LogMonitor {
    fn next_depth(&mut self) -> Result<()> {
        self.depth += 1;
        info!(depth = self.depth, "entering next depth");
        Ok(())
    }

    fn visited_states(&mut self, count: usize) -> Result<()> {
        info!(depth = self.depth, visited = count, "visited states");
        Ok(())
    }

    fn new_states(&mut self, count: usize) -> Result<()> {
        info!(depth = self.depth, new = count, "found new states");
        Ok(())
    }

    fn found(&mut self, moves: &[Move]) -> Result<()> {
        let solution = moves
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        info!(moves = moves.len(), %solution, "found a solution");
        Ok(())
    }
}

/// Records what the search reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub depths: usize,
    pub visited: usize,
    pub discovered: usize,
    pub solution_len: Option<usize>,
}

impl Monitor for Stats {
    fn next_depth(&mut self) -> Result<()> {
        self.depths += 1;
        Ok(())
    }

    fn visited_states(&mut self, count: usize) -> Result<()> {
        self.visited = count;
        Ok(())
    }

    fn new_states(&mut self, count: usize) -> Result<()> {
        self.discovered += count;
        Ok(())
    }

    fn found(&mut self, moves: &[Move]) -> Result<()> {
        self.solution_len = Some(moves.len());
        Ok(())
    }
}
