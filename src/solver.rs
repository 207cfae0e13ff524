use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::monitor::Monitor;
use crate::position::Move;
use crate::puzzle::Puzzle;

/// Safety valves for a search. Both are unbounded by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Longest solution the search may look for. Expanding a generation past it fails with
    /// [`Error::DepthExceeded`].
    pub max_depth: Option<usize>,
    /// Largest visited set the search may build. Checked as boards are discovered, so the
    /// search stops in the middle of a generation with [`Error::StateLimitExceeded`].
    pub max_states: Option<usize>,
}

impl SolverConfig {
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[must_use]
    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }
}

/// A board together with the moves that led to it from the initial board.
type Entry = (Puzzle, Vec<Move>);

/// Level-synchronous breadth-first search. The first solved board found is reached by a
/// shortest move sequence.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn solve<M: Monitor>(&self, puzzle: &Puzzle, mut monitor: M) -> Result<Vec<Move>> {
        if !puzzle.is_solvable() {
            return Err(Error::Unsolvable {
                inversions: puzzle.count_inversions(),
            });
        }

        let mut visited = HashSet::new();
        visited.insert(puzzle.clone());
        let mut frontier: Vec<Entry> = vec![(puzzle.clone(), Vec::new())];
        let mut depth = 0;

        loop {
            if let Some(index) = frontier.iter().position(|(board, _)| board.is_solved()) {
                let (_, moves) = frontier.swap_remove(index);
                debug!(depth, visited = visited.len(), "solution found");
                monitor.found(&moves)?;
                return Ok(moves);
            }

            if frontier.is_empty() {
                return Err(Error::Exhausted { depth });
            }

            if let Some(max_depth) = self.config.max_depth {
                if depth >= max_depth {
                    return Err(Error::DepthExceeded { max_depth });
                }
            }

            monitor.next_depth()?;
            depth += 1;
            debug!(depth, frontier = frontier.len(), "expanding generation");

            frontier = self.expand(&frontier, &mut visited)?;

            monitor.visited_states(visited.len())?;
            monitor.new_states(frontier.len())?;
        }
    }

    /// Boards one move away from `frontier` that have not been visited yet. The move undoing
    /// an entry's last move is never tried.
    fn expand(&self, frontier: &[Entry], visited: &mut HashSet<Puzzle>) -> Result<Vec<Entry>> {
        let mut next = Vec::new();

        for (board, history) in frontier {
            let back = history.last().map(Move::inverse);

            for movement in board.available_moves() {
                if Some(movement) == back {
                    continue;
                }
                let Some(candidate) = board.try_move(movement) else {
                    continue;
                };
                if visited.contains(&candidate) {
                    continue;
                }

                if let Some(max_states) = self.config.max_states {
                    if visited.len() >= max_states {
                        return Err(Error::StateLimitExceeded { max_states });
                    }
                }

                visited.insert(candidate.clone());
                let mut moves = Vec::with_capacity(history.len() + 1);
                moves.extend_from_slice(history);
                moves.push(movement);
                next.push((candidate, moves));
            }
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{MaxDepth, Monitors, NoopMonitor, Stats};

    mod given {
        use super::*;

        pub(crate) fn one_move_away() -> Puzzle {
            Puzzle::parse(3, "1,2,3,  4,5,0,  7,8,6").unwrap()
        }

        pub(crate) fn five_moves_away() -> Puzzle {
            Puzzle::new(3)
                .unwrap()
                .apply_moves(&[Move::Right, Move::Down, Move::Left, Move::Down, Move::Right])
                .unwrap()
        }
    }

    #[test]
    fn already_solved() {
        let mut stats = Stats::default();
        let moves = Solver::default()
            .solve(&Puzzle::new(3).unwrap(), &mut stats)
            .unwrap();

        assert!(moves.is_empty());
        assert_eq!(stats.depths, 0);
        assert_eq!(stats.solution_len, Some(0));
    }

    #[test]
    fn one_move() {
        let moves = Solver::default()
            .solve(&given::one_move_away(), NoopMonitor)
            .unwrap();
        assert_eq!(moves, vec![Move::Up]);
    }

    #[test]
    fn shortest_path() {
        let puzzle = given::five_moves_away();
        let moves = Solver::default().solve(&puzzle, NoopMonitor).unwrap();

        assert!(moves.len() <= 5);
        assert!(puzzle.apply_moves(&moves).unwrap().is_solved());
    }

    #[test]
    fn unsolvable_fails_before_searching() {
        let puzzle = Puzzle::parse(3, "1,2,3,  4,5,6,  8,7,0").unwrap();
        let mut stats = Stats::default();

        let err = Solver::default().solve(&puzzle, &mut stats).unwrap_err();

        assert_eq!(err, Error::Unsolvable { inversions: 1 });
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn depth_bound() {
        let puzzle = given::five_moves_away();
        let solver = Solver::new(SolverConfig::default().with_max_depth(2));

        assert_eq!(
            solver.solve(&puzzle, NoopMonitor),
            Err(Error::DepthExceeded { max_depth: 2 })
        );

        let solver = Solver::new(SolverConfig::default().with_max_depth(5));
        assert!(solver.solve(&puzzle, NoopMonitor).is_ok());
    }

    #[test]
    fn depth_bound_allows_exact_length() {
        let solver = Solver::new(SolverConfig::default().with_max_depth(1));
        assert_eq!(
            solver.solve(&given::one_move_away(), NoopMonitor),
            Ok(vec![Move::Up])
        );
    }

    #[test]
    fn state_limit_aborts_mid_generation() {
        let puzzle = given::five_moves_away();
        let solver = Solver::new(SolverConfig::default().with_max_states(3));
        let mut stats = Stats::default();

        let err = solver.solve(&puzzle, &mut stats).unwrap_err();

        assert_eq!(err, Error::StateLimitExceeded { max_states: 3 });
        assert_eq!(stats.solution_len, None);
    }

    #[test]
    fn monitor_error_propagates() {
        let puzzle = given::five_moves_away();
        let mut stats = Stats::default();
        let monitors = Monitors::new().and(&mut stats).and(MaxDepth::new(1));

        let err = Solver::default().solve(&puzzle, monitors).unwrap_err();

        assert_eq!(err, Error::DepthExceeded { max_depth: 1 });
        assert_eq!(stats.depths, 2);
        assert_eq!(stats.solution_len, None);
    }

    #[test]
    fn counts_are_reported_per_generation() {
        let mut stats = Stats::default();
        let moves = Solver::default()
            .solve(&given::one_move_away(), &mut stats)
            .unwrap();

        assert_eq!(stats.depths, moves.len());
        assert_eq!(stats.visited, stats.discovered + 1);
    }
}
