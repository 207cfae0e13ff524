//! Sliding-tile puzzle ("taquin") model and breadth-first solver.
//!
//! ```
//! use taquin::{Move, NoopMonitor, Puzzle};
//!
//! let puzzle = Puzzle::parse(3, "1,2,3,  4,5,0,  7,8,6").unwrap();
//! assert_eq!(puzzle.solve(NoopMonitor).unwrap(), vec![Move::Up]);
//! ```

pub mod error;
pub mod monitor;
pub mod position;
pub mod puzzle;
pub mod solver;

pub use error::{Error, LayoutError, Result};
pub use monitor::{LogMonitor, MaxDepth, Monitor, Monitors, NoopMonitor, Stats};
pub use position::{Move, Position};
pub use puzzle::{Puzzle, HOLE, MAX_SIZE};
pub use solver::{Solver, SolverConfig};
