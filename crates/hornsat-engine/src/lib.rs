//! # hornsat-engine
//!
//! Horn-SAT decision procedure.
//!
//! Implements:
//! - Clause store with interned variables and a variable → clause dependency index
//! - Counter-based unit propagation to the least fixpoint (Dowling–Gallier)
//! - Minimal model extraction and conflict justification by backward trace walk
//! - Append-only propagation trace for stepwise replay
//!
//! ```
//! use hornsat_engine::solve;
//! use hornsat_format::Formula;
//!
//! let formula = Formula::new().fact("a").rule(["a"], "b");
//! let solution = solve(&formula).unwrap();
//! assert!(solution.is_sat());
//! assert_eq!(solution.trace.len(), 2);
//! ```

pub mod clause_db;
pub mod propagate;
pub mod report;
pub mod solver;
pub mod trace;

pub use clause_db::{ClauseStore, StoredClause};
pub use propagate::{Assignment, Outcome, PropagationState, Propagator};
pub use report::{JustificationStep, Reporter, SatResult};
pub use solver::{solve, EngineConfig, HornSolver, Solution, SolverStats};
pub use trace::{CounterUpdate, Trace, TraceEvent, TraceRecord};
