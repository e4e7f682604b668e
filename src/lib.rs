#![warn(missing_docs)]

//! # `decant`
//!
//! A solver for "water sort" puzzles: a fixed set of capacity-limited tubes
//! holds stacks of colored liquid, and the goal is a sequence of single-unit
//! pours leaving every tube empty or full of one color.
//! Begin by feeding scanned tubes to a [`LevelBuilder`](builder::LevelBuilder),
//! convert it to the initial [`State`], then call [`solve()`], yielding either
//! the move list or the reason none was found.
//!
//! Scanning a photograph into tubes and rendering the answer stay outside this
//! crate: input is plain tube contents (small integer color ids, top of tube
//! first) and output is plain `{from, to}` moves, replayable frame by frame
//! with [`State::replay`].
//!
//! # Internals
//! The engine runs a greedy best-first search over tube configurations.
//! Frontier nodes sit in a hand-rolled binary-heap [`PriorityQueue`] keyed by
//! a local heuristic (finished and nearly finished tubes score better),
//! already seen configurations are skipped by [signature](State::signature),
//! and the winning path is rebuilt by walking parent links through a node
//! arena. The heuristic ignores path length, so the first goal found is *some*
//! solution rather than necessarily the shortest one, and an iteration budget
//! bounds worst-case latency on unsolvable or pathological inputs.

pub use color::ColorId;
pub use queue::{EmptyQueueError, PriorityQueue};
pub use solver::{solve, SolveError, SolveReport, DEFAULT_MAX_ITERATIONS};
pub use state::{IllegalMove, Move, State, DEFAULT_CAPACITY};
pub use tube::{Capacity, Tube};

pub(crate) mod color;
mod tests;
pub(crate) mod queue;
pub(crate) mod solver;
pub(crate) mod state;
pub(crate) mod tube;
pub mod builder;
#[cfg(feature = "wasm")]
pub mod wasm;
