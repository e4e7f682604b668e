use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace};

use crate::queue::PriorityQueue;
use crate::state::{Move, State};

/// Default iteration budget for a solve.
///
/// One iteration is one node popped from the queue. Callers tune this to
/// trade latency for completeness; tests force the timeout path by shrinking
/// it and the success path by growing it.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Ways a solve can fail. Both are expected, recoverable outcomes for the
/// caller to branch on, never reasons to crash the hosting process.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SolveError {
    /// Every state reachable from the input was expanded and none was a goal.
    #[error("no solution found")]
    NoSolution,
    /// The iteration budget ran out first. Retrying with a larger budget is
    /// caller policy; the engine itself never retries.
    #[error("timeout")]
    Timeout,
}

/// One entry in the search tree, arena-allocated for the duration of a single
/// [`solve`] call. Parent links are arena indices, so the whole tree drops in
/// one piece when the call returns.
struct SearchNode {
    state: State,
    parent: Option<usize>,
    mv: Option<Move>,
}

#[derive(Clone, Copy)]
struct Scored {
    cost: i32,
    node: usize,
}

/// Local desirability score for `state`; lower is more promising.
///
/// Finished tubes count -10, nearly finished uniform tubes -5, and a matching
/// top pair -2. The score is the node's entire sort key: path length is
/// deliberately *not* added, which makes the search greedy best-first rather
/// than A* and means the returned move list is not necessarily shortest.
pub(crate) fn heuristic(state: &State) -> i32 {
    let mut score = 0;
    for tube in state.tubes() {
        if tube.is_empty() {
            continue;
        }

        if tube.is_uniform() && tube.len() == state.capacity() {
            score -= 10;
        } else if tube.is_uniform() && tube.len() == state.capacity() - 1 {
            score -= 5;
        } else if tube.len() >= 2 && tube.units()[0] == tube.units()[1] {
            score -= 2;
        }
    }
    score
}

/// Search for a move list transforming `initial` into a state where every
/// tube is empty or full of one color.
///
/// Runs a greedy best-first search: the frontier is a binary heap keyed on
/// the heuristic alone, successors are generated in ascending `(from, to)`
/// order, and previously seen states are skipped by canonical
/// [signature](State::signature). An already-solved input yields `Ok` with an
/// empty move list.
///
/// The call is synchronous, owns all of its structures, and shares nothing
/// between invocations; run it off the interactive thread if latency matters,
/// and impose a wall-clock deadline there if the iteration budget is not
/// bound enough.
pub fn solve(initial: &State, max_iterations: usize) -> Result<Vec<Move>, SolveError> {
    let mut queue = PriorityQueue::new(|a: &Scored, b: &Scored| a.cost < b.cost);
    let mut arena = vec![SearchNode { state: initial.clone(), parent: None, mv: None }];
    let mut visited = HashSet::new();

    visited.insert(initial.signature());
    queue.push(Scored { cost: 0, node: 0 });

    debug!(
        tubes = initial.tube_count(),
        capacity = initial.capacity(),
        max_iterations,
        "starting solve"
    );

    let mut iterations = 0usize;
    while let Ok(best) = queue.pop() {
        iterations += 1;
        if iterations > max_iterations {
            debug!(iterations, explored = arena.len(), "iteration budget exhausted");
            return Err(SolveError::Timeout);
        }

        if arena[best.node].state.is_goal() {
            let steps = reconstruct(&arena, best.node);
            debug!(iterations, explored = arena.len(), moves = steps.len(), "goal reached");
            return Ok(steps);
        }

        let moves = arena[best.node].state.legal_moves();
        trace!(node = best.node, cost = best.cost, branching = moves.len(), "expanding");

        for mv in moves {
            let Ok(successor) = arena[best.node].state.apply(mv) else {
                continue;
            };

            // record at enqueue time so the same state reached twice within
            // one expansion round is still only queued once
            if !visited.insert(successor.signature()) {
                continue;
            }

            let cost = heuristic(&successor);
            arena.push(SearchNode { state: successor, parent: Some(best.node), mv: Some(mv) });
            queue.push(Scored { cost, node: arena.len() - 1 });
        }
    }

    debug!(iterations, explored = arena.len(), "state graph exhausted");
    Err(SolveError::NoSolution)
}

/// Walk parent indices from the goal node back to the parentless root,
/// collecting each node's originating move, then flip into application order.
fn reconstruct(arena: &[SearchNode], goal: usize) -> Vec<Move> {
    let mut steps = Vec::new();
    let mut cursor = goal;
    while let (Some(parent), Some(mv)) = (arena[cursor].parent, arena[cursor].mv) {
        steps.push(mv);
        cursor = parent;
    }
    steps.reverse();
    steps
}

/// The boundary shape handed to presentation collaborators: a success flag
/// with either the move list or a reason string ("no solution found" or
/// "timeout").
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveReport {
    /// Whether a goal state was reached.
    pub success: bool,
    /// Moves to replay against the initial state, in application order.
    /// Empty when `success` is false, and also for an already-solved input.
    pub steps: Vec<Move>,
    /// Failure reason, present exactly when `success` is false.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub error: Option<String>,
}

impl From<Result<Vec<Move>, SolveError>> for SolveReport {
    fn from(outcome: Result<Vec<Move>, SolveError>) -> Self {
        match outcome {
            Ok(steps) => Self { success: true, steps, error: None },
            Err(reason) => Self { success: false, steps: Vec::new(), error: Some(reason.to_string()) },
        }
    }
}
