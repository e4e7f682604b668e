use std::fmt::{Display, Formatter, Write};

use itertools::Itertools;
use thiserror::Error;

use crate::color::display_letter;
use crate::tube::{Capacity, Tube};

/// Tube capacity of the reference puzzle, and of every scanned level.
pub const DEFAULT_CAPACITY: Capacity = match Capacity::new(4) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// A single pour: take the top unit of tube `from`, land it on top of tube `to`.
///
/// Indices are zero-based positions into the tube sequence of the [`State`]
/// the move is applied to. Exactly one unit moves per pour, never a whole run.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// Index of the source tube.
    pub from: usize,
    /// Index of the destination tube.
    pub to: usize,
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Error produced when applying a move that breaks the pour rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("move {0} is not legal in this state")]
pub struct IllegalMove(pub Move);

/// The full tube configuration at one point in the search.
///
/// Tube order is positionally significant: tube *i* here corresponds to tube
/// *i* in every state derived by move application, and move indices address
/// tubes by that position. States are never mutated once built; applying a
/// move yields a fresh, independent successor.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct State {
    tubes: Vec<Tube>,
    capacity: Capacity,
}

impl State {
    /// Assemble a state from its tubes. Prefer a
    /// [`LevelBuilder`](crate::builder::LevelBuilder) for scanner output,
    /// which also validates capacity.
    pub fn new(tubes: Vec<Tube>, capacity: Capacity) -> Self {
        Self { tubes, capacity }
    }

    /// The tubes of this state, in move-addressing order.
    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    /// Number of tubes, spares included. Constant across a solve.
    pub fn tube_count(&self) -> usize {
        self.tubes.len()
    }

    /// Units each tube can hold.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Whether the pour `mv` is allowed here: distinct indices in range, a
    /// non-empty source, a destination below capacity which is empty or
    /// top-matching the source.
    pub fn is_legal(&self, mv: Move) -> bool {
        if mv.from == mv.to {
            return false;
        }
        let (Some(source), Some(dest)) = (self.tubes.get(mv.from), self.tubes.get(mv.to)) else {
            return false;
        };

        !source.is_empty()
            && dest.len() < self.capacity()
            && (dest.is_empty() || source.top() == dest.top())
    }

    /// Apply one pour, yielding the successor state and leaving `self` intact.
    pub fn apply(&self, mv: Move) -> Result<State, IllegalMove> {
        if !self.is_legal(mv) {
            return Err(IllegalMove(mv));
        }

        let mut next = self.clone();
        let Some(unit) = next.tubes[mv.from].pop_top() else {
            return Err(IllegalMove(mv));
        };
        next.tubes[mv.to].push_top(unit);
        Ok(next)
    }

    /// All pours legal in this state, source indices ascending and
    /// destination indices ascending within each source.
    ///
    /// The heap breaks ties among equal-cost nodes arbitrarily, so this fixed
    /// generation order is what keeps repeated solves reproducible.
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..self.tubes.len())
            .cartesian_product(0..self.tubes.len())
            .map(|(from, to)| Move { from, to })
            .filter(|mv| self.is_legal(*mv))
            .collect_vec()
    }

    /// Whether every tube is either empty or full of a single color.
    pub fn is_goal(&self) -> bool {
        self.tubes
            .iter()
            .all(|tube| tube.is_empty() || (tube.len() == self.capacity() && tube.is_uniform()))
    }

    /// Canonical serialization used for visited-state deduplication.
    ///
    /// This is a verbatim dump of the tube sequence: two states agree exactly
    /// when their tube contents agree position by position. Swapping two
    /// structurally identical tubes therefore yields a *different* signature
    /// and symmetric states are explored separately.
    pub fn signature(&self) -> String {
        self.tubes
            .iter()
            .map(|tube| tube.units().iter().join("."))
            .join("|")
    }

    /// Replay a move list against this state, returning every frame from the
    /// initial state (inclusive) to the final one.
    ///
    /// This is the presentation layer's stepper; it runs the same
    /// [`apply`](Self::apply) the engine uses, so rendered frames can never
    /// drift from the search's own move semantics.
    pub fn replay(&self, steps: &[Move]) -> Result<Vec<State>, IllegalMove> {
        let mut frames = Vec::with_capacity(steps.len() + 1);
        frames.push(self.clone());
        for (index, mv) in steps.iter().enumerate() {
            let next = frames[index].apply(*mv)?;
            frames.push(next);
        }
        Ok(frames)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for tube in &self.tubes {
            for unit in tube.units() {
                f.write_char(display_letter(*unit))?;
            }
            for _ in tube.len()..self.capacity() {
                f.write_char('.')?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
