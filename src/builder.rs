use crate::color::ColorId;
use crate::state::{State, DEFAULT_CAPACITY};
use crate::tube::{Capacity, Tube};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A scanned tube held more units than the declared capacity.
    TubeOverfilled,
}

/// The scanner-facing intake surface: collects scanned tubes and spare
/// empties, validates them against the declared capacity, and produces the
/// initial [`State`] for a solve.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save
/// their state at some point. Once a builder has entered an invalid state,
/// further calls do nothing and [`build`](Self::build) reports every reason
/// collected so far.
#[derive(Clone)]
pub struct LevelBuilder {
    capacity: Capacity,
    tubes: Vec<Tube>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LevelBuilder {
    /// Construct a builder for tubes holding `capacity` units each.
    /// Scanned levels use [`DEFAULT_CAPACITY`]; tests shrink it to keep
    /// fixtures small.
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            capacity,
            tubes: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Add one scanned tube, units given top of stack first.
    ///
    /// May cause the builder to enter a
    /// [`TubeOverfilled`](BuilderInvalidReason::TubeOverfilled) invalid state
    /// if more units are given than the capacity admits.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_tube(&mut self, units: impl Into<Vec<ColorId>>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let units = units.into();
        if units.len() > self.capacity.get() {
            self.invalid_reasons.push(BuilderInvalidReason::TubeOverfilled);
            return self;
        }

        self.tubes.push(Tube::new(units));
        self
    }

    /// Add `count` spare empty tubes.
    ///
    /// If the builder is in an invalid state, this function does nothing.
    pub fn add_empty_tubes(&mut self, count: usize) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.tubes.extend((0..count).map(|_| Tube::default()));
        self
    }

    /// Remove the most recently added tube.
    ///
    /// If the builder is in an invalid state or no tubes are present, this
    /// function does nothing.
    pub fn pop_tube(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.tubes.pop();
        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid,
    /// `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        match self.invalid_reasons.is_empty() {
            true => None,
            false => Some(&self.invalid_reasons),
        }
    }

    /// Convert the state of this builder into the initial [`State`] of a
    /// solve. If the builder is invalid for any reason, a [`Vec`] of
    /// [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<State, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        Ok(State::new(self.tubes.clone(), self.capacity))
    }
}
