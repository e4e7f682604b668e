use std::num::NonZero;

use itertools::Itertools;

use crate::color::ColorId;

/// Number of liquid units a tube can hold.
pub type Capacity = NonZero<usize>;

/// One capacity-bounded stack of liquid units.
///
/// Index 0 is the top of the stack: the next unit poured out, or the unit a
/// poured-in unit lands on. The bound itself lives on the owning
/// [`State`](crate::State); a `Tube` is just the ordered contents.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Tube(Vec<ColorId>);

impl Tube {
    /// Construct a tube from its units, top of stack first.
    pub fn new(units: Vec<ColorId>) -> Self {
        Self(units)
    }

    /// Number of units currently in the tube.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tube holds no units at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The color of the topmost unit, or [`None`] if the tube is empty.
    pub fn top(&self) -> Option<ColorId> {
        self.0.first().copied()
    }

    /// The units in this tube, top of stack first.
    pub fn units(&self) -> &[ColorId] {
        &self.0
    }

    /// Whether every unit in the tube shares one color.
    /// Vacuously true for an empty tube.
    pub fn is_uniform(&self) -> bool {
        self.0.iter().all_equal()
    }

    pub(crate) fn pop_top(&mut self) -> Option<ColorId> {
        match self.0.is_empty() {
            true => None,
            false => Some(self.0.remove(0)),
        }
    }

    pub(crate) fn push_top(&mut self, color: ColorId) {
        self.0.insert(0, color);
    }
}

impl From<Vec<ColorId>> for Tube {
    fn from(units: Vec<ColorId>) -> Self {
        Self::new(units)
    }
}

impl<const N: usize> From<[ColorId; N]> for Tube {
    fn from(units: [ColorId; N]) -> Self {
        Self::new(units.to_vec())
    }
}
