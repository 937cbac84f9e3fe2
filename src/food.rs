use rand::Rng;

use crate::config::{BONUS_FOOD_POINTS, BONUS_PULSE_RATE, GridSize, NORMAL_FOOD_POINTS};
use crate::snake::Cell;

/// Food type, used to tell the two consumption events apart.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    Bonus,
}

impl FoodKind {
    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Normal => NORMAL_FOOD_POINTS,
            Self::Bonus => BONUS_FOOD_POINTS,
        }
    }
}

/// Temporary food with a 2×2 footprint anchored at its top-left cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BonusFood {
    pub position: Cell,
    /// Animation frames drawn since the bonus appeared.
    pub pulse_phase: u32,
}

impl BonusFood {
    /// Creates a bonus food at `position` with a fresh pulse phase.
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self {
            position,
            pulse_phase: 0,
        }
    }

    /// Returns true when `cell` lies in the 2×2 footprint.
    ///
    /// The footprint is not clipped to the grid, so an anchor on the last
    /// row or column leaves part of it off the board.
    #[must_use]
    pub fn covers(self, cell: Cell) -> bool {
        let Cell { x, y } = self.position;
        (cell.x == x || cell.x == x + 1) && (cell.y == y || cell.y == y + 1)
    }

    /// Returns the four footprint cells, anchor first.
    #[must_use]
    pub fn footprint(self) -> [Cell; 4] {
        let Cell { x, y } = self.position;
        [
            Cell { x, y },
            Cell { x: x + 1, y },
            Cell { x, y: y + 1 },
            Cell { x: x + 1, y: y + 1 },
        ]
    }

    /// Current size multiplier of the pulse animation, in `[0.6, 1.0]`.
    #[must_use]
    pub fn pulse_factor(self) -> f32 {
        (self.pulse_phase as f32 * BONUS_PULSE_RATE).sin() * 0.2 + 0.8
    }

    /// Advances the pulse animation by one frame.
    pub fn advance_pulse(&mut self) {
        self.pulse_phase = self.pulse_phase.wrapping_add(1);
    }
}

/// Returns a uniformly random cell inside `bounds`.
///
/// No attempt is made to avoid the snake or other food: a spawn under the
/// body is allowed and simply gets eaten once the head reaches it.
#[must_use]
pub fn random_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Cell {
    debug_assert!(bounds.width > 0 && bounds.height > 0);

    Cell {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}
