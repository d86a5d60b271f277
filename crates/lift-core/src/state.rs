//! The observable lift state.
//!
//! `LiftState` is a small `Copy` value: every step produces a new one and two
//! successive states never share button storage.  The button panels are
//! derived from the queues by the transition engine; they are never edited
//! independently of the passengers that light them.

use std::fmt;

use crate::{Floor, LiftError, LiftResult, MAX_FLOORS};

// ── Direction / DoorState ─────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    #[default]
    None,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up   => "up",
            Direction::None => "none",
            Direction::Down => "down",
        }
    }

    #[inline]
    pub fn is_moving(self) -> bool {
        self != Direction::None
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DoorState {
    Open,
    #[default]
    Closed,
}

impl DoorState {
    pub fn as_str(self) -> &'static str {
        match self {
            DoorState::Open   => "open",
            DoorState::Closed => "closed",
        }
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ButtonPanel ───────────────────────────────────────────────────────────────

/// Fixed-size row of per-floor buttons, stored as a bitset.
///
/// The floor count is fixed when the panel is created; reads of floors
/// outside the shaft return `false` and writes to them are ignored.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonPanel {
    bits:   u32,
    floors: u8,
}

impl ButtonPanel {
    /// A panel of `floors` unlit buttons.
    ///
    /// # Panics
    /// Panics if `floors > MAX_FLOORS`.  Floor counts come from a validated
    /// `ArrivalMatrix`, which never exceeds the limit.
    pub fn empty(floors: usize) -> Self {
        assert!(floors <= MAX_FLOORS, "button panel supports at most {MAX_FLOORS} floors");
        Self { bits: 0, floors: floors as u8 }
    }

    /// Build a panel where floor `f` is lit iff `lit(f)`.
    pub fn from_fn(floors: usize, mut lit: impl FnMut(Floor) -> bool) -> Self {
        let mut panel = Self::empty(floors);
        for i in 0..floors {
            let floor = Floor(i as u8);
            if lit(floor) {
                panel.press(floor);
            }
        }
        panel
    }

    #[inline]
    pub fn floors(&self) -> usize {
        self.floors as usize
    }

    #[inline]
    pub fn is_lit(&self, floor: Floor) -> bool {
        floor.index() < self.floors() && self.bits & (1 << floor.0) != 0
    }

    #[inline]
    pub fn press(&mut self, floor: Floor) {
        if floor.index() < self.floors() {
            self.bits |= 1 << floor.0;
        }
    }

    #[inline]
    pub fn clear(&mut self, floor: Floor) {
        if floor.index() < self.floors() {
            self.bits &= !(1 << floor.0);
        }
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.bits != 0
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Lit floors in ascending order.
    pub fn lit(&self) -> impl Iterator<Item = Floor> + '_ {
        (0..self.floors).map(Floor).filter(move |&f| self.is_lit(f))
    }

    /// One `bool` per floor, ground floor first.
    pub fn to_vec(&self) -> Vec<bool> {
        (0..self.floors).map(|i| self.is_lit(Floor(i))).collect()
    }
}

impl fmt::Display for ButtonPanel {
    /// Lit floors joined by `;` (e.g. `0;3;5`), empty string when none.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for floor in self.lit() {
            if !first {
                f.write_str(";")?;
            }
            write!(f, "{floor}")?;
            first = false;
        }
        Ok(())
    }
}

// ── LiftState ─────────────────────────────────────────────────────────────────

/// The state tuple observed by policies.
///
/// Invariant: `direction != None` implies `door == Closed`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiftState {
    pub floor:         Floor,
    pub direction:     Direction,
    pub door:          DoorState,
    /// Lit iff some boarded passenger is headed to that floor.
    pub cabin_buttons: ButtonPanel,
    /// Lit iff someone is waiting on that floor.
    pub call_buttons:  ButtonPanel,
}

impl LiftState {
    /// A stationary lift with closed doors and no buttons lit.
    ///
    /// # Errors
    /// [`LiftError::Config`] if `floors` exceeds [`MAX_FLOORS`], and
    /// [`LiftError::FloorOutOfRange`] if `floor` is not in `0..floors`.
    pub fn idle(floor: Floor, floors: usize) -> LiftResult<Self> {
        if floors > MAX_FLOORS {
            return Err(LiftError::Config(format!(
                "a shaft has at most {MAX_FLOORS} floors, got {floors}"
            )));
        }
        if floor.index() >= floors {
            return Err(LiftError::FloorOutOfRange { floor, floors });
        }
        Ok(Self {
            floor,
            direction:     Direction::None,
            door:          DoorState::Closed,
            cabin_buttons: ButtonPanel::empty(floors),
            call_buttons:  ButtonPanel::empty(floors),
        })
    }

    /// Number of floors in the shaft this state belongs to.
    #[inline]
    pub fn floors(&self) -> usize {
        self.cabin_buttons.floors()
    }

    #[inline]
    pub fn top_floor(&self) -> Floor {
        Floor((self.floors() - 1) as u8)
    }

    #[inline]
    pub fn at_top(&self) -> bool {
        self.floor == self.top_floor()
    }

    #[inline]
    pub fn at_ground(&self) -> bool {
        self.floor == Floor::GROUND
    }

    #[inline]
    pub fn door_open(&self) -> bool {
        self.door == DoorState::Open
    }
}

impl fmt::Display for LiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(floor {}, {}, door {}, cabin [{}], call [{}])",
            self.floor, self.direction, self.door, self.cabin_buttons, self.call_buttons
        )
    }
}
