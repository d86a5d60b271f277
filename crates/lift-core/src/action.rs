//! Actions and the legality rules every policy and the engine share.
//!
//! | Door   | Direction  | Legal actions                                       |
//! |--------|------------|-----------------------------------------------------|
//! | open   | any        | `door`                                              |
//! | closed | none       | `noop`, `door`, `up` (below top), `down` (above 0)  |
//! | closed | up / down  | `noop`, `stop`                                      |

use std::fmt;
use std::str::FromStr;

use crate::{Direction, DoorState, LiftError, LiftState};

// ── Action ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    Up,
    Down,
    Stop,
    Door,
    Noop,
}

impl Action {
    pub const ALL: [Action; 5] = [Action::Up, Action::Down, Action::Stop, Action::Door, Action::Noop];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Up   => "up",
            Action::Down => "down",
            Action::Stop => "stop",
            Action::Door => "door",
            Action::Noop => "noop",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LiftError::Config(format!("unknown action `{s}`")))
    }
}

// ── ActionSet ─────────────────────────────────────────────────────────────────

/// A small set of actions, iterated in [`Action::ALL`] order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct ActionSet(u8);

impl ActionSet {
    pub const EMPTY: ActionSet = ActionSet(0);

    pub fn of(actions: &[Action]) -> Self {
        actions.iter().fold(Self::EMPTY, |set, &a| set.with(a))
    }

    #[inline]
    pub fn with(self, action: Action) -> Self {
        ActionSet(self.0 | action.bit())
    }

    #[inline]
    pub fn contains(&self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(move |&a| self.contains(a))
    }

    pub fn to_vec(&self) -> Vec<Action> {
        self.iter().collect()
    }
}

impl fmt::Debug for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, a) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(a.as_str())?;
        }
        f.write_str("}")
    }
}

// ── Legality ──────────────────────────────────────────────────────────────────

/// The legal actions in `state`.  Pure; never empty.
pub fn legal_actions(state: &LiftState) -> ActionSet {
    if state.door == DoorState::Open {
        return ActionSet::EMPTY.with(Action::Door);
    }

    match state.direction {
        Direction::None => {
            let mut set = ActionSet::of(&[Action::Noop, Action::Door]);
            if !state.at_top() {
                set = set.with(Action::Up);
            }
            if !state.at_ground() {
                set = set.with(Action::Down);
            }
            set
        }
        Direction::Up | Direction::Down => ActionSet::of(&[Action::Noop, Action::Stop]),
    }
}

/// Fail with [`LiftError::InvalidAction`] unless `action` is legal in `state`.
pub fn ensure_legal(state: &LiftState, action: Action) -> Result<(), LiftError> {
    let allowed = legal_actions(state);
    if allowed.contains(action) {
        Ok(())
    } else {
        Err(LiftError::InvalidAction {
            action,
            state:   state.to_string(),
            allowed: allowed.to_string(),
        })
    }
}
