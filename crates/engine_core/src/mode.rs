//! Shared game mode store: the single source of truth for "are we playing".

use std::cell::Cell;
use std::rc::Rc;

/// Application-wide mode distinguishing menu presentation from active play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Menu,
    Play,
}

/// Cloneable handle to the shared mode cell.
///
/// The application is single-threaded and event-driven, so a plain
/// `Rc<Cell<_>>` carries the mode; there are no transactional guarantees
/// and the last writer wins. Collaborators receive a clone of the handle
/// instead of reaching for a global, which keeps their dependency on the
/// shared state visible and testable.
#[derive(Debug, Clone, Default)]
pub struct ModeHandle {
    cell: Rc<Cell<GameMode>>,
}

impl ModeHandle {
    /// New handle starting in [`GameMode::Menu`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    pub fn get(&self) -> GameMode {
        self.cell.get()
    }

    /// Overwrite the mode. Last writer wins.
    pub fn set(&self, mode: GameMode) {
        if self.cell.get() != mode {
            log::debug!("game mode -> {:?}", mode);
        }
        self.cell.set(mode);
    }

    pub fn is_playing(&self) -> bool {
        self.get() == GameMode::Play
    }
}
