//! Keyboard input for the delivery screens.
//!
//! Terminals only report key presses (no releases), so continuous controls
//! are latched: each press keeps the control active for a few physics
//! ticks, and terminal key-repeat refreshes the latch while the key is held.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use orbital_delivery::core::constants::INPUT_HOLD_TICKS;
use orbital_delivery::delivery::{CampaignEvent, TickControls};

/// UI-agnostic player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Confirm,
    Cancel,
    RotateLeft,
    RotateRight,
    Thrust,
    /// Ctrl+C: leave immediately from any screen.
    ForceQuit,
}

/// Map a key event to an action. Release and unmapped keys yield `None`.
pub fn map_key(key: KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputAction::ForceQuit);
    }
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputAction::Confirm),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputAction::Cancel),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputAction::RotateLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputAction::RotateRight)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(InputAction::Thrust),
        _ => None,
    }
}

/// The campaign command for a discrete action, if it is one.
pub fn campaign_event(action: InputAction) -> Option<CampaignEvent> {
    match action {
        InputAction::Confirm => Some(CampaignEvent::Confirm),
        InputAction::Cancel => Some(CampaignEvent::Cancel),
        _ => None,
    }
}

/// Hold timers for the three continuous controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLatch {
    hold_ticks: u32,
    rotate_left: u32,
    rotate_right: u32,
    thrust: u32,
}

impl Default for InputLatch {
    fn default() -> Self {
        Self::new(INPUT_HOLD_TICKS)
    }
}

impl InputLatch {
    pub fn new(hold_ticks: u32) -> Self {
        Self {
            hold_ticks,
            rotate_left: 0,
            rotate_right: 0,
            thrust: 0,
        }
    }

    /// Refresh the timer for a continuous control. Other actions are
    /// ignored.
    pub fn press(&mut self, action: InputAction) {
        match action {
            InputAction::RotateLeft => {
                self.rotate_left = self.hold_ticks;
                self.rotate_right = 0;
            }
            InputAction::RotateRight => {
                self.rotate_right = self.hold_ticks;
                self.rotate_left = 0;
            }
            InputAction::Thrust => self.thrust = self.hold_ticks,
            InputAction::Confirm | InputAction::Cancel | InputAction::ForceQuit => {}
        }
    }

    /// Controls for the coming tick.
    pub fn controls(&self) -> TickControls {
        TickControls {
            rotate_left: self.rotate_left > 0,
            rotate_right: self.rotate_right > 0,
            thrust: self.thrust > 0,
        }
    }

    /// Take the controls for one tick and count the timers down.
    pub fn step(&mut self) -> TickControls {
        let controls = self.controls();
        self.rotate_left = self.rotate_left.saturating_sub(1);
        self.rotate_right = self.rotate_right.saturating_sub(1);
        self.thrust = self.thrust.saturating_sub(1);
        controls
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.hold_ticks);
    }
}
