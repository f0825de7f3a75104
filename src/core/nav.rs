//! Mobile navigation menu state machine.

/// Open/closed state of the mobile menu
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, derive_more::Display)]
pub enum NavState {
    #[default]
    #[display("closed")]
    Closed,
    #[display("open")]
    Open,
}

impl NavState {
    pub fn is_open(&self) -> bool {
        matches!(self, NavState::Open)
    }
}

/// Where a click landed relative to the navigation controls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavClick {
    Toggle,
    /// A link inside the navigation panel
    Link,
    /// Inside the panel but not on a link
    Panel,
    Outside,
}

/// Mobile menu state, starting closed
#[derive(Debug, Default)]
pub struct NavMenu {
    state: NavState,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Apply a click and return the new state if it changed.
    pub fn click(&mut self, target: NavClick) -> Option<NavState> {
        let next = match (target, self.state) {
            (NavClick::Toggle, NavState::Closed) => NavState::Open,
            (NavClick::Toggle, NavState::Open) => NavState::Closed,
            (NavClick::Link | NavClick::Outside, NavState::Open) => NavState::Closed,
            (NavClick::Link | NavClick::Outside | NavClick::Panel, state) => state,
        };

        if next == self.state {
            None
        } else {
            self.state = next;
            Some(next)
        }
    }
}
