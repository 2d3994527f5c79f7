/// Cyclic navigation through the album
///
/// The `Navigator` is the only thing that mutates the current index. Every
/// input source (click, wheel, arrow keys) is reduced to a `Step` first, so
/// rapid input is applied one step at a time in event order.

use iced::keyboard::{self, key::Named, Key};
use iced::mouse::{self, ScrollDelta};
use iced::Event;

/// Direction of the last navigation, used to choreograph the transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    /// +1 for forward, -1 for backward
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// The two transitions every input maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advance,
    Retreat,
}

/// Current position in the album
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_index: usize,
    pub direction: Direction,
}

/// Owns the navigation state for an album of fixed length
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    len: usize,
    state: NavigationState,
}

impl Navigator {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: NavigationState::default(),
        }
    }

    /// Start at `index` (wrapped into range)
    #[cfg(test)]
    pub fn starting_at(len: usize, index: usize) -> Self {
        let current_index = if len == 0 { 0 } else { index % len };
        Self {
            len,
            state: NavigationState {
                current_index,
                direction: Direction::Forward,
            },
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    /// Move to the next photo, wrapping to the first
    #[cfg(test)]
    pub fn advance(&mut self) -> bool {
        self.apply(Step::Advance)
    }

    /// Move to the previous photo, wrapping to the last
    #[cfg(test)]
    pub fn retreat(&mut self) -> bool {
        self.apply(Step::Retreat)
    }

    /// Apply one step. Returns `true` when the current index changed.
    ///
    /// An empty album has nothing to navigate: the state is left untouched.
    pub fn apply(&mut self, step: Step) -> bool {
        if self.len == 0 {
            return false;
        }

        let previous = self.state.current_index;
        let (current_index, direction) = match step {
            Step::Advance => ((previous + 1) % self.len, Direction::Forward),
            Step::Retreat => ((previous + self.len - 1) % self.len, Direction::Backward),
        };

        self.state = NavigationState {
            current_index,
            direction,
        };

        log::debug!("🧭 {:?}: {} -> {} of {}", step, previous, current_index, self.len);
        current_index != previous
    }
}

/// Whether the window-level wheel/key listeners should exist at all
///
/// They are attached only while the stack is on screen and has photos, and
/// dropped as soon as either stops being true.
pub fn listeners_active(len: usize, stack_visible: bool) -> bool {
    len > 0 && stack_visible
}

/// Arrow keys: right/down advance, left/up retreat
pub fn step_for_key(key: &Key) -> Option<Step> {
    match key {
        Key::Named(Named::ArrowRight | Named::ArrowDown) => Some(Step::Advance),
        Key::Named(Named::ArrowLeft | Named::ArrowUp) => Some(Step::Retreat),
        _ => None,
    }
}

/// Vertical scroll: scrolling down advances, scrolling up retreats
///
/// iced reports scrolling down as a negative `y`, so the page-style delta
/// is its negation.
pub fn step_for_wheel(delta: ScrollDelta) -> Option<Step> {
    let y = match delta {
        ScrollDelta::Lines { y, .. } | ScrollDelta::Pixels { y, .. } => y,
    };
    let page_delta = -y;

    if page_delta > 0.0 {
        Some(Step::Advance)
    } else if page_delta < 0.0 {
        Some(Step::Retreat)
    } else {
        None
    }
}

/// Reduce a window event to a navigation step
pub fn step_for_event(event: &Event) -> Option<Step> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => step_for_key(key),
        Event::Mouse(mouse::Event::WheelScrolled { delta }) => step_for_wheel(*delta),
        _ => None,
    }
}
