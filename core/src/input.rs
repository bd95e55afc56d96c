use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::Step;

bitflags! {
    /// Buttons held down during one input sample.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Buttons: u8 {
        const A     = 1;
        const B     = 1 << 1;
        const UP    = 1 << 2;
        const DOWN  = 1 << 3;
        const LEFT  = 1 << 4;
        const RIGHT = 1 << 5;
    }
}

impl Buttons {
    pub fn from_states(a: bool, b: bool, up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut buttons = Self::empty();
        buttons.set(Self::A, a);
        buttons.set(Self::B, b);
        buttons.set(Self::UP, up);
        buttons.set(Self::DOWN, down);
        buttons.set(Self::LEFT, left);
        buttons.set(Self::RIGHT, right);
        buttons
    }

    /// Combined direction of the held arrows; opposite arrows cancel.
    pub fn step(self) -> Step {
        let axis = |neg: Self, pos: Self| i8::from(self.contains(pos)) - i8::from(self.contains(neg));
        (axis(Self::LEFT, Self::RIGHT), axis(Self::UP, Self::DOWN))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Step),
    Reveal,
    ToggleFlag,
}

/// Commands produced by a single sample, never more than three.
pub type Commands = SmallVec<[Command; 3]>;

/// Translates a button sample into commands, ordered move, reveal, flag.
///
/// Held buttons fire again on every sample.
pub fn map_buttons(buttons: Buttons) -> Commands {
    let mut commands = Commands::new();

    let step = buttons.step();
    if step != (0, 0) {
        commands.push(Command::Move(step));
    }
    if buttons.contains(Buttons::A) {
        commands.push(Command::Reveal);
    }
    if buttons.contains(Buttons::B) {
        commands.push(Command::ToggleFlag);
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_pressed_maps_to_nothing() {
        assert!(map_buttons(Buttons::empty()).is_empty());
    }

    #[test]
    fn up_left_combines_into_diagonal() {
        assert_eq!(
            map_buttons(Buttons::UP | Buttons::LEFT).as_slice(),
            [Command::Move((-1, -1))]
        );
        assert_eq!(
            map_buttons(Buttons::DOWN | Buttons::RIGHT).as_slice(),
            [Command::Move((1, 1))]
        );
    }

    #[test]
    fn opposite_directions_cancel() {
        assert!(map_buttons(Buttons::UP | Buttons::DOWN).is_empty());
        assert_eq!(
            map_buttons(Buttons::LEFT | Buttons::RIGHT | Buttons::UP).as_slice(),
            [Command::Move((0, -1))]
        );
    }

    #[test]
    fn move_precedes_actions() {
        let buttons = Buttons::from_states(true, true, false, true, false, false);

        assert_eq!(
            map_buttons(buttons).as_slice(),
            [Command::Move((0, 1)), Command::Reveal, Command::ToggleFlag]
        );
    }

    #[test]
    fn from_states_sets_each_flag() {
        assert_eq!(
            Buttons::from_states(true, false, false, false, true, false),
            Buttons::A | Buttons::LEFT
        );
        assert_eq!(
            Buttons::from_states(false, false, false, false, false, false),
            Buttons::empty()
        );
    }
}
