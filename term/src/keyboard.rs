use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use minepad_core::{Buttons, InputSource};

/// What a single key press means on the pad.
enum Key {
    Button(Buttons),
    Quit,
}

fn classify(key: KeyEvent) -> Option<Key> {
    use KeyCode::*;

    let button = match key.code {
        Up | Char('w') | Char('k') => Buttons::UP,
        Down | Char('s') | Char('j') => Buttons::DOWN,
        Left | Char('a') | Char('h') => Buttons::LEFT,
        Right | Char('d') | Char('l') => Buttons::RIGHT,
        Char('z') | Char(' ') | Enter => Buttons::A,
        Char('x') | Char('f') => Buttons::B,
        Char('q') | Esc => return Some(Key::Quit),
        _ => return None,
    };
    Some(Key::Button(button))
}

/// Keyboard stand-in for the button pad, sampled on a fixed tick.
///
/// Terminals report presses rather than held state, so every key seen during a tick counts as
/// held for that sample. Key repeat makes a held key fire again on later ticks.
pub struct Keyboard {
    tick: Duration,
    next_tick: Instant,
}

impl Keyboard {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            next_tick: Instant::now() + tick,
        }
    }

    /// Swallows input for `duration`, so a press that ended one game does not start the next.
    pub fn discard_for(&mut self, duration: Duration) -> io::Result<()> {
        let deadline = Instant::now() + duration;
        while let Some(left) = deadline.checked_duration_since(Instant::now()) {
            if event::poll(left)? {
                event::read()?;
            }
        }
        self.next_tick = Instant::now() + self.tick;
        Ok(())
    }
}

impl InputSource for Keyboard {
    type Error = io::Error;

    fn next_sample(&mut self) -> io::Result<Option<Buttons>> {
        let mut buttons = Buttons::empty();

        while let Some(left) = self.next_tick.checked_duration_since(Instant::now()) {
            if !event::poll(left)? {
                break;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match classify(key) {
                Some(Key::Button(button)) => buttons |= button,
                Some(Key::Quit) => return Ok(None),
                None => log::trace!("Unmapped key {:?}", key.code),
            }
        }

        self.next_tick += self.tick;
        // fell behind, e.g. the terminal was suspended
        if self.next_tick < Instant::now() {
            self.next_tick = Instant::now() + self.tick;
        }
        Ok(Some(buttons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Option<Buttons> {
        match classify(KeyEvent::new(code, KeyModifiers::NONE)) {
            Some(Key::Button(button)) => Some(button),
            _ => None,
        }
    }

    #[test]
    fn arrows_and_vim_keys_share_directions() {
        assert_eq!(press(KeyCode::Up), Some(Buttons::UP));
        assert_eq!(press(KeyCode::Char('k')), Some(Buttons::UP));
        assert_eq!(press(KeyCode::Char('h')), Some(Buttons::LEFT));
        assert_eq!(press(KeyCode::Right), Some(Buttons::RIGHT));
    }

    #[test]
    fn action_keys() {
        assert_eq!(press(KeyCode::Char('z')), Some(Buttons::A));
        assert_eq!(press(KeyCode::Char('f')), Some(Buttons::B));
        assert!(matches!(
            classify(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Key::Quit)
        ));
        assert_eq!(press(KeyCode::Char('p')), None);
    }
}
