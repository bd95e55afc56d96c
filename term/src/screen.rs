use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, PrintStyledContent, StyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use minepad_core::{CellView, FrameSink, GameStatus, Session};

/// Draws the board as a character grid.
pub struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

fn glyph(view: CellView) -> StyledContent<char> {
    match view {
        CellView::Hidden => '#'.dark_grey(),
        CellView::Flagged => 'F'.red().bold(),
        CellView::Revealed(0) => '.'.grey(),
        CellView::Revealed(count) => {
            let color = match count {
                1 => Color::Blue,
                2 => Color::Green,
                3 => Color::Red,
                4 => Color::DarkBlue,
                5 => Color::DarkRed,
                6 => Color::Cyan,
                7 => Color::Magenta,
                _ => Color::White,
            };
            char::from(b'0' + count).with(color)
        }
        CellView::Mine => '*'.yellow(),
        CellView::Exploded => 'X'.black().on_red(),
    }
}

fn status_line(session: &Session) -> String {
    match session.status() {
        GameStatus::Playing => format!("mines left: {:>3}", session.mines_left()),
        GameStatus::Won => "cleared! A: new game, Q: quit".to_string(),
        GameStatus::Lost => "boom. A: new game, Q: quit".to_string(),
    }
}

impl<W: Write> FrameSink for Screen<W> {
    type Error = io::Error;

    fn present(&mut self, session: &Session) -> io::Result<()> {
        let (cols, rows) = session.size();
        let cursor = session.cursor();
        let show_cursor = !session.is_finished();

        queue!(self.out, Clear(ClearType::All))?;
        for y in 0..rows {
            queue!(self.out, MoveTo(0, y.into()))?;
            for x in 0..cols {
                let (left, right) = if show_cursor && cursor == (x, y) {
                    ('[', ']')
                } else {
                    (' ', ' ')
                };
                queue!(
                    self.out,
                    Print(left),
                    PrintStyledContent(glyph(session.cell_view((x, y)))),
                    Print(right)
                )?;
            }
        }
        queue!(
            self.out,
            MoveTo(0, u16::from(rows) + 1),
            Print(status_line(session)),
            MoveTo(0, u16::from(rows) + 2),
            Print("arrows move, z reveal, x flag, q quit".dark_grey())
        )?;
        self.out.flush()
    }
}
