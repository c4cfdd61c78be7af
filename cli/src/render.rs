//! Draws the board to a terminal, optionally with colored cell backgrounds.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use minefield_core::{CellView, Game};

use crate::input::row_label;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Draws the board, preceded by the adjacent mine count of the last reveal when there was one.
    pub fn draw<W: Write>(
        &self,
        out: &mut W,
        game: &Game,
        adjacent_mines: Option<u8>,
    ) -> io::Result<()> {
        if self.color {
            out.queue(terminal::Clear(ClearType::All))?;
            out.queue(cursor::MoveTo(0, 0))?;
        }

        if let Some(count) = adjacent_mines {
            writeln!(out, "This square contains {count} adjacent mines.")?;
            writeln!(out)?;
        }

        let (rows, cols) = game.size();

        write!(out, "   | ")?;
        for col in 0..cols {
            write!(out, "{:>2} ", u16::from(col) + 1)?;
        }
        writeln!(out)?;
        writeln!(out, "{:-<width$}", "---+-", width = usize::from(cols) * 3 + 5)?;

        for row in 0..rows {
            write!(out, "{:>2} | ", row_label(row))?;
            for col in 0..cols {
                self.draw_cell(out, game.view_at((row, col)))?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;

        out.flush()
    }

    fn draw_cell<W: Write>(&self, out: &mut W, view: CellView) -> io::Result<()> {
        let (symbol, background) = match view {
            CellView::Covered => ('#', Color::Black),
            CellView::Empty => ('0', Color::DarkGrey),
            CellView::Mine => ('X', Color::Red),
            CellView::Count(count) => (char::from(b'0' + count), Color::DarkCyan),
        };

        if self.color {
            out.queue(SetBackgroundColor(background))?;
            out.queue(Print(format!(" {symbol} ")))?;
            out.queue(ResetColor)?;
        } else {
            write!(out, " {symbol} ")?;
        }
        Ok(())
    }
}
