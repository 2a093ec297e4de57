//! Drawing the field on a terminal
//!
//! Each column occupies two terminal cells: its character, then a blank.
//! Frames are drawn in full inside a synchronized update and clipped to
//! the current terminal size.

use std::io::{self, Write};

use crossterm::style::{self, Attribute, Print, SetAttribute, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use crate::rain::{Color, Field, Style};

fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Indexed(idx) => style::Color::AnsiValue(idx),
        Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
    }
}

/// Styled characters of a field, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Vec<(char, Style)>>,
}

impl Frame {
    pub fn from_field(field: &Field) -> Self {
        let columns: Vec<Vec<(char, Style)>> =
            field.columns().iter().map(|c| c.styled().collect()).collect();
        let rows = (0..field.config().column_length())
            .map(|row| columns.iter().map(|column| column[row]).collect())
            .collect();
        Self { rows }
    }

    #[cfg(test)]
    fn rows(&self) -> &[Vec<(char, Style)>] {
        &self.rows
    }

    /// Queue the frame on `out`, clipped to `cols` x `rows` cells
    pub fn draw<W: Write>(&self, out: &mut W, cols: u16, rows: u16) -> io::Result<()> {
        queue!(out, terminal::BeginSynchronizedUpdate)?;
        let mut current: Option<Style> = None;
        for (y, line) in self.rows.iter().take(rows as usize).enumerate() {
            queue!(out, cursor::MoveTo(0, y as u16))?;
            for (x, &(ch, cell_style)) in line.iter().enumerate() {
                let col = x * 2;
                if col >= cols as usize {
                    break;
                }
                if current != Some(cell_style) {
                    let weight = if cell_style.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(
                        out,
                        SetAttribute(weight),
                        SetForegroundColor(to_crossterm(cell_style.color))
                    )?;
                    current = Some(cell_style);
                }
                if col + 1 < cols as usize {
                    queue!(out, Print(ch), Print(' '))?;
                } else {
                    queue!(out, Print(ch))?;
                }
            }
        }
        queue!(
            out,
            SetAttribute(Attribute::Reset),
            style::ResetColor,
            terminal::EndSynchronizedUpdate
        )?;
        out.flush()
    }
}

/// Alternate-screen terminal session
///
/// Enables raw mode and hides the cursor; dropping the session restores the
/// terminal even when the frame loop fails.
pub struct Session<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> Session<W> {
    pub fn enter(mut out: W) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        terminal::enable_raw_mode()?;
        let entered = queue!(
            out,
            terminal::EnterAlternateScreen,
            terminal::DisableLineWrap,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        )
        .and_then(|_| out.flush());
        if let Err(e) = entered {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        tracing::debug!("Entered alternate screen ({}x{})", cols, rows);
        Ok(Self { out, cols, rows })
    }

    /// Track a terminal resize; later frames are clipped to the new size
    pub fn resize(&mut self, cols: u16, rows: u16) -> io::Result<()> {
        self.cols = cols;
        self.rows = rows;
        queue!(self.out, terminal::Clear(terminal::ClearType::All))
    }

    pub fn draw(&mut self, field: &Field) -> io::Result<()> {
        Frame::from_field(field).draw(&mut self.out, self.cols, self.rows)
    }
}

impl<W: Write> Drop for Session<W> {
    fn drop(&mut self) {
        let _ = queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            style::ResetColor,
            cursor::Show,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
        tracing::debug!("Terminal restored");
    }
}
