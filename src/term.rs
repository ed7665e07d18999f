use crate::{Coords, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::Result;
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph { ch: ' ', fg: Color::Reset, bg: Color::Reset };

    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg, bg }
    }
}

/// Owns the terminal. Frames are drawn into `screen` and `present` only
/// sends the glyphs that differ from what is already shown.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Glyph>,
    shown: Vec<Option<Glyph>>,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let cells = width as usize * height as usize;
        Ok(TermManager {
            width,
            height,
            stdout,
            screen: vec![Glyph::BLANK; cells],
            shown: vec![None; cells],
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )?;
        Ok(())
    }

    /// Waits up to `wait` for input, then drains whatever else is queued.
    pub fn read_key_events_queue(&mut self, wait: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = wait;

        while poll(wait)? {
            match read()? {
                Event::Key(ev) => events.push(ev),
                Event::Resize(w, h) => self.resize(w, h),
                _ => {}
            }
            wait = Duration::from_millis(0);
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Blanks the back buffer for a new frame.
    pub fn clear(&mut self) {
        for glyph in self.screen.iter_mut() {
            *glyph = Glyph::BLANK;
        }
    }

    pub fn put(&mut self, pos: Coords, glyph: Glyph) {
        if pos.0 < self.width && pos.1 < self.height {
            self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = glyph;
        }
    }

    pub fn print_at(&mut self, pos: Coords, text: &str, fg: Color, bg: Color) {
        for (i, ch) in text.chars().enumerate() {
            let x = pos.0 as usize + i;
            if x >= self.width as usize {
                break;
            }
            self.put((x as TermInt, pos.1), Glyph::new(ch, fg, bg));
        }
    }

    /// Writes `text` horizontally centered on row `y`.
    pub fn print_centered(&mut self, y: TermInt, text: &str, fg: Color) {
        let len = text.chars().count() as TermInt;
        let x = (self.width.saturating_sub(len)) / 2;
        self.print_at((x, y), text, fg, Color::Reset);
    }

    pub fn draw_borders(&mut self, top_left: Coords, size: Coords) {
        let (width, height) = size;
        if width < 2 || height < 2 {
            return;
        }

        let (x0, y0) = top_left;
        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {'+'} else {'-'};
            self.put((x, y0), Glyph::new(ch, Color::Grey, Color::Reset));
            self.put((x, end_y), Glyph::new(ch, Color::Grey, Color::Reset));
        }

        for y in y0 + 1..end_y {
            self.put((x0, y), Glyph::new('|', Color::Grey, Color::Reset));
            self.put((end_x, y), Glyph::new('|', Color::Grey, Color::Reset));
        }
    }

    /// A padded box in the middle of the screen, drawn over whatever is there.
    pub fn show_message(&mut self, lines: &[&str]) {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        for y_diff in 0..msg_height {
            let line = match y_diff {
                0 => "",
                d if d == msg_height - 1 => "",
                d => lines[d as usize - 1],
            };
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let pos = (top_left.0, top_left.1 + y_diff);
            self.print_at(pos, &padded_line, Color::White, Color::Black);
        }
    }

    /// Sends the changed part of the back buffer to the terminal.
    pub fn present(&mut self) -> Result<()> {
        let mut colors: Option<(Color, Color)> = None;

        for (i, glyph) in self.screen.iter().enumerate() {
            if self.shown[i] == Some(*glyph) {
                continue;
            }

            let x = (i % self.width as usize) as TermInt;
            let y = (i / self.width as usize) as TermInt;
            if colors != Some((glyph.fg, glyph.bg)) {
                queue!(
                    self.stdout,
                    style::SetForegroundColor(glyph.fg),
                    style::SetBackgroundColor(glyph.bg)
                )?;
                colors = Some((glyph.fg, glyph.bg));
            }
            queue!(self.stdout, cursor::MoveTo(x, y), style::Print(glyph.ch))?;
            self.shown[i] = Some(*glyph);
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn resize(&mut self, width: TermInt, height: TermInt) {
        // Whatever was on screen is gone or misplaced, repaint it all
        let cells = width as usize * height as usize;
        self.width = width;
        self.height = height;
        self.screen = vec![Glyph::BLANK; cells];
        self.shown = vec![None; cells];
        if let Err(err) = queue!(self.stdout, terminal::Clear(ClearType::All)) {
            tracing::warn!(%err, "could not clear the screen after a resize");
        }
    }
}

#[cfg(test)]
impl TermManager {
    /// A manager that is never set up, for inspecting the back buffer.
    pub fn offscreen(width: TermInt, height: TermInt) -> Self {
        let cells = width as usize * height as usize;
        TermManager {
            width,
            height,
            stdout: stdout(),
            screen: vec![Glyph::BLANK; cells],
            shown: vec![None; cells],
        }
    }

    pub fn row(&self, y: TermInt) -> String {
        let start = self.width as usize * y as usize;
        self.screen[start..start + self.width as usize].iter().map(|g| g.ch).collect()
    }

    pub fn glyph_at(&self, pos: Coords) -> Glyph {
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_clipped_at_the_edge() {
        let mut term = TermManager::offscreen(6, 2);
        term.print_at((3, 1), "snake", Color::White, Color::Reset);
        assert_eq!(term.row(1), "   sna");
        term.put((9, 9), Glyph::new('x', Color::White, Color::Reset));
    }

    #[test]
    fn message_box_is_centered() {
        let mut term = TermManager::offscreen(12, 5);
        term.show_message(&["hi"]);
        assert_eq!(term.row(1), " ".repeat(12));
        assert_eq!(term.row(2), "     hi     ");
        assert_eq!(term.glyph_at((3, 2)).bg, Color::Black);
    }

    #[test]
    fn borders_frame_the_area() {
        let mut term = TermManager::offscreen(5, 3);
        term.draw_borders((0, 0), (5, 3));
        assert_eq!(term.row(0), "+---+");
        assert_eq!(term.row(1), "|   |");
        assert_eq!(term.row(2), "+---+");
    }

    #[test]
    fn resize_starts_from_a_blank_buffer() {
        let mut term = TermManager::offscreen(5, 3);
        term.print_at((0, 0), "snake", Color::White, Color::Reset);
        term.resize(8, 2);
        assert_eq!(term.get_terminal_size(), (8, 2));
        assert_eq!(term.row(0), " ".repeat(8));
        assert!(term.shown.iter().all(Option::is_none));
    }
}
