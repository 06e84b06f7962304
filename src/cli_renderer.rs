use crate::entity::{Direction, FIELD_HEIGHT, FIELD_WIDTH};
use crate::renderer::{Color, Font, Input, Renderer, Surface, TITLE};
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;

pub const COLUMNS: usize = 70;
pub const ROWS: usize = 30;
/// Field units covered by one character cell
const CELL_WIDTH: f64 = FIELD_WIDTH / COLUMNS as f64;
const CELL_HEIGHT: f64 = FIELD_HEIGHT / ROWS as f64;

// Keep input polling short so the 60 Hz loop is not held up
const INPUT_POLL: Duration = Duration::from_millis(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Block,
    Round,
    Char(char),
}

impl Glyph {
    fn symbol(&self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Block => '█',
            Glyph::Round => '●',
            Glyph::Char(c) => *c,
        }
    }
}

/// Character grid the field is scaled onto. A cell is covered by a shape
/// when the cell's centre lies inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    cells: Vec<Vec<Glyph>>,
}

impl Raster {
    pub fn new() -> Self {
        Self {
            cells: vec![vec![Glyph::Empty; COLUMNS]; ROWS],
        }
    }

    pub fn glyph_at(&self, column: usize, row: usize) -> Glyph {
        self.cells
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(Glyph::Empty)
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells
            .get(row)
            .map(|r| r.iter().map(Glyph::symbol).collect())
            .unwrap_or_default()
    }

    fn covered(start: f64, length: f64, cell: f64, count: usize) -> std::ops::Range<usize> {
        let first = ((start / cell) - 0.5).ceil().max(0.0) as usize;
        let end = (((start + length) / cell) - 0.5).ceil().max(0.0) as usize;
        first.min(count)..end.min(count)
    }

    fn fill(&mut self, x: f64, y: f64, width: f64, height: f64, glyph: Glyph) {
        for row in Self::covered(y, height, CELL_HEIGHT, ROWS) {
            for column in Self::covered(x, width, CELL_WIDTH, COLUMNS) {
                self.cells[row][column] = glyph;
            }
        }
    }
}

impl Default for Raster {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Raster {
    fn fill_background(&mut self, _color: Color) {
        for row in &mut self.cells {
            row.fill(Glyph::Empty);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let glyph = match color {
            Color::Black => Glyph::Empty,
            Color::White => Glyph::Block,
        };
        self.fill(x, y, width, height, glyph);
    }

    fn fill_round_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        _arc_width: f64,
        _arc_height: f64,
        color: Color,
    ) {
        let glyph = match color {
            Color::Black => Glyph::Empty,
            Color::White => Glyph::Round,
        };
        self.fill(x, y, width, height, glyph);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _font: Font, _color: Color) {
        // Baseline sits inside the row that contains it
        let row = (y / CELL_HEIGHT).floor();
        if row < 0.0 || row >= ROWS as f64 {
            return;
        }
        let row = row as usize;
        let start = (x / CELL_WIDTH).floor().max(0.0) as usize;
        for (column, c) in (start..COLUMNS).zip(text.chars()) {
            self.cells[row][column] = Glyph::Char(c);
        }
    }
}

pub struct CliRenderer {
    raster: Raster,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            raster: Raster::new(),
        }
    }

    fn draw_info(&self, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, (ROWS + 1) as u16),
            ResetColor,
            Print("Controls: Up/Down to move | Q to quit | unfocus to pause")
        )?;
        Ok(())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for CliRenderer {
    fn fill_background(&mut self, color: Color) {
        self.raster.fill_background(color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.raster.fill_rect(x, y, width, height, color);
    }

    fn fill_round_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        arc_width: f64,
        arc_height: f64,
        color: Color,
    ) {
        self.raster
            .fill_round_rect(x, y, width, height, arc_width, arc_height, color);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: Font, color: Color) {
        self.raster.fill_text(text, x, y, font, color);
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        let (columns, rows) = terminal::size()?;
        if (columns as usize) < COLUMNS || (rows as usize) < ROWS + 2 {
            return Err(io::Error::other(format!(
                "terminal is {}x{}, need at least {}x{}",
                columns,
                rows,
                COLUMNS,
                ROWS + 2
            )));
        }

        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::SetTitle(TITLE),
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            EnableFocusChange
        )?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetBackgroundColor(style::Color::Black),
            SetForegroundColor(style::Color::White)
        )?;

        for row in 0..ROWS {
            queue!(stdout, Print(self.raster.row_text(row)), Print("\r\n"))?;
        }

        self.draw_info(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            DisableFocusChange,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if !event::poll(INPUT_POLL)? {
            return Ok(None);
        }

        let input = match event::read()? {
            Event::FocusGained => Some(Input::Focus(true)),
            Event::FocusLost => Some(Input::Focus(false)),
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Up => Some(Input::Direction(Direction::Up)),
                KeyCode::Down => Some(Input::Direction(Direction::Down)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Input::Quit)
                }
                _ => None,
            },
            _ => None,
        };
        Ok(input)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
