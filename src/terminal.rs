//! Terminal surface standing in for the application window.
//!
//! Every terminal cell shows two vertically stacked framebuffer pixels through
//! an upper half block: the foreground paints the top pixel, the background the
//! bottom one. Frames are diffed against the last presented frame and written
//! inside a synchronized update so the terminal swaps them in one go.

use crate::error::InitError;
use crate::graphics::{Framebuffer, Rgb};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, DisableLineWrap, EnableLineWrap, EndSynchronizedUpdate,
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use std::io::{self, Stdout, Write};
use tracing::{debug, info, warn};

/// Title shown by terminals that support it
pub const TITLE: &str = "Grid of Spheres";

const HALF_BLOCK: char = '▀';

/// What one terminal cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Glyph {
    const BLANK: Glyph = Glyph {
        ch: ' ',
        fg: Rgb::BLACK,
        bg: Rgb::BLACK,
    };
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Packs pairs of framebuffer rows into terminal cells
pub fn compose(framebuffer: &Framebuffer, cols: u16, rows: u16, out: &mut Vec<Glyph>) {
    let (cols, rows) = (cols as usize, rows as usize);
    out.clear();
    out.resize(cols * rows, Glyph::BLANK);
    let width = framebuffer.width().min(cols);
    for row in 0..rows {
        let top = row * 2;
        let bottom = top + 1;
        if bottom >= framebuffer.height() {
            break;
        }
        for col in 0..width {
            out[row * cols + col] = Glyph {
                ch: HALF_BLOCK,
                fg: framebuffer.pixel(col, top),
                bg: framebuffer.pixel(col, bottom),
            };
        }
    }
}

/// Writes a line of text over the top row of the composed frame
pub fn overlay_text(glyphs: &mut [Glyph], cols: u16, text: &str) {
    for (slot, ch) in glyphs.iter_mut().take(cols as usize).zip(text.chars()) {
        *slot = Glyph {
            ch,
            fg: Rgb { r: 255, g: 255, b: 255 },
            bg: Rgb::BLACK,
        };
    }
}

/// Owns the terminal for the lifetime of the program and restores it on drop
pub struct Surface {
    out: Stdout,
    cols: u16,
    rows: u16,
    /// Last frame written to the terminal, `None` where a cell must be redrawn
    presented: Vec<Option<Glyph>>,
    pending: Vec<Glyph>,
}

impl Surface {
    /// Takes over the terminal: raw input, alternate screen, mouse capture
    pub fn open() -> Result<Self, InitError> {
        terminal::enable_raw_mode().map_err(InitError::RawMode)?;
        let mut surface = Surface {
            out: io::stdout(),
            cols: 0,
            rows: 0,
            presented: Vec::new(),
            pending: Vec::new(),
        };

        let size = termsize::get().ok_or(InitError::SurfaceSize)?;
        execute!(
            surface.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            DisableLineWrap,
            cursor::Hide,
            SetTitle(TITLE),
            terminal::Clear(terminal::ClearType::All)
        )
        .map_err(InitError::Surface)?;

        surface.resize(size.cols, size.rows);
        info!(cols = size.cols, rows = size.rows, "terminal surface opened");
        Ok(surface)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Framebuffer size matching the surface, two pixels per cell vertically
    pub fn framebuffer_size(&self) -> (usize, usize) {
        (self.cols as usize, self.rows as usize * 2)
    }

    /// Adopts a new terminal size; the next present redraws every cell
    pub fn resize(&mut self, cols: u16, rows: u16) {
        debug!(cols, rows, "surface resized");
        self.cols = cols;
        self.rows = rows;
        self.presented = vec![None; cols as usize * rows as usize];
    }

    /// Presents the framebuffer, optionally with a status line on top
    pub fn present(&mut self, framebuffer: &Framebuffer, status: Option<&str>) -> io::Result<()> {
        compose(framebuffer, self.cols, self.rows, &mut self.pending);
        if let Some(text) = status {
            overlay_text(&mut self.pending, self.cols, text);
        }

        queue!(self.out, BeginSynchronizedUpdate)?;
        let mut fg = None;
        let mut bg = None;
        for (i, glyph) in self.pending.iter().enumerate() {
            if self.presented[i] == Some(*glyph) {
                continue;
            }
            self.presented[i] = Some(*glyph);

            let x = (i % self.cols as usize) as u16;
            let y = (i / self.cols as usize) as u16;
            queue!(self.out, cursor::MoveTo(x, y))?;
            if fg != Some(glyph.fg) {
                fg = Some(glyph.fg);
                queue!(self.out, SetForegroundColor(to_color(glyph.fg)))?;
            }
            if bg != Some(glyph.bg) {
                bg = Some(glyph.bg);
                queue!(self.out, SetBackgroundColor(to_color(glyph.bg)))?;
            }
            queue!(self.out, Print(glyph.ch))?;
        }
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        let restored = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        if let Err(e) = restored {
            warn!("failed to restore terminal screen: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("failed to leave raw mode: {e}");
        }
        info!("terminal restored");
    }
}
