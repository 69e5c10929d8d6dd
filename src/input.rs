use crate::math::terminal_cell_to_window;
use crate::picking::resolve_click;
use crate::state::AppState;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::io;
use std::time::Instant;
use tracing::{debug, info};

/// Input the application reacts to; everything else is dropped at translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Left button press at a window position
    LeftPress { xpos: f64, ypos: f64 },
    /// Escape key
    Escape,
    /// External close signal
    CloseRequested,
    /// New terminal size in cells
    Resized { cols: u16, rows: u16 },
}

impl InputEvent {
    /// Translates a terminal event, given the current terminal size in cells
    pub fn from_terminal(event: &Event, cols: u16, rows: u16) -> Option<InputEvent> {
        match event {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                let (xpos, ypos) = terminal_cell_to_window(*column, *row, cols, rows);
                Some(InputEvent::LeftPress { xpos, ypos })
            }
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Esc => Some(InputEvent::Escape),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::CloseRequested)
                }
                _ => None,
            },
            Event::Resize(cols, rows) => Some(InputEvent::Resized {
                cols: *cols,
                rows: *rows,
            }),
            _ => None,
        }
    }

    /// Applies the event to the application state
    pub fn apply(self, state: &mut AppState) {
        match self {
            InputEvent::LeftPress { xpos, ypos } => resolve_click(state, xpos, ypos),
            InputEvent::Escape => {
                info!("escape pressed, closing");
                state.request_close();
            }
            InputEvent::CloseRequested => {
                info!("close requested");
                state.request_close();
            }
            // the surface handles size changes
            InputEvent::Resized { .. } => {}
        }
    }
}

/// Events collected between two frames, applied in arrival order
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Reads terminal events until the deadline passes, translating as they arrive
    pub fn collect_until(&mut self, deadline: Instant, cols: u16, rows: u16) -> io::Result<()> {
        let (mut cols, mut rows) = (cols, rows);
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                return Ok(());
            }
            let raw = event::read()?;
            if let Some(input) = InputEvent::from_terminal(&raw, cols, rows) {
                if let InputEvent::Resized { cols: c, rows: r } = input {
                    (cols, rows) = (c, r);
                }
                debug!(?input, "queued input");
                self.push(input);
            }
        }
    }

    /// Empties the queue in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(column: u16, row: u16, button: MouseButton) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn left_press_maps_to_window_coordinates() {
        let event = InputEvent::from_terminal(&press(40, 20, MouseButton::Left), 80, 40);
        let Some(InputEvent::LeftPress { xpos, ypos }) = event else {
            panic!("expected a left press, got {event:?}");
        };
        assert!((xpos - 405.0).abs() < 1e-9, "xpos {xpos}");
        assert!((ypos - 410.0).abs() < 1e-9, "ypos {ypos}");
    }

    #[test]
    fn other_buttons_and_keys_are_ignored() {
        assert_eq!(InputEvent::from_terminal(&press(1, 1, MouseButton::Right), 80, 40), None);
        let q = key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(InputEvent::from_terminal(&q, 80, 40), None);
        let esc_release = key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(InputEvent::from_terminal(&esc_release, 80, 40), None);
    }

    #[test]
    fn escape_and_ctrl_c_request_close() {
        let esc = key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(InputEvent::from_terminal(&esc, 80, 40), Some(InputEvent::Escape));

        let ctrl_c = key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press);
        assert_eq!(InputEvent::from_terminal(&ctrl_c, 80, 40), Some(InputEvent::CloseRequested));

        let mut state = AppState::new();
        InputEvent::Escape.apply(&mut state);
        assert!(state.should_close());
    }

    #[test]
    fn resize_is_reported() {
        assert_eq!(
            InputEvent::from_terminal(&Event::Resize(100, 30), 80, 40),
            Some(InputEvent::Resized { cols: 100, rows: 30 })
        );
    }

    #[test]
    fn queue_applies_in_arrival_order() {
        let mut state = AppState::new();
        let mut queue = EventQueue::new();
        queue.push(InputEvent::LeftPress { xpos: 400.0, ypos: 400.0 });
        queue.push(InputEvent::LeftPress { xpos: 0.0, ypos: 0.0 });
        queue.push(InputEvent::LeftPress { xpos: 240.0, ypos: 560.0 });

        for event in queue.drain() {
            event.apply(&mut state);
        }
        assert!(queue.is_empty());
        assert_eq!(state.selected_index(), 7);
    }
}
