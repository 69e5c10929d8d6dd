use crate::graphics::Framebuffer;
use crate::input::{EventQueue, InputEvent};
use crate::renderer::Renderer;
use crate::state::AppState;
use crate::terminal::Surface;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Where frames go and where input comes from
pub trait Frontend {
    /// Framebuffer size that fills the frontend
    fn framebuffer_size(&self) -> (usize, usize);

    /// Adopts a new size reported by a resize event
    fn resize(&mut self, cols: u16, rows: u16);

    /// Shows a finished frame
    fn present(&mut self, framebuffer: &Framebuffer, status: Option<&str>) -> io::Result<()>;

    /// Queues input that arrives before the deadline
    fn collect_input(&mut self, deadline: Instant, queue: &mut EventQueue) -> io::Result<()>;
}

impl Frontend for Surface {
    fn framebuffer_size(&self) -> (usize, usize) {
        Surface::framebuffer_size(self)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        Surface::resize(self, cols, rows);
    }

    fn present(&mut self, framebuffer: &Framebuffer, status: Option<&str>) -> io::Result<()> {
        Surface::present(self, framebuffer, status)
    }

    fn collect_input(&mut self, deadline: Instant, queue: &mut EventQueue) -> io::Result<()> {
        queue.collect_until(deadline, self.cols(), self.rows())
    }
}

/// Loop settings taken from the command line
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub frame_budget: Duration,
    pub debug: bool,
}

impl LoopOptions {
    pub fn new(fps: u32, debug: bool) -> Self {
        LoopOptions {
            frame_budget: Duration::from_secs(1) / fps.max(1),
            debug,
        }
    }
}

/// Measured frame rate, refreshed once per second
struct FpsCounter {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl FpsCounter {
    fn new() -> Self {
        FpsCounter {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    fn frame(&mut self) {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
    }
}

fn status_line(state: &AppState, fps: f64) -> String {
    let selection = match state.selected() {
        Some(index) => index.to_string(),
        None => "none".to_string(),
    };
    format!(
        "{} {} | t {:.2} | selected {} | {:.1} fps",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        state.elapsed_time,
        selection,
        fps
    )
}

/// Runs frames until a close is requested, returning the number of frames drawn
pub fn run_loop<F: Frontend>(
    state: &mut AppState,
    renderer: &mut Renderer,
    frontend: &mut F,
    options: LoopOptions,
) -> io::Result<u64> {
    let mut events = EventQueue::new();
    let mut counter = FpsCounter::new();
    let mut frames = 0u64;

    while !state.should_close() {
        let frame_start = Instant::now();
        state.tick();
        renderer.render_frame(state);

        counter.frame();
        let status = options.debug.then(|| status_line(state, counter.fps));
        frontend.present(renderer.framebuffer(), status.as_deref())?;
        frames += 1;

        frontend.collect_input(frame_start + options.frame_budget, &mut events)?;
        for event in events.drain() {
            if let InputEvent::Resized { cols, rows } = event {
                frontend.resize(cols, rows);
                let (width, height) = frontend.framebuffer_size();
                renderer.resize(width, height);
            }
            event.apply(state);
        }
    }

    debug!(frames, elapsed_time = state.elapsed_time, "frame loop finished");
    Ok(frames)
}

/// Opens the terminal, builds the renderer and runs the demo to completion
pub fn run(options: LoopOptions) -> anyhow::Result<()> {
    let mut surface = Surface::open()?;
    let (width, height) = surface.framebuffer_size();
    let mut renderer = Renderer::new(width, height)?;
    let mut state = AppState::new();

    info!(?options, "entering frame loop");
    let result = run_loop(&mut state, &mut renderer, &mut surface, options);

    // release render resources before handing the terminal back
    drop(renderer);
    drop(surface);

    let frames = result?;
    info!(frames, "shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FRAME_STEP;

    /// Frontend that replays scripted input, one batch per frame
    struct Scripted {
        size: (usize, usize),
        script: Vec<Vec<InputEvent>>,
        presented: usize,
        statuses: Vec<Option<String>>,
    }

    impl Scripted {
        fn new(script: Vec<Vec<InputEvent>>) -> Self {
            Scripted {
                size: (24, 24),
                script,
                presented: 0,
                statuses: Vec::new(),
            }
        }
    }

    impl Frontend for Scripted {
        fn framebuffer_size(&self) -> (usize, usize) {
            self.size
        }

        fn resize(&mut self, cols: u16, rows: u16) {
            self.size = (cols as usize, rows as usize * 2);
        }

        fn present(&mut self, framebuffer: &Framebuffer, status: Option<&str>) -> io::Result<()> {
            assert_eq!((framebuffer.width(), framebuffer.height()), self.size);
            self.presented += 1;
            self.statuses.push(status.map(str::to_string));
            Ok(())
        }

        fn collect_input(&mut self, _deadline: Instant, queue: &mut EventQueue) -> io::Result<()> {
            let batch = if self.presented <= self.script.len() {
                self.script[self.presented - 1].clone()
            } else {
                vec![InputEvent::Escape]
            };
            for event in batch {
                queue.push(event);
            }
            Ok(())
        }
    }

    fn options() -> LoopOptions {
        LoopOptions {
            frame_budget: Duration::ZERO,
            debug: false,
        }
    }

    #[test]
    fn escape_ends_loop_at_next_check() {
        let mut state = AppState::new();
        let mut renderer = Renderer::new(24, 24).expect("renderer");
        let mut frontend = Scripted::new(vec![vec![], vec![], vec![InputEvent::Escape]]);

        let frames = run_loop(&mut state, &mut renderer, &mut frontend, options()).expect("loop");
        assert_eq!(frames, 3);
        assert_eq!(frontend.presented, 3);
        assert!((state.elapsed_time - 3.0 * FRAME_STEP).abs() < 1e-6);
    }

    #[test]
    fn clicks_between_frames_change_selection() {
        let mut state = AppState::new();
        let mut renderer = Renderer::new(24, 24).expect("renderer");
        let mut frontend = Scripted::new(vec![
            vec![InputEvent::LeftPress { xpos: 400.0, ypos: 400.0 }],
            vec![InputEvent::Escape],
        ]);

        run_loop(&mut state, &mut renderer, &mut frontend, options()).expect("loop");
        assert_eq!(state.selected_index(), 14);
        assert_eq!(renderer.program().uniforms().selected_index, 14);
    }

    #[test]
    fn resize_reaches_renderer() {
        let mut state = AppState::new();
        let mut renderer = Renderer::new(24, 24).expect("renderer");
        let mut frontend = Scripted::new(vec![
            vec![InputEvent::Resized { cols: 10, rows: 6 }],
            vec![InputEvent::Escape],
        ]);

        let frames = run_loop(&mut state, &mut renderer, &mut frontend, options()).expect("loop");
        assert_eq!(frames, 2);
        let fb = renderer.framebuffer();
        assert_eq!((fb.width(), fb.height()), (10, 12));
    }

    #[test]
    fn debug_status_line_reports_state() {
        let mut state = AppState::new();
        let mut renderer = Renderer::new(24, 24).expect("renderer");
        let mut frontend = Scripted::new(vec![vec![InputEvent::Escape]]);
        let options = LoopOptions {
            debug: true,
            ..options()
        };

        run_loop(&mut state, &mut renderer, &mut frontend, options).expect("loop");
        let status = frontend.statuses[0].as_deref().expect("status line");
        assert!(status.starts_with(env!("CARGO_PKG_NAME")));
        assert!(status.contains("t 0.02"));
        assert!(status.contains("selected none"));
    }

    #[test]
    fn frame_budget_follows_fps() {
        assert_eq!(LoopOptions::new(50, false).frame_budget, Duration::from_millis(20));
    }
}
