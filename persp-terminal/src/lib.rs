/// Terminal front end for the perspective viewer
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info, warn};
use persp_core::{Controller, Observer, Scene, Viewer};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod error;
pub mod input;
pub mod renderer;

pub use config::Config;
pub use error::{AppError, ConfigError, Result};
pub use input::{KeyAction, KeyTracker};
pub use renderer::AsciiRenderer;

/// Main application struct driving a viewer in the terminal
pub struct TerminalApp<S, C> {
    viewer: Viewer<S, C>,
    renderer: AsciiRenderer,
    keys: KeyTracker,
    tps: u32,
    running: bool,
    last_report: Instant,
    frame_count: u32,
    fps: f32,
}

impl<S: Scene, C: Controller> TerminalApp<S, C> {
    pub fn new(viewer: Viewer<S, C>, config: &Config) -> Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            viewer,
            renderer: AsciiRenderer::new(
                width as usize,
                height as usize,
                config.screen.cell_aspect,
            ),
            keys: KeyTracker::new(false),
            tps: config.app.tps,
            running: true,
            last_report: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn observer(&self) -> &Observer {
        self.viewer.observer()
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            warn!("terminal does not report key releases; keys act per press");
        }
        self.keys = KeyTracker::new(enhanced);

        let result = self.main_loop();
        let restored = restore_terminal(enhanced);

        run_outcome(result, restored)
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_secs_f64(1.0 / self.tps.max(1) as f64);
        info!("starting frame loop at {} tps", self.tps);

        while self.running {
            let frame_start = Instant::now();

            self.handle_input()?;

            // Close requested: drop the in-progress frame
            if !self.running {
                break;
            }

            self.render()?;
            self.keys.end_frame();

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_report).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_report).as_secs_f32();
                self.frame_count = 0;
                self.last_report = now;
                info!("FPS: {:.1}", self.fps);
            }
        }

        info!("frame loop stopped");
        Ok(())
    }

    /// Drain every pending terminal event without blocking
    fn handle_input(&mut self) -> Result<()> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => match input::classify(&key_event) {
                    KeyAction::Quit => {
                        debug!("close requested");
                        self.running = false;
                        return Ok(());
                    }
                    KeyAction::Control(key) => self.keys.handle(key, key_event.kind),
                    KeyAction::Ignored => {}
                },
                Event::Resize(width, height) => {
                    debug!("terminal resized to {}x{}", width, height);
                    self.renderer.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let panel = self.viewer.frame(self.keys.held());

        self.renderer.clear();
        self.renderer.composite(&panel, (0, 0));

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let origin = self.viewer.observer().origin;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "({:.1}, {:.1}, {:.1}) | FPS: {:.1} | WASDQE=Pan Arrows=Turn ,/.=Roll Esc=Quit",
                origin.x, origin.y, origin.z, self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// A loop failure outranks a cleanup failure
fn run_outcome(result: Result<()>, restored: Result<()>) -> Result<()> {
    result.and(restored)
}

/// Undo raw mode, the alternate screen and keyboard enhancement.
///
/// Every step is attempted; the first failure is returned.
fn restore_terminal(enhanced: bool) -> Result<()> {
    let popped = if enhanced {
        execute!(stdout(), PopKeyboardEnhancementFlags)
    } else {
        Ok(())
    };
    let left = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    let raw = terminal::disable_raw_mode();

    popped.and(left).and(raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn failure(message: &str) -> Result<()> {
        Err(AppError::Io(io::Error::new(io::ErrorKind::Other, message.to_string())))
    }

    #[test]
    fn test_loop_error_wins_over_cleanup_error() {
        let reported = run_outcome(failure("loop"), failure("cleanup")).unwrap_err();
        assert_eq!(reported.to_string(), "terminal error: loop");
    }

    #[test]
    fn test_cleanup_error_reported_after_clean_loop() {
        let reported = run_outcome(Ok(()), failure("cleanup")).unwrap_err();
        assert_eq!(reported.to_string(), "terminal error: cleanup");
    }

    #[test]
    fn test_clean_run() {
        assert!(run_outcome(Ok(()), Ok(())).is_ok());
    }
}
