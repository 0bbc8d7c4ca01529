use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};

use crate::game::{GameConfig, GameSession, TimerCommand};
use crate::highscore::ScoreStore;
use crate::input::{InputHandler, KeyCommand};
use crate::render::Renderer;

/// The tick scheduler: a stoppable, reschedulable wrapper over a tokio
/// interval. A stopped timer pends forever, so it can sit in a `select!`
/// arm without ever firing; applying a command is idempotent.
pub struct TickTimer {
    interval: Option<Interval>,
}

impl TickTimer {
    pub fn stopped() -> Self {
        Self { interval: None }
    }

    pub fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Start(period) | TimerCommand::Reschedule(period) => {
                // First fire one full period from now: a reschedule right
                // after a tick must neither duplicate nor skip a tick at
                // the new speed.
                let mut timer = interval_at(Instant::now() + period, period);
                timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.interval = Some(timer);
            }
            TimerCommand::Stop => {
                self.interval = None;
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

/// Wires the game session to the terminal: key events in, frames out, with
/// the tick timer driven by the session's own timer commands.
pub struct App {
    session: GameSession,
    renderer: Renderer,
    input: InputHandler,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, store: Box<dyn ScoreStore>) -> Result<Self> {
        Ok(Self {
            session: GameSession::new(config, store)?,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run event loop with cleanup
        let result = self.run_event_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The tick timer starts disarmed; the session arms it on start
        let mut tick_timer = TickTimer::stopped();

        // Render at 30 FPS (33ms per frame) regardless of game speed
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let outcome = self.session.tick()?;
                    if let Some(command) = outcome.timer {
                        tick_timer.apply(command);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.session.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut TickTimer) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input.handle_key_event(key) {
                KeyCommand::Steer(direction) => {
                    self.session.set_pending_direction(direction);
                }
                KeyCommand::Start => {
                    if let Some(command) = self.session.start() {
                        tick_timer.apply(command);
                    }
                }
                KeyCommand::TogglePause => {
                    if let Some(command) = self.session.toggle_pause() {
                        tick_timer.apply(command);
                    }
                }
                KeyCommand::Reset => {
                    let command = self.session.reset();
                    tick_timer.apply(command);
                }
                KeyCommand::Quit => {
                    self.should_quit = true;
                }
                KeyCommand::None => {}
            }
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GamePhase;
    use crate::highscore::MemoryScoreStore;

    #[test]
    fn test_app_starts_in_ready_phase() {
        let app = App::new(GameConfig::default(), Box::new(MemoryScoreStore::new())).unwrap();
        assert_eq!(app.session.phase(), GamePhase::Ready);
        assert_eq!(app.session.score(), 0);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_tick_timer_commands() {
        let mut timer = TickTimer::stopped();
        assert!(!timer.is_running());

        timer.apply(TimerCommand::Start(Duration::from_millis(150)));
        assert!(timer.is_running());

        timer.apply(TimerCommand::Reschedule(Duration::from_millis(148)));
        assert!(timer.is_running());

        timer.apply(TimerCommand::Stop);
        assert!(!timer.is_running());

        // Stopping twice is fine
        timer.apply(TimerCommand::Stop);
        assert!(!timer.is_running());
    }
}
