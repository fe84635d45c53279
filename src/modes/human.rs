use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, Instant};

use super::scheduler::{wait_until, TickScheduler};
use crate::game::{Command, GameConfig, GameEngine, GameEvent, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{draw_board, CellBuffer, Overlay, Renderer, Scene};

/// Interactive session: one engine, one tick timer, one terminal
pub struct HumanMode {
    engine: GameEngine,
    scheduler: TickScheduler,
    board: CellBuffer,
    overlay: Option<Overlay>,
    overlay_deadline: Option<Instant>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    dirty: bool,
}

impl HumanMode {
    /// `config` must already have passed [`GameConfig::validate`]
    pub fn new(config: GameConfig) -> Self {
        let board = CellBuffer::new(&config);
        let mut mode = Self {
            engine: GameEngine::new(config),
            scheduler: TickScheduler::new(),
            board,
            overlay: None,
            overlay_deadline: None,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            dirty: true,
        };
        mode.sync();
        mode
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

        info!("session started");
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;
        info!(
            "session ended after {} games, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Refresh the play clock in the header once a second
        let mut clock_timer = interval(Duration::from_secs(1));

        loop {
            if self.dirty {
                self.draw(terminal)?;
            }

            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = self.scheduler.tick() => {
                    self.on_tick();
                }

                _ = wait_until(self.overlay_deadline) => {
                    self.expire_overlay();
                }

                _ = clock_timer.tick() => {
                    if self.metrics.is_clock_running() {
                        self.metrics.update();
                        self.dirty = true;
                    }
                }

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

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let state = self.engine.state();
        let scene = Scene {
            board: &self.board,
            phase: state.phase,
            score: state.score,
            tick_interval_ms: state.tick_interval_ms,
            overlay: self.overlay,
            metrics: &self.metrics,
        };

        terminal
            .draw(|frame| self.renderer.render(frame, &scene))
            .context("Failed to draw frame")?;
        self.dirty = false;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(..) => self.dirty = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Command(command) => self.dispatch(command),
            KeyAction::Faster => self.nudge_speed(false),
            KeyAction::Slower => self.nudge_speed(true),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        self.engine.apply_command(command);
        self.sync();
    }

    pub fn on_tick(&mut self) -> StepResult {
        let result = self.engine.step();
        self.sync();
        result
    }

    /// Move the speed slider by one step
    fn nudge_speed(&mut self, slower: bool) {
        let current = self.engine.state().tick_interval_ms;
        let step = self.engine.config().speed_step_ms;
        let target = if slower {
            current.saturating_add(step)
        } else {
            current.saturating_sub(step)
        };
        self.dispatch(Command::SetSpeed(target));
    }

    fn expire_overlay(&mut self) {
        self.overlay_deadline = None;
        if matches!(self.overlay, Some(Overlay::GameOver { .. })) {
            self.overlay = None;
            self.dirty = true;
        }
    }

    /// Apply queued engine events in order
    fn sync(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                GameEvent::Redraw => {
                    draw_board(&mut self.board, self.engine.state(), self.engine.config());
                }
                // The header reads score and speed from the engine state
                GameEvent::ScoreChanged(_) | GameEvent::SpeedChanged(_) => {}
                GameEvent::TimerArmed(period) => self.scheduler.arm(period),
                GameEvent::TimerCancelled => self.scheduler.cancel(),
                GameEvent::Started => self.metrics.on_game_start(),
                GameEvent::Paused => {
                    self.overlay = Some(Overlay::Paused);
                    self.metrics.on_pause();
                }
                GameEvent::Resumed => {
                    self.overlay = None;
                    self.metrics.on_resume();
                }
                GameEvent::GameOver { score } => {
                    let display = Duration::from_millis(self.engine.config().game_over_display_ms);
                    self.overlay = Some(Overlay::GameOver { score });
                    self.overlay_deadline = Some(Instant::now() + display);
                    self.metrics.on_game_over(score);
                }
                GameEvent::OverlaysCleared => {
                    self.overlay = None;
                    self.overlay_deadline = None;
                }
            }
            self.dirty = true;
        }
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
