use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use lt_core::board::Board;
use lt_core::config::RenderConfig;
use lt_core::stop::StopSignal;
use lt_life::Automaton;
use lt_render::fps::FpsCounter;
use lt_render::session::RenderSession;

/// Frames averaged by the live FPS estimate.
const FPS_WINDOW: usize = 30;

/// État de la boucle de simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Ticks are being simulated and drawn.
    Running,
    /// Loop left; the session's final bytes are being written.
    Stopping,
    /// Final bytes written, nothing more will be emitted.
    Stopped,
}

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Ctrl-C (or any other holder of the [`StopSignal`]).
    Cancelled,
    /// `max_steps` generations were simulated.
    StepLimit,
    /// A tick failed to encode or write its frame.
    Failed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cancelled => "interrompu",
            Self::StepLimit => "limite de générations atteinte",
            Self::Failed => "erreur de rendu",
        })
    }
}

/// Résumé d'une exécution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunReport {
    /// Generations simulated (ticks completed).
    pub steps: u64,
    /// Frames written, the seed frame included.
    pub frames: u64,
    /// Why the loop ended.
    pub stop_reason: StopReason,
    /// Generations per second over the whole run.
    pub average_fps: f64,
}

/// Time left in the frame budget, `None` when the tick ran over.
///
/// Late ticks are not compensated on the next one.
#[must_use]
pub fn remaining(budget: Duration, elapsed: Duration) -> Option<Duration> {
    budget.checked_sub(elapsed).filter(|d| !d.is_zero())
}

/// Boucle update → encode → pacing.
///
/// Owns the board, the automaton and the render session. The stop flag is
/// read once per tick boundary, so a frame in progress always completes.
pub struct Scheduler<W: Write> {
    board: Board,
    life: Automaton,
    session: RenderSession<W>,
    stop: StopSignal,
    budget: Duration,
    max_steps: u64,
    state: SchedulerState,
    steps: u64,
    fps: FpsCounter,
}

impl<W: Write> Scheduler<W> {
    /// `board` must already be seeded and padded for `session`'s encoding.
    pub fn new(
        config: &RenderConfig,
        board: Board,
        session: RenderSession<W>,
        stop: StopSignal,
    ) -> Self {
        let life = Automaton::new(&board);
        Self {
            board,
            life,
            session,
            stop,
            budget: config.frame_budget(),
            max_steps: config.max_steps,
            state: SchedulerState::Running,
            steps: 0,
            fps: FpsCounter::new(FPS_WINDOW),
        }
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn session(&self) -> &RenderSession<W> {
        &self.session
    }

    /// Run until cancelled, the step limit is hit, or a frame fails.
    ///
    /// The session's final bytes are written exactly once on every exit.
    ///
    /// # Errors
    /// Returns the first encoding or I/O error, after the session is finished.
    pub fn run(&mut self) -> Result<RunReport> {
        let started = Instant::now();
        log::info!(
            "Démarrage : {}×{} {}, budget {:?}/génération",
            self.board.rows(),
            self.board.cols(),
            self.session.encoding(),
            self.budget
        );

        let outcome = self.run_ticks();
        self.state = SchedulerState::Stopping;
        let finished = self.session.finish();
        self.state = SchedulerState::Stopped;

        let stop_reason = match &outcome {
            Ok(reason) => *reason,
            Err(_) => StopReason::Failed,
        };
        let secs = started.elapsed().as_secs_f64();
        let report = RunReport {
            steps: self.steps,
            frames: self.session.frames(),
            stop_reason,
            average_fps: if secs > 0.0 { self.steps as f64 / secs } else { 0.0 },
        };
        log::info!(
            "Arrêt ({stop_reason}) après {} générations, {} frames, {:.1} fps (dernières frames : {:.1})",
            report.steps,
            report.frames,
            report.average_fps,
            self.fps.fps()
        );

        outcome.with_context(|| format!("Échec après {} générations", self.steps))?;
        finished.context("Impossible de restaurer l'état du terminal")?;
        Ok(report)
    }

    fn run_ticks(&mut self) -> Result<StopReason, lt_render::RenderError> {
        // generation 0
        self.session.init()?;
        self.session.render(&self.board)?;
        self.fps.tick(Instant::now());

        loop {
            if self.stop.is_stop_requested() {
                return Ok(StopReason::Cancelled);
            }
            if self.max_steps != 0 && self.steps >= self.max_steps {
                return Ok(StopReason::StepLimit);
            }

            let start = Instant::now();
            self.life.advance(&mut self.board);
            self.session.render(&self.board)?;
            self.steps += 1;
            let end = Instant::now();
            self.fps.tick(end);

            if let Some(rest) = remaining(self.budget, end.duration_since(start)) {
                std::thread::sleep(rest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_core::config::Encoding;
    use std::io;

    const CURSOR_HOME: &[u8] = b"\x1b[1;1H";

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn fast_config(encoding: Encoding, max_steps: u64) -> RenderConfig {
        RenderConfig {
            fps: 100_000.0,
            encoding,
            max_steps,
            ..RenderConfig::default()
        }
    }

    fn scheduler<W: Write>(config: &RenderConfig, sink: W, stop: StopSignal) -> Scheduler<W> {
        let board = lt_life::seed_board(config).unwrap();
        let session = RenderSession::new(config.encoding, config.rows, config.cols, sink);
        Scheduler::new(config, board, session, stop)
    }

    /// Sink that raises the stop flag once `trip_at` frames have been flushed.
    struct TrippingSink {
        bytes: Vec<u8>,
        frames: usize,
        trip_at: usize,
        stop: StopSignal,
    }

    impl Write for TrippingSink {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(data);
            Ok(data.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            if self.bytes.ends_with(b"\n") {
                self.frames += 1;
                if self.frames == self.trip_at {
                    self.stop.request_stop();
                }
            }
            Ok(())
        }
    }

    /// Sink that fails on the n-th frame.
    struct FailingSink {
        bytes: Vec<u8>,
        writes_left: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            if data.starts_with(CURSOR_HOME) {
                if self.writes_left == 0 {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout fermé"));
                }
                self.writes_left -= 1;
            }
            self.bytes.extend_from_slice(data);
            Ok(data.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn step_limit_runs_exact_ticks_and_finishes_once() {
        let config = fast_config(Encoding::BigPixel, 3);
        let mut sched = scheduler(&config, Vec::new(), StopSignal::new());
        let report = sched.run().unwrap();

        assert_eq!(report.steps, 3);
        assert_eq!(report.frames, 4);
        assert_eq!(report.stop_reason, StopReason::StepLimit);
        assert_eq!(sched.state(), SchedulerState::Stopped);
        assert!(sched.session().is_finished());

        let bytes = sched.session().writer();
        assert_eq!(count(bytes, CURSOR_HOME), 4);
        assert_eq!(count(bytes, b"\x1b[0m"), 1);
        assert!(bytes.ends_with(b"\x1b[0m"));
    }

    #[test]
    fn glider_advances_with_the_steps() {
        let config = fast_config(Encoding::Ascii, 4);
        let mut sched = scheduler(&config, Vec::new(), StopSignal::new());
        sched.run().unwrap();
        let alive: Vec<(usize, usize)> = (0..10)
            .flat_map(|r| (0..10).map(move |c| (r, c)))
            .filter(|&(r, c)| sched.board().get(r, c))
            .collect();
        assert_eq!(alive, vec![(3, 4), (4, 5), (5, 3), (5, 4), (5, 5)]);
    }

    #[test]
    fn cancellation_during_tick_two_lets_it_finish() {
        let stop = StopSignal::new();
        let sink = TrippingSink {
            bytes: Vec::new(),
            frames: 0,
            trip_at: 3,
            stop: stop.clone(),
        };
        let config = fast_config(Encoding::Ascii, 0);
        let mut sched = scheduler(&config, sink, stop);
        let report = sched.run().unwrap();

        assert_eq!(report.stop_reason, StopReason::Cancelled);
        assert_eq!(report.steps, 2);
        assert_eq!(report.frames, 3);
        assert_eq!(count(&sched.session().writer().bytes, CURSOR_HOME), 3);
    }

    #[test]
    fn stop_before_start_still_draws_seed() {
        let stop = StopSignal::new();
        stop.request_stop();
        let config = fast_config(Encoding::Sixel, 0);
        let mut sched = scheduler(&config, Vec::new(), stop);
        let report = sched.run().unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(report.frames, 1);
        assert!(sched.session().writer().ends_with(b"\x1b\\\x1b[0m"));
    }

    #[test]
    fn failed_tick_still_finishes() {
        let sink = FailingSink {
            bytes: Vec::new(),
            writes_left: 2,
        };
        let config = fast_config(Encoding::BigPixel, 0);
        let mut sched = scheduler(&config, sink, StopSignal::new());
        assert!(sched.run().is_err());
        assert_eq!(sched.state(), SchedulerState::Stopped);
        assert_eq!(sched.session().frames(), 2);
        assert!(sched.session().writer().bytes.ends_with(b"\x1b[0m"));
    }

    #[test]
    fn pacer_sleeps_only_the_remainder() {
        let budget = Duration::from_millis(100);
        assert_eq!(
            remaining(budget, Duration::from_millis(30)),
            Some(Duration::from_millis(70))
        );
        assert_eq!(remaining(budget, budget), None);
        assert_eq!(remaining(budget, Duration::from_millis(250)), None);
        assert_eq!(remaining(budget, Duration::ZERO), Some(budget));
    }
}
