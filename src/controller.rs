//! Interaction controller: play/pause state, tick interval and the edits a
//! user can make to the board.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::LifeConfig;
use crate::error::IntervalError;
use crate::grid::GridStore;
use crate::rules;
use crate::timer::Ticker;

/// Playback state. The controller starts paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Paused,
    Running,
}

/// Longest accepted tick interval.
pub const MAX_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Parses interval text as a positive number of milliseconds, at most
/// [`MAX_INTERVAL`]. Values that round to zero nanoseconds are rejected.
pub fn parse_interval(text: &str) -> Result<Duration, IntervalError> {
    let millis: f64 = text
        .trim()
        .parse()
        .map_err(|_| IntervalError::NotNumeric(text.to_owned()))?;
    if !millis.is_finite() || millis <= 0.0 {
        return Err(IntervalError::NonPositive(millis));
    }
    let interval = Duration::try_from_secs_f64(millis / 1000.0)
        .map_err(|_| IntervalError::TooLarge(millis))?;
    if interval.is_zero() {
        return Err(IntervalError::NonPositive(millis));
    }
    if interval > MAX_INTERVAL {
        return Err(IntervalError::TooLarge(millis));
    }
    Ok(interval)
}

pub struct Controller {
    store: GridStore,
    run_state: RunState,
    interval_text: String,
    interval_error: Option<IntervalError>,
    ticker: Ticker,
    rng: StdRng,
}

impl Controller {
    pub fn new(cols: usize, rows: usize, config: &LifeConfig) -> Result<Self, IntervalError> {
        let interval = parse_interval(&config.update_interval)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            store: GridStore::new(cols, rows),
            run_state: RunState::Paused,
            interval_text: config.update_interval.clone(),
            interval_error: None,
            ticker: Ticker::new(interval),
            rng,
        })
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Interval text exactly as last entered.
    pub fn interval_text(&self) -> &str {
        &self.interval_text
    }

    /// Why the current interval text is not in effect, if it isn't.
    pub fn interval_error(&self) -> Option<&IntervalError> {
        self.interval_error.as_ref()
    }

    /// The period actually used by the timer.
    pub fn interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// When the next generation is due, if running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }

    pub fn set_running(&mut self, running: bool, now: Instant) {
        match (self.run_state, running) {
            (RunState::Paused, true) => {
                self.run_state = RunState::Running;
                self.ticker.start(now);
                log::info!("Running, one generation every {:?}", self.ticker.interval());
            }
            (RunState::Running, false) => {
                self.run_state = RunState::Paused;
                self.ticker.cancel();
                log::info!("Stopped at generation {}", self.store.generation());
            }
            _ => {}
        }
    }

    /// Stores `text` as the interval entry. A valid value becomes the timer
    /// period (restarting the timer when running); an invalid one leaves the
    /// previous period in force.
    pub fn set_interval(&mut self, text: &str, now: Instant) -> Result<Duration, IntervalError> {
        self.interval_text = text.to_owned();
        match parse_interval(text) {
            Ok(interval) => {
                self.interval_error = None;
                self.ticker.set_interval(interval, now);
                log::debug!("Update interval set to {:?}", interval);
                Ok(interval)
            }
            Err(e) => {
                log::warn!("Keeping update interval {:?}: {}", self.ticker.interval(), e);
                self.interval_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Toggles the cell at signed grid coordinates. Ignored while running or
    /// outside the grid. Returns whether the grid changed.
    pub fn toggle(&mut self, x: i64, y: i64) -> bool {
        if self.is_running() {
            return false;
        }
        let toggled = self.store.toggle(x, y);
        if toggled {
            log::debug!("Toggled cell ({x}, {y})");
        } else {
            log::debug!("Ignoring click outside the board at ({x}, {y})");
        }
        toggled
    }

    pub fn randomize(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.store.randomize(&mut self.rng);
        log::info!("Randomized board, {} cells alive", self.store.alive().len());
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.store.clear();
        log::info!("Cleared board");
        true
    }

    /// Advances one generation if the timer is due. Returns whether it did.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_running() || !self.ticker.fire(now) {
            return false;
        }
        self.step();
        true
    }

    /// Computes and installs the next generation.
    pub fn step(&mut self) {
        let next = rules::step(self.store.grid());
        self.store.advance(next);
        log::trace!(
            "Generation {}: {} cells alive",
            self.store.generation(),
            self.store.alive().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    const MS: Duration = Duration::from_millis(1);

    fn controller() -> Controller {
        let config = LifeConfig {
            seed: Some(11),
            ..LifeConfig::default()
        };
        Controller::new(8, 6, &config).unwrap()
    }

    #[test]
    fn parses_intervals() {
        assert_eq!(parse_interval("100"), Ok(100 * MS));
        assert_eq!(parse_interval(" 250 "), Ok(250 * MS));
        assert_eq!(parse_interval("12.5"), Ok(Duration::from_micros(12_500)));
        assert_eq!(
            parse_interval("abc"),
            Err(IntervalError::NotNumeric("abc".to_owned()))
        );
        assert_eq!(parse_interval(""), Err(IntervalError::NotNumeric(String::new())));
        assert_eq!(parse_interval("0"), Err(IntervalError::NonPositive(0.0)));
        assert_eq!(parse_interval("-5"), Err(IntervalError::NonPositive(-5.0)));
        assert!(matches!(parse_interval("inf"), Err(IntervalError::NonPositive(_))));
        assert_eq!(parse_interval("1e-9"), Err(IntervalError::NonPositive(1e-9)));
    }

    #[test]
    fn rejects_intervals_beyond_maximum() {
        assert_eq!(parse_interval("3600000"), Ok(MAX_INTERVAL));
        assert_eq!(parse_interval("3600001"), Err(IntervalError::TooLarge(3_600_001.0)));
        assert_eq!(parse_interval("1e22"), Err(IntervalError::TooLarge(1e22)));
        assert_eq!(parse_interval("1e30"), Err(IntervalError::TooLarge(1e30)));
    }

    #[test]
    fn huge_interval_while_running_keeps_timer() {
        let t0 = Instant::now();
        let mut controller = controller();
        controller.set_running(true, t0);

        assert!(matches!(
            controller.set_interval("1e22", t0),
            Err(IntervalError::TooLarge(_))
        ));
        assert_eq!(controller.interval(), 100 * MS);
        assert_eq!(controller.next_deadline(), Some(t0 + 100 * MS));
    }

    #[test]
    fn starts_paused_with_default_interval() {
        let controller = controller();
        assert_eq!(controller.run_state(), RunState::Paused);
        assert_eq!(controller.interval(), 100 * MS);
        assert_eq!(controller.interval_text(), "100");
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn run_and_stop_transitions() {
        let t0 = Instant::now();
        let mut controller = controller();

        controller.set_running(true, t0);
        assert_eq!(controller.run_state(), RunState::Running);
        assert_eq!(controller.next_deadline(), Some(t0 + 100 * MS));

        // Running again is not a transition and does not restart the timer.
        controller.set_running(true, t0 + 50 * MS);
        assert_eq!(controller.next_deadline(), Some(t0 + 100 * MS));

        controller.set_running(false, t0 + 60 * MS);
        assert_eq!(controller.run_state(), RunState::Paused);
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn edits_blocked_while_running() {
        let t0 = Instant::now();
        let mut controller = controller();
        assert!(controller.toggle(1, 1));

        controller.set_running(true, t0);
        let before = controller.store().grid().clone();
        assert!(!controller.toggle(2, 2));
        assert!(!controller.randomize());
        assert!(!controller.clear());
        assert_eq!(controller.store().grid(), &before);

        controller.set_running(false, t0);
        assert!(controller.clear());
        assert!(controller.store().alive().is_empty());
    }

    #[test]
    fn click_outside_is_discarded() {
        let mut controller = controller();
        assert!(!controller.toggle(8, 0));
        assert!(!controller.toggle(0, -1));
        assert!(controller.store().alive().is_empty());
    }

    #[test]
    fn tick_steps_only_when_due() {
        let t0 = Instant::now();
        let mut controller = controller();
        for (x, y) in [(3, 1), (3, 2), (3, 3)] {
            controller.toggle(x, y);
        }

        assert!(!controller.tick(t0 + 1000 * MS), "paused controller must not step");

        controller.set_running(true, t0);
        assert!(!controller.tick(t0 + 10 * MS));
        assert!(controller.tick(t0 + 100 * MS));
        assert_eq!(controller.store().generation(), 1);

        let mut alive = controller.store().alive().to_vec();
        alive.sort();
        assert_eq!(alive, vec![Cell::new(2, 2), Cell::new(3, 2), Cell::new(4, 2)]);

        assert!(controller.tick(t0 + 200 * MS));
        let mut alive = controller.store().alive().to_vec();
        alive.sort();
        assert_eq!(alive, vec![Cell::new(3, 1), Cell::new(3, 2), Cell::new(3, 3)]);
    }

    #[test]
    fn interval_change_restarts_timer() {
        let t0 = Instant::now();
        let mut controller = controller();
        controller.set_running(true, t0);

        assert_eq!(controller.set_interval("40", t0 + 30 * MS), Ok(40 * MS));
        assert_eq!(controller.next_deadline(), Some(t0 + 70 * MS));
        assert_eq!(controller.interval_error(), None);
    }

    #[test]
    fn invalid_interval_keeps_previous_period() {
        let t0 = Instant::now();
        let mut controller = controller();
        controller.set_running(true, t0);

        assert!(controller.set_interval("fast", t0 + 10 * MS).is_err());
        assert_eq!(controller.interval_text(), "fast");
        assert_eq!(controller.interval(), 100 * MS);
        assert_eq!(controller.next_deadline(), Some(t0 + 100 * MS));
        assert!(controller.interval_error().is_some());

        assert!(controller.set_interval("0", t0).is_err());
        assert_eq!(controller.interval(), 100 * MS);

        assert!(controller.set_interval("250", t0).is_ok());
        assert_eq!(controller.interval_error(), None);
    }

    #[test]
    fn seeded_randomize_is_reproducible() {
        let mut a = controller();
        let mut b = controller();
        assert!(a.randomize());
        assert!(b.randomize());
        assert_eq!(a.store().grid(), b.store().grid());
    }
}
