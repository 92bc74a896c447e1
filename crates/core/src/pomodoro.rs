// crates/core/src/pomodoro.rs
//! Pomodoro countdown state machine.
//!
//! A single owned countdown driven by an external one-second tick. The
//! timer is never persisted; whoever owns the view owns the state. Finishing
//! a phase stops the timer and flips the mode, it never auto-starts the next
//! phase.

/// Which phase the countdown is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Work,
    Break,
}

/// Timer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Emitted by `tick()` when a phase reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The named phase just finished; the timer is now idle in the other
    /// mode with a full countdown.
    PhaseComplete(TimerMode),
}

/// Default work phase length: 25 minutes.
pub const DEFAULT_WORK_SECS: u32 = 25 * 60;
/// Default break phase length: 5 minutes.
pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    mode: TimerMode,
    state: TimerState,
    remaining_secs: u32,
    work_secs: u32,
    break_secs: u32,
}

impl PomodoroTimer {
    /// A fresh idle work timer with the default 25/5 durations.
    pub fn new() -> Self {
        Self::with_durations(DEFAULT_WORK_SECS, DEFAULT_BREAK_SECS)
    }

    /// A fresh idle work timer with custom durations. Zero durations are
    /// bumped to one second so a phase always takes at least one tick.
    pub fn with_durations(work_secs: u32, break_secs: u32) -> Self {
        let work_secs = work_secs.max(1);
        let break_secs = break_secs.max(1);
        Self {
            mode: TimerMode::Work,
            state: TimerState::Idle,
            remaining_secs: work_secs,
            work_secs,
            break_secs,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    fn phase_secs(&self) -> u32 {
        match self.mode {
            TimerMode::Work => self.work_secs,
            TimerMode::Break => self.break_secs,
        }
    }

    /// Fraction of the current phase already elapsed, in [0, 1].
    pub fn progress(&self) -> f32 {
        let total = self.phase_secs();
        (total - self.remaining_secs) as f32 / total as f32
    }

    /// Start (from idle) or resume (from paused) the countdown.
    pub fn start(&mut self) {
        self.state = TimerState::Running;
    }

    /// Pause a running countdown. No-op otherwise.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    /// Stop and reload the current mode's full duration.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.remaining_secs = self.phase_secs();
    }

    /// Switch to the given mode, stopped, with a full countdown.
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.reset();
    }

    /// Advance the countdown by one second. Returns `PhaseComplete` when the
    /// phase finishes; ticks while idle or paused do nothing.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }

        let finished = self.mode;
        self.mode = match finished {
            TimerMode::Work => TimerMode::Break,
            TimerMode::Break => TimerMode::Work,
        };
        self.state = TimerState::Idle;
        self.remaining_secs = self.phase_secs();
        Some(TimerEvent::PhaseComplete(finished))
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_idle_work() {
        let timer = PomodoroTimer::new();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.remaining_secs(), DEFAULT_WORK_SECS);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut timer = PomodoroTimer::new();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining_secs(), DEFAULT_WORK_SECS);

        timer.start();
        timer.tick();
        timer.pause();
        timer.tick();
        assert_eq!(timer.remaining_secs(), DEFAULT_WORK_SECS - 1);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut timer = PomodoroTimer::with_durations(10, 5);
        timer.start();
        timer.tick();
        timer.pause();
        assert_eq!(timer.state(), TimerState::Paused);
        timer.start();
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining_secs(), 9);
    }

    #[test]
    fn test_work_phase_completion_flips_to_break() {
        let mut timer = PomodoroTimer::with_durations(2, 5);
        timer.start();
        assert_eq!(timer.tick(), None);
        assert_eq!(
            timer.tick(),
            Some(TimerEvent::PhaseComplete(TimerMode::Work))
        );
        assert_eq!(timer.mode(), TimerMode::Break);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 5);
    }

    #[test]
    fn test_break_phase_completion_flips_to_work() {
        let mut timer = PomodoroTimer::with_durations(3, 1);
        timer.switch_mode(TimerMode::Break);
        timer.start();
        assert_eq!(
            timer.tick(),
            Some(TimerEvent::PhaseComplete(TimerMode::Break))
        );
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.remaining_secs(), 3);
    }

    #[test]
    fn test_reset_reloads_current_phase() {
        let mut timer = PomodoroTimer::with_durations(10, 5);
        timer.start();
        timer.tick();
        timer.tick();
        timer.reset();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn test_switch_mode_stops_timer() {
        let mut timer = PomodoroTimer::with_durations(10, 5);
        timer.start();
        timer.tick();
        timer.switch_mode(TimerMode::Break);
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.mode(), TimerMode::Break);
        assert_eq!(timer.remaining_secs(), 5);
    }

    #[test]
    fn test_progress_advances() {
        let mut timer = PomodoroTimer::with_durations(4, 5);
        timer.start();
        timer.tick();
        assert!((timer.progress() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_duration_is_bumped() {
        let timer = PomodoroTimer::with_durations(0, 0);
        assert_eq!(timer.remaining_secs(), 1);
    }
}
