//! Cycle clock with fixed-timestep accumulator
//!
//! Owns the authoritative [`CrankState`]. Wall time is fed in through
//! [`CycleClock::tick`] and converted into whole logical steps; every step
//! advances the crank by `degrees_per_step × speed` and wraps at 720°.

use crate::event::CycleEvent;
use otto_core::{ClockConfig, CrankState, OttoError, Phase, Result, CYCLE_DEGREES};
use tracing::{debug, warn};

/// Longest wall-time slice consumed by a single `tick`, in milliseconds
pub const MAX_FRAME_MS: f64 = 250.0;

/// Advances the crank angle over time or on manual steps
pub struct CycleClock {
    state: CrankState,
    config: ClockConfig,
    /// Wall time not yet converted into steps
    accumulator_ms: f64,
    /// Completed 720° cycles since creation
    cycles: u64,
}

impl Default for CycleClock {
    fn default() -> Self {
        Self {
            state: CrankState::new(),
            config: ClockConfig::default(),
            accumulator_ms: 0.0,
            cycles: 0,
        }
    }
}

impl CycleClock {
    /// Create a stopped clock at 0° with speed 1 and a 60 Hz step
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with custom step settings
    pub fn with_config(config: ClockConfig) -> Result<Self> {
        config.validate()?;
        let mut clock = Self {
            config,
            ..Self::default()
        };
        clock
            .state
            .set_speed_multiplier(config.min_speed, config.min_speed, config.max_speed);
        Ok(clock)
    }

    /// Set the initial speed before the clock is first started.
    ///
    /// Out-of-range values are clamped like [`CycleClock::set_speed`].
    pub fn with_speed(mut self, speed: i32) -> Self {
        let applied = self.clamp_speed(speed);
        self.state
            .set_speed_multiplier(applied, self.config.min_speed, self.config.max_speed);
        self
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Swap in new step settings, keeping the angle and run state.
    ///
    /// The current speed is clamped into the new range and any partial step
    /// is dropped.
    pub fn set_config(&mut self, config: ClockConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        let speed = self.state.speed_multiplier();
        self.state
            .set_speed_multiplier(speed, config.min_speed, config.max_speed);
        self.accumulator_ms = 0.0;
        debug!(steps_per_second = config.steps_per_second, "clock config replaced");
        Ok(())
    }

    /// Read-only snapshot of the crank state
    pub fn current_state(&self) -> CrankState {
        self.state
    }

    pub fn angle_degrees(&self) -> f64 {
        self.state.angle_degrees()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_running(&self) -> bool {
        self.state.running()
    }

    pub fn speed(&self) -> u8 {
        self.state.speed_multiplier()
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Begin auto-advancing. The angle is left untouched.
    pub fn start(&mut self) {
        if !self.state.running() {
            debug!(angle = self.state.angle_degrees(), "clock started");
        }
        self.state.set_running(true);
    }

    /// Stop auto-advancing and drop any partially accumulated step
    pub fn stop(&mut self) {
        if self.state.running() {
            debug!(angle = self.state.angle_degrees(), "clock stopped");
        }
        self.state.set_running(false);
        self.accumulator_ms = 0.0;
    }

    pub fn toggle(&mut self) {
        if self.state.running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Change the speed multiplier, clamping into the configured range.
    ///
    /// Only takes effect while running; returns the multiplier in force after
    /// the call.
    pub fn set_speed(&mut self, speed: i32) -> u8 {
        if !self.state.running() {
            debug!(requested = speed, "speed change ignored while stopped");
            return self.state.speed_multiplier();
        }
        let applied = self.clamp_speed(speed);
        self.state
            .set_speed_multiplier(applied, self.config.min_speed, self.config.max_speed);
        applied
    }

    /// Change the speed multiplier, rejecting out-of-range values.
    ///
    /// Like [`CycleClock::set_speed`] the call is ignored while stopped.
    pub fn try_set_speed(&mut self, speed: i32) -> Result<u8> {
        let (min, max) = (self.config.min_speed, self.config.max_speed);
        if speed < min as i32 || speed > max as i32 {
            return Err(OttoError::InvalidArgument(format!(
                "speed must be between {min} and {max}, got {speed}"
            )));
        }
        Ok(self.set_speed(speed))
    }

    /// Feed elapsed wall time, in milliseconds, since the previous frame.
    ///
    /// Converts the accumulated time into whole steps and applies each one.
    /// Returns every phase transition (and cycle wrap) in the order crossed.
    /// Does nothing while stopped.
    pub fn tick(&mut self, elapsed_ms: f64) -> Vec<CycleEvent> {
        let mut events = Vec::new();
        if !self.state.running() {
            return events;
        }
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            warn!(elapsed_ms, "ignoring invalid frame time");
            return events;
        }

        self.accumulator_ms += elapsed_ms.min(MAX_FRAME_MS);
        let step_ms = self.config.step_ms();
        while self.accumulator_ms >= step_ms {
            self.accumulator_ms -= step_ms;
            self.advance_one(&mut events);
        }
        events
    }

    /// Apply exactly one logical step regardless of wall time.
    ///
    /// Does nothing while stopped.
    pub fn step(&mut self) -> Vec<CycleEvent> {
        let mut events = Vec::new();
        if self.state.running() {
            self.advance_one(&mut events);
        }
        events
    }

    /// Manually turn the crank by `delta_degrees` (negative turns backwards).
    ///
    /// Only allowed while stopped; while running the call is a silent no-op
    /// and `false` is returned. Crossing several boundaries at once yields
    /// the phase of the final angle only.
    pub fn rotate(&mut self, delta_degrees: f64) -> bool {
        if self.state.running() {
            debug!(delta_degrees, "manual rotation locked out while running");
            return false;
        }
        if !delta_degrees.is_finite() {
            return false;
        }
        let target = self.state.angle_degrees() + delta_degrees;
        self.state.set_angle(target);
        true
    }

    fn advance_one(&mut self, events: &mut Vec<CycleEvent>) {
        let increment = self.config.degrees_per_step * self.state.speed_multiplier() as f64;
        let raw = self.state.angle_degrees() + increment;
        let previous = self.state.set_angle(raw);
        let current = self.state.phase();

        if previous != current {
            events.push(CycleEvent::PhaseChanged {
                from: previous,
                to: current,
                angle: self.state.angle_degrees(),
            });
        }
        if raw >= CYCLE_DEGREES {
            self.cycles += 1;
            events.push(CycleEvent::CycleCompleted {
                cycles: self.cycles,
            });
        }
    }

    fn clamp_speed(&self, speed: i32) -> u8 {
        let (min, max) = (self.config.min_speed, self.config.max_speed);
        let clamped = speed.clamp(min as i32, max as i32) as u8;
        if clamped as i32 != speed {
            warn!(requested = speed, applied = clamped, "speed clamped into range");
        }
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn running_clock_at(angle: f64, speed: i32) -> CycleClock {
        let mut clock = CycleClock::new();
        clock.rotate(angle);
        clock.start();
        clock.set_speed(speed);
        clock
    }

    #[test]
    fn test_clock_defaults() {
        let clock = CycleClock::new();
        let state = clock.current_state();
        assert_eq!(state.angle_degrees(), 0.0);
        assert_eq!(state.phase(), Phase::Intake);
        assert!(!state.running());
        assert_eq!(state.speed_multiplier(), 1);
        assert!((clock.config().step_ms() - 1000.0 / 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_start_stop_keep_angle() {
        let mut clock = running_clock_at(100.0, 1);
        clock.step();
        clock.stop();
        assert_eq!(clock.angle_degrees(), 102.0);
        assert!(!clock.is_running());
        clock.start();
        assert_eq!(clock.angle_degrees(), 102.0);
        clock.toggle();
        assert!(!clock.is_running());
    }

    #[test]
    fn test_speed_scaling() {
        let mut clock = running_clock_at(0.0, 3);
        clock.step();
        assert_eq!(clock.angle_degrees(), 6.0);

        let mut clock = running_clock_at(0.0, 1);
        clock.step();
        assert_eq!(clock.angle_degrees(), 2.0);
    }

    #[test]
    fn test_wrap_around() {
        let mut clock = running_clock_at(718.0, 2);
        let events = clock.step();
        assert_eq!(clock.angle_degrees(), 2.0);
        assert_eq!(clock.phase(), Phase::Intake);
        assert_eq!(
            events,
            vec![
                CycleEvent::PhaseChanged {
                    from: Phase::Exhaust,
                    to: Phase::Intake,
                    angle: 2.0,
                },
                CycleEvent::CycleCompleted { cycles: 1 },
            ]
        );
    }

    #[test]
    fn test_tick_accumulates_whole_steps() {
        let mut clock = running_clock_at(0.0, 1);

        // Less than one step: nothing happens yet
        clock.tick(10.0);
        assert_eq!(clock.angle_degrees(), 0.0);

        // 10 + 10 = 20ms covers one 16.67ms step
        clock.tick(10.0);
        assert_eq!(clock.angle_degrees(), 2.0);
        assert_abs_diff_eq!(clock.accumulator_ms, 20.0 - 1000.0 / 60.0, epsilon = 1e-9);

        // 100ms covers six more steps (3.33 + 100 = 103.33 → 6 steps)
        clock.tick(100.0);
        assert_eq!(clock.angle_degrees(), 14.0);
    }

    #[test]
    fn test_tick_clamps_long_stalls() {
        let config = ClockConfig {
            steps_per_second: 50.0,
            ..ClockConfig::default()
        };
        let mut clock = CycleClock::with_config(config).unwrap();
        clock.start();
        clock.tick(10_000.0);
        // Only 250ms is consumed: 12 whole 20ms steps
        assert_eq!(clock.angle_degrees(), 24.0);
    }

    #[test]
    fn test_tick_surfaces_boundary_crossing() {
        let mut clock = running_clock_at(170.0, 5);
        let events = clock.tick(17.0);
        assert_eq!(clock.angle_degrees(), 180.0);
        assert_eq!(
            events,
            vec![CycleEvent::PhaseChanged {
                from: Phase::Intake,
                to: Phase::Compression,
                angle: 180.0,
            }]
        );
    }

    #[test]
    fn test_tick_reports_every_transition_in_order() {
        let config = ClockConfig {
            steps_per_second: 1000.0,
            degrees_per_step: 30.0,
            ..ClockConfig::default()
        };
        let mut clock = CycleClock::with_config(config).unwrap();
        clock.start();
        clock.set_speed(5);

        // 10 steps of 150° = 1500°: crosses eight boundaries and wraps twice
        let events = clock.tick(10.0);
        assert_abs_diff_eq!(clock.angle_degrees(), 60.0, epsilon = 1e-9);

        let phases: Vec<Phase> = events
            .iter()
            .filter_map(|e| match e {
                CycleEvent::PhaseChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(phases.len(), 8);
        let mut expected = Phase::Intake;
        for phase in phases {
            expected = expected.next();
            assert_eq!(phase, expected);
        }

        let wraps = events.iter().filter(|e| !e.is_phase_change()).count();
        assert_eq!(wraps, 2);
        assert_eq!(clock.cycles(), 2);
    }

    #[test]
    fn test_tick_is_noop_when_stopped() {
        let mut clock = CycleClock::new();
        clock.rotate(42.0);
        for elapsed in [0.0, 16.0, 17.0, 1000.0, 1e9, -5.0] {
            assert!(clock.tick(elapsed).is_empty());
            assert_eq!(clock.angle_degrees(), 42.0);
        }
        assert!(clock.step().is_empty());
        assert_eq!(clock.angle_degrees(), 42.0);
    }

    #[test]
    fn test_stop_discards_partial_step() {
        let mut clock = running_clock_at(0.0, 1);
        clock.tick(15.0);
        clock.stop();
        clock.start();
        clock.tick(15.0);
        assert_eq!(clock.angle_degrees(), 0.0);
    }

    #[test]
    fn test_invalid_elapsed_is_ignored() {
        let mut clock = running_clock_at(0.0, 1);
        assert!(clock.tick(f64::NAN).is_empty());
        assert!(clock.tick(-20.0).is_empty());
        assert_eq!(clock.angle_degrees(), 0.0);
    }

    #[test]
    fn test_rotate_wraps_negative_deltas() {
        let mut clock = CycleClock::new();
        clock.rotate(10.0);
        assert!(clock.rotate(-15.0));
        assert_eq!(clock.angle_degrees(), 715.0);
        assert_eq!(clock.phase(), Phase::Exhaust);
    }

    #[test]
    fn test_rotate_across_several_boundaries() {
        let mut clock = CycleClock::new();
        clock.rotate(100.0);
        clock.rotate(450.0);
        assert_eq!(clock.angle_degrees(), 550.0);
        assert_eq!(clock.phase(), Phase::Exhaust);
        clock.rotate(-1000.0);
        assert_eq!(clock.angle_degrees(), 270.0);
        assert_eq!(clock.phase(), Phase::Compression);
    }

    #[test]
    fn test_rotate_locked_out_while_running() {
        let mut clock = running_clock_at(90.0, 1);
        assert!(!clock.rotate(90.0));
        assert!(!clock.rotate(-15.0));
        assert_eq!(clock.angle_degrees(), 90.0);
    }

    #[test]
    fn test_tick_and_rotate_agree_on_phase() {
        let mut ticking = running_clock_at(0.0, 1);
        let mut turning = CycleClock::new();
        for _ in 0..360 {
            ticking.step();
            turning.rotate(2.0);
            assert_eq!(ticking.angle_degrees(), turning.angle_degrees());
            assert_eq!(ticking.phase(), turning.phase());
            assert_eq!(ticking.phase(), Phase::from_angle(ticking.angle_degrees()));
        }
        assert_eq!(ticking.angle_degrees(), 0.0);
    }

    #[test]
    fn test_set_speed_clamps() {
        let mut clock = running_clock_at(0.0, 1);
        assert_eq!(clock.set_speed(9), 5);
        assert_eq!(clock.speed(), 5);
        assert_eq!(clock.set_speed(-3), 1);
        assert_eq!(clock.speed(), 1);
        assert_eq!(clock.set_speed(4), 4);
    }

    #[test]
    fn test_set_speed_ignored_while_stopped() {
        let mut clock = CycleClock::new();
        assert_eq!(clock.set_speed(4), 1);
        assert_eq!(clock.speed(), 1);
    }

    #[test]
    fn test_try_set_speed_rejects_out_of_range() {
        let mut clock = running_clock_at(0.0, 1);
        assert!(matches!(
            clock.try_set_speed(6),
            Err(OttoError::InvalidArgument(_))
        ));
        assert!(clock.try_set_speed(0).is_err());
        assert_eq!(clock.speed(), 1);
        assert_eq!(clock.try_set_speed(3).unwrap(), 3);
    }

    #[test]
    fn test_with_speed_sets_initial_multiplier() {
        let clock = CycleClock::new().with_speed(3);
        assert!(!clock.is_running());
        assert_eq!(clock.speed(), 3);
        assert_eq!(CycleClock::new().with_speed(12).speed(), 5);
    }

    #[test]
    fn test_with_config_validates() {
        let bad = ClockConfig {
            steps_per_second: -1.0,
            ..ClockConfig::default()
        };
        assert!(CycleClock::with_config(bad).is_err());
    }

    #[test]
    fn test_set_config_keeps_angle_and_clamps_speed() {
        let mut clock = running_clock_at(100.0, 5);
        let narrow = ClockConfig {
            max_speed: 3,
            ..ClockConfig::default()
        };
        clock.set_config(narrow).unwrap();
        assert_eq!(clock.angle_degrees(), 100.0);
        assert!(clock.is_running());
        assert_eq!(clock.speed(), 3);

        let bad = ClockConfig {
            degrees_per_step: 0.0,
            ..ClockConfig::default()
        };
        assert!(clock.set_config(bad).is_err());
        assert_eq!(clock.config().max_speed, 3);
    }
}
