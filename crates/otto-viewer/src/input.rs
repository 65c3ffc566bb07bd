//! User intents from buttons and keys, applied to the clock in one place

use otto_runtime::CycleClock;
use winit::keyboard::KeyCode;

/// Fine rotation step for `-15°`/`+15°` and the arrow keys
pub const FINE_STEP: f64 = 15.0;
/// Coarse rotation step for `-90°`/`+90°` and Shift+arrow
pub const COARSE_STEP: f64 = 90.0;

/// Something the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerAction {
    ToggleRunning,
    SetSpeed(i32),
    Rotate(f64),
    ToggleStats,
    Exit,
}

/// Map a pressed key to an action.
///
/// Rotation keys only map while stopped and speed keys only while running,
/// mirroring which controls are enabled.
pub fn action_for_key(code: KeyCode, shift: bool, clock: &CycleClock) -> Option<ViewerAction> {
    let running = clock.is_running();
    let step = if shift { COARSE_STEP } else { FINE_STEP };
    match code {
        KeyCode::Space => Some(ViewerAction::ToggleRunning),
        KeyCode::ArrowLeft if !running => Some(ViewerAction::Rotate(-step)),
        KeyCode::ArrowRight if !running => Some(ViewerAction::Rotate(step)),
        KeyCode::ArrowUp if running => Some(ViewerAction::SetSpeed(clock.speed() as i32 + 1)),
        KeyCode::ArrowDown if running => Some(ViewerAction::SetSpeed(clock.speed() as i32 - 1)),
        KeyCode::F1 => Some(ViewerAction::ToggleStats),
        KeyCode::Escape => Some(ViewerAction::Exit),
        _ => None,
    }
}

/// Apply the clock-facing part of an action.
///
/// Returns `false` for actions the clock does not handle.
pub fn apply_to_clock(clock: &mut CycleClock, action: ViewerAction) -> bool {
    match action {
        ViewerAction::ToggleRunning => {
            clock.toggle();
            true
        }
        ViewerAction::SetSpeed(speed) => {
            clock.set_speed(speed);
            true
        }
        ViewerAction::Rotate(delta) => clock.rotate(delta),
        ViewerAction::ToggleStats | ViewerAction::Exit => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otto_core::Phase;

    #[test]
    fn arrows_rotate_only_while_stopped() {
        let mut clock = CycleClock::new();
        assert_eq!(
            action_for_key(KeyCode::ArrowLeft, false, &clock),
            Some(ViewerAction::Rotate(-15.0))
        );
        assert_eq!(
            action_for_key(KeyCode::ArrowRight, true, &clock),
            Some(ViewerAction::Rotate(90.0))
        );
        assert_eq!(action_for_key(KeyCode::ArrowUp, false, &clock), None);

        clock.start();
        assert_eq!(action_for_key(KeyCode::ArrowLeft, false, &clock), None);
        assert_eq!(
            action_for_key(KeyCode::ArrowUp, false, &clock),
            Some(ViewerAction::SetSpeed(2))
        );
    }

    #[test]
    fn actions_drive_clock() {
        let mut clock = CycleClock::new();
        assert!(apply_to_clock(&mut clock, ViewerAction::Rotate(-15.0)));
        assert_eq!(clock.angle_degrees(), 705.0);
        assert_eq!(clock.phase(), Phase::Exhaust);

        apply_to_clock(&mut clock, ViewerAction::ToggleRunning);
        assert!(clock.is_running());
        assert!(!apply_to_clock(&mut clock, ViewerAction::Rotate(90.0)));
        assert_eq!(clock.angle_degrees(), 705.0);

        apply_to_clock(&mut clock, ViewerAction::SetSpeed(9));
        assert_eq!(clock.speed(), 5);
        assert!(!apply_to_clock(&mut clock, ViewerAction::Exit));
    }
}
