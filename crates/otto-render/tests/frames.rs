//! Drives the renderer from a running clock across whole cycles

use otto_core::{EngineLayout, Phase};
use otto_render::{shapes, CountingSurface, DrawCommand, KinematicRenderer, Part, Theme};
use otto_runtime::CycleClock;

#[test]
fn effects_follow_clock_through_cycle() {
    let theme = Theme::classic();
    let mut clock = CycleClock::new();
    let mut renderer = KinematicRenderer::seeded(EngineLayout::default(), theme, 9);
    let mut surface = CountingSurface::default();
    clock.start();

    // 2 degrees per step, sample every 10 steps across one full cycle
    for _ in 0..36 {
        for _ in 0..10 {
            clock.step();
        }
        let state = clock.current_state();
        let frame = renderer.render_state(&state);
        frame.replay(&mut surface);

        let expected_markers = match state.phase() {
            Phase::Intake | Phase::Compression => 20,
            Phase::Power => 0,
            Phase::Exhaust => 15,
        };
        assert_eq!(frame.count(Part::Particle), expected_markers);
        assert_eq!(
            frame.count(Part::Combustion),
            usize::from(state.phase() == Phase::Power)
        );

        let chamber = shapes::chamber(frame.piston_y);
        for cmd in frame.part(Part::Particle) {
            if let DrawCommand::FillCircle { center, .. } = cmd {
                assert!(center.x >= 85.0 && center.x <= 115.0);
                assert!(center.y >= chamber.y && center.y <= chamber.y + chamber.height);
                assert!(shapes::BORE.min().x <= center.x && center.x <= shapes::BORE.max().x);
            }
        }

        let intake = if state.phase() == Phase::Intake {
            theme.intake_open
        } else {
            theme.intake_closed
        };
        let exhaust = if state.phase() == Phase::Exhaust {
            theme.exhaust_open
        } else {
            theme.exhaust_closed
        };
        assert_eq!(frame.fill_of(Part::IntakeValve), Some(intake));
        assert_eq!(frame.fill_of(Part::ExhaustValve), Some(exhaust));
    }

    assert_eq!(clock.cycles(), 1);
    assert_eq!(surface.frames, 36);
    assert_eq!(surface.texts.len(), 36);
    assert_eq!(
        surface.texts.last().map(String::as_str),
        Some("Crank Angle: 0°")
    );
    assert_eq!(surface.gradients, 9);
}

#[test]
fn spark_tracks_ignition_window_while_ticking() {
    let theme = Theme::classic();
    let mut clock = CycleClock::new();
    let mut renderer = KinematicRenderer::seeded(EngineLayout::default(), theme, 1);
    clock.start();

    let mut lit = Vec::new();
    for _ in 0..360 {
        clock.step();
        let frame = renderer.render_state(&clock.current_state());
        if frame.fill_of(Part::SparkPlug) == Some(theme.spark_active) {
            lit.push(frame.angle_degrees);
        }
    }
    // Even steps from 360 up to (not including) 380
    assert_eq!(lit, vec![360.0, 362.0, 364.0, 366.0, 368.0, 370.0, 372.0, 374.0, 376.0, 378.0]);
}

#[test]
fn manual_rotation_renders_final_angle() {
    let mut clock = CycleClock::new();
    let mut renderer = KinematicRenderer::seeded(EngineLayout::default(), Theme::dark(), 3);
    assert!(clock.rotate(10.0));
    assert!(clock.rotate(-15.0));
    let frame = renderer.render_state(&clock.current_state());
    assert_eq!(frame.phase, Phase::Exhaust);
    assert_eq!(frame.readout(), Some("Crank Angle: 715°"));
    assert_eq!(frame.count(Part::Particle), 15);
}
