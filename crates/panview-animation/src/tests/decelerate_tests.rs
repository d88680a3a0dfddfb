use super::*;

fn run_to_end(animator: &mut DecelerationAnimator, step_millis: u64) -> Vec<i32> {
    let mut samples = Vec::new();
    let mut now = 1_000;
    while animator.compute_scroll_offset(now) {
        samples.push(animator.current());
        now += step_millis;
    }
    samples
}

#[test]
fn new_animator_is_finished() {
    let mut animator = DecelerationAnimator::default();
    assert!(animator.is_finished());
    assert!(!animator.compute_scroll_offset(0));
}

#[test]
fn first_poll_reports_start_offset() {
    let mut animator = DecelerationAnimator::new(Easing::ViscousFluid);
    animator.start_scroll(0, -100, 250);

    assert!(animator.compute_scroll_offset(5_000));
    assert_eq!(animator.current(), 0);
    assert!(!animator.is_finished());
}

#[test]
fn lands_exactly_on_final_offset_and_polls_once_more() {
    let mut animator = DecelerationAnimator::new(Easing::ViscousFluid);
    animator.start_scroll(-37, 37, 250);

    let samples = run_to_end(&mut animator, 16);

    assert_eq!(samples.last().copied(), Some(0));
    assert!(animator.is_finished());
    // The poll after landing reports "no more work".
    assert!(!animator.compute_scroll_offset(u64::MAX));
    assert_eq!(animator.current(), 0);
}

#[test]
fn interpolation_stays_between_start_and_final() {
    for easing in [
        Easing::Linear,
        Easing::ViscousFluid,
        Easing::Decelerate(1.0),
        Easing::FastOutSlowIn,
    ] {
        let mut animator = DecelerationAnimator::new(easing);
        animator.start_scroll(-10, -90, 250);
        for sample in run_to_end(&mut animator, 7) {
            assert!(
                (-100..=-10).contains(&sample),
                "{easing:?} produced {sample}"
            );
        }
    }
}

#[test]
fn decelerating_curve_covers_most_distance_early() {
    let mut animator = DecelerationAnimator::new(Easing::ViscousFluid);
    animator.start_scroll(0, -100, 200);
    animator.compute_scroll_offset(0);
    animator.compute_scroll_offset(100);

    assert!(animator.current() < -50, "got {}", animator.current());
}

#[test]
fn zero_duration_jumps_on_first_poll() {
    let mut animator = DecelerationAnimator::default();
    animator.start_scroll(-80, 80, 0);

    assert!(animator.compute_scroll_offset(42));
    assert_eq!(animator.current(), 0);
    assert!(animator.is_finished());
}

#[test]
fn force_finished_keeps_partial_offset() {
    let mut animator = DecelerationAnimator::new(Easing::Linear);
    animator.start_scroll(0, -100, 100);
    animator.compute_scroll_offset(0);
    animator.compute_scroll_offset(50);
    assert_eq!(animator.current(), -50);

    animator.force_finished(true);

    assert!(animator.is_finished());
    assert!(!animator.compute_scroll_offset(60));
    assert_eq!(animator.current(), -50);
}

#[test]
fn abort_animation_jumps_to_final() {
    let mut animator = DecelerationAnimator::new(Easing::Linear);
    animator.start_scroll(-100, 100, 100);
    animator.compute_scroll_offset(0);

    animator.abort_animation();

    assert!(animator.is_finished());
    assert_eq!(animator.current(), 0);
}

#[test]
fn extend_duration_restarts_remaining_time() {
    let mut animator = DecelerationAnimator::new(Easing::Linear);
    animator.start_scroll(0, -100, 100);
    animator.compute_scroll_offset(0);
    animator.compute_scroll_offset(100);
    assert!(animator.is_finished());

    animator.extend_duration(100, 100);

    assert!(!animator.is_finished());
    assert_eq!(animator.duration_millis(), 200);
    assert!(animator.compute_scroll_offset(150));
    assert_eq!(animator.current(), -75);
}

#[test]
fn set_final_offset_retargets() {
    let mut animator = DecelerationAnimator::new(Easing::Linear);
    animator.start_scroll(0, -100, 100);
    animator.compute_scroll_offset(0);

    animator.set_final_offset(-40);

    assert_eq!(animator.delta(), -40);
    animator.compute_scroll_offset(50);
    assert_eq!(animator.current(), -20);
    animator.compute_scroll_offset(100);
    assert_eq!(animator.current(), -40);
}
