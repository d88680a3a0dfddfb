//! Assertion helpers for pan trajectories.

/// Assert that `offset` lies within `[-max_pan, 0]`.
pub fn assert_offset_in_bounds(offset: i32, max_pan: i32, msg: &str) {
    assert!(
        offset <= 0 && offset >= -max_pan,
        "{}: offset {} outside [-{}, 0]",
        msg,
        offset,
        max_pan
    );
}

/// Assert that a recorded trajectory only ever moves in one direction.
pub fn assert_monotonic(offsets: &[i32], msg: &str) {
    let rising = offsets.windows(2).all(|pair| pair[0] <= pair[1]);
    let falling = offsets.windows(2).all(|pair| pair[0] >= pair[1]);
    assert!(
        rising || falling,
        "{}: trajectory changes direction: {:?}",
        msg,
        offsets
    );
}
