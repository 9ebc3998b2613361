use super::UlidGenerator;
use crate::generator::GeneratorError;

/// Generates increasing IDs with a constant timestamp
#[test]
fn generates_increasing_ids_with_constant_timestamp() {
    let ts = 0x0123_4567_89abu64;
    let mut g = UlidGenerator::new();

    let mut prev = g.generate_or_abort_with_ts(ts).unwrap();
    assert_eq!(prev.timestamp(), ts);

    for _ in 0..100_000u64 {
        let curr = g.generate_or_abort_with_ts(ts).unwrap();
        assert!(prev < curr);
        assert_eq!(curr.timestamp(), ts);
        assert_eq!(curr.randomness(), prev.randomness() + 1);
        prev = curr;
    }
}

/// Returns ClockRegression if timestamp goes backwards
#[test]
fn returns_clock_regression_if_timestamp_goes_backwards() {
    let ts = 0x0123_4567_89abu64;
    let mut g = UlidGenerator::new();

    let prev = g.generate_or_abort_with_ts(ts).unwrap();
    assert_eq!(prev.timestamp(), ts);

    assert_eq!(
        g.generate_or_abort_with_ts(ts - 1),
        Err(GeneratorError::ClockRegression)
    );
    assert_eq!(
        g.generate_or_abort_with_ts(0),
        Err(GeneratorError::ClockRegression)
    );

    // aborted attempts leave the state intact
    let curr = g.generate_or_abort_with_ts(ts).unwrap();
    assert!(prev < curr);
    assert_eq!(curr.randomness(), prev.randomness() + 1);
}
