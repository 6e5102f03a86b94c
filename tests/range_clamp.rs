use projected::ProjectedError;
use projected::clamp::RangeClamp;

#[test]
fn value_within_range_unchanged() {
    let volume = RangeClamp::new(50, 0, 100).unwrap();
    assert_eq!(volume.value(), 50);
}

#[test]
fn initial_value_is_clamped() {
    assert_eq!(RangeClamp::new(500, 0, 100).unwrap().value(), 100);
    assert_eq!(RangeClamp::new(-500, 0, 100).unwrap().value(), 0);
}

#[test]
fn writes_clamp_to_bounds() {
    let mut volume = RangeClamp::new(50, 0, 100).unwrap();
    volume.set_value(150);
    assert_eq!(volume.value(), 100);
    volume.set_value(-50);
    assert_eq!(volume.value(), 0);
    for x in -20..=120 {
        volume.set_value(x);
        assert_eq!(volume.value(), x.clamp(0, 100), "write of {x}");
    }
}

#[test]
fn projection_exposes_range() {
    let value = RangeClamp::new(50, 10, 90).unwrap();
    let state = value.projection();
    assert_eq!(state.range(), 10..=90);
    assert_eq!(state.current_value, 50);
    assert_eq!((state.min, state.max), (10, 90));
}

#[test]
fn boundary_flags() {
    let mut value = RangeClamp::new(0, 0, 100).unwrap();
    assert!(value.projection().is_at_min());
    assert!(!value.projection().is_at_max());
    value.set_value(100);
    assert!(value.projection().is_at_max());
    assert!(!value.projection().is_at_min());
    value.set_value(42);
    let state = value.projection();
    assert!(!state.is_at_min() && !state.is_at_max());
}

#[test]
fn degenerate_range_is_at_both_bounds() {
    let mut value = RangeClamp::new(3, 7, 7).unwrap();
    assert_eq!(value.value(), 7);
    value.set_value(-1);
    let state = value.projection();
    assert!(state.is_at_min() && state.is_at_max());
    assert_eq!(state.percentage(), 0.);
}

#[test]
fn percentage_of_range() {
    let mut volume = RangeClamp::new(0, 0, 100).unwrap();
    assert_eq!(volume.projection().percentage(), 0.);
    volume.set_value(25);
    assert!((volume.projection().percentage() - 0.25).abs() < 1e-12);
    volume.set_value(1000);
    assert_eq!(volume.projection().percentage(), 1.);

    let offset = RangeClamp::new(15u8, 10u8, 30u8).unwrap();
    assert!((offset.projection().percentage() - 0.25).abs() < 1e-12);
}

#[test]
fn float_values_clamp() {
    let mut gain = RangeClamp::new(0.5f64, 0., 1.).unwrap();
    gain.set_value(1.5);
    assert_eq!(gain.value(), 1.);
    gain.set_value(f64::NAN);
    assert_eq!(gain.value(), 0., "an incomparable value lands on the minimum");
}

#[test]
fn non_numeric_values_clamp() {
    let mut letter = RangeClamp::new('m', 'a', 'f').unwrap();
    assert_eq!(letter.value(), 'f');
    letter.set_value('c');
    assert_eq!(letter.value(), 'c');
    let mut word = RangeClamp::new("kiwi".to_string(), "b".to_string(), "m".to_string()).unwrap();
    word.set_value("apple".to_string());
    assert_eq!(word.value(), "b");
}

#[test]
fn inverted_range_is_rejected() {
    let err = RangeClamp::new(5, 10, 0).unwrap_err();
    assert!(matches!(err, ProjectedError::InvalidRange { .. }));
    assert!(format!("{}", err).contains("greater than maximum"));
}

#[test]
fn incomparable_bounds_are_rejected() {
    let err = RangeClamp::new(0.5, f64::NAN, 1.).unwrap_err();
    assert!(matches!(err, ProjectedError::InvalidRange { .. }));
}

#[test]
fn percentage_of_full_float_range() {
    let wide = RangeClamp::new(0., -f64::MAX, f64::MAX).unwrap();
    assert_eq!(wide.projection().percentage(), 0.5);
    let mut upper = RangeClamp::new(f64::MAX, -f64::MAX, f64::MAX).unwrap();
    assert_eq!(upper.projection().percentage(), 1.);
    upper.set_value(-f64::MAX);
    assert_eq!(upper.projection().percentage(), 0.);
}

#[test]
fn percentage_of_wide_integer_ranges() {
    let signed = RangeClamp::new(0i64, i64::MIN, i64::MAX).unwrap();
    assert!((signed.projection().percentage() - 0.5).abs() < 1e-12);
    let unsigned = RangeClamp::new(u64::MAX / 4, 0u64, u64::MAX).unwrap();
    assert!((unsigned.projection().percentage() - 0.25).abs() < 1e-12);
    let mut index = RangeClamp::new(3usize, 0, 12).unwrap();
    assert!((index.projection().percentage() - 0.25).abs() < 1e-12);
    index.set_value(40);
    assert_eq!(index.projection().percentage(), 1.);
}
