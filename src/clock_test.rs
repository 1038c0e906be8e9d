use super::*;

#[test]
fn manual_clock_advances_shared_instant() {
    let clock = ManualClock::new(OffsetDateTime::UNIX_EPOCH);
    let other = clock.clone();

    clock.advance(Duration::hours(1));

    assert_eq!(other.now(), OffsetDateTime::UNIX_EPOCH + Duration::hours(1));
}

#[test]
fn manual_clock_set_overrides_instant() {
    let clock = ManualClock::new(OffsetDateTime::UNIX_EPOCH);
    let target = OffsetDateTime::UNIX_EPOCH + Duration::days(3);
    clock.set(target);
    assert_eq!(clock.now(), target);
}

#[test]
fn epoch_millis_of_epoch_is_zero() {
    assert_eq!(epoch_millis(OffsetDateTime::UNIX_EPOCH), 0);
}

#[test]
fn epoch_millis_truncates_sub_millisecond_precision() {
    let at = OffsetDateTime::UNIX_EPOCH + Duration::seconds(2) + Duration::microseconds(1_500);
    assert_eq!(epoch_millis(at), 2_001);
}

#[test]
fn system_clock_is_after_epoch() {
    assert!(SystemClock.now() > OffsetDateTime::UNIX_EPOCH);
}
