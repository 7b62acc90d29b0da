use hours_engine::clock::{format_clock_time, minutes_to_duration_string, parse_clock_time, ClockTime};
use hours_engine::engine::{compute_ad_hoc_duration, compute_totals, extra_minutes, Totals};
use hours_engine::interval::{duration, overlap_minutes, Interval};
use rstest::rstest;

fn iv(start: &str, end: &str) -> Interval {
    Interval::new(parse_clock_time(start).unwrap(), parse_clock_time(end).unwrap())
}

#[rstest]
#[case("00:00")]
#[case("07:05")]
#[case("12:30")]
#[case("23:59")]
fn clock_time_round_trips(#[case] text: &str) {
    let t = parse_clock_time(text).unwrap();
    assert!(t.minutes() < 1440);
    assert_eq!(format_clock_time(t), text);
}

#[rstest]
#[case("10:00", "10:00", 1440)]
#[case("09:00", "17:00", 480)]
#[case("23:00", "01:00", 120)]
#[case("18:00", "00:00", 360)]
#[case("00:00", "23:59", 1439)]
fn duration_honours_wraparound(#[case] start: &str, #[case] end: &str, #[case] expected: u32) {
    assert_eq!(duration(&iv(start, end)), expected);
}

#[rstest]
#[case(("22:00", "06:00"), ("23:00", "01:00"), 120)]
#[case(("09:00", "17:00"), ("09:00", "17:00"), 480)]
#[case(("09:00", "17:00"), ("18:00", "20:00"), 0)]
#[case(("08:00", "12:00"), ("11:00", "15:00"), 60)]
#[case(("21:00", "03:00"), ("02:00", "22:00"), 120)]
fn overlap_on_the_circular_day(
    #[case] a: (&str, &str),
    #[case] b: (&str, &str),
    #[case] expected: u32,
) {
    assert_eq!(overlap_minutes(&iv(a.0, a.1), &iv(b.0, b.1)), expected);
}

#[test]
fn totals_with_shift() {
    let entries = [Some(iv("09:00", "17:00")), Some(iv("18:00", "20:00"))];
    let shift = iv("09:00", "17:00");
    let first = compute_totals(&entries, Some(&shift));
    assert_eq!(first, Totals { total_minutes: 600, extra_minutes: 120 });
    assert_eq!(compute_totals(&entries, Some(&shift)), first);
}

#[test]
fn extra_is_bounded_by_duration_for_every_pair() {
    let step = 30;
    let times: Vec<ClockTime> = (0..1440)
        .step_by(step)
        .map(|m| ClockTime::from_minutes(m).unwrap())
        .collect();
    let shift = iv("22:00", "06:00");
    for &start in &times {
        for &end in &times {
            let entry = Interval::new(start, end);
            assert!(extra_minutes(&entry, &shift) <= duration(&entry));
        }
    }
}

#[test]
fn ad_hoc_duration_with_pause() {
    let worked = compute_ad_hoc_duration(&iv("09:00", "17:30"), 60);
    assert_eq!(minutes_to_duration_string(worked), "07:30");
}

#[test]
fn duration_string_is_not_wrapped_at_a_day() {
    assert_eq!(minutes_to_duration_string(1500), "25:00");
}
