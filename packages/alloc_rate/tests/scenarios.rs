//! End-to-end allocation rate scenarios, from raw events to the displayed string.

use std::cell::Cell;

use alloc_rate::{
    AllocationEvent, AllocationPath, AllocationRate, CALCULATION_ERROR, ErrorPolicy,
    EventTimestamp, NO_DATA, RateOutcome, RecordedEvent, Result, TimeUnit,
    compute_allocation_rate,
};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;
const TIB: u64 = 1024 * 1024 * 1024 * 1024;

/// A profiling stream item that is not necessarily an allocation event.
#[derive(Debug)]
struct StreamItem {
    path: Option<AllocationPath>,
    millis: i64,
}

impl AllocationEvent for StreamItem {
    fn allocation_path(&self) -> Option<AllocationPath> {
        self.path
    }

    fn epoch_millis(&self) -> Result<i64> {
        Ok(self.millis)
    }
}

/// An event whose reported timestamp changes between reads.
#[derive(Debug)]
struct UnstableEvent {
    path: AllocationPath,
    first_read: i64,
    later_reads: i64,
    reads: Cell<u32>,
}

impl AllocationEvent for UnstableEvent {
    fn allocation_path(&self) -> Option<AllocationPath> {
        Some(self.path)
    }

    fn epoch_millis(&self) -> Result<i64> {
        let reads = self.reads.get();
        self.reads.set(reads.saturating_add(1));

        Ok(if reads == 0 {
            self.first_read
        } else {
            self.later_reads
        })
    }
}

fn events(fast: &[i64], slow: &[i64]) -> Vec<RecordedEvent> {
    let fast = fast.iter().map(|&millis| {
        RecordedEvent::new(
            AllocationPath::FastPath,
            EventTimestamp::from_epoch_millis(millis),
        )
    });
    let slow = slow.iter().map(|&millis| {
        RecordedEvent::new(
            AllocationPath::SlowPath,
            EventTimestamp::from_epoch_millis(millis),
        )
    });

    fast.chain(slow).collect()
}

fn ten_second_window() -> Vec<RecordedEvent> {
    events(&[1_000, 2_000, 3_000], &[10_000, 10_000, 11_000])
}

fn legacy() -> AllocationRate {
    AllocationRate::builder()
        .error_policy(ErrorPolicy::CollapseToNoData)
        .build()
}

#[test]
fn empty_collection_is_no_data() {
    let events: Vec<RecordedEvent> = Vec::new();

    assert_eq!(compute_allocation_rate(&events, 0), NO_DATA);
    assert_eq!(compute_allocation_rate(&events, KIB), NO_DATA);
}

#[test]
fn one_kibibyte_over_ten_seconds() {
    assert_eq!(
        compute_allocation_rate(&ten_second_window(), KIB),
        "102.4 bytes/s"
    );
}

#[test]
fn one_mebibyte_over_ten_seconds() {
    assert_eq!(
        compute_allocation_rate(&ten_second_window(), MIB),
        "102.4 KiB/s"
    );
}

#[test]
fn one_gibibyte_over_ten_seconds() {
    assert_eq!(
        compute_allocation_rate(&ten_second_window(), GIB),
        "102.4 MiB/s"
    );
}

#[test]
fn one_tebibyte_over_ten_seconds() {
    assert_eq!(
        compute_allocation_rate(&ten_second_window(), TIB),
        "102.4 GiB/s"
    );
}

#[test]
fn identical_timestamps_are_no_data() {
    let events = events(&[0, 0, 0], &[0, 0, 0]);

    assert_eq!(compute_allocation_rate(&events, 1_000), NO_DATA);
    assert_eq!(legacy().format_as_string(&events, 1_000), NO_DATA);
}

#[test]
fn inverted_window_is_calculation_error() {
    // The earliest timestamp is read as 10 ms, every later read reports 5 ms.
    let events = [UnstableEvent {
        path: AllocationPath::FastPath,
        first_read: 10,
        later_reads: 5,
        reads: Cell::new(0),
    }];

    assert_eq!(compute_allocation_rate(&events, 1_000), CALCULATION_ERROR);
}

#[test]
fn inverted_window_is_no_data_under_legacy_policy() {
    let events = [UnstableEvent {
        path: AllocationPath::SlowPath,
        first_read: 10,
        later_reads: 5,
        reads: Cell::new(0),
    }];

    assert_eq!(legacy().format_as_string(&events, 1_000), NO_DATA);
}

#[test]
fn collection_without_allocation_events_is_no_data() {
    let items = [
        StreamItem {
            path: None,
            millis: 1_000,
        },
        StreamItem {
            path: None,
            millis: 2_000,
        },
    ];

    assert_eq!(
        AllocationRate::new().evaluate(&items, KIB),
        RateOutcome::NoData
    );
}

#[test]
fn non_allocation_events_do_not_widen_window() {
    let items = [
        StreamItem {
            path: None,
            millis: 0,
        },
        StreamItem {
            path: Some(AllocationPath::FastPath),
            millis: 1_000,
        },
        StreamItem {
            path: Some(AllocationPath::SlowPath),
            millis: 2_000,
        },
        StreamItem {
            path: None,
            millis: 9_000,
        },
    ];

    assert_eq!(compute_allocation_rate(&items, KIB), "1.0 KiB/s");
}

#[test]
fn negative_timestamps_are_calculation_errors() {
    let all_negative = events(&[-10, -10, -10], &[-10, -10, -10]);
    let negative_minimum = events(&[-10, -10, -10], &[10, 10, 10]);
    let negative_maximum = events(&[10, 10, 10], &[-10, -10, -10]);

    for events in [all_negative, negative_minimum, negative_maximum] {
        assert_eq!(compute_allocation_rate(&events, 1_000), CALCULATION_ERROR);
        assert_eq!(legacy().format_as_string(&events, 1_000), NO_DATA);
    }
}

#[test]
fn unconvertible_timestamp_is_calculation_error() {
    let mut events = ten_second_window();
    events.push(RecordedEvent::new(
        AllocationPath::SlowPath,
        EventTimestamp::new(i128::from(i64::MAX), TimeUnit::Seconds),
    ));

    assert_eq!(compute_allocation_rate(&events, KIB), CALCULATION_ERROR);
    assert_eq!(legacy().format_as_string(&events, KIB), NO_DATA);
}

#[test]
fn mixed_timestamp_units() {
    let events = [
        RecordedEvent::new(
            AllocationPath::FastPath,
            EventTimestamp::new(1_000_000_000, TimeUnit::Nanoseconds),
        ),
        RecordedEvent::new(
            AllocationPath::SlowPath,
            EventTimestamp::new(3, TimeUnit::Seconds),
        ),
    ];

    assert_eq!(compute_allocation_rate(&events, 4 * MIB), "2.0 MiB/s");
}

#[test]
fn derived_total_matches_explicit_total() {
    let events = ten_second_window()
        .into_iter()
        .map(|event| event.with_allocated_bytes(MIB))
        .collect::<Vec<_>>();

    let allocation_rate = AllocationRate::new();

    assert_eq!(
        allocation_rate.evaluate_with_derived_total(&events),
        allocation_rate.evaluate(&events, 6 * MIB)
    );
    assert_eq!(
        allocation_rate
            .evaluate_with_derived_total(&events)
            .to_string(),
        "614.4 KiB/s"
    );
}

#[test]
fn trait_objects_are_accepted() {
    let events: Vec<Box<dyn AllocationEvent>> = vec![
        Box::new(RecordedEvent::new(
            AllocationPath::FastPath,
            EventTimestamp::from_epoch_millis(0),
        )),
        Box::new(StreamItem {
            path: Some(AllocationPath::SlowPath),
            millis: 2_000,
        }),
    ];

    assert_eq!(compute_allocation_rate(&events, 3 * KIB), "1.5 KiB/s");
}

#[test]
fn evaluation_is_idempotent() {
    let events = ten_second_window();
    let allocation_rate = AllocationRate::new();

    let first = allocation_rate.format_as_string(&events, 12_345);
    let second = allocation_rate.format_as_string(&events, 12_345);

    assert_eq!(first, second);
}

#[test]
fn formatted_rates_follow_the_display_pattern() {
    let events = ten_second_window();

    for total in [0, 1, 999, KIB, 77 * KIB, MIB, 3 * GIB, TIB, u64::MAX] {
        let rendered = compute_allocation_rate(&events, total);

        let (number, unit) = rendered
            .split_once(' ')
            .expect("formatted rate has a number and a unit");
        let (_, decimals) = number
            .split_once('.')
            .expect("formatted rate has a decimal point");

        assert_eq!(decimals.len(), 1, "{rendered}");
        assert!(
            ["bytes/s", "KiB/s", "MiB/s", "GiB/s"].contains(&unit),
            "{rendered}"
        );
    }
}
