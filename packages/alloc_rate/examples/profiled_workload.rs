//! Demonstrates computing the allocation rate of a workload from collected events.
//!
//! The "collector" here is a stand-in for a real profiler: it records an event with a
//! wall-clock timestamp for every buffer the workload allocates, classifying small buffers
//! as fast-path allocations and large ones as slow-path allocations.

use std::thread;
use std::time::{Duration, SystemTime};

use alloc_rate::{AllocationPath, AllocationRate, ErrorPolicy, EventTimestamp, RecordedEvent};

/// Allocations up to this size are assumed to fit in a thread-local allocation buffer.
const FAST_PATH_LIMIT: usize = 4 * 1024;

#[derive(Debug, Default)]
struct Collector {
    events: Vec<RecordedEvent>,
    total_bytes: u64,
}

impl Collector {
    fn record(&mut self, size: usize) {
        let path = if size <= FAST_PATH_LIMIT {
            AllocationPath::FastPath
        } else {
            AllocationPath::SlowPath
        };
        let bytes = u64::try_from(size).expect("buffer sizes fit in u64");

        self.events.push(
            RecordedEvent::new(path, EventTimestamp::from(SystemTime::now()))
                .with_allocated_bytes(bytes),
        );
        self.total_bytes = self.total_bytes.saturating_add(bytes);
    }
}

fn main() {
    let mut collector = Collector::default();

    for round in 1..=20_usize {
        let small = vec![0_u8; round.saturating_mul(100)];
        collector.record(small.len());

        let large = vec![0_u8; round.saturating_mul(64 * 1024)];
        collector.record(large.len());

        thread::sleep(Duration::from_millis(5));
    }

    let allocation_rate = AllocationRate::new();

    println!("Events collected: {}", collector.events.len());
    println!("Total allocated:  {} bytes", collector.total_bytes);
    println!(
        "Allocation rate:  {}",
        allocation_rate.format_as_string(&collector.events, collector.total_bytes)
    );
    println!(
        "Derived total:    {}",
        allocation_rate.evaluate_with_derived_total(&collector.events)
    );

    // A workload that finishes within one millisecond has no meaningful rate.
    let instant = [RecordedEvent::new(
        AllocationPath::FastPath,
        EventTimestamp::from(SystemTime::now()),
    )];
    println!(
        "Instant workload: '{}'",
        allocation_rate.format_as_string(&instant, 1024)
    );

    // Events from before the epoch indicate a broken collector.
    let broken = [RecordedEvent::new(
        AllocationPath::SlowPath,
        EventTimestamp::from_epoch_millis(-1),
    )];
    let legacy = AllocationRate::builder()
        .error_policy(ErrorPolicy::CollapseToNoData)
        .build();
    println!(
        "Broken collector: '{}' (legacy: '{}')",
        allocation_rate.format_as_string(&broken, 1024),
        legacy.format_as_string(&broken, 1024)
    );
}
