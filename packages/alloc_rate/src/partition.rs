use crate::{AllocationEvent, AllocationPath};

/// The events of a single [`AllocationPath`], borrowed from the caller's event collection.
///
/// A partition may be empty.
#[derive(Debug)]
pub struct Partition<'a, E> {
    path: AllocationPath,
    events: Vec<&'a E>,
}

impl<'a, E> Partition<'a, E>
where
    E: AllocationEvent,
{
    /// Creates an empty partition for events of the given allocation path.
    #[must_use]
    pub fn new(path: AllocationPath) -> Self {
        Self {
            path,
            events: Vec::new(),
        }
    }

    /// Collects the events of the given allocation path from `events`.
    #[must_use]
    pub fn collect(events: &'a [E], path: AllocationPath) -> Self {
        Self {
            path,
            events: events
                .iter()
                .filter(|event| event.allocation_path() == Some(path))
                .collect(),
        }
    }

    /// The allocation path that all events in this partition share.
    #[must_use]
    pub fn path(&self) -> AllocationPath {
        self.path
    }

    /// Whether the partition contains no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The number of events in the partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Iterates over the events in the partition.
    pub fn events(&self) -> impl Iterator<Item = &'a E> + '_ {
        self.events.iter().copied()
    }

    fn push(&mut self, event: &'a E) {
        self.events.push(event);
    }
}

/// The fast-path and slow-path partitions of one event collection.
///
/// The two partitions are disjoint. Items that are not allocation events
/// belong to neither.
///
/// # Example
///
/// ```
/// use alloc_rate::{AllocationPath, EventTimestamp, Partitions, RecordedEvent};
///
/// let events = [
///     RecordedEvent::new(AllocationPath::FastPath, EventTimestamp::from_epoch_millis(10)),
///     RecordedEvent::new(AllocationPath::FastPath, EventTimestamp::from_epoch_millis(20)),
///     RecordedEvent::new(AllocationPath::SlowPath, EventTimestamp::from_epoch_millis(30)),
/// ];
///
/// let partitions = Partitions::split(&events);
/// assert_eq!(partitions.fast_path().len(), 2);
/// assert_eq!(partitions.slow_path().len(), 1);
/// ```
#[derive(Debug)]
pub struct Partitions<'a, E> {
    fast_path: Partition<'a, E>,
    slow_path: Partition<'a, E>,
}

impl<'a, E> Partitions<'a, E>
where
    E: AllocationEvent,
{
    /// Classifies every event of `events` into the fast-path or slow-path partition
    /// in a single pass.
    #[must_use]
    pub fn split(events: &'a [E]) -> Self {
        let mut fast_path = Partition::new(AllocationPath::FastPath);
        let mut slow_path = Partition::new(AllocationPath::SlowPath);

        for event in events {
            match event.allocation_path() {
                Some(AllocationPath::FastPath) => fast_path.push(event),
                Some(AllocationPath::SlowPath) => slow_path.push(event),
                None => {}
            }
        }

        Self {
            fast_path,
            slow_path,
        }
    }

    /// Events served from the per-thread allocation buffer.
    #[must_use]
    pub fn fast_path(&self) -> &Partition<'a, E> {
        &self.fast_path
    }

    /// Events served outside the per-thread allocation buffer.
    #[must_use]
    pub fn slow_path(&self) -> &Partition<'a, E> {
        &self.slow_path
    }

    /// Whether neither partition contains any events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fast_path.is_empty() && self.slow_path.is_empty()
    }
}
