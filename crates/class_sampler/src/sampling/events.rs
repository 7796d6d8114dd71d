//! Event types and sinks for observing sampling runs.
//!
//! This module defines [`SamplingEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while executing [`crate::sampling::runner::sample_with_events`]
//! or [`crate::sampling::runner::Sampler::run_with_events`]. Events are observational
//! only; a sink cannot change the outcome of a run.
use std::path::PathBuf;

use crate::grid::ClassCode;
use crate::sampling::plan::StratumId;
use crate::sampling::strategy::{ShortfallPolicy, StrategyKind};

/// Describes events emitted by sampling operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingEvent {
    /// Emitted when a run starts, after the configuration was validated.
    RunStarted {
        strategy: StrategyKind,
        target_count: usize,
        shortfall: ShortfallPolicy,
    },

    /// Emitted once the grid has been flattened and filtered.
    UniverseBuilt {
        /// Cells eligible for sampling.
        cells: usize,
        /// Cells removed because they held the drop value.
        dropped: usize,
        /// Cells removed because they held the grid's nodata code.
        missing: usize,
        /// Distinct classes in ascending order.
        classes: Vec<ClassCode>,
    },

    /// Emitted after cells were drawn from a stratum.
    StratumSampled { stratum: StratumId, count: usize },

    /// Emitted when a stratum was left out because it is too small.
    StratumSkipped {
        stratum: StratumId,
        requested: usize,
        available: usize,
    },

    /// Emitted after the table was written to disk.
    TableWritten { path: PathBuf, rows: usize },

    /// Emitted when the run completes successfully.
    RunFinished { rows: usize },
}

/// Discriminant of a [`SamplingEvent`], used to filter events cheaply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplingEventKind {
    RunStarted,
    UniverseBuilt,
    StratumSampled,
    StratumSkipped,
    TableWritten,
    RunFinished,
}

impl SamplingEvent {
    pub fn kind(&self) -> SamplingEventKind {
        match self {
            SamplingEvent::RunStarted { .. } => SamplingEventKind::RunStarted,
            SamplingEvent::UniverseBuilt { .. } => SamplingEventKind::UniverseBuilt,
            SamplingEvent::StratumSampled { .. } => SamplingEventKind::StratumSampled,
            SamplingEvent::StratumSkipped { .. } => SamplingEventKind::StratumSkipped,
            SamplingEvent::TableWritten { .. } => SamplingEventKind::TableWritten,
            SamplingEvent::RunFinished { .. } => SamplingEventKind::RunFinished,
        }
    }
}

/// A generic event sink that accepts [`SamplingEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: SamplingEvent);

    /// Whether this sink wants events of `kind`. Lets emitters skip building them.
    #[inline]
    fn wants(&self, _kind: SamplingEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = SamplingEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SamplingEvent) {}

    #[inline]
    fn wants(&self, _kind: SamplingEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(SamplingEvent),
{
    #[inline]
    fn send(&mut self, event: SamplingEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<SamplingEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
        }
    }

    pub fn into_inner(self) -> Vec<SamplingEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[SamplingEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Strata reported as skipped, in emission order.
    pub fn skipped(&self) -> Vec<StratumId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SamplingEvent::StratumSkipped { stratum, .. } => Some(*stratum),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SamplingEvent) {
        self.events.push(event);
    }
}

/// Sink that only forwards events of the listed kinds.
pub struct FilterSink<S: EventSink> {
    inner: S,
    kinds: Vec<SamplingEventKind>,
}

impl<S: EventSink> FilterSink<S> {
    pub fn new(inner: S, kinds: impl IntoIterator<Item = SamplingEventKind>) -> Self {
        Self {
            inner,
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for FilterSink<S> {
    fn send(&mut self, event: SamplingEvent) {
        if self.kinds.contains(&event.kind()) {
            self.inner.send(event);
        }
    }

    fn wants(&self, kind: SamplingEventKind) -> bool {
        self.kinds.contains(&kind) && self.inner.wants(kind)
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: SamplingEvent) {
        if self.sinks.is_empty() {
            return;
        }
        let last_idx = self.sinks.len() - 1;
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: SamplingEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skipped(class: ClassCode) -> SamplingEvent {
        SamplingEvent::StratumSkipped {
            stratum: StratumId::Class(class),
            requested: 10,
            available: 2,
        }
    }

    #[test]
    fn event_kind_matches_variant() {
        assert_eq!(skipped(1).kind(), SamplingEventKind::StratumSkipped);
        assert_eq!(
            SamplingEvent::RunFinished { rows: 3 }.kind(),
            SamplingEventKind::RunFinished
        );
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::with_capacity(2);
        assert!(sink.is_empty());
        sink.send(skipped(1));
        sink.send(SamplingEvent::StratumSampled {
            stratum: StratumId::Class(2),
            count: 4,
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.skipped(), vec![StratumId::Class(1)]);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn send_many_preserves_order() {
        let mut sink = VecSink::new();
        sink.send_many([skipped(3), SamplingEvent::RunFinished { rows: 0 }, skipped(1)]);
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.skipped(), vec![StratumId::Class(3), StratumId::Class(1)]);
        assert_eq!(sink.as_slice()[1].kind(), SamplingEventKind::RunFinished);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!EventSink::wants(&(), SamplingEventKind::RunStarted));
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(skipped(5));
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].as_slice()[0], skipped(5));
    }

    #[test]
    fn filter_sink_drops_other_kinds() {
        let mut sink = FilterSink::new(VecSink::new(), [SamplingEventKind::StratumSkipped]);
        assert!(sink.wants(SamplingEventKind::StratumSkipped));
        assert!(!sink.wants(SamplingEventKind::RunFinished));
        sink.send(SamplingEvent::RunFinished { rows: 1 });
        sink.send(skipped(2));
        assert_eq!(sink.into_inner().into_inner(), vec![skipped(2)]);
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(skipped(1));
        sink.send(skipped(2));
        drop(sink);
        assert_eq!(count, 2);
    }
}
