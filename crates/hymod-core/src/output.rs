/// Output sink capability.
///
/// The core computes but never persists: whatever wants the per-step
/// fluxes (a file writer, a network stream, a test harness) implements
/// `OutputSink` and is handed to the realization at construction.
use std::sync::{Arc, Mutex};

use crate::fluxes::Fluxes;
use crate::TimeStep;

pub trait OutputSink: Send + Sync {
    /// Receive the fluxes recorded for step `t`.
    fn write_step(&mut self, t: TimeStep, fluxes: &Fluxes);

    /// Duplicate the sink for a cloned realization.
    fn clone_box(&self) -> Box<dyn OutputSink>;
}

impl Clone for Box<dyn OutputSink> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn write_step(&mut self, _t: TimeStep, _fluxes: &Fluxes) {}

    fn clone_box(&self) -> Box<dyn OutputSink> {
        Box::new(*self)
    }
}

/// Collects every step in memory.
///
/// Handles share one record buffer: keep a clone when handing the sink to
/// a realization and read the records back through it afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(TimeStep, Fluxes)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<(TimeStep, Fluxes)> {
        self.records.lock().expect("sink lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("sink lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OutputSink for MemorySink {
    fn write_step(&mut self, t: TimeStep, fluxes: &Fluxes) {
        self.records
            .lock()
            .expect("sink lock poisoned")
            .push((t, *fluxes));
    }

    fn clone_box(&self) -> Box<dyn OutputSink> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_collects_in_order() {
        let mut sink = MemorySink::new();
        sink.write_step(
            1,
            &Fluxes {
                streamflow: 0.5,
                ..Default::default()
            },
        );
        sink.write_step(
            2,
            &Fluxes {
                streamflow: 0.3,
                ..Default::default()
            },
        );

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 1);
        assert_eq!(records[1].1.streamflow, 0.3);
    }

    #[test]
    fn handles_share_the_record_buffer() {
        let sink = MemorySink::new();
        let mut boxed: Box<dyn OutputSink> = sink.clone_box();
        boxed.write_step(0, &Fluxes::default());

        assert_eq!(sink.len(), 1);
        assert!(!sink.is_empty());
    }
}
