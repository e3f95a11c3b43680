//! Snapshot recording, streaming and export
//!
//! The integrator copies its live field into a `Snapshot` at every sampling
//! step. Snapshots never alias the integrator's buffers, so consumers may hold
//! them for as long as they like.
//!
//! # Sinks
//!
//! - `SnapshotRecorder` - in-memory, append-only sequence owned by the solver
//! - `ChannelSink` - bounded channel to a concurrent consumer (e.g. a renderer)
//! - `Vec<Snapshot>` - plain collection, handy in tests

use crate::error::{HeatError, Result};
use crate::solver::Field;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, SyncSender};
use tracing::debug;

/// Field copy captured at a given step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Step index (0 is the initial condition)
    pub step: usize,
    /// Simulated time `step * dt` in seconds
    pub time: f64,
    pub field: Field,
}

/// Append-only snapshot sequence sampled every `interval` steps
#[derive(Debug, Clone)]
pub struct SnapshotRecorder {
    interval: usize,
    snapshots: Vec<Snapshot>,
}

impl SnapshotRecorder {
    /// # Errors
    ///
    /// `InvalidParameter` if `interval` is zero.
    pub fn new(interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(HeatError::invalid_parameter(
                "snapshot_interval",
                interval,
                "must be at least 1",
            ));
        }
        Ok(Self {
            interval,
            snapshots: Vec::new(),
        })
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Whether step `n` is a sampling point
    pub fn is_sampling_step(&self, step: usize) -> bool {
        step % self.interval == 0
    }

    /// Record a copy of `field` unconditionally
    pub fn record(&mut self, step: usize, time: f64, field: &Field) -> &Snapshot {
        debug_assert!(
            self.snapshots.last().is_none_or(|last| last.step < step),
            "Snapshot steps must be strictly increasing"
        );
        debug!("Recording snapshot at step {} (t = {:.4} s)", step, time);

        self.snapshots.push(Snapshot {
            step,
            time,
            field: field.clone(),
        });
        let last = self.snapshots.len() - 1;
        &self.snapshots[last]
    }

    /// Record a copy of `field` if `step` is a sampling point
    pub fn observe(&mut self, step: usize, time: f64, field: &Field) -> Option<&Snapshot> {
        if self.is_sampling_step(step) {
            Some(self.record(step, time, field))
        } else {
            None
        }
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

/// Consumer of snapshots as they are captured
pub trait SnapshotSink {
    /// Receive a freshly recorded snapshot
    ///
    /// # Errors
    ///
    /// Implementation-specific; `ChannelSink` returns `SinkClosed` when the
    /// receiving side has been dropped.
    fn emit(&mut self, snapshot: &Snapshot) -> Result<()>;
}

impl SnapshotSink for Vec<Snapshot> {
    fn emit(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.push(snapshot.clone());
        Ok(())
    }
}

/// Hands snapshots to another thread over a bounded channel
///
/// The integrator blocks once `capacity` snapshots are in flight, so a slow
/// consumer applies back-pressure instead of growing memory.
pub struct ChannelSink {
    sender: SyncSender<Snapshot>,
}

impl ChannelSink {
    /// Create a sink and the receiver a consumer thread should drain
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, Receiver<Snapshot>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (Self { sender }, receiver)
    }
}

impl SnapshotSink for ChannelSink {
    fn emit(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.sender
            .send(snapshot.clone())
            .map_err(|_| HeatError::SinkClosed)
    }
}

/// Write a snapshot sequence to `path` as pretty-printed JSON
///
/// The sequence is checked before the file is created, so a rejected export
/// leaves nothing behind.
///
/// # Errors
///
/// Returns `NonFiniteField` if any snapshot holds NaN or infinity (JSON would
/// store them as `null`), `Io` if the file cannot be created or written and
/// `Serialization` if encoding fails.
pub fn write_snapshots_json<P: AsRef<Path>>(path: P, snapshots: &[Snapshot]) -> Result<()> {
    if let Some(bad) = snapshots
        .iter()
        .find(|s| s.field.data.iter().any(|v| !v.is_finite()))
    {
        return Err(HeatError::NonFiniteField { step: bad.step });
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, snapshots)?;
    writer.flush()?;
    Ok(())
}

/// Read a snapshot sequence previously written by `write_snapshots_json`
///
/// # Errors
///
/// Returns `Io` if the file cannot be opened, `Serialization` if its
/// contents are not a snapshot sequence and `InvalidParameter` if a field's
/// data length disagrees with its `width * height`.
pub fn read_snapshots_json<P: AsRef<Path>>(path: P) -> Result<Vec<Snapshot>> {
    let reader = BufReader::new(File::open(path)?);
    let snapshots: Vec<Snapshot> = serde_json::from_reader(reader)?;

    for snapshot in &snapshots {
        let field = &snapshot.field;
        if field.data.len() != field.width * field.height {
            return Err(HeatError::invalid_parameter(
                "field",
                format!(
                    "step {}: {} values for {}x{}",
                    snapshot.step,
                    field.data.len(),
                    field.width,
                    field.height
                ),
                "data length must equal width * height",
            ));
        }
    }
    Ok(snapshots)
}
