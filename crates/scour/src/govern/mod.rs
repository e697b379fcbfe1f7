/// Resource governor: samples memory/disk pressure at fixed line-count
/// checkpoints and decides whether the pipeline continues, cools down, or
/// halts. Checkpoint-based backpressure only — pressure that spikes and
/// subsides between checkpoints is invisible by design.
pub mod probe;

pub use probe::{CooldownClock, ResourceProbe, ResourceSample, SystemProbe, WallClock};

use std::time::Duration;

use crate::conf::RunConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Proceed,
    /// Memory over the pause threshold: cool down, then resume from the
    /// next line. No lines are skipped or dropped.
    Pause {
        memory_percent: f32,
        cooldown: Duration,
    },
    /// Disk over the halt threshold: stop gracefully, preserving all
    /// records written so far.
    Halt { disk_percent: f32 },
}

pub struct Governor {
    pause_threshold: f32,
    disk_threshold: f32,
    checkpoint_interval: u64,
    cooldown: Duration,
}

impl Governor {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            pause_threshold: config.pause_threshold,
            disk_threshold: config.disk_threshold,
            checkpoint_interval: config.checkpoint_interval,
            cooldown: config.cooldown(),
        }
    }

    /// A checkpoint is due after every `checkpoint_interval` processed
    /// lines.
    pub fn checkpoint_due(&self, lines_processed: u64) -> bool {
        lines_processed > 0 && lines_processed % self.checkpoint_interval == 0
    }

    /// Pre-flight: run once before any line is processed and before the
    /// output path is opened. Only disk pressure matters here.
    pub fn preflight(&self, sample: ResourceSample) -> Verdict {
        if sample.disk_percent > self.disk_threshold {
            return Verdict::Halt {
                disk_percent: sample.disk_percent,
            };
        }
        Verdict::Proceed
    }

    /// Mid-run checkpoint decision. Disk pressure outranks memory pressure.
    /// Comparisons are strict: a sample exactly at a threshold does not
    /// trip it.
    pub fn assess(&self, sample: ResourceSample) -> Verdict {
        if sample.disk_percent > self.disk_threshold {
            return Verdict::Halt {
                disk_percent: sample.disk_percent,
            };
        }
        if sample.memory_percent > self.pause_threshold {
            return Verdict::Pause {
                memory_percent: sample.memory_percent,
                cooldown: self.cooldown,
            };
        }
        Verdict::Proceed
    }
}
