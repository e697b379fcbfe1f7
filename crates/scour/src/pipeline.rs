use tracing::{debug, error, info, warn};

use crate::conf::RunConfig;
use crate::error::PipelineError;
use crate::extract;
use crate::filter::NoiseFilter;
use crate::govern::{CooldownClock, Governor, ResourceProbe, SystemProbe, Verdict, WallClock};
use crate::sanitize::Sanitizer;
use crate::source::{FileSource, LineSource};
use crate::writer::StreamingWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Init,
    Running,
    Paused,
    Aborted,
    Complete,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Init => "init",
            RunPhase::Running => "running",
            RunPhase::Paused => "paused",
            RunPhase::Aborted => "aborted",
            RunPhase::Complete => "complete",
        }
    }
}

/// Why a run stopped early. Graceful halts, not crashes: everything written
/// before the halt is preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbortReason {
    /// Pre-flight disk check failed; zero lines processed, output path
    /// never opened.
    DiskPreflight { disk_percent: f32 },
    /// A mid-run checkpoint observed disk usage over the threshold.
    DiskCheckpoint { disk_percent: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    Complete,
    Aborted(AbortReason),
}

/// Mutable per-run state. Lives for the run, discarded afterwards.
#[derive(Debug)]
struct PipelineState {
    lines_processed: u64,
    records_written: u64,
    lines_filtered: u64,
    lines_unmatched: u64,
    pauses: u64,
    phase: RunPhase,
}

impl PipelineState {
    fn new() -> Self {
        Self {
            lines_processed: 0,
            records_written: 0,
            lines_filtered: 0,
            lines_unmatched: 0,
            pauses: 0,
            phase: RunPhase::Init,
        }
    }

    fn transition(&mut self, to: RunPhase) {
        debug!(from = self.phase.as_str(), to = to.as_str(), "phase transition");
        self.phase = to;
    }

    fn into_report(self, outcome: RunOutcome) -> RunReport {
        RunReport {
            outcome,
            lines_processed: self.lines_processed,
            records_written: self.records_written,
            lines_filtered: self.lines_filtered,
            lines_unmatched: self.lines_unmatched,
            pauses: self.pauses,
        }
    }
}

/// End-of-run summary returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub lines_processed: u64,
    pub records_written: u64,
    pub lines_filtered: u64,
    pub lines_unmatched: u64,
    pub pauses: u64,
}

/// Run the pipeline with the live system probe and wall clock.
pub fn run(config: &RunConfig) -> Result<RunReport, PipelineError> {
    let mut probe = SystemProbe::new(&config.output);
    let mut clock = WallClock;
    run_with(config, &mut probe, &mut clock)
}

/// Run the pipeline with explicit governance collaborators. Strictly
/// sequential: each line is fully filtered, extracted, sanitized, and
/// written before the next is read; the governor executes inline between
/// line iterations and never interrupts mid-line work.
pub fn run_with(
    config: &RunConfig,
    probe: &mut dyn ResourceProbe,
    clock: &mut dyn CooldownClock,
) -> Result<RunReport, PipelineError> {
    config.validate()?;

    let governor = Governor::new(config);
    let grammar = extract::grammar_for(config.grammar)?;
    let filter = NoiseFilter::for_grammar(config.grammar);
    let sanitizer = Sanitizer::new(config.fix_name_glyphs);
    let mut state = PipelineState::new();

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        grammar = config.grammar.as_str(),
        "starting run"
    );

    // Pre-flight: refuse to start with the garage already full. The output
    // path is not opened, so nothing is created or truncated.
    if let Verdict::Halt { disk_percent } = governor.preflight(probe.sample()) {
        error!(disk_percent, "pre-flight disk check failed, aborting");
        state.transition(RunPhase::Aborted);
        return Ok(state.into_report(RunOutcome::Aborted(AbortReason::DiskPreflight {
            disk_percent,
        })));
    }

    // Fail fast on the input before the output file exists.
    let mut source = FileSource::open(&config.input).map_err(|source| PipelineError::InputOpen {
        path: config.input.clone(),
        source,
    })?;
    let mut writer = StreamingWriter::create(&config.output)?;
    state.transition(RunPhase::Running);

    let outcome = loop {
        let raw = match source.next_line() {
            None => break RunOutcome::Complete,
            Some(Ok(raw)) => raw,
            Some(Err(e)) => {
                // Upstream failures stay classified apart from core errors.
                error!(kind = e.kind(), "source failure: {e}");
                return Err(PipelineError::Source(e));
            }
        };
        state.lines_processed = raw.index + 1;

        if filter.is_noise(&raw.text) {
            state.lines_filtered += 1;
        } else if let Some(candidate) = grammar.extract(&raw.text) {
            let record = sanitizer.sanitize(config.grammar, candidate);
            writer.write_record(&record)?;
            state.records_written += 1;
        } else {
            // Expected filtering outcome: counted, never logged per line.
            state.lines_unmatched += 1;
        }

        if governor.checkpoint_due(state.lines_processed) {
            match governor.assess(probe.sample()) {
                Verdict::Halt { disk_percent } => {
                    error!(
                        disk_percent,
                        lines = state.lines_processed,
                        "disk threshold tripped, halting gracefully"
                    );
                    break RunOutcome::Aborted(AbortReason::DiskCheckpoint { disk_percent });
                }
                Verdict::Pause {
                    memory_percent,
                    cooldown,
                } => {
                    warn!(memory_percent, ?cooldown, "memory threshold tripped, cooling down");
                    state.transition(RunPhase::Paused);
                    state.pauses += 1;
                    // Per-line allocations are already dropped at this
                    // point; the cooldown gives the allocator a window to
                    // settle before the next line is read.
                    clock.pause(cooldown);
                    state.transition(RunPhase::Running);
                }
                Verdict::Proceed => {}
            }
        }
    };

    // Flush whether the input was exhausted or the governor halted —
    // records written before a halt are preserved.
    writer.finish()?;

    state.transition(match outcome {
        RunOutcome::Complete => RunPhase::Complete,
        RunOutcome::Aborted(_) => RunPhase::Aborted,
    });
    info!(
        lines = state.lines_processed,
        records = state.records_written,
        filtered = state.lines_filtered,
        unmatched = state.lines_unmatched,
        pauses = state.pauses,
        outcome = ?outcome,
        "run finished"
    );

    Ok(state.into_report(outcome))
}
