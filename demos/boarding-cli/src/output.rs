//! Stdout writers: per-tick CSV trace, JSON run summary, and the policy
//! comparison table.

use std::io::Write;
use std::thread;
use std::time::Duration;

use bd_core::Tick;
use bd_order::BoardingPolicy;
use bd_sim::{BoardingConfig, SimObserver, TickReport};
use csv::Writer;
use serde::Serialize;

// ── Run observer ──────────────────────────────────────────────────────────────

/// Writes one CSV row per passenger per tick and optionally sleeps between
/// ticks.  Write errors are kept and surfaced after the run.
pub struct RunObserver<W: Write> {
    trace: Option<Writer<W>>,
    pace:  Option<Duration>,
    error: Option<csv::Error>,
}

impl<W: Write> RunObserver<W> {
    pub fn new(trace: Option<W>, pace: Option<Duration>) -> csv::Result<Self> {
        let trace = match trace {
            Some(out) => {
                let mut writer = Writer::from_writer(out);
                writer.write_record(["tick", "passenger_id", "seat", "position", "state", "is_late"])?;
                Some(writer)
            }
            None => None,
        };
        Ok(Self { trace, pace, error: None })
    }

    /// Flush the trace and return the first write error, if any.
    pub fn finish(mut self) -> csv::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        if let Some(mut writer) = self.trace.take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn write_rows(writer: &mut Writer<W>, report: &TickReport) -> csv::Result<()> {
        for p in &report.passengers {
            writer.write_record(&[
                report.tick.0.to_string(),
                p.id.0.to_string(),
                p.seat.to_string(),
                p.position.to_string(),
                p.state.to_string(),
                (p.is_late as u8).to_string(),
            ])?;
        }
        Ok(())
    }
}

impl<W: Write> SimObserver for RunObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        if self.error.is_none() {
            if let Some(writer) = self.trace.as_mut() {
                if let Err(e) = Self::write_rows(writer, report) {
                    self.error = Some(e);
                }
            }
        }
        if let Some(pace) = self.pace {
            thread::sleep(pace);
        }
    }

    fn on_sim_end(&mut self, total_ticks: Tick) {
        log::info!("run finished: {} ticks", total_ticks.0);
    }
}

// ── JSON summary ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RunSummary<'a> {
    pub config:       &'a BoardingConfig,
    pub policy:       &'static str,
    pub total_ticks:  u64,
    pub late_count:   usize,
    pub final_report: &'a TickReport,
}

// ── Policy comparison ─────────────────────────────────────────────────────────

/// Min / mean / max total ticks of one policy over several seeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialStats {
    pub trials: usize,
    pub min:    u64,
    pub mean:   f64,
    pub max:    u64,
}

impl TrialStats {
    /// `None` for an empty sample.
    pub fn from_totals(totals: &[u64]) -> Option<Self> {
        let min = *totals.iter().min()?;
        let max = *totals.iter().max()?;
        let mean = totals.iter().sum::<u64>() as f64 / totals.len() as f64;
        Some(Self { trials: totals.len(), min, mean, max })
    }
}

pub fn write_comparison<W: Write>(
    out:  W,
    rows: &[(BoardingPolicy, TrialStats)],
) -> csv::Result<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(["policy_id", "policy", "trials", "min_ticks", "mean_ticks", "max_ticks"])?;
    for (policy, stats) in rows {
        writer.write_record(&[
            policy.id().to_string(),
            policy.name().to_string(),
            stats.trials.to_string(),
            stats.min.to_string(),
            format!("{:.2}", stats.mean),
            stats.max.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
