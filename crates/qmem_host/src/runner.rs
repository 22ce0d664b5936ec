//! Parallel shot campaigns against the frame backend.
//!
//! Shots are independent logical blocks: each gets its own backend
//! session, so the campaign fans out over a rayon thread pool with the
//! code specification and decode table shared read-only. Noise is seeded
//! per shot index, keeping campaigns deterministic regardless of how the
//! pool schedules them.

use anyhow::Result;
use rayon::prelude::*;

use qmem_common::pauli::Pauli;
use qmem_core::QecError;
use qmem_core::backend::Backend;
use qmem_core::code::CodeSpec;
use qmem_core::frame::FrameBackend;
use qmem_core::scheduler::{RoundScheduler, ShotRecord};
use qmem_core::table::SyndromeTable;

use crate::stats::RunStats;

/// Errors injected on the data register before the first round.
#[derive(Debug, Clone, Copy)]
pub enum NoiseModel {
    /// No injected errors; every shot should stay clean.
    None,
    /// One fixed Pauli error on one data qubit, every shot.
    Inject { qubit: u16, pauli: Pauli },
    /// Independent per-qubit errors with probability `p`, uniform over
    /// X, Z, Y.
    Random { p: f64 },
}

pub struct RunConfig {
    pub rounds: usize,
    pub shots: usize,
    pub noise: NoiseModel,
    pub seed: u64,
}

pub struct RunOutput {
    pub stats: RunStats,
    /// Readout bits of completed shots, in shot order.
    pub records: Vec<Vec<bool>>,
}

/// Runs the configured number of shots in parallel and aggregates the
/// outcome counters.
pub fn run_shots(spec: &CodeSpec, table: &SyndromeTable, cfg: &RunConfig) -> Result<RunOutput> {
    let results: Vec<Result<ShotRecord, QecError>> = (0..cfg.shots)
        .into_par_iter()
        .map(|shot| {
            let mut backend = FrameBackend::new(spec.total_qubits());
            apply_noise(spec, &mut backend, cfg, shot as u64)?;
            RoundScheduler::new(spec, table, &mut backend, cfg.rounds).run()
        })
        .collect();

    let mut stats = RunStats::new();
    let mut records = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(record) => {
                stats.tally(&record);
                records.push(record.readouts);
            }
            Err(_) => stats.aborted += 1,
        }
    }

    Ok(RunOutput { stats, records })
}

fn apply_noise(
    spec: &CodeSpec,
    backend: &mut FrameBackend,
    cfg: &RunConfig,
    shot: u64,
) -> Result<(), QecError> {
    match cfg.noise {
        NoiseModel::None => {}
        NoiseModel::Inject { qubit, pauli } => {
            if let Some(gate) = pauli.opcode() {
                backend.apply(gate, &[qubit])?;
            }
        }
        NoiseModel::Random { p } => {
            let mut state = seed_shot(cfg.seed, shot);
            for q in 0..spec.num_data_qubits() as u16 {
                if next_f64(&mut state) < p {
                    let pauli = match (next_f64(&mut state) * 3.0) as u32 {
                        0 => Pauli::X,
                        1 => Pauli::Z,
                        _ => Pauli::Y,
                    };
                    if let Some(gate) = pauli.opcode() {
                        backend.apply(gate, &[q])?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Mixes the campaign seed with the shot index so shots draw independent
/// streams no matter which worker runs them.
fn seed_shot(seed: u64, shot: u64) -> u64 {
    let state = seed ^ (shot + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    if state == 0 { 0x2545_F491_4F6C_DD1D } else { state }
}

fn next_f64(state: &mut u64) -> f64 {
    *state ^= *state >> 12;
    *state ^= *state << 25;
    *state ^= *state >> 27;
    let result = state.wrapping_mul(0x2545_F491_4F6C_DD1D);
    (result as f64) / (u64::MAX as f64)
}
