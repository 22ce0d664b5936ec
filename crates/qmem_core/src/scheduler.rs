//! Round scheduling: extraction, decode, correction, logical readout.

use alloc::vec::Vec;

use qmem_common::isa::{Instruction, Opcode};

use crate::QecError;
use crate::backend::{Backend, BackendError};
use crate::code::CodeSpec;
use crate::pauli::PauliString;
use crate::synth;
use crate::table::SyndromeTable;

/// Protocol phase of one logical block.
///
/// The round index is carried in each active phase. Every transition is
/// driven by [`RoundScheduler::step`]; the chain within a round is strict
/// because each correction depends on that round's syndrome, which depends
/// on the completed ancilla measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting to start; the data register is assumed to already hold a
    /// codeword (encoding is a preceding, external concern).
    Idle,
    /// Running the extraction circuit for round i and collecting the raw
    /// syndrome.
    Extracting(usize),
    /// Looking the syndrome up in the decode table.
    Decoding(usize),
    /// Applying the looked-up Pauli correction.
    Correcting(usize),
    /// Reading out every logical operator for round i.
    ReadingOut(usize),
    /// All rounds finished; the shot record is complete.
    Done,
}

/// Classical outcome of one shot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShotRecord {
    /// Raw syndrome per round, in round order.
    pub syndromes: Vec<u16>,
    /// Logical readout bits, k per round, in round-major order.
    pub readouts: Vec<bool>,
}

impl ShotRecord {
    /// True when no round saw a nonzero syndrome.
    pub fn is_clean(&self) -> bool {
        self.syndromes.iter().all(|s| *s == 0)
    }

    /// True when any readout bit deviated from the ideal codeword.
    pub fn has_logical_flip(&self) -> bool {
        self.readouts.iter().any(|b| *b)
    }
}

/// Drives R rounds of extraction, decode, correction, and readout for one
/// logical block against a backend session.
///
/// The extraction and readout instruction sequences are synthesized once
/// at construction and replayed each round; ancilla reuse across rounds is
/// safe because every replay begins with the resets the synthesizer
/// emitted. Decoding is a single table lookup and the correction a single
/// conditional application, rather than the 2^m mutually exclusive
/// conditional blocks an unrolled circuit would carry.
///
/// A backend error in any phase aborts the shot: `run` returns the error
/// and the partially filled record is dropped, so a cancelled shot
/// contributes no readout bit.
pub struct RoundScheduler<'a, B: Backend> {
    table: &'a SyndromeTable,
    backend: &'a mut B,
    rounds: usize,
    phase: Phase,
    extraction: Vec<Instruction>,
    readout: Vec<Instruction>,
    barrier_targets: Vec<u16>,
    pending_syndrome: u16,
    pending_correction: Option<&'a PauliString>,
    record: ShotRecord,
}

impl<'a, B: Backend> RoundScheduler<'a, B> {
    pub fn new(
        spec: &'a CodeSpec,
        table: &'a SyndromeTable,
        backend: &'a mut B,
        rounds: usize,
    ) -> Self {
        let mut readout = Vec::new();
        for i in 0..spec.num_logicals() {
            readout.extend(synth::logical_readout(spec, i, i as u16));
        }

        let n = spec.num_data_qubits();
        let barrier_targets = (0..n)
            .chain(n + 1..spec.total_qubits())
            .map(|q| q as u16)
            .collect();

        Self {
            table,
            backend,
            rounds,
            phase: Phase::Idle,
            extraction: synth::extraction_round(spec),
            readout,
            barrier_targets,
            pending_syndrome: 0,
            pending_correction: None,
            record: ShotRecord::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn record(&self) -> &ShotRecord {
        &self.record
    }

    /// Advances the protocol by one phase transition.
    ///
    /// Returns `Ok(true)` while more work remains and `Ok(false)` once
    /// `Done` is reached. Errors leave the scheduler in the phase that
    /// failed; the shot is considered aborted.
    pub fn step(&mut self) -> Result<bool, QecError> {
        self.phase = match self.phase {
            Phase::Idle => Phase::Extracting(0),
            Phase::Extracting(i) => {
                let syndrome = self.run_extraction()?;
                self.record.syndromes.push(syndrome);
                self.pending_syndrome = syndrome;
                Phase::Decoding(i)
            }
            Phase::Decoding(i) => {
                self.pending_correction = Some(self.table.correction(self.pending_syndrome));
                Phase::Correcting(i)
            }
            Phase::Correcting(i) => {
                if let Some(correction) = self.pending_correction.take() {
                    self.apply_correction(correction)?;
                }
                Phase::ReadingOut(i)
            }
            Phase::ReadingOut(i) => {
                self.run_readout()?;
                if i + 1 < self.rounds {
                    Phase::Extracting(i + 1)
                } else {
                    Phase::Done
                }
            }
            Phase::Done => Phase::Done,
        };
        Ok(self.phase != Phase::Done)
    }

    /// Runs the block to completion and yields the shot record.
    pub fn run(mut self) -> Result<ShotRecord, QecError> {
        while self.step()? {}
        Ok(self.record)
    }

    fn run_extraction(&mut self) -> Result<u16, QecError> {
        let mut syndrome = 0u16;
        for idx in 0..self.extraction.len() {
            let instr = self.extraction[idx];
            if instr.opcode == Opcode::Measure as u8 {
                if self.backend.measure(instr.operand_1)? {
                    syndrome |= 1 << instr.operand_2;
                }
            } else {
                self.play(instr)?;
            }
        }
        Ok(syndrome)
    }

    fn run_readout(&mut self) -> Result<(), QecError> {
        for idx in 0..self.readout.len() {
            let instr = self.readout[idx];
            if instr.opcode == Opcode::Measure as u8 {
                let bit = self.backend.measure(instr.operand_1)?;
                self.record.readouts.push(bit);
            } else {
                self.play(instr)?;
            }
        }
        Ok(())
    }

    fn apply_correction(&mut self, correction: &PauliString) -> Result<(), QecError> {
        for q in correction.support() {
            if let Some(gate) = correction.pauli_at(q).opcode() {
                self.backend.apply(gate, &[q as u16])?;
            }
        }
        Ok(())
    }

    fn play(&mut self, instr: Instruction) -> Result<(), QecError> {
        if instr.opcode == Opcode::Barrier as u8 {
            self.backend.barrier(&self.barrier_targets);
            return Ok(());
        }
        if instr.opcode == Opcode::Reset as u8 {
            self.backend.reset(instr.operand_1)?;
            return Ok(());
        }
        let gate = Opcode::from_u8(instr.opcode).ok_or(BackendError::UnsupportedOperation {
            opcode: instr.opcode,
        })?;
        if gate.is_two_qubit() {
            self.backend
                .apply(gate, &[instr.operand_1, instr.operand_2])?;
        } else {
            self.backend.apply(gate, &[instr.operand_1])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;
    use crate::frame::FrameBackend;

    #[test]
    fn phases_advance_in_protocol_order() {
        let spec = codes::bit_flip_3();
        let table = SyndromeTable::build(&spec).unwrap();
        let mut backend = FrameBackend::new(spec.total_qubits());
        let mut sched = RoundScheduler::new(&spec, &table, &mut backend, 1);

        let mut phases = vec![sched.phase()];
        while sched.step().unwrap() {
            phases.push(sched.phase());
        }
        phases.push(sched.phase());

        assert_eq!(
            phases,
            [
                Phase::Idle,
                Phase::Extracting(0),
                Phase::Decoding(0),
                Phase::Correcting(0),
                Phase::ReadingOut(0),
                Phase::Done,
            ]
        );
        assert_eq!(sched.record().syndromes, [0]);
        assert_eq!(sched.record().readouts, [false]);
    }

    #[test]
    fn noiseless_shots_stay_clean_for_every_builtin() {
        for spec in [
            codes::bit_flip_3(),
            codes::five_qubit(),
            codes::steane_7(),
            codes::shor_9(),
            codes::surface_3x3(),
        ] {
            let table = SyndromeTable::build(&spec).unwrap();
            let mut backend = FrameBackend::new(spec.total_qubits());
            let record = RoundScheduler::new(&spec, &table, &mut backend, 3)
                .run()
                .unwrap();
            assert!(record.is_clean(), "{}", spec.name());
            assert!(!record.has_logical_flip(), "{}", spec.name());
            assert_eq!(record.syndromes.len(), 3, "{}", spec.name());
            assert_eq!(record.readouts.len(), 3, "{}", spec.name());
        }
    }
}
