//! End-to-end memory experiment scenarios against the frame backend.

use qmem_common::isa::Opcode;
use qmem_core::QecError;
use qmem_core::backend::{Backend, BackendError};
use qmem_core::codes;
use qmem_core::frame::FrameBackend;
use qmem_core::scheduler::RoundScheduler;
use qmem_core::table::SyndromeTable;

/// Forwards to a frame backend while counting resets per qubit.
struct CountingBackend {
    inner: FrameBackend,
    resets: Vec<usize>,
}

impl CountingBackend {
    fn new(num_qubits: usize) -> Self {
        Self {
            inner: FrameBackend::new(num_qubits),
            resets: vec![0; num_qubits],
        }
    }
}

impl Backend for CountingBackend {
    fn apply(&mut self, op: Opcode, targets: &[u16]) -> Result<(), BackendError> {
        self.inner.apply(op, targets)
    }

    fn reset(&mut self, q: u16) -> Result<(), BackendError> {
        self.resets[q as usize] += 1;
        self.inner.reset(q)
    }

    fn measure(&mut self, q: u16) -> Result<bool, BackendError> {
        self.inner.measure(q)
    }
}

#[test]
fn bit_flip_on_qubit_one_is_corrected_in_round_one() {
    let spec = codes::bit_flip_3();
    let table = SyndromeTable::build(&spec).unwrap();

    let mut backend = FrameBackend::new(spec.total_qubits());
    backend.apply(Opcode::GateX, &[1]).unwrap();

    // Both generators cover qubit 1, so both fire.
    assert_eq!(table.correction(3).to_string(), "IXI");

    let record = RoundScheduler::new(&spec, &table, &mut backend, 2)
        .run()
        .unwrap();
    assert_eq!(record.syndromes, [3, 0]);
    assert_eq!(record.readouts, [false, false]);
    assert!(!backend.frame().has_x_error(1));
}

#[test]
fn injected_error_readout_matches_clean_readout() {
    let spec = codes::bit_flip_3();
    let table = SyndromeTable::build(&spec).unwrap();

    let mut clean = FrameBackend::new(spec.total_qubits());
    let clean_record = RoundScheduler::new(&spec, &table, &mut clean, 2)
        .run()
        .unwrap();

    let mut noisy = FrameBackend::new(spec.total_qubits());
    noisy.apply(Opcode::GateX, &[1]).unwrap();
    let noisy_record = RoundScheduler::new(&spec, &table, &mut noisy, 2)
        .run()
        .unwrap();

    assert_eq!(clean_record.readouts, noisy_record.readouts);
}

#[test]
fn phase_flip_on_five_qubit_code_is_corrected() {
    let spec = codes::five_qubit();
    let table = SyndromeTable::build(&spec).unwrap();

    let mut backend = FrameBackend::new(spec.total_qubits());
    backend.apply(Opcode::GateZ, &[2]).unwrap();

    assert_eq!(table.correction(4).to_string(), "IIZII");

    let record = RoundScheduler::new(&spec, &table, &mut backend, 2)
        .run()
        .unwrap();
    assert_eq!(record.syndromes, [4, 0], "second round must see a quiet register");
    assert_eq!(record.readouts, [false, false]);
    assert!(!backend.frame().has_z_error(2));
}

#[test]
fn every_single_qubit_pauli_on_five_qubit_code_round_trips() {
    let spec = codes::five_qubit();
    let table = SyndromeTable::build(&spec).unwrap();

    for q in 0..spec.num_data_qubits() as u16 {
        for gate in [Opcode::GateX, Opcode::GateZ, Opcode::GateY] {
            let mut backend = FrameBackend::new(spec.total_qubits());
            backend.apply(gate, &[q]).unwrap();
            let record = RoundScheduler::new(&spec, &table, &mut backend, 2)
                .run()
                .unwrap();
            assert_ne!(record.syndromes[0], 0, "{:?} on {} went undetected", gate, q);
            assert_eq!(record.syndromes[1], 0, "{:?} on {} left a residue", gate, q);
            assert_eq!(record.readouts, [false, false]);
        }
    }
}

#[test]
fn two_rounds_emit_two_readout_bits_and_reset_each_ancilla_twice() {
    let spec = codes::bit_flip_3();
    let table = SyndromeTable::build(&spec).unwrap();

    let mut backend = CountingBackend::new(spec.total_qubits());
    let record = RoundScheduler::new(&spec, &table, &mut backend, 2)
        .run()
        .unwrap();

    assert_eq!(record.readouts.len(), 2);
    let ancilla_resets: usize = (0..spec.num_generators())
        .map(|j| backend.resets[spec.ancilla_qubit(j) as usize])
        .sum();
    assert_eq!(ancilla_resets, 2 * spec.num_generators());
    assert_eq!(backend.resets[spec.readout_qubit() as usize], 2);
    for q in 0..spec.num_data_qubits() {
        assert_eq!(backend.resets[q], 0, "data qubit {} must never be reset", q);
    }
}

#[test]
fn backend_failure_aborts_the_shot_without_a_record() {
    let spec = codes::bit_flip_3();
    let table = SyndromeTable::build(&spec).unwrap();

    // One qubit short: the last ancilla is out of range.
    let mut backend = FrameBackend::new(spec.total_qubits() - 1);
    let result = RoundScheduler::new(&spec, &table, &mut backend, 2).run();
    assert!(matches!(result, Err(QecError::Backend(_))));
}
