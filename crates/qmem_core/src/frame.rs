//! Pauli frame tracking and the reference frame backend.

use alloc::vec::Vec;

use qmem_common::isa::Opcode;

use crate::backend::{Backend, BackendError};
use crate::bit_utils;

/// Pauli frame tracking X and Z errors on a register of qubits.
///
/// Maintains two packed bit vectors where each bit records whether the
/// corresponding qubit has accumulated an X or Z error relative to the
/// ideal circuit. Clifford gates update the registers by their conjugation
/// rules instead of acting on amplitudes, which is exact for stabilizer
/// circuits and costs two bits per qubit.
pub struct PauliFrame {
    x: Vec<u64>,
    z: Vec<u64>,
    num_qubits: usize,
}

impl PauliFrame {
    /// A clean frame (no errors) over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            x: bit_utils::zeroed(num_qubits),
            z: bit_utils::zeroed(num_qubits),
            num_qubits,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Clears every tracked error.
    pub fn clear(&mut self) {
        self.x.fill(0);
        self.z.fill(0);
    }

    /// Clears the errors on one qubit, as a reset does.
    pub fn clear_qubit(&mut self, q: usize) {
        bit_utils::set(&mut self.x, q, false);
        bit_utils::set(&mut self.z, q, false);
    }

    /// Toggles the X error bit of `q` (an X gate, or an injected bit
    /// flip; the two are the same thing to a frame).
    pub fn toggle_x(&mut self, q: usize) {
        bit_utils::toggle(&mut self.x, q);
    }

    /// Toggles the Z error bit of `q`.
    pub fn toggle_z(&mut self, q: usize) {
        bit_utils::toggle(&mut self.z, q);
    }

    /// Hadamard conjugation: X and Z swap on this qubit.
    pub fn apply_h(&mut self, q: usize) {
        let had_x = bit_utils::get(&self.x, q);
        let had_z = bit_utils::get(&self.z, q);
        bit_utils::set(&mut self.x, q, had_z);
        bit_utils::set(&mut self.z, q, had_x);
    }

    /// CNOT conjugation: X on the control spreads to the target, Z on the
    /// target spreads to the control.
    pub fn apply_cx(&mut self, c: usize, t: usize) {
        if bit_utils::get(&self.x, c) {
            bit_utils::toggle(&mut self.x, t);
        }
        if bit_utils::get(&self.z, t) {
            bit_utils::toggle(&mut self.z, c);
        }
    }

    /// CZ conjugation: an X error on either qubit picks up a Z error on
    /// the other.
    pub fn apply_cz(&mut self, a: usize, b: usize) {
        if bit_utils::get(&self.x, a) {
            bit_utils::toggle(&mut self.z, b);
        }
        if bit_utils::get(&self.x, b) {
            bit_utils::toggle(&mut self.z, a);
        }
    }

    /// Whether `q` carries an X error, i.e. whether a computational-basis
    /// measurement of it comes out flipped relative to the ideal circuit.
    pub fn has_x_error(&self, q: usize) -> bool {
        bit_utils::get(&self.x, q)
    }

    /// Whether `q` carries a Z error.
    pub fn has_z_error(&self, q: usize) -> bool {
        bit_utils::get(&self.z, q)
    }
}

/// Reference execution backend over a Pauli frame.
///
/// Tracks errors relative to the ideal codeword rather than simulating
/// state. Measurement returns the qubit's X-error bit, which for an
/// extraction circuit run on an in-code register is exactly the syndrome
/// bit, and for the readout qubit is the logical readout deviation. Gate
/// application doubles as error injection: applying X to a data qubit
/// before a round is indistinguishable from a bit flip there.
pub struct FrameBackend {
    frame: PauliFrame,
}

impl FrameBackend {
    pub fn new(num_qubits: usize) -> Self {
        Self {
            frame: PauliFrame::new(num_qubits),
        }
    }

    pub fn frame(&self) -> &PauliFrame {
        &self.frame
    }

    fn check(&self, q: u16) -> Result<usize, BackendError> {
        let limit = self.frame.num_qubits();
        if (q as usize) < limit {
            Ok(q as usize)
        } else {
            Err(BackendError::QubitOutOfRange {
                qubit: q,
                limit: limit as u16,
            })
        }
    }
}

impl Backend for FrameBackend {
    fn apply(&mut self, op: Opcode, targets: &[u16]) -> Result<(), BackendError> {
        match op {
            Opcode::GateX | Opcode::GateY | Opcode::GateZ | Opcode::GateH => {
                debug_assert_eq!(targets.len(), 1);
                let q = self.check(targets[0])?;
                match op {
                    Opcode::GateX => self.frame.toggle_x(q),
                    Opcode::GateZ => self.frame.toggle_z(q),
                    Opcode::GateY => {
                        self.frame.toggle_x(q);
                        self.frame.toggle_z(q);
                    }
                    _ => self.frame.apply_h(q),
                }
                Ok(())
            }
            Opcode::GateCX | Opcode::GateCZ => {
                debug_assert_eq!(targets.len(), 2);
                let a = self.check(targets[0])?;
                let b = self.check(targets[1])?;
                if op == Opcode::GateCX {
                    self.frame.apply_cx(a, b);
                } else {
                    self.frame.apply_cz(a, b);
                }
                Ok(())
            }
            _ => Err(BackendError::UnsupportedOperation { opcode: op as u8 }),
        }
    }

    fn reset(&mut self, q: u16) -> Result<(), BackendError> {
        let q = self.check(q)?;
        self.frame.clear_qubit(q);
        Ok(())
    }

    fn measure(&mut self, q: u16) -> Result<bool, BackendError> {
        let q = self.check(q)?;
        Ok(self.frame.has_x_error(q))
    }
}
