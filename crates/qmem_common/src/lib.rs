//! Common definitions shared across the stabilizer-memory benchmark system.
//!
//! This crate defines the instruction encoding for synthesized syndrome
//! extraction circuits, the Pauli operator symbols used by decode tables and
//! correction records, and the classical-conditional correction blocks that
//! downstream emitters translate into branching circuit notation. It has no
//! dependencies so that core engine code, host tools, and embedded
//! controllers can all share one definition of the wire format.

#![no_std]

/// Pauli operator symbols and their binary (X-part, Z-part) encoding.
///
/// A Pauli operator on a single qubit is one of I, X, Y, Z up to phase.
/// The engine works with the symplectic encoding throughout: X contributes
/// an X-bit, Z contributes a Z-bit, and Y contributes both. This module
/// provides the conversions between the symbolic and binary views.
pub mod pauli {
    use crate::isa::Opcode;

    /// Single-qubit Pauli operator, ignoring global phase.
    ///
    /// The discriminants are chosen so that the low bit is the X-component
    /// and the high bit is the Z-component of the symplectic encoding,
    /// making [`Pauli::from_xz`] and its inverse trivial.
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Pauli {
        /// Identity: acts trivially, contributes no syndrome.
        I = 0b00,
        /// Bit flip: anticommutes with Z-type stabilizer components.
        X = 0b01,
        /// Phase flip: anticommutes with X-type stabilizer components.
        Z = 0b10,
        /// Combined bit and phase flip (X and Z applied together).
        Y = 0b11,
    }

    impl Pauli {
        /// Builds a Pauli from its symplectic components.
        pub fn from_xz(x: bool, z: bool) -> Self {
            match (x, z) {
                (false, false) => Pauli::I,
                (true, false) => Pauli::X,
                (false, true) => Pauli::Z,
                (true, true) => Pauli::Y,
            }
        }

        /// True if this Pauli has an X-component (X or Y).
        pub fn has_x(self) -> bool {
            matches!(self, Pauli::X | Pauli::Y)
        }

        /// True if this Pauli has a Z-component (Z or Y).
        pub fn has_z(self) -> bool {
            matches!(self, Pauli::Z | Pauli::Y)
        }

        /// Gate opcode that applies this Pauli to a qubit, or `None` for
        /// the identity (which needs no gate at all).
        pub fn opcode(self) -> Option<Opcode> {
            match self {
                Pauli::I => None,
                Pauli::X => Some(Opcode::GateX),
                Pauli::Z => Some(Opcode::GateZ),
                Pauli::Y => Some(Opcode::GateY),
            }
        }

        /// Letter used in textual Pauli strings ("XZZXI" and friends).
        pub fn letter(self) -> char {
            match self {
                Pauli::I => 'I',
                Pauli::X => 'X',
                Pauli::Z => 'Z',
                Pauli::Y => 'Y',
            }
        }

        /// Parses a single Pauli letter, accepting upper case only.
        pub fn from_letter(c: char) -> Option<Self> {
            match c {
                'I' => Some(Pauli::I),
                'X' => Some(Pauli::X),
                'Z' => Some(Pauli::Z),
                'Y' => Some(Pauli::Y),
                _ => None,
            }
        }
    }
}

/// Instruction encoding for synthesized quantum memory circuits.
///
/// A synthesized circuit is an ordered sequence of compact instruction
/// records plus a set of classical-conditional correction blocks. The
/// records cover qubit resets, the Clifford gates needed for ancilla-based
/// stabilizer measurement, and measurements that write classical bits.
/// Keeping the encoding flat and fixed-width makes programs cheap to build,
/// replay against a backend, and translate to circuit notation.
pub mod isa {
    use crate::pauli::Pauli;

    /// Opcode enumeration for circuit instructions.
    ///
    /// Gate opcodes occupy the low range; reset, measurement, and the
    /// barrier ordering hint are grouped separately so a dispatcher can
    /// distinguish unitary operations from the rest with a range check.
    #[repr(u8)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Opcode {
        /// Pauli X on the qubit in `operand_1`.
        GateX = 0x01,

        /// Pauli Y on the qubit in `operand_1`.
        GateY = 0x02,

        /// Pauli Z on the qubit in `operand_1`.
        GateZ = 0x03,

        /// Hadamard on the qubit in `operand_1`.
        ///
        /// Used to sandwich ancilla entangling layers when a stabilizer
        /// generator has X-type components, and to rotate data qubits for
        /// readout of logical operators with Z-support.
        GateH = 0x04,

        /// Controlled-X with control `operand_1` and target `operand_2`.
        GateCX = 0x05,

        /// Controlled-Z between `operand_1` and `operand_2`.
        ///
        /// Symmetric in its operands; the synthesizer conventionally puts
        /// the ancilla in `operand_1`.
        GateCZ = 0x06,

        /// Reset the qubit in `operand_1` to |0>.
        ///
        /// Every ancilla is reset before its generator is measured, and the
        /// readout qubit is reset before each logical readout. An ancilla
        /// may be reused across rounds only after such a reset.
        Reset = 0x10,

        /// Measure the qubit in `operand_1` in the computational basis.
        ///
        /// `operand_2` is the classical destination: the syndrome bit index
        /// for ancilla measurements (equal to the generator's position in
        /// the code description) or the logic bit index for readouts.
        Measure = 0x20,

        /// Ordering hint separating rounds; no semantic effect.
        Barrier = 0x30,
    }

    /// Compact instruction record for one circuit operation.
    ///
    /// Single-qubit operations use `operand_1` and leave `operand_2` zero;
    /// two-qubit gates use both; measurements carry their classical
    /// destination in `operand_2`. See [`Opcode`] for the per-opcode
    /// operand meanings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Instruction {
        /// Operation code identifying the instruction type.
        pub opcode: u8,

        /// First operand: the qubit acted on, or the control of a
        /// two-qubit gate.
        pub operand_1: u16,

        /// Second operand: the target of a two-qubit gate, or the
        /// classical bit a measurement writes to.
        pub operand_2: u16,
    }

    impl Opcode {
        /// Decodes a raw opcode byte.
        pub fn from_u8(value: u8) -> Option<Self> {
            match value {
                0x01 => Some(Opcode::GateX),
                0x02 => Some(Opcode::GateY),
                0x03 => Some(Opcode::GateZ),
                0x04 => Some(Opcode::GateH),
                0x05 => Some(Opcode::GateCX),
                0x06 => Some(Opcode::GateCZ),
                0x10 => Some(Opcode::Reset),
                0x20 => Some(Opcode::Measure),
                0x30 => Some(Opcode::Barrier),
                _ => None,
            }
        }

        /// True for gates acting on two qubits.
        pub fn is_two_qubit(self) -> bool {
            matches!(self, Opcode::GateCX | Opcode::GateCZ)
        }
    }

    impl Instruction {
        /// Constructs an instruction with the given opcode and operands.
        pub fn new(opcode: Opcode, op1: u16, op2: u16) -> Self {
            Self {
                opcode: opcode as u8,
                operand_1: op1,
                operand_2: op2,
            }
        }
    }

    /// One classically conditioned correction: when the syndrome register
    /// equals `syndrome`, apply `pauli` to data qubit `qubit`.
    ///
    /// A decode table entry of weight w expands into w of these records.
    /// Emitters render consecutive records with equal syndrome values as a
    /// single conditional block.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConditionalCorrection {
        /// Syndrome register value that triggers this correction.
        pub syndrome: u16,

        /// Pauli operator to apply; never [`Pauli::I`].
        pub pauli: Pauli,

        /// Data qubit index the correction acts on.
        pub qubit: u16,
    }
}
