//! Execution backend interface.

use core::fmt;

use qmem_common::isa::Opcode;

/// Failure reported by an execution backend.
///
/// Anything a backend can refuse: an unknown gate, a qubit outside the
/// session, or a transport-level problem on real hardware. The engine
/// propagates these without retrying; a failed operation aborts the shot
/// it belongs to and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendError {
    /// An operand referenced a qubit the session does not own.
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u16,
        /// Number of qubits in the session.
        limit: u16,
    },

    /// The opcode is not a unitary gate this backend can apply.
    UnsupportedOperation {
        /// Raw opcode value.
        opcode: u8,
    },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BackendError::QubitOutOfRange { qubit, limit } => {
                write!(f, "qubit {} out of range (session has {})", qubit, limit)
            }
            BackendError::UnsupportedOperation { opcode } => {
                write!(f, "unsupported operation 0x{:02x}", opcode)
            }
        }
    }
}

impl core::error::Error for BackendError {}

/// The capability the engine consumes to execute synthesized circuits.
///
/// One implementation per target: a Pauli-frame tracker for tests and
/// host-side campaigns ([`crate::frame::FrameBackend`]), or an adapter to
/// real control hardware. Calls are synchronous; `measure` is the single
/// blocking point of the protocol, because every gate choice after it is
/// data-dependent on the returned bit. A backend session exclusively owns
/// its qubits; concurrent shots use separate sessions.
pub trait Backend {
    /// Applies a unitary gate. Single-qubit gates take one target;
    /// controlled gates take `[control, target]`.
    fn apply(&mut self, op: Opcode, targets: &[u16]) -> Result<(), BackendError>;

    /// Resets a qubit to |0>.
    fn reset(&mut self, q: u16) -> Result<(), BackendError>;

    /// Measures a qubit in the computational basis.
    fn measure(&mut self, q: u16) -> Result<bool, BackendError>;

    /// Ordering hint across the listed qubits. No semantic effect;
    /// backends that do not schedule may ignore it.
    fn barrier(&mut self, _qs: &[u16]) {}
}
