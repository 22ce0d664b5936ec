//! Core engine for stabilizer-code memory benchmarks.
//!
//! This crate turns an abstract stabilizer-code description into everything
//! a quantum memory experiment needs: a validated code model, an exhaustive
//! syndrome-to-correction decode table, an ancilla-based syndrome extraction
//! circuit, and a round scheduler that drives extraction, decoding,
//! correction, and logical readout against a pluggable execution backend.
//! All modules avoid `std` so the engine can run inside host tools and
//! embedded control processors alike.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

/// Bit manipulation utilities for packed GF(2) vectors.
///
/// Pauli operators and syndrome masks are stored as u64 words. This module
/// provides the single-bit accessors plus the word-level operations (XOR
/// accumulation, AND-parity, population count) that the symplectic algebra
/// is built from.
pub mod bit_utils;

/// Pauli strings in symplectic (X-part, Z-part) representation.
///
/// A Pauli string over n qubits is a pair of length-n bit vectors. Products
/// are component-wise XOR, commutation is the symplectic inner product, and
/// weight is the number of qubits acted on nontrivially. Stabilizer
/// generators, logical operators, errors, and corrections are all values of
/// this one type.
pub mod pauli;

/// Stabilizer code model: generators, logical operators, validation.
///
/// A code specification owns its ordered generator and logical-operator
/// lists and is only constructible through a validating constructor that
/// checks pairwise commutation, generator independence over GF(2), and
/// logical-operator consistency. Downstream components assume a validated
/// specification and never re-check.
pub mod code;

/// Built-in code library.
///
/// Ready-made specifications for the codes the benchmark suite ships with:
/// the 3-qubit bit-flip repetition code, the [[5,1,3]] code, the Steane
/// [[7,1,3]] code, the Shor [[9,1,3]] code, and a distance-3 rotated
/// surface-code patch.
pub mod codes;

/// Syndrome decode table construction.
///
/// Exhaustively enumerates Pauli errors in increasing weight order and
/// assigns each fresh syndrome its minimum-weight representative, producing
/// a total lookup table over all 2^m syndrome values. Also derives the code
/// distance by the same search machinery.
pub mod table;

/// Circuit synthesis from stabilizer generators.
///
/// Compiles each generator into a reset/entangle/basis-change/measure
/// ancilla block, derives the per-qubit coupling type (controlled-X or
/// controlled-Z) from the generator's symplectic components, and assembles
/// full unrolled memory programs with classical-conditional correction
/// blocks for emission.
pub mod synth;

/// Execution backend interface.
///
/// The narrow capability the engine consumes: apply a gate, reset a qubit,
/// measure a qubit, and an optional barrier ordering hint. Measurement is
/// the single blocking point of the protocol; every later gate choice is
/// data-dependent on its result.
pub mod backend;

/// Pauli frame tracker and the reference frame backend.
///
/// Tracks X and Z error bits per qubit under Clifford conjugation instead
/// of simulating amplitudes. Measurement returns the qubit's accumulated
/// X-error bit, which is exactly the deviation a memory experiment observes
/// relative to the ideal codeword. Serves as the in-tree backend for tests
/// and host-side shot campaigns.
pub mod frame;

/// Round scheduling and logical readout.
///
/// Drives the per-round state machine: extract the syndrome through the
/// backend, decode it with one table lookup, apply the correction, read the
/// logical operators out, and repeat for the configured number of rounds.
/// A backend failure aborts the shot with no partial readout observable.
pub mod scheduler;

use core::fmt;

use crate::backend::BackendError;

/// Reasons a code specification fails validation.
///
/// Produced only at construction time; a [`code::CodeSpec`] that exists is
/// valid. Indices refer to positions in the generator and logical-operator
/// lists as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeDefect {
    /// The specification has no stabilizer generators at all.
    NoGenerators,

    /// A generator or logical operator has a different qubit count than
    /// the first generator.
    LengthMismatch {
        /// Index into the offending list (generators first, then logicals).
        index: usize,
    },

    /// Two generators anticommute: their symplectic product is 1, so they
    /// cannot be simultaneously measured.
    AnticommutingGenerators {
        /// Index of the earlier generator of the pair.
        first: usize,
        /// Index of the later generator of the pair.
        second: usize,
    },

    /// A generator is a product of earlier generators (its symplectic row
    /// reduces to zero against them), so it carries no syndrome
    /// information of its own.
    DependentGenerator {
        /// Index of the redundant generator.
        index: usize,
    },

    /// More generators than the qubit counts allow: a consistent code
    /// needs m <= n - k.
    TooManyGenerators {
        /// Number of generators supplied.
        generators: usize,
        /// Number of data qubits.
        data_qubits: usize,
        /// Number of logical operators supplied.
        logicals: usize,
    },

    /// Syndromes are indexed by u16, which caps the generator count.
    GeneratorLimitExceeded {
        /// Number of generators supplied.
        generators: usize,
        /// Maximum supported generator count.
        max: usize,
    },

    /// A logical operator anticommutes with a stabilizer generator.
    LogicalAnticommutes {
        /// Index of the logical operator.
        logical: usize,
        /// Index of the generator it anticommutes with.
        generator: usize,
    },

    /// A logical operator is a product of stabilizer generators and
    /// therefore acts trivially on the code space.
    LogicalInStabilizer {
        /// Index of the logical operator.
        logical: usize,
    },
}

impl fmt::Display for CodeDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CodeDefect::NoGenerators => write!(f, "code has no stabilizer generators"),
            CodeDefect::LengthMismatch { index } => {
                write!(f, "operator {} has mismatched qubit count", index)
            }
            CodeDefect::AnticommutingGenerators { first, second } => {
                write!(f, "generators {} and {} anticommute", first, second)
            }
            CodeDefect::DependentGenerator { index } => {
                write!(f, "generator {} is a product of earlier generators", index)
            }
            CodeDefect::TooManyGenerators {
                generators,
                data_qubits,
                logicals,
            } => write!(
                f,
                "{} generators exceed n - k = {} - {}",
                generators, data_qubits, logicals
            ),
            CodeDefect::GeneratorLimitExceeded { generators, max } => {
                write!(f, "{} generators exceed the supported maximum {}", generators, max)
            }
            CodeDefect::LogicalAnticommutes { logical, generator } => {
                write!(
                    f,
                    "logical operator {} anticommutes with generator {}",
                    logical, generator
                )
            }
            CodeDefect::LogicalInStabilizer { logical } => {
                write!(f, "logical operator {} lies in the stabilizer group", logical)
            }
        }
    }
}

/// Error type returned by engine operations.
///
/// Construction-time failures are fatal for the specification or table that
/// raised them; backend failures abort only the shot in flight and are
/// never retried here. Out-of-range indices are treated as programming
/// errors and panic instead of surfacing as a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QecError {
    /// The code specification failed validation; see the contained defect
    /// for the offending generator pair or operator index.
    InvalidCode(CodeDefect),

    /// The decode table builder exhausted all candidate errors up to
    /// weight n without covering every syndrome.
    ///
    /// Signals that the code's parameters are inconsistent with the
    /// assumed correction capability; with independent generators this
    /// indicates a malformed specification rather than an unlucky search.
    DecodeTableIncomplete {
        /// Syndromes assigned before the search ran dry.
        assigned: usize,
        /// Total number of syndromes, 2^m.
        total: usize,
    },

    /// The execution backend rejected an operation.
    ///
    /// Propagated up through the round scheduler, aborting the current
    /// shot only. Retry policy, if any, belongs to the backend or the
    /// orchestration layer.
    Backend(BackendError),
}

impl fmt::Display for QecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            QecError::InvalidCode(defect) => write!(f, "invalid code: {}", defect),
            QecError::DecodeTableIncomplete { assigned, total } => write!(
                f,
                "decode table incomplete: {} of {} syndromes assigned",
                assigned, total
            ),
            QecError::Backend(err) => write!(f, "backend failure: {}", err),
        }
    }
}

impl core::error::Error for QecError {}

impl From<CodeDefect> for QecError {
    fn from(defect: CodeDefect) -> Self {
        QecError::InvalidCode(defect)
    }
}

impl From<BackendError> for QecError {
    fn from(err: BackendError) -> Self {
        QecError::Backend(err)
    }
}
