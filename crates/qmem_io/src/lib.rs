//! I/O utilities for the stabilizer-memory benchmark suite.
//!
//! Provides the text-format parser for code descriptions, the OpenQASM 3
//! emitter for synthesized memory programs, and packed binary files for
//! shot readout records. These utilities sit between the core engine and
//! the filesystem; nothing here touches backend execution.

/// Parser for stabilizer code description files.
///
/// A description is line-oriented: `code <name>` names the code,
/// `stabilizer <string>` appends a generator, `logical <string>` appends a
/// logical operator, and `#` starts a comment. Operator strings use the
/// letters I, X, Y, Z with the leftmost letter on qubit 0. The assembled
/// specification passes through the core validator, so a file that parses
/// but describes inconsistent algebra is still rejected.
pub mod parser;

/// OpenQASM 3 emitter for unrolled memory programs.
///
/// Renders register declarations, the per-round extraction and readout
/// instructions, and the classical-conditional correction blocks in
/// `if (synd == value) { ... }` form for downstream toolchains.
pub mod emitter;

/// Packed binary files for shot readout records.
///
/// Each record is stored as little-endian bits padded to a byte boundary,
/// so fixed-width records can be sliced back out by stride. Used by the
/// host runner to persist logical readout bits across large campaigns.
pub mod loader;
