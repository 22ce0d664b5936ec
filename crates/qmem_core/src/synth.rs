//! Circuit synthesis from stabilizer generators.

use alloc::vec::Vec;

use qmem_common::isa::{ConditionalCorrection, Instruction, Opcode};

use crate::code::CodeSpec;
use crate::table::SyndromeTable;

/// A fully unrolled memory experiment.
///
/// One [`RoundBlock`] per round, each carrying the extraction instructions,
/// the classical-conditional correction set for that round's syndrome
/// register, and the logical readout instructions. This is the program
/// representation handed to emitters; live execution goes through the
/// round scheduler instead, which replaces the conditional blocks with a
/// table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub rounds: Vec<RoundBlock>,
}

/// One round of the unrolled program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundBlock {
    /// Ancilla reset, entangling, basis-change, and measurement
    /// instructions for every generator, in generator order.
    pub extraction: Vec<Instruction>,

    /// Corrections conditioned on the syndrome register value, ordered by
    /// syndrome then qubit.
    pub corrections: Vec<ConditionalCorrection>,

    /// Readout-qubit instructions for every logical operator.
    pub readout: Vec<Instruction>,
}

/// Synthesizes one syndrome extraction round.
///
/// Per generator, in order: reset its ancilla, entangle along the
/// generator's support, measure into syndrome bit j. A pure-Z generator
/// parity-checks straight onto the ancilla with `cx data -> ancilla` and
/// needs no basis change. Any generator with X-components instead prepares
/// the ancilla in |+> with a Hadamard, couples `cx ancilla -> data` at
/// X-support positions and `cz ancilla -> data` at Z-support positions
/// (both at Y positions), and rotates back before measuring. The coupling
/// type is derived per (generator, qubit) from the symplectic components,
/// so mixed and non-CSS generators synthesize without special cases.
pub fn extraction_round(spec: &CodeSpec) -> Vec<Instruction> {
    let mut ops = Vec::new();
    ops.push(Instruction::new(Opcode::Barrier, 0, 0));

    for (j, g) in spec.generators().iter().enumerate() {
        let ancilla = spec.ancilla_qubit(j);
        ops.push(Instruction::new(Opcode::Reset, ancilla, 0));

        if g.is_pure_z() {
            for q in g.support() {
                ops.push(Instruction::new(Opcode::GateCX, q as u16, ancilla));
            }
        } else {
            ops.push(Instruction::new(Opcode::GateH, ancilla, 0));
            for q in g.support() {
                if g.x_bit(q) {
                    ops.push(Instruction::new(Opcode::GateCX, ancilla, q as u16));
                }
                if g.z_bit(q) {
                    ops.push(Instruction::new(Opcode::GateCZ, ancilla, q as u16));
                }
            }
            ops.push(Instruction::new(Opcode::GateH, ancilla, 0));
        }

        ops.push(Instruction::new(Opcode::Measure, ancilla, j as u16));
    }

    ops
}

/// Synthesizes the destructive parity readout of one logical operator.
///
/// Resets the shared readout qubit, rotates any data qubit whose logical
/// component has a Z-part into the computational basis, accumulates parity
/// with `cx data -> readout` across the support, and measures into
/// `logic_bit`.
pub fn logical_readout(spec: &CodeSpec, logical_index: usize, logic_bit: u16) -> Vec<Instruction> {
    let readout = spec.readout_qubit();
    let logical = spec.logical(logical_index);

    let mut ops = Vec::new();
    ops.push(Instruction::new(Opcode::Reset, readout, 0));
    for q in logical.support() {
        if logical.z_bit(q) {
            ops.push(Instruction::new(Opcode::GateH, q as u16, 0));
        }
    }
    for q in logical.support() {
        ops.push(Instruction::new(Opcode::GateCX, q as u16, readout));
    }
    ops.push(Instruction::new(Opcode::Measure, readout, logic_bit));
    ops
}

/// Assembles the full unrolled memory program: `rounds` repetitions of
/// extraction, the conditional correction set, and per-logical readout.
///
/// The conditional set expands every nonzero syndrome whose table entry is
/// nonidentity into one record per supported qubit; the zero syndrome is
/// implicit (no correction). Readout for round r of logical i writes logic
/// bit `r * k + i`.
pub fn memory_program(spec: &CodeSpec, table: &SyndromeTable, rounds: usize) -> Program {
    let k = spec.num_logicals();

    let corrections: Vec<ConditionalCorrection> = table
        .entries()
        .filter(|(s, c)| *s != 0 && !c.is_identity())
        .flat_map(|(s, c)| {
            c.support()
                .map(move |q| ConditionalCorrection {
                    syndrome: s,
                    pauli: c.pauli_at(q),
                    qubit: q as u16,
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let blocks = (0..rounds)
        .map(|r| {
            let mut readout = Vec::new();
            for i in 0..k {
                readout.extend(logical_readout(spec, i, (r * k + i) as u16));
            }
            RoundBlock {
                extraction: extraction_round(spec),
                corrections: corrections.clone(),
                readout,
            }
        })
        .collect();

    Program { rounds: blocks }
}
