use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use qmem_common::isa::{Instruction, Opcode};
use qmem_core::code::CodeSpec;
use qmem_core::synth::Program;

/// Writes a memory program as OpenQASM 3.0.
///
/// Registers follow the synthesizer's layout: `data`, a single `readout`
/// qubit, one `ancilla` per generator, the `synd` classical register the
/// ancilla measurements write into, and one `logic` bit per readout. Each
/// round renders as extraction instructions, one `if (synd == value)`
/// block per correctable syndrome, then the readout instructions.
pub fn write_qasm<W: Write>(out: &mut W, spec: &CodeSpec, program: &Program) -> Result<()> {
    let rounds = program.rounds.len();
    let logic_bits = (rounds * spec.num_logicals()).max(1);

    writeln!(out, "OPENQASM 3.0;")?;
    writeln!(out, "include \"stdgates.inc\";")?;
    writeln!(out)?;
    writeln!(out, "qubit[{}] data;", spec.num_data_qubits())?;
    writeln!(out, "qubit[1] readout;")?;
    writeln!(out, "qubit[{}] ancilla;", spec.num_generators())?;
    writeln!(out, "bit[{}] synd;", spec.num_generators())?;
    writeln!(out, "bit[{}] logic;", logic_bits)?;

    for block in &program.rounds {
        writeln!(out)?;
        for instr in &block.extraction {
            write_instruction(out, spec, instr)?;
        }

        let mut idx = 0;
        while idx < block.corrections.len() {
            let syndrome = block.corrections[idx].syndrome;
            writeln!(out, "if (synd == {}) {{", syndrome)?;
            while idx < block.corrections.len() && block.corrections[idx].syndrome == syndrome {
                let c = block.corrections[idx];
                writeln!(
                    out,
                    "  {} data[{}];",
                    c.pauli.letter().to_ascii_lowercase(),
                    c.qubit
                )?;
                idx += 1;
            }
            writeln!(out, "}}")?;
        }

        for instr in &block.readout {
            write_instruction(out, spec, instr)?;
        }
    }

    Ok(())
}

/// Writes a program to a file.
pub fn save_qasm<P: AsRef<Path>>(path: P, spec: &CodeSpec, program: &Program) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.as_ref().display()))?;
    let mut out = BufWriter::new(file);
    write_qasm(&mut out, spec, program)?;
    out.flush()?;
    Ok(())
}

fn operand(spec: &CodeSpec, q: u16) -> String {
    let n = spec.num_data_qubits() as u16;
    if q < n {
        format!("data[{}]", q)
    } else if q == n {
        "readout[0]".to_string()
    } else {
        format!("ancilla[{}]", q - n - 1)
    }
}

fn write_instruction<W: Write>(out: &mut W, spec: &CodeSpec, instr: &Instruction) -> Result<()> {
    let a = instr.operand_1;
    match Opcode::from_u8(instr.opcode) {
        Some(Opcode::Barrier) => writeln!(out, "barrier data, ancilla;")?,
        Some(Opcode::Reset) => writeln!(out, "reset {};", operand(spec, a))?,
        Some(Opcode::GateH) => writeln!(out, "h {};", operand(spec, a))?,
        Some(Opcode::GateX) => writeln!(out, "x {};", operand(spec, a))?,
        Some(Opcode::GateY) => writeln!(out, "y {};", operand(spec, a))?,
        Some(Opcode::GateZ) => writeln!(out, "z {};", operand(spec, a))?,
        Some(Opcode::GateCX) => writeln!(
            out,
            "cx {}, {};",
            operand(spec, a),
            operand(spec, instr.operand_2)
        )?,
        Some(Opcode::GateCZ) => writeln!(
            out,
            "cz {}, {};",
            operand(spec, a),
            operand(spec, instr.operand_2)
        )?,
        Some(Opcode::Measure) => {
            let register = if a == spec.readout_qubit() { "logic" } else { "synd" };
            writeln!(
                out,
                "measure {} -> {}[{}];",
                operand(spec, a),
                register,
                instr.operand_2
            )?;
        }
        None => anyhow::bail!("invalid opcode 0x{:02x} in program", instr.opcode),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qmem_core::codes;
    use qmem_core::synth;
    use qmem_core::table::SyndromeTable;

    fn render(spec: &CodeSpec, rounds: usize) -> String {
        let table = SyndromeTable::build(spec).unwrap();
        let program = synth::memory_program(spec, &table, rounds);
        let mut buf = Vec::new();
        write_qasm(&mut buf, spec, &program).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn repetition_listing_has_conditionals_and_readouts() {
        let text = render(&codes::bit_flip_3(), 2);

        assert!(text.starts_with("OPENQASM 3.0;"));
        assert!(text.contains("qubit[3] data;"));
        assert!(text.contains("bit[2] synd;"));
        assert!(text.contains("bit[2] logic;"));

        assert_eq!(text.matches("if (synd == 3) {").count(), 2);
        assert_eq!(text.matches("  x data[1];").count(), 2);
        assert_eq!(text.matches("reset ancilla[0];").count(), 2);
        assert!(text.contains("measure readout[0] -> logic[1];"));
        // Z-type generators parity-check without any basis change.
        assert!(!text.contains("h ancilla"));
    }

    #[test]
    fn five_qubit_listing_uses_hadamard_sandwich_and_cz() {
        let text = render(&codes::five_qubit(), 1);

        assert!(text.contains("h ancilla[0];"));
        assert!(text.contains("cx ancilla[0], data[0];"));
        assert!(text.contains("cz ancilla[0], data[1];"));
        // Fifteen correctable syndromes, one block each.
        assert_eq!(text.matches("if (synd == ").count(), 15);
        assert!(text.contains("if (synd == 8) {\n  x data[0];\n}"));
        assert!(text.contains("if (synd == 13) {\n  y data[0];\n}"));
    }
}
