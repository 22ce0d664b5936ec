mod runner;
mod stats;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use qmem_common::pauli::Pauli;
use qmem_core::code::CodeSpec;
use qmem_core::table::{self, SyndromeTable};
use qmem_core::{codes, synth};

use crate::runner::{NoiseModel, RunConfig};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuiltinCode {
    Bitflip3,
    FiveQubit,
    Steane7,
    Shor9,
    Surface3x3,
}

impl BuiltinCode {
    fn spec(self) -> CodeSpec {
        match self {
            BuiltinCode::Bitflip3 => codes::bit_flip_3(),
            BuiltinCode::FiveQubit => codes::five_qubit(),
            BuiltinCode::Steane7 => codes::steane_7(),
            BuiltinCode::Shor9 => codes::shor_9(),
            BuiltinCode::Surface3x3 => codes::surface_3x3(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the unrolled memory circuit as OpenQASM 3.
    Emit {
        #[arg(long, value_enum)]
        code: Option<BuiltinCode>,
        #[arg(long, conflicts_with = "code")]
        spec: Option<PathBuf>,
        #[arg(long, default_value_t = 2)]
        rounds: usize,
        #[arg(long, default_value = "memory.qasm")]
        out: PathBuf,
    },
    /// Print the syndrome decode table.
    Table {
        #[arg(long, value_enum)]
        code: Option<BuiltinCode>,
        #[arg(long, conflicts_with = "code")]
        spec: Option<PathBuf>,
    },
    /// Run memory shots against the frame backend.
    Run {
        #[arg(long, value_enum)]
        code: Option<BuiltinCode>,
        #[arg(long, conflicts_with = "code")]
        spec: Option<PathBuf>,
        #[arg(long, default_value_t = 2)]
        rounds: usize,
        #[arg(long, default_value_t = 100_000)]
        shots: usize,
        /// Inject a fixed error before round 1, written as qubit:pauli
        /// (for example 1:X).
        #[arg(long, conflicts_with = "p")]
        inject: Option<String>,
        /// Random per-qubit error rate before round 1.
        #[arg(long)]
        p: Option<f64>,
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        /// Write readout records to this file.
        #[arg(long)]
        record: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Emit {
            code,
            spec,
            rounds,
            out,
        } => {
            let spec = resolve_spec(code, spec)?;
            let table = SyndromeTable::build(&spec)?;
            let program = synth::memory_program(&spec, &table, rounds);
            qmem_io::emitter::save_qasm(&out, &spec, &program)?;
            println!(
                "Wrote {} rounds of {} to {}",
                rounds,
                spec.name(),
                out.display()
            );
        }
        Commands::Table { code, spec } => {
            let spec = resolve_spec(code, spec)?;
            let table = SyndromeTable::build(&spec)?;
            print_table(&spec, &table);
        }
        Commands::Run {
            code,
            spec,
            rounds,
            shots,
            inject,
            p,
            seed,
            record,
        } => {
            let spec = resolve_spec(code, spec)?;
            let table = SyndromeTable::build(&spec)?;
            let noise = match (inject, p) {
                (Some(text), None) => parse_inject(&spec, &text)?,
                (None, Some(p)) => NoiseModel::Random { p },
                (None, None) => NoiseModel::None,
                (Some(_), Some(_)) => bail!("--inject and --p are mutually exclusive"),
            };

            println!(
                "Running {} shots of {} ({} rounds)...",
                shots,
                spec.name(),
                rounds
            );
            let cfg = RunConfig {
                rounds,
                shots,
                noise,
                seed,
            };
            let start = Instant::now();
            let output = runner::run_shots(&spec, &table, &cfg)?;
            output.stats.print_report(start.elapsed().as_secs_f64());

            if let Some(path) = record {
                qmem_io::loader::save_readout_records(&path, &output.records)?;
                println!("Wrote {} records to {}", output.records.len(), path.display());
            }
        }
    }
    Ok(())
}

fn resolve_spec(code: Option<BuiltinCode>, spec: Option<PathBuf>) -> Result<CodeSpec> {
    match (code, spec) {
        (Some(builtin), None) => Ok(builtin.spec()),
        (None, Some(path)) => qmem_io::parser::load_code_file(path),
        _ => bail!("select a code with --code or --spec"),
    }
}

fn parse_inject(spec: &CodeSpec, text: &str) -> Result<NoiseModel> {
    let (qubit, pauli) = text
        .split_once(':')
        .context("--inject expects qubit:pauli, for example 1:X")?;
    let qubit: u16 = qubit.trim().parse().context("bad qubit index in --inject")?;
    if qubit as usize >= spec.num_data_qubits() {
        bail!(
            "qubit {} out of range for {} data qubits",
            qubit,
            spec.num_data_qubits()
        );
    }
    let pauli = match pauli.trim() {
        "X" | "x" => Pauli::X,
        "Z" | "z" => Pauli::Z,
        "Y" | "y" => Pauli::Y,
        other => bail!("bad Pauli {:?} in --inject", other),
    };
    Ok(NoiseModel::Inject { qubit, pauli })
}

fn print_table(spec: &CodeSpec, table: &SyndromeTable) {
    println!(
        "{}: n={}, m={}, k={}",
        spec.name(),
        spec.num_data_qubits(),
        spec.num_generators(),
        spec.num_logicals()
    );
    if let Some(d) = table::distance(spec) {
        println!("distance: {}", d);
    }
    let width = spec.num_generators();
    for (syndrome, correction) in table.entries() {
        println!("{:0width$b} -> {}", syndrome, correction, width = width);
    }
}
