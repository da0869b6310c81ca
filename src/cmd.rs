//! Command line interface

use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stuckat::atpg::{generate_random_vectors, generate_test_patterns, Outcome};
use stuckat::circuit::stats::stats;
use stuckat::io::{
    read_faults_file, read_netlist_file, read_vectors_file, write_detected_faults,
    write_output_values, write_test_vectors,
};
use stuckat::sim::{fault_coverage, simulate};
use stuckat::{Fault, Logic};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a circuit
    ///
    /// Will print statistics on the number of nets, inputs, outputs and gates
    /// of each kind in the circuit.
    #[clap()]
    Show(ShowArgs),

    /// Simulate a circuit
    ///
    /// Runs fault-free logic simulation on a batch of input vectors, one
    /// vector per line with one bit per primary input:
    ///    101
    ///    010
    #[clap(alias = "sim")]
    Simulate(SimulateArgs),

    /// Deductive fault simulation of a circuit
    ///
    /// Computes all stuck-at faults detected by a batch of input vectors in a
    /// single simulation pass per vector, and reports the fault coverage.
    #[clap(alias = "fsim")]
    FaultSim(FaultSimArgs),

    /// Test pattern generation for a circuit
    ///
    /// Generates one test vector per target stuck-at fault using the PODEM
    /// branch-and-bound search, or proves the fault undetectable.
    #[clap()]
    Atpg(AtpgArgs),
}

impl Commands {
    /// Execute the subcommand
    pub fn run(&self) {
        match self {
            Commands::Show(a) => a.run(),
            Commands::Simulate(a) => a.run(),
            Commands::FaultSim(a) => a.run(),
            Commands::Atpg(a) => a.run(),
        }
    }
}

/// Command arguments for circuit informations
#[derive(Args)]
pub struct ShowArgs {
    /// Circuit to show
    file: PathBuf,
}

impl ShowArgs {
    /// Run the show command
    pub fn run(&self) {
        let circuit = read_netlist_file(&self.file);
        println!("Circuit stats:\n{}", stats(&circuit));
    }
}

/// Command arguments for logic simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Circuit to simulate
    network: PathBuf,

    /// Input vectors file
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output file for simulated output values
    #[arg(short = 'o', long)]
    output: PathBuf,
}

impl SimulateArgs {
    /// Run the simulation command
    pub fn run(&self) {
        let mut circuit = read_netlist_file(&self.network);
        let vectors = read_vectors_file(&self.input);
        let mut rows = Vec::new();
        for (i, v) in vectors.iter().enumerate() {
            match simulate(&mut circuit, v) {
                Ok(outputs) => rows.push(outputs),
                Err(err) => eprintln!("Skipping vector {}: {}", i + 1, err),
            }
        }
        let mut f = File::create(&self.output).unwrap();
        write_output_values(&mut f, &rows);
    }
}

/// Command arguments for deductive fault simulation
#[derive(Args)]
pub struct FaultSimArgs {
    /// Circuit to simulate
    network: PathBuf,

    /// Input vectors file; random vectors are generated if not given
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Fault list file; all stuck-at faults are targeted if not given
    #[arg(short = 'f', long)]
    faults: Option<PathBuf>,

    /// Output file for the detected faults
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Number of random vectors to generate
    #[arg(short = 'r', long, default_value_t = 32)]
    num_random: usize,

    /// Random seed for vector generation
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

impl FaultSimArgs {
    /// Run the fault simulation command
    pub fn run(&self) {
        let mut circuit = read_netlist_file(&self.network);
        let vectors = match &self.input {
            Some(path) => read_vectors_file(path),
            None => generate_random_vectors(circuit.nb_inputs(), self.num_random, self.seed),
        };
        let universe = match &self.faults {
            Some(path) => read_faults_file(path),
            None => Fault::all(&circuit),
        };
        let detected = fault_coverage(&mut circuit, &vectors, &universe);
        println!(
            "Detected {}/{} faults with {} vectors ({:.1}% coverage)",
            detected.len(),
            universe.len(),
            vectors.len(),
            100.0 * detected.len() as f64 / universe.len().max(1) as f64
        );
        let mut f = File::create(&self.output).unwrap();
        write_detected_faults(&mut f, &detected);
    }
}

/// Command arguments for test pattern generation
#[derive(Args)]
pub struct AtpgArgs {
    /// Circuit to write test patterns for
    network: PathBuf,

    /// Fault list file; all stuck-at faults are targeted if not given
    #[arg(short = 'f', long)]
    faults: Option<PathBuf>,

    /// Output file for test patterns
    #[arg(short = 'o', long)]
    output: PathBuf,
}

impl AtpgArgs {
    /// Run the test pattern generation command
    pub fn run(&self) {
        let mut circuit = read_netlist_file(&self.network);
        let targets = match &self.faults {
            Some(path) => read_faults_file(path),
            None => Fault::all(&circuit),
        };
        let outcomes = generate_test_patterns(&mut circuit, &targets);
        let mut results: Vec<Option<Vec<Logic>>> = Vec::new();
        for (f, outcome) in outcomes {
            match outcome {
                Ok(Outcome::Detected(vector)) => results.push(Some(vector)),
                Ok(Outcome::Undetectable) => results.push(None),
                Err(err) => eprintln!("Skipping {}: {}", f, err),
            }
        }
        let mut f = File::create(&self.output).unwrap();
        write_test_vectors(&mut f, &results);
    }
}
