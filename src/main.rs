use std::path::PathBuf;

use clap::{Parser, Subcommand};

use adaptune::midi::RetuneTable;
use adaptune::solver::cents::degree_name;
use adaptune::solver::notes::notes_to_frequencies;
use adaptune::{solve, ScaleSolution, TemperamentSpec};

/// Solve adaptive temperaments and print tuning tables
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the solved cents-per-degree table
    Table {
        /// Path to a TOML temperament spec
        spec_file: PathBuf,
    },
    /// Print the interval-error report
    Errors {
        /// Path to a TOML temperament spec
        spec_file: PathBuf,
    },
    /// Print absolute frequencies per degree
    Frequencies {
        /// Path to a TOML temperament spec
        spec_file: PathBuf,
    },
    /// Print the 128-note MIDI retuning table
    Retune {
        /// Path to a TOML temperament spec
        spec_file: PathBuf,

        /// Pitch bend range of the target instrument, in semitones
        #[arg(long, default_value_t = 48.0)]
        bend_range: f64,
    },
}

fn load_and_solve(spec_file: &PathBuf) -> (TemperamentSpec, ScaleSolution) {
    let spec = TemperamentSpec::from_path(spec_file).unwrap_or_else(|e| {
        eprintln!("Error reading spec '{}': {:#}", spec_file.display(), e);
        std::process::exit(1);
    });

    let solution = solve(&spec).unwrap_or_else(|e| {
        eprintln!("Solve failed: {:#}", e);
        std::process::exit(1);
    });

    if solution.period_stretch_warning {
        eprintln!(
            "Warning: period stretched by {:.2} cents",
            solution.period_stretch_cents.unwrap_or(0.0)
        );
    }

    (spec, solution)
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Table { spec_file } => {
            let (spec, solution) = load_and_solve(&spec_file);
            println!(
                "generator {:.4}c  period {:.4}c",
                solution.generator_cents, solution.period_cents
            );
            for (degree, cents) in solution.notes_cents.iter().enumerate() {
                let absolute = solution
                    .cents_absolute
                    .as_ref()
                    .map(|a| format!("  (chain {:+9.3}c)", a[degree]))
                    .unwrap_or_default();
                println!(
                    "{:3}  {:<4} {:9.4}c{}",
                    degree,
                    degree_name(degree, spec.scale_size),
                    cents,
                    absolute
                );
            }
        }
        Commands::Errors { spec_file } => {
            let (_, solution) = load_and_solve(&spec_file);
            for e in &solution.intervals {
                println!(
                    "{:?} {:>5} {:2}->{:2}  target {:8.3}c  actual {:8.3}c  error {:+7.3}c{}",
                    e.kind,
                    e.target.label,
                    e.i,
                    e.j,
                    e.target_cents,
                    e.actual_cents,
                    e.error_cents,
                    if e.is_skeleton { "  *" } else { "" }
                );
            }
        }
        Commands::Frequencies { spec_file } => {
            let (spec, solution) = load_and_solve(&spec_file);
            let freqs = notes_to_frequencies(&solution.notes_cents, spec.base_frequency_hz);
            for (degree, hz) in freqs.iter().enumerate() {
                println!("{:3}  {:10.4} Hz", degree, hz);
            }
        }
        Commands::Retune {
            spec_file,
            bend_range,
        } => {
            let (spec, solution) = load_and_solve(&spec_file);
            let table = RetuneTable::from_scale(
                &solution.notes_cents,
                solution.period_cents,
                spec.base_midi_note,
            );
            let bends = table.pitch_bends(bend_range);
            for note in 0..128 {
                println!(
                    "{:3}  {:+9.3}c  bend {:5}",
                    note, table.cents_deviation[note], bends[note]
                );
            }
        }
    }
}
