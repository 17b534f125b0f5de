use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use trusseq::{load_truss, render_forces, render_reactions, SolverOptions};

/// Solve a statically determinate plane truss with the method of joints.
#[derive(Parser)]
#[command(name = "trusseq", version, about, long_about = None)]
struct Cli {
    /// Joints file: header line, then `id x y fx fy support_flag` rows
    joints: PathBuf,
    /// Beams file: header line, then `id joint_a joint_b` rows
    beams: PathBuf,
    /// Also print the support reactions
    #[arg(long)]
    reactions: bool,
    /// JSON file overriding the solver tolerances
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    // Nothing is written to stdout unless the whole pipeline succeeds.
    match run(&cli) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("ERROR: {error}");
            ExitCode::from(2)
        }
    }
}

/// Load, solve and render the truss named on the command line.
fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let options = match &cli.config {
        Some(path) => SolverOptions::from_json_file(path)?,
        None => SolverOptions::default(),
    };
    let truss = load_truss(&cli.joints, &cli.beams)?;
    let solution = truss.evaluate_with(&options)?;

    let mut report = render_forces(&solution);
    if cli.reactions {
        report.push('\n');
        report.push_str(&render_reactions(&solution));
    }
    Ok(report)
}
