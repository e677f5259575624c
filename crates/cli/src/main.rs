#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use splitqp_admm::AdmmSolver;
use splitqp_core::math::Scalar;
use splitqp_core::solution::Solution;
use splitqp_io::{read_problem, write_solution};
use splitqp_linsys::DenseKkt;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "splitqp")]
#[command(version, about = "ADMM splitting solver for box-constrained QPs")]
struct Cli {
    #[arg(long)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Solve {
        #[arg(long)]
        problem: PathBuf,
        #[arg(long)]
        rho: Option<f64>,
        #[arg(long)]
        alpha: Option<f64>,
        #[arg(long)]
        eps_abs: Option<f64>,
        #[arg(long)]
        eps_rel: Option<f64>,
        #[arg(long)]
        max_iters: Option<usize>,
        #[arg(long)]
        time_limit: Option<u64>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    Check {
        #[arg(long)]
        problem: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_json);
    match cli.command {
        Commands::Solve {
            problem,
            rho,
            alpha,
            eps_abs,
            eps_rel,
            max_iters,
            time_limit,
            output,
            json,
        } => solve_command(
            problem, rho, alpha, eps_abs, eps_rel, max_iters, time_limit, output, json,
        ),
        Commands::Check { problem } => check_command(problem),
    }
}

fn initialize_tracing(log_json: bool) {
    if log_json {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .json()
            .try_init()
            .ok();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
            .ok();
    }
}

#[allow(clippy::too_many_arguments)]
fn solve_command(
    path: PathBuf,
    rho: Option<f64>,
    alpha: Option<f64>,
    eps_abs: Option<f64>,
    eps_rel: Option<f64>,
    max_iters: Option<usize>,
    time_limit: Option<u64>,
    output: Option<PathBuf>,
    output_json: bool,
) -> Result<()> {
    let parsed = read_problem(&path)?;
    let mut settings = parsed.settings.unwrap_or_default();
    if let Some(value) = rho {
        settings.rho = value as Scalar;
    }
    if let Some(value) = alpha {
        settings.alpha = value as Scalar;
    }
    if let Some(value) = eps_abs {
        settings.eps_abs = value as Scalar;
    }
    if let Some(value) = eps_rel {
        settings.eps_rel = value as Scalar;
    }
    if let Some(iters) = max_iters {
        settings.max_iterations = iters;
    }
    if let Some(limit) = time_limit {
        settings.max_time = Some(Duration::from_secs(limit));
    }
    settings.validate().context("invalid settings")?;

    let solver = AdmmSolver::new(settings);
    let mut kkt = DenseKkt::<Scalar>::new();
    let solution = solver.solve(&parsed.problem, &mut kkt)?;
    emit_solution(solution, output, output_json)
}

fn emit_solution(
    solution: Solution<Scalar>,
    output: Option<PathBuf>,
    output_json: bool,
) -> Result<()> {
    if output_json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, &solution)?;
        handle.write_all(b"\n")?;
        handle.flush()?;
    } else {
        println!(
            "status: {:?}\nobjective: {:.6}\niters: {}\npri_res: {:.3e}\ndua_res: {:.3e}",
            solution.status,
            solution.objective_value,
            solution.iterations,
            solution.info.primal_residual,
            solution.info.dual_residual
        );
    }
    if let Some(path) = output {
        write_solution(path, &solution)?;
    }
    Ok(())
}

fn check_command(path: PathBuf) -> Result<()> {
    let parsed = read_problem(&path)?;
    if let Some(settings) = &parsed.settings {
        settings.validate().context("settings validation failed")?;
    }
    println!(
        "problem validation succeeded ({} variables, {} constraint rows)",
        parsed.problem.nvars(),
        parsed.problem.nconstr()
    );
    Ok(())
}
