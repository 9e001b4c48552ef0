//! HHL Linear-System Demo
//!
//! Normalizes small linear systems, solves them through the HHL pipeline and
//! compares each result with the classical solution.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qlsys_demos::problems::{LinearProblem, PROBLEM_NAMES, all_problems, problem_by_name};
use qlsys_demos::runners::{HhlRunner, RunReport};
use qlsys_demos::{
    create_progress_bar, format_vector, print_header, print_info, print_result, print_section,
    print_success, print_warning,
};
use qlsys_hhl::{BackendKind, SolverContext};

#[derive(Parser, Debug)]
#[command(name = "demo-hhl")]
#[command(about = "Solve small linear systems with the HHL pipeline")]
struct Args {
    /// Problem to solve (diagonal, symmetric, random8, nonhermitian, triple, all)
    #[arg(short, long, default_value = "all")]
    problem: String,

    /// Eigenvalue register size in qubits
    #[arg(short = 'q', long)]
    phase_qubits: Option<u32>,

    /// Estimation backend (spectral, exact)
    #[arg(short, long)]
    backend: Option<BackendKind>,

    /// Seed for random problems
    #[arg(short, long)]
    seed: Option<u64>,

    /// Solver context file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also sweep the register size from 2 to N qubits
    #[arg(long, value_name = "N")]
    sweep: Option<u32>,

    /// Print a JSON report instead of the console summary
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let context = build_context(&args)?;

    let filter = match args.verbose {
        0 => context.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let problems = select_problems(&args.problem, &context)?;
    let runner = HhlRunner::new(context);

    if args.json {
        let reports = problems
            .iter()
            .map(|p| runner.run(p).map(|r| r.to_json()))
            .collect::<Result<Vec<_>, _>>()?;
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    print_header("HHL Linear-System Demo");
    print_result("Backend", runner.context.backend);
    if let Some(bits) = runner.context.register_size() {
        print_result("Phase qubits", bits);
    }
    print_result("Seed", runner.context.seed);

    for problem in &problems {
        print_section(&format!("{} ({})", problem.name, problem.description));
        let report = runner
            .run(problem)
            .with_context(|| format!("solving '{}'", problem.name))?;
        print_report(problem, &report);

        if let Some(max_bits) = args.sweep {
            print_sweep(&runner, problem, max_bits)?;
        }
    }

    println!();
    print_success(&format!("Solved {} system(s)", problems.len()));
    Ok(())
}

fn build_context(args: &Args) -> Result<SolverContext> {
    let base = match &args.config {
        Some(path) => SolverContext::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SolverContext::default(),
    };
    let mut context = base.with_env_overrides()?;

    if let Some(backend) = args.backend {
        context.backend = backend;
    }
    if let Some(bits) = args.phase_qubits {
        context.phase_qubits = bits;
    }
    if let Some(seed) = args.seed {
        context.seed = seed;
    }
    context.validate()?;
    Ok(context)
}

fn select_problems(name: &str, context: &SolverContext) -> Result<Vec<LinearProblem>> {
    if name.eq_ignore_ascii_case("all") {
        return Ok(all_problems(context)?);
    }
    match problem_by_name(name, context)? {
        Some(problem) => Ok(vec![problem]),
        None => bail!(
            "unknown problem '{name}', expected one of: {}, all",
            PROBLEM_NAMES.join(", ")
        ),
    }
}

fn print_report(problem: &LinearProblem, report: &RunReport) {
    let s = &report.solution;

    print_result("Unknowns", problem.dim());
    print_result("Normalized dimension", s.raw_solution.len());
    if s.truncate_hermitian {
        print_info("Non-Hermitian: solved through the Hermitian embedding");
    }
    if s.truncate_powerdim {
        print_info("Padded to a power-of-two dimension");
    }
    let eigenvalues: Vec<String> = s.eigenvalues.iter().map(|l| format!("{l:.4}")).collect();
    print_result("Estimated eigenvalues", format!("[{}]", eigenvalues.join(", ")));
    print_result("Evolution time", format!("{:.4}", s.evolution_time));
    if s.signed {
        print_result("Register", "signed");
    }
    print_result("Success probability", format!("{:.4}", s.probability));
    print_result("HHL solution", format_vector(&s.solution));

    match (&s.reference, s.fidelity) {
        (Some(reference), Some(fidelity)) => {
            print_result("Classical solution", format_vector(reference));
            print_result("Fidelity", format!("{fidelity:.6}"));
        }
        _ => print_warning("Matrix is singular; no classical reference"),
    }
    print_result("Time", format!("{:.2?}", report.elapsed));
}

fn print_sweep(runner: &HhlRunner, problem: &LinearProblem, max_bits: u32) -> Result<()> {
    let bits: Vec<u32> = (2..=max_bits).collect();
    let pb = create_progress_bar(bits.len() as u64, "register sweep");
    let mut rows = Vec::with_capacity(bits.len());
    for &b in &bits {
        rows.extend(runner.register_sweep(problem, [b])?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (b, fidelity) in rows {
        let value = fidelity.map_or_else(|| "n/a".to_string(), |f| format!("{f:.6}"));
        print_result(&format!("  {b:>2} qubits"), value);
    }
    Ok(())
}
