use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dpll::*;
use serde::Serialize;
use std::{
    io::Read,
    path::{Path, PathBuf},
};

/// Solve a DIMACS CNF formula with DPLL
#[derive(Debug, Parser)]
struct Args {
    /// DIMACS CNF file, `-` for stdin
    input: PathBuf,
    #[clap(long, value_enum, default_value_t = Heuristic::First)]
    heuristic: Heuristic,
    /// Enumerate every solution reached by the search
    #[clap(long)]
    all: bool,
    /// Report empty clauses and contradicting unit clauses
    #[clap(long)]
    conflicts: bool,
    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

/// JSON output of the binary
#[derive(Serialize)]
struct Output<'a, T> {
    heuristic: Heuristic,
    formula: FormulaStats,
    #[serde(flatten)]
    result: &'a T,
}

#[derive(Serialize)]
struct Solutions<'a> {
    solutions: &'a [Assignment],
}

fn print_json<T: Serialize>(formula: &Formula, args: &Args, result: &T) -> Result<()> {
    let output = Output {
        heuristic: args.heuristic,
        formula: formula.stats(),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn print_assignment(assignment: &Assignment) {
    for (variable, value) in assignment {
        println!("{variable} = {value}");
    }
}

fn solve(formula: &Formula, args: &Args) -> Result<()> {
    let solver = DPLL::new(args.heuristic);

    if args.all {
        let solutions = solver.find_all_solutions(formula);
        if args.json {
            return print_json(formula, args, &Solutions { solutions: &solutions });
        }
        eprintln!("{:>12} {} solutions", "Found".bold().magenta(), solutions.len());
        for (i, solution) in solutions.iter().enumerate() {
            println!("c solution {}", i + 1);
            print_assignment(solution);
        }
        return Ok(());
    }

    let report = solver.solve(formula);
    if args.json {
        print_json(formula, args, &report)?;
    } else {
        match &report.solution {
            Solution::Sat(assignment) => {
                eprintln!(
                    "{:>12} (in {:?})",
                    "SAT".bold().green(),
                    report.statistics.elapsed
                );
                print_assignment(assignment);
            }
            Solution::UnSat => {
                eprintln!(
                    "{:>12} (in {:?})",
                    "UNSAT".bold().green(),
                    report.statistics.elapsed
                );
            }
        }
        eprintln!("{}", report.statistics);
    }

    if args.conflicts && !report.is_satisfiable() {
        let analysis = solver.conflict_analysis(formula);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        } else if analysis.is_empty() {
            eprintln!("{:>12} no direct conflict", "Conflicts".bold().yellow());
        } else {
            for i in &analysis.empty_clauses {
                eprintln!("{:>12} clause {} is empty", "Conflict".bold().yellow(), i);
            }
            for c in &analysis.unit_conflicts {
                eprintln!(
                    "{:>12} {} by clauses {} and {}",
                    "Conflict".bold().yellow(),
                    c.variable,
                    c.positive,
                    c.negative
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let formula = Formula::from_dimacs(&read_input(&args.input)?)
        .with_context(|| format!("Invalid DIMACS input {}", args.input.display()))?;
    let stats = formula.stats();
    eprintln!(
        "{:>12} {} variables, {} clauses, {} literals [heuristic = {}]",
        "Solving".bold().blue(),
        stats.num_variables,
        stats.num_clauses,
        stats.num_literals,
        args.heuristic
    );
    solve(&formula, &args)
}
