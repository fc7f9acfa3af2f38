//! `fca-repl` — a small CLI that exercises the FCA core end to end over
//! a built-in fixture (Wille's planets example). Not part of the core
//! contract: no file-format parsing, loaders stay a collaborator's job.

use clap::{Parser, Subcommand};

use fca_core::sparse::FuzzySet;
use fca_core::{logic, next_closure, Config, FcaResult, Incidence, Universe};

#[derive(Parser)]
#[command(name = "fca-repl", about = "Explore formal concept analysis over a built-in fixture")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Logic to activate before running (overrides the configured default).
    #[arg(long)]
    logic: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// List every concept's intent, in lectic order.
    Concepts,
    /// Print the Duquenne-Guigues canonical basis.
    Basis,
    /// Compute cl(attrs) for a comma-separated attribute-name list.
    Closure {
        #[arg(value_name = "ATTR,ATTR,...")]
        attrs: String,
    },
}

fn install_logging() {
    let filter = std::env::var("FCA_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

/// Wille's planets example: 9 objects x 7 attributes, binary.
fn planets_fixture() -> Incidence {
    let attr_names = vec!["small", "medium", "large", "near", "far", "moon", "no_moon"]
        .into_iter()
        .map(String::from)
        .collect();
    let obj_names = vec![
        "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune", "pluto",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    let dense = vec![
        vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0], // small
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0], // medium
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0], // large
        vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0], // near
        vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0], // far
        vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0], // moon
        vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], // no_moon
    ];
    Incidence::from_dense(&dense, attr_names, obj_names)
}

fn format_attrs(inc: &Incidence, set: &FuzzySet) -> String {
    let parts: Vec<String> = set
        .entries()
        .iter()
        .map(|&(idx, v)| {
            if v == 1.0 {
                inc.attr_names()[idx].clone()
            } else {
                format!("{}:{v:.2}", inc.attr_names()[idx])
            }
        })
        .collect();
    format!("{{{}}}", parts.join(", "))
}

fn parse_attrs(inc: &Incidence, names: &str) -> FuzzySet {
    let entries: Vec<(usize, f64)> = names
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|name| {
            inc.attr_names().iter().position(|n| n == name).or_else(|| {
                eprintln!("unknown attribute: {name}");
                None
            })
        })
        .map(|idx| (idx, 1.0))
        .collect();
    FuzzySet::new(Universe::Attributes, inc.n_attrs(), entries)
}

fn main() -> FcaResult<()> {
    install_logging();
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();
    let logic_name = cli.logic.unwrap_or(config.default_logic);
    logic::use_logic(&logic_name)?;
    let active = logic::get_logic();

    let inc = planets_fixture();

    match cli.command {
        Command::Concepts => {
            let report = next_closure::enumerate_concepts(&inc, &*active, true, None)?;
            for intent in &report.intents {
                println!("{}", format_attrs(&inc, intent));
            }
            println!("{} concepts", report.closure_count);
        }
        Command::Basis => {
            let report = next_closure::enumerate_implications(&inc, &*active, false, None)?;
            let implications = report.implications.unwrap_or_default();
            for (lhs, rhs) in &implications {
                println!("{} => {}", format_attrs(&inc, lhs), format_attrs(&inc, rhs));
            }
            println!("{} implications", implications.len());
        }
        Command::Closure { attrs } => {
            let set = parse_attrs(&inc, &attrs);
            let closed = inc.closure(&set, &*active)?;
            println!("{}", format_attrs(&inc, &closed));
        }
    }
    Ok(())
}
