use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::info;

use exsynth::examples;
use exsynth::ops;
use exsynth::search::{synthesize, Outcome};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Domain {
    Arithmetic,
    String,
}

impl Domain {
    fn catalog(self) -> &'static [ops::Op] {
        match self {
            Domain::Arithmetic => ops::ARITHMETIC,
            Domain::String => ops::STRING,
        }
    }
}

/// Bottom-up enumerative synthesis from input/output examples.
#[derive(Debug, Parser)]
struct Cli {
    /// Domain of synthesis; selects the operator catalog.
    #[arg(long, value_enum)]
    domain: Option<Domain>,

    /// Name of a built-in example set to synthesize from.
    #[arg(long)]
    examples: Option<String>,

    /// Maximum weight of programs to consider before terminating search.
    #[arg(long, default_value_t = 3)]
    max_weight: usize,

    /// List the built-in example sets and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    colog::init();

    let cli = Cli::parse();

    if cli.list {
        for name in examples::builtin_names() {
            println!("{name}");
        }

        return ExitCode::SUCCESS;
    }

    let (Some(domain), Some(key)) = (cli.domain, cli.examples.as_deref()) else {
        eprintln!("error: --domain and --examples are required unless --list is given");
        return ExitCode::FAILURE;
    };

    let Some(example_set) = examples::builtin(key) else {
        eprintln!(
            "error: unknown example set {key:?}; valid names are: {}",
            examples::builtin_names().join(", "),
        );
        return ExitCode::FAILURE;
    };

    info!("synthesizing {key:?} with max weight {}", cli.max_weight);
    let started = Instant::now();

    let outcome = match synthesize(&example_set, domain.catalog(), cli.max_weight) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: malformed example set: {err}");
            return ExitCode::FAILURE;
        },
    };

    info!("search finished in {:.2?}", started.elapsed());

    match outcome {
        Outcome::Found(program) => {
            println!("{} (weight {})", program.rendering, program.weight);
        },
        Outcome::Exhausted { levels } => {
            println!(
                "no program found within weight {} ({levels} levels explored)",
                cli.max_weight,
            );
        },
    }

    ExitCode::SUCCESS
}
