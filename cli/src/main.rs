mod error_formatter;
mod formatter;
mod interactive;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formatter::Formatter;
use std::fs;
use std::path::{Path, PathBuf};
use triage::{Engine, SymptomSelection};
use walkdir::WalkDir;

const RULE_FILE_EXTENSION: &str = "rules";

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "A tiny rule-based expert system for symptom triage.")]
#[command(
    long_about = "Triage evaluates declarative if-then rules against the symptoms you report and shows the diagnoses they derive.\nThe built-in rules are examples only and NOT a medical diagnosis tool."
)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose a set of symptoms
    ///
    /// Asserts one fact per symptom, runs the rules until nothing new can be derived
    /// and prints the diagnoses together with the rules that fired.
    Diagnose {
        /// Symptoms that are present
        ///
        /// Examples: fever cough loss_of_taste difficulty_breathing
        symptoms: Vec<String>,
        /// Rule file or directory of .rules files to use instead of the built-in rules
        #[arg(short = 'r', long = "rules")]
        rules: Option<PathBuf>,
        /// JSON file mapping symptom names to true/false ("-" reads stdin)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Pick symptoms from a checklist
        #[arg(short = 'i', long)]
        interactive: bool,
        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the active rule base
    ///
    /// Lists every rule with its conditions and conclusion, followed by usage notes.
    Rules {
        /// Rule file or directory of .rules files to use instead of the built-in rules
        #[arg(short = 'r', long = "rules")]
        rules: Option<PathBuf>,
    },
    /// Validate rule files
    ///
    /// Loads a rule file, or every .rules file under a directory, and reports
    /// the rules found. Exits non-zero on the first malformed file.
    Check {
        /// Rule file or directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// List the symptoms the engine understands
    Symptoms,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Diagnose {
            symptoms,
            rules,
            input,
            interactive,
            json,
        } => diagnose_command(symptoms, rules.as_deref(), input.as_deref(), *interactive, *json),
        Commands::Rules { rules } => rules_command(rules.as_deref()),
        Commands::Check { path } => check_command(path),
        Commands::Symptoms => symptoms_command(),
    };

    if let Err(e) = result {
        // Check if it's a TriageError and format it nicely, otherwise use default
        if let Some(triage_err) = e.downcast_ref::<triage::TriageError>() {
            eprintln!("{}", error_formatter::format_error(triage_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "triage=warn",
        1 => "triage=debug",
        _ => "triage=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn diagnose_command(
    symptoms: &[String],
    rules: Option<&Path>,
    input: Option<&Path>,
    interactive: bool,
    json: bool,
) -> Result<()> {
    let engine = build_engine(rules)?;

    let mut selection = match input {
        Some(path) => read_selection(path)?,
        None => SymptomSelection::new(),
    };

    let names: Vec<&str> = symptoms.iter().map(String::as_str).collect();
    for symptom in SymptomSelection::from_names(&names)?.present() {
        selection.set(symptom, true);
    }

    if interactive {
        selection = interactive::select_symptoms(&selection)?;
    }

    let response = engine.diagnose(&selection);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let formatter = Formatter::default();
        print!("{}", formatter.format_response(&response));
    }

    Ok(())
}

fn rules_command(rules: Option<&Path>) -> Result<()> {
    let engine = build_engine(rules)?;

    let formatter = Formatter::default();
    print!("{}", formatter.format_rule_base(engine.rule_base()));
    println!();
    print!("{}", formatter.format_help());

    Ok(())
}

fn check_command(path: &Path) -> Result<()> {
    let mut engine = Engine::empty();

    println!("Checking rules in {}...", path.display());
    let file_count = load_rules(&mut engine, path)?;

    println!();
    let formatter = Formatter::default();
    print!(
        "{}",
        formatter.format_check_summary(file_count, engine.rule_base())
    );

    Ok(())
}

fn symptoms_command() -> Result<()> {
    let formatter = Formatter::default();
    print!("{}", formatter.format_symptoms());
    Ok(())
}

/// Built-in rules, or only the rules found at `rules` when given
fn build_engine(rules: Option<&Path>) -> Result<Engine> {
    match rules {
        Some(path) => {
            let mut engine = Engine::empty();
            let file_count = load_rules(&mut engine, path)?;
            tracing::debug!(path = %path.display(), files = file_count, "rules replaced");
            if file_count == 0 {
                anyhow::bail!("No .{} files found at {}", RULE_FILE_EXTENSION, path.display());
            }
            Ok(engine)
        }
        None => {
            tracing::debug!("using built-in rules");
            Ok(Engine::new())
        }
    }
}

/// Load a rule file, or every rule file under a directory in path order.
/// Returns the number of files loaded.
fn load_rules(engine: &mut Engine, path: &Path) -> Result<usize> {
    if path.is_file() {
        add_rule_file(engine, path)?;
        return Ok(1);
    }

    let mut file_count = 0;
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.path().extension().and_then(|s| s.to_str()) == Some(RULE_FILE_EXTENSION) {
            add_rule_file(engine, entry.path())?;
            file_count += 1;
        }
    }

    Ok(file_count)
}

fn add_rule_file(engine: &mut Engine, path: &Path) -> Result<()> {
    let source_id = path.to_string_lossy().to_string();
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;
    engine.add_rules_code(&code, &source_id)?;
    tracing::info!(path = %path.display(), bytes = code.len(), "loaded rule file");
    Ok(())
}

fn read_selection(path: &Path) -> Result<SymptomSelection> {
    let bytes = if path == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::Read::read_to_end(&mut std::io::stdin(), &mut buffer)?;
        buffer
    } else {
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    Ok(triage::serializers::json::to_selection(&bytes)?)
}
