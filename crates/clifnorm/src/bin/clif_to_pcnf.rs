//! Normalize the axioms of a CLIF file to function-free prenex CNF

use clifnorm::json::AxiomResultJson;
use clifnorm::{parse_clif_file, NormalizerConfig};
use std::path::PathBuf;
use std::process::exit;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <clif_file> [options]", program);
    eprintln!("\nOptions:");
    eprintln!("  --json               Print one JSON object per axiom");
    eprintln!("  --config <file>      Load the normalizer configuration from a JSON file");
    eprintln!("  --legacy             26-variable budget, warn on unbound variables");
    eprintln!("  --clauses            Also print the clauses of each axiom");
    exit(2);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("clif_to_pcnf");

    let mut input: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut legacy = false;
    let mut json = false;
    let mut show_clauses = false;

    // Parse command line options
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => json = true,
            "--legacy" => legacy = true,
            "--clauses" => show_clauses = true,
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("--config needs a file");
                    usage(program);
                }
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "-h" | "--help" => usage(program),
            other if other.starts_with("--") => {
                eprintln!("Unknown option: {}", other);
                usage(program);
            }
            other => {
                if input.is_some() {
                    eprintln!("Only one input file is supported");
                    usage(program);
                }
                input = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    let input = match input {
        Some(path) => path,
        None => usage(program),
    };

    let config = match (&config_path, legacy) {
        (Some(path), _) => match NormalizerConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                exit(1);
            }
        },
        (None, true) => NormalizerConfig::legacy(),
        (None, false) => NormalizerConfig::default(),
    };

    let document = match parse_clif_file(&input) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error reading {}: {}", input.display(), e);
            exit(1);
        }
    };
    for import in &document.imports {
        log::info!("Import {} is recorded but not loaded", import);
    }

    let mut failures = 0;
    for axiom in &document.axioms {
        let result = axiom.to_ff_pcnf(&config);
        if let Err(e) = &result {
            eprintln!("Error: {}", e);
            failures += 1;
        }

        if json {
            match serde_json::to_string(&AxiomResultJson::from_result(&result)) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    exit(1);
                }
            }
        } else if let Ok(normalized) = &result {
            println!("{}", normalized);
            if show_clauses {
                if let Ok(clauses) = normalized.clauses() {
                    for clause in clauses {
                        println!("  {}", clause);
                    }
                }
            }
        }
    }

    log::info!(
        "Normalized {} of {} axiom(s)",
        document.axioms.len() - failures,
        document.axioms.len()
    );
    if failures > 0 {
        exit(1);
    }
}
