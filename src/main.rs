use std::path::PathBuf;

use santa::config::{Backend, Config};
use santa::model::FamilyCode;

fn main() {
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mut args = std::env::args().skip(1);
    let mut family: Option<FamilyCode> = None;
    let mut import_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--store" | "-s" => {
                let Some(value) = args.next() else {
                    eprintln!("Error: --store requires one of sqlite, json, memory");
                    std::process::exit(1);
                };
                match value.parse::<Backend>() {
                    Ok(b) => config.backend = b,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--data-dir" | "-d" => {
                let Some(value) = args.next() else {
                    eprintln!("Error: --data-dir requires a path argument");
                    std::process::exit(1);
                };
                config.data_dir = PathBuf::from(value);
            }
            "--family" | "-f" => {
                let Some(value) = args.next() else {
                    eprintln!("Error: --family requires a family code");
                    std::process::exit(1);
                };
                match FamilyCode::parse(&value) {
                    Ok(code) => family = Some(code),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            "--import" => {
                import_path = args.next().map(PathBuf::from);
                if import_path.is_none() {
                    eprintln!("Error: --import requires a JSON file path");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Secret Santa - family gift exchange");
                println!();
                println!("Usage: santa [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -s, --store <KIND>     Storage backend: sqlite, json, memory (default: sqlite)");
                println!("  -d, --data-dir <PATH>  Data directory (default: .data)");
                println!("  -f, --family <CODE>    Start in the family with this code");
                println!("  --import <JSON_PATH>   Import a family file from the web app");
                println!("  -h, --help             Show this help");
                println!();
                println!("Environment: SANTA_STORE, SANTA_DATA_DIR, SANTA_LOG (or RUST_LOG)");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    santa::logging::init(&config.log_filter);

    let store = match config.open_store() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error opening {} store in {}: {}", config.backend, config.data_dir.display(), e);
            std::process::exit(1);
        }
    };

    if let Some(json_path) = import_path {
        if config.backend == Backend::Memory {
            eprintln!("Error: importing into the memory store would discard the data on exit.");
            std::process::exit(1);
        }
        println!("Importing from {}...", json_path.display());
        match santa::migrate::import_family_json(&json_path, store.as_ref()) {
            Ok(stats) => {
                println!("Import complete!");
                println!("  Family: {}", stats.family);
                println!("  Participants: {}", stats.participants);
                println!("  Assignments: {}", stats.assignments);
                println!("  Wish lists: {} ({} gifts)", stats.wishlists, stats.gifts);
                if stats.skipped > 0 {
                    println!("  Skipped entries: {}", stats.skipped);
                }
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    santa::cli::run(store, family);
}
