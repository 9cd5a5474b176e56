//! Draft scenario runner CLI
//!
//! Usage:
//!   cargo run --bin draft-scenarios                   # Run all scenarios
//!   cargo run --bin draft-scenarios -- carousel/      # Run category
//!   cargo run --bin draft-scenarios -- flow/full_draft
//!   cargo run --bin draft-scenarios -- --verbose      # Show expected/actual on failure
//!   cargo run --bin draft-scenarios -- --list         # List without running

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dynasty_draft::testing::{SCENARIOS_DIR, TestResult, parse_test_file, run_test};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut verbose = false;
    let mut list_only = false;
    let mut filter: Option<String> = None;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            "--list" | "-l" => list_only = true,
            other if !other.starts_with('-') => filter = Some(other.to_string()),
            other => eprintln!("Ignoring unknown flag {}", other),
        }
    }

    let scenarios_path = Path::new(SCENARIOS_DIR);
    if !scenarios_path.exists() {
        println!("No scenarios directory found at {}", SCENARIOS_DIR);
        std::process::exit(1);
    }

    let scenarios = discover_scenarios(scenarios_path, filter.as_deref());
    if scenarios.is_empty() {
        println!("No scenario files found.");
        if let Some(f) = filter {
            println!("Filter: {}", f);
        }
        std::process::exit(1);
    }

    if list_only {
        for path in &scenarios {
            println!("{}", path.strip_prefix(scenarios_path).unwrap_or(path).display());
        }
        return;
    }

    println!("Draft Scenarios");
    println!("===============\n");

    let mut passed = 0;
    let mut failures: Vec<String> = Vec::new();
    let mut current_category = String::new();

    for path in &scenarios {
        let rel_path = path.strip_prefix(scenarios_path).unwrap_or(path);

        if let Some(parent) = rel_path.parent() {
            let category = parent.to_string_lossy().to_string();
            if category != current_category && !category.is_empty() {
                if !current_category.is_empty() {
                    println!();
                }
                println!("{}/", category);
                current_category = category;
            }
        }

        let name = rel_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let result = match parse_test_file(path) {
            Ok(def) => run_test(&def),
            Err(message) => TestResult::Error { message },
        };

        if matches!(result, TestResult::Pass { .. }) {
            passed += 1;
        } else {
            failures.push(rel_path.display().to_string());
        }
        print_result(&name, &result, verbose);
    }

    println!("\n===============");
    println!("Results: {} passed, {} failed", passed, failures.len());
    for failure in &failures {
        println!("  - {}", failure);
    }

    if !failures.is_empty() {
        std::process::exit(1);
    }
}

fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect_scenarios(base, base, filter, &mut found);
    found.sort();
    found
}

fn collect_scenarios(base: &Path, current: &Path, filter: Option<&str>, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(current) else {
        return;
    };

    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect_scenarios(base, &path, filter, found);
            continue;
        }
        if path.extension().is_none_or(|e| e != "toml") {
            continue;
        }
        if let Some(f) = filter {
            let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
            if !rel.contains(f) {
                continue;
            }
        }
        found.push(path);
    }
}

fn print_result(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(40 - name.len().min(39));

    match result {
        TestResult::Pass { frames } => println!("  {} {} PASS ({} frames)", name, dots, frames),
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", name, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
