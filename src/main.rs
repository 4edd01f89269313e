//! Kubli command-line interface.
//!
//! Prompts, confirmations, and printing live here; the library underneath
//! never touches the terminal.

use clap::{Parser, Subcommand};
use kubli::{BatchPlan, BatchReport, DerivedKey, Mode, Outcome, PreviewEntry, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Rendered in decrypt previews for entries whose name token does not
/// decode under the entered password.
const UNREADABLE_NAME: &str = "<unreadable filename>";

#[derive(Parser)]
#[command(name = "kubli")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Encrypt or decrypt every file in a directory, file names included",
    long_about = "Encrypts file contents and file names with a password-derived key. \
                  Encrypted files are written next to the originals with the .kubli extension."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt all eligible files in a directory
    Encrypt {
        /// Target directory (default: current directory)
        #[arg(default_value = ".")]
        directory: PathBuf,

        /// Delete originals after each successful encryption
        #[arg(long)]
        delete: bool,

        /// Skip confirmation prompts
        #[arg(long)]
        yes: bool,

        /// Print the result report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decrypt all .kubli files in a directory
    Decrypt {
        /// Target directory (default: current directory)
        #[arg(default_value = ".")]
        directory: PathBuf,

        /// Delete encrypted files after each successful decryption
        #[arg(long)]
        delete: bool,

        /// Skip confirmation prompts
        #[arg(long)]
        yes: bool,

        /// Print the result report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encrypt {
            directory,
            delete,
            yes,
            json,
        } => run_batch(&directory, Mode::Encrypt, delete, yes, json),

        Commands::Decrypt {
            directory,
            delete,
            yes,
            json,
        } => run_batch(&directory, Mode::Decrypt, delete, yes, json),
    }
}

fn run_batch(directory: &Path, mode: Mode, delete: bool, yes: bool, json: bool) -> Result<()> {
    let password = prompt_password("Enter password: ");
    let key = DerivedKey::derive(&password)?;

    let mut plan = BatchPlan::build(directory, mode)?;
    if plan.is_empty() {
        match mode {
            Mode::Encrypt => println!("No files found to encrypt."),
            Mode::Decrypt => println!("No encrypted files found."),
        }
        return Ok(());
    }

    let preview = plan.preview(&key);
    print_preview(mode, &preview);

    if !yes && !confirm("Proceed?") {
        println!("Cancelled.");
        return Ok(());
    }

    let delete_originals = if delete {
        true
    } else if yes {
        false
    } else {
        match mode {
            Mode::Encrypt => confirm("Delete originals after successful encryption?"),
            Mode::Decrypt => confirm("Delete encrypted files after successful decryption?"),
        }
    };

    let results = plan.execute(&key, delete_originals);
    let report = BatchReport::from_results(results);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serialization")
        );
    } else {
        print_report(mode, &report);
    }

    if !report.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_preview(mode: Mode, preview: &[PreviewEntry]) {
    match mode {
        Mode::Encrypt => {
            println!("Files to encrypt ({}):", preview.len());
            for entry in preview {
                println!("  - {}", entry.original);
            }
        }
        Mode::Decrypt => {
            println!("Encrypted files found ({}):", preview.len());
            for entry in preview {
                match &entry.transformed {
                    Ok(name) => println!("  - {} -> {}", entry.original, name),
                    Err(_) => println!("  - {} -> {}", entry.original, UNREADABLE_NAME),
                }
            }
        }
    }
}

fn print_report(mode: Mode, report: &BatchReport) {
    for result in &report.results {
        match &result.outcome {
            Outcome::Transformed { delete_warning, .. } => {
                println!("  ok {}", result.original);
                if let Some(warning) = delete_warning {
                    println!("     warning: could not delete original: {}", warning);
                }
            }
            Outcome::Failed { message, .. } => {
                println!("  failed {}: {}", result.original, message);
            }
        }
    }

    let verb = match mode {
        Mode::Encrypt => "encrypted",
        Mode::Decrypt => "decrypted",
    };
    println!();
    println!(
        "Done: {} {}, {} failed, {} originals deleted.",
        report.succeeded, verb, report.failed, report.deleted
    );
}

fn prompt_password(prompt: &str) -> String {
    rpassword::prompt_password(prompt).unwrap_or_else(|_| {
        eprint!("{}", prompt);
        io::stderr().flush().unwrap();
        let mut password = String::new();
        io::stdin().read_line(&mut password).unwrap();
        password.trim().to_string()
    })
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().eq_ignore_ascii_case("y")
}
