//! FWMS - Firewall Management System rule codec CLI
//!
//! Command-line frontend for the template codec: parse and check template
//! files, re-emit them in canonical form, and translate smartfw-formatted
//! templates for direct-mode devices.
//!
//! # Usage
//!
//! ```bash
//! fwms parse template.txt     # Parse and summarize a template
//! fwms check template.txt     # Exit non-zero on parse or constraint problems
//! fwms render template.txt    # Re-emit canonical filter + NAT sections
//! fwms convert smartfw.txt    # Rewrite smartfw lines to CLI-flag format
//! fwms config                 # Show the active deployment configuration
//! ```

mod config;
mod core;
mod utils;
mod validators;

use clap::{Parser, Subcommand};
use shadow_rs::shadow;
use std::path::PathBuf;
use std::process::ExitCode;

shadow!(build);

#[derive(Parser)]
#[command(name = "fwms")]
#[command(about = "Firewall template codec - parse, check and convert rule templates", long_about = None)]
#[command(version = build::CLAP_LONG_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a template file and summarize its rules
    Parse {
        /// Path to the template file
        file: PathBuf,
    },
    /// Validate a template; exits non-zero on any parse or constraint problem
    Check {
        /// Path to the template file
        file: PathBuf,
    },
    /// Re-emit a template in canonical form (filter section, then NAT section)
    Render {
        /// Path to the template file
        file: PathBuf,
    },
    /// Translate a smartfw-formatted template to CLI-flag filter lines
    Convert {
        /// Path to the smartfw-formatted file
        file: PathBuf,
    },
    /// Show the active deployment configuration
    Config,
}

fn main() -> ExitCode {
    let _ = utils::ensure_dirs();
    init_logging();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    match runtime.block_on(handle_cli(cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to a file under the XDG state dir, falling back to stderr
fn init_logging() {
    if let Some(mut log_path) = utils::get_state_dir() {
        log_path.push("fwms.log");
        if let Ok(file) = std::fs::File::create(log_path) {
            tracing_subscriber::fmt().with_writer(file).init();
        } else {
            tracing_subscriber::fmt::init();
        }
    } else {
        tracing_subscriber::fmt::init();
    }
}

async fn handle_cli(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Parse { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let parsed = core::template::split_filter_and_nat(&text);

            println!(
                "{} filter rule(s), {} NAT rule(s), {} comment(s)",
                parsed.filter_rules.len(),
                parsed.nat_rules.len(),
                parsed.comments.len(),
            );
            for rule in &parsed.filter_rules {
                println!("  filter: {}", core::rule_line::rule_to_line(rule));
            }
            for rule in &parsed.nat_rules {
                println!("  nat:    {}", core::nat_line::nat_rule_to_line(rule));
            }
            for error in &parsed.errors {
                eprintln!("  {error}");
            }
        }
        Commands::Check { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let parsed = core::template::split_filter_and_nat(&text);

            let mut problems = parsed.errors.len();
            for error in &parsed.errors {
                eprintln!("{error}");
            }
            for rule in &parsed.filter_rules {
                let checks = [
                    core::constraints::filter_rule_problem(rule),
                    validators::validate_port_list(&rule.dport).err(),
                    validators::validate_ip_list(&rule.sip).err(),
                    validators::validate_ip_list(&rule.dip).err(),
                ];
                for problem in checks.into_iter().flatten() {
                    eprintln!("{problem}");
                    problems += 1;
                }
            }
            for rule in &parsed.nat_rules {
                let checks = [
                    core::constraints::nat_rule_problem(rule),
                    validators::validate_port_list(&rule.match_port).err(),
                    validators::validate_port_list(&rule.translate_port).err(),
                    validators::validate_ip_list(&rule.match_ip).err(),
                    validators::validate_ip_list(&rule.translate_ip).err(),
                    validators::validate_interface(&rule.in_interface).err(),
                    validators::validate_interface(&rule.out_interface).err(),
                ];
                for problem in checks.into_iter().flatten() {
                    eprintln!("{problem}");
                    problems += 1;
                }
            }

            if problems > 0 {
                return Err(format!("{problems} problem(s) found").into());
            }
            println!("OK");
        }
        Commands::Render { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let parsed = core::template::split_filter_and_nat(&text);
            for error in &parsed.errors {
                eprintln!("{error}");
            }

            let filter_text = parsed.filter_text();
            if !filter_text.is_empty() {
                println!("{filter_text}");
            }
            let nat_text =
                core::nat_line::nat_rules_to_text(&parsed.nat_rules, &[]);
            if !nat_text.is_empty() {
                println!("{nat_text}");
            }
        }
        Commands::Convert { file } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let translated = core::direct::translate_for_direct(&text);
            if translated.is_empty() {
                eprintln!("No translatable lines found");
            } else {
                println!("{translated}");
            }
        }
        Commands::Config => {
            let config = config::load_config().await;
            println!("Deploy mode:      {}", config.deploy_mode);
            println!("Agent address:    {}", config.agent_addr);
            println!("Template version: {}", config.template_version);
        }
    }
    Ok(())
}
