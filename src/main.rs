use clap::Parser;
use dmi_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    eprintln!("Failed to listen for CTRL+C: {}", e);
                }
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(dmi_processor::Error::processing_interrupted(
                    "Processing interrupted by user".to_string(),
                ))
            }
        }
    });

    match result {
        Ok(_summary) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("DMI Processor - Danish Meteorological Institute Weather Data Classifier");
    println!("=======================================================================");
    println!();
    println!("Classify DMI open-data JSON records into typed weather entities and");
    println!("group them by measurement type and station.");
    println!();
    println!("USAGE:");
    println!("    dmi-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    classify    Classify records from JSON files and print grouped entities");
    println!("    schema      Print reflected entity schemas");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Summarize a metObs payload grouped by type:");
    println!("    dmi-processor classify observations.json");
    println!();
    println!("    # Emit JSON grouped by station, then type:");
    println!("    dmi-processor classify data/ --group-by station-type --format json");
    println!();
    println!("    # Show the fields of the Station entity:");
    println!("    dmi-processor schema station");
    println!();
    println!("For detailed help on any command, use:");
    println!("    dmi-processor <COMMAND> --help");
}
