//! NeoIWL CLI
//!
//! Usage:
//!   neoiwl --weight 1200 --factor radiantWarmer --factor fever   # Single evaluation
//!   neoiwl --weight 1200 --json                                   # JSON output
//!   neoiwl --interactive                                          # Interactive session
//!   neoiwl --list-bands | --list-factors                          # Reference tables

use clap::Parser;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};

use neoiwl::core::{
    init_logging, run_session, BaselineTable, CalculationEngine, ControllerConfig,
    ControllerEvent, FactorCatalog, ReactiveController,
};
use neoiwl::types::{ControllerPhase, Snapshot};
use neoiwl::{DEBOUNCE_DELAY_MS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "neoiwl",
    version = VERSION,
    about = "NeoIWL - Estimate neonatal insensible water loss",
    long_about = "NeoIWL estimates a neonate's insensible water loss (IWL) from birth\n\
                  weight and environmental conditions.\n\n\
                  Rate = band baseline x active multipliers + applicable additions,\n\
                  rounded to 2 dp; total = rate x weight (kg), rounded to 2 dp.\n\n\
                  Factors:\n  \
                  radiantWarmer  x1.75\n  \
                  fever          x1.40\n  \
                  humidifiedEnv  x0.75\n  \
                  phototherapy   +15 mL/kg/day (weight <= 2000 g only)"
)]
struct Args {
    /// Birth weight in grams (single mode)
    #[arg(short, long)]
    weight: Option<String>,

    /// Active factor id (repeatable)
    #[arg(short, long = "factor")]
    factors: Vec<String>,

    /// Interactive session - read weight text and commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Debounce delay for weight text in interactive mode (milliseconds)
    #[arg(long, default_value_t = DEBOUNCE_DELAY_MS)]
    debounce_ms: u64,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show the derivation trace
    #[arg(long)]
    verbose: bool,

    /// Print the baseline weight bands and exit
    #[arg(long)]
    list_bands: bool,

    /// Print the environmental factors and exit
    #[arg(long)]
    list_factors: bool,

    /// Log as JSON lines (stderr)
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.log_json);

    if args.list_bands {
        print_bands(&BaselineTable::standard());
    } else if args.list_factors {
        print_factors(&FactorCatalog::standard());
    } else if args.interactive {
        run_interactive(&args).await;
    } else if let Some(ref weight) = args.weight {
        run_single(weight, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args).await;
    }
}

fn build_controller(args: &Args) -> ReactiveController {
    let config = ControllerConfig {
        debounce_delay: Duration::from_millis(args.debounce_ms),
    };
    ReactiveController::new(CalculationEngine::standard(), config)
}

/// Run single evaluation
fn run_single(weight: &str, args: &Args) {
    let mut controller = build_controller(args);

    for id in &args.factors {
        if let Err(e) = controller.toggle_factor(id, true) {
            eprintln!("{}", e);
            eprintln!("Known factors: {}", known_factor_ids(&FactorCatalog::standard()));
            std::process::exit(2);
        }
    }
    controller.set_weight_text(weight);
    controller.manual_recompute();

    let snapshot = controller.snapshot();
    print_snapshot(&snapshot, args);

    if controller.error().is_some() {
        std::process::exit(1);
    }
}

/// Run interactive session
async fn run_interactive(args: &Args) {
    let controller = build_controller(args);
    let updates = controller.subscribe();
    let catalog = controller.engine().catalog().clone();
    let table = controller.engine().table().clone();

    print_header(args.no_color);
    println!("Type a weight in grams and press Enter. Commands:");
    println!("  +<factor> / -<factor>   toggle factor (e.g. +radiantWarmer)");
    println!("  calc                    recompute now");
    println!("  clear | reset           clear weight | clear everything");
    println!("  factors | bands         show reference tables");
    println!("  quit                    exit");
    println!();

    let (tx, rx) = mpsc::channel(32);
    let session = tokio::spawn(run_session(controller, rx));
    let printer = tokio::spawn(print_updates(updates, args.json, args.no_color, args.verbose));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        };

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let event = match parse_command(line) {
            Command::Event(event) => event,
            Command::ShowFactors => {
                print_factors(&catalog);
                continue;
            }
            Command::ShowBands => {
                print_bands(&table);
                continue;
            }
        };

        if tx.send(event).await.is_err() {
            break;
        }
    }

    drop(tx);
    match session.await {
        Ok(controller) => {
            println!("\nSession ended. Recomputes: {}", controller.recompute_count());
            // Closing the controller closes the snapshot channel
            drop(controller);
        }
        Err(e) => eprintln!("Session task failed: {}", e),
    }
    let _ = printer.await;
}

enum Command {
    Event(ControllerEvent),
    ShowFactors,
    ShowBands,
}

/// Map one input line to a controller event or a local command
fn parse_command(line: &str) -> Command {
    if let Some(id) = line.strip_prefix('+') {
        return Command::Event(ControllerEvent::FactorToggled {
            id: id.trim().to_string(),
            active: true,
        });
    }
    if let Some(id) = line.strip_prefix('-') {
        let id = id.trim();
        // "-5" is weight text, not a factor
        if id.chars().next().map_or(false, |c| c.is_ascii_alphabetic()) {
            return Command::Event(ControllerEvent::FactorToggled {
                id: id.to_string(),
                active: false,
            });
        }
    }

    match line.to_ascii_lowercase().as_str() {
        "calc" => Command::Event(ControllerEvent::CalculateRequested),
        "reset" => Command::Event(ControllerEvent::Reset),
        "clear" => Command::Event(ControllerEvent::WeightTextChanged(String::new())),
        "factors" => Command::ShowFactors,
        "bands" => Command::ShowBands,
        _ => Command::Event(ControllerEvent::WeightTextChanged(line.to_string())),
    }
}

/// Print snapshots as they arrive
async fn print_updates(
    mut updates: broadcast::Receiver<Snapshot>,
    json: bool,
    no_color: bool,
    verbose: bool,
) {
    loop {
        match updates.recv().await {
            Ok(snapshot) => {
                let settled = matches!(
                    snapshot.phase,
                    ControllerPhase::Settled | ControllerPhase::Idle
                );
                if settled || verbose {
                    print_snapshot_line(&snapshot, json, no_color, verbose);
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "snapshot printer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn print_snapshot(snapshot: &Snapshot, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("JSON encoding failed: {}", e),
        }
    } else {
        print_snapshot_line(snapshot, false, args.no_color, args.verbose);
    }
}

fn print_snapshot_line(snapshot: &Snapshot, json: bool, no_color: bool, verbose: bool) {
    if json {
        match serde_json::to_string(snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("JSON encoding failed: {}", e),
        }
        return;
    }

    if no_color {
        println!("{}", snapshot.to_parseable_string());
    } else {
        println!("{}", snapshot.to_terminal_string());
    }

    if verbose && !snapshot.trace_text.is_empty() {
        print_trace(snapshot, no_color);
    }
}

/// Print derivation trace in a box
fn print_trace(snapshot: &Snapshot, no_color: bool) {
    let color = if no_color { "" } else { snapshot.phase.color_code() };
    let reset = if no_color { "" } else { ControllerPhase::color_reset() };

    println!("{}┌──────────────────────────────────────────────{}", color, reset);
    for line in snapshot.trace_text.lines() {
        println!("{}│ {}{}", color, line, reset);
    }
    println!("{}└──────────────────────────────────────────────{}", color, reset);
}

/// Print header
fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  NeoIWL v{} - Interactive", VERSION);
        println!("========================================");
    } else {
        println!("\x1b[1m╔════════════════════════════════════════╗\x1b[0m");
        println!("\x1b[1m║  NeoIWL v{} - Interactive           ║\x1b[0m", VERSION);
        println!("\x1b[1m╚════════════════════════════════════════╝\x1b[0m");
    }
    println!();
}

fn print_bands(table: &BaselineTable) {
    println!("Baseline IWL by birth weight:");
    for band in table.bands() {
        println!("  {:<14} {:>6.1} mL/kg/day", band.label, band.baseline_rate);
    }
}

fn print_factors(catalog: &FactorCatalog) {
    println!("Environmental factors:");
    for factor in catalog.all() {
        println!(
            "  {:<14} {:<14} {:>6} {}",
            factor.id,
            factor.kind.to_string(),
            factor.magnitude,
            factor.description
        );
    }
}

fn known_factor_ids(catalog: &FactorCatalog) -> String {
    catalog
        .all()
        .iter()
        .map(|f| f.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
