use clap::{Parser, Subcommand};
use eunits::calc;
use eunits::config::Config;
use eunits::{Quantity, UnitRegistry};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eunits")]
#[command(about = "Unit-aware calculator for physical quantities", long_about = None)]
struct Cli {
    /// TOML config with display settings and extra unit definitions
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression (e.g. "1.1 g cm^-3 * 0.5 m s^-1 / 3 cP")
    Eval {
        /// Operands separated by standalone '*' or '/' tokens
        expression: String,

        /// Normalize the result to SI base units
        #[arg(short, long)]
        base: bool,

        /// Round the magnitude to this many decimal digits
        #[arg(short, long, allow_negative_numbers = true)]
        round: Option<i32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a single quantity (e.g. "3 cP") to SI base units
    Base {
        /// Quantity literal: number followed by units
        quantity: String,
    },

    /// Re-express a quantity in other units with the same dimension
    Convert {
        /// Quantity literal (e.g. "1 atm")
        quantity: String,

        /// Target units (e.g. "kPa")
        units: String,
    },

    /// List every known unit symbol with its SI definition
    Units,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Eval {
            expression,
            base,
            round,
            json,
        } => eval_expression(&config, &expression, base, round, json),
        Commands::Base { quantity } => normalize_quantity(&config, &quantity),
        Commands::Convert { quantity, units } => convert_quantity(&config, &quantity, &units),
        Commands::Units => list_units(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let config = Config::load_from_file(path)
                .map_err(|e| format!("Failed to load config {}: {}", path.display(), e))?;
            Ok(config)
        }
        None => Ok(Config::empty()),
    }
}

fn eval_expression(
    config: &Config,
    expression: &str,
    base: bool,
    round: Option<i32>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut result = calc::evaluate(expression)?;

    if base {
        let registry = config.registry()?;
        result = result.as_base_in(&registry)?;
    }
    if let Some(ndigits) = round {
        result = result.round(ndigits);
    }

    if json {
        println!("{}", calc::format_quantity_json(&result));
    } else {
        println!("{}", calc::format_quantity(&result, config.display.precision));
    }

    Ok(())
}

fn normalize_quantity(config: &Config, quantity: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = config.registry()?;
    let quantity: Quantity = quantity.parse()?;
    let base = quantity.as_base_in(&registry)?;
    println!("{}", calc::format_quantity(&base, config.display.precision));
    Ok(())
}

fn convert_quantity(
    config: &Config,
    quantity: &str,
    units: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = config.registry()?;
    let quantity: Quantity = quantity.parse()?;
    let converted = quantity.convert_to_in(units, &registry)?;
    println!(
        "{}",
        calc::format_quantity(&converted, config.display.precision)
    );
    Ok(())
}

fn list_units(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let registry: UnitRegistry = config.registry()?;

    println!("Units ({}):", registry.len());
    for symbol in registry.symbols() {
        if let Some(definition) = registry.get(symbol) {
            println!("  - {:<5} = {} {}", symbol, definition.scale, definition.base);
        }
    }

    Ok(())
}
