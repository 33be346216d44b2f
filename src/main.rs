mod api;
mod defines;
mod impls;
mod logging;
mod orders;
mod types;
mod util;
mod validators;

use clap::Parser;
use std::path::Path;
use types::*;
use util::*;

fn run(cmd_args: &CommandlineArgs, log_file: &Path) -> Result<(), StatusCode> {
    log::info!("Loading API credentials from environment variables");
    let trading_context = TradingContext::from_env()?;
    log::debug!("{:?}", trading_context);

    log::info!("Validating input parameters");
    let order = validators::validate_all(
        &cmd_args.symbol,
        &cmd_args.side,
        &cmd_args.order_type,
        cmd_args.quantity,
        cmd_args.price,
    )?;
    println!("{}", format_order_summary(&order));

    log::info!("Testing API connectivity");
    api::api_test_connectivity(&trading_context)?;
    println!("✓ Connected to Binance Futures Testnet");

    println!("\nPlacing {} order...", order.order_type);
    let mut start = std::time::Instant::now();
    measure_start(&mut start);
    let response = orders::place_order(&trading_context, &order)?;
    measure_end(&start);

    println!("{}", format_order_response(&response));

    let field = |key: &str| response.get(key).map(display_value).unwrap_or_else(|| "N/A".to_string());
    println!("\n✓ Order placed successfully!");
    println!("✓ Order ID: {}", field("orderId"));
    println!("✓ Status: {}", field("status"));
    println!("\nLog file: {}", log_file.display());
    Ok(())
}

fn main() {
    // parse arguments via clap
    let cmd_args = CommandlineArgs::parse();

    println!("{}", banner());

    let log_file = match logging::setup_logging(&cmd_args.log_dir, cmd_args.verbose) {
        Ok(log_file) => log_file,
        Err(e) => {
            eprintln!("\n✗ Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cmd_args, &log_file) {
        print_error_if_necessary(&e, &log_file);
        std::process::exit(1);
    }
}
