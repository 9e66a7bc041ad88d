//! # checkout
//!
//! Prints the total price of a cart given as a single string of product ids.
//! Argument problems print usage guidance and exit successfully without
//! performing a checkout.

use checkout_cli::{load_dotenv, logger, parse_from, run, usage, Invocation};

fn main() -> anyhow::Result<()> {
    let cli = match parse_from(std::env::args_os()) {
        Invocation::Checkout(cli) => cli,
        Invocation::Info(text) => {
            print!("{}", text);
            return Ok(());
        }
        Invocation::Usage(reason) => {
            println!("{}", reason);
            println!("{}", usage());
            return Ok(());
        }
    };

    load_dotenv(None);
    logger::init(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    println!("{}", run(&cli)?);
    Ok(())
}
