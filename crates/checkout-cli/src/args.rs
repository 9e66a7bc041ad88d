//! # Command Line Arguments

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Price a shopping cart given as one string of product ids.
#[derive(Debug, Clone, Parser)]
#[command(name = "checkout", version)]
#[command(about = "Price a shopping cart against the catalog and promotions")]
pub struct Cli {
    /// One string with each character denoting the id of a product in the cart
    pub items: String,

    /// Pricing configuration file (TOML); overrides CHECKOUT_CONFIG
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Fail instead of pricing unknown products at zero
    #[arg(long)]
    pub strict: bool,

    /// Print an itemised JSON receipt instead of the total
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Outcome of reading the command line
#[derive(Debug)]
pub enum Invocation {
    /// Arguments are usable; run a checkout
    Checkout(Cli),
    /// Help or version output was requested
    Info(String),
    /// Arguments were missing or malformed; show usage and do nothing
    Usage(String),
}

/// Parse `args` (program name first) without exiting the process.
pub fn parse_from<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    use clap::error::{ContextKind, ContextValue, ErrorKind};

    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Checkout(cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Invocation::Info(err.render().to_string())
            }
            ErrorKind::MissingRequiredArgument => Invocation::Usage("not enough args".to_string()),
            ErrorKind::UnknownArgument => match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(arg)) if arg.starts_with('-') => {
                    Invocation::Usage(err.render().to_string().trim_end().to_string())
                }
                _ => Invocation::Usage("too many args".to_string()),
            },
            _ => Invocation::Usage(err.kind().to_string()),
        },
    }
}

/// Usage guidance printed when no checkout can be performed
pub fn usage() -> &'static str {
    "usage: checkout <ITEMS>\n       one string with each character denoting the id\n       of an associated product in a shopping cart"
}
