#![warn(clippy::pedantic)]

use clap::Parser;
use clap_verbosity_flag::Verbosity;
use moneyminder_smoke::{
    Origin, SmokeCheck,
    origin::{DEFAULT_BACKEND_URL, DEFAULT_BASE_URL},
};

#[derive(Parser)]
#[command(about = "Check that a MoneyMinder deployment renders and accepts a login")]
struct Args {
    /// The URL the MoneyMinder front end is served from
    #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: Origin,

    /// The URL of the MoneyMinder API server
    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: Origin,

    /// Also require the backend's health endpoint to report a connected
    /// database before attempting to log in
    #[arg(long)]
    check_health: bool,

    /// After logging in, also fetch the demo user's accounts, monthly trends
    /// and the admin ping with the issued token
    #[arg(long)]
    check_authenticated: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose)
        .init();

    tracing::debug!("Front end: {}", args.base_url);
    tracing::debug!("Backend: {}", args.backend_url);

    let check = SmokeCheck::new(args.base_url, args.backend_url)
        .with_health_check(args.check_health)
        .with_authenticated_checks(args.check_authenticated);

    let passed = check.run().map_err(|e| {
        let kind = e.kind();
        anyhow::Error::new(e).context(format!("{kind}: smoke check failed"))
    })?;

    for step in passed {
        println!("ok - {step}");
    }
    println!("smoke check passed");

    Ok(())
}
