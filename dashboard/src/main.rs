//! # Dashboard Binary
//!
//! ```bash
//! dashboard --address 0x71C7656EC7ab88b098defB751B7401B5f6d8976F
//! dashboard --connect --hide some-spam-collection
//! dashboard                      # wallet if configured, else idle
//! ```

use anyhow::{bail, Context};
use dashboard::core::{AppError, DashboardConfig};
use dashboard::Dashboard;
use shared::Address;

const USAGE: &str = "usage: dashboard [--address <address> | --connect] [--hide <slug>]... [--unhide <slug>]...";

#[derive(Debug, Default)]
struct Args {
    address: Option<Address>,
    connect: bool,
    hide: Vec<String>,
    unhide: Vec<String>,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> anyhow::Result<Option<Self>> {
        let mut args = Args::default();
        while let Some(flag) = raw.next() {
            match flag.as_str() {
                "--address" => {
                    let value = raw.next().context("--address needs a value")?;
                    args.address = Some(Address::parse(&value)?);
                }
                "--connect" => args.connect = true,
                "--hide" => args.hide.push(raw.next().context("--hide needs a slug")?),
                "--unhide" => args.unhide.push(raw.next().context("--unhide needs a slug")?),
                "-h" | "--help" => return Ok(None),
                other => bail!("unknown argument: {}\n{}", other, USAGE),
            }
        }
        if args.address.is_some() && args.connect {
            bail!("--address and --connect are mutually exclusive\n{}", USAGE);
        }
        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    dashboard::debug::init();

    let Some(args) = Args::parse(std::env::args().skip(1))? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = DashboardConfig::load()?;
    let dashboard = Dashboard::from_config(&config);
    dashboard
        .view
        .attach(&dashboard.collections, &dashboard.investments);

    let outcome = match args.address {
        Some(address) => dashboard.controller.on_custom_address(address),
        None if args.connect => dashboard.controller.on_wallet_connected(),
        None => dashboard.controller.start(""),
    };

    let Some(dispatch) = outcome.dispatched().await? else {
        println!("No address to show. Pass --address <address>, or set DASHBOARD_WALLET_RPC_URL and use --connect.");
        return Ok(());
    };
    let (collections, investments) = dispatch.settled().await?;
    tracing::info!(?collections, ?investments, "Initial resolution settled");

    for slug in &args.hide {
        report(slug, "hidden", dashboard.collections.hide(slug))?;
    }
    for slug in &args.unhide {
        report(slug, "shown", dashboard.collections.unhide(slug))?;
    }

    tracing::info!(
        active_tasks = dashboard::debug::active_task_count(),
        "Dashboard exiting"
    );
    Ok(())
}

/// Unknown slugs are reported and skipped; anything else is fatal.
fn report(slug: &str, verb: &str, result: dashboard::Result<()>) -> anyhow::Result<()> {
    match result {
        Ok(()) => {
            println!("{} {}", verb, slug);
            Ok(())
        }
        Err(AppError::NotFound(_)) => {
            eprintln!("no collection with slug {}", slug);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
