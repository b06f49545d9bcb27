//! Tracing setup for sepctl.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Compact human-readable output. `verbose` raises the default filter to
/// debug and keeps event targets visible; `RUST_LOG` overrides either
/// default when set.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("sepctl=debug,sepctl_proposal=debug,info")
            } else {
                EnvFilter::try_new("sepctl=info,sepctl_proposal=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if verbose {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).compact())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).compact())
            .try_init()?;
    }

    Ok(())
}
