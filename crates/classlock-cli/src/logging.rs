//! Tracing setup for the REPL.
//!
//! Two layers share one registry: a formatter for diagnostics and the
//! activity layer for user-facing notices. Activity events are rendered only
//! as notices, so the formatter's filter switches their target off.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use classlock_application::{ACTIVITY_TARGET, ActivityEvent, ActivityLayer};

/// Adds the directive that keeps activity events out of diagnostic output.
fn without_activity(filter: EnvFilter) -> Result<EnvFilter> {
    Ok(filter.add_directive(format!("{}=off", ACTIVITY_TARGET).parse()?))
}

fn build_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> Result<(impl Subscriber + Send + Sync + 'static, mpsc::UnboundedReceiver<ActivityEvent>)>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (activity_layer, activity_rx) = ActivityLayer::channel();
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_filter(without_activity(filter)?),
        )
        .with(activity_layer);
    Ok((subscriber, activity_rx))
}

/// Installs the global subscriber. Diagnostics go to stderr, filtered by
/// `RUST_LOG` or else `level`.
pub fn init(level: &str) -> Result<mpsc::UnboundedReceiver<ActivityEvent>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let (subscriber, activity_rx) = build_subscriber(filter, std::io::stderr)?;
    subscriber.init();
    Ok(activity_rx)
}
