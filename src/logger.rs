//! Plain `LEVEL message` logging to stderr for the command-line driver.

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(true)
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::from_level(level));

    // a second init (tests, embedding) keeps the first subscriber
    let _ = Registry::default().with(layer).try_init();
}
