use anyhow::Result;
use clap::Parser;
use p2000_exporter::{config::Config, poller::Poller, sink::PutvalSink};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Array management address, host:port (overrides config)
    #[arg(long, env = "P2000_ADDRESS")]
    address: Option<String>,

    /// Metric host label (overrides config)
    #[arg(long, env = "P2000_HOST")]
    host: Option<String>,

    /// Poll interval in seconds (overrides config)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting P2000 metrics collector v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(address) = args.address {
        config.array.address = address;
    }
    if let Some(host) = args.host {
        config.array.host = host;
    }
    if let Some(secs) = args.interval {
        config.poll.interval_seconds = secs;
    }

    info!("Array address: {}", config.array.address);
    info!("Metric host label: {}", config.array.host);

    let mut poller = Poller::new(&config)?;
    let mut sink = PutvalSink::new(config.poll.interval_seconds);

    if args.once {
        let reported = poller.run_cycle(&mut sink).await?;
        info!("Reported {} metrics", reported);
        return Ok(());
    }

    let mut ticker = interval(Duration::from_secs(config.poll.interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        // A failed cycle yields no further metrics this round; the next
        // tick is the retry mechanism.
        if let Err(e) = poller.run_cycle(&mut sink).await {
            error!("Poll cycle aborted: {}", e);
        }
    }
}
