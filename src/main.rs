use std::io;
use std::path::PathBuf;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use electro_checkout::source::{CsvSource, DemoSource, ProductSource};
use electro_checkout::{Amount, Checkout, Command, DiscountPolicy, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Electro World checkout.
///
/// Reads commands from stdin, one per line: `+ <id>` or `add <id>`,
/// `- <id>` or `remove <id>`, `q` to quit.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Product catalog csv (id,name,available_count,price); demo catalog if omitted
    catalog: Option<PathBuf>,

    /// Simulated latency of the demo catalog, in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Make the demo catalog fail to load with this message
    #[arg(long)]
    fail: Option<String>,

    /// Order totals above this amount are discounted
    #[arg(long, default_value_t = 1000.0)]
    discount_threshold: f64,

    /// Discount applied above the threshold, in percent
    #[arg(long, default_value_t = 10)]
    discount_rate: u32,
}

impl Args {
    fn source(&self) -> Arc<dyn ProductSource> {
        if let Some(path) = &self.catalog {
            if path.extension().is_none_or(|ext| ext != "csv") {
                warn!(path = %path.display(), "catalog file seems to not be a csv file");
            }
            return Arc::new(CsvSource::new(path));
        }

        let mut demo =
            DemoSource::electro_world().with_latency(Duration::from_millis(self.latency_ms));
        if let Some(message) = &self.fail {
            demo = demo.with_failure(message);
        }
        Arc::new(demo)
    }

    fn policy(&self) -> DiscountPolicy {
        DiscountPolicy::new(
            Amount::from_float(self.discount_threshold),
            self.discount_rate,
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut session = Session::new(Checkout::new(args.policy()), io::stdout());

    let unmounter = session.unmounter();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            unmounter.unmount();
        }
    });
    session.mount(args.source()).await?;

    if session.checkout().is_mounted() && session.checkout().load_error().is_none() {
        let lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines())
            .filter_map(|line| match line {
                Ok(line) => Some(line),
                Err(e) => {
                    warn!("failed to read stdin: {e}");
                    None
                }
            })
            .take_while(|line| !matches!(line.trim(), "q" | "quit"))
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match line.parse::<Command>() {
                Ok(command) => Some(command),
                Err(e) => {
                    warn!(input = %line.trim(), "{e}");
                    None
                }
            });
        session.run(pin!(lines)).await?;
    }

    session.unmount();
    Ok(())
}
