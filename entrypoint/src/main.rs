use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{error, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use catalog_store::mongo::connector::{DEFAULT_CONNECTION_URI, MongoStore};
use catalog_store::traits::CatalogStore;
use common::entities::RunStatus;
use common::vertical::Vertical;
use ingestion::IngestionPipeline;
use retailers::adapter::SourceAdapter;
use retailers::registry::{AdapterRuntimeOptions, build_fixture_adapter, build_live_adapter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Live,
    Fixture,
}

/// Runs one ingestion for one retailer.
#[derive(Parser)]
#[command(version, about = "PriceLens ingestion worker")]
struct Arguments {
    /// Retailer slug to ingest
    #[arg(long)]
    retailer: String,
    /// Scrape live pages, or replay the bundled fixture dataset
    #[arg(long, value_enum, default_value_t = Mode::Live)]
    mode: Mode,
    #[arg(long, default_value_t = 120)]
    max_products: usize,
    /// Minimum gap between HTTP requests
    #[arg(long, default_value_t = 0.0)]
    request_delay_seconds: f64,
    #[arg(long, default_value_t = 2)]
    max_fetch_retries: u32,
    #[arg(long, default_value_t = 0.6)]
    retry_backoff_seconds: f64,
    /// Fail the run instead of replaying the fixture when live discovery
    /// comes up empty
    #[arg(long, default_value_t = false)]
    no_fixture_fallback: bool,
    #[arg(long)]
    proxy_url: Option<String>,
    /// Escalate failed or challenged fetches to the headless browser
    #[arg(long, default_value_t = false)]
    browser_fallback: bool,
    #[arg(long, default_value_t = 30.0)]
    browser_timeout_seconds: f64,
    #[arg(long)]
    browser_proxy_url: Option<String>,
    /// Vertical variant for retailers that carry more than one
    #[arg(long)]
    vertical: Option<Vertical>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_log = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
        .expect("Failed to create tracing filter");

    let subscriber = FmtSubscriber::builder()
        .compact()
        .with_file(false)
        .with_env_filter(env_log);

    tracing::subscriber::set_global_default(subscriber.finish())
        .expect("Failed to create log subscription");

    let args = Arguments::parse();

    let adapter: Box<dyn SourceAdapter> = match args.mode {
        Mode::Fixture => match build_fixture_adapter(&args.retailer, args.vertical) {
            Ok(adapter) => Box::new(adapter),
            Err(err) => {
                error!(error = %err, "could not build fixture adapter");
                return ExitCode::FAILURE;
            }
        },
        Mode::Live => {
            let options = AdapterRuntimeOptions {
                max_products: args.max_products.max(1),
                request_delay: Duration::from_secs_f64(args.request_delay_seconds.max(0.0)),
                max_fetch_retries: args.max_fetch_retries,
                retry_backoff: Duration::from_secs_f64(args.retry_backoff_seconds.max(0.0)),
                use_fixture_fallback: !args.no_fixture_fallback,
                proxy_url: args.proxy_url.clone(),
                browser_fallback: args.browser_fallback,
                browser_timeout: Duration::from_secs_f64(args.browser_timeout_seconds.max(1.0)),
                browser_proxy_url: args.browser_proxy_url.clone(),
                vertical: args.vertical,
            };
            match build_live_adapter(&args.retailer, &options) {
                Ok(adapter) => Box::new(adapter),
                Err(err) => {
                    error!(error = %err, "could not build live adapter");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    let database_url = std::env::var("PRICELENS_DATABASE_URL")
        .unwrap_or_else(|_| DEFAULT_CONNECTION_URI.to_string());
    let store: MongoStore = match MongoStore::connect(&database_url).await {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "could not connect catalog store");
            return ExitCode::FAILURE;
        }
    };

    let mut pipeline = IngestionPipeline::new(&store as &dyn CatalogStore, adapter);
    let run = match pipeline.run().await {
        Ok(run) => run,
        Err(err) => {
            error!(error = %err, "ingestion run aborted");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "run={} status={} total={} new={} updated={} failed={}",
        run.id, run.status, run.items_total, run.items_new, run.items_updated, run.items_failed
    );

    if run.status == RunStatus::Completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
