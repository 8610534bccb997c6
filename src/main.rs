use config::Config;
use report::Reporter;
use shell::Shell;
use store::RecordStore;

mod chart;
mod compute;
mod config;
mod data;
mod report;
mod shell;
mod store;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let config = Config::default();
    let store = RecordStore::new(config.records);
    store.ensure_initialized()?;
    let reporter = Reporter::new(config.chart);

    Shell::new(store, reporter, std::io::stdin().lock(), std::io::stdout()).run()
}
