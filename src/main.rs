// Entrypoint for the launcher bridge.
// - Keeps `main` small: load configuration, build the API client and
//   desktop adapter, run one command and print its JSON.
// - Logs go to stderr; stdout is reserved for the launcher's result list.

use clap::Parser;
use smms_bridge::api::ApiClient;
use smms_bridge::bridge::{self, Bridge};
use smms_bridge::cli::{Cli, Command};
use smms_bridge::config::Config;
use smms_bridge::desktop;
use smms_bridge::items::ResultList;
use smms_bridge::thumbnail::ThumbnailCache;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Startup failures are reported the same way as any other failure: as
    // a result item, or a notification for `delete`.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            let report = bridge::config_failure(&cli.command, &e, &desktop::system());
            return print_report(report);
        }
    };

    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "cannot build HTTP client");
            let reason = format!("{e:#}");
            let report = bridge::startup_failure(&cli.command, "HTTP client unavailable", &reason, &desktop::system());
            return print_report(report);
        }
    };
    let app = Bridge::new(api, desktop::system(), ThumbnailCache::new(&config.icon_dir));

    match cli.command {
        Command::List => print_list(&app.list())?,
        Command::Upload => print_list(&app.upload())?,
        Command::Delete { hash } => {
            app.delete(hash.as_deref());
        }
    }
    Ok(())
}

fn print_report(report: Option<ResultList>) -> anyhow::Result<()> {
    match report {
        Some(list) => print_list(&list),
        None => Ok(()),
    }
}

fn print_list(list: &ResultList) -> anyhow::Result<()> {
    println!("{}", list.to_json()?);
    Ok(())
}
