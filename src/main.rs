use std::io::{self, Write};

use clap::Parser;
use school_search::{cli, client, config, error, flow, terminal, text_map};
use school_search_common::{Endpoints, SearchSession};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use client::ApiClient;
use config::Config;
use error::Result;
use terminal::{check_pick, prompt_pick, TerminalView};
use text_map::TextMapSurface;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;

    match cli.command {
        Commands::Suggest { query, state } => {
            let endpoints = Endpoints::new(config.resolve_base_url(cli.base_url.as_deref()));
            let client = ApiClient::new(config.timeout_seconds)?;
            let mut session = SearchSession::new(endpoints.clone());
            session.set_state_filter(config.resolve_state(state.as_deref()));
            let mut view = TerminalView::new(io::stdout(), endpoints);

            flow::run_autocomplete(&client, &mut session, &mut view, &query).await?;
            view.check_output()?;
        }

        Commands::Search { query, state, pick, json } => {
            let endpoints = Endpoints::new(config.resolve_base_url(cli.base_url.as_deref()));
            let client = ApiClient::new(config.timeout_seconds)?;
            let mut session = SearchSession::new(endpoints.clone());
            session.set_state_filter(config.resolve_state(state.as_deref()));
            let mut view = TerminalView::new(io::stdout(), endpoints);

            let count = flow::run_autocomplete(&client, &mut session, &mut view, &query).await?;
            if count == 0 {
                return Err(error::SchoolSearchError::NoSuggestions(query));
            }

            let index = match pick {
                Some(index) => check_pick(index, count)?,
                None => prompt_pick(count)?,
            };
            let acara_id = view.rows()[index - 1].acara_id.clone();
            session.select_suggestion(&mut view, &acara_id);

            if json {
                print_raw_json(&client, &session.endpoints().info_url(&acara_id)).await?;
            } else {
                show_detail(&client, &mut session, &mut view).await?;
            }
            view.check_output()?;
        }

        Commands::Info { acara_id, json } => {
            let endpoints = Endpoints::new(config.resolve_base_url(cli.base_url.as_deref()));
            let client = ApiClient::new(config.timeout_seconds)?;

            if json {
                print_raw_json(&client, &endpoints.info_url(acara_id.trim())).await?;
            } else {
                let mut session = SearchSession::new(endpoints.clone());
                session.select_id(&acara_id);
                let mut view = TerminalView::new(io::stdout(), endpoints);
                show_detail(&client, &mut session, &mut view).await?;
                view.check_output()?;
            }
        }

        Commands::Config { set_base_url, set_state, clear_state, show } => {
            let mut changed = false;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                changed = true;
            }
            if let Some(state) = set_state {
                config.set_default_state(Some(state));
                changed = true;
            }
            if clear_state {
                config.set_default_state(None);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定ファイル: {}", Config::config_path()?.display());
                println!("base_url: {}", config.base_url);
                println!(
                    "default_state: {}",
                    config.default_state.as_deref().unwrap_or("(すべて)")
                );
                println!("timeout_seconds: {}", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` がなければ warn（`--verbose` なら debug）
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn show_detail<W: Write>(
    client: &ApiClient,
    session: &mut SearchSession,
    view: &mut TerminalView<W>,
) -> Result<()> {
    let mut surface = TextMapSurface::new();
    flow::run_detail(client, session, view, &mut surface).await?;
    flow::print_map_summary(view, &surface);
    Ok(())
}

async fn print_raw_json(client: &ApiClient, url: &str) -> Result<()> {
    let value = client.fetch_raw_json(url).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
