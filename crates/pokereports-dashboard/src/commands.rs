use std::path::Path;
use std::sync::Arc;

use eyre::{Result, eyre};
use pokereports_client::{HttpLinkProbe, ReportApi};
use pokereports_core::{Report, SortDirection};
use pokereports_dashboard::PageController;
use pokereports_dashboard::categories::StaticCategories;
use pokereports_dashboard::config::{self, DashboardConfig};
use pokereports_dashboard::controller::{DownloadOutcome, SubmitOutcome};
use pokereports_dashboard::handoff::SaveToDirectory;
use pokereports_dashboard::notify::StderrNotifier;
use pokereports_dashboard::render;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{Cli, Command, ConfigAction};

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = config::load_config()?;

    if let Command::Config { action } = &cli.command {
        return run_config(action, &mut config);
    }

    let api_url = config::resolve_api_url(cli.api_url.as_deref(), &config);
    tracing::debug!(%api_url, "using report API");

    match cli.command {
        Command::Types => types(&config, &api_url).await,
        Command::List { asc } => {
            let direction = if asc {
                SortDirection::Asc
            } else {
                config.sort
            };
            list(&config, &api_url, direction).await
        }
        Command::Create {
            pokemon_type,
            count,
        } => create(&config, &api_url, &pokemon_type, &count).await,
        Command::Download { id, out, recover } => {
            download(&config, &api_url, &id, &out, recover).await
        }
        Command::Delete { id, yes } => delete(&config, &api_url, &id, yes).await,
        Command::Config { .. } => Ok(()),
    }
}

fn build_controller(config: &DashboardConfig, api_url: &str, out_dir: &Path) -> PageController {
    let api = ReportApi::new(api_url);
    let http = api.http().clone();

    let categories = if config.categories.is_empty() {
        StaticCategories::default()
    } else {
        StaticCategories::new(config.categories.clone())
    };

    PageController::new(
        Arc::new(api),
        Arc::new(categories),
        Arc::new(HttpLinkProbe::new(http.clone())),
        Arc::new(SaveToDirectory::new(http, out_dir)),
        Arc::new(StderrNotifier),
    )
}

async fn mounted(config: &DashboardConfig, api_url: &str, out_dir: &Path) -> PageController {
    let controller = build_controller(config, api_url, out_dir);
    controller.set_sort(config.sort).await;
    controller.mount().await;
    controller
}

async fn print_page(controller: &PageController) {
    let state = controller.snapshot().await;
    if let Some(banner) = render::banner(&state) {
        eprintln!("{banner}");
    }
    if let Some(modal) = render::modal(&state) {
        println!("{modal}\n");
    }
    print!("{}", render::report_table(&state));
}

async fn find_report(controller: &PageController, id: &str) -> Result<Report> {
    let state = controller.snapshot().await;
    if let Some(banner) = render::banner(&state) {
        return Err(eyre!(banner));
    }
    state
        .visible_reports()
        .iter()
        .find(|r| r.display_id() == id)
        .cloned()
        .ok_or_else(|| eyre!("no report with id {id}"))
}

async fn types(config: &DashboardConfig, api_url: &str) -> Result<()> {
    let controller = mounted(config, api_url, Path::new(".")).await;
    let state = controller.snapshot().await;
    if let Some(banner) = render::banner(&state) {
        eprintln!("{banner}");
    }
    for category in &state.categories {
        println!("{category}");
    }
    Ok(())
}

async fn list(config: &DashboardConfig, api_url: &str, direction: SortDirection) -> Result<()> {
    let controller = mounted(config, api_url, Path::new(".")).await;
    controller.set_sort(direction).await;
    print_page(&controller).await;
    Ok(())
}

async fn create(
    config: &DashboardConfig,
    api_url: &str,
    pokemon_type: &str,
    count: &str,
) -> Result<()> {
    let controller = mounted(config, api_url, Path::new(".")).await;
    controller.select_type(pokemon_type).await?;
    controller.select_count(count).await?;

    match controller.submit_create().await {
        SubmitOutcome::Created(_) => {
            print_page(&controller).await;
            Ok(())
        }
        SubmitOutcome::Refused => {
            let state = controller.snapshot().await;
            Err(eyre!(
                "report creation is not possible right now ({})",
                render::submit_label(&state)
            ))
        }
        SubmitOutcome::Failed(e) => Err(e.into()),
    }
}

async fn download(
    config: &DashboardConfig,
    api_url: &str,
    id: &str,
    out: &Path,
    recover: bool,
) -> Result<()> {
    let controller = mounted(config, api_url, out).await;
    let report = find_report(&controller, id).await?;

    match controller.probe_download(&report).await {
        DownloadOutcome::HandedOff => {
            println!("saved report {id} to {}", out.display());
            Ok(())
        }
        DownloadOutcome::Refused => Err(eyre!("report {id} is not completed yet")),
        DownloadOutcome::Unavailable | DownloadOutcome::Failed => {
            Err(eyre!("report {id} could not be downloaded"))
        }
        DownloadOutcome::AuthError => {
            if recover {
                controller.recover_from_auth_error().await?;
            }
            print_page(&controller).await;
            Err(eyre!("download link for report {id} was rejected"))
        }
    }
}

async fn delete(config: &DashboardConfig, api_url: &str, id: &str, yes: bool) -> Result<()> {
    let controller = mounted(config, api_url, Path::new(".")).await;
    let report = find_report(&controller, id).await?;
    controller.request_delete(report).await?;

    if !yes {
        print_page(&controller).await;
        if !confirm().await? {
            controller.cancel_delete().await;
            println!("cancelled");
            return Ok(());
        }
    }

    let Some(pending) = controller.confirm_delete().await? else {
        return Ok(());
    };
    let body = pending.outcome().await?;
    tracing::debug!(%body, "delete response");
    println!("delete requested for report {id}");
    Ok(())
}

async fn confirm() -> Result<bool> {
    eprint!("Delete? [y/N] ");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn run_config(action: &ConfigAction, config: &mut DashboardConfig) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigAction::SetUrl { url } => {
            let url = url.trim();
            if url.is_empty() {
                return Err(eyre!("api url must not be empty"));
            }
            config.api_url = url.to_string();
            let path = config::save_config(config)?;
            println!("saved {}", path.display());
        }
    }
    Ok(())
}
