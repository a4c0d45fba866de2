//! Character creation runner - composition root binary.
//!
//! Usage: `chargen-player [--create] [--goto <stage>]`

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chargen_domain::Stage;
use chargen_player::application::services::{ApplicationService, CatalogService, DraftService};
use chargen_player::application::{Api, DraftStore, Wizard};
use chargen_player::infrastructure::{ApiAdapter, QueryCache, StdinConfirm};
use chargen_player::report::render_report;
use chargen_player::ClientConfig;

struct Args {
    create: bool,
    goto: Option<Stage>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        create: false,
        goto: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--create" => args.create = true,
            "--goto" => {
                let value = iter.next().context("--goto needs a stage number")?;
                let ordinal: u8 = value
                    .parse()
                    .with_context(|| format!("invalid stage number '{value}'"))?;
                args.goto = Some(Stage::from_ordinal(ordinal)?);
            }
            other => bail!("unknown argument '{other}'"),
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chargen_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;
    let config = ClientConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Starting character creation client");

    // HTTP
    let raw_api = Arc::new(ApiAdapter::new(&config)?);
    let api = Api::new(raw_api);

    // Catalogs live long; draft-scoped reads expire quickly
    let catalog_cache = Arc::new(QueryCache::new(config.catalog_ttl));
    let draft_cache = Arc::new(QueryCache::new(config.draft_ttl));

    let catalogs = CatalogService::new(api.clone(), catalog_cache);
    let drafts = DraftService::new(api.clone(), draft_cache.clone());
    let applications = ApplicationService::new(api, draft_cache);

    let draft = match drafts.get_my_draft().await? {
        Some(draft) => draft,
        None if args.create => drafts.create_draft().await?,
        None => {
            println!("No draft yet. Run with --create to start one.");
            return Ok(());
        }
    };

    let phase = applications.phase(draft.id).await?;
    let mut store = DraftStore::new(drafts, draft).with_phase(phase);
    if let Err(err) = store.sync_completion().await {
        tracing::warn!(error = %err, "Could not sync stage completion");
    }

    let mut wizard = Wizard::new(store, Arc::new(StdinConfirm));
    if let Some(stage) = args.goto {
        if let Err(err) = wizard.navigate(stage).await {
            wizard.report_fault(&err);
            eprintln!("{}", err.user_message());
        }
    }

    let area = match wizard.draft().selected_area {
        Some(id) => match catalogs.areas().await {
            Ok(areas) => areas.into_iter().find(|area| area.id == id),
            Err(err) => {
                tracing::warn!(error = %err, "Could not load starting areas");
                None
            }
        },
        None => None,
    };

    print!(
        "{}",
        render_report(wizard.draft(), wizard.store().phase(), area.as_ref())
    );
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
