//! Notification preferences CLI
//!
//! Loads the current user's notification settings from the platform and
//! reports the state of every "select all" column. Can also switch every
//! editable delivery method on, or reset all settings to their defaults.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use notification_prefs::adapters::{
    FixedConfirmer, RestSettingsStore, RestStoreConfig, StaticTranslator,
};
use notification_prefs::application::{
    LoadSettingsHandler, ResetOutcome, ResetSettingsHandler, SaveSettingsHandler, SettingsError,
    SettingsWorkspace,
};
use notification_prefs::config::{AppConfig, FeatureFlags, LoggingConfig};
use notification_prefs::domain::preferences::{Column, DeliveryMethodCatalog};
use notification_prefs::ports::NotificationSettingsRepository;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Command to execute (defaults to `show`)
    #[clap(subcommand)]
    cmd: Option<Command>,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Report the state of every column
    Show,
    /// Turn on every notification type and every allowed delivery method, then save
    EnableAll,
    /// Reset all settings to their defaults and save
    Reset {
        /// Answer the confirmation prompt with "yes"
        #[clap(long)]
        yes: bool,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn save_handler(
    features: &FeatureFlags,
    workspace: Arc<SettingsWorkspace>,
    repository: Arc<dyn NotificationSettingsRepository>,
) -> SaveSettingsHandler {
    SaveSettingsHandler::new(workspace, repository)
        .with_allow_list_deferral(features.defer_save_until_allow_list)
}

async fn report(workspace: &SettingsWorkspace, catalog: &DeliveryMethodCatalog) {
    let rows = workspace.rows().await.len();
    let enabled = workspace.check_state(Column::Enabled).await;
    let unsaved = workspace.has_unsaved_changes().await;
    tracing::info!(rows, enabled = ?enabled, unsaved, "Notification types");
    for method in catalog.methods() {
        let allowed = workspace.is_method_allowed(*method).await;
        let state = workspace.check_state(Column::Method(*method)).await;
        tracing::info!(method = %method, allowed, state = ?state, "Delivery method column");
    }
}

async fn enable_all(
    workspace: &SettingsWorkspace,
    save: &SaveSettingsHandler,
    catalog: &DeliveryMethodCatalog,
) -> Result<(), SettingsError> {
    workspace.set_column_enabled(Column::Enabled, true).await?;
    for method in catalog.methods() {
        if workspace.is_method_allowed(*method).await {
            workspace
                .set_column_enabled(Column::Method(*method), true)
                .await?;
        }
    }
    let saved = save.handle().await?;
    tracing::info!(rows = saved.row_count, "Every allowed delivery method enabled");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    init_tracing(&config.logging);

    let store = match RestSettingsStore::new(
        RestStoreConfig::new(config.store.base_url.clone())
            .with_timeout(config.store.request_timeout()),
    ) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "Cannot create settings store client");
            return ExitCode::FAILURE;
        }
    };

    let catalog = DeliveryMethodCatalog::standard();
    let workspace = Arc::new(SettingsWorkspace::new(catalog.clone()));
    let loader = LoadSettingsHandler::new(workspace.clone(), store.clone(), store.clone());
    let save = Arc::new(save_handler(&config.features, workspace.clone(), store));

    match loader.handle().await {
        Ok(loaded) => tracing::debug!(
            rows = loaded.row_count,
            allow_list_loaded = loaded.allow_list_loaded,
            "Initial load finished"
        ),
        Err(e) => {
            tracing::error!(code = %e.code(), error = %e, "Failed to load notification settings");
            return ExitCode::FAILURE;
        }
    }

    let result = match args.cmd.unwrap_or(Command::Show) {
        Command::Show => Ok(()),
        Command::EnableAll => enable_all(&workspace, &save, catalog).await,
        Command::Reset { yes } => {
            let reset = ResetSettingsHandler::new(
                workspace.clone(),
                save.clone(),
                Arc::new(FixedConfirmer::answering(yes)),
                Arc::new(StaticTranslator::new()),
            );
            reset.handle().await.map(|outcome| {
                if outcome == ResetOutcome::Cancelled {
                    tracing::info!("Reset not confirmed; pass --yes to apply it");
                }
            })
        }
    };

    report(&workspace, catalog).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = %e.code(), error = %e, "Notification settings update failed");
            ExitCode::FAILURE
        }
    }
}
