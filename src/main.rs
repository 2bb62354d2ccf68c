use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dioxus::logger::tracing::{info, warn};

mod app;
mod config;
mod error;

mod domain {
    pub mod entities {
        pub mod entity;
        pub mod listing;
    }
}

mod infra {
    pub mod import {
        pub mod csv;
    }
    pub mod sqlite {
        pub mod queries;
        pub mod repo;
        pub mod schema;
    }
}

mod ui {
    pub mod components {
        pub mod entity_table;
        pub mod list_header;
        pub mod list_info;
    }
    pub mod list_view {
        pub mod controller;
        pub mod debounce;
        pub mod info;
        pub mod paginator;
    }
    pub mod state {
        pub mod app_state;
    }
}

mod usecase {
    pub mod ports {
        pub mod catalog;
    }
    pub mod services {
        pub mod import_service;
        pub mod query_service;
    }
}

#[cfg(test)]
mod tests;

use crate::app::{App, ConsoleContext};
use crate::config::{default_db_path, project_dirs, ConsoleConfig};
use crate::infra::sqlite::repo::SqliteCatalog;
use crate::usecase::ports::catalog::EntityCatalog;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::query_service::QueryService;

fn main() -> Result<()> {
    let project_dirs = project_dirs()?;
    let (config, notes) = ConsoleConfig::load(&project_dirs);

    dioxus::logger::init(config.level()).context("failed to initialize logger")?;
    for note in notes {
        warn!("config: {note}");
    }

    let catalog: Arc<dyn EntityCatalog> =
        Arc::new(SqliteCatalog::new(default_db_path(&project_dirs)));
    catalog.init()?;

    if let Some(seed_csv) = &config.seed_csv {
        match ImportService::new(catalog.clone()).seed_if_empty(seed_csv) {
            Ok(Some(count)) => info!(count, "catalog seeded"),
            Ok(None) => {}
            Err(err) => warn!(error = %err, path = %seed_csv.display(), "catalog seed failed"),
        }
    }

    let webview_data_dir = ensure_webview_data_dir(project_dirs.data_local_dir())?;
    let context = ConsoleContext {
        config,
        query_service: Arc::new(QueryService::new(catalog)),
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new().with_title("Entity Console"),
                )
                .with_data_directory(webview_data_dir),
        )
        .with_context(context)
        .launch(App);

    Ok(())
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}
