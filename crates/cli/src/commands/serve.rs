use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tabclust_commands::run_command_server;
use tabclust_core::Settings;
use tabclust_service::{AppContext, JsonFileTabSource};

pub(crate) async fn run(settings: Settings, open_tabs: Option<PathBuf>) -> Result<()> {
    let mut ctx = AppContext::init(settings)?;
    if let Some(path) = open_tabs {
        tracing::info!(path = %path.display(), "Open tabs read from snapshot file");
        ctx = ctx.with_open_tabs(Arc::new(JsonFileTabSource::new(path)));
    }

    let served = run_command_server(&ctx).await;
    ctx.shutdown();
    Ok(served?)
}
