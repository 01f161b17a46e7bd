use anyhow::{Context, Result};
use tabclust_commands::{Command, dispatch};
use tabclust_core::{Settings, Tab};
use tabclust_service::{AppContext, JsonFileTabSource, TabSource};

use crate::Commands;

/// Runs one store or suggestion command and prints its result as pretty JSON.
pub(crate) async fn run(settings: Settings, command: Commands) -> Result<()> {
    let ctx = AppContext::init(settings)?;
    let outcome = execute(&ctx, command).await;
    ctx.shutdown();

    println!("{}", serde_json::to_string_pretty(&outcome?)?);
    Ok(())
}

async fn execute(ctx: &AppContext, command: Commands) -> Result<serde_json::Value> {
    let command = match command {
        Commands::Groups => Command::GetAllGroupNames,
        Commands::Tabs { group } => Command::ReadTabsFromGroup { group_name: group },
        Commands::Create { name } => Command::CreateTabGroup { name },
        Commands::Add { group, tabs } => {
            let tabs: Vec<Tab> = JsonFileTabSource::new(&tabs)
                .tabs()
                .await
                .with_context(|| format!("reading tabs from {}", tabs.display()))?;
            Command::WriteTabsToGroup { group_name: group, tabs }
        },
        Commands::RemoveTab { group, url, title } => {
            Command::RemoveTabFromGroup { group_name: group, tab: Tab::new(title, url) }
        },
        Commands::RemoveGroup { name } => Command::RemoveGroup { group_name: name },
        Commands::Rename { old_name, new_name } => Command::RenameGroup { old_name, new_name },
        Commands::Suggest { open_tabs: None } => Command::GetSuggestedTabGroups,
        Commands::Suggest { open_tabs: Some(path) } => {
            let source = JsonFileTabSource::new(path);
            let groups = ctx.grouper().suggest_from(&source).await?;
            return Ok(serde_json::to_value(groups)?);
        },
        Commands::Serve { .. } => anyhow::bail!("serve is not a one-shot command"),
    };

    Ok(dispatch(ctx, command).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn suggest_with_open_tabs_file_reads_snapshot() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = Settings {
            db_path: dir.path().join("groups.db"),
            api_key: None,
            api_url: "http://127.0.0.1:9".to_owned(),
            ..Settings::default()
        };
        let snapshot = dir.path().join("open.json");
        std::fs::write(&snapshot, r#"[{"title":"Cats","url":"https://cats"}]"#).unwrap();

        let ctx = AppContext::init(settings).unwrap();
        let value = execute(&ctx, Commands::Suggest { open_tabs: Some(snapshot) }).await.unwrap();
        assert_eq!(value, serde_json::json!([]));
        ctx.shutdown();
    }
}
