use serde::Serialize;
use serde_json::{Value, json};
use tabclust_service::AppContext;

use crate::{Command, CommandError, CommandRequest};

/// What a host gets back for one request: exactly one of the two keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandResponse {
    Result { result: Value },
    Error { error: String },
}

impl CommandResponse {
    #[must_use]
    pub fn from_outcome(outcome: Result<Value, CommandError>) -> Self {
        match outcome {
            Ok(result) => Self::Result { result },
            Err(e) => Self::Error { error: e.to_string() },
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

fn to_value<T: Serialize>(data: &T) -> Result<Value, CommandError> {
    serde_json::to_value(data).map_err(CommandError::Serialization)
}

/// Runs one command against the context.
pub async fn dispatch(ctx: &AppContext, command: Command) -> Result<Value, CommandError> {
    let action = command.action();
    tracing::debug!(action = action.as_str(), "Dispatching command");

    let groups = ctx.groups();
    match command {
        Command::CreateTabGroup { name } => to_value(&groups.create_group(&name).await?),
        Command::WriteTabsToGroup { group_name, tabs } => {
            to_value(&groups.write_tabs(&group_name, &tabs).await?)
        },
        Command::ReadTabsFromGroup { group_name } => {
            to_value(&groups.read_tabs(&group_name).await?)
        },
        Command::RemoveTabFromGroup { group_name, tab } => {
            let removed = groups.remove_tab(&group_name, &tab).await?;
            Ok(json!({ "removed": removed }))
        },
        Command::RemoveGroup { group_name } => {
            let removed = groups.remove_group(&group_name).await?;
            Ok(json!({ "removed": removed }))
        },
        Command::RenameGroup { old_name, new_name } => {
            let moved = groups.rename_group(&old_name, &new_name).await?;
            Ok(json!({ "oldName": old_name, "newName": new_name, "tabsMoved": moved }))
        },
        Command::GetAllGroupNames => to_value(&groups.group_names().await?),
        Command::GetAllGroups => to_value(&groups.groups().await?),
        Command::GetAllTabsFromDatabase => to_value(&groups.all_tabs().await?),
        Command::GetSuggestedTabGroups => to_value(&ctx.suggest_stored_groups().await?),
        Command::GetSuggestedOpenTabs => to_value(&ctx.suggest_open_groups().await?),
        Command::SetApiKey { key } => {
            ctx.set_api_key(&key);
            Ok(json!({ "apiKeySet": ctx.api_key().is_some() }))
        },
        Command::GetApiKey => Ok(json!(ctx.api_key())),
    }
}

/// Decodes, dispatches and wraps one request line. `None` for blank lines.
pub async fn handle_line(ctx: &AppContext, line: &str) -> Option<CommandResponse> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let outcome = match serde_json::from_str::<CommandRequest>(line) {
        Ok(request) => match Command::from_request(request) {
            Ok(command) => dispatch(ctx, command).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(CommandError::Parse(e)),
    };

    if let Err(ref e) = outcome {
        tracing::warn!(error = %e, transient = e.is_transient(), "Command failed");
    }
    Some(CommandResponse::from_outcome(outcome))
}
