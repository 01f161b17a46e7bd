//! The closed set of commands a host can send, and their payload shapes.
//!
//! A request is `{"action": "<name>", "data": <payload>}`. The action name
//! picks a [`CommandAction`]; the payload is then decoded into the matching
//! [`Command`] variant.

use serde::Deserialize;
use serde_json::Value;
use tabclust_core::Tab;

use crate::CommandError;

/// Action names as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    CreateTabGroup,
    WriteTabsToGroup,
    ReadTabsFromGroup,
    RemoveTabFromGroup,
    RemoveGroup,
    RenameGroup,
    GetAllGroupNames,
    GetAllGroups,
    GetAllTabsFromDatabase,
    GetSuggestedTabGroups,
    GetSuggestedOpenTabs,
    SetApiKey,
    GetApiKey,
}

impl CommandAction {
    pub const ALL: [Self; 13] = [
        Self::CreateTabGroup,
        Self::WriteTabsToGroup,
        Self::ReadTabsFromGroup,
        Self::RemoveTabFromGroup,
        Self::RemoveGroup,
        Self::RenameGroup,
        Self::GetAllGroupNames,
        Self::GetAllGroups,
        Self::GetAllTabsFromDatabase,
        Self::GetSuggestedTabGroups,
        Self::GetSuggestedOpenTabs,
        Self::SetApiKey,
        Self::GetApiKey,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTabGroup => "createTabGroup",
            Self::WriteTabsToGroup => "writeTabsToGroup",
            Self::ReadTabsFromGroup => "readTabsFromGroup",
            Self::RemoveTabFromGroup => "removeTabFromGroup",
            Self::RemoveGroup => "removeGroup",
            Self::RenameGroup => "renameGroup",
            Self::GetAllGroupNames => "getAllGroupNames",
            Self::GetAllGroups => "getAllGroups",
            Self::GetAllTabsFromDatabase => "getAllTabsFromDatabase",
            Self::GetSuggestedTabGroups => "getSuggestedTabGroups",
            Self::GetSuggestedOpenTabs => "getSuggestedOpenTabs",
            Self::SetApiKey => "setApiKey",
            Self::GetApiKey => "getApiKey",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

/// A decoded command, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTabGroup { name: String },
    WriteTabsToGroup { group_name: String, tabs: Vec<Tab> },
    ReadTabsFromGroup { group_name: String },
    RemoveTabFromGroup { group_name: String, tab: Tab },
    RemoveGroup { group_name: String },
    RenameGroup { old_name: String, new_name: String },
    GetAllGroupNames,
    GetAllGroups,
    GetAllTabsFromDatabase,
    GetSuggestedTabGroups,
    GetSuggestedOpenTabs,
    SetApiKey { key: String },
    GetApiKey,
}

/// One line of input.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: String,
    #[serde(default)]
    pub data: Value,
}

/// A group name sent either bare (`"Work"`) or wrapped
/// (`{"name": "Work"}` / `{"groupName": "Work"}`).
#[derive(Deserialize)]
#[serde(untagged)]
enum NameArg {
    Bare(String),
    Wrapped {
        #[serde(alias = "groupName")]
        name: String,
    },
}

impl NameArg {
    fn into_name(self) -> String {
        match self {
            Self::Bare(name) | Self::Wrapped { name } => name,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteTabsPayload {
    group_name: String,
    #[serde(alias = "tabs")]
    tab_objects: Vec<Tab>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveTabPayload {
    group_name: String,
    #[serde(alias = "tab")]
    tab_object: Tab,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenamePayload {
    old_name: String,
    new_name: String,
}

/// `{"key": "..."}` or a bare string.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeyArg {
    Bare(String),
    Wrapped { key: String },
}

fn payload<T: serde::de::DeserializeOwned>(
    action: CommandAction,
    data: Value,
) -> Result<T, CommandError> {
    serde_json::from_value(data)
        .map_err(|source| CommandError::InvalidPayload { action: action.as_str(), source })
}

impl Command {
    /// Decodes a request. Payloads of argument-less commands are ignored.
    pub fn from_request(request: CommandRequest) -> Result<Self, CommandError> {
        let action = CommandAction::parse(&request.action)
            .ok_or_else(|| CommandError::UnknownAction(request.action.clone()))?;
        let data = request.data;

        Ok(match action {
            CommandAction::CreateTabGroup => {
                Self::CreateTabGroup { name: payload::<NameArg>(action, data)?.into_name() }
            },
            CommandAction::WriteTabsToGroup => {
                let p: WriteTabsPayload = payload(action, data)?;
                Self::WriteTabsToGroup { group_name: p.group_name, tabs: p.tab_objects }
            },
            CommandAction::ReadTabsFromGroup => Self::ReadTabsFromGroup {
                group_name: payload::<NameArg>(action, data)?.into_name(),
            },
            CommandAction::RemoveTabFromGroup => {
                let p: RemoveTabPayload = payload(action, data)?;
                Self::RemoveTabFromGroup { group_name: p.group_name, tab: p.tab_object }
            },
            CommandAction::RemoveGroup => {
                Self::RemoveGroup { group_name: payload::<NameArg>(action, data)?.into_name() }
            },
            CommandAction::RenameGroup => {
                let p: RenamePayload = payload(action, data)?;
                Self::RenameGroup { old_name: p.old_name, new_name: p.new_name }
            },
            CommandAction::GetAllGroupNames => Self::GetAllGroupNames,
            CommandAction::GetAllGroups => Self::GetAllGroups,
            CommandAction::GetAllTabsFromDatabase => Self::GetAllTabsFromDatabase,
            CommandAction::GetSuggestedTabGroups => Self::GetSuggestedTabGroups,
            CommandAction::GetSuggestedOpenTabs => Self::GetSuggestedOpenTabs,
            CommandAction::SetApiKey => {
                let key = match payload::<KeyArg>(action, data)? {
                    KeyArg::Bare(key) | KeyArg::Wrapped { key } => key,
                };
                Self::SetApiKey { key }
            },
            CommandAction::GetApiKey => Self::GetApiKey,
        })
    }

    #[must_use]
    pub const fn action(&self) -> CommandAction {
        match self {
            Self::CreateTabGroup { .. } => CommandAction::CreateTabGroup,
            Self::WriteTabsToGroup { .. } => CommandAction::WriteTabsToGroup,
            Self::ReadTabsFromGroup { .. } => CommandAction::ReadTabsFromGroup,
            Self::RemoveTabFromGroup { .. } => CommandAction::RemoveTabFromGroup,
            Self::RemoveGroup { .. } => CommandAction::RemoveGroup,
            Self::RenameGroup { .. } => CommandAction::RenameGroup,
            Self::GetAllGroupNames => CommandAction::GetAllGroupNames,
            Self::GetAllGroups => CommandAction::GetAllGroups,
            Self::GetAllTabsFromDatabase => CommandAction::GetAllTabsFromDatabase,
            Self::GetSuggestedTabGroups => CommandAction::GetSuggestedTabGroups,
            Self::GetSuggestedOpenTabs => CommandAction::GetSuggestedOpenTabs,
            Self::SetApiKey { .. } => CommandAction::SetApiKey,
            Self::GetApiKey => CommandAction::GetApiKey,
        }
    }
}
