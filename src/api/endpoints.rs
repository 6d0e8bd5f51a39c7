// Endpoint paths and the closed value sets the remote API accepts.
use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

pub const SEARCH_PATH: &str = "/bridge";
pub const NEWS_PATH: &str = "/news";
pub const SERVERS_PATH: &str = "/servers";
pub const HISTORY_PATH: &str = "/games";
pub const MAP_ROTATION_PATH: &str = "/maprotation";
pub const ORIGIN_PATH: &str = "/origin";
pub const GAMEDATA_PATH: &str = "/gamedata";

pub const DEFAULT_NEWS_LANG: &str = "en-us";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Pc,
    Ps4,
    Xbox,
    Switch,
}

impl Platform {
    pub const ALL: [Platform; 4] = [Platform::Pc, Platform::Ps4, Platform::Xbox, Platform::Switch];

    pub fn code(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::Ps4 => "PS4",
            Platform::Xbox => "X1",
            Platform::Switch => "SWITCH",
        }
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.code() == upper)
            .ok_or_else(|| {
                AppError::validation("platform", format!("unknown platform `{}` (expected PC, PS4, X1 or SWITCH)", s))
            })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Info,
    Get,
    Delete,
    Add,
}

impl HistoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::Info => "info",
            HistoryAction::Get => "get",
            HistoryAction::Delete => "delete",
            HistoryAction::Add => "add",
        }
    }

    pub fn requires_query(&self) -> bool {
        !matches!(self, HistoryAction::Info)
    }
}

impl FromStr for HistoryAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(HistoryAction::Info),
            "get" => Ok(HistoryAction::Get),
            "delete" => Ok(HistoryAction::Delete),
            "add" => Ok(HistoryAction::Add),
            other => Err(AppError::InvalidAction(other.to_string())),
        }
    }
}

/// Categories served by the deprecated `/gamedata` endpoint.
pub const GAMEDATA_TYPES: [&str; 11] = [
    "assault_rifles",
    "attachments",
    "consumables",
    "equipment",
    "grenades",
    "legends",
    "light_machine_guns",
    "pistols",
    "shotguns",
    "sniper_rifles",
    "sub_machine_guns",
];
