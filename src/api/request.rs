use crate::api::endpoints::*;
use crate::config::ClientConfig;
use crate::error::AppError;
use std::fmt;

/// Identifies one player on one platform. Exactly one of `player` and `uid`
/// must be set; empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerQuery {
    pub player: Option<String>,
    pub uid: Option<String>,
    pub platform: Option<String>,
}

impl PlayerQuery {
    pub fn by_name(player: impl Into<String>, platform: impl Into<String>) -> Self {
        PlayerQuery {
            player: Some(player.into()),
            uid: None,
            platform: Some(platform.into()),
        }
    }

    /// UIDs are accepted as strings or integers.
    pub fn by_uid(uid: impl ToString, platform: impl Into<String>) -> Self {
        PlayerQuery {
            player: None,
            uid: Some(uid.to_string()),
            platform: Some(platform.into()),
        }
    }

    pub(crate) fn resolve(&self) -> Result<ResolvedQuery, AppError> {
        let player = non_empty(&self.player);
        let uid = non_empty(&self.uid);

        let target = match (player, uid) {
            (Some(name), None) => PlayerTarget::Name(name.to_string()),
            (None, Some(uid)) => PlayerTarget::Uid(uid.to_string()),
            (Some(_), Some(_)) => {
                return Err(AppError::validation("uid", "only one of `player` or `uid` may be set"));
            }
            (None, None) => {
                return Err(AppError::validation("player", "one of `player` or `uid` is required"));
            }
        };

        let platform = non_empty(&self.platform)
            .ok_or_else(|| AppError::validation("platform", "is required"))?
            .parse::<Platform>()?;

        Ok(ResolvedQuery { target, platform })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlayerTarget {
    Name(String),
    Uid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedQuery {
    pub target: PlayerTarget,
    pub platform: Platform,
}

impl ResolvedQuery {
    fn push_params(&self, query: &mut Vec<(String, String)>) {
        query.push(("platform".to_string(), self.platform.to_string()));
        match &self.target {
            PlayerTarget::Name(name) => query.push(("player".to_string(), name.clone())),
            PlayerTarget::Uid(uid) => query.push(("uid".to_string(), uid.clone())),
        }
    }
}

/// Everything the transport needs to issue one GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDescriptor {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl CallDescriptor {
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

// Renders url and query only; headers carry the API key.
impl fmt::Display for CallDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)?;
        for (idx, (k, v)) in self.query.iter().enumerate() {
            let sep = if idx == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, k, v)?;
        }
        Ok(())
    }
}

/// Validates operation parameters and produces call descriptors. Never
/// performs I/O.
pub struct RequestBuilder<'a> {
    config: &'a ClientConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a ClientConfig) -> Self {
        RequestBuilder { config }
    }

    fn call(&self, path: &str, query: Vec<(String, String)>) -> CallDescriptor {
        CallDescriptor {
            url: format!("{}{}", self.config.base_url(), path),
            query,
            headers: self.config.headers().to_vec(),
        }
    }

    pub fn search(&self, query: &PlayerQuery) -> Result<CallDescriptor, AppError> {
        let resolved = query.resolve()?;
        let mut params = vec![("version".to_string(), self.config.version().to_string())];
        resolved.push_params(&mut params);
        Ok(self.call(SEARCH_PATH, params))
    }

    pub fn news(&self, lang: Option<&str>) -> Result<CallDescriptor, AppError> {
        let lang = lang.unwrap_or(DEFAULT_NEWS_LANG).trim();
        if lang.is_empty() {
            return Err(AppError::validation("lang", "must not be empty"));
        }
        if !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(AppError::validation(
                "lang",
                format!("`{}` is not a language tag", lang),
            ));
        }
        Ok(self.call(NEWS_PATH, vec![("lang".to_string(), lang.to_ascii_lowercase())]))
    }

    pub fn server(&self) -> CallDescriptor {
        self.call(SERVERS_PATH, Vec::new())
    }

    /// `action` is parsed here so an unknown action fails before anything
    /// else is checked.
    pub fn history(
        &self,
        action: &str,
        query: Option<&PlayerQuery>,
        limit: Option<u32>,
    ) -> Result<CallDescriptor, AppError> {
        let action: HistoryAction = action.parse()?;

        let mut params = vec![("action".to_string(), action.as_str().to_string())];
        match query {
            Some(query) => query.resolve()?.push_params(&mut params),
            None if action.requires_query() => {
                return Err(AppError::validation(
                    "query",
                    format!("a player query is required for action `{}`", action.as_str()),
                ));
            }
            None => {}
        }

        if let Some(limit) = limit {
            if action != HistoryAction::Get {
                return Err(AppError::validation("limit", "only allowed with action `get`"));
            }
            if limit == 0 {
                return Err(AppError::validation("limit", "must be greater than zero"));
            }
            params.push(("limit".to_string(), limit.to_string()));
        }

        Ok(self.call(HISTORY_PATH, params))
    }

    pub fn map_rotation(&self) -> CallDescriptor {
        self.call(MAP_ROTATION_PATH, Vec::new())
    }

    pub fn origin(&self, player: &str, show_all_hits: bool) -> Result<CallDescriptor, AppError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(AppError::validation("player", "must not be empty"));
        }
        Ok(self.call(
            ORIGIN_PATH,
            vec![
                ("player".to_string(), player.to_string()),
                ("showAllHits".to_string(), show_all_hits.to_string()),
            ],
        ))
    }

    /// Both queries are checked before either call is built.
    pub fn compare(
        &self,
        query1: &PlayerQuery,
        query2: &PlayerQuery,
    ) -> Result<(CallDescriptor, CallDescriptor), AppError> {
        let first = self.search(query1)?;
        let second = self.search(query2)?;
        Ok((first, second))
    }

    pub fn gamedata(&self, data_type: &str) -> Result<CallDescriptor, AppError> {
        if !GAMEDATA_TYPES.contains(&data_type) {
            return Err(AppError::validation(
                "dataType",
                format!("unknown category `{}`", data_type),
            ));
        }
        Ok(self.call(GAMEDATA_PATH, vec![("type".to_string(), data_type.to_string())]))
    }
}
