use crate::analysis::compare::compare_players;
use crate::config::ClientConfig;
use crate::error::AppError;
use chrono::Utc;
use serde_json::Value;
use std::sync::mpsc;
use std::thread;
use tracing::{debug, info};

use super::models::*;
use super::normalize::*;
use super::request::{CallDescriptor, PlayerQuery, RequestBuilder};
use super::transport::{Transport, UreqTransport};

const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct ApexApiClient<T: Transport = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl ApexApiClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::default())
    }
}

impl<T: Transport> ApexApiClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        ApexApiClient { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn builder(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.config)
    }

    fn execute_request(&self, call: &CallDescriptor) -> Result<Value, AppError> {
        debug!(request = %call, "sending request");
        let response = self.transport.execute(call)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");

        if !response.is_success() {
            return Err(AppError::Transport {
                status: Some(response.status),
                message: error_message(&response.body),
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            debug!(error = %e, "response body is not JSON");
            AppError::malformed("<root>", "JSON")
        })
    }

    /// Looks up one player by name or UID.
    pub fn search(&self, query: &PlayerQuery) -> Result<Player, AppError> {
        let call = self.builder().search(query)?;
        let body = self.execute_request(&call)?;
        normalize_player(&body)
    }

    /// Recent news, `en-us` unless another language tag is given.
    pub fn news(&self, lang: Option<&str>) -> Result<Vec<ApexNews>, AppError> {
        let call = self.builder().news(lang)?;
        let body = self.execute_request(&call)?;
        normalize_news(&body)
    }

    /// Status of every backend service per region. Services or regions the
    /// remote leaves out are reported as unknown rather than failing.
    pub fn server(&self) -> Result<ServersObj, AppError> {
        let call = self.builder().server();
        let body = self.execute_request(&call)?;
        normalize_servers(&body)
    }

    pub fn history(
        &self,
        action: &str,
        query: Option<&PlayerQuery>,
        limit: Option<u32>,
    ) -> Result<HistoryData, AppError> {
        let call = self.builder().history(action, query, limit)?;
        let body = self.execute_request(&call)?;
        normalize_history(body)
    }

    pub fn map_rotation(&self) -> Result<MapRotationData, AppError> {
        let call = self.builder().map_rotation();
        let body = self.execute_request(&call)?;
        normalize_map_rotation(&body, Utc::now())
    }

    pub fn origin(&self, player: &str, show_all_hits: bool) -> Result<OriginLookup, AppError> {
        let call = self.builder().origin(player, show_all_hits)?;
        let body = self.execute_request(&call)?;
        normalize_origin(&body, show_all_hits)
    }

    /// Runs both player searches concurrently and pairs up their stats.
    ///
    /// The first failure observed is returned; the other lookup is left to
    /// finish and its result dropped.
    pub fn compare(&self, query1: &PlayerQuery, query2: &PlayerQuery) -> Result<ComparedData, AppError> {
        let (first, second) = self.builder().compare(query1, query2)?;

        let [a, b] = thread::scope(|scope| {
            let (tx, rx) = mpsc::channel();
            for (slot, call) in [first, second].into_iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move || {
                    let result = self
                        .execute_request(&call)
                        .and_then(|body| normalize_player(&body));
                    // The receiver is gone once the other lookup has failed.
                    let _ = tx.send((slot, result));
                });
            }
            drop(tx);

            let mut players: [Option<Player>; 2] = [None, None];
            for (slot, result) in rx {
                players[slot] = Some(result?);
            }
            Ok::<_, AppError>(players)
        })?;

        let (Some(a), Some(b)) = (a, b) else {
            return Err(AppError::Transport {
                status: None,
                message: "player lookup ended without a result".to_string(),
            });
        };

        let data = compare_players(&a, &b);
        info!(
            first = %a.global.name,
            second = %b.global.name,
            trackers = data.trackers.len(),
            "compared players"
        );

        Ok(ComparedData { players: [a, b], data })
    }

    /// Static item and legend data. The remote no longer updates it.
    #[deprecated(note = "the /gamedata endpoint is no longer updated by the API")]
    pub fn gamedata(&self, data_type: &str) -> Result<GameData, AppError> {
        let call = self.builder().gamedata(data_type)?;
        let body = self.execute_request(&call)?;
        normalize_gamedata(body)
    }
}

// Prefer the remote's own `Error` text, otherwise a trimmed body excerpt.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(message)) = map.get("Error") {
            return message.clone();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
