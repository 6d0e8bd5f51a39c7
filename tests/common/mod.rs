#![allow(dead_code)]

use apex_stats::{AllLegends, ApexApiClient, AppError, CallDescriptor, ClientConfig, RawResponse, Transport};
use serde_json::{json, Map, Value};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

pub struct Route {
    path: &'static str,
    player: Option<String>,
    outcome: Result<RawResponse, AppError>,
    delay: Duration,
}

/// In-memory transport answering by path and, optionally, `player` param.
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<Route>,
    calls: Mutex<Vec<CallDescriptor>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &'static str, body: Value) -> Self {
        self.routes.push(Route {
            path,
            player: None,
            outcome: Ok(RawResponse { status: 200, body: body.to_string() }),
            delay: Duration::ZERO,
        });
        self
    }

    pub fn respond_for_player(
        mut self,
        player: &str,
        status: u16,
        body: &str,
        delay: Duration,
    ) -> Self {
        self.routes.push(Route {
            path: "/bridge",
            player: Some(player.to_string()),
            outcome: Ok(RawResponse { status, body: body.to_string() }),
            delay,
        });
        self
    }

    pub fn fail(mut self, path: &'static str, message: &str) -> Self {
        self.routes.push(Route {
            path,
            player: None,
            outcome: Err(AppError::Transport {
                status: None,
                message: message.to_string(),
            }),
            delay: Duration::ZERO,
        });
        self
    }

    pub fn calls(&self) -> Vec<CallDescriptor> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn execute(&self, call: &CallDescriptor) -> Result<RawResponse, AppError> {
        self.calls.lock().unwrap().push(call.clone());

        let route = self.routes.iter().find(|r| {
            call.url.ends_with(r.path)
                && r.player.as_deref().map_or(true, |p| call.query_value("player") == Some(p))
        });

        match route {
            Some(route) => {
                thread::sleep(route.delay);
                route.outcome.clone()
            }
            None => Err(AppError::Transport {
                status: None,
                message: format!("no route for {}", call),
            }),
        }
    }
}

pub fn client(transport: MockTransport) -> ApexApiClient<MockTransport> {
    let config = ClientConfig::new("test-key")
        .unwrap()
        .with_base_url("http://mock.local")
        .unwrap();
    ApexApiClient::with_transport(config, transport)
}

pub fn player_body(name: &str, uid: u64, trackers: Value) -> Value {
    let mut all = Map::new();
    for legend in AllLegends::NAMES {
        all.insert(legend.to_string(), json!({ "ImgAssets": { "icon": "", "banner": "" } }));
    }

    json!({
        "global": {
            "name": name,
            "uid": uid,
            "platform": "PC",
            "level": 120,
            "rank": { "rankScore": 4000, "rankName": "Gold", "rankDiv": 3 }
        },
        "realtime": { "isOnline": 0, "lobbyState": "open" },
        "legends": {
            "selected": {
                "LegendName": "Wraith",
                "data": trackers,
                "gameInfo": { "badges": [] }
            },
            "all": all
        },
        "mozambiquehere_internal": {
            "isNewToDB": false,
            "APIAccessType": "BASIC",
            "rate_limit": { "max_per_second": 2, "current_req": "1" }
        },
        "total": { "kd": 1.25 }
    })
}
