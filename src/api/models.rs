use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Tracker and badge values come back either as numbers or as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            StatValue::Number(n) => write!(f, "{}", n),
            StatValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerObj {
    pub name: String,
    pub value: StatValue,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeObj {
    pub name: String,
    pub value: StatValue,
}

// Player

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub global: GlobalInfo,
    pub realtime: RealtimeInfo,
    pub legends: Legends,
    pub mozambiquehere_internal: InternalInfo,
    pub total: TotalStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalInfo {
    pub name: String,
    pub uid: u64,
    pub avatar: String,
    pub platform: String,
    pub level: i64,
    pub to_next_level_percent: f64,
    pub internal_update_count: i64,
    pub bans: Bans,
    pub rank: Rank,
    pub battlepass: Battlepass,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bans {
    pub is_active: bool,
    pub remaining_seconds: i64,
    #[serde(rename = "last_banReason")]
    pub last_ban_reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub rank_score: i64,
    pub rank_name: String,
    pub rank_div: i64,
    pub ladder_pos: i64,
    pub rank_img: String,
    pub ranked_season: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Battlepass {
    pub level: String,
    pub history: BattlepassHistory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BattlepassHistory {
    pub season1: i64,
    pub season2: i64,
    pub season3: i64,
    pub season4: i64,
    pub season5: i64,
    pub season6: i64,
    pub season7: i64,
    pub season8: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeInfo {
    pub lobby_state: String,
    pub is_online: i64,
    pub is_in_game: i64,
    pub can_join: i64,
    pub party_full: i64,
    pub selected_legend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legends {
    pub selected: Legend,
    pub all: AllLegends,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(rename = "LegendName")]
    pub legend_name: String,
    pub data: Vec<TrackerObj>,
    #[serde(rename = "gameInfo")]
    pub game_info: GameInfo,
    #[serde(rename = "ImgAssets")]
    pub img_assets: ImgAssets,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameInfo {
    pub skin: String,
    pub frame: String,
    pub pose: String,
    pub intro: String,
    pub badges: Vec<BadgeObj>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImgAssets {
    pub icon: String,
    pub banner: String,
}

/// Every legend the API reports, one mandatory field per legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllLegends {
    pub bangalore: Legend,
    pub bloodhound: Legend,
    pub lifeline: Legend,
    pub caustic: Legend,
    pub gibraltar: Legend,
    pub mirage: Legend,
    pub pathfinder: Legend,
    pub wraith: Legend,
    pub octane: Legend,
    pub wattson: Legend,
    pub crypto: Legend,
    pub revenant: Legend,
    pub loba: Legend,
    pub rampart: Legend,
    pub horizon: Legend,
    pub fuse: Legend,
}

impl AllLegends {
    pub const NAMES: [&'static str; 16] = [
        "Bangalore", "Bloodhound", "Lifeline", "Caustic", "Gibraltar", "Mirage", "Pathfinder",
        "Wraith", "Octane", "Wattson", "Crypto", "Revenant", "Loba", "Rampart", "Horizon", "Fuse",
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InternalInfo {
    #[serde(rename = "isNewToDB")]
    pub is_new_to_db: bool,
    #[serde(rename = "claimedBy")]
    pub claimed_by: String,
    #[serde(rename = "APIAccessType")]
    pub api_access_type: String,
    #[serde(rename = "ClusterID")]
    pub cluster_id: String,
    pub rate_limit: RateLimitSnapshot,
}

/// Rate-limit figures as reported by the remote service. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateLimitSnapshot {
    pub max_per_second: i64,
    pub current_req: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TotalStats {
    pub kd: f64,
}

// News

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApexNews {
    pub title: String,
    pub link: String,
    pub img: String,
    pub short_desc: String,
}

// Server status

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionDataObj {
    pub status: String,
    #[serde(rename = "HTTPCode")]
    pub http_code: i64,
    pub response_time: i64,
    pub query_timestamp: i64,
}

impl RegionDataObj {
    /// Stand-in for a region or service the remote left out.
    pub fn unknown() -> Self {
        RegionDataObj {
            status: "Unknown".to_string(),
            http_code: 0,
            response_time: 0,
            query_timestamp: 0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.status == "Unknown" && self.http_code == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionsObj {
    #[serde(rename = "EU-West")]
    pub eu_west: RegionDataObj,
    #[serde(rename = "EU-East")]
    pub eu_east: RegionDataObj,
    #[serde(rename = "US-West")]
    pub us_west: RegionDataObj,
    #[serde(rename = "US-Central")]
    pub us_central: RegionDataObj,
    #[serde(rename = "US-East")]
    pub us_east: RegionDataObj,
    #[serde(rename = "SouthAmerica")]
    pub south_america: RegionDataObj,
    #[serde(rename = "Asia")]
    pub asia: RegionDataObj,
}

impl RegionsObj {
    pub const KEYS: [&'static str; 7] = [
        "EU-West", "EU-East", "US-West", "US-Central", "US-East", "SouthAmerica", "Asia",
    ];

    pub fn unknown() -> Self {
        RegionsObj {
            eu_west: RegionDataObj::unknown(),
            eu_east: RegionDataObj::unknown(),
            us_west: RegionDataObj::unknown(),
            us_central: RegionDataObj::unknown(),
            us_east: RegionDataObj::unknown(),
            south_america: RegionDataObj::unknown(),
            asia: RegionDataObj::unknown(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RegionDataObj)> {
        let regions = [
            &self.eu_west, &self.eu_east, &self.us_west, &self.us_central, &self.us_east,
            &self.south_america, &self.asia,
        ];
        Self::KEYS.into_iter().zip(regions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServersObj {
    #[serde(rename = "Origin_login")]
    pub origin_login: RegionsObj,
    #[serde(rename = "EA_novafusion")]
    pub ea_novafusion: RegionsObj,
    #[serde(rename = "EA_accounts")]
    pub ea_accounts: RegionsObj,
    #[serde(rename = "ApexOauth_PC")]
    pub apex_oauth_pc: RegionsObj,
    #[serde(rename = "ApexOauth_PS4")]
    pub apex_oauth_ps4: RegionsObj,
    #[serde(rename = "ApexOauth_X1")]
    pub apex_oauth_x1: RegionsObj,
    #[serde(rename = "ApexOauth_Steam")]
    pub apex_oauth_steam: RegionsObj,
    #[serde(rename = "ApexOauth_Crossplay")]
    pub apex_oauth_crossplay: RegionsObj,
    #[serde(rename = "Mozambiquehere_StatsAPI")]
    pub mozambiquehere_stats_api: RegionsObj,
}

impl ServersObj {
    pub const KEYS: [&'static str; 9] = [
        "Origin_login",
        "EA_novafusion",
        "EA_accounts",
        "ApexOauth_PC",
        "ApexOauth_PS4",
        "ApexOauth_X1",
        "ApexOauth_Steam",
        "ApexOauth_Crossplay",
        "Mozambiquehere_StatsAPI",
    ];

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RegionsObj)> {
        let services = [
            &self.origin_login, &self.ea_novafusion, &self.ea_accounts, &self.apex_oauth_pc,
            &self.apex_oauth_ps4, &self.apex_oauth_x1, &self.apex_oauth_steam,
            &self.apex_oauth_crossplay, &self.mozambiquehere_stats_api,
        ];
        Self::KEYS.into_iter().zip(services)
    }
}

// Map rotation

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentMap {
    pub start: i64,
    pub end: i64,
    #[serde(rename = "readableDate_start")]
    pub readable_date_start: String,
    #[serde(rename = "readableDate_end")]
    pub readable_date_end: String,
    pub map: String,
    #[serde(rename = "DurationInSecs")]
    pub duration_in_secs: i64,
    #[serde(rename = "DurationInMinutes")]
    pub duration_in_minutes: i64,
    #[serde(rename = "remainingSecs")]
    pub remaining_secs: i64,
    #[serde(rename = "remainingMins")]
    pub remaining_mins: i64,
    #[serde(rename = "remainingTimer")]
    pub remaining_timer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextMap {
    pub start: i64,
    pub end: i64,
    #[serde(rename = "readableDate_start")]
    pub readable_date_start: String,
    #[serde(rename = "readableDate_end")]
    pub readable_date_end: String,
    pub map: String,
    #[serde(rename = "DurationInSecs")]
    pub duration_in_secs: i64,
    #[serde(rename = "DurationInMinutes")]
    pub duration_in_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRotationData {
    pub current: CurrentMap,
    pub next: NextMap,
}

// Origin

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginData {
    pub name: String,
    pub uid: String,
    pub pid: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OriginLookup {
    Single(OriginData),
    All(Vec<OriginData>),
}

impl OriginLookup {
    pub fn candidates(&self) -> &[OriginData] {
        match self {
            OriginLookup::Single(one) => std::slice::from_ref(one),
            OriginLookup::All(all) => all,
        }
    }
}

// Comparison

/// One tracker key with both players' figures; `None` where a player lacks it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedTracker {
    pub name: String,
    pub key: String,
    pub value: [Option<StatValue>; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedBadge {
    pub name: String,
    pub value: [Option<StatValue>; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonData {
    pub trackers: Vec<ComparedTracker>,
    pub badges: Vec<ComparedBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedData {
    pub players: [Player; 2],
    pub data: ComparisonData,
}

// Pass-through payloads

/// Match history payload; its shape depends on the action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HistoryData(pub Value);

/// Deprecated `/gamedata` payload, kept untyped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GameData(pub Value);
