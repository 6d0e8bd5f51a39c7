//! Converts raw JSON bodies into the typed models, one field at a time.
//!
//! Numeric fields accept numbers or numeric-looking strings, text fields
//! accept strings or numbers, booleans are strict. Anything else is reported
//! as a malformed response naming the JSON path.

use crate::api::models::*;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

/// Slack tolerated between `current.end` and `next.start` before warning.
const ROTATION_GAP_TOLERANCE_SECS: u64 = 60;

struct Fields<'a> {
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value, path: &str) -> Result<Self, AppError> {
        match value {
            Value::Object(map) => Ok(Fields {
                path: path.to_string(),
                map,
            }),
            _ => Err(AppError::malformed(display_path(path), "object")),
        }
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    // JSON null is treated the same as an absent key.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn require(&self, key: &str) -> Result<&'a Value, AppError> {
        self.get(key)
            .ok_or_else(|| AppError::malformed(&self.path_of(key), "a value (field is missing)"))
    }

    fn object(&self, key: &str) -> Result<Fields<'a>, AppError> {
        Fields::new(self.require(key)?, &self.path_of(key))
    }

    fn object_opt(&self, key: &str) -> Result<Option<Fields<'a>>, AppError> {
        self.get(key)
            .map(|v| Fields::new(v, &self.path_of(key)))
            .transpose()
    }

    fn string(&self, key: &str) -> Result<String, AppError> {
        let value = self.require(key)?;
        as_text(value).ok_or_else(|| AppError::malformed(&self.path_of(key), "string"))
    }

    fn string_or_default(&self, key: &str) -> Result<String, AppError> {
        match self.get(key) {
            Some(_) => self.string(key),
            None => Ok(String::new()),
        }
    }

    fn int(&self, key: &str) -> Result<i64, AppError> {
        let value = self.require(key)?;
        as_int(value).ok_or_else(|| AppError::malformed(&self.path_of(key), "integer"))
    }

    fn int_or(&self, key: &str, default: i64) -> Result<i64, AppError> {
        match self.get(key) {
            Some(_) => self.int(key),
            None => Ok(default),
        }
    }

    fn float_or_default(&self, key: &str) -> Result<f64, AppError> {
        match self.get(key) {
            Some(value) => {
                as_float(value).ok_or_else(|| AppError::malformed(&self.path_of(key), "number"))
            }
            None => Ok(0.0),
        }
    }

    fn bool_or_default(&self, key: &str) -> Result<bool, AppError> {
        match self.get(key) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(AppError::malformed(&self.path_of(key), "boolean")),
            None => Ok(false),
        }
    }

    fn array_or_empty(&self, key: &str) -> Result<&'a [Value], AppError> {
        match self.get(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(AppError::malformed(&self.path_of(key), "array")),
            None => Ok(&[]),
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(whole_in_range)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole_in_range))
        }
        _ => None,
    }
}

// `as` would saturate out-of-range floats to i64::MIN/MAX.
fn whole_in_range(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn as_stat(value: &Value) -> Option<StatValue> {
    match value {
        Value::Number(n) => n.as_f64().map(StatValue::Number),
        Value::String(s) => Some(StatValue::Text(s.clone())),
        _ => None,
    }
}

/// The service reports failures such as unknown players as a 200 with an
/// `Error` member.
fn check_remote_error(value: &Value) -> Result<(), AppError> {
    if let Some(message) = value.get("Error") {
        let message = as_text(message).unwrap_or_else(|| message.to_string());
        return Err(AppError::Api(message));
    }
    Ok(())
}

// Player

pub fn normalize_player(value: &Value) -> Result<Player, AppError> {
    check_remote_error(value)?;
    let root = Fields::new(value, "")?;

    let global = global_info(&root.object("global")?)?;

    let realtime = match root.object_opt("realtime")? {
        Some(rt) => RealtimeInfo {
            lobby_state: rt.string_or_default("lobbyState")?,
            is_online: rt.int_or("isOnline", 0)?,
            is_in_game: rt.int_or("isInGame", 0)?,
            can_join: rt.int_or("canJoin", 0)?,
            party_full: rt.int_or("partyFull", 0)?,
            selected_legend: rt.string_or_default("selectedLegend")?,
        },
        None => RealtimeInfo::default(),
    };

    let legends_obj = root.object("legends")?;
    let legends = Legends {
        selected: legend(&legends_obj.object("selected")?, "")?,
        all: all_legends(&legends_obj.object("all")?)?,
    };

    let internal = match root.object_opt("mozambiquehere_internal")? {
        Some(mi) => InternalInfo {
            is_new_to_db: mi.bool_or_default("isNewToDB")?,
            claimed_by: mi.string_or_default("claimedBy")?,
            api_access_type: mi.string_or_default("APIAccessType")?,
            cluster_id: mi.string_or_default("ClusterID")?,
            rate_limit: match mi.object_opt("rate_limit")? {
                Some(rl) => RateLimitSnapshot {
                    max_per_second: rl.int_or("max_per_second", 0)?,
                    current_req: rl.string_or_default("current_req")?,
                },
                None => RateLimitSnapshot::default(),
            },
        },
        None => InternalInfo::default(),
    };

    let total = match root.object_opt("total")? {
        Some(total) => TotalStats { kd: total_kd(&total)? },
        None => TotalStats::default(),
    };

    Ok(Player {
        global,
        realtime,
        legends,
        mozambiquehere_internal: internal,
        total,
    })
}

fn global_info(g: &Fields<'_>) -> Result<GlobalInfo, AppError> {
    let uid = match g.require("uid")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| AppError::malformed(&g.path_of("uid"), "unsigned integer"))?;

    let bans = match g.object_opt("bans")? {
        Some(b) => Bans {
            is_active: b.bool_or_default("isActive")?,
            remaining_seconds: b.int_or("remainingSeconds", 0)?,
            last_ban_reason: b.string_or_default("last_banReason")?,
        },
        None => Bans::default(),
    };

    let rank = match g.object_opt("rank")? {
        Some(r) => Rank {
            rank_score: r.int_or("rankScore", 0)?,
            rank_name: r.string_or_default("rankName")?,
            rank_div: r.int_or("rankDiv", 0)?,
            ladder_pos: r.int_or("ladderPos", 0)?,
            rank_img: r.string_or_default("rankImg")?,
            ranked_season: r.string_or_default("rankedSeason")?,
        },
        None => Rank::default(),
    };

    let battlepass = match g.object_opt("battlepass")? {
        Some(bp) => Battlepass {
            level: bp.string_or_default("level")?,
            history: match bp.object_opt("history")? {
                Some(h) => BattlepassHistory {
                    season1: h.int_or("season1", 0)?,
                    season2: h.int_or("season2", 0)?,
                    season3: h.int_or("season3", 0)?,
                    season4: h.int_or("season4", 0)?,
                    season5: h.int_or("season5", 0)?,
                    season6: h.int_or("season6", 0)?,
                    season7: h.int_or("season7", 0)?,
                    season8: h.int_or("season8", 0)?,
                },
                None => BattlepassHistory::default(),
            },
        },
        None => Battlepass::default(),
    };

    Ok(GlobalInfo {
        name: g.string("name")?,
        uid,
        avatar: g.string_or_default("avatar")?,
        platform: g.string_or_default("platform")?,
        level: g.int_or("level", 0)?,
        to_next_level_percent: g.float_or_default("toNextLevelPercent")?,
        internal_update_count: g.int_or("internalUpdateCount", 0)?,
        bans,
        rank,
        battlepass,
    })
}

// Some API versions wrap the figure as `{ "value": .., "name": "KD" }`.
fn total_kd(total: &Fields<'_>) -> Result<f64, AppError> {
    match total.get("kd") {
        Some(Value::Object(_)) => total.object("kd")?.float_or_default("value"),
        _ => total.float_or_default("kd"),
    }
}

fn legend(l: &Fields<'_>, default_name: &str) -> Result<Legend, AppError> {
    let legend_name = match l.get("LegendName") {
        Some(_) => l.string("LegendName")?,
        None => default_name.to_string(),
    };

    let data = l
        .array_or_empty("data")?
        .iter()
        .enumerate()
        .map(|(idx, item)| tracker(item, &format!("{}[{}]", l.path_of("data"), idx)))
        .collect::<Result<Vec<_>, _>>()?;

    let game_info = match l.object_opt("gameInfo")? {
        Some(gi) => GameInfo {
            skin: gi.string_or_default("skin")?,
            frame: gi.string_or_default("frame")?,
            pose: gi.string_or_default("pose")?,
            intro: gi.string_or_default("intro")?,
            badges: gi
                .array_or_empty("badges")?
                .iter()
                .enumerate()
                .map(|(idx, item)| badge(item, &format!("{}[{}]", gi.path_of("badges"), idx)))
                .collect::<Result<Vec<_>, _>>()?,
        },
        None => GameInfo::default(),
    };

    let img_assets = match l.object_opt("ImgAssets")? {
        Some(img) => ImgAssets {
            icon: img.string_or_default("icon")?,
            banner: img.string_or_default("banner")?,
        },
        None => ImgAssets::default(),
    };

    Ok(Legend {
        legend_name,
        data,
        game_info,
        img_assets,
    })
}

fn tracker(value: &Value, path: &str) -> Result<TrackerObj, AppError> {
    let t = Fields::new(value, path)?;
    Ok(TrackerObj {
        name: t.string("name")?,
        value: stat(&t, "value")?,
        key: t.string("key")?,
    })
}

fn badge(value: &Value, path: &str) -> Result<BadgeObj, AppError> {
    let b = Fields::new(value, path)?;
    Ok(BadgeObj {
        name: b.string("name")?,
        value: stat(&b, "value")?,
    })
}

fn stat(f: &Fields<'_>, key: &str) -> Result<StatValue, AppError> {
    as_stat(f.require(key)?).ok_or_else(|| AppError::malformed(&f.path_of(key), "string or number"))
}

fn all_legends(all: &Fields<'_>) -> Result<AllLegends, AppError> {
    let named = |name: &str| legend(&all.object(name)?, name);
    Ok(AllLegends {
        bangalore: named("Bangalore")?,
        bloodhound: named("Bloodhound")?,
        lifeline: named("Lifeline")?,
        caustic: named("Caustic")?,
        gibraltar: named("Gibraltar")?,
        mirage: named("Mirage")?,
        pathfinder: named("Pathfinder")?,
        wraith: named("Wraith")?,
        octane: named("Octane")?,
        wattson: named("Wattson")?,
        crypto: named("Crypto")?,
        revenant: named("Revenant")?,
        loba: named("Loba")?,
        rampart: named("Rampart")?,
        horizon: named("Horizon")?,
        fuse: named("Fuse")?,
    })
}

// News

pub fn normalize_news(value: &Value) -> Result<Vec<ApexNews>, AppError> {
    check_remote_error(value)?;
    let items = value
        .as_array()
        .ok_or_else(|| AppError::malformed("<root>", "array"))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let n = Fields::new(item, &format!("[{}]", idx))?;
            Ok(ApexNews {
                title: n.string("title")?,
                link: n.string("link")?,
                img: n.string("img")?,
                short_desc: n.string("short_desc")?,
            })
        })
        .collect()
}

// Server status

pub fn normalize_servers(value: &Value) -> Result<ServersObj, AppError> {
    check_remote_error(value)?;
    let root = Fields::new(value, "")?;
    let service = |key: &str| regions(&root, key);

    Ok(ServersObj {
        origin_login: service("Origin_login")?,
        ea_novafusion: service("EA_novafusion")?,
        ea_accounts: service("EA_accounts")?,
        apex_oauth_pc: service("ApexOauth_PC")?,
        apex_oauth_ps4: service("ApexOauth_PS4")?,
        apex_oauth_x1: service("ApexOauth_X1")?,
        apex_oauth_steam: service("ApexOauth_Steam")?,
        apex_oauth_crossplay: service("ApexOauth_Crossplay")?,
        mozambiquehere_stats_api: service("Mozambiquehere_StatsAPI")?,
    })
}

fn regions(root: &Fields<'_>, service: &str) -> Result<RegionsObj, AppError> {
    let Some(s) = root.object_opt(service)? else {
        warn!(service = service, "service missing from status report, marking as unknown");
        return Ok(RegionsObj::unknown());
    };
    let region = |key: &str| region_data(&s, key);

    Ok(RegionsObj {
        eu_west: region("EU-West")?,
        eu_east: region("EU-East")?,
        us_west: region("US-West")?,
        us_central: region("US-Central")?,
        us_east: region("US-East")?,
        south_america: region("SouthAmerica")?,
        asia: region("Asia")?,
    })
}

fn region_data(service: &Fields<'_>, key: &str) -> Result<RegionDataObj, AppError> {
    let Some(r) = service.object_opt(key)? else {
        warn!(service = %service.path, region = key, "region missing from status report, marking as unknown");
        return Ok(RegionDataObj::unknown());
    };

    let status = match r.get("Status") {
        Some(_) => r.string("Status")?,
        None => "Unknown".to_string(),
    };

    Ok(RegionDataObj {
        status,
        http_code: r.int_or("HTTPCode", 0)?,
        response_time: r.int_or("ResponseTime", 0)?,
        query_timestamp: r.int_or("QueryTimestamp", 0)?,
    })
}

// Map rotation

/// Remaining-time fields are computed against `now`, not against the time
/// the request was sent.
pub fn normalize_map_rotation(value: &Value, now: DateTime<Utc>) -> Result<MapRotationData, AppError> {
    check_remote_error(value)?;
    let root = Fields::new(value, "")?;

    // Newer API versions nest the battle royale schedule.
    let schedule = if root.get("current").is_none() && root.get("battle_royale").is_some() {
        root.object("battle_royale")?
    } else {
        root
    };

    let current = schedule.object("current")?;
    let next = schedule.object("next")?;

    let cur = rotation_slot(&current)?;
    let nxt = rotation_slot(&next)?;

    if cur.end.abs_diff(nxt.start) > ROTATION_GAP_TOLERANCE_SECS {
        warn!(
            current_end = cur.end,
            next_start = nxt.start,
            "map rotation schedule is not contiguous"
        );
    }

    let remaining_secs = cur
        .end
        .checked_sub(now.timestamp())
        .ok_or_else(|| AppError::malformed(&current.path_of("end"), "timestamp difference in range"))?
        .max(0);

    Ok(MapRotationData {
        current: CurrentMap {
            start: cur.start,
            end: cur.end,
            readable_date_start: cur.readable_start,
            readable_date_end: cur.readable_end,
            map: cur.map,
            duration_in_secs: cur.duration_secs,
            duration_in_minutes: cur.duration_mins,
            remaining_secs,
            remaining_mins: remaining_secs / 60,
            remaining_timer: format_timer(remaining_secs),
        },
        next: NextMap {
            start: nxt.start,
            end: nxt.end,
            readable_date_start: nxt.readable_start,
            readable_date_end: nxt.readable_end,
            map: nxt.map,
            duration_in_secs: nxt.duration_secs,
            duration_in_minutes: nxt.duration_mins,
        },
    })
}

struct RotationSlot {
    start: i64,
    end: i64,
    readable_start: String,
    readable_end: String,
    map: String,
    duration_secs: i64,
    duration_mins: i64,
}

fn rotation_slot(slot: &Fields<'_>) -> Result<RotationSlot, AppError> {
    let start = slot.int("start")?;
    let end = slot.int("end")?;
    if end < start {
        return Err(AppError::malformed(&slot.path_of("end"), "a timestamp not before `start`"));
    }

    let readable = |key: &str, ts: i64| -> Result<String, AppError> {
        match slot.get(key) {
            Some(_) => slot.string(key),
            None => Ok(readable_date(ts)),
        }
    };

    let span = end
        .checked_sub(start)
        .ok_or_else(|| AppError::malformed(&slot.path_of("end"), "timestamp difference in range"))?;
    let duration_secs = slot.int_or("DurationInSecs", span)?;

    Ok(RotationSlot {
        start,
        end,
        readable_start: readable("readableDate_start", start)?,
        readable_end: readable("readableDate_end", end)?,
        map: slot.string("map")?,
        duration_secs,
        duration_mins: slot.int_or("DurationInMinutes", duration_secs / 60)?,
    })
}

fn readable_date(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn format_timer(secs: i64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

// Origin

pub fn normalize_origin(value: &Value, show_all_hits: bool) -> Result<OriginLookup, AppError> {
    let candidates = match value {
        Value::Object(_) => {
            check_remote_error(value)?;
            vec![origin_data(value, "")?]
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| origin_data(item, &format!("[{}]", idx)))
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(AppError::malformed("<root>", "object or array")),
    };

    if show_all_hits {
        return Ok(OriginLookup::All(candidates));
    }

    candidates
        .into_iter()
        .next()
        .map(OriginLookup::Single)
        .ok_or_else(|| AppError::malformed("<root>", "at least one candidate"))
}

fn origin_data(value: &Value, path: &str) -> Result<OriginData, AppError> {
    let o = Fields::new(value, path)?;
    Ok(OriginData {
        name: o.string("name")?,
        uid: o.string("uid")?,
        pid: o.string("pid")?,
        avatar: o.string_or_default("avatar")?,
    })
}

// Pass-through payloads

pub fn normalize_history(value: Value) -> Result<HistoryData, AppError> {
    match value {
        Value::Object(_) => {
            check_remote_error(&value)?;
            Ok(HistoryData(value))
        }
        Value::Array(_) => Ok(HistoryData(value)),
        _ => Err(AppError::malformed("<root>", "object or array")),
    }
}

pub fn normalize_gamedata(value: Value) -> Result<GameData, AppError> {
    check_remote_error(&value)?;
    match value {
        Value::Object(_) => Ok(GameData(value)),
        _ => Err(AppError::malformed("<root>", "object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn legend_json(name: &str) -> Value {
        json!({
            "LegendName": name,
            "data": [
                { "name": "BR Kills", "value": 120, "key": "kills" },
                { "name": "BR Damage", "value": "4500", "key": "damage" }
            ],
            "gameInfo": {
                "skin": "Original", "frame": "", "pose": "", "intro": "",
                "badges": [ { "name": "Wake Up Call", "value": 2 } ]
            },
            "ImgAssets": { "icon": "icon.png", "banner": "banner.png" }
        })
    }

    fn player_json() -> Value {
        let mut all = Map::new();
        for name in AllLegends::NAMES {
            all.insert(name.to_string(), json!({ "ImgAssets": { "icon": "", "banner": "" } }));
        }
        json!({
            "global": {
                "name": "Wraith123",
                "uid": "1000575543977",
                "platform": "PC",
                "level": 500,
                "toNextLevelPercent": 47,
                "bans": { "isActive": false, "remainingSeconds": 0, "last_banReason": "NONE" },
                "rank": { "rankScore": "9120", "rankName": "Diamond", "rankDiv": 2 },
                "battlepass": { "level": 110, "history": { "season1": 97 } }
            },
            "realtime": { "lobbyState": "open", "isOnline": 1, "selectedLegend": "Wraith" },
            "legends": { "selected": legend_json("Wraith"), "all": all },
            "mozambiquehere_internal": {
                "isNewToDB": false,
                "claimedBy": "-1",
                "APIAccessType": "BASIC",
                "ClusterID": "2",
                "rate_limit": { "max_per_second": "2", "current_req": 1 }
            },
            "total": { "kd": { "value": "1.52", "name": "KD" } }
        })
    }

    #[test]
    fn player_coerces_documented_fields() {
        let player = normalize_player(&player_json()).unwrap();

        assert_eq!(player.global.uid, 1000575543977);
        assert_eq!(player.global.name, "Wraith123");
        assert_eq!(player.global.rank.rank_score, 9120);
        assert_eq!(player.global.battlepass.level, "110");
        assert_eq!(player.global.battlepass.history.season1, 97);
        assert_eq!(player.global.battlepass.history.season2, 0);
        assert_eq!(player.mozambiquehere_internal.rate_limit.max_per_second, 2);
        assert_eq!(player.mozambiquehere_internal.rate_limit.current_req, "1");
        assert_eq!(player.total.kd, 1.52);

        let selected = &player.legends.selected;
        assert_eq!(selected.legend_name, "Wraith");
        assert_eq!(selected.data[1].value, StatValue::Text("4500".to_string()));
        assert_eq!(selected.game_info.badges[0].value, StatValue::Number(2.0));
        assert_eq!(player.legends.all.fuse.legend_name, "Fuse");
    }

    #[test]
    fn player_requires_uid_and_name() {
        let mut body = player_json();
        body["global"].as_object_mut().unwrap().remove("uid");
        assert_eq!(
            normalize_player(&body).unwrap_err(),
            AppError::malformed("global.uid", "a value (field is missing)")
        );

        let mut body = player_json();
        body["global"].as_object_mut().unwrap().remove("name");
        assert!(matches!(
            normalize_player(&body),
            Err(AppError::MalformedResponse { path, .. }) if path == "global.name"
        ));
    }

    #[test]
    fn player_rejects_type_drift() {
        let mut body = player_json();
        body["global"]["level"] = json!("five hundred");
        assert!(matches!(
            normalize_player(&body),
            Err(AppError::MalformedResponse { path, .. }) if path == "global.level"
        ));

        let mut body = player_json();
        body["global"]["bans"]["isActive"] = json!("false");
        assert!(matches!(
            normalize_player(&body),
            Err(AppError::MalformedResponse { path, .. }) if path == "global.bans.isActive"
        ));

        let mut body = player_json();
        body["legends"]["selected"]["data"][0]["value"] = json!([1, 2]);
        assert!(matches!(
            normalize_player(&body),
            Err(AppError::MalformedResponse { path, .. }) if path == "legends.selected.data[0].value"
        ));
    }

    #[test]
    fn player_rejects_out_of_range_integers() {
        for level in [json!(1e300), json!("1e30"), json!(-1e300)] {
            let mut body = player_json();
            body["global"]["level"] = level;
            assert!(matches!(
                normalize_player(&body),
                Err(AppError::MalformedResponse { path, .. }) if path == "global.level"
            ));
        }

        let mut body = player_json();
        body["global"]["level"] = json!(12.0);
        assert_eq!(normalize_player(&body).unwrap().global.level, 12);
    }

    #[test]
    fn player_missing_legend_is_malformed() {
        let mut body = player_json();
        body["legends"]["all"].as_object_mut().unwrap().remove("Loba");
        assert!(matches!(
            normalize_player(&body),
            Err(AppError::MalformedResponse { path, .. }) if path == "legends.all.Loba"
        ));
    }

    #[test]
    fn remote_error_body_is_surfaced() {
        let body = json!({ "Error": "Player not found. Try again?" });
        assert_eq!(
            normalize_player(&body).unwrap_err(),
            AppError::Api("Player not found. Try again?".to_string())
        );
        assert!(matches!(normalize_player(&json!([])), Err(AppError::MalformedResponse { .. })));
    }

    #[test]
    fn news_keeps_order() {
        let body = json!([
            { "title": "A", "link": "a", "img": "a.png", "short_desc": "first" },
            { "title": "B", "link": "b", "img": "b.png", "short_desc": "second" }
        ]);
        let news = normalize_news(&body).unwrap();
        assert_eq!(news.len(), 2);
        assert_eq!(news[0].title, "A");
        assert_eq!(news[1].short_desc, "second");

        let bad = json!([{ "title": "A", "link": "a", "img": "a.png" }]);
        assert!(matches!(
            normalize_news(&bad),
            Err(AppError::MalformedResponse { path, .. }) if path == "[0].short_desc"
        ));
        assert!(normalize_news(&json!({})).is_err());
    }

    fn region_json(status: &str) -> Value {
        json!({ "Status": status, "HTTPCode": 200, "ResponseTime": 45, "QueryTimestamp": 1700000000 })
    }

    fn servers_json() -> Value {
        let mut root = Map::new();
        for service in ServersObj::KEYS {
            let mut regions = Map::new();
            for region in RegionsObj::KEYS {
                regions.insert(region.to_string(), region_json("UP"));
            }
            root.insert(service.to_string(), Value::Object(regions));
        }
        root.insert("selfCoreTest".to_string(), json!({ "Status-website": {} }));
        Value::Object(root)
    }

    #[test]
    fn servers_fill_missing_service() {
        let mut body = servers_json();
        body.as_object_mut().unwrap().remove("EA_accounts");

        let servers = normalize_servers(&body).unwrap();
        assert_eq!(servers.ea_accounts, RegionsObj::unknown());
        assert_eq!(servers.ea_accounts.asia.status, "Unknown");
        assert_eq!(servers.ea_accounts.asia.http_code, 0);
        assert_eq!(servers.origin_login.eu_west.status, "UP");
        assert_eq!(servers.origin_login.eu_west.response_time, 45);
    }

    #[test]
    fn servers_fill_missing_region() {
        let mut body = servers_json();
        body["ApexOauth_PC"].as_object_mut().unwrap().remove("Asia");

        let servers = normalize_servers(&body).unwrap();
        assert!(servers.apex_oauth_pc.asia.is_unknown());
        assert!(!servers.apex_oauth_pc.us_east.is_unknown());
    }

    #[test]
    fn servers_require_object() {
        assert!(matches!(
            normalize_servers(&json!("down")),
            Err(AppError::MalformedResponse { .. })
        ));
    }

    fn rotation_json(base: i64) -> Value {
        json!({
            "current": {
                "start": base, "end": base + 5400,
                "readableDate_start": "x", "readableDate_end": "y",
                "map": "World's Edge", "DurationInSecs": 5400, "DurationInMinutes": 90,
                "remainingSecs": 999, "remainingMins": 16, "remainingTimer": "00:16:39"
            },
            "next": { "start": base + 5400, "end": base + 10800, "map": "Storm Point" }
        })
    }

    #[test]
    fn map_rotation_remaining_tracks_clock() {
        let base = 1_700_000_000;
        let body = rotation_json(base);
        let now = Utc.timestamp_opt(base + 600, 0).unwrap();

        let first = normalize_map_rotation(&body, now).unwrap();
        let later = normalize_map_rotation(&body, now + Duration::seconds(60)).unwrap();

        assert_eq!(first.current.remaining_secs, 4800);
        assert_eq!(first.current.remaining_mins, 80);
        assert_eq!(first.current.remaining_timer, "01:20:00");
        assert_eq!(first.current.remaining_secs - later.current.remaining_secs, 60);
        assert_eq!(first.current.end, first.next.start);
    }

    #[test]
    fn map_rotation_derives_missing_fields() {
        let base = 1_700_000_000;
        let body = json!({ "battle_royale": rotation_json(base) });
        let after_end = Utc.timestamp_opt(base + 9000, 0).unwrap();

        let rotation = normalize_map_rotation(&body, after_end).unwrap();
        assert_eq!(rotation.current.remaining_secs, 0);
        assert_eq!(rotation.current.remaining_timer, "00:00:00");
        assert_eq!(rotation.next.duration_in_secs, 5400);
        assert_eq!(rotation.next.duration_in_minutes, 90);
        assert_eq!(rotation.next.readable_date_start, "2023-11-14 23:43:20");
    }

    #[test]
    fn map_rotation_requires_current() {
        let body = json!({ "next": { "start": 1, "end": 2, "map": "a" } });
        assert!(matches!(
            normalize_map_rotation(&body, Utc::now()),
            Err(AppError::MalformedResponse { path, .. }) if path == "current"
        ));
    }

    #[test]
    fn map_rotation_rejects_unrepresentable_spans() {
        let body = json!({
            "current": { "start": i64::MIN, "end": 10, "map": "a" },
            "next": { "start": 10, "end": 20, "map": "b" }
        });
        assert!(matches!(
            normalize_map_rotation(&body, Utc::now()),
            Err(AppError::MalformedResponse { path, .. }) if path == "current.end"
        ));

        let body = json!({
            "current": { "start": i64::MIN, "end": i64::MIN, "map": "a" },
            "next": { "start": i64::MIN, "end": i64::MIN, "map": "b" }
        });
        assert!(matches!(
            normalize_map_rotation(&body, Utc::now()),
            Err(AppError::MalformedResponse { path, .. }) if path == "current.end"
        ));
    }

    #[test]
    fn map_rotation_extreme_gap_is_only_logged() {
        let body = json!({
            "current": { "start": 0, "end": i64::MAX, "map": "a" },
            "next": { "start": -10, "end": 0, "map": "b" }
        });
        let rotation = normalize_map_rotation(&body, Utc::now()).unwrap();
        assert_eq!(rotation.current.duration_in_secs, i64::MAX);
        assert!(rotation.current.remaining_secs > 0);
        assert_eq!(rotation.next.duration_in_secs, 10);
    }

    fn origin_json(name: &str, uid: i64) -> Value {
        json!({ "name": name, "uid": uid, "pid": format!("pid-{}", uid), "avatar": "" })
    }

    #[test]
    fn origin_first_or_all() {
        let body = json!([
            origin_json("Wraith123", 1),
            origin_json("Wraith1234", 2),
            origin_json("Wraith12", 3)
        ]);

        match normalize_origin(&body, false).unwrap() {
            OriginLookup::Single(first) => {
                assert_eq!(first.name, "Wraith123");
                assert_eq!(first.uid, "1");
            }
            other => panic!("expected a single candidate, got {:?}", other),
        }

        let all = normalize_origin(&body, true).unwrap();
        let names: Vec<_> = all.candidates().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Wraith123", "Wraith1234", "Wraith12"]);
    }

    #[test]
    fn origin_empty_results() {
        assert_eq!(normalize_origin(&json!([]), true).unwrap(), OriginLookup::All(vec![]));
        assert!(matches!(
            normalize_origin(&json!([]), false),
            Err(AppError::MalformedResponse { .. })
        ));
        let single = normalize_origin(&origin_json("solo", 9), true).unwrap();
        assert_eq!(single.candidates().len(), 1);
    }

    #[test]
    fn history_and_gamedata_shapes() {
        assert!(normalize_history(json!([{ "eventType": "kill" }])).is_ok());
        assert!(normalize_history(json!({ "status": "ok" })).is_ok());
        assert!(normalize_history(json!(12)).is_err());
        assert_eq!(
            normalize_history(json!({ "Error": "No access" })).unwrap_err(),
            AppError::Api("No access".to_string())
        );
        assert!(normalize_gamedata(json!({ "r301": {} })).is_ok());
        assert!(normalize_gamedata(json!([])).is_err());
    }
}
