use apex_stats::analysis::compare::difference;
use apex_stats::api::models::*;
use colored::*;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct TrackerRow {
    tracker: String,
    value: String,
}

#[derive(Tabled)]
struct NewsRow {
    #[tabled(rename = "#")]
    number: String,
    title: String,
    link: String,
}

#[derive(Tabled)]
struct ServerRow {
    service: String,
    #[tabled(rename = "EU-W")]
    eu_west: String,
    #[tabled(rename = "EU-E")]
    eu_east: String,
    #[tabled(rename = "US-W")]
    us_west: String,
    #[tabled(rename = "US-C")]
    us_central: String,
    #[tabled(rename = "US-E")]
    us_east: String,
    #[tabled(rename = "SA")]
    south_america: String,
    asia: String,
}

#[derive(Tabled)]
struct OriginRow {
    name: String,
    uid: String,
    pid: String,
}

#[derive(Tabled)]
struct CompareRow {
    stat: String,
    first: String,
    second: String,
    diff: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn header(title: &str, width: usize) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(width).cyan());
}

pub fn display_player(player: &Player) {
    let global = &player.global;
    header(
        &format!("🎮 {} ({}) - UID {}", global.name, global.platform, global.uid),
        60,
    );

    println!("{} {}", "Level:".bold(), global.level);
    println!(
        "{} {} {} ({} RP)",
        "Rank:".bold(),
        global.rank.rank_name,
        global.rank.rank_div,
        global.rank.rank_score
    );
    println!("{} {:.2}", "K/D:".bold(), player.total.kd);

    let online = if player.realtime.is_online == 1 {
        "online".green().to_string()
    } else {
        "offline".red().to_string()
    };
    println!("{} {} ({})", "Status:".bold(), online, player.realtime.lobby_state);

    if global.bans.is_active {
        println!(
            "  {} Banned: {} ({}s remaining)",
            "⚠️".red(),
            global.bans.last_ban_reason,
            global.bans.remaining_seconds
        );
    }

    let selected = &player.legends.selected;
    println!("\n{} {}", "Selected legend:".bold().yellow(), selected.legend_name);

    if selected.data.is_empty() {
        println!("{}", "No trackers equipped".yellow());
    } else {
        let rows: Vec<TrackerRow> = selected
            .data
            .iter()
            .map(|t| TrackerRow {
                tracker: t.name.clone(),
                value: t.value.to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }

    let rl = &player.mozambiquehere_internal.rate_limit;
    println!(
        "\n{} {} ({} req/s max, current {})\n",
        "API access:".dimmed(),
        player.mozambiquehere_internal.api_access_type.dimmed(),
        rl.max_per_second,
        rl.current_req
    );
}

pub fn display_news(news: &[ApexNews]) {
    header("📰 APEX LEGENDS NEWS", 80);

    if news.is_empty() {
        println!("{}", "No news available".yellow());
        return;
    }

    let rows: Vec<NewsRow> = news
        .iter()
        .enumerate()
        .map(|(idx, n)| NewsRow {
            number: format!("{}", idx + 1),
            title: n.title.clone(),
            link: n.link.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn status_cell(region: &RegionDataObj) -> String {
    match region.status.as_str() {
        "UP" => "UP".green().to_string(),
        "SLOW" => "SLOW".yellow().to_string(),
        "DOWN" => "DOWN".red().to_string(),
        other => other.dimmed().to_string(),
    }
}

pub fn display_servers(servers: &ServersObj) {
    header("🌐 SERVER STATUS", 100);

    let rows: Vec<ServerRow> = servers
        .iter()
        .map(|(name, r)| ServerRow {
            service: name.to_string(),
            eu_west: status_cell(&r.eu_west),
            eu_east: status_cell(&r.eu_east),
            us_west: status_cell(&r.us_west),
            us_central: status_cell(&r.us_central),
            us_east: status_cell(&r.us_east),
            south_america: status_cell(&r.south_america),
            asia: status_cell(&r.asia),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);

    let unknown = servers
        .iter()
        .flat_map(|(_, regions)| regions.iter())
        .filter(|(_, r)| r.is_unknown())
        .count();
    if unknown > 0 {
        println!(
            "  {} {} region reports were missing and are shown as Unknown\n",
            "⚠️".yellow(),
            unknown
        );
    }
}

pub fn display_map_rotation(rotation: &MapRotationData) {
    header("🗺️  MAP ROTATION", 60);

    let current = &rotation.current;
    println!(
        "{} {} ({} left, ends {})",
        "Current:".bold(),
        current.map.green().bold(),
        current.remaining_timer,
        current.readable_date_end
    );

    let next = &rotation.next;
    println!(
        "{} {} (from {} for {} min)\n",
        "Next:   ".bold(),
        next.map.cyan(),
        next.readable_date_start,
        next.duration_in_minutes
    );
}

pub fn display_origin(lookup: &OriginLookup) {
    header("🔎 ORIGIN LOOKUP", 60);

    let candidates = lookup.candidates();
    if candidates.is_empty() {
        println!("{}", "No matching accounts".yellow());
        return;
    }

    let rows: Vec<OriginRow> = candidates
        .iter()
        .map(|o| OriginRow {
            name: o.name.clone(),
            uid: o.uid.clone(),
            pid: o.pid.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn cell(value: &Option<StatValue>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".dimmed().to_string())
}

fn diff_cell(values: &[Option<StatValue>; 2]) -> String {
    match difference(values) {
        Some(d) if d > 0.0 => format!("+{}", StatValue::Number(d)).green().to_string(),
        Some(d) if d < 0.0 => StatValue::Number(d).to_string().red().to_string(),
        Some(_) => "0".to_string(),
        None => String::new(),
    }
}

pub fn display_comparison(compared: &ComparedData) {
    let [first, second] = &compared.players;
    header(
        &format!("⚔️  {} vs {}", first.global.name, second.global.name),
        60,
    );

    let mut rows = vec![CompareRow {
        stat: "K/D".to_string(),
        first: format!("{:.2}", first.total.kd),
        second: format!("{:.2}", second.total.kd),
        diff: String::new(),
    }];
    rows.extend(compared.data.trackers.iter().map(|t| CompareRow {
        stat: t.name.clone(),
        first: cell(&t.value[0]),
        second: cell(&t.value[1]),
        diff: diff_cell(&t.value),
    }));
    rows.extend(compared.data.badges.iter().map(|b| CompareRow {
        stat: format!("🏅 {}", b.name),
        first: cell(&b.value[0]),
        second: cell(&b.value[1]),
        diff: diff_cell(&b.value),
    }));

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Stats come from each player's selected legend trackers");
    println!("• Diff: second player minus first player\n");
}
