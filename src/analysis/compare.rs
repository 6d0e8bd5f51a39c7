use crate::api::models::{ComparedBadge, ComparedTracker, ComparisonData, Player, StatValue};

/// Pairs up the selected-legend trackers and badges of two players.
///
/// Trackers are matched on `key` and badges on `name`. Entries appear in
/// first-seen order, the first player's entries before the second's, and a
/// side without the entry holds `None`.
pub fn compare_players(first: &Player, second: &Player) -> ComparisonData {
    let mut trackers: Vec<ComparedTracker> = Vec::new();
    let mut badges: Vec<ComparedBadge> = Vec::new();

    for (side, player) in [first, second].into_iter().enumerate() {
        let selected = &player.legends.selected;

        for tracker in &selected.data {
            let idx = match trackers.iter().position(|t| t.key == tracker.key) {
                Some(idx) => idx,
                None => {
                    trackers.push(ComparedTracker {
                        name: tracker.name.clone(),
                        key: tracker.key.clone(),
                        value: [None, None],
                    });
                    trackers.len() - 1
                }
            };
            trackers[idx].value[side] = Some(tracker.value.clone());
        }

        for badge in &selected.game_info.badges {
            let idx = match badges.iter().position(|b| b.name == badge.name) {
                Some(idx) => idx,
                None => {
                    badges.push(ComparedBadge {
                        name: badge.name.clone(),
                        value: [None, None],
                    });
                    badges.len() - 1
                }
            };
            badges[idx].value[side] = Some(badge.value.clone());
        }
    }

    ComparisonData { trackers, badges }
}

/// Second value minus first, when both are numeric.
pub fn difference(values: &[Option<StatValue>; 2]) -> Option<f64> {
    match values {
        [Some(StatValue::Number(a)), Some(StatValue::Number(b))] => Some(b - a),
        _ => None,
    }
}
