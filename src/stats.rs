use crate::models::{GameRecord, PlayerRecord, SchoolNames, StatSpec};
use crate::selection::SelectableItem;
use chrono::NaiveDate;

pub const CUSTOM: &str = "Custom";

const CATALOG: [(&str, &str); 9] = [
    ("EFG", "Effective field goal %"),
    ("TSperc", "True shooting %"),
    ("TOrate", "Turnover rate"),
    ("ASTTOVratio", "Assist to turnover ratio"),
    ("ASTrate", "Assist rate"),
    ("Orebrate", "Offensive rebound rate"),
    ("Drebrate", "Defensive rebound rate"),
    ("Ortg", "Offensive rating"),
    ("Drtg", "Defensive rating"),
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn catalog_items() -> Vec<SelectableItem> {
    CATALOG
        .iter()
        .map(|(kind, label)| {
            SelectableItem::stat(
                *kind,
                *label,
                StatSpec {
                    kind: kind.to_string(),
                    main_stat: None,
                    per_what: None,
                },
            )
        })
        .collect()
}

pub fn custom_item(seq: usize, main_stat: &str, per_what: &str) -> SelectableItem {
    SelectableItem::stat(
        format!("custom-{seq}"),
        format!("{main_stat} per {per_what}"),
        StatSpec {
            kind: CUSTOM.to_string(),
            main_stat: Some(main_stat.to_string()),
            per_what: Some(per_what.to_string()),
        },
    )
}

pub fn game_label(game: &GameRecord, schools: &SchoolNames) -> String {
    let date = match NaiveDate::from_ymd_opt(game.year, game.month, game.day) {
        Some(date) => date.format("%b %-d %Y").to_string(),
        None => {
            let month = game
                .month
                .checked_sub(1)
                .and_then(|idx| MONTHS.get(idx as usize))
                .copied()
                .unwrap_or("???");
            format!("{month} {} {}", game.day, game.year)
        }
    };
    let outcome = if game.is_win { 'W' } else { 'L' };
    let opponent = schools
        .get(&game.oppt_id)
        .cloned()
        .unwrap_or_else(|| format!("#{}", game.oppt_id));
    format!(
        "{date} {outcome} ({}-{}) {opponent}",
        game.team_score, game.oppt_score
    )
}

pub fn player_label(player: &PlayerRecord) -> String {
    match player.title.as_deref() {
        Some(title) => format!("{} {} {title}", player.first, player.last),
        None => format!("{} {}", player.first, player.last),
    }
}

pub fn game_items(games: &[GameRecord], schools: &SchoolNames) -> Vec<SelectableItem> {
    std::iter::once(SelectableItem::all_marker("All games"))
        .chain(
            games
                .iter()
                .map(|game| SelectableItem::new(game.game_id.to_string(), game_label(game, schools))),
        )
        .collect()
}

pub fn player_items(players: &[PlayerRecord], school_name: &str) -> Vec<SelectableItem> {
    std::iter::once(SelectableItem::all_marker(format!("All {school_name} players")))
        .chain(
            players
                .iter()
                .map(|player| SelectableItem::new(player.player_id.to_string(), player_label(player))),
        )
        .collect()
}
