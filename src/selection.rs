use crate::models::StatSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const ALL_ID: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Games,
    OnCourt,
    OffCourt,
    MakingActions,
    NotMakingActions,
    Stats,
}

impl Category {
    pub const EVERY: [Category; 6] = [
        Category::Games,
        Category::OnCourt,
        Category::OffCourt,
        Category::MakingActions,
        Category::NotMakingActions,
        Category::Stats,
    ];

    pub const PLAYERS: [Category; 4] = [
        Category::OnCourt,
        Category::OffCourt,
        Category::MakingActions,
        Category::NotMakingActions,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::Games => "Games",
            Category::OnCourt => "Players on court",
            Category::OffCourt => "Players off court",
            Category::MakingActions => "Players making actions",
            Category::NotMakingActions => "Players not making actions",
            Category::Stats => "Statistics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectableItem {
    pub id: String,
    pub label: String,
    pub is_all: bool,
    pub pending: bool,
    pub committed: bool,
    pub stat: Option<StatSpec>,
}

impl SelectableItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_all: false,
            pending: false,
            committed: false,
            stat: None,
        }
    }

    pub fn all_marker(label: impl Into<String>) -> Self {
        Self {
            is_all: true,
            ..Self::new(ALL_ID, label)
        }
    }

    pub fn stat(id: impl Into<String>, label: impl Into<String>, spec: StatSpec) -> Self {
        Self {
            stat: Some(spec),
            ..Self::new(id, label)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionCategory {
    items: Vec<SelectableItem>,
}

impl SelectionCategory {
    pub fn items(&self) -> &[SelectableItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn committed(&self) -> impl Iterator<Item = &SelectableItem> {
        self.items.iter().filter(|item| item.committed)
    }

    fn all_pending(&self) -> bool {
        self.items.iter().any(|item| item.is_all && item.pending)
    }

    fn seed_pending(&mut self) {
        for item in &mut self.items {
            item.pending = item.committed;
        }
    }

    fn commit(&mut self) {
        if self.all_pending() {
            for item in &mut self.items {
                item.committed = item.is_all;
                item.pending = item.is_all;
            }
        } else {
            for item in &mut self.items {
                item.committed = item.pending;
            }
        }
    }

    fn wipe(&mut self) {
        for item in &mut self.items {
            item.pending = false;
            item.committed = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    NotPopulated(Category),
    NoPopupOpen,
    UnknownItem { category: Category, id: String },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NotPopulated(category) => {
                write!(f, "{category} has nothing to select yet; choose a school first")
            }
            SelectionError::NoPopupOpen => f.write_str("no selection popup is open"),
            SelectionError::UnknownItem { category, id } => {
                write!(f, "{category} has no item '{id}'")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Pending ("looks selected") vs committed ("is selected") state for every
/// category, with at most one popup open at a time.
#[derive(Debug, Clone, Default)]
pub struct SelectionPopupController {
    games: SelectionCategory,
    on_court: SelectionCategory,
    off_court: SelectionCategory,
    making_actions: SelectionCategory,
    not_making_actions: SelectionCategory,
    stats: SelectionCategory,
    open: Option<Category>,
}

impl SelectionPopupController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, category: Category) -> &SelectionCategory {
        match category {
            Category::Games => &self.games,
            Category::OnCourt => &self.on_court,
            Category::OffCourt => &self.off_court,
            Category::MakingActions => &self.making_actions,
            Category::NotMakingActions => &self.not_making_actions,
            Category::Stats => &self.stats,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut SelectionCategory {
        match category {
            Category::Games => &mut self.games,
            Category::OnCourt => &mut self.on_court,
            Category::OffCourt => &mut self.off_court,
            Category::MakingActions => &mut self.making_actions,
            Category::NotMakingActions => &mut self.not_making_actions,
            Category::Stats => &mut self.stats,
        }
    }

    pub fn open_category(&self) -> Option<Category> {
        self.open
    }

    /// Appends items to a category. New items always start unselected.
    pub fn populate<I>(&mut self, category: Category, items: I)
    where
        I: IntoIterator<Item = SelectableItem>,
    {
        let target = self.category_mut(category);
        target.items.extend(items.into_iter().map(|mut item| {
            item.pending = false;
            item.committed = false;
            item
        }));
    }

    pub fn open(&mut self, category: Category) -> Result<(), SelectionError> {
        if self.category(category).is_empty() {
            return Err(SelectionError::NotPopulated(category));
        }
        if let Some(previous) = self.open {
            if previous != category {
                debug!("committing {previous} before opening {category}");
                self.close();
            }
        }
        self.category_mut(category).seed_pending();
        self.open = Some(category);
        Ok(())
    }

    /// Flips the pending flag of one item in the open popup and returns its
    /// new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool, SelectionError> {
        let category = self.open.ok_or(SelectionError::NoPopupOpen)?;
        let item = self
            .category_mut(category)
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| SelectionError::UnknownItem {
                category,
                id: id.to_string(),
            })?;
        item.pending = !item.pending;
        Ok(item.pending)
    }

    /// Commits the open popup, if any, and reports which category closed.
    pub fn close(&mut self) -> Option<Category> {
        let category = self.open.take()?;
        self.category_mut(category).commit();
        Some(category)
    }

    /// Empties one category ahead of a school change. Stats survive.
    pub fn reset_category(&mut self, category: Category) {
        if category == Category::Stats {
            return;
        }
        self.category_mut(category).items.clear();
        if self.open == Some(category) {
            self.open = None;
        }
    }

    pub fn deselect_all(&mut self) {
        for category in Category::EVERY {
            self.category_mut(category).wipe();
        }
    }

    pub fn collect_committed(&self, category: Category) -> Vec<String> {
        self.category(category)
            .committed()
            .map(|item| item.id.clone())
            .collect()
    }

    pub fn collect_stats(&self) -> Vec<StatSpec> {
        self.stats
            .committed()
            .filter_map(|item| item.stat.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(controller: &mut SelectionPopupController, category: Category) {
        controller.populate(
            category,
            [
                SelectableItem::all_marker("All players"),
                SelectableItem::new("P1", "Ann Smith"),
                SelectableItem::new("P2", "Bo Jones"),
            ],
        );
    }

    fn efg() -> SelectableItem {
        SelectableItem::stat(
            "EFG",
            "Effective FG%",
            StatSpec {
                kind: "EFG".to_string(),
                main_stat: None,
                per_what: None,
            },
        )
    }

    fn flags(controller: &SelectionPopupController, category: Category) -> Vec<(bool, bool)> {
        controller
            .category(category)
            .items()
            .iter()
            .map(|item| (item.pending, item.committed))
            .collect()
    }

    #[test]
    fn toggled_item_becomes_committed_on_close() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::OnCourt);

        controller.open(Category::OnCourt).unwrap();
        assert!(controller.toggle("P1").unwrap());
        assert!(controller.collect_committed(Category::OnCourt).is_empty());
        assert_eq!(controller.close(), Some(Category::OnCourt));

        assert_eq!(controller.collect_committed(Category::OnCourt), vec!["P1"]);
    }

    #[test]
    fn all_marker_supersedes_reopened_picks() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::OnCourt);
        controller.open(Category::OnCourt).unwrap();
        controller.toggle("P1").unwrap();
        controller.close();

        controller.open(Category::OnCourt).unwrap();
        let p1 = &controller.category(Category::OnCourt).items()[1];
        assert!(p1.pending, "reopen seeds pending from committed");
        controller.toggle(ALL_ID).unwrap();
        controller.close();

        assert_eq!(controller.collect_committed(Category::OnCourt), vec![ALL_ID]);
        assert_eq!(
            flags(&controller, Category::OnCourt),
            vec![(true, true), (false, false), (false, false)]
        );
    }

    #[test]
    fn all_precedence_ignores_every_other_pending_item() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::Games);
        controller.open(Category::Games).unwrap();
        controller.toggle("P2").unwrap();
        controller.toggle(ALL_ID).unwrap();
        controller.toggle("P1").unwrap();
        controller.close();

        assert_eq!(controller.collect_committed(Category::Games), vec![ALL_ID]);
    }

    #[test]
    fn committed_set_mirrors_pending_in_insertion_order() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::MakingActions);
        controller.open(Category::MakingActions).unwrap();
        controller.toggle("P2").unwrap();
        controller.toggle("P1").unwrap();
        controller.close();
        assert_eq!(
            controller.collect_committed(Category::MakingActions),
            vec!["P1", "P2"]
        );

        controller.open(Category::MakingActions).unwrap();
        controller.toggle("P1").unwrap();
        controller.close();
        assert_eq!(controller.collect_committed(Category::MakingActions), vec!["P2"]);
    }

    #[test]
    fn reopen_without_edits_is_idempotent() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::OffCourt);
        controller.open(Category::OffCourt).unwrap();
        controller.toggle("P2").unwrap();
        controller.close();
        let first = flags(&controller, Category::OffCourt);

        controller.open(Category::OffCourt).unwrap();
        controller.close();

        assert_eq!(flags(&controller, Category::OffCourt), first);
    }

    #[test]
    fn closing_one_category_leaves_others_alone() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::OnCourt);
        players(&mut controller, Category::OffCourt);
        controller.open(Category::OffCourt).unwrap();
        controller.toggle("P1").unwrap();
        controller.close();
        let off_court = flags(&controller, Category::OffCourt);

        controller.open(Category::OnCourt).unwrap();
        controller.toggle(ALL_ID).unwrap();
        controller.toggle("P1").unwrap();
        controller.close();

        assert_eq!(flags(&controller, Category::OffCourt), off_court);
    }

    #[test]
    fn opening_another_popup_commits_the_first() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::OnCourt);
        players(&mut controller, Category::Games);
        controller.open(Category::OnCourt).unwrap();
        controller.toggle("P1").unwrap();

        controller.open(Category::Games).unwrap();

        assert_eq!(controller.open_category(), Some(Category::Games));
        assert_eq!(controller.collect_committed(Category::OnCourt), vec!["P1"]);
    }

    #[test]
    fn reset_keeps_stats_but_deselect_all_clears_them() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::Games);
        controller.populate(Category::Stats, [efg()]);
        controller.open(Category::Stats).unwrap();
        controller.toggle("EFG").unwrap();
        controller.close();

        for category in Category::EVERY {
            controller.reset_category(category);
        }
        assert!(controller.category(Category::Games).is_empty());
        assert_eq!(controller.collect_committed(Category::Stats), vec!["EFG"]);

        controller.deselect_all();
        assert!(controller.collect_committed(Category::Stats).is_empty());
        assert_eq!(controller.category(Category::Stats).len(), 1);
    }

    #[test]
    fn deselect_all_keeps_items() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::NotMakingActions);
        controller.open(Category::NotMakingActions).unwrap();
        controller.toggle("P1").unwrap();
        controller.close();

        controller.deselect_all();

        assert_eq!(controller.category(Category::NotMakingActions).len(), 3);
        assert!(
            flags(&controller, Category::NotMakingActions)
                .iter()
                .all(|&(pending, committed)| !pending && !committed)
        );
    }

    #[test]
    fn repopulated_items_start_unselected() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::Games);
        controller.open(Category::Games).unwrap();
        controller.toggle("P1").unwrap();
        controller.close();

        controller.reset_category(Category::Games);
        let mut stale = SelectableItem::new("P1", "Ann Smith");
        stale.pending = true;
        stale.committed = true;
        controller.populate(
            Category::Games,
            [SelectableItem::all_marker("All games"), stale],
        );

        assert!(controller.collect_committed(Category::Games).is_empty());
        assert!(
            flags(&controller, Category::Games)
                .iter()
                .all(|&(pending, committed)| !pending && !committed)
        );
    }

    #[test]
    fn custom_stat_is_collected_without_coercion() {
        let mut controller = SelectionPopupController::new();
        let custom = StatSpec {
            kind: "Custom".to_string(),
            main_stat: Some("points".to_string()),
            per_what: Some("game".to_string()),
        };
        controller.populate(
            Category::Stats,
            [
                efg(),
                SelectableItem::stat("custom-1", "points per game", custom.clone()),
            ],
        );
        controller.open(Category::Stats).unwrap();
        controller.toggle("custom-1").unwrap();
        controller.close();

        assert_eq!(controller.collect_stats(), vec![custom]);
    }

    #[test]
    fn misuse_is_reported() {
        let mut controller = SelectionPopupController::new();
        assert_eq!(
            controller.open(Category::Games),
            Err(SelectionError::NotPopulated(Category::Games))
        );
        assert_eq!(controller.toggle("P1"), Err(SelectionError::NoPopupOpen));
        assert_eq!(controller.close(), None);

        players(&mut controller, Category::Games);
        controller.open(Category::Games).unwrap();
        assert!(matches!(
            controller.toggle("P9"),
            Err(SelectionError::UnknownItem { .. })
        ));
    }

    #[test]
    fn reset_closes_the_open_popup() {
        let mut controller = SelectionPopupController::new();
        players(&mut controller, Category::OnCourt);
        controller.open(Category::OnCourt).unwrap();

        controller.reset_category(Category::OnCourt);

        assert_eq!(controller.open_category(), None);
    }
}
