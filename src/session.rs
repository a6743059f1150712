use crate::models::{
    Answer, AnswerCard, AnswerRow, CalculationRequest, CategoryView, ItemView, SchoolNames,
    SchoolId, SchoolInfo, SchoolMatch, SchoolView, SelectionSnapshot, SessionView,
};
use crate::selection::{Category, SelectionError, SelectionPopupController};
use crate::stats;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchoolTicket {
    pub school_id: SchoolId,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalcTicket {
    pub request: CalculationRequest,
    generation: u64,
    school: String,
    selections: Vec<SelectionSnapshot>,
    stat_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    UnknownSchool(SchoolId),
    NoSchool,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::UnknownSchool(id) => write!(f, "unknown school id {id}"),
            SessionError::NoSchool => f.write_str("Select a school first!"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Everything one page session knows. Responses that arrive after a newer
/// request of the same kind was started are dropped.
#[derive(Debug, Default)]
pub struct Session {
    schools: Option<SchoolNames>,
    school: Option<SchoolId>,
    controller: SelectionPopupController,
    answers: Vec<AnswerCard>,
    school_generation: u64,
    calc_generation: u64,
    custom_seq: usize,
}

impl Session {
    pub fn new() -> Self {
        let mut controller = SelectionPopupController::new();
        controller.populate(Category::Stats, stats::catalog_items());
        Self {
            controller,
            ..Self::default()
        }
    }

    pub fn controller(&self) -> &SelectionPopupController {
        &self.controller
    }

    pub fn schools_loaded(&self) -> bool {
        self.schools.is_some()
    }

    pub fn set_schools(&mut self, schools: SchoolNames) {
        info!(count = schools.len(), "school directory loaded");
        self.schools = Some(schools);
    }

    pub fn school_name(&self, id: SchoolId) -> Option<&str> {
        self.schools.as_ref()?.get(&id).map(String::as_str)
    }

    pub fn current_school(&self) -> Option<SchoolId> {
        self.school
    }

    pub fn answers(&self) -> &[AnswerCard] {
        &self.answers
    }

    pub fn matching_schools(&self, term: &str) -> Vec<SchoolMatch> {
        let Some(schools) = self.schools.as_ref() else {
            return Vec::new();
        };
        let needle = term.trim().to_lowercase();
        let mut matches: Vec<SchoolMatch> = schools
            .iter()
            .filter(|(_, name)| name.to_lowercase().starts_with(&needle))
            .map(|(id, name)| SchoolMatch {
                id: *id,
                value: name.clone(),
            })
            .collect();
        matches.sort_by(|a, b| a.value.cmp(&b.value).then(a.id.cmp(&b.id)));
        matches
    }

    pub fn select_school(&mut self, school_id: SchoolId) -> Result<SchoolTicket, SessionError> {
        if self.school_name(school_id).is_none() {
            return Err(SessionError::UnknownSchool(school_id));
        }
        self.school = Some(school_id);
        for category in Category::EVERY {
            self.controller.reset_category(category);
        }
        self.school_generation += 1;
        Ok(SchoolTicket {
            school_id,
            generation: self.school_generation,
        })
    }

    pub fn school_ticket_current(&self, ticket: &SchoolTicket) -> bool {
        ticket.generation == self.school_generation
    }

    pub fn calc_ticket_current(&self, ticket: &CalcTicket) -> bool {
        ticket.generation == self.calc_generation
    }

    /// Fills the non-stats categories. Returns false when the ticket was
    /// superseded by a later school choice.
    pub fn apply_school_info(&mut self, ticket: SchoolTicket, info: &SchoolInfo) -> bool {
        if !self.school_ticket_current(&ticket) {
            debug!(
                school_id = ticket.school_id,
                "dropping school info for superseded selection"
            );
            return false;
        }
        let schools = self.schools.clone().unwrap_or_default();
        let school_name = schools
            .get(&ticket.school_id)
            .cloned()
            .unwrap_or_default();

        self.controller
            .populate(Category::Games, stats::game_items(&info.games, &schools));
        let players = stats::player_items(&info.players, &school_name);
        for category in Category::PLAYERS {
            self.controller.populate(category, players.iter().cloned());
        }
        info!(
            school = %school_name,
            games = info.games.len(),
            players = info.players.len(),
            "school info applied"
        );
        true
    }

    pub fn open(&mut self, category: Category) -> Result<(), SelectionError> {
        self.controller.open(category)
    }

    pub fn toggle(&mut self, id: &str) -> Result<bool, SelectionError> {
        self.controller.toggle(id)
    }

    pub fn close(&mut self) -> Option<Category> {
        self.controller.close()
    }

    pub fn deselect_all(&mut self) {
        self.controller.deselect_all();
    }

    pub fn add_custom_stat(&mut self, main_stat: &str, per_what: &str) -> String {
        self.custom_seq += 1;
        let item = stats::custom_item(self.custom_seq, main_stat, per_what);
        let id = item.id.clone();
        self.controller.populate(Category::Stats, [item]);
        id
    }

    pub fn begin_calculation(&mut self) -> Result<CalcTicket, SessionError> {
        let school_id = self.school.ok_or(SessionError::NoSchool)?;
        let request = CalculationRequest {
            school_id,
            games: self.controller.collect_committed(Category::Games),
            on_court: self.controller.collect_committed(Category::OnCourt),
            off_court: self.controller.collect_committed(Category::OffCourt),
            making_actions: self.controller.collect_committed(Category::MakingActions),
            not_making_actions: self.controller.collect_committed(Category::NotMakingActions),
            stats: self.controller.collect_stats(),
        };
        let selections = Category::EVERY
            .into_iter()
            .filter(|category| *category != Category::Stats)
            .map(|category| SelectionSnapshot {
                category,
                title: category.title(),
                labels: self
                    .controller
                    .category(category)
                    .committed()
                    .map(|item| item.label.clone())
                    .collect(),
            })
            .collect();
        let stat_labels = self
            .controller
            .category(Category::Stats)
            .committed()
            .map(|item| item.label.clone())
            .collect();
        self.calc_generation += 1;
        Ok(CalcTicket {
            request,
            generation: self.calc_generation,
            school: self.school_name(school_id).unwrap_or_default().to_string(),
            selections,
            stat_labels,
        })
    }

    /// Records the answer card for a calculation. Returns `None` when a
    /// newer calculation has started since.
    pub fn finish_calculation(
        &mut self,
        ticket: CalcTicket,
        answers: Vec<Answer>,
    ) -> Option<AnswerCard> {
        if !self.calc_ticket_current(&ticket) {
            debug!("dropping answers for superseded calculation");
            return None;
        }
        let rows = ticket
            .stat_labels
            .into_iter()
            .zip(answers)
            .map(|(stat, answer)| AnswerRow { stat, answer })
            .collect();
        let card = AnswerCard {
            school: ticket.school,
            request: ticket.request,
            selections: ticket.selections,
            rows,
        };
        self.answers.insert(0, card.clone());
        Some(card)
    }

    pub fn view(&self) -> SessionView {
        let categories = Category::EVERY
            .iter()
            .map(|&category| CategoryView {
                category,
                title: category.title(),
                items: self
                    .controller
                    .category(category)
                    .items()
                    .iter()
                    .map(|item| ItemView {
                        id: item.id.clone(),
                        label: item.label.clone(),
                        is_all: item.is_all,
                        pending: item.pending,
                        committed: item.committed,
                    })
                    .collect(),
            })
            .collect();
        SessionView {
            school: self.school.map(|id| SchoolView {
                id,
                name: self.school_name(id).unwrap_or_default().to_string(),
            }),
            open_popup: self.controller.open_category(),
            categories,
            answers: self.answers.clone(),
        }
    }
}
