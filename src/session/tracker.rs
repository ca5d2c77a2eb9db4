//! Tracker session
//!
//! Owns the catalog, the progress store and the ephemeral view state for the
//! lifetime of a session. Every action mutates the store first, then
//! recomputes aggregates from scratch and returns the views it affected.

use chrono::{DateTime, Utc};

use crate::{
    models::{
        Catalog, NewCustomProblem, Portfolio, PortfolioSummary, ProgressMap, ProgressRecord,
        Setting, Settings, Subtopic,
    },
    services::{aggregator, CatalogService, CatalogSource, ReportService},
    storage::{ProgressStore, StorageBackend, StoreError, StoreResult},
};

use super::{
    confirm::{
        Confirm, DELETE_CUSTOM_PROMPT, RESET_ALL_FINAL_PROMPT, RESET_ALL_PROMPT,
        RESET_SUBTOPIC_PROMPT,
    },
    filter::Filter,
    view::{
        ErrorPanel, ProblemCard, Refresh, SidebarCategory, SidebarSubtopic, SidebarTopic,
        SidebarView, SubtopicView,
    },
};

pub struct Tracker<B: StorageBackend> {
    catalog: Catalog,
    store: ProgressStore<B>,
    filter: Filter,
    selected: Option<String>,
}

impl<B: StorageBackend> Tracker<B> {
    pub fn new(catalog: Catalog, store: ProgressStore<B>) -> Self {
        Self {
            catalog,
            store,
            filter: Filter::default(),
            selected: None,
        }
    }

    /// Fetch the catalog once and start a session. A failed fetch yields the
    /// error panel; there is no retry.
    pub async fn bootstrap<S>(source: &S, store: ProgressStore<B>) -> Result<Self, ErrorPanel>
    where
        S: CatalogSource + ?Sized,
    {
        match source.fetch().await {
            Ok(catalog) => {
                tracing::info!(
                    categories = catalog.categories.len(),
                    problems = catalog.problems().count(),
                    "Catalog loaded"
                );
                Ok(Self::new(catalog, store))
            }
            Err(e) => {
                tracing::error!("Error loading catalog: {}", e);
                Err(ErrorPanel::default())
            }
        }
    }

    pub fn store(&self) -> &ProgressStore<B> {
        &self.store
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn selected_subtopic(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn settings(&self) -> Settings {
        self.store.settings()
    }

    pub fn dark_mode(&self) -> bool {
        self.settings().dark_mode
    }

    /// Catalog with the user's custom problems merged in
    pub fn merged_catalog(&self) -> Catalog {
        CatalogService::with_custom_problems(&self.catalog, &self.store.custom_problems())
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub fn sidebar(&self) -> SidebarView {
        self.render_sidebar(&self.merged_catalog(), &self.store.progress())
    }

    /// View of the selected subtopic, if any
    pub fn current_view(&self) -> Option<SubtopicView> {
        let merged = self.merged_catalog();
        self.render_view(&merged, &self.store.progress(), self.store.settings())
    }

    fn refresh(&self) -> Refresh {
        let merged = self.merged_catalog();
        let progress = self.store.progress();
        Refresh {
            view: self.render_view(&merged, &progress, self.store.settings()),
            sidebar: self.render_sidebar(&merged, &progress),
        }
    }

    fn render_sidebar(&self, catalog: &Catalog, progress: &ProgressMap) -> SidebarView {
        SidebarView {
            categories: catalog
                .categories
                .iter()
                .map(|category| SidebarCategory {
                    id: category.id.clone(),
                    name: category.name.clone(),
                    topics: category
                        .topics
                        .iter()
                        .map(|topic| SidebarTopic {
                            id: topic.id.clone(),
                            name: topic.name.clone(),
                            subtopics: topic
                                .subtopics
                                .iter()
                                .map(|subtopic| SidebarSubtopic {
                                    id: subtopic.id.clone(),
                                    name: subtopic.name.clone(),
                                    stats: aggregator::subtopic_stats(subtopic, progress),
                                    active: self.selected.as_deref() == Some(subtopic.id.as_str()),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn render_view(
        &self,
        catalog: &Catalog,
        progress: &ProgressMap,
        settings: Settings,
    ) -> Option<SubtopicView> {
        let subtopic = catalog.find_subtopic(self.selected.as_deref()?)?;
        Some(self.render_subtopic(subtopic, progress, settings))
    }

    fn render_subtopic(
        &self,
        subtopic: &Subtopic,
        progress: &ProgressMap,
        settings: Settings,
    ) -> SubtopicView {
        let cards: Vec<ProblemCard> = subtopic
            .problems
            .iter()
            .filter(|p| self.filter.matches(aggregator::is_completed(progress, &p.id)))
            .map(|problem| {
                let record = progress.get(&problem.id);
                ProblemCard {
                    id: problem.id.clone(),
                    title: problem.title.clone(),
                    kind: problem.kind,
                    type_label: problem.kind.label(),
                    difficulty: problem.difficulty.filter(|_| settings.show_difficulty),
                    estimated_time: problem.estimated_time.filter(|_| settings.show_estimated_time),
                    links: problem.links.clone(),
                    notes: record.map(|r| r.notes.clone()).unwrap_or_default(),
                    completed: record.is_some_and(|r| r.completed),
                    is_custom: problem.is_custom,
                }
            })
            .collect();

        let empty_message = cards
            .is_empty()
            .then(|| format!("No {} problems found.", self.filter));

        SubtopicView {
            id: subtopic.id.clone(),
            name: subtopic.name.clone(),
            filter: self.filter,
            stats: aggregator::subtopic_stats(subtopic, progress),
            cards,
            empty_message,
        }
    }

    // ========================================================================
    // View state
    // ========================================================================

    /// Select a subtopic; unknown ids leave the selection unchanged
    pub fn select_subtopic(&mut self, subtopic_id: &str) -> Option<SubtopicView> {
        if self.catalog.find_subtopic(subtopic_id).is_none() {
            tracing::warn!(subtopic_id, "Unknown subtopic selected");
            return None;
        }
        self.selected = Some(subtopic_id.to_string());
        self.current_view()
    }

    /// Change the filter; returns the re-filtered selection, if any
    pub fn set_filter(&mut self, filter: Filter) -> Option<SubtopicView> {
        self.filter = filter;
        self.current_view()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Flip completion of a problem; returns the new state and refreshed views
    pub fn toggle(&mut self, problem_id: &str) -> StoreResult<(bool, Refresh)> {
        let completed = self.store.toggle_completion(problem_id)?;
        Ok((completed, self.refresh()))
    }

    /// Store the notes of a problem; cards render notes, so views are refreshed
    pub fn save_notes(
        &mut self,
        problem_id: &str,
        notes: &str,
    ) -> StoreResult<(ProgressRecord, Refresh)> {
        let record = self.store.update_notes(problem_id, notes)?;
        Ok((record, self.refresh()))
    }

    /// Add a custom problem, attached to the selected subtopic unless the
    /// input names one. Nothing is stored when neither resolves to a known
    /// subtopic.
    pub fn add_custom_problem(
        &mut self,
        mut input: NewCustomProblem,
    ) -> StoreResult<(String, Refresh)> {
        let Some(subtopic_id) = input.subtopic_id.take().or_else(|| self.selected.clone()) else {
            return Err(StoreError::InvalidInput(
                "select a subtopic before adding a problem".to_string(),
            ));
        };
        if self.catalog.find_subtopic(&subtopic_id).is_none() {
            return Err(StoreError::InvalidInput(format!(
                "unknown subtopic: {subtopic_id}"
            )));
        }
        input.subtopic_id = Some(subtopic_id);
        let id = self.store.add_custom_problem(input)?;
        Ok((id, self.refresh()))
    }

    /// Returns `None` when the user declines
    pub fn delete_custom_problem(
        &mut self,
        problem_id: &str,
        confirm: &mut impl Confirm,
    ) -> StoreResult<Option<Refresh>> {
        if !confirm.confirm(DELETE_CUSTOM_PROMPT) {
            return Ok(None);
        }
        self.store.delete_custom_problem(problem_id)?;
        Ok(Some(self.refresh()))
    }

    /// Clear progress of every problem listed under the selected subtopic,
    /// custom ones included. Returns `None` when nothing is selected or the
    /// user declines.
    pub fn reset_subtopic(&mut self, confirm: &mut impl Confirm) -> StoreResult<Option<Refresh>> {
        let merged = self.merged_catalog();
        let Some(subtopic) = self
            .selected
            .as_deref()
            .and_then(|id| merged.find_subtopic(id))
        else {
            return Ok(None);
        };

        if !confirm.confirm(RESET_SUBTOPIC_PROMPT) {
            return Ok(None);
        }

        self.store
            .reset_subset(subtopic.problems.iter().map(|p| p.id.as_str()))?;
        tracing::info!(subtopic_id = %subtopic.id, "Reset subtopic progress");
        Ok(Some(self.refresh()))
    }

    /// Clear everything after two confirmations in sequence
    pub fn reset_all(&mut self, confirm: &mut impl Confirm) -> StoreResult<Option<Refresh>> {
        if !confirm.confirm(RESET_ALL_PROMPT) || !confirm.confirm(RESET_ALL_FINAL_PROMPT) {
            return Ok(None);
        }
        self.store.reset_all()?;
        Ok(Some(self.refresh()))
    }

    /// Settings drive card rendering, so the selection is re-rendered
    pub fn update_setting(
        &mut self,
        setting: Setting,
        value: bool,
    ) -> StoreResult<Option<SubtopicView>> {
        self.store.update_setting(setting, value)?;
        Ok(self.current_view())
    }

    // ========================================================================
    // Backup & reports
    // ========================================================================

    pub fn export_snapshot(&self) -> StoreResult<String> {
        self.store.export_snapshot()
    }

    pub fn import_snapshot(&mut self, json: &str) -> StoreResult<Refresh> {
        self.store.import_snapshot(json)?;
        Ok(self.refresh())
    }

    pub fn portfolio(&self) -> Portfolio {
        ReportService::portfolio(&self.merged_catalog(), &self.store.progress())
    }

    pub fn portfolio_summary(&self, generated_at: DateTime<Utc>) -> PortfolioSummary {
        ReportService::summary(&self.merged_catalog(), &self.store.progress(), generated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::fixtures;
    use crate::models::{Category, NewProblemLink, ProblemType, Stats, Topic};
    use crate::services::CatalogError;
    use crate::session::AlwaysConfirm;
    use crate::storage::{MemoryBackend, StoreError};
    use crate::utils::time::now_utc;

    fn tracker() -> Tracker<MemoryBackend> {
        Tracker::new(fixtures::catalog(), ProgressStore::open(MemoryBackend::new()))
    }

    fn new_problem(title: &str) -> NewCustomProblem {
        NewCustomProblem {
            title: title.to_string(),
            kind: ProblemType::Solve,
            difficulty: None,
            estimated_time: None,
            links: vec![NewProblemLink {
                platform: String::new(),
                url: "https://example.com/custom".to_string(),
            }],
            subtopic_id: None,
        }
    }

    fn refuse(_: &str) -> bool {
        false
    }

    struct StaticSource(Option<Catalog>);

    #[async_trait::async_trait]
    impl CatalogSource for StaticSource {
        async fn fetch(&self) -> Result<Catalog, CatalogError> {
            self.0.clone().ok_or_else(|| {
                CatalogError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "offline"))
            })
        }
    }

    #[test]
    fn test_bootstrap() {
        let store = ProgressStore::open(MemoryBackend::new());
        let tracker =
            tokio_test::block_on(Tracker::bootstrap(&StaticSource(Some(fixtures::catalog())), store))
                .unwrap();
        assert_eq!(tracker.sidebar().categories.len(), 2);

        let store = ProgressStore::open(MemoryBackend::new());
        let panel = tokio_test::block_on(Tracker::bootstrap(&StaticSource(None), store))
            .err()
            .unwrap();
        assert_eq!(panel, ErrorPanel::default());
    }

    #[test]
    fn test_single_subtopic_example() {
        let catalog = Catalog {
            categories: vec![Category {
                id: "c".into(),
                name: "C".into(),
                topics: vec![Topic {
                    id: "t".into(),
                    name: "T".into(),
                    subtopics: vec![Subtopic {
                        id: "s".into(),
                        name: "S".into(),
                        problems: vec![
                            fixtures::problem("p1", ProblemType::Solve, None),
                            fixtures::problem("p2", ProblemType::Read, None),
                            fixtures::problem("p3", ProblemType::Design, None),
                        ],
                    }],
                }],
            }],
        };
        let mut tracker = Tracker::new(catalog, ProgressStore::open(MemoryBackend::new()));
        tracker.select_subtopic("s").unwrap();
        tracker.toggle("p1").unwrap();
        let (_, refresh) = tracker.toggle("p2").unwrap();

        let view = refresh.view.unwrap();
        assert_eq!(view.stats, Stats { completed: 2, total: 3, percentage: 67 });
        assert_eq!(refresh.sidebar.subtopic("s").unwrap().stats.completed, 2);
    }

    #[test]
    fn test_select_subtopic() {
        let mut tracker = tracker();
        assert!(tracker.current_view().is_none());

        let view = tracker.select_subtopic("graphs").unwrap();
        assert_eq!(view.name, "Graphs");
        assert_eq!(view.card_ids(), vec!["dijkstra", "bfs"]);
        assert_eq!(view.empty_message, None);
        assert!(tracker.sidebar().subtopic("graphs").unwrap().active);

        assert!(tracker.select_subtopic("nope").is_none());
        assert_eq!(tracker.selected_subtopic(), Some("graphs"));
    }

    #[test]
    fn test_pending_filter_empties_after_last_completion() {
        let mut tracker = tracker();
        tracker.select_subtopic("graphs");
        let view = tracker.set_filter(Filter::Pending).unwrap();
        assert_eq!(view.cards.len(), 2);

        let (completed, refresh) = tracker.toggle("dijkstra").unwrap();
        assert!(completed);
        assert_eq!(refresh.view.unwrap().card_ids(), vec!["bfs"]);

        let (_, refresh) = tracker.toggle("bfs").unwrap();
        let view = refresh.view.unwrap();
        assert!(view.cards.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some("No pending problems found."));
        assert_eq!(view.stats, Stats::new(2, 2));
    }

    #[test]
    fn test_completed_filter() {
        let mut tracker = tracker();
        tracker.select_subtopic("arrays");
        tracker.toggle("3sum").unwrap();
        let view = tracker.set_filter(Filter::Completed).unwrap();
        assert_eq!(view.card_ids(), vec!["3sum"]);
        assert!(view.cards[0].completed);
    }

    #[test]
    fn test_settings_drive_card_fields() {
        let mut tracker = tracker();
        let view = tracker.select_subtopic("arrays").unwrap();
        let card = view.card("two-sum").unwrap();
        assert_eq!(card.difficulty, None);
        assert_eq!(card.estimated_time, None);
        assert_eq!(card.type_label, "Solve");

        let view = tracker
            .update_setting(Setting::ShowDifficulty, true)
            .unwrap()
            .unwrap();
        let card = view.card("two-sum").unwrap();
        assert_eq!(card.difficulty, Some(crate::models::Difficulty::Easy));
        assert_eq!(card.estimated_time, None);

        let view = tracker
            .update_setting(Setting::ShowEstimatedTime, true)
            .unwrap()
            .unwrap();
        assert_eq!(view.card("two-sum").unwrap().estimated_time, Some(30));
        assert!(!tracker.dark_mode());
    }

    #[test]
    fn test_notes_show_on_cards() {
        let mut tracker = tracker();
        tracker.select_subtopic("arrays");
        let (record, refresh) = tracker.save_notes("two-sum", "hash map lookup").unwrap();
        assert_eq!(record.notes, "hash map lookup");

        let view = refresh.view.unwrap();
        assert_eq!(view.card("two-sum").unwrap().notes, "hash map lookup");
        assert!(!view.card("two-sum").unwrap().completed);
        assert_eq!(view.stats, Stats::new(0, 3));
    }

    #[test]
    fn test_custom_problem_needs_a_known_subtopic() {
        let mut tracker = tracker();
        assert!(matches!(
            tracker.add_custom_problem(new_problem("Kadane")),
            Err(StoreError::InvalidInput(_))
        ));

        let mut input = new_problem("Kadane");
        input.subtopic_id = Some("no-such-subtopic".to_string());
        assert!(matches!(
            tracker.add_custom_problem(input),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(tracker.store().custom_problems().is_empty());

        // an explicit subtopic works without a selection
        let mut input = new_problem("Kadane");
        input.subtopic_id = Some("graphs".to_string());
        let (id, refresh) = tracker.add_custom_problem(input).unwrap();
        assert_eq!(refresh.view, None);
        assert_eq!(refresh.sidebar.subtopic("graphs").unwrap().stats.total, 3);
        assert!(tracker.merged_catalog().contains_problem(&id));
    }

    #[test]
    fn test_custom_problem_joins_selected_subtopic() {
        let mut tracker = tracker();
        tracker.select_subtopic("arrays");
        let (id, refresh) = tracker.add_custom_problem(new_problem("Kadane")).unwrap();

        let view = refresh.view.unwrap();
        assert_eq!(view.cards.len(), 4);
        let card = view.card(&id).unwrap();
        assert!(card.is_custom);
        assert_eq!(card.links[0].platform, "Custom");
        assert_eq!(refresh.sidebar.subtopic("arrays").unwrap().stats.total, 4);

        // custom problems count towards aggregates and reports
        tracker.toggle(&id).unwrap();
        assert_eq!(tracker.portfolio().overview.stats, Stats::new(1, 7));
    }

    #[test]
    fn test_delete_custom_problem_needs_confirmation() {
        let mut tracker = tracker();
        tracker.select_subtopic("arrays");
        let (id, _) = tracker.add_custom_problem(new_problem("Kadane")).unwrap();
        tracker.toggle(&id).unwrap();

        assert_eq!(tracker.delete_custom_problem(&id, &mut refuse).unwrap(), None);
        assert_eq!(tracker.current_view().unwrap().cards.len(), 4);

        let refresh = tracker
            .delete_custom_problem(&id, &mut AlwaysConfirm)
            .unwrap()
            .unwrap();
        assert_eq!(refresh.view.unwrap().cards.len(), 3);
        assert_eq!(tracker.store().get(&id), None);
    }

    #[test]
    fn test_reset_subtopic() {
        let mut tracker = tracker();
        tracker.toggle("two-sum").unwrap();
        tracker.toggle("bfs").unwrap();

        // nothing selected
        assert_eq!(tracker.reset_subtopic(&mut AlwaysConfirm).unwrap(), None);

        tracker.select_subtopic("arrays");
        assert_eq!(tracker.reset_subtopic(&mut refuse).unwrap(), None);
        assert!(tracker.store().is_completed("two-sum"));

        let refresh = tracker.reset_subtopic(&mut AlwaysConfirm).unwrap().unwrap();
        assert_eq!(refresh.view.unwrap().stats.completed, 0);
        assert!(!tracker.store().is_completed("two-sum"));
        assert!(tracker.store().is_completed("bfs"));
    }

    #[test]
    fn test_reset_all_asks_twice() {
        let mut tracker = tracker();
        tracker.toggle("two-sum").unwrap();

        let mut prompts = Vec::new();
        let mut first_only = |prompt: &str| {
            prompts.push(prompt.to_string());
            prompts.len() == 1
        };
        assert_eq!(tracker.reset_all(&mut first_only).unwrap(), None);
        assert_eq!(prompts, vec![RESET_ALL_PROMPT, RESET_ALL_FINAL_PROMPT]);
        assert!(tracker.store().is_completed("two-sum"));

        let mut asked = 0;
        let mut refuse_first = |_: &str| {
            asked += 1;
            false
        };
        assert_eq!(tracker.reset_all(&mut refuse_first).unwrap(), None);
        assert_eq!(asked, 1);

        tracker.reset_all(&mut AlwaysConfirm).unwrap().unwrap();
        assert!(!tracker.store().is_completed("two-sum"));
    }

    #[test]
    fn test_import_replaces_state_and_rejects_bad_payload() {
        let mut source = tracker();
        source.toggle("dijkstra").unwrap();
        source.update_setting(Setting::DarkMode, true).unwrap();
        let backup = source.export_snapshot().unwrap();

        let mut target = tracker();
        target.select_subtopic("graphs");
        let refresh = target.import_snapshot(&backup).unwrap();
        assert!(refresh.view.unwrap().card("dijkstra").unwrap().completed);
        assert!(target.dark_mode());

        let before = target.store().data();
        assert!(matches!(
            target.import_snapshot(r#"{"progress": {}}"#),
            Err(StoreError::InvalidSnapshot(_))
        ));
        assert_eq!(target.store().data(), before);
    }

    #[test]
    fn test_portfolio_summary() {
        let mut tracker = tracker();
        tracker.toggle("url-shortener").unwrap();
        let summary = tracker.portfolio_summary(now_utc());
        assert_eq!(summary.summary.completed, 1);
        assert_eq!(summary.category_breakdown[1].percentage, 100);
    }
}
