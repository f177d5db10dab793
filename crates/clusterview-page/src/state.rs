//! Page state and its command reducer.
//!
//! All interactive state of a list page lives in one [`PageState`]. Inputs
//! arrive as [`PageCommand`]s; [`PageState::dispatch`] applies one and returns
//! the [`PageEvent`]s describing what changed. Everything shown on screen is
//! derived from the state: the composed [`Filter`], the suggestion list and
//! the [`PageView`](crate::PageView).

use serde::{Deserialize, Serialize};
use tracing::debug;

use clusterview_seeker::{
    field_keyword, parse_query, split_field_value, Dir, FieldDescriptor, FieldRegistry, Filter, Record,
    Selection, SortSpec, SuggestLimits, Suggester, Suggestions,
};

use crate::chips::{ChipKind, ChipSet, FilterChip};
use crate::config::PageConfig;
use crate::dropdown::{DropdownMode, DropdownState, ALL};
use crate::input::SearchInput;
use crate::location::LocationParams;

/// A user or host action on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    /// The search box text changed.
    Type(String),
    Focus,
    Blur,
    /// Enter in the search box.
    Submit,
    /// A suggestion was picked; carries its completion text.
    SelectSuggestion(String),
    /// The programmatic text change has been applied.
    SettleInput,
    AddChip(FilterChip),
    RemoveChip(String),
    /// Removes every chip, dropdown selection and the search text.
    ClearAll,
    /// A multi-select dropdown checkbox changed.
    ToggleOption {
        field: String,
        value: String,
        checked: bool,
    },
    /// A single-select dropdown changed; `All` clears it.
    SelectOption { field: String, value: String },
    /// A column header was clicked.
    SortBy(String),
    SetSort(Option<SortSpec>),
    SetPage(usize),
    SetPerPage(usize),
}

/// A change resulting from a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    QueryChanged(String),
    SuggestionsVisible(bool),
    ChipAdded(FilterChip),
    ChipRemoved(FilterChip),
    ChipsCleared,
    DropdownChanged { field: String },
    SortChanged(Option<SortSpec>),
    PageChanged(usize),
    PerPageChanged(usize),
}

/// The interactive state of one list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    input: SearchInput,
    chips: ChipSet,
    dropdowns: DropdownState,
    sort: Option<SortSpec>,
    page: usize,
    per_page: usize,
    default_per_page: usize,
    limits: SuggestLimits,
}

impl PageState {
    /// Fresh state for a page: nothing filtered, first page.
    pub fn new(config: &PageConfig) -> Self {
        let per_page = config.per_page.max(1);
        PageState {
            input: SearchInput::new(),
            chips: ChipSet::new(),
            dropdowns: DropdownState::new(&config.dropdowns),
            sort: None,
            page: 1,
            per_page,
            default_per_page: per_page,
            limits: config.suggest,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn query(&self) -> &str {
        self.input.text()
    }

    pub fn input(&self) -> &SearchInput {
        &self.input
    }

    pub fn chips(&self) -> &ChipSet {
        &self.chips
    }

    pub fn dropdowns(&self) -> &DropdownState {
        &self.dropdowns
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    // ========================================================================
    // Reducer
    // ========================================================================

    /// Applies a command and reports what changed.
    ///
    /// Any change to what is filtered moves back to page 1.
    pub fn dispatch(&mut self, registry: &FieldRegistry, command: PageCommand) -> Vec<PageEvent> {
        debug!(command = ?command, "page command");
        let mut events = Vec::new();
        match command {
            PageCommand::Type(text) => {
                let was_open = self.input.is_open();
                self.input.type_text(text);
                events.push(PageEvent::QueryChanged(self.input.text().to_string()));
                self.push_visibility(was_open, &mut events);
                self.reset_page(&mut events);
            }
            PageCommand::Focus => {
                let was_open = self.input.is_open();
                self.input.focus();
                self.push_visibility(was_open, &mut events);
            }
            PageCommand::Blur => {
                let was_open = self.input.is_open();
                self.input.blur();
                self.push_visibility(was_open, &mut events);
            }
            PageCommand::Submit => self.submit(registry, &mut events),
            PageCommand::SelectSuggestion(completion) => {
                self.select_suggestion(registry, &completion, &mut events)
            }
            PageCommand::SettleInput => {
                let was_open = self.input.is_open();
                self.input.settle();
                self.push_visibility(was_open, &mut events);
            }
            PageCommand::AddChip(chip) => {
                if self.add_chip(chip, &mut events) {
                    self.reset_page(&mut events);
                }
            }
            PageCommand::RemoveChip(key) => {
                if let Some(chip) = self.chips.remove(&key) {
                    if let ChipKind::Field(field) = &chip.kind {
                        if self.dropdowns.deselect(field, &chip.value) {
                            events.push(PageEvent::DropdownChanged {
                                field: field.clone(),
                            });
                        }
                    }
                    events.push(PageEvent::ChipRemoved(chip));
                    self.reset_page(&mut events);
                }
            }
            PageCommand::ClearAll => {
                let was_open = self.input.is_open();
                self.chips.clear();
                self.dropdowns.clear();
                self.input.clear();
                events.push(PageEvent::ChipsCleared);
                events.push(PageEvent::QueryChanged(String::new()));
                self.push_visibility(was_open, &mut events);
                self.reset_page(&mut events);
            }
            PageCommand::ToggleOption {
                field,
                value,
                checked,
            } => self.toggle_option(registry, &field, &value, checked, &mut events),
            PageCommand::SelectOption { field, value } => {
                self.select_option(registry, &field, &value, &mut events)
            }
            PageCommand::SortBy(field) => {
                let dir = match &self.sort {
                    Some(current) if current.field.eq_ignore_ascii_case(&field) => {
                        current.dir.toggle()
                    }
                    _ => Dir::Asc,
                };
                self.sort = Some(SortSpec::new(field, dir));
                events.push(PageEvent::SortChanged(self.sort.clone()));
            }
            PageCommand::SetSort(sort) => {
                if self.sort != sort {
                    self.sort = sort;
                    events.push(PageEvent::SortChanged(self.sort.clone()));
                }
            }
            PageCommand::SetPage(page) => {
                let page = page.max(1);
                if self.page != page {
                    self.page = page;
                    events.push(PageEvent::PageChanged(page));
                }
            }
            PageCommand::SetPerPage(per_page) => {
                let per_page = per_page.max(1);
                if self.per_page != per_page {
                    self.per_page = per_page;
                    events.push(PageEvent::PerPageChanged(per_page));
                }
                self.reset_page(&mut events);
            }
        }
        events
    }

    fn push_visibility(&self, was_open: bool, events: &mut Vec<PageEvent>) {
        if self.input.is_open() != was_open {
            events.push(PageEvent::SuggestionsVisible(self.input.is_open()));
        }
    }

    fn reset_page(&mut self, events: &mut Vec<PageEvent>) {
        if self.page != 1 {
            self.page = 1;
            events.push(PageEvent::PageChanged(1));
        }
    }

    fn submit(&mut self, registry: &FieldRegistry, events: &mut Vec<PageEvent>) {
        let text = self.input.text().trim();
        if text.is_empty() || field_keyword(registry, text).is_some() {
            return;
        }
        let parsed = parse_query(registry, text);
        let chips: Vec<FilterChip> = if parsed.clauses().len() > 1 {
            parsed
                .clauses()
                .iter()
                .filter_map(|clause| {
                    let field = registry.describe(&clause.field)?;
                    Some(FilterChip::field(field, clause.raw_value.as_str()))
                })
                .collect()
        } else {
            match split_field_value(registry, text) {
                Some((field, value)) => vec![FilterChip::field(field, value.trim())],
                None => vec![FilterChip::search(text)],
            }
        };
        self.commit_all(chips, events);
    }

    fn select_suggestion(
        &mut self,
        registry: &FieldRegistry,
        completion: &str,
        events: &mut Vec<PageEvent>,
    ) {
        let selection = Suggester::new(registry).classify(completion);
        let chip = match selection {
            Selection::ReopenScoped { keyword, .. } => {
                let was_open = self.input.is_open();
                self.input.set_programmatic(keyword);
                events.push(PageEvent::QueryChanged(self.input.text().to_string()));
                self.push_visibility(was_open, events);
                return;
            }
            Selection::CommitField { field, value } => match registry.describe(&field) {
                Some(descriptor) => FilterChip::field(descriptor, value),
                None => return,
            },
            Selection::CommitSearch(text) => FilterChip::search(text),
        };
        self.commit(chip, events);
    }

    /// Turns the search box into `chip` and clears it.
    fn commit(&mut self, chip: FilterChip, events: &mut Vec<PageEvent>) {
        self.commit_all(vec![chip], events);
    }

    /// Clears the input and adds every chip in one step.
    fn commit_all(&mut self, chips: Vec<FilterChip>, events: &mut Vec<PageEvent>) {
        let was_open = self.input.is_open();
        self.input.begin_commit();
        for chip in chips {
            self.add_chip(chip, events);
        }
        self.input.finish_commit();
        events.push(PageEvent::QueryChanged(String::new()));
        self.push_visibility(was_open, events);
        self.reset_page(events);
    }

    /// Adds a chip and mirrors field chips into their dropdown.
    fn add_chip(&mut self, chip: FilterChip, events: &mut Vec<PageEvent>) -> bool {
        if self.chips.contains(&chip.key) {
            return false;
        }
        if let ChipKind::Field(field) = &chip.kind {
            let field = field.clone();
            let mirrored = match self.dropdowns.mode(&field) {
                Some(DropdownMode::Multi) => self.dropdowns.toggle(&field, &chip.value, true),
                Some(DropdownMode::Single) => {
                    self.remove_field_chips(&field, events);
                    self.dropdowns.select(&field, &chip.value)
                }
                None => false,
            };
            if mirrored {
                events.push(PageEvent::DropdownChanged { field });
            }
        }
        self.chips.add(chip.clone());
        events.push(PageEvent::ChipAdded(chip));
        true
    }

    fn remove_field_chips(&mut self, field: &str, events: &mut Vec<PageEvent>) {
        let keys: Vec<String> = self
            .chips
            .iter()
            .filter(|c| c.kind.field() == Some(field))
            .map(|c| c.key.clone())
            .collect();
        for key in keys {
            if let Some(chip) = self.chips.remove(&key) {
                events.push(PageEvent::ChipRemoved(chip));
            }
        }
    }

    fn toggle_option(
        &mut self,
        registry: &FieldRegistry,
        field: &str,
        value: &str,
        checked: bool,
        events: &mut Vec<PageEvent>,
    ) {
        let Some(descriptor) = registry.describe(field) else {
            return;
        };
        if !self.dropdowns.toggle(field, value, checked) {
            return;
        }
        events.push(PageEvent::DropdownChanged {
            field: descriptor.name().to_string(),
        });
        let chip = FilterChip::field(descriptor, value);
        if checked {
            if self.chips.add(chip.clone()) {
                events.push(PageEvent::ChipAdded(chip));
            }
        } else if let Some(removed) = self.chips.remove(&chip.key) {
            events.push(PageEvent::ChipRemoved(removed));
        }
        self.reset_page(events);
    }

    fn select_option(
        &mut self,
        registry: &FieldRegistry,
        field: &str,
        value: &str,
        events: &mut Vec<PageEvent>,
    ) {
        let Some(descriptor) = registry.describe(field) else {
            return;
        };
        if !self.dropdowns.select(field, value) {
            return;
        }
        events.push(PageEvent::DropdownChanged {
            field: descriptor.name().to_string(),
        });
        self.remove_field_chips(descriptor.name(), events);
        if value != ALL {
            let chip = FilterChip::field(descriptor, value);
            if self.chips.add(chip.clone()) {
                events.push(PageEvent::ChipAdded(chip));
            }
        }
        self.reset_page(events);
    }

    // ========================================================================
    // Derived data
    // ========================================================================

    /// The filter composed from the search text, chips and dropdowns.
    pub fn filter(&self, registry: &FieldRegistry) -> Filter {
        let filter = Filter::new().and_query(&parse_query(registry, self.input.text()));
        self.dropdowns.apply_to(self.chips.apply_to(filter))
    }

    /// Suggestions for the current text, empty while the list is closed.
    pub fn suggestions<R: Record>(&self, registry: &FieldRegistry, records: &[R]) -> Suggestions {
        if !self.input.is_open() {
            return Suggestions::default();
        }
        Suggester::new(registry)
            .with_limits(self.limits)
            .suggest(records, self.input.text())
    }

    /// Options for a dropdown.
    pub fn dropdown_options<R: Record>(
        &self,
        field: &str,
        registry: &FieldRegistry,
        records: &[R],
    ) -> Vec<String> {
        self.dropdowns.options(field, registry, records)
    }

    // ========================================================================
    // Location sync
    // ========================================================================

    /// The state worth keeping in the location.
    pub fn location(&self) -> LocationParams {
        let mut params = LocationParams::new(self.default_per_page);
        params.query = self.input.text().to_string();
        params.page = self.page;
        params.per_page = self.per_page;
        let singles: Vec<String> = self
            .dropdowns
            .fields()
            .filter(|f| self.dropdowns.mode(f) == Some(DropdownMode::Single))
            .map(str::to_string)
            .collect();
        for field in singles {
            params.set_selection(&field, self.dropdowns.single_value(&field));
        }
        params
    }

    /// Encoded location query string.
    pub fn location_query(&self) -> String {
        self.location().encode(self.default_per_page)
    }

    /// Restores state from a location. Page and page size are applied last
    /// so restoring filters does not reset them.
    pub fn restore_location(&mut self, registry: &FieldRegistry, params: &LocationParams) {
        self.input = SearchInput::with_text(params.query.clone());
        for (field, value) in &params.selections {
            let mut ignored = Vec::new();
            self.select_option(registry, field, value, &mut ignored);
        }
        self.per_page = params.per_page.max(1);
        self.page = params.page.max(1);
    }

    /// Single-select fields, for decoding a location.
    pub fn single_select_fields(&self) -> Vec<&str> {
        self.dropdowns
            .fields()
            .filter(|f| self.dropdowns.mode(f) == Some(DropdownMode::Single))
            .collect()
    }
}

/// Convenience for building a field chip from a registry lookup.
pub fn field_chip(registry: &FieldRegistry, field: &str, value: &str) -> Option<FilterChip> {
    registry
        .describe(field)
        .map(|descriptor: &FieldDescriptor| FilterChip::field(descriptor, value))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use clusterview_seeker::MatchMode;

    use super::*;
    use crate::input::InputPhase;

    fn registry() -> FieldRegistry {
        FieldRegistry::builder()
            .field(FieldDescriptor::string("name"))
            .field(FieldDescriptor::enumerated("status"))
            .field(FieldDescriptor::enumerated("cluster"))
            .field(
                FieldDescriptor::enumerated("role")
                    .column("roles")
                    .separator(',')
                    .selection(MatchMode::Contains),
            )
            .field(FieldDescriptor::enumerated("os"))
            .field(FieldDescriptor::numeric("memory"))
            .build()
            .unwrap()
    }

    fn config() -> PageConfig {
        PageConfig::new("nodes")
            .dropdown("cluster", DropdownMode::Multi)
            .dropdown("status", DropdownMode::Multi)
            .dropdown("os", DropdownMode::Single)
    }

    fn row(name: &str, status: &str, cluster: &str) -> BTreeMap<String, String> {
        [("name", name), ("status", status), ("cluster", cluster)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn setup() -> (FieldRegistry, PageState) {
        let state = PageState::new(&config());
        (registry(), state)
    }

    #[test]
    fn typing_opens_suggestions_and_resets_page() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::SetPage(4));
        let events = state.dispatch(&registry, PageCommand::Type("sta".into()));
        assert_eq!(
            events,
            vec![
                PageEvent::QueryChanged("sta".into()),
                PageEvent::SuggestionsVisible(true),
                PageEvent::PageChanged(1),
            ]
        );
    }

    #[test]
    fn submit_field_value_adds_field_chip() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::Type("status:Ready".into()));
        let events = state.dispatch(&registry, PageCommand::Submit);
        assert!(events.contains(&PageEvent::DropdownChanged {
            field: "status".into()
        }));
        assert!(events.contains(&PageEvent::QueryChanged(String::new())));
        assert_eq!(state.query(), "");
        assert_eq!(state.input().phase(), InputPhase::Idle);
        let chip = state.chips().get("status-ready").unwrap();
        assert_eq!(chip.label, "status:Ready");
        assert!(state.dropdowns().is_selected("status", "Ready"));
    }

    #[test]
    fn submit_free_text_adds_search_chip() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::Type("ip 10".into()));
        state.dispatch(&registry, PageCommand::Submit);
        assert!(state.chips().contains("search-ip+10"));
    }

    #[test]
    fn submit_multi_clause_query_keeps_every_clause() {
        let (registry, mut state) = setup();
        let records: Vec<_> = [("a", "Ready", "16"), ("b", "Unknown", "12"), ("c", "Ready", "4")]
            .into_iter()
            .map(|(name, status, memory)| {
                let mut record = row(name, status, "east");
                record.insert("memory".into(), memory.into());
                record
            })
            .collect();

        state.dispatch(&registry, PageCommand::Type("status:Ready memory:>6".into()));
        let before = state.filter(&registry).count(&records, &registry);
        state.dispatch(&registry, PageCommand::Submit);

        assert_eq!(before, 1);
        assert_eq!(state.query(), "");
        assert_eq!(state.filter(&registry).count(&records, &registry), before);
        let keys: Vec<_> = state.chips().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["status-ready", "memory->6"]);
        assert!(state.dropdowns().is_selected("status", "Ready"));
    }

    #[test]
    fn submit_bare_keyword_or_empty_does_nothing() {
        let (registry, mut state) = setup();
        assert!(state.dispatch(&registry, PageCommand::Submit).is_empty());
        state.dispatch(&registry, PageCommand::Type("status:".into()));
        assert!(state.dispatch(&registry, PageCommand::Submit).is_empty());
        assert_eq!(state.query(), "status:");
        assert!(state.input().is_open());
    }

    #[test]
    fn keyword_suggestion_keeps_list_open() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::Type("clu".into()));
        state.dispatch(&registry, PageCommand::SelectSuggestion("cluster:".into()));
        assert_eq!(state.query(), "cluster:");
        assert_eq!(state.input().phase(), InputPhase::ProgrammaticUpdate);
        assert!(state.input().is_open());
        assert!(state.chips().is_empty());

        state.dispatch(&registry, PageCommand::SettleInput);
        assert_eq!(state.input().phase(), InputPhase::UserTyping);
        assert!(state.input().is_open());
    }

    #[test]
    fn blur_before_settle_keeps_list_closed() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::Type("clu".into()));
        state.dispatch(&registry, PageCommand::SelectSuggestion("cluster:".into()));
        state.dispatch(&registry, PageCommand::Blur);

        let events = state.dispatch(&registry, PageCommand::SettleInput);
        assert!(events.is_empty());
        assert!(!state.input().is_open());
        let suggestions = state.suggestions(&registry, &[row("a", "Ready", "east")]);
        assert!(suggestions.sections.is_empty());
    }

    #[test]
    fn value_suggestion_commits_chip() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::Type("cluster:ea".into()));
        state.dispatch(&registry, PageCommand::SelectSuggestion("cluster:east".into()));
        assert!(state.chips().contains("cluster-east"));
        assert_eq!(state.query(), "");
        assert!(!state.input().is_open());
    }

    #[test]
    fn dropdown_toggle_mirrors_chip() {
        let (registry, mut state) = setup();
        let events = state.dispatch(
            &registry,
            PageCommand::ToggleOption {
                field: "cluster".into(),
                value: "Production-East".into(),
                checked: true,
            },
        );
        assert_eq!(events.len(), 2);
        assert!(state.chips().contains("cluster-production-east"));

        // Typing the same cluster does not duplicate the chip
        state.dispatch(&registry, PageCommand::Type("cluster:production-east".into()));
        state.dispatch(&registry, PageCommand::Submit);
        assert_eq!(state.chips().len(), 1);
        assert_eq!(state.dropdowns().selected("cluster").len(), 1);

        state.dispatch(
            &registry,
            PageCommand::ToggleOption {
                field: "cluster".into(),
                value: "Production-East".into(),
                checked: false,
            },
        );
        assert!(state.chips().is_empty());
    }

    #[test]
    fn removing_chip_unselects_dropdown() {
        let (registry, mut state) = setup();
        state.dispatch(
            &registry,
            PageCommand::ToggleOption {
                field: "status".into(),
                value: "Ready".into(),
                checked: true,
            },
        );
        let events = state.dispatch(&registry, PageCommand::RemoveChip("status-ready".into()));
        assert!(matches!(events[0], PageEvent::DropdownChanged { .. }));
        assert!(state.dropdowns().selected("status").is_empty());
    }

    #[test]
    fn single_select_replaces_chip() {
        let (registry, mut state) = setup();
        let select = |value: &str| PageCommand::SelectOption {
            field: "os".into(),
            value: value.into(),
        };
        state.dispatch(&registry, select("Linux"));
        state.dispatch(&registry, select("Windows"));
        let keys: Vec<_> = state.chips().iter().map(|c| c.key.clone()).collect();
        assert_eq!(keys, vec!["os-windows"]);
        assert_eq!(state.dropdowns().single_value("os"), "Windows");

        state.dispatch(&registry, select(ALL));
        assert!(state.chips().is_empty());
        assert_eq!(state.dropdowns().single_value("os"), ALL);
    }

    #[test]
    fn clear_all() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::Type("status:Ready".into()));
        state.dispatch(&registry, PageCommand::Submit);
        state.dispatch(&registry, PageCommand::Type("east".into()));
        state.dispatch(&registry, PageCommand::ClearAll);
        assert!(state.chips().is_empty());
        assert!(state.dropdowns().is_empty());
        assert_eq!(state.query(), "");
        assert!(state.filter(&registry).is_empty());
    }

    #[test]
    fn sort_by_toggles_direction() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::SortBy("memory".into()));
        assert_eq!(state.sort(), Some(&SortSpec::asc("memory")));
        state.dispatch(&registry, PageCommand::SortBy("memory".into()));
        assert_eq!(state.sort(), Some(&SortSpec::desc("memory")));
        state.dispatch(&registry, PageCommand::SortBy("name".into()));
        assert_eq!(state.sort(), Some(&SortSpec::asc("name")));
        let events = state.dispatch(&registry, PageCommand::SetSort(None));
        assert_eq!(events, vec![PageEvent::SortChanged(None)]);
    }

    #[test]
    fn per_page_change_resets_page() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::SetPage(3));
        let events = state.dispatch(&registry, PageCommand::SetPerPage(20));
        assert_eq!(
            events,
            vec![PageEvent::PerPageChanged(20), PageEvent::PageChanged(1)]
        );
        assert_eq!(state.per_page(), 20);
    }

    #[test]
    fn filter_composes_every_source() {
        let (registry, mut state) = setup();
        let records = vec![
            row("a", "Ready", "east"),
            row("b", "NotReady", "east"),
            row("c", "Ready", "west"),
        ];
        for status in ["Ready", "NotReady"] {
            state.dispatch(
                &registry,
                PageCommand::ToggleOption {
                    field: "status".into(),
                    value: status.into(),
                    checked: true,
                },
            );
        }
        state.dispatch(&registry, PageCommand::Type("cluster:east".into()));
        assert_eq!(state.filter(&registry).count(&records, &registry), 2);

        state.dispatch(&registry, PageCommand::RemoveChip("status-notready".into()));
        assert_eq!(state.filter(&registry).count(&records, &registry), 1);
    }

    #[test]
    fn suggestions_follow_visibility() {
        let (registry, mut state) = setup();
        let records = vec![row("a", "Ready", "east")];
        state.dispatch(&registry, PageCommand::Type("clu".into()));
        assert!(state.suggestions(&registry, &records).has_results);
        state.dispatch(&registry, PageCommand::Blur);
        assert!(!state.suggestions(&registry, &records).has_results);
        state.dispatch(&registry, PageCommand::Focus);
        assert!(state.suggestions(&registry, &records).has_results);
    }

    #[test]
    fn location_round_trip() {
        let (registry, mut state) = setup();
        state.dispatch(&registry, PageCommand::SelectOption {
            field: "os".into(),
            value: "Linux".into(),
        });
        state.dispatch(&registry, PageCommand::Type("memory:>=8".into()));
        state.dispatch(&registry, PageCommand::SetPerPage(20));
        state.dispatch(&registry, PageCommand::SetPage(2));
        let encoded = state.location_query();
        assert_eq!(encoded, "query=memory%3A%3E%3D8&os=Linux&page=2&perPage=20");

        let mut restored = PageState::new(&config());
        let fields = restored.single_select_fields().join(",");
        assert_eq!(fields, "os");
        let params = LocationParams::decode(&encoded, 10, &["os"]);
        restored.restore_location(&registry, &params);
        assert_eq!(restored.query(), "memory:>=8");
        assert_eq!(restored.page(), 2);
        assert_eq!(restored.per_page(), 20);
        assert_eq!(restored.dropdowns().single_value("os"), "Linux");
        assert!(restored.chips().contains("os-linux"));
        assert_eq!(restored.location_query(), encoded);
    }

    #[test]
    fn field_chip_helper() {
        let registry = registry();
        assert_eq!(
            field_chip(&registry, "Status", "Ready").map(|c| c.key),
            Some("status-ready".to_string())
        );
        assert!(field_chip(&registry, "owner", "x").is_none());
    }
}
