//! Property-based tests for column rules, the reducer and location sync.

use clusterview_page::{
    reorder, ColumnLayout, ColumnPreferences, DropdownMode, LocationParams, MemoryStore,
    PageCommand, PageConfig, PageState,
};
use clusterview_seeker::{FieldDescriptor, FieldRegistry};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

const KEYS: [&str; 8] = [
    "name", "status", "roles", "cluster", "cpu", "memory", "pods", "bogus",
];

fn registry() -> FieldRegistry {
    FieldRegistry::builder()
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::enumerated("status"))
        .field(FieldDescriptor::enumerated("role").column("roles"))
        .field(FieldDescriptor::enumerated("cluster"))
        .field(FieldDescriptor::numeric("cpu"))
        .field(FieldDescriptor::numeric("memory"))
        .field(FieldDescriptor::numeric("pods"))
        .build()
        .unwrap()
}

fn keys_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(KEYS.to_vec()), 0..12)
        .prop_map(|keys| keys.into_iter().map(String::from).collect())
}

fn command_strategy() -> impl Strategy<Value = PageCommand> {
    prop_oneof![
        "[a-z:>=<0-9 ]{0,12}".prop_map(PageCommand::Type),
        Just(PageCommand::Submit),
        Just(PageCommand::Focus),
        Just(PageCommand::Blur),
        Just(PageCommand::SettleInput),
        Just(PageCommand::ClearAll),
        prop::sample::select(vec!["east", "west", "north"]).prop_map(|v| {
            PageCommand::ToggleOption {
                field: "cluster".into(),
                value: v.into(),
                checked: true,
            }
        }),
        "[a-z-]{1,12}".prop_map(PageCommand::RemoveChip),
        (1usize..20).prop_map(PageCommand::SetPage),
        (1usize..60).prop_map(PageCommand::SetPerPage),
        prop::sample::select(vec!["name", "cpu"]).prop_map(|f| PageCommand::SortBy(f.into())),
    ]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Sanitized columns always hold the required column, no duplicates, no
    /// unknown keys, and never exceed the maximum.
    #[test]
    fn sanitize_invariants(keys in keys_strategy(), max in 1usize..10) {
        let layout = ColumnLayout::from_registry(&registry(), ["name", "status"], max);
        let clean = layout.sanitize(keys);
        prop_assert!(clean.iter().any(|k| k == "name"));
        prop_assert!(clean.len() <= max);
        prop_assert!(clean.iter().all(|k| layout.column(k).is_some()));
        let mut dedup = clean.clone();
        dedup.sort();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), clean.len());
    }

    /// Saving then loading returns the sanitized list.
    #[test]
    fn save_load_round_trip(keys in keys_strategy()) {
        let layout = ColumnLayout::from_registry(&registry(), ["name"], 9);
        let prefs = ColumnPreferences::new(MemoryStore::new());
        prefs.save("nodes", &layout, &keys).unwrap();
        prop_assert_eq!(prefs.load("nodes", &layout), layout.sanitize(keys));
    }

    /// Reordering keeps the same elements.
    #[test]
    fn reorder_is_a_permutation(
        mut items in prop::collection::vec(0u32..100, 0..10),
        from in 0usize..12,
        to in 0usize..12,
    ) {
        let mut before = items.clone();
        reorder(&mut items, from, to);
        let mut after = items.clone();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    /// Commands that change the filter land on page 1. Page and page size
    /// stay positive whatever the command sequence.
    #[test]
    fn reducer_keeps_paging_valid(commands in prop::collection::vec(command_strategy(), 0..24)) {
        let registry = registry();
        let config = PageConfig::new("nodes").dropdown("cluster", DropdownMode::Multi);
        let mut state = PageState::new(&config);
        for command in commands {
            let filters = matches!(
                command,
                PageCommand::ClearAll | PageCommand::ToggleOption { .. } | PageCommand::SetPerPage(_)
            );
            let events = state.dispatch(&registry, command);
            prop_assert!(state.page() >= 1);
            prop_assert!(state.per_page() >= 1);
            if filters && !events.is_empty() {
                prop_assert_eq!(state.page(), 1);
            }
        }
    }

    /// Location encoding round-trips.
    #[test]
    fn location_round_trip(
        query in ".{0,20}",
        page in 1usize..50,
        per_page in prop::sample::select(vec![10usize, 20, 50, 100]),
        os in prop::option::of("[A-Za-z ]{1,10}"),
    ) {
        let mut params = LocationParams::new(10);
        params.query = query;
        params.page = page;
        params.per_page = per_page;
        if let Some(os) = os.filter(|v| v != "All") {
            params.set_selection("os", &os);
        }
        let decoded = LocationParams::decode(&params.encode(10), 10, &["os"]);
        prop_assert_eq!(decoded, params);
    }
}

