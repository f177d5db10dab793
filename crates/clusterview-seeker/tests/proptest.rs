//! Property-based tests for seeker using proptest.

use std::collections::BTreeMap;

use proptest::prelude::*;
use clusterview_seeker::{
    leading_number, page_count, paginate, parse_query, sort_records, FieldDescriptor,
    FieldRegistry, Filter, Op, ParsedClause, Predicate, SortSpec,
};

// ============================================================================
// Test helpers
// ============================================================================

type Row = BTreeMap<String, String>;

fn registry() -> FieldRegistry {
    FieldRegistry::builder()
        .field(FieldDescriptor::string("name"))
        .field(FieldDescriptor::enumerated("status"))
        .field(FieldDescriptor::numeric("memory"))
        .build()
        .unwrap()
}

fn row(name: String, status: String, memory: String) -> Row {
    let mut row = Row::new();
    row.insert("name".into(), name);
    row.insert("status".into(), status);
    row.insert("memory".into(), memory);
    row
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        "[a-z]{1,8}",
        prop::sample::select(vec!["Ready", "NotReady", "Unknown"]),
        prop_oneof!["[0-9]{1,3}(\\.[0-9]{1,2})? GiB / 16 GiB", ".{0,12}"],
    )
        .prop_map(|(name, status, memory)| row(name, status.to_string(), memory))
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Evaluation is total: arbitrary values and operands never panic.
    #[test]
    fn evaluate_never_panics(
        record in row_strategy(),
        field in prop::sample::select(vec!["name", "status", "memory", "owner"]),
        raw in ".{0,16}",
    ) {
        let registry = registry();
        let typed = Predicate::typed(&ParsedClause::new(field, raw.clone()));
        let picked = Predicate::selected(field, &raw);
        let _ = typed.evaluate(&record, &registry);
        let _ = picked.evaluate(&record, &registry);
        let _ = Predicate::free_text(raw).evaluate(&record, &registry);
    }

    /// Parsing arbitrary text never panics.
    #[test]
    fn parse_never_panics(text in ".{0,40}") {
        let registry = registry();
        let _ = parse_query(&registry, &text);
    }

    /// Filter should never return more records than the input.
    #[test]
    fn filter_never_grows_collection(
        records in prop::collection::vec(row_strategy(), 0..50),
        query in ".{0,20}",
    ) {
        let registry = registry();
        let filter = Filter::new().and_query(&parse_query(&registry, &query));
        prop_assert!(filter.filter(&records, &registry).len() <= records.len());
    }

    /// Count should equal the length of filtered results.
    #[test]
    fn count_equals_filter_len(
        records in prop::collection::vec(row_strategy(), 0..50),
        threshold in 0u32..200,
    ) {
        let registry = registry();
        let filter = Filter::new().and_selected("memory", &format!(">={threshold}"));
        prop_assert_eq!(
            filter.filter(&records, &registry).len(),
            filter.count(&records, &registry)
        );
    }

    /// Adding a second value for the same field never shrinks the result.
    #[test]
    fn more_values_in_a_group_never_shrink(
        records in prop::collection::vec(row_strategy(), 0..50),
    ) {
        let registry = registry();
        let one = Filter::new().and_selected("status", "Ready");
        let two = one.clone().and_selected("status", "NotReady");
        prop_assert!(two.count(&records, &registry) >= one.count(&records, &registry));
    }

    /// Adding a group for another field never grows the result.
    #[test]
    fn more_groups_never_grow(
        records in prop::collection::vec(row_strategy(), 0..50),
        threshold in 0u32..200,
    ) {
        let registry = registry();
        let one = Filter::new().and_selected("status", "Ready");
        let two = one.clone().and_selected("memory", &format!(">{threshold}"));
        prop_assert!(two.count(&records, &registry) <= one.count(&records, &registry));
    }

    /// Numeric comparisons agree with the extracted leading number.
    #[test]
    fn numeric_comparison_matches_extraction(
        whole in 0u32..1000,
        frac in 0u32..100,
        operand in 0u32..1000,
    ) {
        let registry = registry();
        let memory = format!("{whole}.{frac:02} GiB / 16 GiB");
        let record = row("n".into(), "Ready".into(), memory.clone());
        let value = leading_number(&memory).unwrap();
        let predicate = Predicate::typed(&ParsedClause::new("memory", format!(">={operand}")));
        prop_assert_eq!(
            predicate.evaluate(&record, &registry),
            Op::Gte.compare(value, f64::from(operand))
        );
    }

    /// Sorting on a field where every value is equal keeps input order.
    #[test]
    fn sort_is_stable_on_ties(
        names in prop::collection::vec("[a-z]{1,8}", 0..40),
        descending in any::<bool>(),
    ) {
        let registry = registry();
        let records: Vec<Row> = names
            .iter()
            .map(|n| row(n.clone(), "Ready".into(), "8 GiB".into()))
            .collect();
        let mut refs: Vec<&Row> = records.iter().collect();
        let spec = if descending { SortSpec::desc("memory") } else { SortSpec::asc("status") };
        sort_records(&mut refs, &registry, &spec);
        let sorted: Vec<&String> = refs.iter().map(|r| &r["name"]).collect();
        let original: Vec<&String> = names.iter().collect();
        prop_assert_eq!(sorted, original);
    }

    /// Sorting is a permutation of its input.
    #[test]
    fn sort_preserves_length(
        records in prop::collection::vec(row_strategy(), 0..50),
        field in prop::sample::select(vec!["name", "status", "memory"]),
    ) {
        let registry = registry();
        let mut refs: Vec<&Row> = records.iter().collect();
        sort_records(&mut refs, &registry, &SortSpec::asc(field));
        prop_assert_eq!(refs.len(), records.len());
    }

    /// Pages tile the input without overlap or gaps.
    #[test]
    fn pages_cover_all_items(
        len in 0usize..200,
        per_page in 1usize..30,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let pages = page_count(len, per_page);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&items, page, per_page);
            prop_assert!(slice.len() <= per_page);
            seen.extend_from_slice(slice);
        }
        prop_assert_eq!(seen, items);
        prop_assert!(paginate(&(0..len).collect::<Vec<_>>(), pages + 1, per_page).is_empty());
    }
}
