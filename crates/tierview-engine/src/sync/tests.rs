use super::*;
use pretty_assertions::assert_eq;
use tierview_core::TabularFilter;

fn committed_with_sort() -> ViewState {
    ViewState::new(
        vec![SortEntry::asc("partName")],
        vec![TabularFilter::one_of("status", ["active"])],
    )
}

fn add_filter(filter_id: &str, value: &str) -> DraftEvent {
    DraftEvent::LocalEdit(DraftEdit::AddFilter {
        filter_id: filter_id.to_string(),
        values: vec![Scalar::from(value)],
        condition: FilterCondition::Is,
    })
}

fn add_sort(column_id: &str) -> DraftEvent {
    DraftEvent::LocalEdit(DraftEdit::AddSort {
        column_id: column_id.to_string(),
        direction: SortDirection::Asc,
    })
}

#[test]
fn test_open_decodes_committed_state_clean() {
    let state = SyncState::new(committed_with_sort()).reduce(DraftEvent::Open);

    assert_eq!(state.phase(), DraftPhase::OpenClean);
    let draft = state.draft().unwrap();
    assert_eq!(draft.sorting[0].id, "sort-0");
    assert_eq!(draft.sorting[0].column_id, "partName");
    assert_eq!(draft.filters[0].id, "filter-status");
    assert!(!state.has_draft_changes());
}

#[test]
fn test_close_discards_unapplied_edits() {
    let state = SyncState::new(ViewState::default())
        .reduce(DraftEvent::Open)
        .reduce(add_filter("status", "active"));
    assert_eq!(state.phase(), DraftPhase::OpenDirty);
    assert!(state.has_draft_changes());

    let state = state.reduce(DraftEvent::Close);
    assert_eq!(state.phase(), DraftPhase::Closed);
    assert!(state.committed().filters.is_empty());
    assert!(state.draft().is_none());
}

#[test]
fn test_reopen_after_close_starts_from_committed() {
    let state = SyncState::new(committed_with_sort())
        .reduce(DraftEvent::Open)
        .reduce(DraftEvent::LocalEdit(DraftEdit::ClearSorts))
        .reduce(DraftEvent::Close)
        .reduce(DraftEvent::Open);

    assert_eq!(state.phase(), DraftPhase::OpenClean);
    assert_eq!(state.draft().unwrap().sorting.len(), 1);
}

#[test]
fn test_apply_commits_draft_and_returns_to_clean() {
    let state = SyncState::new(ViewState::default())
        .reduce(DraftEvent::Open)
        .reduce(add_sort("price"))
        .reduce(add_filter("supplier", "Acme"))
        .reduce(DraftEvent::Apply);

    assert_eq!(state.phase(), DraftPhase::OpenClean);
    assert_eq!(state.committed().sorting, vec![SortEntry::asc("price")]);
    assert_eq!(
        state.committed().filters,
        vec![TabularFilter::new("supplier", Scalar::from("Acme"))]
    );
    assert!(!state.has_draft_changes());
}

#[test]
fn test_apply_drops_rows_without_values() {
    let state = SyncState::new(ViewState::default())
        .reduce(DraftEvent::Open)
        .reduce(DraftEvent::LocalEdit(DraftEdit::AddFilter {
            filter_id: "status".to_string(),
            values: Vec::new(),
            condition: FilterCondition::Is,
        }))
        .reduce(DraftEvent::Apply);

    assert!(state.committed().filters.is_empty());
    assert!(state.draft().unwrap().filters.is_empty());
}

#[test]
fn test_external_change_while_open_redecodes_and_marks_dirty() {
    let external = ViewState::new(vec![SortEntry::desc("price")], Vec::new());
    let state = SyncState::new(committed_with_sort())
        .reduce(DraftEvent::Open)
        .reduce(add_filter("supplier", "Acme"))
        .reduce(DraftEvent::CommittedChanged(external.clone()));

    assert_eq!(state.phase(), DraftPhase::OpenDirty);
    assert_eq!(state.committed(), &external);
    let draft = state.draft().unwrap();
    assert_eq!(draft.sorting.len(), 1);
    assert_eq!(draft.sorting[0].column_id, "price");
    assert!(draft.filters.is_empty());
    // Dirty, but the content mirrors the committed state
    assert!(!state.has_draft_changes());
}

#[test]
fn test_equal_external_change_is_ignored() {
    let state = SyncState::new(committed_with_sort())
        .reduce(DraftEvent::Open)
        .reduce(DraftEvent::CommittedChanged(ViewState::new(
            vec![SortEntry::asc("partName")],
            vec![TabularFilter::new("status", Scalar::from("active"))],
        )));
    assert_eq!(state.phase(), DraftPhase::OpenClean);
}

#[test]
fn test_external_change_while_closed_is_picked_up_on_open() {
    let external = ViewState::new(vec![SortEntry::desc("price")], Vec::new());
    let state = SyncState::new(ViewState::default())
        .reduce(DraftEvent::CommittedChanged(external));
    assert_eq!(state.phase(), DraftPhase::Closed);

    let state = state.reduce(DraftEvent::Open);
    assert_eq!(state.phase(), DraftPhase::OpenClean);
    assert_eq!(state.draft().unwrap().sorting[0].column_id, "price");
}

#[test]
fn test_clear_is_clean_only_when_committed_is_empty() {
    let state = SyncState::new(ViewState::default())
        .reduce(DraftEvent::Open)
        .reduce(add_sort("price"))
        .reduce(DraftEvent::Clear);
    assert_eq!(state.phase(), DraftPhase::OpenClean);

    let state = SyncState::new(committed_with_sort())
        .reduce(DraftEvent::Open)
        .reduce(DraftEvent::Clear);
    assert_eq!(state.phase(), DraftPhase::OpenDirty);
    assert!(state.draft().unwrap().is_empty());
    assert_eq!(state.committed(), &committed_with_sort());
}

#[test]
fn test_edits_without_session_are_ignored() {
    let state = SyncState::new(ViewState::default()).reduce(add_sort("price"));
    assert_eq!(state, SyncState::new(ViewState::default()));
}

#[test]
fn test_noop_edit_keeps_session_clean() {
    let state = SyncState::new(committed_with_sort())
        .reduce(DraftEvent::Open)
        .reduce(DraftEvent::LocalEdit(DraftEdit::SetSortDirection {
            id: "sort-0".to_string(),
            direction: SortDirection::Asc,
        }))
        .reduce(DraftEvent::LocalEdit(DraftEdit::RemoveFilter {
            id: "filter-missing".to_string(),
        }));
    assert_eq!(state.phase(), DraftPhase::OpenClean);
}

#[test]
fn test_duplicate_sort_column_is_refused() {
    let state = SyncState::new(committed_with_sort())
        .reduce(DraftEvent::Open)
        .reduce(add_sort("partName"));
    assert_eq!(state.phase(), DraftPhase::OpenClean);
    assert_eq!(state.draft().unwrap().sorting.len(), 1);

    let state = state
        .reduce(add_sort("price"))
        .reduce(DraftEvent::LocalEdit(DraftEdit::SetSortColumn {
            id: "sort-1".to_string(),
            column_id: "partName".to_string(),
        }));
    let sorting = &state.draft().unwrap().sorting;
    assert_eq!(sorting[1].column_id, "price");
}

#[test]
fn test_duplicate_filter_is_refused() {
    let state = SyncState::new(committed_with_sort())
        .reduce(DraftEvent::Open)
        .reduce(add_filter("status", "inactive"));
    assert_eq!(state.phase(), DraftPhase::OpenClean);
    assert_eq!(
        state.draft().unwrap().filters[0].values,
        vec![Scalar::from("active")]
    );
}

#[test]
fn test_added_sort_ids_stay_unique_after_removal() {
    let state = SyncState::new(ViewState::default())
        .reduce(DraftEvent::Open)
        .reduce(add_sort("a"))
        .reduce(add_sort("b"))
        .reduce(DraftEvent::LocalEdit(DraftEdit::RemoveSort {
            id: "sort-0".to_string(),
        }))
        .reduce(add_sort("c"));

    let ids: Vec<_> = state
        .draft()
        .unwrap()
        .sorting
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(ids, vec!["sort-1", "sort-2"]);
}

#[test]
fn test_move_sort_changes_priority() {
    let committed = ViewState::new(
        vec![SortEntry::asc("a"), SortEntry::asc("b"), SortEntry::desc("c")],
        Vec::new(),
    );
    let state = SyncState::new(committed)
        .reduce(DraftEvent::Open)
        .reduce(DraftEvent::LocalEdit(DraftEdit::MoveSort {
            id: "sort-2".to_string(),
            to_index: 0,
        }))
        .reduce(DraftEvent::Apply);

    assert_eq!(
        state.committed().sorting,
        vec![SortEntry::desc("c"), SortEntry::asc("a"), SortEntry::asc("b")]
    );
}

#[test]
fn test_condition_edit_survives_apply() {
    let committed = ViewState::new(Vec::new(), vec![TabularFilter::new("price", Scalar::from(10))]);
    let state = SyncState::new(committed)
        .reduce(DraftEvent::Open)
        .reduce(DraftEvent::LocalEdit(DraftEdit::SetFilterCondition {
            id: "filter-price".to_string(),
            condition: FilterCondition::GreaterThan,
        }));
    assert!(state.has_draft_changes());

    let state = state.reduce(DraftEvent::Apply);
    assert_eq!(
        state.committed().filters[0].value.condition(),
        FilterCondition::GreaterThan
    );
}

#[test]
fn test_synchronizer_wrapper() {
    let mut sync = DraftSynchronizer::new(ViewState::default());
    assert_eq!(sync.phase(), DraftPhase::Closed);

    sync.open();
    sync.edit(DraftEdit::AddSort {
        column_id: "price".to_string(),
        direction: SortDirection::Desc,
    });
    assert!(sync.has_draft_changes());

    let committed = sync.apply().clone();
    assert_eq!(committed.sorting, vec![SortEntry::desc("price")]);
    assert_eq!(sync.phase(), DraftPhase::OpenClean);

    sync.committed_changed(ViewState::default());
    assert_eq!(sync.phase(), DraftPhase::OpenDirty);

    sync.close();
    assert_eq!(sync.phase(), DraftPhase::Closed);
    assert!(sync.committed().is_empty());
}

#[test]
fn test_toggle_column_sort_single() {
    let sorting = toggle_column_sort(&[], "price", false);
    assert_eq!(sorting, vec![SortEntry::asc("price")]);

    let sorting = toggle_column_sort(&sorting, "price", false);
    assert_eq!(sorting, vec![SortEntry::desc("price")]);

    let sorting = toggle_column_sort(&sorting, "price", false);
    assert!(sorting.is_empty());

    // Replaces other columns
    let sorting = toggle_column_sort(&[SortEntry::asc("partName")], "price", false);
    assert_eq!(sorting, vec![SortEntry::asc("price")]);
}

#[test]
fn test_toggle_column_sort_multi() {
    let base = vec![SortEntry::asc("partName"), SortEntry::asc("price")];

    let sorting = toggle_column_sort(&base, "warehouse", true);
    assert_eq!(sorting.len(), 3);
    assert_eq!(sorting[2], SortEntry::asc("warehouse"));

    let sorting = toggle_column_sort(&base, "partName", true);
    assert_eq!(sorting, vec![SortEntry::desc("partName"), SortEntry::asc("price")]);

    let sorting = toggle_column_sort(&sorting, "partName", true);
    assert_eq!(sorting, vec![SortEntry::asc("price")]);
}
