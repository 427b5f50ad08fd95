//! Draft state synchronization
//!
//! An editing surface works on a private draft copy of the committed
//! (applied) sort/filter state. [`SyncState::reduce`] is the whole state
//! machine: a pure `(state, event) -> state'` function.
//!
//! ```text
//! Closed --Open--> OpenClean --LocalEdit / CommittedChanged--> OpenDirty
//! OpenDirty --Apply--> OpenClean
//! OpenDirty --Clear (committed empty)--> OpenClean
//! Open* --Close--> Closed          (draft discarded, committed untouched)
//! ```
//!
//! A committed change while open re-decodes the draft from the new committed
//! state and marks the session dirty. A committed change while closed is only
//! stored; it is picked up by the next `Open`.

use tierview_core::{
    DraftFilterEntry, DraftSortEntry, DraftView, FilterCondition, Scalar, SortDirection,
    SortEntry, ViewState,
};

use crate::codec::{decode_filters, decode_sorting, encode_filters, encode_sorting};
use crate::equality::{filters_equal, sorting_equal};

#[cfg(test)]
mod tests;

/// Observable phase of the synchronizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    /// No editing surface open, no draft
    Closed,
    /// Draft mirrors the last-applied state
    OpenClean,
    /// Draft diverged through local edits or an external committed change
    OpenDirty,
}

/// Local edit of an open draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    /// Append a sort row. Refused if the column is already sorted.
    AddSort {
        column_id: String,
        direction: SortDirection,
    },
    /// Point a sort row at another column. Refused if that column is already sorted.
    SetSortColumn { id: String, column_id: String },
    SetSortDirection { id: String, direction: SortDirection },
    ToggleSortDirection { id: String },
    RemoveSort { id: String },
    /// Move a sort row to a new priority (clamped to the list)
    MoveSort { id: String, to_index: usize },
    /// Append a filter row. Refused if the filter is already present.
    AddFilter {
        filter_id: String,
        values: Vec<Scalar>,
        condition: FilterCondition,
    },
    SetFilterValues { id: String, values: Vec<Scalar> },
    SetFilterCondition { id: String, condition: FilterCondition },
    RemoveFilter { id: String },
    ClearSorts,
    ClearFilters,
}

/// Input of the synchronizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
    /// The editing surface opened
    Open,
    /// Committed state changed from outside the editor (e.g. a header click)
    CommittedChanged(ViewState),
    LocalEdit(DraftEdit),
    /// Write the draft back as the committed state
    Apply,
    /// Empty the draft ("Clear all")
    Clear,
    /// The editing surface closed; anything not applied is discarded
    Close,
}

/// Draft owned by one open editing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSession {
    draft: DraftView,
    dirty: bool,
    /// Sequence for ids of locally added sort rows; starts past the decoded rows
    next_sort_seq: usize,
}

impl DraftSession {
    fn from_committed(committed: &ViewState) -> Self {
        let draft = DraftView {
            sorting: decode_sorting(&committed.sorting),
            filters: decode_filters(&committed.filters),
        };
        Self {
            next_sort_seq: draft.sorting.len(),
            draft,
            dirty: false,
        }
    }

    pub fn draft(&self) -> &DraftView {
        &self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The draft in its tabular form
    pub fn encoded(&self) -> ViewState {
        ViewState {
            sorting: encode_sorting(&self.draft.sorting),
            filters: encode_filters(&self.draft.filters),
        }
    }

    fn sort_mut(&mut self, id: &str) -> Option<&mut DraftSortEntry> {
        self.draft.sorting.iter_mut().find(|entry| entry.id == id)
    }

    fn filter_mut(&mut self, id: &str) -> Option<&mut DraftFilterEntry> {
        self.draft.filters.iter_mut().find(|entry| entry.id == id)
    }

    fn column_sorted_elsewhere(&self, column_id: &str, except_id: Option<&str>) -> bool {
        self.draft
            .sorting
            .iter()
            .any(|entry| entry.column_id == column_id && Some(entry.id.as_str()) != except_id)
    }

    /// Apply a local edit. Returns whether the draft changed.
    fn apply_edit(&mut self, edit: DraftEdit) -> bool {
        match edit {
            DraftEdit::AddSort {
                column_id,
                direction,
            } => {
                if self.column_sorted_elsewhere(&column_id, None) {
                    tracing::debug!(%column_id, "column already sorted, ignoring AddSort");
                    return false;
                }
                let id = DraftSortEntry::id_for(self.next_sort_seq);
                self.next_sort_seq += 1;
                self.draft.sorting.push(DraftSortEntry {
                    id,
                    column_id,
                    direction,
                });
                true
            }
            DraftEdit::SetSortColumn { id, column_id } => {
                if self.column_sorted_elsewhere(&column_id, Some(&id)) {
                    tracing::debug!(%column_id, "column already sorted, ignoring SetSortColumn");
                    return false;
                }
                match self.sort_mut(&id) {
                    Some(entry) if entry.column_id != column_id => {
                        entry.column_id = column_id;
                        true
                    }
                    _ => false,
                }
            }
            DraftEdit::SetSortDirection { id, direction } => match self.sort_mut(&id) {
                Some(entry) if entry.direction != direction => {
                    entry.direction = direction;
                    true
                }
                _ => false,
            },
            DraftEdit::ToggleSortDirection { id } => match self.sort_mut(&id) {
                Some(entry) => {
                    entry.direction = entry.direction.toggle();
                    true
                }
                None => false,
            },
            DraftEdit::RemoveSort { id } => {
                let before = self.draft.sorting.len();
                self.draft.sorting.retain(|entry| entry.id != id);
                self.draft.sorting.len() != before
            }
            DraftEdit::MoveSort { id, to_index } => {
                let Some(from) = self.draft.sorting.iter().position(|entry| entry.id == id) else {
                    return false;
                };
                let to = to_index.min(self.draft.sorting.len() - 1);
                if from == to {
                    return false;
                }
                let entry = self.draft.sorting.remove(from);
                self.draft.sorting.insert(to, entry);
                true
            }
            DraftEdit::AddFilter {
                filter_id,
                values,
                condition,
            } => {
                if self.draft.filters.iter().any(|entry| entry.filter_id == filter_id) {
                    tracing::debug!(%filter_id, "filter already present, ignoring AddFilter");
                    return false;
                }
                self.draft
                    .filters
                    .push(DraftFilterEntry::new(filter_id, values).with_condition(condition));
                true
            }
            DraftEdit::SetFilterValues { id, values } => match self.filter_mut(&id) {
                Some(entry) if entry.values != values => {
                    entry.values = values;
                    true
                }
                _ => false,
            },
            DraftEdit::SetFilterCondition { id, condition } => match self.filter_mut(&id) {
                Some(entry) if entry.condition != condition => {
                    entry.condition = condition;
                    true
                }
                _ => false,
            },
            DraftEdit::RemoveFilter { id } => {
                let before = self.draft.filters.len();
                self.draft.filters.retain(|entry| entry.id != id);
                self.draft.filters.len() != before
            }
            DraftEdit::ClearSorts => {
                let changed = !self.draft.sorting.is_empty();
                self.draft.sorting.clear();
                changed
            }
            DraftEdit::ClearFilters => {
                let changed = !self.draft.filters.is_empty();
                self.draft.filters.clear();
                changed
            }
        }
    }
}

/// Committed state plus the draft of the open editing surface, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncState {
    committed: ViewState,
    session: Option<DraftSession>,
}

impl SyncState {
    /// A closed synchronizer over `committed`
    pub fn new(committed: ViewState) -> Self {
        Self {
            committed,
            session: None,
        }
    }

    pub fn committed(&self) -> &ViewState {
        &self.committed
    }

    pub fn session(&self) -> Option<&DraftSession> {
        self.session.as_ref()
    }

    pub fn draft(&self) -> Option<&DraftView> {
        self.session.as_ref().map(DraftSession::draft)
    }

    pub fn phase(&self) -> DraftPhase {
        match &self.session {
            None => DraftPhase::Closed,
            Some(session) if session.dirty => DraftPhase::OpenDirty,
            Some(_) => DraftPhase::OpenClean,
        }
    }

    /// Whether the draft differs from the last-applied state.
    ///
    /// Unlike the dirty flag this compares content: an external change that
    /// was re-decoded into the draft is dirty but has no draft changes.
    pub fn has_draft_changes(&self) -> bool {
        match &self.session {
            None => false,
            Some(session) => {
                let encoded = session.encoded();
                !sorting_equal(&encoded.sorting, &self.committed.sorting)
                    || !filters_equal(&encoded.filters, &self.committed.filters)
            }
        }
    }

    /// The state machine
    pub fn reduce(self, event: DraftEvent) -> Self {
        match event {
            DraftEvent::Open => match self.session {
                Some(_) => self,
                None => Self {
                    session: Some(DraftSession::from_committed(&self.committed)),
                    committed: self.committed,
                },
            },
            DraftEvent::CommittedChanged(next) => {
                let unchanged = sorting_equal(&next.sorting, &self.committed.sorting)
                    && filters_equal(&next.filters, &self.committed.filters);
                if unchanged {
                    return Self {
                        committed: next,
                        session: self.session,
                    };
                }
                let session = self.session.map(|_| {
                    let mut session = DraftSession::from_committed(&next);
                    session.dirty = true;
                    session
                });
                Self {
                    committed: next,
                    session,
                }
            }
            DraftEvent::LocalEdit(edit) => match self.session {
                Some(mut session) => {
                    if session.apply_edit(edit) {
                        session.dirty = true;
                    }
                    Self {
                        committed: self.committed,
                        session: Some(session),
                    }
                }
                None => {
                    tracing::debug!("edit without an open draft ignored");
                    self
                }
            },
            DraftEvent::Apply => match self.session {
                Some(session) => {
                    let committed = session.encoded();
                    Self {
                        session: Some(DraftSession::from_committed(&committed)),
                        committed,
                    }
                }
                None => self,
            },
            DraftEvent::Clear => match self.session {
                Some(mut session) => {
                    session.draft = DraftView::default();
                    session.dirty = !self.committed.is_empty();
                    Self {
                        committed: self.committed,
                        session: Some(session),
                    }
                }
                None => self,
            },
            DraftEvent::Close => Self {
                committed: self.committed,
                session: None,
            },
        }
    }
}

/// Owner of a [`SyncState`] for callers that prefer methods to events
#[derive(Debug, Clone, Default)]
pub struct DraftSynchronizer {
    state: SyncState,
}

impl DraftSynchronizer {
    pub fn new(committed: ViewState) -> Self {
        Self {
            state: SyncState::new(committed),
        }
    }

    /// Feed one event through the reducer
    pub fn dispatch(&mut self, event: DraftEvent) {
        let before = self.state.phase();
        self.state = std::mem::take(&mut self.state).reduce(event);
        let after = self.state.phase();
        if before != after {
            tracing::debug!(from = ?before, to = ?after, "draft phase changed");
        }
    }

    pub fn open(&mut self) {
        self.dispatch(DraftEvent::Open);
    }

    pub fn close(&mut self) {
        self.dispatch(DraftEvent::Close);
    }

    pub fn edit(&mut self, edit: DraftEdit) {
        self.dispatch(DraftEvent::LocalEdit(edit));
    }

    /// Apply the draft and return the new committed state
    pub fn apply(&mut self) -> &ViewState {
        self.dispatch(DraftEvent::Apply);
        self.state.committed()
    }

    pub fn clear(&mut self) {
        self.dispatch(DraftEvent::Clear);
    }

    pub fn committed_changed(&mut self, committed: ViewState) {
        self.dispatch(DraftEvent::CommittedChanged(committed));
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn committed(&self) -> &ViewState {
        self.state.committed()
    }

    pub fn draft(&self) -> Option<&DraftView> {
        self.state.draft()
    }

    pub fn phase(&self) -> DraftPhase {
        self.state.phase()
    }

    pub fn has_draft_changes(&self) -> bool {
        self.state.has_draft_changes()
    }
}

/// Sorting after a column header click.
///
/// Cycles the column through ascending, descending and unsorted. Without
/// `multi` the result sorts by that column alone; with `multi` other columns
/// keep their place and priority.
pub fn toggle_column_sort(sorting: &[SortEntry], column_id: &str, multi: bool) -> Vec<SortEntry> {
    let current = sorting.iter().position(|entry| entry.column_id == column_id);

    if !multi {
        return match current.map(|index| sorting[index].descending) {
            None => vec![SortEntry::asc(column_id)],
            Some(false) => vec![SortEntry::desc(column_id)],
            Some(true) => Vec::new(),
        };
    }

    let mut next = sorting.to_vec();
    match current {
        None => next.push(SortEntry::asc(column_id)),
        Some(index) if !next[index].descending => next[index].descending = true,
        Some(index) => {
            next.remove(index);
        }
    }
    next
}
