//! View session
//!
//! Ties one view's tiers together: the read-only scope filters, the committed
//! Routine/User state with its draft editor, and the active routine used as
//! the baseline for "unsaved changes".

use tierview_core::{DraftFilterEntry, DraftSortEntry, DraftView, TabularFilter, ViewState};
use tierview_engine::{
    DraftEdit, DraftPhase, DraftSynchronizer, decode_filters, decode_sorting,
    diff_against_baseline, filters_equal, merge_filters, sorting_equal,
};

use crate::error::{Result, RoutineError};
use crate::manager::RoutineManager;
use crate::records::{Routine, Scope};
use crate::repository::Repository;
use crate::scopes::scope_filters_for;

/// Destination of "save routine" requests
pub trait RoutineSink {
    fn save_routine(&mut self, routine: &Routine) -> Result<()>;
}

impl<R: Repository<Routine>> RoutineSink for RoutineManager<R> {
    fn save_routine(&mut self, routine: &Routine) -> Result<()> {
        self.upsert(routine)
    }
}

/// Sort/filter state of one view
pub struct ViewSession {
    view_id: String,
    sync: DraftSynchronizer,
    scope_filters: Vec<TabularFilter>,
    active_routine: Option<Routine>,
}

impl ViewSession {
    /// A session with no active routine
    pub fn new(view_id: impl Into<String>, committed: ViewState, scopes: &[Scope]) -> Self {
        let view_id = view_id.into();
        Self {
            scope_filters: scope_filters_for(scopes, &view_id),
            view_id,
            sync: DraftSynchronizer::new(committed),
            active_routine: None,
        }
    }

    /// A session starting from a routine's saved state
    pub fn with_routine(routine: Routine, scopes: &[Scope]) -> Self {
        let mut session = Self::new(routine.view_id.clone(), routine.view.clone(), scopes);
        session.active_routine = Some(routine);
        session
    }

    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    pub fn open_editor(&mut self) {
        self.sync.open();
    }

    /// Close the editor, discarding anything not applied
    pub fn close_editor(&mut self) {
        self.sync.close();
    }

    pub fn edit(&mut self, edit: DraftEdit) {
        self.sync.edit(edit);
    }

    pub fn apply(&mut self) -> &ViewState {
        self.sync.apply()
    }

    pub fn clear(&mut self) {
        self.sync.clear();
    }

    /// Make a routine active and commit its saved state
    pub fn load_routine(&mut self, routine: Routine) {
        tracing::debug!(view_id = %self.view_id, routine_id = %routine.id, "loading routine");
        self.sync.committed_changed(routine.view.clone());
        self.active_routine = Some(routine);
    }

    /// Committed state changed outside the editor, e.g. a column header click
    pub fn external_change(&mut self, committed: ViewState) {
        self.sync.committed_changed(committed);
    }

    /// Replace the scope tier, e.g. after an administrator edited scopes
    pub fn set_scopes(&mut self, scopes: &[Scope]) {
        self.scope_filters = scope_filters_for(scopes, &self.view_id);
    }

    pub fn committed(&self) -> &ViewState {
        self.sync.committed()
    }

    pub fn draft(&self) -> Option<&DraftView> {
        self.sync.draft()
    }

    pub fn phase(&self) -> DraftPhase {
        self.sync.phase()
    }

    pub fn scope_filters(&self) -> &[TabularFilter] {
        &self.scope_filters
    }

    pub fn active_routine(&self) -> Option<&Routine> {
        self.active_routine.as_ref()
    }

    /// Filters rows are evaluated against: committed over scope
    pub fn effective_filters(&self) -> Vec<TabularFilter> {
        merge_filters(&self.committed().filters, &self.scope_filters)
    }

    pub fn has_draft_changes(&self) -> bool {
        self.sync.has_draft_changes()
    }

    /// Draft sort rows (or committed ones while closed) missing from the active routine
    pub fn unsaved_sorts(&self) -> Vec<DraftSortEntry> {
        let baseline = self.baseline();
        let current = self.current_draft();
        diff_against_baseline(&current.sorting, &baseline.sorting)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Draft filter rows (or committed ones while closed) missing from the active routine
    pub fn unsaved_filters(&self) -> Vec<DraftFilterEntry> {
        let baseline = self.baseline();
        let current = self.current_draft();
        diff_against_baseline(&current.filters, &baseline.filters)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Whether the current state differs from the active routine. Always
    /// false without an active routine.
    pub fn has_unsaved_routine_changes(&self) -> bool {
        let Some(routine) = &self.active_routine else {
            return false;
        };
        let current = self.current_state();
        !sorting_equal(&current.sorting, &routine.view.sorting)
            || !filters_equal(&current.filters, &routine.view.filters)
    }

    /// Save the current state into the active routine.
    ///
    /// An open draft is saved as edited and applied once the sink accepted it,
    /// so a failed save leaves the committed state untouched.
    pub fn save_routine(&mut self, sink: &mut dyn RoutineSink) -> Result<&Routine> {
        let Some(mut routine) = self.active_routine.clone() else {
            return Err(RoutineError::NoActiveRoutine);
        };

        routine.view = self.current_state();
        routine.touch();
        sink.save_routine(&routine)?;
        if self.phase() != DraftPhase::Closed {
            self.sync.apply();
        }
        tracing::info!(view_id = %self.view_id, routine_id = %routine.id, "saved routine");

        let saved: &Routine = self.active_routine.insert(routine);
        Ok(saved)
    }

    fn baseline(&self) -> ViewState {
        self.active_routine
            .as_ref()
            .map(|routine| routine.view.clone())
            .unwrap_or_default()
    }

    /// Tabular form of what the user currently sees or edits
    fn current_state(&self) -> ViewState {
        match self.sync.state().session() {
            Some(session) => session.encoded(),
            None => self.committed().clone(),
        }
    }

    fn current_draft(&self) -> DraftView {
        match self.draft() {
            Some(draft) => draft.clone(),
            None => DraftView {
                sorting: decode_sorting(&self.committed().sorting),
                filters: decode_filters(&self.committed().filters),
            },
        }
    }
}
