//! Routine manager
//!
//! High-level operations over a routine repository. Every operation loads
//! the record list, changes it and saves it back in full.

use tierview_core::ViewState;

use crate::error::{Result, RoutineError};
use crate::records::Routine;
use crate::repository::Repository;

/// Manager for routines with high-level CRUD operations
pub struct RoutineManager<R> {
    repository: R,
}

impl<R: Repository<Routine>> RoutineManager<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Create and store a routine. Names are unique per view.
    pub fn create(&self, name: &str, view_id: &str, view: ViewState) -> Result<Routine> {
        let mut routines = self.repository.load()?;
        ensure_unique_name(&routines, view_id, name, None)?;

        let routine = Routine::new(name, view_id, view);
        routines.push(routine.clone());
        self.repository.save(&routines)?;
        tracing::info!(routine_id = %routine.id, %view_id, "created routine");
        Ok(routine)
    }

    /// Store a routine, replacing the one with the same id if present
    pub fn upsert(&self, routine: &Routine) -> Result<()> {
        let mut routines = self.repository.load()?;
        ensure_unique_name(&routines, &routine.view_id, &routine.name, Some(routine.id.as_str()))?;
        match routines.iter_mut().find(|r| r.id == routine.id) {
            Some(existing) => *existing = routine.clone(),
            None => routines.push(routine.clone()),
        }
        self.repository.save(&routines)
    }

    pub fn get(&self, id: &str) -> Result<Option<Routine>> {
        Ok(self.repository.load()?.into_iter().find(|r| r.id == id))
    }

    /// Routines of a view, ordered by name
    pub fn list_for_view(&self, view_id: &str) -> Result<Vec<Routine>> {
        let mut routines: Vec<Routine> = self
            .repository
            .load()?
            .into_iter()
            .filter(|r| r.view_id == view_id)
            .collect();
        routines.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(routines)
    }

    pub fn get_by_name(&self, view_id: &str, name: &str) -> Result<Option<Routine>> {
        Ok(self
            .list_for_view(view_id)?
            .into_iter()
            .find(|r| r.name == name))
    }

    /// Replace the saved sort/filter configuration of a routine
    pub fn update_view(&self, id: &str, view: ViewState) -> Result<Routine> {
        self.modify(id, |routine| routine.view = view)
    }

    /// Rename a routine. The new name must not be taken by another routine of the view.
    pub fn rename(&self, id: &str, name: String) -> Result<Routine> {
        let routines = self.repository.load()?;
        let view_id = routines
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.view_id.as_str())
            .ok_or_else(|| not_found(id))?;
        ensure_unique_name(&routines, view_id, &name, Some(id))?;
        self.modify(id, |routine| routine.name = name)
    }

    pub fn set_description(&self, id: &str, description: Option<String>) -> Result<Routine> {
        self.modify(id, |routine| routine.description = description)
    }

    /// Delete a routine. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut routines = self.repository.load()?;
        let before = routines.len();
        routines.retain(|r| r.id != id);
        if routines.len() == before {
            return Ok(false);
        }
        self.repository.save(&routines)?;
        Ok(true)
    }

    pub fn get_default(&self, view_id: &str) -> Result<Option<Routine>> {
        Ok(self
            .repository
            .load()?
            .into_iter()
            .find(|r| r.view_id == view_id && r.is_default))
    }

    /// Make a routine the default of its view, clearing any other default
    pub fn set_default(&self, id: &str) -> Result<()> {
        let mut routines = self.repository.load()?;
        let view_id = routines
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.view_id.clone())
            .ok_or_else(|| not_found(id))?;

        for routine in routines.iter_mut().filter(|r| r.view_id == view_id) {
            routine.is_default = routine.id == id;
        }
        self.repository.save(&routines)
    }

    pub fn clear_default(&self, view_id: &str) -> Result<()> {
        let mut routines = self.repository.load()?;
        let mut changed = false;
        for routine in routines
            .iter_mut()
            .filter(|r| r.view_id == view_id && r.is_default)
        {
            routine.is_default = false;
            changed = true;
        }
        if changed {
            self.repository.save(&routines)?;
        }
        Ok(())
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut Routine)) -> Result<Routine> {
        let mut routines = self.repository.load()?;
        let routine = routines
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        change(routine);
        routine.touch();
        let updated = routine.clone();
        self.repository.save(&routines)?;
        Ok(updated)
    }
}

fn ensure_unique_name(
    routines: &[Routine],
    view_id: &str,
    name: &str,
    except_id: Option<&str>,
) -> Result<()> {
    let taken = routines.iter().any(|r| {
        r.view_id == view_id && r.name == name && Some(r.id.as_str()) != except_id
    });
    if taken {
        return Err(RoutineError::DuplicateName {
            view_id: view_id.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

fn not_found(id: &str) -> RoutineError {
    RoutineError::NotFound {
        kind: "Routine",
        id: id.to_string(),
    }
}
