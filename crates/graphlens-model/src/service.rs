//! Collection of workspaces and the current selection.

use graphlens_core::{DateFormat, Error, Result};
use tracing::info;

use crate::ids::IdAllocator;
use crate::workspace::Workspace;

pub const INITIAL_WORKSPACE_NAME: &str = "workspace1";

/// Owns every workspace and tracks which one is current.
///
/// Workspaces are never removed, so the current index stays valid. All
/// workspaces draw filter and search ids from one shared allocator.
pub struct WorkspaceService {
    workspaces: Vec<Workspace>,
    current: usize,
    max_id: u64,
    ids: IdAllocator,
    date_format: DateFormat,
}

impl WorkspaceService {
    /// Create the service with a single empty workspace selected.
    pub fn new(date_format: DateFormat) -> Self {
        let ids = IdAllocator::new();
        let initial = Workspace::new(1, INITIAL_WORKSPACE_NAME, ids.clone())
            .with_date_format(date_format);
        Self {
            workspaces: vec![initial],
            current: 0,
            max_id: 1,
            ids,
            date_format,
        }
    }

    /// Create a workspace, select it, and return its id.
    pub fn create_workspace(&mut self, name: &str) -> Result<u64> {
        let name = validate_name(name)?;
        self.max_id += 1;
        let workspace = Workspace::new(self.max_id, name, self.ids.clone())
            .with_date_format(self.date_format);
        self.workspaces.push(workspace);
        self.current = self.workspaces.len() - 1;
        info!(id = self.max_id, name, "workspace created");
        Ok(self.max_id)
    }

    pub fn select_workspace(&mut self, id: u64) -> Result<()> {
        let index = self
            .workspaces
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| Error::NotFound(format!("workspace {id}")))?;
        self.current = index;
        info!(id, "workspace selected");
        Ok(())
    }

    pub fn rename_current(&mut self, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.current_mut().set_name(name);
        Ok(())
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn get(&self, id: u64) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id() == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Workspace> {
        self.workspaces.iter_mut().find(|w| w.id() == id)
    }

    pub fn current(&self) -> &Workspace {
        &self.workspaces[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Workspace {
        &mut self.workspaces[self.current]
    }
}

impl Default for WorkspaceService {
    fn default() -> Self {
        Self::new(DateFormat::default())
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidParameter("workspace name".to_string()));
    }
    Ok(name)
}
