// ABOUTME: Session target model identifying which remote shell a session attaches to

use serde::{Deserialize, Serialize};

/// Fully specified attach target. Immutable for the lifetime of one
/// connection; switching any field means tearing the session down and
/// opening a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTarget {
    pub project: String,
    pub environment: String,
    pub service: String,
    pub container: String,
    pub shell: String,
    pub user: Option<String>,
}

impl SessionTarget {
    pub fn new(
        project: impl Into<String>,
        environment: impl Into<String>,
        service: impl Into<String>,
        container: impl Into<String>,
        shell: impl Into<String>,
        user: Option<String>,
    ) -> Self {
        Self {
            project: project.into(),
            environment: environment.into(),
            service: service.into(),
            container: container.into(),
            shell: shell.into(),
            user,
        }
    }

    /// Short human-readable label for titles and status lines.
    pub fn describe(&self) -> String {
        let replica = self.container.get(..12).unwrap_or(&self.container);
        match &self.user {
            Some(user) => format!("{}/{} · {} ({})", self.service, replica, self.shell, user),
            None => format!("{}/{} · {}", self.service, replica, self.shell),
        }
    }
}

/// Candidate replicas and shells the user picks from before a target is
/// fully specified. The picker view edits this; `resolve` only succeeds once
/// a concrete container and shell are both selected.
#[derive(Debug, Clone, Default)]
pub struct TargetDraft {
    pub project: String,
    pub environment: String,
    pub service: String,
    pub containers: Vec<String>,
    pub shells: Vec<String>,
    pub selected_container: Option<usize>,
    pub selected_shell: Option<usize>,
    pub user: Option<String>,
}

impl TargetDraft {
    pub fn new(
        project: impl Into<String>,
        environment: impl Into<String>,
        service: impl Into<String>,
        containers: Vec<String>,
        shells: Vec<String>,
        user: Option<String>,
    ) -> Self {
        let selected_container = if containers.is_empty() { None } else { Some(0) };
        let selected_shell = if shells.is_empty() { None } else { Some(0) };
        Self {
            project: project.into(),
            environment: environment.into(),
            service: service.into(),
            containers,
            shells,
            selected_container,
            selected_shell,
            user,
        }
    }

    /// Whether a connect attempt would have a concrete container and shell.
    pub fn is_complete(&self) -> bool {
        self.selected_container
            .and_then(|i| self.containers.get(i))
            .is_some()
            && self.selected_shell.and_then(|i| self.shells.get(i)).is_some()
    }

    /// Freeze the current selection into an immutable target.
    pub fn resolve(&self) -> Option<SessionTarget> {
        let container = self.selected_container.and_then(|i| self.containers.get(i))?;
        let shell = self.selected_shell.and_then(|i| self.shells.get(i))?;
        Some(SessionTarget::new(
            self.project.clone(),
            self.environment.clone(),
            self.service.clone(),
            container.clone(),
            shell.clone(),
            self.user.clone(),
        ))
    }

    pub fn next_container(&mut self) {
        Self::advance(&mut self.selected_container, self.containers.len(), 1);
    }

    pub fn prev_container(&mut self) {
        Self::advance(&mut self.selected_container, self.containers.len(), -1);
    }

    pub fn next_shell(&mut self) {
        Self::advance(&mut self.selected_shell, self.shells.len(), 1);
    }

    pub fn prev_shell(&mut self) {
        Self::advance(&mut self.selected_shell, self.shells.len(), -1);
    }

    fn advance(slot: &mut Option<usize>, len: usize, delta: isize) {
        if len == 0 {
            *slot = None;
            return;
        }
        let current = slot.unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len as isize) as usize;
        *slot = Some(next);
    }
}
