use parking_lot::RwLock;

use crate::core::ProjectConfig;

/// In-memory project configurations keyed by name, kept in insertion order.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: RwLock<Vec<ProjectConfig>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `config`, replacing any project with the same name in place.
    /// Returns true when an existing entry was replaced.
    pub fn save(&self, config: ProjectConfig) -> bool {
        let mut projects = self.projects.write();
        match projects.iter_mut().find(|p| p.name == config.name) {
            Some(existing) => {
                *existing = config;
                true
            }
            None => {
                projects.push(config);
                false
            }
        }
    }

    pub fn list(&self) -> Vec<ProjectConfig> {
        self.projects.read().clone()
    }

    pub fn len(&self) -> usize {
        self.projects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.read().is_empty()
    }
}
