use crate::database_ops::error::RepositoryError;
use crate::models::Demo;

/// Storage seam for demo records. The importer and catalog commands only talk
/// to this trait; where the records live is the implementation's business.
pub trait DemoRepository {
    /// All records in insertion order.
    fn list(&self) -> Vec<Demo>;

    fn get(&self, id: &str) -> Option<Demo>;

    /// First record whose canonical URL equals `normalized_url`, or whose
    /// original URL equals `raw_url`.
    fn find_by_url(&self, normalized_url: &str, raw_url: &str) -> Option<Demo>;

    /// Replace the record with the same id in place, or append it.
    fn upsert(&mut self, demo: Demo) -> Result<(), RepositoryError>;

    /// Returns whether a record was removed.
    fn delete(&mut self, id: &str) -> Result<bool, RepositoryError>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vec-backed repository, loaded from and flushed back to a snapshot file.
/// Lookups are linear scans; catalogs are small.
#[derive(Debug, Default, Clone)]
pub struct MemoryDemoRepository {
    demos: Vec<Demo>,
}

impl MemoryDemoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> Vec<Demo> {
        self.demos
    }

    pub fn as_slice(&self) -> &[Demo] {
        &self.demos
    }
}

impl From<Vec<Demo>> for MemoryDemoRepository {
    fn from(demos: Vec<Demo>) -> Self {
        Self { demos }
    }
}

impl DemoRepository for MemoryDemoRepository {
    fn list(&self) -> Vec<Demo> {
        self.demos.clone()
    }

    fn get(&self, id: &str) -> Option<Demo> {
        self.demos.iter().find(|d| d.id == id).cloned()
    }

    fn find_by_url(&self, normalized_url: &str, raw_url: &str) -> Option<Demo> {
        self.demos
            .iter()
            .find(|d| d.normalized_url == normalized_url || d.url == raw_url)
            .cloned()
    }

    fn upsert(&mut self, demo: Demo) -> Result<(), RepositoryError> {
        if demo.id.trim().is_empty() {
            return Err(RepositoryError::MissingId);
        }
        if demo.normalized_url.trim().is_empty() {
            return Err(RepositoryError::MissingNormalizedUrl { id: demo.id });
        }
        match self.demos.iter_mut().find(|d| d.id == demo.id) {
            Some(slot) => *slot = demo,
            None => self.demos.push(demo),
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<bool, RepositoryError> {
        let before = self.demos.len();
        self.demos.retain(|d| d.id != id);
        Ok(self.demos.len() != before)
    }

    fn len(&self) -> usize {
        self.demos.len()
    }
}
