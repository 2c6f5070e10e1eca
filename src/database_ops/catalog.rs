use std::collections::BTreeMap;

use crate::database_ops::repository::DemoRepository;
use crate::models::{Demo, DemoStatus};

/// Catalog browsing filter. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct DemoFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub status: Option<DemoStatus>,
    /// Case-insensitive substring over title, description and url.
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl DemoFilter {
    pub fn matches(&self, demo: &Demo) -> bool {
        if let Some(cat) = &self.category {
            if !demo.category.eq_ignore_ascii_case(cat.trim()) {
                return false;
            }
        }
        if let Some(sub) = &self.subcategory {
            match &demo.subcategory {
                Some(s) if s.eq_ignore_ascii_case(sub.trim()) => {}
                _ => return false,
            }
        }
        if let Some(status) = self.status {
            if demo.status != status {
                return false;
            }
        }
        if let Some(q) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            let hit = [&demo.title, &demo.description, &demo.url]
                .iter()
                .any(|field| field.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        true
    }
}

pub fn list_demos<R: DemoRepository>(repo: &R, filter: &DemoFilter) -> Vec<Demo> {
    let hits = repo.list().into_iter().filter(|d| filter.matches(d));
    match filter.limit {
        Some(n) => hits.take(n).collect(),
        None => hits.collect(),
    }
}

/// Demo count per top-level category, sorted by category name.
pub fn category_counts<R: DemoRepository>(repo: &R) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for demo in repo.list() {
        *counts.entry(demo.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_ops::repository::tests::demo;
    use crate::database_ops::repository::MemoryDemoRepository;

    fn fixture() -> MemoryDemoRepository {
        let mut a = demo("a", "https://shop.test", "https://shop.test/");
        a.title = "Coffee Shop".into();
        a.category = "Business".into();
        a.subcategory = Some("Restaurant".into());
        let mut b = demo("b", "https://folio.test", "https://folio.test/");
        b.title = "Photographer".into();
        b.description = "Minimal portfolio with galleries".into();
        b.category = "Portfolio".into();
        let mut c = demo("c", "https://corp.test", "https://corp.test/");
        c.category = "Business".into();
        c.subcategory = Some("Corporate".into());
        c.status = DemoStatus::Archived;
        MemoryDemoRepository::from(vec![a, b, c])
    }

    fn ids(demos: Vec<Demo>) -> Vec<String> {
        demos.into_iter().map(|d| d.id).collect()
    }

    #[test]
    fn filters_by_category_and_subcategory() {
        let repo = fixture();
        let f = DemoFilter {
            category: Some("business".into()),
            ..DemoFilter::default()
        };
        assert_eq!(ids(list_demos(&repo, &f)), ["a", "c"]);

        let f = DemoFilter {
            subcategory: Some("Corporate".into()),
            ..DemoFilter::default()
        };
        assert_eq!(ids(list_demos(&repo, &f)), ["c"]);
    }

    #[test]
    fn filters_by_status_search_and_limit() {
        let repo = fixture();
        let f = DemoFilter {
            status: Some(DemoStatus::Active),
            ..DemoFilter::default()
        };
        assert_eq!(ids(list_demos(&repo, &f)), ["a", "b"]);

        let f = DemoFilter {
            search: Some("GALLERIES".into()),
            ..DemoFilter::default()
        };
        assert_eq!(ids(list_demos(&repo, &f)), ["b"]);

        let f = DemoFilter {
            limit: Some(1),
            ..DemoFilter::default()
        };
        assert_eq!(ids(list_demos(&repo, &f)), ["a"]);
    }

    #[test]
    fn counts_per_category() {
        let counts = category_counts(&fixture());
        assert_eq!(counts.get("Business"), Some(&2));
        assert_eq!(counts.get("Portfolio"), Some(&1));
        assert_eq!(counts.keys().collect::<Vec<_>>(), ["Business", "Portfolio"]);
    }
}
