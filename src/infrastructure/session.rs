//! Page registry for open challenge pages
//!
//! Every `GET /` opens a page with its own state. Pages live in memory only
//! and the registry is bounded: once full, the page used least recently is
//! dropped to make room. Requests already holding a dropped page's handle
//! finish normally.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::services::PageHandle;
use crate::domain::value_objects::PageId;

pub struct PageRegistry {
    pages: RwLock<HashMap<PageId, Arc<PageHandle>>>,
    max_pages: usize,
}

impl PageRegistry {
    pub fn new(max_pages: usize) -> Self {
        Self {
            pages: RwLock::new(HashMap::new()),
            max_pages: max_pages.max(1),
        }
    }

    /// Open a fresh page, evicting the least recently used one when full
    pub async fn open(&self) -> Arc<PageHandle> {
        let page = Arc::new(PageHandle::new(PageId::new()));
        let mut pages = self.pages.write().await;

        while pages.len() >= self.max_pages {
            let idle = pages
                .values()
                .min_by_key(|page| page.last_access())
                .map(|page| page.id());
            match idle {
                Some(id) => {
                    pages.remove(&id);
                    tracing::debug!("Evicted page {}", id);
                }
                None => break,
            }
        }

        pages.insert(page.id(), Arc::clone(&page));
        tracing::info!("Opened page {} ({} open)", page.id(), pages.len());
        page
    }

    /// Look up a page; a hit counts as a use
    pub async fn get(&self, id: &PageId) -> Option<Arc<PageHandle>> {
        let page = self.pages.read().await.get(id).cloned()?;
        page.touch();
        Some(page)
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_and_lookup() {
        let registry = PageRegistry::new(4);

        let page = registry.open().await;

        assert!(registry.get(&page.id()).await.is_some());
        assert!(registry.get(&PageId::new()).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_page_evicted_when_full() {
        let registry = PageRegistry::new(2);

        let first = registry.open().await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = registry.open().await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let third = registry.open().await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.get(&first.id()).await.is_none());
        assert!(registry.get(&second.id()).await.is_some());
        assert!(registry.get(&third.id()).await.is_some());
    }

    #[tokio::test]
    async fn test_recently_used_page_survives_eviction() {
        let registry = PageRegistry::new(2);

        let first = registry.open().await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = registry.open().await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        assert!(registry.get(&first.id()).await.is_some());
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let third = registry.open().await;

        assert_eq!(registry.len().await, 2);
        assert!(registry.get(&first.id()).await.is_some());
        assert!(registry.get(&second.id()).await.is_none());
        assert!(registry.get(&third.id()).await.is_some());
    }
}
