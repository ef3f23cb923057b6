//! Local list cache and filter.
//!
//! Holds the last fetched collection (`full`), the subset currently shown
//! (`display`) and the active filter term. `display` is always the
//! subsequence of `full` whose name contains the term, compared
//! case-insensitively, in `full`'s order; with an empty term it equals
//! `full`.
//!
//! Every operation takes `&mut self`, so two operations on one cache can't
//! interleave around a pending fetch.

use crate::backend::Collection;
use crate::error::{Action, Result};
use crate::model::Listed;
use crate::view::View;
use std::sync::Arc;
use tracing::{debug, error};

/// Normalizes user input into a filter term: trimmed and lower-cased.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Items of `full` whose name contains `term`, order preserved. `term` must
/// already be normalized.
pub fn filter_items<T: Listed>(full: &[T], term: &str) -> Vec<T> {
    if term.is_empty() {
        return full.to_vec();
    }
    full.iter()
        .filter(|item| item.name().to_lowercase().contains(term))
        .cloned()
        .collect()
}

pub struct ListCache<T: Listed> {
    source: Arc<dyn Collection<T>>,
    full: Vec<T>,
    display: Vec<T>,
    filter: String,
}

impl<T: Listed> ListCache<T> {
    pub fn new(source: Arc<dyn Collection<T>>) -> Self {
        Self {
            source,
            full: Vec::new(),
            display: Vec::new(),
            filter: String::new(),
        }
    }

    pub fn source(&self) -> &Arc<dyn Collection<T>> {
        &self.source
    }

    pub fn full(&self) -> &[T] {
        &self.full
    }

    pub fn display(&self) -> &[T] {
        &self.display
    }

    pub fn filter_term(&self) -> &str {
        &self.filter
    }

    /// Fetches once if nothing is cached yet. A cached list is reused even if
    /// stale.
    pub async fn ensure_loaded(&mut self) -> Result<()> {
        if self.full.is_empty() {
            self.fetch().await?;
        }
        Ok(())
    }

    /// Refetches, reapplies the filter and renders unless `silent`. On
    /// failure the cached lists are kept and, unless `silent`, the user is
    /// alerted.
    pub async fn refresh(&mut self, view: &mut dyn View<T>, silent: bool) -> Result<&[T]> {
        if let Err(e) = self.fetch().await {
            error!(kind = T::KIND.plural(), error = %e, "fetch failed");
            if !silent {
                view.alert(&e.notice(Action::Fetch(T::KIND)));
            }
            return Err(e);
        }
        if !silent {
            view.render(&self.display);
        }
        Ok(&self.display)
    }

    /// Applies `term` as the new filter, loading the list first if needed,
    /// and renders the result. A failed load still renders what is cached
    /// before the error is returned.
    pub async fn search(&mut self, term: &str, view: &mut dyn View<T>) -> Result<&[T]> {
        self.filter = normalize_term(term);
        let loaded = self.ensure_loaded().await;
        self.recompute();
        view.render(&self.display);
        loaded?;
        Ok(&self.display)
    }

    /// Exact, case-sensitive name lookup in the cached full list.
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.full.iter().find(|item| item.name() == name)
    }

    /// Drops the active filter so the next refresh shows the whole list.
    pub fn invalidate_filter_on_mutation(&mut self) {
        if !self.filter.is_empty() {
            debug!(kind = T::KIND.plural(), term = %self.filter, "filter cleared after mutation");
        }
        self.filter.clear();
        self.recompute();
    }

    async fn fetch(&mut self) -> Result<()> {
        let items = self.source.list().await?;
        debug!(kind = T::KIND.plural(), count = items.len(), "cache replaced");
        self.full = items;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.display = filter_items(&self.full, &self.filter);
    }
}
