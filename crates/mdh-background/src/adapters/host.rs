//! Tab bookkeeping for hosts that report lifecycle events only

use mdh_types::TabId;
use parking_lot::RwLock;
use std::collections::HashSet;

use crate::ports::BrowserHost;

/// Active tab and which tabs have a page loaded.
#[derive(Debug, Default)]
pub struct ActiveTabState {
    active: RwLock<Option<TabId>>,
    loaded: RwLock<HashSet<TabId>>,
}

impl ActiveTabState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether a page is loaded in `tab`.
    pub fn set_loaded(&self, tab: TabId, loaded: bool) {
        let mut tabs = self.loaded.write();
        if loaded {
            tabs.insert(tab);
        } else {
            tabs.remove(&tab);
        }
    }
}

impl BrowserHost for ActiveTabState {
    fn active_tab(&self) -> Option<TabId> {
        *self.active.read()
    }

    fn tab_has_url(&self, tab: TabId) -> bool {
        self.loaded.read().contains(&tab)
    }

    fn record_activation(&self, tab: TabId) {
        *self.active.write() = Some(tab);
    }

    fn record_deactivation(&self, tab: TabId) {
        let mut active = self.active.write();
        if *active == Some(tab) {
            *active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deactivating_other_tab_keeps_active() {
        let state = ActiveTabState::new();
        state.record_activation(TabId(1));
        state.record_deactivation(TabId(2));
        assert_eq!(state.active_tab(), Some(TabId(1)));
        state.record_deactivation(TabId(1));
        assert_eq!(state.active_tab(), None);
    }

    #[test]
    fn test_loaded_tabs() {
        let state = ActiveTabState::new();
        assert!(!state.tab_has_url(TabId(4)));
        state.set_loaded(TabId(4), true);
        assert!(state.tab_has_url(TabId(4)));
        state.set_loaded(TabId(4), false);
        assert!(!state.tab_has_url(TabId(4)));
    }
}
