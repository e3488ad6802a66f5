use ratatui::widgets::ListState;

pub struct StatefulList<T> {
    pub state: ListState,
    pub items: Vec<T>,
}

impl<T> StatefulList<T> {
    pub fn with_items(items: Vec<T>) -> StatefulList<T> {
        let mut state = ListState::default();
        // Start with the first item selected
        if !items.is_empty() {
            state.select(Some(0));
        }
        StatefulList {
            state,
            items,
        }
    }

    /// Swap in a fresh item list, keeping the selection in bounds.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        let selected = match (self.state.selected(), self.items.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.state.select(selected);
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    /// Whether the selection has come within `threshold` rows of the end of the list,
    /// i.e. the sentinel row below the last item is in view.
    pub fn sentinel_visible(&self, threshold: usize) -> bool {
        match self.state.selected() {
            Some(i) => i + threshold >= self.items.len(),
            None => self.items.is_empty(),
        }
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    i
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.items.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if !self.items.is_empty() {
            self.state.select(Some(self.items.len() - 1));
        }
    }
}

/// Decides when the feed view should ask for the next page.
///
/// The feed is ready for more when the sentinel is in view, another page exists and
/// nothing is in flight. A request fires once per ready stretch and per number of pages
/// held, so a new page that leaves the sentinel in view asks again, while an idle retry
/// loop on the same page count does not.
#[derive(Debug, Default)]
pub struct LoadMoreTrigger {
    fired_at: Option<usize>,
}

impl LoadMoreTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, sentinel_visible: bool, has_next_page: bool, fetching: bool, pages: usize) -> bool {
        if !(sentinel_visible && has_next_page && !fetching) {
            self.fired_at = None;
            return false;
        }
        if self.fired_at == Some(pages) {
            return false;
        }
        self.fired_at = Some(pages);
        true
    }
}
