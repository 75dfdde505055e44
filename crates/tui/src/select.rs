//! Debounced, paginated async select used to pick an account or a category.
//!
//! The widget moves through `Idle -> Typing -> Loading -> Idle`. Typing waits
//! for [`SEARCH_DEBOUNCE`] of silence before a search is issued; reaching the
//! end of the option list asks for the next page when the backend has one.
//! Requests are returned to the caller, which runs them through an
//! [`OptionSource`] and feeds the result back with [`AsyncSelect::apply`].

use std::{
    future::Future,
    time::{Duration, Instant},
};

use api_types::Paginated;

use crate::client::{ApiResult, Client};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Label shown for a selected id that is not among the loaded options yet.
pub const PLACEHOLDER_LABEL: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: i64,
    pub label: String,
    placeholder: bool,
}

impl SelectOption {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            placeholder: false,
        }
    }

    fn placeholder(id: i64) -> Self {
        Self {
            id,
            label: PLACEHOLDER_LABEL.to_string(),
            placeholder: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// What to show when the selected id is not among the loaded options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedSelection {
    /// Insert a "Loading..." option so the selection stays visible.
    Placeholder,
    /// Show the select as empty until the option is loaded.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectPhase {
    Idle,
    Typing { since: Instant },
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectRequest {
    /// Replace the options with the first page matching the term.
    Search(String),
    /// Append the page behind this cursor.
    Page(String),
}

/// Backend lookups behind a select.
pub trait OptionSource {
    fn search(&self, term: &str) -> impl Future<Output = ApiResult<Paginated<SelectOption>>>;

    fn page(&self, cursor: &str) -> impl Future<Output = ApiResult<Paginated<SelectOption>>>;
}

/// Accounts, labelled by their account type name.
pub struct AccountOptions<'a>(pub &'a Client);

impl OptionSource for AccountOptions<'_> {
    async fn search(&self, term: &str) -> ApiResult<Paginated<SelectOption>> {
        let page = self.0.accounts_search(term, None).await?;
        Ok(page.map(|account| SelectOption::new(account.id, account.account_type_name)))
    }

    async fn page(&self, cursor: &str) -> ApiResult<Paginated<SelectOption>> {
        let page = self.0.accounts_search("", Some(cursor)).await?;
        Ok(page.map(|account| SelectOption::new(account.id, account.account_type_name)))
    }
}

/// Categories, labelled by name.
pub struct CategoryOptions<'a>(pub &'a Client);

impl OptionSource for CategoryOptions<'_> {
    async fn search(&self, term: &str) -> ApiResult<Paginated<SelectOption>> {
        let page = self.0.categories_search(term, None).await?;
        Ok(page.map(|category| SelectOption::new(category.id, category.name)))
    }

    async fn page(&self, cursor: &str) -> ApiResult<Paginated<SelectOption>> {
        let page = self.0.categories_search("", Some(cursor)).await?;
        Ok(page.map(|category| SelectOption::new(category.id, category.name)))
    }
}

#[derive(Debug, Clone)]
pub struct AsyncSelect {
    options: Vec<SelectOption>,
    input: String,
    phase: SelectPhase,
    next: Option<String>,
    selected: Option<i64>,
    highlighted: usize,
    unresolved: UnresolvedSelection,
}

impl AsyncSelect {
    pub fn new(unresolved: UnresolvedSelection) -> Self {
        Self {
            options: Vec::new(),
            input: String::new(),
            phase: SelectPhase::Idle,
            next: None,
            selected: None,
            highlighted: 0,
            unresolved,
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> SelectPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SelectPhase::Loading
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn has_next_page(&self) -> bool {
        self.next.is_some()
    }

    /// Label of the current selection, if it can be shown.
    pub fn selected_label(&self) -> Option<&str> {
        let id = self.selected?;
        self.options
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.label.as_str())
    }

    /// Initial load: the first page for the current term.
    pub fn open(&mut self) -> SelectRequest {
        self.phase = SelectPhase::Loading;
        SelectRequest::Search(self.input.trim().to_string())
    }

    pub fn set_search(&mut self, input: impl Into<String>, now: Instant) {
        self.input = input.into();
        self.phase = SelectPhase::Typing { since: now };
    }

    pub fn push_char(&mut self, ch: char, now: Instant) {
        let mut input = std::mem::take(&mut self.input);
        input.push(ch);
        self.set_search(input, now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        let mut input = std::mem::take(&mut self.input);
        input.pop();
        self.set_search(input, now);
    }

    /// Fires the debounced search once typing has settled.
    pub fn tick(&mut self, now: Instant) -> Option<SelectRequest> {
        match self.phase {
            SelectPhase::Typing { since } if now.duration_since(since) >= SEARCH_DEBOUNCE => {
                self.phase = SelectPhase::Loading;
                Some(SelectRequest::Search(self.input.trim().to_string()))
            }
            _ => None,
        }
    }

    /// The option list was scrolled to its end. Nothing is fetched while a
    /// search is loading or still waiting out the debounce.
    pub fn scroll_to_bottom(&mut self) -> Option<SelectRequest> {
        if self.phase != SelectPhase::Idle {
            return None;
        }
        let cursor = self.next.clone()?;
        self.phase = SelectPhase::Loading;
        Some(SelectRequest::Page(cursor))
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Moves the highlight down; landing on the last option counts as
    /// scrolling to the bottom.
    pub fn highlight_next(&mut self) -> Option<SelectRequest> {
        if self.options.is_empty() {
            return None;
        }
        self.highlighted = (self.highlighted + 1).min(self.options.len() - 1);
        if self.highlighted + 1 == self.options.len() {
            return self.scroll_to_bottom();
        }
        None
    }

    /// Selects the highlighted option and returns its id for the parent form.
    pub fn choose_highlighted(&mut self) -> Option<i64> {
        let option = self.options.get(self.highlighted)?;
        self.selected = Some(option.id);
        self.selected
    }

    /// Clears the selection. The parent receives `None`.
    pub fn clear(&mut self) -> Option<i64> {
        self.selected = None;
        None
    }

    /// Back to a fresh select holding `selected`: no search term, no loaded
    /// pages, nothing pending.
    pub fn reset(&mut self, selected: Option<i64>) {
        self.options.clear();
        self.input.clear();
        self.phase = SelectPhase::Idle;
        self.next = None;
        self.highlighted = 0;
        self.set_selected(selected);
    }

    /// Syncs the selection from the parent form (e.g. when editing a record).
    pub fn set_selected(&mut self, id: Option<i64>) {
        self.selected = id;
        self.ensure_selected_visible();
    }

    pub fn apply(&mut self, request: &SelectRequest, result: ApiResult<Paginated<SelectOption>>) {
        if self.phase == SelectPhase::Loading {
            self.phase = SelectPhase::Idle;
        }

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                tracing::error!("failed to load options: {err}");
                return;
            }
        };

        match request {
            SelectRequest::Search(_) => {
                self.options = page.results;
                self.highlighted = 0;
            }
            SelectRequest::Page(_) => self.append(page.results),
        }
        self.next = page.next;
        self.ensure_selected_visible();
    }

    /// Runs a request against `source` and applies the outcome.
    pub async fn run<S: OptionSource>(&mut self, source: &S, request: SelectRequest) {
        let result = match &request {
            SelectRequest::Search(term) => source.search(term).await,
            SelectRequest::Page(cursor) => source.page(cursor).await,
        };
        self.apply(&request, result);
    }

    fn append(&mut self, incoming: Vec<SelectOption>) {
        for option in incoming {
            match self.options.iter_mut().find(|existing| existing.id == option.id) {
                Some(existing) if existing.placeholder => *existing = option,
                Some(_) => {}
                None => self.options.push(option),
            }
        }
    }

    fn ensure_selected_visible(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        if self.unresolved == UnresolvedSelection::Placeholder
            && !self.options.iter().any(|option| option.id == id)
        {
            self.options.push(SelectOption::placeholder(id));
        }
    }
}
