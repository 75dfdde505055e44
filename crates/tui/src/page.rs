//! Generic CRUD page: list state, pagination cursors, row selection and the
//! add/edit modal for one [`Resource`].

use std::time::Instant;

use crate::{
    client::{ApiError, Client},
    forms::{Form, FormEffect, FormInput, Modal},
    notify::NotificationSink,
    resources::Resource,
};

/// Dependencies a page needs to talk to the backend and the user.
pub struct PageContext<'a> {
    pub client: &'a Client,
    pub notifier: &'a mut dyn NotificationSink,
}

impl<'a> PageContext<'a> {
    pub fn new(client: &'a Client, notifier: &'a mut dyn NotificationSink) -> Self {
        Self { client, notifier }
    }
}

/// What a table row action asks for: edit carries the entity, delete its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction<E, K> {
    Edit(E),
    Delete(K),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMenuItem {
    Edit,
    Delete,
}

impl RowMenuItem {
    pub const ALL: [RowMenuItem; 2] = [RowMenuItem::Edit, RowMenuItem::Delete];

    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

pub struct ResourcePage<R: Resource> {
    items: Vec<R::Entity>,
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    loading: bool,
    mounted: bool,
    selected: usize,
    row_menu: Option<RowMenuItem>,
    modal: Modal<R>,
}

impl<R: Resource> Default for ResourcePage<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            next: None,
            previous: None,
            loading: false,
            mounted: false,
            selected: 0,
            row_menu: None,
            modal: Modal::default(),
        }
    }
}

impl<R: Resource> ResourcePage<R> {
    pub fn items(&self) -> &[R::Entity] {
        &self.items
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entity(&self) -> Option<&R::Entity> {
        self.items.get(self.selected)
    }

    pub fn row_menu(&self) -> Option<RowMenuItem> {
        self.row_menu
    }

    pub fn modal(&self) -> &Modal<R> {
        &self.modal
    }

    pub fn form_mut(&mut self) -> &mut R::Form {
        self.modal.form_mut()
    }

    /// First page, fetched once when the page is first shown.
    pub async fn mount(&mut self, ctx: &mut PageContext<'_>) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.load(ctx, None).await;
    }

    /// Fetches a page; `None` loads the first one. A failure keeps the
    /// current list.
    pub async fn load(&mut self, ctx: &mut PageContext<'_>, cursor: Option<String>) {
        self.loading = true;
        match R::list(ctx.client, cursor.as_deref()).await {
            Ok(page) => {
                tracing::debug!(
                    resource = R::KIND.plural(),
                    count = page.count,
                    "loaded {} rows",
                    page.results.len()
                );
                self.items = page.results;
                self.count = page.count;
                self.next = page.next;
                self.previous = page.previous;
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
            }
            Err(err) => {
                tracing::error!("error fetching {}: {err}", R::KIND.plural());
                let message = match err {
                    ApiError::MissingToken => err.to_string(),
                    ApiError::Request { .. } => format!("Failed to load {}.", R::KIND.plural()),
                };
                ctx.notifier.error(&message);
            }
        }
        self.loading = false;
    }

    pub async fn next_page(&mut self, ctx: &mut PageContext<'_>) {
        if let Some(cursor) = self.next.clone() {
            self.load(ctx, Some(cursor)).await;
        }
    }

    pub async fn previous_page(&mut self, ctx: &mut PageContext<'_>) {
        if let Some(cursor) = self.previous.clone() {
            self.load(ctx, Some(cursor)).await;
        }
    }

    /// Opens the modal in create (`None`) or edit mode and runs whatever the
    /// form loads on open.
    pub async fn open_modal(&mut self, ctx: &mut PageContext<'_>, editing: Option<R::Entity>) {
        self.row_menu = None;
        let effects = self.modal.open(editing);
        self.run_effects(ctx.client, effects).await;
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Validates and saves the modal. Returns `true` when the modal closed.
    pub async fn handle_save(&mut self, ctx: &mut PageContext<'_>) -> bool {
        let input = match self.modal.submit() {
            Ok(input) => input,
            Err(err) => {
                ctx.notifier.warning(&err.to_string());
                return false;
            }
        };

        let (result, verb) = match self.modal.editing_key() {
            Some(key) => (R::update(ctx.client, &key, &input).await, "updated"),
            None => (R::create(ctx.client, &input).await, "created"),
        };

        match result {
            Ok(_) => {
                tracing::info!(resource = R::KIND.singular(), "{verb}");
                self.modal.close();
                ctx.notifier
                    .success(&format!("{} {verb} successfully.", R::NOUN));
                self.load(ctx, None).await;
                true
            }
            Err(err) => {
                tracing::error!("error saving {}: {err}", R::KIND.singular());
                ctx.notifier.error(&err.to_string());
                false
            }
        }
    }

    pub async fn handle_delete(&mut self, ctx: &mut PageContext<'_>, key: R::Key) -> bool {
        self.row_menu = None;
        match R::delete(ctx.client, &key).await {
            Ok(()) => {
                tracing::info!(resource = R::KIND.singular(), ?key, "deleted");
                ctx.notifier
                    .success(&format!("{} deleted successfully.", R::NOUN));
                self.load(ctx, None).await;
                true
            }
            Err(err) => {
                tracing::error!("error deleting {} {key:?}: {err}", R::KIND.singular());
                ctx.notifier.error(&err.to_string());
                false
            }
        }
    }

    pub async fn apply_action(
        &mut self,
        ctx: &mut PageContext<'_>,
        action: TableAction<R::Entity, R::Key>,
    ) {
        match action {
            TableAction::Edit(entity) => self.open_modal(ctx, Some(entity)).await,
            TableAction::Delete(key) => {
                self.handle_delete(ctx, key).await;
            }
        }
    }

    /// Routes a key press to the focused form field.
    pub async fn form_input(&mut self, ctx: &mut PageContext<'_>, input: FormInput, now: Instant) {
        if let Some(effect) = self.modal.form_mut().handle_input(input, now) {
            self.run_effects(ctx.client, vec![effect]).await;
        }
    }

    pub fn focus_next_field(&mut self) {
        self.modal.form_mut().focus_next();
    }

    pub fn focus_prev_field(&mut self) {
        self.modal.form_mut().focus_prev();
    }

    /// Fires debounced form work (dropdown searches).
    pub async fn tick(&mut self, ctx: &mut PageContext<'_>, now: Instant) {
        if !self.modal.is_open() {
            return;
        }
        let effects = self.modal.form_mut().tick(now);
        self.run_effects(ctx.client, effects).await;
    }

    async fn run_effects(&mut self, client: &Client, effects: Vec<FormEffect>) {
        for effect in effects {
            self.modal.form_mut().run_effect(client, effect).await;
        }
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Action for the selected row, if any.
    pub fn row_action(&self, item: RowMenuItem) -> Option<TableAction<R::Entity, R::Key>> {
        let entity = self.selected_entity()?;
        Some(match item {
            RowMenuItem::Edit => TableAction::Edit(entity.clone()),
            RowMenuItem::Delete => TableAction::Delete(R::key(entity)),
        })
    }

    pub fn open_row_menu(&mut self) {
        if self.selected_entity().is_some() {
            self.row_menu = Some(RowMenuItem::Edit);
        }
    }

    pub fn close_row_menu(&mut self) {
        self.row_menu = None;
    }

    pub fn toggle_row_menu_item(&mut self) {
        self.row_menu = self.row_menu.map(|item| match item {
            RowMenuItem::Edit => RowMenuItem::Delete,
            RowMenuItem::Delete => RowMenuItem::Edit,
        });
    }

    /// Confirms the highlighted menu entry and closes the menu.
    pub fn confirm_row_menu(&mut self) -> Option<TableAction<R::Entity, R::Key>> {
        let item = self.row_menu.take()?;
        self.row_action(item)
    }
}
