//! Modal forms, one per resource.
//!
//! A [`Form`] owns the controlled inputs of a single modal. [`Modal`] wraps a
//! form with its open flag and the entity being edited, and resets the form
//! every time it opens, so switching between records never leaks input.

mod account;
mod account_type;
mod category;
mod transaction;

use std::{future::Future, time::Instant};

use thiserror::Error;

use crate::{
    client::Client,
    resources::Resource,
    select::{AsyncSelect, SelectRequest},
};

pub use account::{AccountField, AccountForm};
pub use account_type::{AccountTypeField, AccountTypeForm};
pub use category::{CategoryField, CategoryForm};
pub use transaction::{TransactionField, TransactionForm};

/// Client-side validation failure. Shown as a warning; the modal stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Please fill out all required fields.")]
    MissingRequired,
    #[error("Please select an account type.")]
    AccountTypeRequired,
    #[error("Account types are still loading.")]
    StillLoading,
    #[error("Balance must be a number.")]
    InvalidBalance,
    #[error("Amount must be a number.")]
    InvalidAmount,
    #[error("Date must use the YYYY-MM-DD format.")]
    InvalidDate,
}

/// Keyboard input routed to the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Char(char),
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Delete,
}

/// Async work a form asks its page to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    LoadAccountTypes,
    Select {
        target: SelectTarget,
        request: SelectRequest,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTarget {
    Account,
    Category,
}

/// Read-only view of one field for rendering.
#[derive(Debug)]
pub struct FieldView<'a> {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub focused: bool,
    pub select: Option<&'a AsyncSelect>,
}

pub trait Form: Default {
    type Entity;
    type Input;

    /// Populates the inputs from `editing`, or clears them to defaults.
    fn reset(&mut self, editing: Option<&Self::Entity>);

    /// Validates and returns the trimmed, typed payload.
    fn submit(&self) -> Result<Self::Input, ValidationError>;

    fn can_submit(&self) -> bool {
        true
    }

    fn fields(&self) -> Vec<FieldView<'_>>;

    fn focus_next(&mut self);

    fn focus_prev(&mut self);

    fn handle_input(&mut self, input: FormInput, now: Instant) -> Option<FormEffect>;

    /// Effects to run every time the modal opens.
    fn on_open(&mut self) -> Vec<FormEffect> {
        Vec::new()
    }

    fn tick(&mut self, _now: Instant) -> Vec<FormEffect> {
        Vec::new()
    }

    fn run_effect(&mut self, client: &Client, effect: FormEffect) -> impl Future<Output = ()> {
        let _ = (client, effect);
        async {}
    }
}

pub(crate) fn edit_text(buffer: &mut String, input: FormInput) {
    match input {
        FormInput::Char(ch) => buffer.push(ch),
        FormInput::Backspace => {
            buffer.pop();
        }
        FormInput::Delete => buffer.clear(),
        _ => {}
    }
}

pub struct Modal<R: Resource> {
    open: bool,
    editing: Option<R::Entity>,
    form: R::Form,
}

impl<R: Resource> Default for Modal<R> {
    fn default() -> Self {
        Self {
            open: false,
            editing: None,
            form: R::Form::default(),
        }
    }
}

impl<R: Resource> Modal<R> {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn form(&self) -> &R::Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut R::Form {
        &mut self.form
    }

    pub fn title(&self) -> String {
        let verb = if self.editing.is_some() { "Edit" } else { "Add" };
        format!("{verb} {}", R::TITLE_SINGULAR)
    }

    /// Opens in create (`None`) or edit mode. The form is reset either way.
    pub fn open(&mut self, editing: Option<R::Entity>) -> Vec<FormEffect> {
        self.open = true;
        self.form.reset(editing.as_ref());
        self.editing = editing;
        self.form.on_open()
    }

    /// Key of the edited entity; `None` in create mode.
    pub fn editing_key(&self) -> Option<R::Key> {
        self.editing.as_ref().map(R::key)
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
    }

    pub fn submit(&self) -> Result<R::Input, ValidationError> {
        self.form.submit()
    }
}
