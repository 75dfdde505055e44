use std::{future::Future, str::FromStr, time::Instant};

use api_types::{
    Decimal,
    account::{Account, AccountInput},
    account_type::AccountType,
};

use super::{FieldView, Form, FormEffect, FormInput, ValidationError, edit_text};
use crate::client::Client;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountField {
    #[default]
    AccountType,
    Balance,
}

/// Account form. The account type choices are loaded separately each time
/// the modal opens and are not touched by [`Form::reset`].
#[derive(Debug)]
pub struct AccountForm {
    pub balance: String,
    pub account_type: Option<i64>,
    pub account_types: Vec<AccountType>,
    pub types_loading: bool,
    pub focus: AccountField,
}

impl Default for AccountForm {
    fn default() -> Self {
        Self {
            balance: "0".to_string(),
            account_type: None,
            account_types: Vec::new(),
            types_loading: false,
            focus: AccountField::AccountType,
        }
    }
}

impl AccountForm {
    fn account_type_label(&self) -> String {
        let Some(id) = self.account_type else {
            return "Select an account type".to_string();
        };
        self.account_types
            .iter()
            .find(|account_type| account_type.id == id)
            .map(|account_type| account_type.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    }

    fn cycle_account_type(&mut self, forward: bool) {
        if self.account_types.is_empty() {
            return;
        }
        let len = self.account_types.len();
        let current = self
            .account_type
            .and_then(|id| self.account_types.iter().position(|t| t.id == id));
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(index), true) => (index + 1) % len,
            (Some(index), false) => (index + len - 1) % len,
        };
        self.account_type = Some(self.account_types[index].id);
    }
}

impl Form for AccountForm {
    type Entity = Account;
    type Input = AccountInput;

    fn reset(&mut self, editing: Option<&Account>) {
        match editing {
            Some(account) => {
                self.balance = account.balance.to_string();
                self.account_type = Some(account.account_type.id);
            }
            None => {
                self.balance = "0".to_string();
                self.account_type = None;
            }
        }
        self.focus = AccountField::AccountType;
    }

    fn submit(&self) -> Result<AccountInput, ValidationError> {
        if self.types_loading {
            return Err(ValidationError::StillLoading);
        }
        let account_type = self
            .account_type
            .ok_or(ValidationError::AccountTypeRequired)?;
        let balance = Decimal::from_str(self.balance.trim())
            .map_err(|_| ValidationError::InvalidBalance)?;
        Ok(AccountInput {
            account_type,
            balance,
        })
    }

    fn can_submit(&self) -> bool {
        !self.types_loading && self.account_type.is_some()
    }

    fn fields(&self) -> Vec<FieldView<'_>> {
        let account_type = if self.types_loading {
            "Loading...".to_string()
        } else {
            format!("< {} >", self.account_type_label())
        };
        vec![
            FieldView {
                label: "Account Type",
                value: account_type,
                required: true,
                focused: self.focus == AccountField::AccountType,
                select: None,
            },
            FieldView {
                label: "Balance",
                value: self.balance.clone(),
                required: true,
                focused: self.focus == AccountField::Balance,
                select: None,
            },
        ]
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            AccountField::AccountType => AccountField::Balance,
            AccountField::Balance => AccountField::AccountType,
        };
    }

    fn focus_prev(&mut self) {
        self.focus_next();
    }

    fn handle_input(&mut self, input: FormInput, _now: Instant) -> Option<FormEffect> {
        match self.focus {
            AccountField::AccountType => match input {
                FormInput::Left => self.cycle_account_type(false),
                FormInput::Right | FormInput::Char(' ') => self.cycle_account_type(true),
                FormInput::Delete => self.account_type = None,
                _ => {}
            },
            AccountField::Balance => match input {
                FormInput::Char(ch) if ch.is_ascii_digit() || matches!(ch, '.' | '-') => {
                    edit_text(&mut self.balance, input)
                }
                FormInput::Char(_) => {}
                _ => edit_text(&mut self.balance, input),
            },
        }
        None
    }

    fn on_open(&mut self) -> Vec<FormEffect> {
        self.types_loading = true;
        vec![FormEffect::LoadAccountTypes]
    }

    fn run_effect(&mut self, client: &Client, effect: FormEffect) -> impl Future<Output = ()> {
        async move {
            if effect != FormEffect::LoadAccountTypes {
                return;
            }
            match client.account_types_list(None).await {
                Ok(page) => self.account_types = page.results,
                Err(err) => tracing::error!("error fetching account types: {err}"),
            }
            self.types_loading = false;
        }
    }
}
