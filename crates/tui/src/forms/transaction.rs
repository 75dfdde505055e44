use std::{future::Future, str::FromStr, time::Instant};

use api_types::{
    Decimal,
    transaction::{Transaction, TransactionInput},
};
use chrono::{Local, NaiveDate};

use super::{FieldView, Form, FormEffect, FormInput, SelectTarget, ValidationError, edit_text};
use crate::{
    client::Client,
    select::{AccountOptions, AsyncSelect, CategoryOptions, UnresolvedSelection},
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TRANSACTION_TYPE: &str = "income";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Account,
    Amount,
    Type,
    Date,
    Description,
    Category,
}

impl TransactionField {
    const ORDER: [TransactionField; 6] = [
        TransactionField::Account,
        TransactionField::Amount,
        TransactionField::Type,
        TransactionField::Date,
        TransactionField::Description,
        TransactionField::Category,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct TransactionForm {
    pub account: AsyncSelect,
    pub category: AsyncSelect,
    pub amount: String,
    pub transaction_type: String,
    pub date: String,
    pub description: String,
    pub focus: TransactionField,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            account: AsyncSelect::new(UnresolvedSelection::Placeholder),
            category: AsyncSelect::new(UnresolvedSelection::Placeholder),
            amount: "0".to_string(),
            transaction_type: DEFAULT_TRANSACTION_TYPE.to_string(),
            date: today(),
            description: String::new(),
            focus: TransactionField::Account,
        }
    }
}

fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

impl TransactionForm {
    fn select_mut(&mut self, target: SelectTarget) -> &mut AsyncSelect {
        match target {
            SelectTarget::Account => &mut self.account,
            SelectTarget::Category => &mut self.category,
        }
    }

    fn select_input(
        &mut self,
        target: SelectTarget,
        input: FormInput,
        now: Instant,
    ) -> Option<FormEffect> {
        let select = self.select_mut(target);
        let request = match input {
            FormInput::Char(ch) => {
                select.push_char(ch, now);
                None
            }
            FormInput::Backspace => {
                select.pop_char(now);
                None
            }
            FormInput::Up => {
                select.highlight_prev();
                None
            }
            FormInput::Down => select.highlight_next(),
            FormInput::Right => {
                select.choose_highlighted();
                None
            }
            FormInput::Delete => {
                select.clear();
                None
            }
            FormInput::Left => None,
        };
        request.map(|request| FormEffect::Select { target, request })
    }

    fn select_value(select: &AsyncSelect) -> String {
        let label = select.selected_label().unwrap_or("-");
        if select.input().is_empty() {
            label.to_string()
        } else {
            format!("{label}  (search: {})", select.input())
        }
    }
}

impl Form for TransactionForm {
    type Entity = Transaction;
    type Input = TransactionInput;

    fn reset(&mut self, editing: Option<&Transaction>) {
        match editing {
            Some(transaction) => {
                self.account.reset(Some(transaction.account));
                self.category.reset(transaction.category);
                self.amount = transaction.amount.to_string();
                self.transaction_type = transaction.transaction_type.clone();
                self.date = transaction.date.format(DATE_FORMAT).to_string();
                self.description = transaction.description.clone();
            }
            None => {
                self.account.reset(None);
                self.category.reset(None);
                self.amount = "0".to_string();
                self.transaction_type = DEFAULT_TRANSACTION_TYPE.to_string();
                self.date = today();
                self.description.clear();
            }
        }
        self.focus = TransactionField::Account;
    }

    fn submit(&self) -> Result<TransactionInput, ValidationError> {
        let transaction_type = self.transaction_type.trim();
        let date = self.date.trim();
        let Some(account) = self.account.selected() else {
            return Err(ValidationError::MissingRequired);
        };
        if transaction_type.is_empty() || date.is_empty() {
            return Err(ValidationError::MissingRequired);
        }
        let date =
            NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)?;
        let amount = Decimal::from_str(self.amount.trim())
            .map_err(|_| ValidationError::InvalidAmount)?;

        Ok(TransactionInput {
            account,
            amount,
            transaction_type: transaction_type.to_string(),
            date,
            description: self.description.trim().to_string(),
            category: self.category.selected(),
        })
    }

    fn fields(&self) -> Vec<FieldView<'_>> {
        vec![
            FieldView {
                label: "Account",
                value: Self::select_value(&self.account),
                required: true,
                focused: self.focus == TransactionField::Account,
                select: Some(&self.account),
            },
            FieldView {
                label: "Amount",
                value: self.amount.clone(),
                required: true,
                focused: self.focus == TransactionField::Amount,
                select: None,
            },
            FieldView {
                label: "Type",
                value: self.transaction_type.clone(),
                required: true,
                focused: self.focus == TransactionField::Type,
                select: None,
            },
            FieldView {
                label: "Date",
                value: self.date.clone(),
                required: true,
                focused: self.focus == TransactionField::Date,
                select: None,
            },
            FieldView {
                label: "Description",
                value: self.description.clone(),
                required: false,
                focused: self.focus == TransactionField::Description,
                select: None,
            },
            FieldView {
                label: "Category",
                value: Self::select_value(&self.category),
                required: false,
                focused: self.focus == TransactionField::Category,
                select: Some(&self.category),
            },
        ]
    }

    fn focus_next(&mut self) {
        let order = TransactionField::ORDER;
        self.focus = order[(self.focus.index() + 1) % order.len()];
    }

    fn focus_prev(&mut self) {
        let order = TransactionField::ORDER;
        self.focus = order[(self.focus.index() + order.len() - 1) % order.len()];
    }

    fn handle_input(&mut self, input: FormInput, now: Instant) -> Option<FormEffect> {
        match self.focus {
            TransactionField::Account => return self.select_input(SelectTarget::Account, input, now),
            TransactionField::Category => {
                return self.select_input(SelectTarget::Category, input, now);
            }
            TransactionField::Amount => edit_text(&mut self.amount, input),
            TransactionField::Type => edit_text(&mut self.transaction_type, input),
            TransactionField::Date => edit_text(&mut self.date, input),
            TransactionField::Description => edit_text(&mut self.description, input),
        }
        None
    }

    fn on_open(&mut self) -> Vec<FormEffect> {
        vec![
            FormEffect::Select {
                target: SelectTarget::Account,
                request: self.account.open(),
            },
            FormEffect::Select {
                target: SelectTarget::Category,
                request: self.category.open(),
            },
        ]
    }

    fn tick(&mut self, now: Instant) -> Vec<FormEffect> {
        [SelectTarget::Account, SelectTarget::Category]
            .into_iter()
            .filter_map(|target| {
                let request = self.select_mut(target).tick(now)?;
                Some(FormEffect::Select { target, request })
            })
            .collect()
    }

    fn run_effect(&mut self, client: &Client, effect: FormEffect) -> impl Future<Output = ()> {
        async move {
            let FormEffect::Select { target, request } = effect else {
                return;
            };
            match target {
                SelectTarget::Account => {
                    self.account.run(&AccountOptions(client), request).await;
                }
                SelectTarget::Category => {
                    self.category.run(&CategoryOptions(client), request).await;
                }
            }
        }
    }
}
