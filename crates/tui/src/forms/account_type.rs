use std::time::Instant;

use api_types::account_type::{AccountType, AccountTypeInput};

use super::{FieldView, Form, FormEffect, FormInput, ValidationError, edit_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountTypeField {
    #[default]
    Name,
    Description,
    Default,
}

#[derive(Debug, Default)]
pub struct AccountTypeForm {
    pub name: String,
    pub description: String,
    pub is_default: bool,
    pub focus: AccountTypeField,
}

impl Form for AccountTypeForm {
    type Entity = AccountType;
    type Input = AccountTypeInput;

    fn reset(&mut self, editing: Option<&AccountType>) {
        match editing {
            Some(account_type) => {
                self.name = account_type.name.clone();
                self.description = account_type.description.clone();
                self.is_default = account_type.is_default;
            }
            None => {
                self.name.clear();
                self.description.clear();
                self.is_default = false;
            }
        }
        self.focus = AccountTypeField::Name;
    }

    fn submit(&self) -> Result<AccountTypeInput, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        Ok(AccountTypeInput {
            name: name.to_string(),
            is_default: self.is_default,
            description: self.description.trim().to_string(),
        })
    }

    fn fields(&self) -> Vec<FieldView<'_>> {
        vec![
            FieldView {
                label: "Name",
                value: self.name.clone(),
                required: true,
                focused: self.focus == AccountTypeField::Name,
                select: None,
            },
            FieldView {
                label: "Description",
                value: self.description.clone(),
                required: false,
                focused: self.focus == AccountTypeField::Description,
                select: None,
            },
            FieldView {
                label: "Default",
                value: if self.is_default { "[x]" } else { "[ ]" }.to_string(),
                required: false,
                focused: self.focus == AccountTypeField::Default,
                select: None,
            },
        ]
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            AccountTypeField::Name => AccountTypeField::Description,
            AccountTypeField::Description => AccountTypeField::Default,
            AccountTypeField::Default => AccountTypeField::Name,
        };
    }

    fn focus_prev(&mut self) {
        self.focus = match self.focus {
            AccountTypeField::Name => AccountTypeField::Default,
            AccountTypeField::Description => AccountTypeField::Name,
            AccountTypeField::Default => AccountTypeField::Description,
        };
    }

    fn handle_input(&mut self, input: FormInput, _now: Instant) -> Option<FormEffect> {
        match self.focus {
            AccountTypeField::Name => edit_text(&mut self.name, input),
            AccountTypeField::Description => edit_text(&mut self.description, input),
            AccountTypeField::Default => {
                if matches!(input, FormInput::Char(' ') | FormInput::Left | FormInput::Right) {
                    self.is_default = !self.is_default;
                }
            }
        }
        None
    }
}
