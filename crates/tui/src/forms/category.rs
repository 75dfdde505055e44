use std::time::Instant;

use api_types::category::{Category, CategoryInput};

use super::{FieldView, Form, FormEffect, FormInput, ValidationError, edit_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryField {
    #[default]
    Name,
    Description,
}

#[derive(Debug, Default)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub focus: CategoryField,
}

impl Form for CategoryForm {
    type Entity = Category;
    type Input = CategoryInput;

    fn reset(&mut self, editing: Option<&Category>) {
        match editing {
            Some(category) => {
                self.name = category.name.clone();
                self.description = category.description.clone();
            }
            None => {
                self.name.clear();
                self.description.clear();
            }
        }
        self.focus = CategoryField::Name;
    }

    fn submit(&self) -> Result<CategoryInput, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        Ok(CategoryInput {
            name: name.to_string(),
            description: self.description.trim().to_string(),
        })
    }

    fn fields(&self) -> Vec<FieldView<'_>> {
        vec![
            FieldView {
                label: "Name",
                value: self.name.clone(),
                required: true,
                focused: self.focus == CategoryField::Name,
                select: None,
            },
            FieldView {
                label: "Description",
                value: self.description.clone(),
                required: false,
                focused: self.focus == CategoryField::Description,
                select: None,
            },
        ]
    }

    fn focus_next(&mut self) {
        self.focus = match self.focus {
            CategoryField::Name => CategoryField::Description,
            CategoryField::Description => CategoryField::Name,
        };
    }

    fn focus_prev(&mut self) {
        self.focus_next();
    }

    fn handle_input(&mut self, input: FormInput, _now: Instant) -> Option<FormEffect> {
        match self.focus {
            CategoryField::Name => edit_text(&mut self.name, input),
            CategoryField::Description => edit_text(&mut self.description, input),
        }
        None
    }
}
