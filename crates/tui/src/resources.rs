//! The four CRUD resources, described once each for [`crate::page::ResourcePage`].

use std::{fmt::Debug, future::Future};

use api_types::{
    Paginated,
    account::{Account, AccountInput},
    account_type::{AccountType, AccountTypeInput},
    category::{Category, CategoryInput},
    transaction::{Transaction, TransactionInput},
};

use crate::{
    client::{ApiResult, Client, ResourceKind},
    forms::{AccountForm, AccountTypeForm, CategoryForm, Form, TransactionForm},
    ui::components::money::{format_amount, format_currency},
};

pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    /// Share of the table width, in percent.
    pub width: u16,
}

const fn column(header: &'static str, width: u16) -> Column {
    Column { header, width }
}

pub trait Resource {
    type Entity: Clone + Debug;
    type Key: Clone + PartialEq + Debug;
    type Input;
    type Form: Form<Entity = Self::Entity, Input = Self::Input>;

    const KIND: ResourceKind;
    const TITLE_SINGULAR: &'static str;
    const TITLE_PLURAL: &'static str;
    /// Subject of success toasts, e.g. "Account type".
    const NOUN: &'static str;
    const EMPTY_MESSAGE: &'static str;

    fn columns() -> &'static [Column];

    fn cells(entity: &Self::Entity) -> Vec<String>;

    fn key(entity: &Self::Entity) -> Self::Key;

    fn list(
        client: &Client,
        cursor: Option<&str>,
    ) -> impl Future<Output = ApiResult<Paginated<Self::Entity>>>;

    fn create(
        client: &Client,
        input: &Self::Input,
    ) -> impl Future<Output = ApiResult<Self::Entity>>;

    fn update(
        client: &Client,
        key: &Self::Key,
        input: &Self::Input,
    ) -> impl Future<Output = ApiResult<Self::Entity>>;

    fn delete(client: &Client, key: &Self::Key) -> impl Future<Output = ApiResult<()>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccountTypes;

impl Resource for AccountTypes {
    type Entity = AccountType;
    /// Account types are addressed by slug.
    type Key = String;
    type Input = AccountTypeInput;
    type Form = AccountTypeForm;

    const KIND: ResourceKind = ResourceKind::AccountType;
    const TITLE_SINGULAR: &'static str = "Account Type";
    const TITLE_PLURAL: &'static str = "Account Types";
    const NOUN: &'static str = "Account type";
    const EMPTY_MESSAGE: &'static str = "No account types found.";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            column("Name", 25),
            column("Slug", 20),
            column("Default", 10),
            column("Description", 45),
        ];
        COLUMNS
    }

    fn cells(entity: &AccountType) -> Vec<String> {
        vec![
            entity.name.clone(),
            entity.slug.clone(),
            if entity.is_default { "Yes" } else { "No" }.to_string(),
            entity.description.clone(),
        ]
    }

    fn key(entity: &AccountType) -> String {
        entity.slug.clone()
    }

    async fn list(client: &Client, cursor: Option<&str>) -> ApiResult<Paginated<AccountType>> {
        client.account_types_list(cursor).await
    }

    async fn create(client: &Client, input: &AccountTypeInput) -> ApiResult<AccountType> {
        client.account_type_create(input).await
    }

    async fn update(
        client: &Client,
        key: &String,
        input: &AccountTypeInput,
    ) -> ApiResult<AccountType> {
        client.account_type_update(key, input).await
    }

    async fn delete(client: &Client, key: &String) -> ApiResult<()> {
        client.account_type_delete(key).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Accounts;

impl Resource for Accounts {
    type Entity = Account;
    type Key = i64;
    type Input = AccountInput;
    type Form = AccountForm;

    const KIND: ResourceKind = ResourceKind::Account;
    const TITLE_SINGULAR: &'static str = "Account";
    const TITLE_PLURAL: &'static str = "Accounts";
    const NOUN: &'static str = "Account";
    const EMPTY_MESSAGE: &'static str = "No accounts found.";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            column("ID", 10),
            column("Account Type", 50),
            column("Balance", 40),
        ];
        COLUMNS
    }

    fn cells(entity: &Account) -> Vec<String> {
        vec![
            entity.id.to_string(),
            entity.account_type_name.clone(),
            format_currency(entity.balance),
        ]
    }

    fn key(entity: &Account) -> i64 {
        entity.id
    }

    async fn list(client: &Client, cursor: Option<&str>) -> ApiResult<Paginated<Account>> {
        client.accounts_list(cursor).await
    }

    async fn create(client: &Client, input: &AccountInput) -> ApiResult<Account> {
        client.account_create(input).await
    }

    async fn update(client: &Client, key: &i64, input: &AccountInput) -> ApiResult<Account> {
        client.account_update(*key, input).await
    }

    async fn delete(client: &Client, key: &i64) -> ApiResult<()> {
        client.account_delete(*key).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Categories;

impl Resource for Categories {
    type Entity = Category;
    type Key = i64;
    type Input = CategoryInput;
    type Form = CategoryForm;

    const KIND: ResourceKind = ResourceKind::Category;
    const TITLE_SINGULAR: &'static str = "Category";
    const TITLE_PLURAL: &'static str = "Categories";
    const NOUN: &'static str = "Category";
    const EMPTY_MESSAGE: &'static str = "No categories found.";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[column("Name", 35), column("Description", 65)];
        COLUMNS
    }

    fn cells(entity: &Category) -> Vec<String> {
        vec![entity.name.clone(), entity.description.clone()]
    }

    fn key(entity: &Category) -> i64 {
        entity.id
    }

    async fn list(client: &Client, cursor: Option<&str>) -> ApiResult<Paginated<Category>> {
        client.categories_list(cursor).await
    }

    async fn create(client: &Client, input: &CategoryInput) -> ApiResult<Category> {
        client.category_create(input).await
    }

    async fn update(client: &Client, key: &i64, input: &CategoryInput) -> ApiResult<Category> {
        client.category_update(*key, input).await
    }

    async fn delete(client: &Client, key: &i64) -> ApiResult<()> {
        client.category_delete(*key).await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Transactions;

impl Resource for Transactions {
    type Entity = Transaction;
    type Key = i64;
    type Input = TransactionInput;
    type Form = TransactionForm;

    const KIND: ResourceKind = ResourceKind::Transaction;
    const TITLE_SINGULAR: &'static str = "Transaction";
    const TITLE_PLURAL: &'static str = "Transactions";
    const NOUN: &'static str = "Transaction";
    const EMPTY_MESSAGE: &'static str = "No transactions found.";

    fn columns() -> &'static [Column] {
        const COLUMNS: &[Column] = &[
            column("Date", 12),
            column("Account", 20),
            column("Type", 12),
            column("Amount", 14),
            column("Category", 17),
            column("Description", 25),
        ];
        COLUMNS
    }

    fn cells(entity: &Transaction) -> Vec<String> {
        vec![
            entity.date.format(DISPLAY_DATE_FORMAT).to_string(),
            entity.account_name.clone(),
            entity.transaction_type.clone(),
            format_amount(entity.amount),
            entity.category_name.clone().unwrap_or_default(),
            entity.description.clone(),
        ]
    }

    fn key(entity: &Transaction) -> i64 {
        entity.id
    }

    async fn list(client: &Client, cursor: Option<&str>) -> ApiResult<Paginated<Transaction>> {
        client.transactions_list(cursor).await
    }

    async fn create(client: &Client, input: &TransactionInput) -> ApiResult<Transaction> {
        client.transaction_create(input).await
    }

    async fn update(
        client: &Client,
        key: &i64,
        input: &TransactionInput,
    ) -> ApiResult<Transaction> {
        client.transaction_update(*key, input).await
    }

    async fn delete(client: &Client, key: &i64) -> ApiResult<()> {
        client.transaction_delete(*key).await
    }
}
