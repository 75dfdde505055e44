//! In-process fake of the finance backend: bearer auth, DRF-style
//! pagination with absolute cursor URLs, and `?search=` filtering.

#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use api_types::{
    Paginated,
    account::{Account, AccountInput},
    account_type::{AccountType, AccountTypeInput},
    category::{Category, CategoryInput},
    transaction::{Transaction, TransactionInput},
};
use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use pocketbook_tui::{client::Client, session::Session};
use serde::Deserialize;

pub const TOKEN: &str = "test-token";
pub const PAGE_SIZE: usize = 2;

/// Ids are assigned per resource, starting at 1.
#[derive(Default)]
struct Store {
    last_ids: [i64; 4],
    account_types: Vec<AccountType>,
    accounts: Vec<Account>,
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
}

#[derive(Clone, Copy)]
enum Kind {
    AccountType,
    Account,
    Category,
    Transaction,
}

impl Store {
    fn id(&mut self, kind: Kind) -> i64 {
        let last = &mut self.last_ids[kind as usize];
        *last += 1;
        *last
    }
}

#[derive(Clone)]
struct BackendState {
    store: Arc<Mutex<Store>>,
    requests: Arc<AtomicUsize>,
    base_url: Arc<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    page: Option<usize>,
    search: Option<String>,
}

type Reply<T> = Result<Json<T>, StatusCode>;

pub struct FakeBackend {
    pub base_url: String,
    state: BackendState,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}/api/");
        let state = BackendState {
            store: Arc::default(),
            requests: Arc::default(),
            base_url: Arc::new(base_url.clone()),
        };

        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, state }
    }

    pub fn client(&self) -> Client {
        self.client_with_token(Some(TOKEN))
    }

    pub fn client_with_token(&self, token: Option<&str>) -> Client {
        Client::new(
            &self.base_url,
            Duration::from_secs(5),
            Arc::new(Session::new(token.map(str::to_string))),
        )
        .unwrap()
    }

    /// Requests that reached the server, authenticated or not.
    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn seed_account_type(&self, name: &str) -> AccountType {
        let mut store = self.state.store.lock().unwrap();
        let account_type = AccountType {
            id: store.id(Kind::AccountType),
            name: name.to_string(),
            slug: slugify(name),
            is_default: false,
            description: String::new(),
        };
        store.account_types.push(account_type.clone());
        account_type
    }

    pub fn seed_account(&self, account_type: &AccountType, balance: api_types::Decimal) -> Account {
        let mut store = self.state.store.lock().unwrap();
        let account = Account {
            id: store.id(Kind::Account),
            balance,
            account_type: account_type.clone(),
            account_type_name: account_type.name.clone(),
        };
        store.accounts.push(account.clone());
        account
    }

    pub fn seed_category(&self, name: &str) -> Category {
        let mut store = self.state.store.lock().unwrap();
        let category = Category {
            id: store.id(Kind::Category),
            name: name.to_string(),
            description: String::new(),
        };
        store.categories.push(category.clone());
        category
    }
}

fn router(state: BackendState) -> Router {
    Router::new()
        .route(
            "/api/account-types/",
            get(list_account_types).post(create_account_type),
        )
        .route(
            "/api/account-types/{slug}/",
            axum::routing::put(update_account_type).delete(delete_account_type),
        )
        .route("/api/accounts/", get(list_accounts).post(create_account))
        .route(
            "/api/accounts/{id}/",
            axum::routing::put(update_account).delete(delete_account),
        )
        .route("/api/categories/", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}/",
            axum::routing::put(update_category).delete(delete_category),
        )
        .route(
            "/api/transactions/",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/api/transactions/{id}/",
            axum::routing::put(update_transaction).delete(delete_transaction),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

async fn auth(
    State(state): State<BackendState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let expected = format!("Bearer {TOKEN}");
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorized {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(request).await)
}

fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn matches(haystack: &str, search: Option<&str>) -> bool {
    match search.map(str::trim).filter(|term| !term.is_empty()) {
        Some(term) => haystack.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

/// Builds one page of `items` with absolute `next`/`previous` links.
fn paginate<T: Clone>(
    base_url: &str,
    resource: &str,
    items: Vec<T>,
    query: &ListQuery,
) -> Paginated<T> {
    let page = query.page.unwrap_or(1).max(1);
    let start = (page - 1) * PAGE_SIZE;
    let link = |page: usize| {
        let mut url = format!("{base_url}{resource}/?page={page}");
        if let Some(search) = &query.search {
            url.push_str(&format!("&search={search}"));
        }
        url
    };

    Paginated {
        count: items.len() as u64,
        next: (start + PAGE_SIZE < items.len()).then(|| link(page + 1)),
        previous: (page > 1).then(|| link(page - 1)),
        results: items.into_iter().skip(start).take(PAGE_SIZE).collect(),
    }
}

async fn list_account_types(
    State(state): State<BackendState>,
    Query(query): Query<ListQuery>,
) -> Json<Paginated<AccountType>> {
    let items = state.store.lock().unwrap().account_types.clone();
    Json(paginate(&state.base_url, "account-types", items, &query))
}

async fn create_account_type(
    State(state): State<BackendState>,
    Json(input): Json<AccountTypeInput>,
) -> Result<(StatusCode, Json<AccountType>), StatusCode> {
    if input.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = state.store.lock().unwrap();
    let account_type = AccountType {
        id: store.id(Kind::AccountType),
        slug: slugify(&input.name),
        name: input.name,
        is_default: input.is_default,
        description: input.description,
    };
    store.account_types.push(account_type.clone());
    Ok((StatusCode::CREATED, Json(account_type)))
}

async fn update_account_type(
    State(state): State<BackendState>,
    Path(slug): Path<String>,
    Json(input): Json<AccountTypeInput>,
) -> Reply<AccountType> {
    let mut store = state.store.lock().unwrap();
    let account_type = store
        .account_types
        .iter_mut()
        .find(|account_type| account_type.slug == slug)
        .ok_or(StatusCode::NOT_FOUND)?;
    account_type.name = input.name;
    account_type.is_default = input.is_default;
    account_type.description = input.description;
    Ok(Json(account_type.clone()))
}

async fn delete_account_type(
    State(state): State<BackendState>,
    Path(slug): Path<String>,
) -> StatusCode {
    let mut store = state.store.lock().unwrap();
    let before = store.account_types.len();
    store.account_types.retain(|account_type| account_type.slug != slug);
    if store.account_types.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn list_accounts(
    State(state): State<BackendState>,
    Query(query): Query<ListQuery>,
) -> Json<Paginated<Account>> {
    let items = state
        .store
        .lock()
        .unwrap()
        .accounts
        .iter()
        .filter(|account| matches(&account.account_type_name, query.search.as_deref()))
        .cloned()
        .collect();
    Json(paginate(&state.base_url, "accounts", items, &query))
}

fn build_account(store: &Store, id: i64, input: AccountInput) -> Result<Account, StatusCode> {
    let account_type = store
        .account_types
        .iter()
        .find(|account_type| account_type.id == input.account_type)
        .cloned()
        .ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Account {
        id,
        balance: input.balance,
        account_type_name: account_type.name.clone(),
        account_type,
    })
}

async fn create_account(
    State(state): State<BackendState>,
    Json(input): Json<AccountInput>,
) -> Result<(StatusCode, Json<Account>), StatusCode> {
    let mut store = state.store.lock().unwrap();
    let id = store.id(Kind::Account);
    let account = build_account(&store, id, input)?;
    store.accounts.push(account.clone());
    Ok((StatusCode::CREATED, Json(account)))
}

async fn update_account(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    Json(input): Json<AccountInput>,
) -> Reply<Account> {
    let mut store = state.store.lock().unwrap();
    let index = store
        .accounts
        .iter()
        .position(|account| account.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let account = build_account(&store, id, input)?;
    store.accounts[index] = account.clone();
    Ok(Json(account))
}

async fn delete_account(State(state): State<BackendState>, Path(id): Path<i64>) -> StatusCode {
    let mut store = state.store.lock().unwrap();
    let before = store.accounts.len();
    store.accounts.retain(|account| account.id != id);
    if store.accounts.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn list_categories(
    State(state): State<BackendState>,
    Query(query): Query<ListQuery>,
) -> Json<Paginated<Category>> {
    let items = state
        .store
        .lock()
        .unwrap()
        .categories
        .iter()
        .filter(|category| matches(&category.name, query.search.as_deref()))
        .cloned()
        .collect();
    Json(paginate(&state.base_url, "categories", items, &query))
}

async fn create_category(
    State(state): State<BackendState>,
    Json(input): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), StatusCode> {
    let mut store = state.store.lock().unwrap();
    let category = Category {
        id: store.id(Kind::Category),
        name: input.name,
        description: input.description,
    };
    store.categories.push(category.clone());
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    Json(input): Json<CategoryInput>,
) -> Reply<Category> {
    let mut store = state.store.lock().unwrap();
    let category = store
        .categories
        .iter_mut()
        .find(|category| category.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    category.name = input.name;
    category.description = input.description;
    Ok(Json(category.clone()))
}

async fn delete_category(State(state): State<BackendState>, Path(id): Path<i64>) -> StatusCode {
    let mut store = state.store.lock().unwrap();
    let before = store.categories.len();
    store.categories.retain(|category| category.id != id);
    if store.categories.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn list_transactions(
    State(state): State<BackendState>,
    Query(query): Query<ListQuery>,
) -> Json<Paginated<Transaction>> {
    let items = state.store.lock().unwrap().transactions.clone();
    Json(paginate(&state.base_url, "transactions", items, &query))
}

fn build_transaction(
    store: &Store,
    id: i64,
    input: TransactionInput,
) -> Result<Transaction, StatusCode> {
    let account = store
        .accounts
        .iter()
        .find(|account| account.id == input.account)
        .ok_or(StatusCode::BAD_REQUEST)?;
    let category_name = match input.category {
        Some(category_id) => Some(
            store
                .categories
                .iter()
                .find(|category| category.id == category_id)
                .map(|category| category.name.clone())
                .ok_or(StatusCode::BAD_REQUEST)?,
        ),
        None => None,
    };
    Ok(Transaction {
        id,
        account: input.account,
        account_name: account.account_type_name.clone(),
        amount: input.amount,
        transaction_type: input.transaction_type,
        date: input.date,
        description: input.description,
        category: input.category,
        category_name,
    })
}

async fn create_transaction(
    State(state): State<BackendState>,
    Json(input): Json<TransactionInput>,
) -> Result<(StatusCode, Json<Transaction>), StatusCode> {
    let mut store = state.store.lock().unwrap();
    let id = store.id(Kind::Transaction);
    let transaction = build_transaction(&store, id, input)?;
    store.transactions.push(transaction.clone());
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn update_transaction(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    Json(input): Json<TransactionInput>,
) -> Reply<Transaction> {
    let mut store = state.store.lock().unwrap();
    let index = store
        .transactions
        .iter()
        .position(|transaction| transaction.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let transaction = build_transaction(&store, id, input)?;
    store.transactions[index] = transaction.clone();
    Ok(Json(transaction))
}

async fn delete_transaction(State(state): State<BackendState>, Path(id): Path<i64>) -> StatusCode {
    let mut store = state.store.lock().unwrap();
    let before = store.transactions.len();
    store.transactions.retain(|transaction| transaction.id != id);
    if store.transactions.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}
