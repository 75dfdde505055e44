mod support;

use std::time::Instant;

use api_types::Decimal;
use chrono::NaiveDate;
use pocketbook_tui::{
    app::{KeyOutcome, handle_page_key},
    client::ApiError,
    notify::{Toast, ToastLevel},
    page::{PageContext, ResourcePage},
    resources::{AccountTypes, Accounts, Categories, Transactions},
    ui::keymap::AppAction,
};

use support::FakeBackend;

async fn press<R: pocketbook_tui::resources::Resource>(
    page: &mut ResourcePage<R>,
    ctx: &mut PageContext<'_>,
    actions: &[AppAction],
) {
    for action in actions {
        handle_page_key(page, ctx, *action, Instant::now()).await;
    }
}

fn typed(text: &str) -> Vec<AppAction> {
    text.chars().map(AppAction::Input).collect()
}

#[tokio::test]
async fn savings_account_type_round_trips_with_slug() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<AccountTypes>::default();

    page.mount(&mut ctx).await;
    assert!(page.items().is_empty());

    press(&mut page, &mut ctx, &[AppAction::Input('a')]).await;
    assert!(page.modal().is_open());
    press(&mut page, &mut ctx, &typed("Savings")).await;
    // Name -> Description -> Default
    press(
        &mut page,
        &mut ctx,
        &[
            AppAction::NextField,
            AppAction::NextField,
            AppAction::Input(' '),
            AppAction::Submit,
        ],
    )
    .await;

    assert!(!page.modal().is_open());
    let saved = &page.items()[0];
    assert_eq!(saved.name, "Savings");
    assert_eq!(saved.slug, "savings");
    assert!(saved.is_default);
    assert_eq!(saved.description, "");
    drop(ctx);
    assert_eq!(
        toasts,
        vec![Toast::new(
            ToastLevel::Success,
            "Account type created successfully."
        )]
    );
}

#[tokio::test]
async fn account_type_update_and_delete_by_slug() {
    let backend = FakeBackend::start().await;
    backend.seed_account_type("Checking");
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<AccountTypes>::default();
    page.mount(&mut ctx).await;

    let checking = page.items()[0].clone();
    page.open_modal(&mut ctx, Some(checking)).await;
    assert_eq!(page.form_mut().name, "Checking");
    page.form_mut().description = "Daily spending".to_string();
    assert!(page.handle_save(&mut ctx).await);

    let updated = &page.items()[0];
    assert_eq!(updated.name, "Checking");
    assert_eq!(updated.description, "Daily spending");
    assert!(!updated.is_default);

    press(&mut page, &mut ctx, &[AppAction::Input('d')]).await;
    assert!(page.items().is_empty());
    drop(ctx);
    assert_eq!(
        toasts.last(),
        Some(&Toast::new(
            ToastLevel::Success,
            "Account type deleted successfully."
        ))
    );
}

#[tokio::test]
async fn whitespace_name_never_reaches_the_backend() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Categories>::default();
    page.mount(&mut ctx).await;
    let requests = backend.requests();

    press(&mut page, &mut ctx, &[AppAction::Input('a')]).await;
    press(&mut page, &mut ctx, &typed("   ")).await;
    press(&mut page, &mut ctx, &[AppAction::Submit]).await;

    assert!(page.modal().is_open());
    assert_eq!(backend.requests(), requests);
    drop(ctx);
    assert_eq!(
        toasts,
        vec![Toast::new(ToastLevel::Warning, "Name is required.")]
    );
}

#[tokio::test]
async fn category_create_update_delete() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Categories>::default();
    page.mount(&mut ctx).await;

    page.open_modal(&mut ctx, None).await;
    page.form_mut().name = " Groceries ".to_string();
    page.form_mut().description = "Food".to_string();
    assert!(page.handle_save(&mut ctx).await);
    let created = page.items()[0].clone();
    assert_eq!(created.name, "Groceries");

    page.open_modal(&mut ctx, Some(created.clone())).await;
    page.form_mut().name = "Food & drink".to_string();
    page.form_mut().description.clear();
    assert!(page.handle_save(&mut ctx).await);
    assert_eq!(page.items()[0].id, created.id);
    assert_eq!(page.items()[0].name, "Food & drink");
    assert_eq!(page.items()[0].description, "");

    assert!(page.handle_delete(&mut ctx, created.id).await);
    assert!(page.items().iter().all(|category| category.id != created.id));
}

#[tokio::test]
async fn account_form_loads_types_and_saves_balance() {
    let backend = FakeBackend::start().await;
    let checking = backend.seed_account_type("Checking");
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Accounts>::default();
    page.mount(&mut ctx).await;

    press(&mut page, &mut ctx, &[AppAction::Input('a')]).await;
    assert!(!page.form_mut().types_loading);
    assert_eq!(page.form_mut().account_types, vec![checking.clone()]);

    // Pick the type, then replace the default "0" balance.
    press(
        &mut page,
        &mut ctx,
        &[AppAction::Right, AppAction::NextField, AppAction::Backspace],
    )
    .await;
    press(&mut page, &mut ctx, &typed("2500.75")).await;
    press(&mut page, &mut ctx, &[AppAction::Submit]).await;

    let account = page.items()[0].clone();
    assert_eq!(account.account_type.id, checking.id);
    assert_eq!(account.account_type_name, "Checking");
    assert_eq!(account.balance, Decimal::new(250075, 2));

    page.open_modal(&mut ctx, Some(account.clone())).await;
    assert_eq!(page.form_mut().balance, "2500.75");
    page.form_mut().balance = "10".to_string();
    assert!(page.handle_save(&mut ctx).await);
    assert_eq!(page.items()[0].balance, Decimal::new(10, 0));
    drop(ctx);
    assert_eq!(
        toasts.last(),
        Some(&Toast::new(ToastLevel::Success, "Account updated successfully."))
    );
}

#[tokio::test]
async fn deleting_a_missing_account_keeps_the_list() {
    let backend = FakeBackend::start().await;
    let checking = backend.seed_account_type("Checking");
    backend.seed_account(&checking, Decimal::new(100, 0));
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Accounts>::default();
    page.mount(&mut ctx).await;
    let before = page.items().to_vec();

    assert!(!page.handle_delete(&mut ctx, 999).await);

    assert_eq!(page.items(), before.as_slice());
    drop(ctx);
    assert_eq!(
        toasts,
        vec![Toast::new(ToastLevel::Error, "Failed to delete account")]
    );
}

#[tokio::test]
async fn transaction_round_trips_exact_values() {
    let backend = FakeBackend::start().await;
    let checking = backend.seed_account_type("Checking");
    let account = backend.seed_account(&checking, Decimal::ZERO);
    assert_eq!(account.id, 1);
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Transactions>::default();
    page.mount(&mut ctx).await;

    page.open_modal(&mut ctx, None).await;
    let form = page.form_mut();
    assert_eq!(form.transaction_type, "income");
    assert_eq!(form.account.options().len(), 1);
    form.account.set_selected(Some(1));
    form.amount = "150.50".to_string();
    form.date = "2024-01-15".to_string();
    assert!(page.handle_save(&mut ctx).await);

    let fetched = client.transactions_list(None).await.unwrap();
    assert_eq!(fetched.count, 1);
    let transaction = &fetched.results[0];
    assert_eq!(transaction.account, 1);
    assert_eq!(transaction.amount, Decimal::new(15050, 2));
    assert_eq!(transaction.transaction_type, "income");
    assert_eq!(
        transaction.date,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
    assert_eq!(transaction.category, None);
    assert_eq!(transaction.category_name, None);
    assert_eq!(transaction.account_name, "Checking");

    let transaction = transaction.clone();
    page.open_modal(&mut ctx, Some(transaction.clone())).await;
    page.form_mut().transaction_type = "expense".to_string();
    assert!(page.handle_save(&mut ctx).await);
    assert_eq!(page.items()[0].transaction_type, "expense");

    assert!(page.handle_delete(&mut ctx, transaction.id).await);
    assert!(page.items().is_empty());
}

#[tokio::test]
async fn pages_follow_cursors_both_ways() {
    let backend = FakeBackend::start().await;
    for name in ["Food", "Rent", "Travel", "Fun", "Gifts"] {
        backend.seed_category(name);
    }
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Categories>::default();
    page.mount(&mut ctx).await;

    assert_eq!(page.count(), 5);
    assert!(page.has_next());
    assert!(!page.has_previous());

    press(&mut page, &mut ctx, &[AppAction::Input('n')]).await;
    let names = page.items().iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Travel", "Fun"]);
    assert!(page.has_previous());

    press(&mut page, &mut ctx, &[AppAction::Input('p')]).await;
    let names = page.items().iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Food", "Rent"]);
    assert!(!page.has_previous());
}

#[tokio::test]
async fn dropdown_pages_without_duplicates() {
    let backend = FakeBackend::start().await;
    for name in ["Food", "Rent", "Travel"] {
        backend.seed_category(name);
    }
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Transactions>::default();

    page.open_modal(&mut ctx, None).await;
    assert_eq!(page.form_mut().category.options().len(), 2);
    assert!(page.form_mut().category.has_next_page());

    // Account -> Amount -> Type -> Date -> Description -> Category
    for _ in 0..5 {
        page.focus_next_field();
    }
    press(&mut page, &mut ctx, &[AppAction::Down, AppAction::Down]).await;

    let ids = page
        .form_mut()
        .category
        .options()
        .iter()
        .map(|option| option.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(!page.form_mut().category.has_next_page());
}

#[tokio::test]
async fn list_keys_fall_through_to_the_shell() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Categories>::default();

    let outcome = handle_page_key(&mut page, &mut ctx, AppAction::Input('q'), Instant::now()).await;
    assert_eq!(outcome, KeyOutcome::Unhandled);

    page.open_modal(&mut ctx, None).await;
    let outcome = handle_page_key(&mut page, &mut ctx, AppAction::Input('q'), Instant::now()).await;
    assert_eq!(outcome, KeyOutcome::Handled);
    assert_eq!(page.form_mut().name, "q");
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    let backend = FakeBackend::start().await;
    let client = backend.client_with_token(None);

    assert_eq!(
        client.account_types_list(None).await.unwrap_err(),
        ApiError::MissingToken
    );
    assert_eq!(
        client.accounts_search("sav", None).await.unwrap_err(),
        ApiError::MissingToken
    );
    assert_eq!(
        client.category_delete(1).await.unwrap_err(),
        ApiError::MissingToken
    );
    assert_eq!(
        client.transactions_list(None).await.unwrap_err(),
        ApiError::MissingToken
    );
    assert_eq!(backend.requests(), 0);

    let mut toasts: Vec<Toast> = Vec::new();
    let mut ctx = PageContext::new(&client, &mut toasts);
    let mut page = ResourcePage::<Accounts>::default();
    page.mount(&mut ctx).await;
    drop(ctx);
    assert_eq!(
        toasts,
        vec![Toast::new(
            ToastLevel::Error,
            "Access token not found. Please log in."
        )]
    );
}
