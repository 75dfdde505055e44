use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyEvent};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    forms::FormInput,
    notify::ToastState,
    page::{PageContext, ResourcePage, RowMenuItem},
    resources::{AccountTypes, Accounts, Categories, Resource, Transactions},
    session::Session,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

/// Drives dropdown debounce and toast expiry.
const TICK_RATE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    TokenPrompt,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    AccountTypes,
    Accounts,
    Categories,
    Transactions,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::AccountTypes,
        Section::Accounts,
        Section::Categories,
        Section::Transactions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::AccountTypes => AccountTypes::TITLE_PLURAL,
            Self::Accounts => Accounts::TITLE_PLURAL,
            Self::Categories => Categories::TITLE_PLURAL,
            Self::Transactions => Transactions::TITLE_PLURAL,
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or_default()
    }

    /// `'1'` to `'4'`.
    pub fn from_digit(ch: char) -> Option<Self> {
        let index = ch.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Default)]
pub struct TokenPrompt {
    pub value: String,
    pub message: Option<String>,
}

#[derive(Default)]
pub struct Pages {
    pub account_types: ResourcePage<AccountTypes>,
    pub accounts: ResourcePage<Accounts>,
    pub categories: ResourcePage<Categories>,
    pub transactions: ResourcePage<Transactions>,
}

pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub token_prompt: TokenPrompt,
    pub pages: Pages,
    pub help: bool,
    pub toasts: ToastState,
    pub base_url: String,
}

/// Whether a page consumed a key or left it to the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Unhandled,
}

/// Runs `$body` against the page of `$section`, bound to `$page`.
macro_rules! on_page {
    ($pages:expr, $section:expr, $page:ident => $body:expr) => {
        match $section {
            Section::AccountTypes => {
                let $page = &mut $pages.account_types;
                $body
            }
            Section::Accounts => {
                let $page = &mut $pages.accounts;
                $body
            }
            Section::Categories => {
                let $page = &mut $pages.categories;
                $body
            }
            Section::Transactions => {
                let $page = &mut $pages.transactions;
                $body
            }
        }
    };
}

pub struct App {
    client: Client,
    session: Arc<Session>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let session = Arc::new(Session::new(config.token.clone()));
        let client = Client::new(&config.base_url, config.request_timeout(), session.clone())?;
        let screen = if session.has_token() {
            Screen::Main
        } else {
            Screen::TokenPrompt
        };

        Ok(Self {
            client,
            session,
            state: AppState {
                screen,
                section: Section::AccountTypes,
                token_prompt: TokenPrompt::default(),
                pages: Pages::default(),
                help: false,
                toasts: ToastState::default(),
                base_url: config.base_url.clone(),
            },
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        if self.state.screen == Screen::Main {
            self.mount_current().await;
        }

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
            self.tick(Instant::now()).await;
        }

        Ok(())
    }

    async fn tick(&mut self, now: Instant) {
        self.state.toasts.tick(now);
        if self.state.screen != Screen::Main {
            return;
        }
        let mut ctx = PageContext::new(&self.client, &mut self.state.toasts);
        on_page!(self.state.pages, self.state.section, page => page.tick(&mut ctx, now).await);
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }
        match self.state.screen {
            Screen::TokenPrompt => self.handle_token_key(action).await,
            Screen::Main => self.handle_main_key(action).await,
        }
    }

    async fn handle_token_key(&mut self, action: AppAction) {
        let prompt = &mut self.state.token_prompt;
        match action {
            AppAction::Input(ch) => prompt.value.push(ch),
            AppAction::Backspace => {
                prompt.value.pop();
            }
            AppAction::Delete => prompt.value.clear(),
            AppAction::Cancel => self.should_quit = true,
            AppAction::Submit => {
                let token = prompt.value.trim().to_string();
                if token.is_empty() {
                    prompt.message = Some("Access token is required.".to_string());
                    return;
                }
                prompt.value.clear();
                prompt.message = None;
                self.session.set_token(Some(token));
                self.state.screen = Screen::Main;
                tracing::info!("access token set");
                self.mount_current().await;
            }
            _ => {}
        }
    }

    async fn handle_main_key(&mut self, action: AppAction) {
        if self.state.help {
            if matches!(
                action,
                AppAction::Cancel | AppAction::Input('?') | AppAction::Input('q')
            ) {
                self.state.help = false;
            }
            return;
        }

        let now = Instant::now();
        let mut ctx = PageContext::new(&self.client, &mut self.state.toasts);
        let outcome = on_page!(
            self.state.pages,
            self.state.section,
            page => handle_page_key(page, &mut ctx, action, now).await
        );
        if outcome == KeyOutcome::Handled {
            return;
        }

        match action {
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('?') => self.state.help = true,
            AppAction::Input(ch) => {
                if let Some(section) = Section::from_digit(ch) {
                    self.switch_section(section).await;
                }
            }
            AppAction::NextField => self.switch_section(self.state.section.next()).await,
            AppAction::PrevField => self.switch_section(self.state.section.prev()).await,
            AppAction::Cancel => self.state.toasts.dismiss(),
            _ => {}
        }
    }

    async fn switch_section(&mut self, section: Section) {
        self.state.section = section;
        self.mount_current().await;
    }

    async fn mount_current(&mut self) {
        let mut ctx = PageContext::new(&self.client, &mut self.state.toasts);
        on_page!(self.state.pages, self.state.section, page => page.mount(&mut ctx).await);
    }
}

fn form_input(action: AppAction) -> Option<FormInput> {
    Some(match action {
        AppAction::Input(ch) => FormInput::Char(ch),
        AppAction::Backspace => FormInput::Backspace,
        AppAction::Delete => FormInput::Delete,
        AppAction::Up => FormInput::Up,
        AppAction::Down => FormInput::Down,
        AppAction::Left => FormInput::Left,
        AppAction::Right => FormInput::Right,
        _ => return None,
    })
}

/// Key handling for one resource page: modal first, then the row menu, then
/// the list itself.
pub async fn handle_page_key<R: Resource>(
    page: &mut ResourcePage<R>,
    ctx: &mut PageContext<'_>,
    action: AppAction,
    now: Instant,
) -> KeyOutcome {
    if page.modal().is_open() {
        match action {
            AppAction::Cancel => page.close_modal(),
            AppAction::Submit => {
                page.handle_save(ctx).await;
            }
            AppAction::NextField => page.focus_next_field(),
            AppAction::PrevField => page.focus_prev_field(),
            other => {
                if let Some(input) = form_input(other) {
                    page.form_input(ctx, input, now).await;
                }
            }
        }
        return KeyOutcome::Handled;
    }

    if page.row_menu().is_some() {
        match action {
            AppAction::Up | AppAction::Down => page.toggle_row_menu_item(),
            AppAction::Submit => {
                if let Some(action) = page.confirm_row_menu() {
                    page.apply_action(ctx, action).await;
                }
            }
            AppAction::Cancel => page.close_row_menu(),
            _ => {}
        }
        return KeyOutcome::Handled;
    }

    match action {
        AppAction::Up | AppAction::Input('k') => page.select_prev(),
        AppAction::Down | AppAction::Input('j') => page.select_next(),
        AppAction::Submit => page.open_row_menu(),
        AppAction::Input('a') => page.open_modal(ctx, None).await,
        AppAction::Input('e') => {
            if let Some(action) = page.row_action(RowMenuItem::Edit) {
                page.apply_action(ctx, action).await;
            }
        }
        AppAction::Input('d') => {
            if let Some(action) = page.row_action(RowMenuItem::Delete) {
                page.apply_action(ctx, action).await;
            }
        }
        AppAction::Input('n') | AppAction::Right => page.next_page(ctx).await,
        AppAction::Input('p') | AppAction::Left => page.previous_page(ctx).await,
        AppAction::Input('r') => page.load(ctx, None).await,
        _ => return KeyOutcome::Unhandled,
    }
    KeyOutcome::Handled
}
