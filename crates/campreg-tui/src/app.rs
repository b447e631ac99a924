//! Application state management for campreg.
//!
//! This module contains the `App` struct that owns all UI state: the loaded
//! member list, the registration form, the detail popup, the login overlay
//! and the channel background requests report back through.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use campreg_core::api::{remove_member, ApiClient, ApiError, MemberStore};
use campreg_core::auth::{CredentialStore, Session, SessionData};
use campreg_core::config::Config;
use campreg_core::detail::{DetailError, DetailLookup, DetailTicket, Resolution};
use campreg_core::filter::filter_members;
use campreg_core::form::{Field, FormError, FormReconciler, RenderMode};
use campreg_core::models::{MemberId, MemberRecord};
use campreg_core::print::{CommandPrinter, PrintDocument, PrintSurface};
use campreg_core::stats::{summarize_with, Summary};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for a single form value.
const MAX_FIELD_LENGTH: usize = 200;

/// Number of rows to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

pub const USERNAME_ENV: &str = "CAMPREG_USERNAME";
pub const PASSWORD_ENV: &str = "CAMPREG_PASSWORD";

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Members,
    Register,
    Dashboard,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Members, Tab::Register, Tab::Dashboard];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Members => "Members",
            Tab::Register => "Register",
            Tab::Dashboard => "Dashboard",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Members => Tab::Register,
            Tab::Register => Tab::Dashboard,
            Tab::Dashboard => Tab::Members,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Members => Tab::Dashboard,
            Tab::Register => Tab::Members,
            Tab::Dashboard => Tab::Register,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    LoggingIn,
    ConfirmingDelete,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

/// Member awaiting delete confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub id: MemberId,
    pub name: String,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned network requests.
///
/// Each variant carries everything needed to apply the result without
/// looking at what the UI did in the meantime.
enum TaskResult {
    LoggedIn {
        username: String,
        password: String,
        result: Result<SessionData, ApiError>,
    },
    Members(Result<Vec<MemberRecord>, ApiError>),
    Detail(DetailTicket, Result<MemberRecord, ApiError>),
    Deleted(PendingDelete, Result<(), ApiError>),
    Submitted(Result<MemberRecord, ApiError>),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub search_query: String,
    pub status_message: Option<String>,

    // Login form
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,
    pub login_in_progress: bool,

    // Members tab
    pub members: Vec<MemberRecord>,
    pub members_loading: bool,
    pub members_loaded_at: Option<DateTime<Local>>,
    pub member_selection: usize,
    pub detail: DetailLookup,
    pub pending_delete: Option<PendingDelete>,

    // Register tab
    pub form: FormReconciler,
    pub form_focus: Field,
    pub form_missing: Vec<Field>,
    pub submitting: bool,

    task_tx: mpsc::Sender<TaskResult>,
    task_rx: mpsc::Receiver<TaskResult>,
}

impl App {
    /// Create the application from the user's config and saved session
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        Self::with_config(config, cache_dir)
    }

    pub fn with_config(config: Config, cache_dir: PathBuf) -> Result<Self> {
        let base_url = config.api_base_url();
        debug!(%base_url, ?cache_dir, "Starting with member store");

        let mut session = Session::new(cache_dir);
        if let Err(e) = session.load() {
            warn!(error = %e, "Failed to load session, login required");
        }

        let mut api = ApiClient::new(base_url)?;
        match session.data {
            Some(ref data) if data.issued_for(api.base_url()) => {
                api = api.with_session(data);
                debug!("Token set on API client");
            }
            Some(_) => {
                debug!("Saved session belongs to another member store, ignoring");
                session.data = None;
            }
            None => debug!("No session data found"),
        }

        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let login_username = std::env::var(USERNAME_ENV)
            .ok()
            .or_else(|| config.last_username.clone())
            .unwrap_or_default();
        let login_password = std::env::var(PASSWORD_ENV).unwrap_or_default();

        let form = FormReconciler::new(config.default_camp_fee);

        Ok(Self {
            config,
            session,
            api,

            state: AppState::Normal,
            current_tab: Tab::Members,
            search_query: String::new(),
            status_message: None,

            login_username,
            login_password,
            login_focus: LoginFocus::Username,
            login_error: None,
            login_in_progress: false,

            members: Vec::new(),
            members_loading: false,
            members_loaded_at: None,
            member_selection: 0,
            detail: DetailLookup::new(),
            pending_delete: None,

            form,
            form_focus: Field::FullName,
            form_missing: Vec::new(),
            submitting: false,

            task_tx,
            task_rx,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_active() && self.api.has_token()
    }

    /// Show the login overlay
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Send the login form's credentials to the store in the background
    pub fn attempt_login(&mut self) {
        if self.login_in_progress {
            return;
        }
        let username = self.login_username.trim().to_string();
        let password = self.login_password.clone();

        if username.is_empty() || password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return;
        }

        self.login_error = None;
        self.login_in_progress = true;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.authenticate(&username, &password).await;
            Self::send_result(&tx, TaskResult::LoggedIn { username, password, result }).await;
        });
    }

    fn finish_login(
        &mut self,
        username: String,
        password: String,
        result: Result<SessionData, ApiError>,
    ) {
        self.login_in_progress = false;
        match result {
            Ok(session_data) => {
                if let Err(e) = CredentialStore::store(&username, &password) {
                    warn!(error = %e, "Failed to store credentials");
                }

                self.config.last_username = Some(username);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.api = self.api.with_session(&session_data);
                self.session.update(session_data);
                if let Err(e) = self.session.save() {
                    warn!(error = %e, "Failed to save session");
                }

                self.login_password.clear();
                self.state = AppState::Normal;
                info!("Login successful");
                self.refresh_members();
            }
            Err(e) => {
                error!(error = %e, "Login failed");
                self.login_error = Some(e.user_message());
            }
        }
    }

    /// Forget the session and return to the login overlay
    pub fn handle_session_expired(&mut self) {
        warn!("Session expired");
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        self.api.clear_token();
        self.detail.close();
        self.pending_delete = None;
        self.status_message = Some("Session expired. Please log in again.".to_string());
        self.start_login();
    }

    /// Explicit logout also forgets the remembered password
    pub fn logout(&mut self) {
        info!("Logging out");
        if let Some(username) = self.session.username() {
            if let Err(e) = CredentialStore::forget(username) {
                warn!(error = %e, "Failed to forget stored password");
            }
        }
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session");
        }
        self.api.clear_token();
        self.members.clear();
        self.member_selection = 0;
        self.detail.close();
        self.start_login();
    }

    // =========================================================================
    // Background tasks
    // =========================================================================

    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if tx.send(result).await.is_err() {
            error!("Failed to send task result - channel closed");
        }
    }

    /// Apply every finished background request
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }
        for result in results {
            self.process_task_result(result);
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::LoggedIn { username, password, result } => {
                self.finish_login(username, password, result);
            }
            TaskResult::Members(result) => self.finish_refresh(result),
            TaskResult::Detail(ticket, result) => self.finish_detail(&ticket, result),
            TaskResult::Deleted(pending, result) => self.finish_delete(pending, result),
            TaskResult::Submitted(result) => self.finish_submit(result),
        }
    }

    /// Report a failed request once; an expired session goes back to login
    fn report_error(&mut self, context: &str, e: &ApiError) {
        if e.is_session_expired() {
            self.handle_session_expired();
            return;
        }
        error!(error = %e, "{}", context);
        self.status_message = Some(format!("{}: {}", context, e.user_message()));
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Reload the member list from the store
    pub fn refresh_members(&mut self) {
        if self.members_loading {
            return;
        }
        self.members_loading = true;
        self.status_message = Some("Loading members...".to_string());

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.list_members().await;
            Self::send_result(&tx, TaskResult::Members(result)).await;
        });
    }

    fn finish_refresh(&mut self, result: Result<Vec<MemberRecord>, ApiError>) {
        self.members_loading = false;
        match result {
            Ok(members) => {
                info!(count = members.len(), "Members loaded");
                self.status_message = Some(format!("{} members", members.len()));
                self.members = members;
                self.members_loaded_at = Some(Local::now());
                self.clamp_selection();
            }
            Err(e) => self.report_error("Failed to load members", &e),
        }
    }

    /// Members whose name matches the search query, in list order
    pub fn filtered_members(&self) -> Vec<&MemberRecord> {
        filter_members(&self.members, &self.search_query)
    }

    pub fn selected_member(&self) -> Option<&MemberRecord> {
        self.filtered_members().get(self.member_selection).copied()
    }

    pub fn clamp_selection(&mut self) {
        let max = self.filtered_members().len().saturating_sub(1);
        self.member_selection = self.member_selection.min(max);
    }

    /// Open the detail popup for the selected member and fetch its full record
    pub fn open_detail(&mut self) {
        let Some(id) = self.selected_member().and_then(|m| m.id.clone()) else {
            return;
        };
        let ticket = self.detail.select(id);

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.get_member(ticket.id()).await;
            Self::send_result(&tx, TaskResult::Detail(ticket, result)).await;
        });
    }

    fn finish_detail(&mut self, ticket: &DetailTicket, result: Result<MemberRecord, ApiError>) {
        match self.detail.resolve(ticket, result) {
            Resolution::Shown | Resolution::Stale => {}
            Resolution::Failed(DetailError::SessionExpired) => self.handle_session_expired(),
            Resolution::Failed(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    /// Ask for confirmation before deleting the selected member
    pub fn request_delete(&mut self) {
        let Some(member) = self.selected_member() else {
            return;
        };
        let Some(id) = member.id.clone() else {
            return;
        };
        let name = member.display_name().to_string();
        self.pending_delete = Some(PendingDelete { id, name });
        self.state = AppState::ConfirmingDelete;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.state = AppState::Normal;
    }

    /// Send the confirmed delete; the list changes only once the store agrees
    pub fn confirm_delete(&mut self) {
        self.state = AppState::Normal;
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        self.status_message = Some(format!("Deleting {}...", pending.name));

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.delete_member(&pending.id).await;
            Self::send_result(&tx, TaskResult::Deleted(pending, result)).await;
        });
    }

    fn finish_delete(&mut self, pending: PendingDelete, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                remove_member(&mut self.members, &pending.id);
                if self.detail.record().and_then(|m| m.id.as_ref()) == Some(&pending.id) {
                    self.detail.close();
                }
                self.clamp_selection();
                info!(id = %pending.id, "Member deleted");
                self.status_message = Some(format!("Deleted {}", pending.name));
            }
            Err(e) => self.report_error("Failed to delete member", &e),
        }
    }

    pub fn summary(&self) -> Summary {
        summarize_with(&self.members, self.config.missing_value_policy)
    }

    // =========================================================================
    // Registration form
    // =========================================================================

    /// The draft only changes while nothing is in flight and it was not yet accepted
    pub fn form_editable(&self) -> bool {
        !self.submitting && self.form.is_editable()
    }

    /// Validate and send the draft in the background
    pub fn submit_form(&mut self) {
        if self.submitting {
            return;
        }
        let record = match self.form.prepare_submission() {
            Ok(record) => record,
            Err(FormError::Validation { missing }) => {
                self.status_message = Some("Please fill in all required fields".to_string());
                if let Some(first) = missing.first() {
                    self.form_focus = *first;
                }
                self.form_missing = missing;
                return;
            }
            Err(FormError::AlreadySubmitted) => {
                self.status_message =
                    Some("Already registered. Ctrl+R starts a new registration.".to_string());
                return;
            }
            Err(FormError::Store(e)) => {
                self.report_error("Registration failed", &e);
                return;
            }
        };

        self.form_missing.clear();
        self.submitting = true;
        self.status_message = Some("Submitting registration...".to_string());

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.create_member(&record).await;
            Self::send_result(&tx, TaskResult::Submitted(result)).await;
        });
    }

    fn finish_submit(&mut self, result: Result<MemberRecord, ApiError>) {
        self.submitting = false;
        match self.form.complete_submission(result) {
            Ok(created) => {
                let name = created.display_name().to_string();
                self.status_message = Some(format!("Registered {}. Ctrl+P prints the form.", name));
                self.members.push(created);
            }
            Err(FormError::Store(e)) => self.report_error("Registration failed", &e),
            Err(FormError::Validation { missing }) => {
                self.form_missing = missing;
            }
            Err(FormError::AlreadySubmitted) => {}
        }
    }

    /// Type one character into the focused field
    pub fn form_push_char(&mut self, c: char) {
        let field = self.form_focus;
        if !self.form_editable() || !field.choices().is_empty() {
            return;
        }
        let value = self.form.value(field);
        if !can_add_field_char(value.chars().count(), c) {
            return;
        }
        let mut value = value.to_string();
        value.push(c);
        self.form.set_field(field, value);
        self.form_missing.retain(|f| *f != field);
    }

    pub fn form_backspace(&mut self) {
        let field = self.form_focus;
        if !self.form_editable() {
            return;
        }
        if !field.choices().is_empty() {
            self.form.set_field(field, "");
            return;
        }
        let mut value = self.form.value(field).to_string();
        value.pop();
        self.form.set_field(field, value);
    }

    pub fn form_cycle_choice(&mut self, forward: bool) {
        let field = self.form_focus;
        if !self.form_editable() {
            return;
        }
        self.form.cycle_choice(field, forward);
        self.form_missing.retain(|f| *f != field);
    }

    pub fn reset_form(&mut self) {
        if self.submitting {
            self.status_message = Some("Wait for the registration to finish".to_string());
            return;
        }
        self.form.reset();
        self.form_focus = Field::FullName;
        self.form_missing.clear();
        self.status_message = Some("Form cleared".to_string());
    }

    /// Print the filled form (after submission) or the blank template
    pub fn print_form(&mut self, mode: RenderMode) {
        if mode == RenderMode::Filled && !self.form.can_print_filled() {
            self.status_message = Some("Submit the registration before printing it".to_string());
            return;
        }
        let document = PrintDocument::build(self.form.projection(mode));
        let printer = CommandPrinter::new(self.config.print_command.clone());
        self.status_message = Some(match printer.print(&document) {
            Ok(()) => match mode {
                RenderMode::Filled => "Registration form sent to printer".to_string(),
                RenderMode::Blank => "Blank form sent to printer".to_string(),
            },
            Err(e) => {
                error!(error = %e, "Printing failed");
                e.to_string()
            }
        });
    }
}

// ============================================================================
// Input validation helpers
// ============================================================================

fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use campreg_core::form::FormState;

    fn test_app(dir: &tempfile::TempDir) -> App {
        let config = Config {
            api_base_url: Some("http://127.0.0.1:9/api".to_string()),
            ..Default::default()
        };
        App::with_config(config, dir.path().to_path_buf()).unwrap()
    }

    fn member(id: &str, name: &str) -> MemberRecord {
        MemberRecord {
            id: Some(MemberId::new(id)),
            full_name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Members.next(), Tab::Register);
        assert_eq!(Tab::Dashboard.next(), Tab::Members);
        assert_eq!(Tab::Members.prev(), Tab::Dashboard);
        assert_eq!(Tab::ALL.map(|t| t.title()), ["Members", "Register", "Dashboard"]);
        assert_eq!(Tab::Register.prev(), Tab::Members);
    }

    #[test]
    fn test_can_add_chars() {
        assert!(can_add_username_char(0, 'a'));
        assert!(!can_add_username_char(50, 'a'));
        assert!(!can_add_username_char(0, '\n'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(can_add_field_char(0, 'é'));
        assert!(!can_add_field_char(0, '\t'));
    }

    #[test]
    fn test_search_filters_and_clamps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.members = vec![member("1", "Alice"), member("2", "Bob"), member("3", "Malik")];
        app.member_selection = 2;
        app.search_query = "ali".to_string();
        app.clamp_selection();
        assert_eq!(app.member_selection, 1);
        assert_eq!(app.selected_member().map(|m| m.display_name()), Some("Malik"));
    }

    #[tokio::test]
    async fn test_delete_removes_only_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.members = vec![member("1", "Alice"), member("2", "Bob")];

        app.request_delete();
        assert_eq!(app.state, AppState::ConfirmingDelete);
        let pending = app.pending_delete.clone().unwrap();
        assert_eq!(pending.name, "Alice");

        app.process_task_result(TaskResult::Deleted(
            pending.clone(),
            Err(ApiError::ServerError("boom".into())),
        ));
        assert_eq!(app.members.len(), 2);

        app.process_task_result(TaskResult::Deleted(pending, Ok(())));
        assert_eq!(app.members.len(), 1);
        assert_eq!(app.members[0].display_name(), "Bob");
    }

    #[test]
    fn test_cancel_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.members = vec![member("1", "Alice")];
        app.request_delete();
        app.cancel_delete();
        assert_eq!(app.state, AppState::Normal);
        assert!(app.pending_delete.is_none());
        assert_eq!(app.members.len(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_routes_to_login() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let stale = SessionData {
            token: "stale".to_string(),
            username: "admin".to_string(),
            api_base_url: app.config.api_base_url(),
            created_at: chrono::Utc::now(),
        };
        app.api = app.api.with_session(&stale);
        app.session.update(stale);
        app.process_task_result(TaskResult::Members(Err(ApiError::Unauthorized)));
        assert_eq!(app.state, AppState::LoggingIn);
        assert!(!app.api.has_token());
        assert!(!app.is_authenticated());
    }

    #[test]
    fn test_stale_detail_result_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        let first = app.detail.select(MemberId::new("42"));
        let second = app.detail.select(MemberId::new("43"));
        app.process_task_result(TaskResult::Detail(second, Ok(member("43", "Beth"))));
        app.process_task_result(TaskResult::Detail(first, Ok(member("42", "Alice"))));
        assert_eq!(app.detail.record().map(|m| m.display_name()), Some("Beth"));
    }

    #[test]
    fn test_submit_with_missing_fields_focuses_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.form_focus = Field::Email;
        app.submit_form();
        assert!(!app.submitting);
        assert_eq!(app.form_focus, Field::FullName);
        assert_eq!(app.form_missing.len(), 10);
    }

    #[test]
    fn test_submitted_result_marks_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.submitting = true;
        app.process_task_result(TaskResult::Submitted(Ok(member("7", "Carol"))));
        assert!(!app.submitting);
        assert_eq!(app.form.state(), FormState::Submitted);
        assert_eq!(app.members.len(), 1);
    }

    #[test]
    fn test_form_locked_while_in_flight_and_after_submit() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.form.set_field(Field::FullName, "Alice");

        // Request in flight
        app.submitting = true;
        app.form_focus = Field::FullName;
        for c in " EDITED".chars() {
            app.form_push_char(c);
        }
        app.form_backspace();
        app.reset_form();
        assert_eq!(app.form.value(Field::FullName), "Alice");

        app.process_task_result(TaskResult::Submitted(Ok(member("7", "Alice"))));
        assert!(app.form.can_print_filled());

        // Accepted by the store
        app.form_focus = Field::DepositPaid;
        for c in "999".chars() {
            app.form_push_char(c);
        }
        app.form_focus = Field::Gender;
        app.form_cycle_choice(true);
        assert_eq!(app.form.value(Field::DepositPaid), "");
        assert_eq!(app.form.value(Field::Gender), "");
        let printed = PrintDocument::build(app.form.projection(RenderMode::Filled)).to_text();
        assert!(printed.contains("Alice"));
        assert!(!printed.contains("EDITED"));

        app.submit_form();
        assert!(!app.submitting);
        assert_eq!(app.members.len(), 1);

        app.reset_form();
        app.form_focus = Field::FullName;
        app.form_push_char('B');
        assert_eq!(app.form.value(Field::FullName), "B");
    }

    #[test]
    fn test_typing_into_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.form_focus = Field::DepositPaid;
        for c in "1500".chars() {
            app.form_push_char(c);
        }
        assert_eq!(app.form.value(Field::Balance), "3500");
        app.form_backspace();
        assert_eq!(app.form.value(Field::DepositPaid), "150");
        assert_eq!(app.form.value(Field::Balance), "4850");

        app.form_focus = Field::Gender;
        app.form_push_char('x');
        assert_eq!(app.form.value(Field::Gender), "");
        app.form_cycle_choice(true);
        assert_eq!(app.form.value(Field::Gender), "Male");
    }

    #[test]
    fn test_print_filled_requires_submission() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(&dir);
        app.print_form(RenderMode::Filled);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Submit the registration before printing it")
        );
    }
}
