use eframe::{egui, App, Frame};
use tracing::{debug, info, warn};

use crate::auth::AuthView;
use crate::dashboard::Dashboard;
use crate::models::MuscleGroup;
use crate::session::{SessionState, SessionStore};
use crate::ui;
use crate::worker::{Job, Outcome, Worker, WorkoutOutcome, WorkoutRequest};

const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Dashboard,
}

/// Everything the dashboard UI can ask for in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardEvent {
    Logout,
    Refresh,
    Previous,
    Next,
    Filter(Option<MuscleGroup>),
    NewWorkout,
    Edit(i64),
    Delete(i64),
    SaveForm,
    CancelForm,
    ConfirmDelete,
    CancelDelete,
}

pub struct WorkoutLogApp {
    session: SessionStore,
    auth: AuthView,
    dashboard: Option<Dashboard>,
    per_page: u32,
    worker: Worker,
    /// Bumped whenever a session starts or ends. Workout jobs carry it so
    /// results issued under an earlier session can be told apart.
    generation: u64,
}

impl WorkoutLogApp {
    pub fn new(session: SessionStore, worker: Worker, per_page: u32) -> Self {
        let mut app = WorkoutLogApp {
            session,
            auth: AuthView::new(),
            dashboard: None,
            per_page,
            worker,
            generation: 0,
        };
        app.worker.spawn(Job::Health);
        if app.session.is_authenticated() {
            app.mount_dashboard();
        }
        app
    }

    /// Derived from the session alone.
    pub fn screen(&self) -> Screen {
        match self.session.state() {
            SessionState::Authenticated { .. } => Screen::Dashboard,
            SessionState::Anonymous => Screen::Auth,
        }
    }

    fn mount_dashboard(&mut self) {
        self.generation += 1;
        let mut dashboard = Dashboard::new(self.per_page);
        let request = dashboard.refresh();
        self.dashboard = Some(dashboard);
        self.dispatch(request);
    }

    fn dispatch(&self, request: WorkoutRequest) {
        match self.session.token() {
            Some(token) => self.worker.spawn(Job::Workouts {
                generation: self.generation,
                token: token.to_string(),
                request,
            }),
            None => warn!("Dropping workout request without a session"),
        }
    }

    pub fn submit_auth(&mut self) {
        if let Some(job) = self.auth.submit() {
            self.worker.spawn(job);
        }
    }

    pub fn logout(&mut self) {
        info!("Logging out");
        self.session.set_token(None);
        self.dashboard = None;
        self.generation += 1;
    }

    /// Drains finished jobs. Called at the top of every frame.
    pub fn pump(&mut self) {
        for outcome in self.worker.poll() {
            self.handle_outcome(outcome);
        }
    }

    fn handle_outcome(&mut self, outcome: Outcome) {
        let follow_up = match outcome {
            Outcome::Health(result) => {
                self.auth.set_server_status(result);
                None
            }
            Outcome::Login(result) => {
                if let Some(token) = self.auth.finish_login(result) {
                    self.session.set_token(Some(token));
                    self.mount_dashboard();
                }
                None
            }
            Outcome::Register(result) => {
                self.auth.finish_register(result);
                None
            }
            Outcome::Workouts {
                generation,
                outcome,
            } => self.handle_workout_outcome(generation, outcome),
        };
        if let Some(request) = follow_up {
            self.dispatch(request);
        }
    }

    fn handle_workout_outcome(
        &mut self,
        generation: u64,
        outcome: WorkoutOutcome,
    ) -> Option<WorkoutRequest> {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "dropping result from an earlier session"
            );
            return None;
        }

        if outcome.is_unauthorized() {
            let message = outcome
                .error()
                .map_or_else(|| SESSION_EXPIRED.to_string(), |e| e.user_message(SESSION_EXPIRED));
            warn!("Server rejected the session token: {message}");
            self.logout();
            self.auth.session_expired(message);
            return None;
        }

        let dashboard = self.dashboard.as_mut()?;
        match outcome {
            WorkoutOutcome::Fetched { request_id, result } => {
                dashboard.apply_fetch(request_id, result);
                None
            }
            WorkoutOutcome::Saved { draft, result } => dashboard.apply_save(draft, result),
            WorkoutOutcome::Deleted { id, result } => dashboard.apply_delete(id, result),
        }
    }

    pub fn handle_event(&mut self, event: DashboardEvent) {
        if event == DashboardEvent::Logout {
            self.logout();
            return;
        }
        let Some(dashboard) = self.dashboard.as_mut() else {
            return;
        };
        let request = match event {
            DashboardEvent::Logout => None,
            DashboardEvent::Refresh => Some(dashboard.refresh()),
            DashboardEvent::Previous => dashboard.previous_page(),
            DashboardEvent::Next => dashboard.next_page(),
            DashboardEvent::Filter(filter) => dashboard.set_filter(filter),
            DashboardEvent::NewWorkout => {
                dashboard.open_create();
                None
            }
            DashboardEvent::Edit(id) => {
                dashboard.open_edit(id);
                None
            }
            DashboardEvent::Delete(id) => {
                dashboard.request_delete(id);
                None
            }
            DashboardEvent::SaveForm => dashboard.submit_form(),
            DashboardEvent::CancelForm => {
                dashboard.cancel_form();
                None
            }
            DashboardEvent::ConfirmDelete => dashboard.confirm_delete(),
            DashboardEvent::CancelDelete => {
                dashboard.cancel_delete();
                None
            }
        };
        if let Some(request) = request {
            self.dispatch(request);
        }
    }
}

impl App for WorkoutLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.pump();

        let screen = self.screen();
        let mut events = Vec::new();
        let mut submit_auth = false;
        egui::CentralPanel::default().show(ctx, |ui| match screen {
            Screen::Auth => submit_auth = ui::show_auth(ui, &mut self.auth),
            Screen::Dashboard => {
                if let Some(dashboard) = self.dashboard.as_mut() {
                    events = ui::show_dashboard(ctx, ui, dashboard);
                }
            }
        });

        if submit_auth {
            self.submit_auth();
        }
        for event in events {
            self.handle_event(event);
        }
    }
}
