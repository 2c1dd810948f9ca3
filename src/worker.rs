use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use eframe::egui;
use tracing::debug;

use crate::api::WorkoutApi;
use crate::error::ApiError;
use crate::models::{Credentials, ServerStatus, Workout, WorkoutPage, WorkoutPayload, WorkoutQuery};

/// A workout call issued by the dashboard. The root attaches the token.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkoutRequest {
    Fetch {
        request_id: u64,
        query: WorkoutQuery,
    },
    /// `draft` names the form the payload came from.
    Save {
        draft: u64,
        target: Option<i64>,
        payload: WorkoutPayload,
    },
    Delete {
        id: i64,
    },
}

#[derive(Clone)]
pub enum Job {
    Health,
    Login(Credentials),
    Register(Credentials),
    /// `generation` identifies the signed-in session that issued the call.
    Workouts {
        generation: u64,
        token: String,
        request: WorkoutRequest,
    },
}

impl Job {
    fn kind(&self) -> &'static str {
        match self {
            Job::Health => "health",
            Job::Login(_) => "login",
            Job::Register(_) => "register",
            Job::Workouts { request, .. } => match request {
                WorkoutRequest::Fetch { .. } => "fetch",
                WorkoutRequest::Save { .. } => "save",
                WorkoutRequest::Delete { .. } => "delete",
            },
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    Health(Result<ServerStatus, ApiError>),
    Login(Result<String, ApiError>),
    Register(Result<Option<String>, ApiError>),
    Workouts {
        generation: u64,
        outcome: WorkoutOutcome,
    },
}

#[derive(Debug)]
pub enum WorkoutOutcome {
    Fetched {
        request_id: u64,
        result: Result<WorkoutPage, ApiError>,
    },
    Saved {
        draft: u64,
        result: Result<Workout, ApiError>,
    },
    Deleted {
        id: i64,
        result: Result<(), ApiError>,
    },
}

impl WorkoutOutcome {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            WorkoutOutcome::Fetched { result: Err(e), .. } => Some(e),
            WorkoutOutcome::Saved { result: Err(e), .. } => Some(e),
            WorkoutOutcome::Deleted { result: Err(e), .. } => Some(e),
            _ => None,
        }
    }

    /// True when the call was turned away for its token.
    pub fn is_unauthorized(&self) -> bool {
        self.error().is_some_and(ApiError::is_unauthorized)
    }
}

fn run_workout_request(
    api: &dyn WorkoutApi,
    token: &str,
    request: WorkoutRequest,
) -> WorkoutOutcome {
    match request {
        WorkoutRequest::Fetch { request_id, query } => WorkoutOutcome::Fetched {
            request_id,
            result: api.list_workouts(token, &query),
        },
        WorkoutRequest::Save {
            draft,
            target,
            payload,
        } => WorkoutOutcome::Saved {
            draft,
            result: match target {
                Some(id) => api.update_workout(token, id, &payload),
                None => api.create_workout(token, &payload),
            },
        },
        WorkoutRequest::Delete { id } => WorkoutOutcome::Deleted {
            id,
            result: api.delete_workout(token, id),
        },
    }
}

pub fn execute(api: &dyn WorkoutApi, job: Job) -> Outcome {
    match job {
        Job::Health => Outcome::Health(api.health()),
        Job::Login(credentials) => Outcome::Login(api.login(&credentials)),
        Job::Register(credentials) => Outcome::Register(api.register(&credentials)),
        Job::Workouts {
            generation,
            token,
            request,
        } => Outcome::Workouts {
            generation,
            outcome: run_workout_request(api, &token, request),
        },
    }
}

/// Runs jobs on background threads and hands their outcomes back to the
/// frame loop, which drains them with [`Worker::poll`].
pub struct Worker {
    api: Arc<dyn WorkoutApi>,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
    repaint: Option<egui::Context>,
    inline: bool,
}

impl Worker {
    pub fn new(api: Arc<dyn WorkoutApi>, repaint: Option<egui::Context>) -> Self {
        let (tx, rx) = channel();
        Self {
            api,
            tx,
            rx,
            repaint,
            inline: false,
        }
    }

    /// Runs every job on the calling thread; outcomes still arrive via `poll`.
    #[cfg(test)]
    pub fn inline(api: Arc<dyn WorkoutApi>) -> Self {
        Self {
            inline: true,
            ..Self::new(api, None)
        }
    }

    pub fn spawn(&self, job: Job) {
        debug!(job = job.kind(), "dispatching job");
        if self.inline {
            let _ = self.tx.send(execute(self.api.as_ref(), job));
            return;
        }

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        thread::spawn(move || {
            let _ = tx.send(execute(api.as_ref(), job));
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    pub fn poll(&self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }
}
