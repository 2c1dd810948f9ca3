use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::form::WorkoutForm;
use crate::models::{MuscleGroup, Workout, WorkoutPage, WorkoutQuery};
use crate::worker::WorkoutRequest;

const FETCH_FAILED: &str = "Failed to fetch workouts.";
const SAVE_FAILED: &str = "Failed to save workout.";
const DELETE_FAILED: &str = "Failed to delete workout.";

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub total_pages: u32,
    pub filter: Option<MuscleGroup>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            filter: None,
        }
    }
}

/// Pagination, filter, the open draft and pending confirmation for the
/// signed-in view. Every operation that needs the server returns the
/// request to send; outcomes come back through the `apply_*` methods.
pub struct Dashboard {
    per_page: u32,
    page: PageState,
    load: LoadState,
    records: Vec<Workout>,
    form: Option<WorkoutForm>,
    /// Bumped each time a draft is opened; saves echo it back.
    draft: u64,
    /// The draft whose save is in flight.
    saving: Option<u64>,
    pending_delete: Option<i64>,
    error: Option<String>,
    latest_fetch: u64,
}

impl Dashboard {
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page,
            page: PageState::default(),
            load: LoadState::Idle,
            records: Vec::new(),
            form: None,
            draft: 0,
            saving: None,
            pending_delete: None,
            error: None,
            latest_fetch: 0,
        }
    }

    /// Fetches the current page. Any fetch still in flight becomes stale.
    pub fn refresh(&mut self) -> WorkoutRequest {
        self.latest_fetch += 1;
        self.load = LoadState::Loading;
        debug!(
            request_id = self.latest_fetch,
            page = self.page.current_page,
            filter = ?self.page.filter,
            "fetching workouts"
        );
        WorkoutRequest::Fetch {
            request_id: self.latest_fetch,
            query: WorkoutQuery {
                page: self.page.current_page,
                per_page: self.per_page,
                muscle_group: self.page.filter,
            },
        }
    }

    /// Returns false when the outcome was stale and dropped.
    pub fn apply_fetch(&mut self, request_id: u64, result: Result<WorkoutPage, ApiError>) -> bool {
        if request_id != self.latest_fetch {
            debug!(request_id, latest = self.latest_fetch, "dropping stale fetch");
            return false;
        }
        match result {
            Ok(page) => {
                debug!(
                    request_id,
                    served_page = ?page.current_page,
                    total_pages = page.total_pages,
                    has_next = page.has_next,
                    has_prev = page.has_prev,
                    "workouts loaded"
                );
                self.records = page.workouts;
                self.page.total_pages = page.total_pages.max(1);
                if let Some(id) = self.pending_delete {
                    if !self.records.iter().any(|r| r.id == id) {
                        debug!(id, "record awaiting confirmation is gone");
                        self.pending_delete = None;
                    }
                }
                self.load = LoadState::Loaded;
            }
            Err(e) => {
                warn!("Fetching workouts failed: {e}");
                self.load = LoadState::Failed(e.user_message(FETCH_FAILED));
            }
        }
        true
    }

    pub fn can_go_previous(&self) -> bool {
        self.page.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page.current_page < self.page.total_pages
    }

    pub fn previous_page(&mut self) -> Option<WorkoutRequest> {
        self.go_to(self.page.current_page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> Option<WorkoutRequest> {
        self.go_to(self.page.current_page.saturating_add(1))
    }

    fn go_to(&mut self, page: u32) -> Option<WorkoutRequest> {
        let page = page.clamp(1, self.page.total_pages.max(1));
        if page == self.page.current_page {
            return None;
        }
        self.page.current_page = page;
        Some(self.refresh())
    }

    /// `None` clears the filter. Any change goes back to page 1.
    pub fn set_filter(&mut self, filter: Option<MuscleGroup>) -> Option<WorkoutRequest> {
        if filter == self.page.filter {
            return None;
        }
        self.page.filter = filter;
        self.page.current_page = 1;
        Some(self.refresh())
    }

    pub fn open_create(&mut self) {
        self.open_draft(WorkoutForm::blank());
    }

    pub fn open_edit(&mut self, id: i64) {
        if let Some(record) = self.records.iter().find(|r| r.id == id) {
            self.open_draft(WorkoutForm::edit(record));
        }
    }

    fn open_draft(&mut self, form: WorkoutForm) {
        self.draft += 1;
        self.form = Some(form);
        self.error = None;
    }

    /// A save already sent still lands, but no longer touches the form.
    pub fn cancel_form(&mut self) {
        self.form = None;
        self.saving = None;
    }

    pub fn form(&self) -> Option<&WorkoutForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut WorkoutForm> {
        self.form.as_mut()
    }

    /// Save is an update when the draft has an edit target, else a create.
    pub fn submit_form(&mut self) -> Option<WorkoutRequest> {
        if self.saving.is_some() {
            return None;
        }
        let form = self.form.as_ref().filter(|f| f.can_submit())?;
        let request = WorkoutRequest::Save {
            draft: self.draft,
            target: form.editing,
            payload: form.to_payload(),
        };
        self.saving = Some(self.draft);
        self.error = None;
        Some(request)
    }

    /// Only the draft that was saved is closed or flagged; a newer draft
    /// opened meanwhile stays as the user left it.
    pub fn apply_save(
        &mut self,
        draft: u64,
        result: Result<Workout, ApiError>,
    ) -> Option<WorkoutRequest> {
        if self.saving == Some(draft) {
            self.saving = None;
        }
        let current = self.form.is_some() && draft == self.draft;
        match result {
            Ok(saved) => {
                info!(id = saved.id, exercise = %saved.exercise_name, draft, "Saved workout");
                if current {
                    self.form = None;
                }
                Some(self.refresh())
            }
            Err(e) => {
                warn!(draft, "Saving workout failed: {e}");
                if current {
                    self.error = Some(SAVE_FAILED.to_string());
                }
                None
            }
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<&Workout> {
        let id = self.pending_delete?;
        self.records.iter().find(|r| r.id == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<WorkoutRequest> {
        let id = self.pending_delete.take()?;
        self.error = None;
        Some(WorkoutRequest::Delete { id })
    }

    /// The row stays listed until the refetch lands.
    pub fn apply_delete(&mut self, id: i64, result: Result<(), ApiError>) -> Option<WorkoutRequest> {
        match result {
            Ok(()) => {
                info!(id, "Deleted workout");
                Some(self.refresh())
            }
            Err(e) => {
                warn!(id, "Deleting workout failed: {e}");
                self.error = Some(DELETE_FAILED.to_string());
                None
            }
        }
    }

    pub fn records(&self) -> &[Workout] {
        &self.records
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }
}
