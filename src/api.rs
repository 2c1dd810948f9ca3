use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    Credentials, MessageResponse, ServerStatus, TokenResponse, Workout, WorkoutPage,
    WorkoutPayload, WorkoutQuery,
};

const TOKEN_HEADER: &str = "x-access-token";

/// Everything the client asks of the workout server.
///
/// Calls block; the worker runs them off the UI thread.
pub trait WorkoutApi: Send + Sync {
    fn health(&self) -> Result<ServerStatus, ApiError>;
    fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;
    /// Returns the server's confirmation message, if any.
    fn register(&self, credentials: &Credentials) -> Result<Option<String>, ApiError>;
    fn list_workouts(&self, token: &str, query: &WorkoutQuery) -> Result<WorkoutPage, ApiError>;
    fn create_workout(&self, token: &str, payload: &WorkoutPayload) -> Result<Workout, ApiError>;
    fn update_workout(
        &self,
        token: &str,
        id: i64,
        payload: &WorkoutPayload,
    ) -> Result<Workout, ApiError>;
    fn delete_workout(&self, token: &str, id: i64) -> Result<(), ApiError>;
}

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<MessageResponse>(&body)
            .unwrap_or_default()
            .message;
        debug!(%status, ?message, "request rejected");
        Err(ApiError::Status { status, message })
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(request)?.text()?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl WorkoutApi for HttpApi {
    fn health(&self) -> Result<ServerStatus, ApiError> {
        self.send_json(self.client.get(self.url("/")))
    }

    fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response: TokenResponse =
            self.send_json(self.client.post(self.url("/login")).json(credentials))?;
        Ok(response.token)
    }

    fn register(&self, credentials: &Credentials) -> Result<Option<String>, ApiError> {
        let body = self
            .send(self.client.post(self.url("/register")).json(credentials))?
            .text()?;
        Ok(serde_json::from_str::<MessageResponse>(&body)
            .unwrap_or_default()
            .message)
    }

    fn list_workouts(&self, token: &str, query: &WorkoutQuery) -> Result<WorkoutPage, ApiError> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if let Some(group) = query.muscle_group {
            params.push(("muscle_group", group.to_string()));
        }
        self.send_json(
            self.client
                .get(self.url("/api/workouts"))
                .header(TOKEN_HEADER, token)
                .query(&params),
        )
    }

    fn create_workout(&self, token: &str, payload: &WorkoutPayload) -> Result<Workout, ApiError> {
        self.send_json(
            self.client
                .post(self.url("/api/workouts"))
                .header(TOKEN_HEADER, token)
                .json(payload),
        )
    }

    fn update_workout(
        &self,
        token: &str,
        id: i64,
        payload: &WorkoutPayload,
    ) -> Result<Workout, ApiError> {
        self.send_json(
            self.client
                .put(self.url(&format!("/api/workouts/{id}")))
                .header(TOKEN_HEADER, token)
                .json(payload),
        )
    }

    fn delete_workout(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.send(
            self.client
                .delete(self.url(&format!("/api/workouts/{id}")))
                .header(TOKEN_HEADER, token),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuscleGroup;
    use mockito::Matcher;
    use serde_json::json;

    const WORKOUT_JSON: &str = r#"{
        "id": 3,
        "exercise_name": "Bench Press",
        "muscle_group": "Chest",
        "is_cardio": false,
        "sets": 3,
        "reps": 10,
        "weight_kg": 50.0,
        "total_volume": 1500.0,
        "created_at": "2025-03-17T08:15:30"
    }"#;

    fn credentials() -> Credentials {
        Credentials {
            username: "jackson".to_string(),
            password: "hunter2".to_string(),
        }
    }

    fn payload() -> WorkoutPayload {
        WorkoutPayload {
            exercise_name: "Bench Press".to_string(),
            muscle_group: MuscleGroup::Chest,
            is_cardio: false,
            weight_kg: 50.0,
            sets: 3,
            reps: 10,
        }
    }

    #[test]
    fn login_returns_the_issued_token() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/login")
            .match_body(Matcher::Json(json!({"username": "jackson", "password": "hunter2"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "abc123"}"#)
            .create();

        let api = HttpApi::new(server.url());
        assert_eq!(api.login(&credentials()).unwrap(), "abc123");
        mock.assert();
    }

    #[test]
    fn login_failure_carries_the_server_message() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Wrong password"}"#)
            .create();

        let err = HttpApi::new(server.url()).login(&credentials()).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("Login failed"), "Wrong password");
    }

    #[test]
    fn register_reports_created_message() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/register")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "New user created!"}"#)
            .create();

        let message = HttpApi::new(server.url()).register(&credentials()).unwrap();
        assert_eq!(message.as_deref(), Some("New user created!"));
    }

    #[test]
    fn listing_sends_token_and_paging_without_empty_filter() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/workouts")
            .match_header("x-access-token", "abc123")
            .match_query(Matcher::Exact("page=2&per_page=5".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"workouts": [{WORKOUT_JSON}], "total_pages": 4}}"#))
            .create();

        let query = WorkoutQuery {
            page: 2,
            per_page: 5,
            muscle_group: None,
        };
        let page = HttpApi::new(server.url())
            .list_workouts("abc123", &query)
            .unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.workouts[0].id, 3);
        mock.assert();
    }

    #[test]
    fn listing_sends_the_muscle_group_filter() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/workouts")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".to_string(), "1".to_string()),
                Matcher::UrlEncoded("muscle_group".to_string(), "Legs".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"workouts": [], "total_pages": 0}"#)
            .create();

        let query = WorkoutQuery {
            page: 1,
            per_page: 5,
            muscle_group: Some(MuscleGroup::Legs),
        };
        let page = HttpApi::new(server.url())
            .list_workouts("abc123", &query)
            .unwrap();
        assert!(page.workouts.is_empty());
        mock.assert();
    }

    #[test]
    fn update_and_delete_target_the_record_id() {
        let mut server = mockito::Server::new();
        let put = server
            .mock("PUT", "/api/workouts/3")
            .match_header("x-access-token", "abc123")
            .match_body(Matcher::PartialJson(json!({"exercise_name": "Bench Press", "sets": 3})))
            .with_status(200)
            .with_body(WORKOUT_JSON)
            .create();
        let delete = server
            .mock("DELETE", "/api/workouts/3")
            .match_header("x-access-token", "abc123")
            .with_status(200)
            .with_body(r#"{"message": "Workout deleted successfully"}"#)
            .create();

        let api = HttpApi::new(server.url());
        let saved = api.update_workout("abc123", 3, &payload()).unwrap();
        assert_eq!(saved.total_volume, 1500.0);
        api.delete_workout("abc123", 3).unwrap();
        put.assert();
        delete.assert();
    }

    #[test]
    fn create_posts_the_payload() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/workouts")
            .match_header("x-access-token", "abc123")
            .match_body(Matcher::PartialJson(json!({"muscle_group": "Chest", "is_cardio": false})))
            .with_status(201)
            .with_body(WORKOUT_JSON)
            .create();

        let saved = HttpApi::new(server.url())
            .create_workout("abc123", &payload())
            .unwrap();
        assert_eq!(saved.exercise_name, "Bench Press");
        mock.assert();
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create();

        let err = HttpApi::new(server.url()).health().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn unreachable_server_is_a_network_error() {
        let err = HttpApi::new("http://127.0.0.1:1").health().unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
