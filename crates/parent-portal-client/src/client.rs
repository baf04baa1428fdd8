//! HTTP access to every API operation.

use std::time::Duration;

use parent_portal_models::{
    AttendanceUpdateDto, AuthResponse, ChangePasswordDto, ConversationSummary, CreateHomeworkDto,
    CreateStudentDto, Homework, LoginRequest, Message, MessageResponse, RegisterRequest,
    SendMessageDto, Student, StudentQuery, UpdateProfileDto, User, UserSummary, mailbox,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::session::{SessionContext, SessionStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Body of `GET /api`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    pub status: String,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for one API deployment. Holds no session state of its own.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_http_client(http, base_url))
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn public<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        Self::read(request.send().await?).await
    }

    /// Sends an authenticated request. A 401 ends the session.
    async fn authed<T, S>(
        &self,
        session: &mut SessionContext<S>,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        S: SessionStore,
    {
        let token = session.token().ok_or(ClientError::NotAuthenticated)?;
        debug!(%method, path, "API request");

        let request = build(self.http.request(method, self.url(path)).bearer_auth(token));
        let result = Self::read(request.send().await?).await;

        if matches!(&result, Err(e) if e.is_unauthorized()) {
            warn!(path, "Session rejected by server, signing out");
            session.clear()?;
        }

        result
    }

    fn establish<S: SessionStore>(
        session: &mut SessionContext<S>,
        auth: AuthResponse,
    ) -> ClientResult<User> {
        session.establish(auth.token, auth.user.clone())?;
        Ok(auth.user)
    }

    pub async fn status(&self) -> ClientResult<ApiStatus> {
        self.public(self.http.get(self.url(""))).await
    }

    pub async fn register<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        request: &RegisterRequest,
    ) -> ClientResult<User> {
        let auth = self
            .public(self.http.post(self.url("/auth/register")).json(request))
            .await?;
        Self::establish(session, auth)
    }

    pub async fn login<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        email: &str,
        password: &str,
    ) -> ClientResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth = self
            .public(self.http.post(self.url("/auth/login")).json(&request))
            .await?;
        Self::establish(session, auth)
    }

    pub fn logout<S: SessionStore>(&self, session: &mut SessionContext<S>) -> ClientResult<()> {
        session.clear()
    }

    /// Fetches the current profile and refreshes the cached copy.
    pub async fn me<S: SessionStore>(&self, session: &mut SessionContext<S>) -> ClientResult<User> {
        let user: User = self.authed(session, Method::GET, "/auth/me", |r| r).await?;
        session.refresh_user(user.clone())?;
        Ok(user)
    }

    pub async fn students<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        query: &StudentQuery,
    ) -> ClientResult<Vec<Student>> {
        self.authed(session, Method::GET, "/students", |r| r.query(query))
            .await
    }

    pub async fn student<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        id: Uuid,
    ) -> ClientResult<Student> {
        self.authed(session, Method::GET, &format!("/students/{}", id), |r| r)
            .await
    }

    pub async fn create_student<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        dto: &CreateStudentDto,
    ) -> ClientResult<Student> {
        self.authed(session, Method::POST, "/students", |r| r.json(dto))
            .await
    }

    pub async fn update_attendance<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        id: Uuid,
        update: &AttendanceUpdateDto,
    ) -> ClientResult<Student> {
        let path = format!("/students/{}/attendance", id);
        self.authed(session, Method::PUT, &path, |r| r.json(update))
            .await
    }

    pub async fn homework<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        class_name: &str,
        section: &str,
    ) -> ClientResult<Vec<Homework>> {
        self.authed(session, Method::GET, "/homework", |r| {
            r.query(&[("class", class_name), ("section", section)])
        })
        .await
    }

    pub async fn create_homework<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        dto: &CreateHomeworkDto,
    ) -> ClientResult<Homework> {
        self.authed(session, Method::POST, "/homework", |r| r.json(dto))
            .await
    }

    /// Every message the caller sent or received, newest first.
    pub async fn messages<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
    ) -> ClientResult<Vec<Message>> {
        self.authed(session, Method::GET, "/messages", |r| r).await
    }

    pub async fn conversation<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        other_user_id: Uuid,
    ) -> ClientResult<Vec<Message>> {
        let path = format!("/messages/conversation/{}", other_user_id);
        self.authed(session, Method::GET, &path, |r| r).await
    }

    /// One summary per counterpart, grouped locally from [`Self::messages`].
    pub async fn conversations<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
    ) -> ClientResult<Vec<ConversationSummary>> {
        let messages = self.messages(session).await?;
        let viewer = session
            .user()
            .map(|u| u.id)
            .ok_or(ClientError::NotAuthenticated)?;
        Ok(mailbox(&messages, viewer))
    }

    pub async fn send_message<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        receiver_id: Uuid,
        content: &str,
    ) -> ClientResult<Message> {
        let dto = SendMessageDto {
            receiver_id,
            content: content.to_string(),
        };
        self.authed(session, Method::POST, "/messages", |r| r.json(&dto))
            .await
    }

    pub async fn mark_read<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        message_id: Uuid,
    ) -> ClientResult<Message> {
        let path = format!("/messages/{}/read", message_id);
        self.authed(session, Method::PUT, &path, |r| r).await
    }

    pub async fn available_users<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
    ) -> ClientResult<Vec<UserSummary>> {
        self.authed(session, Method::GET, "/users/available", |r| r)
            .await
    }

    pub async fn user<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        id: Uuid,
    ) -> ClientResult<User> {
        self.authed(session, Method::GET, &format!("/users/{}", id), |r| r)
            .await
    }

    /// Updates the caller's profile and the cached copy.
    pub async fn update_profile<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        dto: &UpdateProfileDto,
    ) -> ClientResult<User> {
        let user: User = self
            .authed(session, Method::PUT, "/users/profile", |r| r.json(dto))
            .await?;
        session.refresh_user(user.clone())?;
        Ok(user)
    }

    pub async fn change_password<S: SessionStore>(
        &self,
        session: &mut SessionContext<S>,
        dto: &ChangePasswordDto,
    ) -> ClientResult<MessageResponse> {
        self.authed(session, Method::PUT, "/users/password", |r| r.json(dto))
            .await
    }
}
