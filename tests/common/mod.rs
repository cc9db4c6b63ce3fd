#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use peas::application::services::{AuthService, ImportService};
use peas::domain::entities::{ImportJob, ImportStats, NewSession, NewUser, Session, User};
use peas::domain::repositories::{ImportRepository, SessionRepository, UserRepository};
use peas::error::AppError;
use peas::infrastructure::queue::{JobQueue, QueueError, QueueResult};
use peas::routes::router;
use peas::state::AppState;
use peas::storage::{FsUploader, ObjectUploader};

pub const TEST_SECRET: &str = "test-session-secret-0123456789";
pub const TEST_EMAIL: &str = "cook@peas.test";
pub const TEST_PASSWORD: &str = "correct horse battery";

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict("User already exists", json!({})));
        }
        let user = User {
            id: users.len() as i64 + 1,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct InMemorySessions {
    sessions: Mutex<Vec<Session>>,
}

impl InMemorySessions {
    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = Session {
            id: sessions.len() as i64 + 1,
            user_id: new_session.user_id,
            token_hash: new_session.token_hash,
            created_at: Utc::now(),
            expires_at: new_session.expires_at,
        };
        sessions.push(session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AppError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.iter().find(|s| s.token_hash == token_hash).cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .retain(|s| s.token_hash != token_hash);
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        let now = Utc::now();
        sessions.retain(|s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

/// Import statistics source returning fixed counts, or failing.
pub struct FixedImportStats(pub Option<ImportStats>);

#[async_trait]
impl ImportRepository for FixedImportStats {
    async fn get_import_stats(&self) -> Result<ImportStats, AppError> {
        self.0
            .ok_or_else(|| AppError::internal("connection refused", json!({})))
    }
}

/// Queue that records every job it receives, optionally refusing jobs once
/// `accept_limit` have been accepted.
#[derive(Default)]
pub struct RecordingQueue {
    jobs: Mutex<Vec<ImportJob>>,
    accept_limit: Option<usize>,
}

impl RecordingQueue {
    pub fn accepting(limit: usize) -> Self {
        Self {
            jobs: Mutex::default(),
            accept_limit: Some(limit),
        }
    }

    pub fn jobs(&self) -> Vec<ImportJob> {
        self.jobs.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobQueue for RecordingQueue {
    async fn enqueue(&self, job: &ImportJob) -> QueueResult<()> {
        let mut jobs = self.jobs.lock().unwrap();
        if self.accept_limit.is_some_and(|limit| jobs.len() >= limit) {
            return Err(QueueError::ConnectionError("connection reset".to_string()));
        }
        jobs.push(job.clone());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub sessions: Arc<InMemorySessions>,
    pub queue: Arc<RecordingQueue>,
    pub uploads: TempDir,
}

pub fn sample_stats() -> ImportStats {
    ImportStats {
        note_count: 12,
        ingredient_count: 87,
        parsing_error_count: 3,
    }
}

/// Builds state over in-memory repositories. `stats` of `None` makes the
/// statistics query fail.
pub fn create_test_app(stats: Option<ImportStats>) -> TestApp {
    create_test_app_with_queue(stats, RecordingQueue::default())
}

pub fn create_test_app_with_queue(stats: Option<ImportStats>, queue: RecordingQueue) -> TestApp {
    let users = Arc::new(InMemoryUsers::default());
    let sessions = Arc::new(InMemorySessions::default());
    let queue = Arc::new(queue);
    let uploads = tempfile::tempdir().unwrap();

    let users_dyn: Arc<dyn UserRepository> = users;
    let sessions_dyn: Arc<dyn SessionRepository> = sessions.clone();
    let imports: Arc<dyn ImportRepository> = Arc::new(FixedImportStats(stats));
    let uploader: Arc<dyn ObjectUploader> = Arc::new(FsUploader::new(uploads.path(), "/uploads"));
    let queue_dyn: Arc<dyn JobQueue> = queue.clone();

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            users_dyn,
            sessions_dyn,
            TEST_SECRET.to_string(),
            Duration::hours(1),
        )),
        import_service: Arc::new(ImportService::new(imports, uploader, queue_dyn.clone())),
        queue: queue_dyn,
        cookie_secure: false,
    };

    let server = TestServer::new(router(state.clone(), false)).unwrap();

    TestApp {
        server,
        state,
        sessions,
        queue,
        uploads,
    }
}

/// Creates the test user and returns a `Cookie` header value for a fresh session.
pub async fn sign_in(app: &TestApp) -> String {
    app.state
        .auth_service
        .create_user(TEST_EMAIL, TEST_PASSWORD)
        .await
        .unwrap();
    let session = app
        .state
        .auth_service
        .login(TEST_EMAIL, TEST_PASSWORD)
        .await
        .unwrap();
    format!("peas_session={}", session.token)
}

/// Text content of the first `<title>` element.
pub fn page_title(html: &str) -> Option<&str> {
    let start = html.find("<title>")? + "<title>".len();
    let end = html[start..].find("</title>")? + start;
    Some(html[start..end].trim())
}
