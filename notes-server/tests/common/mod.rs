//! Test site wired to in-memory repositories.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use notes_server::application::note_service::NoteService;
use notes_server::data::memory::InMemoryNoteRepository;
use notes_server::data::note_repository::NoteRepository;
use notes_server::domain::note::{Note, NoteDraft};
use serde_json::Value;
use site_core::data::memory::InMemoryUserRepository;
use site_core::data::user_repository::UserRepository;
use site_core::infrastructure::security::JwtKeys;
use site_core::presentation::identity::IdentityMiddleware;
use site_core::presentation::utils::SESSION_COOKIE;
use site_core::{AuthService, User};

pub const SUCCESS_URL: &str = "/done/";

/// A visitor, signed in or not.
#[derive(Clone)]
pub enum Client {
    Anonymous,
    LoggedIn(Cookie<'static>),
}

impl Client {
    pub fn apply(&self, req: test::TestRequest) -> test::TestRequest {
        match self {
            Client::Anonymous => req,
            Client::LoggedIn(cookie) => req.cookie(cookie.clone()),
        }
    }
}

pub struct TestSite {
    pub auth: AuthService,
    pub users: Arc<InMemoryUserRepository>,
    pub note_repo: Arc<InMemoryNoteRepository>,
    pub notes: NoteService,
}

impl TestSite {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let note_repo = Arc::new(InMemoryNoteRepository::new());
        Self {
            auth: AuthService::new(users.clone(), JwtKeys::new("test-secret".into(), 1)),
            notes: NoteService::new(note_repo.clone()),
            users,
            note_repo,
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .wrap(IdentityMiddleware::new(self.auth.clone()))
            .app_data(web::Data::new(self.auth.clone()))
            .app_data(web::Data::new(self.notes.clone()))
            .configure(notes_server::configure)
    }

    /// Creates a user and a client already logged in as them.
    pub async fn login(&self, username: &str) -> (User, Client) {
        let user = self
            .users
            .create(User::new(username.to_owned(), "unusable".to_owned()))
            .await
            .expect("user created");
        let token = self.auth.issue_token(&user).expect("token issued");
        let cookie = Cookie::build(SESSION_COOKIE, token).path("/").finish();
        (user, Client::LoggedIn(cookie))
    }

    /// A note titled "Заголовок" with its slug derived from the title.
    pub async fn note(&self, author: &User) -> Note {
        let draft = draft("Заголовок", "Текст", "");
        let slug = draft.clean().unwrap();
        self.note_repo
            .create(Note::new(draft, slug, author.id))
            .await
            .unwrap()
    }

    pub async fn note_count(&self) -> usize {
        self.note_repo.count().await
    }

    pub async fn stored_note(&self, slug: &str) -> Option<Note> {
        self.note_repo.find_by_slug(slug).await.unwrap()
    }
}

pub fn draft(title: &str, text: &str, slug: &str) -> NoteDraft {
    NoteDraft {
        title: title.into(),
        text: text.into(),
        slug: slug.into(),
    }
}

pub fn detail_url(note: &Note) -> String {
    format!("/note/{}/", note.slug)
}

pub fn edit_url(note: &Note) -> String {
    format!("/edit/{}/", note.slug)
}

pub fn delete_url(note: &Note) -> String {
    format!("/delete/{}/", note.slug)
}

/// Where an anonymous visitor of `next` is sent.
pub fn login_redirect(next: &str) -> String {
    format!("/auth/login/?next={next}")
}

pub async fn send<S>(app: &S, client: &Client, req: test::TestRequest) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    test::call_service(app, client.apply(req).to_request()).await
}

pub fn location(res: &ServiceResponse) -> String {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

pub async fn json(res: ServiceResponse) -> Value {
    test::read_body_json(res).await
}
