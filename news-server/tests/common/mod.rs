//! Test site wired to in-memory repositories.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use news_server::application::comment_service::CommentService;
use news_server::application::news_service::NewsService;
use news_server::data::comment_repository::CommentRepository;
use news_server::data::memory::{InMemoryCommentRepository, InMemoryNewsRepository};
use news_server::data::news_repository::NewsRepository;
use news_server::domain::comment::{BannedWords, Comment};
use news_server::domain::news::News;
use news_server::infrastructure::config::NEWS_COUNT_ON_HOME_PAGE;
use serde_json::Value;
use site_core::data::memory::InMemoryUserRepository;
use site_core::data::user_repository::UserRepository;
use site_core::infrastructure::security::JwtKeys;
use site_core::presentation::identity::IdentityMiddleware;
use site_core::presentation::utils::SESSION_COOKIE;
use site_core::{AuthService, User};

pub const COMMENT_TEXT: &str = "Текст комментария";
pub const NEW_COMMENT_TEXT: &str = "Новый текст комментария";

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
    pub news_repo: Arc<InMemoryNewsRepository>,
    pub comment_repo: Arc<InMemoryCommentRepository>,
    pub news: NewsService,
    pub comments: CommentService,
}

impl TestSite {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let news_repo = Arc::new(InMemoryNewsRepository::new());
        let comment_repo = Arc::new(InMemoryCommentRepository::new());
        Self {
            auth: AuthService::new(users.clone(), JwtKeys::new("test-secret".into(), 1)),
            news: NewsService::new(
                news_repo.clone(),
                comment_repo.clone(),
                NEWS_COUNT_ON_HOME_PAGE,
            ),
            comments: CommentService::new(
                comment_repo.clone(),
                news_repo.clone(),
                BannedWords::default(),
            ),
            users,
            news_repo,
            comment_repo,
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
            .app_data(web::Data::new(self.news.clone()))
            .app_data(web::Data::new(self.comments.clone()))
            .configure(news_server::configure)
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

    pub async fn news_item(&self) -> News {
        self.news_repo
            .create(News::new("Заголовок".into(), "Текст заметки".into(), None).unwrap())
            .await
            .unwrap()
    }

    /// One more news item than fits on the home page, one per day back from today.
    pub async fn news_list(&self) {
        let today = Utc::now().date_naive();
        for index in 0..=NEWS_COUNT_ON_HOME_PAGE {
            let news = News::new(
                format!("Новость {index}"),
                "Просто текст.".into(),
                Some(today - Duration::days(index as i64)),
            )
            .unwrap();
            self.news_repo.create(news).await.unwrap();
        }
    }

    pub async fn comment(&self, author: &User, news: &News) -> Comment {
        self.comment_repo
            .create(Comment::new(news.id, author.id, COMMENT_TEXT.into()))
            .await
            .unwrap()
    }

    /// Ten comments on `news`, stored newest first so ordering has work to do.
    pub async fn comment_list(&self, author: &User, news: &News) {
        let now = Utc::now();
        for index in (0..10).rev() {
            let comment = self
                .comment_repo
                .create(Comment::new(news.id, author.id, format!("Tекст {index}")))
                .await
                .unwrap();
            self.comment_repo
                .set_created(comment.id, now + Duration::days(index))
                .await;
        }
    }

    pub async fn comment_count(&self) -> usize {
        self.comment_repo.count().await
    }

    pub async fn stored_comment(&self, id: uuid::Uuid) -> Option<Comment> {
        self.comment_repo.find_by_id(id).await.unwrap()
    }
}

pub fn detail_url(news: &News) -> String {
    format!("/news/{}/", news.id)
}

pub fn edit_url(comment: &Comment) -> String {
    format!("/edit_comment/{}/", comment.id)
}

pub fn delete_url(comment: &Comment) -> String {
    format!("/delete_comment/{}/", comment.id)
}

pub fn comments_url(news: &News) -> String {
    format!("/news/{}/#comments", news.id)
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
