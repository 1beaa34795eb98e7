use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::{HttpRequest, HttpResponse, Scope, get, route, web};
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{FormPage, FormView, LoggedOutPage, LoginForm, NextQuery, SignupForm};
use crate::presentation::utils::{LOGIN_URL, SESSION_COOKIE, redirect, request_id, safe_next};

pub fn scope() -> Scope {
    web::scope("/auth")
        .service(login_page)
        .service(login)
        .service(logout)
        .service(signup_page)
        .service(signup)
}

fn login_form(username: &str) -> FormView {
    FormView::new("AuthenticationForm", &[("username", username), ("password", "")])
}

fn signup_form(username: &str) -> FormView {
    FormView::new(
        "UserCreationForm",
        &[("username", username), ("password1", ""), ("password2", "")],
    )
}

#[get("/login/")]
async fn login_page(query: web::Query<NextQuery>) -> HttpResponse {
    HttpResponse::Ok().json(FormPage {
        form: login_form(""),
        next: query.into_inner().next,
    })
}

#[actix_web::post("/login/")]
async fn login(
    req: HttpRequest,
    auth: web::Data<AuthService>,
    query: web::Query<NextQuery>,
    payload: web::Form<LoginForm>,
) -> Result<HttpResponse, DomainError> {
    let next = query.into_inner().next;
    let token = match auth.login(&payload.username, &payload.password).await {
        Ok(token) => token,
        Err(DomainError::Validation(errors)) => {
            return Ok(HttpResponse::Ok().json(FormPage {
                form: login_form(&payload.username).with_errors(errors),
                next,
            }));
        }
        Err(err) => return Err(err),
    };

    info!(
        request_id = %request_id(&req),
        username = %payload.username,
        "user logged in"
    );

    let max_age = time::Duration::seconds(auth.keys().ttl().num_seconds());
    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish();

    let mut response = redirect(safe_next(next.as_deref()));
    response
        .add_cookie(&cookie)
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    Ok(response)
}

#[route("/logout/", method = "GET", method = "POST")]
async fn logout(req: HttpRequest) -> Result<HttpResponse, DomainError> {
    let mut response = HttpResponse::Ok().json(LoggedOutPage { logged_out: true });
    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();
    response
        .add_cookie(&removal)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    info!(request_id = %request_id(&req), "user logged out");
    Ok(response)
}

#[get("/signup/")]
async fn signup_page() -> HttpResponse {
    HttpResponse::Ok().json(FormPage {
        form: signup_form(""),
        next: None,
    })
}

#[actix_web::post("/signup/")]
async fn signup(
    req: HttpRequest,
    auth: web::Data<AuthService>,
    payload: web::Form<SignupForm>,
) -> Result<HttpResponse, DomainError> {
    let user = match auth
        .register(&payload.username, &payload.password1, &payload.password2)
        .await
    {
        Ok(user) => user,
        Err(DomainError::Validation(errors)) => {
            return Ok(HttpResponse::Ok().json(FormPage {
                form: signup_form(&payload.username).with_errors(errors),
                next: None,
            }));
        }
        Err(err) => return Err(err),
    };

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        username = %user.username,
        "user registered"
    );

    Ok(redirect(LOGIN_URL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryUserRepository;
    use crate::infrastructure::security::JwtKeys;
    use crate::presentation::identity::{IdentityMiddleware, MaybeUser};
    use actix_web::{App, http::StatusCode, http::header, test};
    use serde_json::Value;
    use std::sync::Arc;

    fn auth_service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            JwtKeys::new("test-secret".into(), 1),
        )
    }

    async fn whoami(user: MaybeUser) -> HttpResponse {
        HttpResponse::Ok().json(user.0.map(|u| u.username))
    }

    fn location(res: &actix_web::dev::ServiceResponse) -> String {
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    }

    #[actix_rt::test]
    async fn signup_login_logout_flow() {
        let auth = auth_service();
        let app = test::init_service(
            App::new()
                .wrap(IdentityMiddleware::new(auth.clone()))
                .app_data(web::Data::new(auth.clone()))
                .service(scope())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/signup/")
                .set_form([
                    ("username", "reader"),
                    ("password1", "long-password"),
                    ("password2", "long-password"),
                ])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), LOGIN_URL);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login/?next=%2Fnotes%2F")
                .set_form([("username", "reader"), ("password", "long-password")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/notes/");
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("session cookie")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, Value::from("reader"));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/auth/logout/")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let removal = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("removal cookie");
        assert_eq!(removal.value(), "");
    }

    #[actix_rt::test]
    async fn bad_credentials_rerender_the_form() {
        let auth = auth_service();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(auth))
                .service(scope()),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/auth/login/")
                .set_form([("username", "ghost"), ("password", "whatever1")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["form"]["name"], "AuthenticationForm");
        assert!(body["form"]["errors"]["__all__"].is_array());
    }

    #[actix_rt::test]
    async fn public_auth_pages_are_available() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(auth_service()))
                .service(scope()),
        )
        .await;
        for uri in ["/auth/login/", "/auth/logout/", "/auth/signup/"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(res.status(), StatusCode::OK, "{uri}");
        }
    }
}
