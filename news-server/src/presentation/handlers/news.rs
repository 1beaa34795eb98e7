use actix_web::{HttpRequest, HttpResponse, get, post, web};
use site_core::presentation::utils::{redirect, request_id};
use site_core::{AuthenticatedUser, DomainError, MaybeUser};
use tracing::info;
use uuid::Uuid;

use crate::application::comment_service::CommentService;
use crate::application::news_service::NewsService;
use crate::presentation::dto::{CommentPayload, HomePage, NewsDetailPage, comment_form};

pub fn comments_anchor(news_id: Uuid) -> String {
    format!("/news/{news_id}/#comments")
}

#[get("/")]
pub async fn home(news: web::Data<NewsService>) -> Result<HttpResponse, DomainError> {
    let object_list = news.home().await?;
    Ok(HttpResponse::Ok().json(HomePage { object_list }))
}

#[get("/news/{id}/")]
pub async fn detail(
    user: MaybeUser,
    news: web::Data<NewsService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let (item, comments) = news.detail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(NewsDetailPage {
        news: item,
        comments,
        form: user.0.map(|_| comment_form("")),
    }))
}

#[post("/news/{id}/")]
pub async fn create_comment(
    user: AuthenticatedUser,
    req: HttpRequest,
    news: web::Data<NewsService>,
    comments: web::Data<CommentService>,
    path: web::Path<Uuid>,
    payload: web::Form<CommentPayload>,
) -> Result<HttpResponse, DomainError> {
    let news_id = path.into_inner();
    match comments.create(&user, news_id, &payload.text).await {
        Ok(comment) => {
            info!(
                request_id = %request_id(&req),
                username = %user.username,
                comment_id = %comment.id,
                "comment created"
            );
            Ok(redirect(comments_anchor(news_id)))
        }
        Err(DomainError::Validation(errors)) => {
            let (item, thread) = news.detail(news_id).await?;
            Ok(HttpResponse::Ok().json(NewsDetailPage {
                news: item,
                comments: thread,
                form: Some(comment_form(&payload.text).with_errors(errors)),
            }))
        }
        Err(err) => Err(err),
    }
}
