use actix_web::{HttpRequest, HttpResponse, get, post, route, web};
use site_core::presentation::utils::{redirect, request_id};
use site_core::{AuthenticatedUser, DomainError};
use tracing::info;
use uuid::Uuid;

use crate::application::comment_service::CommentService;
use crate::presentation::dto::{CommentDeletePage, CommentEditPage, CommentPayload, comment_form};
use crate::presentation::handlers::news::comments_anchor;

#[get("/edit_comment/{id}/")]
pub async fn edit_page(
    user: AuthenticatedUser,
    comments: web::Data<CommentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let comment = comments.get_own(&user, path.into_inner()).await?;
    let form = comment_form(&comment.text);
    Ok(HttpResponse::Ok().json(CommentEditPage { comment, form }))
}

#[post("/edit_comment/{id}/")]
pub async fn edit(
    user: AuthenticatedUser,
    req: HttpRequest,
    comments: web::Data<CommentService>,
    path: web::Path<Uuid>,
    payload: web::Form<CommentPayload>,
) -> Result<HttpResponse, DomainError> {
    let comment_id = path.into_inner();
    match comments.update(&user, comment_id, &payload.text).await {
        Ok(comment) => {
            info!(
                request_id = %request_id(&req),
                username = %user.username,
                comment_id = %comment.id,
                "comment updated"
            );
            Ok(redirect(comments_anchor(comment.news_id)))
        }
        Err(DomainError::Validation(errors)) => {
            let comment = comments.get_own(&user, comment_id).await?;
            Ok(HttpResponse::Ok().json(CommentEditPage {
                comment,
                form: comment_form(&payload.text).with_errors(errors),
            }))
        }
        Err(err) => Err(err),
    }
}

#[get("/delete_comment/{id}/")]
pub async fn delete_page(
    user: AuthenticatedUser,
    comments: web::Data<CommentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let comment = comments.get_own(&user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CommentDeletePage { comment }))
}

#[route("/delete_comment/{id}/", method = "POST", method = "DELETE")]
pub async fn delete(
    user: AuthenticatedUser,
    req: HttpRequest,
    comments: web::Data<CommentService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let comment = comments.delete(&user, path.into_inner()).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        comment_id = %comment.id,
        "comment deleted"
    );

    Ok(redirect(comments_anchor(comment.news_id)))
}
