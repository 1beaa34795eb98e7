use actix_web::{HttpRequest, HttpResponse, get, post, route, web};
use site_core::presentation::utils::{redirect, request_id};
use site_core::{AuthenticatedUser, DomainError, MaybeUser};
use tracing::info;

use crate::application::note_service::NoteService;
use crate::domain::note::NoteDraft;
use crate::presentation::dto::{
    HomePage, NoteFormPage, NoteListPage, NotePage, SuccessPage, note_form,
};

pub const SUCCESS_URL: &str = "/done/";

#[get("/")]
pub async fn home(user: MaybeUser) -> HttpResponse {
    HttpResponse::Ok().json(HomePage {
        username: user.0.map(|u| u.username),
    })
}

#[get("/notes/")]
pub async fn list(
    user: AuthenticatedUser,
    notes: web::Data<NoteService>,
) -> Result<HttpResponse, DomainError> {
    let object_list = notes.list(&user).await?;
    Ok(HttpResponse::Ok().json(NoteListPage { object_list }))
}

#[get("/add/")]
pub async fn add_page(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(NoteFormPage {
        note: None,
        form: note_form(&NoteDraft::default()),
    })
}

#[post("/add/")]
pub async fn add(
    user: AuthenticatedUser,
    req: HttpRequest,
    notes: web::Data<NoteService>,
    payload: web::Form<NoteDraft>,
) -> Result<HttpResponse, DomainError> {
    let draft = payload.into_inner();
    match notes.add(&user, draft.clone()).await {
        Ok(note) => {
            info!(
                request_id = %request_id(&req),
                username = %user.username,
                slug = %note.slug,
                "note added"
            );
            Ok(redirect(SUCCESS_URL))
        }
        Err(DomainError::Validation(errors)) => Ok(HttpResponse::Ok().json(NoteFormPage {
            note: None,
            form: note_form(&draft).with_errors(errors),
        })),
        Err(err) => Err(err),
    }
}

#[get("/done/")]
pub async fn success(_user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(SuccessPage { done: true })
}

#[get("/note/{slug}/")]
pub async fn detail(
    user: AuthenticatedUser,
    notes: web::Data<NoteService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let note = notes.get_own(&user, &path).await?;
    Ok(HttpResponse::Ok().json(NotePage { note }))
}

#[get("/edit/{slug}/")]
pub async fn edit_page(
    user: AuthenticatedUser,
    notes: web::Data<NoteService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let note = notes.get_own(&user, &path).await?;
    let form = note_form(&NoteDraft::from(&note));
    Ok(HttpResponse::Ok().json(NoteFormPage {
        note: Some(note),
        form,
    }))
}

#[post("/edit/{slug}/")]
pub async fn edit(
    user: AuthenticatedUser,
    req: HttpRequest,
    notes: web::Data<NoteService>,
    path: web::Path<String>,
    payload: web::Form<NoteDraft>,
) -> Result<HttpResponse, DomainError> {
    let draft = payload.into_inner();
    match notes.edit(&user, &path, draft.clone()).await {
        Ok(note) => {
            info!(
                request_id = %request_id(&req),
                username = %user.username,
                slug = %note.slug,
                "note updated"
            );
            Ok(redirect(SUCCESS_URL))
        }
        Err(DomainError::Validation(errors)) => {
            let note = notes.get_own(&user, &path).await?;
            Ok(HttpResponse::Ok().json(NoteFormPage {
                note: Some(note),
                form: note_form(&draft).with_errors(errors),
            }))
        }
        Err(err) => Err(err),
    }
}

#[get("/delete/{slug}/")]
pub async fn delete_page(
    user: AuthenticatedUser,
    notes: web::Data<NoteService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let note = notes.get_own(&user, &path).await?;
    Ok(HttpResponse::Ok().json(NotePage { note }))
}

#[route("/delete/{slug}/", method = "POST", method = "DELETE")]
pub async fn delete(
    user: AuthenticatedUser,
    req: HttpRequest,
    notes: web::Data<NoteService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let note = notes.delete(&user, &path).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        slug = %note.slug,
        "note deleted"
    );

    Ok(redirect(SUCCESS_URL))
}
