use std::sync::Arc;

use site_core::{AuthenticatedUser, DomainError};
use tracing::instrument;
use uuid::Uuid;

use crate::data::comment_repository::CommentRepository;
use crate::data::news_repository::NewsRepository;
use crate::domain::comment::{BannedWords, Comment};

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    news: Arc<dyn NewsRepository>,
    filter: BannedWords,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        news: Arc<dyn NewsRepository>,
        filter: BannedWords,
    ) -> Self {
        Self {
            comments,
            news,
            filter,
        }
    }

    /// The actor's own comment. Someone else's comment is reported exactly
    /// like a missing one.
    pub async fn get_own(
        &self,
        actor: &AuthenticatedUser,
        comment_id: Uuid,
    ) -> Result<Comment, DomainError> {
        match self.comments.find_by_id(comment_id).await? {
            Some(comment) if comment.author_id == actor.id => Ok(comment),
            _ => Err(DomainError::not_found("comment", comment_id)),
        }
    }

    #[instrument(skip(self, actor, text), fields(author = %actor.username))]
    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        news_id: Uuid,
        text: &str,
    ) -> Result<Comment, DomainError> {
        if self.news.find_by_id(news_id).await?.is_none() {
            return Err(DomainError::not_found("news", news_id));
        }
        self.filter.validate(text).into_result()?;

        let comment = Comment::new(news_id, actor.id, text.to_owned());
        self.comments.create(comment).await
    }

    #[instrument(skip(self, actor, text), fields(author = %actor.username))]
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        comment_id: Uuid,
        text: &str,
    ) -> Result<Comment, DomainError> {
        self.get_own(actor, comment_id).await?;
        self.filter.validate(text).into_result()?;

        self.comments
            .update_text(comment_id, actor.id, text)
            .await?
            .ok_or_else(|| DomainError::not_found("comment", comment_id))
    }

    /// Deletes the actor's comment and returns it.
    #[instrument(skip(self, actor), fields(author = %actor.username))]
    pub async fn delete(
        &self,
        actor: &AuthenticatedUser,
        comment_id: Uuid,
    ) -> Result<Comment, DomainError> {
        let comment = self.get_own(actor, comment_id).await?;
        if !self.comments.delete(comment_id, actor.id).await? {
            return Err(DomainError::not_found("comment", comment_id));
        }
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::{InMemoryCommentRepository, InMemoryNewsRepository};
    use crate::domain::comment::WARNING;
    use crate::domain::news::News;

    struct Fixture {
        service: CommentService,
        comments: Arc<InMemoryCommentRepository>,
        news: News,
        author: AuthenticatedUser,
        not_author: AuthenticatedUser,
    }

    async fn fixture() -> Fixture {
        let comments = Arc::new(InMemoryCommentRepository::new());
        let news_repo = Arc::new(InMemoryNewsRepository::new());
        let news = news_repo
            .create(News::new("Заголовок".into(), "Текст заметки".into(), None).unwrap())
            .await
            .unwrap();
        Fixture {
            service: CommentService::new(comments.clone(), news_repo, BannedWords::default()),
            comments,
            news,
            author: AuthenticatedUser {
                id: Uuid::new_v4(),
                username: "Автор".into(),
            },
            not_author: AuthenticatedUser {
                id: Uuid::new_v4(),
                username: "Не автор".into(),
            },
        }
    }

    #[actix_rt::test]
    async fn banned_words_do_not_persist() {
        let f = fixture().await;
        let err = f
            .service
            .create(&f.author, f.news.id, "Какой-то текст, редиска, еще текст")
            .await
            .unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.field("text"), [WARNING]);
        assert_eq!(f.comments.count().await, 0);
    }

    #[actix_rt::test]
    async fn strangers_cannot_touch_comments() {
        let f = fixture().await;
        let comment = f
            .service
            .create(&f.author, f.news.id, "Текст комментария")
            .await
            .unwrap();

        let err = f
            .service
            .update(&f.not_author, comment.id, "Новый текст комментария")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        let err = f.service.delete(&f.not_author, comment.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let stored = f.service.get_own(&f.author, comment.id).await.unwrap();
        assert_eq!(stored.text, "Текст комментария");
        assert_eq!(f.comments.count().await, 1);
    }

    #[actix_rt::test]
    async fn stranger_with_bad_words_still_sees_not_found() {
        let f = fixture().await;
        let comment = f
            .service
            .create(&f.author, f.news.id, "Текст комментария")
            .await
            .unwrap();
        let err = f
            .service
            .update(&f.not_author, comment.id, "негодяй")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[actix_rt::test]
    async fn author_edits_keep_author_and_thread() {
        let f = fixture().await;
        let comment = f
            .service
            .create(&f.author, f.news.id, "Текст комментария")
            .await
            .unwrap();
        let updated = f
            .service
            .update(&f.author, comment.id, "Новый текст комментария")
            .await
            .unwrap();
        assert_eq!(updated.text, "Новый текст комментария");
        assert_eq!(updated.author_id, f.author.id);
        assert_eq!(updated.news_id, f.news.id);
        assert_eq!(updated.created, comment.created);
    }

    #[actix_rt::test]
    async fn comments_need_an_existing_news_item() {
        let f = fixture().await;
        let err = f
            .service
            .create(&f.author, Uuid::new_v4(), "Текст комментария")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { resource: "news", .. }));
    }
}
