mod common;

use actix_web::test::{self, TestRequest};
use common::*;
use news_server::domain::comment::Comment;
use news_server::domain::news::News;
use news_server::infrastructure::config::NEWS_COUNT_ON_HOME_PAGE;
use serde_json::Value;

#[actix_rt::test]
async fn home_page_is_capped() {
    let site = TestSite::new();
    site.news_list().await;
    let app = test::init_service(site.app()).await;

    let page = json(send(&app, &Client::Anonymous, TestRequest::get().uri("/")).await).await;
    let object_list = page["object_list"].as_array().expect("object_list");
    assert_eq!(object_list.len(), NEWS_COUNT_ON_HOME_PAGE);
}

#[actix_rt::test]
async fn home_page_is_newest_first() {
    let site = TestSite::new();
    site.news_list().await;
    let app = test::init_service(site.app()).await;

    let page = json(send(&app, &Client::Anonymous, TestRequest::get().uri("/")).await).await;
    let news: Vec<News> = serde_json::from_value(page["object_list"].clone()).unwrap();
    let dates: Vec<_> = news.iter().map(|n| n.date).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}

#[actix_rt::test]
async fn comments_are_oldest_first() {
    let site = TestSite::new();
    let (author, _) = site.login("Комментатор").await;
    let news = site.news_item().await;
    site.comment_list(&author, &news).await;
    let app = test::init_service(site.app()).await;

    let page = json(
        send(
            &app,
            &Client::Anonymous,
            TestRequest::get().uri(&detail_url(&news)),
        )
        .await,
    )
    .await;
    let comments: Vec<Comment> = serde_json::from_value(page["comments"].clone()).unwrap();
    assert_eq!(comments.len(), 10);
    let timestamps: Vec<_> = comments.iter().map(|c| c.created).collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);
}

#[actix_rt::test]
async fn anonymous_visitor_gets_no_comment_form() {
    let site = TestSite::new();
    let news = site.news_item().await;
    let app = test::init_service(site.app()).await;

    let page = json(
        send(
            &app,
            &Client::Anonymous,
            TestRequest::get().uri(&detail_url(&news)),
        )
        .await,
    )
    .await;
    assert_eq!(page.get("form"), None);
}

#[actix_rt::test]
async fn signed_in_visitor_gets_comment_form() {
    let site = TestSite::new();
    let (_, client) = site.login("Автор").await;
    let news = site.news_item().await;
    let app = test::init_service(site.app()).await;

    let page = json(send(&app, &client, TestRequest::get().uri(&detail_url(&news))).await).await;
    assert_eq!(page["form"]["name"], Value::from("CommentForm"));
    assert_eq!(page["form"]["fields"]["text"], Value::from(""));
}

#[actix_rt::test]
async fn edit_page_is_prefilled() {
    let site = TestSite::new();
    let (author, client) = site.login("Автор").await;
    let news = site.news_item().await;
    let comment = site.comment(&author, &news).await;
    let app = test::init_service(site.app()).await;

    let page = json(send(&app, &client, TestRequest::get().uri(&edit_url(&comment))).await).await;
    assert_eq!(page["form"]["fields"]["text"], Value::from(COMMENT_TEXT));
    assert_eq!(page["comment"]["id"], Value::from(comment.id.to_string()));
}
