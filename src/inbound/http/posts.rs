//! Handlers that create blog and social posts.

use actix_web::{get, post, web, HttpResponse};
use tracing::info;

use crate::domain::posts::{NewBlogPost, NewSocialPost};

use super::error::map_post_persistence_error;
use super::gate::CurrentUser;
use super::render;
use super::session::{Flash, SessionContext};
use super::state::HttpState;
use super::ApiResult;

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct BlogPostForm {
    title: String,
    content: String,
}

#[derive(Debug, serde::Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct SocialPostForm {
    platform: String,
    content: String,
    #[serde(default)]
    scheduled_time: String,
}

const BLOG_FORM_BODY: &str = concat!(
    "<h1>New blog post</h1>",
    r#"<form method="post" action="/blog/new">"#,
    r#"<label>Title <input type="text" name="title" required></label>"#,
    r#"<label>Content <textarea name="content" required></textarea></label>"#,
    r#"<button type="submit">Publish</button></form>"#
);

const SOCIAL_FORM_BODY: &str = concat!(
    "<h1>Schedule a social post</h1>",
    r#"<form method="post" action="/social/new">"#,
    r#"<label>Platform <input type="text" name="platform" required></label>"#,
    r#"<label>Content <textarea name="content" required></textarea></label>"#,
    r#"<label>Scheduled time <input type="datetime-local" name="scheduled_time"></label>"#,
    r#"<button type="submit">Schedule</button></form>"#
);

fn blog_form_page(username: &str, flashes: Vec<Flash>) -> HttpResponse {
    render::html(render::page(
        "New blog post",
        Some(username),
        &flashes,
        BLOG_FORM_BODY,
    ))
}

fn social_form_page(username: &str, flashes: Vec<Flash>) -> HttpResponse {
    render::html(render::page(
        "New social post",
        Some(username),
        &flashes,
        SOCIAL_FORM_BODY,
    ))
}

#[get("/blog/new")]
pub async fn blog_form(session: SessionContext, current: CurrentUser) -> ApiResult<HttpResponse> {
    Ok(blog_form_page(
        current.user().username().as_ref(),
        session.take_flashes()?,
    ))
}

#[post("/blog/new")]
pub async fn blog_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    current: CurrentUser,
    form: web::Form<BlogPostForm>,
) -> ApiResult<HttpResponse> {
    let user = current.user();
    let draft = match NewBlogPost::try_from_parts(&form.title, &form.content) {
        Ok(draft) => draft,
        Err(error) => {
            return Ok(blog_form_page(
                user.username().as_ref(),
                vec![Flash::danger(error.to_string())],
            ));
        }
    };

    let post = state
        .posts
        .create_blog_post(user.id(), draft)
        .await
        .map_err(map_post_persistence_error)?;
    info!(user_id = %user.id(), post_id = post.id, "blog post created");

    session.push_flash(Flash::success("Blog post created successfully!"))?;
    Ok(render::redirect("/blog"))
}

#[get("/social/new")]
pub async fn social_form(
    session: SessionContext,
    current: CurrentUser,
) -> ApiResult<HttpResponse> {
    Ok(social_form_page(
        current.user().username().as_ref(),
        session.take_flashes()?,
    ))
}

#[post("/social/new")]
pub async fn social_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    current: CurrentUser,
    form: web::Form<SocialPostForm>,
) -> ApiResult<HttpResponse> {
    let user = current.user();
    let draft =
        match NewSocialPost::try_from_parts(&form.platform, &form.content, &form.scheduled_time) {
            Ok(draft) => draft,
            Err(error) => {
                return Ok(social_form_page(
                    user.username().as_ref(),
                    vec![Flash::danger(error.to_string())],
                ));
            }
        };

    let post = state
        .posts
        .create_social_post(user.id(), draft)
        .await
        .map_err(map_post_persistence_error)?;
    info!(user_id = %user.id(), post_id = post.id, "social post scheduled");

    session.push_flash(Flash::success("Social post scheduled successfully!"))?;
    Ok(render::redirect("/social"))
}
