//! Read-only page handlers.
//!
//! The landing page is public; everything else resolves the signed-in user
//! through the [`CurrentUser`] guard before rendering.

use actix_web::{get, web, HttpResponse};

use crate::domain::posts::{BlogPost, SocialPost, SCHEDULED_TIME_FORMAT};

use super::error::map_post_persistence_error;
use super::gate::CurrentUser;
use super::render::{self, escape};
use super::session::SessionContext;
use super::state::HttpState;
use super::ApiResult;

/// Post count shown per section on the dashboard.
const DASHBOARD_LIMIT: i64 = 5;

fn blog_list(posts: &[BlogPost]) -> String {
    if posts.is_empty() {
        return "<p>No blog posts yet.</p>".to_owned();
    }

    let mut list = String::from("<ul>");
    for post in posts {
        list.push_str(&format!(
            "<li><h3>{}</h3><p>{}</p><small>{}</small></li>",
            escape(&post.title),
            escape(&post.content),
            post.created_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    list.push_str("</ul>");
    list
}

fn social_list(posts: &[SocialPost]) -> String {
    if posts.is_empty() {
        return "<p>No social posts yet.</p>".to_owned();
    }

    let mut list = String::from("<ul>");
    for post in posts {
        let schedule = post
            .scheduled_time
            .map(|time| time.format(SCHEDULED_TIME_FORMAT).to_string())
            .unwrap_or_else(|| "unscheduled".to_owned());
        list.push_str(&format!(
            "<li><strong>{}</strong><p>{}</p><small>{}</small></li>",
            escape(&post.platform),
            escape(&post.content),
            escape(&schedule),
        ));
    }
    list.push_str("</ul>");
    list
}

#[get("/")]
pub async fn index(session: SessionContext) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    let body = concat!(
        "<h1>Welcome</h1>",
        "<p>Keep a journal and plan your social posts in one place.</p>"
    );
    Ok(render::html(render::page("Home", None, &flashes, body)))
}

#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    current: CurrentUser,
) -> ApiResult<HttpResponse> {
    let user = current.user();
    let blog = state
        .posts
        .blog_posts_for(user.id(), Some(DASHBOARD_LIMIT))
        .await
        .map_err(map_post_persistence_error)?;
    let social = state
        .posts
        .social_posts_for(user.id(), Some(DASHBOARD_LIMIT))
        .await
        .map_err(map_post_persistence_error)?;

    let body = format!(
        concat!(
            "<h1>Dashboard</h1>",
            r#"<section><h2>Recent blog posts</h2>{}<a href="/blog/new">New blog post</a></section>"#,
            r#"<section><h2>Recent social posts</h2>{}<a href="/social/new">New social post</a></section>"#
        ),
        blog_list(&blog),
        social_list(&social),
    );

    let flashes = session.take_flashes()?;
    Ok(render::html(render::page(
        "Dashboard",
        Some(user.username().as_ref()),
        &flashes,
        &body,
    )))
}

#[get("/blog")]
pub async fn blog_index(
    state: web::Data<HttpState>,
    session: SessionContext,
    current: CurrentUser,
) -> ApiResult<HttpResponse> {
    let user = current.user();
    let posts = state
        .posts
        .blog_posts_for(user.id(), None)
        .await
        .map_err(map_post_persistence_error)?;

    let body = format!(
        r#"<h1>Blog</h1>{}<a href="/blog/new">New blog post</a>"#,
        blog_list(&posts)
    );
    let flashes = session.take_flashes()?;
    Ok(render::html(render::page(
        "Blog",
        Some(user.username().as_ref()),
        &flashes,
        &body,
    )))
}

#[get("/social")]
pub async fn social_index(
    state: web::Data<HttpState>,
    session: SessionContext,
    current: CurrentUser,
) -> ApiResult<HttpResponse> {
    let user = current.user();
    let posts = state
        .posts
        .social_posts_for(user.id(), None)
        .await
        .map_err(map_post_persistence_error)?;

    let body = format!(
        r#"<h1>Social planner</h1>{}<a href="/social/new">Schedule a post</a>"#,
        social_list(&posts)
    );
    let flashes = session.take_flashes()?;
    Ok(render::html(render::page(
        "Social",
        Some(user.username().as_ref()),
        &flashes,
        &body,
    )))
}

#[get("/chatbot")]
pub async fn chatbot(session: SessionContext, current: CurrentUser) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(render::html(render::page(
        "Chatbot",
        Some(current.user().username().as_ref()),
        &flashes,
        "<h1>Chatbot</h1><p>The assistant is not available yet.</p>",
    )))
}

#[get("/analytics")]
pub async fn analytics(session: SessionContext, current: CurrentUser) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(render::html(render::page(
        "Analytics",
        Some(current.user().username().as_ref()),
        &flashes,
        "<h1>Analytics</h1><p>No analytics to show yet.</p>",
    )))
}

#[get("/content")]
pub async fn content(session: SessionContext, current: CurrentUser) -> ApiResult<HttpResponse> {
    let flashes = session.take_flashes()?;
    Ok(render::html(render::page(
        "Content",
        Some(current.user().username().as_ref()),
        &flashes,
        "<h1>Content</h1><p>Content tools are not available yet.</p>",
    )))
}
