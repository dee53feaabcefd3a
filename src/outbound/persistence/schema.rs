//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        id -> BigInt,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Journal entries, owned by one user each.
    blog_posts (id) {
        id -> BigInt,
        user_id -> BigInt,
        title -> Text,
        content -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Scheduled social-media posts, owned by one user each.
    social_posts (id) {
        id -> BigInt,
        user_id -> BigInt,
        platform -> Text,
        content -> Text,
        scheduled_time -> Nullable<Timestamp>,
        created_at -> Timestamp,
    }
}

diesel::joinable!(blog_posts -> users (user_id));
diesel::joinable!(social_posts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, blog_posts, social_posts);
