//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod contact;
mod health;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public surface
        .route("/", web::get().to(auth::index))
        .route("/api/health", web::get().to(health::health_check))
        .route("/blogs", web::get().to(blogs::list_blogs))
        .route("/api/blogs", web::get().to(blogs::list_blogs))
        // Session gate
        .route("/login", web::post().to(auth::login))
        .route("/logout", web::get().to(auth::logout))
        .route("/dashboard", web::get().to(auth::dashboard))
        // Blog mutations (operator only)
        .route("/add-blog", web::post().to(blogs::add_blog))
        .route("/edit-blog/{id}", web::post().to(blogs::edit_blog))
        .route("/delete-blog/{id}", web::post().to(blogs::delete_blog))
        // Contact-form relay
        .route("/send", web::post().to(contact::send_default))
        .route("/send-{form}", web::post().to(contact::send_form));
}
