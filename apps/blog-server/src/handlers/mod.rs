//! HTTP handlers and route configuration.

mod comments;
mod feeds;
mod health;
mod posts;
mod search;
mod share;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").route("/health", web::get().to(health::health_check)))
        .route("/sitemap.xml", web::get().to(feeds::sitemap))
        .service(
            web::scope("/blog")
                .route("/", web::get().to(posts::post_list))
                .route("/search/", web::get().to(search::post_search))
                .route("/feed/", web::get().to(feeds::rss_feed))
                .route("/feed/atom/", web::get().to(feeds::atom_feed))
                // Before the `{post_id}` resources so `tag` is never read as an id.
                .route("/tag/{tag_slug}/", web::get().to(posts::post_list_by_tag))
                .route(
                    "/{year}/{month}/{day}/{slug}/",
                    web::get().to(posts::post_detail),
                )
                .service(
                    web::resource("/{post_id}/share/")
                        .route(web::get().to(share::share_form))
                        .route(web::post().to(share::share_post)),
                )
                .service(
                    web::resource("/{post_id}/comment/")
                        .route(web::post().to(comments::post_comment)),
                ),
        );
}
