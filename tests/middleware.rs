use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpResponse, Responder, test, web};

use agency_admin::domain::auth::AuthenticatedUser;
use agency_admin::middleware::{RedirectUnauthorized, SIGNIN_PATH};

mod common;

async fn dashboard(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().body(user.name)
}

#[actix_web::test]
async fn dashboard_without_session_redirects_to_signin() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(common::server_config()))
            .wrap(IdentityMiddleware::default())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                common::session_key(),
            ))
            .service(
                web::scope("/admin")
                    .wrap(RedirectUnauthorized)
                    .route("", web::get().to(dashboard)),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/admin").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), SIGNIN_PATH);
}

#[actix_web::test]
async fn other_statuses_pass_through() {
    let app = test::init_service(
        App::new().service(
            web::scope("/admin")
                .wrap(RedirectUnauthorized)
                .route("/ok", web::get().to(|| async { HttpResponse::Ok().finish() }))
                .route("/missing", web::get().to(|| async { HttpResponse::NotFound().finish() })),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/admin/ok").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/admin/missing").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn routes_outside_the_scope_keep_their_401() {
    let app = test::init_service(
        App::new()
            .service(
                web::scope("/admin")
                    .wrap(RedirectUnauthorized)
                    .route("", web::get().to(|| async { HttpResponse::Ok().finish() })),
            )
            .route("/api/ping", web::get().to(|| async { HttpResponse::Unauthorized().finish() })),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/ping").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::LOCATION).is_none());
}
