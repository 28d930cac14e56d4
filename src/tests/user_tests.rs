use crate::handler::UserHandler;
use crate::session::SessionStore;
use crate::tests::fixtures::TestFixtures;
use crate::tests::test_utils::{ensure_test_env, generate_test_token, lazy_pool};
use actix_web::{test, web, App};
use serde_json::json;

#[actix_web::test]
async fn test_signup_rejects_short_firstname() {
	let app = test::init_service(
		App::new().app_data(web::Data::new(lazy_pool())).service(
			web::resource("/signup").route(web::post().to(UserHandler::signup_handler)),
		),
	)
	.await;

	let mut request_body = TestFixtures::signup_request();
	request_body.firstname = "Jo".to_string();

	let resp = test::TestRequest::post()
		.uri("/signup")
		.set_json(&request_body)
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_signup_rejects_password_mismatch() {
	let app = test::init_service(
		App::new().app_data(web::Data::new(lazy_pool())).service(
			web::resource("/signup").route(web::post().to(UserHandler::signup_handler)),
		),
	)
	.await;

	let mut request_body = TestFixtures::signup_request();
	request_body.password2 = "SomethingElse456".to_string();

	let resp = test::TestRequest::post()
		.uri("/signup")
		.set_json(&request_body)
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_login_rejects_invalid_email_format() {
	let app = test::init_service(
		App::new().app_data(web::Data::new(lazy_pool())).service(
			web::resource("/login").route(web::post().to(UserHandler::login_handler)),
		),
	)
	.await;

	let resp = test::TestRequest::post()
		.uri("/login")
		.set_json(&json!({
			"email": "invalid_email",
			"password": "testpassword123"
		}))
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_verify_email_requires_token() {
	let app = test::init_service(
		App::new().app_data(web::Data::new(lazy_pool())).service(
			web::resource("/verify-email")
				.route(web::post().to(UserHandler::verify_email_handler)),
		),
	)
	.await;

	let resp = test::TestRequest::post()
		.uri("/verify-email")
		.set_json(&json!({ "code": "code1234verify00" }))
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn test_verify_email_rejects_short_code() {
	ensure_test_env();
	let app = test::init_service(
		App::new().app_data(web::Data::new(lazy_pool())).service(
			web::resource("/verify-email")
				.route(web::post().to(UserHandler::verify_email_handler)),
		),
	)
	.await;

	let token = generate_test_token(12);
	let resp = test::TestRequest::post()
		.uri("/verify-email")
		.insert_header(("Authorization", format!("Bearer {}", token)))
		.set_json(&json!({ "code": "abc" }))
		.send_request(&app)
		.await;

	assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_logout_requires_token() {
	let app = test::init_service(
		App::new()
			.app_data(web::Data::new(SessionStore::new()))
			.service(web::resource("/logout").route(web::post().to(UserHandler::logout_handler))),
	)
	.await;

	let resp = test::TestRequest::post().uri("/logout").send_request(&app).await;

	assert_eq!(resp.status().as_u16(), 401);
}
