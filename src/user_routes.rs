use crate::handler::UserHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		// account routes
		.route("/signup", web::post().to(UserHandler::signup_handler))
		.route("/login", web::post().to(UserHandler::login_handler))
		.route("/logout", web::post().to(UserHandler::logout_handler))
		// email verification
		.route("/verify-email", web::post().to(UserHandler::verify_email_handler))
		.route("/verify-email/refresh", web::post().to(UserHandler::refresh_code_handler))
		// profile
		.route("/profile/avatar", web::put().to(UserHandler::upload_avatar_handler));
}
