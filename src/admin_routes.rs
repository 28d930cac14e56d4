use crate::handler::AdminHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		.route("/admin/overview", web::get().to(AdminHandler::overview_handler))
		.route("/admin/clients/{id}", web::put().to(AdminHandler::edit_client_handler))
		.route("/admin/clients/{id}", web::delete().to(AdminHandler::delete_client_handler));
}
