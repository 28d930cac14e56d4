use crate::handler::BankingHandler;
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg
		// dashboard
		.route("/banking/app", web::get().to(BankingHandler::overview_handler))
		// transactions
		.route("/deposits", web::post().to(BankingHandler::register_deposit_handler))
		.route("/withdrawals", web::post().to(BankingHandler::register_withdrawal_handler))
		.route(
			"/withdrawals/authenticate",
			web::post().to(BankingHandler::authenticate_handler),
		)
		// notifications
		.route(
			"/notifications/{id}",
			web::delete().to(BankingHandler::delete_notification_handler),
		);
}
