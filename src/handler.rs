use crate::{
	constants::{
		BTC_DEPOSIT_ADDRESS, MESSAGE_ADMIN_ONLY, MESSAGE_DEPOSIT_SUBMITTED,
		MESSAGE_DUPLICATE_EMAIL, MESSAGE_EMAIL_ALREADY_VERIFIED, MESSAGE_EMAIL_VERIFIED,
		MESSAGE_ENTER_AUTH_CODE, MESSAGE_INVALID_AUTH_CODE, MESSAGE_INVALID_CREDENTIALS,
		MESSAGE_INVALID_FILE_TYPE, MESSAGE_INVALID_VERIFICATION_CODE, MESSAGE_LOGGED_OUT,
		MESSAGE_NEW_CODE_SENT, MESSAGE_NOTIFICATION_READ, MESSAGE_WITHDRAWAL_PROCESSING,
		VERIFICATION_CODE_LENGTH,
	},
	db::DbPool,
	mail,
	midware::jwt::{authenticate, JWT},
	models::{
		AdminOverviewResponse, ApiResponse, AuthenticateRequest, DepositRequest,
		DepositSubmitted, DepositWithOwner, EditClientRequest, LoginRequest, LoginResp,
		NewUser, OverviewResponse, SignUpRequest, User, UserView, VerifyEmailRequest,
		WithdrawalRequest, WithdrawalSubmitted, WithdrawalWithOwner,
	},
	repo::{BankRepo, StoreError},
	session::SessionStore,
	upload::{store_avatar, AvatarForm, UploadError},
	workflow::{self, VerifyOutcome, WorkflowError, PERMISSION_DEPOSIT},
};
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpRequest, HttpResponse};
use bcrypt::{hash, verify, DEFAULT_COST};
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::PgConnection;
use std::env;

type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

fn success_message(message: &str) -> HttpResponse {
	HttpResponse::Ok().json(ApiResponse::<String> {
		status: "success".to_string(),
		data: Some(message.to_string()),
		error: None,
	})
}

fn error_json(message: &str) -> ApiResponse<String> {
	ApiResponse::<String> {
		status: "error".to_string(),
		data: None,
		error: Some(message.to_string()),
	}
}

fn workflow_error_response(err: WorkflowError) -> HttpResponse {
	match err {
		WorkflowError::Validation(msg) => HttpResponse::BadRequest().json(error_json(&msg)),
		WorkflowError::InvalidCode => {
			HttpResponse::BadRequest().json(error_json(MESSAGE_INVALID_AUTH_CODE))
		},
		WorkflowError::Forbidden(msg) => HttpResponse::Forbidden().json(error_json(msg)),
		WorkflowError::NotFound => HttpResponse::NotFound().json(error_json("Record not found")),
		WorkflowError::Duplicate => HttpResponse::Conflict().json(error_json("Duplicate record")),
		WorkflowError::Store(msg) => {
			log::error!("Storage error: {}", msg);
			HttpResponse::InternalServerError().json(error_json("Database error"))
		},
	}
}

fn store_error_response(err: StoreError) -> HttpResponse {
	workflow_error_response(err.into())
}

fn get_conn(pool: &web::Data<DbPool>) -> Result<PooledConn, HttpResponse> {
	pool.get().map_err(|e| {
		log::error!("DB connection error: {:?}", e);
		HttpResponse::InternalServerError().json(error_json("Database error"))
	})
}

fn signing_secret() -> Result<String, HttpResponse> {
	env::var("JWT_SECRET").map_err(|_| {
		log::error!("JWT_SECRET can not be found in .env file");
		HttpResponse::InternalServerError().json(error_json("Server configuration error"))
	})
}

fn load_user(conn: &mut PgConnection, user_id: i32) -> Result<User, HttpResponse> {
	match conn.find_user(user_id) {
		Ok(Some(user)) => Ok(user),
		Ok(None) => Err(HttpResponse::NotFound().json(error_json("User not found"))),
		Err(e) => Err(store_error_response(e)),
	}
}

pub struct UserHandler {}

impl UserHandler {
	pub async fn signup_handler(
		pool: web::Data<DbPool>,
		req: web::Json<SignUpRequest>,
	) -> HttpResponse {
		log::info!("New signup attempt for email: {}", req.email);

		if let Err(msg) = req.validate_fields() {
			return workflow_error_response(WorkflowError::Validation(msg));
		}

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match conn.find_user_by_email(&req.email) {
			Ok(Some(_)) => {
				return HttpResponse::Conflict().json(error_json(MESSAGE_DUPLICATE_EMAIL));
			},
			Ok(None) => {},
			Err(e) => return store_error_response(e),
		}

		let hashed_password = match hash(req.password2.as_bytes(), DEFAULT_COST) {
			Ok(hashed) => hashed,
			Err(e) => {
				log::error!("Password hashing failed for email {}: {}", req.email, e);
				return HttpResponse::InternalServerError()
					.json(error_json("Failed to hash password"));
			},
		};

		// accounts created with the override phrase in front of the firstname
		// come up as admins, with the phrase stripped
		let (firstname, is_admin) = match env::var("OVERRIDE_PHRASE") {
			Ok(phrase) if !phrase.is_empty() && req.firstname.starts_with(&phrase) => {
				(req.firstname[phrase.len()..].to_string(), true)
			},
			_ => (req.firstname.clone(), false),
		};

		let new_user = NewUser {
			firstname,
			lastname: req.lastname.clone(),
			email: req.email.clone(),
			password: hashed_password,
			avatar: None,
			street: req.street.clone(),
			city: req.city.clone(),
			state: req.state.clone(),
			country: req.country.clone(),
			zipcode: Some(req.zipcode.clone()),
			wallet: BigDecimal::from(0),
			bonus: BigDecimal::from(0),
			profits: BigDecimal::from(0),
			withdrawals: BigDecimal::from(0),
			permissions: vec![PERMISSION_DEPOSIT.to_string()],
			is_admin,
			has_verified_email: false,
			verification_code: workflow::generate_code(VERIFICATION_CODE_LENGTH),
			created_at: Utc::now(),
		};

		let user = match conn.create_user(new_user) {
			Ok(user) => user,
			Err(StoreError::Duplicate) => {
				return HttpResponse::Conflict().json(error_json(MESSAGE_DUPLICATE_EMAIL));
			},
			Err(e) => return store_error_response(e),
		};

		if let Err(e) =
			mail::send_verification_email(&user.email, &user.firstname, &user.verification_code)
		{
			log::error!("Could not send verification email to {}: {:?}", user.email, e);
		}

		let jwt_secret = match signing_secret() {
			Ok(secret) => secret,
			Err(resp) => return resp,
		};

		match JWT::new(&jwt_secret).create_jwt(user.id.to_string()) {
			Ok(token) => {
				log::info!("Signup successful for user ID: {}", user.id);
				HttpResponse::Created().json(ApiResponse::<LoginResp> {
					status: "success".to_string(),
					data: Some(LoginResp { uid: user.id.to_string(), token }),
					error: None,
				})
			},
			Err(e) => {
				log::error!("JWT creation error: {:?}", e);
				HttpResponse::InternalServerError()
					.json(error_json("Failed to create authentication token"))
			},
		}
	}

	pub async fn login_handler(
		pool: web::Data<DbPool>,
		req: web::Json<LoginRequest>,
	) -> HttpResponse {
		if let Err(msg) = req.validate_fields() {
			return workflow_error_response(WorkflowError::Validation(msg));
		}

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let user = match conn.find_user_by_email(&req.email) {
			Ok(Some(user)) => user,
			Ok(None) => {
				return HttpResponse::Unauthorized().json(error_json(MESSAGE_INVALID_CREDENTIALS));
			},
			Err(e) => return store_error_response(e),
		};

		match verify(req.password.as_bytes(), &user.password) {
			Ok(true) => {},
			Ok(false) | Err(_) => {
				log::info!("Failed login attempt for email: {}", req.email);
				return HttpResponse::Unauthorized().json(error_json(MESSAGE_INVALID_CREDENTIALS));
			},
		}

		let jwt_secret = match signing_secret() {
			Ok(secret) => secret,
			Err(resp) => return resp,
		};

		match JWT::new(&jwt_secret).create_jwt(user.id.to_string()) {
			Ok(token) => {
				log::info!("Login successful for user ID: {}", user.id);
				HttpResponse::Ok().json(ApiResponse::<LoginResp> {
					status: "success".to_string(),
					data: Some(LoginResp { uid: user.id.to_string(), token }),
					error: None,
				})
			},
			Err(e) => {
				log::error!("JWT creation error: {:?}", e);
				HttpResponse::InternalServerError()
					.json(error_json("Failed to create authentication token"))
			},
		}
	}

	pub async fn logout_handler(
		sessions: web::Data<SessionStore>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		sessions.clear(user_id);
		success_message(MESSAGE_LOGGED_OUT)
	}

	pub async fn verify_email_handler(
		pool: web::Data<DbPool>,
		req: web::Json<VerifyEmailRequest>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		if let Err(msg) = req.validate_fields() {
			return workflow_error_response(WorkflowError::Validation(msg));
		}

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let user = match load_user(&mut conn, user_id) {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		match workflow::verify_email(&mut *conn, &user, &req.code) {
			Ok(VerifyOutcome::AlreadyVerified) => success_message(MESSAGE_EMAIL_ALREADY_VERIFIED),
			Ok(VerifyOutcome::Verified) => {
				log::info!("Email verified for user ID: {}", user.id);
				success_message(MESSAGE_EMAIL_VERIFIED)
			},
			Err(WorkflowError::InvalidCode) => {
				HttpResponse::BadRequest().json(error_json(MESSAGE_INVALID_VERIFICATION_CODE))
			},
			Err(e) => workflow_error_response(e),
		}
	}

	pub async fn refresh_code_handler(
		pool: web::Data<DbPool>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let user = match load_user(&mut conn, user_id) {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		match workflow::refresh_verification_code(&mut *conn, &user) {
			Ok(None) => success_message(MESSAGE_EMAIL_ALREADY_VERIFIED),
			Ok(Some(code)) => {
				if let Err(e) = mail::send_verification_email(&user.email, &user.firstname, &code)
				{
					log::error!(
						"Could not send verification email to {}: {:?}",
						user.email,
						e
					);
				}
				success_message(MESSAGE_NEW_CODE_SENT)
			},
			Err(e) => workflow_error_response(e),
		}
	}

	pub async fn upload_avatar_handler(
		pool: web::Data<DbPool>,
		MultipartForm(form): MultipartForm<AvatarForm>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		let path = match store_avatar(&form.avatar) {
			Ok(path) => path,
			Err(UploadError::DisallowedType) => {
				return HttpResponse::BadRequest().json(error_json(MESSAGE_INVALID_FILE_TYPE));
			},
			Err(UploadError::Io(e)) => {
				log::error!("Avatar upload failed for user {}: {:?}", user_id, e);
				return HttpResponse::InternalServerError()
					.json(error_json("Failed to store upload"));
			},
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		match conn.set_avatar(user_id, &path) {
			Ok(()) => {
				log::info!("Avatar updated for user ID: {}", user_id);
				HttpResponse::Ok().json(ApiResponse::<String> {
					status: "success".to_string(),
					data: Some(path),
					error: None,
				})
			},
			Err(e) => store_error_response(e),
		}
	}
}

pub struct BankingHandler {}

impl BankingHandler {
	pub async fn overview_handler(
		pool: web::Data<DbPool>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let user = match load_user(&mut conn, user_id) {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		let deposits = match conn.deposits_for_user(user.id, 10) {
			Ok(deposits) => deposits,
			Err(e) => return store_error_response(e),
		};
		let withdrawals = match conn.withdrawals_for_user(user.id, 10) {
			Ok(withdrawals) => withdrawals,
			Err(e) => return store_error_response(e),
		};
		let notifications = match conn.unread_notifications_for(user.id, 10) {
			Ok(notifications) => notifications,
			Err(e) => return store_error_response(e),
		};
		let notification_count = match conn.unread_count(user.id) {
			Ok(count) => count,
			Err(e) => return store_error_response(e),
		};

		HttpResponse::Ok().json(ApiResponse {
			status: "success".to_string(),
			data: Some(OverviewResponse {
				user: UserView::from(&user),
				deposits,
				withdrawals,
				notifications,
				notification_count,
				btc_address: BTC_DEPOSIT_ADDRESS.to_string(),
			}),
			error: None,
		})
	}

	pub async fn register_deposit_handler(
		pool: web::Data<DbPool>,
		req: web::Json<DepositRequest>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		if let Err(msg) = req.validate_fields() {
			return workflow_error_response(WorkflowError::Validation(msg));
		}

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let user = match load_user(&mut conn, user_id) {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		match workflow::submit_deposit(&mut *conn, &user, &req) {
			Ok(deposit) => {
				log::info!(
					"Deposit {} submitted by user {} for amount {}",
					deposit.reference,
					user.id,
					deposit.amount
				);
				HttpResponse::Created().json(ApiResponse {
					status: "success".to_string(),
					data: Some(DepositSubmitted {
						message: MESSAGE_DEPOSIT_SUBMITTED.to_string(),
						deposit,
					}),
					error: None,
				})
			},
			Err(e) => workflow_error_response(e),
		}
	}

	pub async fn register_withdrawal_handler(
		pool: web::Data<DbPool>,
		sessions: web::Data<SessionStore>,
		req: web::Json<WithdrawalRequest>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		if let Err(msg) = req.validate_fields() {
			return workflow_error_response(WorkflowError::Validation(msg));
		}

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let user = match load_user(&mut conn, user_id) {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		match workflow::submit_withdrawal(&mut *conn, &user, &req) {
			Ok(receipt) => {
				// the amount to credit at authentication time is remembered on
				// the caller's session, latest submission wins
				sessions.remember_withdrawal_amount(user.id, receipt.withdrawal.amount.clone());
				log::info!(
					"Withdrawal {} submitted by user {} for amount {}",
					receipt.withdrawal.reference,
					user.id,
					receipt.withdrawal.amount
				);
				HttpResponse::Created().json(ApiResponse {
					status: "success".to_string(),
					data: Some(WithdrawalSubmitted {
						message: MESSAGE_ENTER_AUTH_CODE.to_string(),
						withdrawal: receipt.withdrawal,
					}),
					error: None,
				})
			},
			Err(e) => workflow_error_response(e),
		}
	}

	pub async fn authenticate_handler(
		pool: web::Data<DbPool>,
		sessions: web::Data<SessionStore>,
		req: web::Json<AuthenticateRequest>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		if let Err(msg) = req.validate_fields() {
			return workflow_error_response(WorkflowError::Validation(msg));
		}

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let pending_amount = sessions.pending_withdrawal_amount(user_id);
		match workflow::authenticate_withdrawal(&mut *conn, user_id, &req.pin, pending_amount) {
			Ok(()) => {
				log::info!("Withdrawal authenticated for user ID: {}", user_id);
				success_message(MESSAGE_WITHDRAWAL_PROCESSING)
			},
			Err(WorkflowError::InvalidCode) => {
				log::info!("Invalid authentication code for user ID: {}", user_id);
				HttpResponse::BadRequest().json(error_json(MESSAGE_INVALID_AUTH_CODE))
			},
			Err(e) => workflow_error_response(e),
		}
	}

	pub async fn delete_notification_handler(
		pool: web::Data<DbPool>,
		path: web::Path<i32>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		let notification_id = path.into_inner();
		match conn.delete_notification(notification_id, user_id) {
			Ok(()) => success_message(MESSAGE_NOTIFICATION_READ),
			Err(StoreError::NotFound) => {
				HttpResponse::NotFound().json(error_json("Notification not found"))
			},
			Err(e) => store_error_response(e),
		}
	}
}

pub struct AdminHandler {}

impl AdminHandler {
	fn require_admin(conn: &mut PgConnection, user_id: i32) -> Result<User, HttpResponse> {
		match conn.find_user(user_id) {
			Ok(Some(user)) if user.is_admin => Ok(user),
			Ok(_) => Err(HttpResponse::Forbidden().json(error_json(MESSAGE_ADMIN_ONLY))),
			Err(e) => Err(store_error_response(e)),
		}
	}

	pub async fn overview_handler(
		pool: web::Data<DbPool>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		if let Err(resp) = Self::require_admin(&mut conn, user_id) {
			return resp;
		}

		let clients = match conn.list_users() {
			Ok(users) => users.iter().map(UserView::from).collect::<Vec<_>>(),
			Err(e) => return store_error_response(e),
		};
		let deposits = match conn.list_deposits_with_owner() {
			Ok(rows) => rows
				.into_iter()
				.map(|(deposit, owner)| DepositWithOwner {
					deposit,
					client: UserView::from(&owner),
				})
				.collect::<Vec<_>>(),
			Err(e) => return store_error_response(e),
		};
		let withdrawals = match conn.list_withdrawals_with_owner() {
			Ok(rows) => rows
				.into_iter()
				.map(|(withdrawal, owner)| WithdrawalWithOwner {
					withdrawal,
					client: UserView::from(&owner),
				})
				.collect::<Vec<_>>(),
			Err(e) => return store_error_response(e),
		};

		HttpResponse::Ok().json(ApiResponse {
			status: "success".to_string(),
			data: Some(AdminOverviewResponse { clients, deposits, withdrawals }),
			error: None,
		})
	}

	pub async fn edit_client_handler(
		pool: web::Data<DbPool>,
		path: web::Path<i32>,
		req: web::Json<EditClientRequest>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		if let Err(resp) = Self::require_admin(&mut conn, user_id) {
			return resp;
		}

		let client_id = path.into_inner();
		let client = match load_user(&mut conn, client_id) {
			Ok(user) => user,
			Err(resp) => return resp,
		};

		match conn.update_balances(
			client.id,
			req.wallet.clone(),
			req.bonus.clone(),
			req.profit.clone(),
		) {
			Ok(()) => {
				log::info!("Balances updated for client ID: {}", client.id);
				success_message(&format!(
					"Client {} record updated successfully",
					client.email
				))
			},
			Err(e) => store_error_response(e),
		}
	}

	pub async fn delete_client_handler(
		pool: web::Data<DbPool>,
		path: web::Path<i32>,
		http_req: HttpRequest,
	) -> HttpResponse {
		let user_id = match authenticate(&http_req).await {
			Ok(id) => id,
			Err(resp) => return resp,
		};

		let mut conn = match get_conn(&pool) {
			Ok(conn) => conn,
			Err(resp) => return resp,
		};

		if let Err(resp) = Self::require_admin(&mut conn, user_id) {
			return resp;
		}

		let client_id = path.into_inner();
		match conn.delete_user_cascade(client_id) {
			Ok(()) => {
				log::info!("Client {} deleted with all owned records", client_id);
				success_message("Client record deleted successfully")
			},
			Err(StoreError::NotFound) => {
				HttpResponse::NotFound().json(error_json("User not found"))
			},
			Err(e) => store_error_response(e),
		}
	}
}
