use crate::schema::*;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(Pg))]
pub struct User {
	pub id: i32,
	pub firstname: String,
	pub lastname: String,
	pub email: String,
	pub password: String,
	pub avatar: Option<String>,
	pub street: Option<String>,
	pub city: Option<String>,
	pub state: Option<String>,
	pub country: Option<String>,
	pub zipcode: Option<String>,
	pub wallet: BigDecimal,
	pub bonus: BigDecimal,
	pub profits: BigDecimal,
	pub withdrawals: BigDecimal,
	pub permissions: Vec<String>,
	pub is_admin: bool,
	pub has_verified_email: bool,
	pub verification_code: String,
	pub created_at: DateTime<Utc>,
}

impl User {
	pub fn can(&self, permission: &str) -> bool {
		self.permissions.iter().any(|p| p == permission)
	}
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = deposits)]
#[diesel(check_for_backend(Pg))]
pub struct Deposit {
	pub id: Uuid,
	pub reference: Uuid,
	pub user_id: i32,
	pub amount: BigDecimal,
	pub description: Option<String>,
	pub details: String,
	pub wallet_type: String,
	pub wallet_address: String,
	pub approved: bool,
	pub date_of_transfer: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = withdrawals)]
#[diesel(check_for_backend(Pg))]
pub struct Withdrawal {
	pub id: Uuid,
	pub reference: Uuid,
	pub user_id: i32,
	pub amount: BigDecimal,
	pub details: String,
	pub wallet_type: String,
	pub wallet_address: String,
	pub pin: Option<String>,
	pub approved: bool,
	pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = auth_pins)]
#[diesel(check_for_backend(Pg))]
pub struct AuthPin {
	pub id: i32,
	pub pin: String,
	pub user_id: i32,
	pub withdrawal_id: Uuid,
	pub has_been_used: bool,
	pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(Pg))]
pub struct Notification {
	pub id: i32,
	pub listener_id: i32,
	pub description: String,
	pub status: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser {
	pub firstname: String,
	pub lastname: String,
	pub email: String,
	pub password: String,
	pub avatar: Option<String>,
	pub street: Option<String>,
	pub city: Option<String>,
	pub state: Option<String>,
	pub country: Option<String>,
	pub zipcode: Option<String>,
	pub wallet: BigDecimal,
	pub bonus: BigDecimal,
	pub profits: BigDecimal,
	pub withdrawals: BigDecimal,
	pub permissions: Vec<String>,
	pub is_admin: bool,
	pub has_verified_email: bool,
	pub verification_code: String,
	pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = deposits)]
pub struct NewDeposit {
	pub id: Uuid,
	pub reference: Uuid,
	pub user_id: i32,
	pub amount: BigDecimal,
	pub description: Option<String>,
	pub details: String,
	pub wallet_type: String,
	pub wallet_address: String,
	pub approved: bool,
	pub date_of_transfer: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = withdrawals)]
pub struct NewWithdrawal {
	pub id: Uuid,
	pub reference: Uuid,
	pub user_id: i32,
	pub amount: BigDecimal,
	pub details: String,
	pub wallet_type: String,
	pub wallet_address: String,
	pub pin: Option<String>,
	pub approved: bool,
	pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = auth_pins)]
pub struct NewAuthPin {
	pub pin: String,
	pub user_id: i32,
	pub withdrawal_id: Uuid,
	pub has_been_used: bool,
	pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = notifications)]
pub struct NewNotification {
	pub listener_id: i32,
	pub description: String,
	pub status: String,
	pub created_at: DateTime<Utc>,
}

fn is_alphanumeric_word(value: &str) -> bool {
	!value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

// wallet addresses are base58/bech32 style strings, 24 chars minimum
fn is_wallet_address(value: &str) -> bool {
	(24..=64).contains(&value.len()) && value.chars().all(|c| c.is_ascii_alphanumeric())
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct SignUpRequest {
	#[validate(length(min = 3, max = 35, message = "Firstname is required"))]
	pub firstname: String,
	#[validate(length(min = 3, max = 35, message = "Lastname is required"))]
	pub lastname: String,
	#[validate(email(message = "A valid email address is required"))]
	pub email: String,
	#[validate(length(min = 8, max = 25, message = "Password must be 8 characters or more"))]
	pub password1: String,
	#[validate(length(min = 8, max = 25, message = "Password must be between 8 and 25 characters"))]
	pub password2: String,
	#[validate(length(min = 3, max = 16, message = "Please provide a valid postal code"))]
	pub zipcode: String,
	#[validate(length(min = 3, message = "Please enter a valid city"))]
	pub city: Option<String>,
	#[validate(length(min = 3, message = "Please enter a valid state"))]
	pub state: Option<String>,
	#[validate(length(min = 3, message = "Please enter a valid country name"))]
	pub country: Option<String>,
	#[validate(length(min = 32, message = "Please enter a valid address"))]
	pub street: Option<String>,
}

impl SignUpRequest {
	pub fn validate_fields(&self) -> Result<(), String> {
		self.validate().map_err(|e| e.to_string())?;
		if self.password1 != self.password2 {
			return Err("Password fields did not match".to_string());
		}
		Ok(())
	}
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct LoginRequest {
	#[validate(email(message = "Please enter a valid email"))]
	pub email: String,
	#[validate(length(min = 8, max = 25, message = "Password must be between 8 and 25 characters"))]
	pub password: String,
}

impl LoginRequest {
	pub fn validate_fields(&self) -> Result<(), String> {
		self.validate().map_err(|e| e.to_string())
	}
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct VerifyEmailRequest {
	#[validate(length(min = 8, max = 16, message = "The verification code must be 8 characters"))]
	pub code: String,
}

impl VerifyEmailRequest {
	pub fn validate_fields(&self) -> Result<(), String> {
		self.validate().map_err(|e| e.to_string())
	}
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DepositRequest {
	pub wallet_type: String,
	pub amount: BigDecimal,
	pub address: String,
	pub description: Option<String>,
	pub date: DateTime<Utc>,
}

impl DepositRequest {
	pub fn validate_fields(&self) -> Result<(), String> {
		if !is_alphanumeric_word(&self.wallet_type) {
			return Err("Wallet type is required".to_string());
		}
		if self.amount <= BigDecimal::from(0) {
			return Err("Amount must be greater than zero".to_string());
		}
		if !is_wallet_address(&self.address) {
			return Err("Please enter a valid wallet address".to_string());
		}
		Ok(())
	}
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WithdrawalRequest {
	pub wallet_type: String,
	pub amount: BigDecimal,
	pub address: String,
}

impl WithdrawalRequest {
	pub fn validate_fields(&self) -> Result<(), String> {
		if !is_alphanumeric_word(&self.wallet_type) {
			return Err("Wallet type is required".to_string());
		}
		if self.amount <= BigDecimal::from(0) {
			return Err("Amount must be greater than zero".to_string());
		}
		if !is_wallet_address(&self.address) {
			return Err("Please enter a valid wallet address".to_string());
		}
		Ok(())
	}
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct AuthenticateRequest {
	#[validate(length(
		min = 4,
		max = 48,
		message = "Your authentication code must be 4 characters or more"
	))]
	pub pin: String,
}

impl AuthenticateRequest {
	pub fn validate_fields(&self) -> Result<(), String> {
		self.validate().map_err(|e| e.to_string())
	}
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EditClientRequest {
	pub wallet: BigDecimal,
	pub bonus: BigDecimal,
	pub profit: BigDecimal,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
	pub status: String,
	pub data: Option<T>,
	pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResp {
	pub uid: String,
	pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserView {
	pub id: i32,
	pub firstname: String,
	pub lastname: String,
	pub email: String,
	pub avatar: Option<String>,
	pub wallet: BigDecimal,
	pub bonus: BigDecimal,
	pub profits: BigDecimal,
	pub withdrawals: BigDecimal,
	pub permissions: Vec<String>,
	pub is_admin: bool,
	pub has_verified_email: bool,
	pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
	fn from(user: &User) -> Self {
		Self {
			id: user.id,
			firstname: user.firstname.clone(),
			lastname: user.lastname.clone(),
			email: user.email.clone(),
			avatar: user.avatar.clone(),
			wallet: user.wallet.clone(),
			bonus: user.bonus.clone(),
			profits: user.profits.clone(),
			withdrawals: user.withdrawals.clone(),
			permissions: user.permissions.clone(),
			is_admin: user.is_admin,
			has_verified_email: user.has_verified_email,
			created_at: user.created_at,
		}
	}
}

#[derive(Serialize, Debug)]
pub struct OverviewResponse {
	pub user: UserView,
	pub deposits: Vec<Deposit>,
	pub withdrawals: Vec<Withdrawal>,
	pub notifications: Vec<Notification>,
	pub notification_count: i64,
	pub btc_address: String,
}

#[derive(Serialize, Debug)]
pub struct DepositSubmitted {
	pub message: String,
	pub deposit: Deposit,
}

#[derive(Serialize, Debug)]
pub struct WithdrawalSubmitted {
	pub message: String,
	pub withdrawal: Withdrawal,
}

#[derive(Serialize, Debug)]
pub struct DepositWithOwner {
	pub deposit: Deposit,
	pub client: UserView,
}

#[derive(Serialize, Debug)]
pub struct WithdrawalWithOwner {
	pub withdrawal: Withdrawal,
	pub client: UserView,
}

#[derive(Serialize, Debug)]
pub struct AdminOverviewResponse {
	pub clients: Vec<UserView>,
	pub deposits: Vec<DepositWithOwner>,
	pub withdrawals: Vec<WithdrawalWithOwner>,
}
