use crate::constants::{
	MAX_PIN_ATTEMPTS, MESSAGE_DEPOSITS_DISABLED, MESSAGE_VERIFY_EMAIL_FIRST,
	MESSAGE_WITHDRAWALS_DISABLED, NOTIFICATION_UNREAD, PIN_LENGTH, VERIFICATION_CODE_LENGTH,
};
use crate::models::{
	AuthPin, Deposit, DepositRequest, NewAuthPin, NewDeposit, NewNotification, NewWithdrawal,
	User, Withdrawal, WithdrawalRequest,
};
use crate::repo::{BankRepo, StoreError};
use bigdecimal::BigDecimal;
use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;
use uuid::Uuid;

pub const PERMISSION_DEPOSIT: &str = "deposit";
pub const PERMISSION_WITHDRAW: &str = "withdraw";

#[derive(Debug, Error)]
pub enum WorkflowError {
	#[error("{0}")]
	Validation(String),
	#[error("invalid authentication code")]
	InvalidCode,
	#[error("{0}")]
	Forbidden(&'static str),
	#[error("record not found")]
	NotFound,
	#[error("duplicate record")]
	Duplicate,
	#[error("storage error: {0}")]
	Store(String),
}

impl From<StoreError> for WorkflowError {
	fn from(err: StoreError) -> Self {
		match err {
			StoreError::Duplicate => WorkflowError::Duplicate,
			StoreError::NotFound => WorkflowError::NotFound,
			StoreError::Database(msg) => WorkflowError::Store(msg),
		}
	}
}

pub fn generate_code(length: usize) -> String {
	let rng = rand::thread_rng();
	rng.sample_iter(&Alphanumeric).take(length).map(char::from).collect()
}

// One pin per withdrawal, unused on creation. The pin value is unique across
// the whole table; on a collision the insert is retried with a fresh code.
pub fn issue_pin(
	repo: &mut dyn BankRepo,
	user_id: i32,
	withdrawal_id: Uuid,
) -> Result<AuthPin, WorkflowError> {
	for _ in 0..MAX_PIN_ATTEMPTS {
		let code = generate_code(PIN_LENGTH);
		match repo.create_auth_pin(NewAuthPin {
			pin: code,
			user_id,
			withdrawal_id,
			has_been_used: false,
			created_at: Utc::now(),
		}) {
			Ok(pin) => return Ok(pin),
			Err(StoreError::Duplicate) => continue,
			Err(err) => return Err(err.into()),
		}
	}
	Err(WorkflowError::Duplicate)
}

#[derive(Debug)]
pub struct WithdrawalReceipt {
	pub withdrawal: Withdrawal,
	pub pin: AuthPin,
}

pub fn submit_withdrawal(
	repo: &mut dyn BankRepo,
	user: &User,
	req: &WithdrawalRequest,
) -> Result<WithdrawalReceipt, WorkflowError> {
	if !user.has_verified_email {
		return Err(WorkflowError::Forbidden(MESSAGE_VERIFY_EMAIL_FIRST));
	}
	if !user.can(PERMISSION_WITHDRAW) {
		return Err(WorkflowError::Forbidden(MESSAGE_WITHDRAWALS_DISABLED));
	}

	let mut withdrawal = repo.create_withdrawal(NewWithdrawal {
		id: Uuid::new_v4(),
		reference: Uuid::new_v4(),
		user_id: user.id,
		amount: req.amount.clone(),
		details: format!(
			"Initiated a withdrawal of ${} into {} wallet address - {}",
			req.amount, req.wallet_type, req.address
		),
		wallet_type: req.wallet_type.clone(),
		wallet_address: req.address.clone(),
		pin: None,
		approved: false,
		created_at: Utc::now(),
	})?;

	let pin = issue_pin(repo, user.id, withdrawal.id)?;
	repo.set_withdrawal_pin(withdrawal.id, &pin.pin)?;
	withdrawal.pin = Some(pin.pin.clone());

	repo.create_notification(NewNotification {
		listener_id: user.id,
		description: format!(
			"Submitted withdrawal request with reference ID - {}",
			withdrawal.reference
		),
		status: NOTIFICATION_UNREAD.to_string(),
		created_at: Utc::now(),
	})?;

	Ok(WithdrawalReceipt { withdrawal, pin })
}

// The amount credited comes from the caller's session, not the pin record;
// when nothing was remembered it falls back to zero.
pub fn authenticate_withdrawal(
	repo: &mut dyn BankRepo,
	user_id: i32,
	code: &str,
	pending_amount: BigDecimal,
) -> Result<(), WorkflowError> {
	let pin = repo
		.find_unused_pin(user_id, code)?
		.ok_or(WorkflowError::InvalidCode)?;
	repo.consume_pin_and_credit(pin.id, user_id, &pending_amount)?;
	Ok(())
}

pub fn submit_deposit(
	repo: &mut dyn BankRepo,
	user: &User,
	req: &DepositRequest,
) -> Result<Deposit, WorkflowError> {
	if !user.has_verified_email {
		return Err(WorkflowError::Forbidden(MESSAGE_VERIFY_EMAIL_FIRST));
	}
	if !user.can(PERMISSION_DEPOSIT) {
		return Err(WorkflowError::Forbidden(MESSAGE_DEPOSITS_DISABLED));
	}

	let deposit = repo.create_deposit(NewDeposit {
		id: Uuid::new_v4(),
		reference: Uuid::new_v4(),
		user_id: user.id,
		amount: req.amount.clone(),
		description: req.description.clone(),
		details: format!("Submitted a deposit claim of {} {}", req.amount, req.wallet_type),
		wallet_type: req.wallet_type.clone(),
		wallet_address: req.address.clone(),
		approved: false,
		date_of_transfer: req.date,
		created_at: Utc::now(),
	})?;

	repo.create_notification(NewNotification {
		listener_id: user.id,
		description: format!(
			"Submitted deposit request with reference ID - {}",
			deposit.reference
		),
		status: NOTIFICATION_UNREAD.to_string(),
		created_at: Utc::now(),
	})?;

	Ok(deposit)
}

#[derive(Debug, PartialEq, Eq)]
pub enum VerifyOutcome {
	AlreadyVerified,
	Verified,
}

// Verifying an already-verified address is a no-op success.
pub fn verify_email(
	repo: &mut dyn BankRepo,
	user: &User,
	code: &str,
) -> Result<VerifyOutcome, WorkflowError> {
	if user.has_verified_email {
		return Ok(VerifyOutcome::AlreadyVerified);
	}
	if code != user.verification_code {
		return Err(WorkflowError::InvalidCode);
	}
	repo.mark_email_verified(user.id, PERMISSION_WITHDRAW)?;
	Ok(VerifyOutcome::Verified)
}

// Returns the new code so the caller can mail it; None when the address is
// already verified and no code was generated.
pub fn refresh_verification_code(
	repo: &mut dyn BankRepo,
	user: &User,
) -> Result<Option<String>, WorkflowError> {
	if user.has_verified_email {
		return Ok(None);
	}
	let code = generate_code(VERIFICATION_CODE_LENGTH);
	repo.set_verification_code(user.id, &code)?;
	Ok(Some(code))
}
