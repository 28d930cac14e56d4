use crate::models::{
	AuthPin, Deposit, NewAuthPin, NewDeposit, NewNotification, NewUser, NewWithdrawal,
	Notification, User, Withdrawal,
};
use crate::schema::{auth_pins, deposits, notifications, users, withdrawals};
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("duplicate record")]
	Duplicate,
	#[error("record not found")]
	NotFound,
	#[error("database error: {0}")]
	Database(String),
}

impl From<diesel::result::Error> for StoreError {
	fn from(err: diesel::result::Error) -> Self {
		match err {
			diesel::result::Error::NotFound => StoreError::NotFound,
			diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
				StoreError::Duplicate
			},
			other => StoreError::Database(other.to_string()),
		}
	}
}

// The storage collaborator. Everything the handlers and the workflow touch in
// the database goes through here; the two multi-write operations
// (consume_pin_and_credit, delete_user_cascade) commit as single transactions.
#[cfg_attr(test, mockall::automock)]
pub trait BankRepo {
	fn create_user(&mut self, user: NewUser) -> Result<User, StoreError>;
	fn find_user(&mut self, id: i32) -> Result<Option<User>, StoreError>;
	fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, StoreError>;
	fn list_users(&mut self) -> Result<Vec<User>, StoreError>;
	fn set_verification_code(&mut self, user_id: i32, code: &str) -> Result<(), StoreError>;
	fn mark_email_verified(&mut self, user_id: i32, permission: &str) -> Result<(), StoreError>;
	fn set_avatar(&mut self, user_id: i32, path: &str) -> Result<(), StoreError>;
	fn update_balances(
		&mut self,
		user_id: i32,
		wallet: BigDecimal,
		bonus: BigDecimal,
		profits: BigDecimal,
	) -> Result<(), StoreError>;
	fn delete_user_cascade(&mut self, user_id: i32) -> Result<(), StoreError>;

	fn create_deposit(&mut self, deposit: NewDeposit) -> Result<Deposit, StoreError>;
	fn deposits_for_user(&mut self, user_id: i32, limit: i64) -> Result<Vec<Deposit>, StoreError>;
	fn list_deposits_with_owner(&mut self) -> Result<Vec<(Deposit, User)>, StoreError>;

	fn create_withdrawal(&mut self, withdrawal: NewWithdrawal) -> Result<Withdrawal, StoreError>;
	fn set_withdrawal_pin(&mut self, withdrawal_id: Uuid, pin: &str) -> Result<(), StoreError>;
	fn withdrawals_for_user(
		&mut self,
		user_id: i32,
		limit: i64,
	) -> Result<Vec<Withdrawal>, StoreError>;
	fn list_withdrawals_with_owner(&mut self) -> Result<Vec<(Withdrawal, User)>, StoreError>;

	fn create_auth_pin(&mut self, pin: NewAuthPin) -> Result<AuthPin, StoreError>;
	fn find_unused_pin(&mut self, user_id: i32, code: &str) -> Result<Option<AuthPin>, StoreError>;
	fn consume_pin_and_credit(
		&mut self,
		pin_id: i32,
		user_id: i32,
		amount: &BigDecimal,
	) -> Result<(), StoreError>;

	fn create_notification(&mut self, notification: NewNotification)
		-> Result<Notification, StoreError>;
	fn unread_notifications_for(
		&mut self,
		user_id: i32,
		limit: i64,
	) -> Result<Vec<Notification>, StoreError>;
	fn unread_count(&mut self, user_id: i32) -> Result<i64, StoreError>;
	fn delete_notification(&mut self, id: i32, listener_id: i32) -> Result<(), StoreError>;
}

impl BankRepo for PgConnection {
	fn create_user(&mut self, user: NewUser) -> Result<User, StoreError> {
		diesel::insert_into(users::table)
			.values(&user)
			.returning(User::as_returning())
			.get_result(self)
			.map_err(Into::into)
	}

	fn find_user(&mut self, id: i32) -> Result<Option<User>, StoreError> {
		users::table
			.filter(users::id.eq(id))
			.select(User::as_select())
			.first(self)
			.optional()
			.map_err(Into::into)
	}

	fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, StoreError> {
		users::table
			.filter(users::email.eq(email))
			.select(User::as_select())
			.first(self)
			.optional()
			.map_err(Into::into)
	}

	fn list_users(&mut self) -> Result<Vec<User>, StoreError> {
		users::table
			.order(users::created_at.desc())
			.select(User::as_select())
			.load(self)
			.map_err(Into::into)
	}

	fn set_verification_code(&mut self, user_id: i32, code: &str) -> Result<(), StoreError> {
		let updated = diesel::update(users::table.filter(users::id.eq(user_id)))
			.set(users::verification_code.eq(code))
			.execute(self)?;
		if updated == 0 {
			return Err(StoreError::NotFound);
		}
		Ok(())
	}

	fn mark_email_verified(&mut self, user_id: i32, permission: &str) -> Result<(), StoreError> {
		self.transaction::<_, StoreError, _>(|conn| {
			let user: User = users::table
				.filter(users::id.eq(user_id))
				.select(User::as_select())
				.first(conn)?;
			let mut permissions = user.permissions;
			if !permissions.iter().any(|p| p == permission) {
				permissions.push(permission.to_string());
			}
			diesel::update(users::table.filter(users::id.eq(user_id)))
				.set((users::has_verified_email.eq(true), users::permissions.eq(permissions)))
				.execute(conn)?;
			Ok(())
		})
	}

	fn set_avatar(&mut self, user_id: i32, path: &str) -> Result<(), StoreError> {
		let updated = diesel::update(users::table.filter(users::id.eq(user_id)))
			.set(users::avatar.eq(path))
			.execute(self)?;
		if updated == 0 {
			return Err(StoreError::NotFound);
		}
		Ok(())
	}

	fn update_balances(
		&mut self,
		user_id: i32,
		wallet: BigDecimal,
		bonus: BigDecimal,
		profits: BigDecimal,
	) -> Result<(), StoreError> {
		let updated = diesel::update(users::table.filter(users::id.eq(user_id)))
			.set((
				users::wallet.eq(wallet),
				users::bonus.eq(bonus),
				users::profits.eq(profits),
			))
			.execute(self)?;
		if updated == 0 {
			return Err(StoreError::NotFound);
		}
		Ok(())
	}

	fn delete_user_cascade(&mut self, user_id: i32) -> Result<(), StoreError> {
		self.transaction::<_, StoreError, _>(|conn| {
			diesel::delete(auth_pins::table.filter(auth_pins::user_id.eq(user_id)))
				.execute(conn)?;
			diesel::delete(withdrawals::table.filter(withdrawals::user_id.eq(user_id)))
				.execute(conn)?;
			diesel::delete(deposits::table.filter(deposits::user_id.eq(user_id)))
				.execute(conn)?;
			diesel::delete(notifications::table.filter(notifications::listener_id.eq(user_id)))
				.execute(conn)?;
			let deleted = diesel::delete(users::table.filter(users::id.eq(user_id)))
				.execute(conn)?;
			if deleted == 0 {
				return Err(StoreError::NotFound);
			}
			Ok(())
		})
	}

	fn create_deposit(&mut self, deposit: NewDeposit) -> Result<Deposit, StoreError> {
		diesel::insert_into(deposits::table)
			.values(&deposit)
			.returning(Deposit::as_returning())
			.get_result(self)
			.map_err(Into::into)
	}

	fn deposits_for_user(&mut self, user_id: i32, limit: i64) -> Result<Vec<Deposit>, StoreError> {
		deposits::table
			.filter(deposits::user_id.eq(user_id))
			.order(deposits::created_at.desc())
			.limit(limit)
			.select(Deposit::as_select())
			.load(self)
			.map_err(Into::into)
	}

	fn list_deposits_with_owner(&mut self) -> Result<Vec<(Deposit, User)>, StoreError> {
		deposits::table
			.inner_join(users::table)
			.order(deposits::created_at.desc())
			.select((Deposit::as_select(), User::as_select()))
			.load(self)
			.map_err(Into::into)
	}

	fn create_withdrawal(&mut self, withdrawal: NewWithdrawal) -> Result<Withdrawal, StoreError> {
		diesel::insert_into(withdrawals::table)
			.values(&withdrawal)
			.returning(Withdrawal::as_returning())
			.get_result(self)
			.map_err(Into::into)
	}

	fn set_withdrawal_pin(&mut self, withdrawal_id: Uuid, pin: &str) -> Result<(), StoreError> {
		let updated =
			diesel::update(withdrawals::table.filter(withdrawals::id.eq(withdrawal_id)))
				.set(withdrawals::pin.eq(pin))
				.execute(self)?;
		if updated == 0 {
			return Err(StoreError::NotFound);
		}
		Ok(())
	}

	fn withdrawals_for_user(
		&mut self,
		user_id: i32,
		limit: i64,
	) -> Result<Vec<Withdrawal>, StoreError> {
		withdrawals::table
			.filter(withdrawals::user_id.eq(user_id))
			.order(withdrawals::created_at.desc())
			.limit(limit)
			.select(Withdrawal::as_select())
			.load(self)
			.map_err(Into::into)
	}

	fn list_withdrawals_with_owner(&mut self) -> Result<Vec<(Withdrawal, User)>, StoreError> {
		withdrawals::table
			.inner_join(users::table)
			.order(withdrawals::created_at.desc())
			.select((Withdrawal::as_select(), User::as_select()))
			.load(self)
			.map_err(Into::into)
	}

	fn create_auth_pin(&mut self, pin: NewAuthPin) -> Result<AuthPin, StoreError> {
		diesel::insert_into(auth_pins::table)
			.values(&pin)
			.returning(AuthPin::as_returning())
			.get_result(self)
			.map_err(Into::into)
	}

	fn find_unused_pin(&mut self, user_id: i32, code: &str) -> Result<Option<AuthPin>, StoreError> {
		auth_pins::table
			.filter(auth_pins::pin.eq(code))
			.filter(auth_pins::user_id.eq(user_id))
			.filter(auth_pins::has_been_used.eq(false))
			.select(AuthPin::as_select())
			.first(self)
			.optional()
			.map_err(Into::into)
	}

	// the two writes of the authenticate transition commit together or not at all
	fn consume_pin_and_credit(
		&mut self,
		pin_id: i32,
		user_id: i32,
		amount: &BigDecimal,
	) -> Result<(), StoreError> {
		self.transaction::<_, StoreError, _>(|conn| {
			let marked = diesel::update(auth_pins::table.filter(auth_pins::id.eq(pin_id)))
				.set(auth_pins::has_been_used.eq(true))
				.execute(conn)?;
			if marked == 0 {
				return Err(StoreError::NotFound);
			}
			let credited = diesel::update(users::table.filter(users::id.eq(user_id)))
				.set(users::withdrawals.eq(users::withdrawals + amount.clone()))
				.execute(conn)?;
			if credited == 0 {
				return Err(StoreError::NotFound);
			}
			Ok(())
		})
	}

	fn create_notification(
		&mut self,
		notification: NewNotification,
	) -> Result<Notification, StoreError> {
		diesel::insert_into(notifications::table)
			.values(&notification)
			.returning(Notification::as_returning())
			.get_result(self)
			.map_err(Into::into)
	}

	fn unread_notifications_for(
		&mut self,
		user_id: i32,
		limit: i64,
	) -> Result<Vec<Notification>, StoreError> {
		notifications::table
			.filter(notifications::listener_id.eq(user_id))
			.filter(notifications::status.eq(crate::constants::NOTIFICATION_UNREAD))
			.order(notifications::created_at.desc())
			.limit(limit)
			.select(Notification::as_select())
			.load(self)
			.map_err(Into::into)
	}

	fn unread_count(&mut self, user_id: i32) -> Result<i64, StoreError> {
		notifications::table
			.filter(notifications::listener_id.eq(user_id))
			.filter(notifications::status.eq(crate::constants::NOTIFICATION_UNREAD))
			.count()
			.get_result(self)
			.map_err(Into::into)
	}

	fn delete_notification(&mut self, id: i32, listener_id: i32) -> Result<(), StoreError> {
		let deleted = diesel::delete(
			notifications::table
				.filter(notifications::id.eq(id))
				.filter(notifications::listener_id.eq(listener_id)),
		)
		.execute(self)?;
		if deleted == 0 {
			return Err(StoreError::NotFound);
		}
		Ok(())
	}
}
