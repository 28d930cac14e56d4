use crate::models::{
	AuthPin, Deposit, NewAuthPin, NewDeposit, NewNotification, NewUser, NewWithdrawal,
	Notification, User, Withdrawal,
};
use crate::repo::{BankRepo, StoreError};
use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

// In-memory stand-in for the storage collaborator. Mirrors the uniqueness
// constraints the real schema enforces (pin value, withdrawal link, email).
pub struct MemRepo {
	next_user_id: i32,
	next_pin_id: i32,
	next_notification_id: i32,
	pub users: Vec<User>,
	pub deposits: Vec<Deposit>,
	pub withdrawals: Vec<Withdrawal>,
	pub auth_pins: Vec<AuthPin>,
	pub notifications: Vec<Notification>,
}

impl MemRepo {
	pub fn new() -> Self {
		Self {
			next_user_id: 1,
			next_pin_id: 1,
			next_notification_id: 1,
			users: Vec::new(),
			deposits: Vec::new(),
			withdrawals: Vec::new(),
			auth_pins: Vec::new(),
			notifications: Vec::new(),
		}
	}

	pub fn seed_user(&mut self, verified: bool, permissions: &[&str]) -> User {
		let user = User {
			id: self.next_user_id,
			firstname: "Ada".to_string(),
			lastname: "Lovelace".to_string(),
			email: format!("user{}@example.com", self.next_user_id),
			password: "hashed-password".to_string(),
			avatar: None,
			street: None,
			city: None,
			state: None,
			country: None,
			zipcode: Some("10001".to_string()),
			wallet: BigDecimal::from(0),
			bonus: BigDecimal::from(0),
			profits: BigDecimal::from(0),
			withdrawals: BigDecimal::from(0),
			permissions: permissions.iter().map(|p| p.to_string()).collect(),
			is_admin: false,
			has_verified_email: verified,
			verification_code: "code1234verify00".to_string(),
			created_at: Utc::now(),
		};
		self.next_user_id += 1;
		self.users.push(user.clone());
		user
	}

	pub fn user(&self, id: i32) -> Option<&User> {
		self.users.iter().find(|u| u.id == id)
	}
}

impl BankRepo for MemRepo {
	fn create_user(&mut self, user: NewUser) -> Result<User, StoreError> {
		if self.users.iter().any(|u| u.email == user.email) {
			return Err(StoreError::Duplicate);
		}
		let user = User {
			id: self.next_user_id,
			firstname: user.firstname,
			lastname: user.lastname,
			email: user.email,
			password: user.password,
			avatar: user.avatar,
			street: user.street,
			city: user.city,
			state: user.state,
			country: user.country,
			zipcode: user.zipcode,
			wallet: user.wallet,
			bonus: user.bonus,
			profits: user.profits,
			withdrawals: user.withdrawals,
			permissions: user.permissions,
			is_admin: user.is_admin,
			has_verified_email: user.has_verified_email,
			verification_code: user.verification_code,
			created_at: user.created_at,
		};
		self.next_user_id += 1;
		self.users.push(user.clone());
		Ok(user)
	}

	fn find_user(&mut self, id: i32) -> Result<Option<User>, StoreError> {
		Ok(self.users.iter().find(|u| u.id == id).cloned())
	}

	fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, StoreError> {
		Ok(self.users.iter().find(|u| u.email == email).cloned())
	}

	fn list_users(&mut self) -> Result<Vec<User>, StoreError> {
		Ok(self.users.clone())
	}

	fn set_verification_code(&mut self, user_id: i32, code: &str) -> Result<(), StoreError> {
		let user = self
			.users
			.iter_mut()
			.find(|u| u.id == user_id)
			.ok_or(StoreError::NotFound)?;
		user.verification_code = code.to_string();
		Ok(())
	}

	fn mark_email_verified(&mut self, user_id: i32, permission: &str) -> Result<(), StoreError> {
		let user = self
			.users
			.iter_mut()
			.find(|u| u.id == user_id)
			.ok_or(StoreError::NotFound)?;
		user.has_verified_email = true;
		if !user.permissions.iter().any(|p| p == permission) {
			user.permissions.push(permission.to_string());
		}
		Ok(())
	}

	fn set_avatar(&mut self, user_id: i32, path: &str) -> Result<(), StoreError> {
		let user = self
			.users
			.iter_mut()
			.find(|u| u.id == user_id)
			.ok_or(StoreError::NotFound)?;
		user.avatar = Some(path.to_string());
		Ok(())
	}

	fn update_balances(
		&mut self,
		user_id: i32,
		wallet: BigDecimal,
		bonus: BigDecimal,
		profits: BigDecimal,
	) -> Result<(), StoreError> {
		let user = self
			.users
			.iter_mut()
			.find(|u| u.id == user_id)
			.ok_or(StoreError::NotFound)?;
		user.wallet = wallet;
		user.bonus = bonus;
		user.profits = profits;
		Ok(())
	}

	fn delete_user_cascade(&mut self, user_id: i32) -> Result<(), StoreError> {
		if !self.users.iter().any(|u| u.id == user_id) {
			return Err(StoreError::NotFound);
		}
		self.auth_pins.retain(|p| p.user_id != user_id);
		self.withdrawals.retain(|w| w.user_id != user_id);
		self.deposits.retain(|d| d.user_id != user_id);
		self.notifications.retain(|n| n.listener_id != user_id);
		self.users.retain(|u| u.id != user_id);
		Ok(())
	}

	fn create_deposit(&mut self, deposit: NewDeposit) -> Result<Deposit, StoreError> {
		if self.deposits.iter().any(|d| d.reference == deposit.reference) {
			return Err(StoreError::Duplicate);
		}
		let deposit = Deposit {
			id: deposit.id,
			reference: deposit.reference,
			user_id: deposit.user_id,
			amount: deposit.amount,
			description: deposit.description,
			details: deposit.details,
			wallet_type: deposit.wallet_type,
			wallet_address: deposit.wallet_address,
			approved: deposit.approved,
			date_of_transfer: deposit.date_of_transfer,
			created_at: deposit.created_at,
		};
		self.deposits.push(deposit.clone());
		Ok(deposit)
	}

	fn deposits_for_user(&mut self, user_id: i32, limit: i64) -> Result<Vec<Deposit>, StoreError> {
		Ok(self
			.deposits
			.iter()
			.filter(|d| d.user_id == user_id)
			.take(limit as usize)
			.cloned()
			.collect())
	}

	fn list_deposits_with_owner(&mut self) -> Result<Vec<(Deposit, User)>, StoreError> {
		Ok(self
			.deposits
			.iter()
			.filter_map(|d| {
				self.users
					.iter()
					.find(|u| u.id == d.user_id)
					.map(|u| (d.clone(), u.clone()))
			})
			.collect())
	}

	fn create_withdrawal(&mut self, withdrawal: NewWithdrawal) -> Result<Withdrawal, StoreError> {
		if self.withdrawals.iter().any(|w| w.reference == withdrawal.reference) {
			return Err(StoreError::Duplicate);
		}
		let withdrawal = Withdrawal {
			id: withdrawal.id,
			reference: withdrawal.reference,
			user_id: withdrawal.user_id,
			amount: withdrawal.amount,
			details: withdrawal.details,
			wallet_type: withdrawal.wallet_type,
			wallet_address: withdrawal.wallet_address,
			pin: withdrawal.pin,
			approved: withdrawal.approved,
			created_at: withdrawal.created_at,
		};
		self.withdrawals.push(withdrawal.clone());
		Ok(withdrawal)
	}

	fn set_withdrawal_pin(&mut self, withdrawal_id: Uuid, pin: &str) -> Result<(), StoreError> {
		let withdrawal = self
			.withdrawals
			.iter_mut()
			.find(|w| w.id == withdrawal_id)
			.ok_or(StoreError::NotFound)?;
		withdrawal.pin = Some(pin.to_string());
		Ok(())
	}

	fn withdrawals_for_user(
		&mut self,
		user_id: i32,
		limit: i64,
	) -> Result<Vec<Withdrawal>, StoreError> {
		Ok(self
			.withdrawals
			.iter()
			.filter(|w| w.user_id == user_id)
			.take(limit as usize)
			.cloned()
			.collect())
	}

	fn list_withdrawals_with_owner(&mut self) -> Result<Vec<(Withdrawal, User)>, StoreError> {
		Ok(self
			.withdrawals
			.iter()
			.filter_map(|w| {
				self.users
					.iter()
					.find(|u| u.id == w.user_id)
					.map(|u| (w.clone(), u.clone()))
			})
			.collect())
	}

	fn create_auth_pin(&mut self, pin: NewAuthPin) -> Result<AuthPin, StoreError> {
		if self
			.auth_pins
			.iter()
			.any(|p| p.pin == pin.pin || p.withdrawal_id == pin.withdrawal_id)
		{
			return Err(StoreError::Duplicate);
		}
		let pin = AuthPin {
			id: self.next_pin_id,
			pin: pin.pin,
			user_id: pin.user_id,
			withdrawal_id: pin.withdrawal_id,
			has_been_used: pin.has_been_used,
			created_at: pin.created_at,
		};
		self.next_pin_id += 1;
		self.auth_pins.push(pin.clone());
		Ok(pin)
	}

	fn find_unused_pin(&mut self, user_id: i32, code: &str) -> Result<Option<AuthPin>, StoreError> {
		Ok(self
			.auth_pins
			.iter()
			.find(|p| p.pin == code && p.user_id == user_id && !p.has_been_used)
			.cloned())
	}

	fn consume_pin_and_credit(
		&mut self,
		pin_id: i32,
		user_id: i32,
		amount: &BigDecimal,
	) -> Result<(), StoreError> {
		if !self.auth_pins.iter().any(|p| p.id == pin_id)
			|| !self.users.iter().any(|u| u.id == user_id)
		{
			return Err(StoreError::NotFound);
		}
		for pin in self.auth_pins.iter_mut() {
			if pin.id == pin_id {
				pin.has_been_used = true;
			}
		}
		for user in self.users.iter_mut() {
			if user.id == user_id {
				user.withdrawals = user.withdrawals.clone() + amount.clone();
			}
		}
		Ok(())
	}

	fn create_notification(
		&mut self,
		notification: NewNotification,
	) -> Result<Notification, StoreError> {
		let notification = Notification {
			id: self.next_notification_id,
			listener_id: notification.listener_id,
			description: notification.description,
			status: notification.status,
			created_at: notification.created_at,
		};
		self.next_notification_id += 1;
		self.notifications.push(notification.clone());
		Ok(notification)
	}

	fn unread_notifications_for(
		&mut self,
		user_id: i32,
		limit: i64,
	) -> Result<Vec<Notification>, StoreError> {
		Ok(self
			.notifications
			.iter()
			.filter(|n| n.listener_id == user_id && n.status == "UNREAD")
			.take(limit as usize)
			.cloned()
			.collect())
	}

	fn unread_count(&mut self, user_id: i32) -> Result<i64, StoreError> {
		Ok(self
			.notifications
			.iter()
			.filter(|n| n.listener_id == user_id && n.status == "UNREAD")
			.count() as i64)
	}

	fn delete_notification(&mut self, id: i32, listener_id: i32) -> Result<(), StoreError> {
		let position = self
			.notifications
			.iter()
			.position(|n| n.id == id && n.listener_id == listener_id)
			.ok_or(StoreError::NotFound)?;
		self.notifications.remove(position);
		Ok(())
	}
}
