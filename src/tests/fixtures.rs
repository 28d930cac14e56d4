use crate::models::{DepositRequest, SignUpRequest, User, WithdrawalRequest};
use bigdecimal::BigDecimal;
use chrono::Utc;

pub struct TestFixtures;

impl TestFixtures {
	pub fn signup_request() -> SignUpRequest {
		SignUpRequest {
			firstname: "Grace".to_string(),
			lastname: "Hopper".to_string(),
			email: "grace.hopper@example.com".to_string(),
			password1: "SecurePassword123".to_string(),
			password2: "SecurePassword123".to_string(),
			zipcode: "10001".to_string(),
			city: Some("New York".to_string()),
			state: Some("New York".to_string()),
			country: Some("United States".to_string()),
			street: None,
		}
	}

	pub fn deposit_request(amount: i64) -> DepositRequest {
		DepositRequest {
			wallet_type: "BTC".to_string(),
			amount: BigDecimal::from(amount),
			address: "bc1q7uxgv5g44kz4k0jzay8lt9ucqhvx5kpesg75ne".to_string(),
			description: Some("Test deposit".to_string()),
			date: Utc::now(),
		}
	}

	pub fn withdrawal_request(amount: i64) -> WithdrawalRequest {
		WithdrawalRequest {
			wallet_type: "BTC".to_string(),
			amount: BigDecimal::from(amount),
			address: "bc1q7uxgv5g44kz4k0jzay8lt9ucqhvx5kpesg75ne".to_string(),
		}
	}

	pub fn user(id: i32, verified: bool, permissions: &[&str]) -> User {
		User {
			id,
			firstname: "Ada".to_string(),
			lastname: "Lovelace".to_string(),
			email: format!("user{}@example.com", id),
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
		}
	}
}
