use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::sync::Mutex;

// Per-user session state. The pending withdrawal amount lives here between
// the submit and authenticate steps; a newer submit overwrites it, so only
// the most recent amount survives.
#[derive(Debug, Default, Clone)]
pub struct SessionContext {
	pub last_withdrawal_amount: Option<BigDecimal>,
}

pub struct SessionStore {
	inner: Mutex<HashMap<i32, SessionContext>>,
}

impl SessionStore {
	pub fn new() -> Self {
		Self { inner: Mutex::new(HashMap::new()) }
	}

	pub fn remember_withdrawal_amount(&self, user_id: i32, amount: BigDecimal) {
		let mut sessions = self.inner.lock().expect("session store lock poisoned");
		sessions.entry(user_id).or_default().last_withdrawal_amount = Some(amount);
	}

	// falls back to zero when nothing was remembered; the slot is not cleared
	// by a read
	pub fn pending_withdrawal_amount(&self, user_id: i32) -> BigDecimal {
		let sessions = self.inner.lock().expect("session store lock poisoned");
		sessions
			.get(&user_id)
			.and_then(|ctx| ctx.last_withdrawal_amount.clone())
			.unwrap_or_else(|| BigDecimal::from(0))
	}

	pub fn clear(&self, user_id: i32) {
		let mut sessions = self.inner.lock().expect("session store lock poisoned");
		sessions.remove(&user_id);
	}
}

impl Default for SessionStore {
	fn default() -> Self {
		Self::new()
	}
}
