use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

use crate::pin::Pin;

pub type Amount = i64;
pub type Balance = u64;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Wrong PIN")]
    WrongPin,
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Amount must be positive")]
    NegativeAmount,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Balance would overflow")]
    BalanceOverflow,
}

#[derive(Debug)]
pub struct PrepaidCard {
    pin: Pin,
    balance: Mutex<Balance>,
}

impl PrepaidCard {
    pub fn new(pin: Pin) -> Self {
        Self::with_balance(pin, 0)
    }

    pub fn with_balance(pin: Pin, balance: Balance) -> Self {
        Self {
            pin,
            balance: Mutex::new(balance),
        }
    }

    /// Point in time snapshot, may be stale as soon as it is returned.
    pub fn balance(&self) -> Balance {
        *self.lock_balance()
    }

    /// Opens a new, unauthenticated execution context on this card.
    pub fn session(&self) -> Session<'_> {
        Session {
            card: self,
            authenticated: false,
        }
    }

    fn lock_balance(&self) -> MutexGuard<'_, Balance> {
        // Updates are applied in a single assignment after every check passed,
        // so a panicking holder can't leave a partial update behind.
        self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn credit(&self, amount: Balance) -> Result<Balance, CardError> {
        let mut balance = self.lock_balance();
        *balance = balance
            .checked_add(amount)
            .ok_or(CardError::BalanceOverflow)?;
        Ok(*balance)
    }

    fn withdraw(&self, amount: Balance) -> Result<Balance, CardError> {
        let mut balance = self.lock_balance();
        *balance = balance
            .checked_sub(amount)
            .ok_or(CardError::InsufficientBalance)?;
        Ok(*balance)
    }
}

/// Authentication scope of one caller on a [`PrepaidCard`].
///
/// The authenticated flag lives here rather than on the card, so
/// authenticating one session never authorizes another one. Once
/// authenticated, a session stays authenticated until it is dropped.
#[derive(Debug)]
pub struct Session<'a> {
    card: &'a PrepaidCard,
    authenticated: bool,
}

impl<'a> Session<'a> {
    pub fn card(&self) -> &'a PrepaidCard {
        self.card
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn authenticate(&mut self, pin: &Pin) -> Result<(), CardError> {
        if *pin != self.card.pin {
            debug!(authenticated = self.authenticated, "wrong PIN");
            return Err(CardError::WrongPin);
        }
        self.authenticated = true;
        Ok(())
    }

    pub fn credit(&self, amount: Amount) -> Result<(), CardError> {
        let amount = self.guard(amount)?;
        let balance = self.card.credit(amount).inspect_err(|err| {
            debug!(amount, %err, "credit rejected");
        })?;
        debug!(amount, balance, "credited");
        Ok(())
    }

    pub fn withdraw(&self, amount: Amount) -> Result<(), CardError> {
        let amount = self.guard(amount)?;
        let balance = self.card.withdraw(amount).inspect_err(|err| {
            debug!(amount, %err, "withdrawal rejected");
        })?;
        debug!(amount, balance, "withdrawn");
        Ok(())
    }

    fn guard(&self, amount: Amount) -> Result<Balance, CardError> {
        if !self.authenticated {
            return Err(CardError::Unauthenticated);
        }
        match Balance::try_from(amount) {
            Ok(amount) if amount > 0 => Ok(amount),
            _ => Err(CardError::NegativeAmount),
        }
    }
}
