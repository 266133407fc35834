use serde::Deserialize;
use thiserror::Error;

use crate::{
    card::Amount,
    pin::{Pin, PinError},
};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Authenticate,
    Credit,
    Withdraw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardCommand {
    Authenticate(Pin),
    Credit(Amount),
    Withdraw(Amount),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardCommandError {
    #[error("Value is required for {kind:?}")]
    ValueRequired { kind: OperationKind },
    #[error("Invalid PIN: {0}")]
    InvalidPin(#[from] PinError),
    #[error("Invalid amount `{value}` for {kind:?}")]
    InvalidAmount { kind: OperationKind, value: String },
}

impl CardCommand {
    /// Only the shape of the value is checked here. Value rules, like amounts
    /// being positive, belong to the card.
    pub fn parse_command(
        kind: OperationKind,
        value: Option<&str>,
    ) -> Result<Self, CardCommandError> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Err(CardCommandError::ValueRequired { kind });
        };
        match kind {
            OperationKind::Authenticate => Ok(Self::Authenticate(value.parse()?)),
            OperationKind::Credit => Ok(Self::Credit(Self::parse_amount(kind, value)?)),
            OperationKind::Withdraw => Ok(Self::Withdraw(Self::parse_amount(kind, value)?)),
        }
    }

    fn parse_amount(kind: OperationKind, value: &str) -> Result<Amount, CardCommandError> {
        value
            .parse()
            .map_err(|_| CardCommandError::InvalidAmount {
                kind,
                value: value.to_string(),
            })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Authenticate(_) => OperationKind::Authenticate,
            Self::Credit(_) => OperationKind::Credit,
            Self::Withdraw(_) => OperationKind::Withdraw,
        }
    }
}
