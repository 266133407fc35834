use thiserror::Error;

use crate::{
    card::CardError,
    command::{CardCommand, CardCommandError},
};

pub mod session_processor;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] CardCommandError),
    #[error(transparent)]
    CardErr(#[from] CardError),
}

pub trait CardProcessor {
    fn process_command(&mut self, command: CardCommand) -> Result<(), ProcessError>;
}
