use crate::{
    card::{PrepaidCard, Session},
    command::CardCommand,
};

use super::{CardProcessor, ProcessError};

/// Runs commands of a single caller through its own [`Session`].
#[derive(Debug)]
pub struct SessionProcessor<'a> {
    session: Session<'a>,
    pub applied: u64,
    pub rejected: u64,
}

impl<'a> SessionProcessor<'a> {
    pub fn new(card: &'a PrepaidCard) -> Self {
        Self {
            session: card.session(),
            applied: 0,
            rejected: 0,
        }
    }

    pub fn session(&self) -> &Session<'a> {
        &self.session
    }
}

impl CardProcessor for SessionProcessor<'_> {
    fn process_command(&mut self, command: CardCommand) -> Result<(), ProcessError> {
        let res = match command {
            CardCommand::Authenticate(pin) => self.session.authenticate(&pin),
            CardCommand::Credit(amount) => self.session.credit(amount),
            CardCommand::Withdraw(amount) => self.session.withdraw(amount),
        };
        match res {
            Ok(()) => self.applied += 1,
            Err(_) => self.rejected += 1,
        }
        res.map_err(ProcessError::from)
    }
}

#[cfg(test)]
mod tests {
    use crate::{card::CardError, pin::Pin};

    use super::*;

    #[test]
    fn process_some_commands() {
        let pin = Pin::from_digits(&[1, 2, 3, 4]).unwrap();
        let card = PrepaidCard::new(pin.clone());
        let mut processor = SessionProcessor::new(&card);

        let err = processor
            .process_command(CardCommand::Credit(10))
            .unwrap_err();
        assert_eq!(err, ProcessError::CardErr(CardError::Unauthenticated));

        processor
            .process_command(CardCommand::Authenticate(pin))
            .unwrap();
        assert!(processor.session().is_authenticated());
        processor.process_command(CardCommand::Credit(10)).unwrap();
        processor.process_command(CardCommand::Withdraw(4)).unwrap();

        let err = processor
            .process_command(CardCommand::Withdraw(7))
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::CardErr(CardError::InsufficientBalance)
        ));

        assert_eq!(card.balance(), 6);
        assert_eq!(processor.applied, 3);
        assert_eq!(processor.rejected, 2);
    }

    #[test]
    fn processors_do_not_share_authentication() {
        let pin = Pin::from_digits(&[4, 3, 2, 1]).unwrap();
        let card = PrepaidCard::new(pin.clone());
        let mut first = SessionProcessor::new(&card);
        let mut second = SessionProcessor::new(&card);

        first.process_command(CardCommand::Authenticate(pin)).unwrap();
        first.process_command(CardCommand::Credit(5)).unwrap();

        let err = second
            .process_command(CardCommand::Withdraw(5))
            .unwrap_err();
        assert_eq!(err, ProcessError::CardErr(CardError::Unauthenticated));
        assert_eq!(card.balance(), 5);
    }
}
