/// The prepaid card itself: shared balance behind a lock, plus per caller
/// sessions that carry the authentication state.
pub mod card;

/// Secret PIN type, parsing and comparison.
pub mod pin;

/// Parsed card operations, later executed by a [`processor`].
pub mod command;

/// Command processor interface, plus a session backed implementation.
pub mod processor;

/// CSV batch driver used by the binary and by integration tests.
pub mod bin_utils;
