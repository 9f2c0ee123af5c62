//! User-facing commands
//!
//! Each command is an `impl Repository` block operating on a handle opened for the
//! duration of one invocation.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Record the staged files as a new commit
//! - `log`: Show commit history
//! - `branch`: Create or list branches
//! - `checkout`: Switch branches
//! - `merge`: Compare a branch tip with the current one
//! - `status`: Show working tree divergences

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod status;
