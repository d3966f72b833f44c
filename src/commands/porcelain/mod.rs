//! Porcelain commands (user-facing workflows)
//!
//! ## Commands
//!
//! - `init`: Create a new repository
//! - `add`: Stage files
//! - `rm`: Unstage files and optionally delete them
//! - `commit`: Record the index as a new commit
//! - `log`: Show commit history
//! - `tag`: List or create tags
//! - `checkout`: Materialize a commit or tree into an empty directory

pub mod add;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod rm;
pub mod tag;
