pub mod init;
pub mod validation;
