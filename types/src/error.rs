use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("login failed: {0}")]
    LoginFailed(String),
}
