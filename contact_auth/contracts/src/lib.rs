use std::future::Future;

use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ApiAuthService: Send + Sync + 'static {
    /// Authenticates a request using the shared api token.
    fn authenticate(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<(), AuthenticateError>> + Send;
}

#[derive(Debug, Error)]
pub enum AuthenticateError {
    #[error("The api token is invalid.")]
    InvalidToken,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockApiAuthService {
    pub fn with_authenticate(mut self, token: &'static str, ok: bool) -> Self {
        self.expect_authenticate()
            .once()
            .with(mockall::predicate::eq(token))
            .return_once(move |_| {
                Box::pin(std::future::ready(if ok {
                    Ok(())
                } else {
                    Err(AuthenticateError::InvalidToken)
                }))
            });
        self
    }
}
