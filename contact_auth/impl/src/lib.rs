use contact_auth_contracts::{ApiAuthService, AuthenticateError};
use sha2::{Digest, Sha256};

/// Shared-secret authentication. Only the digest of the configured token is
/// kept in memory, and presented tokens are compared digest to digest.
#[derive(Debug, Clone)]
pub struct ApiAuthServiceImpl {
    token_digest: [u8; 32],
}

impl ApiAuthServiceImpl {
    pub fn new(api_token: &str) -> Self {
        Self {
            token_digest: digest(api_token),
        }
    }
}

impl ApiAuthService for ApiAuthServiceImpl {
    async fn authenticate(&self, token: &str) -> Result<(), AuthenticateError> {
        if digest(token) == self.token_digest {
            Ok(())
        } else {
            Err(AuthenticateError::InvalidToken)
        }
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::new().chain_update(token).finalize().into()
}

#[cfg(test)]
mod tests {
    use contact_utils::assert_matches;

    use super::*;

    #[tokio::test]
    async fn ok() {
        // Arrange
        let sut = ApiAuthServiceImpl::new("secret-token");

        // Act
        let result = sut.authenticate("secret-token").await;

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn invalid_token() {
        // Arrange
        let sut = ApiAuthServiceImpl::new("secret-token");

        // Act
        let result = sut.authenticate("wrong-token").await;

        // Assert
        assert_matches!(result, Err(AuthenticateError::InvalidToken));
    }
}
