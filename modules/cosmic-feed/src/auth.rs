use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use cosmic_common::User;

use crate::traits::Session;

/// In-memory session holding a user handed over by the auth provider.
///
/// The provider's token protocol is out of scope; whoever constructs this has
/// already authenticated the user.
pub struct StaticSession {
    user: RwLock<Option<User>>,
}

impl StaticSession {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: RwLock::new(None),
        }
    }

    /// Session for the configured email, if any. The email doubles as the id.
    pub fn from_email(email: Option<&str>) -> Self {
        match email {
            Some(email) => Self::signed_in(User {
                id: email.to_string(),
                email: Some(email.to_string()),
            }),
            None => Self::signed_out(),
        }
    }
}

#[async_trait]
impl Session for StaticSession {
    fn current_user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn sign_out(&self) -> Result<()> {
        let previous = self
            .user
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(user) = previous {
            info!(user = %user.id, "Signed out");
        }
        Ok(())
    }
}
