//! The authentication store: current session plus, in local mode, the user
//! registry behind signup and login.
//!
//! Auth failures are values ([`AuthError`]), never panics. Persistence
//! follows the same rule as the recipe store: one snapshot commit at the end
//! of every mutator, fire-and-forget.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use cocktail_shared::{AuthError, User, UserId};

use crate::backend::{SnapshotBackend, AUTH_STORE_KEY};
use crate::error::Result;

/// A local-registry entry.
///
/// The password is retained as entered: the local registry is a
/// prototype-grade directory, not a hardened credential store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredUser {
    pub user: User,
    pub password: String,
}

/// The serialized snapshot: session plus local registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthState {
    /// The authenticated user, `None` while anonymous.
    pub user: Option<User>,
    /// Local-mode user directory.
    pub registry: Vec<RegisteredUser>,
    /// Monotonic source for locally minted user ids.
    pub next_user_no: u64,
}

/// Signup credentials and profile fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub nickname: String,
    pub email: Option<String>,
}

/// Session state machine: Anonymous until signup or login succeeds,
/// Anonymous again after logout.
pub struct AuthStore {
    state: AuthState,
    backend: Arc<dyn SnapshotBackend>,
}

impl AuthStore {
    /// Load the persisted session and registry, or start anonymous.
    pub fn open(backend: Arc<dyn SnapshotBackend>) -> Result<Self> {
        let state = match backend.load(AUTH_STORE_KEY)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(error = %e, "auth snapshot unreadable, starting fresh");
                    AuthState::default()
                }
            },
            None => AuthState::default(),
        };
        Ok(Self { state, backend })
    }

    // ------------------------------------------------------------------
    // Local-registry operations
    // ------------------------------------------------------------------

    /// Register a new user and transition the session to it.
    ///
    /// Usernames are unique, case sensitive; a duplicate leaves the existing
    /// record untouched.
    pub fn signup(&mut self, request: SignupRequest) -> std::result::Result<User, AuthError> {
        self.commit(move |state| {
            if state
                .registry
                .iter()
                .any(|entry| entry.user.username == request.username)
            {
                return Err(AuthError::DuplicateUsername);
            }

            state.next_user_no += 1;
            let user = User {
                id: UserId::from(state.next_user_no),
                username: request.username,
                nickname: request.nickname,
                email: request.email,
            };
            state.registry.push(RegisteredUser {
                user: user.clone(),
                password: request.password,
            });
            state.user = Some(user.clone());

            tracing::info!(user = %user.id, "local signup");
            Ok(user)
        })
    }

    /// Look up a registry entry matching both username and password exactly.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> std::result::Result<User, AuthError> {
        let (username, password) = (username.to_string(), password.to_string());
        self.commit(move |state| {
            let user = state
                .registry
                .iter()
                .find(|entry| entry.user.username == username && entry.password == password)
                .map(|entry| entry.user.clone())
                .ok_or(AuthError::InvalidCredentials)?;

            state.user = Some(user.clone());
            tracing::info!(user = %user.id, "local login");
            Ok(user)
        })
    }

    /// Unconditionally return to Anonymous. No network involved.
    pub fn logout(&mut self) {
        let _ = self.commit::<(), _>(|state| {
            state.user = None;
            Ok(())
        });
    }

    /// Pure membership query against the local registry.
    pub fn username_exists(&self, username: &str) -> bool {
        self.state
            .registry
            .iter()
            .any(|entry| entry.user.username == username)
    }

    // ------------------------------------------------------------------
    // Session access (both modes)
    // ------------------------------------------------------------------

    pub fn current_user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Adopt an externally issued identity (remote mode) into the persisted
    /// session.
    pub fn set_session(&mut self, user: User) {
        let _ = self.commit::<(), _>(move |state| {
            state.user = Some(user);
            Ok(())
        });
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    // ------------------------------------------------------------------
    // Commit
    // ------------------------------------------------------------------

    /// Same contract as the recipe store: one snapshot write on every exit
    /// path, the pre-mutation state on failure.
    fn commit<R, F>(&mut self, f: F) -> std::result::Result<R, AuthError>
    where
        F: FnOnce(&mut AuthState) -> std::result::Result<R, AuthError>,
    {
        let prior = self.state.clone();
        let out = f(&mut self.state);
        if out.is_err() {
            self.state = prior;
        }
        self.persist();
        out
    }

    fn persist(&self) {
        match serde_json::to_string(&self.state) {
            Ok(json) => {
                if let Err(e) = self.backend.save(AUTH_STORE_KEY, &json) {
                    tracing::warn!(error = %e, "failed to persist auth snapshot");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize auth snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn store() -> AuthStore {
        AuthStore::open(Arc::new(MemoryBackend::new())).unwrap()
    }

    fn alice() -> SignupRequest {
        SignupRequest {
            username: "alice".into(),
            password: "stirred-not-shaken".into(),
            nickname: "Alice".into(),
            email: None,
        }
    }

    #[test]
    fn signup_authenticates_and_registers() {
        let mut auth = store();
        let user = auth.signup(alice()).unwrap();

        assert_eq!(auth.current_user(), Some(&user));
        assert!(auth.username_exists("alice"));
        assert!(!auth.username_exists("Alice"));
    }

    #[test]
    fn duplicate_signup_fails_and_preserves_the_original() {
        let mut auth = store();
        let first = auth.signup(alice()).unwrap();

        let err = auth
            .signup(SignupRequest {
                nickname: "Impostor".into(),
                ..alice()
            })
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateUsername);

        assert_eq!(auth.state().registry.len(), 1);
        assert_eq!(auth.state().registry[0].user, first);
        // Session unchanged by the failed attempt.
        assert_eq!(auth.current_user(), Some(&first));
    }

    #[test]
    fn login_requires_an_exact_credential_match() {
        let mut auth = store();
        auth.signup(alice()).unwrap();
        auth.logout();
        assert_eq!(auth.current_user(), None);

        let err = auth.login("alice", "wrong").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(auth.current_user(), None);

        let err = auth.login("bob", "stirred-not-shaken").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);

        let user = auth.login("alice", "stirred-not-shaken").unwrap();
        assert_eq!(auth.current_user(), Some(&user));
    }

    #[test]
    fn user_ids_are_monotonic() {
        let mut auth = store();
        let a = auth.signup(alice()).unwrap();
        let b = auth
            .signup(SignupRequest {
                username: "bob".into(),
                ..alice()
            })
            .unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.id, UserId::from(1u64));
        assert_eq!(b.id, UserId::from(2u64));
    }

    #[test]
    fn session_and_registry_survive_a_reload() {
        let backend = Arc::new(MemoryBackend::new());
        {
            let mut auth = AuthStore::open(backend.clone()).unwrap();
            auth.signup(alice()).unwrap();
        }

        let auth = AuthStore::open(backend).unwrap();
        assert_eq!(auth.current_user().map(|u| u.username.as_str()), Some("alice"));
        assert!(auth.username_exists("alice"));
    }

    #[test]
    fn set_session_adopts_a_server_issued_identity() {
        let mut auth = store();
        auth.set_session(User {
            id: UserId::from(42i64),
            username: "remote-alice".into(),
            nickname: "Alice".into(),
            email: None,
        });
        assert_eq!(auth.current_user().map(|u| u.id.as_str()), Some("42"));
        // Registry untouched: remote identities are not local entries.
        assert!(auth.state().registry.is_empty());
    }
}
