//! Central application state.
//!
//! Owns both stores and, in remote mode, the service handle and board
//! mirror. Auth operations dispatch by mode here: local calls go to the
//! registry in [`AuthStore`], remote calls delegate to the member endpoints
//! and adopt the server-issued identity into the same persisted session.

use std::sync::Arc;

use cocktail_net::{LoginDto, RecipeService, ServiceError, SignupDto};
use cocktail_shared::{AuthError, StoreMode, User, UserId};
use cocktail_store::{AuthStore, RecipeStore, SignupRequest, SnapshotBackend};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::remote::RemoteBoard;

/// Remote-mode handles: the shared service client and the board mirror.
pub struct RemoteHandle {
    pub service: Arc<RecipeService>,
    pub board: RemoteBoard,
}

/// Central application state.
pub struct AppState {
    pub mode: StoreMode,
    /// Session (both modes) and the local-mode user registry.
    pub auth: AuthStore,
    /// Local-mode recipe collection and like engine.
    pub recipes: RecipeStore,
    /// Present in remote mode only.
    pub remote: Option<RemoteHandle>,
}

impl AppState {
    /// Fully client-side: registry auth, snapshot-persisted recipes.
    pub fn local(backend: Arc<dyn SnapshotBackend>) -> Result<Self, ClientError> {
        Ok(Self {
            mode: StoreMode::Local,
            auth: AuthStore::open(backend.clone())?,
            recipes: RecipeStore::open(backend)?,
            remote: None,
        })
    }

    /// Remote-delegated: the service is authoritative for recipes and
    /// identity; the persisted session is restored into the identity header.
    pub fn remote(
        config: &ClientConfig,
        backend: Arc<dyn SnapshotBackend>,
    ) -> Result<Self, ClientError> {
        let service = Arc::new(RecipeService::new(config.api_base_url.clone()));
        let auth = AuthStore::open(backend.clone())?;

        if let Some(member_no) = auth.current_user().and_then(|u| u.id.as_member_no()) {
            service.set_member_no(Some(member_no));
        }

        Ok(Self {
            mode: StoreMode::Remote,
            auth,
            recipes: RecipeStore::open(backend)?,
            remote: Some(RemoteHandle {
                board: RemoteBoard::new(service.clone()),
                service,
            }),
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.auth.current_user().map(|u| u.id.clone())
    }

    // ------------------------------------------------------------------
    // Auth, dispatched by mode
    // ------------------------------------------------------------------

    /// Create an account and transition the session to it.
    pub async fn signup(&mut self, request: SignupRequest) -> Result<User, ClientError> {
        match &self.remote {
            None => Ok(self.auth.signup(request)?),
            Some(handle) => {
                let email = request.email.clone();
                let dto = SignupDto {
                    member_id: request.username,
                    password: request.password,
                    nickname: request.nickname,
                    email: request.email,
                };
                let member = match handle.service.signup(&dto).await {
                    Ok(member) => member,
                    // Service-reported failure: typed result, no state change.
                    Err(ServiceError::Api { message }) => {
                        return Err(AuthError::Rejected(message).into())
                    }
                    Err(e) => return Err(e.into()),
                };

                let user = User {
                    id: UserId::from(member.member_no),
                    username: member.member_id,
                    nickname: member.nickname,
                    email,
                };
                handle.service.set_member_no(user.id.as_member_no());
                self.auth.set_session(user.clone());
                Ok(user)
            }
        }
    }

    /// Authenticate and transition the session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User, ClientError> {
        match &self.remote {
            None => Ok(self.auth.login(username, password)?),
            Some(handle) => {
                let dto = LoginDto {
                    member_id: username.to_string(),
                    password: password.to_string(),
                };
                let member = match handle.service.login(&dto).await {
                    Ok(member) => member,
                    Err(ServiceError::Api { message }) => {
                        return Err(AuthError::Rejected(message).into())
                    }
                    Err(e) => return Err(e.into()),
                };

                let user = User {
                    id: UserId::from(member.member_no),
                    username: member.member_id,
                    nickname: member.nickname,
                    email: None,
                };
                handle.service.set_member_no(user.id.as_member_no());
                self.auth.set_session(user.clone());
                Ok(user)
            }
        }
    }

    /// Return to Anonymous. Never a network call, in either mode.
    pub fn logout(&mut self) {
        self.auth.logout();
        if let Some(handle) = &self.remote {
            handle.service.set_member_no(None);
        }
    }

    /// Whether a username is already taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool, ClientError> {
        match &self.remote {
            None => Ok(self.auth.username_exists(username)),
            Some(handle) => Ok(!handle.service.check_member_id(username).await?),
        }
    }
}
