// src/services/account_service.rs
//
// Account Service - registration, sign-in and personal movie libraries
//
// CRITICAL RULES:
// - Usernames are unique; IDs are drawn at random from ID_RANGE and never reused
// - A user ID stays taken while any library names it as owner
// - A user owns at most one library; creating it again returns the existing one
// - A failed write leaves the in-memory collections as they were before the call
// - Sign-in failures are logged, never raised
// - Adding a movie to a library silently skips unknown movies and missing libraries
// - Account administration requires a session whose role can manage accounts

use std::ops::Range;
use std::sync::Arc;

use log::{debug, info, warn};
use rand::seq::SliceRandom;

use crate::domain::{
    validate_movie_library, Credentials, EntityId, Identified, MovieLibrary, NewAccount, User,
};
use crate::error::{AppError, AppResult};
use crate::repositories::RecordStore;

use super::catalog_service::CatalogService;
use super::collection_service::{CollectionService, MovieLibraryService};
use super::resolution_service::link_libraries;
use super::user_service::UserService;

/// IDs handed out to new accounts and libraries
pub const ID_RANGE: Range<EntityId> = 1..1000;

// ============================================================================
// SESSION
// ============================================================================

/// Who is signed in, and whether their library is ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        user_id: EntityId,
    },
    LibraryConfigured {
        user_id: EntityId,
        library_id: EntityId,
    },
}

impl Session {
    pub fn user_id(&self) -> Option<EntityId> {
        match self {
            Session::Anonymous => None,
            Session::Authenticated { user_id } | Session::LibraryConfigured { user_id, .. } => {
                Some(*user_id)
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id().is_some()
    }

    fn for_user(user: &User) -> Self {
        match user.library_id() {
            Some(library_id) => Session::LibraryConfigured {
                user_id: user.id(),
                library_id,
            },
            None => Session::Authenticated { user_id: user.id() },
        }
    }
}

/// Outcome of adding a movie to a user's library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryUpdate {
    Added,
    UnknownMovie,
    NoLibrary,
}

// ============================================================================
// ACCOUNT SERVICE
// ============================================================================

pub struct AccountService {
    users: UserService,
    libraries: MovieLibraryService,
}

impl AccountService {
    pub fn load(store: Arc<dyn RecordStore>) -> AppResult<Self> {
        let users = UserService::load(store.clone())?;
        let libraries = CollectionService::load(store)?;
        info!(
            "Accounts loaded: {} users, {} movie libraries",
            users.len(),
            libraries.len()
        );
        Ok(Self::new(users, libraries))
    }

    pub fn new(users: UserService, libraries: MovieLibraryService) -> Self {
        Self { users, libraries }
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn movie_libraries(&self) -> &[MovieLibrary] {
        self.libraries.records()
    }

    pub fn account(&self, user_id: EntityId) -> Option<&User> {
        self.users.records().iter().find(|user| user.id() == user_id)
    }

    pub fn library_of(&self, user_id: EntityId) -> Option<&MovieLibrary> {
        let library_id = self.account(user_id)?.library_id()?;
        self.libraries.find_by_id(library_id)
    }

    // ========================================================================
    // REGISTRATION & SIGN-IN
    // ========================================================================

    /// Registers a new account and signs it in
    pub fn create_account(&mut self, account: NewAccount) -> AppResult<Session> {
        if self.users.find_by_username(&account.username).is_some() {
            warn!("Registration rejected, username '{}' is taken", account.username);
            return Err(AppError::AlreadyExists(format!(
                "username '{}'",
                account.username
            )));
        }

        let id = draw_free_id(|id| self.user_id_in_use(id))?;
        let user = User::register(id, account).map_err(|e| {
            warn!("Registration rejected: {}", e);
            AppError::from(e)
        })?;
        let username = user.username().to_string();

        self.users.add(user);
        if let Err(e) = self.users.persist() {
            self.users.discard(id);
            return Err(e);
        }
        info!("Created account {} ({})", username, id);
        Ok(Session::Authenticated { user_id: id })
    }

    /// An ID is in use while an account holds it or a library names it as owner
    fn user_id_in_use(&self, id: EntityId) -> bool {
        self.users.contains(id)
            || self
                .libraries
                .records()
                .iter()
                .any(|library| library.owner_id() == id)
    }

    pub fn sign_in(&mut self, credentials: &Credentials) -> Session {
        let Some(user) = self.users.find_by_username(&credentials.username) else {
            warn!("Sign-in failed: no account named '{}'", credentials.username);
            return Session::Anonymous;
        };
        if !user.matches(credentials) {
            warn!("Sign-in failed: wrong email or password for '{}'", credentials.username);
            return Session::Anonymous;
        }
        let user_id = user.id();

        self.configure_movie_libraries();
        match self.account(user_id) {
            Some(user) => {
                info!("{} signed in", user.username());
                Session::for_user(user)
            }
            None => Session::Anonymous,
        }
    }

    /// Links users to the libraries they own. Returns how many links were made.
    pub fn configure_movie_libraries(&mut self) -> usize {
        let linked = link_libraries(self.users.records_mut(), self.libraries.records());
        debug!("Configured {} movie library link(s)", linked);
        linked
    }

    // ========================================================================
    // LIBRARIES
    // ========================================================================

    /// Creates the user's library, or returns the one they already own
    pub fn create_movie_library(
        &mut self,
        user_id: EntityId,
        title: impl Into<String>,
    ) -> AppResult<EntityId> {
        let user = self
            .users
            .find_by_id(user_id)?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;

        if let Some(existing) = user.library_id() {
            debug!("User {} already owns library {}", user_id, existing);
            return Ok(existing);
        }
        if let Some(owned) = self
            .libraries
            .records()
            .iter()
            .find(|library| library.owner_id() == user_id)
            .map(|library| library.id())
        {
            self.link(user_id, owned);
            self.users.persist()?;
            return Ok(owned);
        }

        let id = draw_free_id(|id| self.libraries.contains(id))?;
        let library = MovieLibrary::new(id, title, user_id);
        validate_movie_library(&library)?;

        let title = library.title.clone();
        self.libraries.insert(library);
        if let Err(e) = self.libraries.persist() {
            self.libraries.delete(id);
            return Err(e);
        }
        info!("Created movie library '{}' ({}) for user {}", title, id, user_id);

        // the library is saved; its link is re-derived from owner_id on the next load
        self.link(user_id, id);
        self.users.persist()?;
        Ok(id)
    }

    fn link(&mut self, user_id: EntityId, library_id: EntityId) {
        if let Some(user) = self.users.find_by_id_mut(user_id) {
            user.link_library(library_id);
        }
    }

    pub fn add_movie_to_library(
        &mut self,
        catalog: &CatalogService,
        user_id: EntityId,
        movie_id: EntityId,
    ) -> AppResult<LibraryUpdate> {
        let Some(movie) = catalog.find_movie_by_id(movie_id) else {
            warn!("Movie {} does not exist, library left unchanged", movie_id);
            return Ok(LibraryUpdate::UnknownMovie);
        };

        let library_id = self
            .users
            .find_by_id(user_id)?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?
            .library_id();
        let Some(library) = library_id.and_then(|id| self.libraries.find_by_id_mut(id)) else {
            warn!("User {} has no movie library, '{}' not added", user_id, movie.name);
            return Ok(LibraryUpdate::NoLibrary);
        };

        let mut updated = library.clone();
        updated.add_movie(movie_id);
        let previous = std::mem::replace(library, updated);
        if let Err(e) = self.libraries.persist() {
            self.restore_library(previous);
            return Err(e);
        }
        info!("Added '{}' to library '{}'", movie.name, previous.title);
        Ok(LibraryUpdate::Added)
    }

    pub fn rename_library(&mut self, user_id: EntityId, title: impl Into<String>) -> AppResult<()> {
        let library_id = self
            .library_of(user_id)
            .map(|library| library.id())
            .ok_or_else(|| AppError::NotFound(format!("movie library of user {}", user_id)))?;

        let Some(library) = self.libraries.find_by_id_mut(library_id) else {
            return Ok(());
        };
        let mut updated = library.clone();
        updated.rename(title);
        let previous = std::mem::replace(library, updated);
        if let Err(e) = self.libraries.persist() {
            self.restore_library(previous);
            return Err(e);
        }
        Ok(())
    }

    fn restore_library(&mut self, previous: MovieLibrary) {
        if let Some(library) = self.libraries.find_by_id_mut(previous.id()) {
            *library = previous;
        }
    }

    // ========================================================================
    // ACCOUNT MAINTENANCE
    // ========================================================================

    pub fn update_username(&mut self, user_id: EntityId, username: &str) -> AppResult<()> {
        if let Some(other) = self.users.find_by_username(username) {
            if other.id() != user_id {
                return Err(AppError::AlreadyExists(format!("username '{}'", username)));
            }
        }
        let user = self
            .users
            .find_by_id_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;
        let mut updated = user.clone();
        updated.set_username(username)?;
        let previous = std::mem::replace(user, updated);
        if let Err(e) = self.users.persist() {
            if let Some(user) = self.users.find_by_id_mut(user_id) {
                *user = previous;
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn list_accounts(&self, session: &Session) -> AppResult<Vec<User>> {
        self.require_admin(session)?;
        Ok(self.users.get_all())
    }

    /// Removes an account. Its library record is kept and keeps the user ID
    /// reserved, so a later account can never inherit the library.
    pub fn delete_account(&mut self, session: &Session, user_id: EntityId) -> AppResult<()> {
        self.require_admin(session)?;
        if self.users.delete(user_id)? == 0 {
            return Err(AppError::NotFound(format!("user {}", user_id)));
        }
        if let Some(orphan) = self.libraries.records().iter().find(|l| l.owner_id() == user_id) {
            debug!("Library {} keeps user ID {} reserved", orphan.id(), user_id);
        }
        Ok(())
    }

    fn require_admin(&self, session: &Session) -> AppResult<()> {
        let allowed = session
            .user_id()
            .and_then(|id| self.account(id))
            .map(|user| user.role().can_manage_accounts())
            .unwrap_or(false);

        if !allowed {
            warn!("Account administration refused for {:?}", session);
            return Err(AppError::PermissionDenied(
                "account administration requires an admin session".to_string(),
            ));
        }
        Ok(())
    }
}

/// Picks a random ID from ID_RANGE that `taken` rejects
fn draw_free_id(taken: impl Fn(EntityId) -> bool) -> AppResult<EntityId> {
    let free: Vec<EntityId> = ID_RANGE.filter(|id| !taken(*id)).collect();
    free.choose(&mut rand::thread_rng())
        .copied()
        .ok_or_else(|| AppError::Other(format!("no free ID left in {:?}", ID_RANGE)))
}
