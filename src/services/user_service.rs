// src/services/user_service.rs
//
// User Service - account collection facade
//
// Same contract as the generic collection service, except:
// - lookups and deletes raise NotFound when there are no accounts at all
// - deletes are persisted immediately; removing the last account truncates
//   the users resource to zero length

use std::sync::Arc;

use log::{debug, info};

use crate::domain::identity::Identified;
use crate::domain::{EntityId, User};
use crate::error::{AppError, AppResult};
use crate::repositories::{Record, RecordStore};

use super::collection_service::CollectionService;

pub struct UserService {
    users: CollectionService<User>,
    store: Arc<dyn RecordStore>,
}

impl UserService {
    pub fn load(store: Arc<dyn RecordStore>) -> AppResult<Self> {
        let users = CollectionService::load(store.clone())?;
        Ok(Self { users, store })
    }

    pub fn with_records(store: Arc<dyn RecordStore>, users: Vec<User>) -> Self {
        Self {
            users: CollectionService::with_records(store.clone(), users),
            store,
        }
    }

    fn ensure_not_empty(&self) -> AppResult<()> {
        if self.users.is_empty() {
            return Err(AppError::NotFound("The user list is empty".to_string()));
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: EntityId) -> AppResult<Option<&User>> {
        self.ensure_not_empty()?;
        Ok(self.users.find_by_id(id))
    }

    pub fn find_by_email(&self, email: &str) -> AppResult<Option<&User>> {
        self.ensure_not_empty()?;
        Ok(self.users.records().iter().find(|user| user.email() == email))
    }

    pub fn find_by_name(&self, username: &str) -> AppResult<Vec<User>> {
        self.ensure_not_empty()?;
        Ok(self.users.find_by_name(username))
    }

    /// First account with this username, if any. Never fails.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users
            .records()
            .iter()
            .find(|user| user.username() == username)
    }

    pub fn find_by_id_mut(&mut self, id: EntityId) -> Option<&mut User> {
        self.users.find_by_id_mut(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.users.contains(id)
    }

    pub fn add(&mut self, user: User) {
        self.users.insert(user);
    }

    /// Removes every account with this ID and persists the result.
    /// On a write failure the removed accounts are restored.
    pub fn delete(&mut self, id: EntityId) -> AppResult<usize> {
        self.remove_where(|user| user.id() == id)
    }

    pub fn delete_by_email(&mut self, email: &str) -> AppResult<usize> {
        self.remove_where(|user| user.email() == email)
    }

    fn remove_where(&mut self, doomed: impl Fn(&User) -> bool) -> AppResult<usize> {
        self.ensure_not_empty()?;
        let snapshot = self.users.get_all();
        self.users.records_mut().retain(|user| !doomed(user));
        let removed = snapshot.len() - self.users.len();

        if let Err(e) = self.after_delete(removed) {
            *self.users.records_mut() = snapshot;
            return Err(e);
        }
        Ok(removed)
    }

    /// Drops an account from memory only. Used to undo an unsaved insert.
    pub(crate) fn discard(&mut self, id: EntityId) {
        self.users.delete(id);
    }

    fn after_delete(&self, removed: usize) -> AppResult<()> {
        if removed == 0 {
            return Ok(());
        }
        info!("Deleted {} account(s)", removed);

        if self.users.is_empty() {
            debug!("No accounts left, truncating {}", User::RESOURCE);
            return self
                .store
                .clear(User::RESOURCE)
                .map_err(|e| AppError::WriteFailure {
                    description: format!("empty {}", User::RESOURCE),
                    reason: e.to_string(),
                });
        }
        self.users.persist()
    }

    pub fn get_all(&self) -> Vec<User> {
        self.users.get_all()
    }

    pub fn records(&self) -> &[User] {
        self.users.records()
    }

    pub(crate) fn records_mut(&mut self) -> &mut Vec<User> {
        self.users.records_mut()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn persist(&self) -> AppResult<()> {
        self.users.persist()
    }
}
