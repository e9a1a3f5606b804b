//! A small user-management domain used to exercise every interception path:
//! a trait-backed service replaced by a dispatch proxy, a static id
//! generator, a private score calculation and a constructor seam.

pub mod controller;
pub mod models;

pub use controller::UserController;
pub use models::{IdGenerator, User};

use mocksmith::{mock_trait, MockError, MockResult, Shape, TypeTag};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("user {0} already exists")]
    Duplicate(i64),

    #[error(transparent)]
    Mock(#[from] MockError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub trait UserService {
    /// The user with `id`, if any.
    fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>>;
    fn save_user(&self, user: &User) -> ServiceResult<bool>;
    /// Whether a user was removed.
    fn delete_user(&self, id: i64) -> ServiceResult<bool>;
    fn find_all_users(&self) -> ServiceResult<Vec<User>>;
}

/// Shape describing [`UserService`] to the mock factory.
pub fn user_service_shape() -> MockResult<Shape> {
    let user = TypeTag::record("User");
    Shape::interface("UserService")
        .method("find_by_id", [TypeTag::I64], TypeTag::optional(user.clone()))
        .method("save_user", [user.clone()], TypeTag::Bool)
        .method("delete_user", [TypeTag::I64], TypeTag::Bool)
        .method("find_all_users", [], TypeTag::seq(user))
        .build()
}

mock_trait! {
    /// Dispatch proxy for [`UserService`].
    pub struct MockUserService: UserService {
        fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>>;
        fn save_user(&self, user: &User) -> ServiceResult<bool>;
        fn delete_user(&self, id: i64) -> ServiceResult<bool>;
        fn find_all_users(&self) -> ServiceResult<Vec<User>>;
    }
}

/// Hand-written service keeping users in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserService {
    users: Mutex<BTreeMap<i64, User>>,
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> std::sync::MutexGuard<'_, BTreeMap<i64, User>> {
        self.users
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl UserService for InMemoryUserService {
    fn find_by_id(&self, id: i64) -> ServiceResult<Option<User>> {
        Ok(self.users().get(&id).cloned())
    }

    fn save_user(&self, user: &User) -> ServiceResult<bool> {
        let mut users = self.users();
        if users.contains_key(&user.id) {
            return Err(ServiceError::Duplicate(user.id));
        }
        users.insert(user.id, user.clone());
        Ok(true)
    }

    fn delete_user(&self, id: i64) -> ServiceResult<bool> {
        Ok(self.users().remove(&id).is_some())
    }

    fn find_all_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users().values().cloned().collect())
    }
}

/// Serializes tests that install global overrides on the shared seams.
#[cfg(test)]
pub(crate) fn serial() -> std::sync::MutexGuard<'static, ()> {
    static SERIAL: Mutex<()> = Mutex::new(());
    SERIAL.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
