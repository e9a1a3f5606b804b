use crate::models::{IdGenerator, User};
use crate::{ServiceResult, UserService};

/// Name reported for ids with no user behind them.
pub const UNKNOWN_USER: &str = "Unknown User";

pub struct UserController<S> {
    service: S,
}

impl<S: UserService> UserController<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn user_name(&self, id: i64) -> ServiceResult<String> {
        Ok(self
            .service
            .find_by_id(id)?
            .map(|user| user.name)
            .unwrap_or_else(|| UNKNOWN_USER.to_string()))
    }

    pub fn create_user(&self, id: i64, name: &str, email: &str) -> ServiceResult<bool> {
        let user = User::create(id, name, email)?;
        self.service.save_user(&user)
    }

    /// Create a user with an id from [`IdGenerator`], returning the id.
    pub fn register(&self, name: &str, email: &str) -> ServiceResult<Option<i64>> {
        let id = IdGenerator::next_id()?;
        let user = User::create(id, name, email)?;
        Ok(self.service.save_user(&user)?.then_some(user.id))
    }

    /// Replace an existing user; `false` when there is nothing to update.
    pub fn update_user(&self, id: i64, name: &str, email: &str) -> ServiceResult<bool> {
        if self.service.find_by_id(id)?.is_none() {
            return Ok(false);
        }
        self.service.save_user(&User::with_email(id, name, email))
    }

    pub fn delete_user(&self, id: i64) -> ServiceResult<bool> {
        self.service.delete_user(id)
    }

    pub fn all_user_names(&self) -> ServiceResult<Vec<String>> {
        Ok(self
            .service
            .find_all_users()?
            .into_iter()
            .map(|user| user.name)
            .collect())
    }
}
