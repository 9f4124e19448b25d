use std::sync::Arc;

use tracing::{error, info, warn};

use super::{
    dto::UserLoginRequest,
    model::{User, STATUS_ACTIVE},
    password::hash_password,
    repo::UserRepository,
};
use crate::{
    dates,
    error::{AppError, AppResult},
};

/// Business rules for user accounts on top of a [`UserRepository`].
#[derive(Clone)]
pub struct UsersService {
    repo: Arc<dyn UserRepository>,
}

fn check_id(id: i64) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::bad_request("User ID has to be greater than 0."));
    }
    Ok(())
}

/// Logs the formatting cause before it is hidden behind a generic message.
fn creation_date(formatted: Result<String, time::error::Format>) -> AppResult<String> {
    formatted.map_err(|e| {
        error!(error = %e, "format creation date failed");
        AppError::internal("Error when trying to set the creation date.", e)
    })
}

impl UsersService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, mut user: User) -> AppResult<User> {
        if let Err(e) = user.validate().and_then(|_| user.validate_password()) {
            warn!(error = %e, "create user rejected");
            return Err(e);
        }

        user.status = STATUS_ACTIVE.to_owned();
        user.date_created = creation_date(dates::now_db_string())?;
        user.password = hash_password(&user.password);
        user.id = self.repo.save(&user).await?;

        info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> AppResult<User> {
        check_id(id)?;
        self.repo.get(id).await
    }

    /// Read-merge-validate-write. Returns the merged record.
    pub async fn update(&self, id: i64, candidate: User, partial: bool) -> AppResult<User> {
        let mut current = self.get(id).await?;
        current.merge(&candidate, partial);
        if let Err(e) = current.validate() {
            warn!(user_id = id, error = %e, "update user rejected");
            return Err(e);
        }

        self.repo.update(&current).await?;
        info!(user_id = id, partial, "user updated");
        Ok(current)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        check_id(id)?;
        self.repo.delete(id).await?;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    pub async fn search(&self, status: &str) -> AppResult<Vec<User>> {
        let users = self.repo.find_by_status(status).await?;
        if users.is_empty() {
            return Err(AppError::not_found(format!(
                "No users matching status {}.",
                status
            )));
        }
        Ok(users)
    }

    pub async fn login(&self, request: UserLoginRequest) -> AppResult<User> {
        let email = request.email.trim().to_lowercase();
        let password_hash = hash_password(&request.password);

        match self
            .repo
            .find_by_credentials(&email, &password_hash, STATUS_ACTIVE)
            .await?
        {
            Some(user) => {
                info!(user_id = user.id, "user logged in");
                Ok(user)
            }
            None => {
                warn!(email = %email, "login rejected");
                Err(AppError::not_found("Invalid user credentials."))
            }
        }
    }
}
