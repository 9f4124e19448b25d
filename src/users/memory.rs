//! Map-backed [`UserRepository`] used as a test double.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;

use super::{model::User, repo::UserRepository};
use crate::error::{AppError, AppResult};

#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
    calls: AtomicUsize,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of storage operations performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.lock().rows.len()
    }

    /// Stored password hash for `id`, which the trait never hands out.
    pub fn stored_password(&self, id: i64) -> Option<String> {
        self.lock().rows.get(&id).map(|u| u.password.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("in-memory repository poisoned")
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn without_password(user: &User) -> User {
    User {
        password: String::new(),
        ..user.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> AppResult<i64> {
        self.touch();
        let mut inner = self.lock();
        if inner.rows.values().any(|u| u.email == user.email) {
            return Err(AppError::bad_request("Invalid data."));
        }
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(id, User { id, ..user.clone() });
        Ok(id)
    }

    async fn get(&self, id: i64) -> AppResult<User> {
        self.touch();
        self.lock()
            .rows
            .get(&id)
            .map(without_password)
            .ok_or_else(|| AppError::not_found("No record matching given ID."))
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        self.touch();
        let mut inner = self.lock();
        if inner
            .rows
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(AppError::bad_request("Invalid data."));
        }
        let row = inner
            .rows
            .get_mut(&user.id)
            .ok_or_else(|| AppError::not_found("No record matching given ID."))?;
        row.first_name = user.first_name.clone();
        row.last_name = user.last_name.clone();
        row.email = user.email.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.touch();
        self.lock()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("No record matching given ID."))
    }

    async fn find_by_status(&self, status: &str) -> AppResult<Vec<User>> {
        self.touch();
        Ok(self
            .lock()
            .rows
            .values()
            .filter(|u| u.status == status)
            .map(without_password)
            .collect())
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
        status: &str,
    ) -> AppResult<Option<User>> {
        self.touch();
        Ok(self
            .lock()
            .rows
            .values()
            .find(|u| u.email == email && u.password == password_hash && u.status == status)
            .map(without_password))
    }
}
