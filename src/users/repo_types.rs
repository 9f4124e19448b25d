use sqlx::FromRow;

use super::model::User;

/// Row of the `users` table as read back; the password column is never selected.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_created: String,
    pub status: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            date_created: r.date_created,
            status: r.status,
            password: String::new(),
        }
    }
}
