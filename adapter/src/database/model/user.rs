use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::AppError;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: Option<String>,
    pub role_name: String,
    pub is_staff: bool,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
            user_id,
            user_name,
            email,
            role_name,
            is_staff,
        } = value;
        Ok(User {
            user_id,
            user_name,
            email,
            role: Role::from_str(&role_name)
                .map_err(|e| AppError::ConversionEntityError(e.to_string()))?,
            is_staff,
        })
    }
}

// ログイン時のパスワード照合に使う
#[derive(sqlx::FromRow)]
pub struct UserCredentialRow {
    pub user_id: UserId,
    pub password_hash: String,
}
