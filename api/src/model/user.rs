use kernel::model::{id::UserId, role::Role, user::User};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    Admin,
    User,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::User => Self::User,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub user_name: String,
    pub email: Option<String>,
    pub role: RoleName,
    pub is_staff: bool,
    pub is_administrative: bool,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let is_administrative = value.is_administrative();
        let User {
            user_id,
            user_name,
            email,
            role,
            is_staff,
        } = value;
        Self {
            id: user_id,
            user_name,
            email,
            role: role.into(),
            is_staff,
            is_administrative,
        }
    }
}
