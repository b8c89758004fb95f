use crate::model::{id::UserId, role::Role};
use shared::error::{AppError, AppResult};
pub mod event;

// 操作を行う主体。すべての操作に明示的に渡される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: Option<String>,
    pub role: Role,
    pub is_staff: bool,
}

impl User {
    /// ADMIN ロールとスタッフフラグのどちらか一方でも立っていれば管理者として扱う
    pub fn is_administrative(&self) -> bool {
        self.role == Role::Admin || self.is_staff
    }

    pub fn ensure_administrative(&self, action: &str) -> AppResult<()> {
        if self.is_administrative() {
            Ok(())
        } else {
            Err(AppError::ForbiddenOperation(format!(
                "only administrators may {action}"
            )))
        }
    }

    pub fn owns(&self, requested_by: &ReservationUser) -> bool {
        self.user_id == requested_by.user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationUser {
    pub user_id: UserId,
    pub user_name: String,
    pub email: Option<String>,
}

impl From<&User> for ReservationUser {
    fn from(value: &User) -> Self {
        Self {
            user_id: value.user_id,
            user_name: value.user_name.clone(),
            email: value.email.clone(),
        }
    }
}
