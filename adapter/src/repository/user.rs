use crate::database::{map_write_error, model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::UserId,
        role::Role,
        user::{event::CreateUser, User},
    },
    repository::user::UserRepository,
};
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, user_name, email, role_name, is_staff
                FROM users
                WHERE user_id = $1;
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let hashed_password = hash_password(event.password).await?;
        let role = Role::User;
        // 空文字のメールアドレスは未登録として扱う
        let email = event.email.filter(|e| !e.trim().is_empty());

        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash, role_name, is_staff)
                VALUES ($1, $2, $3, $4, $5, FALSE);
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&email)
        .bind(&hashed_password)
        .bind(role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(map_write_error("that user name is already taken"))?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user has been created".into(),
            ));
        }

        Ok(User {
            user_id,
            user_name: event.user_name,
            email,
            role,
            is_staff: false,
        })
    }
}

// bcrypt は重い処理のため、非同期ランタイムのワーカーを塞がないよう別スレッドで実行する
async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::BlockingTaskError(e.to_string()))?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn password_hash_verifies_only_the_original_password() {
        let hashed = hash_password("passw0rd!".into()).await.unwrap();
        assert_ne!(hashed, "passw0rd!");
        assert!(bcrypt::verify("passw0rd!", &hashed).unwrap());
        assert!(!bcrypt::verify("passw0rd?", &hashed).unwrap());
    }
}
