use garde::Validate;
use kernel::model::{
    auth::AccessToken,
    id::UserId,
    user::event::CreateUser,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[garde(length(chars, min = 1, max = 150))]
    pub user_name: String,
    #[garde(email)]
    pub email: Option<String>,
    #[garde(length(min = 8))]
    pub password: String,
}

impl From<RegisterRequest> for CreateUser {
    fn from(value: RegisterRequest) -> Self {
        let RegisterRequest {
            user_name,
            email,
            password,
        } = value;
        CreateUser {
            user_name,
            email,
            password,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub user_name: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub user_id: UserId,
    pub access_token: String,
}

impl AccessTokenResponse {
    pub fn new(user_id: UserId, access_token: AccessToken) -> Self {
        Self {
            user_id,
            access_token: access_token.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice", Some("alice@example.com"), "passw0rd!", true)]
    #[case("alice", None, "passw0rd!", true)]
    #[case("", None, "passw0rd!", false)]
    #[case("alice", Some("not-an-email"), "passw0rd!", false)]
    #[case("alice", None, "short", false)]
    fn registration_is_validated(
        #[case] user_name: &str,
        #[case] email: Option<&str>,
        #[case] password: &str,
        #[case] valid: bool,
    ) {
        let req = RegisterRequest {
            user_name: user_name.into(),
            email: email.map(String::from),
            password: password.into(),
        };
        assert_eq!(req.validate(&()).is_ok(), valid);
    }
}
