// 登録時のロールは常に USER。昇格はこの crate の操作では行わない
pub struct CreateUser {
    pub user_name: String,
    pub email: Option<String>,
    pub password: String,
}
