pub struct UserCreateRequest {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
