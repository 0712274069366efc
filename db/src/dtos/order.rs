pub struct OrderCreateRequest {
    pub user_id: i64,
    pub delivery_address: String,
    pub delivery_option: String,
}
