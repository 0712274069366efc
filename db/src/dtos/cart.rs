pub struct CartAddRequest {
    pub user_id: i64,
    pub plant_id: i64,
    pub quantity: i64,
}
