#[derive(Debug, Clone)]
pub struct CreateTariffDto {
    pub customer_id: String,
    pub from_minutes: i64,
    pub to_minutes: i64,
    /// Flat cost in minor currency units
    pub cost: i64,
    pub initiated_by: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTariffDto {
    pub from_minutes: Option<i64>,
    pub to_minutes: Option<i64>,
    pub cost: Option<i64>,
    pub updated_by: Option<String>,
}
