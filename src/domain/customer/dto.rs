use chrono::NaiveDate;

#[derive(Debug, Clone, Default)]
pub struct CreateCustomerDto {
    pub customer_id: String,
    pub client_type: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub geolocation: Option<String>,
    pub country: Option<String>,
    pub comments: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerDto {
    pub client_type: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub geolocation: Option<String>,
    pub country: Option<String>,
    pub comments: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}
