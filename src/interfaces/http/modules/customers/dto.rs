//! Customer DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{CreateCustomerDto, Customer, UpdateCustomerDto};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerDto {
    pub customer_id: String,
    /// Company name, or the id when unnamed
    pub display_name: String,
    pub client_type: Option<String>,
    pub administrator_id: Option<i32>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub geolocation: Option<String>,
    pub country: Option<String>,
    pub comments: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            display_name: c.display_name().to_string(),
            customer_id: c.customer_id,
            client_type: c.client_type,
            administrator_id: c.administrator_id,
            company_name: c.company_name,
            email: c.email,
            contact: c.contact,
            address: c.address,
            geolocation: c.geolocation,
            country: c.country,
            comments: c.comments,
            enrollment_date: c.enrollment_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    /// Business key, e.g. `EPMS-0002`
    #[validate(length(min = 1, max = 50, message = "customer id must be 1-50 characters"))]
    pub customer_id: String,
    pub client_type: Option<String>,
    pub company_name: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub geolocation: Option<String>,
    pub country: Option<String>,
    #[validate(length(max = 500))]
    pub comments: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

impl From<CreateCustomerRequest> for CreateCustomerDto {
    fn from(r: CreateCustomerRequest) -> Self {
        Self {
            customer_id: r.customer_id,
            client_type: r.client_type,
            company_name: r.company_name,
            email: r.email,
            contact: r.contact,
            address: r.address,
            geolocation: r.geolocation,
            country: r.country,
            comments: r.comments,
            enrollment_date: r.enrollment_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerRequest {
    pub client_type: Option<String>,
    pub company_name: Option<String>,
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub geolocation: Option<String>,
    pub country: Option<String>,
    #[validate(length(max = 500))]
    pub comments: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

impl From<UpdateCustomerRequest> for UpdateCustomerDto {
    fn from(r: UpdateCustomerRequest) -> Self {
        Self {
            client_type: r.client_type,
            company_name: r.company_name,
            email: r.email,
            contact: r.contact,
            address: r.address,
            geolocation: r.geolocation,
            country: r.country,
            comments: r.comments,
            enrollment_date: r.enrollment_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignAdministratorRequest {
    pub user_id: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCustomersParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
