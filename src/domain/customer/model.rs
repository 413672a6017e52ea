//! Customer domain entity

use chrono::NaiveDate;

use super::{CreateCustomerDto, UpdateCustomerDto};

/// Organization operating one or more parking lots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Business key, e.g. `EPMS-0001`
    pub customer_id: String,
    pub client_type: Option<String>,
    /// Staff user administering this tenant
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

impl Customer {
    pub fn new(dto: CreateCustomerDto) -> Self {
        Self {
            customer_id: dto.customer_id.trim().to_string(),
            client_type: dto.client_type,
            administrator_id: None,
            company_name: dto.company_name,
            email: dto.email.map(|e| e.trim().to_lowercase()),
            contact: dto.contact,
            address: dto.address,
            geolocation: dto.geolocation,
            country: dto.country,
            comments: dto.comments,
            enrollment_date: dto.enrollment_date,
        }
    }

    /// Merge a partial update; absent fields keep their current value.
    pub fn apply(&mut self, dto: UpdateCustomerDto) {
        if let Some(v) = dto.client_type {
            self.client_type = Some(v);
        }
        if let Some(v) = dto.company_name {
            self.company_name = Some(v);
        }
        if let Some(v) = dto.email {
            self.email = Some(v.trim().to_lowercase());
        }
        if let Some(v) = dto.contact {
            self.contact = Some(v);
        }
        if let Some(v) = dto.address {
            self.address = Some(v);
        }
        if let Some(v) = dto.geolocation {
            self.geolocation = Some(v);
        }
        if let Some(v) = dto.country {
            self.country = Some(v);
        }
        if let Some(v) = dto.comments {
            self.comments = Some(v);
        }
        if let Some(v) = dto.enrollment_date {
            self.enrollment_date = Some(v);
        }
    }

    pub fn display_name(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.customer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreateCustomerDto {
        CreateCustomerDto {
            customer_id: " EPMS-0002 ".into(),
            company_name: None,
            email: Some("Ops@Example.COM".into()),
            ..Default::default()
        }
    }

    #[test]
    fn new_normalizes_key_and_email() {
        let c = Customer::new(dto());
        assert_eq!(c.customer_id, "EPMS-0002");
        assert_eq!(c.email.as_deref(), Some("ops@example.com"));
        assert_eq!(c.administrator_id, None);
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut c = Customer::new(dto());
        assert_eq!(c.display_name(), "EPMS-0002");
        c.apply(UpdateCustomerDto {
            company_name: Some("Harbor Parking".into()),
            ..Default::default()
        });
        assert_eq!(c.display_name(), "Harbor Parking");
    }

    #[test]
    fn apply_keeps_absent_fields() {
        let mut c = Customer::new(dto());
        c.apply(UpdateCustomerDto {
            country: Some("KE".into()),
            ..Default::default()
        });
        assert_eq!(c.country.as_deref(), Some("KE"));
        assert_eq!(c.email.as_deref(), Some("ops@example.com"));
    }
}
