//! Gate DTOs

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CameraInfo, DomainError, Gate, GateFlow, UpdateGateDto};

#[derive(Debug, Serialize, Deserialize, Default, Validate, ToSchema)]
pub struct CameraDto {
    #[validate(length(max = 50))]
    pub camera_id: Option<String>,
    pub camera_type: Option<String>,
    pub model: Option<String>,
    #[validate(length(max = 45))]
    pub ip_address: Option<String>,
    #[validate(length(max = 17))]
    pub mac_address: Option<String>,
    pub manufacturer: Option<String>,
}

impl From<CameraInfo> for CameraDto {
    fn from(c: CameraInfo) -> Self {
        Self {
            camera_id: c.camera_id,
            camera_type: c.camera_type,
            model: c.model,
            ip_address: c.ip_address,
            mac_address: c.mac_address,
            manufacturer: c.manufacturer,
        }
    }
}

impl From<CameraDto> for CameraInfo {
    fn from(c: CameraDto) -> Self {
        Self {
            camera_id: c.camera_id,
            camera_type: c.camera_type,
            model: c.model,
            ip_address: c.ip_address,
            mac_address: c.mac_address,
            manufacturer: c.manufacturer,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GateDto {
    pub gate_id: i32,
    pub customer_id: String,
    pub name: String,
    /// entry, exit or both
    pub flow: String,
    pub description: Option<String>,
    pub cashier_name: Option<String>,
    pub camera: CameraDto,
    pub created_at: DateTime<Utc>,
}

impl From<Gate> for GateDto {
    fn from(g: Gate) -> Self {
        Self {
            gate_id: g.gate_id,
            customer_id: g.customer_id,
            name: g.name,
            flow: g.flow.to_string(),
            description: g.description,
            cashier_name: g.cashier_name,
            camera: g.camera.into(),
            created_at: g.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGateRequest {
    #[validate(length(min = 1, max = 100, message = "gate name is required"))]
    pub name: String,
    #[serde(default = "default_flow")]
    pub flow: String,
    pub description: Option<String>,
    pub cashier_name: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub camera: CameraDto,
}

fn default_flow() -> String {
    "both".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateGateRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub flow: Option<String>,
    pub description: Option<String>,
    pub cashier_name: Option<String>,
    #[validate(nested)]
    pub camera: Option<CameraDto>,
}

impl TryFrom<UpdateGateRequest> for UpdateGateDto {
    type Error = DomainError;

    fn try_from(r: UpdateGateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: r.name,
            flow: r.flow.as_deref().map(GateFlow::from_str).transpose()?,
            description: r.description,
            cashier_name: r.cashier_name,
            camera: r.camera.map(Into::into),
        })
    }
}
