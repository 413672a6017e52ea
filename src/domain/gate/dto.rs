use super::{CameraInfo, GateFlow};

#[derive(Debug, Clone)]
pub struct CreateGateDto {
    pub customer_id: String,
    pub name: String,
    pub flow: GateFlow,
    pub description: Option<String>,
    pub cashier_name: Option<String>,
    pub camera: CameraInfo,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateGateDto {
    pub name: Option<String>,
    pub flow: Option<GateFlow>,
    pub description: Option<String>,
    pub cashier_name: Option<String>,
    pub camera: Option<CameraInfo>,
}
