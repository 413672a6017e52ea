//! Gate configuration

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateGateDto, DomainError, DomainResult, Gate, RepositoryProvider, UpdateGateDto,
};

pub struct GateService {
    repos: Arc<dyn RepositoryProvider>,
}

impl GateService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, dto: CreateGateDto) -> DomainResult<Gate> {
        if dto.name.trim().is_empty() {
            return Err(DomainError::Validation("gate name is required".into()));
        }
        let gate = self.repos.gates().create(dto).await?;
        info!(customer_id = %gate.customer_id, gate = %gate.name, flow = %gate.flow, "Gate added");
        Ok(gate)
    }

    pub async fn get(&self, customer_id: &str, gate_id: i32) -> DomainResult<Gate> {
        self.repos
            .gates()
            .find_by_id(customer_id, gate_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Gate", "gate_id", gate_id))
    }

    pub async fn list(&self, customer_id: &str) -> DomainResult<Vec<Gate>> {
        self.repos.gates().find_all(customer_id).await
    }

    pub async fn update(
        &self,
        customer_id: &str,
        gate_id: i32,
        dto: UpdateGateDto,
    ) -> DomainResult<Gate> {
        if matches!(dto.name.as_deref(), Some(n) if n.trim().is_empty()) {
            return Err(DomainError::Validation("gate name is required".into()));
        }
        self.repos.gates().update(customer_id, gate_id, dto).await
    }

    pub async fn delete(&self, customer_id: &str, gate_id: i32) -> DomainResult<()> {
        self.repos.gates().delete(customer_id, gate_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::repos;
    use crate::domain::{CameraInfo, GateFlow};

    fn south() -> CreateGateDto {
        CreateGateDto {
            customer_id: "EPMS-0001".into(),
            name: " SouthGate ".into(),
            flow: GateFlow::Entry,
            description: Some("Main road".into()),
            cashier_name: None,
            camera: CameraInfo::default(),
        }
    }

    #[tokio::test]
    async fn create_trims_name_and_lists() {
        let svc = GateService::new(repos().await);
        let gate = svc.create(south()).await.unwrap();
        assert_eq!(gate.name, "SouthGate");
        assert_eq!(svc.list("EPMS-0001").await.unwrap().len(), 1);
        assert_eq!(svc.get("EPMS-0001", gate.gate_id).await.unwrap().name, "SouthGate");
    }

    #[tokio::test]
    async fn blank_name_is_invalid() {
        let svc = GateService::new(repos().await);
        let mut dto = south();
        dto.name = "   ".into();
        assert!(matches!(svc.create(dto).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn update_changes_flow() {
        let svc = GateService::new(repos().await);
        let gate = svc.create(south()).await.unwrap();
        let updated = svc
            .update(
                "EPMS-0001",
                gate.gate_id,
                UpdateGateDto {
                    flow: Some(GateFlow::Both),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.flow.allows_exit());
    }
}
