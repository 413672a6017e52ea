//! SeaORM implementation of GateRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::{conflict_or_db_err, db_err};
use crate::domain::{
    CameraInfo, CreateGateDto, DomainError, DomainResult, Gate, GateFlow, GateRepository,
    UpdateGateDto,
};
use crate::infrastructure::database::entities::gate;

// ── Conversion helpers ──────────────────────────────────────────

fn flow_to_entity(flow: GateFlow) -> gate::GateFlow {
    match flow {
        GateFlow::Entry => gate::GateFlow::Entry,
        GateFlow::Exit => gate::GateFlow::Exit,
        GateFlow::Both => gate::GateFlow::Both,
    }
}

fn flow_to_domain(flow: gate::GateFlow) -> GateFlow {
    match flow {
        gate::GateFlow::Entry => GateFlow::Entry,
        gate::GateFlow::Exit => GateFlow::Exit,
        gate::GateFlow::Both => GateFlow::Both,
    }
}

fn entity_to_domain(m: gate::Model) -> Gate {
    Gate {
        gate_id: m.gate_id,
        customer_id: m.customer_id,
        name: m.name,
        flow: flow_to_domain(m.flow),
        description: m.description,
        cashier_name: m.cashier_name,
        camera: CameraInfo {
            camera_id: m.camera_id,
            camera_type: m.camera_type,
            model: m.camera_model,
            ip_address: m.camera_ip,
            mac_address: m.camera_mac,
            manufacturer: m.camera_manufacturer,
        },
        created_at: m.created_at,
    }
}

fn set_camera(active: &mut gate::ActiveModel, camera: CameraInfo) {
    active.camera_id = Set(camera.camera_id);
    active.camera_type = Set(camera.camera_type);
    active.camera_model = Set(camera.model);
    active.camera_ip = Set(camera.ip_address);
    active.camera_mac = Set(camera.mac_address);
    active.camera_manufacturer = Set(camera.manufacturer);
}

// ── SeaOrmGateRepository ────────────────────────────────────────

pub struct SeaOrmGateRepository {
    db: DatabaseConnection,
}

impl SeaOrmGateRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, customer_id: &str, gate_id: i32) -> DomainResult<Option<gate::Model>> {
        gate::Entity::find_by_id(gate_id)
            .filter(gate::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl GateRepository for SeaOrmGateRepository {
    async fn create(&self, dto: CreateGateDto) -> DomainResult<Gate> {
        let name = dto.name.trim().to_string();
        let mut active = gate::ActiveModel {
            gate_id: NotSet,
            customer_id: Set(dto.customer_id),
            name: Set(name.clone()),
            flow: Set(flow_to_entity(dto.flow)),
            description: Set(dto.description),
            cashier_name: Set(dto.cashier_name),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        set_camera(&mut active, dto.camera);

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db_err(e, || format!("Gate {} already exists", name)))?;
        info!("Gate created: {} ({})", model.name, model.gate_id);
        Ok(entity_to_domain(model))
    }

    async fn find_by_id(&self, customer_id: &str, gate_id: i32) -> DomainResult<Option<Gate>> {
        Ok(self
            .find_model(customer_id, gate_id)
            .await?
            .map(entity_to_domain))
    }

    async fn find_by_name(&self, customer_id: &str, name: &str) -> DomainResult<Option<Gate>> {
        let model = gate::Entity::find()
            .filter(gate::Column::CustomerId.eq(customer_id))
            .filter(gate::Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self, customer_id: &str) -> DomainResult<Vec<Gate>> {
        let models = gate::Entity::find()
            .filter(gate::Column::CustomerId.eq(customer_id))
            .order_by_asc(gate::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn update(
        &self,
        customer_id: &str,
        gate_id: i32,
        dto: UpdateGateDto,
    ) -> DomainResult<Gate> {
        let Some(existing) = self.find_model(customer_id, gate_id).await? else {
            return Err(DomainError::not_found("Gate", "gate_id", gate_id));
        };

        let mut active: gate::ActiveModel = existing.clone().into();
        let mut new_name = existing.name.clone();
        if let Some(name) = dto.name {
            new_name = name.trim().to_string();
            active.name = Set(new_name.clone());
        }
        if let Some(flow) = dto.flow {
            active.flow = Set(flow_to_entity(flow));
        }
        if let Some(description) = dto.description {
            active.description = Set(Some(description));
        }
        if let Some(cashier) = dto.cashier_name {
            active.cashier_name = Set(Some(cashier));
        }
        if let Some(camera) = dto.camera {
            set_camera(&mut active, camera);
        }

        if !active.is_changed() {
            return Ok(entity_to_domain(existing));
        }
        let model = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_db_err(e, || format!("Gate {} already exists", new_name)))?;
        Ok(entity_to_domain(model))
    }

    async fn delete(&self, customer_id: &str, gate_id: i32) -> DomainResult<()> {
        let result = gate::Entity::delete_many()
            .filter(gate::Column::CustomerId.eq(customer_id))
            .filter(gate::Column::GateId.eq(gate_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Gate", "gate_id", gate_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::seed_customer;
    use crate::infrastructure::database::test_database;

    fn dto(customer: &str, name: &str, flow: GateFlow) -> CreateGateDto {
        CreateGateDto {
            customer_id: customer.into(),
            name: name.into(),
            flow,
            description: None,
            cashier_name: Some("Otieno".into()),
            camera: CameraInfo {
                camera_id: Some("CAM-1".into()),
                manufacturer: Some("Hikvision".into()),
                ..Default::default()
            },
        }
    }

    async fn repo() -> SeaOrmGateRepository {
        let db = test_database().await;
        seed_customer(&db, "EPMS-0001").await;
        seed_customer(&db, "EPMS-0002").await;
        SeaOrmGateRepository::new(db)
    }

    #[tokio::test]
    async fn create_keeps_camera_metadata() {
        let repo = repo().await;
        let gate = repo
            .create(dto("EPMS-0001", "SouthGate", GateFlow::Entry))
            .await
            .unwrap();
        let found = repo
            .find_by_name("EPMS-0001", "SouthGate")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.gate_id, gate.gate_id);
        assert_eq!(found.flow, GateFlow::Entry);
        assert_eq!(found.camera.manufacturer.as_deref(), Some("Hikvision"));
    }

    #[tokio::test]
    async fn names_are_unique_per_tenant_only() {
        let repo = repo().await;
        repo.create(dto("EPMS-0001", "SouthGate", GateFlow::Entry))
            .await
            .unwrap();
        let err = repo
            .create(dto("EPMS-0001", "SouthGate", GateFlow::Exit))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        repo.create(dto("EPMS-0002", "SouthGate", GateFlow::Both))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rename_collision_is_conflict() {
        let repo = repo().await;
        repo.create(dto("EPMS-0001", "SouthGate", GateFlow::Entry))
            .await
            .unwrap();
        let north = repo
            .create(dto("EPMS-0001", "NorthGate", GateFlow::Exit))
            .await
            .unwrap();
        let err = repo
            .update(
                "EPMS-0001",
                north.gate_id,
                UpdateGateDto {
                    name: Some("SouthGate".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn other_tenants_cannot_see_or_delete() {
        let repo = repo().await;
        let gate = repo
            .create(dto("EPMS-0001", "SouthGate", GateFlow::Entry))
            .await
            .unwrap();
        assert!(repo.find_by_id("EPMS-0002", gate.gate_id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete("EPMS-0002", gate.gate_id).await,
            Err(DomainError::NotFound { .. })
        ));
        repo.delete("EPMS-0001", gate.gate_id).await.unwrap();
        assert!(repo.find_all("EPMS-0001").await.unwrap().is_empty());
    }
}
