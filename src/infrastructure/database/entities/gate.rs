//! Gate entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum GateFlow {
    #[sea_orm(string_value = "entry")]
    Entry,
    #[sea_orm(string_value = "exit")]
    Exit,
    #[sea_orm(string_value = "both")]
    Both,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub gate_id: i32,
    pub customer_id: String,
    /// Unique together with `customer_id`
    pub name: String,
    pub flow: GateFlow,
    pub description: Option<String>,
    pub cashier_name: Option<String>,
    pub camera_id: Option<String>,
    pub camera_type: Option<String>,
    pub camera_model: Option<String>,
    pub camera_ip: Option<String>,
    pub camera_mac: Option<String>,
    pub camera_manufacturer: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId",
        on_delete = "Cascade"
    )]
    Customer,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
