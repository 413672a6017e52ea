//! Tariff entity: duration bucket → flat cost

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tariffs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tariff_id: Uuid,
    pub customer_id: String,
    /// Inclusive lower bound of the stay, minutes
    pub from_minutes: i64,
    /// Inclusive upper bound of the stay, minutes
    pub to_minutes: i64,
    /// Flat cost in minor currency units
    pub cost: i64,
    pub initiated_by: Option<String>,
    pub date: NaiveDate,
    pub last_update: Option<NaiveDate>,
    pub update_log: Option<String>,
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
