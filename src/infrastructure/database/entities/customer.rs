//! Customer (tenant) entity

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub customer_id: String,
    pub client_type: Option<String>,
    /// Staff user administering the tenant (not a DB-level foreign key)
    pub administrator_id: Option<i32>,
    pub company_name: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub geolocation: Option<String>,
    pub country: Option<String>,
    pub comments: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user::Entity")]
    Users,
    #[sea_orm(has_many = "super::gate::Entity")]
    Gates,
    #[sea_orm(has_many = "super::tariff::Entity")]
    Tariffs,
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,
    #[sea_orm(has_many = "super::parking_log::Entity")]
    ParkingLogs,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::gate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gates.def()
    }
}

impl Related<super::tariff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tariffs.def()
    }
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl Related<super::parking_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
