//! Dataset metrics entity
//!
//! Counts are text columns in the catalog schema; they are parsed when the
//! row is turned into a [`crate::catalog::Metrics`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ds_metrics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    
    pub number_of_models: Option<String>,
    
    pub number_of_features: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::metadata::Entity")]
    DsMetaData,
}

impl Related<super::metadata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DsMetaData.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
