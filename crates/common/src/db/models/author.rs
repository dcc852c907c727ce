//! Author entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    
    pub name: String,
    
    pub affiliation: Option<String>,
    
    pub orcid: Option<String>,
    
    pub ds_meta_data_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::metadata::Entity",
        from = "Column::DsMetaDataId",
        to = "super::metadata::Column::Id",
        on_delete = "Cascade"
    )]
    DsMetaData,
}

impl Related<super::metadata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DsMetaData.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
