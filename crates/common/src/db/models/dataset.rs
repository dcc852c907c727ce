//! Dataset entity (`data_set` table)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "data_set")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    
    /// Owning user
    pub user_id: i32,
    
    pub ds_meta_data_id: i32,
    
    /// Stored without timezone, always UTC
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::metadata::Entity",
        from = "Column::DsMetaDataId",
        to = "super::metadata::Column::Id"
    )]
    DsMetaData,
}

impl Related<super::metadata::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DsMetaData.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
