//! Dataset metadata entity (`ds_meta_data` table)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ds_meta_data")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    
    pub deposition_id: Option<i32>,
    
    pub title: String,
    
    #[sea_orm(column_type = "Text")]
    pub description: String,
    
    /// Enum name as written by the catalog (e.g. `JOURNAL_ARTICLE`)
    pub publication_type: String,
    
    pub publication_doi: Option<String>,
    
    pub dataset_doi: Option<String>,
    
    /// Comma-separated tag list
    pub tags: Option<String>,
    
    pub ds_metrics_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::author::Entity")]
    Authors,
    
    #[sea_orm(
        belongs_to = "super::ds_metrics::Entity",
        from = "Column::DsMetricsId",
        to = "super::ds_metrics::Column::Id"
    )]
    DsMetrics,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Authors.def()
    }
}

impl Related<super::ds_metrics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DsMetrics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
