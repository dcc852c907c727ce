//! SeaORM entity models
//!
//! Read-only view of the catalog tables used for recommendations

mod dataset;
mod metadata;
mod author;
mod ds_metrics;

pub use dataset::{
    Entity as DatasetEntity,
    Model as DatasetRow,
    Column as DatasetColumn,
    Relation as DatasetRelation,
};

pub use metadata::{
    Entity as MetaDataEntity,
    Model as MetaDataRow,
    Column as MetaDataColumn,
    Relation as MetaDataRelation,
};

pub use author::{
    Entity as AuthorEntity,
    Model as AuthorRow,
    Column as AuthorColumn,
};

pub use ds_metrics::{
    Entity as DsMetricsEntity,
    Model as DsMetricsRow,
    Column as DsMetricsColumn,
};
