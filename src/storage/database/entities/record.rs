use crate::utils::error::{ApiError, Result as ApiResult};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A row of any declared collection
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "records")]
pub struct Model {
    /// Collection (resource) name
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection: String,

    /// Record key, unique within its collection
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Mass-assigned attributes as a JSON object
    #[sea_orm(column_type = "Text")]
    pub data: String,

    /// ID of the user that created the record
    pub created_by: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Decode the stored attributes
    pub fn attributes(&self) -> ApiResult<Map<String, Value>> {
        match serde_json::from_str(&self.data)? {
            Value::Object(map) => Ok(map),
            _ => Err(ApiError::internal(format!(
                "Record {}/{} does not hold an attribute object",
                self.collection, self.id
            ))),
        }
    }
}
