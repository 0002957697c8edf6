use std::str::FromStr;

use sea_orm::{entity::prelude::*, DatabaseConnection, DbErr, Set};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::{errors::ModelError, student};

/// Company classification. Constrains which student branches a company accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Category {
    #[sea_orm(string_value = "MASS")]
    #[serde(rename = "MASS")]
    Mass,
    #[sea_orm(string_value = "DREAM IT")]
    #[serde(rename = "DREAM IT")]
    DreamIt,
    #[sea_orm(string_value = "OPEN DREAM")]
    #[serde(rename = "OPEN DREAM")]
    OpenDream,
    #[sea_orm(string_value = "CORE")]
    #[serde(rename = "CORE")]
    Core,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mass => "MASS",
            Category::DreamIt => "DREAM IT",
            Category::OpenDream => "OPEN DREAM",
            Category::Core => "CORE",
        }
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MASS" => Ok(Category::Mass),
            "DREAM IT" => Ok(Category::DreamIt),
            "OPEN DREAM" => Ok(Category::OpenDream),
            "CORE" => Ok(Category::Core),
            other => Err(ModelError::Validation(format!("unknown category: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: Category,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Students }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Students => Entity::has_many(student::Entity).into() }
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef { Relation::Students.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() { return Err(ModelError::Validation("name required".into())); }
    Ok(())
}

/// Insert a company under a freshly generated id.
pub async fn create(db: &DatabaseConnection, name: &str, category: Category) -> Result<Model, ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        category: Set(category),
    };
    am.insert(db).await.map_err(|e| {
        error!(error = %e, "company insert failed");
        ModelError::Db("server error".into())
    })
}

/// Full-replace update of an existing company.
pub async fn update(db: &DatabaseConnection, id: Uuid, name: &str, category: Category) -> Result<Model, ModelError> {
    validate_name(name)?;
    let am = ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        category: Set(category),
    };
    am.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => ModelError::id_not_found(id),
        other => ModelError::Db(other.to_string()),
    })
}

pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ModelError::id_not_found(id));
    }
    Ok(())
}
