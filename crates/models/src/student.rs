use std::str::FromStr;

use sea_orm::{entity::prelude::*, DatabaseConnection, DbErr, Set};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::{company, errors::ModelError};

/// A student's field of study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum Branch {
    #[sea_orm(string_value = "CSE")]
    #[serde(rename = "CSE")]
    Cse,
    #[sea_orm(string_value = "ISE")]
    #[serde(rename = "ISE")]
    Ise,
    #[sea_orm(string_value = "MECH")]
    #[serde(rename = "MECH")]
    Mech,
    #[sea_orm(string_value = "ECE")]
    #[serde(rename = "ECE")]
    Ece,
    #[sea_orm(string_value = "EEE")]
    #[serde(rename = "EEE")]
    Eee,
    #[sea_orm(string_value = "CIVIL")]
    #[serde(rename = "CIVIL")]
    Civil,
}

impl Branch {
    pub const ALL: [Branch; 6] = [Branch::Cse, Branch::Ise, Branch::Mech, Branch::Ece, Branch::Eee, Branch::Civil];

    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Cse => "CSE",
            Branch::Ise => "ISE",
            Branch::Mech => "MECH",
            Branch::Ece => "ECE",
            Branch::Eee => "EEE",
            Branch::Civil => "CIVIL",
        }
    }
}

impl FromStr for Branch {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Branch::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| ModelError::Validation(format!("unknown branch: {s}")))
    }
}

/// Placement status of a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "ACCEPTED")]
    #[serde(rename = "ACCEPTED")]
    Accepted,
    #[sea_orm(string_value = "REJECTED")]
    #[serde(rename = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "PENDING")]
    #[serde(rename = "PENDING")]
    Pending,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Accepted => "ACCEPTED",
            Status::Rejected => "REJECTED",
            Status::Pending => "PENDING",
        }
    }
}

impl FromStr for Status {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACCEPTED" => Ok(Status::Accepted),
            "REJECTED" => Ok(Status::Rejected),
            "PENDING" => Ok(Status::Pending),
            other => Err(ModelError::Validation(format!("unknown status: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    /// `DD/MM/YYYY`, stored as submitted
    pub dob: String,
    pub branch: Branch,
    pub company_id: Uuid,
    pub status: Status,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values written on create and update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub phone: String,
    pub dob: String,
    pub branch: Branch,
    pub company_id: Uuid,
    pub status: Status,
}

impl StudentFields {
    fn into_active_model(self, id: Uuid) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            name: Set(self.name),
            phone: Set(self.phone),
            dob: Set(self.dob),
            branch: Set(self.branch),
            company_id: Set(self.company_id),
            status: Set(self.status),
        }
    }
}

/// Insert a student under a freshly generated id.
pub async fn create(db: &DatabaseConnection, fields: StudentFields) -> Result<Model, ModelError> {
    fields
        .into_active_model(Uuid::new_v4())
        .insert(db)
        .await
        .map_err(|e| {
            error!(error = %e, "student insert failed");
            ModelError::Db("server error".into())
        })
}

/// Full-replace update of an existing student.
pub async fn update(db: &DatabaseConnection, id: Uuid, fields: StudentFields) -> Result<Model, ModelError> {
    fields.into_active_model(id).update(db).await.map_err(|e| match e {
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
