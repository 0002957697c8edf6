use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use models::{company, student, student::StudentFields, Branch, Category, Status};

/// A company as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
}

impl From<company::Model> for Company {
    fn from(m: company::Model) -> Self { Self { id: m.id, name: m.name, category: m.category } }
}

/// A student, optionally carrying the company it applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub dob: String,
    pub branch: Branch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    pub status: Status,
}

impl Student {
    pub fn from_model(m: student::Model, company: Option<company::Model>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            phone: m.phone,
            dob: m.dob,
            branch: m.branch,
            company: company.map(Company::from),
            status: m.status,
        }
    }
}

/// Reads an explicit `null` the same as an absent key.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Raw company payload. Fields stay textual until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

/// Reference to a company inside a student payload. Extra fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: Uuid,
}

/// Raw student payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dob: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub branch: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: CompanyRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

/// Validated company values ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub category: Category,
}

/// Validated student values ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub phone: String,
    pub dob: String,
    pub branch: Branch,
    pub company_id: Uuid,
    pub status: Status,
}

impl From<NewStudent> for StudentFields {
    fn from(s: NewStudent) -> Self {
        StudentFields {
            name: s.name,
            phone: s.phone,
            dob: s.dob,
            branch: s.branch,
            company_id: s.company_id,
            status: s.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_payload_tolerates_echoed_company_fields() {
        let raw = r#"{
            "name": "Monika",
            "phone": "9876543210",
            "dob": "01/01/1990",
            "branch": "CSE",
            "company": {"id": "7b4c6f3e-1d2a-4b8e-9c0f-2a3b4c5d6e7f", "name": "Acme", "category": "MASS"},
            "status": "PENDING"
        }"#;
        let input: StudentInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input.company.id.to_string(), "7b4c6f3e-1d2a-4b8e-9c0f-2a3b4c5d6e7f");
        assert_eq!(input.branch, "CSE");
    }

    #[test]
    fn absent_fields_default_to_blank() {
        let input: StudentInput = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_empty());
        assert!(input.company.id.is_nil());
    }

    #[test]
    fn explicit_nulls_read_as_blank() {
        let raw = r#"{"name": null, "phone": "9876543210", "dob": null, "branch": "CSE", "company": null, "status": null}"#;
        let input: StudentInput = serde_json::from_str(raw).unwrap();
        assert!(input.name.is_empty());
        assert!(input.dob.is_empty());
        assert!(input.status.is_empty());
        assert!(input.company.id.is_nil());
        assert_eq!(input.phone, "9876543210");

        let input: StudentInput = serde_json::from_str(r#"{"company": {"id": null}}"#).unwrap();
        assert!(input.company.id.is_nil());

        let input: CompanyInput = serde_json::from_str(r#"{"name": null, "category": "MASS"}"#).unwrap();
        assert_eq!(input, CompanyInput { name: String::new(), category: "MASS".into() });
    }

    #[test]
    fn student_without_company_omits_the_field() {
        let s = Student {
            id: Uuid::nil(),
            name: "Ravi".into(),
            phone: "9876543210".into(),
            dob: "01/01/1990".into(),
            branch: Branch::Mech,
            company: None,
            status: Status::Accepted,
        };
        let v = serde_json::to_value(&s).unwrap();
        assert!(v.get("company").is_none());
        assert_eq!(v["branch"], "MECH");
        assert_eq!(v["status"], "ACCEPTED");
    }
}
