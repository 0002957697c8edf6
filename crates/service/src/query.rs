//! Composition of student list queries from raw query-string values.

use sea_orm::{ColumnTrait, QueryFilter};

use models::{student, Branch};

use crate::domain::Student;
use crate::errors::ServiceError;
use crate::validation::{parse_branch, validate_name};

pub const BAD_FLAG: &str = "this value is not allowed";

/// Exact-match predicates on the students table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub name: Option<String>,
    pub branch: Option<Branch>,
}

impl StudentFilter {
    /// Narrow `query` by every predicate that is set; an empty filter leaves it untouched.
    pub fn apply<Q: QueryFilter>(&self, query: Q) -> Q {
        let mut query = query;
        if let Some(name) = &self.name {
            query = query.filter(student::Column::Name.eq(name.as_str()));
        }
        if let Some(branch) = self.branch {
            query = query.filter(student::Column::Branch.eq(branch));
        }
        query
    }

    /// In-memory counterpart of [`StudentFilter::apply`].
    pub fn matches(&self, s: &Student) -> bool {
        self.name.as_deref().map_or(true, |n| s.name == n) && self.branch.map_or(true, |b| s.branch == b)
    }
}

fn present(v: Option<&str>) -> Option<&str> { v.filter(|s| !s.is_empty()) }

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    pub filter: StudentFilter,
    pub include_company: bool,
}

impl StudentQuery {
    /// Validate the optional `name`, `branch` and `includeCompany` parameters.
    /// Empty strings are treated as absent.
    pub fn parse(name: Option<&str>, branch: Option<&str>, include_company: Option<&str>) -> Result<Self, ServiceError> {
        let name = match present(name) {
            Some(n) => {
                validate_name(n)?;
                Some(n.to_string())
            }
            None => None,
        };
        let branch = present(branch).map(parse_branch).transpose()?;
        let include_company = match present(include_company) {
            None | Some("false") => false,
            Some("true") => true,
            Some(_) => return Err(ServiceError::invalid(BAD_FLAG)),
        };

        Ok(Self { filter: StudentFilter { name, branch }, include_company })
    }
}
