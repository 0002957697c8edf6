//! Field validators for company and student payloads.
//!
//! Student checks run in a fixed order and stop at the first failure, so a
//! payload with several problems always reports the same one.

use chrono::{Datelike, NaiveDate};

use models::{Branch, Category, Status};

use crate::domain::{CompanyInput, NewCompany, NewStudent, StudentInput};
use crate::errors::ServiceError;

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PHONE_LEN: usize = 10;
pub const MAX_PHONE_LEN: usize = 12;
pub const MIN_AGE: i32 = 22;
pub const DOB_FORMAT: &str = "%d/%m/%Y";

pub const NAME_TOO_SHORT: &str = "name should be minimum of three characters long";
pub const BAD_PHONE: &str = "phone number must be 10-12 digit long";
pub const BAD_BRANCH: &str = "this branch is not allowed";
pub const TOO_YOUNG: &str = "age should be greater than 22";
pub const BAD_DOB: &str = "dob must be a valid DD/MM/YYYY date";
pub const BAD_STATUS: &str = "invalid status";
pub const BAD_CATEGORY: &str = "invalid category";
pub const BRANCH_NOT_ELIGIBLE: &str = "invalid branch for this company category";

fn blank(s: &str) -> bool { s.trim().is_empty() }

fn missing(fields: Vec<&str>) -> Result<(), ServiceError> {
    if fields.is_empty() {
        return Ok(());
    }
    Err(ServiceError::MissingParam(fields.into_iter().map(str::to_string).collect()))
}

/// Every absent company field, reported together.
pub fn require_company_fields(input: &CompanyInput) -> Result<(), ServiceError> {
    let mut absent = Vec::new();
    if blank(&input.name) { absent.push("name"); }
    if blank(&input.category) { absent.push("category"); }
    missing(absent)
}

/// Every absent student field, reported together.
pub fn require_student_fields(input: &StudentInput) -> Result<(), ServiceError> {
    let mut absent = Vec::new();
    if blank(&input.name) { absent.push("name"); }
    if blank(&input.phone) { absent.push("phone"); }
    if blank(&input.dob) { absent.push("dob"); }
    if blank(&input.branch) { absent.push("branch"); }
    if input.company.id.is_nil() { absent.push("company id"); }
    if blank(&input.status) { absent.push("status"); }
    missing(absent)
}

pub fn validate_category(raw: &str) -> Result<Category, ServiceError> {
    raw.parse::<Category>().map_err(|_| ServiceError::invalid(BAD_CATEGORY))
}

pub fn validate_company(input: &CompanyInput) -> Result<NewCompany, ServiceError> {
    let category = validate_category(&input.category)?;
    Ok(NewCompany { name: input.name.clone(), category })
}

pub fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.chars().count() < MIN_NAME_LEN {
        return Err(ServiceError::invalid(NAME_TOO_SHORT));
    }
    Ok(())
}

pub fn parse_branch(raw: &str) -> Result<Branch, ServiceError> {
    raw.parse::<Branch>().map_err(|_| ServiceError::invalid(BAD_BRANCH))
}

pub fn parse_dob(raw: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(raw.trim(), DOB_FORMAT).map_err(|_| ServiceError::invalid(BAD_DOB))
}

/// Completed years between `dob` and `today`.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Checks name, phone, branch, age and status, in that order.
///
/// The company reference is carried through untouched; it is resolved by the
/// service before [`validate_branch`] runs.
pub fn validate_student(input: &StudentInput, today: NaiveDate) -> Result<NewStudent, ServiceError> {
    validate_name(&input.name)?;

    let phone_len = input.phone.chars().count();
    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&phone_len) {
        return Err(ServiceError::invalid(BAD_PHONE));
    }

    let branch = parse_branch(&input.branch)?;

    let dob = parse_dob(&input.dob)?;
    if age_on(dob, today) < MIN_AGE {
        return Err(ServiceError::invalid(TOO_YOUNG));
    }

    let status = input.status.parse::<Status>().map_err(|_| ServiceError::invalid(BAD_STATUS))?;

    Ok(NewStudent {
        name: input.name.clone(),
        phone: input.phone.clone(),
        dob: input.dob.trim().to_string(),
        branch,
        company_id: input.company.id,
        status,
    })
}

/// Whether a company of `category` takes students from `branch`.
pub fn branch_allowed(category: Category, branch: Branch) -> bool {
    use Branch::*;
    match category {
        Category::Mass => true,
        Category::Core => matches!(branch, Civil | Mech),
        Category::OpenDream => matches!(branch, Cse | Ise | Ece | Eee),
        Category::DreamIt => matches!(branch, Cse | Ise),
    }
}

pub fn validate_branch(category: Category, branch: Branch) -> Result<(), ServiceError> {
    if !branch_allowed(category, branch) {
        return Err(ServiceError::invalid(BRANCH_NOT_ELIGIBLE));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompanyRef;
    use uuid::Uuid;

    fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 15).unwrap() }

    fn monika() -> StudentInput {
        StudentInput {
            name: "Monika Jaiswal".into(),
            phone: "6388768118".into(),
            dob: "02/07/2000".into(),
            branch: "ECE".into(),
            company: CompanyRef { id: Uuid::new_v4() },
            status: "ACCEPTED".into(),
        }
    }

    fn invalid(reason: &str) -> ServiceError { ServiceError::invalid(reason) }

    #[test]
    fn valid_student_is_converted() {
        let input = monika();
        let err = validate_student(&input, NaiveDate::from_ymd_opt(2022, 7, 1).unwrap()).unwrap_err();
        assert_eq!(err, invalid(TOO_YOUNG));

        let s = validate_student(&input, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()).unwrap();
        assert_eq!(s.branch, Branch::Ece);
        assert_eq!(s.status, Status::Accepted);
        assert_eq!(s.company_id, input.company.id);
        assert_eq!(s.dob, "02/07/2000");
    }

    #[test]
    fn padded_dob_is_stored_trimmed() {
        let input = StudentInput { dob: " 02/07/2000 ".into(), ..monika() };
        let s = validate_student(&input, today()).unwrap();
        assert_eq!(s.dob, "02/07/2000");
    }

    #[test]
    fn first_failure_wins() {
        let mut input = monika();
        input.name = "Mo".into();
        input.phone = "123".into();
        input.branch = "ARTS".into();
        assert_eq!(validate_student(&input, today()), Err(invalid(NAME_TOO_SHORT)));

        input.name = "Mona".into();
        assert_eq!(validate_student(&input, today()), Err(invalid(BAD_PHONE)));

        input.phone = "123456789012".into();
        assert_eq!(validate_student(&input, today()), Err(invalid(BAD_BRANCH)));

        input.branch = "CSE".into();
        input.dob = "01/01/2010".into();
        input.status = "MAYBE".into();
        assert_eq!(validate_student(&input, today()), Err(invalid(TOO_YOUNG)));

        input.dob = "01/01/1990".into();
        assert_eq!(validate_student(&input, today()), Err(invalid(BAD_STATUS)));
    }

    #[test]
    fn phone_length_bounds() {
        let mut input = monika();
        input.dob = "01/01/1990".into();
        for (phone, ok) in [("123456789", false), ("1234567890", true), ("123456789012", true), ("1234567890123", false)] {
            input.phone = phone.into();
            assert_eq!(validate_student(&input, today()).is_ok(), ok, "phone {phone}");
        }
    }

    #[test]
    fn unparseable_dob_fails_at_the_age_step() {
        let mut input = monika();
        input.dob = "2000-07-02".into();
        assert_eq!(validate_student(&input, today()), Err(invalid(BAD_DOB)));
        input.dob = "31/02/1990".into();
        assert_eq!(validate_student(&input, today()), Err(invalid(BAD_DOB)));
    }

    #[test]
    fn age_counts_completed_years() {
        let dob = NaiveDate::from_ymd_opt(2002, 6, 16).unwrap();
        assert_eq!(age_on(dob, today()), 21);
        let dob = NaiveDate::from_ymd_opt(2002, 6, 15).unwrap();
        assert_eq!(age_on(dob, today()), 22);
    }

    #[test]
    fn exactly_twenty_two_is_accepted() {
        let mut input = monika();
        input.dob = "15/06/2002".into();
        assert!(validate_student(&input, today()).is_ok());
        input.dob = "16/06/2002".into();
        assert_eq!(validate_student(&input, today()), Err(invalid(TOO_YOUNG)));
    }

    #[test]
    fn missing_student_fields_are_listed_in_order() {
        let err = require_student_fields(&StudentInput::default()).unwrap_err();
        assert_eq!(err.to_string(), "Missing Parameter: name,phone,dob,branch,company id,status");

        let mut input = monika();
        input.phone = " ".into();
        input.status.clear();
        assert_eq!(
            require_student_fields(&input),
            Err(ServiceError::MissingParam(vec!["phone".into(), "status".into()]))
        );
        assert!(require_student_fields(&monika()).is_ok());
    }

    #[test]
    fn company_fields_and_category() {
        let err = require_company_fields(&CompanyInput::default()).unwrap_err();
        assert_eq!(err.to_string(), "Missing Parameter: name,category");

        let input = CompanyInput { name: "Wipro".into(), category: "mass".into() };
        assert_eq!(validate_company(&input), Err(invalid(BAD_CATEGORY)));
        let input = CompanyInput { name: "Wipro".into(), category: "OPEN DREAM".into() };
        assert_eq!(validate_company(&input).unwrap().category, Category::OpenDream);
    }

    #[test]
    fn branch_category_matrix() {
        for branch in Branch::ALL {
            assert!(validate_branch(Category::Mass, branch).is_ok());
            let core = matches!(branch, Branch::Civil | Branch::Mech);
            assert_eq!(validate_branch(Category::Core, branch).is_ok(), core, "CORE/{}", branch.as_str());
            let dream_it = matches!(branch, Branch::Cse | Branch::Ise);
            assert_eq!(validate_branch(Category::DreamIt, branch).is_ok(), dream_it, "DREAM IT/{}", branch.as_str());
            let open = !matches!(branch, Branch::Civil | Branch::Mech);
            assert_eq!(validate_branch(Category::OpenDream, branch).is_ok(), open, "OPEN DREAM/{}", branch.as_str());
        }
        assert_eq!(validate_branch(Category::Core, Branch::Cse), Err(invalid(BRANCH_NOT_ELIGIBLE)));
    }
}
