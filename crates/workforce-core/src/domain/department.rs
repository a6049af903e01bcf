//! Department domain entity and write inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserInfo;
use crate::error::DomainError;

/// Department entity. `department_name` is not unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    pub department_name: String,
    pub category_name: String,
    pub location: String,
    pub salary: f64,
    #[serde(rename = "employeeIDs")]
    pub employee_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// Department with its member ids expanded to public user records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentView {
    pub id: Uuid,
    pub department_name: String,
    pub category_name: String,
    pub location: String,
    pub salary: f64,
    #[serde(rename = "employeeIDs")]
    pub employees: Vec<UserInfo>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl DepartmentView {
    pub fn new(department: Department, employees: Vec<UserInfo>) -> Self {
        Self {
            id: department.id,
            department_name: department.department_name,
            category_name: department.category_name,
            location: department.location,
            salary: department.salary,
            employees,
            created_at: department.created_at,
            modified_at: department.modified_at,
        }
    }
}

/// Salary as sent by clients: a JSON number or a numeric string from a form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Number(f64),
    Text(String),
}

impl SalaryInput {
    /// `Ok(None)` for falsy values (`0`, `""`), which count as missing.
    fn resolve(&self) -> Result<Option<f64>, DomainError> {
        let value = match self {
            SalaryInput::Number(n) => *n,
            SalaryInput::Text(s) if s.trim().is_empty() => return Ok(None),
            SalaryInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::invalid("salary", "must be a number"))?,
        };
        if value == 0.0 {
            return Ok(None);
        }
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::invalid("salary", "must be a positive number"));
        }
        Ok(Some(value))
    }
}

/// Member ids: an array, or a single id which is treated as a one-element list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MemberIds {
    Many(Vec<String>),
    One(String),
}

impl MemberIds {
    fn parse(&self) -> Result<Vec<Uuid>, DomainError> {
        let raw: Vec<&str> = match self {
            MemberIds::Many(ids) => ids.iter().map(String::as_str).collect(),
            MemberIds::One(id) => vec![id.as_str()],
        };
        raw.into_iter()
            .map(|id| {
                workforce_shared::parse_entity_id(id)
                    .ok_or_else(|| DomainError::invalid("employeeIDs", format!("'{}' is not a valid id", id)))
            })
            .collect()
    }
}

/// Create body and partial update patch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    pub department_name: Option<String>,
    pub category_name: Option<String>,
    pub location: Option<String>,
    pub salary: Option<SalaryInput>,
    #[serde(rename = "employeeIDs")]
    pub employee_ids: Option<MemberIds>,
}

impl DepartmentInput {
    /// All four scalar fields must be present and truthy.
    pub fn into_new_department(self) -> Result<Department, DomainError> {
        let department_name = required_text(self.department_name)?;
        let category_name = required_text(self.category_name)?;
        let location = required_text(self.location)?;
        let salary = match &self.salary {
            Some(raw) => raw.resolve()?.ok_or(DomainError::MissingRequiredFields)?,
            None => return Err(DomainError::MissingRequiredFields),
        };
        let employee_ids = match &self.employee_ids {
            Some(ids) => ids.parse()?,
            None => Vec::new(),
        };

        Ok(Department {
            id: workforce_shared::new_id(),
            department_name,
            category_name,
            location,
            salary,
            employee_ids,
            created_at: Utc::now(),
            modified_at: None,
        })
    }

    /// Applies the fields present in the patch. Returns the member list to
    /// resync, which is `Some` only for a non-empty `employeeIDs`.
    pub fn apply_to(self, department: &mut Department) -> Result<Option<Vec<Uuid>>, DomainError> {
        if let Some(name) = self.department_name {
            department.department_name = patched_text("departmentName", name)?;
        }
        if let Some(category) = self.category_name {
            department.category_name = patched_text("categoryName", category)?;
        }
        if let Some(location) = self.location {
            department.location = patched_text("location", location)?;
        }
        if let Some(raw) = &self.salary {
            department.salary = raw
                .resolve()?
                .ok_or_else(|| DomainError::invalid("salary", "must be a positive number"))?;
        }

        let mut resync = None;
        if let Some(ids) = &self.employee_ids {
            let ids = ids.parse()?;
            if !ids.is_empty() {
                resync = Some(ids.clone());
            }
            department.employee_ids = ids;
        }

        department.modified_at = Some(Utc::now());
        Ok(resync)
    }
}

fn required_text(value: Option<String>) -> Result<String, DomainError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(DomainError::MissingRequiredFields)
}

fn patched_text(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.is_empty() {
        return Err(DomainError::invalid(field, "cannot be empty"));
    }
    Ok(value)
}

/// Search criteria. Name is an exact match, location a case-insensitive prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentFilter {
    pub department_name: Option<String>,
    pub location_prefix: Option<String>,
}

impl DepartmentFilter {
    pub fn matches(&self, department: &Department) -> bool {
        let name_ok = self
            .department_name
            .as_deref()
            .map_or(true, |name| department.department_name == name);
        let location_ok = self.location_prefix.as_deref().map_or(true, |prefix| {
            department
                .location
                .to_lowercase()
                .starts_with(&prefix.to_lowercase())
        });
        name_ok && location_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> DepartmentInput {
        serde_json::from_str(json).unwrap()
    }

    fn eng() -> Department {
        input(r#"{"departmentName":"Eng","categoryName":"Tech","location":"Austin","salary":90000}"#)
            .into_new_department()
            .unwrap()
    }

    #[test]
    fn creates_department_from_complete_input() {
        let member = Uuid::new_v4();
        let body = format!(
            r#"{{"departmentName":"Eng","categoryName":"Tech","location":"Austin","salary":90000,"employeeIDs":["{}"]}}"#,
            member
        );
        let department = input(&body).into_new_department().unwrap();
        assert_eq!(department.department_name, "Eng");
        assert_eq!(department.salary, 90000.0);
        assert_eq!(department.employee_ids, vec![member]);
    }

    #[test]
    fn zero_salary_counts_as_missing() {
        let result = input(r#"{"departmentName":"Eng","categoryName":"Tech","location":"Austin","salary":0}"#)
            .into_new_department();
        assert!(matches!(result, Err(DomainError::MissingRequiredFields)));
    }

    #[test]
    fn empty_name_counts_as_missing() {
        let result = input(r#"{"departmentName":"","categoryName":"Tech","location":"Austin","salary":1}"#)
            .into_new_department();
        assert!(matches!(result, Err(DomainError::MissingRequiredFields)));
    }

    #[test]
    fn salary_accepts_numeric_strings_and_rejects_negatives() {
        let from_form = input(r#"{"departmentName":"Eng","categoryName":"Tech","location":"Austin","salary":"120000"}"#)
            .into_new_department()
            .unwrap();
        assert_eq!(from_form.salary, 120000.0);

        let negative = input(r#"{"departmentName":"Eng","categoryName":"Tech","location":"Austin","salary":-5}"#)
            .into_new_department();
        assert!(matches!(negative, Err(DomainError::InvalidField { field: "salary", .. })));

        let garbage = input(r#"{"departmentName":"Eng","categoryName":"Tech","location":"Austin","salary":"lots"}"#)
            .into_new_department();
        assert!(matches!(garbage, Err(DomainError::InvalidField { field: "salary", .. })));
    }

    #[test]
    fn malformed_member_id_is_rejected() {
        let result = input(r#"{"departmentName":"Eng","categoryName":"Tech","location":"Austin","salary":1,"employeeIDs":["nope"]}"#)
            .into_new_department();
        assert!(matches!(result, Err(DomainError::InvalidField { field: "employeeIDs", .. })));
    }

    #[test]
    fn patch_without_members_requests_no_resync() {
        let mut department = eng();
        let resync = input(r#"{"departmentName":"Platform"}"#).apply_to(&mut department).unwrap();
        assert!(resync.is_none());
        assert_eq!(department.department_name, "Platform");
        assert_eq!(department.location, "Austin");
        assert!(department.modified_at.is_some());
    }

    #[test]
    fn patch_with_single_member_id_replaces_list() {
        let mut department = eng();
        department.employee_ids = vec![Uuid::new_v4(), Uuid::new_v4()];
        let member = Uuid::new_v4();
        let resync = input(&format!(r#"{{"employeeIDs":"{}"}}"#, member))
            .apply_to(&mut department)
            .unwrap();
        assert_eq!(resync, Some(vec![member]));
        assert_eq!(department.employee_ids, vec![member]);
    }

    #[test]
    fn patch_with_empty_member_list_clears_without_resync() {
        let mut department = eng();
        department.employee_ids = vec![Uuid::new_v4()];
        let resync = input(r#"{"employeeIDs":[]}"#).apply_to(&mut department).unwrap();
        assert!(resync.is_none());
        assert!(department.employee_ids.is_empty());
    }

    #[test]
    fn patch_rejects_blank_fields_and_zero_salary() {
        let mut department = eng();
        assert!(input(r#"{"location":""}"#).apply_to(&mut department).is_err());
        assert!(input(r#"{"salary":0}"#).apply_to(&mut department).is_err());
        assert!(matches!(
            input(r#"{"salary":""}"#).apply_to(&mut department),
            Err(DomainError::InvalidField { field: "salary", .. })
        ));
        assert_eq!(department.location, "Austin");
        assert_eq!(department.salary, 90000.0);
    }

    #[test]
    fn filter_matches_exact_name_and_location_prefix() {
        let department = eng();
        let by_prefix = DepartmentFilter { department_name: None, location_prefix: Some("aus".into()) };
        assert!(by_prefix.matches(&department));

        let wrong_prefix = DepartmentFilter { department_name: None, location_prefix: Some("tin".into()) };
        assert!(!wrong_prefix.matches(&department));

        let by_name = DepartmentFilter { department_name: Some("eng".into()), location_prefix: None };
        assert!(!by_name.matches(&department));

        assert!(DepartmentFilter::default().matches(&department));
    }

    #[test]
    fn serializes_member_ids_under_wire_key() {
        let json = serde_json::to_value(eng()).unwrap();
        assert!(json.get("employeeIDs").is_some());
        assert_eq!(json["departmentName"], "Eng");
        assert_eq!(json["categoryName"], "Tech");
    }
}
