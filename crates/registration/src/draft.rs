//! Editable, unvalidated form state.

use serde::{Deserialize, Serialize};
use shared::domain::{Field, FieldKind, Gender};

/// Raw value coming from a form input.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Borrowed view of one draft slot, as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DraftValue<'a> {
    Text(&'a str),
    /// `None` when the operator typed something that is not a number.
    Number(Option<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentDraft {
    pub student_mobile: String,
    pub father_mobile: String,
    pub admission_number: String,
    pub student_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub father_name: String,
    #[serde(rename = "studentCNIC")]
    pub student_cnic: String,
    #[serde(rename = "fatherCNIC")]
    pub father_cnic: String,
    pub father_profession: String,
    pub blood_group: String,
    pub guardian_name: String,
    pub caste: String,
    pub registration_date: String,
    pub current_address: String,
    pub permanent_address: String,
    pub medical_problem: String,
    pub discount: Option<f64>,
    #[serde(alias = "discountbypercent")]
    pub discount_by_percent: Option<f64>,
}

impl Default for StudentDraft {
    fn default() -> Self {
        Self {
            student_mobile: String::new(),
            father_mobile: String::new(),
            admission_number: String::new(),
            student_name: String::new(),
            gender: Gender::default().as_str().to_string(),
            date_of_birth: String::new(),
            father_name: String::new(),
            student_cnic: String::new(),
            father_cnic: String::new(),
            father_profession: String::new(),
            blood_group: String::new(),
            guardian_name: String::new(),
            caste: String::new(),
            registration_date: String::new(),
            current_address: String::new(),
            permanent_address: String::new(),
            medical_problem: String::new(),
            discount: Some(0.0),
            discount_by_percent: Some(0.0),
        }
    }
}

impl StudentDraft {
    pub fn get(&self, field: Field) -> DraftValue<'_> {
        match field {
            Field::Discount => DraftValue::Number(self.discount),
            Field::DiscountByPercent => DraftValue::Number(self.discount_by_percent),
            text => DraftValue::Text(self.text(text).unwrap_or_default()),
        }
    }

    /// Stores a raw input value. Text typed into a numeric field is parsed;
    /// anything unparsable or non-finite is kept as "not a number".
    pub fn set(&mut self, field: Field, value: FieldValue) {
        match field.kind() {
            FieldKind::Number => {
                let parsed = match value {
                    FieldValue::Number(n) => Some(n),
                    FieldValue::Text(raw) => raw.trim().parse::<f64>().ok(),
                }
                .filter(|n| n.is_finite());
                if let Some(slot) = self.number_mut(field) {
                    *slot = parsed;
                }
            }
            FieldKind::Text | FieldKind::Choice => {
                let text = match value {
                    FieldValue::Text(raw) => raw,
                    FieldValue::Number(n) => n.to_string(),
                };
                if let Some(slot) = self.text_mut(field) {
                    *slot = text;
                }
            }
        }
    }

    fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::StudentMobile => &self.student_mobile,
            Field::FatherMobile => &self.father_mobile,
            Field::AdmissionNumber => &self.admission_number,
            Field::StudentName => &self.student_name,
            Field::Gender => &self.gender,
            Field::DateOfBirth => &self.date_of_birth,
            Field::FatherName => &self.father_name,
            Field::StudentCnic => &self.student_cnic,
            Field::FatherCnic => &self.father_cnic,
            Field::FatherProfession => &self.father_profession,
            Field::BloodGroup => &self.blood_group,
            Field::GuardianName => &self.guardian_name,
            Field::Caste => &self.caste,
            Field::RegistrationDate => &self.registration_date,
            Field::CurrentAddress => &self.current_address,
            Field::PermanentAddress => &self.permanent_address,
            Field::MedicalProblem => &self.medical_problem,
            Field::Discount | Field::DiscountByPercent => return None,
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let slot = match field {
            Field::StudentMobile => &mut self.student_mobile,
            Field::FatherMobile => &mut self.father_mobile,
            Field::AdmissionNumber => &mut self.admission_number,
            Field::StudentName => &mut self.student_name,
            Field::Gender => &mut self.gender,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::FatherName => &mut self.father_name,
            Field::StudentCnic => &mut self.student_cnic,
            Field::FatherCnic => &mut self.father_cnic,
            Field::FatherProfession => &mut self.father_profession,
            Field::BloodGroup => &mut self.blood_group,
            Field::GuardianName => &mut self.guardian_name,
            Field::Caste => &mut self.caste,
            Field::RegistrationDate => &mut self.registration_date,
            Field::CurrentAddress => &mut self.current_address,
            Field::PermanentAddress => &mut self.permanent_address,
            Field::MedicalProblem => &mut self.medical_problem,
            Field::Discount | Field::DiscountByPercent => return None,
        };
        Some(slot)
    }

    fn number_mut(&mut self, field: Field) -> Option<&mut Option<f64>> {
        match field {
            Field::Discount => Some(&mut self.discount),
            Field::DiscountByPercent => Some(&mut self.discount_by_percent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_draft_matches_form_defaults() {
        let draft = StudentDraft::default();
        assert_eq!(draft.gender, "CUSTOM");
        assert_eq!(draft.discount, Some(0.0));
        assert_eq!(draft.discount_by_percent, Some(0.0));
        assert!(draft.student_name.is_empty());
        assert!(draft.blood_group.is_empty());
    }

    #[test]
    fn numeric_fields_parse_typed_text() {
        let mut draft = StudentDraft::default();
        draft.set(Field::Discount, FieldValue::from(" 12.5 "));
        assert_eq!(draft.get(Field::Discount), DraftValue::Number(Some(12.5)));

        draft.set(Field::DiscountByPercent, FieldValue::from("ten"));
        assert_eq!(draft.get(Field::DiscountByPercent), DraftValue::Number(None));

        draft.set(Field::DiscountByPercent, FieldValue::Number(f64::NAN));
        assert_eq!(draft.discount_by_percent, None);
    }

    #[test]
    fn numbers_written_to_text_fields_are_formatted() {
        let mut draft = StudentDraft::default();
        draft.set(Field::AdmissionNumber, FieldValue::Number(1024.0));
        assert_eq!(draft.get(Field::AdmissionNumber), DraftValue::Text("1024"));
    }

    #[test]
    fn deserializes_partial_draft_with_defaults() {
        let draft: StudentDraft = serde_json::from_str(
            r#"{"studentName":"Ali","studentCNIC":"12345-1234567-1","discountbypercent":15}"#,
        )
        .expect("draft json");
        assert_eq!(draft.student_name, "Ali");
        assert_eq!(draft.student_cnic, "12345-1234567-1");
        assert_eq!(draft.discount_by_percent, Some(15.0));
        assert_eq!(draft.discount, Some(0.0));
        assert_eq!(draft.gender, "CUSTOM");
    }
}
