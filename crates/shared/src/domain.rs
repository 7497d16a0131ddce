use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identity of one registration form instance; replies from the backend worker
/// are routed back by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(pub Uuid);

impl FormId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Custom,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown gender '{0}'")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| UnknownGender(s.to_string()))
    }
}

/// The two collapsible groups of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Academic,
    Personal,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Academic => "Academic Data",
            Section::Personal => "Personal Data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Choice,
    Number,
}

/// Every input of the student registration form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    AdmissionNumber,
    RegistrationDate,
    Discount,
    DiscountByPercent,
    StudentName,
    Gender,
    DateOfBirth,
    StudentMobile,
    FatherName,
    FatherMobile,
    StudentCnic,
    FatherCnic,
    FatherProfession,
    BloodGroup,
    GuardianName,
    Caste,
    CurrentAddress,
    PermanentAddress,
    MedicalProblem,
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::AdmissionNumber,
        Field::RegistrationDate,
        Field::Discount,
        Field::DiscountByPercent,
        Field::StudentName,
        Field::Gender,
        Field::DateOfBirth,
        Field::StudentMobile,
        Field::FatherName,
        Field::FatherMobile,
        Field::StudentCnic,
        Field::FatherCnic,
        Field::FatherProfession,
        Field::BloodGroup,
        Field::GuardianName,
        Field::Caste,
        Field::CurrentAddress,
        Field::PermanentAddress,
        Field::MedicalProblem,
    ];

    /// Name used by form inputs and draft files.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::AdmissionNumber => "admissionNumber",
            Field::RegistrationDate => "registrationDate",
            Field::Discount => "discount",
            Field::DiscountByPercent => "discountByPercent",
            Field::StudentName => "studentName",
            Field::Gender => "gender",
            Field::DateOfBirth => "dateOfBirth",
            Field::StudentMobile => "studentMobile",
            Field::FatherName => "fatherName",
            Field::FatherMobile => "fatherMobile",
            Field::StudentCnic => "studentCNIC",
            Field::FatherCnic => "fatherCNIC",
            Field::FatherProfession => "fatherProfession",
            Field::BloodGroup => "bloodGroup",
            Field::GuardianName => "guardianName",
            Field::Caste => "caste",
            Field::CurrentAddress => "currentAddress",
            Field::PermanentAddress => "permanentAddress",
            Field::MedicalProblem => "medicalProblem",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::AdmissionNumber => "Admission Number",
            Field::RegistrationDate => "Registration Date",
            Field::Discount => "Discount",
            Field::DiscountByPercent => "Discount by Percent",
            Field::StudentName => "Student Name",
            Field::Gender => "Gender",
            Field::DateOfBirth => "Date of Birth",
            Field::StudentMobile => "Student Mobile",
            Field::FatherName => "Father Name",
            Field::FatherMobile => "Father Mobile",
            Field::StudentCnic => "Student CNIC",
            Field::FatherCnic => "Father CNIC",
            Field::FatherProfession => "Father Profession",
            Field::BloodGroup => "Blood Group",
            Field::GuardianName => "Guardian Name",
            Field::Caste => "Caste",
            Field::CurrentAddress => "Current Address",
            Field::PermanentAddress => "Permanent Address",
            Field::MedicalProblem => "Medical Problem",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Gender => FieldKind::Choice,
            Field::Discount | Field::DiscountByPercent => FieldKind::Number,
            _ => FieldKind::Text,
        }
    }

    pub fn section(self) -> Section {
        match self {
            Field::AdmissionNumber
            | Field::RegistrationDate
            | Field::Discount
            | Field::DiscountByPercent => Section::Academic,
            _ => Section::Personal,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The remote procedure spells the percent discount in lower case.
        if s == "discountbypercent" {
            return Ok(Field::DiscountByPercent);
        }
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A validated student enrollment, as accepted by the create-student procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEnrollmentRecord {
    pub student_mobile: String,
    pub father_mobile: String,
    pub admission_number: String,
    pub student_name: String,
    pub gender: Gender,
    pub date_of_birth: String,
    pub father_name: String,
    #[serde(rename = "studentCNIC")]
    pub student_cnic: String,
    #[serde(rename = "fatherCNIC")]
    pub father_cnic: String,
    pub father_profession: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub guardian_name: String,
    pub caste: String,
    pub registration_date: String,
    pub current_address: String,
    pub permanent_address: String,
    #[serde(default)]
    pub medical_problem: String,
    pub discount: f64,
    #[serde(rename = "discountbypercent", alias = "discountByPercent")]
    pub discount_by_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
        assert_eq!("discountbypercent".parse::<Field>(), Ok(Field::DiscountByPercent));
        assert!("studentCnic".parse::<Field>().is_err());
    }

    #[test]
    fn gender_parsing_is_exact() {
        assert_eq!("MALE".parse::<Gender>(), Ok(Gender::Male));
        assert!("male".parse::<Gender>().is_err());
        assert_eq!(Gender::default(), Gender::Custom);
    }

    #[test]
    fn record_uses_procedure_field_names() {
        let record = StudentEnrollmentRecord {
            student_mobile: "03123456789".into(),
            father_mobile: "03001234567".into(),
            admission_number: "ADM-1".into(),
            student_name: "Ali".into(),
            gender: Gender::Male,
            date_of_birth: "2013-01-01".into(),
            father_name: "Aslam".into(),
            student_cnic: "12345-1234567-1".into(),
            father_cnic: "12345-7654321-1".into(),
            father_profession: "Farmer".into(),
            blood_group: "O+".into(),
            guardian_name: String::new(),
            caste: "Jat".into(),
            registration_date: "2024-08-01".into(),
            current_address: "Main Bazaar".into(),
            permanent_address: "Main Bazaar".into(),
            medical_problem: String::new(),
            discount: 5.0,
            discount_by_percent: 0.0,
        };
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["studentCNIC"], "12345-1234567-1");
        assert_eq!(value["fatherCNIC"], "12345-7654321-1");
        assert_eq!(value["gender"], "MALE");
        assert_eq!(value["discountbypercent"], 0.0);
        assert!(value.get("discountByPercent").is_none());
        assert_eq!(value["bloodGroup"], "O+");
    }
}
