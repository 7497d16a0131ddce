//! Constraint table for the student registration form and the generic
//! validator that interprets it.

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use regex::Regex;
use shared::domain::{Field, Gender, StudentEnrollmentRecord};

use crate::draft::{DraftValue, StudentDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// National identity number, `NNNNN-NNNNNNN-N`.
    Cnic,
}

impl Pattern {
    fn regex(self) -> &'static Regex {
        static CNIC: OnceLock<Regex> = OnceLock::new();
        match self {
            Pattern::Cnic => CNIC.get_or_init(|| {
                Regex::new(r"^\d{5}-\d{7}-\d$").expect("CNIC pattern is a valid regex")
            }),
        }
    }

    pub fn is_match(self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    MinChars(usize),
    MaxChars(usize),
    Matches(Pattern),
    OneOf(&'static [&'static str]),
    Number,
    AtLeast(f64),
    AtMost(f64),
}

impl Check {
    fn passes(self, value: DraftValue<'_>) -> bool {
        match (self, value) {
            (Check::MinChars(min), DraftValue::Text(text)) => text.chars().count() >= min,
            (Check::MaxChars(max), DraftValue::Text(text)) => text.chars().count() <= max,
            (Check::Matches(pattern), DraftValue::Text(text)) => pattern.is_match(text),
            (Check::OneOf(options), DraftValue::Text(text)) => options.contains(&text),
            (Check::Number, DraftValue::Number(number)) => number.is_some(),
            // A missing number is reported by `Check::Number`.
            (Check::AtLeast(min), DraftValue::Number(number)) => number.map_or(true, |n| n >= min),
            (Check::AtMost(max), DraftValue::Number(number)) => number.map_or(true, |n| n <= max),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub check: Check,
    pub message: &'static str,
}

const fn rule(check: Check, message: &'static str) -> Rule {
    Rule { check, message }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: Field,
    /// Evaluated in order; the first failure is the one reported. Empty for optional fields.
    pub rules: &'static [Rule],
}

const GENDERS: &[&str] = &["MALE", "FEMALE", "CUSTOM"];
const GENDER_MESSAGE: &str = "Invalid gender; expected MALE, FEMALE or CUSTOM";

const MOBILE: &[Rule] = &[rule(Check::MinChars(10), "Invalid mobile number")];
const CNIC: &[Rule] = &[rule(Check::Matches(Pattern::Cnic), "Invalid CNIC format")];
const PERCENTAGE: &[Rule] = &[
    rule(Check::Number, "Expected number"),
    rule(Check::AtLeast(0.0), "Number must be greater than or equal to 0"),
    rule(Check::AtMost(100.0), "Number must be less than or equal to 100"),
];

pub static STUDENT_SCHEMA: &[FieldRules] = &[
    FieldRules {
        field: Field::StudentMobile,
        rules: MOBILE,
    },
    FieldRules {
        field: Field::FatherMobile,
        rules: MOBILE,
    },
    FieldRules {
        field: Field::AdmissionNumber,
        rules: &[rule(Check::MinChars(1), "Admission Number is required")],
    },
    FieldRules {
        field: Field::StudentName,
        rules: &[
            rule(Check::MinChars(2), "Name must be at least 2 characters"),
            rule(Check::MaxChars(100), "Name must not exceed 100 characters"),
        ],
    },
    FieldRules {
        field: Field::Gender,
        rules: &[rule(Check::OneOf(GENDERS), GENDER_MESSAGE)],
    },
    FieldRules {
        field: Field::DateOfBirth,
        rules: &[rule(Check::MinChars(1), "Date of Birth is required")],
    },
    FieldRules {
        field: Field::FatherName,
        rules: &[
            rule(Check::MinChars(2), "Father's name must be at least 2 characters"),
            rule(Check::MaxChars(100), "Father's name must not exceed 100 characters"),
        ],
    },
    FieldRules {
        field: Field::StudentCnic,
        rules: CNIC,
    },
    FieldRules {
        field: Field::FatherCnic,
        rules: CNIC,
    },
    FieldRules {
        field: Field::FatherProfession,
        rules: &[rule(Check::MinChars(1), "Father's profession is required")],
    },
    FieldRules {
        field: Field::BloodGroup,
        rules: &[],
    },
    FieldRules {
        field: Field::GuardianName,
        rules: &[],
    },
    FieldRules {
        field: Field::Caste,
        rules: &[rule(Check::MinChars(1), "Caste is required")],
    },
    FieldRules {
        field: Field::RegistrationDate,
        rules: &[rule(Check::MinChars(1), "Registration Date is required")],
    },
    FieldRules {
        field: Field::CurrentAddress,
        rules: &[rule(
            Check::MinChars(5),
            "Current Address must be at least 5 characters",
        )],
    },
    FieldRules {
        field: Field::PermanentAddress,
        rules: &[rule(
            Check::MinChars(5),
            "Permanent Address must be at least 5 characters",
        )],
    },
    FieldRules {
        field: Field::MedicalProblem,
        rules: &[],
    },
    FieldRules {
        field: Field::Discount,
        rules: PERCENTAGE,
    },
    FieldRules {
        field: Field::DiscountByPercent,
        rules: PERCENTAGE,
    },
];

/// Per-field validation messages, ordered by form position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn first(&self) -> Option<(Field, &str)> {
        self.iter().next()
    }

    pub(crate) fn replace(&mut self, field: Field, message: Option<&str>) {
        match message {
            Some(message) => {
                self.0.insert(field, message.to_string());
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Runs `schema` against `draft`, reporting the first failing rule of each field.
pub fn check_draft<'a>(
    draft: &StudentDraft,
    schema: impl IntoIterator<Item = &'a FieldRules>,
) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field_rules in schema {
        let value = draft.get(field_rules.field);
        if let Some(failed) = field_rules
            .rules
            .iter()
            .find(|rule| !rule.check.passes(value))
        {
            errors.insert(field_rules.field, failed.message);
        }
    }
    errors
}

/// Validates the whole draft against [`STUDENT_SCHEMA`]. Pure; never touches the network.
pub fn validate(draft: &StudentDraft) -> Result<StudentEnrollmentRecord, FieldErrors> {
    let errors = check_draft(draft, STUDENT_SCHEMA);
    if !errors.is_empty() {
        return Err(errors);
    }

    let gender: Gender = draft
        .gender
        .parse()
        .map_err(|_| single(Field::Gender, GENDER_MESSAGE))?;
    let discount = draft
        .discount
        .ok_or_else(|| single(Field::Discount, "Expected number"))?;
    let discount_by_percent = draft
        .discount_by_percent
        .ok_or_else(|| single(Field::DiscountByPercent, "Expected number"))?;

    Ok(StudentEnrollmentRecord {
        student_mobile: draft.student_mobile.clone(),
        father_mobile: draft.father_mobile.clone(),
        admission_number: draft.admission_number.clone(),
        student_name: draft.student_name.clone(),
        gender,
        date_of_birth: draft.date_of_birth.clone(),
        father_name: draft.father_name.clone(),
        student_cnic: draft.student_cnic.clone(),
        father_cnic: draft.father_cnic.clone(),
        father_profession: draft.father_profession.clone(),
        blood_group: draft.blood_group.clone(),
        guardian_name: draft.guardian_name.clone(),
        caste: draft.caste.clone(),
        registration_date: draft.registration_date.clone(),
        current_address: draft.current_address.clone(),
        permanent_address: draft.permanent_address.clone(),
        medical_problem: draft.medical_problem.clone(),
        discount,
        discount_by_percent,
    })
}

/// Re-checks a single field, e.g. when an input loses focus.
pub fn check_field(draft: &StudentDraft, field: Field) -> Option<&'static str> {
    let value = draft.get(field);
    STUDENT_SCHEMA
        .iter()
        .filter(|field_rules| field_rules.field == field)
        .flat_map(|field_rules| field_rules.rules.iter())
        .find(|rule| !rule.check.passes(value))
        .map(|rule| rule.message)
}

fn single(field: Field, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.insert(field, message);
    errors
}

#[cfg(test)]
#[path = "tests/schema_tests.rs"]
mod tests;
