use crate::draft::StudentDraft;

pub fn valid_draft() -> StudentDraft {
    StudentDraft {
        student_mobile: "03123456789".to_string(),
        father_mobile: "03001234567".to_string(),
        admission_number: "ADM-2024-017".to_string(),
        student_name: "Ayesha Khan".to_string(),
        gender: "FEMALE".to_string(),
        date_of_birth: "2012-04-09".to_string(),
        father_name: "Imran Khan".to_string(),
        student_cnic: "35202-1234567-1".to_string(),
        father_cnic: "35202-7654321-3".to_string(),
        father_profession: "Engineer".to_string(),
        caste: "Rajput".to_string(),
        registration_date: "2024-08-01".to_string(),
        current_address: "House 12, Street 4, Lahore".to_string(),
        permanent_address: "Village Kot, Sheikhupura".to_string(),
        discount_by_percent: Some(10.0),
        ..StudentDraft::default()
    }
}
