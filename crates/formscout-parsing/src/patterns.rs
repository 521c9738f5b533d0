//! Field-name substring → canonical label dictionary.
//!
//! Matching is first-hit in list order, so more specific keys that share a
//! substring with a generic one must come first. `EmailAddress` resolves to
//! "Email Address" because `Email` precedes `Address`.

/// One dictionary entry: if `key` occurs in a field name (case-insensitive),
/// the field is labelled `label`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPattern {
    pub key: String,
    pub label: String,
}

impl LabelPattern {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    // Personal identity
    ("FirstName", "First Name"),
    ("LastName", "Last Name"),
    ("MiddleName", "Middle Name"),
    ("FullName", "Full Name"),
    ("DOB", "Date of Birth"),
    ("DateOfBirth", "Date of Birth"),
    ("SSN", "Social Security Number"),
    ("TaxID", "Tax ID Number"),
    ("EmployerID", "Employer ID Number"),
    // Contact
    ("Email", "Email Address"),
    ("Phone", "Phone Number"),
    ("Mobile", "Mobile Number"),
    ("Fax", "Fax Number"),
    ("Address", "Address"),
    ("Street", "Street Address"),
    ("City", "City"),
    ("State", "State"),
    ("Province", "Province"),
    ("PostalCode", "Postal Code"),
    ("ZipCode", "ZIP Code"),
    ("Country", "Country"),
    // Generic form elements
    ("Signature", "Signature"),
    ("Date", "Date"),
    ("Checkbox", "Checkbox Selection"),
    ("YesNo", "Yes/No Selection"),
    // Application roles
    ("ApplicantName", "Name of Primary Applicant"),
    ("BeneficiaryName", "Beneficiary Name"),
    ("PetitionerName", "Petitioner Name"),
    ("EmployerName", "Employer Name"),
    ("JobTitle", "Job Title"),
    ("Occupation", "Occupation"),
    ("Department", "Department"),
    // Document identifiers
    ("CaseNumber", "Case Number"),
    ("ReceiptNumber", "Receipt Number"),
    ("FileNumber", "File Number"),
    ("AlienNumber", "Alien Registration Number"),
    ("PassportNumber", "Passport Number"),
    ("VisaNumber", "Visa Number"),
];

/// The built-in dictionary in precedence order.
pub fn default_patterns() -> Vec<LabelPattern> {
    DEFAULT_PATTERNS
        .iter()
        .map(|(key, label)| LabelPattern::new(key, label))
        .collect()
}

/// First entry whose key occurs in `field_name`, ignoring case.
pub fn lookup<'a>(field_name: &str, patterns: &'a [LabelPattern]) -> Option<&'a LabelPattern> {
    let name_lower = field_name.to_lowercase();
    patterns
        .iter()
        .find(|p| !p.key.is_empty() && name_lower.contains(&p.key.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        let patterns = default_patterns();
        let hit = lookup("applicant_firstname[0]", &patterns).unwrap();
        assert_eq!(hit.label, "First Name");
    }

    #[test]
    fn test_lookup_first_entry_wins() {
        let patterns = default_patterns();
        // Email precedes Address
        assert_eq!(
            lookup("Pt2EmailAddress", &patterns).unwrap().label,
            "Email Address"
        );
        // State precedes Date, so "StateOfBirthDate" resolves to State
        assert_eq!(lookup("StateOfBirthDate", &patterns).unwrap().label, "State");
    }

    #[test]
    fn test_lookup_generic_shadows_specific() {
        let patterns = default_patterns();
        // LastName comes before ApplicantName, preserving dictionary order.
        assert_eq!(
            lookup("ApplicantLastName", &patterns).unwrap().label,
            "Last Name"
        );
    }

    #[test]
    fn test_lookup_no_match() {
        let patterns = default_patterns();
        assert!(lookup("CB_AppType[0]", &patterns).is_none());
    }

    #[test]
    fn test_empty_key_never_matches() {
        let patterns = vec![LabelPattern::new("", "Anything")];
        assert!(lookup("Whatever", &patterns).is_none());
    }
}
