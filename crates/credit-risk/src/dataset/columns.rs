use std::collections::HashMap;
use std::sync::OnceLock;

/// Column order of the raw `german.data` file.
pub const COLUMN_NAMES: [&str; 21] = [
    "checking_account_status",
    "duration_months",
    "credit_history",
    "purpose",
    "credit_amount",
    "savings_account",
    "employment_duration",
    "installment_rate",
    "personal_status_sex",
    "other_debtors",
    "present_residence_since",
    "property",
    "age_years",
    "other_installment_plans",
    "housing",
    "existing_credits",
    "job",
    "dependents",
    "telephone",
    "foreign_worker",
    "risk",
];

type CodeTable = HashMap<&'static str, &'static str>;

static DECODING_MAP: OnceLock<HashMap<&'static str, CodeTable>> = OnceLock::new();

/// Human-readable label for a coded categorical value, if the code is documented.
pub(crate) fn decode(column: &str, code: &str) -> Option<&'static str> {
    decoding_map()
        .get(column)
        .and_then(|codes| codes.get(code))
        .copied()
}

fn decoding_map() -> &'static HashMap<&'static str, CodeTable> {
    DECODING_MAP.get_or_init(|| {
        const CODES: &[(&str, &[(&str, &str)])] = &[
            (
                "checking_account_status",
                &[
                    ("A11", "< 0 DM"),
                    ("A12", "0 - 200 DM"),
                    ("A13", ">= 200 DM"),
                    ("A14", "No Account"),
                ],
            ),
            (
                "credit_history",
                &[
                    ("A30", "No Credits/All Paid"),
                    ("A31", "All Credits Paid"),
                    ("A32", "Existing Credits Paid"),
                    ("A33", "Past Delay"),
                    ("A34", "Critical Account"),
                ],
            ),
            (
                "purpose",
                &[
                    ("A40", "Car (New)"),
                    ("A41", "Car (Used)"),
                    ("A42", "Furniture/Equipment"),
                    ("A43", "Radio/TV"),
                    ("A44", "Appliances"),
                    ("A45", "Repairs"),
                    ("A46", "Education"),
                    ("A47", "Vacation"),
                    ("A48", "Retraining"),
                    ("A49", "Business"),
                    ("A410", "Other"),
                ],
            ),
            (
                "savings_account",
                &[
                    ("A61", "< 100 DM"),
                    ("A62", "100 - 500 DM"),
                    ("A63", "500 - 1000 DM"),
                    ("A64", ">= 1000 DM"),
                    ("A65", "Unknown/No Savings"),
                ],
            ),
            (
                "employment_duration",
                &[
                    ("A71", "Unemployed"),
                    ("A72", "< 1 Year"),
                    ("A73", "1 - 4 Years"),
                    ("A74", "4 - 7 Years"),
                    ("A75", ">= 7 Years"),
                ],
            ),
            (
                "personal_status_sex",
                &[
                    ("A91", "Male: Divorced"),
                    ("A92", "Female: Divorced/Married"),
                    ("A93", "Male: Single"),
                    ("A94", "Male: Married/Widowed"),
                    ("A95", "Female: Single"),
                ],
            ),
            (
                "other_debtors",
                &[
                    ("A101", "None"),
                    ("A102", "Co-applicant"),
                    ("A103", "Guarantor"),
                ],
            ),
            (
                "property",
                &[
                    ("A121", "Real Estate"),
                    ("A122", "Savings Agreement/Insurance"),
                    ("A123", "Car or Other"),
                    ("A124", "No Property"),
                ],
            ),
            (
                "other_installment_plans",
                &[("A141", "Bank"), ("A142", "Stores"), ("A143", "None")],
            ),
            (
                "housing",
                &[("A151", "Rent"), ("A152", "Own"), ("A153", "For Free")],
            ),
            (
                "job",
                &[
                    ("A171", "Unemployed/Unskilled NR"),
                    ("A172", "Unskilled Resident"),
                    ("A173", "Skilled"),
                    ("A174", "Management/Self-employed"),
                ],
            ),
            ("telephone", &[("A191", "None"), ("A192", "Yes")]),
            ("foreign_worker", &[("A201", "Yes"), ("A202", "No")]),
        ];

        CODES
            .iter()
            .map(|(column, codes)| (*column, codes.iter().copied().collect::<CodeTable>()))
            .collect()
    })
}
