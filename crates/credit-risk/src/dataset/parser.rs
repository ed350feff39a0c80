use std::io::Read;
use std::str::FromStr;

use super::columns::{decode, COLUMN_NAMES};
use super::record::{CreditRecord, Risk};
use super::DatasetError;

/// Parses whitespace-separated `german.data` rows (no header) into decoded records.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CreditRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let line = row
            .position()
            .map(|position| position.line())
            .unwrap_or(index as u64 + 1);

        // Runs of spaces show up as empty fields.
        let fields: Vec<&str> = row.iter().filter(|field| !field.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != COLUMN_NAMES.len() {
            return Err(DatasetError::ColumnCount {
                line,
                expected: COLUMN_NAMES.len(),
                found: fields.len(),
            });
        }

        records.push(RowDecoder { line, fields }.decode()?);
    }

    Ok(records)
}

struct RowDecoder<'a> {
    line: u64,
    fields: Vec<&'a str>,
}

impl RowDecoder<'_> {
    fn decode(&self) -> Result<CreditRecord, DatasetError> {
        Ok(CreditRecord {
            checking_account_status: self.label(0)?,
            duration_months: self.number(1)?,
            credit_history: self.label(2)?,
            purpose: self.label(3)?,
            credit_amount: self.number(4)?,
            savings_account: self.label(5)?,
            employment_duration: self.label(6)?,
            installment_rate: self.number(7)?,
            personal_status_sex: self.label(8)?,
            other_debtors: self.label(9)?,
            present_residence_since: self.number(10)?,
            property: self.label(11)?,
            age_years: self.number(12)?,
            other_installment_plans: self.label(13)?,
            housing: self.label(14)?,
            existing_credits: self.number(15)?,
            job: self.label(16)?,
            dependents: self.number(17)?,
            telephone: self.label(18)?,
            foreign_worker: self.label(19)?,
            risk: self.risk(20)?,
        })
    }

    fn label(&self, column: usize) -> Result<&'static str, DatasetError> {
        let code = self.fields[column];
        decode(COLUMN_NAMES[column], code).ok_or_else(|| DatasetError::UnknownCode {
            line: self.line,
            column: COLUMN_NAMES[column],
            code: code.to_string(),
        })
    }

    fn number<T: FromStr>(&self, column: usize) -> Result<T, DatasetError> {
        let raw = self.fields[column];
        raw.parse().map_err(|_| DatasetError::InvalidNumber {
            line: self.line,
            column: COLUMN_NAMES[column],
            value: raw.to_string(),
        })
    }

    fn risk(&self, column: usize) -> Result<Risk, DatasetError> {
        let code = self.fields[column];
        Risk::from_code(code).ok_or_else(|| DatasetError::UnknownCode {
            line: self.line,
            column: COLUMN_NAMES[column],
            code: code.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FIRST_ROW: &str =
        "A11 6 A34 A43 1169 A65 A75 4 A93 A101 4 A121 67 A143 A152 2 A173 1 A192 A201 1\n";

    #[test]
    fn decodes_every_column_of_a_row() {
        let records = parse_records(Cursor::new(FIRST_ROW)).expect("parse");
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.checking_account_status, "< 0 DM");
        assert_eq!(record.duration_months, 6);
        assert_eq!(record.credit_history, "Critical Account");
        assert_eq!(record.purpose, "Radio/TV");
        assert_eq!(record.credit_amount, 1169);
        assert_eq!(record.age_years, 67);
        assert_eq!(record.housing, "Own");
        assert_eq!(record.job, "Skilled");
        assert_eq!(record.foreign_worker, "Yes");
        assert_eq!(record.risk, Risk::Good);
    }

    #[test]
    fn tolerates_repeated_spaces_and_blank_lines() {
        let raw = "A12  48 A32 A43 5951 A61 A73 2 A92 A101 2 A121 22 A143 A152 1 A173 1 A191 A201   2\n\n";
        let records = parse_records(Cursor::new(raw)).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].risk, Risk::Bad);
        assert_eq!(records[0].duration_months, 48);
    }

    #[test]
    fn reports_rows_with_missing_columns() {
        let raw = format!("{FIRST_ROW}A11 6 A34\n");
        let err = parse_records(Cursor::new(raw)).expect_err("short row");
        match err {
            DatasetError::ColumnCount { line, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected column count error, got {other:?}"),
        }
    }

    #[test]
    fn reports_undocumented_codes_and_bad_numbers() {
        let raw = FIRST_ROW.replace("A152", "A159");
        let err = parse_records(Cursor::new(raw)).expect_err("unknown housing");
        assert!(matches!(
            err,
            DatasetError::UnknownCode {
                column: "housing",
                ..
            }
        ));

        let raw = FIRST_ROW.replace(" 67 ", " sixty ");
        let err = parse_records(Cursor::new(raw)).expect_err("bad age");
        assert!(matches!(
            err,
            DatasetError::InvalidNumber {
                column: "age_years",
                ..
            }
        ));
    }
}
