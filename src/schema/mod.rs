// src/schema/mod.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::SchemaError;
use crate::model::FundRecord;

/// Column delimiter inside the header line and every data line.
pub const FIELD_DELIMITER: char = ';';

/// Canonical record fields. The header line decides which column holds
/// which field; nothing in the format guarantees a fixed column order
/// across report revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SchemeCode,
    SchemeName,
    IsinDivPayoutGrowth,
    IsinDivReinvestment,
    Nav,
    Date,
}

/// Column labels AMFI currently publishes in NAVAll.txt.
static AMFI_LABELS: Lazy<HashMap<&'static str, Field>> = Lazy::new(|| {
    HashMap::from([
        ("Scheme Code", Field::SchemeCode),
        ("Scheme Name", Field::SchemeName),
        ("ISIN Div Payout/ ISIN Growth", Field::IsinDivPayoutGrowth),
        ("ISIN Div Reinvestment", Field::IsinDivReinvestment),
        ("Net Asset Value", Field::Nav),
        ("Date", Field::Date),
    ])
});

/// Translation table from the feed's human-readable column labels to
/// canonical fields.
///
/// The table is handed to [`crate::parse::NavParser`] rather than read from
/// a global, so a revised upstream layout can be exercised by substituting
/// a different table. Labels with no entry are a hard error during schema
/// derivation; silently ignoring them would corrupt field alignment.
#[derive(Debug, Clone)]
pub struct HeaderLookup {
    labels: HashMap<String, Field>,
}

impl HeaderLookup {
    /// The stock table for the current AMFI report revision.
    pub fn amfi() -> Self {
        Self::from_pairs(AMFI_LABELS.iter().map(|(label, field)| (*label, *field)))
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, Field)>) -> Self {
        Self {
            labels: pairs
                .into_iter()
                .map(|(label, field)| (label.to_string(), field))
                .collect(),
        }
    }

    pub fn get(&self, label: &str) -> Option<Field> {
        self.labels.get(label).copied()
    }
}

impl Default for HeaderLookup {
    fn default() -> Self {
        Self::amfi()
    }
}

/// Ordered canonical field names derived once per parse from the header
/// line. The order here is authoritative for every data line that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Split the header line on the field delimiter and translate each
    /// label through `lookup`.
    pub fn derive(header_line: &str, lookup: &HeaderLookup) -> Result<Self, SchemaError> {
        let mut fields = Vec::new();
        for (column, label) in header_line.split(FIELD_DELIMITER).enumerate() {
            let field = lookup.get(label).ok_or_else(|| SchemaError::UnknownLabel {
                label: label.to_string(),
                column,
            })?;
            fields.push(field);
        }
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode one delimited data line into a record.
    ///
    /// Tokens are assigned positionally; no type coercion happens here, all
    /// values stay verbatim strings. A token count that disagrees with the
    /// schema length is a structural failure, `line` is the zero-based line
    /// index reported in the diagnostic.
    pub fn decode(&self, line: &str, line_no: usize) -> Result<FundRecord, SchemaError> {
        let tokens: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if tokens.len() != self.fields.len() {
            return Err(SchemaError::FieldCountMismatch {
                line: line_no,
                expected: self.fields.len(),
                found: tokens.len(),
            });
        }

        let mut record = FundRecord::default();
        for (field, token) in self.fields.iter().zip(tokens) {
            let slot = match field {
                Field::SchemeCode => &mut record.scheme_code,
                Field::SchemeName => &mut record.scheme_name,
                Field::IsinDivPayoutGrowth => &mut record.isin_div_payout_growth,
                Field::IsinDivReinvestment => &mut record.isin_div_reinvestment,
                Field::Nav => &mut record.nav,
                Field::Date => &mut record.date,
            };
            *slot = token.to_string();
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMFI_HEADER: &str =
        "Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment;Scheme Name;Net Asset Value;Date";

    #[test]
    fn derives_schema_from_stock_header() {
        let schema = Schema::derive(AMFI_HEADER, &HeaderLookup::default()).unwrap();
        assert_eq!(schema.len(), 6);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = Schema::derive("Scheme Code;Mystery Column", &HeaderLookup::default())
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownLabel {
                label: "Mystery Column".into(),
                column: 1,
            }
        );
    }

    #[test]
    fn decode_assigns_tokens_positionally() {
        let schema = Schema::derive(AMFI_HEADER, &HeaderLookup::default()).unwrap();
        let record = schema
            .decode("101;INF1;INF2;Example Scheme;10.1234;01-Jan-2020", 6)
            .unwrap();
        assert_eq!(record.scheme_code, "101");
        assert_eq!(record.isin_div_payout_growth, "INF1");
        assert_eq!(record.isin_div_reinvestment, "INF2");
        assert_eq!(record.scheme_name, "Example Scheme");
        assert_eq!(record.nav, "10.1234");
        assert_eq!(record.date, "01-Jan-2020");
    }

    #[test]
    fn decode_follows_header_order_not_table_order() {
        // Same labels, reshuffled columns: values must follow the header.
        let schema = Schema::derive(
            "Date;Net Asset Value;Scheme Name;Scheme Code;ISIN Div Payout/ ISIN Growth;ISIN Div Reinvestment",
            &HeaderLookup::default(),
        )
        .unwrap();
        let record = schema
            .decode("01-Jan-2020;10.1234;Example Scheme;101;INF1;INF2", 6)
            .unwrap();
        assert_eq!(record.scheme_code, "101");
        assert_eq!(record.nav, "10.1234");
        assert_eq!(record.date, "01-Jan-2020");
    }

    #[test]
    fn decode_rejects_short_line() {
        let schema = Schema::derive(AMFI_HEADER, &HeaderLookup::default()).unwrap();
        let err = schema
            .decode("101;INF1;INF2;Example Scheme;10.1234", 9)
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::FieldCountMismatch {
                line: 9,
                expected: 6,
                found: 5,
            }
        );
    }

    #[test]
    fn nav_value_stays_verbatim() {
        let schema = Schema::derive(AMFI_HEADER, &HeaderLookup::default()).unwrap();
        let record = schema.decode("101;;;Suspended Scheme;N.A.;N.A.", 3).unwrap();
        assert_eq!(record.nav, "N.A.");
        assert_eq!(record.isin_div_payout_growth, "");
    }
}
