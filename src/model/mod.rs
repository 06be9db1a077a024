use serde::Serialize;
use std::collections::BTreeMap;

/// One scheme's valuation entry from the daily NAV report.
///
/// Every field is kept as the verbatim string from the feed. The NAV column
/// in particular carries non-numeric sentinels ("N.A.") and locale
/// formatting, so numeric interpretation is left to the caller. Either ISIN
/// variant may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FundRecord {
    pub scheme_code: String,
    pub scheme_name: String,
    pub isin_div_payout_growth: String,
    pub isin_div_reinvestment: String,
    pub nav: String,
    pub date: String,
}

/// Records of every fund house under one scheme sub-type.
pub type FundHouseMap = BTreeMap<String, Vec<FundRecord>>;

/// Sub-type groupings under one scheme type.
pub type SchemeSubTypeMap = BTreeMap<String, FundHouseMap>;

/// Three-level view of the report: scheme type → scheme sub-type →
/// fund house → funds in file order.
///
/// Buckets are created on first sight and reused on later sight, so a group
/// or fund house that reappears in a non-contiguous block accumulates into
/// the same list. Built once per parse and not mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavHierarchy {
    scheme_types: BTreeMap<String, SchemeSubTypeMap>,
}

impl NavHierarchy {
    pub fn scheme_types(&self) -> &BTreeMap<String, SchemeSubTypeMap> {
        &self.scheme_types
    }

    /// Sum of list lengths across every fund house.
    pub fn total_funds(&self) -> usize {
        self.scheme_types
            .values()
            .flat_map(|subs| subs.values())
            .flat_map(|houses| houses.values())
            .map(Vec::len)
            .sum()
    }

    pub(crate) fn ensure_group(&mut self, scheme_type: &str, sub_type: &str) {
        self.scheme_types
            .entry(scheme_type.to_string())
            .or_default()
            .entry(sub_type.to_string())
            .or_default();
    }

    pub(crate) fn ensure_house(&mut self, scheme_type: &str, sub_type: &str, fund_house: &str) {
        self.bucket(scheme_type, sub_type, fund_house);
    }

    pub(crate) fn push(
        &mut self,
        scheme_type: &str,
        sub_type: &str,
        fund_house: &str,
        record: FundRecord,
    ) {
        self.bucket(scheme_type, sub_type, fund_house).push(record);
    }

    fn bucket(
        &mut self,
        scheme_type: &str,
        sub_type: &str,
        fund_house: &str,
    ) -> &mut Vec<FundRecord> {
        self.scheme_types
            .entry(scheme_type.to_string())
            .or_default()
            .entry(sub_type.to_string())
            .or_default()
            .entry(fund_house.to_string())
            .or_default()
    }
}
