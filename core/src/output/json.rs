use crate::diff::DiffReport;

/// Serialize a diff report to a JSON string.
pub fn serialize_diff_report(report: &DiffReport) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompareConfig;
    use crate::diff::diff_layouts;

    #[test]
    fn report_roundtrips_through_json() {
        let a = [0xAAu8; 8];
        let mut b = a;
        b[0] = 0xBB;
        let report =
            diff_layouts(&a, &b, 0, &CompareConfig::default()).expect("diff");
        let json = serialize_diff_report(&report).expect("serialize");
        let parsed: DiffReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(report, parsed);
    }
}
