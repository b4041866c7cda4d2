use crate::types::report::RepoEvaluation;

pub fn to_json(evaluations: &[RepoEvaluation]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(evaluations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::evaluation;

    #[test]
    fn json_report_uses_camel_case_schema() {
        let rendered = to_json(&[evaluation("octo/tool", "https://github.com/octo/tool", true)])
            .expect("json should serialize");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        let first = &value[0];
        assert_eq!(first["repo"]["fullName"], "octo/tool");
        assert_eq!(first["analysis"]["hasReadme"], true);
        assert!(first["scores"]["nameClarity"]["score"].is_number());
        assert!(first["scores"]["overall"]["explanation"].is_string());
        assert_eq!(first["suggestions"][0]["severity"], "important");
        assert!(rendered.contains("\n  "));
    }

    #[test]
    fn empty_batch_is_empty_array() {
        assert_eq!(to_json(&[]).expect("json").trim(), "[]");
    }
}
