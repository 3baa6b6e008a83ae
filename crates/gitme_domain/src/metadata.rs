use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Optional user-supplied context merged verbatim into the README prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase")]
#[setters(strip_option, into)]
pub struct RequestMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

impl RequestMetadata {
    /// Labelled fields that are present and non-empty, in prompt order.
    pub fn prompt_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Custom Description", &self.description),
            ("Key Features", &self.features),
            ("License", &self.license),
            ("Additional Context", &self.additional_context),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_prompt_fields_skip_absent_values() {
        let fixture = RequestMetadata::default()
            .features("Fast, small")
            .additional_context("");

        let actual = fixture.prompt_fields();
        let expected = vec![("Key Features", "Fast, small")];

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_prompt_fields_keep_values_verbatim() {
        let fixture = RequestMetadata::default()
            .description("  A tool  ")
            .features("x")
            .license("MIT")
            .additional_context("ctx");

        let actual = fixture.prompt_fields();
        let expected = vec![
            ("Custom Description", "  A tool  "),
            ("Key Features", "x"),
            ("License", "MIT"),
            ("Additional Context", "ctx"),
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let fixture = r#"{"license": "MIT", "additionalContext": "internal tool"}"#;

        let actual: RequestMetadata = serde_json::from_str(fixture).unwrap();
        let expected = RequestMetadata::default()
            .license("MIT")
            .additional_context("internal tool");

        assert_eq!(actual, expected);
    }
}
