use crate::error::VisibilityError;
use crate::types::scoring::Dimension;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

pub const DEFAULT_NAME_MAX_LENGTH: usize = 40;
pub const DEFAULT_DESCRIPTION_MIN_LENGTH: usize = 60;
pub const DEFAULT_DESCRIPTION_MAX_LENGTH: usize = 160;
pub const DEFAULT_TOPIC_MIN_COUNT: usize = 5;

/// Per-dimension weights; dimensions missing from the map weigh 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(BTreeMap<String, f64>);

impl Weights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(dimension.id()).copied().unwrap_or(1.0)
    }

    pub fn raw(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, f64)> for Weights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_count: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeRequirements {
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_sections: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weights: Weights,
    #[serde(default, deserialize_with = "null_as_default")]
    pub naming_rules: NamingRules,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description_rules: DescriptionRules,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic_profile: TopicProfile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub readme_requirements: ReadmeRequirements,
    /// Keys this tool does not interpret, kept so the preset round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Preset {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if !self.id.is_empty() => self.id.as_str(),
            _ => "default",
        }
    }

    pub fn name_max_length(&self) -> usize {
        non_zero_or(self.naming_rules.max_length, DEFAULT_NAME_MAX_LENGTH)
    }

    pub fn description_min_length(&self) -> usize {
        self.description_rules
            .min_length
            .unwrap_or(DEFAULT_DESCRIPTION_MIN_LENGTH)
    }

    pub fn description_max_length(&self) -> usize {
        self.description_rules
            .max_length
            .unwrap_or(DEFAULT_DESCRIPTION_MAX_LENGTH)
    }

    pub fn topic_min_count(&self) -> usize {
        self.topic_profile
            .min_count
            .unwrap_or(DEFAULT_TOPIC_MIN_COUNT)
    }

    pub fn required_sections(&self) -> &[String] {
        &self.readme_requirements.required_sections
    }

    pub fn validate(&self) -> Result<(), VisibilityError> {
        for key in self.weights.keys() {
            let weight = self.weights.raw(key).unwrap_or(1.0);
            if !weight.is_finite() || weight < 0.0 {
                return Err(VisibilityError::InvalidPreset {
                    id: self.id.clone(),
                    reason: format!("weights.{key} must be a finite number >= 0 (found {weight})"),
                });
            }
            if Dimension::from_id(key).is_none() {
                warn!(preset = %self.id, key, "ignoring weight for unknown dimension");
            }
        }

        if let (Some(min), Some(max)) = (
            self.description_rules.min_length,
            self.description_rules.max_length,
        ) {
            if min > max {
                return Err(VisibilityError::InvalidPreset {
                    id: self.id.clone(),
                    reason: format!(
                        "descriptionRules.minLength ({min}) exceeds maxLength ({max})"
                    ),
                });
            }
        }

        Ok(())
    }
}

/// An explicit `null` reads the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_zero_or(value: Option<usize>, default: usize) -> usize {
    value.filter(|value| *value > 0).unwrap_or(default)
}
