//! Model value object representing an OpenAI chat model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

/// Available OpenAI models (Value Object)
///
/// Identifies which model serves the questioner and which serves the
/// oracle. The two roles are configured independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt35Turbo,
    Gpt4Turbo,
    Gpt4Turbo32k,
    Gpt4o,
    Gpt4oMini,
    // Reasoning (mini) models
    O3Mini,
    O4Mini,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Gpt4Turbo32k => "gpt-4-turbo-32k",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::O3Mini => "o3-mini",
            Model::O4Mini => "o4-mini",
            Model::Custom(s) => s,
        }
    }

    /// Default model for the questioner role
    pub fn default_questioner() -> Model {
        Model::Gpt35Turbo
    }

    /// Default model for the oracle role
    pub fn default_oracle() -> Model {
        Model::Gpt4o
    }

    /// Check if this is a reasoning model that accepts a reasoning-effort hint
    pub fn is_reasoning(&self) -> bool {
        matches!(self, Model::O3Mini | Model::O4Mini)
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Gpt35Turbo
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gpt-3.5-turbo" => Model::Gpt35Turbo,
            "gpt-4-turbo" => Model::Gpt4Turbo,
            "gpt-4-turbo-32k" => Model::Gpt4Turbo32k,
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "o3-mini" => Model::O3Mini,
            "o4-mini" => Model::O4Mini,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("model parsing is infallible"))
    }
}

/// Reasoning effort hint for reasoning-capable models.
///
/// Passed through opaquely to the questioner backend; the engine never
/// interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    #[default]
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasoningEffort::Low => "low",
            ReasoningEffort::Medium => "medium",
            ReasoningEffort::High => "high",
        }
    }
}

impl std::fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReasoningEffort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(ReasoningEffort::Low),
            "medium" => Ok(ReasoningEffort::Medium),
            "high" => Ok(ReasoningEffort::High),
            other => Err(DomainError::InvalidReasoningEffort(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for name in ["gpt-3.5-turbo", "gpt-4o", "o4-mini"] {
            let model: Model = name.parse().unwrap();
            assert_eq!(model.to_string(), name);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "my-finetune-v2".parse().unwrap();
        assert_eq!(model, Model::Custom("my-finetune-v2".to_string()));
        assert_eq!(model.to_string(), "my-finetune-v2");
    }

    #[test]
    fn test_reasoning_detection() {
        assert!(Model::O3Mini.is_reasoning());
        assert!(Model::O4Mini.is_reasoning());
        assert!(!Model::Gpt4o.is_reasoning());
    }

    #[test]
    fn test_reasoning_effort_parse() {
        assert_eq!("HIGH".parse::<ReasoningEffort>().unwrap(), ReasoningEffort::High);
        assert!("extreme".parse::<ReasoningEffort>().is_err());
        assert_eq!(ReasoningEffort::default(), ReasoningEffort::Medium);
    }
}
