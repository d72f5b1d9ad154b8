use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One narrative segment (babak) with the keywords it must mention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(default)]
    pub id: Value,
    #[serde(default, deserialize_with = "scalar_text")]
    pub label: String,
    #[serde(default, deserialize_with = "nullable")]
    pub words: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
}

impl Stage {
    pub fn new(label: impl Into<String>, words: &[&str], text: impl Into<String>) -> Self {
        Self {
            id: Value::Null,
            label: label.into(),
            words: words.iter().map(|word| word.to_string()).collect(),
            text: text.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = id.into();
        self
    }
}

/// Story submitted for evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryPayload {
    pub stages: Vec<Stage>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub theme: String,
}

impl StoryPayload {
    pub fn new(stages: Vec<Stage>, theme: impl Into<String>) -> Self {
        Self {
            stages,
            theme: theme.into(),
        }
    }

    /// Validate a raw JSON document and convert it into a payload.
    ///
    /// The document must be an object whose `stages` member is an array. Stage
    /// entries tolerate missing or null `label`, `words` and `text`.
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        let object = value.as_object().ok_or(PayloadError::NotAnObject)?;
        match object.get("stages") {
            None => return Err(PayloadError::MissingStages),
            Some(Value::Array(_)) => {}
            Some(_) => return Err(PayloadError::StagesNotArray),
        }

        serde_json::from_value(value).map_err(PayloadError::MalformedStage)
    }

    /// Parse and validate a JSON document held in a string.
    pub fn from_json(raw: &str) -> Result<Self, PayloadError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| PayloadError::Body(err.to_string()))?;
        Self::from_value(value)
    }
}

/// Reasons a request body cannot be turned into a [`StoryPayload`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("request body is not valid JSON: {0}")]
    Body(String),
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("payload is missing `stages`")]
    MissingStages,
    #[error("`stages` must be an array")]
    StagesNotArray,
    #[error("malformed stage entry: {0}")]
    MalformedStage(#[source] serde_json::Error),
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Display fields only; numbers and booleans are rendered as text, null as empty.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}
