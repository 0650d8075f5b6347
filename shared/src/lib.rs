use serde::{Deserialize, Deserializer, Serialize};

pub mod transport;

pub use transport::{post_json, ClientError, ClientTransport, RawResponse};

/// Body sent to both symptom endpoints.
///
/// `query` is only serialized when present; the legacy endpoint never gets one.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SymptomRequest {
    pub symptoms: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CoachRequest {
    pub goals: String,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
    Emergency,
}

pub const BADGE_FOREGROUND: &str = "#ffffff";

impl Urgency {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "emergency" => Urgency::Emergency,
            "high" => Urgency::High,
            "medium" => Urgency::Medium,
            _ => Urgency::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Emergency => "emergency",
        }
    }

    pub fn badge_background(self) -> &'static str {
        match self {
            Urgency::Emergency => "#dc2626",
            Urgency::High => "#ea580c",
            Urgency::Medium => "#d97706",
            Urgency::Low => "#059669",
        }
    }
}

impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Non-string values fall back to Low instead of failing the whole body.
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => Urgency::parse(&s),
            _ => Urgency::Low,
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AssistantResponse {
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(default)]
    pub suggested_specialty: Option<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default)]
    pub advice: Option<Vec<String>>,
    #[serde(default)]
    pub lifestyle: Option<Vec<String>>,
    #[serde(default)]
    pub google_search_link: Option<String>,
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl AssistantResponse {
    pub fn urgency(&self) -> Urgency {
        self.urgency.unwrap_or_default()
    }

    pub fn specialty_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty(&self.suggested_specialty).unwrap_or(fallback)
    }

    pub fn disclaimer_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty(&self.disclaimer).unwrap_or(fallback)
    }

    pub fn advice(&self) -> &[String] {
        self.advice.as_deref().unwrap_or_default()
    }

    pub fn lifestyle(&self) -> &[String] {
        self.lifestyle.as_deref().unwrap_or_default()
    }

    pub fn doctor_search_link(&self) -> Option<&str> {
        non_empty(&self.google_search_link)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CoachResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub plan: Option<String>,
}

impl CoachResponse {
    /// The plan text, only when the server reported success and sent one.
    pub fn plan(&self) -> Option<&str> {
        if self.ok {
            self.plan.as_deref()
        } else {
            None
        }
    }
}

/// Shape of the body the server sends alongside a non-2xx status.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
