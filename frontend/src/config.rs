use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

/// ID of the optional `<script type="application/json">` element holding page overrides.
pub const CONFIG_ELEMENT_ID: &str = "guidance-config";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("could not parse page config")]
    #[diagnostic(code(config::parse))]
    Parse(#[source] serde_json::Error),
    #[error("the {flow} flow has no endpoints configured")]
    #[diagnostic(code(config::no_endpoints))]
    NoEndpoints { flow: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Assistant,
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureDisplay {
    Alert,
    Inline,
    AlertAndInline,
}

impl FailureDisplay {
    pub fn alerts(self) -> bool {
        matches!(self, FailureDisplay::Alert | FailureDisplay::AlertAndInline)
    }

    pub fn inline(self) -> bool {
        matches!(self, FailureDisplay::Inline | FailureDisplay::AlertAndInline)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoint {
    pub path: String,
    #[serde(default)]
    pub with_query: bool,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            with_query: false,
        }
    }

    pub fn with_query(mut self) -> Self {
        self.with_query = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymptomElementIds {
    pub trigger: String,
    pub input: String,
    pub query: String,
    pub result: String,
    pub badge: String,
    pub specialty: String,
    pub advice: String,
    pub lifestyle: String,
    pub disclaimer: String,
    pub doctor_search: String,
    pub doctor_link: String,
}

impl Default for SymptomElementIds {
    fn default() -> Self {
        Self {
            trigger: "checkBtn".to_owned(),
            input: "symptoms".to_owned(),
            query: "query".to_owned(),
            result: "result".to_owned(),
            badge: "urgencyBadge".to_owned(),
            specialty: "spec".to_owned(),
            advice: "adviceList".to_owned(),
            lifestyle: "lifeList".to_owned(),
            disclaimer: "disc".to_owned(),
            doctor_search: "doctorSearch".to_owned(),
            doctor_link: "doctorLink".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomFlowConfig {
    pub ids: SymptomElementIds,
    /// Tried in order; see [`crate::endpoints::send_with_fallback`].
    pub endpoints: Vec<Endpoint>,
    pub busy_label: String,
    pub failure_display: FailureDisplay,
    /// Shown instead of the error's own message when set. A page override of
    /// `""` clears it.
    pub failure_message: Option<String>,
    pub uppercase_badge: bool,
    pub specialty_fallback: String,
    pub disclaimer_fallback: String,
}

impl SymptomFlowConfig {
    pub fn assistant() -> Self {
        Self {
            ids: SymptomElementIds::default(),
            endpoints: vec![
                Endpoint::new("/api/health-assistant").with_query(),
                Endpoint::new("/api/symptom-check"),
            ],
            busy_label: "Analyzing...".to_owned(),
            failure_display: FailureDisplay::AlertAndInline,
            failure_message: None,
            uppercase_badge: true,
            specialty_fallback: "Primary Care".to_owned(),
            disclaimer_fallback: "Educational only".to_owned(),
        }
    }

    pub fn legacy() -> Self {
        Self {
            ids: SymptomElementIds::default(),
            endpoints: vec![Endpoint::new("/api/symptom-check")],
            busy_label: "Checking...".to_owned(),
            failure_display: FailureDisplay::Alert,
            failure_message: Some("Something went wrong. Please try again.".to_owned()),
            uppercase_badge: false,
            specialty_fallback: "primary care".to_owned(),
            disclaimer_fallback: String::new(),
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Assistant => Self::assistant(),
            Variant::Legacy => Self::legacy(),
        }
    }

    fn apply(&mut self, overrides: SymptomOverrides) {
        let SymptomOverrides {
            ids,
            endpoints,
            busy_label,
            failure_display,
            failure_message,
            uppercase_badge,
            specialty_fallback,
            disclaimer_fallback,
        } = overrides;

        if let Some(ids) = ids {
            self.ids = ids;
        }
        if let Some(endpoints) = endpoints {
            self.endpoints = endpoints;
        }
        if let Some(busy_label) = busy_label {
            self.busy_label = busy_label;
        }
        if let Some(failure_display) = failure_display {
            self.failure_display = failure_display;
        }
        if let Some(failure_message) = failure_message {
            // An empty string clears the preset's fixed message.
            self.failure_message = Some(failure_message).filter(|message| !message.is_empty());
        }
        if let Some(uppercase_badge) = uppercase_badge {
            self.uppercase_badge = uppercase_badge;
        }
        if let Some(specialty_fallback) = specialty_fallback {
            self.specialty_fallback = specialty_fallback;
        }
        if let Some(disclaimer_fallback) = disclaimer_fallback {
            self.disclaimer_fallback = disclaimer_fallback;
        }
    }
}

impl Default for SymptomFlowConfig {
    fn default() -> Self {
        Self::assistant()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoachElementIds {
    pub trigger: String,
    pub goals: String,
    pub output: String,
}

impl Default for CoachElementIds {
    fn default() -> Self {
        Self {
            trigger: "coachBtn".to_owned(),
            goals: "coachGoals".to_owned(),
            output: "coachOut".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoachFlowConfig {
    pub ids: CoachElementIds,
    pub endpoints: Vec<Endpoint>,
    pub busy_label: String,
    pub default_goals: String,
    pub not_ok_message: String,
    pub error_message: String,
}

impl Default for CoachFlowConfig {
    fn default() -> Self {
        Self {
            ids: CoachElementIds::default(),
            endpoints: vec![Endpoint::new("/api/coach-plan")],
            busy_label: "Generating...".to_owned(),
            default_goals: "General wellness".to_owned(),
            not_ok_message: "Failed to generate plan.".to_owned(),
            error_message: "Error generating plan.".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageConfig {
    pub symptom: SymptomFlowConfig,
    pub coach: CoachFlowConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SymptomOverrides {
    ids: Option<SymptomElementIds>,
    endpoints: Option<Vec<Endpoint>>,
    busy_label: Option<String>,
    failure_display: Option<FailureDisplay>,
    failure_message: Option<String>,
    uppercase_badge: Option<bool>,
    specialty_fallback: Option<String>,
    disclaimer_fallback: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawPageConfig {
    variant: Variant,
    symptom: SymptomOverrides,
    coach: CoachFlowConfig,
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let raw: RawPageConfig = serde_json::from_str(raw).map_err(ConfigError::Parse)?;

        let mut symptom = SymptomFlowConfig::for_variant(raw.variant);
        symptom.apply(raw.symptom);

        let config = Self {
            symptom,
            coach: raw.coach,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symptom.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints { flow: "symptom" });
        }
        if self.coach.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints { flow: "coach" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_assistant_preset() {
        let config = PageConfig::from_json("{}").unwrap();

        assert_eq!(config, PageConfig::default());
        assert_eq!(config.symptom.endpoints[0].path, "/api/health-assistant");
        assert!(config.symptom.endpoints[0].with_query);
        assert_eq!(config.symptom.endpoints[1].path, "/api/symptom-check");
        assert_eq!(config.coach.default_goals, "General wellness");
    }

    #[test]
    fn legacy_variant_with_partial_overrides() {
        let config = PageConfig::from_json(
            r#"{
                "variant": "legacy",
                "symptom": { "busy_label": "Please wait...", "ids": { "trigger": "goBtn" } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.symptom.endpoints, vec![Endpoint::new("/api/symptom-check")]);
        assert_eq!(config.symptom.busy_label, "Please wait...");
        assert_eq!(config.symptom.failure_display, FailureDisplay::Alert);
        assert!(!config.symptom.uppercase_badge);
        assert_eq!(config.symptom.ids.trigger, "goBtn");
        assert_eq!(config.symptom.ids.input, "symptoms");
    }

    #[test]
    fn empty_failure_message_clears_the_legacy_fixed_message() {
        let cleared = PageConfig::from_json(
            r#"{ "variant": "legacy", "symptom": { "failure_message": "" } }"#,
        )
        .unwrap();
        let replaced = PageConfig::from_json(
            r#"{ "variant": "legacy", "symptom": { "failure_message": "Try again later." } }"#,
        )
        .unwrap();
        let untouched = PageConfig::from_json(r#"{ "variant": "legacy" }"#).unwrap();

        assert_eq!(cleared.symptom.failure_message, None);
        assert_eq!(
            replaced.symptom.failure_message.as_deref(),
            Some("Try again later.")
        );
        assert_eq!(
            untouched.symptom.failure_message.as_deref(),
            Some("Something went wrong. Please try again.")
        );
    }

    #[test]
    fn coach_overrides_keep_other_defaults() {
        let config =
            PageConfig::from_json(r#"{ "coach": { "default_goals": "Sleep better" } }"#).unwrap();

        assert_eq!(config.coach.default_goals, "Sleep better");
        assert_eq!(config.coach.endpoints, vec![Endpoint::new("/api/coach-plan")]);
    }

    #[test]
    fn empty_endpoint_list_is_rejected() {
        let err = PageConfig::from_json(r#"{ "symptom": { "endpoints": [] } }"#).unwrap_err();

        assert!(matches!(err, ConfigError::NoEndpoints { flow: "symptom" }));
    }

    #[test]
    fn unknown_keys_and_bad_json_are_parse_errors() {
        assert!(matches!(
            PageConfig::from_json(r#"{ "symptom": { "retries": 3 } }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PageConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
