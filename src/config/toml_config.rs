use crate::domain::model::NewPost;
use crate::utils::error::{DemoError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_topic_filter,
    validate_topic_name, validate_url, Validate, HTTP_SCHEMES, WEBSOCKET_SCHEMES,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_GRAPHQL_QUERY: &str = r#"
query {
  country(code: "US") {
    name
    capital
    currency
  }
}
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub graphql: GraphqlConfig,
    pub rest: RestConfig,
    pub mqtt: MqttConfig,
    pub soap: SoapConfig,
    pub websocket: WebSocketConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphqlConfig {
    pub endpoint: String,
    pub query: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://countries.trevorblades.com/".to_string(),
            query: DEFAULT_GRAPHQL_QUERY.to_string(),
            timeout_seconds: Some(30),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    pub base_url: String,
    pub post_id: u64,
    pub new_post: NewPost,
    pub timeout_seconds: Option<u64>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            post_id: 1,
            new_post: NewPost::default(),
            timeout_seconds: Some(30),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
    pub keep_alive_seconds: u64,
    pub client_id: Option<String>,
    pub publish: PublishConfig,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "broker.hivemq.com".to_string(),
            port: 1883,
            topic: "iweather/temperature".to_string(),
            keep_alive_seconds: 10,
            client_id: None,
            publish: PublishConfig::default(),
        }
    }
}

impl MqttConfig {
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_seconds)
    }

    /// Checks the settings a subscriber needs; `topic` may be a wildcard filter.
    pub fn validate_subscription(&self) -> Result<()> {
        self.validate_connection()?;
        validate_topic_filter("mqtt.topic", &self.topic)
    }

    fn validate_connection(&self) -> Result<()> {
        validate_non_empty_string("mqtt.host", &self.host)?;
        validate_range("mqtt.port", self.port, 1, u16::MAX)?;
        validate_range("mqtt.keep_alive_seconds", self.keep_alive_seconds, 5, u16::MAX as u64)?;
        if let Some(client_id) = &self.client_id {
            validate_non_empty_string("mqtt.client_id", client_id)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub message_prefix: String,
    pub first_reading: i64,
    pub count: usize,
    pub interval_ms: u64,
}

impl PublishConfig {
    /// Value of the final reading, `None` when the series would overflow.
    pub fn last_reading(&self) -> Option<i64> {
        let steps = i64::try_from(self.count.checked_sub(1)?).ok()?;
        self.first_reading.checked_add(steps)
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            message_prefix: "Temperature".to_string(),
            first_reading: 30,
            count: 5,
            interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SoapConfig {
    pub wsdl_url: String,
    pub operation: String,
    pub arguments: Vec<i64>,
    pub timeout_seconds: Option<u64>,
}

impl Default for SoapConfig {
    fn default() -> Self {
        Self {
            wsdl_url: "http://www.dneonline.com/calculator.asmx?WSDL".to_string(),
            operation: "Add".to_string(),
            arguments: vec![5, 3],
            timeout_seconds: Some(30),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    pub url: String,
    pub message: String,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            url: "wss://echo.websocket.org".to_string(),
            message: "Hello World".to_string(),
        }
    }
}

impl DemoConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DemoError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DemoError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DemoError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for GraphqlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("graphql.endpoint", &self.endpoint, HTTP_SCHEMES)?;
        validate_non_empty_string("graphql.query", &self.query)
    }
}

impl Validate for RestConfig {
    fn validate(&self) -> Result<()> {
        validate_url("rest.base_url", &self.base_url, HTTP_SCHEMES)?;
        self.new_post.validate()
    }
}

impl Validate for MqttConfig {
    fn validate(&self) -> Result<()> {
        self.validate_connection()?;
        validate_topic_name("mqtt.topic", &self.topic)?;
        self.publish.validate()
    }
}

impl Validate for PublishConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("mqtt.publish.count", self.count, 1)?;
        if self.last_reading().is_none() {
            return Err(DemoError::InvalidConfigValueError {
                field: "mqtt.publish.first_reading".to_string(),
                value: self.first_reading.to_string(),
                reason: format!("{} readings from here overflow", self.count),
            });
        }
        Ok(())
    }
}

impl Validate for SoapConfig {
    fn validate(&self) -> Result<()> {
        validate_url("soap.wsdl_url", &self.wsdl_url, HTTP_SCHEMES)?;
        validate_non_empty_string("soap.operation", &self.operation)
    }
}

impl Validate for WebSocketConfig {
    fn validate(&self) -> Result<()> {
        validate_url("websocket.url", &self.url, WEBSOCKET_SCHEMES)?;
        validate_non_empty_string("websocket.message", &self.message)
    }
}
