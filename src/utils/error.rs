use thiserror::Error;

#[derive(Error, Debug)]
pub enum DemoError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("MQTT client error: {0}")]
    MqttClientError(#[from] rumqttc::ClientError),

    #[error("MQTT connection error: {0}")]
    MqttConnectionError(#[from] rumqttc::ConnectionError),

    #[error("WebSocket error: {0}")]
    WebSocketError(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("WSDL error: {message}")]
    WsdlError { message: String },

    #[error("SOAP fault {code}: {reason}")]
    SoapFault { code: String, reason: String },

    #[error("Protocol error: {message}")]
    ProtocolError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Protocol,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the binaries.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl DemoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DemoError::HttpError(_)
            | DemoError::MqttConnectionError(_)
            | DemoError::WebSocketError(_)
            | DemoError::UnexpectedStatus { .. } => ErrorCategory::Network,
            DemoError::MqttClientError(_)
            | DemoError::WsdlError { .. }
            | DemoError::SoapFault { .. }
            | DemoError::ProtocolError { .. } => ErrorCategory::Protocol,
            DemoError::ConfigError { .. }
            | DemoError::InvalidConfigValueError { .. }
            | DemoError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DemoError::XmlError(_) | DemoError::SerializationError(_) => ErrorCategory::Data,
            DemoError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Protocol | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DemoError::HttpError(e) if e.is_timeout() => {
                "The remote server did not answer in time".to_string()
            }
            DemoError::HttpError(e) if e.is_connect() => {
                "Could not connect to the remote server".to_string()
            }
            DemoError::MqttConnectionError(_) => "Lost or failed connection to the MQTT broker".to_string(),
            DemoError::WebSocketError(_) => "The WebSocket connection failed".to_string(),
            DemoError::UnexpectedStatus { status, .. } => {
                format!("The server answered with HTTP status {}", status)
            }
            DemoError::WsdlError { .. } | DemoError::XmlError(_) => {
                "The service description could not be understood".to_string()
            }
            DemoError::SoapFault { reason, .. } => format!("The SOAP service reported a fault: {}", reason),
            DemoError::ConfigError { .. }
            | DemoError::InvalidConfigValueError { .. }
            | DemoError::ConfigValidationError { .. } => format!("Invalid configuration: {}", self),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and that the endpoint is reachable",
            ErrorCategory::Protocol => "Check that the endpoint speaks the expected protocol and version",
            ErrorCategory::Configuration => "Fix the configuration file or command line arguments",
            ErrorCategory::Data => "The server returned data in an unexpected format; run with --verbose for details",
            ErrorCategory::System => "Check file permissions and available system resources",
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
