use crate::core::envelope::{build_request, parse_response, SOAP11_CONTENT_TYPE};
use crate::core::wsdl::WsdlDocument;
use crate::core::{Console, Demo};
use crate::utils::error::{DemoError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// SOAP 1.1 client bound to the service described by one WSDL document.
pub struct SoapClient {
    http: Client,
    wsdl: WsdlDocument,
}

impl SoapClient {
    pub fn new(http: Client, wsdl: WsdlDocument) -> Self {
        Self { http, wsdl }
    }

    /// Fetches and parses the WSDL.
    pub async fn load(http: Client, wsdl_url: &str) -> Result<Self> {
        tracing::info!("📡 Loading WSDL from: {}", wsdl_url);
        let response = http.get(wsdl_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DemoError::UnexpectedStatus {
                status: status.as_u16(),
                url: wsdl_url.to_string(),
            });
        }

        let wsdl = WsdlDocument::parse(&response.text().await?)?;
        tracing::debug!(
            "Service {} at {} offers: {}",
            wsdl.service_name.as_deref().unwrap_or("<unnamed>"),
            wsdl.endpoint,
            wsdl.operation_names().collect::<Vec<_>>().join(", ")
        );
        Ok(Self::new(http, wsdl))
    }

    /// Invokes `operation` with positional arguments and returns the raw result text.
    pub async fn call(&self, operation: &str, args: &[String]) -> Result<String> {
        let op = self.wsdl.operation(operation).ok_or_else(|| DemoError::WsdlError {
            message: format!(
                "operation '{}' not found; available: {}",
                operation,
                self.wsdl.operation_names().collect::<Vec<_>>().join(", ")
            ),
        })?;

        if args.len() != op.parameters.len() {
            return Err(DemoError::InvalidConfigValueError {
                field: "soap.arguments".to_string(),
                value: args.join(", "),
                reason: format!(
                    "{} takes {} arguments ({}), got {}",
                    op.name,
                    op.parameters.len(),
                    op.parameters.join(", "),
                    args.len()
                ),
            });
        }

        let params: Vec<(&str, String)> = op
            .parameters
            .iter()
            .map(String::as_str)
            .zip(args.iter().cloned())
            .collect();
        let envelope = build_request(&self.wsdl.target_namespace, &op.input_element, &params);
        let soap_action = format!("\"{}\"", op.soap_action.as_deref().unwrap_or_default());

        tracing::debug!("POST {} SOAPAction={}", self.wsdl.endpoint, soap_action);
        let response = self
            .http
            .post(&self.wsdl.endpoint)
            .header(CONTENT_TYPE, SOAP11_CONTENT_TYPE)
            .header("SOAPAction", soap_action)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        match parse_response(&body, &op.output_element) {
            Err(fault @ DemoError::SoapFault { .. }) => Err(fault),
            _ if !status.is_success() => Err(DemoError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.wsdl.endpoint.clone(),
            }),
            parsed => parsed,
        }
    }

    pub async fn call_integer(&self, operation: &str, args: &[i64]) -> Result<i64> {
        let args: Vec<String> = args.iter().map(i64::to_string).collect();
        let text = self.call(operation, &args).await?;
        text.trim()
            .parse::<i64>()
            .map_err(|e| DemoError::ProtocolError {
                message: format!("{} result '{}' is not an integer: {}", operation, text, e),
            })
    }
}

pub struct SoapDemo {
    http: Client,
    wsdl_url: String,
    operation: String,
    arguments: Vec<i64>,
}

impl SoapDemo {
    pub fn new(
        http: Client,
        wsdl_url: impl Into<String>,
        operation: impl Into<String>,
        arguments: Vec<i64>,
    ) -> Self {
        Self {
            http,
            wsdl_url: wsdl_url.into(),
            operation: operation.into(),
            arguments,
        }
    }
}

#[async_trait::async_trait]
impl Demo for SoapDemo {
    fn name(&self) -> &str {
        "SOAP"
    }

    async fn run(&mut self, console: &dyn Console) -> Result<()> {
        let client = SoapClient::load(self.http.clone(), &self.wsdl_url).await?;
        let result = client.call_integer(&self.operation, &self.arguments).await?;
        console.print_line(&format!("SOAP {} result: {}", self.operation, result));
        Ok(())
    }
}
