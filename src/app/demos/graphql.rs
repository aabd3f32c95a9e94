use crate::core::{Console, Demo, GraphqlOutcome, GraphqlRequest};
use crate::domain::model::GraphqlError;
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub struct GraphqlClient {
    client: Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Anything other than HTTP 200 is a failed query; the status is reported, not raised.
    pub async fn execute(&self, request: &GraphqlRequest) -> Result<GraphqlOutcome> {
        tracing::debug!("Sending GraphQL query to: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        tracing::debug!("GraphQL response status: {}", status);
        if status != StatusCode::OK {
            tracing::warn!("GraphQL endpoint answered {}", status);
            return Ok(GraphqlOutcome::Failed {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        if let Some(errors) = body.get("errors") {
            match Vec::<GraphqlError>::deserialize(errors) {
                Ok(errors) => {
                    for error in errors {
                        tracing::warn!("GraphQL error: {}", error.message);
                    }
                }
                Err(e) => tracing::debug!("Unrecognised GraphQL errors field: {}", e),
            }
        }

        Ok(GraphqlOutcome::Success(body))
    }
}

pub struct GraphqlDemo {
    client: GraphqlClient,
    query: String,
}

impl GraphqlDemo {
    pub fn new(client: GraphqlClient, query: impl Into<String>) -> Self {
        Self {
            client,
            query: query.into(),
        }
    }
}

#[async_trait::async_trait]
impl Demo for GraphqlDemo {
    fn name(&self) -> &str {
        "GraphQL"
    }

    async fn run(&mut self, console: &dyn Console) -> Result<()> {
        let request = GraphqlRequest::new(self.query.clone());
        match self.client.execute(&request).await? {
            GraphqlOutcome::Success(body) => {
                console.print_line(&format!("GraphQL Response: {}", body));
            }
            GraphqlOutcome::Failed { status } => {
                console.print_line(&format!("Query failed with status code {}", status));
            }
        }
        Ok(())
    }
}
