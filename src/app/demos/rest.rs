use crate::core::{Console, Demo, NewPost, ResponseSummary};
use crate::utils::error::Result;
use reqwest::Client;

pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn get_post(&self, id: u64) -> Result<ResponseSummary> {
        let url = self.url(&format!("posts/{}", id));
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Ok(ResponseSummary {
            status: response.status().as_u16(),
        })
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<ResponseSummary> {
        let url = self.url("posts");
        tracing::debug!("POST {} ({:?})", url, post);
        let response = self.client.post(&url).form(post).send().await?;
        Ok(ResponseSummary {
            status: response.status().as_u16(),
        })
    }
}

/// One GET and one POST; statuses are printed as-is, without branching on them.
pub struct RestDemo {
    client: RestClient,
    post_id: u64,
    new_post: NewPost,
}

impl RestDemo {
    pub fn new(client: RestClient, post_id: u64, new_post: NewPost) -> Self {
        Self {
            client,
            post_id,
            new_post,
        }
    }
}

#[async_trait::async_trait]
impl Demo for RestDemo {
    fn name(&self) -> &str {
        "REST"
    }

    async fn run(&mut self, console: &dyn Console) -> Result<()> {
        let fetched = self.client.get_post(self.post_id).await?;
        console.print_line(&format!("GET Response: {}", fetched));

        let created = self.client.create_post(&self.new_post).await?;
        console.print_line(&format!("POST Response: {}", created));
        Ok(())
    }
}
