use clap::Parser;
use protocol_demos::adapters::http::build_client;
use protocol_demos::app::demos::{GraphqlClient, GraphqlDemo};
use protocol_demos::config::cli::{exit_with_error, finish, CommonArgs};
use protocol_demos::utils::validation::Validate;
use protocol_demos::{DemoRunner, StdoutConsole};

#[derive(Parser)]
#[command(name = "graphql-client")]
#[command(about = "Sends one GraphQL query over HTTPS and prints the JSON response")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// GraphQL endpoint URL
    #[arg(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    args.common.init_logging();

    let mut config = match args.common.load_config() {
        Ok(config) => config.graphql,
        Err(e) => exit_with_error(&e),
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Err(e) = config.validate() {
        exit_with_error(&e);
    }

    let http = match build_client(config.timeout_seconds) {
        Ok(http) => http,
        Err(e) => exit_with_error(&e),
    };

    let demo = GraphqlDemo::new(GraphqlClient::new(http, config.endpoint), config.query);
    let mut runner = DemoRunner::new(demo, StdoutConsole);
    finish(runner.run().await);
}
