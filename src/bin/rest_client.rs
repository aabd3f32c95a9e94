use clap::Parser;
use protocol_demos::adapters::http::build_client;
use protocol_demos::app::demos::{RestClient, RestDemo};
use protocol_demos::config::cli::{exit_with_error, finish, CommonArgs};
use protocol_demos::utils::validation::Validate;
use protocol_demos::{DemoRunner, StdoutConsole};

#[derive(Parser)]
#[command(name = "rest-client")]
#[command(about = "Performs one GET and one POST against a JSON placeholder API")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Base URL of the REST API
    #[arg(long)]
    base_url: Option<String>,

    /// Id of the post to fetch
    #[arg(long)]
    post_id: Option<u64>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    args.common.init_logging();

    let mut config = match args.common.load_config() {
        Ok(config) => config.rest,
        Err(e) => exit_with_error(&e),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(post_id) = args.post_id {
        config.post_id = post_id;
    }
    if let Err(e) = config.validate() {
        exit_with_error(&e);
    }

    let http = match build_client(config.timeout_seconds) {
        Ok(http) => http,
        Err(e) => exit_with_error(&e),
    };

    println!("RESTful example");
    let demo = RestDemo::new(
        RestClient::new(http, config.base_url),
        config.post_id,
        config.new_post,
    );
    let mut runner = DemoRunner::new(demo, StdoutConsole);
    finish(runner.run().await);
}
