use clap::Parser;
use protocol_demos::app::demos::WebSocketDemo;
use protocol_demos::config::cli::{exit_with_error, finish, CommonArgs};
use protocol_demos::utils::validation::Validate;
use protocol_demos::{DemoRunner, StdoutConsole};

#[derive(Parser)]
#[command(name = "websocket-client")]
#[command(about = "Sends one text frame to a WebSocket echo server and prints the reply")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// WebSocket URL (ws:// or wss://)
    #[arg(long)]
    url: Option<String>,

    /// Text to send
    #[arg(long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    args.common.init_logging();

    let mut config = match args.common.load_config() {
        Ok(config) => config.websocket,
        Err(e) => exit_with_error(&e),
    };
    if let Some(url) = args.url {
        config.url = url;
    }
    if let Some(message) = args.message {
        config.message = message;
    }
    if let Err(e) = config.validate() {
        exit_with_error(&e);
    }

    println!("WebSocket example");
    let demo = WebSocketDemo::new(config.url, config.message);
    let mut runner = DemoRunner::new(demo, StdoutConsole);
    finish(runner.run().await);
}
