use clap::Parser;
use protocol_demos::adapters::http::build_client;
use protocol_demos::app::demos::SoapDemo;
use protocol_demos::config::cli::{exit_with_error, finish, CommonArgs};
use protocol_demos::utils::validation::Validate;
use protocol_demos::{DemoRunner, StdoutConsole};

#[derive(Parser)]
#[command(name = "soap-client")]
#[command(about = "Loads a WSDL and invokes one remote SOAP operation")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// URL of the WSDL document
    #[arg(long)]
    wsdl: Option<String>,

    /// Operation to invoke
    #[arg(long)]
    operation: Option<String>,

    /// Integer arguments, in declaration order (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    args: Option<Vec<i64>>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    args.common.init_logging();

    let mut config = match args.common.load_config() {
        Ok(config) => config.soap,
        Err(e) => exit_with_error(&e),
    };
    if let Some(wsdl) = args.wsdl {
        config.wsdl_url = wsdl;
    }
    if let Some(operation) = args.operation {
        config.operation = operation;
    }
    if let Some(arguments) = args.args {
        config.arguments = arguments;
    }
    if let Err(e) = config.validate() {
        exit_with_error(&e);
    }

    let http = match build_client(config.timeout_seconds) {
        Ok(http) => http,
        Err(e) => exit_with_error(&e),
    };

    println!("SOAP example");
    let demo = SoapDemo::new(http, config.wsdl_url, config.operation, config.arguments);
    let mut runner = DemoRunner::new(demo, StdoutConsole);
    finish(runner.run().await);
}
