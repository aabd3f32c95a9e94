use clap::Parser;
use protocol_demos::adapters::mqtt::{MqttSettings, RumqttPublisher};
use protocol_demos::app::demos::PublishDemo;
use protocol_demos::config::cli::{exit_with_error, finish, CommonArgs};
use protocol_demos::utils::validation::Validate;
use protocol_demos::{DemoRunner, StdoutConsole};

#[derive(Parser)]
#[command(name = "mqtt-publisher")]
#[command(about = "Publishes a short series of temperature readings to an MQTT topic")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Broker host
    #[arg(long)]
    host: Option<String>,

    /// Broker port
    #[arg(long)]
    port: Option<u16>,

    /// Topic to publish to
    #[arg(long)]
    topic: Option<String>,

    /// Number of readings to publish
    #[arg(long)]
    count: Option<usize>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    args.common.init_logging();

    let mut config = match args.common.load_config() {
        Ok(config) => config.mqtt,
        Err(e) => exit_with_error(&e),
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(topic) = args.topic {
        config.topic = topic;
    }
    if let Some(count) = args.count {
        config.publish.count = count;
    }
    if let Err(e) = config.validate() {
        exit_with_error(&e);
    }

    let publisher = match RumqttPublisher::connect(&MqttSettings::from_config(&config)).await {
        Ok(publisher) => publisher,
        Err(e) => exit_with_error(&e),
    };

    let demo = PublishDemo::new(publisher, config.topic, config.publish);
    let mut runner = DemoRunner::new(demo, StdoutConsole);
    finish(runner.run().await);
}
