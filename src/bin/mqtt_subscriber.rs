use clap::Parser;
use protocol_demos::adapters::mqtt::{MqttSettings, RumqttSubscriber};
use protocol_demos::app::demos::SubscribeDemo;
use protocol_demos::config::cli::{exit_with_error, finish, CommonArgs};
use protocol_demos::{DemoRunner, StdoutConsole};

#[derive(Parser)]
#[command(name = "mqtt-subscriber")]
#[command(about = "Subscribes to an MQTT topic and prints every message until interrupted")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Broker host
    #[arg(long)]
    host: Option<String>,

    /// Broker port
    #[arg(long)]
    port: Option<u16>,

    /// Topic filter to subscribe to (`+` and `#` wildcards allowed)
    #[arg(long)]
    topic: Option<String>,

    /// Stop after this many messages instead of running until Ctrl-C
    #[arg(long)]
    max_messages: Option<usize>,
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
    if let Err(e) = config.validate_subscription() {
        exit_with_error(&e);
    }

    let settings = MqttSettings::from_config(&config);
    let subscriber = match RumqttSubscriber::subscribe(&settings, &config.topic).await {
        Ok(subscriber) => subscriber,
        Err(e) => exit_with_error(&e),
    };

    let demo = SubscribeDemo::new(subscriber, config.topic, args.max_messages);
    let mut runner = DemoRunner::new(demo, StdoutConsole);
    tokio::select! {
        result = runner.run() => finish(result),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("🛑 Interrupted, leaving {}", settings.host);
        }
    }
}
