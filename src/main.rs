use articles::conf::Conf;
use articles::startup::Application;
use articles::trace;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let conf = Conf::derive()?;

    let subscriber = trace::TracingSubscriber::new("articles")
        .pretty(conf.log.pretty)
        .build(std::io::stdout);
    trace::init_global_default(subscriber)?;

    tracing::info!("Environment: {}", conf.env);

    let application = Application::build(&conf).await?;

    application.server().await?;
    Ok(())
}
