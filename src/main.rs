use icosa_truncation::multiproblem::MultiProblem;
use icosa_truncation::settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icosa_truncation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = settings::load_config()?;
    tracing::info!("{}", settings);
    let mut multiproblem = MultiProblem::new(settings)?;

    multiproblem.solve();
    multiproblem.writeup()?;

    Ok(())
}
