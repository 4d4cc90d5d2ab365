use anyhow::Context;
use driveshare_core::event_log::write_event_log;
use driveshare_core::scenario::{generate_seed_events, ScenarioParams};

use crate::config::GenerateConfig;

pub fn generate(config: GenerateConfig) -> anyhow::Result<()> {
    let mut params = ScenarioParams::default()
        .with_counts(config.drivers, config.riders)
        .with_grid_size(config.grid_size)
        .with_request_window(config.request_window);
    if let Some(seed) = config.seed {
        params = params.with_seed(seed);
    }

    let events = generate_seed_events(&params);
    let mut log = String::from("# timestamp kind args...\n");
    log.push_str(&write_event_log(&events));

    match &config.output {
        Some(path) => {
            std::fs::write(path, log).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(events = events.len(), path = %path.display(), "wrote event log");
        }
        None => print!("{log}"),
    }
    Ok(())
}
