pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use app::{
    events::{AppEvent, forward_location_events, start_clock_task},
    settings::{load_config, read_config, save_config},
    state::{FetchPhase, ViewState, WeatherStore},
};
use cli::Cli;
use data::location::{IpLocationProvider, LocationProvider};
use domain::{
    location::{Coordinates, LocationEvent},
    weather::Units,
};
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing();
    cli.validate()?;

    let (config, config_path) = load_config(&cli, !cli.no_config);
    let clock_refresh_secs = config.clock_refresh_secs;
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);

    let location: Option<Arc<dyn LocationProvider>> = if cli.device_location {
        let (location_tx, location_rx) = mpsc::channel(16);
        forward_location_events(location_rx, tx.clone());
        Some(Arc::new(IpLocationProvider::new(location_tx)))
    } else {
        None
    };

    let mut store = WeatherStore::from_config(config, location);
    if cli.watch {
        spawn_frame_printer(&store);
        start_clock_task(tx.clone(), clock_refresh_secs);
    }

    tx.send(initial_event(&cli)).await?;
    let mut toggle_pending = cli.toggle_unit;

    while store.running {
        tokio::select! {
            maybe_event = rx.recv() => {
                let Some(event) = maybe_event else { break };
                store.handle_event(event, &tx);
            }
            _ = tokio::signal::ctrl_c() => {
                store.handle_event(AppEvent::Quit, &tx);
            }
        }

        if !settled(store.view()) {
            continue;
        }
        if toggle_pending {
            toggle_pending = false;
            store.handle_event(AppEvent::ToggleUnit, &tx);
            if let Some(path) = &config_path {
                persist_units(path, store.view().units)?;
            }
        }
        if !cli.watch {
            println!("{}", ui::render(store.view()));
            store.running = false;
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn initial_event(cli: &Cli) -> AppEvent {
    if cli.device_location {
        return AppEvent::CurrentLocationRequested;
    }
    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        return LocationEvent::PositionUpdated(Coordinates::new(lat, lon)).into();
    }
    match &cli.city {
        Some(city) => AppEvent::SearchSubmitted(city.clone()),
        None => AppEvent::Bootstrap,
    }
}

/// A load finished, or a location request failed before one could start.
fn settled(view: &ViewState) -> bool {
    !view.is_loading && (view.phase != FetchPhase::Idle || view.error_message.is_some())
}

/// Only the unit preference is written back; CLI overrides stay out of the file.
fn persist_units(path: &Path, units: Units) -> Result<()> {
    let mut saved = read_config(path).unwrap_or_default();
    saved.units = units;
    save_config(path, &saved).with_context(|| format!("saving {}", path.display()))
}

fn spawn_frame_printer(store: &WeatherStore) {
    let mut frames = store.subscribe();
    tokio::spawn(async move {
        while frames.changed().await.is_ok() {
            let frame = ui::render(&frames.borrow_and_update());
            println!("{frame}");
        }
    });
}
