//! Headless viewer.
//!
//! Loads brain data from the backend, drives the scene loop on a fixed
//! interval and reads marker commands from stdin:
//!
//! ```text
//! move x y z       place the marker
//! predict x y z    classify a point, marker untouched
//! pointer px py    pointer position in viewport pixels
//! resize w h       viewport size in pixels
//! quit
//! ```

mod command;
mod config;
mod renderer;

use std::sync::Arc;

use client::{bootstrap, HttpDataSource, MarkerController, PredictionClient, StatusLine};
use foundation::math::Vec2;
use runtime::FrameClock;
use scene::{pointer_ndc, Camera, SceneLoop};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::config::ViewerConfig;
use crate::renderer::LogRenderer;

const DEFAULT_VIEWPORT: Vec2 = Vec2 { x: 1280.0, y: 720.0 };

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ViewerConfig::from_env()?;
    info!(backend = %config.backend_url, policy = ?config.policy, "viewer starting");

    let http = reqwest::Client::new();
    let source = HttpDataSource::new(http.clone(), &config.backend_url);
    let predictions = PredictionClient::http(http, &config.backend_url);
    let status = Arc::new(StatusLine::new());

    let boot = bootstrap(&source, predictions, status.clone(), config.policy).await;
    let controller = boot.controller;
    if let Some(initial) = boot.initial {
        tokio::spawn(async move {
            let resolution = initial.await;
            debug!(?resolution, "initial marker resolved");
        });
    }

    let mut viewport = DEFAULT_VIEWPORT;
    let mut camera = Camera::default();
    camera.set_viewport(viewport.x, viewport.y);
    let mut scene = SceneLoop::new(controller.registry().clone(), camera, LogRenderer::default());

    let mut clock = FrameClock::new();
    let mut ticker = tokio::time::interval(config.frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                scene.tick(clock.tick(), &*controller);
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        error!("stdin read failed: {err}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => apply(cmd, &controller, &mut scene, &mut viewport),
                    Err(err) => warn!("{err}"),
                }
            }
        }
    }

    info!(
        frames = scene.renderer().frames(),
        status = status.text().as_deref().unwrap_or(""),
        "viewer stopped"
    );
    Ok(())
}

fn apply(
    cmd: Command,
    controller: &Arc<MarkerController>,
    scene: &mut SceneLoop<LogRenderer>,
    viewport: &mut Vec2,
) {
    match cmd {
        Command::Move(position) => {
            let pending = controller.set_position(position);
            tokio::spawn(async move {
                let resolution = pending.await;
                debug!(?resolution, "marker resolved");
            });
        }
        Command::Predict(position) => {
            tokio::spawn(controller.report_prediction(position));
        }
        Command::Pointer { x, y } => {
            scene.set_pointer_ndc(pointer_ndc(x, y, viewport.x, viewport.y));
        }
        Command::Resize { width, height } => {
            *viewport = Vec2::new(width, height);
            scene.camera_mut().set_viewport(width, height);
        }
        Command::Quit => {}
    }
}
