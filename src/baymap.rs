use clap::Parser;
use std::path::PathBuf;

use crate::config::AppContext;

mod config;
mod gui;
mod position;
mod regions;

const TOKEN_ENV_VAR: &str = "BAYEXPRESS_MAPBOX_TOKEN";

#[derive(Parser, Debug)]
#[command(name = "baymap", about = "Interactive sailing-charter map")]
struct Cli {
    /// Mapbox access token (overrides the environment and the config file)
    #[arg(long)]
    token: Option<String>,

    /// Initial map center as LON,LAT
    #[arg(long, value_name = "LON,LAT")]
    center: Option<String>,

    /// Initial zoom level
    #[arg(long)]
    zoom: Option<f64>,

    /// Base URL prepended to region links in popups
    #[arg(long, value_name = "URL")]
    site_url: Option<String>,

    /// Alternative config file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn validate(&self) -> Result<(), String> {
        if let Some(zoom) = self.zoom {
            if !(0.0..=22.0).contains(&zoom) {
                return Err(format!("Zoom must be 0-22. Got {}.", zoom));
            }
        }
        if let Some(center) = &self.center {
            parse_center(center)?;
        }
        Ok(())
    }
}

fn parse_center(s: &str) -> Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(format!("Invalid center '{}'. Use LON,LAT.", s));
    }
    let lon = parts[0]
        .parse::<f64>()
        .map_err(|_| format!("Invalid longitude '{}'", parts[0]))?;
    let lat = parts[1]
        .parse::<f64>()
        .map_err(|_| format!("Invalid latitude '{}'", parts[1]))?;
    Ok((lon, lat))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Cli::parse();
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let mut ctx = AppContext::new(args.config.as_deref())?;

    // CLI flags win over the environment, which wins over the config file.
    if let Some(token) = args
        .token
        .clone()
        .or_else(|| dotenv::var(TOKEN_ENV_VAR).ok().filter(|t| !t.is_empty()))
    {
        ctx.map_config.token = Some(token);
    }
    if let Some(center) = args.center.as_deref() {
        if let Ok(center) = parse_center(center) {
            ctx.map_config.center = center;
        }
    }
    if let Some(zoom) = args.zoom {
        ctx.map_config.zoom = zoom;
    }
    if let Some(site_url) = args.site_url.clone() {
        ctx.map_config.site_url = site_url;
    }

    if ctx.map_config.token.as_deref().unwrap_or("").is_empty() {
        log::error!(
            "No Mapbox token provided. Pass --token, set {}, or fill the token key in the config file.",
            TOKEN_ENV_VAR
        );
        std::process::exit(1);
    }

    let app = gui::GuiApp::new(ctx);
    if let Err(e) = app.run() {
        eprintln!("GUI Error: {}", e);
    }
    Ok(())
}
