// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Laurea — certificate batch runner.
//
// Entry point. Initialises logging and configuration, then generates the
// certificates described in a JSON input file:
//
//     laurea <input.json>
//
// The input is either one certificate request (an object) or a batch (an
// array of objects). Results are printed to stdout as JSON.

mod config_path;
mod input;

use std::process::ExitCode;

use laurea_core::AppConfig;
use laurea_core::error::Result;
use laurea_engine::CertificateGenerator;

use input::Input;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(input_path) = std::env::args().nth(1) else {
        eprintln!("usage: laurea <input.json>");
        return ExitCode::from(2);
    };

    match run(&input_path).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(input_path: &str) -> Result<String> {
    let config_file = config_path::config_path();
    let mut config = AppConfig::load(&config_file)?;
    config.apply_env();
    let generator = CertificateGenerator::from_config(&config)?;

    tracing::info!(input = input_path, config = %config_file.display(), "Laurea starting");

    let raw = std::fs::read_to_string(input_path)?;
    let output = match Input::parse(&raw)? {
        Input::Single(request) => {
            let result = generator.create_certificate(request).await?;
            serde_json::to_string_pretty(&result)?
        }
        Input::Batch(requests) => {
            let now = chrono::Utc::now();
            let records: Vec<_> = requests.into_iter().map(|r| r.into_record(now)).collect();
            let results = generator.generate_bulk_certificates(&records).await;
            serde_json::to_string_pretty(&results)?
        }
    };
    Ok(output)
}
