mod config;
mod fleet;
mod telemetry;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use convoy_core::FleetCoordinator;
use tracing::{info, warn};

use crate::config::Args;
use crate::fleet::{FleetDefinition, FleetRoster};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    telemetry::init(&args.log_level)?;

    // (A) 設定の検証。ワーカー数が不正ならここで終了（ワーカーは起動しない）
    let settings = args.run_settings()?;

    // (B) fleet を組み立てる
    let roster = match &args.fleet {
        Some(path) => FleetDefinition::load(path)
            .and_then(|def| def.into_roster(args.transit()))
            .with_context(|| format!("loading fleet from {}", path.display()))?,
        None => FleetRoster::demo(args.transit()),
    };
    if roster.is_empty() {
        warn!("fleet definition contains no trucks");
    }
    info!(trucks = roster.len(), workers = %settings.workers, "fleet assembled");

    // (C) 実行して集約結果を受け取る
    let coordinator = FleetCoordinator::new(settings);
    let report = coordinator
        .run(roster.into_units())
        .await
        .context("fleet run aborted")?;

    // (D) 結果を出力して終了コードに変換
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if report.is_success() {
        if !args.json {
            println!("All trucks processed successfully");
        }
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Error processing fleet: {report}");
        Ok(ExitCode::FAILURE)
    }
}
