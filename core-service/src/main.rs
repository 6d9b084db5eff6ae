//! EpochGuard - Main Entry Point

mod cli;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use epochguard_core::api::commands::{
    self, DashboardView, MetricsView, ShapOverview,
};
use epochguard_core::constants::{self, APP_NAME, APP_VERSION};
use epochguard_core::logic::analysis::{AnalysisOutcome, Analyzer};
use epochguard_core::logic::export;
use epochguard_core::logic::remote::{ClassifierClient, ClientConfig, ContactForm};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let config = match cli.api_url {
        Some(url) => ClientConfig::with_base_url(url),
        None => ClientConfig::default(),
    };
    log::info!("Classifier: {}", config.base_url);

    let client = ClassifierClient::new(config).context("failed to build HTTP client")?;
    let analyzer = Analyzer::new(client).with_offline(cli.offline || constants::is_offline());

    match cli.command {
        Commands::Analyze { file, out } => {
            let report = match analyzer.run_analysis(&file).await {
                AnalysisOutcome::Success(report) => report,
                AnalysisOutcome::Fallback { report, reason } => {
                    log::warn!("Showing demo analysis: {}", reason);
                    report
                }
                AnalysisOutcome::Error(e) => bail!(e),
            };

            let view = commands::dashboard_view(&report);
            emit(cli.json, &view, print_dashboard)?;

            let dir = out.unwrap_or_else(constants::default_output_dir);
            let path = export::write_results_csv(&report.result, &dir)?;
            println!("\nResults saved to {}", path.display());
        }

        Commands::Shap { file, out } => {
            let report = analyzer.run_shap_analysis(file.as_deref()).await;

            let overview = commands::shap_overview(&report);
            emit(cli.json, &overview, print_shap)?;

            let dir: PathBuf = out.unwrap_or_else(constants::default_output_dir);
            let today = chrono::Utc::now().date_naive();
            let path = export::write_shap_json(&report.model, &dir, today)?;
            println!("\nSHAP analysis saved to {}", path.display());
        }

        Commands::Metrics => {
            let report = analyzer.load_metrics().await;
            emit(cli.json, &commands::metrics_view(&report), print_metrics)?;
        }

        Commands::Contact { name, email, message } => {
            let form = ContactForm { name, email, message };
            match analyzer.submit_contact(&form).await {
                Ok(receipt) => println!("{}", commands::contact_message(&receipt)),
                Err(errors) => bail!("Invalid contact form: {}", errors),
            }
        }
    }

    Ok(())
}

/// Print as JSON or through the text printer
fn emit<T: Serialize>(json: bool, view: &T, text: fn(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        text(view);
    }
    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    println!("{} ({}) - {} results", view.file_name, view.file_size, view.source);
    println!("Analysis ID: {}", view.analysis_id);
    println!();
    println!("  Total Nodes      {}", view.total_nodes);
    println!("  Benign Nodes     {} ({:.2}%)", view.benign_nodes, view.benign_percentage);
    println!("  Malicious Nodes  {} ({:.2}%)", view.malicious_nodes, view.malicious_percentage);
    println!("  Avg Risk Score   {:.4}", view.average_risk_score);
    println!("  High / Low Risk  {} / {}", view.high_risk_nodes, view.low_risk_nodes);
    println!();
    println!("Top Risk Factors");
    for factor in &view.risk_factors {
        println!(
            "  {}. {:<26} {:>5.1}%  {}",
            factor.rank,
            factor.name,
            factor.importance_percent,
            bar(factor.bar_width_percent)
        );
    }
}

fn print_shap(view: &ShapOverview) {
    match &view.file_name {
        Some(name) => println!("SHAP Analysis - {} ({})", name, view.source),
        None => println!("SHAP Analysis ({})", view.source),
    }
    println!();
    println!("  Most Important Feature  {}", view.most_important_feature);
    println!("  Top-5 Cumulative        {:.1}%", view.top_5_cumulative_percentage);
    println!("  Features Analyzed       {}", view.features_analyzed);
    println!("  Samples Explained       {}", view.sample_count);
    println!(
        "  Weights DT / RF         {:.0}% / {:.0}%  (accuracy {:.1}% / {:.1}%)",
        view.dt_weight_percent, view.rf_weight_percent,
        view.dt_accuracy_percent, view.rf_accuracy_percent
    );
    println!();
    println!("Top Hybrid Features");
    for f in &view.hybrid_features {
        println!(
            "  {}. {:<26} {:.4}  DT {:.4}  RF {:.4}  {}",
            f.rank, f.name, f.hybrid_value, f.dt_contribution, f.rf_contribution,
            bar(f.bar_width_percent)
        );
    }
}

fn print_metrics(view: &MetricsView) {
    let label = if view.is_demo { " (demo)" } else { "" };
    println!("Hybrid Ensemble Performance{}", label);
    println!("  Accuracy   {:.1}%", view.accuracy_percent);
    println!("  Precision  {:.1}%", view.precision_percent);
    println!("  Recall     {:.1}%", view.recall_percent);
    println!("  F1 Score   {:.1}%", view.f1_score_percent);
}

fn bar(width_percent: f64) -> String {
    let cells = (width_percent / 5.0).round().clamp(0.0, 20.0) as usize;
    "#".repeat(cells)
}
