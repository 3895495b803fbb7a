use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use gharconnect_eligibility::config::AppConfig;
use gharconnect_eligibility::error::AppError;
use gharconnect_eligibility::telemetry;
use gharconnect_eligibility::workflows::eligibility::intake::parse_applicants;
use gharconnect_eligibility::workflows::eligibility::{
    eligibility_router, rulebook, Applicant, EmploymentType, EvaluationOutcome,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "GharConnect Eligibility",
    about = "Run the GharConnect loan eligibility service and decision tooling",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate applicants without starting the service
    Eligibility {
        #[command(subcommand)]
        command: EligibilityCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum EligibilityCommand {
    /// Evaluate a single applicant supplied via flags
    Check(CheckArgs),
    /// Evaluate a CSV of applicants exported from the lead sheet
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Gross monthly income in rupees
    #[arg(long)]
    monthly_income: Option<f64>,
    /// Bureau credit score
    #[arg(long)]
    credit_score: Option<u16>,
    /// Total EMIs currently being serviced, in rupees per month
    #[arg(long)]
    current_emi: Option<f64>,
    /// Requested loan amount in rupees
    #[arg(long)]
    loan_amount: Option<f64>,
    /// Requested tenure in months
    #[arg(long)]
    tenure_months: Option<u32>,
    /// Employment type (salaried, self-employed, business)
    #[arg(long, value_parser = parse_employment)]
    employment: Option<EmploymentType>,
    /// Rulebook to evaluate against
    #[arg(long, default_value = rulebook::CREDIT_ADVISORY)]
    rulebook: String,
}

impl CheckArgs {
    fn applicant(&self) -> Applicant {
        Applicant {
            monthly_income: self.monthly_income,
            credit_score: self.credit_score,
            current_emi: self.current_emi,
            loan_amount: self.loan_amount,
            loan_tenure_months: self.tenure_months,
            employment_type: self.employment,
        }
    }
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Path to the applicant CSV export
    #[arg(long)]
    csv: PathBuf,
    /// Rulebook to evaluate against
    #[arg(long, default_value = rulebook::CREDIT_ADVISORY)]
    rulebook: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Eligibility {
            command: EligibilityCommand::Check(args),
        } => run_check(args),
        Command::Eligibility {
            command: EligibilityCommand::Batch(args),
        } => run_batch(args),
    }
}

fn parse_employment(raw: &str) -> Result<EmploymentType, String> {
    EmploymentType::parse_label(raw).ok_or_else(|| {
        format!("unsupported employment type '{raw}' (expected salaried, self-employed, or business)")
    })
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(rulebook::by_name(&config.rulebook.name)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(eligibility_router(engine))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, rulebook = %config.rulebook.name, "eligibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let engine = rulebook::by_name(&args.rulebook)?;
    let applicant = args.applicant();
    let outcome = engine.evaluate(&applicant);
    render_outcome(&outcome);
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = rulebook::by_name(&args.rulebook)?;
    let file = File::open(&args.csv)?;
    let applicants = parse_applicants(file)?;

    let mut qualified = 0usize;
    let mut disqualified = 0usize;

    for (index, applicant) in applicants.iter().enumerate() {
        let outcome = engine.evaluate(applicant);
        if outcome.disqualified {
            disqualified += 1;
        } else if !outcome.qualified_tiers.is_empty() {
            qualified += 1;
        }
        println!("row {:>4}: {}", index + 1, outcome.summary());
    }

    println!(
        "\n{} applicant(s): {} with offers, {} disqualified, {} without offers",
        applicants.len(),
        qualified,
        disqualified,
        applicants.len() - qualified - disqualified
    );

    Ok(())
}

fn render_outcome(outcome: &EvaluationOutcome) {
    println!("Eligibility report");

    if outcome.disqualified {
        let reason = outcome.disqualify_reason.as_deref().unwrap_or("not eligible");
        println!("Disqualified: {reason}");
        return;
    }

    if outcome.qualified_tiers.is_empty() {
        println!("No offers available");
    } else {
        let tiers: Vec<&str> = outcome
            .qualified_tiers
            .iter()
            .map(|tier| tier.as_str())
            .collect();
        println!("Qualified tiers: {}", tiers.join(", "));
        if let Some(best) = &outcome.best_tier {
            println!("Best offer: {best}");
        }
    }

    if !outcome.unmet_reasons.is_empty() {
        println!("\nHow to qualify for the remaining tiers");
        for (tier, reasons) in &outcome.unmet_reasons {
            println!("- {tier}:");
            for reason in reasons {
                println!("    {reason}");
            }
        }
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
