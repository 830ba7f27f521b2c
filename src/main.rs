use std::sync::Arc;

use kyc_voice::channels::CliChannel;
use kyc_voice::config::InterviewConfig;
use kyc_voice::error::{FailureKind, Result};
use kyc_voice::interview::{
    InterviewDriver, RunReport, SessionState, VerificationStatus, abort_interview, run_interview,
};
use kyc_voice::store::JsonFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the dialogue on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = InterviewConfig::from_env()?;

    let rule = "=".repeat(60);
    eprintln!("\n{rule}");
    eprintln!("  KYC VERIFICATION SYSTEM v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("{rule}");
    eprintln!("   Retries per field: {}", config.max_retries);
    eprintln!("   Listen timeout: {}s", config.listen_timeout.as_secs());
    eprintln!("   Consent matching: {}", config.consent_match);
    eprintln!("   Output: {}", config.output_dir.display());
    eprintln!("\nPlease ensure:");
    eprintln!("  - You're in a quiet environment");
    eprintln!("  - You answer each question on its own line");
    eprintln!("  - Type '?' to simulate garbled audio, '!' for a recognizer fault\n");

    let channel = Arc::new(CliChannel::new());
    let store = JsonFileStore::new(config.output_dir.clone());
    let mut session = SessionState::new();

    eprint!("Press Enter when ready to start...");
    let started = tokio::select! {
        biased;
        _ = shutdown_signal() => Some(FailureKind::UserCancelled),
        ready = channel.wait_for_enter() => match ready {
            Ok(()) => None,
            Err(e) => {
                tracing::error!("Could not start interview: {}", e);
                Some(FailureKind::ChannelClosed)
            }
        },
    };

    let report = match started {
        Some(kind) => {
            if kind == FailureKind::UserCancelled {
                eprintln!("\n\n  Verification cancelled by user.");
            }
            abort_interview(&mut session, &store, kind).await?
        }
        None => {
            let driver = InterviewDriver::new(channel, config);
            let report = run_interview(&driver, &mut session, &store, shutdown_signal()).await?;
            if report.status == VerificationStatus::Cancelled {
                eprintln!("\n\n  Verification cancelled by user.");
            }
            report
        }
    };

    print_summary(&report);
    Ok(())
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn print_summary(report: &RunReport) {
    let rule = "=".repeat(60);
    eprintln!("\n{rule}");
    if report.succeeded() {
        eprintln!("   KYC VERIFICATION COMPLETED SUCCESSFULLY");
    } else {
        eprintln!("   KYC VERIFICATION INCOMPLETE ({})", report.status);
    }
    eprintln!("{rule}");
    eprintln!("\nSession details saved to: {}", report.location);
}
