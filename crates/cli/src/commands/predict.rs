//! Interactive prediction command
//!
//! Collects the eleven features from the terminal, then classifies them
//! either with locally loaded artifacts or by calling a remote prediction
//! server.

use anyhow::{Context, Result};
use predictor_lib::{PatientFeatures, SvmPredictor};
use std::io;
use std::path::Path;

use crate::client::{ApiClient, PredictionResponse, ServiceBanner};
use crate::output::{color_result, format_confidence, print_info};
use crate::prompt;
use crate::Cli;

/// Run the interactive prediction session
pub async fn run(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();

    prompt::print_feature_info(&mut writer)?;
    let features = prompt::collect_features(&mut reader, &mut writer)?;

    let outcome = match &cli.api_url {
        Some(api_url) => remote_predict(api_url, &features).await?,
        None => local_predict(cli, &features)?,
    };

    prompt::print_result(
        &mut writer,
        &color_result(outcome.prediction, &outcome.result_text),
        &format_confidence(outcome.confidence_score),
        &outcome.model_version,
    )?;

    Ok(())
}

/// Classify against a remote prediction server
async fn remote_predict(api_url: &str, features: &PatientFeatures) -> Result<PredictionResponse> {
    let client = ApiClient::new(api_url)?;

    let banner: ServiceBanner = client
        .get("")
        .await
        .context("Prediction server unreachable")?;
    print_info(&format!(
        "Using prediction server at {} (version {})",
        api_url, banner.version
    ));

    client
        .post("predict", features)
        .await
        .context("Prediction request failed")
}

/// Classify with locally loaded artifacts
fn local_predict(cli: &Cli, features: &PatientFeatures) -> Result<PredictionResponse> {
    let predictor = SvmPredictor::load(
        Path::new(&cli.scaler),
        Path::new(&cli.model),
        None,
        None,
    )
    .context("Failed to load model artifacts")?;

    let prediction = predictor
        .predict(features)
        .context("Prediction failed")?;

    Ok(PredictionResponse {
        prediction: prediction.prediction,
        confidence_score: prediction.confidence_score,
        result_text: prediction.result_text,
        model_version: prediction.model_version,
    })
}
