//! Image API endpoints
//!
//! URL building for the CDN, nothing is stored

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::images;
use crate::images::AUTO_TAGGING;
use crate::images::AiTransform;
use crate::images::BatchImage;
use crate::images::BatchResult;
use crate::images::ContentAnalysis;
use crate::images::Formatting;
use crate::images::ProcessedImage;
use crate::images::ProcessingSettings;
use crate::images::TRANSFORMS;
use crate::images::TRAVEL_PRESETS;
use crate::images::Transformation;

use super::Error;
use super::Form;
use super::QueryParameters;
use super::Success;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformQuery {
    url: Option<String>,

    /// Name of a preset
    preset: Option<String>,

    /// Raw directives
    transformation: Option<String>,

    /// A generative effect: `upscale`, `fill`, `background-replace`, `remove` or `recolor`
    effect: Option<String>,

    /// Prompt of the generative effect
    prompt: Option<String>,

    /// Aspect ratio of the fill, `16:9`
    aspect_ratio: Option<String>,

    width: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    url: String,

    /// Were directives applied?
    transformed: bool,
}

impl From<Formatting> for TransformResponse {
    fn from(formatting: Formatting) -> Self {
        Self {
            transformed: formatting.is_formatted(),
            url: formatting.into_url(),
        }
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, Error> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::bad_request(format!("{name} parameter is required")))
}

fn apply_effect(url: &str, effect: &str, query: &TransformQuery) -> Result<Formatting, Error> {
    let prompt = || required(query.prompt.as_deref(), "Prompt");

    let directives = match effect {
        "upscale" => return Ok(images::upscale(url, query.width)),
        "fill" => {
            let aspect_ratio = required(query.aspect_ratio.as_deref(), "Aspect ratio")?;

            if let Some(width) = query.width {
                return images::aspect_ratio_fill(url, aspect_ratio, width)
                    .map_err(Error::bad_request);
            }

            images::parse_aspect_ratio(aspect_ratio).map_err(Error::bad_request)?;
            images::generative_fill(aspect_ratio)
        }
        "background-replace" => images::background_replace(prompt()?),
        "remove" => images::generative_remove(prompt()?),
        "recolor" => images::recolor(prompt()?),
        effect => return Err(Error::bad_request(format!("Unknown effect: {effect}"))),
    };

    Ok(images::format_url(url, Transformation::Raw(&directives)))
}

/// Transform an image URL
///
/// URLs that do not point to the CDN come back unchanged
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:6000/api/images/transform?url=<url>&preset=destination-card-ai'
/// ```
///
/// Response:
/// ```json
/// { "url": "https://res.cloudinary.com/...", "transformed": true }
/// ```
pub async fn transform(
    QueryParameters(query): QueryParameters<TransformQuery>,
) -> Result<Success<TransformResponse>, Error> {
    let url = required(query.url.as_deref(), "URL")?;

    let formatting = if let Some(effect) = query.effect.as_deref() {
        apply_effect(url, effect, &query)?
    } else if let Some(preset) = query.preset.as_deref() {
        images::format_url(url, Transformation::Preset(preset))
    } else if let Some(transformation) = query.transformation.as_deref() {
        images::format_url(url, Transformation::Raw(transformation))
    } else {
        Formatting::Unchanged(url.to_string())
    };

    Ok(Success::ok(formatting.into()))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    url: Option<String>,
    name: Option<String>,
}

/// Analyze the content of an image
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:6000/api/images/analyze?url=<url>&name=Wawel'
/// ```
pub async fn analyze(
    QueryParameters(query): QueryParameters<AnalyzeQuery>,
) -> Result<Success<ContentAnalysis>, Error> {
    let url = required(query.url.as_deref(), "URL")?;

    Ok(Success::ok(images::analyze_content(
        url,
        query.name.as_deref().unwrap_or_default(),
    )))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetsResponse {
    transforms: &'static [AiTransform],
    travel_presets: Map<String, Value>,
    auto_tagging: Map<String, Value>,
}

fn table(entries: &[(&str, &str)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_string(), Value::from(*value)))
        .collect()
}

/// All named transformations and presets
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/images/presets
/// ```
pub async fn presets() -> Success<PresetsResponse> {
    Success::ok(PresetsResponse {
        transforms: TRANSFORMS,
        travel_presets: table(TRAVEL_PRESETS),
        auto_tagging: table(AUTO_TAGGING),
    })
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    url: String,

    #[serde(default)]
    settings: ProcessingSettings,
}

/// Process an image on the CDN with AI enhancements
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "url": "https://res.cloudinary.com/demo/image/upload/v1/krakow.jpg" }' \
///     http://localhost:6000/api/images/process
/// ```
///
/// Response:
/// ```json
/// { "aiImageUrl": "https://res.cloudinary.com/...", "settings": { ... }, "tags": [ "polen", ... ] }
/// ```
pub async fn process(
    Form(request): Form<ProcessRequest>,
) -> Result<Success<ProcessedImage>, Error> {
    let processed = images::process_image(&request.url, &request.settings)
        .map_err(Error::bad_request)?;

    Ok(Success::ok(processed))
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    images: Vec<BatchImage>,

    #[serde(default)]
    settings: ProcessingSettings,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    processed: usize,
    failed: usize,
    results: Vec<BatchResult>,
}

/// Process multiple images, failures are reported per image
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -d '{ "images": [ { "id": 1, "url": "https://res.cloudinary.com/..." } ] }' \
///     http://localhost:6000/api/images/process/batch
/// ```
pub async fn process_batch(Form(request): Form<BatchRequest>) -> Success<BatchResponse> {
    let results = images::batch_process(&request.images, &request.settings);
    let failed = results.iter().filter(|result| result.error.is_some()).count();

    tracing::info!("Processed a batch of {} images, {failed} failed", results.len());

    Success::ok(BatchResponse {
        processed: results.len() - failed,
        failed,
        results,
    })
}
