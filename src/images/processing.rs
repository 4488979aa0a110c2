//! Pre-processing of images with AI enhancements
//!
//! Builds the URL of the enhanced image and its tags, the CDN does the actual work when the URL
//! is requested.

use serde::Deserialize;
use serde::Serialize;

use super::CdnAsset;
use super::Error;
use super::Transformation;
use super::format_url;
use super::generate_travel_tags;
use super::parse_aspect_ratio;

/// Which enhancements to apply
///
/// Missing values fall back to the defaults for travel content
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingSettings {
    /// Upscale the image
    pub upscale: Option<bool>,

    /// Target aspect ratio for the generative fill
    pub aspect_ratio: Option<String>,

    /// Generate the missing parts when changing the aspect ratio
    pub generative_fill: Option<bool>,
}

/// The settings after applying the defaults
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveSettings {
    pub upscale: bool,
    pub aspect_ratio: Option<String>,
    pub generative_fill: bool,
    pub auto_tags: Vec<String>,
}

impl ProcessingSettings {
    /// Aspect ratio used when none is given
    const DEFAULT_ASPECT_RATIO: &'static str = "4:3";

    fn effective(&self) -> EffectiveSettings {
        EffectiveSettings {
            upscale: self.upscale.unwrap_or(true),
            aspect_ratio: Some(
                self.aspect_ratio
                    .clone()
                    .unwrap_or_else(|| Self::DEFAULT_ASPECT_RATIO.to_string()),
            ),
            generative_fill: self.generative_fill.unwrap_or(true),
            auto_tags: Vec::new(),
        }
    }
}

/// An image with its enhancements applied
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedImage {
    /// URL of the enhanced image
    pub ai_image_url: String,

    /// The settings that were applied
    pub settings: EffectiveSettings,

    /// Travel tags of the image
    pub tags: Vec<String>,
}

/// Process a single image with AI enhancements
///
/// Only images on the CDN can be processed
pub fn process_image(url: &str, settings: &ProcessingSettings) -> Result<ProcessedImage, Error> {
    if CdnAsset::parse(url).is_none() {
        return Err(Error::NotCdnUrl(url.to_string()));
    }

    let mut settings = settings.effective();
    let mut ai_image_url = url.to_string();

    if settings.upscale {
        ai_image_url = format_url(&ai_image_url, Transformation::Raw("e_upscale")).into_url();
    }

    if let (true, Some(aspect_ratio)) = (settings.generative_fill, &settings.aspect_ratio) {
        let (width, height) = parse_aspect_ratio(aspect_ratio)?;
        let directives = format!("e_gen_fill,ar_{width}:{height},c_pad");

        ai_image_url = format_url(&ai_image_url, Transformation::Raw(&directives)).into_url();
    }

    let tags = generate_travel_tags(url);
    settings.auto_tags.clone_from(&tags);

    tracing::debug!("Processed image {url} into {ai_image_url}");

    Ok(ProcessedImage {
        ai_image_url,
        settings,
        tags,
    })
}

/// An image to process in a batch
#[derive(Clone, Debug, Deserialize)]
pub struct BatchImage {
    pub id: i32,
    pub url: String,
}

/// Outcome of a single image in a batch
#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub id: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ProcessedImage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Process multiple images, a failing image does not stop the others
pub fn batch_process(images: &[BatchImage], settings: &ProcessingSettings) -> Vec<BatchResult> {
    images
        .iter()
        .map(|image| match process_image(&image.url, settings) {
            Ok(result) => BatchResult {
                id: image.id,
                result: Some(result),
                error: None,
            },
            Err(err) => BatchResult {
                id: image.id,
                result: None,
                error: Some(err.to_string()),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GDANSK: &str = "https://res.cloudinary.com/df3i1avwb/image/upload/v1/gdansk.jpg";

    #[test]
    fn test_process_with_defaults() {
        let processed = process_image(GDANSK, &ProcessingSettings::default()).unwrap();

        assert_eq!(
            "https://res.cloudinary.com/df3i1avwb/image/upload/e_gen_fill,ar_4:3,c_pad/e_upscale/v1/gdansk.jpg",
            processed.ai_image_url
        );
        assert!(processed.settings.upscale);
        assert!(processed.settings.generative_fill);
        assert_eq!(Some("4:3".to_string()), processed.settings.aspect_ratio);
        assert!(processed.tags.contains(&"baltic-sea".to_string()));
        assert_eq!(processed.tags, processed.settings.auto_tags);
    }

    #[test]
    fn test_process_without_enhancements() {
        let settings = ProcessingSettings {
            upscale: Some(false),
            aspect_ratio: None,
            generative_fill: Some(false),
        };

        let processed = process_image(GDANSK, &settings).unwrap();
        assert_eq!(GDANSK, processed.ai_image_url);
    }

    #[test]
    fn test_process_rejects_local_images() {
        assert_eq!(
            Err(Error::NotCdnUrl("/images/gdansk.jpg".to_string())),
            process_image("/images/gdansk.jpg", &ProcessingSettings::default())
        );
    }

    #[test]
    fn test_batch_keeps_going() {
        let images = [
            BatchImage {
                id: 1,
                url: "/images/local.jpg".to_string(),
            },
            BatchImage {
                id: 2,
                url: GDANSK.to_string(),
            },
        ];

        let results = batch_process(&images, &ProcessingSettings::default());
        assert_eq!(2, results.len());
        assert!(results[0].error.is_some());
        assert!(results[1].result.is_some());
    }
}
