//! Image URLs for the CDN
//!
//! The CDN transforms images on the fly, based on directives in the path of the URL. Everything
//! in here is string handling: the CDN is never contacted to check if a URL can be served.

use core::fmt;

pub use presets::AUTO_TAGGING;
pub use presets::AiTransform;
pub use presets::TRAVEL_PRESETS;
pub use presets::TRANSFORMS;
pub use presets::background_replace;
pub use presets::generative_fill;
pub use presets::generative_remove;
pub use presets::preset;
pub use presets::recolor;
pub use processing::BatchImage;
pub use processing::BatchResult;
pub use processing::ProcessedImage;
pub use processing::ProcessingSettings;
pub use processing::batch_process;
pub use processing::process_image;
pub use tagging::ContentAnalysis;
pub use tagging::analyze_content;
pub use tagging::generate_travel_tags;

mod presets;
mod processing;
mod tagging;

/// Every CDN URL starts with this
pub const CDN_URL_PREFIX: &str = "https://res.cloudinary.com/";

/// Separates the cloud name from the asset
const UPLOAD_SEGMENT: &str = "/image/upload/";

/// Image errors
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The URL does not point to the CDN
    NotCdnUrl(String),

    /// An aspect ratio that is not `<width>:<height>`
    InvalidAspectRatio(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotCdnUrl(url) => {
                write!(f, "Only Cloudinary URLs can be processed with AI: {url}")
            }
            Error::InvalidAspectRatio(ratio) => write!(f, "Invalid aspect ratio: {ratio}"),
        }
    }
}

/// Does the URL point to the CDN?
pub fn is_cdn_url(url: &str) -> bool {
    url.starts_with(CDN_URL_PREFIX)
}

/// An asset on the CDN, borrowed from its URL
#[derive(Debug, PartialEq, Eq)]
pub struct CdnAsset<'a> {
    /// Account on the CDN
    pub cloud_name: &'a str,

    /// Version segment, without the trailing slash: `v1699999999`
    pub version: Option<&'a str>,

    /// Asset identifier, everything after the version
    pub public_id: &'a str,
}

impl<'a> CdnAsset<'a> {
    /// Parse a CDN URL
    ///
    /// ```rust
    /// let asset = CdnAsset::parse("https://res.cloudinary.com/demo/image/upload/v1/krakow.jpg");
    /// assert_eq!(asset.unwrap().public_id, "krakow.jpg");
    /// ```
    pub fn parse(url: &'a str) -> Option<Self> {
        let rest = url.strip_prefix(CDN_URL_PREFIX)?;
        let (cloud_name, rest) = rest.split_once('/')?;
        let rest = rest.strip_prefix(&UPLOAD_SEGMENT[1..])?;

        if cloud_name.is_empty() || rest.is_empty() {
            return None;
        }

        let (version, public_id) = match rest.split_once('/') {
            Some((segment, public_id)) if is_version(segment) && !public_id.is_empty() => {
                (Some(segment), public_id)
            }
            _ => (None, rest),
        };

        Some(Self {
            cloud_name,
            version,
            public_id,
        })
    }

    /// URL of the asset with directives in front of it
    fn with_directives(&self, directives: &str) -> String {
        let mut url = format!("{CDN_URL_PREFIX}{}{UPLOAD_SEGMENT}{directives}/", self.cloud_name);

        if let Some(version) = self.version {
            url.push_str(version);
            url.push('/');
        }

        url.push_str(self.public_id);

        url
    }
}

/// Version segments look like `v1699999999`
fn is_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// What to do with an image
#[derive(Clone, Copy, Debug)]
pub enum Transformation<'a> {
    /// One of the named presets, see [`preset`]
    Preset(&'a str),

    /// Directives as the CDN understands them: `w_400,h_300,c_fill`
    Raw(&'a str),

    /// Key/value pairs, joined as `key_value`
    Options(&'a [(&'a str, &'a str)]),
}

impl Transformation<'_> {
    /// The directives of the transformation, empty when there is nothing to do
    fn directives(&self) -> String {
        match self {
            Transformation::Preset(name) => preset(name).unwrap_or_default().to_string(),
            Transformation::Raw(directives) => directives.trim().trim_matches('/').to_string(),
            Transformation::Options(options) => options
                .iter()
                .map(|(key, value)| format!("{key}_{value}"))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// The result of formatting an image URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Formatting {
    /// The directives are applied
    Formatted(String),

    /// Nothing to do: not a CDN URL, or no directives
    Unchanged(String),
}

impl Formatting {
    /// Were the directives applied?
    pub fn is_formatted(&self) -> bool {
        matches!(self, Self::Formatted(_))
    }

    /// The resulting URL
    pub fn as_str(&self) -> &str {
        match self {
            Self::Formatted(url) | Self::Unchanged(url) => url,
        }
    }

    /// Take the resulting URL
    pub fn into_url(self) -> String {
        match self {
            Self::Formatted(url) | Self::Unchanged(url) => url,
        }
    }
}

/// Apply a transformation to an image URL
///
/// URLs that do not point to the CDN come back unchanged
pub fn format_url(url: &str, transformation: Transformation<'_>) -> Formatting {
    let Some(asset) = CdnAsset::parse(url) else {
        return Formatting::Unchanged(url.to_string());
    };

    let directives = transformation.directives();
    if directives.is_empty() {
        return Formatting::Unchanged(url.to_string());
    }

    Formatting::Formatted(asset.with_directives(&directives))
}

/// Upscale an image with AI, optionally to a target width
pub fn upscale(url: &str, target_width: Option<u32>) -> Formatting {
    let mut directives = String::from("e_upscale");

    if let Some(width) = target_width {
        directives.push_str(&format!(",w_{width}"));
    }

    directives.push_str(",c_scale,q_auto:good,f_auto");

    format_url(url, Transformation::Raw(&directives))
}

/// Width and height of an aspect ratio like `16:9`
pub fn parse_aspect_ratio(aspect_ratio: &str) -> Result<(u32, u32), Error> {
    let invalid = || Error::InvalidAspectRatio(aspect_ratio.to_string());

    let (width, height) = aspect_ratio.split_once(':').ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;

    if width == 0 || height == 0 {
        return Err(invalid());
    }

    Ok((width, height))
}

/// Change the aspect ratio of an image, generating the missing parts
pub fn aspect_ratio_fill(url: &str, aspect_ratio: &str, width: u32) -> Result<Formatting, Error> {
    let (ratio_width, ratio_height) = parse_aspect_ratio(aspect_ratio)?;

    // rounded half up, without leaving integers
    let height = (u64::from(width) * u64::from(ratio_height) + u64::from(ratio_width) / 2)
        / u64::from(ratio_width);
    let height =
        u32::try_from(height).map_err(|_| Error::InvalidAspectRatio(aspect_ratio.to_string()))?;

    let directives = [
        format!("w_{width}"),
        format!("h_{height}"),
        format!("ar_{ratio_width}:{ratio_height}"),
        "c_pad".to_string(),
        "e_gen_fill".to_string(),
        "q_auto:good".to_string(),
        "f_auto".to_string(),
    ]
    .join(",");

    Ok(format_url(url, Transformation::Raw(&directives)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KRAKOW: &str = "https://res.cloudinary.com/df3i1avwb/image/upload/v1718000000/destinations/krakow-market.jpg";

    #[test]
    fn test_parse_asset() {
        let asset = CdnAsset::parse(KRAKOW).unwrap();
        assert_eq!("df3i1avwb", asset.cloud_name);
        assert_eq!(Some("v1718000000"), asset.version);
        assert_eq!("destinations/krakow-market.jpg", asset.public_id);

        let asset = CdnAsset::parse("https://res.cloudinary.com/demo/image/upload/tatra.jpg").unwrap();
        assert_eq!(None, asset.version);
        assert_eq!("tatra.jpg", asset.public_id);

        assert!(CdnAsset::parse("https://res.cloudinary.com/demo/video/upload/a.mp4").is_none());
        assert!(CdnAsset::parse("https://res.cloudinary.com/demo/image/upload/").is_none());
        assert!(CdnAsset::parse("/images/placeholder.jpg").is_none());
    }

    #[test]
    fn test_non_cdn_url_is_unchanged() {
        let url = "/images/placeholder.jpg";

        let formatting = format_url(url, Transformation::Preset("destination-card-ai"));
        assert_eq!(Formatting::Unchanged(url.to_string()), formatting);

        assert_eq!(Formatting::Unchanged(url.to_string()), upscale(url, Some(1600)));

        let url = "https://images.example.com/image/upload/v1/krakow.jpg";
        assert!(!format_url(url, Transformation::Raw("w_400")).is_formatted());
    }

    #[test]
    fn test_upscale_keeps_asset() {
        let formatting = upscale(KRAKOW, None);
        assert!(formatting.is_formatted());
        assert_eq!(
            "https://res.cloudinary.com/df3i1avwb/image/upload/e_upscale,c_scale,q_auto:good,f_auto/v1718000000/destinations/krakow-market.jpg",
            formatting.as_str()
        );

        let formatting = upscale(KRAKOW, Some(1600));
        assert!(formatting.as_str().contains("e_upscale,w_1600,"));
        assert!(formatting.as_str().ends_with("/destinations/krakow-market.jpg"));
    }

    #[test]
    fn test_presets_and_options() {
        let formatting = format_url(KRAKOW, Transformation::Preset("social-media-ai"));
        assert!(formatting.as_str().contains("/w_1200,h_630,c_fill,g_auto,"));

        let formatting = format_url(KRAKOW, Transformation::Preset("nature"));
        assert!(formatting.as_str().contains("/e_improve:outdoor,e_saturation:20,e_vibrance:15/"));

        let formatting = format_url(KRAKOW, Transformation::Preset("does-not-exist"));
        assert_eq!(Formatting::Unchanged(KRAKOW.to_string()), formatting);

        let formatting = format_url(KRAKOW, Transformation::Options(&[("w", "400"), ("c", "fill")]));
        assert!(formatting.as_str().contains("/upload/w_400,c_fill/v1718000000/"));

        let formatting = format_url(KRAKOW, Transformation::Raw("  "));
        assert!(!formatting.is_formatted());
    }

    #[test]
    fn test_aspect_ratio_fill() {
        let formatting = aspect_ratio_fill(KRAKOW, "16:9", 800).unwrap();
        assert!(
            formatting
                .as_str()
                .contains("/w_800,h_450,ar_16:9,c_pad,e_gen_fill,q_auto:good,f_auto/")
        );

        assert_eq!(
            Err(Error::InvalidAspectRatio("16/9".to_string())),
            aspect_ratio_fill(KRAKOW, "16/9", 800)
        );
        assert!(parse_aspect_ratio("0:9").is_err());

        let formatting = aspect_ratio_fill(KRAKOW, "3:2", 1001).unwrap();
        assert!(formatting.as_str().contains("/w_1001,h_667,"));

        assert_eq!(
            Err(Error::InvalidAspectRatio("1:4294967295".to_string())),
            aspect_ratio_fill(KRAKOW, "1:4294967295", u32::MAX)
        );
        assert_eq!(Ok((4, 3)), parse_aspect_ratio("4:3"));
    }
}
