//! Named transformations for travel images

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Serialize;

/// Characters `encodeURIComponent` leaves alone
const PROMPT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A named AI transformation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiTransform {
    /// Key to refer to the transformation
    pub name: &'static str,

    pub description: &'static str,

    /// Directives for the CDN
    pub transformation: &'static str,

    /// Where the transformation is used on the site
    pub use_case: &'static str,

    /// AI features the transformation relies on
    pub ai_features: &'static [&'static str],
}

/// All named AI transformations
pub const TRANSFORMS: &[AiTransform] = &[
    AiTransform {
        name: "travel-hero-enhanced",
        description: "AI-enhanced hero images with smart cropping and upscaling",
        transformation: "w_1200,h_600,c_fill,g_auto,e_upscale,e_auto_contrast,e_saturation:10,q_auto:good,f_auto",
        use_case: "Hero sections of destinations",
        ai_features: &["Smart Cropping", "AI Upscaling", "Auto Enhancement"],
    },
    AiTransform {
        name: "destination-card-ai",
        description: "Destination cards with automatic enhancement",
        transformation: "w_400,h_300,c_fill,g_auto,e_improve,e_auto_brightness,e_auto_contrast,q_auto:good,f_auto",
        use_case: "Destination cards on the homepage",
        ai_features: &["Smart Cropping", "Auto Enhancement", "Quality Improvement"],
    },
    AiTransform {
        name: "travel-photo-professional",
        description: "Professional travel photography enhancement",
        transformation: "w_800,h_600,c_fill,g_auto,e_improve:outdoor,e_saturation:15,e_brightness:5,q_auto:good,f_auto",
        use_case: "Travel photo galleries and activities",
        ai_features: &["Outdoor Enhancement", "Color Enhancement", "Professional Quality"],
    },
    AiTransform {
        name: "background-remove-replace",
        description: "Background removal for product shots and portraits",
        transformation: "e_background_removal,w_800,h_600,c_pad,b_white,q_auto:good,f_auto",
        use_case: "Restaurant and hotel product images, staff portraits",
        ai_features: &["AI Background Removal", "Smart Padding"],
    },
    AiTransform {
        name: "mobile-optimized-ai",
        description: "Mobile-first AI optimization",
        transformation: "w_375,h_250,c_fill,g_auto,dpr_2.0,e_improve,q_auto:low,f_auto",
        use_case: "Mobile devices",
        ai_features: &["Smart Cropping", "Device Optimization", "Bandwidth Optimization"],
    },
    AiTransform {
        name: "social-media-ai",
        description: "AI-optimized for social media sharing",
        transformation: "w_1200,h_630,c_fill,g_auto,e_improve,e_saturation:10,q_80,f_auto",
        use_case: "Open Graph and social media previews",
        ai_features: &["Smart Cropping", "Social Optimization", "Enhanced Colors"],
    },
];

/// Enhancements per kind of travel photo
pub const TRAVEL_PRESETS: &[(&str, &str)] = &[
    ("nature", "e_improve:outdoor,e_saturation:20,e_vibrance:15"),
    ("architecture", "e_improve:indoor,e_auto_contrast,e_sharpen:100"),
    ("food", "e_improve:indoor,e_saturation:15,e_vibrance:20,e_auto_brightness"),
    ("people", "e_improve:indoor,g_faces,e_saturation:10"),
    ("landscape", "e_improve:outdoor,e_saturation:25,e_auto_contrast"),
];

/// Upload parameters for automatic tagging on the CDN
pub const AUTO_TAGGING: &[(&str, &str)] = &[
    ("amazonRekognition", "categorization=aws_rek_tagging,auto_tagging=0.7"),
    ("googleVision", "categorization=google_tagging,auto_tagging=0.6"),
    ("imaggaTravel", "categorization=imagga_tagging,auto_tagging=0.5"),
    ("contentModeration", "moderation=aws_rek"),
];

/// Directives of a named transformation or travel preset
pub fn preset(name: &str) -> Option<&'static str> {
    TRANSFORMS
        .iter()
        .find(|transform| transform.name == name)
        .map(|transform| transform.transformation)
        .or_else(|| {
            TRAVEL_PRESETS
                .iter()
                .find(|(preset, _)| *preset == name)
                .map(|(_, directives)| *directives)
        })
}

/// Encode a prompt the way the CDN expects it in a directive
fn encode_prompt(prompt: &str) -> String {
    utf8_percent_encode(prompt, PROMPT).to_string()
}

/// Replace the background based on a prompt
pub fn background_replace(prompt: &str) -> String {
    format!("e_gen_background_replace:prompt_{}", encode_prompt(prompt))
}

/// Pad to an aspect ratio, generating the missing parts
pub fn generative_fill(aspect_ratio: &str) -> String {
    format!("ar_{aspect_ratio},c_pad,e_gen_fill")
}

/// Remove objects described by a prompt
pub fn generative_remove(prompt: &str) -> String {
    format!("e_gen_remove:prompt_{}", encode_prompt(prompt))
}

/// Recolor objects described by a prompt
pub fn recolor(prompt: &str) -> String {
    format!("e_gen_recolor:prompt_{}", encode_prompt(prompt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            Some("w_375,h_250,c_fill,g_auto,dpr_2.0,e_improve,q_auto:low,f_auto"),
            preset("mobile-optimized-ai")
        );
        assert_eq!(Some("e_improve:indoor,g_faces,e_saturation:10"), preset("people"));
        assert_eq!(None, preset("Nature"));
    }

    #[test]
    fn test_generative_directives() {
        assert_eq!(
            "e_gen_background_replace:prompt_Wawel%20castle%20at%20sunset",
            background_replace("Wawel castle at sunset")
        );
        assert_eq!("e_gen_remove:prompt_people's%20bikes%2Ccars", generative_remove("people's bikes,cars"));
        assert_eq!("e_gen_recolor:prompt_roof%3Bred", recolor("roof;red"));
        assert_eq!("ar_16:9,c_pad,e_gen_fill", generative_fill("16:9"));
    }
}
