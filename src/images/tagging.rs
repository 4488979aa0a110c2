//! Tagging of travel images
//!
//! Tags are derived from keywords in the URL and name of an image, using fixed tables. There is
//! no inference involved, the same input always gives the same tags.

use serde::Serialize;

/// Tags every image gets
const BASE_TAGS: &[&str] = &["polen", "travel", "tourism"];

/// Location tags, matched against the URL
const LOCATION_TAGS: &[(&[&str], &[&str])] = &[
    (
        &["krakow", "cracow"],
        &["krakow", "małopolska", "historic-city", "unesco"],
    ),
    (&["tatra"], &["tatra", "mountains", "nature", "hiking"]),
    (
        &["gdansk"],
        &["gdansk", "baltic-sea", "historic-city", "hanseatic"],
    ),
    (
        &["bialowieza"],
        &["bialowieza", "forest", "unesco", "nature", "wildlife"],
    ),
    (
        &["wroclaw"],
        &["wrocław", "lower-silesia", "historic-city", "architecture"],
    ),
];

/// Generate travel tags for an image URL
///
/// The base tags always come first, followed by the tags of every location found in the URL
pub fn generate_travel_tags(url: &str) -> Vec<String> {
    let url = url.to_lowercase();

    let mut tags = BASE_TAGS
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    for (keywords, location_tags) in LOCATION_TAGS {
        if keywords.iter().any(|keyword| url.contains(keyword)) {
            tags.extend(location_tags.iter().map(ToString::to_string));
        }
    }

    tags
}

/// A rule of the content analysis
struct Rule {
    /// Any of these keywords triggers the rule
    keywords: &'static [&'static str],

    /// Tag, confidence and category of the tag
    tags: &'static [(&'static str, f64, &'static str)],

    /// Categories of the image
    categories: &'static [&'static str],
}

const BASE_RULE: Rule = Rule {
    keywords: &[],
    tags: &[
        ("polen", 0.95, "location"),
        ("travel", 0.92, "activity"),
        ("tourism", 0.88, "activity"),
    ],
    categories: &["travel", "destinations"],
};

const RULES: &[Rule] = &[
    Rule {
        keywords: &["krakow", "krakau"],
        tags: &[
            ("krakow", 0.98, "location"),
            ("historic-city", 0.85, "characteristic"),
            ("unesco-world-heritage", 0.82, "classification"),
            ("medieval", 0.78, "period"),
        ],
        categories: &["cities", "culture", "history"],
    },
    Rule {
        keywords: &["warsaw", "warszawa"],
        tags: &[
            ("warsaw", 0.97, "location"),
            ("capital-city", 0.94, "classification"),
            ("modern", 0.81, "characteristic"),
            ("business-district", 0.75, "area"),
        ],
        categories: &["cities", "business", "modern"],
    },
    Rule {
        keywords: &["gdansk"],
        tags: &[
            ("gdansk", 0.96, "location"),
            ("baltic-sea", 0.89, "geographic"),
            ("hanseatic-city", 0.84, "classification"),
            ("amber", 0.76, "specialty"),
        ],
        categories: &["coastal", "historic", "maritime"],
    },
    Rule {
        keywords: &["tatra", "zakopane"],
        tags: &[
            ("tatra-mountains", 0.93, "geographic"),
            ("hiking", 0.87, "activity"),
            ("skiing", 0.82, "activity"),
            ("mountain-resort", 0.79, "classification"),
        ],
        categories: &["mountains", "outdoor", "nature"],
    },
    Rule {
        keywords: &["nature", "natuur", "park"],
        tags: &[
            ("nature-park", 0.88, "classification"),
            ("wildlife", 0.84, "nature"),
            ("hiking-trails", 0.81, "activity"),
            ("conservation", 0.75, "concept"),
        ],
        categories: &["nature", "outdoor", "conservation"],
    },
    Rule {
        keywords: &["castle", "kasteel", "palace"],
        tags: &[
            ("castle", 0.91, "architecture"),
            ("medieval-architecture", 0.86, "style"),
            ("fortification", 0.82, "classification"),
            ("royal-residence", 0.78, "function"),
        ],
        categories: &["architecture", "history", "attractions"],
    },
    Rule {
        keywords: &["church", "kerk", "cathedral"],
        tags: &[
            ("church", 0.89, "architecture"),
            ("religious-architecture", 0.85, "style"),
            ("gothic", 0.79, "style"),
            ("baroque", 0.72, "style"),
        ],
        categories: &["architecture", "religion", "culture"],
    },
    Rule {
        keywords: &["restaurant", "food", "eten"],
        tags: &[
            ("polish-cuisine", 0.87, "food"),
            ("traditional-food", 0.84, "characteristic"),
            ("local-specialties", 0.81, "food"),
            ("dining", 0.79, "activity"),
        ],
        categories: &["food", "restaurants", "culture"],
    },
    Rule {
        keywords: &["winter", "snow"],
        tags: &[
            ("winter", 0.85, "season"),
            ("snow", 0.82, "weather"),
            ("winter-sports", 0.78, "activity"),
        ],
        categories: &[],
    },
    Rule {
        keywords: &["summer", "festival"],
        tags: &[
            ("summer", 0.83, "season"),
            ("festivals", 0.80, "activity"),
            ("cultural-events", 0.77, "activity"),
        ],
        categories: &[],
    },
];

/// A tag with how sure the analysis is about it
#[derive(Debug, PartialEq, Serialize)]
pub struct ScoredTag {
    pub tag: &'static str,
    pub confidence: f64,
    pub category: &'static str,
}

/// Outcome of analyzing an image
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    /// All tags, in the order the rules matched
    pub tags: Vec<ScoredTag>,

    /// Unique categories, in the order they were found
    pub categories: Vec<&'static str>,

    /// Average confidence of the tags, rounded to two decimals
    pub confidence: f64,

    /// Travel content is always appropriate
    pub is_appropriate: bool,
}

/// Analyze the content of an image based on its URL and name
pub fn analyze_content(url: &str, name: &str) -> ContentAnalysis {
    let combined = format!("{url} {name}").to_lowercase();

    let matched = core::iter::once(&BASE_RULE).chain(
        RULES
            .iter()
            .filter(|rule| rule.keywords.iter().any(|keyword| combined.contains(keyword))),
    );

    let mut tags = Vec::new();
    let mut categories = Vec::<&'static str>::new();

    for rule in matched {
        tags.extend(
            rule.tags
                .iter()
                .map(|&(tag, confidence, category)| ScoredTag {
                    tag,
                    confidence,
                    category,
                }),
        );

        for category in rule.categories {
            if !categories.contains(category) {
                categories.push(category);
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average = tags.iter().map(|tag| tag.confidence).sum::<f64>() / tags.len() as f64;

    ContentAnalysis {
        tags,
        categories,
        confidence: (average * 100.0).round() / 100.0,
        is_appropriate: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_tags() {
        assert_eq!(vec!["polen", "travel", "tourism"], generate_travel_tags("/images/a.jpg"));

        let tags = generate_travel_tags("https://res.cloudinary.com/x/image/upload/Krakow-Tatra.jpg");
        assert_eq!(
            vec![
                "polen",
                "travel",
                "tourism",
                "krakow",
                "małopolska",
                "historic-city",
                "unesco",
                "tatra",
                "mountains",
                "nature",
                "hiking",
            ],
            tags
        );
    }

    #[test]
    fn test_analyze_base_only() {
        let analysis = analyze_content("/images/a.jpg", "Unknown");

        assert_eq!(3, analysis.tags.len());
        assert_eq!(vec!["travel", "destinations"], analysis.categories);
        // (0.95 + 0.92 + 0.88) / 3
        assert!((analysis.confidence - 0.92).abs() < f64::EPSILON);
        assert!(analysis.is_appropriate);
    }

    #[test]
    fn test_analyze_deduplicates_categories() {
        let analysis = analyze_content("/images/wawel-castle.jpg", "Kerk in Krakau");

        let tags = analysis.tags.iter().map(|tag| tag.tag).collect::<Vec<_>>();
        assert!(tags.contains(&"krakow"));
        assert!(tags.contains(&"castle"));
        assert!(tags.contains(&"church"));

        assert_eq!(
            vec![
                "travel",
                "destinations",
                "cities",
                "culture",
                "history",
                "architecture",
                "attractions",
                "religion",
            ],
            analysis.categories
        );
    }
}
