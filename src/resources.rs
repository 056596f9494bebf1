use serde::Serialize;

/// Sentinel meaning "no constraint" for language/category filters.
pub const ALL: &str = "all";

/// Static reference entry in the resource directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub name: &'static str,
    pub url: &'static str,
    pub language: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

static DIRECTORY: [Resource; 9] = [
    Resource {
        name: "National Mental Health Program",
        url: "https://www.nimhans.ac.in/national-mental-health-programme-nmhp/",
        language: "English",
        category: "Government Program",
        description: "Comprehensive mental health initiative by the Government of India",
    },
    Resource {
        name: "Manodarpan",
        url: "https://manodarpan.education.gov.in/",
        language: "Hindi",
        category: "Student Support",
        description: "An initiative to provide psychosocial support to students for their mental health and well-being",
    },
    Resource {
        name: "Mindfulness Meditation Guide",
        url: "https://www.mindful.org/meditation/mindfulness-getting-started/",
        language: "English",
        category: "Self-Help",
        description: "Beginner's guide to mindfulness meditation practices",
    },
    Resource {
        name: "Yoga for Stress Relief",
        url: "https://www.youtube.com/watch?v=4pKly2JojMw",
        language: "Hindi",
        category: "Exercise",
        description: "Yoga routines specifically designed for stress management",
    },
    Resource {
        name: "Vandrevala Foundation",
        url: "https://www.vandrevalafoundation.com/",
        language: "English",
        category: "Crisis Support",
        description: "24/7 mental health helpline and support services",
    },
    Resource {
        name: "Mental Health Awareness",
        url: "https://www.mhanational.org/",
        language: "English",
        category: "Education",
        description: "Resources for understanding and managing mental health conditions",
    },
    Resource {
        name: "आत्म-सहायता गाइड",
        url: "https://www.mind.org.in/",
        language: "Hindi",
        category: "Self-Help",
        description: "मानसिक स्वास्थ्य के लिए स्व-सहायता संसाधन और मार्गदर्शिका",
    },
    Resource {
        name: "Therapy Worksheets",
        url: "https://www.therapistaid.com/",
        language: "English",
        category: "Self-Help",
        description: "Free therapy worksheets and tools for mental health professionals and clients",
    },
    Resource {
        name: "Sleep Foundation",
        url: "https://www.sleepfoundation.org/",
        language: "English",
        category: "Sleep",
        description: "Comprehensive resources for improving sleep quality and addressing sleep disorders",
    },
];

/// The built-in directory, in presentation order.
pub fn directory() -> &'static [Resource] {
    &DIRECTORY
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Distinct languages in first-appearance order (the UI prepends "all").
pub fn languages(resources: &'static [Resource]) -> Vec<&'static str> {
    distinct(resources.iter().map(|resource| resource.language))
}

/// Distinct categories in first-appearance order.
pub fn categories(resources: &'static [Resource]) -> Vec<&'static str> {
    distinct(resources.iter().map(|resource| resource.category))
}

/// Three independent predicates combined with AND. "all" (or an empty
/// query) disables the corresponding predicate.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    language: Option<String>,
    category: Option<String>,
    query: Option<String>,
}

impl ResourceFilter {
    pub fn new(language: &str, category: &str, query: &str) -> Self {
        let constraint = |value: &str| {
            if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
                None
            } else {
                Some(value.to_string())
            }
        };
        Self {
            language: constraint(language),
            category: constraint(category),
            query: if query.is_empty() {
                None
            } else {
                Some(query.to_lowercase())
            },
        }
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(language) = &self.language {
            if resource.language != language {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if resource.category != category {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let hit = resource.name.to_lowercase().contains(query)
                || resource.description.to_lowercase().contains(query)
                || resource.category.to_lowercase().contains(query);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Stable filter: the result is a subsequence of the input.
pub fn filter_resources(resources: &[Resource], filter: &ResourceFilter) -> Vec<Resource> {
    resources
        .iter()
        .filter(|resource| filter.matches(resource))
        .copied()
        .collect()
}
