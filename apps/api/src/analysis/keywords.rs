//! Vocabulary scan shared by the job and resume analyzers.
//!
//! Matching is plain case-insensitive substring containment with no word boundaries,
//! so "java" is reported for a text that only mentions "javascript".

/// Languages, frameworks and cloud/devops tooling recognised in free text.
pub const TECHNICAL_SKILLS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "angular",
    "vue",
    "node.js",
    "express",
    "mongodb",
    "postgresql",
    "mysql",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "git",
    "ci/cd",
    "jenkins",
    "terraform",
    "microservices",
    "api",
    "rest",
    "graphql",
    "typescript",
    "html",
    "css",
    "sass",
    "webpack",
    "babel",
    "redux",
    "next.js",
    "nuxt.js",
    "django",
    "flask",
    "spring",
    "laravel",
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "analytical",
    "project management",
    "agile",
    "scrum",
    "collaboration",
    "mentoring",
    "strategic thinking",
    "innovation",
    "adaptability",
    "time management",
];

/// Returns every vocabulary entry found in `text`, in vocabulary order, each at most once.
pub fn extract(text: &str, vocabulary: &[&str]) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();

    for term in vocabulary {
        let needle = term.to_lowercase();
        if haystack.contains(&needle) && !found.contains(&needle) {
            found.push(needle);
        }
    }

    found
}

/// True when any of `keywords` occurs in the already lower-cased `text`.
pub fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
