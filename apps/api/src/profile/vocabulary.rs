/// Known technology and methodology terms, lowercase. A term is a skill of the
/// candidate when it occurs anywhere in the lowercased text, so overlapping
/// terms ("sql" in "mysql", "java" in "javascript") match independently.
pub const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "react",
    "node",
    "node.js",
    "aws",
    "lambda",
    "dynamodb",
    "s3",
    "kubernetes",
    "docker",
    "sql",
    "nosql",
    "postgres",
    "mysql",
    "mongodb",
    "terraform",
    "jenkins",
    "git",
    "rest",
    "api",
    "machine learning",
    "data science",
    "pandas",
    "numpy",
];

/// Words that mark a line as a job title.
pub const TITLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "lead",
    "architect",
    "analyst",
];
