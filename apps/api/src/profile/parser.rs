use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::raw_lines;
use crate::profile::vocabulary::{SKILL_KEYWORDS, TITLE_KEYWORDS};
use crate::profile::{ParsedProfile, RAW_TEXT_LIMIT, UNKNOWN_NAME};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

/// "5 years", "5+ years", "2.5 year". Abbreviations such as "yrs" are not matched.
static EXPERIENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*\+?\s*years?").unwrap());

/// Parses recognized résumé text into a profile. Accepts any input, including
/// the empty string.
pub fn parse_profile(text: &str) -> ParsedProfile {
    let lower_text = text.to_lowercase();

    ParsedProfile {
        name: extract_name(text),
        email: extract_email(text),
        total_experience_years: extract_experience_years(&lower_text),
        skills: extract_skills(&lower_text).into_iter().collect(),
        titles: extract_titles(&lower_text).into_iter().collect(),
        raw_text: text.chars().take(RAW_TEXT_LIMIT).collect(),
    }
}

/// First non-blank line, trimmed.
pub fn extract_name(text: &str) -> String {
    raw_lines(text)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(UNKNOWN_NAME)
        .to_string()
}

/// First email-looking token in the original-case text, or empty.
pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Largest "N years" figure in the text; 0.0 when there is none.
pub fn extract_experience_years(lower_text: &str) -> f64 {
    EXPERIENCE_RE
        .captures_iter(lower_text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .fold(0.0, f64::max)
}

pub fn extract_skills(lower_text: &str) -> BTreeSet<String> {
    SKILL_KEYWORDS
        .iter()
        .filter(|skill| lower_text.contains(**skill))
        .map(|skill| skill.to_string())
        .collect()
}

pub fn extract_titles(lower_text: &str) -> BTreeSet<String> {
    raw_lines(lower_text)
        .filter(|line| TITLE_KEYWORDS.iter().any(|word| line.contains(word)))
        .map(|line| line.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JANE_RESUME: &str = "Jane Doe\njane@x.com\nSenior Engineer\n5 years\nPython, AWS, Docker";

    #[test]
    fn test_empty_text_yields_defaults() {
        let profile = parse_profile("");
        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.email, "");
        assert_eq!(profile.total_experience_years, 0.0);
        assert!(profile.skills.is_empty());
        assert!(profile.titles.is_empty());
        assert_eq!(profile.raw_text, "");
    }

    #[test]
    fn test_whitespace_only_text_is_unknown() {
        assert_eq!(parse_profile("   \n\t\n  ").name, "Unknown");
    }

    #[test]
    fn test_name_is_first_non_blank_line_trimmed() {
        assert_eq!(extract_name("\n\n   Ada Lovelace  \nAnalyst"), "Ada Lovelace");
    }

    #[test]
    fn test_email_with_plus_and_subdomain() {
        assert_eq!(
            extract_email("contact: a.b+c@sub.example.co"),
            "a.b+c@sub.example.co"
        );
    }

    #[test]
    fn test_email_first_match_wins_and_keeps_case() {
        assert_eq!(
            extract_email("Mail Jane.Doe@Example.COM or jd@other.org"),
            "Jane.Doe@Example.COM"
        );
    }

    #[test]
    fn test_email_missing_is_empty() {
        assert_eq!(extract_email("no address here @ all"), "");
    }

    #[test]
    fn test_experience_takes_maximum() {
        assert_eq!(extract_experience_years("3 years... 5+ years"), 5.0);
    }

    #[test]
    fn test_experience_decimal_and_singular() {
        assert_eq!(extract_experience_years("2.5 years of go, 1 year of rust"), 2.5);
        assert_eq!(extract_experience_years("10+years"), 10.0);
    }

    #[test]
    fn test_experience_without_pattern_is_zero() {
        assert_eq!(extract_experience_years("seasoned professional"), 0.0);
    }

    #[test]
    fn test_experience_reads_lowercased_text() {
        let profile = parse_profile("7 YEARS in industry");
        assert_eq!(profile.total_experience_years, 7.0);
    }

    #[test]
    fn test_skills_deduplicate_across_case() {
        let profile = parse_profile("Python developer. python scripts. PYTHON tooling.");
        assert_eq!(
            profile.skills.iter().filter(|s| *s == "python").count(),
            1
        );
    }

    #[test]
    fn test_skills_are_substring_matches() {
        let skills = extract_skills("mysql and javascript");
        assert!(skills.contains("mysql"));
        assert!(skills.contains("sql"));
        assert!(skills.contains("javascript"));
        assert!(skills.contains("java"));
    }

    #[test]
    fn test_multiword_skills() {
        let skills = extract_skills("applied machine learning and data science");
        assert!(skills.contains("machine learning"));
        assert!(skills.contains("data science"));
    }

    #[test]
    fn test_skills_are_sorted() {
        let profile = parse_profile("Terraform, Docker, AWS");
        let mut sorted = profile.skills.clone();
        sorted.sort();
        assert_eq!(profile.skills, sorted);
    }

    #[test]
    fn test_titles_collect_trimmed_lowercase_lines() {
        let titles = extract_titles(&"  Lead Developer  \nhobbies: chess\nData Analyst\nlead developer".to_lowercase());
        let titles: Vec<_> = titles.into_iter().collect();
        assert_eq!(titles, vec!["data analyst", "lead developer"]);
    }

    #[test]
    fn test_carriage_return_only_text_splits_lines() {
        let text = "Jane Doe\rSenior Engineer\rPython";
        assert_eq!(extract_name(text), "Jane Doe");
        let titles: Vec<_> = extract_titles(&text.to_lowercase()).into_iter().collect();
        assert_eq!(titles, vec!["senior engineer"]);
    }

    #[test]
    fn test_raw_text_truncated_by_characters() {
        let text = "é".repeat(RAW_TEXT_LIMIT + 10);
        let profile = parse_profile(&text);
        assert_eq!(profile.raw_text.chars().count(), RAW_TEXT_LIMIT);
    }

    #[test]
    fn test_raw_text_keeps_original_case() {
        let profile = parse_profile("Jane DOE");
        assert_eq!(profile.raw_text, "Jane DOE");
    }

    #[test]
    fn test_full_resume() {
        let profile = parse_profile(JANE_RESUME);
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane@x.com");
        assert_eq!(profile.total_experience_years, 5.0);
        for skill in ["python", "aws", "docker"] {
            assert!(profile.skills.iter().any(|s| s == skill), "missing {skill}");
        }
        assert!(profile.titles.iter().any(|t| t.contains("engineer")));
    }
}
