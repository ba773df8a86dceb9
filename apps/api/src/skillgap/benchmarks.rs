use serde::{Deserialize, Serialize};

/// A required skill and how strongly it is weighted (0–100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    pub skill: String,
    pub benchmark: i32,
}

impl Benchmark {
    pub fn new(skill: impl Into<String>, benchmark: i32) -> Self {
        Self {
            skill: skill.into(),
            benchmark: benchmark.clamp(0, 100),
        }
    }
}

const GOOGLE: &[(&str, i32)] = &[
    ("MCP Servers", 95),
    ("AI Security", 90),
    ("Python", 85),
    ("System Design", 80),
    ("Kubernetes", 75),
];

const META: &[(&str, i32)] = &[
    ("Agentic AI", 95),
    ("React Internals", 90),
    ("Hack Language", 80),
    ("Performance Optimization", 85),
    ("GraphQL", 80),
];

const AMAZON: &[(&str, i32)] = &[
    ("AWS Lambda", 90),
    ("DynamoDB", 85),
    ("Java", 80),
    ("Microservices", 85),
    ("Distributed Systems", 90),
];

pub const COMPANIES: [&str; 3] = ["Google", "Meta", "Amazon"];

/// Preset benchmarks for a known company, matched case-insensitively.
/// Returns the canonical company name alongside its skills.
pub fn company_benchmarks(company: &str) -> Option<(&'static str, Vec<Benchmark>)> {
    let company = company.trim();
    let (name, table) = if company.eq_ignore_ascii_case("google") {
        ("Google", GOOGLE)
    } else if company.eq_ignore_ascii_case("meta") {
        ("Meta", META)
    } else if company.eq_ignore_ascii_case("amazon") {
        ("Amazon", AMAZON)
    } else {
        return None;
    };

    Some((
        name,
        table
            .iter()
            .map(|(skill, score)| Benchmark::new(*skill, *score))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_company_has_five_skills() {
        for company in COMPANIES {
            let (name, skills) = company_benchmarks(company).unwrap();
            assert_eq!(name, company);
            assert_eq!(skills.len(), 5);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let (name, skills) = company_benchmarks(" meta ").unwrap();
        assert_eq!(name, "Meta");
        assert_eq!(skills[0], Benchmark::new("Agentic AI", 95));
    }

    #[test]
    fn test_unknown_company() {
        assert!(company_benchmarks("Initech").is_none());
    }

    #[test]
    fn test_benchmark_is_clamped() {
        assert_eq!(Benchmark::new("Rust", 140).benchmark, 100);
        assert_eq!(Benchmark::new("Rust", -3).benchmark, 0);
    }
}
