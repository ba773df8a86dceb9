/// Questions per mock interview.
pub const INTERVIEW_LENGTH: usize = 4;

pub const CLOSING_MESSAGE: &str = "That concludes the interview. Thank you for your time! \
    I'm analyzing your responses now. You did great!";

const REACT_POOL: [&str; 4] = [
    "Explain how React's virtual DOM works and why it's beneficial.",
    "What's the difference between controlled and uncontrolled components?",
    "How would you optimize a slow-rendering React component?",
    "Describe the useEffect hook and common pitfalls.",
];

const TYPESCRIPT_POOL: [&str; 4] = [
    "What are the benefits of using TypeScript over JavaScript?",
    "Explain type guards and when you would use them.",
    "How do you handle type safety with API responses?",
    "What are generics and when would you use them?",
];

const DEFAULT_POOL: [&str; 4] = [
    "Tell me about a challenging bug you fixed recently.",
    "How do you approach debugging complex issues?",
    "Describe your testing strategy for frontend applications.",
    "What's your experience with state management?",
];

/// The pool is picked by the first weakness only.
pub fn question_pool(weaknesses: &[String]) -> &'static [&'static str; 4] {
    match weaknesses.first().map(|w| w.trim().to_lowercase()).as_deref() {
        Some("react") => &REACT_POOL,
        Some("typescript") => &TYPESCRIPT_POOL,
        _ => &DEFAULT_POOL,
    }
}

pub fn question_for(weaknesses: &[String], index: usize) -> &'static str {
    let pool = question_pool(weaknesses);
    pool[index % pool.len()]
}

pub fn greeting(weaknesses: &[String]) -> String {
    let focus = if weaknesses.is_empty() {
        String::new()
    } else {
        format!(" focusing on {}", weaknesses.join(", "))
    };
    format!(
        "Hello! I'll be conducting your technical interview today. I'll ask you {INTERVIEW_LENGTH} questions{focus}. \
         Please speak clearly and take your time to answer each question. Ready? Let's begin!"
    )
}
