use crate::quiz::generator::QuestionDraft;

fn q(question: &str, options: [&str; 4], correct_answer: usize, explanation: &str) -> QuestionDraft {
    QuestionDraft {
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer,
        explanation: explanation.to_string(),
    }
}

/// Five fixed questions per quiz family, served when generation fails.
pub fn fallback_questions(technical: bool) -> Vec<QuestionDraft> {
    if technical {
        vec![
            q(
                "What is the purpose of React's useEffect hook?",
                [
                    "To manage component state",
                    "To handle side effects in functional components",
                    "To create context providers",
                    "To optimize rendering performance",
                ],
                1,
                "useEffect handles side effects in functional components, such as data fetching, subscriptions, and DOM manipulations.",
            ),
            q(
                "In TypeScript, what is the difference between 'interface' and 'type'?",
                [
                    "No difference, they are identical",
                    "Interfaces can extend, types cannot",
                    "Types can use unions, interfaces cannot",
                    "Types are faster at compile time",
                ],
                2,
                "Type aliases can represent unions, intersections, and other complex types, while interfaces are primarily for object shapes and can be extended.",
            ),
            q(
                "What does CSS 'flexbox' primarily help with?",
                ["Animations", "Layout design", "Color management", "Font rendering"],
                1,
                "Flexbox is a CSS layout model designed to arrange and align items within a container efficiently.",
            ),
            q(
                "What is the time complexity of searching in a balanced binary search tree?",
                ["O(1)", "O(log n)", "O(n)", "O(n log n)"],
                1,
                "A balanced BST provides O(log n) search time because it divides the search space in half at each step.",
            ),
            q(
                "Which HTTP method is idempotent?",
                ["POST", "GET", "PATCH", "All of the above"],
                1,
                "GET is idempotent - making the same request multiple times produces the same result without changing server state.",
            ),
        ]
    } else {
        vec![
            q(
                "If all bloops are razzies and all razzies are lazzies, are all bloops definitely lazzies?",
                ["Yes", "No", "Sometimes", "Cannot be determined"],
                0,
                "By transitive property, if A = B and B = C, then A = C. Therefore all bloops are lazzies.",
            ),
            q(
                "What comes next in the sequence: 2, 6, 12, 20, 30, ?",
                ["40", "42", "44", "48"],
                1,
                "The sequence follows the pattern n(n+1): 1×2=2, 2×3=6, 3×4=12, 4×5=20, 5×6=30, 6×7=42.",
            ),
            q(
                "If 5 machines can produce 5 widgets in 5 minutes, how many machines are needed to produce 100 widgets in 100 minutes?",
                ["5", "20", "100", "500"],
                0,
                "Each machine produces 1 widget in 5 minutes, so in 100 minutes one machine produces 20 widgets. 5 machines produce 100 widgets in 100 minutes.",
            ),
            q(
                "Which figure completes the pattern: Circle, Square, Triangle, Circle, Square, ?",
                ["Circle", "Square", "Triangle", "Rectangle"],
                2,
                "The pattern repeats every 3 elements: Circle, Square, Triangle. So the next element is Triangle.",
            ),
            q(
                "If you rearrange the letters 'CIFAIPC' you get the name of a:",
                ["City", "Animal", "Ocean", "Country"],
                2,
                "The letters rearrange to spell 'PACIFIC', which is an ocean.",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banks_have_five_valid_questions() {
        for technical in [true, false] {
            let bank = fallback_questions(technical);
            assert_eq!(bank.len(), 5);
            assert!(bank.iter().all(QuestionDraft::is_well_formed));
        }
    }
}
