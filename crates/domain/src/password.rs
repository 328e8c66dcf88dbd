//! Password strength evaluation.
//!
//! Scores a candidate password 0-4 against a configurable rule set and returns
//! ordered feedback for every violated rule. Pure function of its inputs; no
//! stored state between evaluations.

use serde::Serialize;

/// Structural requirements a password is checked against.
#[derive(Debug, Clone)]
pub struct PasswordRequirements {
    /// Minimum accepted length, in characters.
    pub min_length: usize,
    /// Maximum accepted length, in characters.
    pub max_length: usize,
    /// Whether at least one uppercase letter is required.
    pub require_uppercase: bool,
    /// Whether at least one lowercase letter is required.
    pub require_lowercase: bool,
    /// Whether at least one digit is required.
    pub require_numbers: bool,
    /// Whether at least one special character is required.
    pub require_special_chars: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_numbers: true,
            require_special_chars: true,
        }
    }
}

/// Optional personal information checked against the candidate password so
/// users do not reuse their own identifying details.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    /// Account email address; its local part is treated as a candidate substring.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Company name.
    pub company: Option<String>,
}

/// Result of evaluating a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// Strength score from 0 (weakest) to 4 (strongest).
    pub score: u8,
    /// Human-readable messages for every violated rule, in check order.
    pub feedback: Vec<String>,
    /// True when no rule was violated and the score is at least 3.
    pub is_valid: bool,
}

/// Special characters accepted by the structural requirement check.
///
/// The character-variety bonus below deliberately uses a broader non-word test
/// instead of this fixed set; the two definitions are not interchangeable.
const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// Passwords rejected outright because they appear at the top of breach corpora.
static COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "123456789",
    "12345678",
    "1234567",
    "12345",
    "qwerty",
    "abc123",
    "password1",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "iloveyou",
    "dragon",
    "sunshine",
    "princess",
];

/// Keyboard and counting runs that appear in most guessing dictionaries.
static SEQUENTIAL_PATTERNS: &[&str] = &["123456", "abcdef", "qwerty"];

/// Evaluates a candidate password against the given requirements.
///
/// Structural checks each earn one point when satisfied and produce feedback
/// only when the corresponding requirement is enabled. Penalties (common
/// passwords, personal information, repeated characters, sequential patterns)
/// subtract points without going below zero; length and character-variety
/// bonuses add points before the final clamp to 4.
#[must_use]
pub fn evaluate_password(
    password: &str,
    requirements: &PasswordRequirements,
    user_context: Option<&UserContext>,
) -> PasswordStrength {
    let mut score: i32 = 0;
    let mut feedback: Vec<String> = Vec::new();

    let char_count = password.chars().count();
    let lowered = password.to_lowercase();

    if char_count >= requirements.min_length {
        score += 1;
    } else {
        feedback.push(format!(
            "Password must be at least {} characters long",
            requirements.min_length
        ));
    }

    if password.chars().any(|character| character.is_uppercase()) {
        score += 1;
    } else if requirements.require_uppercase {
        feedback.push("Password must contain at least one uppercase letter".to_owned());
    }

    if password.chars().any(|character| character.is_lowercase()) {
        score += 1;
    } else if requirements.require_lowercase {
        feedback.push("Password must contain at least one lowercase letter".to_owned());
    }

    if password.chars().any(|character| character.is_ascii_digit()) {
        score += 1;
    } else if requirements.require_numbers {
        feedback.push("Password must contain at least one number".to_owned());
    }

    if password
        .chars()
        .any(|character| SPECIAL_CHARACTERS.contains(character))
    {
        score += 1;
    } else if requirements.require_special_chars {
        feedback.push("Password must contain at least one special character".to_owned());
    }

    if char_count > requirements.max_length {
        feedback.push(format!(
            "Password must be no more than {} characters long",
            requirements.max_length
        ));
    }

    if COMMON_PASSWORDS.iter().any(|entry| *entry == lowered) {
        feedback.push(
            "This password is too common. Please choose a more unique password".to_owned(),
        );
        score = (score - 2).max(0);
    }

    if let Some(context) = user_context
        && contains_personal_information(&lowered, context)
    {
        feedback.push("Password should not contain personal information".to_owned());
        score = (score - 1).max(0);
    }

    if has_repeated_run(password) {
        feedback.push("Password should not contain repeated characters".to_owned());
        score = (score - 1).max(0);
    }

    if SEQUENTIAL_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
    {
        feedback.push("Password should not contain common sequential patterns".to_owned());
        score = (score - 1).max(0);
    }

    if char_count >= 12 {
        score += 1;
    }
    if has_non_word_character(password) {
        score += 1;
    }
    if char_count >= 16 {
        score += 1;
    }

    let score = score.clamp(0, 4) as u8;
    let is_valid = feedback.is_empty() && score >= 3;

    PasswordStrength {
        score,
        feedback,
        is_valid,
    }
}

/// Checks the lowercased password against derived personal-info substrings.
///
/// Candidates: the email local part, the lowercased name, the lowercased
/// company. Only the first match counts.
fn contains_personal_information(lowered_password: &str, context: &UserContext) -> bool {
    let email_local = context
        .email
        .as_deref()
        .and_then(|email| email.split('@').next())
        .map(str::to_lowercase);
    let name = context.name.as_deref().map(str::to_lowercase);
    let company = context.company.as_deref().map(str::to_lowercase);

    [email_local, name, company]
        .into_iter()
        .flatten()
        .filter(|candidate| !candidate.is_empty())
        .any(|candidate| lowered_password.contains(&candidate))
}

/// Returns true when any character repeats three or more times in a row.
fn has_repeated_run(password: &str) -> bool {
    let characters: Vec<char> = password.chars().collect();
    characters
        .windows(3)
        .any(|window| window[0] == window[1] && window[1] == window[2])
}

/// Broader special-character test used by the variety bonus: anything outside
/// the word class (alphanumerics and underscore) and whitespace counts.
fn has_non_word_character(password: &str) -> bool {
    password.chars().any(|character| {
        !character.is_alphanumeric() && character != '_' && !character.is_whitespace()
    })
}

/// Maps a score to its display label.
#[must_use]
pub fn strength_label(score: u8) -> &'static str {
    match score {
        0 | 1 => "Very Weak",
        2 => "Weak",
        3 => "Good",
        _ => "Strong",
    }
}

/// Maps a score to the UI color token for the strength meter.
#[must_use]
pub fn strength_color(score: u8) -> &'static str {
    match score {
        0 | 1 => "red",
        2 => "yellow",
        3 => "blue",
        _ => "green",
    }
}

/// Maps a score to a progress-bar percentage (score out of 4).
#[must_use]
pub fn strength_percent(score: u8) -> u8 {
    score.min(4) * 25
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn evaluate(password: &str) -> PasswordStrength {
        evaluate_password(password, &PasswordRequirements::default(), None)
    }

    #[test]
    fn strong_password_scores_four_and_is_valid() {
        let result = evaluate("Str0ng!Passw0rd2024");
        assert!(result.feedback.is_empty());
        assert_eq!(result.score, 4);
        assert!(result.is_valid);
    }

    #[test]
    fn common_password_takes_two_point_penalty() {
        let result = evaluate("password");
        assert!(!result.is_valid);
        assert!(
            result
                .feedback
                .iter()
                .any(|message| message.contains("too common"))
        );
        // Earns min-length + lowercase, then loses both to the penalty.
        assert_eq!(result.score, 0);
    }

    #[test]
    fn missing_character_classes_produce_one_message_each() {
        let result = evaluate("alowercase");
        let expected = [
            "Password must contain at least one uppercase letter",
            "Password must contain at least one number",
            "Password must contain at least one special character",
        ];
        assert_eq!(result.feedback, expected);
    }

    #[test]
    fn unsatisfied_optional_requirement_costs_the_point_but_not_feedback() {
        let requirements = PasswordRequirements {
            require_special_chars: false,
            ..PasswordRequirements::default()
        };
        let result = evaluate_password("Adequate9Length", &requirements, None);
        assert!(result.feedback.is_empty());
        // min-length + upper + lower + digit + 12-char bonus; no special point.
        assert_eq!(result.score, 4);
        assert!(result.is_valid);
    }

    #[test]
    fn over_max_length_adds_feedback_without_score_change() {
        let requirements = PasswordRequirements {
            max_length: 20,
            ..PasswordRequirements::default()
        };
        let long = format!("Aa1!{}", "vwxyz".repeat(4));
        let result = evaluate_password(&long, &requirements, None);
        assert!(
            result
                .feedback
                .iter()
                .any(|message| message.contains("no more than 20"))
        );
        assert!(!result.is_valid);
        assert_eq!(result.score, 4);
    }

    #[test]
    fn email_local_part_in_password_is_penalized() {
        let context = UserContext {
            email: Some("john@x.com".to_owned()),
            name: None,
            company: None,
        };
        let without_context = evaluate("john1234");
        let with_context =
            evaluate_password("john1234", &PasswordRequirements::default(), Some(&context));

        assert!(
            with_context
                .feedback
                .iter()
                .any(|message| message.contains("personal information"))
        );
        assert_eq!(with_context.score, without_context.score - 1);
    }

    #[test]
    fn only_first_personal_info_match_counts() {
        let context = UserContext {
            email: Some("ada@lovelace.dev".to_owned()),
            name: Some("ada".to_owned()),
            company: None,
        };
        let result =
            evaluate_password("ada-ada-pass", &PasswordRequirements::default(), Some(&context));
        let personal_messages = result
            .feedback
            .iter()
            .filter(|message| message.contains("personal information"))
            .count();
        assert_eq!(personal_messages, 1);
    }

    #[test]
    fn empty_personal_fields_are_ignored() {
        let context = UserContext {
            email: None,
            name: Some(String::new()),
            company: None,
        };
        let result =
            evaluate_password("Whatever9!", &PasswordRequirements::default(), Some(&context));
        assert!(
            !result
                .feedback
                .iter()
                .any(|message| message.contains("personal information"))
        );
    }

    #[test]
    fn triple_repeated_character_is_penalized() {
        let result = evaluate("Goood9!pass");
        assert!(
            result
                .feedback
                .iter()
                .any(|message| message.contains("repeated characters"))
        );
    }

    #[test]
    fn double_characters_are_not_a_repeat_run() {
        let result = evaluate("Good9!pass");
        assert!(
            !result
                .feedback
                .iter()
                .any(|message| message.contains("repeated characters"))
        );
    }

    #[test]
    fn sequential_pattern_is_penalized_case_insensitively() {
        let result = evaluate("MyQWERTYpass9!");
        assert!(
            result
                .feedback
                .iter()
                .any(|message| message.contains("sequential patterns"))
        );
    }

    #[test]
    fn structural_and_bonus_special_sets_differ() {
        // Section sign is outside the fixed structural set but still counts for
        // the non-word variety bonus.
        let result = evaluate("Abcdxyz9§");
        assert!(
            result
                .feedback
                .iter()
                .any(|message| message.contains("special character"))
        );
        // min-length + upper + lower + digit, no structural special point,
        // plus the non-word bonus.
        assert_eq!(result.score, 4);
        assert!(!result.is_valid);
    }

    #[test]
    fn labels_cover_all_scores() {
        assert_eq!(strength_label(0), "Very Weak");
        assert_eq!(strength_label(1), "Very Weak");
        assert_eq!(strength_label(2), "Weak");
        assert_eq!(strength_label(3), "Good");
        assert_eq!(strength_label(4), "Strong");
    }

    #[test]
    fn colors_and_percentages_track_the_score() {
        assert_eq!(strength_color(1), "red");
        assert_eq!(strength_color(2), "yellow");
        assert_eq!(strength_color(3), "blue");
        assert_eq!(strength_color(4), "green");
        assert_eq!(strength_percent(0), 0);
        assert_eq!(strength_percent(2), 50);
        assert_eq!(strength_percent(4), 100);
    }

    proptest! {
        #[test]
        fn score_never_exceeds_four(password in ".{0,64}") {
            let result = evaluate(&password);
            prop_assert!(result.score <= 4);
        }

        #[test]
        fn valid_passwords_have_no_feedback(password in ".{0,64}") {
            let result = evaluate(&password);
            if result.is_valid {
                prop_assert!(result.feedback.is_empty());
                prop_assert!(result.score >= 3);
            }
        }

        #[test]
        fn evaluation_is_deterministic(password in ".{0,32}") {
            let first = evaluate(&password);
            let second = evaluate(&password);
            prop_assert_eq!(first, second);
        }
    }
}
