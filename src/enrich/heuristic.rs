//! Pronoun-based gender heuristic for biography text
//!
//! Classifies a biography blob by counting whole-word occurrences of female
//! pronouns {she, her, hers} against male pronouns {he, him, his}. The
//! strictly higher count wins; ties (including empty text) stay unknown.

use std::fmt;

const FEMALE_PRONOUNS: [&str; 3] = ["she", "her", "hers"];
const MALE_PRONOUNS: [&str; 3] = ["he", "him", "his"];

/// Resolved author gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    /// The string form used in output datasets and override files
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }

    /// Parses the dataset string form; anything unrecognized is `None`
    pub fn parse(s: &str) -> Option<Gender> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guesses the author's gender from their biography text
///
/// Pure and deterministic: tokenizes on non-alphabetic characters and counts
/// ASCII-case-insensitive whole-word pronoun matches, so punctuation-adjacent
/// pronouns ("She writes.") count and substrings ("shell", "historic") never do.
pub fn guess_gender(text: &str) -> Gender {
    let mut female = 0usize;
    let mut male = 0usize;

    for token in text.split(|c: char| !c.is_alphabetic()) {
        if token.is_empty() {
            continue;
        }
        if FEMALE_PRONOUNS.iter().any(|p| token.eq_ignore_ascii_case(p)) {
            female += 1;
        } else if MALE_PRONOUNS.iter().any(|p| token.eq_ignore_ascii_case(p)) {
            male += 1;
        }
    }

    match female.cmp(&male) {
        std::cmp::Ordering::Greater => Gender::Female,
        std::cmp::Ordering::Less => Gender::Male,
        std::cmp::Ordering::Equal => Gender::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_female_majority() {
        let bio = "She grew up in France. Her novels won several awards, and she still writes.";
        assert_eq!(guess_gender(bio), Gender::Female);
    }

    #[test]
    fn test_male_majority() {
        let bio = "He was born in Kyoto. His early work made him famous.";
        assert_eq!(guess_gender(bio), Gender::Male);
    }

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(guess_gender(""), Gender::Unknown);
    }

    #[test]
    fn test_tie_is_unknown() {
        assert_eq!(guess_gender("She met him."), Gender::Unknown);
    }

    #[test]
    fn test_no_pronouns_is_unknown() {
        assert_eq!(
            guess_gender("The author of twelve novels and two plays."),
            Gender::Unknown
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(guess_gender("SHE wrote. HER book. Hers alone."), Gender::Female);
    }

    #[test]
    fn test_whole_words_only() {
        // "shell", "herself", "history", "hermit" must not count
        assert_eq!(guess_gender("A shell on the shore; herself a hermit of history."), Gender::Unknown);
    }

    #[test]
    fn test_punctuation_adjacent_pronouns_count() {
        assert_eq!(guess_gender("\"She,\" they said. (Her, too.)"), Gender::Female);
    }

    #[test]
    fn test_deterministic() {
        let bio = "He and she and him and her and his and hers.";
        let first = guess_gender(bio);
        for _ in 0..10 {
            assert_eq!(guess_gender(bio), first);
        }
    }

    #[test]
    fn test_gender_round_trip() {
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse(" male "), Some(Gender::Male));
        assert_eq!(Gender::parse("unknown"), None);
        assert_eq!(Gender::parse("nonbinary"), None);
        assert_eq!(Gender::Male.as_str(), "male");
        assert_eq!(Gender::Unknown.to_string(), "unknown");
    }
}
