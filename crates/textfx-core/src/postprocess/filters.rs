use rand::seq::SliceRandom;
use rand::Rng;

use super::Transform;

const ACRONYM_SEPARATORS: [char; 3] = ['-', '–', '—'];

pub(super) fn apply<S, R>(transform: Transform, inputs: &[S], mut items: Vec<String>, rng: &mut R) -> Vec<String>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let first = inputs.first().map(|s| s.as_ref().trim()).unwrap_or("");

    match transform {
        Transform::None => {}
        Transform::RequireKeyword => {
            let keyword = first.to_lowercase();
            if !keyword.is_empty() {
                items.retain(|item| item.to_lowercase().contains(&keyword));
            }
        }
        Transform::VerifyAcronym => {
            let letters = letters_of(first);
            items.retain(|item| acronym_matches(item, &letters));
        }
        Transform::RequireInitial => {
            let initial = inputs
                .get(1)
                .and_then(|s| first_letter(s.as_ref()));
            if let Some(initial) = initial {
                items.retain(|item| first_letter(item) == Some(initial));
            }
        }
        Transform::DropEcho => {
            let echoes: Vec<String> = inputs
                .iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect();
            items.retain(|item| !echoes.contains(&item.trim().to_lowercase()));
        }
        Transform::StripInputPrefix => {
            if !first.is_empty() {
                items = items
                    .into_iter()
                    .map(|item| strip_prefix_ignore_case(&item, first))
                    .collect();
            }
        }
        Transform::Shuffle => items.shuffle(rng),
    }

    items
}

fn letters_of(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_uppercase)
        .collect()
}

fn first_letter(text: &str) -> Option<char> {
    text.chars()
        .find(|c| c.is_alphabetic())
        .and_then(|c| c.to_lowercase().next())
}

/// `"RAP - Recognizing Analogous Patterns"` matches letters `"RAP"`.
pub(super) fn acronym_matches(candidate: &str, letters: &str) -> bool {
    let Some((head, expansion)) = candidate.split_once(|c: char| ACRONYM_SEPARATORS.contains(&c)) else {
        return false;
    };
    if letters.is_empty() || letters_of(head) != letters {
        return false;
    }
    let initials: String = expansion
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphabetic()))
        .flat_map(char::to_uppercase)
        .collect();
    initials == letters
}

fn strip_prefix_ignore_case(item: &str, prefix: &str) -> String {
    let matches = item
        .get(..prefix.len())
        .is_some_and(|head| head.to_lowercase() == prefix.to_lowercase());
    if !matches {
        return item.to_string();
    }
    item[prefix.len()..]
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '-'))
        .trim_end()
        .to_string()
}
