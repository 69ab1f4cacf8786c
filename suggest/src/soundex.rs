//! Soundex phonetic codes.
//!
//! Used only as a boosting signal when ranking suggestions: names that sound
//! alike ("Robert"/"Rupert") share a code.

/// Length of a Soundex code.
pub const SOUNDEX_LEN: usize = 4;

fn digit(letter: char) -> char {
    match letter {
        'B' | 'F' | 'P' | 'V' => '1',
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => '2',
        'D' | 'T' => '3',
        'L' => '4',
        'M' | 'N' => '5',
        'R' => '6',
        _ => '0',
    }
}

/// Computes the four-character Soundex code of `input`.
///
/// The first letter is encoded as its digit class. Later letters add their
/// digit when it is non-zero and differs from the previous letter's digit;
/// non-letters are skipped. Short codes are padded with `'0'`. Empty input
/// yields an empty string.
///
/// # Examples
///
/// ```
/// use argot_suggest::soundex;
///
/// assert_eq!(soundex("Robert"), "6163");
/// assert_eq!(soundex("Rupert"), "6163");
/// assert_eq!(soundex("add"), "0300");
/// assert_eq!(soundex(""), "");
/// ```
pub fn soundex(input: &str) -> String {
    let mut letters = input.chars().flat_map(char::to_uppercase);
    let Some(first) = letters.next() else {
        return String::new();
    };

    let mut code = String::with_capacity(SOUNDEX_LEN);
    let mut previous = digit(first);
    code.push(previous);

    for letter in letters.filter(|c| c.is_alphabetic()) {
        if code.len() == SOUNDEX_LEN {
            break;
        }
        let current = digit(letter);
        if current != previous && current != '0' {
            code.push(current);
        }
        previous = current;
    }

    while code.len() < SOUNDEX_LEN {
        code.push('0');
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_duplicates_collapse() {
        // c-o-m-m-a-n-d: the doubled m contributes once.
        assert_eq!(soundex("command"), "2553");
    }

    #[test]
    fn test_same_class_run_collapses() {
        // m, m and n share a class and collapse into a single 5.
        assert_eq!(soundex("commnad"), "2530");
    }

    #[test]
    fn test_non_letters_are_skipped() {
        assert_eq!(soundex("R-o_b3ert"), soundex("Robert"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(soundex("verbose"), soundex("VERBOSE"));
    }

    #[test]
    fn test_short_input_is_padded() {
        assert_eq!(soundex("a"), "0000");
        assert_eq!(soundex("Lee"), "4000");
    }
}
