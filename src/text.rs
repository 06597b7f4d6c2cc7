const VOWELS: &str = "aeiouy";

/// Returns the word of `text` containing the most vowels (`y` included).
///
/// Words are split on single spaces only. A tie on vowel count goes to the
/// longer word, and a tie on both keeps the earliest word. Empty text yields
/// an empty string.
///
/// Text without any vowel does not yield an empty string: the tie rule
/// already applies at a count of zero, so its longest word is returned.
pub fn word_with_most_vowels(text: &str) -> &str {
    let mut max_vowels = 0;
    let mut best = "";
    for word in text.split(' ') {
        let vowels = count_vowels(word);
        if vowels > max_vowels
            || (vowels == max_vowels && word.chars().count() > best.chars().count())
        {
            max_vowels = vowels;
            best = word;
        }
    }
    best
}

fn count_vowels(word: &str) -> usize {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| VOWELS.contains(*c))
        .count()
}
