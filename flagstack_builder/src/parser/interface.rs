pub(crate) trait UserInterface {
    fn print(&self, message: String);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }
}


/// Wrap a paragraph into lines of at most `width` characters.
/// Words longer than the width are hyphenated.
pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            let word_length = word.chars().count();

            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word_length + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    // Leave room for the hyphen.
    let increment = std::cmp::max(width, 2) - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while characters.len() - left > increment + 1 {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}
