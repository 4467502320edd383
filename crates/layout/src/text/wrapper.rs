use crate::fonts::FontFace;

const EPSILON: f32 = 0.01;
const MIN_HYPHEN_FRAGMENT: usize = 2;

/// One broken line of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: f32,
    /// Number of word gaps (ASCII spaces) in `text`.
    pub spaces: usize,
    /// Last line before a hard break or the end of the paragraph.
    pub last: bool,
}

impl Line {
    fn new(text: String, width: f32, last: bool) -> Self {
        let spaces = text.matches(' ').count();
        Self {
            text,
            width,
            spaces,
            last,
        }
    }
}

/// Breaks text into lines for one face and size.
pub struct LineBreaker<'a> {
    face: &'a FontFace,
    size: f32,
    hyphenate: bool,
}

impl<'a> LineBreaker<'a> {
    pub fn new(face: &'a FontFace, size: f32, hyphenate: bool) -> Self {
        Self {
            face,
            size,
            hyphenate,
        }
    }

    fn width(&self, text: &str) -> f32 {
        self.face.text_width(text, self.size)
    }

    /// Breaks `text`, giving the first line `first_width` and every other
    /// line `width`. Newlines force a break; runs of whitespace collapse.
    pub fn break_lines(&self, text: &str, first_width: f32, width: f32) -> Vec<Line> {
        let mut lines: Vec<Line> = Vec::new();
        let space = self.width(" ");
        let available = |lines: &Vec<Line>| if lines.is_empty() { first_width } else { width };

        for hard_line in text.split('\n') {
            let start = lines.len();
            let mut current = String::new();
            let mut current_width = 0.0f32;

            for word in hard_line.split_whitespace() {
                let mut word = word.to_string();
                let mut word_width = self.width(&word);

                if !current.is_empty() {
                    let avail = available(&lines);
                    if current_width + space + word_width <= avail + EPSILON {
                        current.push(' ');
                        current.push_str(&word);
                        current_width += space + word_width;
                        continue;
                    }

                    if self.hyphenate {
                        let room = avail - current_width - space;
                        if let Some(split) = self.hyphen_split(&word, room) {
                            let (head, tail) = split_chars(&word, split);
                            current.push(' ');
                            current.push_str(&head);
                            current.push('-');
                            let line_width = self.width(&current);
                            lines.push(Line::new(std::mem::take(&mut current), line_width, false));
                            word = tail;
                            word_width = self.width(&word);
                        } else {
                            lines.push(Line::new(std::mem::take(&mut current), current_width, false));
                        }
                    } else {
                        lines.push(Line::new(std::mem::take(&mut current), current_width, false));
                    }
                    current_width = 0.0;
                }

                // The word starts a fresh line; chop it while it overflows.
                while word_width > available(&lines) + EPSILON {
                    let avail = available(&lines);
                    let (head, tail) = if self.hyphenate {
                        match self.hyphen_split(&word, avail) {
                            Some(split) => {
                                let (head, tail) = split_chars(&word, split);
                                (format!("{}-", head), tail)
                            }
                            None => split_chars(&word, self.fit_chars(&word, avail)),
                        }
                    } else {
                        split_chars(&word, self.fit_chars(&word, avail))
                    };
                    if tail.is_empty() {
                        break;
                    }
                    let head_width = self.width(&head);
                    lines.push(Line::new(head, head_width, false));
                    word = tail;
                    word_width = self.width(&word);
                }

                current = word;
                current_width = word_width;
            }

            if !current.is_empty() || lines.len() == start {
                lines.push(Line::new(current, current_width, true));
            } else if let Some(last) = lines.last_mut() {
                last.last = true;
            }
        }

        // A paragraph without any text has no lines at all.
        if lines.iter().all(|line| line.text.is_empty()) && text.trim().is_empty() {
            lines.clear();
        }
        lines
    }

    /// Number of leading characters of `word` that fit in `room`, at least one.
    fn fit_chars(&self, word: &str, room: f32) -> usize {
        let mut used = 0.0;
        let mut count = 0;
        for c in word.chars() {
            let w = self.face.char_width(c, self.size);
            if used + w > room + EPSILON {
                break;
            }
            used += w;
            count += 1;
        }
        count.max(1)
    }

    /// Split point such that `head + "-"` fits in `room`, leaving at least
    /// two characters on each side.
    fn hyphen_split(&self, word: &str, room: f32) -> Option<usize> {
        let total = word.chars().count();
        if total < MIN_HYPHEN_FRAGMENT * 2 || !word.chars().all(char::is_alphabetic) {
            return None;
        }
        let hyphen = self.face.char_width('-', self.size);
        let fit = if room - hyphen <= 0.0 {
            0
        } else {
            let mut used = 0.0;
            let mut count = 0;
            for c in word.chars() {
                let w = self.face.char_width(c, self.size);
                if used + w > room - hyphen + EPSILON {
                    break;
                }
                used += w;
                count += 1;
            }
            count
        };
        let split = fit.min(total - MIN_HYPHEN_FRAGMENT);
        (split >= MIN_HYPHEN_FRAGMENT).then_some(split)
    }
}

fn split_chars(word: &str, at: usize) -> (String, String) {
    let byte = word
        .char_indices()
        .nth(at)
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    (word[..byte].to_string(), word[byte..].to_string())
}
