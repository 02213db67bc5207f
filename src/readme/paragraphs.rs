/// Iterator over the paragraphs of a text
///
/// A paragraph is a run of non-blank lines together with the blank lines
/// that follow it, so concatenating every paragraph gives back the input
/// minus any blank lines before the first paragraph. Line endings are kept.
#[derive(Debug, Clone)]
pub struct Paragraphs<'a> {
    rest: &'a str,
}

pub fn paragraphs(text: &str) -> Paragraphs<'_> {
    Paragraphs { rest: text }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let mut start = 0;
        let mut end = 0;
        let mut in_text = false;
        let mut in_gap = false;
        for line in self.rest.split_inclusive('\n') {
            let blank = is_blank(line);
            if !in_text {
                if blank {
                    start += line.len();
                    end = start;
                    continue;
                }
                in_text = true;
            } else if in_gap && !blank {
                break;
            }
            if blank {
                in_gap = true;
            }
            end += line.len();
        }
        if !in_text {
            self.rest = "";
            return None;
        }
        let para = &self.rest[start..end];
        self.rest = &self.rest[end..];
        Some(para)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_keep_trailing_blank_lines() {
        let paras: Vec<&str> = paragraphs("a\nb\n\n\nc\n   \nd").collect();
        assert_eq!(paras, vec!["a\nb\n\n\n", "c\n   \n", "d"]);
    }

    #[test]
    fn test_paragraphs_skip_leading_blank_lines() {
        let paras: Vec<&str> = paragraphs("\n\nfirst\n").collect();
        assert_eq!(paras, vec!["first\n"]);
    }

    #[test]
    fn test_paragraphs_empty() {
        assert_eq!(paragraphs("").count(), 0);
        assert_eq!(paragraphs("\n \n").count(), 0);
    }
}
