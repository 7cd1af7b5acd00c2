#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    pub level: usize,
    pub title: &'a str,
    pub line_index: usize,
}

/// Line view of a sheet with its Markdown headings. Headings inside fenced
/// code blocks are not headings.
#[derive(Debug)]
pub struct SheetOutline<'a> {
    lines: Vec<&'a str>,
    headings: Vec<Heading<'a>>,
}

impl<'a> SheetOutline<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines = text.lines().collect::<Vec<&str>>();
        let mut headings = Vec::new();
        let mut in_fence = false;

        for (line_index, line) in lines.iter().enumerate() {
            if is_fence(line) {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            if let Some((level, title)) = parse_heading(line) {
                headings.push(Heading {
                    level,
                    title,
                    line_index,
                });
            }
        }

        Self { lines, headings }
    }

    pub fn headings(&self) -> &[Heading<'a>] {
        &self.headings
    }

    pub fn find_heading<F>(&self, predicate: F) -> Option<&Heading<'a>>
    where
        F: Fn(&Heading<'a>) -> bool,
    {
        self.headings.iter().find(|heading| predicate(*heading))
    }

    /// Lines after `heading` up to the next heading at the same or a higher level.
    pub fn body_lines(&self, heading: &Heading<'a>) -> &[&'a str] {
        let start = heading.line_index + 1;
        let end = self
            .headings
            .iter()
            .find(|next| next.line_index > heading.line_index && next.level <= heading.level)
            .map(|next| next.line_index)
            .unwrap_or(self.lines.len());

        &self.lines[start.min(end)..end]
    }

    pub fn body_text(&self, heading: &Heading<'a>) -> String {
        self.body_lines(heading).join("\n")
    }
}

pub fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_end();
    let level = trimmed.chars().take_while(|ch| *ch == '#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &trimmed[level..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }

    let title = rest.trim().trim_end_matches('#').trim();
    if title.is_empty() {
        return None;
    }

    Some((level, title))
}

/// Heading titles may carry decorations such as emoji; compare on the words.
pub fn title_matches(title: &str, expected: &str) -> bool {
    normalize_title(title) == normalize_title(expected)
}

pub fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .filter(|word| word.chars().any(|ch| ch.is_alphanumeric()))
        .map(|word| word.to_lowercase())
        .collect::<Vec<String>>()
        .join(" ")
}

/// Lines between the first pair of fences in `lines`.
pub fn first_fenced_block<'a>(lines: &[&'a str]) -> Option<Vec<&'a str>> {
    let open = lines.iter().position(|line| is_fence(line))?;
    let rest = &lines[open + 1..];
    let close = rest
        .iter()
        .position(|line| is_fence(line))
        .unwrap_or(rest.len());

    Some(rest[..close].to_vec())
}
