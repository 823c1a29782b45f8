use log::debug;

pub const DELIMITER: char = '|';

/// Contiguous pipe-delimited lines from converted text. The first line is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    lines: Vec<String>,
}

impl TableBlock {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn header(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Every line after the header.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().skip(1).map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when any keyword occurs in the space-joined, lower-cased block text.
    pub fn mentions_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let joined = self.lines.join(" ").to_lowercase();
        keywords
            .iter()
            .any(|k| joined.contains(&k.as_ref().to_lowercase()))
    }
}

pub fn is_table_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with(DELIMITER) && trimmed.ends_with(DELIMITER)
}

/// Groups table lines of `text` into blocks and keeps those mentioning at least one keyword.
///
/// A block ends at the first blank line after it starts, or at the end of the input.
/// Prose lines inside an open block are skipped without closing it.
pub fn extract_tables<S: AsRef<str>>(text: &str, keywords: &[S]) -> Vec<TableBlock> {
    let mut tables = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut inside = false;

    for raw in text.lines() {
        let line = raw.trim();
        if is_table_line(line) {
            inside = true;
            current.push(line.to_string());
        } else if inside && line.is_empty() {
            inside = false;
            flush(&mut tables, std::mem::take(&mut current), keywords);
        }
    }

    if inside && !current.is_empty() {
        flush(&mut tables, current, keywords);
    }

    tables
}

fn flush<S: AsRef<str>>(tables: &mut Vec<TableBlock>, lines: Vec<String>, keywords: &[S]) {
    let block = TableBlock::new(lines);
    if block.mentions_any(keywords) {
        tables.push(block);
    } else {
        debug!(
            "Discarding table block of {} lines without financial keywords",
            block.lines().len()
        );
    }
}
