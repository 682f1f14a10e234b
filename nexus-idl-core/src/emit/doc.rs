//! Word-wrapping of documentation strings into comment lines.

/// How to frame wrapped documentation.
#[derive(Debug, Clone, Copy)]
pub struct WrapOptions<'a> {
    /// Comment marker placed before every line, e.g. `//` or ` *`.
    pub prefix: &'a str,
    /// Maximum line length including the prefix. A single word longer than this gets its own line.
    pub max_len: usize,
    /// Line emitted before the wrapped text, e.g. `/**`.
    pub header: Option<&'a str>,
    /// Line emitted after the wrapped text, e.g. ` */`.
    pub trailer: Option<&'a str>,
}

impl<'a> WrapOptions<'a> {
    pub const DEFAULT_MAX_LEN: usize = 120;

    pub fn prefixed(prefix: &'a str) -> Self {
        Self {
            prefix,
            max_len: Self::DEFAULT_MAX_LEN,
            header: None,
            trailer: None,
        }
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn framed(mut self, header: &'a str, trailer: &'a str) -> Self {
        self.header = Some(header);
        self.trailer = Some(trailer);
        self
    }
}

/// Wraps `text` into comment lines. Blank lines in `text` separate paragraphs and are kept as
/// a bare prefix. Returns no lines at all for blank text, not even the header or trailer.
pub fn wrap_doc(text: &str, opts: &WrapOptions<'_>) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    if let Some(header) = opts.header {
        lines.push(header.to_string());
    }

    let paragraphs = text.trim().split("\n\n").collect::<Vec<_>>();
    for (idx, paragraph) in paragraphs.iter().enumerate() {
        if idx > 0 {
            lines.push(opts.prefix.trim_end().to_string());
        }
        let mut current = opts.prefix.to_string();
        for word in paragraph.split_whitespace() {
            let fits = current.len() + 1 + word.len() <= opts.max_len;
            if current.len() > opts.prefix.len() && !fits {
                lines.push(current);
                current = opts.prefix.to_string();
            }
            current.push(' ');
            current.push_str(word);
        }
        if current.len() > opts.prefix.len() {
            lines.push(current);
        }
    }

    if let Some(trailer) = opts.trailer {
        lines.push(trailer.to_string());
    }
    lines
}
