use heck::ToSnakeCase;

/// A generated-identifier base, kept as lowercase words so each target can apply its own
/// casing convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    words: Vec<String>,
}

impl Ident {
    pub fn new(raw: &str) -> Self {
        Self {
            words: raw
                .to_snake_case()
                .split('_')
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn concat(parts: &[&Ident]) -> Self {
        Self {
            words: parts.iter().flat_map(|p| p.words.iter().cloned()).collect(),
        }
    }

    pub fn prefixed(&self, prefix: &str) -> Self {
        Self::concat(&[&Ident::new(prefix), self])
    }

    pub fn suffixed(&self, suffix: &str) -> Self {
        Self::concat(&[self, &Ident::new(suffix)])
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn upper_camel(&self) -> String {
        self.words.iter().map(|w| capitalize(w)).collect()
    }

    pub fn lower_camel(&self) -> String {
        let mut out = String::new();
        for (idx, w) in self.words.iter().enumerate() {
            if idx == 0 {
                out.push_str(w);
            } else {
                out.push_str(&capitalize(w));
            }
        }
        out
    }

    pub fn snake(&self) -> String {
        self.words.join("_")
    }

    pub fn shouty_snake(&self) -> String {
        self.snake().to_uppercase()
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
