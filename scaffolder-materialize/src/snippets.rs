use std::collections::HashMap;

const BUILTIN: [(&str, &str); 3] = [
    ("README.md", "# Project\n\nDescribe your project here.\n"),
    (".env.example", "# Copy to .env and fill values\nAPI_KEY=\n"),
    ("requirements.txt", "# Add Python dependencies here\n"),
];

/// Default content for files given without any, looked up by exact file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippets {
    table: HashMap<String, String>,
}

impl Default for Snippets {
    fn default() -> Self {
        Snippets {
            table: BUILTIN
                .iter()
                .map(|(name, content)| (name.to_string(), content.to_string()))
                .collect(),
        }
    }
}

impl Snippets {
    /// No defaults at all, every file without content is left empty
    pub fn empty() -> Self {
        Snippets {
            table: HashMap::new(),
        }
    }

    /// Adds or replaces the default for one file name
    pub fn with(mut self, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        self.table.insert(file_name.into(), content.into());
        self
    }

    /// The default content for a file with the given name, if any
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.table.get(file_name).map(String::as_str)
    }
}

impl<K, V> Extend<(K, V)> for Snippets
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.table
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}
