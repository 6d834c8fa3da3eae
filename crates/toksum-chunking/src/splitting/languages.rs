//! Language-specific configurations for code chunking
//!
//! Only indentation-delimited languages get definition-aware block
//! splitting. Every other language, known or not, is chunked by paragraph.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Configuration for a specific programming language
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// The language identifier (e.g., "python")
    pub id: &'static str,
    /// Other names and file extensions that select this language
    pub aliases: &'static [&'static str],
    /// Line prefixes that open a function definition
    pub function_keywords: &'static [&'static str],
    /// Line prefixes that open a class definition
    pub class_keywords: &'static [&'static str],
    /// Whether the language uses indentation for blocks (like Python)
    pub uses_indentation: bool,
}

impl LanguageConfig {
    /// Creates a new language configuration
    pub const fn new(id: &'static str) -> Self {
        Self {
            id,
            aliases: &[],
            function_keywords: &[],
            class_keywords: &[],
            uses_indentation: false,
        }
    }

    /// Builder method to set aliases
    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Builder method to set function keywords
    pub const fn with_function_keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.function_keywords = keywords;
        self
    }

    /// Builder method to set class keywords
    pub const fn with_class_keywords(mut self, keywords: &'static [&'static str]) -> Self {
        self.class_keywords = keywords;
        self
    }

    /// Builder method to set block style
    pub const fn with_indentation_blocks(mut self, uses_indentation: bool) -> Self {
        self.uses_indentation = uses_indentation;
        self
    }

    /// Whether code in this language can be cut at definition boundaries
    pub const fn supports_block_splitting(&self) -> bool {
        self.uses_indentation
            && (!self.function_keywords.is_empty() || !self.class_keywords.is_empty())
    }
}

lazy_static! {
    /// Registry of all known language configurations
    pub static ref LANGUAGE_REGISTRY: HashMap<&'static str, LanguageConfig> = {
        let mut registry = HashMap::new();

        registry.insert(
            "python",
            LanguageConfig::new("python")
                .with_aliases(&["py", "pyi", "python3"])
                .with_function_keywords(&["def ", "async def "])
                .with_class_keywords(&["class "])
                .with_indentation_blocks(true),
        );

        // Brace languages are recognized but chunked by paragraph
        registry.insert("rust", LanguageConfig::new("rust").with_aliases(&["rs"]));
        registry.insert(
            "javascript",
            LanguageConfig::new("javascript").with_aliases(&["js", "mjs", "cjs"]),
        );
        registry.insert(
            "typescript",
            LanguageConfig::new("typescript").with_aliases(&["ts", "tsx"]),
        );
        registry.insert("go", LanguageConfig::new("go").with_aliases(&["golang"]));
        registry.insert("java", LanguageConfig::new("java"));

        registry
    };
}

/// Look up a language by id or alias, ignoring case
pub fn get_language_config(language: &str) -> Option<&'static LanguageConfig> {
    let wanted = language.trim().to_lowercase();
    LANGUAGE_REGISTRY.get(wanted.as_str()).or_else(|| {
        LANGUAGE_REGISTRY
            .values()
            .find(|config| config.aliases.iter().any(|alias| *alias == wanted))
    })
}
