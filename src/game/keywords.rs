use rand::Rng;

/// Default keyword pool, matching the words the game shipped with
const DEFAULT_KEYWORDS: [&str; 6] = ["不知道", "喝水", "站起來", "摸頭髮", "說英文", "大笑"];

/// Pool of secret keywords dealt to players at round start
///
/// Draws are uniform and independent, so two players may receive the same
/// keyword.
#[derive(Debug, Clone)]
pub struct KeywordPool {
    words: Vec<String>,
}

impl KeywordPool {
    /// Creates a pool from the given words; an empty list falls back to the
    /// default pool
    pub fn new(words: Vec<String>) -> Self {
        if words.is_empty() {
            return Self::default();
        }
        Self { words }
    }

    /// Builds the pool from the KEYWORDS env var (comma-separated), falling
    /// back to the default pool when unset or blank
    pub fn from_env() -> Self {
        let words = std::env::var("KEYWORDS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|w| !w.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self::new(words)
    }

    /// Draws one keyword uniformly at random
    pub fn draw(&self) -> String {
        let index = rand::rng().random_range(0..self.words.len());
        self.words[index].clone()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for KeywordPool {
    fn default() -> Self {
        Self {
            words: DEFAULT_KEYWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}
