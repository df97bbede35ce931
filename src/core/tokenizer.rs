//! Token estimate for the `--stats` summary
//!
//! BPE encoders are loaded lazily; if one cannot be loaded the estimate
//! degrades to the chars/4 heuristic instead of failing the run.

use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::CoreBPE;

/// Encoding used to estimate the size of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenModel {
    #[default]
    Cl100k,
    O200k,
    /// No BPE, chars / 4
    Heuristic,
}

impl TokenModel {
    pub const NAMES: [&'static str; 3] = ["cl100k", "o200k", "heuristic"];

    fn name(self) -> &'static str {
        match self {
            TokenModel::Cl100k => Self::NAMES[0],
            TokenModel::O200k => Self::NAMES[1],
            TokenModel::Heuristic => Self::NAMES[2],
        }
    }

    fn encoder(self) -> Option<&'static CoreBPE> {
        match self {
            TokenModel::Cl100k => CL100K.as_ref(),
            TokenModel::O200k => O200K.as_ref(),
            TokenModel::Heuristic => None,
        }
    }
}

impl fmt::Display for TokenModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_suffix("_base").unwrap_or(&wanted);

        [TokenModel::Cl100k, TokenModel::O200k, TokenModel::Heuristic]
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown token model '{}' (expected one of: {})",
                    s,
                    Self::NAMES.join(", ")
                )
            })
    }
}

static CL100K: Lazy<Option<CoreBPE>> = Lazy::new(|| load("cl100k_base", tiktoken_rs::cl100k_base));
static O200K: Lazy<Option<CoreBPE>> = Lazy::new(|| load("o200k_base", tiktoken_rs::o200k_base));

fn load<E: fmt::Display>(name: &str, build: fn() -> Result<CoreBPE, E>) -> Option<CoreBPE> {
    match build() {
        Ok(bpe) => Some(bpe),
        Err(e) => {
            tracing::warn!(encoding = name, error = %e, "falling back to heuristic token estimate");
            None
        }
    }
}

/// Estimated token count of `text`
pub fn count_tokens(text: &str, model: TokenModel) -> usize {
    if text.is_empty() {
        return 0;
    }

    model
        .encoder()
        .map(|bpe| bpe.encode_with_special_tokens(text).len())
        .unwrap_or_else(|| estimate_tokens_heuristic(text))
}

/// One token per four characters, rounded up
pub fn estimate_tokens_heuristic(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
