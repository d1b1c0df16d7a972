//! # Resolução do Sufixo
//!
//! O sufixo (`bold`, `T1w`, `eeg`) não tem chave `xxx-`, então não pode ser
//! encontrado pelo scanner de tokens. Ele é extraído por uma **busca livre**
//! (não ancorada) sobre o stem inteiro.
//!
//! ## Quando roda
//!
//! | Override            | Padrão usado                  |
//! |---------------------|-------------------------------|
//! | nenhum              | sufixo padrão                 |
//! | com chave `suffix`  | o `suffix` do override        |
//! | sem chave `suffix`  | nenhum: o sufixo fica vazio   |

use regex::Regex;

use crate::entity::Entity;
use crate::error::{ExtractError, Result};
use crate::patterns::PatternSet;

/// Padrão compilado do sufixo.
#[derive(Debug, Clone)]
pub struct SuffixResolver {
    regex: Regex,
}

impl SuffixResolver {
    /// Decide se o sufixo é extraído e com qual padrão.
    ///
    /// Retorna `Ok(None)` quando há override sem a chave `suffix`.
    pub fn for_override(override_set: Option<&PatternSet>) -> Result<Option<Self>> {
        let pattern = match override_set {
            None => PatternSet::defaults().get(Entity::Suffix),
            Some(set) => match set.get(Entity::Suffix) {
                Some(pattern) => Some(pattern),
                None => return Ok(None),
            },
        };
        pattern.map(Self::compile).transpose()
    }

    pub fn compile(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| ExtractError::InvalidSuffixPattern {
            message: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Busca o sufixo no stem; retorna o grupo 1 se ele participou.
    pub fn extract(&self, stem: &str) -> Option<String> {
        self.regex
            .captures(stem)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
