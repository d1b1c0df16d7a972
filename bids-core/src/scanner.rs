//! # Scanner de Componentes
//!
//! Percorre os tokens do stem (`sub-01`, `ses-02`, `task-rest`...) e tenta
//! cada padrão ativo **ancorado no início** do token. Casar ancorado, e não
//! buscar no stem inteiro, impede que `task-` case dentro do valor de outro
//! token.
//!
//! Quando a mesma chave aparece em mais de um token, vence o último:
//! `sub-01_sub-02_bold` → subject = "02".

use regex::Regex;
use tracing::trace;

use crate::entity::Entity;
use crate::error::{ExtractError, Result};
use crate::patterns::PatternSet;
use crate::record::EntityRecord;

/// Terminações que já delimitam o fim do valor e dispensam o sufixo extra.
const TERMINATORS: [&str; 2] = [r"(?:[^0-9]|$)", r"(?:_|$)"];

/// Delimitador acrescentado aos padrões sem terminação própria.
const DELIMITER: &str = r"(?:_|$)";

/// Acrescenta `(?:_|$)` ao padrão se ele não terminar em um delimitador.
pub fn normalize_pattern(pattern: &str) -> String {
    if TERMINATORS.iter().any(|t| pattern.ends_with(t)) {
        pattern.to_string()
    } else {
        format!("{pattern}{DELIMITER}")
    }
}

/// Um padrão compilado para uma entidade.
#[derive(Debug, Clone)]
struct Rule {
    entity: Entity,
    regex: Regex,
}

/// Padrões compilados de todas as entidades exceto `suffix`.
#[derive(Debug, Clone)]
pub struct ComponentScanner {
    rules: Vec<Rule>,
}

impl ComponentScanner {
    /// Compila os padrões do conjunto ativo, ignorando `suffix`.
    ///
    /// O primeiro padrão inválido (na ordem canônica) aborta com
    /// [`ExtractError::InvalidPattern`].
    pub fn compile(patterns: &PatternSet) -> Result<Self> {
        let rules = patterns
            .iter()
            .filter(|(entity, _)| *entity != Entity::Suffix)
            .map(|(entity, pattern)| {
                let anchored = format!("^(?:{})", normalize_pattern(pattern));
                Regex::new(&anchored)
                    .map(|regex| Rule { entity, regex })
                    .map_err(|e| ExtractError::InvalidPattern {
                        entity,
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Entidades que este scanner consegue preencher.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.rules.iter().map(|rule| rule.entity)
    }

    /// Aplica os padrões a cada token, sobrescrevendo valores anteriores.
    pub fn scan<'a>(&self, components: impl IntoIterator<Item = &'a str>, record: &mut EntityRecord) {
        for component in components {
            for rule in &self.rules {
                let Some(value) = rule
                    .regex
                    .captures(component)
                    .and_then(|caps| caps.get(1))
                else {
                    continue;
                };
                trace!(entity = %rule.entity, component, value = value.as_str(), "token casou");
                record.set(rule.entity, Some(value.as_str().to_string()));
            }
        }
    }
}
