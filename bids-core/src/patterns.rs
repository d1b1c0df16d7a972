//! # Registro de Padrões
//!
//! Cada entidade é extraída por uma expressão regular com **exatamente um**
//! grupo de captura. O valor capturado pelo grupo 1 vira o valor da entidade.
//!
//! Existem dois conjuntos:
//! - **Padrão** ([`PatternSet::defaults`]): constante do processo, imutável.
//! - **Override**: fornecido pelo chamador em cada chamada. Ele **substitui**
//!   o conjunto padrão por inteiro, não é mesclado campo a campo. Para mesclar,
//!   use [`PatternSet::merged_with_defaults`] explicitamente.
//!
//! ## Configuração via JSON
//!
//! ```rust
//! use bids_core::{Entity, PatternSet};
//!
//! let set = PatternSet::from_json_str(r#"{ "subject": "sub-([0-9]+)" }"#).unwrap();
//! assert_eq!(set.get(Entity::Subject), Some("sub-([0-9]+)"));
//! assert!(!set.contains(Entity::Suffix));
//! ```

use std::collections::BTreeMap;
use std::io::Read;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::Result;

/// Padrões padrão para cada entidade extraída por regex.
///
/// `datatype` e `extension` não aparecem aqui: vêm da estrutura do caminho.
pub const DEFAULT_PATTERNS: &[(Entity, &str)] = &[
    (Entity::Subject, r"sub-([^_]+)"),
    (Entity::Session, r"ses-([^_]+)"),
    (Entity::Task, r"task-([^_]+)"),
    (Entity::Run, r"run-([^_]+)"),
    (Entity::Acquisition, r"acq-([^_]+)"),
    (Entity::Space, r"space-([^_]+)"),
    (Entity::Description, r"desc-([^_]+)"),
    (Entity::Suffix, r"[^_]+_([^_.]+)(?:\.|$)"),
];

static DEFAULT_SET: Lazy<PatternSet> = Lazy::new(|| {
    DEFAULT_PATTERNS
        .iter()
        .map(|(entity, pattern)| (*entity, pattern.to_string()))
        .collect()
});

/// Mapa entidade → expressão regular (fonte, ainda não compilada).
///
/// A compilação acontece ao construir um [`EntityParser`](crate::EntityParser);
/// um padrão inválido só é detectado nesse momento.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternSet {
    patterns: BTreeMap<Entity, String>,
}

impl PatternSet {
    /// Conjunto vazio. Útil como base de um override construído à mão.
    pub fn new() -> Self {
        Self::default()
    }

    /// O conjunto padrão do processo.
    pub fn defaults() -> &'static PatternSet {
        &DEFAULT_SET
    }

    /// Constrói a partir de pares `nome → padrão`, como chegam de uma
    /// configuração genérica. Nomes fora do conjunto fechado são rejeitados.
    pub fn from_map<I, K, V>(map: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut set = PatternSet::new();
        for (name, pattern) in map {
            let entity = name.as_ref().parse::<Entity>()?;
            set.insert(entity, pattern);
        }
        Ok(set)
    }

    /// Lê um override de um objeto JSON `{ "subject": "sub-([^_]+)", ... }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lê um override JSON de qualquer leitor (arquivo, stdin...).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Adiciona ou substitui o padrão de uma entidade.
    pub fn insert(&mut self, entity: Entity, pattern: impl Into<String>) -> Option<String> {
        self.patterns.insert(entity, pattern.into())
    }

    /// Versão encadeável de [`PatternSet::insert`].
    pub fn with(mut self, entity: Entity, pattern: impl Into<String>) -> Self {
        self.insert(entity, pattern);
        self
    }

    pub fn get(&self, entity: Entity) -> Option<&str> {
        self.patterns.get(&entity).map(String::as_str)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.patterns.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Itera na ordem canônica das entidades.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &str)> {
        self.patterns.iter().map(|(entity, pattern)| (*entity, pattern.as_str()))
    }

    /// Conjunto padrão sobreposto por este override.
    ///
    /// Nunca é aplicado implicitamente pelo parser: um override passado
    /// direto desativa as entidades que não menciona.
    pub fn merged_with_defaults(&self) -> PatternSet {
        let mut merged = PatternSet::defaults().clone();
        for (entity, pattern) in self.iter() {
            merged.insert(entity, pattern);
        }
        merged
    }
}

impl FromIterator<(Entity, String)> for PatternSet {
    fn from_iter<T: IntoIterator<Item = (Entity, String)>>(iter: T) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

/// Resolve o conjunto ativo: o override inteiro se existir, senão o padrão.
pub fn resolve(override_set: Option<&PatternSet>) -> &PatternSet {
    override_set.unwrap_or(PatternSet::defaults())
}
