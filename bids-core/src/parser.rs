//! # Parser de Entidades — Orquestrador
//!
//! Conecta as etapas da extração:
//!
//! 1. **Registro de padrões** ([`crate::patterns`]): resolve o conjunto ativo.
//! 2. **Decomposição** ([`crate::filename`]): datatype, stem e extensão.
//! 3. **Scanner** ([`crate::scanner`]): entidades `chave-valor` token a token.
//! 4. **Sufixo** ([`crate::suffix`]): busca livre no stem inteiro.
//!
//! Os padrões são compilados uma única vez por [`EntityParser`]; o parser
//! padrão é compilado na primeira chamada e compartilhado pelo processo.

use std::path::Path;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use tracing::debug;

use crate::entity::Entity;
use crate::error::Result;
use crate::filename::decompose;
use crate::patterns::{resolve, PatternSet};
use crate::record::EntityRecord;
use crate::scanner::ComponentScanner;
use crate::suffix::SuffixResolver;

// Os padrões padrão são constantes do crate; falhar aqui é bug do próprio crate.
static DEFAULT_PARSER: Lazy<EntityParser> = Lazy::new(|| {
    EntityParser::build(None).expect("default BIDS patterns must compile")
});

/// Parser com os padrões já compilados.
///
/// Não guarda estado mutável: pode ser compartilhado entre threads e
/// reutilizado para qualquer número de caminhos.
#[derive(Debug, Clone)]
pub struct EntityParser {
    scanner: ComponentScanner,
    suffix: Option<SuffixResolver>,
}

impl EntityParser {
    /// Parser com o conjunto padrão.
    pub fn new() -> Self {
        DEFAULT_PARSER.clone()
    }

    /// Parser com um override que **substitui** o conjunto padrão.
    ///
    /// Entidades ausentes do override não são extraídas; o sufixo só é
    /// extraído se o override tiver a chave `suffix`.
    pub fn with_patterns(patterns: &PatternSet) -> Result<Self> {
        Self::build(Some(patterns))
    }

    fn build(override_set: Option<&PatternSet>) -> Result<Self> {
        let active = resolve(override_set);
        let scanner = ComponentScanner::compile(active)?;
        let suffix = SuffixResolver::for_override(override_set)?;
        debug!(
            patterns = active.len(),
            custom = override_set.is_some(),
            suffix = suffix.is_some(),
            "padrões compilados"
        );
        Ok(Self { scanner, suffix })
    }

    /// Extrai as entidades de um caminho. Nunca falha: entidades não
    /// encontradas ficam `None`.
    pub fn parse(&self, path: impl AsRef<Path>) -> EntityRecord {
        let parts = decompose(path.as_ref());
        let mut record = EntityRecord::new();

        record.set(Entity::Datatype, parts.datatype.clone());
        record.set(Entity::Extension, Some(parts.extension.clone()));

        self.scanner.scan(parts.components(), &mut record);

        if let Some(resolver) = &self.suffix {
            record.set(Entity::Suffix, resolver.extract(&parts.stem));
        }

        debug!(path = %path.as_ref().display(), matched = record.matched(), "arquivo analisado");
        record
    }

    /// Processa um lote de caminhos em paralelo, preservando a ordem.
    pub fn parse_all<P>(&self, paths: &[P]) -> Vec<EntityRecord>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|path| self.parse(path)).collect()
    }
}

impl Default for EntityParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extrai as entidades BIDS de um caminho.
///
/// Sem override usa os padrões padrão. Com override, ele substitui o
/// conjunto padrão por inteiro. Um padrão que não compila aborta com erro e
/// nenhum registro parcial é retornado.
pub fn parse_entities(path: impl AsRef<Path>, patterns: Option<&PatternSet>) -> Result<EntityRecord> {
    let record = match patterns {
        None => DEFAULT_PARSER.parse(path),
        Some(patterns) => EntityParser::with_patterns(patterns)?.parse(path),
    };
    Ok(record)
}
