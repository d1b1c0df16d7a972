//! # Registro de Entidades
//!
//! O resultado do parse. Sempre contém **todas** as dez chaves do conjunto
//! fechado: uma entidade não encontrada tem valor `None`, nunca é omitida.
//!
//! ```rust
//! use bids_core::{Entity, EntityRecord};
//!
//! let record = EntityRecord::new()
//!     .with(Entity::Subject, "sub-001").unwrap()
//!     .with(Entity::Session, "01").unwrap()
//!     .with(Entity::Task, "rest").unwrap()
//!     .with(Entity::Suffix, "eeg").unwrap()
//!     .with(Entity::Extension, "vhdr").unwrap();
//!
//! assert_eq!(record.filename(), "sub-001_ses-01_task-rest_eeg.vhdr");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{ExtractError, Result};

/// Ordem das entidades chave-valor ao reconstruir um nome de arquivo.
const BASENAME_ORDER: [Entity; 7] = [
    Entity::Subject,
    Entity::Session,
    Entity::Task,
    Entity::Acquisition,
    Entity::Run,
    Entity::Space,
    Entity::Description,
];

/// Valores extraídos de um nome de arquivo BIDS, indexados por [`Entity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EntityRecord {
    values: [Option<String>; 10],
}

impl EntityRecord {
    /// Registro com todas as entidades vazias.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: Entity) -> Option<&str> {
        self.values[entity.index()].as_deref()
    }

    /// Define o valor cru de uma entidade, sem normalização.
    pub fn set(&mut self, entity: Entity, value: Option<String>) {
        self.values[entity.index()] = value;
    }

    /// Define uma entidade normalizando o valor (ver [`normalize_value`]).
    pub fn with(mut self, entity: Entity, value: &str) -> Result<Self> {
        let normalized = normalize_value(entity, value)?;
        self.set(entity, Some(normalized));
        Ok(self)
    }

    /// Itera sobre todas as dez entidades, na ordem canônica.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, Option<&str>)> {
        Entity::ALL
            .into_iter()
            .map(move |entity| (entity, self.get(entity)))
    }

    /// Quantas entidades têm valor.
    pub fn matched(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Mapa `nome → valor` com as dez chaves.
    pub fn to_map(&self) -> BTreeMap<&'static str, Option<String>> {
        self.iter()
            .map(|(entity, value)| (entity.name(), value.map(str::to_string)))
            .collect()
    }

    /// Nome BIDS sem extensão: `sub-X_ses-Y_..._sufixo`.
    ///
    /// Entidades vazias são omitidas.
    pub fn basename(&self) -> String {
        let mut parts: Vec<String> = BASENAME_ORDER
            .iter()
            .filter_map(|entity| {
                let key = entity.key()?;
                self.get(*entity).map(|value| format!("{key}-{value}"))
            })
            .collect();
        if let Some(suffix) = self.get(Entity::Suffix) {
            parts.push(suffix.to_string());
        }
        parts.join("_")
    }

    /// Nome completo com extensão.
    pub fn filename(&self) -> String {
        format!("{}{}", self.basename(), self.get(Entity::Extension).unwrap_or(""))
    }

    /// Diretório relativo `sub-X/ses-Y/<datatype>`, omitindo partes vazias.
    pub fn relative_dir(&self) -> PathBuf {
        let mut dir = PathBuf::new();
        if let Some(subject) = self.get(Entity::Subject) {
            dir.push(format!("sub-{subject}"));
        }
        if let Some(session) = self.get(Entity::Session) {
            dir.push(format!("ses-{session}"));
        }
        if let Some(datatype) = self.get(Entity::Datatype) {
            dir.push(datatype);
        }
        dir
    }
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename())
    }
}

impl Serialize for EntityRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Entity::ALL.len()))?;
        for (entity, value) in self.iter() {
            map.serialize_entry(entity.name(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EntityRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<Entity, Option<String>>::deserialize(deserializer)?;
        let mut record = EntityRecord::new();
        for (entity, value) in raw {
            record.set(entity, value);
        }
        Ok(record)
    }
}

/// Normaliza um valor informado pelo usuário para uma entidade.
///
/// - Remove espaços nas bordas.
/// - Entidades com chave aceitam o valor com ou sem prefixo (`sub-001` ou
///   `001`), mas um prefixo diferente da chave é erro.
/// - A extensão ganha o ponto inicial se faltar.
pub fn normalize_value(entity: Entity, value: &str) -> Result<String> {
    let value = value.trim();

    if let Some(key) = entity.key() {
        if let Some((given, rest)) = value.split_once('-') {
            if given != key {
                return Err(ExtractError::PrefixMismatch {
                    entity,
                    value: value.to_string(),
                    expected: key,
                    found: given.to_string(),
                });
            }
            return Ok(rest.to_string());
        }
        return Ok(value.to_string());
    }

    if entity == Entity::Extension && !value.is_empty() && !value.starts_with('.') {
        return Ok(format!(".{value}"));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EntityRecord {
        EntityRecord::new()
            .with(Entity::Subject, "001").unwrap()
            .with(Entity::Session, "01").unwrap()
            .with(Entity::Task, "rest").unwrap()
            .with(Entity::Run, "01").unwrap()
            .with(Entity::Suffix, "eeg").unwrap()
    }

    #[test]
    fn test_new_record_is_empty_but_complete() {
        let record = EntityRecord::new();
        assert_eq!(record.matched(), 0);
        let map = record.to_map();
        assert_eq!(map.len(), 10);
        assert!(map.values().all(Option::is_none));
    }

    #[test]
    fn test_prefix_normalization() {
        let record = EntityRecord::new()
            .with(Entity::Subject, "sub-002").unwrap()
            .with(Entity::Acquisition, "acq-full").unwrap()
            .with(Entity::Run, " run-01 ").unwrap();
        assert_eq!(record.get(Entity::Subject), Some("002"));
        assert_eq!(record.get(Entity::Acquisition), Some("full"));
        assert_eq!(record.get(Entity::Run), Some("01"));
    }

    #[test]
    fn test_invalid_prefix() {
        let err = EntityRecord::new().with(Entity::Subject, "subject-001").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::PrefixMismatch { entity: Entity::Subject, ref found, .. } if found == "subject"
        ));

        assert!(EntityRecord::new().with(Entity::Task, "mytask-rest").is_err());
    }

    #[test]
    fn test_extension_gets_dot() {
        assert_eq!(normalize_value(Entity::Extension, "vhdr").unwrap(), ".vhdr");
        assert_eq!(normalize_value(Entity::Extension, ".vhdr").unwrap(), ".vhdr");
        assert_eq!(normalize_value(Entity::Extension, "").unwrap(), "");
    }

    #[test]
    fn test_basename_and_filename() {
        let record = sample();
        assert_eq!(record.basename(), "sub-001_ses-01_task-rest_run-01_eeg");
        assert_eq!(record.filename(), "sub-001_ses-01_task-rest_run-01_eeg");

        let record = record.with(Entity::Extension, ".vhdr").unwrap();
        assert_eq!(record.filename(), "sub-001_ses-01_task-rest_run-01_eeg.vhdr");
        assert_eq!(record.to_string(), record.filename());
    }

    #[test]
    fn test_relative_dir() {
        let record = sample().with(Entity::Datatype, "eeg").unwrap();
        assert_eq!(record.relative_dir(), PathBuf::from("sub-001/ses-01/eeg"));

        let only_subject = EntityRecord::new().with(Entity::Subject, "001").unwrap();
        assert_eq!(only_subject.relative_dir(), PathBuf::from("sub-001"));
    }

    #[test]
    fn test_serialize_keeps_all_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 10);
        assert_eq!(object["subject"], "001");
        assert!(object["space"].is_null());
        assert!(object["extension"].is_null());
    }

    #[test]
    fn test_deserialize() {
        let record: EntityRecord =
            serde_json::from_str(r#"{"subject": "01", "suffix": "bold", "task": null}"#).unwrap();
        assert_eq!(record.get(Entity::Subject), Some("01"));
        assert_eq!(record.get(Entity::Suffix), Some("bold"));
        assert_eq!(record.get(Entity::Task), None);
    }
}
