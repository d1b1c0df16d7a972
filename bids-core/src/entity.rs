//! # Entidades BIDS
//!
//! Define o conjunto **fechado** de entidades que o parser reconhece em um
//! nome de arquivo BIDS.
//!
//! | Entidade      | Chave BIDS | Origem                              |
//! |---------------|------------|-------------------------------------|
//! | subject       | `sub`      | token `sub-<valor>`                 |
//! | session       | `ses`      | token `ses-<valor>`                 |
//! | datatype      | —          | diretório pai do arquivo            |
//! | task          | `task`     | token `task-<valor>`                |
//! | run           | `run`      | token `run-<valor>`                 |
//! | space         | `space`    | token `space-<valor>`               |
//! | acquisition   | `acq`      | token `acq-<valor>`                 |
//! | description   | `desc`     | token `desc-<valor>`                |
//! | suffix        | —          | último token antes da extensão      |
//! | extension     | —          | extensão final (`.tsv`, `.gz`...)   |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Entidades reconhecidas pelo parser.
///
/// A ordem de declaração é a ordem canônica usada na serialização e na
/// iteração de [`EntityRecord`](crate::EntityRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    /// **Sujeito**: participante do estudo. Ex: `sub-01` → "01".
    Subject,
    /// **Sessão**: visita/sessão de aquisição. Ex: `ses-pre` → "pre".
    Session,
    /// **Tipo de dado**: nome do diretório pai (`anat`, `func`, `eeg`...).
    Datatype,
    /// **Tarefa**: paradigma executado durante a aquisição. Ex: `task-rest`.
    Task,
    /// **Run**: repetição da mesma aquisição. Ex: `run-1`.
    Run,
    /// **Espaço**: espaço de coordenadas (derivados, eletrodos). Ex: `space-MNI`.
    Space,
    /// **Aquisição**: parâmetros de aquisição. Ex: `acq-highres`.
    Acquisition,
    /// **Descrição**: rótulo livre de derivados. Ex: `desc-preproc`.
    Description,
    /// **Sufixo**: modalidade posicional, sem chave. Ex: `bold`, `T1w`.
    Suffix,
    /// **Extensão**: inclui o ponto. Ex: `.tsv`.
    Extension,
}

impl Entity {
    /// Todas as entidades, na ordem canônica.
    pub const ALL: [Entity; 10] = [
        Entity::Subject,
        Entity::Session,
        Entity::Datatype,
        Entity::Task,
        Entity::Run,
        Entity::Space,
        Entity::Acquisition,
        Entity::Description,
        Entity::Suffix,
        Entity::Extension,
    ];

    /// Nome da entidade como string (chave do registro e da configuração)
    pub fn name(&self) -> &'static str {
        match self {
            Entity::Subject => "subject",
            Entity::Session => "session",
            Entity::Datatype => "datatype",
            Entity::Task => "task",
            Entity::Run => "run",
            Entity::Space => "space",
            Entity::Acquisition => "acquisition",
            Entity::Description => "description",
            Entity::Suffix => "suffix",
            Entity::Extension => "extension",
        }
    }

    /// Chave BIDS usada no nome do arquivo (`sub`, `ses`, `acq`...).
    ///
    /// Retorna `None` para entidades posicionais ou estruturais, que não
    /// aparecem como `chave-valor`.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Entity::Subject => Some("sub"),
            Entity::Session => Some("ses"),
            Entity::Task => Some("task"),
            Entity::Run => Some("run"),
            Entity::Space => Some("space"),
            Entity::Acquisition => Some("acq"),
            Entity::Description => Some("desc"),
            Entity::Datatype | Entity::Suffix | Entity::Extension => None,
        }
    }

    /// Índice da entidade em [`Entity::ALL`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Entity {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .iter()
            .copied()
            .find(|entity| entity.name() == s)
            .ok_or_else(|| ExtractError::UnknownEntity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for entity in Entity::ALL {
            assert_eq!(entity.name().parse::<Entity>().unwrap(), entity);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "recording".parse::<Entity>().unwrap_err();
        assert!(matches!(err, ExtractError::UnknownEntity(ref name) if name == "recording"));
    }

    #[test]
    fn test_keys() {
        assert_eq!(Entity::Acquisition.key(), Some("acq"));
        assert_eq!(Entity::Description.key(), Some("desc"));
        assert_eq!(Entity::Suffix.key(), None);
        assert_eq!(Entity::Datatype.key(), None);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, entity) in Entity::ALL.iter().enumerate() {
            assert_eq!(entity.index(), i);
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Entity::Acquisition).unwrap();
        assert_eq!(json, "\"acquisition\"");
    }
}
