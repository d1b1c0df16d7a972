//! # bids-core — Extração de Entidades de Nomes de Arquivo BIDS
//!
//! Este crate transforma um caminho no padrão BIDS (Brain Imaging Data Structure)
//! em um registro estruturado de entidades. Não acessa o sistema de arquivos:
//! trabalha apenas sobre a string do caminho.
//!
//! ## Arquitetura
//!
//! ```text
//! caminho ──► Registro de Padrões ──► Scanner de Componentes ──► Sufixo ──► EntityRecord
//!                (patterns)              (scanner)               (suffix)
//!             datatype e extensão vêm direto da estrutura do caminho (filename)
//! ```
//!
//! 1.  **Padrões** ([`patterns`]): regex padrão por entidade, ou override do chamador.
//! 2.  **Decomposição** ([`filename`]): diretório pai (datatype), stem e extensão.
//! 3.  **Scanner** ([`scanner`]): cada token `chave-valor` do stem, casado no início do token.
//! 4.  **Sufixo** ([`suffix`]): busca livre pelo último token antes da extensão.
//! 5.  **Saída**: [`EntityRecord`] com as dez entidades, `None` onde nada casou.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use bids_core::{parse_entities, Entity, PatternSet};
//!
//! let record = parse_entities("func/sub-01_ses-02_task-rest_run-1_bold.nii.gz", None).unwrap();
//! assert_eq!(record.get(Entity::Subject), Some("01"));
//! assert_eq!(record.get(Entity::Suffix), Some("bold"));
//! assert_eq!(record.get(Entity::Datatype), Some("func"));
//! assert_eq!(record.get(Entity::Extension), Some(".gz"));
//!
//! // Um override substitui todos os padrões: aqui só o sujeito é extraído.
//! let custom = PatternSet::new().with(Entity::Subject, r"sub-(\d+)");
//! let record = parse_entities("func/sub-01_task-rest_bold.nii", Some(&custom)).unwrap();
//! assert_eq!(record.get(Entity::Subject), Some("01"));
//! assert_eq!(record.get(Entity::Task), None);
//! assert_eq!(record.get(Entity::Suffix), None);
//! ```

pub mod entity;
pub mod error;
pub mod filename;
pub mod parser;
pub mod patterns;
pub mod record;
pub mod scanner;
pub mod suffix;

pub use entity::Entity;
pub use error::{ExtractError, Result};
pub use parser::{parse_entities, EntityParser};
pub use patterns::PatternSet;
pub use record::EntityRecord;
