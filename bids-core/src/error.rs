//! Erros do parser de entidades.
//!
//! Ausência de uma entidade nunca é erro: vira `None` no registro. Os erros
//! abaixo indicam configuração inválida do chamador e abortam o parse inteiro.

use thiserror::Error;

use crate::entity::Entity;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Padrão de uma entidade (exceto `suffix`) não compila.
    #[error("invalid regex pattern for {entity}: {message}")]
    InvalidPattern { entity: Entity, message: String },

    /// Padrão do sufixo não compila.
    #[error("invalid regex pattern for suffix: {message}")]
    InvalidSuffixPattern { message: String },

    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Valor com prefixo de outra chave (ex: `subject-001` para `sub`).
    #[error("invalid prefix in {entity}='{value}': expected '{expected}-' prefix if any, got '{found}-'")]
    PrefixMismatch {
        entity: Entity,
        value: String,
        expected: &'static str,
        found: String,
    },

    #[error("pattern configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl ExtractError {
    /// Entidade cujo padrão falhou, quando o erro é de padrão.
    pub fn entity(&self) -> Option<Entity> {
        match self {
            ExtractError::InvalidPattern { entity, .. } => Some(*entity),
            ExtractError::InvalidSuffixPattern { .. } => Some(Entity::Suffix),
            ExtractError::PrefixMismatch { entity, .. } => Some(*entity),
            ExtractError::UnknownEntity(_) | ExtractError::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_message() {
        let err = ExtractError::InvalidPattern {
            entity: Entity::Session,
            message: "unclosed character class".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid regex pattern for session: unclosed character class"
        );
        assert_eq!(err.entity(), Some(Entity::Session));
    }

    #[test]
    fn test_suffix_error_is_distinct() {
        let err = ExtractError::InvalidSuffixPattern {
            message: "boom".to_string(),
        };
        assert!(err.to_string().starts_with("invalid regex pattern for suffix"));
        assert_eq!(err.entity(), Some(Entity::Suffix));
    }
}
