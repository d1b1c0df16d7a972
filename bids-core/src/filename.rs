//! # Decomposição do Caminho
//!
//! Separa um caminho nas partes que o parser usa, sem tocar no sistema de
//! arquivos:
//!
//! ```text
//! sub-01/ses-02/func/sub-01_ses-02_task-rest_bold.nii.gz
//!               ^^^^ datatype (penúltimo segmento)
//!                    ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^ stem  ^^^ extensão
//! ```
//!
//! Só a **última** extensão é separada: `x.nii.gz` tem stem `x.nii` e
//! extensão `.gz`.

use std::path::{Component, Path};

/// Partes de um caminho relevantes para a extração.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Penúltimo segmento, se o caminho tiver ao menos dois.
    pub datatype: Option<String>,
    /// Nome final sem a última extensão.
    pub stem: String,
    /// Última extensão com o ponto (`.tsv`), ou string vazia.
    pub extension: String,
}

impl PathParts {
    /// Tokens do stem separados por `_`, na ordem do nome.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.stem.split('_')
    }
}

/// Decompõe um caminho em datatype, stem e extensão.
pub fn decompose(path: &Path) -> PathParts {
    let segments: Vec<String> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let datatype = if segments.len() >= 2 {
        Some(segments[segments.len() - 2].clone())
    } else {
        None
    };

    let name = match path.components().last() {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        Some(Component::ParentDir) => "..".to_string(),
        _ => String::new(),
    };
    let (stem, extension) = split_extension(&name);

    PathParts {
        datatype,
        stem: stem.to_string(),
        extension: extension.to_string(),
    }
}

/// Separa a última extensão de um nome de arquivo.
///
/// Um ponto inicial (`.bidsignore`) ou final (`arquivo.`) não conta como
/// extensão.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 && i < name.len() - 1 => name.split_at(i),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_full_path() {
        let parts = decompose(Path::new("sub-01/ses-02/func/sub-01_ses-02_task-rest_bold.nii.gz"));
        assert_eq!(parts.datatype.as_deref(), Some("func"));
        assert_eq!(parts.stem, "sub-01_ses-02_task-rest_bold.nii");
        assert_eq!(parts.extension, ".gz");
    }

    #[test]
    fn test_single_segment_has_no_datatype() {
        let parts = decompose(Path::new("sub-01_bold.tsv"));
        assert_eq!(parts.datatype, None);
        assert_eq!(parts.stem, "sub-01_bold");
        assert_eq!(parts.extension, ".tsv");
    }

    #[test]
    fn test_current_dir_is_ignored() {
        let parts = decompose(Path::new("./sub-01_bold.tsv"));
        assert_eq!(parts.datatype, None);

        let parts = decompose(Path::new("./anat/sub-01_T1w.nii"));
        assert_eq!(parts.datatype.as_deref(), Some("anat"));
    }

    #[test]
    fn test_no_extension() {
        let parts = decompose(Path::new("eeg/sub-01_eeg"));
        assert_eq!(parts.extension, "");
        assert_eq!(parts.stem, "sub-01_eeg");
    }

    #[test]
    fn test_split_extension_edges() {
        assert_eq!(split_extension(".bidsignore"), (".bidsignore", ""));
        assert_eq!(split_extension("arquivo."), ("arquivo.", ""));
        assert_eq!(split_extension(""), ("", ""));
        assert_eq!(split_extension("a.b.c"), ("a.b", ".c"));
    }

    #[test]
    fn test_components() {
        let parts = decompose(Path::new("sub-01_task-x_bold.tsv"));
        let tokens: Vec<&str> = parts.components().collect();
        assert_eq!(tokens, vec!["sub-01", "task-x", "bold"]);
    }

    #[test]
    fn test_empty_path() {
        let parts = decompose(Path::new(""));
        assert_eq!(parts.datatype, None);
        assert_eq!(parts.stem, "");
        assert_eq!(parts.extension, "");
    }
}
