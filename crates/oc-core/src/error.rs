use thiserror::Error;

pub type OcResult<T> = Result<T, OcError>;

/// Every failure here aborts build setup; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcError {
    #[error("Invalid configuration: {what}")]
    Configuration { what: String },

    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },

    #[error("Placeholder not found in {file}: {placeholder:?}")]
    PatchNotFound { file: String, placeholder: String },
}

impl OcError {
    pub fn configuration(what: impl Into<String>) -> Self {
        OcError::Configuration { what: what.into() }
    }

    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        OcError::NotFound {
            what,
            name: name.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, OcError::Configuration { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, OcError::NotFound { .. })
    }

    pub fn is_patch_not_found(&self) -> bool {
        matches!(self, OcError::PatchNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        let err = OcError::not_found("target", "TKFoo");
        assert_eq!(err.to_string(), "target not found: TKFoo");

        let err = OcError::PatchNotFound {
            file: "CMakeLists.txt".into(),
            placeholder: "project (OCCT)".into(),
        };
        assert!(err.to_string().contains("CMakeLists.txt"));
        assert!(err.is_patch_not_found());
    }
}
