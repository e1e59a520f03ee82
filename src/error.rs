/// Errors of the folder tree.
///
/// [`PathNotFound`](Error::PathNotFound) and [`DuplicateName`](Error::DuplicateName) are conditions caused by user input.
/// They abort the current operation and leave the [`Tree`](crate::Tree) unchanged.
/// The remaining variants describe malformed tree descriptions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path is not correct: {path}")]
    PathNotFound { path: String },

    #[error("Name already exists: {path}")]
    DuplicateName { path: String },

    #[error("unrecognized node kind {0:?}")]
    UnknownKind(String),

    #[error("invalid node name {0:?}")]
    InvalidName(String),

    #[error("the root of a tree has to be a folder")]
    RootNotFolder,

    #[cfg(feature = "json")]
    #[error("invalid tree description: {0}")]
    Description(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    pub(crate) fn path_not_found<S: AsRef<str>>(segments: &[S]) -> Self {
        Self::PathNotFound {
            path: join(segments),
        }
    }

    /// Whether this error should be shown to the user instead of being treated as a fault.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::PathNotFound { .. } | Self::DuplicateName { .. } | Self::InvalidName(_)
        )
    }
}

pub(crate) fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

#[test]
fn path_not_found_joins_segments() {
    let error = Error::path_not_found(&["root", "first", "nope"]);
    assert_eq!(error.to_string(), "Path is not correct: root/first/nope");
    assert!(error.is_user_facing());
}

#[test]
fn duplicate_name_does_not_mention_kind() {
    let error = Error::DuplicateName {
        path: "root/docs".to_owned(),
    };
    assert_eq!(error.to_string(), "Name already exists: root/docs");
}

#[test]
fn root_not_folder_is_a_fault() {
    assert!(!Error::RootNotFolder.is_user_facing());
}
