use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use serde_json::Value;
use tokio::fs::{create_dir_all, write};
use tracing::{debug, error};

use crate::errors::EmitError;
use crate::types::EmittedDocument;

const MAX_CONCURRENT_WRITES: usize = 16;

/// Persists one document at a path relative to some destination.
#[allow(async_fn_in_trait)]
pub trait DocumentEmitter {
    async fn emit(&self, logical_path: &Path, document: &Value) -> Result<(), EmitError>;
}

/// Writes pretty-printed JSON under `root`.
#[derive(Clone, Debug)]
pub struct FsEmitter {
    root: PathBuf,
}

impl FsEmitter {
    pub fn new(root: impl Into<PathBuf>) -> FsEmitter {
        FsEmitter { root: root.into() }
    }
}

impl DocumentEmitter for FsEmitter {
    async fn emit(&self, logical_path: &Path, document: &Value) -> Result<(), EmitError> {
        let path = self.root.join(logical_path);
        let contents =
            serde_json::to_string_pretty(document).map_err(|source| EmitError::Serialize {
                path: path.clone(),
                source,
            })?;
        if let Some(parent) = path.parent() {
            create_dir_all(parent)
                .await
                .map_err(|source| EmitError::Create {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        write(&path, contents + "\n")
            .await
            .map_err(|source| EmitError::Write {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "wrote document");
        Ok(())
    }
}

/// Emits every document, continuing past failures. Returns all failures.
pub async fn emit_all<E: DocumentEmitter>(
    emitter: &E,
    documents: &[EmittedDocument],
) -> Vec<EmitError> {
    stream::iter(documents)
        .map(|d| emitter.emit(&d.path, &d.document))
        .buffer_unordered(MAX_CONCURRENT_WRITES)
        .filter_map(|result| async move {
            match result {
                Ok(()) => None,
                Err(e) => {
                    error!(path = %e.path().display(), error = %e, "failed to emit document");
                    Some(e)
                }
            }
        })
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;

    fn document(path: &str, value: Value) -> EmittedDocument {
        EmittedDocument {
            path: PathBuf::from(path),
            document: value,
        }
    }

    #[tokio::test]
    async fn creates_parent_directories() {
        let dest = tempfile::tempdir().unwrap();
        let emitter = FsEmitter::new(dest.path());
        let errors = emit_all(
            &emitter,
            &[
                document(".well-known/webfinger", json!({ "subject": "acct:a@b" })),
                document("activitypub/outbox/page-1.jsonld", json!({ "type": "OrderedCollectionPage" })),
            ],
        )
        .await;
        assert!(errors.is_empty());

        let written: Value = serde_json::from_str(
            &fs::read_to_string(dest.path().join("activitypub/outbox/page-1.jsonld")).unwrap(),
        )
        .unwrap();
        assert_eq!(written["type"], "OrderedCollectionPage");
        assert!(dest.path().join(".well-known/webfinger").is_file());
    }

    #[tokio::test]
    async fn failures_do_not_stop_other_documents() {
        let dest = tempfile::tempdir().unwrap();
        // a file where a directory is needed
        fs::write(dest.path().join("activitypub"), "").unwrap();
        let emitter = FsEmitter::new(dest.path());
        let errors = emit_all(
            &emitter,
            &[
                document("activitypub/inbox.jsonld", json!({})),
                document("actor.jsonld", json!({ "type": "Person" })),
                document("activitypub/outbox.jsonld", json!({})),
            ],
        )
        .await;

        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.path().starts_with(dest.path().join("activitypub"))));
        assert!(dest.path().join("actor.jsonld").is_file());
    }
}
