//! Build artifact descriptor.

use serde::{Deserialize, Serialize};

/// What the artifact step found at a path.
///
/// `valid` is derived, never stored independently: it is recomputed on
/// construction and on deserialization, so a document claiming
/// `valid: true` for a missing file still reads back as invalid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "ArtifactFields")]
pub struct ArtifactDescriptor {
    exists: bool,
    executable: bool,
    size_bytes: u64,
    path: String,
    valid: bool,
}

#[derive(Deserialize)]
struct ArtifactFields {
    #[serde(default)]
    exists: bool,
    #[serde(default)]
    executable: bool,
    #[serde(default)]
    size_bytes: u64,
    #[serde(default)]
    path: String,
}

impl From<ArtifactFields> for ArtifactDescriptor {
    fn from(fields: ArtifactFields) -> Self {
        Self::new(fields.path, fields.exists, fields.executable, fields.size_bytes)
    }
}

impl ArtifactDescriptor {
    pub fn new(path: impl Into<String>, exists: bool, executable: bool, size_bytes: u64) -> Self {
        Self {
            exists,
            executable,
            size_bytes,
            path: path.into(),
            valid: exists && executable,
        }
    }

    /// Descriptor for a path that does not exist.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, false, false, 0)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn executable(&self) -> bool {
        self.executable
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn valid(&self) -> bool {
        self.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_requires_exists_and_executable() {
        assert!(ArtifactDescriptor::new("bin", true, true, 1).valid());
        assert!(!ArtifactDescriptor::new("bin", true, false, 1).valid());
        assert!(!ArtifactDescriptor::new("bin", false, true, 0).valid());
    }

    #[test]
    fn missing_defaults_every_field() {
        let artifact = ArtifactDescriptor::missing("/nonexistent/path");
        assert_eq!(
            serde_json::to_value(&artifact).expect("encode"),
            json!({
                "exists": false,
                "executable": false,
                "size_bytes": 0,
                "path": "/nonexistent/path",
                "valid": false,
            })
        );
    }

    #[test]
    fn deserialize_recomputes_valid() {
        let artifact: ArtifactDescriptor = serde_json::from_value(json!({
            "exists": false,
            "executable": true,
            "size_bytes": 0,
            "path": "target/release/app",
            "valid": true,
        }))
        .expect("decode");
        assert!(!artifact.valid());
    }
}
