//! Snapshot manifest: names the input files and optional digest
//! expectations.
//!
//! Offline-only: any path carrying a scheme (`http:`, `file://`, ...) is
//! rejected before the filesystem is touched. Relative paths resolve
//! against the manifest's own directory. Digest expectations, when present,
//! are lowercase 64-hex and are verified by the loader over canonical
//! bytes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hasher::is_lower_hex_64;
use crate::schema::{self, SchemaKind};
use crate::IoError;

/// External manifest accepted by the loader. `id` is non-normative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub id: Option<String>,

    pub teams_path: String,
    pub participants_path: String,
    pub programmes_path: String,
    pub results_path: String,

    /// Optional scoring configuration; defaults apply when absent.
    #[serde(default)]
    pub config_path: Option<String>,

    /// Optional sha256 expectations over canonical input bytes.
    #[serde(default)]
    pub inputs_sha256: Option<InputExpectations>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputExpectations {
    #[serde(default)]
    pub teams: Option<String>,
    #[serde(default)]
    pub participants: Option<String>,
    #[serde(default)]
    pub programmes: Option<String>,
    #[serde(default)]
    pub results: Option<String>,
    #[serde(default)]
    pub config: Option<String>,
}

/// Paths resolved against the manifest's directory, existence-checked.
#[derive(Debug, Clone)]
pub struct ResolvedManifest {
    pub teams_path: PathBuf,
    pub participants_path: PathBuf,
    pub programmes_path: PathBuf,
    pub results_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub expectations: Option<InputExpectations>,
}

/// Read, schema-validate, and shape-check a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest, IoError> {
    let bytes = fs::read(path)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let value: Value = serde_json::from_slice(&bytes)?;
    schema::validate(SchemaKind::Manifest, &value)?;
    let man: Manifest = serde_json::from_value(value)?;
    validate_manifest(&man)?;
    Ok(man)
}

/// Validate shape and offline path policy. No I/O here.
pub fn validate_manifest(man: &Manifest) -> Result<(), IoError> {
    offline_check("teamsPath", &man.teams_path)?;
    offline_check("participantsPath", &man.participants_path)?;
    offline_check("programmesPath", &man.programmes_path)?;
    offline_check("resultsPath", &man.results_path)?;
    if let Some(p) = &man.config_path {
        offline_check("configPath", p)?;
    }

    if let Some(exp) = &man.inputs_sha256 {
        for (field, digest) in [
            ("teams", &exp.teams),
            ("participants", &exp.participants),
            ("programmes", &exp.programmes),
            ("results", &exp.results),
            ("config", &exp.config),
        ] {
            if let Some(d) = digest {
                if !is_lower_hex_64(d) {
                    return Err(IoError::Manifest(format!(
                        "invalid sha256 for {field}: {d}"
                    )));
                }
            }
        }
        if exp.config.is_some() && man.config_path.is_none() {
            return Err(IoError::Manifest(
                "digest supplied for missing input: config".into(),
            ));
        }
    }

    Ok(())
}

/// Resolve paths against the manifest's directory and check each input is a
/// file.
pub fn resolve_paths(manifest_path: &Path, man: &Manifest) -> Result<ResolvedManifest, IoError> {
    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let resolve = |field: &str, rel: &str| -> Result<PathBuf, IoError> {
        let p = join_under(base, rel);
        let meta = fs::metadata(&p)
            .map_err(|e| IoError::Manifest(format!("cannot access {field}: {e}")))?;
        if !meta.is_file() {
            return Err(IoError::Manifest(format!(
                "path is not a file for {field}: {}",
                p.display()
            )));
        }
        Ok(p)
    };

    Ok(ResolvedManifest {
        teams_path: resolve("teamsPath", &man.teams_path)?,
        participants_path: resolve("participantsPath", &man.participants_path)?,
        programmes_path: resolve("programmesPath", &man.programmes_path)?,
        results_path: resolve("resultsPath", &man.results_path)?,
        config_path: match &man.config_path {
            Some(rel) => Some(resolve("configPath", rel)?),
            None => None,
        },
        expectations: man.inputs_sha256.clone(),
    })
}

/* ---------- helpers (pure) ---------- */

#[inline]
fn offline_check(field: &str, raw: &str) -> Result<(), IoError> {
    if raw.trim().is_empty() {
        return Err(IoError::Manifest(format!("field must not be empty: {field}")));
    }
    if raw.contains("://") || raw.starts_with("http:") || raw.starts_with("https:") {
        return Err(IoError::Manifest(format!(
            "path must be offline (no scheme) for {field}: {raw}"
        )));
    }
    Ok(())
}

#[inline]
fn join_under(base: &Path, rel: &str) -> PathBuf {
    let p = Path::new(rel);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Manifest {
        Manifest {
            id: None,
            teams_path: "teams.json".into(),
            participants_path: "participants.json".into(),
            programmes_path: "programmes.json".into(),
            results_path: "results.json".into(),
            config_path: None,
            inputs_sha256: None,
        }
    }

    #[test]
    fn rejects_url_paths() {
        let mut man = manifest();
        man.results_path = "https://example.org/results.json".into();
        assert!(matches!(validate_manifest(&man), Err(IoError::Manifest(_))));
    }

    #[test]
    fn rejects_bad_digest_shape() {
        let mut man = manifest();
        man.inputs_sha256 = Some(InputExpectations {
            teams: Some("DEADBEEF".into()),
            ..InputExpectations::default()
        });
        assert!(matches!(validate_manifest(&man), Err(IoError::Manifest(_))));
    }

    #[test]
    fn rejects_digest_for_absent_config() {
        let mut man = manifest();
        man.inputs_sha256 = Some(InputExpectations {
            config: Some("a".repeat(64)),
            ..InputExpectations::default()
        });
        assert!(matches!(validate_manifest(&man), Err(IoError::Manifest(_))));
    }

    #[test]
    fn resolves_relative_paths_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["teams.json", "participants.json", "programmes.json", "results.json"] {
            fs::write(dir.path().join(name), b"[]").unwrap();
        }
        let man_path = dir.path().join("manifest.json");
        let resolved = resolve_paths(&man_path, &manifest()).unwrap();
        assert_eq!(resolved.teams_path, dir.path().join("teams.json"));
        assert!(resolved.config_path.is_none());
    }
}
