//! Loader: read local JSON snapshot inputs (teams, participants,
//! programmes, results, optional scoring config), validate each against its
//! Draft 2020-12 schema, normalize, and return a typed `Snapshot` for the
//! pipeline. No network I/O.
//!
//! Duplicate primary keys are load failures; dangling cross-references are
//! warnings, because the engine downstream is specified to skip and report
//! them rather than abort.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use fest_core::config::validate_domains;
use fest_core::{
    ChestNumber, Participant, Programme, ProgrammeId, ResultDoc, ScoringConfig, Team, TeamCode,
};

use crate::hasher;
use crate::manifest::{self as man, InputExpectations};
use crate::schema::{self, SchemaKind};
use crate::IoError;

// ----------------------------- Public types -----------------------------

/// Explicit input paths (the non-manifest loading mode).
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    pub teams: PathBuf,
    pub participants: PathBuf,
    pub programmes: PathBuf,
    pub results: PathBuf,
    pub config: Option<PathBuf>,
}

/// Typed, normalized input snapshot. Team codes are canonical uppercase;
/// maps are keyed by primary key; results are sorted by id.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub teams: BTreeMap<TeamCode, Team>,
    pub participants: BTreeMap<ChestNumber, Participant>,
    pub programmes: BTreeMap<ProgrammeId, Programme>,
    pub results: Vec<ResultDoc>,
    pub config: ScoringConfig,
}

/// SHA-256 (lowercase hex) of each input's canonical JSON bytes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDigests {
    pub teams_sha256: String,
    pub participants_sha256: String,
    pub programmes_sha256: String,
    pub results_sha256: String,
    pub config_sha256: Option<String>,
}

/// Loaded snapshot plus digests and data-quality warnings.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub snapshot: Snapshot,
    pub digests: InputDigests,
    pub warnings: Vec<String>,
}

// ----------------------------- Orchestration -----------------------------

/// Load everything from a manifest file path and verify any digest
/// expectations it carries.
pub fn load_from_manifest(path: &Path) -> Result<LoadedSnapshot, IoError> {
    let man = man::load_manifest(path)?;
    let resolved = man::resolve_paths(path, &man)?;
    let loaded = load_from_paths(&SnapshotPaths {
        teams: resolved.teams_path,
        participants: resolved.participants_path,
        programmes: resolved.programmes_path,
        results: resolved.results_path,
        config: resolved.config_path,
    })?;
    if let Some(exp) = &resolved.expectations {
        verify_expectations(exp, &loaded.digests)?;
    }
    Ok(loaded)
}

/// Load everything from explicit file paths.
pub fn load_from_paths(paths: &SnapshotPaths) -> Result<LoadedSnapshot, IoError> {
    let (teams_value, teams_sha256) = read_document(&paths.teams, SchemaKind::Teams)?;
    let (participants_value, participants_sha256) =
        read_document(&paths.participants, SchemaKind::Participants)?;
    let (programmes_value, programmes_sha256) =
        read_document(&paths.programmes, SchemaKind::Programmes)?;
    let (results_value, results_sha256) = read_document(&paths.results, SchemaKind::Results)?;

    let teams = build_team_map(serde_json::from_value(teams_value)?)?;
    let participants = build_participant_map(serde_json::from_value(participants_value)?)?;
    let programmes = build_programme_map(serde_json::from_value(programmes_value)?)?;
    let results = normalize_results(serde_json::from_value(results_value)?)?;

    let (config, config_sha256) = match &paths.config {
        Some(p) => {
            let (value, digest) = read_document(p, SchemaKind::ScoringConfig)?;
            let config: ScoringConfig = serde_json::from_value(value)?;
            validate_domains(&config).map_err(|e| IoError::Config(e.to_string()))?;
            (config, Some(digest))
        }
        None => (ScoringConfig::default(), None),
    };

    let snapshot = Snapshot { teams, participants, programmes, results, config };
    let warnings = cross_ref_warnings(&snapshot);

    Ok(LoadedSnapshot {
        snapshot,
        digests: InputDigests {
            teams_sha256,
            participants_sha256,
            programmes_sha256,
            results_sha256,
            config_sha256,
        },
        warnings,
    })
}

// ----------------------------- Per-document steps -----------------------------

/// Read a file, parse it, schema-validate it, and digest its canonical
/// bytes. The digest covers the logical document, so formatting and key
/// order in the source file do not matter.
fn read_document(path: &Path, kind: SchemaKind) -> Result<(Value, String), IoError> {
    let bytes =
        fs::read(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let value: Value = serde_json::from_slice(&bytes)?;
    schema::validate(kind, &value)?;
    let digest = hasher::sha256_canonical_value(&value);
    Ok((value, digest))
}

fn build_team_map(list: Vec<Team>) -> Result<BTreeMap<TeamCode, Team>, IoError> {
    let mut out = BTreeMap::new();
    for mut team in list {
        team.code = team.code.canonicalized();
        let code = team.code.clone();
        if out.insert(code.clone(), team).is_some() {
            return Err(IoError::Invalid(format!("duplicate team code: {code}")));
        }
    }
    Ok(out)
}

fn build_participant_map(
    list: Vec<Participant>,
) -> Result<BTreeMap<ChestNumber, Participant>, IoError> {
    let mut out = BTreeMap::new();
    for mut participant in list {
        participant.team_code = participant.team_code.canonicalized();
        let chest = participant.chest_number.clone();
        if out.insert(chest.clone(), participant).is_some() {
            return Err(IoError::Invalid(format!("duplicate chest number: {chest}")));
        }
    }
    Ok(out)
}

fn build_programme_map(list: Vec<Programme>) -> Result<BTreeMap<ProgrammeId, Programme>, IoError> {
    let mut out = BTreeMap::new();
    for programme in list {
        let id = programme.id.clone();
        if out.insert(id.clone(), programme).is_some() {
            return Err(IoError::Invalid(format!("duplicate programme id: {id}")));
        }
    }
    Ok(out)
}

fn normalize_results(mut list: Vec<ResultDoc>) -> Result<Vec<ResultDoc>, IoError> {
    list.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
    for pair in list.windows(2) {
        if pair[0].id == pair[1].id {
            return Err(IoError::Invalid(format!("duplicate result id: {}", pair[0].id)));
        }
    }
    Ok(list)
}

/// Dangling references are reported, not fatal: the engine skips them with
/// diagnostics, and a partial snapshot is still worth aggregating.
fn cross_ref_warnings(snapshot: &Snapshot) -> Vec<String> {
    let mut warnings = Vec::new();

    for participant in snapshot.participants.values() {
        if !snapshot.teams.contains_key(&participant.team_code) {
            warnings.push(format!(
                "participant {} references unknown team {}",
                participant.chest_number, participant.team_code
            ));
        }
    }

    for result in &snapshot.results {
        if !snapshot.programmes.contains_key(&result.programme_id) {
            warnings.push(format!(
                "result {} references unknown programme {}",
                result.id, result.programme_id
            ));
        }
    }

    for range in &snapshot.config.decode.numeric_ranges {
        if !snapshot.teams.contains_key(&range.team_code.canonicalized()) {
            warnings.push(format!(
                "numeric range {}..={} references unknown team {}",
                range.lo, range.hi, range.team_code
            ));
        }
    }

    warnings
}

fn verify_expectations(exp: &InputExpectations, digests: &InputDigests) -> Result<(), IoError> {
    let mismatch = |field: &str, expected: &str, actual: &str| {
        IoError::Manifest(format!(
            "sha256 mismatch for {field}: expected {expected}, got {actual}"
        ))
    };
    if let Some(d) = &exp.teams {
        if d != &digests.teams_sha256 {
            return Err(mismatch("teams", d, &digests.teams_sha256));
        }
    }
    if let Some(d) = &exp.participants {
        if d != &digests.participants_sha256 {
            return Err(mismatch("participants", d, &digests.participants_sha256));
        }
    }
    if let Some(d) = &exp.programmes {
        if d != &digests.programmes_sha256 {
            return Err(mismatch("programmes", d, &digests.programmes_sha256));
        }
    }
    if let Some(d) = &exp.results {
        if d != &digests.results_sha256 {
            return Err(mismatch("results", d, &digests.results_sha256));
        }
    }
    if let (Some(d), Some(actual)) = (&exp.config, &digests.config_sha256) {
        if d != actual {
            return Err(mismatch("config", d, actual));
        }
    }
    Ok(())
}
