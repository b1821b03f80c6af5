//! Canonical JSON utilities.
//!
//! - Objects: keys sorted lexicographically (UTF-8 codepoint order)
//! - Arrays: order preserved (caller is responsible for stable ordering)
//! - Output: compact, no trailing newline
//! - File writes go through a temp file + rename so a crashed run cannot
//!   leave a half-written artifact behind

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Convert a `Value` to canonical JSON bytes (compact, sorted keys).
pub fn to_canonical_json_bytes(v: &Value) -> Vec<u8> {
    let mut out = Vec::with_capacity(1024);
    write_canonical_value(v, &mut out);
    out
}

/// Write canonical JSON to `path` atomically, creating parent directories.
pub fn write_canonical_file(path: &Path, v: &Value) -> io::Result<()> {
    let bytes = to_canonical_json_bytes(v);

    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    fs::create_dir_all(parent)?;

    let tmp = tmp_sibling(path);
    let mut tf = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
    tf.write_all(&bytes)?;
    tf.sync_all()?;
    drop(tf);

    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            // Cross-device fallback: write the target directly.
            let res = fs::write(path, &bytes);
            let _ = fs::remove_file(&tmp);
            res
        }
    }
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".into());
    name.push_str(".tmp");
    let mut tmp = path.to_path_buf();
    tmp.set_file_name(name);
    tmp
}

fn write_canonical_value(v: &Value, out: &mut Vec<u8>) {
    match v {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => {
            // serde_json produces a correctly escaped JSON string literal.
            let quoted = serde_json::to_string(s).expect("string serialization cannot fail");
            out.extend_from_slice(quoted.as_bytes());
        }
        Value::Array(arr) => {
            out.push(b'[');
            for (i, elem) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical_value(elem, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            out.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                let quoted =
                    serde_json::to_string(key).expect("string serialization cannot fail");
                out.extend_from_slice(quoted.as_bytes());
                out.push(b':');
                write_canonical_value(&map[key.as_str()], out);
            }
            out.push(b'}');
        }
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn keys_are_sorted_and_output_is_compact() {
        let v = json!({"b": 2, "a": {"z": [3, 1], "y": null}});
        let bytes = to_canonical_json_bytes(&v);
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"a":{"y":null,"z":[3,1]},"b":2}"#
        );
    }

    #[test]
    fn canonical_bytes_round_trip() {
        let v = json!({"name": "தீം", "points": [15, 10, 5], "ok": true});
        let bytes = to_canonical_json_bytes(&v);
        let back: Value = serde_json::from_slice(&bytes).unwrap();
        assert_json_eq!(back, v);
    }

    #[test]
    fn atomic_write_lands_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("rankings.json");
        write_canonical_file(&path, &json!({"rows": []})).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), br#"{"rows":[]}"#);
    }
}
