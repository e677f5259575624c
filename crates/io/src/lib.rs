#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use splitqp_core::math::Scalar;
use splitqp_core::problem::ProblemData;
use splitqp_core::settings::Settings;
use splitqp_core::solution::Solution;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// On-disk problem description: the QP data plus optional solver settings
/// baked into the same file.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonProblem {
    pub problem: ProblemData<Scalar>,
    #[serde(default)]
    pub settings: Option<Settings<Scalar>>,
}

pub fn read_problem<P: AsRef<Path>>(path: P) -> Result<JsonProblem> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .with_context(|| format!("failed to read {:?}", path))?;
    let parsed: JsonProblem =
        serde_json::from_str(&contents).context("failed to parse JSON problem")?;
    parsed
        .problem
        .validate()
        .context("problem failed validation")?;
    Ok(parsed)
}

pub fn write_problem<P: AsRef<Path>>(path: P, problem: &JsonProblem) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("failed to create {:?}", path.as_ref()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, problem).context("failed to serialise problem")?;
    Ok(())
}

pub fn write_solution<P: AsRef<Path>>(path: P, solution: &Solution<Scalar>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent directory {:?}", parent))?;
        }
    }
    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, solution).context("failed to serialise solution")?;
    writer
        .flush()
        .with_context(|| format!("failed to write solution into {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip() {
        let input = r#"{
            "problem": {
                "p": {"nrows":1,"ncols":1,"indptr":[0,1],"indices":[0],"data":[2.0]},
                "q": [1.0],
                "a": {"nrows":1,"ncols":1,"indptr":[0,1],"indices":[0],"data":[1.0]},
                "lx": [0.0], "ux": [1.0],
                "la": [0.0], "ua": [1.0]
            }
        }"#;
        let parsed: JsonProblem = serde_json::from_str(input).unwrap();
        assert!(parsed.settings.is_none());
        assert!(parsed.problem.validate().is_ok());
        let mut buffer = Vec::new();
        serde_json::to_writer(&mut buffer, &parsed).unwrap();
        assert!(!buffer.is_empty());
    }
}
