//! Readers for the whitespace-separated joints and beams files.
//!
//! Both files start with a header line that is ignored. Every further
//! non-blank line describes one record:
//!
//! - joints: `id x y fx fy support_flag`, the flag being `0` (free) or `1` (pinned);
//! - beams: `id joint_a joint_b`.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::errors::InputError;
use crate::geometry::{force, point};
use crate::truss::{BeamId, JointId, Support, Truss, TrussBuilder};

/// Name used in parse errors for in-memory joints text.
const JOINTS: &str = "joints";
/// Name used in parse errors for in-memory beams text.
const BEAMS: &str = "beams";

/// Read both files and build the truss they describe.
///
/// # Errors
///
/// Returns [`InputError`] when a file cannot be read, a row is malformed or the
/// rows do not form a valid truss.
pub fn load_truss(
    joints_path: impl AsRef<Path>,
    beams_path: impl AsRef<Path>,
) -> Result<Truss, InputError> {
    let joints_path = joints_path.as_ref();
    let beams_path = beams_path.as_ref();
    let joints = read(joints_path)?;
    let beams = read(beams_path)?;
    let mut builder = TrussBuilder::new();
    add_joints(
        &mut builder,
        &joints,
        &joints_path.display().to_string(),
    )?;
    add_beams(&mut builder, &beams, &beams_path.display().to_string())?;
    log::debug!(
        "loaded {} and {}",
        joints_path.display(),
        beams_path.display()
    );
    Ok(builder.build()?)
}

/// Build a truss from the text of a joints file and a beams file.
///
/// # Errors
///
/// Returns [`InputError::Parse`] for malformed rows and
/// [`InputError::Topology`] when the rows do not form a valid truss.
///
/// # Examples
/// ```
/// let joints = "id x y fx fy support\n1 0 0 0 0 1\n2 1 0 0 -3 0\n";
/// let beams = "id a b\n1 1 2\n";
/// let truss = trusseq::parse_truss(joints, beams)?;
/// assert_eq!(truss.beam_count(), 1);
/// # Ok::<(), trusseq::InputError>(())
/// ```
pub fn parse_truss(joints: &str, beams: &str) -> Result<Truss, InputError> {
    let mut builder = TrussBuilder::new();
    add_joints(&mut builder, joints, JOINTS)?;
    add_beams(&mut builder, beams, BEAMS)?;
    Ok(builder.build()?)
}

/// Read a whole file into memory.
fn read(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse joint rows into `builder`.
fn add_joints(builder: &mut TrussBuilder, text: &str, source_name: &str) -> Result<(), InputError> {
    for (line, fields) in rows(text) {
        let row = Row::new(source_name, line, &fields, 6)?;
        let id = JointId(row.id(0, "joint id")?);
        let position = point(row.field(1, "x")?, row.field(2, "y")?);
        let load = force(row.field(3, "fx")?, row.field(4, "fy")?);
        let support = row.support(5)?;
        builder.add_joint(id, position, load, support)?;
    }
    Ok(())
}

/// Parse beam rows into `builder`.
fn add_beams(builder: &mut TrussBuilder, text: &str, source_name: &str) -> Result<(), InputError> {
    for (line, fields) in rows(text) {
        let row = Row::new(source_name, line, &fields, 3)?;
        let id = BeamId(row.id(0, "beam id")?);
        let start = JointId(row.id(1, "joint_a")?);
        let end = JointId(row.id(2, "joint_b")?);
        builder.add_beam(id, start, end)?;
    }
    Ok(())
}

/// Split `text` into numbered, non-blank data rows, skipping the header line.
fn rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> + '_ {
    text.lines()
        .enumerate()
        .skip(1)
        .map(|(idx, line)| (idx + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, fields)| !fields.is_empty())
}

/// One data row with enough context to report errors.
struct Row<'a> {
    /// File name for error messages.
    source_name: &'a str,
    /// 1-based line number.
    line: usize,
    /// Whitespace-separated fields.
    fields: &'a [&'a str],
}

impl<'a> Row<'a> {
    /// Wrap `fields`, checking that there are exactly `expected` of them.
    fn new(
        source_name: &'a str,
        line: usize,
        fields: &'a [&'a str],
        expected: usize,
    ) -> Result<Self, InputError> {
        let row = Self {
            source_name,
            line,
            fields,
        };
        if fields.len() == expected {
            Ok(row)
        } else {
            Err(row.error(format!(
                "expected {expected} fields, found {}",
                fields.len()
            )))
        }
    }

    /// Parse field `idx`.
    fn field<T: FromStr>(&self, idx: usize, name: &str) -> Result<T, InputError> {
        let raw = self.fields[idx];
        raw.parse()
            .map_err(|_| self.error(format!("invalid {name} `{raw}`")))
    }

    /// Parse the id in field `idx`, accepting integral floats such as `3.0`.
    fn id(&self, idx: usize, name: &str) -> Result<u32, InputError> {
        let raw = self.fields[idx];
        if let Ok(id) = raw.parse() {
            return Ok(id);
        }
        match raw.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Ok(value) if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) => {
                Ok(value as u32)
            }
            _ => Err(self.error(format!("invalid {name} `{raw}`"))),
        }
    }

    /// Parse the support flag in field `idx`.
    fn support(&self, idx: usize) -> Result<Support, InputError> {
        let raw = self.fields[idx];
        match raw.parse::<f64>() {
            Ok(flag) if flag == 0.0 => Ok(Support::Free),
            Ok(flag) if flag == 1.0 => Ok(Support::Pinned),
            _ => Err(self.error(format!("support flag must be 0 or 1, found `{raw}`"))),
        }
    }

    /// Build a parse error located at this row.
    fn error(&self, message: String) -> InputError {
        InputError::Parse {
            source_name: self.source_name.to_owned(),
            line: self.line,
            message,
        }
    }
}
