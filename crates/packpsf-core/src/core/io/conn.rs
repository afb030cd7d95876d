use super::error::ParseError;
use super::lines::{LineReader, columns};
use super::traits::InputFile;
use std::io::BufRead;

const BOND_SECTION: &str = "Bond Stretching Parameters";
const ANGLE_SECTION: &str = "Angle Bending Parameters";
const DIHEDRAL_SECTION: &str = "Torsional Angle Parameters";
/// Column headers printed by Tinker below every section title.
const SECTION_HEADER_LINES: usize = 3;

/// A row of raw 1-based atom indices, kept as text until the molecule's index
/// translation is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord<const N: usize> {
    /// Line the row was read from, for error reporting.
    pub line: usize,
    pub indices: [String; N],
}

impl<const N: usize> IndexRecord<N> {
    pub(crate) fn from_tokens(tokens: &[&str], line: usize) -> Self {
        Self {
            line,
            indices: std::array::from_fn(|k| tokens[k].to_string()),
        }
    }
}

/// Connectivity listed by Tinker's `analyze` in its parameter report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnRecord {
    pub bonds: Vec<IndexRecord<2>>,
    /// Present only for molecules with more than two atoms.
    pub angles: Option<Vec<IndexRecord<3>>>,
    /// Present only for molecules with more than three atoms.
    pub dihedrals: Option<Vec<IndexRecord<4>>>,
}

/// Tinker `analyze` output. Only the bond, angle and torsion tables are read; which
/// of them are expected depends on the atom count of the species.
pub struct ConnFile;

impl InputFile for ConnFile {
    type Output = ConnRecord;
    type Options = usize;

    fn read_from(reader: &mut impl BufRead, &atom_count: &usize) -> Result<ConnRecord, ParseError> {
        let mut lines = LineReader::new(reader);

        let bonds = read_section(&mut lines, BOND_SECTION)?;
        let angles = if atom_count > 2 {
            Some(read_section(&mut lines, ANGLE_SECTION)?)
        } else {
            None
        };
        let dihedrals = if atom_count > 3 {
            Some(read_section(&mut lines, DIHEDRAL_SECTION)?)
        } else {
            None
        };

        Ok(ConnRecord {
            bonds,
            angles,
            dihedrals,
        })
    }
}

/// Advances past `title` and its column headers, then reads rows up to the next
/// blank line. The first column of every row is Tinker's own counter and is dropped.
fn read_section<R: BufRead, const N: usize>(
    lines: &mut LineReader<'_, R>,
    title: &str,
) -> Result<Vec<IndexRecord<N>>, ParseError> {
    loop {
        match lines.next_line()? {
            Some(line) if line.contains(title) => break,
            Some(_) => {}
            None => return Err(ParseError::MissingSection(title.to_string())),
        }
    }
    lines.skip(SECTION_HEADER_LINES)?;

    let mut records = Vec::new();
    while let Some(line) = lines.next_line()? {
        if line.trim().is_empty() {
            break;
        }
        let tokens = columns(&line, lines.line(), N + 1)?;
        records.push(IndexRecord::from_tokens(&tokens[1..], lines.line()));
    }
    Ok(records)
}
