use super::error::ParseError;
use super::lines::{LineReader, columns, parse_float, parse_int};
use super::traits::InputFile;
use crate::core::models::atom::Atom;
use crate::core::models::coordinates::Coordinates;
use serde::Deserialize;
use std::io::BufRead;
use std::path::Path;

const XYZ_ATOM_COLUMNS: usize = 4;
const TINKER_ATOM_COLUMNS: usize = 5;

/// Layout of the per-species coordinate files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateFormat {
    /// Count line, comment line, then `symbol x y z` rows.
    #[default]
    Xyz,
    /// Tinker XYZ: count line, then `index symbol x y z type neighbours...` rows.
    Tinker,
}

impl CoordinateFormat {
    /// Reads a species coordinate file in this layout.
    pub fn read_from_path<P: AsRef<Path>>(&self, path: P) -> Result<CoordinateTable, ParseError> {
        match self {
            Self::Xyz => XyzFile::read_from_path(path, &()),
            Self::Tinker => TinkerXyzFile::read_from_path(path, &()),
        }
    }
}

/// Atoms read from a coordinate file together with the count its header declares.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTable {
    pub declared: usize,
    pub atoms: Vec<Atom>,
}

impl CoordinateTable {
    /// `true` when the header count disagrees with the number of atom rows.
    pub fn is_inconsistent(&self) -> bool {
        self.declared != self.atoms.len()
    }

    pub fn into_atoms(self) -> Vec<Atom> {
        self.atoms
    }
}

/// Plain XYZ coordinates. Lines with fewer than four columns are skipped.
pub struct XyzFile;

impl InputFile for XyzFile {
    type Output = CoordinateTable;
    type Options = ();

    fn read_from(reader: &mut impl BufRead, _: &()) -> Result<CoordinateTable, ParseError> {
        let mut lines = LineReader::new(reader);
        let header = lines.expect_line("XYZ atom count")?;
        let declared = parse_int(header.trim(), lines.line())?;
        lines.skip(1)?;

        let mut atoms = Vec::with_capacity(declared);
        while let Some(line) = lines.next_line()? {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < XYZ_ATOM_COLUMNS {
                continue;
            }
            atoms.push(atom_from(&tokens[..XYZ_ATOM_COLUMNS], lines.line())?);
        }
        Ok(CoordinateTable { declared, atoms })
    }
}

/// Tinker XYZ coordinates. The count is the first token of the first line; lines with
/// fewer than five columns (such as a periodic box line) are skipped.
pub struct TinkerXyzFile;

impl InputFile for TinkerXyzFile {
    type Output = CoordinateTable;
    type Options = ();

    fn read_from(reader: &mut impl BufRead, _: &()) -> Result<CoordinateTable, ParseError> {
        let mut lines = LineReader::new(reader);
        let header = lines.expect_line("Tinker atom count")?;
        let tokens = columns(&header, lines.line(), 1)?;
        let declared = parse_int(tokens[0], lines.line())?;

        let mut atoms = Vec::with_capacity(declared);
        while let Some(line) = lines.next_line()? {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < TINKER_ATOM_COLUMNS {
                continue;
            }
            atoms.push(atom_from(&tokens[1..TINKER_ATOM_COLUMNS], lines.line())?);
        }
        Ok(CoordinateTable { declared, atoms })
    }
}

/// Parses a `symbol x y z` slice. Shared with the packed coordinate stream reader.
pub(crate) fn atom_from(tokens: &[&str], line_num: usize) -> Result<Atom, ParseError> {
    Ok(Atom::new(tokens[0], coordinates_from(&tokens[1..4], line_num)?))
}

pub(crate) fn coordinates_from(tokens: &[&str], line_num: usize) -> Result<Coordinates, ParseError> {
    Ok(Coordinates::new(
        parse_float(tokens[0], line_num)?,
        parse_float(tokens[1], line_num)?,
        parse_float(tokens[2], line_num)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_plain_xyz() {
        let input = "3\nwater\nO 0.0 0.0 0.0\nH 0.9572 0.0 0.0\nH -0.24 0.927 0.0\n";
        let table = XyzFile::read_from(&mut Cursor::new(input), &()).unwrap();

        assert_eq!(table.declared, 3);
        assert!(!table.is_inconsistent());
        let atoms = table.into_atoms();
        assert_eq!(atoms[1].symbol, "H");
        assert_eq!(atoms[1].coordinates, Coordinates::new(0.9572, 0.0, 0.0));
        assert_eq!(atoms[2].label, "H");
    }

    #[test]
    fn short_lines_are_skipped_and_mismatch_is_reported() {
        let input = "3\n\nC 0 0 0\n\nC 1.5 0 0\n";
        let table = XyzFile::read_from(&mut Cursor::new(input), &()).unwrap();
        assert_eq!(table.atoms.len(), 2);
        assert!(table.is_inconsistent());
    }

    #[test]
    fn invalid_coordinate_reports_line() {
        let input = "1\ncomment\nC 0.0 zero 0.0\n";
        let result = XyzFile::read_from(&mut Cursor::new(input), &());
        assert!(matches!(result, Err(ParseError::Parse { line: 3, .. })));
    }

    #[test]
    fn missing_header_is_unexpected_eof() {
        let result = XyzFile::read_from(&mut Cursor::new(""), &());
        assert!(matches!(result, Err(ParseError::UnexpectedEof { .. })));
    }

    #[test]
    fn reads_tinker_xyz_and_ignores_connectivity_columns() {
        let input = "\
     3  TIP3P water
     1  OW     0.000000    0.000000    0.000000    63     2     3
     2  HW     0.957200    0.000000    0.000000    64     1
     3  HW    -0.239987    0.926627    0.000000    64     1
";
        let table = TinkerXyzFile::read_from(&mut Cursor::new(input), &()).unwrap();

        assert_eq!(table.declared, 3);
        let symbols: Vec<&str> = table.atoms.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["OW", "HW", "HW"]);
        assert_eq!(
            table.atoms[2].coordinates,
            Coordinates::new(-0.239987, 0.926627, 0.0)
        );
    }

    #[test]
    fn coordinate_format_dispatches_on_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("li.xyz");
        std::fs::write(&path, "1\n\nLi 1 2 3\n").unwrap();

        let table = CoordinateFormat::Xyz.read_from_path(&path).unwrap();
        assert_eq!(table.atoms[0].coordinates, Coordinates::new(1.0, 2.0, 3.0));
        assert_eq!(CoordinateFormat::default(), CoordinateFormat::Xyz);
    }
}
