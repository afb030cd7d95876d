use super::conn::IndexRecord;
use super::error::ParseError;
use super::lines::{LineReader, columns, parse_float};
use super::traits::InputFile;
use crate::core::models::atom::AtomParameters;
use std::io::BufRead;

const PARAMETER_COLUMNS: usize = 3;
const THOLE_COLUMN: usize = 3;
const POLARIZABILITY_COLUMN: usize = 4;
const BONDS_MARKER: &str = "BONDS";
const END_MARKER: &str = "END";

/// How a species parameter file should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatOptions {
    /// Number of atom lines following the residue name.
    pub atom_count: usize,
    /// Whether an optional `BONDS ... END` block may follow the atom lines.
    pub read_bonds: bool,
}

/// Contents of a species parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct DatRecord {
    pub residue_name: String,
    /// One entry per atom, in coordinate-file order.
    pub parameters: Vec<AtomParameters>,
    /// Explicit bonds, when the file carries a `BONDS` block.
    pub bonds: Option<Vec<IndexRecord<2>>>,
}

/// Species parameter file: a residue name line, one `label charge mass [thole polarizability]`
/// line per atom and, in plain XYZ mode, an optional block of 1-based bond pairs.
pub struct DatFile;

impl InputFile for DatFile {
    type Output = DatRecord;
    type Options = DatOptions;

    fn read_from(reader: &mut impl BufRead, options: &DatOptions) -> Result<DatRecord, ParseError> {
        let mut lines = LineReader::new(reader);
        let residue_name = lines.expect_line("residue name")?.trim().to_string();

        let parameters = (0..options.atom_count)
            .map(|index| {
                let line = lines.expect_line(&format!("parameters of atom {}", index + 1))?;
                parse_parameters(&line, lines.line())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bonds = if options.read_bonds {
            read_bond_block(&mut lines)?
        } else {
            None
        };

        Ok(DatRecord {
            residue_name,
            parameters,
            bonds,
        })
    }
}

fn parse_parameters(line: &str, line_num: usize) -> Result<AtomParameters, ParseError> {
    let tokens = columns(line, line_num, PARAMETER_COLUMNS)?;
    let polarizability = tokens
        .get(POLARIZABILITY_COLUMN)
        .map(|value| parse_float(value, line_num))
        .transpose()?;

    Ok(AtomParameters {
        label: tokens[0].to_string(),
        charge: parse_float(tokens[1], line_num)?,
        mass: parse_float(tokens[2], line_num)?,
        thole: tokens.get(THOLE_COLUMN).and_then(|value| value.parse().ok()),
        polarizability,
    })
}

fn read_bond_block<R: BufRead>(
    lines: &mut LineReader<'_, R>,
) -> Result<Option<Vec<IndexRecord<2>>>, ParseError> {
    match lines.next_line()? {
        Some(line) if line.contains(BONDS_MARKER) => {}
        _ => return Ok(None),
    }

    let mut bonds = Vec::new();
    loop {
        let line = lines.expect_line("bond list terminated by END")?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.contains(&END_MARKER) {
            break;
        }
        if tokens.is_empty() {
            continue;
        }
        let tokens = columns(&line, lines.line(), 2)?;
        bonds.push(IndexRecord::from_tokens(&tokens, lines.line()));
    }
    Ok(Some(bonds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(input: &str, atom_count: usize, read_bonds: bool) -> Result<DatRecord, ParseError> {
        DatFile::read_from(
            &mut Cursor::new(input),
            &DatOptions {
                atom_count,
                read_bonds,
            },
        )
    }

    #[test]
    fn reads_residue_and_atom_parameters() {
        let input = "SWM4\nOW -1.71636 15.5994 1.3 0.97825258\nHW 0.55733 1.008\nHW 0.55733 1.008\n";
        let record = read(input, 3, true).unwrap();

        assert_eq!(record.residue_name, "SWM4");
        assert_eq!(record.parameters.len(), 3);
        assert_eq!(
            record.parameters[0],
            AtomParameters {
                label: "OW".to_string(),
                charge: -1.71636,
                mass: 15.5994,
                thole: Some(1.3),
                polarizability: Some(0.97825258),
            }
        );
        assert_eq!(record.parameters[1].polarizability, None);
        assert_eq!(record.bonds, None);
    }

    #[test]
    fn residue_name_is_trimmed_of_surrounding_whitespace() {
        let record = read("  SWM4 \t\r\nLI 1.0 6.94\n", 1, false).unwrap();
        assert_eq!(record.residue_name, "SWM4");
    }

    #[test]
    fn reads_bond_block_until_end() {
        let input = "MOL\nC 0 12\nO 0 16\nH 0 1\nBONDS\n1 2\n\n2 3\nEND\n";
        let record = read(input, 3, true).unwrap();

        let bonds = record.bonds.unwrap();
        assert_eq!(bonds.len(), 2);
        assert_eq!(bonds[0].indices, ["1".to_string(), "2".to_string()]);
        assert_eq!(bonds[1].line, 8);
    }

    #[test]
    fn bond_block_is_ignored_when_not_requested() {
        let input = "MOL\nC 0 12\nBONDS\n1 2\nEND\n";
        assert_eq!(read(input, 1, false).unwrap().bonds, None);
    }

    #[test]
    fn unterminated_bond_block_is_an_error() {
        let input = "MOL\nC 0 12\nC 0 12\nBONDS\n1 2\n";
        assert!(matches!(
            read(input, 2, true),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn missing_atom_line_is_an_error() {
        let input = "MOL\nC 0 12\n";
        match read(input, 2, false) {
            Err(ParseError::UnexpectedEof { expected }) => {
                assert_eq!(expected, "parameters of atom 2")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_charge_reports_line() {
        let input = "MOL\nC zero 12\n";
        assert!(matches!(
            read(input, 1, false),
            Err(ParseError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn non_numeric_thole_column_is_tolerated() {
        let record = read("MOL\nC 0 12 n/a\n", 1, false).unwrap();
        assert_eq!(record.parameters[0].thole, None);
        assert_eq!(record.parameters[0].polarizability, None);
    }
}
