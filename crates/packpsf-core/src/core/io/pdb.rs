use super::error::WriteError;
use super::lines::{LineReader, columns, parse_int};
use super::traits::SystemWriter;
use super::xyz::coordinates_from;
use crate::core::models::atom::Atom;
use crate::core::models::coordinates::Coordinates;
use crate::core::models::system::System;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};

const CRYST1_LINE: &str = "CRYST1    0.000    0.000    0.000  90.00  90.00  90.00 P 1           1";
const OCCUPANCY: f64 = 0.0;
const TEMPERATURE_FACTOR: f64 = 0.0;
const STREAM_ATOM_COLUMNS: usize = 4;

/// PDB coordinates for a packed system.
///
/// Positions come from the packed coordinate stream recorded in the [`System`]; the
/// topology supplies labels, residues and the segment. Drude particles sit on their
/// parent's position.
pub struct PdbFile;

impl SystemWriter for PdbFile {
    type Error = WriteError;

    fn write_to(system: &System, writer: &mut impl Write) -> Result<(), Self::Error> {
        let path = system
            .coordinates_path()
            .ok_or(WriteError::MissingCoordinates)?;
        let mut stream = BufReader::new(File::open(path)?);
        Self::write_with_coordinates(system, &mut stream, writer)
    }
}

impl PdbFile {
    /// Writes the system using positions read from an XYZ coordinate stream.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::AtomCountMismatch`] when the stream's declared count differs
    /// from the number of topology atoms, and [`WriteError::SymbolMismatch`] when a
    /// stream line names a different element than the topology atom at that position.
    pub fn write_with_coordinates(
        system: &System,
        stream: &mut impl BufRead,
        writer: &mut impl Write,
    ) -> Result<(), WriteError> {
        let mut lines = LineReader::new(stream);
        let header = lines.expect_line("coordinate stream atom count")?;
        let declared: usize = parse_int(header.trim(), lines.line())?;
        let expected = system.atoms_number();
        if declared != expected {
            return Err(WriteError::AtomCountMismatch { declared, expected });
        }
        lines.skip(1)?;

        writeln!(writer, "{CRYST1_LINE}")?;

        let mut serial = 1;
        for instance in system.instances() {
            for atom in instance.molecule.atoms() {
                let position = read_position(&mut lines, atom)?;
                for slot in std::iter::once(atom).chain(atom.drude()) {
                    writeln!(
                        writer,
                        "ATOM {:6}  {:3} {:3} {:5}     {:7.3} {:7.3} {:7.3} {:5.2} {:5.2}      {:4} {:3}",
                        serial,
                        slot.label,
                        instance.molecule.residue_name(),
                        instance.residue_id,
                        position.x(),
                        position.y(),
                        position.z(),
                        OCCUPANCY,
                        TEMPERATURE_FACTOR,
                        system.segment_id(),
                        serial
                    )?;
                    serial += 1;
                }
            }
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}

fn read_position<R: BufRead>(
    lines: &mut LineReader<'_, R>,
    atom: &Atom,
) -> Result<Coordinates, WriteError> {
    let line = lines.expect_line("coordinate stream atom line")?;
    let line_num = lines.line();
    let tokens = columns(&line, line_num, STREAM_ATOM_COLUMNS)?;
    if tokens[0] != atom.symbol {
        return Err(WriteError::SymbolMismatch {
            line: line_num,
            found: tokens[0].to_string(),
            expected: atom.symbol.clone(),
        });
    }
    Ok(coordinates_from(&tokens[1..STREAM_ATOM_COLUMNS], line_num)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::error::ParseError;
    use crate::core::models::builder::MoleculeBuilder;
    use crate::core::models::ids::AtomIndex;
    use crate::core::topology::drude::DrudeParams;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn water_system(drude: bool) -> System {
        let mut atoms = vec![
            Atom::new("O", Coordinates::new(0.0, 0.0, 0.0)),
            Atom::new("H", Coordinates::new(0.9572, 0.0, 0.0)),
            Atom::new("H", Coordinates::new(-0.24, 0.927, 0.0)),
        ];
        atoms[0].label = "OW".to_string();
        atoms[1].label = "HW1".to_string();
        atoms[2].label = "HW2".to_string();
        let mut builder = MoleculeBuilder::new(atoms);
        builder.residue_name("TIP");
        if drude {
            builder
                .add_drude_atom(AtomIndex(0), 1.0, &DrudeParams::default())
                .unwrap();
        }
        let mut system = System::new();
        system.add_molecule(builder.into_connectivity().build(), 2);
        system
    }

    const STREAM: &str = "\
6
packed by packmol
O 10.000 10.000 10.000
H 10.957 10.000 10.000
H 9.760 10.927 10.000
O -1.5 2.25 3.125
H -0.543 2.25 3.125
H -1.74 3.177 3.125
";

    fn render(system: &System, stream: &str) -> Result<String, WriteError> {
        let mut out = Vec::new();
        PdbFile::write_with_coordinates(system, &mut Cursor::new(stream), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn writes_atoms_from_stream_positions() {
        let text = render(&water_system(false), STREAM).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CRYST1_LINE);
        assert_eq!(
            lines[1],
            "ATOM      1  OW  TIP     1      10.000  10.000  10.000  0.00  0.00      IL     1"
        );
        assert_eq!(
            lines[4],
            "ATOM      4  OW  TIP     2      -1.500   2.250   3.125  0.00  0.00      IL     4"
        );
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[7], "END");
    }

    #[test]
    fn drude_particles_reuse_parent_positions() {
        let text = render(&water_system(true), STREAM).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(
            lines[2],
            "ATOM      2  DOW TIP     1      10.000  10.000  10.000  0.00  0.00      IL     2"
        );
        assert!(lines[3].starts_with("ATOM      3  HW1 TIP     1      10.957"));
    }

    #[test]
    fn declared_count_must_match_topology() {
        let stream = STREAM.replacen('6', "7", 1);
        match render(&water_system(false), &stream) {
            Err(WriteError::AtomCountMismatch { declared, expected }) => {
                assert_eq!((declared, expected), (7, 6));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn symbol_mismatch_names_the_stream_line() {
        let stream = STREAM.replace("H 9.760", "N 9.760");
        match render(&water_system(false), &stream) {
            Err(WriteError::SymbolMismatch {
                line,
                found,
                expected,
            }) => {
                assert_eq!(line, 5);
                assert_eq!(found, "N");
                assert_eq!(expected, "H");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let stream: String = STREAM.lines().take(5).map(|l| format!("{l}\n")).collect();
        assert!(matches!(
            render(&water_system(false), &stream),
            Err(WriteError::Coordinates(ParseError::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn failed_write_leaves_no_file_behind() {
        let dir = tempdir().unwrap();
        let stream_path = dir.path().join("box.xyz");
        fs::write(&stream_path, STREAM.replace("H 9.760", "N 9.760")).unwrap();
        let output = dir.path().join("box.pdb");

        let system = water_system(false).with_coordinates_path(&stream_path);
        assert!(PdbFile::write_to_path(&system, &output).is_err());
        assert!(!output.exists());

        fs::write(&stream_path, STREAM).unwrap();
        PdbFile::write_to_path(&system, &output).unwrap();
        assert!(fs::read_to_string(&output).unwrap().ends_with("END\n"));
    }

    #[test]
    fn missing_stream_path_is_reported() {
        let mut out = Vec::new();
        assert!(matches!(
            PdbFile::write_to(&water_system(false), &mut out),
            Err(WriteError::MissingCoordinates)
        ));
    }
}
