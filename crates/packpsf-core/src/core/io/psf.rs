use super::traits::SystemWriter;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use crate::core::models::system::System;
use std::io::{self, Write};

const PSF_HEADER: &str = "PSF CMAP\n\n       1 !NTITLE\n REMARKS written by packpsf\n\n";

const BONDS_PER_LINE: usize = 4;
const ANGLES_PER_LINE: usize = 3;
const DIHEDRALS_PER_LINE: usize = 2;

/// Sections this writer never populates, in the order they close the file.
const EMPTY_TRAILER_SECTIONS: [&str; 5] = [
    "!NIMPHI: impropers",
    "!NDON: donors",
    "!NACC: acceptors",
    "!NNB",
    "!NGRP",
];

/// CHARMM/NAMD protein structure file in the `PSF CMAP` flavour.
///
/// Every atom line carries the polarizability and Thole columns used by Drude force
/// fields, so the same layout serves polarizable and non-polarizable systems.
pub struct PsfFile;

impl SystemWriter for PsfFile {
    type Error = io::Error;

    fn write_to(system: &System, writer: &mut impl Write) -> Result<(), Self::Error> {
        writer.write_all(PSF_HEADER.as_bytes())?;
        write_atoms(system, writer)?;

        write_section(
            writer,
            system,
            "!NBOND: bonds",
            system.bonds_number(),
            BONDS_PER_LINE,
            |m| m.psf_bonds().map(|b| b.atoms).collect(),
        )?;
        write_section(
            writer,
            system,
            "!NTHETA: angles",
            system.angles_number(),
            ANGLES_PER_LINE,
            |m| m.angles().iter().map(|a| a.atoms).collect(),
        )?;
        write_section(
            writer,
            system,
            "!NPHI: dihedrals",
            system.dihedrals_number(),
            DIHEDRALS_PER_LINE,
            |m| m.dihedrals().iter().map(|d| d.atoms).collect(),
        )?;

        for title in EMPTY_TRAILER_SECTIONS {
            writeln!(writer, "{:>8} {}", 0, title)?;
        }
        writeln!(writer, "{:>8}  {:>8} !NUMLP NUMLPH", 0, 0)?;
        writeln!(writer, "{:>8} !NCRTERM: cross-terms", 0)?;
        writeln!(writer, "{:>8} !NUMANISO", 0)?;
        writeln!(writer, "END")?;
        Ok(())
    }
}

fn write_atoms(system: &System, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "{:>8} !NATOM", system.atoms_number_with_drude())?;

    let mut serial = 1;
    for instance in system.instances() {
        for atom in instance.molecule.final_atoms() {
            write_atom_line(
                writer,
                serial,
                system.segment_id(),
                instance.residue_id,
                instance.molecule.residue_name(),
                atom,
            )?;
            serial += 1;
        }
    }
    Ok(())
}

fn write_atom_line(
    writer: &mut impl Write,
    serial: usize,
    segment: &str,
    residue_id: usize,
    residue_name: &str,
    atom: &Atom,
) -> io::Result<()> {
    writeln!(
        writer,
        "{:>8}    {:3} {:3} {:3}  {:3}   {:3}  {:.6}   {:.4}  0   {:.5}       {:.5}",
        serial,
        segment,
        residue_id,
        residue_name,
        atom.symbol,
        atom.label,
        atom.charge,
        atom.mass,
        atom.polarizability,
        atom.thole
    )
}

/// Writes one connectivity section: a count line, then `per_line` records per line,
/// each index 1-based and offset by the instance's position in the box.
fn write_section<const N: usize>(
    writer: &mut impl Write,
    system: &System,
    title: &str,
    total: usize,
    per_line: usize,
    relation: impl Fn(&Molecule) -> Vec<[usize; N]>,
) -> io::Result<()> {
    writeln!(writer, "{:>8} {}", total, title)?;
    write!(writer, " ")?;

    let mut written = 0;
    for instance in system.instances() {
        let offset = instance.base + 1;
        for record in relation(instance.molecule) {
            for index in record {
                write!(writer, "{:7} ", index + offset)?;
            }
            written += 1;
            if written % per_line == 0 && written < total {
                write!(writer, "\n ")?;
            }
        }
    }
    writeln!(writer)
}
