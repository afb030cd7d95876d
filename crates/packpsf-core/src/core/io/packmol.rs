use super::error::ParseError;
use super::lines::{LineReader, columns, parse_int};
use super::traits::InputFile;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// One `structure ... end structure` block of a Packmol input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureEntry {
    /// Coordinate file of the species, resolved against the manifest directory.
    pub path: PathBuf,
    /// Number of copies Packmol places.
    pub count: usize,
}

/// The parts of a Packmol input file that describe the packed box's composition.
///
/// Everything else (tolerances, constraints, box geometry) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackmolManifest {
    /// Coordinate stream Packmol writes the packed box to.
    pub output: Option<PathBuf>,
    pub structures: Vec<StructureEntry>,
}

impl PackmolManifest {
    /// Reads a manifest, resolving relative paths against its own directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        <Self as InputFile>::read_from_path(path, base_dir)
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(content, _)| content)
}

impl InputFile for PackmolManifest {
    type Output = PackmolManifest;
    type Options = Path;

    fn read_from(reader: &mut impl BufRead, base_dir: &Path) -> Result<Self, ParseError> {
        let mut lines = LineReader::new(reader);
        let mut manifest = PackmolManifest::default();
        let mut current: Option<PathBuf> = None;

        while let Some(raw) = lines.next_line()? {
            let line_num = lines.line();
            let tokens: Vec<&str> = strip_comment(&raw).split_whitespace().collect();
            let Some(&keyword) = tokens.first() else {
                continue;
            };

            match (&current, keyword) {
                (None, "output") => {
                    let tokens = columns(strip_comment(&raw), line_num, 2)?;
                    manifest.output = Some(base_dir.join(tokens[1]));
                }
                (None, "structure") => {
                    let tokens = columns(strip_comment(&raw), line_num, 2)?;
                    current = Some(base_dir.join(tokens[1]));
                }
                (Some(_), "end") => current = None,
                (Some(path), "number") => {
                    let tokens = columns(strip_comment(&raw), line_num, 2)?;
                    manifest.structures.push(StructureEntry {
                        path: path.clone(),
                        count: parse_int(tokens[1], line_num)?,
                    });
                }
                _ => {}
            }
        }

        if current.is_some() {
            return Err(ParseError::eof("structure block"));
        }
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    const INPUT: &str = "\
# ionic liquid box
tolerance 2.0
filetype xyz
output box.xyz

structure emim.xyz
  number 20
  inside box 0. 0. 0. 40. 40. 40.
end structure

structure bf4.xyz   # anion
  number 20
end structure
";

    fn parse(input: &str, base: &str) -> Result<PackmolManifest, ParseError> {
        PackmolManifest::read_from(&mut Cursor::new(input), Path::new(base))
    }

    #[test]
    fn reads_output_and_structures_in_order() {
        let manifest = parse(INPUT, "/data").unwrap();

        assert_eq!(manifest.output, Some(PathBuf::from("/data/box.xyz")));
        assert_eq!(
            manifest.structures,
            vec![
                StructureEntry {
                    path: PathBuf::from("/data/emim.xyz"),
                    count: 20
                },
                StructureEntry {
                    path: PathBuf::from("/data/bf4.xyz"),
                    count: 20
                },
            ]
        );
    }

    #[test]
    fn keywords_inside_structure_blocks_are_not_top_level() {
        let input = "structure a.xyz\n  output ignored.xyz\n  number 3\nend structure\n";
        let manifest = parse(input, "").unwrap();
        assert_eq!(manifest.output, None);
        assert_eq!(manifest.structures[0].count, 3);
        assert_eq!(manifest.structures[0].path, PathBuf::from("a.xyz"));
    }

    #[test]
    fn unterminated_structure_block_is_an_error() {
        let result = parse("structure a.xyz\nnumber 2\n", "");
        assert!(matches!(result, Err(ParseError::UnexpectedEof { .. })));
    }

    #[test]
    fn invalid_count_reports_line() {
        let result = parse("structure a.xyz\nnumber many\nend structure\n", "");
        assert!(matches!(result, Err(ParseError::Parse { line: 2, .. })));
    }

    #[test]
    fn load_resolves_paths_relative_to_manifest_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mix.inp");
        fs::write(&path, INPUT).unwrap();

        let manifest = PackmolManifest::load(&path).unwrap();
        assert_eq!(manifest.output, Some(dir.path().join("box.xyz")));
        assert_eq!(manifest.structures[1].path, dir.path().join("bf4.xyz"));
    }
}
