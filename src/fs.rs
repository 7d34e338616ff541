use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::config::Format;
use crate::parser;
use crate::puzzle::Puzzle;
use crate::LoadPuzzle;

pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn Error>> {
    let mut file = File::open(path)?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

impl<P: AsRef<Path> + ?Sized> LoadPuzzle for P {
    fn load_puzzle(&self) -> Result<Puzzle, Box<dyn Error>> {
        let text = read_file(self)?;
        Ok(parser::parse(&text)?)
    }

    fn load_puzzle_as(&self, format: Format) -> Result<Puzzle, Box<dyn Error>> {
        let text = read_file(self)?;
        Ok(parser::parse_format(&text, format)?)
    }
}
