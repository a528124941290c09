//! Access to gzip-compressed `level.dat` files.
//!
//! This is a thin layer over [`NbtDocument`]: it unpacks the gzip container,
//! checks that the `Data` compound carries the fields a level file must have,
//! and packs the patched buffer again.

use std::{
    fmt::{self, Display},
    io::{Read, Write},
};

use flate2::{Compression, GzBuilder, read::GzDecoder};

use crate::{Error, NbtDocument, Number, TagID};

const DATA: &str = "Data";
const GAME_TYPE: &str = "GameType";
const LEVEL_NAME: &str = "LevelName";

/// File name written into the gzip header.
pub const LEVEL_FILE_NAME: &str = "level.dat";

/// Operating system byte written into the gzip header (FAT filesystem).
const GZIP_OS_FAT: u8 = 0;

pub type LevelResult<T> = std::result::Result<T, LevelError>;

/// Errors raised while handling a level file.
#[derive(Debug)]
pub enum LevelError {
    /// Reading or writing the gzip stream failed.
    IO(std::io::Error),
    /// The codec rejected an operation on a valid level.
    Nbt(Error),
    /// The input is not a level file. Carries the reason.
    NotALevel(String),
    /// Only survival (0) and creative (1) can be written.
    InvalidGameType(i64),
}

impl Display for LevelError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelError::IO(error) => write!(formatter, "{error}"),
            LevelError::Nbt(error) => write!(formatter, "{error}"),
            LevelError::NotALevel(reason) => {
                write!(formatter, "the selected file is not a valid level.dat file: {reason}")
            }
            LevelError::InvalidGameType(value) => write!(formatter, "invalid game mode: {value}"),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::IO(error) => Some(error),
            LevelError::Nbt(error) => Some(error),
            LevelError::NotALevel(_) | LevelError::InvalidGameType(_) => None,
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(error: std::io::Error) -> Self {
        LevelError::IO(error)
    }
}

impl From<Error> for LevelError {
    fn from(error: Error) -> Self {
        LevelError::Nbt(error)
    }
}

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameType {
    Survival = 0,
    Creative = 1,
}

impl TryFrom<i64> for GameType {
    type Error = LevelError;

    fn try_from(value: i64) -> LevelResult<Self> {
        match value {
            0 => Ok(GameType::Survival),
            1 => Ok(GameType::Creative),
            _ => Err(LevelError::InvalidGameType(value)),
        }
    }
}

/// A decoded level file.
pub struct LevelData {
    doc: NbtDocument,
}

impl LevelData {
    /// Gunzips and decodes a level file.
    pub fn from_gzip(data: &[u8]) -> LevelResult<Self> {
        let mut decompressed = Vec::new();
        GzDecoder::new(data)
            .read_to_end(&mut decompressed)
            .map_err(|e| LevelError::NotALevel(format!("gzip: {e}")))?;
        Self::from_nbt(decompressed)
    }

    /// Decodes an already decompressed level file.
    pub fn from_nbt(buffer: Vec<u8>) -> LevelResult<Self> {
        let doc = NbtDocument::decode(buffer).map_err(|e| LevelError::NotALevel(e.to_string()))?;
        let data = doc
            .get(&[DATA])
            .filter(|tag| tag.id() == TagID::Compound)
            .ok_or_else(|| LevelError::NotALevel(format!("missing {DATA} compound")))?;
        for field in [GAME_TYPE, LEVEL_NAME] {
            if data.get(field).is_none() {
                return Err(LevelError::NotALevel(format!("missing {field}")));
            }
        }
        tracing::debug!(bytes = doc.buffer().len(), "loaded level data");
        Ok(Self { doc })
    }

    pub fn document(&self) -> &NbtDocument {
        &self.doc
    }

    /// The stored game mode, as is. Values other than survival and creative
    /// (adventure, spectator) are returned unchanged.
    pub fn game_type(&self) -> LevelResult<u32> {
        self.doc
            .get(&[DATA, GAME_TYPE])
            .ok_or_else(|| LevelError::NotALevel(format!("missing {GAME_TYPE}")))?
            .value()
            .as_int()
            .ok_or_else(|| LevelError::NotALevel(format!("{GAME_TYPE} is not an int")))
    }

    pub fn set_game_type(&mut self, game_type: GameType) -> LevelResult<()> {
        self.doc
            .set_value(&[DATA, GAME_TYPE], Number::from(game_type as u8))?;
        tracing::debug!(?game_type, "game type updated");
        Ok(())
    }

    /// The level name, one character per byte.
    pub fn level_name(&self) -> LevelResult<String> {
        self.doc
            .get(&[DATA, LEVEL_NAME])
            .and_then(|tag| tag.value().as_string())
            .map(|name| name.decode())
            .ok_or_else(|| LevelError::NotALevel(format!("{LEVEL_NAME} is not a string")))
    }

    /// Compresses the current buffer into a gzip stream ready to be saved.
    pub fn to_gzip(&self) -> LevelResult<Vec<u8>> {
        let mut encoder = GzBuilder::new()
            .filename(LEVEL_FILE_NAME)
            .operating_system(GZIP_OS_FAT)
            .write(Vec::new(), Compression::fast());
        encoder.write_all(self.doc.buffer())?;
        let out = encoder.finish()?;
        tracing::debug!(bytes = out.len(), "compressed level data");
        Ok(out)
    }

    pub fn into_document(self) -> NbtDocument {
        self.doc
    }
}
